use kernel::prelude::entity::{DestructUser, User};
use uuid::Uuid;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub credits: i64,
    pub is_admin: bool,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let DestructUser {
            id,
            name,
            credits,
            is_admin,
        } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            credits: credits.into(),
            is_admin: is_admin.into(),
        }
    }
}

pub struct GetUserDto {
    pub id: Uuid,
}

pub struct CreateUserDto {
    pub name: String,
    pub credits: i64,
    pub is_admin: bool,
}
