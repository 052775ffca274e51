mod admin;
mod credits;
mod id;
mod name;

pub use self::{admin::*, credits::*, id::*, name::*};
use destructure::{Destructure, Mutation};
use serde::{Deserialize, Serialize};
use vodca::References;

#[derive(
    Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Destructure, Mutation, References,
)]
pub struct User {
    id: UserId,
    name: UserName,
    credits: UserCredits,
    is_admin: IsAdmin,
}

impl User {
    pub fn new(id: UserId, name: UserName, credits: UserCredits, is_admin: IsAdmin) -> Self {
        Self {
            id,
            name,
            credits,
            is_admin,
        }
    }
}
