use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{DependOnUserQuery, UserQuery};
use kernel::interface::update::{DependOnUserModifier, UserModifier};
use kernel::prelude::entity::{IsAdmin, User, UserCredits, UserId, UserName};
use kernel::KernelError;

use crate::transfer::{CreateUserDto, GetUserDto, UserDto};

#[async_trait::async_trait]
pub trait GetUserService: 'static + Sync + Send + DependOnUserQuery {
    async fn get_user(&self, dto: GetUserDto) -> error_stack::Result<Option<UserDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = UserId::new(dto.id);
        let user = self.user_query().find_by_id(&mut connection, &id).await?;

        Ok(user.map(UserDto::from))
    }
}

impl<T> GetUserService for T where T: DependOnUserQuery {}

#[async_trait::async_trait]
pub trait CreateUserService: 'static + Sync + Send + DependOnUserModifier {
    /// The initial balance is granted here. Afterwards only renting changes it.
    async fn create_user(&self, dto: CreateUserDto) -> error_stack::Result<UserId, KernelError> {
        let name = UserName::new(dto.name);
        if !name.is_valid() {
            return Err(Report::new(KernelError::InvalidInput).attach_printable(format!(
                "user name must be 1..={} characters",
                UserName::MAX_LENGTH
            )));
        }
        let credits = UserCredits::new(dto.credits);
        if !credits.is_valid() {
            return Err(Report::new(KernelError::InvalidInput)
                .attach_printable(format!("credits must not be negative, got {}", dto.credits)));
        }

        let mut connection = self.database_connection().transact().await?;

        let id = UserId::new(Uuid::new_v4());
        let user = User::new(id.clone(), name, credits, IsAdmin::new(dto.is_admin));
        self.user_modifier().create(&mut connection, &user).await?;
        connection.commit().await?;

        tracing::info!(user_id = %id.as_ref(), "user created");
        Ok(id)
    }
}

impl<T> CreateUserService for T where T: DependOnUserModifier {}
