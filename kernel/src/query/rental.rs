use time::OffsetDateTime;

use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{FilmId, Rental, UserId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait RentalQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    /// The rental of `film_id` by `user_id` that has not expired at `now`, if any.
    async fn find_active(
        &self,
        con: &mut Self::Transaction,
        user_id: &UserId,
        film_id: &FilmId,
        now: &OffsetDateTime,
    ) -> error_stack::Result<Option<Rental>, KernelError>;
    async fn find_by_user_and_film(
        &self,
        con: &mut Self::Transaction,
        user_id: &UserId,
        film_id: &FilmId,
    ) -> error_stack::Result<Vec<Rental>, KernelError>;
    /// Newest first.
    async fn find_by_user_id(
        &self,
        con: &mut Self::Transaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Rental>, KernelError>;
}

pub trait DependOnRentalQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type RentalQuery: RentalQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn rental_query(&self) -> &Self::RentalQuery;
}
