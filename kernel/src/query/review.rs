use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{FilmId, Review, UserId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait ReviewQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_user_and_film(
        &self,
        con: &mut Self::Transaction,
        user_id: &UserId,
        film_id: &FilmId,
    ) -> error_stack::Result<Option<Review>, KernelError>;
    /// Newest first.
    async fn find_by_film_id(
        &self,
        con: &mut Self::Transaction,
        film_id: &FilmId,
    ) -> error_stack::Result<Vec<Review>, KernelError>;
}

pub trait DependOnReviewQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type ReviewQuery: ReviewQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn review_query(&self) -> &Self::ReviewQuery;
}
