use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::Review;
use crate::KernelError;

#[async_trait::async_trait]
pub trait ReviewModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    /// Stores the review, or edits the rating of the one already posted for the
    /// same user and film. Returns the review as stored; an edit keeps the
    /// existing id and `created_at`.
    async fn save(
        &self,
        con: &mut Self::Transaction,
        review: &Review,
    ) -> error_stack::Result<Review, KernelError>;
}

pub trait DependOnReviewModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type ReviewModifier: ReviewModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn review_modifier(&self) -> &Self::ReviewModifier;
}
