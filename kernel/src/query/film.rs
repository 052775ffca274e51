use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{ExternalFilmId, Film, FilmId, SelectLimit, SelectOffset};
use crate::KernelError;

#[async_trait::async_trait]
pub trait FilmQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &FilmId,
    ) -> error_stack::Result<Option<Film>, KernelError>;
    async fn find_by_external_id(
        &self,
        con: &mut Self::Transaction,
        external_id: &ExternalFilmId,
    ) -> error_stack::Result<Option<Film>, KernelError>;
    /// Ordered by title.
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Film>, KernelError>;
}

pub trait DependOnFilmQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type FilmQuery: FilmQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn film_query(&self) -> &Self::FilmQuery;
}
