use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::Film;
use crate::KernelError;

#[async_trait::async_trait]
pub trait FilmModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        film: &Film,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnFilmModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type FilmModifier: FilmModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn film_modifier(&self) -> &Self::FilmModifier;
}
