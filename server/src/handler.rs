use std::ops::Deref;
use std::sync::Arc;

use driver::clock::SystemClock;
use driver::database::{
    PostgresDatabase, PostgresFilmRepository, PostgresRentalRepository, PostgresReviewRepository,
    PostgresUserRepository,
};
use kernel::interface::clock::DependOnClock;
use kernel::interface::database::DependOnDatabaseConnection;
use kernel::interface::policy::DependOnRentalPolicy;
use kernel::interface::query::{
    DependOnFilmQuery, DependOnRentalQuery, DependOnReviewQuery, DependOnUserQuery,
};
use kernel::interface::update::{
    DependOnFilmModifier, DependOnRentalModifier, DependOnReviewModifier, DependOnUserModifier,
};
use kernel::prelude::entity::RentalPolicy;
use kernel::KernelError;

#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        Ok(Self(Arc::new(Handler::init().await?)))
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

pub struct Handler {
    pgpool: PostgresDatabase,
    clock: SystemClock,
    policy: RentalPolicy,
}

impl Handler {
    pub async fn init() -> error_stack::Result<Self, KernelError> {
        let policy = driver::config::rental_policy()?;
        let pgpool = PostgresDatabase::new().await?;
        tracing::info!(
            window = %policy.rental_window().as_ref(),
            threshold = policy.review_threshold().as_ref(),
            "rental policy loaded"
        );

        Ok(Self {
            pgpool,
            clock: SystemClock,
            policy,
        })
    }
}

impl DependOnDatabaseConnection for Handler {
    type DatabaseConnection = PostgresDatabase;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        &self.pgpool
    }
}

impl DependOnClock for Handler {
    type Clock = SystemClock;
    fn clock(&self) -> &Self::Clock {
        &self.clock
    }
}

impl DependOnRentalPolicy for Handler {
    fn rental_policy(&self) -> &RentalPolicy {
        &self.policy
    }
}

impl DependOnUserQuery for Handler {
    type UserQuery = PostgresUserRepository;
    fn user_query(&self) -> &Self::UserQuery {
        &PostgresUserRepository
    }
}

impl DependOnUserModifier for Handler {
    type UserModifier = PostgresUserRepository;
    fn user_modifier(&self) -> &Self::UserModifier {
        &PostgresUserRepository
    }
}

impl DependOnFilmQuery for Handler {
    type FilmQuery = PostgresFilmRepository;
    fn film_query(&self) -> &Self::FilmQuery {
        &PostgresFilmRepository
    }
}

impl DependOnFilmModifier for Handler {
    type FilmModifier = PostgresFilmRepository;
    fn film_modifier(&self) -> &Self::FilmModifier {
        &PostgresFilmRepository
    }
}

impl DependOnRentalQuery for Handler {
    type RentalQuery = PostgresRentalRepository;
    fn rental_query(&self) -> &Self::RentalQuery {
        &PostgresRentalRepository
    }
}

impl DependOnRentalModifier for Handler {
    type RentalModifier = PostgresRentalRepository;
    fn rental_modifier(&self) -> &Self::RentalModifier {
        &PostgresRentalRepository
    }
}

impl DependOnReviewQuery for Handler {
    type ReviewQuery = PostgresReviewRepository;
    fn review_query(&self) -> &Self::ReviewQuery {
        &PostgresReviewRepository
    }
}

impl DependOnReviewModifier for Handler {
    type ReviewModifier = PostgresReviewRepository;
    fn review_modifier(&self) -> &Self::ReviewModifier {
        &PostgresReviewRepository
    }
}
