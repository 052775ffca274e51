use error_stack::Report;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::policy::DependOnRentalPolicy;
use kernel::interface::query::{
    DependOnFilmQuery, DependOnRentalQuery, DependOnUserQuery, FilmQuery, RentalQuery, UserQuery,
};
use kernel::interface::update::{
    DependOnRentalModifier, DependOnUserModifier, RentalModifier, UserModifier,
};
use kernel::prelude::entity::{FilmId, Rental, RentalId, UserId};
use kernel::KernelError;

use crate::transfer::{GetRentalsDto, RentalDto, RentFilmDto};

/// Attempts made by [`RentFilmService::rent_film`] before a conflict is reported.
pub const MAX_RENT_ATTEMPTS: usize = 3;

#[async_trait::async_trait]
pub trait RentFilmService:
    'static
    + Sync
    + Send
    + DependOnClock
    + DependOnRentalPolicy
    + DependOnUserQuery
    + DependOnUserModifier
    + DependOnFilmQuery
    + DependOnRentalQuery
    + DependOnRentalModifier
{
    /// Debits the film's price from the user's balance and records a rental,
    /// both in one transaction.
    ///
    /// The user row is locked before anything is checked, so concurrent rents
    /// by the same user run one after another. Transaction conflicts reported
    /// by the store are retried; domain failures never are.
    async fn rent_film(&self, dto: RentFilmDto) -> error_stack::Result<RentalDto, KernelError> {
        let user_id = UserId::new(dto.user_id);
        let film_id = FilmId::new(dto.film_id);
        let now = self.clock().now();

        let mut attempt = 1;
        loop {
            match self.try_rent_film(&user_id, &film_id, now).await {
                Err(report)
                    if *report.current_context() == KernelError::Concurrency
                        && attempt < MAX_RENT_ATTEMPTS =>
                {
                    tracing::warn!(
                        user_id = %user_id.as_ref(),
                        film_id = %film_id.as_ref(),
                        attempt,
                        "rent transaction conflicted, retrying"
                    );
                    attempt += 1;
                }
                result => return result.map(|rental| RentalDto::new(rental, &now)),
            }
        }
    }

    async fn try_rent_film(
        &self,
        user_id: &UserId,
        film_id: &FilmId,
        now: OffsetDateTime,
    ) -> error_stack::Result<Rental, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let film = self
            .film_query()
            .find_by_id(&mut connection, film_id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("film {} does not exist", film_id.as_ref()))
            })?;
        let user = self
            .user_query()
            .find_by_id_for_update(&mut connection, user_id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("user {} does not exist", user_id.as_ref()))
            })?;

        if let Some(active) = self
            .rental_query()
            .find_active(&mut connection, user_id, film_id, &now)
            .await?
        {
            return Err(Report::new(KernelError::AlreadyRented).attach_printable(format!(
                "rental {} is active until {}",
                active.id().as_ref(),
                active.expires_at().as_ref()
            )));
        }

        let remaining = user.credits().debit(film.price()).ok_or_else(|| {
            Report::new(KernelError::InsufficientCredits).attach_printable(format!(
                "balance {} is below price {}",
                user.credits().as_ref(),
                film.price().as_ref()
            ))
        })?;

        let rental = Rental::start(
            RentalId::new(Uuid::new_v4()),
            user_id.clone(),
            &film,
            self.rental_policy(),
            now,
        );
        self.user_modifier()
            .update_credits(&mut connection, user_id, &remaining)
            .await?;
        self.rental_modifier()
            .create(&mut connection, &rental)
            .await?;
        connection.commit().await?;

        tracing::info!(
            user_id = %user_id.as_ref(),
            film_id = %film_id.as_ref(),
            rental_id = %rental.id().as_ref(),
            remaining = remaining.as_ref(),
            "film rented"
        );
        Ok(rental)
    }
}

impl<T> RentFilmService for T where
    T: DependOnClock
        + DependOnRentalPolicy
        + DependOnUserQuery
        + DependOnUserModifier
        + DependOnFilmQuery
        + DependOnRentalQuery
        + DependOnRentalModifier
{
}

#[async_trait::async_trait]
pub trait GetRentalsService: 'static + Sync + Send + DependOnClock + DependOnRentalQuery {
    async fn get_rentals(
        &self,
        dto: GetRentalsDto,
    ) -> error_stack::Result<Vec<RentalDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let now = self.clock().now();

        let user_id = UserId::new(dto.user_id);
        let rentals = self
            .rental_query()
            .find_by_user_id(&mut connection, &user_id)
            .await?;

        Ok(rentals
            .into_iter()
            .map(|rental| RentalDto::new(rental, &now))
            .collect())
    }
}

impl<T> GetRentalsService for T where T: DependOnClock + DependOnRentalQuery {}
