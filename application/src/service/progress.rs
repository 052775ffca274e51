use error_stack::Report;

use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{DependOnFilmQuery, DependOnRentalQuery, FilmQuery, RentalQuery};
use kernel::interface::update::{DependOnRentalModifier, RentalModifier};
use kernel::prelude::entity::{FilmId, RentalProgress, UserId};
use kernel::KernelError;

use crate::transfer::{ProgressDto, UpdateProgressDto};

#[async_trait::async_trait]
pub trait UpdateProgressService:
    'static
    + Sync
    + Send
    + DependOnClock
    + DependOnFilmQuery
    + DependOnRentalQuery
    + DependOnRentalModifier
{
    /// Records how far the user got in the film they are renting.
    ///
    /// The stored value is the furthest point reached. A report behind it
    /// (the viewer rewound) leaves it unchanged and overshoot is clamped to
    /// the film's length.
    async fn update_progress(
        &self,
        dto: UpdateProgressDto,
    ) -> error_stack::Result<ProgressDto, KernelError> {
        let reported = RentalProgress::parse(dto.progress)?;
        let user_id = UserId::new(dto.user_id);
        let film_id = FilmId::new(dto.film_id);
        let now = self.clock().now();

        let mut connection = self.database_connection().transact().await?;

        let film = self
            .film_query()
            .find_by_id(&mut connection, &film_id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("film {} does not exist", film_id.as_ref()))
            })?;

        let rental = match self
            .rental_query()
            .find_active(&mut connection, &user_id, &film_id, &now)
            .await?
        {
            Some(rental) => rental,
            None => {
                let history = self
                    .rental_query()
                    .find_by_user_and_film(&mut connection, &user_id, &film_id)
                    .await?;
                let error = if history.is_empty() {
                    KernelError::NotFound
                } else {
                    KernelError::RentalExpired
                };
                return Err(Report::new(error).attach_printable(format!(
                    "user {} has no active rental of film {}",
                    user_id.as_ref(),
                    film_id.as_ref()
                )));
            }
        };

        let target = rental.advanced_progress(reported, film.duration());
        let stored = self
            .rental_modifier()
            .advance_progress(&mut connection, rental.id(), &target)
            .await?;
        connection.commit().await?;

        tracing::debug!(
            rental_id = %rental.id().as_ref(),
            reported = reported.as_ref(),
            stored = stored.as_ref(),
            "progress updated"
        );
        Ok(ProgressDto {
            progress: stored.into(),
        })
    }
}

impl<T> UpdateProgressService for T where
    T: DependOnClock + DependOnFilmQuery + DependOnRentalQuery + DependOnRentalModifier
{
}

#[cfg(test)]
mod test {
    use time::Duration;
    use uuid::Uuid;

    use kernel::KernelError;

    use crate::service::test::TestModule;
    use crate::service::{GetRentalsService, RentFilmService, UpdateProgressService};
    use crate::transfer::{GetRentalsDto, RentFilmDto, UpdateProgressDto};

    fn report(user_id: Uuid, film_id: Uuid, progress: f64) -> UpdateProgressDto {
        UpdateProgressDto {
            user_id,
            film_id,
            progress,
        }
    }

    #[tokio::test]
    async fn progress_only_moves_forward() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new();
        let user_id = module.user(10).await?;
        let film_id = module.film(3600, 10).await?;
        module.rent_film(RentFilmDto { user_id, film_id }).await?;

        let stored = module.update_progress(report(user_id, film_id, 1200.7)).await?;
        assert_eq!(stored.progress, 1200);
        let stored = module.update_progress(report(user_id, film_id, 300.0)).await?;
        assert_eq!(stored.progress, 1200);
        let stored = module.update_progress(report(user_id, film_id, 99999.0)).await?;
        assert_eq!(stored.progress, 3600);

        let rentals = module.get_rentals(GetRentalsDto { user_id }).await?;
        assert_eq!(rentals[0].progress, 3600);
        Ok(())
    }

    #[tokio::test]
    async fn malformed_progress_is_rejected() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new();
        let user_id = module.user(10).await?;
        let film_id = module.film(3600, 10).await?;
        module.rent_film(RentFilmDto { user_id, film_id }).await?;

        for progress in [f64::NAN, f64::INFINITY, -1.0] {
            let result = module.update_progress(report(user_id, film_id, progress)).await;
            assert_eq!(
                result.map_err(|report| *report.current_context()),
                Err(KernelError::InvalidProgress)
            );
        }
        Ok(())
    }

    #[tokio::test]
    async fn never_rented_is_not_found() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new();
        let user_id = module.user(10).await?;
        let film_id = module.film(3600, 10).await?;

        let result = module.update_progress(report(user_id, film_id, 10.0)).await;
        assert_eq!(
            result.map_err(|report| *report.current_context()),
            Err(KernelError::NotFound)
        );
        Ok(())
    }

    #[tokio::test]
    async fn expired_rental_rejects_progress() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new();
        let user_id = module.user(10).await?;
        let film_id = module.film(3600, 10).await?;
        module.rent_film(RentFilmDto { user_id, film_id }).await?;
        module.update_progress(report(user_id, film_id, 100.0)).await?;

        module.advance(Duration::hours(48) + Duration::seconds(1));
        let result = module.update_progress(report(user_id, film_id, 200.0)).await;
        assert_eq!(
            result.map_err(|report| *report.current_context()),
            Err(KernelError::RentalExpired)
        );

        let rentals = module.get_rentals(GetRentalsDto { user_id }).await?;
        assert_eq!(rentals[0].progress, 100);
        assert!(!rentals[0].is_active);
        Ok(())
    }
}
