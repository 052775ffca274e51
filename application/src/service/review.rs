use error_stack::Report;
use uuid::Uuid;

use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::policy::DependOnRentalPolicy;
use kernel::interface::query::{
    DependOnFilmQuery, DependOnRentalQuery, DependOnReviewQuery, FilmQuery, RentalQuery,
    ReviewQuery,
};
use kernel::interface::update::{DependOnReviewModifier, ReviewModifier};
use kernel::prelude::entity::{
    CreatedAt, FilmId, Review, ReviewEligibility, ReviewId, ReviewRating, UpdatedAt, UserId,
};
use kernel::KernelError;

use crate::transfer::{CanReviewDto, EligibilityDto, GetReviewsDto, PostReviewDto, ReviewDto};

#[async_trait::async_trait]
pub trait CanReviewService:
    'static
    + Sync
    + Send
    + DependOnClock
    + DependOnRentalPolicy
    + DependOnFilmQuery
    + DependOnRentalQuery
{
    async fn can_review(
        &self,
        dto: CanReviewDto,
    ) -> error_stack::Result<EligibilityDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let eligibility = self
            .review_eligibility(
                &mut connection,
                &UserId::new(dto.user_id),
                &FilmId::new(dto.film_id),
            )
            .await?;
        Ok(EligibilityDto::from(eligibility))
    }

    async fn review_eligibility(
        &self,
        connection: &mut <Self::DatabaseConnection as DatabaseConnection>::Transaction,
        user_id: &UserId,
        film_id: &FilmId,
    ) -> error_stack::Result<ReviewEligibility, KernelError> {
        let now = self.clock().now();
        let film = self
            .film_query()
            .find_by_id(&mut *connection, film_id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("film {} does not exist", film_id.as_ref()))
            })?;
        let rentals = self
            .rental_query()
            .find_by_user_and_film(&mut *connection, user_id, film_id)
            .await?;
        Ok(ReviewEligibility::evaluate(
            &rentals,
            &film,
            self.rental_policy(),
            &now,
        ))
    }
}

impl<T> CanReviewService for T where
    T: DependOnClock + DependOnRentalPolicy + DependOnFilmQuery + DependOnRentalQuery
{
}

#[async_trait::async_trait]
pub trait PostReviewService:
    'static + Sync + Send + CanReviewService + DependOnReviewQuery + DependOnReviewModifier
{
    /// Creates the user's review of the film, or edits the one they already posted.
    async fn post_review(&self, dto: PostReviewDto) -> error_stack::Result<ReviewDto, KernelError> {
        let rating = ReviewRating::parse(dto.rating)?;
        let user_id = UserId::new(dto.user_id);
        let film_id = FilmId::new(dto.film_id);

        let mut connection = self.database_connection().transact().await?;

        let eligibility = self
            .review_eligibility(&mut connection, &user_id, &film_id)
            .await?;
        if !eligibility.is_allowed() {
            return Err(Report::new(KernelError::ReviewNotAllowed)
                .attach_printable(eligibility.reason()));
        }

        let now = self.clock().now();
        let existing = self
            .review_query()
            .find_by_user_and_film(&mut connection, &user_id, &film_id)
            .await?;
        let review = match existing {
            Some(existing) => existing.reconstruct(|review| {
                review.rating = rating;
                review.updated_at = UpdatedAt::new(now);
            }),
            None => Review::new(
                ReviewId::new(Uuid::new_v4()),
                user_id,
                film_id,
                rating,
                CreatedAt::new(now),
                UpdatedAt::new(now),
            ),
        };
        // a concurrent first post for the same pair turns this into an edit
        let review = self
            .review_modifier()
            .save(&mut connection, &review)
            .await?;
        connection.commit().await?;

        tracing::info!(
            review_id = %review.id().as_ref(),
            rating = review.rating().as_ref(),
            "review saved"
        );
        Ok(ReviewDto::from(review))
    }
}

impl<T> PostReviewService for T where
    T: CanReviewService + DependOnReviewQuery + DependOnReviewModifier
{
}

#[async_trait::async_trait]
pub trait GetReviewsService: 'static + Sync + Send + DependOnReviewQuery {
    async fn get_reviews(
        &self,
        dto: GetReviewsDto,
    ) -> error_stack::Result<Vec<ReviewDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let film_id = FilmId::new(dto.film_id);
        let reviews = self
            .review_query()
            .find_by_film_id(&mut connection, &film_id)
            .await?;
        Ok(reviews.into_iter().map(ReviewDto::from).collect())
    }
}

impl<T> GetReviewsService for T where T: DependOnReviewQuery {}

#[cfg(test)]
mod test {
    use time::Duration;
    use uuid::Uuid;

    use kernel::prelude::entity::ReviewEligibility;
    use kernel::KernelError;

    use crate::service::test::TestModule;
    use crate::service::{
        CanReviewService, GetReviewsService, PostReviewService, RentFilmService,
        UpdateProgressService,
    };
    use crate::transfer::{
        CanReviewDto, GetReviewsDto, PostReviewDto, RentFilmDto, UpdateProgressDto,
    };

    async fn watch(
        module: &TestModule,
        user_id: Uuid,
        film_id: Uuid,
        progress: f64,
    ) -> error_stack::Result<(), KernelError> {
        module
            .update_progress(UpdateProgressDto {
                user_id,
                film_id,
                progress,
            })
            .await?;
        Ok(())
    }

    #[tokio::test]
    async fn eligibility_follows_rentals() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new();
        let user_id = module.user(30).await?;
        let film_id = module.film(3600, 10).await?;

        let eligibility = module.can_review(CanReviewDto { user_id, film_id }).await?;
        assert_eq!(eligibility.eligibility, ReviewEligibility::NeverRented);
        assert_eq!(eligibility.reason, "never rented");

        module.rent_film(RentFilmDto { user_id, film_id }).await?;
        watch(&module, user_id, film_id, 600.0).await?;
        let eligibility = module.can_review(CanReviewDto { user_id, film_id }).await?;
        assert_eq!(eligibility.eligibility, ReviewEligibility::KeepWatching);

        module.advance(Duration::hours(49));
        let eligibility = module.can_review(CanReviewDto { user_id, film_id }).await?;
        assert_eq!(eligibility.eligibility, ReviewEligibility::ExpiredWithoutViewing);
        assert!(!eligibility.allowed);

        module.rent_film(RentFilmDto { user_id, film_id }).await?;
        watch(&module, user_id, film_id, 1800.0).await?;
        module.advance(Duration::hours(49));
        let eligibility = module.can_review(CanReviewDto { user_id, film_id }).await?;
        assert_eq!(eligibility.eligibility, ReviewEligibility::Watched);
        assert!(eligibility.allowed);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_film_cannot_be_reviewed() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new();
        let user_id = module.user(0).await?;
        let result = module
            .can_review(CanReviewDto {
                user_id,
                film_id: Uuid::new_v4(),
            })
            .await;
        assert_eq!(
            result.map_err(|report| *report.current_context()),
            Err(KernelError::NotFound)
        );
        Ok(())
    }

    #[tokio::test]
    async fn review_requires_watching() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new();
        let user_id = module.user(10).await?;
        let film_id = module.film(3600, 10).await?;
        module.rent_film(RentFilmDto { user_id, film_id }).await?;
        watch(&module, user_id, film_id, 1000.0).await?;

        let result = module
            .post_review(PostReviewDto {
                user_id,
                film_id,
                rating: 4,
            })
            .await;
        assert_eq!(
            result.map_err(|report| *report.current_context()),
            Err(KernelError::ReviewNotAllowed)
        );
        let reviews = module.get_reviews(GetReviewsDto { film_id }).await?;
        assert!(reviews.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn posting_again_edits_the_review() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new();
        let user_id = module.user(10).await?;
        let film_id = module.film(3600, 10).await?;
        module.rent_film(RentFilmDto { user_id, film_id }).await?;
        watch(&module, user_id, film_id, 3600.0).await?;

        let first = module
            .post_review(PostReviewDto {
                user_id,
                film_id,
                rating: 5,
            })
            .await?;
        module.advance(Duration::minutes(5));
        let second = module
            .post_review(PostReviewDto {
                user_id,
                film_id,
                rating: 2,
            })
            .await?;

        assert_eq!(first.id, second.id);
        assert_eq!(second.rating, 2);
        assert_eq!(second.created_at, first.created_at);
        assert!(second.updated_at > first.updated_at);

        let reviews = module.get_reviews(GetReviewsDto { film_id }).await?;
        assert_eq!(reviews, vec![second]);
        Ok(())
    }

    #[tokio::test]
    async fn rating_out_of_range() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new();
        let user_id = module.user(10).await?;
        let film_id = module.film(3600, 10).await?;
        module.rent_film(RentFilmDto { user_id, film_id }).await?;
        watch(&module, user_id, film_id, 3600.0).await?;

        for rating in [0, 6] {
            let result = module
                .post_review(PostReviewDto {
                    user_id,
                    film_id,
                    rating,
                })
                .await;
            assert_eq!(
                result.map_err(|report| *report.current_context()),
                Err(KernelError::InvalidInput)
            );
        }
        Ok(())
    }
}
