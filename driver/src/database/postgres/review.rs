use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::ReviewQuery;
use kernel::interface::update::ReviewModifier;
use kernel::prelude::entity::{
    CreatedAt, FilmId, Review, ReviewId, ReviewRating, UpdatedAt, UserId,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresReviewRepository;

#[async_trait::async_trait]
impl ReviewQuery for PostgresReviewRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_user_and_film(
        &self,
        con: &mut PostgresTransaction,
        user_id: &UserId,
        film_id: &FilmId,
    ) -> error_stack::Result<Option<Review>, KernelError> {
        PgReviewInternal::find_by_user_and_film(con, user_id, film_id).await
    }

    async fn find_by_film_id(
        &self,
        con: &mut PostgresTransaction,
        film_id: &FilmId,
    ) -> error_stack::Result<Vec<Review>, KernelError> {
        PgReviewInternal::find_by_film_id(con, film_id).await
    }
}

#[async_trait::async_trait]
impl ReviewModifier for PostgresReviewRepository {
    type Transaction = PostgresTransaction;

    async fn save(
        &self,
        con: &mut PostgresTransaction,
        review: &Review,
    ) -> error_stack::Result<Review, KernelError> {
        PgReviewInternal::save(con, review).await
    }
}

#[derive(sqlx::FromRow)]
struct ReviewRow {
    id: Uuid,
    user_id: Uuid,
    film_id: Uuid,
    rating: i32,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<ReviewRow> for Review {
    fn from(value: ReviewRow) -> Self {
        Review::new(
            ReviewId::new(value.id),
            UserId::new(value.user_id),
            FilmId::new(value.film_id),
            ReviewRating::new(value.rating),
            CreatedAt::new(value.created_at),
            UpdatedAt::new(value.updated_at),
        )
    }
}

pub(in crate::database) struct PgReviewInternal;

impl PgReviewInternal {
    async fn find_by_user_and_film(
        con: &mut PgConnection,
        user_id: &UserId,
        film_id: &FilmId,
    ) -> error_stack::Result<Option<Review>, KernelError> {
        let row = sqlx::query_as::<_, ReviewRow>(
            // language=postgresql
            r#"
            SELECT id, user_id, film_id, rating, created_at, updated_at
            FROM reviews
            WHERE user_id = $1 AND film_id = $2
            "#,
        )
        .bind(user_id.as_ref())
        .bind(film_id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Review::from))
    }

    async fn find_by_film_id(
        con: &mut PgConnection,
        film_id: &FilmId,
    ) -> error_stack::Result<Vec<Review>, KernelError> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            // language=postgresql
            r#"
            SELECT id, user_id, film_id, rating, created_at, updated_at
            FROM reviews
            WHERE film_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(film_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Review::from).collect())
    }

    async fn save(con: &mut PgConnection, review: &Review) -> error_stack::Result<Review, KernelError> {
        let row = sqlx::query_as::<_, ReviewRow>(
            // language=postgresql
            r#"
            INSERT INTO reviews (id, user_id, film_id, rating, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, film_id)
            DO UPDATE SET rating = EXCLUDED.rating, updated_at = EXCLUDED.updated_at
            RETURNING id, user_id, film_id, rating, created_at, updated_at
            "#,
        )
        .bind(review.id().as_ref())
        .bind(review.user_id().as_ref())
        .bind(review.film_id().as_ref())
        .bind(review.rating().as_ref())
        .bind(review.created_at().as_ref())
        .bind(review.updated_at().as_ref())
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(Review::from(row))
    }
}
