use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::RentalQuery;
use kernel::interface::update::RentalModifier;
use kernel::prelude::entity::{
    CreatedAt, ExpiresAt, FilmId, Rental, RentalId, RentalPrice, RentalProgress, UserId,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresRentalRepository;

#[async_trait::async_trait]
impl RentalQuery for PostgresRentalRepository {
    type Transaction = PostgresTransaction;

    async fn find_active(
        &self,
        con: &mut PostgresTransaction,
        user_id: &UserId,
        film_id: &FilmId,
        now: &OffsetDateTime,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        PgRentalInternal::find_active(con, user_id, film_id, now).await
    }

    async fn find_by_user_and_film(
        &self,
        con: &mut PostgresTransaction,
        user_id: &UserId,
        film_id: &FilmId,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        PgRentalInternal::find_by_user_and_film(con, user_id, film_id).await
    }

    async fn find_by_user_id(
        &self,
        con: &mut PostgresTransaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        PgRentalInternal::find_by_user_id(con, user_id).await
    }
}

#[async_trait::async_trait]
impl RentalModifier for PostgresRentalRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        PgRentalInternal::create(con, rental).await
    }

    async fn advance_progress(
        &self,
        con: &mut PostgresTransaction,
        rental_id: &RentalId,
        progress: &RentalProgress,
    ) -> error_stack::Result<RentalProgress, KernelError> {
        PgRentalInternal::advance_progress(con, rental_id, progress).await
    }
}

#[derive(sqlx::FromRow)]
struct RentalRow {
    id: Uuid,
    user_id: Uuid,
    film_id: Uuid,
    credits_spent: i64,
    created_at: OffsetDateTime,
    expires_at: OffsetDateTime,
    progress: i64,
}

impl From<RentalRow> for Rental {
    fn from(value: RentalRow) -> Self {
        Rental::new(
            RentalId::new(value.id),
            UserId::new(value.user_id),
            FilmId::new(value.film_id),
            RentalPrice::new(value.credits_spent),
            CreatedAt::new(value.created_at),
            ExpiresAt::new(value.expires_at),
            RentalProgress::new(value.progress),
        )
    }
}

pub(in crate::database) struct PgRentalInternal;

impl PgRentalInternal {
    async fn find_active(
        con: &mut PgConnection,
        user_id: &UserId,
        film_id: &FilmId,
        now: &OffsetDateTime,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        let row = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT id, user_id, film_id, credits_spent, created_at, expires_at, progress
            FROM rentals
            WHERE user_id = $1 AND film_id = $2 AND expires_at >= $3
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id.as_ref())
        .bind(film_id.as_ref())
        .bind(now)
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Rental::from))
    }

    async fn find_by_user_and_film(
        con: &mut PgConnection,
        user_id: &UserId,
        film_id: &FilmId,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        let rows = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT id, user_id, film_id, credits_spent, created_at, expires_at, progress
            FROM rentals
            WHERE user_id = $1 AND film_id = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.as_ref())
        .bind(film_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Rental::from).collect())
    }

    async fn find_by_user_id(
        con: &mut PgConnection,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        let rows = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT id, user_id, film_id, credits_spent, created_at, expires_at, progress
            FROM rentals
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Rental::from).collect())
    }

    async fn create(con: &mut PgConnection, rental: &Rental) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO rentals (id, user_id, film_id, credits_spent, created_at, expires_at, progress)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(rental.id().as_ref())
        .bind(rental.user_id().as_ref())
        .bind(rental.film_id().as_ref())
        .bind(rental.credits_spent().as_ref())
        .bind(rental.created_at().as_ref())
        .bind(rental.expires_at().as_ref())
        .bind(rental.progress().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn advance_progress(
        con: &mut PgConnection,
        rental_id: &RentalId,
        progress: &RentalProgress,
    ) -> error_stack::Result<RentalProgress, KernelError> {
        let stored = sqlx::query_scalar::<_, i64>(
            // language=postgresql
            r#"
            UPDATE rentals
            SET progress = GREATEST(progress, $2)
            WHERE id = $1
            RETURNING progress
            "#,
        )
        .bind(rental_id.as_ref())
        .bind(progress.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        stored.map(RentalProgress::new).ok_or_else(|| {
            error_stack::Report::new(KernelError::NotFound)
                .attach_printable(format!("rental {} does not exist", rental_id.as_ref()))
        })
    }
}
