use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::FilmQuery;
use kernel::interface::update::FilmModifier;
use kernel::prelude::entity::{
    ExternalFilmId, Film, FilmDuration, FilmId, FilmTitle, RentalPrice, SelectLimit, SelectOffset,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresFilmRepository;

#[async_trait::async_trait]
impl FilmQuery for PostgresFilmRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &FilmId,
    ) -> error_stack::Result<Option<Film>, KernelError> {
        PgFilmInternal::find_by_id(con, id).await
    }

    async fn find_by_external_id(
        &self,
        con: &mut PostgresTransaction,
        external_id: &ExternalFilmId,
    ) -> error_stack::Result<Option<Film>, KernelError> {
        PgFilmInternal::find_by_external_id(con, external_id).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Film>, KernelError> {
        PgFilmInternal::find_all(con, limit, offset).await
    }
}

#[async_trait::async_trait]
impl FilmModifier for PostgresFilmRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        film: &Film,
    ) -> error_stack::Result<(), KernelError> {
        PgFilmInternal::create(con, film).await
    }
}

#[derive(sqlx::FromRow)]
struct FilmRow {
    id: Uuid,
    external_id: String,
    title: String,
    duration: i64,
    price: i64,
}

impl From<FilmRow> for Film {
    fn from(value: FilmRow) -> Self {
        Film::new(
            FilmId::new(value.id),
            ExternalFilmId::new(value.external_id),
            FilmTitle::new(value.title),
            FilmDuration::new(value.duration),
            RentalPrice::new(value.price),
        )
    }
}

pub(in crate::database) struct PgFilmInternal;

impl PgFilmInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &FilmId,
    ) -> error_stack::Result<Option<Film>, KernelError> {
        let row = sqlx::query_as::<_, FilmRow>(
            // language=postgresql
            r#"
            SELECT id, external_id, title, duration, price
            FROM films
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Film::from))
    }

    async fn find_by_external_id(
        con: &mut PgConnection,
        external_id: &ExternalFilmId,
    ) -> error_stack::Result<Option<Film>, KernelError> {
        let row = sqlx::query_as::<_, FilmRow>(
            // language=postgresql
            r#"
            SELECT id, external_id, title, duration, price
            FROM films
            WHERE external_id = $1
            "#,
        )
        .bind(external_id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Film::from))
    }

    async fn find_all(
        con: &mut PgConnection,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Film>, KernelError> {
        let rows = sqlx::query_as::<_, FilmRow>(
            // language=postgresql
            r#"
            SELECT id, external_id, title, duration, price
            FROM films
            ORDER BY title, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::from(*limit.as_ref()))
        .bind(i64::from(*offset.as_ref()))
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Film::from).collect())
    }

    async fn create(con: &mut PgConnection, film: &Film) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO films (id, external_id, title, duration, price)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(film.id().as_ref())
        .bind(film.external_id().as_ref())
        .bind(film.title().as_ref())
        .bind(film.duration().as_ref())
        .bind(film.price().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::FilmQuery;
    use kernel::interface::update::FilmModifier;
    use kernel::prelude::entity::{
        ExternalFilmId, Film, FilmDuration, FilmId, FilmTitle, RentalPrice,
    };
    use kernel::KernelError;

    use crate::database::postgres::film::PostgresFilmRepository;
    use crate::database::postgres::PostgresDatabase;

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn find_by_id() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut connection = db.transact().await?;
        let id = FilmId::new(Uuid::new_v4());
        let external_id = ExternalFilmId::new(format!("test-{}", Uuid::new_v4()));
        let film = Film::new(
            id.clone(),
            external_id.clone(),
            FilmTitle::new("test"),
            FilmDuration::new(5400),
            RentalPrice::new(10),
        );

        PostgresFilmRepository.create(&mut connection, &film).await?;

        let found = PostgresFilmRepository
            .find_by_id(&mut connection, &id)
            .await?;
        assert_eq!(found, Some(film.clone()));

        let found = PostgresFilmRepository
            .find_by_external_id(&mut connection, &external_id)
            .await?;
        assert_eq!(found, Some(film.clone()));

        let duplicated = film.reconstruct(|f| f.id = FilmId::new(Uuid::new_v4()));
        let result = PostgresFilmRepository
            .create(&mut connection, &duplicated)
            .await;
        assert_eq!(
            result.map_err(|report| *report.current_context()),
            Err(KernelError::AlreadyExists)
        );
        Ok(())
    }
}
