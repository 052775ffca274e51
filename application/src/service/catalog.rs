use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{DependOnFilmQuery, FilmQuery};
use kernel::interface::update::{DependOnFilmModifier, FilmModifier};
use kernel::prelude::entity::{
    ExternalFilmId, Film, FilmDuration, FilmId, FilmTitle, RentalPrice, SelectLimit, SelectOffset,
};
use kernel::KernelError;

use crate::transfer::{CreateFilmDto, FilmDto, GetFilmDto, GetFilmsDto};

#[async_trait::async_trait]
pub trait GetFilmService: 'static + Sync + Send + DependOnFilmQuery {
    async fn get_film(&self, dto: GetFilmDto) -> error_stack::Result<Option<FilmDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = FilmId::new(dto.id);
        let film = self.film_query().find_by_id(&mut connection, &id).await?;

        Ok(film.map(FilmDto::from))
    }

    async fn get_films(&self, dto: GetFilmsDto) -> error_stack::Result<Vec<FilmDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let limit = SelectLimit::new(dto.limit).capped();
        let offset = SelectOffset::new(dto.offset);
        let films = self
            .film_query()
            .find_all(&mut connection, &limit, &offset)
            .await?;

        Ok(films.into_iter().map(FilmDto::from).collect())
    }
}

impl<T> GetFilmService for T where T: DependOnFilmQuery {}

#[async_trait::async_trait]
pub trait CreateFilmService: 'static + Sync + Send + DependOnFilmQuery + DependOnFilmModifier {
    async fn create_film(&self, dto: CreateFilmDto) -> error_stack::Result<FilmId, KernelError> {
        let external_id = ExternalFilmId::new(dto.external_id);
        let title = FilmTitle::new(dto.title);
        let duration = FilmDuration::new(dto.duration);
        let price = RentalPrice::new(dto.price);
        let invalid = [
            (!external_id.is_valid()).then_some("external id must not be blank"),
            (!title.is_valid()).then_some("title must not be blank"),
            (!duration.is_valid()).then_some("duration must be positive"),
            (!price.is_valid()).then_some("price must not be negative"),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();
        if !invalid.is_empty() {
            return Err(Report::new(KernelError::InvalidInput).attach_printable(invalid.join(", ")));
        }

        let mut connection = self.database_connection().transact().await?;

        if self
            .film_query()
            .find_by_external_id(&mut connection, &external_id)
            .await?
            .is_some()
        {
            return Err(Report::new(KernelError::AlreadyExists).attach_printable(format!(
                "film {} is already in the catalog",
                external_id.as_ref()
            )));
        }

        let id = FilmId::new(Uuid::new_v4());
        let film = Film::new(id.clone(), external_id, title, duration, price);
        self.film_modifier().create(&mut connection, &film).await?;
        connection.commit().await?;

        tracing::info!(film_id = %id.as_ref(), "film added to catalog");
        Ok(id)
    }
}

impl<T> CreateFilmService for T where T: DependOnFilmQuery + DependOnFilmModifier {}
