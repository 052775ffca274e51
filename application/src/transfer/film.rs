use kernel::prelude::entity::{DestructFilm, Film};
use uuid::Uuid;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FilmDto {
    pub id: Uuid,
    pub external_id: String,
    pub title: String,
    pub duration: i64,
    pub price: i64,
}

impl From<Film> for FilmDto {
    fn from(value: Film) -> Self {
        let DestructFilm {
            id,
            external_id,
            title,
            duration,
            price,
        } = value.into_destruct();
        Self {
            id: id.into(),
            external_id: external_id.into(),
            title: title.into(),
            duration: duration.into(),
            price: price.into(),
        }
    }
}

pub struct GetFilmDto {
    pub id: Uuid,
}

pub struct GetFilmsDto {
    pub limit: i32,
    pub offset: i32,
}

pub struct CreateFilmDto {
    pub external_id: String,
    pub title: String,
    pub duration: i64,
    pub price: i64,
}
