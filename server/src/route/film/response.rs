use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use uuid::Uuid;

use application::transfer::FilmDto;
use kernel::prelude::entity::FilmId;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    id: Uuid,
}

impl IntoResponse for CreatedResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, axum::Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct FilmResponse {
    id: Uuid,
    external_id: String,
    title: String,
    duration: i64,
    price: i64,
}

impl IntoResponse for FilmResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, axum::Json(self)).into_response()
    }
}

impl From<FilmDto> for FilmResponse {
    fn from(value: FilmDto) -> Self {
        Self {
            id: value.id,
            external_id: value.external_id,
            title: value.title,
            duration: value.duration,
            price: value.price,
        }
    }
}

pub struct Presenter;

impl Exhaust<FilmId> for Presenter {
    type To = CreatedResponse;
    fn emit(&self, input: FilmId) -> Self::To {
        CreatedResponse { id: input.into() }
    }
}

impl Exhaust<Option<FilmDto>> for Presenter {
    type To = Option<FilmResponse>;
    fn emit(&self, input: Option<FilmDto>) -> Self::To {
        input.map(FilmResponse::from)
    }
}

impl Exhaust<Vec<FilmDto>> for Presenter {
    type To = axum::Json<Vec<FilmResponse>>;
    fn emit(&self, input: Vec<FilmDto>) -> Self::To {
        axum::Json(input.into_iter().map(FilmResponse::from).collect())
    }
}
