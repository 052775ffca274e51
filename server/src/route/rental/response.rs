use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use application::transfer::{ProgressDto, RentalDto};

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct RentalResponse {
    id: Uuid,
    user_id: Uuid,
    film_id: Uuid,
    credits_spent: i64,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    expires_at: OffsetDateTime,
    progress: i64,
    is_active: bool,
}

impl From<RentalDto> for RentalResponse {
    fn from(value: RentalDto) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            film_id: value.film_id,
            credits_spent: value.credits_spent,
            created_at: value.created_at,
            expires_at: value.expires_at,
            progress: value.progress,
            is_active: value.is_active,
        }
    }
}

/// Answers a rent with `201 Created`.
#[derive(Debug)]
pub struct RentedResponse(RentalResponse);

impl IntoResponse for RentedResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, axum::Json(self.0)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    progress: i64,
}

pub struct Presenter;

impl Exhaust<RentalDto> for Presenter {
    type To = RentedResponse;
    fn emit(&self, input: RentalDto) -> Self::To {
        RentedResponse(RentalResponse::from(input))
    }
}

impl Exhaust<ProgressDto> for Presenter {
    type To = axum::Json<ProgressResponse>;
    fn emit(&self, input: ProgressDto) -> Self::To {
        axum::Json(ProgressResponse {
            progress: input.progress,
        })
    }
}

impl Exhaust<Vec<RentalDto>> for Presenter {
    type To = axum::Json<Vec<RentalResponse>>;
    fn emit(&self, input: Vec<RentalDto>) -> Self::To {
        axum::Json(input.into_iter().map(RentalResponse::from).collect())
    }
}
