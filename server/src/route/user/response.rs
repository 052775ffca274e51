use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use uuid::Uuid;

use application::transfer::UserDto;
use kernel::prelude::entity::UserId;

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
pub struct UserResponse {
    id: Uuid,
    name: String,
    credits: i64,
    is_admin: bool,
}

impl IntoResponse for UserResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, axum::Json(self)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<UserId> for Presenter {
    type To = CreatedResponse;
    fn emit(&self, input: UserId) -> Self::To {
        CreatedResponse { id: input.into() }
    }
}

impl Exhaust<Option<UserDto>> for Presenter {
    type To = Option<UserResponse>;
    fn emit(&self, input: Option<UserDto>) -> Self::To {
        input.map(
            |UserDto {
                 id,
                 name,
                 credits,
                 is_admin,
             }| UserResponse {
                id,
                name,
                credits,
                is_admin,
            },
        )
    }
}
