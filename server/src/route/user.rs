mod request;
mod response;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

use application::service::{CreateUserService, GetUserService};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::identity::Identity;
use crate::route::user::request::{CreateRequest, GetRequest, Transformer};
use crate::route::user::response::{Presenter, UserResponse};

pub trait UserRouter {
    fn route_user(self) -> Self;
}

impl UserRouter for Router<AppModule> {
    fn route_user(self) -> Self {
        self.route(
            "/users",
            post(
                |State(handler): State<AppModule>,
                 identity: Identity,
                 Json(req): Json<CreateRequest>| async move {
                    identity.require_admin().map_err(ErrorStatus::from)?;
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| handler.create_user(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/users/:id",
            get(
                |State(handler): State<AppModule>, identity: Identity, Path(id): Path<Uuid>| async move {
                    identity.require_self_or_admin(&id).map_err(ErrorStatus::from)?;
                    Controller::new(Transformer, Presenter)
                        .intake(GetRequest::new(id))
                        .handle(|dto| handler.get_user(dto))
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| {
                            res.map(UserResponse::into_response)
                                .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
                        })
                },
            ),
        )
    }
}
