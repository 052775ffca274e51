mod request;
mod response;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use application::service::{CreateFilmService, GetFilmService};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::identity::Identity;
use crate::route::film::request::{CreateRequest, GetAllRequest, GetRequest, Transformer};
use crate::route::film::response::{FilmResponse, Presenter};

pub trait FilmRouter {
    fn route_film(self) -> Self;
}

impl FilmRouter for Router<AppModule> {
    fn route_film(self) -> Self {
        self.route(
            "/films",
            get(
                |State(handler): State<AppModule>,
                 _: Identity,
                 Query(req): Query<GetAllRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| handler.get_films(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(handler): State<AppModule>,
                 identity: Identity,
                 Json(req): Json<CreateRequest>| async move {
                    identity.require_admin().map_err(ErrorStatus::from)?;
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| handler.create_film(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/films/:id",
            get(
                |State(handler): State<AppModule>, _: Identity, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(GetRequest::new(id))
                        .handle(|dto| handler.get_film(dto))
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| {
                            res.map(FilmResponse::into_response)
                                .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
                        })
                },
            ),
        )
    }
}
