mod request;
mod response;

use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::Router;
use uuid::Uuid;

use application::service::{GetRentalsService, RentFilmService, UpdateProgressService};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::identity::Identity;
use crate::route::rental::request::{
    GetRentalsRequest, ProgressRequest, RentRequest, Transformer,
};
use crate::route::rental::response::Presenter;

pub trait RentalRouter {
    fn route_rental(self) -> Self;
}

impl RentalRouter for Router<AppModule> {
    fn route_rental(self) -> Self {
        self.route(
            "/films/:id/rentals",
            post(
                |State(handler): State<AppModule>, identity: Identity, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(RentRequest::new(identity.user_id, id))
                        .handle(|dto| handler.rent_film(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/films/:id/progress",
            put(
                |State(handler): State<AppModule>,
                 identity: Identity,
                 Path(id): Path<Uuid>,
                 req: ProgressRequest| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((identity.user_id, id, req))
                        .handle(|dto| handler.update_progress(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/users/:id/rentals",
            get(
                |State(handler): State<AppModule>, identity: Identity, Path(id): Path<Uuid>| async move {
                    identity.require_self_or_admin(&id).map_err(ErrorStatus::from)?;
                    Controller::new(Transformer, Presenter)
                        .intake(GetRentalsRequest::new(id))
                        .handle(|dto| handler.get_rentals(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
