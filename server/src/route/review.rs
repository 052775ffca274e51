mod request;
mod response;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use application::service::{CanReviewService, GetReviewsService, PostReviewService};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::identity::Identity;
use crate::route::review::request::{
    EligibilityRequest, GetReviewsRequest, PostRequest, Transformer,
};
use crate::route::review::response::Presenter;

pub trait ReviewRouter {
    fn route_review(self) -> Self;
}

impl ReviewRouter for Router<AppModule> {
    fn route_review(self) -> Self {
        self.route(
            "/films/:id/eligibility",
            get(
                |State(handler): State<AppModule>, identity: Identity, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(EligibilityRequest::new(identity.user_id, id))
                        .handle(|dto| handler.can_review(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/films/:id/reviews",
            get(
                |State(handler): State<AppModule>, _: Identity, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(GetReviewsRequest::new(id))
                        .handle(|dto| handler.get_reviews(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .put(
                |State(handler): State<AppModule>,
                 identity: Identity,
                 Path(id): Path<Uuid>,
                 Json(req): Json<PostRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((identity.user_id, id, req))
                        .handle(|dto| handler.post_review(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
