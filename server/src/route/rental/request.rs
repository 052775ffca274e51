use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use axum::Json;
use error_stack::Report;
use serde::Deserialize;
use uuid::Uuid;

use application::transfer::{GetRentalsDto, RentFilmDto, UpdateProgressDto};
use kernel::KernelError;

use crate::controller::Intake;
use crate::error::ErrorStatus;

#[derive(Debug)]
pub struct RentRequest {
    user_id: Uuid,
    film_id: Uuid,
}

impl RentRequest {
    pub fn new(user_id: Uuid, film_id: Uuid) -> Self {
        Self { user_id, film_id }
    }
}

/// Playback position in seconds, as reported by the player.
#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    progress: f64,
}

/// A body whose `progress` is missing, null or not a number is an
/// `InvalidProgress`, the same as a negative one.
#[async_trait]
impl<S> FromRequest<S> for ProgressRequest
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<ProgressRequest>::from_request(req, state).await {
            Ok(Json(progress)) => Ok(progress),
            Err(JsonRejection::JsonDataError(error)) => Err(invalid_progress(error.body_text())),
            Err(JsonRejection::JsonSyntaxError(error)) => Err(invalid_progress(error.body_text())),
            Err(rejection) => Err(rejection.into_response()),
        }
    }
}

fn invalid_progress(reason: String) -> Response {
    ErrorStatus::from(Report::new(KernelError::InvalidProgress).attach_printable(reason))
        .into_response()
}

#[derive(Debug)]
pub struct GetRentalsRequest {
    user_id: Uuid,
}

impl GetRentalsRequest {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

pub struct Transformer;

impl Intake<RentRequest> for Transformer {
    type To = RentFilmDto;
    fn emit(&self, RentRequest { user_id, film_id }: RentRequest) -> Self::To {
        RentFilmDto { user_id, film_id }
    }
}

impl Intake<(Uuid, Uuid, ProgressRequest)> for Transformer {
    type To = UpdateProgressDto;
    fn emit(&self, (user_id, film_id, req): (Uuid, Uuid, ProgressRequest)) -> Self::To {
        UpdateProgressDto {
            user_id,
            film_id,
            progress: req.progress,
        }
    }
}

impl Intake<GetRentalsRequest> for Transformer {
    type To = GetRentalsDto;
    fn emit(&self, input: GetRentalsRequest) -> Self::To {
        GetRentalsDto {
            user_id: input.user_id,
        }
    }
}

#[cfg(test)]
mod test {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::routing::put;
    use axum::{Json, Router};
    use tower::util::ServiceExt;

    use crate::route::rental::request::ProgressRequest;

    fn app() -> Router {
        Router::new().route(
            "/progress",
            put(|req: ProgressRequest| async move { Json(req.progress) }),
        )
    }

    async fn put_progress(body: &'static str) -> StatusCode {
        let request = Request::put("/progress")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        app().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn numeric_progress_is_accepted() {
        assert_eq!(put_progress(r#"{"progress":1500}"#).await, StatusCode::OK);
        assert_eq!(put_progress(r#"{"progress":12.5}"#).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn non_numeric_progress_is_a_bad_request() {
        for body in [
            r#"{"progress":"abc"}"#,
            r#"{"progress":null}"#,
            r#"{}"#,
            r#"{"progress":"#,
        ] {
            assert_eq!(put_progress(body).await, StatusCode::BAD_REQUEST, "{body}");
        }
    }

    #[tokio::test]
    async fn missing_content_type_keeps_axum_rejection() {
        let request = Request::put("/progress")
            .body(Body::from(r#"{"progress":1}"#))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
