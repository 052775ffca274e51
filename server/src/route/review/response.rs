use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use application::transfer::{EligibilityDto, ReviewDto};
use kernel::prelude::entity::ReviewEligibility;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct EligibilityResponse {
    allowed: bool,
    reason: String,
    eligibility: ReviewEligibility,
}

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    id: Uuid,
    user_id: Uuid,
    film_id: Uuid,
    rating: i32,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

impl From<ReviewDto> for ReviewResponse {
    fn from(value: ReviewDto) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            film_id: value.film_id,
            rating: value.rating,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

pub struct Presenter;

impl Exhaust<EligibilityDto> for Presenter {
    type To = axum::Json<EligibilityResponse>;
    fn emit(
        &self,
        EligibilityDto {
            allowed,
            reason,
            eligibility,
        }: EligibilityDto,
    ) -> Self::To {
        axum::Json(EligibilityResponse {
            allowed,
            reason,
            eligibility,
        })
    }
}

impl Exhaust<ReviewDto> for Presenter {
    type To = axum::Json<ReviewResponse>;
    fn emit(&self, input: ReviewDto) -> Self::To {
        axum::Json(ReviewResponse::from(input))
    }
}

impl Exhaust<Vec<ReviewDto>> for Presenter {
    type To = axum::Json<Vec<ReviewResponse>>;
    fn emit(&self, input: Vec<ReviewDto>) -> Self::To {
        axum::Json(input.into_iter().map(ReviewResponse::from).collect())
    }
}
