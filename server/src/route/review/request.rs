use serde::Deserialize;
use uuid::Uuid;

use application::transfer::{CanReviewDto, GetReviewsDto, PostReviewDto};

use crate::controller::Intake;

#[derive(Debug)]
pub struct EligibilityRequest {
    user_id: Uuid,
    film_id: Uuid,
}

impl EligibilityRequest {
    pub fn new(user_id: Uuid, film_id: Uuid) -> Self {
        Self { user_id, film_id }
    }
}

#[derive(Debug, Deserialize)]
pub struct PostRequest {
    rating: i32,
}

#[derive(Debug)]
pub struct GetReviewsRequest {
    film_id: Uuid,
}

impl GetReviewsRequest {
    pub fn new(film_id: Uuid) -> Self {
        Self { film_id }
    }
}

pub struct Transformer;

impl Intake<EligibilityRequest> for Transformer {
    type To = CanReviewDto;
    fn emit(&self, EligibilityRequest { user_id, film_id }: EligibilityRequest) -> Self::To {
        CanReviewDto { user_id, film_id }
    }
}

impl Intake<(Uuid, Uuid, PostRequest)> for Transformer {
    type To = PostReviewDto;
    fn emit(&self, (user_id, film_id, req): (Uuid, Uuid, PostRequest)) -> Self::To {
        PostReviewDto {
            user_id,
            film_id,
            rating: req.rating,
        }
    }
}

impl Intake<GetReviewsRequest> for Transformer {
    type To = GetReviewsDto;
    fn emit(&self, input: GetReviewsRequest) -> Self::To {
        GetReviewsDto {
            film_id: input.film_id,
        }
    }
}
