use kernel::prelude::entity::{DestructReview, Review, ReviewEligibility};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ReviewDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub film_id: Uuid,
    pub rating: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<Review> for ReviewDto {
    fn from(value: Review) -> Self {
        let DestructReview {
            id,
            user_id,
            film_id,
            rating,
            created_at,
            updated_at,
        } = value.into_destruct();
        Self {
            id: id.into(),
            user_id: user_id.into(),
            film_id: film_id.into(),
            rating: rating.into(),
            created_at: created_at.into(),
            updated_at: updated_at.into(),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EligibilityDto {
    pub allowed: bool,
    pub reason: String,
    pub eligibility: ReviewEligibility,
}

impl From<ReviewEligibility> for EligibilityDto {
    fn from(value: ReviewEligibility) -> Self {
        Self {
            allowed: value.is_allowed(),
            reason: value.reason().to_string(),
            eligibility: value,
        }
    }
}

pub struct CanReviewDto {
    pub user_id: Uuid,
    pub film_id: Uuid,
}

pub struct PostReviewDto {
    pub user_id: Uuid,
    pub film_id: Uuid,
    pub rating: i32,
}

pub struct GetReviewsDto {
    pub film_id: Uuid,
}
