mod id;
mod rating;

pub use self::{id::*, rating::*};
use destructure::{Destructure, Mutation};
use vodca::References;

use crate::entity::{CreatedAt, FilmId, UpdatedAt, UserId};

/// At most one review exists per (user, film). Posting again edits it.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Review {
    id: ReviewId,
    user_id: UserId,
    film_id: FilmId,
    rating: ReviewRating,
    created_at: CreatedAt<Review>,
    updated_at: UpdatedAt<Review>,
}

impl Review {
    pub fn new(
        id: ReviewId,
        user_id: UserId,
        film_id: FilmId,
        rating: ReviewRating,
        created_at: CreatedAt<Review>,
        updated_at: UpdatedAt<Review>,
    ) -> Self {
        Self {
            id,
            user_id,
            film_id,
            rating,
            created_at,
            updated_at,
        }
    }
}
