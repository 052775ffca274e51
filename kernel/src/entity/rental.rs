mod expires_at;
mod id;
mod progress;

pub use self::{expires_at::*, id::*, progress::*};
use destructure::{Destructure, Mutation};
use time::OffsetDateTime;
use vodca::References;

use crate::entity::{CreatedAt, Film, FilmDuration, FilmId, RentalPolicy, RentalPrice, UserId};

/// A time-boxed grant to watch a film, paid for with credits.
///
/// Rentals are kept forever as history. Only `progress` changes after
/// creation; whether the rental is still active is derived from
/// `expires_at` and the current time, never stored.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Rental {
    id: RentalId,
    user_id: UserId,
    film_id: FilmId,
    credits_spent: RentalPrice,
    created_at: CreatedAt<Rental>,
    expires_at: ExpiresAt,
    progress: RentalProgress,
}

impl Rental {
    pub fn new(
        id: RentalId,
        user_id: UserId,
        film_id: FilmId,
        credits_spent: RentalPrice,
        created_at: CreatedAt<Rental>,
        expires_at: ExpiresAt,
        progress: RentalProgress,
    ) -> Self {
        Self {
            id,
            user_id,
            film_id,
            credits_spent,
            created_at,
            expires_at,
            progress,
        }
    }

    /// A fresh rental of `film` starting at `now`, charged at the film's price.
    pub fn start(
        id: RentalId,
        user_id: UserId,
        film: &Film,
        policy: &RentalPolicy,
        now: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            user_id,
            film_id: film.id().clone(),
            credits_spent: *film.price(),
            created_at: CreatedAt::new(now),
            expires_at: ExpiresAt::new(now + *policy.rental_window().as_ref()),
            progress: RentalProgress::default(),
        }
    }

    pub fn is_active(&self, now: &OffsetDateTime) -> bool {
        !self.expires_at.has_passed(now)
    }

    /// Progress to store after the player reports `reported`: clamped into the
    /// film's length and never behind what was already reached.
    pub fn advanced_progress(
        &self,
        reported: RentalProgress,
        duration: &FilmDuration,
    ) -> RentalProgress {
        self.progress.furthest(reported.clamp_to(duration))
    }
}
