use kernel::prelude::entity::{DestructRental, Rental};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RentalDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub film_id: Uuid,
    pub credits_spent: i64,
    pub created_at: OffsetDateTime,
    pub expires_at: OffsetDateTime,
    pub progress: i64,
    pub is_active: bool,
}

impl RentalDto {
    pub fn new(rental: Rental, now: &OffsetDateTime) -> Self {
        let is_active = rental.is_active(now);
        let DestructRental {
            id,
            user_id,
            film_id,
            credits_spent,
            created_at,
            expires_at,
            progress,
        } = rental.into_destruct();
        Self {
            id: id.into(),
            user_id: user_id.into(),
            film_id: film_id.into(),
            credits_spent: credits_spent.into(),
            created_at: created_at.into(),
            expires_at: expires_at.into(),
            progress: progress.into(),
            is_active,
        }
    }
}

pub struct RentFilmDto {
    pub user_id: Uuid,
    pub film_id: Uuid,
}

pub struct GetRentalsDto {
    pub user_id: Uuid,
}

pub struct UpdateProgressDto {
    pub user_id: Uuid,
    pub film_id: Uuid,
    /// Seconds, as reported by the player.
    pub progress: f64,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ProgressDto {
    pub progress: i64,
}
