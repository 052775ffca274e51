mod duration;
mod external_id;
mod id;
mod price;
mod title;

pub use self::{duration::*, external_id::*, id::*, price::*, title::*};
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

/// Catalog entry. Treated as read-only reference data by the rental engine.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References, Destructure)]
pub struct Film {
    id: FilmId,
    external_id: ExternalFilmId,
    title: FilmTitle,
    duration: FilmDuration,
    price: RentalPrice,
}

impl Film {
    pub fn new(
        id: FilmId,
        external_id: ExternalFilmId,
        title: FilmTitle,
        duration: FilmDuration,
        price: RentalPrice,
    ) -> Self {
        Self {
            id,
            external_id,
            title,
            duration,
            price,
        }
    }
}
