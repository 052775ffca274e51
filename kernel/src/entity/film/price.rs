use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Credits charged for one rental window of a film.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct RentalPrice(i64);

impl RentalPrice {
    pub fn new(credits: impl Into<i64>) -> Self {
        Self(credits.into())
    }

    pub fn is_valid(&self) -> bool {
        self.0 >= 0
    }
}
