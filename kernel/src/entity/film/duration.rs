use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Playable length in whole seconds.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct FilmDuration(i64);

impl FilmDuration {
    pub fn new(seconds: impl Into<i64>) -> Self {
        Self(seconds.into())
    }

    pub fn is_valid(&self) -> bool {
        self.0 > 0
    }
}
