use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct ExpiresAt(#[serde(with = "time::serde::rfc3339")] OffsetDateTime);

impl ExpiresAt {
    pub fn new(time: impl Into<OffsetDateTime>) -> Self {
        Self(time.into())
    }

    /// Expiry is strict: at exactly `expires_at` the rental is still usable.
    pub fn has_passed(&self, now: &OffsetDateTime) -> bool {
        *now > self.0
    }
}
