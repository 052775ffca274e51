use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Identifier assigned by the external metadata provider the catalog is ingested from.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct ExternalFilmId(String);

impl ExternalFilmId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn is_valid(&self) -> bool {
        !self.0.trim().is_empty()
    }
}
