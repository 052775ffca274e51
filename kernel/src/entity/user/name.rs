use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    pub const MAX_LENGTH: usize = 64;

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn is_valid(&self) -> bool {
        let trimmed = self.0.trim();
        !trimmed.is_empty() && trimmed.chars().count() <= Self::MAX_LENGTH
    }
}
