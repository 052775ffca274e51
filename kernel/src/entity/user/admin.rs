use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize, Fromln, AsRefln)]
pub struct IsAdmin(bool);

impl IsAdmin {
    pub fn new(value: impl Into<bool>) -> Self {
        Self(value.into())
    }
}
