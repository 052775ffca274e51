use std::ops::RangeInclusive;

use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct ReviewRating(i32);

impl ReviewRating {
    pub const RANGE: RangeInclusive<i32> = 1..=5;

    pub fn new(rating: impl Into<i32>) -> Self {
        Self(rating.into())
    }

    pub fn parse(rating: i32) -> error_stack::Result<Self, KernelError> {
        if !Self::RANGE.contains(&rating) {
            return Err(Report::new(KernelError::InvalidInput).attach_printable(format!(
                "rating must be within {}..={}, got {rating}",
                Self::RANGE.start(),
                Self::RANGE.end()
            )));
        }
        Ok(Self(rating))
    }
}
