mod common;
mod eligibility;
mod film;
mod policy;
mod rental;
mod review;
mod user;

pub use self::{common::*, eligibility::*, film::*, policy::*, rental::*, review::*, user::*};
