mod film;
mod rental;
mod review;
mod user;

pub use self::{film::*, rental::*, review::*, user::*};
