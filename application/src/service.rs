mod account;
mod catalog;
mod progress;
mod rental;
mod review;

pub use self::{account::*, catalog::*, progress::*, rental::*, review::*};
