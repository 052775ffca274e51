mod operation;
mod time;

pub use self::{operation::*, time::*};
