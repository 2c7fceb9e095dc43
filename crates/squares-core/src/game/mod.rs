pub mod round;
pub mod snapshot;
