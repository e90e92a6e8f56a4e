pub mod workout;
pub mod session;
