pub mod calculate;
pub mod offers;
pub mod schedule;
pub mod validate;
