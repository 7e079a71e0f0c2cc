pub mod cycles;
pub mod interactions;
