pub mod basis;
pub mod inspect;
