pub mod discovery;
pub mod progress;
