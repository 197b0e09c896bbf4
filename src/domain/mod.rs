pub mod models;
pub mod names;

pub use models::*;
pub use names::normalize;
