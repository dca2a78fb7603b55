pub mod health;
pub mod tiering_handlers;

pub use health::*;
pub use tiering_handlers::*;
