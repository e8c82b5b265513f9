pub mod capabilities;
pub mod common;
pub mod health;
pub mod quotes;

pub use capabilities::get_capabilities;
pub use health::{health, ready};
pub use quotes::post_quotes;
