pub mod bitmap;
pub mod competitive;
pub mod config;
pub mod error;
pub mod fetch;
pub mod format;
pub mod pokemon;
pub mod presentation;

pub use bitmap::*;
pub use competitive::*;
pub use config::*;
pub use error::*;
pub use fetch::*;
pub use pokemon::*;
pub use presentation::*;
