//! Error types

mod config;
mod load;
mod transport;

pub use config::*;
pub use load::*;
pub use transport::*;
