pub mod error;
pub mod types;
pub mod tiers;
pub mod definitions;
pub mod catalog;
pub mod grid;
pub mod adaptive;
pub mod session;
pub mod narrative;
pub mod report;

pub use error::MaturityError;
pub use types::*;
