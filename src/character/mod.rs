//! Player record: stats, rank, and identity.

pub mod rank;
pub mod stats;
pub mod user;

pub use rank::*;
pub use stats::*;
pub use user::*;
