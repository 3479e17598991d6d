//! Request handlers for catalog operations.

mod query;
mod update;

pub use query::*;
pub use update::*;
