//! SQLite storage implementation for the security catalog.

mod model;
mod repository;

pub use model::{NewSecurityDB, SecurityDB};
pub use repository::SecurityRepository;
