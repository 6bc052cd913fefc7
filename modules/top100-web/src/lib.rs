pub mod routes;
pub mod templates;

pub use routes::{router, AppState};
