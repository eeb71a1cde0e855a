// handlers/public/mod.rs - Public handlers (no authentication required)
pub mod status;

pub use status::{health, root};
