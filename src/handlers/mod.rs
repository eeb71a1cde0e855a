// handlers/mod.rs - two security tiers
//
// Public (no auth) → Protected (bearer token resolved to a user)
pub mod public;
pub mod protected;
