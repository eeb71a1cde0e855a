// handlers/protected/mod.rs - handlers behind `authenticate_token`
//
// Every handler here may rely on an `AuthContext` extension being present.
pub mod auth;
pub mod users;
