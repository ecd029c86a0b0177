pub mod auth;
pub mod maybe_auth;
pub mod super_admin;
pub mod tenant;
