pub mod auth;
pub mod context;
pub mod domain;
pub mod feature;
pub mod membership;
pub mod permission;
pub mod session;
pub mod tenant;
pub mod user;
