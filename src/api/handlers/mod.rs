pub mod admin;
pub mod auth;
pub mod feature;
pub mod health;
pub mod member;
pub mod permission;
pub mod site;
pub mod tenant;
