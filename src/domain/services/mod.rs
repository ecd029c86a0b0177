pub mod auth_service;
pub mod defaults;
pub mod domain_registry;
pub mod feature_flags;
pub mod host;
pub mod membership_guard;
pub mod permission_engine;
pub mod provisioning;
pub mod tenant_resolver;
