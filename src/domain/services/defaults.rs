/// Product modules, in navigation order: (feature key, label).
pub const MODULES: &[(&str, &str)] = &[
    ("crm", "CRM"),
    ("finance", "Finance"),
    ("hr", "HR"),
    ("inventory", "Inventory"),
    ("website", "Website"),
];

/// Feature keys seeded, enabled, for every newly provisioned tenant.
pub fn default_feature_keys() -> Vec<String> {
    MODULES.iter().map(|(key, _)| key.to_string()).collect()
}

pub fn module_label(key: &str) -> Option<&'static str> {
    MODULES.iter().find(|(k, _)| *k == key).map(|(_, label)| *label)
}
