//! Scripts bundled with the binary

/// Built-in script used when nothing else is configured
pub const DEFAULT_BUILTIN: &str = "triage";

const BUILTINS: &[(&str, &str)] = &[
    ("triage", include_str!("../../scripts/triage.json")),
    (
        "triage-free-rating",
        include_str!("../../scripts/triage_free_rating.json"),
    ),
];

/// Names of all bundled scripts
pub fn builtin_names() -> Vec<&'static str> {
    BUILTINS.iter().map(|(name, _)| *name).collect()
}

pub(super) fn source(name: &str) -> Option<&'static str> {
    BUILTINS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, json)| *json)
}
