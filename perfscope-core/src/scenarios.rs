//! Predefined benchmark scenarios

use std::collections::BTreeMap;

/// Request key that expands to every scenario
pub const ALL: &str = "all";

const RECIPIENT_PLACEHOLDER: &str = "{recipient}";

const SCENARIOS: &[(&str, &str)] = &[
    (
        "company",
        "Produisez un dataset sur l'entreprise Discovery Intech (équipe, partenaires, références). IMPERATIVE: You must send an email notification to {recipient} after completing the dataset.",
    ),
    (
        "microsoft",
        "Produisez un dataset sur les solutions Microsoft Dynamics 365 de Discovery Intech. IMPERATIVE: You must send an email notification to {recipient} after completing the dataset.",
    ),
    (
        "qad",
        "Générez un dataset détaillé sur les solutions QAD proposées par Discovery Intech. IMPERATIVE: You must send an email notification to {recipient} after completing the dataset.",
    ),
    (
        "sage",
        "Créez un dataset complet sur toutes les solutions Sage de Discovery Intech. IMPERATIVE: You must send an email notification to {recipient} after completing the dataset.",
    ),
    (
        "sap",
        "Créez un dataset sur les solutions SAP proposées par Discovery Intech. IMPERATIVE: You must send an email notification to {recipient} after completing the dataset.",
    ),
    (
        "sectors",
        "Générez un dataset sur tous les secteurs d'activité couverts par Discovery Intech. IMPERATIVE: You must send an email notification to {recipient} after completing the dataset.",
    ),
    (
        "services",
        "Créez un dataset sur tous les services proposés par Discovery Intech. IMPERATIVE: You must send an email notification to {recipient} after completing the dataset.",
    ),
];

/// Scenario keys in sorted order
pub fn keys() -> impl Iterator<Item = &'static str> {
    SCENARIOS.iter().map(|(key, _)| *key)
}

/// Query text for `key`, addressed to `recipient`
pub fn query(key: &str, recipient: &str) -> Option<String> {
    SCENARIOS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, text)| text.replace(RECIPIENT_PLACEHOLDER, recipient))
}

/// Every scenario key mapped to its query text
pub fn available(recipient: &str) -> BTreeMap<String, String> {
    SCENARIOS
        .iter()
        .map(|(key, text)| (key.to_string(), text.replace(RECIPIENT_PLACEHOLDER, recipient)))
        .collect()
}

/// Expand a request into known scenario keys
///
/// `"all"` anywhere in the request selects every scenario. Otherwise unknown
/// keys are dropped and repeats collapse to their first occurrence.
pub fn resolve<S: AsRef<str>>(requested: &[S]) -> Vec<&'static str> {
    if requested.iter().any(|s| s.as_ref() == ALL) {
        return keys().collect();
    }

    let mut resolved: Vec<&'static str> = Vec::new();
    for name in requested {
        if let Some(key) = keys().find(|k| *k == name.as_ref()) {
            if !resolved.contains(&key) {
                resolved.push(key);
            }
        }
    }
    resolved
}
