use serde::{Deserialize, Serialize};

/// The dojo as SEPA creditor.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CreditorConfig {
    pub name: String,
    pub street: String,
    pub postal_code: String,
    pub city: String,
    /// Two-letter country code for the postal address.
    pub country: Option<String>,
    pub creditor_id: String,
    pub iban: String,
    /// Optional under SEPA CORE.
    pub bic: Option<String>,
}
