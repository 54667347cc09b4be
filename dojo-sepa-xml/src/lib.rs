mod direct_debit;
mod generator;
mod sanitize;
mod transaction;
pub mod tree;
mod validate;
mod warning;

pub use direct_debit::{
    DirectDebit, Document, GroupHeader, PaymentInformation, NOT_PROVIDED, PAIN_008_NAMESPACE,
};
pub use generator::{
    Field, Generated, SepaError, SepaXmlGenerator, TransactionRef, Warning, WarningKind,
};
pub use sanitize::{is_sepa_char, sanitize, FREE_TEXT_LIMIT, IDENTIFIER_LIMIT};
pub use transaction::{Amount, MemberId, Transaction};
pub use validate::{iban_checksum_valid, validate_bic, validate_creditor_id, validate_iban};

use dojo_sepa_types::Address;
use tree::Element;

/// The dojo collecting the debits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Creditor {
    pub address: Address,
    pub creditor_id: String,
    pub iban: String,
    pub bic: Option<String>,
}

impl Creditor {
    pub fn new(name: impl ToString, creditor_id: impl ToString, iban: impl ToString) -> Self {
        Self {
            address: Address::new(name, "", "", "", None::<&str>),
            creditor_id: creditor_id.to_string(),
            iban: iban.to_string(),
            bic: None,
        }
    }

    pub fn with_address(
        mut self,
        street_and_number: impl ToString,
        postal_code: impl ToString,
        city: impl ToString,
        country: Option<impl ToString>,
    ) -> Self {
        let name = std::mem::take(&mut self.address.name);
        self.address = Address::new(name, street_and_number, postal_code, city, country);
        self
    }

    pub fn with_bic(mut self, bic: impl ToString) -> Self {
        self.bic = Some(bic.to_string());
        self
    }

    pub fn from_config(cfg: &dojo_sepa_config::CreditorConfig) -> Self {
        Self {
            address: Address::new(
                &cfg.name,
                &cfg.street,
                &cfg.postal_code,
                &cfg.city,
                cfg.country.as_ref(),
            ),
            creditor_id: cfg.creditor_id.clone(),
            iban: cfg.iban.clone(),
            bic: cfg.bic.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.address.name
    }

    pub fn bic(&self) -> Option<&str> {
        self.bic.as_deref().map(str::trim).filter(|b| !b.is_empty())
    }

    /// Everything that would make a bank reject this creditor.
    pub fn problems(&self) -> Vec<&'static str> {
        let mut problems = Vec::new();
        if self.name().trim().is_empty() {
            problems.push("creditor name is empty");
        }
        if self.iban.trim().is_empty() {
            problems.push("creditor IBAN is missing");
        } else if !validate_iban(&self.iban) {
            problems.push("creditor IBAN is malformed");
        } else if !iban_checksum_valid(&self.iban) {
            problems.push("creditor IBAN has wrong check digits");
        }
        if self.creditor_id.trim().is_empty() {
            problems.push("creditor identifier is missing");
        } else if !validate_creditor_id(&self.creditor_id) {
            problems.push("creditor identifier is malformed");
        }
        if !validate_bic(self.bic().unwrap_or_default()) {
            problems.push("creditor BIC is malformed");
        }
        problems
    }
}

trait ToXml {
    fn to_xml(&self) -> Element;
}
