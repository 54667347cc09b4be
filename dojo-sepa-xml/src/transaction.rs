use std::fmt::Display;

use dojo_sepa_types::{Date, Euro, ParseEuroError};
use serde::{Deserialize, Serialize};

/// Member ids come out of the billing job as numbers or strings. Any JSON
/// number is accepted, including negative and fractional ones.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum MemberId {
    Number(i64),
    Fraction(f64),
    Text(String),
}

impl Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemberId::Number(n) => write!(f, "{n}"),
            MemberId::Fraction(n) => write!(f, "{n}"),
            MemberId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for MemberId {
    fn from(value: i64) -> Self {
        MemberId::Number(value)
    }
}

impl From<u64> for MemberId {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(n) => MemberId::Number(n),
            Err(_) => MemberId::Text(value.to_string()),
        }
    }
}

impl From<&str> for MemberId {
    fn from(value: &str) -> Self {
        MemberId::Text(value.to_string())
    }
}

/// An amount as delivered: a JSON number or decimal text such as `"49.90"`.
/// It is only parsed during generation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    /// The amount in cents and whether rounding changed it.
    pub fn to_euro(&self) -> Result<(Euro, bool), ParseEuroError> {
        match self {
            Amount::Number(n) => Euro::from_f64_lossy(*n),
            Amount::Text(s) => Euro::parse_lossy(s),
        }
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Amount::Number(n) => write!(f, "{n}"),
            Amount::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::Number(value)
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Amount::Text(value.to_string())
    }
}

impl From<Euro> for Amount {
    fn from(value: Euro) -> Self {
        Amount::Text(value.xml_string())
    }
}

/// One direct debit instruction.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Transaction {
    #[serde(rename = "mitglied_id")]
    pub member_id: MemberId,
    #[serde(rename = "betrag")]
    pub amount: Amount,
    #[serde(rename = "mandatsreferenz")]
    pub mandate_reference: String,
    #[serde(rename = "mandat_datum")]
    pub mandate_date: Date,
    pub iban: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bic: Option<String>,
    #[serde(rename = "kontoinhaber", default, skip_serializing_if = "Option::is_none")]
    pub account_holder: Option<String>,
    #[serde(rename = "vorname", default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "nachname", default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "verwendungszweck", default, skip_serializing_if = "Option::is_none")]
    pub remittance: Option<String>,
}

fn non_blank(s: &Option<String>) -> Option<&str> {
    s.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl Transaction {
    pub fn new(
        member_id: impl Into<MemberId>,
        amount: impl Into<Amount>,
        mandate_reference: impl ToString,
        mandate_date: Date,
        iban: impl ToString,
    ) -> Self {
        Self {
            member_id: member_id.into(),
            amount: amount.into(),
            mandate_reference: mandate_reference.to_string(),
            mandate_date,
            iban: iban.to_string(),
            bic: None,
            account_holder: None,
            first_name: None,
            last_name: None,
            remittance: None,
        }
    }

    pub fn with_bic(mut self, bic: impl ToString) -> Self {
        self.bic = Some(bic.to_string());
        self
    }

    pub fn with_account_holder(mut self, holder: impl ToString) -> Self {
        self.account_holder = Some(holder.to_string());
        self
    }

    pub fn with_name(mut self, first_name: impl ToString, last_name: impl ToString) -> Self {
        self.first_name = Some(first_name.to_string());
        self.last_name = Some(last_name.to_string());
        self
    }

    pub fn with_remittance(mut self, remittance: impl ToString) -> Self {
        self.remittance = Some(remittance.to_string());
        self
    }

    /// `kontoinhaber` if set, otherwise first and last name.
    pub fn debtor_name(&self) -> String {
        if let Some(holder) = non_blank(&self.account_holder) {
            return holder.to_string();
        }
        [non_blank(&self.first_name), non_blank(&self.last_name)]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn bic(&self) -> Option<&str> {
        non_blank(&self.bic)
    }

    pub fn remittance(&self) -> Option<&str> {
        non_blank(&self.remittance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_billing_job_records() {
        let json = r#"[
            {"mitglied_id": 17, "betrag": 49.9, "mandatsreferenz": "DOJO-17",
             "mandat_datum": "2023-02-01T00:00:00.000Z", "iban": "DE89 3704 0044 0532 0130 00",
             "bic": null, "vorname": "Kenji", "nachname": "Sato"},
            {"mitglied_id": "M-2", "betrag": "35.00", "mandatsreferenz": "DOJO-2",
             "mandat_datum": "2024-05-10", "iban": "DE02120300000000202051",
             "bic": "BYLADEM1001", "kontoinhaber": "Anna Weiß", "verwendungszweck": "Beitrag Mai"}
        ]"#;
        let transactions: Vec<Transaction> = serde_json::from_str(json).unwrap();

        assert_eq!(transactions[0].member_id, MemberId::Number(17));
        assert_eq!(transactions[0].amount, Amount::Number(49.9));
        assert_eq!(transactions[0].mandate_date, Date::new(2023, 2, 1).unwrap());
        assert_eq!(transactions[0].bic(), None);
        assert_eq!(transactions[0].debtor_name(), "Kenji Sato");

        assert_eq!(transactions[1].member_id.to_string(), "M-2");
        assert_eq!(transactions[1].amount.to_euro().unwrap().0.xml_string(), "35.00");
        assert_eq!(transactions[1].bic(), Some("BYLADEM1001"));
        assert_eq!(transactions[1].debtor_name(), "Anna Weiß");
        assert_eq!(transactions[1].remittance(), Some("Beitrag Mai"));
    }

    #[test]
    fn any_json_number_is_a_member_id() {
        let json = r#"[
            {"mitglied_id": -4, "betrag": 10, "mandatsreferenz": "R1",
             "mandat_datum": "2024-01-01", "iban": "DE89370400440532013000"},
            {"mitglied_id": 12.5, "betrag": 10, "mandatsreferenz": "R2",
             "mandat_datum": "2024-01-01", "iban": "DE89370400440532013000"}
        ]"#;
        let transactions: Vec<Transaction> = serde_json::from_str(json).unwrap();
        assert_eq!(transactions[0].member_id, MemberId::Number(-4));
        assert_eq!(transactions[0].member_id.to_string(), "-4");
        assert_eq!(transactions[1].member_id, MemberId::Fraction(12.5));
        assert_eq!(transactions[1].member_id.to_string(), "12.5");
        assert_eq!(MemberId::from(u64::MAX).to_string(), u64::MAX.to_string());
    }

    #[test]
    fn debtor_name_falls_back_to_names() {
        let date = Date::new(2024, 1, 1).unwrap();
        let t = Transaction::new(1u64, 10.0, "R", date, "DE89370400440532013000");
        assert_eq!(t.debtor_name(), "");

        let t = t.with_name(" Yuki ", "").with_account_holder("  ");
        assert_eq!(t.debtor_name(), "Yuki");

        let t = t.with_account_holder("Familie Tanaka");
        assert_eq!(t.debtor_name(), "Familie Tanaka");
    }

    #[test]
    fn malformed_amount_is_reported_on_parse() {
        assert!(Amount::from("zehn").to_euro().is_err());
        assert!(Amount::from(f64::NAN).to_euro().is_err());
        assert_eq!(Amount::from(10.005).to_euro().unwrap().0.xml_string(), "10.01");
    }
}
