use std::fmt::Display;

use crate::sanitize::sanitize_to;

/// A field the generator had to alter or fill in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    CreditorName,
    CreditorAddress,
    CreditorBic,
    MandateId,
    DebtorName,
    DebtorBic,
    Remittance,
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Field::CreditorName => "creditor name",
            Field::CreditorAddress => "creditor address",
            Field::CreditorBic => "creditor BIC",
            Field::MandateId => "mandate reference",
            Field::DebtorName => "debtor name",
            Field::DebtorBic => "debtor BIC",
            Field::Remittance => "remittance information",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    Truncated { field: Field, limit: usize },
    CharactersRemoved { field: Field },
    /// NOTPROVIDED was written instead.
    Placeholder { field: Field },
    AmountRounded { original: String },
    NonPositiveAmount { amount: String },
    EmptyMandateReference,
}

impl Display for WarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WarningKind::Truncated { field, limit } => {
                write!(f, "{field} cut to {limit} characters")
            }
            WarningKind::CharactersRemoved { field } => {
                write!(f, "{field} had characters outside the SEPA set removed")
            }
            WarningKind::Placeholder { field } => write!(f, "{field} missing, NOTPROVIDED used"),
            WarningKind::AmountRounded { original } => {
                write!(f, "amount {original} rounded to whole cents")
            }
            WarningKind::NonPositiveAmount { amount } => {
                write!(f, "amount {amount} is not positive")
            }
            WarningKind::EmptyMandateReference => f.write_str("mandate reference is empty"),
        }
    }
}

/// Position of a transaction in the input batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRef {
    pub index: usize,
    pub member_id: String,
}

/// Something non-fatal that happened while generating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// `None` for creditor fields.
    pub transaction: Option<TransactionRef>,
    pub kind: WarningKind,
}

impl Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(t) = &self.transaction {
            write!(f, "transaction {} (member {}): ", t.index, t.member_id)?;
        }
        self.kind.fmt(f)
    }
}

#[derive(Debug, Default)]
pub(crate) struct Warnings(Vec<Warning>);

impl Warnings {
    pub fn push(&mut self, transaction: Option<&TransactionRef>, kind: WarningKind) {
        let warning = Warning {
            transaction: transaction.cloned(),
            kind,
        };
        tracing::warn!("{warning}");
        self.0.push(warning);
    }

    /// Sanitizes `input` to `limit` characters, recording what got lost.
    pub fn text(
        &mut self,
        transaction: Option<&TransactionRef>,
        field: Field,
        input: &str,
        limit: usize,
    ) -> String {
        let sanitized = sanitize_to(input, limit);
        if sanitized.removed {
            self.push(transaction, WarningKind::CharactersRemoved { field });
        }
        if sanitized.truncated {
            self.push(transaction, WarningKind::Truncated { field, limit });
        }
        sanitized.text
    }

    pub fn into_inner(self) -> Vec<Warning> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_records_removed_and_truncated() {
        let mut warnings = Warnings::default();
        let at = TransactionRef {
            index: 2,
            member_id: "17".to_string(),
        };
        let text = warnings.text(Some(&at), Field::DebtorName, "Zoë & Søren Æbelø", 10);
        assert_eq!(text, "Zo  Sren b");
        let warnings = warnings.into_inner();
        assert_eq!(
            warnings.iter().map(|w| w.kind.clone()).collect::<Vec<_>>(),
            vec![
                WarningKind::CharactersRemoved {
                    field: Field::DebtorName
                },
                WarningKind::Truncated {
                    field: Field::DebtorName,
                    limit: 10
                },
            ]
        );
        assert_eq!(
            warnings[1].to_string(),
            "transaction 2 (member 17): debtor name cut to 10 characters"
        );
    }

    #[test]
    fn clean_text_records_nothing() {
        let mut warnings = Warnings::default();
        assert_eq!(
            warnings.text(None, Field::CreditorName, "Budo Dojo Köln", 70),
            "Budo Dojo Koeln"
        );
        assert!(warnings.into_inner().is_empty());
    }
}
