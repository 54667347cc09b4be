use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use dojo_sepa_types::{Date, Euro, ParseEuroError};
use rand::{thread_rng, Rng};
use thiserror::Error;

use crate::{
    direct_debit::{
        DirectDebit, Document, GroupHeader, PaymentInformation, PostalAddress, NOT_PROVIDED,
    },
    sanitize::{sanitize_to, take_chars, FREE_TEXT_LIMIT, IDENTIFIER_LIMIT},
    validate::strip_whitespace,
    warning::Warnings,
    Creditor, Transaction,
};

pub use crate::warning::{Field, TransactionRef, Warning, WarningKind};

const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const MESSAGE_ID_PREFIX: &str = "DOJO";
const MESSAGE_ID_RANDOM_CHARS: usize = 6;
/// Characters of the mandate reference that go into an end-to-end id.
const END_TO_END_REFERENCE_CHARS: usize = 20;

#[derive(Debug, Error)]
pub enum SepaError {
    #[error("transaction {index} (member {member_id}): invalid amount {value:?}: {source}")]
    InvalidAmount {
        index: usize,
        member_id: String,
        value: String,
        #[source]
        source: ParseEuroError,
    },
    #[error("could not write XML: {0}")]
    Xml(#[from] xml::writer::Error),
    #[error("generated XML is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Output of [`SepaXmlGenerator::generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub xml: String,
    pub warnings: Vec<Warning>,
}

/// Builds one pain.008 message. The message id and creation time are fixed
/// when the generator is created, so every `generate` call on one instance
/// describes the same message; use a new instance for every batch.
#[derive(Debug, Clone)]
pub struct SepaXmlGenerator {
    creditor: Creditor,
    message_id: String,
    created_at: DateTime<Utc>,
}

impl SepaXmlGenerator {
    pub fn new(creditor: Creditor) -> Self {
        Self::with_sources(creditor, Utc::now(), &mut thread_rng())
    }

    pub fn with_sources<R: Rng>(creditor: Creditor, now: DateTime<Utc>, rng: &mut R) -> Self {
        let random: String = (0..MESSAGE_ID_RANDOM_CHARS)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();
        let message_id = format!(
            "{MESSAGE_ID_PREFIX}-{}-{random}",
            now.format("%Y%m%d%H%M%S")
        );
        Self {
            creditor,
            message_id: take_chars(&message_id, IDENTIFIER_LIMIT).to_string(),
            created_at: now.trunc_subsecs(0),
        }
    }

    pub fn creditor(&self) -> &Creditor {
        &self.creditor
    }

    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    /// `YYYY-MM-DDTHH:MM:SSZ`
    pub fn creation_date_time(&self) -> String {
        self.created_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    pub fn creation_date(&self) -> Date {
        Date::from(self.created_at.date_naive())
    }

    /// Builds the message without serializing it. Without a requested
    /// collection date the creation date is used.
    pub fn build_document(
        &self,
        transactions: &[Transaction],
        requested_collection_date: Option<Date>,
    ) -> Result<(Document, Vec<Warning>), SepaError> {
        let mut warnings = Warnings::default();
        let today = self.creation_date();

        let creditor_name = warnings.text(
            None,
            Field::CreditorName,
            self.creditor.name(),
            FREE_TEXT_LIMIT,
        );
        let creditor_address = self.postal_address(&mut warnings);
        let creditor_bic = self.creditor.bic().map(normalize_code);
        if creditor_bic.is_none() {
            warnings.push(
                None,
                WarningKind::Placeholder {
                    field: Field::CreditorBic,
                },
            );
        }

        let debits = transactions
            .iter()
            .enumerate()
            .map(|(index, t)| direct_debit(index, t, today, &mut warnings))
            .collect::<Result<Vec<_>, _>>()?;
        let control_sum = debits.iter().map(DirectDebit::amount).sum::<Euro>();

        tracing::debug!(
            message_id = %self.message_id,
            transactions = debits.len(),
            control_sum = %control_sum.xml_string(),
            "built direct debit message"
        );

        let header = GroupHeader {
            message_id: self.message_id.clone(),
            creation_date_time: self.creation_date_time(),
            number_of_transactions: debits.len(),
            control_sum,
            initiating_party: creditor_name.clone(),
        };
        let payment_information = PaymentInformation {
            payment_information_id: take_chars(
                &format!("{}-PMT1", self.message_id),
                IDENTIFIER_LIMIT,
            )
            .to_string(),
            number_of_transactions: debits.len(),
            control_sum,
            collection_date: requested_collection_date.unwrap_or(today),
            creditor_name,
            creditor_address,
            creditor_iban: normalize_code(&self.creditor.iban),
            creditor_bic,
            creditor_id: normalize_code(&self.creditor.creditor_id),
            debits,
        };
        Ok((
            Document::new(header, payment_information),
            warnings.into_inner(),
        ))
    }

    /// Renders the message as indented UTF-8 XML.
    pub fn generate(
        &self,
        transactions: &[Transaction],
        requested_collection_date: Option<Date>,
    ) -> Result<Generated, SepaError> {
        let (document, warnings) = self.build_document(transactions, requested_collection_date)?;
        let xml = String::from_utf8(document.write(Vec::new())?)?;
        Ok(Generated { xml, warnings })
    }

    fn postal_address(&self, warnings: &mut Warnings) -> Option<PostalAddress> {
        let address = &self.creditor.address;
        let lines: Vec<String> = address
            .address_lines()
            .iter()
            .map(|line| warnings.text(None, Field::CreditorAddress, line, FREE_TEXT_LIMIT))
            .filter(|line| !line.is_empty())
            .collect();
        if lines.is_empty() {
            return None;
        }
        let country = address
            .country
            .as_deref()
            .and_then(country_code)
            .or_else(|| country_code(take_chars(self.creditor.iban.trim(), 2)));
        Some(PostalAddress { country, lines })
    }
}

fn direct_debit(
    index: usize,
    transaction: &Transaction,
    today: Date,
    warnings: &mut Warnings,
) -> Result<DirectDebit, SepaError> {
    let at = TransactionRef {
        index,
        member_id: transaction.member_id.to_string(),
    };
    let at = Some(&at);

    let (amount, rounded) =
        transaction
            .amount
            .to_euro()
            .map_err(|source| SepaError::InvalidAmount {
                index,
                member_id: transaction.member_id.to_string(),
                value: transaction.amount.to_string(),
                source,
            })?;
    if rounded {
        warnings.push(
            at,
            WarningKind::AmountRounded {
                original: transaction.amount.to_string(),
            },
        );
    }
    if !amount.is_positive() {
        warnings.push(
            at,
            WarningKind::NonPositiveAmount {
                amount: amount.xml_string(),
            },
        );
    }

    let reference = transaction.mandate_reference.trim();
    let cleaned = sanitize_to(reference, usize::MAX).text;
    let (mandate_id, end_to_end_id) = if cleaned.trim().is_empty() {
        warnings.push(at, WarningKind::EmptyMandateReference);
        (String::new(), NOT_PROVIDED.to_string())
    } else {
        let mandate_id = warnings.text(at, Field::MandateId, reference, IDENTIFIER_LIMIT);
        let prefix = take_chars(&cleaned, END_TO_END_REFERENCE_CHARS);
        let end_to_end_id = format!("{prefix}-{}", today.compact());
        (
            mandate_id,
            take_chars(&end_to_end_id, IDENTIFIER_LIMIT).to_string(),
        )
    };

    let debtor_name = transaction.debtor_name();
    let debtor_name = if debtor_name.is_empty() {
        warnings.push(
            at,
            WarningKind::Placeholder {
                field: Field::DebtorName,
            },
        );
        NOT_PROVIDED.to_string()
    } else {
        warnings.text(at, Field::DebtorName, &debtor_name, FREE_TEXT_LIMIT)
    };

    let debtor_bic = transaction.bic().map(normalize_code);
    if debtor_bic.is_none() {
        warnings.push(
            at,
            WarningKind::Placeholder {
                field: Field::DebtorBic,
            },
        );
    }

    let remittance = match transaction.remittance() {
        Some(text) => text.to_string(),
        None => format!("Mitgliedsbeitrag {}", today.german_month_year()),
    };

    Ok(DirectDebit {
        end_to_end_id,
        amount,
        mandate_id,
        mandate_date: transaction.mandate_date,
        debtor_bic,
        debtor_name,
        debtor_iban: normalize_code(&transaction.iban),
        remittance: warnings.text(at, Field::Remittance, &remittance, FREE_TEXT_LIMIT),
    })
}

/// IBANs, BICs and creditor ids: no whitespace, upper case.
fn normalize_code(code: &str) -> String {
    strip_whitespace(code).to_uppercase()
}

fn country_code(code: &str) -> Option<String> {
    let code = code.trim();
    (code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()))
        .then(|| code.to_ascii_uppercase())
}
