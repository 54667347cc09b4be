use std::io::Write;

use dojo_sepa_types::{Date, Euro};

use crate::{tree::Element, ToXml};

mod direct_debit_xml;

pub const PAIN_008_NAMESPACE: &str = "urn:iso:std:iso:20022:tech:xsd:pain.008.001.02";
pub const NOT_PROVIDED: &str = "NOTPROVIDED";

/// A `pain.008.001.02` message with exactly one payment information block.
/// All text fields are already sanitized and cut to their limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    header: GroupHeader,
    payment_information: PaymentInformation,
}

impl Document {
    pub(crate) fn new(header: GroupHeader, payment_information: PaymentInformation) -> Document {
        Document {
            header,
            payment_information,
        }
    }

    pub fn header(&self) -> &GroupHeader {
        &self.header
    }

    pub fn payment_information(&self) -> &PaymentInformation {
        &self.payment_information
    }

    pub fn to_tree(&self) -> Element {
        self.to_xml()
    }

    pub fn write<W: Write>(&self, writer: W) -> xml::writer::Result<W> {
        crate::tree::write_document(&self.to_tree(), writer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupHeader {
    /// DOJO-timestamp-random
    pub(crate) message_id: String,
    pub(crate) creation_date_time: String,
    pub(crate) number_of_transactions: usize,
    pub(crate) control_sum: Euro,
    pub(crate) initiating_party: String,
}

impl GroupHeader {
    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    pub fn number_of_transactions(&self) -> usize {
        self.number_of_transactions
    }

    pub fn control_sum(&self) -> Euro {
        self.control_sum
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalAddress {
    pub(crate) country: Option<String>,
    /// at most two
    pub(crate) lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentInformation {
    pub(crate) payment_information_id: String,
    pub(crate) number_of_transactions: usize,
    pub(crate) control_sum: Euro,
    pub(crate) collection_date: Date,
    pub(crate) creditor_name: String,
    pub(crate) creditor_address: Option<PostalAddress>,
    pub(crate) creditor_iban: String,
    /// `None` is written as NOTPROVIDED
    pub(crate) creditor_bic: Option<String>,
    pub(crate) creditor_id: String,
    pub(crate) debits: Vec<DirectDebit>,
}

impl PaymentInformation {
    pub fn number_of_transactions(&self) -> usize {
        self.number_of_transactions
    }

    pub fn control_sum(&self) -> Euro {
        self.control_sum
    }

    pub fn collection_date(&self) -> Date {
        self.collection_date
    }

    pub fn debits(&self) -> &[DirectDebit] {
        &self.debits
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectDebit {
    pub(crate) end_to_end_id: String,
    pub(crate) amount: Euro,
    pub(crate) mandate_id: String,
    pub(crate) mandate_date: Date,
    pub(crate) debtor_bic: Option<String>,
    pub(crate) debtor_name: String,
    pub(crate) debtor_iban: String,
    pub(crate) remittance: String,
}

impl DirectDebit {
    pub fn end_to_end_id(&self) -> &str {
        &self.end_to_end_id
    }

    pub fn amount(&self) -> Euro {
        self.amount
    }

    pub fn mandate_id(&self) -> &str {
        &self.mandate_id
    }

    pub fn debtor_name(&self) -> &str {
        &self.debtor_name
    }

    pub fn debtor_iban(&self) -> &str {
        &self.debtor_iban
    }

    pub fn remittance(&self) -> &str {
        &self.remittance
    }
}
