use crate::tree::Element;
use crate::ToXml;

use super::{
    DirectDebit, Document, GroupHeader, PaymentInformation, PostalAddress, NOT_PROVIDED,
    PAIN_008_NAMESPACE,
};

/// `FinInstnId/BIC`, or `FinInstnId/Othr/Id` = NOTPROVIDED without a BIC.
fn agent(name: &'static str, bic: Option<&str>) -> Element {
    let institution = match bic {
        Some(bic) => Element::leaf("BIC", bic),
        None => Element::wrapped(&["Othr"], Element::leaf("Id", NOT_PROVIDED)),
    };
    Element::wrapped(&[name, "FinInstnId"], institution)
}

fn account(name: &'static str, iban: &str) -> Element {
    Element::wrapped(&[name, "Id"], Element::leaf("IBAN", iban))
}

impl ToXml for Document {
    fn to_xml(&self) -> Element {
        Element::new("Document")
            .default_ns(PAIN_008_NAMESPACE)
            .ns("xsi", "http://www.w3.org/2001/XMLSchema-instance")
            .child(
                Element::new("CstmrDrctDbtInitn")
                    .child(self.header.to_xml())
                    .child(self.payment_information.to_xml()),
            )
    }
}

impl ToXml for GroupHeader {
    fn to_xml(&self) -> Element {
        Element::new("GrpHdr")
            .child(Element::leaf("MsgId", &self.message_id))
            .child(Element::leaf("CreDtTm", &self.creation_date_time))
            .child(Element::leaf(
                "NbOfTxs",
                self.number_of_transactions.to_string(),
            ))
            .child(Element::leaf("CtrlSum", self.control_sum.xml_string()))
            .child(Element::wrapped(
                &["InitgPty"],
                Element::leaf("Nm", &self.initiating_party),
            ))
    }
}

impl ToXml for PostalAddress {
    fn to_xml(&self) -> Element {
        Element::new("PstlAdr")
            .children(self.country.iter().map(|c| Element::leaf("Ctry", c)))
            .children(self.lines.iter().map(|l| Element::leaf("AdrLine", l)))
    }
}

impl ToXml for PaymentInformation {
    fn to_xml(&self) -> Element {
        let payment_type = Element::new("PmtTpInf")
            .child(Element::wrapped(&["SvcLvl"], Element::leaf("Cd", "SEPA")))
            .child(Element::wrapped(&["LclInstrm"], Element::leaf("Cd", "CORE")))
            .child(Element::leaf("SeqTp", "RCUR"));

        let creditor = Element::new("Cdtr")
            .child(Element::leaf("Nm", &self.creditor_name))
            .children(self.creditor_address.iter().map(ToXml::to_xml));

        let scheme_id = Element::wrapped(
            &["CdtrSchmeId", "Id", "PrvtId"],
            Element::new("Othr")
                .child(Element::leaf("Id", &self.creditor_id))
                .child(Element::wrapped(
                    &["SchmeNm"],
                    Element::leaf("Prtry", "SEPA"),
                )),
        );

        Element::new("PmtInf")
            .child(Element::leaf("PmtInfId", &self.payment_information_id))
            .child(Element::leaf("PmtMtd", "DD"))
            .child(Element::leaf("BtchBookg", "true"))
            .child(Element::leaf(
                "NbOfTxs",
                self.number_of_transactions.to_string(),
            ))
            .child(Element::leaf("CtrlSum", self.control_sum.xml_string()))
            .child(payment_type)
            .child(Element::leaf("ReqdColltnDt", self.collection_date.to_string()))
            .child(creditor)
            .child(account("CdtrAcct", &self.creditor_iban))
            .child(agent("CdtrAgt", self.creditor_bic.as_deref()))
            .child(Element::leaf("ChrgBr", "SLEV"))
            .child(scheme_id)
            .children(self.debits.iter().map(ToXml::to_xml))
    }
}

impl ToXml for DirectDebit {
    fn to_xml(&self) -> Element {
        let mandate = Element::wrapped(
            &["DrctDbtTx"],
            Element::new("MndtRltdInf")
                .child(Element::leaf("MndtId", &self.mandate_id))
                .child(Element::leaf("DtOfSgntr", self.mandate_date.to_string())),
        );

        Element::new("DrctDbtTxInf")
            .child(Element::wrapped(
                &["PmtId"],
                Element::leaf("EndToEndId", &self.end_to_end_id),
            ))
            .child(Element::leaf("InstdAmt", self.amount.xml_string()).attr("Ccy", "EUR"))
            .child(mandate)
            .child(agent("DbtrAgt", self.debtor_bic.as_deref()))
            .child(Element::wrapped(&["Dbtr"], Element::leaf("Nm", &self.debtor_name)))
            .child(account("DbtrAcct", &self.debtor_iban))
            .child(Element::wrapped(
                &["RmtInf"],
                Element::leaf("Ustrd", &self.remittance),
            ))
    }
}
