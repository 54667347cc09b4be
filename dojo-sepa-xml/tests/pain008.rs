use chrono::{TimeZone, Utc};
use dojo_sepa_types::{Date, Euro};
use dojo_sepa_xml::{
    Creditor, SepaXmlGenerator, Transaction, WarningKind, PAIN_008_NAMESPACE,
};
use rand::{rngs::StdRng, SeedableRng};
use xml::reader::{EventReader, XmlEvent};

/// Text of every leaf element, keyed by its slash-joined path.
fn leaves(xml: &str) -> Vec<(String, String)> {
    let mut path: Vec<String> = vec![];
    let mut text = String::new();
    let mut out = vec![];
    for event in EventReader::new(xml.as_bytes()) {
        match event.expect("well-formed XML") {
            XmlEvent::StartElement { name, .. } => {
                path.push(name.local_name);
                text.clear();
            }
            XmlEvent::Characters(t) => text.push_str(&t),
            XmlEvent::EndElement { .. } => {
                if !text.is_empty() {
                    out.push((path.join("/"), std::mem::take(&mut text)));
                }
                path.pop();
            }
            _ => {}
        }
    }
    out
}

fn values<'a>(leaves: &'a [(String, String)], suffix: &str) -> Vec<&'a str> {
    leaves
        .iter()
        .filter(|(path, _)| path.ends_with(suffix))
        .map(|(_, text)| text.as_str())
        .collect()
}

fn generator() -> SepaXmlGenerator {
    let creditor = Creditor::new("Budo Dojo e.V.", "DE98ZZZ09999999999", "DE89370400440532013000")
        .with_address("Hauptstr. 1", "10115", "Berlin", Some("DE"));
    SepaXmlGenerator::with_sources(
        creditor,
        Utc.with_ymd_and_hms(2026, 10, 16, 8, 0, 0).unwrap(),
        &mut StdRng::seed_from_u64(2026),
    )
}

const BATCH: &str = r#"[
    {"mitglied_id": 1, "betrag": 45, "mandatsreferenz": "BUDO-0001",
     "mandat_datum": "2022-09-01", "iban": "DE02 1203 0000 0000 2020 51",
     "bic": "BYLADEM1001", "vorname": "Kenji", "nachname": "Sato"},
    {"mitglied_id": 2, "betrag": "29.90", "mandatsreferenz": "BUDO-0002",
     "mandat_datum": "2023-01-15T00:00:00.000Z", "iban": "DE89370400440532013000",
     "kontoinhaber": "Familie Weiß", "verwendungszweck": "Beitrag Kinder <Oktober>"},
    {"mitglied_id": "3", "betrag": 10.005, "mandatsreferenz": "BUDO-0003",
     "mandat_datum": "2024-06-30", "iban": "DE02120300000000202051",
     "vorname": "Ana", "nachname": "García"}
]"#;

#[test]
fn generated_message_is_well_formed_pain_008() {
    let transactions: Vec<Transaction> = serde_json::from_str(BATCH).unwrap();
    let generated = generator()
        .generate(&transactions, Date::new(2026, 10, 20))
        .unwrap();
    let xml = &generated.xml;

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains(&format!("xmlns=\"{PAIN_008_NAMESPACE}\"")));

    let leaves = leaves(xml);
    let first_paths: Vec<&str> = leaves.iter().take(4).map(|(p, _)| p.as_str()).collect();
    assert_eq!(
        first_paths,
        vec![
            "Document/CstmrDrctDbtInitn/GrpHdr/MsgId",
            "Document/CstmrDrctDbtInitn/GrpHdr/CreDtTm",
            "Document/CstmrDrctDbtInitn/GrpHdr/NbOfTxs",
            "Document/CstmrDrctDbtInitn/GrpHdr/CtrlSum",
        ]
    );

    assert_eq!(values(&leaves, "NbOfTxs"), vec!["3", "3"]);
    assert_eq!(values(&leaves, "CtrlSum"), vec!["84.91", "84.91"]);

    let amounts = values(&leaves, "DrctDbtTxInf/InstdAmt");
    assert_eq!(amounts, vec!["45.00", "29.90", "10.01"]);
    let total: Euro = amounts.iter().map(|a| a.parse::<Euro>().unwrap()).sum();
    assert_eq!(total.xml_string(), "84.91");

    assert_eq!(
        values(&leaves, "Dbtr/Nm"),
        vec!["Kenji Sato", "Familie Weiss", "Ana Garca"]
    );
    assert_eq!(
        values(&leaves, "RmtInf/Ustrd"),
        vec![
            "Mitgliedsbeitrag Oktober 2026",
            "Beitrag Kinder Oktober",
            "Mitgliedsbeitrag Oktober 2026",
        ]
    );
    assert_eq!(
        values(&leaves, "DtOfSgntr"),
        vec!["2022-09-01", "2023-01-15", "2024-06-30"]
    );
    assert_eq!(values(&leaves, "ReqdColltnDt"), vec!["2026-10-20"]);
    assert_eq!(
        values(&leaves, "EndToEndId"),
        vec!["BUDO-0001-20261016", "BUDO-0002-20261016", "BUDO-0003-20261016"]
    );
    assert_eq!(values(&leaves, "Cdtr/PstlAdr/Ctry"), vec!["DE"]);
    assert_eq!(values(&leaves, "CdtrAgt/FinInstnId/Othr/Id"), vec!["NOTPROVIDED"]);

    let kinds: Vec<&WarningKind> = generated.warnings.iter().map(|w| &w.kind).collect();
    assert!(kinds.contains(&&WarningKind::AmountRounded {
        original: "10.005".to_string()
    }));
    let without_debtor_bic = generated
        .warnings
        .iter()
        .filter(|w| matches!(w.kind, WarningKind::Placeholder { .. }) && w.transaction.is_some())
        .count();
    assert_eq!(without_debtor_bic, 2);
}

#[test]
fn every_identifier_fits_the_schema() {
    let long = "X".repeat(60);
    let transactions = vec![Transaction::new(
        9u64,
        12.5,
        &long,
        Date::new(2020, 2, 29).unwrap(),
        "DE89370400440532013000",
    )
    .with_account_holder("A".repeat(100))
    .with_remittance("Ä".repeat(50))];
    let generated = generator().generate(&transactions, None).unwrap();
    let leaves = leaves(&generated.xml);

    for id in ["MsgId", "PmtInfId", "EndToEndId", "MndtId"] {
        for value in values(&leaves, id) {
            assert!(value.chars().count() <= 35, "{id} too long: {value}");
        }
    }
    for text in ["Nm", "Ustrd", "AdrLine"] {
        for value in values(&leaves, text) {
            assert!(value.chars().count() <= 70, "{text} too long: {value}");
        }
    }
    assert_eq!(values(&leaves, "ReqdColltnDt"), vec!["2026-10-16"]);
}

#[test]
fn empty_batch_is_well_formed() {
    let generated = generator().generate(&[], None).unwrap();
    let leaves = leaves(&generated.xml);
    assert_eq!(values(&leaves, "NbOfTxs"), vec!["0", "0"]);
    assert_eq!(values(&leaves, "CtrlSum"), vec!["0.00", "0.00"]);
    assert!(values(&leaves, "DrctDbtTxInf/InstdAmt").is_empty());
    assert!(!generated.xml.contains("DrctDbtTxInf"));
}
