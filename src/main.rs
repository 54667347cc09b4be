use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use dojo_sepa_config::Config;
use dojo_sepa_types::Date;
use dojo_sepa_xml::{
    iban_checksum_valid, validate_bic, validate_creditor_id, validate_iban, Creditor,
    SepaXmlGenerator, Transaction,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dojo-sepa")]
#[command(about = "SEPA direct debit (pain.008) files for dojo membership fees")]
#[command(version)]
struct Cli {
    #[arg(long, global = true, help = "Config file instead of the default location")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Generate a pain.008 file from a JSON batch of transactions")]
    Generate {
        #[arg(long, short, help = "JSON array of transaction records")]
        transactions: PathBuf,

        #[arg(long, help = "Requested collection date (YYYY-MM-DD), defaults to today")]
        collection_date: Option<Date>,

        #[arg(long, short, help = "Write the XML here instead of stdout")]
        output: Option<PathBuf>,

        #[arg(long, help = "Refuse to generate when the creditor looks invalid")]
        strict: bool,
    },

    #[command(about = "Check IBAN, BIC or creditor identifier shapes")]
    Validate {
        #[arg(long)]
        iban: Option<String>,

        #[arg(long)]
        bic: Option<String>,

        #[arg(long)]
        creditor_id: Option<String>,
    },

    #[command(about = "List problems with the configured creditor")]
    CheckConfig,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load(path),
        None => Config::load_from_file(),
    };
    config.context("loading config")
}

fn generate(
    config: &Config,
    transactions: PathBuf,
    collection_date: Option<Date>,
    output: Option<PathBuf>,
    strict: bool,
) -> anyhow::Result<()> {
    let creditor = Creditor::from_config(config.creditor());
    let problems = creditor.problems();
    for problem in &problems {
        tracing::warn!("{problem}");
    }
    if strict && !problems.is_empty() {
        bail!("creditor has {} problem(s), not generating", problems.len());
    }

    let file = File::open(&transactions)
        .with_context(|| format!("opening {}", transactions.display()))?;
    let batch: Vec<Transaction> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("reading transactions from {}", transactions.display()))?;

    let generator = SepaXmlGenerator::new(creditor);
    let generated = generator.generate(&batch, collection_date)?;
    tracing::info!(
        message_id = generator.message_id(),
        transactions = batch.len(),
        warnings = generated.warnings.len(),
        "generated direct debit file"
    );

    match output {
        Some(path) => std::fs::write(&path, generated.xml)
            .with_context(|| format!("writing {}", path.display()))?,
        None => print!("{}", generated.xml),
    }
    Ok(())
}

fn validate(iban: Option<String>, bic: Option<String>, creditor_id: Option<String>) {
    let verdict = |ok: bool| if ok { "valid" } else { "INVALID" };
    if let Some(iban) = iban {
        println!(
            "IBAN {iban}: shape {}, check digits {}",
            verdict(validate_iban(&iban)),
            verdict(iban_checksum_valid(&iban))
        );
    }
    if let Some(bic) = bic {
        println!("BIC {bic}: {}", verdict(validate_bic(&bic)));
    }
    if let Some(id) = creditor_id {
        println!("creditor id {id}: {}", verdict(validate_creditor_id(&id)));
    }
}

fn check_config(config: &Config) -> anyhow::Result<()> {
    let creditor = Creditor::from_config(config.creditor());
    let mut problems: Vec<&str> = config.config_errors();
    problems.extend(creditor.problems());
    if problems.is_empty() {
        println!("config looks fine");
        return Ok(());
    }
    for problem in &problems {
        println!("- {problem}");
    }
    bail!("{} config problem(s)", problems.len())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            transactions,
            collection_date,
            output,
            strict,
        } => {
            let config = load_config(cli.config.as_ref())?;
            generate(&config, transactions, collection_date, output, strict)
        }
        Commands::Validate {
            iban,
            bic,
            creditor_id,
        } => {
            validate(iban, bic, creditor_id);
            Ok(())
        }
        Commands::CheckConfig => check_config(&load_config(cli.config.as_ref())?),
    }
}
