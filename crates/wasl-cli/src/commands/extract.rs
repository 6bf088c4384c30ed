//! Extract command - run the name/phone heuristic on OCR text.

use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use wasl_core::extraction::{ExtractionMatch, FieldExtractor, NameExtractor, PhoneExtractor, Rule};
use wasl_core::{extract_customer, RecordAssembler};

use super::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Text file with OCR output ("-" or omitted reads stdin)
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: super::process::OutputFormat,
}

#[derive(Serialize)]
struct ExtractOutput<'a> {
    name: &'a str,
    name_rule: Option<Rule>,
    name_confidence: Option<f32>,
    phone: &'a str,
    phone_rule: Option<Rule>,
    phone_confidence: Option<f32>,
    excluded: bool,
    link: &'a str,
    normalized_text: &'a str,
    name_candidates: Vec<Candidate>,
    phone_candidates: Vec<Candidate>,
}

/// One candidate a rule produced, winning or not.
#[derive(Serialize)]
struct Candidate {
    value: String,
    rule: Rule,
    confidence: f32,
}

impl From<ExtractionMatch<String>> for Candidate {
    fn from(m: ExtractionMatch<String>) -> Self {
        Self {
            confidence: m.confidence(),
            value: m.value,
            rule: m.rule,
        }
    }
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let text = match args.input.as_deref() {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let found = extract_customer(&text);
    let record = RecordAssembler::from_config(&config).assemble("-", 1, &text);

    let phone_candidates = PhoneExtractor::new()
        .with_normalization(false)
        .extract_all(&found.normalized_text);
    let name_candidates = NameExtractor::new()
        .with_phone(found.phone())
        .extract_all(&found.normalized_text);

    let output = ExtractOutput {
        name: record.display_name(),
        name_rule: found.name.as_ref().map(|m| m.rule),
        name_confidence: found.name.as_ref().map(|m| m.confidence()),
        phone: record.display_phone(),
        phone_rule: found.phone.as_ref().map(|m| m.rule),
        phone_confidence: found.phone.as_ref().map(|m| m.confidence()),
        excluded: found.phone.is_some() && !record.has_phone(),
        link: &record.link,
        normalized_text: &found.normalized_text,
        name_candidates: name_candidates.into_iter().map(Candidate::from).collect(),
        phone_candidates: phone_candidates.into_iter().map(Candidate::from).collect(),
    };

    match args.format {
        super::process::OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        super::process::OutputFormat::Text => {
            println!("Name:  {}{}", output.name, rule_suffix(output.name_rule));
            if output.excluded {
                println!("Phone: (business number {} excluded)", found.phone().unwrap_or(""));
            } else {
                println!("Phone: {}{}", output.phone, rule_suffix(output.phone_rule));
            }
            println!("Link:  {}", output.link);
        }
    }

    Ok(())
}

fn rule_suffix(rule: Option<Rule>) -> String {
    rule.map(|r| format!(" ({:?}, confidence {:.2})", r, r.confidence()))
        .unwrap_or_default()
}
