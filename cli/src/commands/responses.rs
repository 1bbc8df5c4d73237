//! Response commands

use anyhow::bail;
use colored::Colorize;
use serde::Serialize;
use survey_forms::{DisplayLayout, FormattedEntry, ResponseError, ResponseFormatter};
use tabled::{Table, Tabled};

use super::{load_responses, load_schema};
use crate::output::OutputFormat;

#[derive(Tabled)]
struct AnswerRow {
    #[tabled(rename = "Question")]
    question: String,
    #[tabled(rename = "Answer")]
    answer: String,
}

impl From<&FormattedEntry> for AnswerRow {
    fn from(entry: &FormattedEntry) -> Self {
        let answer = match entry.layout {
            DisplayLayout::Preformatted => entry.display.clone(),
            DisplayLayout::Inline => entry.display.replace('\n', " "),
        };
        Self { question: entry.label.clone(), answer }
    }
}

pub fn format(schema_path: &str, responses_path: &str, format: OutputFormat) -> anyhow::Result<()> {
    let schema = load_schema(schema_path)?;
    let responses = load_responses(responses_path)?;
    let formatted = ResponseFormatter::new(&schema).format_all(&responses);

    match format {
        OutputFormat::Table => {
            let rows: Vec<AnswerRow> = formatted.entries.iter().map(AnswerRow::from).collect();
            println!("{}", Table::new(rows));
            if formatted.has_unanswered {
                println!("{}", "Some questions were left unanswered".dimmed());
            }
        }
        _ => format.print(&formatted)?,
    }
    Ok(())
}

#[derive(Serialize)]
struct CheckReport {
    complete: bool,
    missing: Vec<String>,
}

pub fn check(schema_path: &str, responses_path: &str, format: OutputFormat) -> anyhow::Result<()> {
    let schema = load_schema(schema_path)?;
    let responses = load_responses(responses_path)?;

    let missing: Vec<String> = match responses.check_required(&schema) {
        Ok(()) => vec![],
        Err(errors) => errors
            .iter()
            .filter_map(|e| match e {
                ResponseError::MissingRequired { label, .. } => Some(label.clone()),
                _ => None,
            })
            .collect(),
    };
    let report = CheckReport { complete: missing.is_empty(), missing };

    match format {
        OutputFormat::Table if report.complete => {
            println!("{} all required questions answered", "✔".green());
        }
        OutputFormat::Table => {
            for label in &report.missing {
                println!("{} {}", "✘".red(), label);
            }
        }
        _ => format.print(&report)?,
    }

    if !report.complete {
        bail!("{} required question(s) unanswered", report.missing.len());
    }
    Ok(())
}
