//! Survey definition commands

use anyhow::{anyhow, bail};
use colored::Colorize;
use serde::Serialize;
use survey_forms::{
    render_text, FieldPatch, FieldType, FormSession, ResponseMap, SchemaBuilder,
    SurveySchema,
};
use tabled::{Table, Tabled};

use super::{load_responses, load_schema};
use crate::output::OutputFormat;

#[derive(Serialize, Tabled)]
struct Problem {
    #[tabled(rename = "Question")]
    question: String,
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Problem")]
    problem: String,
}

#[derive(Serialize)]
struct ValidationReport {
    valid: bool,
    questions: usize,
    problems: Vec<Problem>,
}

pub fn validate(path: &str, format: OutputFormat) -> anyhow::Result<()> {
    let schema = load_schema(path)?;
    let problems: Vec<Problem> = match schema.validate() {
        Ok(()) => vec![],
        Err(errors) => errors
            .errors()
            .iter()
            .map(|e| Problem {
                question: e.field_index().map(|i| (i + 1).to_string()).unwrap_or_else(|| "-".into()),
                field: e.field_id().map(ToString::to_string).unwrap_or_else(|| "-".into()),
                problem: e.to_string(),
            })
            .collect(),
    };

    let report = ValidationReport {
        valid: problems.is_empty(),
        questions: schema.len(),
        problems,
    };

    match format {
        OutputFormat::Table if report.valid => {
            println!("{} survey is valid ({} questions)", "✔".green(), report.questions);
        }
        OutputFormat::Table => println!("{}", Table::new(&report.problems)),
        _ => format.print(&report)?,
    }

    if !report.valid {
        bail!("{} problem(s) found in {}", report.problems.len(), path);
    }
    Ok(())
}

pub fn preview(path: &str, responses: Option<&str>, defaults: bool, format: OutputFormat) -> anyhow::Result<()> {
    let schema = load_schema(path)?;
    let partial = match responses {
        Some(r) => load_responses(r)?,
        None => ResponseMap::new(),
    };

    let mut session = FormSession::resume(&schema, partial);
    if defaults {
        session.prefill_defaults();
    }
    let rendered = session.render();

    match format {
        OutputFormat::Table => {
            print!("{}", render_text(&rendered));
            let missing = session.missing_required();
            if !missing.is_empty() {
                println!("{} {} required question(s) still unanswered", "!".yellow(), missing.len());
            }
        }
        _ => format.print(&rendered)?,
    }
    Ok(())
}

/// Parsed `TYPE:Label[*][:Option|Option...]` argument
#[derive(Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub field_type: FieldType,
    pub label: String,
    pub required: bool,
    pub options: Vec<String>,
}

impl FieldSpec {
    pub fn parse(spec: &str) -> anyhow::Result<Self> {
        let mut parts = spec.splitn(3, ':');
        let field_type: FieldType = parts
            .next()
            .unwrap_or_default()
            .parse()
            .map_err(|e: String| anyhow!(e))?;
        let raw_label = parts.next().ok_or_else(|| anyhow!("missing label in \"{}\"", spec))?.trim();
        let (label, required) = match raw_label.strip_suffix('*') {
            Some(label) => (label.trim(), true),
            None => (raw_label, false),
        };
        let options: Vec<String> = parts
            .next()
            .map(|o| o.split('|').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        if !options.is_empty() && !field_type.is_choice() {
            bail!("{} fields do not take options", field_type);
        }

        Ok(Self { field_type, label: label.to_string(), required, options })
    }
}

/// Run field specs through a builder session and save the result
pub fn build_schema(specs: &[FieldSpec]) -> anyhow::Result<SurveySchema> {
    let mut builder = SchemaBuilder::new();

    for spec in specs {
        builder.add_field(spec.field_type)?;
        let index = builder.len() - 1;
        builder.update_field(
            index,
            FieldPatch {
                label: Some(spec.label.clone()),
                required: Some(spec.required),
                ..FieldPatch::default()
            },
        )?;

        for (n, option) in spec.options.iter().enumerate() {
            if n > 0 {
                builder.add_option(index)?;
            }
            builder.update_option_label(index, n, option.as_str())?;
        }
    }

    Ok(builder.save()?)
}

pub fn build(fields: &[String], format: OutputFormat) -> anyhow::Result<()> {
    let specs = fields.iter().map(|f| FieldSpec::parse(f)).collect::<anyhow::Result<Vec<_>>>()?;
    let schema = build_schema(&specs)?;

    match format {
        OutputFormat::Yaml => format.print(&schema)?,
        _ => println!("{}", schema.to_json_pretty()?),
    }

    tracing::debug!(questions = schema.len(), "survey built");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_required_radio() {
        let spec = FieldSpec::parse("radio:Experience*:Yes|No").unwrap();
        assert_eq!(
            spec,
            FieldSpec {
                field_type: FieldType::Radio,
                label: "Experience".into(),
                required: true,
                options: vec!["Yes".into(), "No".into()],
            }
        );
    }

    #[test]
    fn test_parse_rejects_options_on_text() {
        assert!(FieldSpec::parse("TEXT:Name:A|B").is_err());
        assert!(FieldSpec::parse("SIGNATURE:Sign here").is_err());
        assert!(FieldSpec::parse("TEXT").is_err());
    }

    #[test]
    fn test_build_schema() {
        let specs = vec![
            FieldSpec::parse("TEXT:Name*").unwrap(),
            FieldSpec::parse("DROPDOWN:Role:Lead|Day Player").unwrap(),
        ];
        let schema = build_schema(&specs).unwrap();

        assert_eq!(schema.len(), 2);
        assert!(schema.fields[0].required);
        let values: Vec<&str> = schema.fields[1].options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["lead", "day_player"]);
    }

    #[test]
    fn test_build_rejects_empty_label() {
        let specs = vec![FieldSpec::parse("TEXT:").unwrap()];
        assert!(build_schema(&specs).is_err());
    }
}
