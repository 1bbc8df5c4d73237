//! CLI Commands

pub mod schema;
pub mod responses;
pub mod config;

use anyhow::Context;
use serde::de::DeserializeOwned;
use std::fs;
use survey_forms::{ResponseMap, SurveySchema};

/// Read a JSON or YAML document, picking the parser from the extension
pub fn read_document<T: DeserializeOwned>(path: &str) -> anyhow::Result<T> {
    let content = fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    if path.ends_with(".yaml") || path.ends_with(".yml") {
        serde_yaml::from_str(&content).with_context(|| format!("parsing {}", path))
    } else {
        serde_json::from_str(&content).with_context(|| format!("parsing {}", path))
    }
}

pub fn load_schema(path: &str) -> anyhow::Result<SurveySchema> {
    let schema: SurveySchema = read_document(path)?;
    tracing::debug!(path, fields = schema.len(), "survey loaded");
    Ok(schema)
}

pub fn load_responses(path: &str) -> anyhow::Result<ResponseMap> {
    read_document(path)
}
