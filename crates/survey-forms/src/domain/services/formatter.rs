//! Response formatter
//!
//! Read-only, type-aware display of stored answers against the survey they
//! were collected with.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::debug;

use crate::domain::value_objects::{EntityId, FieldType, ResponseMap, SurveySchema};

/// Shown for blank or missing free-form answers
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DisplayLayout {
    Inline,
    /// Whitespace-preserving block; embedded line breaks are kept
    Preformatted,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedEntry {
    pub field_id: EntityId,
    pub label: String,
    pub display: String,
    pub layout: DisplayLayout,
}

impl fmt::Display for FormattedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.display)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedResponses {
    pub entries: Vec<FormattedEntry>,
    /// Some questions have no answer at all
    pub has_unanswered: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct ResponseFormatter<'a> {
    schema: &'a SurveySchema,
}

impl<'a> ResponseFormatter<'a> {
    pub fn new(schema: &'a SurveySchema) -> Self {
        Self { schema }
    }

    /// Display string for one stored answer, or `None` when the question is
    /// no longer part of the survey.
    pub fn format(&self, field_id: &str, raw: Option<&Value>) -> Option<String> {
        let field = self.schema.field(field_id)?;

        let display = match field.field_type {
            FieldType::Checkbox => {
                let checked = matches!(raw, Some(Value::Bool(true)));
                (if checked { "Yes" } else { "No" }).to_string()
            }
            FieldType::Dropdown | FieldType::Radio => {
                let stored = display_text(raw);
                match field.option_by_value(&stored) {
                    Some(option) => option.label.clone(),
                    None if stored.is_empty() => NOT_AVAILABLE.to_string(),
                    None => stored,
                }
            }
            FieldType::Text | FieldType::Textarea | FieldType::Number | FieldType::Unsupported => {
                let text = display_text(raw);
                if text.is_empty() { NOT_AVAILABLE.to_string() } else { text }
            }
        };
        Some(display)
    }

    /// Every answered question in schema order. Answers to questions that
    /// were removed from the survey are left out.
    pub fn format_all(&self, responses: &ResponseMap) -> FormattedResponses {
        let mut formatted = FormattedResponses::default();

        for field in self.schema.fields() {
            let Some(raw) = responses.get(field.id.as_str()) else {
                formatted.has_unanswered = true;
                continue;
            };
            let Some(display) = self.format(field.id.as_str(), Some(raw)) else {
                continue;
            };
            let layout = if field.field_type == FieldType::Textarea {
                DisplayLayout::Preformatted
            } else {
                DisplayLayout::Inline
            };
            formatted.entries.push(FormattedEntry {
                field_id: field.id.clone(),
                label: field.label.clone(),
                display,
                layout,
            });
        }

        let orphaned = responses.iter().filter(|(id, _)| self.schema.field(id).is_none()).count();
        if orphaned > 0 {
            debug!(orphaned, "skipped answers without a matching question");
        }

        formatted
    }
}

fn display_text(raw: Option<&Value>) -> String {
    match raw {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| display_text(Some(v)))
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::FormSession;
    use crate::domain::value_objects::{FieldOption, FieldSchema};
    use serde_json::json;

    fn scenario_schema() -> SurveySchema {
        SurveySchema::new(vec![
            FieldSchema::with_id("f1", FieldType::Text, "Name").required(),
            FieldSchema {
                id: EntityId::from_string("f2"),
                label: "Experience".into(),
                field_type: FieldType::Radio,
                required: true,
                placeholder: None,
                description: None,
                options: vec![
                    FieldOption { id: "o1".into(), label: "Yes".into(), value: "yes".into(), is_default: false },
                    FieldOption { id: "o2".into(), label: "No".into(), value: "no".into(), is_default: false },
                ],
            },
        ])
    }

    #[test]
    fn test_name_and_experience_scenario() {
        let schema = scenario_schema();
        let mut responses = ResponseMap::new();
        responses.set("f1", "Jane");
        responses.set("f2", "yes");

        let formatted = ResponseFormatter::new(&schema).format_all(&responses);
        let lines: Vec<String> = formatted.entries.iter().map(|e| e.to_string()).collect();
        assert_eq!(lines, vec!["Name: Jane", "Experience: Yes"]);
        assert!(!formatted.has_unanswered);
    }

    #[test]
    fn test_checkbox_yes_no() {
        let schema = SurveySchema::new(vec![FieldSchema::with_id("c", FieldType::Checkbox, "Union")]);
        let formatter = ResponseFormatter::new(&schema);
        assert_eq!(formatter.format("c", Some(&json!(true))).as_deref(), Some("Yes"));
        assert_eq!(formatter.format("c", Some(&json!(false))).as_deref(), Some("No"));
        assert_eq!(formatter.format("c", None).as_deref(), Some("No"));
        assert_eq!(formatter.format("c", Some(&json!("true"))).as_deref(), Some("No"));
    }

    #[test]
    fn test_choice_shows_label_not_value() {
        let schema = SurveySchema::new(vec![FieldSchema::with_id("d", FieldType::Dropdown, "Pick")
            .with_option(FieldOption::numbered(1))
            .with_option(FieldOption::numbered(2))]);
        let formatter = ResponseFormatter::new(&schema);
        assert_eq!(formatter.format("d", Some(&json!("option_2"))).as_deref(), Some("Option 2"));
    }

    #[test]
    fn test_unknown_option_falls_back_to_raw() {
        let schema = scenario_schema();
        let formatter = ResponseFormatter::new(&schema);
        assert_eq!(formatter.format("f2", Some(&json!("maybe"))).as_deref(), Some("maybe"));
    }

    #[test]
    fn test_free_form_na() {
        let schema = scenario_schema();
        let formatter = ResponseFormatter::new(&schema);
        assert_eq!(formatter.format("f1", Some(&json!(""))).as_deref(), Some(NOT_AVAILABLE));
        assert_eq!(formatter.format("f1", None).as_deref(), Some(NOT_AVAILABLE));
        assert_eq!(formatter.format("f1", Some(&json!(42))).as_deref(), Some("42"));
    }

    #[test]
    fn test_removed_question_is_skipped() {
        let schema = scenario_schema();
        let mut responses = ResponseMap::new();
        responses.set("f1", "Jane");
        responses.set("gone", "orphan");

        let formatter = ResponseFormatter::new(&schema);
        assert_eq!(formatter.format("gone", Some(&json!("orphan"))), None);

        let formatted = formatter.format_all(&responses);
        assert_eq!(formatted.entries.len(), 1);
        assert!(formatted.has_unanswered);
    }

    #[test]
    fn test_textarea_is_preformatted() {
        let schema = SurveySchema::new(vec![
            FieldSchema::with_id("bio", FieldType::Textarea, "Bio"),
            FieldSchema::with_id("age", FieldType::Number, "Age"),
        ]);
        let mut responses = ResponseMap::new();
        responses.set("bio", "Stage\nScreen");
        responses.set("age", "31");

        let formatted = ResponseFormatter::new(&schema).format_all(&responses);
        assert_eq!(formatted.entries[0].layout, DisplayLayout::Preformatted);
        assert_eq!(formatted.entries[0].display, "Stage\nScreen");
        assert_eq!(formatted.entries[1].layout, DisplayLayout::Inline);
    }

    #[test]
    fn test_rendered_answers_round_trip_to_display() {
        let schema = SurveySchema::new(vec![
            FieldSchema::with_id("name", FieldType::Text, "Name"),
            FieldSchema::with_id("bio", FieldType::Textarea, "Bio"),
            FieldSchema::with_id("height", FieldType::Number, "Height"),
            FieldSchema::with_id("union", FieldType::Checkbox, "Union"),
            FieldSchema::with_id("role", FieldType::Dropdown, "Role")
                .with_option(FieldOption::new("Lead"))
                .with_option(FieldOption::new("Day Player")),
            FieldSchema::with_id("exp", FieldType::Radio, "Experience")
                .with_option(FieldOption::numbered(1))
                .with_option(FieldOption::numbered(2)),
        ]);

        let mut session = FormSession::new(&schema);
        session.input("name", "").unwrap();
        session.input("bio", "Theatre\nFilm").unwrap();
        session.input("height", "180").unwrap();
        session.input("union", "false").unwrap();
        session.input("role", "day_player").unwrap();
        session.input("exp", "option_2").unwrap();
        let responses = session.into_responses();

        let formatter = ResponseFormatter::new(&schema);
        for (id, raw) in responses.iter() {
            let display = formatter.format(id, Some(raw)).unwrap();
            assert!(!display.is_empty(), "empty display for {}", id);
        }
        assert_eq!(formatter.format("role", responses.get("role")).as_deref(), Some("Day Player"));
        assert_eq!(formatter.format("exp", responses.get("exp")).as_deref(), Some("Option 2"));
        assert_eq!(formatter.format("union", responses.get("union")).as_deref(), Some("No"));
    }
}
