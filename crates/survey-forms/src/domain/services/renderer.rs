//! Form renderer
//!
//! Turns a frozen survey into one input description per question and keeps
//! a respondent's `ResponseMap` in sync with their input. Required badges
//! are advisory; submit gating belongs to the host.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::value_objects::{
    AnswerValue, EntityId, FieldSchema, FieldType, ResponseError, ResponseMap, SurveySchema,
};

/// Visible height of multi-line answers
pub const TEXTAREA_ROWS: u16 = 4;

/// Caption of the neutral "no selection" dropdown entry
pub const NO_SELECTION_LABEL: &str = "Select an option";

/// Input control for one question
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RenderedInput {
    Text { value: String, placeholder: Option<String> },
    Number { value: String, placeholder: Option<String> },
    TextArea { value: String, placeholder: Option<String>, rows: u16 },
    Checkbox { checked: bool, caption: String },
    /// First choice is always the empty "no selection" entry
    Select { choices: Vec<Choice> },
    /// `name` scopes the group to one field so groups never cross-select
    RadioGroup { name: String, choices: Vec<Choice> },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub label: String,
    pub value: String,
    pub selected: bool,
}

/// A question ready for display
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedField {
    pub field_id: EntityId,
    pub label: String,
    pub description: Option<String>,
    pub required: bool,
    pub input: RenderedInput,
}

/// Stateless renderer over a borrowed schema
#[derive(Clone, Copy, Debug)]
pub struct FormRenderer<'a> {
    schema: &'a SurveySchema,
}

impl<'a> FormRenderer<'a> {
    pub fn new(schema: &'a SurveySchema) -> Self {
        Self { schema }
    }

    /// Input control for `field` showing `current`. Unsupported field types
    /// render nothing.
    pub fn render_field(&self, field: &FieldSchema, current: Option<&Value>) -> Option<RenderedInput> {
        let input = match field.field_type {
            FieldType::Text => RenderedInput::Text {
                value: text_of(current),
                placeholder: field.placeholder.clone(),
            },
            FieldType::Number => RenderedInput::Number {
                value: text_of(current),
                placeholder: field.placeholder.clone(),
            },
            FieldType::Textarea => RenderedInput::TextArea {
                value: text_of(current),
                placeholder: field.placeholder.clone(),
                rows: TEXTAREA_ROWS,
            },
            FieldType::Checkbox => RenderedInput::Checkbox {
                checked: matches!(current, Some(Value::Bool(true))),
                caption: field.caption().to_string(),
            },
            FieldType::Dropdown => {
                let selected = selected_index(field, current);
                let mut choices = Vec::with_capacity(field.options.len() + 1);
                choices.push(Choice {
                    label: NO_SELECTION_LABEL.to_string(),
                    value: String::new(),
                    selected: selected.is_none(),
                });
                choices.extend(choices_of(field, selected));
                RenderedInput::Select { choices }
            }
            FieldType::Radio => RenderedInput::RadioGroup {
                name: format!("survey-{}", field.id),
                choices: choices_of(field, selected_index(field, current)).collect(),
            },
            FieldType::Unsupported => {
                debug!(field_id = %field.id, "skipping field of unsupported type");
                return None;
            }
        };
        Some(input)
    }

    /// Every renderable question in schema order
    pub fn render(&self, responses: &ResponseMap) -> Vec<RenderedField> {
        self.schema
            .fields()
            .iter()
            .filter_map(|field| {
                let input = self.render_field(field, responses.get(field.id.as_str()))?;
                Some(RenderedField {
                    field_id: field.id.clone(),
                    label: field.label.clone(),
                    description: field.description.clone(),
                    required: field.required,
                    input,
                })
            })
            .collect()
    }
}

fn text_of(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

// Index of the first option matching the stored answer; at most one choice
// is ever marked selected.
fn selected_index(field: &FieldSchema, current: Option<&Value>) -> Option<usize> {
    let stored = match current? {
        Value::String(s) if !s.is_empty() => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    field.options.iter().position(|o| o.value == stored)
}

fn choices_of(field: &FieldSchema, selected: Option<usize>) -> impl Iterator<Item = Choice> + '_ {
    field.options.iter().enumerate().map(move |(i, o)| Choice {
        label: o.label.clone(),
        value: o.value.clone(),
        selected: selected == Some(i),
    })
}

/// One respondent filling in one survey
#[derive(Clone, Debug)]
pub struct FormSession<'a> {
    schema: &'a SurveySchema,
    responses: ResponseMap,
}

impl<'a> FormSession<'a> {
    pub fn new(schema: &'a SurveySchema) -> Self {
        Self { schema, responses: ResponseMap::new() }
    }

    /// Continue a partially filled survey. Answers to questions that no
    /// longer exist are dropped.
    pub fn resume(schema: &'a SurveySchema, mut partial: ResponseMap) -> Self {
        let dropped = partial.retain_known(schema);
        if dropped > 0 {
            debug!(dropped, "dropped answers to removed questions");
        }
        Self { schema, responses: partial }
    }

    pub fn schema(&self) -> &SurveySchema {
        self.schema
    }

    pub fn responses(&self) -> &ResponseMap {
        &self.responses
    }

    pub fn into_responses(self) -> ResponseMap {
        self.responses
    }

    /// Write an answer under `field_id`, replacing any previous answer
    pub fn set_value(&mut self, field_id: &str, value: impl Into<AnswerValue>) {
        self.responses.set(field_id, value);
    }

    pub fn clear_value(&mut self, field_id: &str) {
        self.responses.remove(field_id);
    }

    /// Apply raw respondent input the way the rendered control would.
    ///
    /// Text-like fields store the text, number fields only accept numeric
    /// text, checkboxes take `true`/`false`, choice fields take an option
    /// value and treat empty input as "no selection".
    pub fn input(&mut self, field_id: &str, raw: &str) -> Result<(), ResponseError> {
        let field = self
            .schema
            .field(field_id)
            .ok_or_else(|| ResponseError::UnknownField(field_id.to_string()))?;

        match field.field_type {
            FieldType::Text | FieldType::Textarea => {
                self.responses.set(field_id, raw);
            }
            FieldType::Number => {
                let trimmed = raw.trim();
                let numeric = trimmed.is_empty()
                    || trimmed.parse::<f64>().map(f64::is_finite).unwrap_or(false);
                if !numeric {
                    return Err(ResponseError::NotANumber {
                        field_id: field.id.clone(),
                        label: field.label.clone(),
                        value: raw.to_string(),
                    });
                }
                self.responses.set(field_id, raw);
            }
            FieldType::Checkbox => {
                let checked = match raw.trim().to_ascii_lowercase().as_str() {
                    "true" => true,
                    "false" => false,
                    _ => {
                        return Err(ResponseError::NotAToggle {
                            field_id: field.id.clone(),
                            label: field.label.clone(),
                            value: raw.to_string(),
                        })
                    }
                };
                self.responses.set(field_id, checked);
            }
            FieldType::Dropdown | FieldType::Radio => {
                if raw.is_empty() {
                    self.responses.remove(field_id);
                } else if field.option_by_value(raw).is_some() {
                    self.responses.set(field_id, raw);
                } else {
                    return Err(ResponseError::UnknownOption {
                        field_id: field.id.clone(),
                        label: field.label.clone(),
                        value: raw.to_string(),
                    });
                }
            }
            FieldType::Unsupported => return Err(ResponseError::UnsupportedField(field.id.clone())),
        }
        Ok(())
    }

    /// Pre-select default options on choice questions not yet answered
    pub fn prefill_defaults(&mut self) -> usize {
        let mut filled = 0;
        for field in self.schema.fields().iter().filter(|f| f.is_choice()) {
            if self.responses.contains(field.id.as_str()) {
                continue;
            }
            if let Some(option) = field.default_option() {
                self.responses.set(field.id.as_str(), option.value.as_str());
                filled += 1;
            }
        }
        filled
    }

    /// Required questions still unanswered; advisory only
    pub fn missing_required(&self) -> Vec<&'a FieldSchema> {
        let schema: &'a SurveySchema = self.schema;
        schema
            .fields()
            .iter()
            .filter(|f| f.required && f.field_type.is_supported() && !self.responses.is_answered(f))
            .collect()
    }

    pub fn render(&self) -> Vec<RenderedField> {
        FormRenderer::new(self.schema).render(&self.responses)
    }
}

/// Plain-text preview of rendered questions
pub fn render_text(fields: &[RenderedField]) -> String {
    let mut out = String::new();
    for (n, field) in fields.iter().enumerate() {
        let badge = if field.required { " *" } else { "" };
        out.push_str(&format!("{}. {}{}\n", n + 1, field.label, badge));
        if let Some(description) = field.description.as_deref().filter(|d| !d.is_empty()) {
            out.push_str(&format!("   {}\n", description));
        }

        match &field.input {
            RenderedInput::Text { value, placeholder } | RenderedInput::Number { value, placeholder } => {
                out.push_str(&format!("   [ {} ]\n", shown(value, placeholder.as_deref())));
            }
            RenderedInput::TextArea { value, placeholder, rows } => {
                let text = shown(value, placeholder.as_deref());
                let lines: Vec<&str> = text.lines().collect();
                for row in 0..(*rows as usize).max(lines.len()) {
                    out.push_str(&format!("   | {}\n", lines.get(row).copied().unwrap_or("")));
                }
            }
            RenderedInput::Checkbox { checked, caption } => {
                let mark = if *checked { "x" } else { " " };
                out.push_str(&format!("   [{}] {}\n", mark, caption));
            }
            RenderedInput::Select { choices } => {
                for choice in choices {
                    let mark = if choice.selected { ">" } else { " " };
                    out.push_str(&format!("   {} {}\n", mark, choice.label));
                }
            }
            RenderedInput::RadioGroup { choices, .. } => {
                for choice in choices {
                    let mark = if choice.selected { "o" } else { " " };
                    out.push_str(&format!("   ({}) {}\n", mark, choice.label));
                }
            }
        }
    }
    out
}

fn shown(value: &str, placeholder: Option<&str>) -> String {
    match placeholder {
        Some(p) if value.is_empty() => format!("<{}>", p),
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::FieldOption;
    use serde_json::json;

    fn schema() -> SurveySchema {
        let mut yes = FieldOption::with_value("Yes", "yes");
        yes.is_default = true;
        SurveySchema::new(vec![
            FieldSchema::with_id("name", FieldType::Text, "Name").required().with_placeholder("Jane Doe"),
            FieldSchema::with_id("height", FieldType::Number, "Height (cm)"),
            FieldSchema::with_id("bio", FieldType::Textarea, "Bio").with_description("A few lines"),
            FieldSchema::with_id("union", FieldType::Checkbox, "Union member"),
            FieldSchema::with_id("role", FieldType::Dropdown, "Role")
                .with_option(FieldOption::with_value("Lead", "lead"))
                .with_option(FieldOption::with_value("Extra", "extra")),
            FieldSchema::with_id("exp", FieldType::Radio, "Experience")
                .required()
                .with_option(yes)
                .with_option(FieldOption::with_value("No", "no")),
        ])
    }

    #[test]
    fn test_render_in_schema_order() {
        let schema = schema();
        let rendered = FormRenderer::new(&schema).render(&ResponseMap::new());
        let ids: Vec<&str> = rendered.iter().map(|f| f.field_id.as_str()).collect();
        assert_eq!(ids, vec!["name", "height", "bio", "union", "role", "exp"]);
        assert!(rendered[0].required);
        assert_eq!(rendered[2].description.as_deref(), Some("A few lines"));
    }

    #[test]
    fn test_unsupported_fields_are_skipped() {
        let json = r#"{"fields":[
            {"id":"a","type":"TEXT","label":"Name"},
            {"id":"b","type":"FILE_UPLOAD","label":"Headshot"}
        ]}"#;
        let schema = SurveySchema::from_json(json).unwrap();
        let rendered = FormRenderer::new(&schema).render(&ResponseMap::new());
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].field_id.as_str(), "a");
    }

    #[test]
    fn test_textarea_has_fixed_rows() {
        let schema = schema();
        let field = schema.field("bio").unwrap();
        let input = FormRenderer::new(&schema).render_field(field, Some(&json!("line one\nline two")));
        assert_eq!(
            input,
            Some(RenderedInput::TextArea {
                value: "line one\nline two".into(),
                placeholder: None,
                rows: TEXTAREA_ROWS,
            })
        );
    }

    #[test]
    fn test_dropdown_has_neutral_entry() {
        let schema = schema();
        let field = schema.field("role").unwrap();
        let renderer = FormRenderer::new(&schema);

        let Some(RenderedInput::Select { choices }) = renderer.render_field(field, None) else {
            panic!("expected select");
        };
        assert_eq!(choices.len(), 3);
        assert_eq!(choices[0].value, "");
        assert!(choices[0].selected);
        assert!(choices[1..].iter().all(|c| !c.selected));

        let Some(RenderedInput::Select { choices }) = renderer.render_field(field, Some(&json!("extra"))) else {
            panic!("expected select");
        };
        assert!(!choices[0].selected);
        assert!(choices[2].selected);
    }

    #[test]
    fn test_radio_groups_are_name_scoped() {
        let schema = SurveySchema::new(vec![
            FieldSchema::with_id("a", FieldType::Radio, "A").with_option(FieldOption::new("Yes")),
            FieldSchema::with_id("b", FieldType::Radio, "B").with_option(FieldOption::new("Yes")),
        ]);
        let mut session = FormSession::new(&schema);
        session.input("a", "yes").unwrap();

        let rendered = session.render();
        let names: Vec<String> = rendered
            .iter()
            .map(|f| match &f.input {
                RenderedInput::RadioGroup { name, .. } => name.clone(),
                other => panic!("unexpected input {:?}", other),
            })
            .collect();
        assert_eq!(names, vec!["survey-a", "survey-b"]);

        let selected: Vec<bool> = rendered
            .iter()
            .map(|f| match &f.input {
                RenderedInput::RadioGroup { choices, .. } => choices.iter().any(|c| c.selected),
                _ => false,
            })
            .collect();
        assert_eq!(selected, vec![true, false]);
    }

    #[test]
    fn test_checkbox_caption_and_state() {
        let schema = schema();
        let field = schema.field("union").unwrap();
        let input = FormRenderer::new(&schema).render_field(field, Some(&json!(true)));
        assert_eq!(
            input,
            Some(RenderedInput::Checkbox { checked: true, caption: "Union member".into() })
        );
    }

    #[test]
    fn test_number_input_keeps_raw_string() {
        let schema = schema();
        let mut session = FormSession::new(&schema);
        session.input("height", "172.5").unwrap();
        assert_eq!(session.responses().get("height"), Some(&json!("172.5")));

        let err = session.input("height", "tall").unwrap_err();
        assert!(matches!(err, ResponseError::NotANumber { .. }));
        assert_eq!(session.responses().get("height"), Some(&json!("172.5")));
    }

    #[test]
    fn test_choice_input_validates_option() {
        let schema = schema();
        let mut session = FormSession::new(&schema);
        session.input("role", "lead").unwrap();
        assert!(matches!(session.input("role", "director"), Err(ResponseError::UnknownOption { .. })));

        session.input("role", "").unwrap();
        assert!(!session.responses().contains("role"));
    }

    #[test]
    fn test_checkbox_input() {
        let schema = schema();
        let mut session = FormSession::new(&schema);
        session.input("union", "TRUE").unwrap();
        assert_eq!(session.responses().get("union"), Some(&json!(true)));
        assert!(matches!(session.input("union", "maybe"), Err(ResponseError::NotAToggle { .. })));
    }

    #[test]
    fn test_unknown_field_input() {
        let schema = schema();
        let mut session = FormSession::new(&schema);
        assert_eq!(
            session.input("nope", "x").unwrap_err(),
            ResponseError::UnknownField("nope".into())
        );
    }

    #[test]
    fn test_set_value_touches_only_its_key() {
        let schema = schema();
        let mut session = FormSession::new(&schema);
        session.set_value("name", "Jane");
        session.set_value("union", true);
        session.set_value("name", "Janet");

        assert_eq!(session.responses().len(), 2);
        assert_eq!(session.responses().get("name"), Some(&json!("Janet")));
        assert_eq!(session.responses().get("union"), Some(&json!(true)));
    }

    #[test]
    fn test_prefill_defaults_and_missing_required() {
        let schema = schema();
        let mut session = FormSession::new(&schema);
        let missing: Vec<&str> = session.missing_required().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(missing, vec!["name", "exp"]);

        assert_eq!(session.prefill_defaults(), 1);
        assert_eq!(session.responses().get("exp"), Some(&json!("yes")));
        let missing: Vec<&str> = session.missing_required().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(missing, vec!["name"]);
    }

    #[test]
    fn test_resume_drops_removed_questions() {
        let schema = schema();
        let mut partial = ResponseMap::new();
        partial.set("name", "Jane");
        partial.set("deleted", "x");

        let session = FormSession::resume(&schema, partial);
        assert_eq!(session.responses().len(), 1);
    }

    #[test]
    fn test_render_text_preview() {
        let schema = schema();
        let mut session = FormSession::new(&schema);
        session.input("exp", "no").unwrap();

        let text = render_text(&session.render());
        assert!(text.starts_with("1. Name *\n   [ <Jane Doe> ]\n"));
        assert!(text.contains("   ( ) Yes\n   (o) No\n"));
        assert!(text.contains("   > Select an option\n"));
    }
}
