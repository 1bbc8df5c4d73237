//! Schema Builder Aggregate
//!
//! Editing session over an ordered field list. Operators add, remove, move
//! and configure fields; the session ends with `save` (validated hand-off)
//! or `cancel` (restore the pre-session schema).

use chrono::Utc;
use tracing::{debug, info};

use crate::domain::events::{DomainEvent, SurveyEvent};
use crate::domain::value_objects::{
    FieldOption, FieldPatch, FieldSchema, FieldType, SurveySchema, ValidationErrors,
};

/// Direction of a one-step field move
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Schema builder aggregate root
#[derive(Clone, Debug)]
pub struct SchemaBuilder {
    fields: Vec<FieldSchema>,
    // Schema as it was when the session started, restored by cancel
    snapshot: Option<SurveySchema>,
    active: Option<usize>,
    editing: bool,
    events: Vec<DomainEvent>,
}

impl SchemaBuilder {
    /// Start a session on a new, empty survey
    pub fn new() -> Self {
        Self {
            fields: vec![],
            snapshot: None,
            active: None,
            editing: true,
            events: vec![],
        }
    }

    /// Start a session seeded from an existing survey
    pub fn edit(existing: SurveySchema) -> Self {
        Self {
            fields: existing.fields.clone(),
            snapshot: Some(existing),
            active: None,
            editing: true,
            events: vec![],
        }
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn fields(&self) -> &[FieldSchema] { &self.fields }
    pub fn field(&self, index: usize) -> Option<&FieldSchema> { self.fields.get(index) }
    pub fn len(&self) -> usize { self.fields.len() }
    pub fn is_empty(&self) -> bool { self.fields.is_empty() }
    pub fn is_editing(&self) -> bool { self.editing }
    pub fn active_index(&self) -> Option<usize> { self.active }
    pub fn active_field(&self) -> Option<&FieldSchema> { self.active.and_then(|i| self.fields.get(i)) }
    pub fn snapshot(&self) -> Option<&SurveySchema> { self.snapshot.as_ref() }

    // =========================================================================
    // Field operations
    // =========================================================================

    /// Append a new field and make it the active one
    pub fn add_field(&mut self, field_type: FieldType) -> Result<&FieldSchema, BuilderError> {
        self.ensure_editing()?;
        if !field_type.is_supported() {
            return Err(BuilderError::UnsupportedType);
        }

        let field = FieldSchema::new(field_type);
        let position = self.fields.len();
        debug!(field_id = %field.id, %field_type, position, "field added");

        self.raise_event(DomainEvent::Survey(SurveyEvent::FieldAdded {
            field_id: field.id.clone(),
            field_type,
            position,
        }));
        self.fields.push(field);
        self.active = Some(position);

        Ok(&self.fields[position])
    }

    /// Remove the field at `index`. Remaining ids are untouched.
    pub fn remove_field(&mut self, index: usize) -> Result<FieldSchema, BuilderError> {
        self.ensure_editing()?;
        self.check_field_index(index)?;

        let removed = self.fields.remove(index);
        self.active = match self.active {
            Some(active) if active == index => None,
            Some(active) if active > index => Some(active - 1),
            other => other,
        };
        debug!(field_id = %removed.id, position = index, "field removed");

        self.raise_event(DomainEvent::Survey(SurveyEvent::FieldRemoved {
            field_id: removed.id.clone(),
            position: index,
        }));

        Ok(removed)
    }

    /// Swap the field at `index` with its neighbour. Moving past either end
    /// leaves the order unchanged. The field becomes active either way.
    pub fn move_field(&mut self, index: usize, direction: MoveDirection) -> Result<(), BuilderError> {
        self.ensure_editing()?;
        self.check_field_index(index)?;

        let target = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => Some(index + 1).filter(|&t| t < self.fields.len()),
        };

        let Some(target) = target else {
            self.active = Some(index);
            return Ok(());
        };

        self.fields.swap(index, target);
        self.active = Some(target);
        debug!(field_id = %self.fields[target].id, from = index, to = target, "field moved");

        let field_id = self.fields[target].id.clone();
        self.raise_event(DomainEvent::Survey(SurveyEvent::FieldMoved {
            field_id,
            from: index,
            to: target,
        }));

        Ok(())
    }

    /// Merge a partial update into the field at `index`
    pub fn update_field(&mut self, index: usize, patch: FieldPatch) -> Result<(), BuilderError> {
        self.ensure_editing()?;
        let field = self.field_mut(index)?;

        if patch.options.is_some() && !field.is_choice() {
            return Err(BuilderError::NotAChoiceField(index));
        }
        if matches!(patch.placeholder, Some(Some(_))) && !field.field_type.accepts_placeholder() {
            return Err(BuilderError::PlaceholderNotAllowed(index));
        }

        if let Some(label) = patch.label {
            field.label = label;
        }
        if let Some(required) = patch.required {
            field.required = required;
        }
        if let Some(placeholder) = patch.placeholder {
            field.placeholder = placeholder;
        }
        if let Some(description) = patch.description {
            field.description = description;
        }
        if let Some(mut options) = patch.options {
            // Keep at most one default: the first one flagged wins
            let mut seen_default = false;
            for option in options.iter_mut() {
                if option.is_default && seen_default {
                    option.is_default = false;
                }
                seen_default |= option.is_default;
            }
            field.options = options;
        }

        Ok(())
    }

    // =========================================================================
    // Option operations (dropdown / radio only)
    // =========================================================================

    /// Append `Option N` / `option_N` where N is the new option count
    pub fn add_option(&mut self, field_index: usize) -> Result<&FieldOption, BuilderError> {
        self.ensure_editing()?;
        let field = self.choice_field_mut(field_index)?;

        let position = field.options.len();
        let option = FieldOption::numbered(position + 1);
        debug!(field_id = %field.id, value = %option.value, "option added");
        field.options.push(option);

        Ok(&field.options[position])
    }

    pub fn remove_option(&mut self, field_index: usize, option_index: usize) -> Result<FieldOption, BuilderError> {
        self.ensure_editing()?;
        let field = self.choice_field_mut(field_index)?;
        if option_index >= field.options.len() {
            return Err(BuilderError::OptionIndexOutOfRange { field: field_index, option: option_index });
        }
        Ok(field.options.remove(option_index))
    }

    /// Relabel an option; its value is re-derived from the new label
    pub fn update_option_label(
        &mut self,
        field_index: usize,
        option_index: usize,
        label: impl Into<String>,
    ) -> Result<(), BuilderError> {
        self.ensure_editing()?;
        self.option_mut(field_index, option_index)?.relabel(label);
        Ok(())
    }

    /// Override an option's machine value
    pub fn update_option_value(
        &mut self,
        field_index: usize,
        option_index: usize,
        value: impl Into<String>,
    ) -> Result<(), BuilderError> {
        self.ensure_editing()?;
        self.option_mut(field_index, option_index)?.value = value.into();
        Ok(())
    }

    /// Mark one option as the field's default, clearing every sibling
    pub fn set_default_option(&mut self, field_index: usize, option_index: usize) -> Result<(), BuilderError> {
        self.ensure_editing()?;
        let field = self.choice_field_mut(field_index)?;
        if option_index >= field.options.len() {
            return Err(BuilderError::OptionIndexOutOfRange { field: field_index, option: option_index });
        }
        for (i, option) in field.options.iter_mut().enumerate() {
            option.is_default = i == option_index;
        }
        Ok(())
    }

    pub fn clear_default_option(&mut self, field_index: usize) -> Result<(), BuilderError> {
        self.ensure_editing()?;
        let field = self.choice_field_mut(field_index)?;
        field.options.iter_mut().for_each(|o| o.is_default = false);
        Ok(())
    }

    /// Expand a field for editing, or collapse all with `None`
    pub fn set_active(&mut self, index: Option<usize>) -> Result<(), BuilderError> {
        if let Some(index) = index {
            self.check_field_index(index)?;
        }
        self.active = index;
        Ok(())
    }

    // =========================================================================
    // Session lifecycle
    // =========================================================================

    /// Validate the current field list without ending the session
    pub fn validate(&self) -> Result<SurveySchema, ValidationErrors> {
        let schema = SurveySchema::new(self.fields.clone());
        schema.validate()?;
        Ok(schema)
    }

    /// Validate and hand off the finished schema, leaving edit mode.
    /// An invalid schema keeps the session open for further edits.
    pub fn save(&mut self) -> Result<SurveySchema, BuilderError> {
        self.ensure_editing()?;
        let schema = self.validate().map_err(BuilderError::Invalid)?;

        self.editing = false;
        self.active = None;
        self.snapshot = Some(schema.clone());
        info!(field_count = schema.len(), "survey saved");

        self.raise_event(DomainEvent::Survey(SurveyEvent::Saved {
            field_count: schema.len(),
            saved_at: Utc::now(),
        }));

        Ok(schema)
    }

    /// Discard every edit of this session and return the schema that
    /// existed before it, if any. A session that already ended is left
    /// alone and yields `None`.
    pub fn cancel(&mut self) -> Option<SurveySchema> {
        if !self.editing {
            return None;
        }

        self.fields = self
            .snapshot
            .as_ref()
            .map(|s| s.fields.clone())
            .unwrap_or_default();
        self.editing = false;
        self.active = None;
        debug!(restored_fields = self.fields.len(), "edit cancelled");

        self.raise_event(DomainEvent::Survey(SurveyEvent::EditCancelled {
            restored_fields: self.fields.len(),
        }));

        self.snapshot.clone()
    }

    // =========================================================================
    // Domain Events
    // =========================================================================

    /// Get and clear accumulated domain events
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    fn raise_event(&mut self, event: DomainEvent) {
        self.events.push(event);
    }

    fn ensure_editing(&self) -> Result<(), BuilderError> {
        if self.editing {
            Ok(())
        } else {
            Err(BuilderError::NotEditing)
        }
    }

    fn check_field_index(&self, index: usize) -> Result<(), BuilderError> {
        if index < self.fields.len() {
            Ok(())
        } else {
            Err(BuilderError::FieldIndexOutOfRange(index))
        }
    }

    fn field_mut(&mut self, index: usize) -> Result<&mut FieldSchema, BuilderError> {
        self.fields.get_mut(index).ok_or(BuilderError::FieldIndexOutOfRange(index))
    }

    fn choice_field_mut(&mut self, index: usize) -> Result<&mut FieldSchema, BuilderError> {
        let field = self.field_mut(index)?;
        if !field.is_choice() {
            return Err(BuilderError::NotAChoiceField(index));
        }
        Ok(field)
    }

    fn option_mut(&mut self, field_index: usize, option_index: usize) -> Result<&mut FieldOption, BuilderError> {
        self.choice_field_mut(field_index)?
            .options
            .get_mut(option_index)
            .ok_or(BuilderError::OptionIndexOutOfRange { field: field_index, option: option_index })
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    NotEditing,
    UnsupportedType,
    FieldIndexOutOfRange(usize),
    OptionIndexOutOfRange { field: usize, option: usize },
    NotAChoiceField(usize),
    PlaceholderNotAllowed(usize),
    Invalid(ValidationErrors),
}

impl std::error::Error for BuilderError {}

impl std::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotEditing => write!(f, "Survey is not being edited"),
            Self::UnsupportedType => write!(f, "Field type cannot be added to a survey"),
            Self::FieldIndexOutOfRange(i) => write!(f, "No field at position {}", i),
            Self::OptionIndexOutOfRange { field, option } => {
                write!(f, "Field {} has no option at position {}", field, option)
            }
            Self::NotAChoiceField(i) => write!(f, "Field {} does not take options", i),
            Self::PlaceholderNotAllowed(i) => write!(f, "Field {} does not show a placeholder", i),
            Self::Invalid(errors) => write!(f, "{}", errors),
        }
    }
}
