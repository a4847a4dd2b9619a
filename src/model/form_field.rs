//! Field metadata for the create-schedule form.

use serde::{Deserialize, Serialize};

/// Input widget used for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormFieldType {
    InputText,
    InputUrl,
    InputDatetimeLocal,
    InputCron,
    Textarea,
    Checkbox,
}

/// When a field is shown, depending on the "recurring" toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShowCondition {
    #[default]
    Always,
    Recurring,
    NotRecurring,
}

impl ShowCondition {
    pub fn applies(self, is_recurring: bool) -> bool {
        match self {
            ShowCondition::Always => true,
            ShowCondition::Recurring => is_recurring,
            ShowCondition::NotRecurring => !is_recurring,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub label: String,
    pub is_required: bool,
    #[serde(rename = "type")]
    pub field_type: FormFieldType,
    pub name: String,
    #[serde(default)]
    pub when: ShowCondition,
    pub order: u32,
}

impl FormField {
    pub fn new(name: &str, label: &str, field_type: FormFieldType, order: u32) -> Self {
        Self {
            label: label.to_string(),
            is_required: false,
            field_type,
            name: name.to_string(),
            when: ShowCondition::Always,
            order,
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    #[must_use]
    pub fn when(mut self, when: ShowCondition) -> Self {
        self.when = when;
        self
    }
}

/// Form validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(String),

    #[error("{label} must look like YYYY-MM-DDTHH:MM, got '{value}'")]
    InvalidDateTime { label: String, value: String },
}

/// Field names shared between the form and the request builder.
pub mod names {
    pub const TITLE: &str = "title";
    pub const DESCRIPTION: &str = "description";
    pub const URL: &str = "url";
    pub const EMAIL: &str = "email";
    pub const IS_RECURRING: &str = "isRecurring";
    pub const RUN_AT: &str = "runAt";
    pub const CRON_EXPR: &str = "cronExpr";
    pub const START_AT: &str = "startAt";
    pub const END_AT: &str = "endAt";
}

/// The fields of the "new schedule" form.
pub fn new_schedule_fields() -> Vec<FormField> {
    use FormFieldType::*;

    vec![
        FormField::new(names::TITLE, "Title", InputText, 1).required(),
        FormField::new(names::DESCRIPTION, "Description", Textarea, 2),
        FormField::new(names::URL, "Webhook URL", InputUrl, 3).required(),
        FormField::new(names::EMAIL, "Notification email", InputText, 4).required(),
        FormField::new(names::IS_RECURRING, "Recurring", Checkbox, 5),
        FormField::new(names::RUN_AT, "Run at", InputDatetimeLocal, 6)
            .required()
            .when(ShowCondition::NotRecurring),
        FormField::new(names::CRON_EXPR, "Cron expression", InputCron, 7)
            .required()
            .when(ShowCondition::Recurring),
        FormField::new(names::START_AT, "Start at", InputDatetimeLocal, 8)
            .required()
            .when(ShowCondition::Recurring),
        FormField::new(names::END_AT, "End at", InputDatetimeLocal, 9)
            .required()
            .when(ShowCondition::Recurring),
    ]
}

/// Fields to display, ordered by `order` and filtered by the recurring toggle.
pub fn visible_fields(fields: &[FormField], is_recurring: bool) -> Vec<FormField> {
    let mut visible: Vec<FormField> = fields
        .iter()
        .filter(|field| field.when.applies(is_recurring))
        .cloned()
        .collect();
    visible.sort_by_key(|field| field.order);
    visible
}
