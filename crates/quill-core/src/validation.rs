//! Input validation for post payloads.
//!
//! Rules live in a static table, one entry per accepted field. The same table
//! serves creation (required fields enforced) and partial updates (every
//! field optional, but checked when present). String values are trimmed
//! before they are measured or extracted.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::{NewPost, PostPatch};

pub const TITLE_MAX_LEN: usize = 120;
pub const TAG_MIN_LEN: usize = 4;
pub const TAG_MAX_LEN: usize = 20;

/// Which operation the payload is validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Update,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    String,
    /// An array whose elements are strings; length bounds apply per element.
    StringList,
}

/// Validation rule for a single field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    required: bool,
    kind: Kind,
    min_len: Option<usize>,
    max_len: Option<usize>,
}

const POST_RULES: [(&str, FieldRule); 4] = [
    (
        "title",
        FieldRule {
            required: true,
            kind: Kind::String,
            min_len: None,
            max_len: Some(TITLE_MAX_LEN),
        },
    ),
    (
        "content",
        FieldRule {
            required: true,
            kind: Kind::String,
            min_len: None,
            max_len: None,
        },
    ),
    (
        "category",
        FieldRule {
            required: true,
            kind: Kind::String,
            min_len: None,
            max_len: None,
        },
    ),
    (
        "tags",
        FieldRule {
            required: false,
            kind: Kind::StringList,
            min_len: Some(TAG_MIN_LEN),
            max_len: Some(TAG_MAX_LEN),
        },
    ),
];

/// Field name to violation messages, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.values().flatten().map(String::as_str).collect();
        write!(f, "{}", messages.join(" "))
    }
}

impl FieldRule {
    fn check(&self, field: &str, value: Option<&Value>, mode: Mode, errors: &mut ValidationErrors) {
        let enforce_required = self.required && mode == Mode::Create;

        let value = match value {
            None | Some(Value::Null) if enforce_required => {
                errors.add(field, format!("The {field} field is required."));
                return;
            }
            None => return,
            Some(value) => value,
        };

        match self.kind {
            Kind::String => match value.as_str().map(str::trim) {
                Some("") if enforce_required => {
                    errors.add(field, format!("The {field} field is required."));
                }
                Some(s) => self.check_length(field, field, s, errors),
                None => errors.add(field, format!("The {field} field must be a string.")),
            },
            Kind::StringList => match value.as_array() {
                Some(items) => {
                    for (index, item) in items.iter().enumerate() {
                        let label = format!("{field}.{index}");
                        match item.as_str().map(str::trim) {
                            Some(s) => self.check_length(field, &label, s, errors),
                            None => {
                                errors.add(field, format!("The {label} field must be a string."))
                            }
                        }
                    }
                }
                None => errors.add(field, format!("The {field} field must be an array.")),
            },
        }
    }

    /// Length is counted in characters. Violations are filed under `field`
    /// while the message names `label` (e.g. `tags.2`).
    fn check_length(&self, field: &str, label: &str, value: &str, errors: &mut ValidationErrors) {
        let len = value.chars().count();
        if let Some(min) = self.min_len {
            if len < min {
                errors.add(
                    field,
                    format!("The {label} field must be at least {min} characters."),
                );
            }
        }
        if let Some(max) = self.max_len {
            if len > max {
                errors.add(
                    field,
                    format!("The {label} field must not be greater than {max} characters."),
                );
            }
        }
    }
}

/// Run every rule against `input`, collecting all violations.
pub fn check(input: &Value, mode: Mode) -> Result<&Map<String, Value>, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let Some(fields) = input.as_object() else {
        errors.add("body", "The request body must be a JSON object.");
        return Err(errors);
    };

    for (field, rule) in &POST_RULES {
        rule.check(field, fields.get(*field), mode, &mut errors);
    }

    if errors.is_empty() {
        Ok(fields)
    } else {
        Err(errors)
    }
}

/// Validate a creation payload and extract the new post from it.
pub fn validate_new_post(input: &Value) -> Result<NewPost, ValidationErrors> {
    let fields = check(input, Mode::Create)?;

    Ok(NewPost {
        title: string_field(fields, "title").unwrap_or_default(),
        content: string_field(fields, "content").unwrap_or_default(),
        category: string_field(fields, "category").unwrap_or_default(),
        tags: string_list(fields, "tags").unwrap_or_default(),
    })
}

/// Validate an update payload and extract the fields it supplies.
///
/// Keys outside the rule table are ignored.
pub fn validate_patch(input: &Value) -> Result<PostPatch, ValidationErrors> {
    let fields = check(input, Mode::Update)?;

    Ok(PostPatch {
        title: string_field(fields, "title"),
        content: string_field(fields, "content"),
        category: string_field(fields, "category"),
        tags: string_list(fields, "tags"),
    })
}

fn string_field(fields: &Map<String, Value>, name: &str) -> Option<String> {
    fields
        .get(name)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_owned())
}

fn string_list(fields: &Map<String, Value>, name: &str) -> Option<Vec<String>> {
    fields.get(name).and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(|s| s.trim().to_owned())
            .collect()
    })
}
