//! Form element variants.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};

/// Element kind. The position in [`ELEMENT_TYPES`] is the wire type index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementType {
    Text,
    Password,
    Radio,
    Checkbox,
}

/// Wire type table. Reordering it changes the meaning of every published form.
pub const ELEMENT_TYPES: [ElementType; 4] = [
    ElementType::Text,
    ElementType::Password,
    ElementType::Radio,
    ElementType::Checkbox,
];

impl ElementType {
    pub fn index(self) -> usize {
        match self {
            Self::Text => 0,
            Self::Password => 1,
            Self::Radio => 2,
            Self::Checkbox => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        ELEMENT_TYPES.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Password => "password",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
        }
    }

    /// Whether elements of this type carry an option list.
    pub fn has_options(self) -> bool {
        matches!(self, Self::Radio | Self::Checkbox)
    }

    /// Number of wire fields after the type index.
    pub fn arity(self) -> usize {
        if self.has_options() {
            3
        } else {
            2
        }
    }
}

/// Label and description of a free-input element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct InputField {
    label: String,
    description: String,
}

impl InputField {
    pub fn new(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Selects an option by position or by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionSelector {
    Index(usize),
    Value(String),
}

impl From<usize> for OptionSelector {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for OptionSelector {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

impl From<String> for OptionSelector {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

/// Label, description and a pairwise-distinct option list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ChoiceField {
    label: String,
    description: String,
    options: Vec<String>,
}

impl ChoiceField {
    pub fn new(
        label: impl Into<String>,
        description: impl Into<String>,
        options: Vec<String>,
    ) -> Result<Self> {
        if let Some(dup) = first_duplicate(options.iter().map(String::as_str)) {
            return Err(FormError::DuplicateLabel {
                label: dup.to_string(),
                context: "element options",
            });
        }
        Ok(Self::from_wire(label.into(), description.into(), options))
    }

    /// Decoded options are taken as-is.
    pub(crate) fn from_wire(label: String, description: String, options: Vec<String>) -> Self {
        Self {
            label,
            description,
            options,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn add_option(&mut self, option: impl Into<String>) -> Result<()> {
        let option = option.into();
        if self.options.contains(&option) {
            return Err(FormError::DuplicateLabel {
                label: option,
                context: "element options",
            });
        }
        self.options.push(option);
        Ok(())
    }

    /// Remove one option, returning it.
    pub fn remove_option(&mut self, selector: impl Into<OptionSelector>) -> Result<String> {
        let index = match selector.into() {
            OptionSelector::Index(index) if index < self.options.len() => index,
            OptionSelector::Index(index) => {
                return Err(FormError::NotFound(format!(
                    "no option at index {} (element has {})",
                    index,
                    self.options.len()
                )))
            }
            OptionSelector::Value(value) => self
                .options
                .iter()
                .position(|o| *o == value)
                .ok_or_else(|| FormError::NotFound(format!("option \"{}\"", value)))?,
        };
        Ok(self.options.remove(index))
    }

    pub fn replace_options(&mut self, options: Vec<String>) -> Result<()> {
        if options.is_empty() {
            return Err(FormError::EmptyInput("new options"));
        }
        if let Some(dup) = first_duplicate(options.iter().map(String::as_str)) {
            return Err(FormError::DuplicateLabel {
                label: dup.to_string(),
                context: "element options",
            });
        }
        self.options = options;
        Ok(())
    }
}

/// One input definition within a form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FormElement {
    Text(InputField),
    Password(InputField),
    Radio(ChoiceField),
    Checkbox(ChoiceField),
}

impl FormElement {
    pub fn text(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self::Text(InputField::new(label, description))
    }

    pub fn password(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self::Password(InputField::new(label, description))
    }

    pub fn radio<S: Into<String>>(
        label: impl Into<String>,
        description: impl Into<String>,
        options: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        let options = options.into_iter().map(Into::into).collect();
        Ok(Self::Radio(ChoiceField::new(label, description, options)?))
    }

    pub fn checkbox<S: Into<String>>(
        label: impl Into<String>,
        description: impl Into<String>,
        options: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        let options = options.into_iter().map(Into::into).collect();
        Ok(Self::Checkbox(ChoiceField::new(label, description, options)?))
    }

    pub fn element_type(&self) -> ElementType {
        match self {
            Self::Text(_) => ElementType::Text,
            Self::Password(_) => ElementType::Password,
            Self::Radio(_) => ElementType::Radio,
            Self::Checkbox(_) => ElementType::Checkbox,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Text(f) | Self::Password(f) => f.label(),
            Self::Radio(c) | Self::Checkbox(c) => c.label(),
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Text(f) | Self::Password(f) => f.description(),
            Self::Radio(c) | Self::Checkbox(c) => c.description(),
        }
    }

    /// `None` for variants without an option list.
    pub fn options(&self) -> Option<&[String]> {
        match self {
            Self::Text(_) | Self::Password(_) => None,
            Self::Radio(c) | Self::Checkbox(c) => Some(c.options()),
        }
    }

    pub fn choice_mut(&mut self) -> Option<&mut ChoiceField> {
        match self {
            Self::Text(_) | Self::Password(_) => None,
            Self::Radio(c) | Self::Checkbox(c) => Some(c),
        }
    }
}

/// First value that appears twice, case-sensitive.
pub(crate) fn first_duplicate<'a>(values: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    values.into_iter().find(|v| !seen.insert(*v))
}
