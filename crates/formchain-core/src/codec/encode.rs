use super::grammar::is_field_text;
use super::{Delimiter, WireForm};
use crate::account::Address;
use crate::error::{FormError, Result};
use crate::form::Form;
use crate::FORM_TAG;

/// Encode with the default `~` delimiter.
pub fn encode(form: &Form) -> WireForm {
    encode_with(form, Delimiter::default())
}

pub fn encode_with(form: &Form, delimiter: Delimiter) -> WireForm {
    let sep = delimiter.as_char().to_string();
    let d = sep.as_str();

    let editors = braced(form.editors().iter().map(Address::plain), d);
    let header = [FORM_TAG, form.name(), form.description(), editors.as_str()].join(d);

    let elements: Vec<String> = form
        .elements()
        .iter()
        .map(|element| {
            let mut fields = vec![
                element.element_type().index().to_string(),
                element.label().to_string(),
                element.description().to_string(),
            ];
            if let Some(options) = element.options() {
                fields.push(braced(options.iter().map(String::as_str), d));
            }
            fields.retain(|f| !f.is_empty());
            format!("{{{}}}", fields.join(d))
        })
        .collect();
    let body = format!("{{{}}}", elements.join(d));

    tracing::debug!(
        elements = elements.len(),
        header_len = header.len(),
        body_len = body.len(),
        "encoded form"
    );
    WireForm { header, body }
}

fn braced<'a>(items: impl Iterator<Item = &'a str>, d: &str) -> String {
    format!("{{{}}}", items.collect::<Vec<_>>().join(d))
}

/// Check that [`encode`] output for `form` will decode back to it.
///
/// The wire grammar only carries non-empty `[A-Za-z0-9 ]` text, needs at
/// least one element and at least one option per choice element.
pub fn check_encodable(form: &Form) -> Result<()> {
    check_text("name", form.name())?;
    check_text("description", form.description())?;
    if form.elements().is_empty() {
        return Err(FormError::EmptyInput("form elements"));
    }
    for element in form.elements() {
        check_text("element label", element.label())?;
        check_text("element description", element.description())?;
        if let Some(options) = element.options() {
            if options.is_empty() {
                return Err(FormError::EmptyInput("element options"));
            }
            for option in options {
                check_text("option", option)?;
            }
        }
    }
    Ok(())
}

fn check_text(field: &'static str, value: &str) -> Result<()> {
    if is_field_text(value) {
        Ok(())
    } else {
        Err(FormError::UnencodableField {
            field,
            value: value.to_string(),
        })
    }
}
