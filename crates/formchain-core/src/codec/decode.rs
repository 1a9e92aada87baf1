use super::grammar::{parse_body, parse_header, RawElement};
use crate::account::{Address, PublicAccount};
use crate::element::{first_duplicate, ChoiceField, ElementType, FormElement, InputField};
use crate::error::{FormError, Result};
use crate::form::Form;
use crate::network::NetworkType;

/// Identity values the wire text does not carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeContext {
    pub creator: PublicAccount,
    pub address: Address,
    pub network: NetworkType,
}

/// Rebuild a form from its header and body.
///
/// # Errors
/// `MalformedHeader` / `MalformedBody` when the text does not follow the
/// grammar, `UnknownElementType` and `ArityMismatch` for bad element blocks,
/// and whatever [`Form::new`] rejects.
pub fn decode(header: &str, body: &str, context: &DecodeContext) -> Result<Form> {
    let raw = parse_header(header)?;

    let editors = raw
        .editors
        .iter()
        .map(|token| {
            Address::from_raw(token).map_err(|_| {
                FormError::MalformedHeader(format!("editor {} has no known network prefix", token))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let content = parse_body(body, raw.delimiter)?
        .into_iter()
        .map(build_element)
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        tag = raw.tag,
        delimiter = %raw.delimiter.as_char(),
        editors = editors.len(),
        elements = content.len(),
        "decoded form"
    );

    Form::new(
        context.creator.clone(),
        raw.name,
        raw.description,
        context.address.clone(),
        editors,
        context.network,
        content,
    )
}

fn build_element(raw: RawElement<'_>) -> Result<FormElement> {
    let element_type = raw
        .type_index
        .parse::<usize>()
        .ok()
        .and_then(ElementType::from_index)
        .ok_or_else(|| FormError::UnknownElementType(raw.type_index.to_string()))?;

    let arity = raw.arity();
    let field = || InputField::new(raw.label, raw.description);
    let element = match (element_type, &raw.options) {
        (ElementType::Text, None) => FormElement::Text(field()),
        (ElementType::Password, None) => FormElement::Password(field()),
        (ElementType::Radio, Some(options)) => FormElement::Radio(choice(&raw, options)),
        (ElementType::Checkbox, Some(options)) => FormElement::Checkbox(choice(&raw, options)),
        (t, _) => {
            return Err(FormError::ArityMismatch {
                element: t.name(),
                expected: t.arity(),
                got: arity,
            })
        }
    };
    Ok(element)
}

fn choice(raw: &RawElement<'_>, options: &[&str]) -> ChoiceField {
    if let Some(dup) = first_duplicate(options.iter().copied()) {
        tracing::warn!(
            label = raw.label,
            option = dup,
            "decoded element repeats an option"
        );
    }
    ChoiceField::from_wire(
        raw.label.to_string(),
        raw.description.to_string(),
        options.iter().map(|o| o.to_string()).collect(),
    )
}
