//! The form aggregate and its mutation contract.
//!
//! Every constructor and mutator validates before touching `content`, so a
//! failed call leaves the form exactly as it was.

use serde::Serialize;

use crate::account::{Address, AddressAllocator, PublicAccount};
use crate::element::{first_duplicate, ChoiceField, FormElement, OptionSelector};
use crate::error::{FormError, Result};
use crate::network::NetworkType;

/// Selects an element for removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementSelector {
    Index(usize),
    Label(String),
    /// Matches the first structurally equal element.
    Element(FormElement),
}

impl From<usize> for ElementSelector {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for ElementSelector {
    fn from(label: &str) -> Self {
        Self::Label(label.to_string())
    }
}

impl From<String> for ElementSelector {
    fn from(label: String) -> Self {
        Self::Label(label)
    }
}

impl From<&FormElement> for ElementSelector {
    fn from(element: &FormElement) -> Self {
        Self::Element(element.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Form {
    creator: PublicAccount,
    name: String,
    description: String,
    address: Address,
    editors: Vec<Address>,
    network: NetworkType,
    content: Vec<FormElement>,
}

impl Form {
    /// Create an empty form under a freshly allocated address.
    ///
    /// `editors` defaults to the creator's address.
    pub fn create(
        creator: PublicAccount,
        name: impl Into<String>,
        description: impl Into<String>,
        editors: Option<Vec<Address>>,
        allocator: &impl AddressAllocator,
    ) -> Result<Self> {
        let network = creator.network();
        let address = allocator.allocate(network)?;
        let editors = editors.unwrap_or_else(|| vec![creator.address().clone()]);
        Self::new(
            creator,
            name,
            description,
            address,
            editors,
            network,
            Vec::new(),
        )
    }

    pub fn new(
        creator: PublicAccount,
        name: impl Into<String>,
        description: impl Into<String>,
        address: Address,
        editors: Vec<Address>,
        network: NetworkType,
        content: Vec<FormElement>,
    ) -> Result<Self> {
        check_network("creator address", creator.address(), network)?;
        check_network("form address", &address, network)?;
        if editors.is_empty() {
            return Err(FormError::EmptyInput("editors"));
        }
        for editor in &editors {
            check_network("editor address", editor, network)?;
        }
        check_unique_labels(&content)?;

        Ok(Self {
            creator,
            name: name.into(),
            description: description.into(),
            address,
            editors,
            network,
            content,
        })
    }

    pub fn creator(&self) -> &PublicAccount {
        &self.creator
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn editors(&self) -> &[Address] {
        &self.editors
    }

    pub fn network(&self) -> NetworkType {
        self.network
    }

    pub fn elements(&self) -> &[FormElement] {
        &self.content
    }

    pub fn element(&self, index: usize) -> Option<&FormElement> {
        self.content.get(index)
    }

    /// Option editor for the choice element at `index`.
    ///
    /// `None` when the index is out of range or the element has no options.
    pub fn options_mut(&mut self, index: usize) -> Option<OptionsMut<'_>> {
        self.content
            .get_mut(index)
            .and_then(FormElement::choice_mut)
            .map(|field| OptionsMut { field })
    }

    pub fn push_element(&mut self, element: FormElement) -> Result<()> {
        if self.content.iter().any(|e| e.label() == element.label()) {
            return Err(FormError::DuplicateLabel {
                label: element.label().to_string(),
                context: "form content",
            });
        }
        self.content.push(element);
        Ok(())
    }

    pub fn pop_element(&mut self) -> Option<FormElement> {
        self.content.pop()
    }

    /// Remove exactly one element, returning it.
    pub fn remove_element(&mut self, selector: impl Into<ElementSelector>) -> Result<FormElement> {
        let index = match selector.into() {
            ElementSelector::Index(index) => {
                if index >= self.content.len() {
                    return Err(FormError::NotFound(format!(
                        "index {} is outside the form content (length {})",
                        index,
                        self.content.len()
                    )));
                }
                index
            }
            ElementSelector::Label(label) => self
                .content
                .iter()
                .position(|e| e.label() == label)
                .ok_or_else(|| FormError::NotFound(format!("element labelled \"{}\"", label)))?,
            ElementSelector::Element(element) => self
                .content
                .iter()
                .position(|e| *e == element)
                .ok_or_else(|| {
                    FormError::NotFound(format!("element labelled \"{}\"", element.label()))
                })?,
        };
        Ok(self.content.remove(index))
    }

    /// Replace the whole content list.
    pub fn replace_all_elements(&mut self, elements: Vec<FormElement>) -> Result<()> {
        if elements.is_empty() {
            return Err(FormError::EmptyInput("new elements"));
        }
        check_unique_labels(&elements)?;
        self.content = elements;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.content.clear();
    }
}

fn check_network(subject: &str, address: &Address, expected: NetworkType) -> Result<()> {
    if address.network() != expected {
        return Err(FormError::NetworkMismatch {
            subject: format!("{} {}", subject, address.pretty()),
            expected,
            got: address.network(),
        });
    }
    Ok(())
}

fn check_unique_labels(elements: &[FormElement]) -> Result<()> {
    match first_duplicate(elements.iter().map(FormElement::label)) {
        Some(label) => Err(FormError::DuplicateLabel {
            label: label.to_string(),
            context: "form content",
        }),
        None => Ok(()),
    }
}

/// In-place option editing for one choice element of a [`Form`].
///
/// Label and description stay fixed, so label uniqueness holds.
#[derive(Debug)]
pub struct OptionsMut<'a> {
    field: &'a mut ChoiceField,
}

impl OptionsMut<'_> {
    pub fn label(&self) -> &str {
        self.field.label()
    }

    pub fn options(&self) -> &[String] {
        self.field.options()
    }

    pub fn add_option(&mut self, option: impl Into<String>) -> Result<()> {
        self.field.add_option(option)
    }

    pub fn remove_option(&mut self, selector: impl Into<OptionSelector>) -> Result<String> {
        self.field.remove_option(selector)
    }

    pub fn replace_options(&mut self, options: Vec<String>) -> Result<()> {
        self.field.replace_options(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::RandomAddressAllocator;
    use crate::element::ElementType;
    use serde_json::json;

    const KEY: &str = "B4F12E7C9F6946091E2CB8B6D3A12B50D17CCBBF646386EA27CE2946A7423DCF";

    fn address(network: NetworkType, fill: char) -> Address {
        let raw: String = std::iter::once(network.address_prefix())
            .chain(std::iter::repeat(fill).take(39))
            .collect();
        Address::from_raw(&raw).unwrap()
    }

    fn creator(network: NetworkType) -> PublicAccount {
        PublicAccount::new(KEY, address(network, 'A')).unwrap()
    }

    fn empty_form() -> Form {
        Form::new(
            creator(NetworkType::MijinTest),
            "Survey",
            "Q1",
            address(NetworkType::MijinTest, 'F'),
            vec![address(NetworkType::MijinTest, 'A')],
            NetworkType::MijinTest,
            vec![],
        )
        .unwrap()
    }

    fn sample_elements() -> Vec<FormElement> {
        vec![
            FormElement::text("q1", "Your name"),
            FormElement::radio("q2", "Pick one", ["red", "blue"]).unwrap(),
            FormElement::password("q3", "Secret"),
        ]
    }

    #[test]
    fn create_defaults_editors_to_creator() {
        let form = Form::create(
            creator(NetworkType::TestNet),
            "Survey",
            "Q1",
            None,
            &RandomAddressAllocator,
        )
        .unwrap();
        assert_eq!(form.editors(), [form.creator().address().clone()]);
        assert_eq!(form.network(), NetworkType::TestNet);
        assert_eq!(form.address().network(), NetworkType::TestNet);
        assert!(form.elements().is_empty());
    }

    #[test]
    fn create_rejects_foreign_editor() {
        let err = Form::create(
            creator(NetworkType::TestNet),
            "Survey",
            "Q1",
            Some(vec![address(NetworkType::MainNet, 'B')]),
            &RandomAddressAllocator,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            FormError::NetworkMismatch {
                expected: NetworkType::TestNet,
                got: NetworkType::MainNet,
                ..
            }
        ));
    }

    #[test]
    fn new_rejects_any_network_disagreement() {
        let networks = [
            NetworkType::MainNet,
            NetworkType::TestNet,
            NetworkType::Mijin,
            NetworkType::MijinTest,
        ];
        for form_net in networks {
            for editor_net in networks {
                let result = Form::new(
                    creator(form_net),
                    "n",
                    "d",
                    address(form_net, 'F'),
                    vec![address(form_net, 'A'), address(editor_net, 'E')],
                    form_net,
                    vec![],
                );
                if form_net == editor_net {
                    assert!(result.is_ok());
                } else {
                    assert!(matches!(result, Err(FormError::NetworkMismatch { .. })));
                }
            }
        }
    }

    #[test]
    fn new_rejects_foreign_form_address() {
        let err = Form::new(
            creator(NetworkType::Mijin),
            "n",
            "d",
            address(NetworkType::MainNet, 'F'),
            vec![address(NetworkType::Mijin, 'A')],
            NetworkType::Mijin,
            vec![],
        )
        .unwrap_err();
        assert!(err.to_string().contains("form address"));
    }

    #[test]
    fn new_rejects_empty_editors() {
        let err = Form::new(
            creator(NetworkType::Mijin),
            "n",
            "d",
            address(NetworkType::Mijin, 'F'),
            vec![],
            NetworkType::Mijin,
            vec![],
        )
        .unwrap_err();
        assert_eq!(err, FormError::EmptyInput("editors"));
    }

    #[test]
    fn new_rejects_duplicate_labels() {
        let err = Form::new(
            creator(NetworkType::Mijin),
            "n",
            "d",
            address(NetworkType::Mijin, 'F'),
            vec![address(NetworkType::Mijin, 'A')],
            NetworkType::Mijin,
            vec![FormElement::text("a", "x"), FormElement::password("a", "y")],
        )
        .unwrap_err();
        assert!(matches!(err, FormError::DuplicateLabel { label, .. } if label == "a"));
    }

    #[test]
    fn push_rejects_used_label() {
        let mut form = empty_form();
        form.push_element(FormElement::text("q1", "Your name")).unwrap();
        let err = form
            .push_element(FormElement::checkbox("q1", "Other", ["x"]).unwrap())
            .unwrap_err();
        assert!(matches!(err, FormError::DuplicateLabel { .. }));
        assert_eq!(form.elements().len(), 1);
        assert_eq!(form.element(0).unwrap().element_type(), ElementType::Text);
    }

    #[test]
    fn pop_returns_last_or_none() {
        let mut form = empty_form();
        assert!(form.pop_element().is_none());
        form.replace_all_elements(sample_elements()).unwrap();
        assert_eq!(form.pop_element().unwrap().label(), "q3");
        assert_eq!(form.elements().len(), 2);
    }

    #[test]
    fn remove_by_index_label_and_element() {
        let mut form = empty_form();
        form.replace_all_elements(sample_elements()).unwrap();

        assert_eq!(form.remove_element(1).unwrap().label(), "q2");
        assert_eq!(form.remove_element("q3").unwrap().label(), "q3");
        let q1 = FormElement::text("q1", "Your name");
        assert_eq!(form.remove_element(&q1).unwrap(), q1);
        assert!(form.elements().is_empty());
    }

    #[test]
    fn remove_missing_is_not_found() {
        let mut form = empty_form();
        form.replace_all_elements(sample_elements()).unwrap();

        assert!(matches!(form.remove_element(3), Err(FormError::NotFound(_))));
        assert!(matches!(form.remove_element("zz"), Err(FormError::NotFound(_))));
        // Same label, different description: not the same element.
        let impostor = FormElement::text("q1", "Someone else");
        assert!(matches!(
            form.remove_element(&impostor),
            Err(FormError::NotFound(_))
        ));
        assert_eq!(form.elements(), sample_elements().as_slice());
    }

    #[test]
    fn replace_all_validates_before_replacing() {
        let mut form = empty_form();
        form.replace_all_elements(sample_elements()).unwrap();

        assert_eq!(
            form.replace_all_elements(vec![]),
            Err(FormError::EmptyInput("new elements"))
        );
        let dupes = vec![FormElement::text("x", "1"), FormElement::text("x", "2")];
        assert!(matches!(
            form.replace_all_elements(dupes),
            Err(FormError::DuplicateLabel { .. })
        ));
        assert_eq!(form.elements(), sample_elements().as_slice());
    }

    #[test]
    fn clear_empties_content() {
        let mut form = empty_form();
        form.replace_all_elements(sample_elements()).unwrap();
        form.clear();
        assert!(form.elements().is_empty());
        form.clear();
        assert!(form.elements().is_empty());
    }

    #[test]
    fn options_mut_edits_options_in_place() {
        let mut form = empty_form();
        form.replace_all_elements(sample_elements()).unwrap();
        let mut editor = form.options_mut(1).unwrap();
        editor.add_option("green").unwrap();
        assert_eq!(editor.remove_option(0).unwrap(), "red");
        assert_eq!(form.element(1).unwrap().options().unwrap(), ["blue", "green"]);
    }

    #[test]
    fn options_mut_only_reaches_choice_elements() {
        let mut form = empty_form();
        form.replace_all_elements(sample_elements()).unwrap();
        assert!(form.options_mut(0).is_none());
        assert!(form.options_mut(99).is_none());
    }

    #[test]
    fn labels_stay_unique_after_in_place_edits() {
        let mut form = empty_form();
        form.replace_all_elements(sample_elements()).unwrap();
        let before: Vec<String> = form.elements().iter().map(|e| e.label().to_string()).collect();

        let mut editor = form.options_mut(1).unwrap();
        editor.replace_options(vec!["q1".into(), "yes".into()]).unwrap();
        assert!(editor.add_option("q1").is_err());

        let after: Vec<&str> = form.elements().iter().map(FormElement::label).collect();
        assert_eq!(after, before);
        assert!(first_duplicate(after.iter().copied()).is_none());
    }

    #[test]
    fn serializes_for_renderers() {
        let mut form = empty_form();
        form.push_element(FormElement::text("q1", "Your name")).unwrap();
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["name"], json!("Survey"));
        assert_eq!(value["network"], json!("MIJIN_TEST"));
        assert_eq!(
            value["content"],
            json!([{ "type": "text", "label": "q1", "description": "Your name" }])
        );
    }
}
