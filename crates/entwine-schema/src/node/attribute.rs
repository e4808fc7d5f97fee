use crate::types::{AttributeRole, GeneratedStrategy};
use serde::Serialize;

///
/// AttributeDescriptor
///
/// One classified member of an entity or embeddable mapping entry.
///

#[derive(Clone, Debug, Serialize)]
pub struct AttributeDescriptor {
    pub name: String,
    pub role: AttributeRole,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated: Option<GeneratedStrategy>,
}

///
/// AttributeList
///

#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct AttributeList {
    attributes: Vec<AttributeDescriptor>,
}

impl AttributeList {
    #[must_use]
    pub const fn new(attributes: Vec<AttributeDescriptor>) -> Self {
        Self { attributes }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// The first identifier-role attribute, if any.
    #[must_use]
    pub fn id(&self) -> Option<&AttributeDescriptor> {
        self.attributes.iter().find(|a| a.role == AttributeRole::Id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttributeDescriptor> {
        self.attributes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl<'a> IntoIterator for &'a AttributeList {
    type Item = &'a AttributeDescriptor;
    type IntoIter = std::slice::Iter<'a, AttributeDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}
