use crate::node::{EmbeddableMapping, EntityMapping};
use serde::Serialize;

///
/// MappingEntry
///

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MappingEntry {
    Entity(EntityMapping),
    Embeddable(EmbeddableMapping),
}

impl MappingEntry {
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Entity(mapping) => &mapping.type_name,
            Self::Embeddable(mapping) => &mapping.type_name,
        }
    }
}

///
/// MappingDocument
///
/// Ordered logical mapping description handed to the persistence-unit
/// factory: entity entries in batch order, then embeddable entries in
/// discovery order.
///

#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct MappingDocument {
    pub entries: Vec<MappingEntry>,
}

impl MappingDocument {
    #[must_use]
    pub fn entity(&self, type_name: &str) -> Option<&EntityMapping> {
        self.entries.iter().find_map(|entry| match entry {
            MappingEntry::Entity(mapping) if mapping.type_name == type_name => Some(mapping),
            _ => None,
        })
    }

    #[must_use]
    pub fn embeddable(&self, type_name: &str) -> Option<&EmbeddableMapping> {
        self.entries.iter().find_map(|entry| match entry {
            MappingEntry::Embeddable(mapping) if mapping.type_name == type_name => Some(mapping),
            _ => None,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
