//! Mapping-document synthesis for one batch of entity types.

use crate::{
    classify::{ClassifyError, classify},
    node::{EmbeddableMapping, EntityMapping, MappingDocument, MappingEntry},
    reflect::{TypeDescriptor, TypeRef},
    types::{AttributeRole, InheritanceStrategy},
};
use std::collections::HashSet;
use thiserror::Error as ThisError;

///
/// BuildError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum BuildError {
    #[error(transparent)]
    Classify(#[from] ClassifyError),

    #[error(
        "embeddable '{owner}' member '{member}' is itself embeddable ('{type_name}'): nested embeddables are not yet supported"
    )]
    NestedEmbeddable {
        owner: String,
        member: String,
        type_name: String,
    },
}

///
/// BuiltDocument
///
/// Builder output: the synthesized document plus the names of types the
/// persistence runtime already recognizes (recorded by name only, no
/// synthesis).
///

#[derive(Clone, Debug)]
pub struct BuiltDocument {
    pub document: MappingDocument,
    pub recognized: Vec<String>,
}

/// Build one mapping document covering `entities` — each paired with its
/// identifier attribute — plus every embeddable type they reference.
/// Embeddables are expanded at most once each, in discovery order.
pub fn build_document(
    entities: &[(TypeRef, String)],
    table_prefix: &str,
) -> Result<BuiltDocument, BuildError> {
    let mut entries = Vec::new();
    let mut recognized = Vec::new();

    let mut visited: HashSet<String> = HashSet::new();
    let mut embeddables: Vec<TypeRef> = Vec::new();

    for (ty, id_attribute) in entities {
        if ty.markers().recognized {
            recognized.push(ty.type_name().to_string());
            continue;
        }

        let classified = classify(ty.as_ref(), Some(id_attribute))?;
        for embeddable in &classified.embedded {
            if visited.insert(embeddable.type_name().to_string()) {
                embeddables.push(embeddable.clone());
            }
        }

        let markers = ty.markers();
        let (table, inheritance) = if markers.single_table_inheritance {
            // The inheritance root supplies the table.
            (None, Some(InheritanceStrategy::SingleTable))
        } else {
            let name = markers.entity_name.as_deref().unwrap_or(ty.simple_name());
            (Some(format!("{table_prefix}{name}")), None)
        };

        entries.push(MappingEntry::Entity(EntityMapping {
            type_name: ty.type_name().to_string(),
            table,
            inheritance,
            discriminator_value: markers.discriminator_value.clone(),
            discriminator_column: markers.discriminator_column.clone(),
            attributes: classified.attributes,
        }));
    }

    for ty in embeddables {
        let classified = classify(ty.as_ref(), None)?;

        if let Some(attribute) = classified
            .attributes
            .iter()
            .find(|a| a.role == AttributeRole::Embedded)
        {
            let nested = classified
                .embedded
                .first()
                .map_or_else(String::new, |ty| ty.type_name().to_string());
            return Err(BuildError::NestedEmbeddable {
                owner: ty.type_name().to_string(),
                member: attribute.name.clone(),
                type_name: nested,
            });
        }

        entries.push(MappingEntry::Embeddable(EmbeddableMapping {
            type_name: ty.type_name().to_string(),
            attributes: classified.attributes,
        }));
    }

    Ok(BuiltDocument {
        document: MappingDocument { entries },
        recognized,
    })
}
