//! Metamodel reconciliation: derive the published per-entity index from the
//! factory's runtime metamodel.

use crate::{
    error::DefineError,
    interface::{
        MemberAccessor, PersistenceUnit, PersistentKind, RuntimeAttribute, RuntimeEntityType,
        RuntimeManagedType, RuntimeMetamodel,
    },
    model::EntityMetadata,
};
use std::{
    collections::{BTreeMap, BTreeSet, VecDeque},
    sync::Arc,
};

///
/// EmbeddedVisit
/// One queued embedded attribute with the path walked to reach it.
///

struct EmbeddedVisit {
    attribute: Arc<dyn RuntimeAttribute>,
    prefix: String,
    accessors: Vec<Arc<dyn MemberAccessor>>,
}

/// Derive the published metadata for one runtime entity.
///
/// Direct attributes register first; embedded attributes are then walked
/// breadth-first, so on colliding short names the first-discovered path
/// keeps its claim and later paths stay reachable only through their
/// qualified spellings.
pub fn reconcile_entity(
    metamodel: &dyn RuntimeMetamodel,
    entity: &dyn RuntimeEntityType,
    id_attribute: &str,
    unit: &Arc<dyn PersistenceUnit>,
) -> Result<EntityMetadata, DefineError> {
    let mut name_index: BTreeMap<String, String> = BTreeMap::new();
    let mut accessors_by_attribute: BTreeMap<String, Vec<Arc<dyn MemberAccessor>>> =
        BTreeMap::new();
    let mut collection_attributes: BTreeSet<String> = BTreeSet::new();
    let mut queue: VecDeque<EmbeddedVisit> = VecDeque::new();

    for attribute in entity.attributes() {
        let name = attribute.name().to_string();
        match attribute.kind() {
            PersistentKind::Embedded => queue.push_back(EmbeddedVisit {
                prefix: name,
                accessors: vec![attribute.accessor()],
                attribute,
            }),
            kind => {
                name_index.insert(name.to_uppercase(), name.clone());
                accessors_by_attribute.insert(name.clone(), vec![attribute.accessor()]);
                if kind == PersistentKind::ElementCollection {
                    collection_attributes.insert(name);
                }
            }
        }
    }

    while let Some(visit) = queue.pop_front() {
        let embeddable = metamodel
            .embeddable(visit.attribute.declared_type_name())
            .ok_or_else(|| {
                DefineError::internal(format!(
                    "embeddable type '{}' missing from the runtime metamodel",
                    visit.attribute.declared_type_name()
                ))
            })?;

        for attribute in embeddable.attributes() {
            let full_name = format!("{}.{}", visit.prefix, attribute.name());
            let mut accessors = visit.accessors.clone();
            accessors.push(attribute.accessor());

            match attribute.kind() {
                PersistentKind::Embedded => queue.push_back(EmbeddedVisit {
                    prefix: full_name,
                    accessors,
                    attribute,
                }),
                kind => {
                    let dotted = full_name.to_uppercase();
                    let underscored = dotted.replace('.', "_");
                    insert_if_absent(&mut name_index, attribute.name().to_uppercase(), &full_name);
                    insert_if_absent(&mut name_index, dotted, &full_name);
                    insert_if_absent(&mut name_index, underscored, &full_name);

                    accessors_by_attribute.insert(full_name.clone(), accessors);
                    if kind == PersistentKind::ElementCollection {
                        collection_attributes.insert(full_name);
                    }
                }
            }
        }
    }

    // Identifier lookup goes straight at the runtime attribute set, not
    // through the name index.
    let id_accessor = entity
        .attribute(id_attribute)
        .map(|attribute| attribute.accessor())
        .ok_or_else(|| {
            DefineError::internal(format!(
                "identifier attribute '{id_attribute}' is not present on runtime entity '{}'",
                entity.name()
            ))
        })?;

    Ok(EntityMetadata {
        entity_name: entity.name().to_string(),
        entity_type: entity.entity_type(),
        accessors_by_attribute,
        name_index,
        collection_attributes,
        id_attribute: id_attribute.to_string(),
        id_accessor,
        unit: unit.clone(),
    })
}

/// First writer wins; existing claims are never overwritten.
fn insert_if_absent(index: &mut BTreeMap<String, String>, key: String, value: &str) {
    index.entry(key).or_insert_with(|| value.to_string());
}
