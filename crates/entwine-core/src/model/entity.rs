use crate::interface::{MemberAccessor, PersistenceUnit};
use entwine_schema::reflect::TypeRef;
use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

///
/// EntityMetadata
/// Published, immutable per-entity index consumed by the query layer.
///

#[derive(Debug)]
pub struct EntityMetadata {
    /// Entity name as the persistence runtime knows it.
    pub entity_name: String,

    /// The described type this metadata was published for.
    pub entity_type: TypeRef,

    /// Ordered accessor chain per canonical attribute name. Length > 1 only
    /// for attributes reached through embedded members.
    pub accessors_by_attribute: BTreeMap<String, Vec<Arc<dyn MemberAccessor>>>,

    /// Uppercased, dotted, and underscored spellings to canonical names.
    pub name_index: BTreeMap<String, String>,

    /// Canonical names of element-collection attributes.
    pub collection_attributes: BTreeSet<String>,

    pub id_attribute: String,
    pub id_accessor: Arc<dyn MemberAccessor>,

    /// Live persistence unit backing this entity.
    pub unit: Arc<dyn PersistenceUnit>,
}

impl EntityMetadata {
    /// Resolve any supported attribute spelling to its canonical name.
    #[must_use]
    pub fn canonical_attribute(&self, spelling: &str) -> Option<&str> {
        self.name_index
            .get(&spelling.to_uppercase())
            .map(String::as_str)
    }

    /// Accessor chain for a canonical attribute name.
    #[must_use]
    pub fn accessors(&self, attribute: &str) -> Option<&[Arc<dyn MemberAccessor>]> {
        self.accessors_by_attribute
            .get(attribute)
            .map(Vec::as_slice)
    }

    #[must_use]
    pub fn is_collection(&self, attribute: &str) -> bool {
        self.collection_attributes.contains(attribute)
    }
}
