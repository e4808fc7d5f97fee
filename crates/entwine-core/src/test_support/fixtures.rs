//! Shared descriptor and metadata fixtures for core tests.

use crate::{
    interface::PersistenceUnit,
    model::EntityMetadata,
    test_support::runtime::{FakeUnit, accessor},
};
use entwine_schema::{
    describe::TypeSpec,
    reflect::{Member, TypeDescriptor, TypeRef},
};
use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

pub(crate) fn package() -> TypeRef {
    TypeSpec::new("fixtures::Package")
        .entity()
        .member(Member::scalar("id", "i32"))
        .member(Member::scalar("length", "f32"))
        .member(Member::scalar("width", "f32"))
        .member(Member::scalar("height", "f32"))
        .seal()
}

pub(crate) fn address() -> TypeRef {
    TypeSpec::new("fixtures::Address")
        .embeddable()
        .member(Member::scalar("street", "String"))
        .member(Member::scalar("city", "String"))
        .seal()
}

pub(crate) fn shipment(address: &TypeRef) -> TypeRef {
    TypeSpec::new("fixtures::Shipment")
        .entity()
        .member(Member::scalar("id", "u64"))
        .member(Member::typed("address", address))
        .member(Member::collection("tags", "String"))
        .seal()
}

/// Minimal published metadata for registry tests.
pub(crate) fn metadata_for(type_name: &str) -> Arc<EntityMetadata> {
    let ty = TypeSpec::new(type_name)
        .entity()
        .member(Member::scalar("id", "u64"))
        .seal();
    let id_accessor = accessor("id");
    let unit: Arc<dyn PersistenceUnit> = Arc::new(FakeUnit::empty());

    Arc::new(EntityMetadata {
        entity_name: ty.simple_name().to_string(),
        entity_type: ty,
        accessors_by_attribute: BTreeMap::from([("id".to_string(), vec![id_accessor.clone()])]),
        name_index: BTreeMap::from([("ID".to_string(), "id".to_string())]),
        collection_attributes: BTreeSet::new(),
        id_attribute: "id".to_string(),
        id_accessor,
        unit,
    })
}
