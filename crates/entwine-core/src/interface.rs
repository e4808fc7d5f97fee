//! Outbound boundary: the backing-store locator and persistence-unit
//! factory this core drives, and the runtime-metamodel surface it
//! introspects. The runtime attribute space is independent of the
//! classifier's — the factory may rename and reshape attributes, and the
//! reconciler never assumes the two agree.

use entwine_schema::{node::MappingDocument, reflect::TypeRef};
use std::{error::Error as StdError, fmt, sync::Arc};

/// Any failure raised by the external persistence-unit factory.
pub type FactoryFault = Box<dyn StdError + Send + Sync>;

///
/// TypeResolver
///
/// Resolves fully-qualified type names back to descriptors; the
/// class-loader analog handed through `define_entities`.
///

pub trait TypeResolver: Send + Sync {
    fn resolve(&self, type_name: &str) -> Option<TypeRef>;
}

///
/// StoreLocator
///

pub trait StoreLocator: Send + Sync {
    fn resolve_store(&self, store_id: &str) -> Option<Arc<dyn BackingStore>>;
}

///
/// BackingStore
///
/// One named backing store capable of turning a mapping document into a
/// live persistence unit.
///

pub trait BackingStore: Send + Sync {
    /// Prefix applied to every synthesized table name.
    fn table_prefix(&self) -> &str;

    fn create_unit(
        &self,
        resolver: &Arc<dyn TypeResolver>,
        document: &MappingDocument,
        recognized: &[String],
    ) -> Result<Arc<dyn PersistenceUnit>, FactoryFault>;
}

///
/// PersistenceUnit
///
/// Opaque handle to one live persistence unit; stored in every published
/// metadata object for the query layer.
///

pub trait PersistenceUnit: Send + Sync + fmt::Debug {
    fn open_session(&self) -> Result<Box<dyn Session>, FactoryFault>;
}

///
/// Session
///
/// Metamodel introspection handle, owned exclusively by the definition
/// task that opened it. Implementations release their resources on drop.
///

pub trait Session {
    fn metamodel(&self) -> &dyn RuntimeMetamodel;
}

///
/// RuntimeMetamodel
///

pub trait RuntimeMetamodel {
    fn entities(&self) -> Vec<Arc<dyn RuntimeEntityType>>;

    /// The managed embeddable type registered under `type_name`.
    fn embeddable(&self, type_name: &str) -> Option<Arc<dyn RuntimeManagedType>>;
}

///
/// RuntimeManagedType
///

pub trait RuntimeManagedType: Send + Sync {
    fn attributes(&self) -> Vec<Arc<dyn RuntimeAttribute>>;
}

///
/// RuntimeEntityType
///

pub trait RuntimeEntityType: RuntimeManagedType {
    /// Entity name as the runtime knows it.
    fn name(&self) -> &str;

    /// The described type this runtime entity was produced from.
    fn entity_type(&self) -> TypeRef;

    fn attribute(&self, name: &str) -> Option<Arc<dyn RuntimeAttribute>>;
}

///
/// PersistentKind
///
/// How the runtime persists one attribute.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PersistentKind {
    Basic,
    ElementCollection,
    Embedded,
}

///
/// RuntimeAttribute
///

pub trait RuntimeAttribute: Send + Sync {
    fn name(&self) -> &str;

    fn kind(&self) -> PersistentKind;

    /// Declared type name; resolves embedded attributes against the
    /// metamodel.
    fn declared_type_name(&self) -> &str;

    fn accessor(&self) -> Arc<dyn MemberAccessor>;
}

///
/// MemberAccessor
///
/// Opaque member handle; one step of an accessor chain consumed by the
/// query layer.
///

pub trait MemberAccessor: Send + Sync + fmt::Debug {
    fn member_name(&self) -> &str;
}
