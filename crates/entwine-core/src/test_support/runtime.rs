//! In-memory persistence stack for core tests: a document-driven fake
//! factory, metamodel, and store locator.

use crate::interface::{
    BackingStore, FactoryFault, MemberAccessor, PersistenceUnit, PersistentKind, RuntimeAttribute,
    RuntimeEntityType, RuntimeManagedType, RuntimeMetamodel, Session, StoreLocator, TypeResolver,
};
use entwine_schema::{
    node::{MappingDocument, MappingEntry},
    reflect::{MemberKind, TypeDescriptor, TypeRef, mapped_members},
    types::AttributeRole,
};
use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

///
/// FakeAccessor
///

#[derive(Debug)]
pub(crate) struct FakeAccessor {
    member: String,
}

impl MemberAccessor for FakeAccessor {
    fn member_name(&self) -> &str {
        &self.member
    }
}

pub(crate) fn accessor(member: &str) -> Arc<dyn MemberAccessor> {
    Arc::new(FakeAccessor {
        member: member.to_string(),
    })
}

///
/// FakeAttribute
///

#[derive(Debug)]
pub(crate) struct FakeAttribute {
    name: String,
    kind: PersistentKind,
    declared_type: String,
    accessor: Arc<dyn MemberAccessor>,
}

pub(crate) fn attribute(
    name: &str,
    kind: PersistentKind,
    declared_type: &str,
) -> Arc<FakeAttribute> {
    Arc::new(FakeAttribute {
        name: name.to_string(),
        kind,
        declared_type: declared_type.to_string(),
        accessor: accessor(name),
    })
}

impl RuntimeAttribute for FakeAttribute {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> PersistentKind {
        self.kind
    }

    fn declared_type_name(&self) -> &str {
        &self.declared_type
    }

    fn accessor(&self) -> Arc<dyn MemberAccessor> {
        self.accessor.clone()
    }
}

///
/// FakeManagedType
///

#[derive(Debug)]
pub(crate) struct FakeManagedType {
    attributes: Vec<Arc<FakeAttribute>>,
}

pub(crate) fn managed(attributes: Vec<Arc<FakeAttribute>>) -> Arc<FakeManagedType> {
    Arc::new(FakeManagedType { attributes })
}

impl RuntimeManagedType for FakeManagedType {
    fn attributes(&self) -> Vec<Arc<dyn RuntimeAttribute>> {
        self.attributes
            .iter()
            .map(|attribute| -> Arc<dyn RuntimeAttribute> { attribute.clone() })
            .collect()
    }
}

///
/// FakeEntityType
///

#[derive(Debug)]
pub(crate) struct FakeEntityType {
    name: String,
    ty: TypeRef,
    attributes: Vec<Arc<FakeAttribute>>,
}

pub(crate) fn entity_type(
    name: &str,
    ty: &TypeRef,
    attributes: Vec<Arc<FakeAttribute>>,
) -> Arc<FakeEntityType> {
    Arc::new(FakeEntityType {
        name: name.to_string(),
        ty: ty.clone(),
        attributes,
    })
}

impl RuntimeManagedType for FakeEntityType {
    fn attributes(&self) -> Vec<Arc<dyn RuntimeAttribute>> {
        self.attributes
            .iter()
            .map(|attribute| -> Arc<dyn RuntimeAttribute> { attribute.clone() })
            .collect()
    }
}

impl RuntimeEntityType for FakeEntityType {
    fn name(&self) -> &str {
        &self.name
    }

    fn entity_type(&self) -> TypeRef {
        self.ty.clone()
    }

    fn attribute(&self, name: &str) -> Option<Arc<dyn RuntimeAttribute>> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .map(|attribute| -> Arc<dyn RuntimeAttribute> { attribute.clone() })
    }
}

///
/// FakeMetamodel
///

#[derive(Debug, Default)]
pub(crate) struct FakeMetamodel {
    entities: Vec<Arc<FakeEntityType>>,
    embeddables: HashMap<String, Arc<FakeManagedType>>,
}

impl FakeMetamodel {
    pub(crate) fn new(entities: Vec<Arc<FakeEntityType>>) -> Self {
        Self {
            entities,
            embeddables: HashMap::new(),
        }
    }

    pub(crate) fn with_embeddable(
        mut self,
        type_name: &str,
        embeddable: Arc<FakeManagedType>,
    ) -> Self {
        self.embeddables.insert(type_name.to_string(), embeddable);
        self
    }
}

impl RuntimeMetamodel for FakeMetamodel {
    fn entities(&self) -> Vec<Arc<dyn RuntimeEntityType>> {
        self.entities
            .iter()
            .map(|entity| -> Arc<dyn RuntimeEntityType> { entity.clone() })
            .collect()
    }

    fn embeddable(&self, type_name: &str) -> Option<Arc<dyn RuntimeManagedType>> {
        self.embeddables
            .get(type_name)
            .map(|embeddable| -> Arc<dyn RuntimeManagedType> { embeddable.clone() })
    }
}

const fn kind_of(role: AttributeRole) -> PersistentKind {
    match role {
        AttributeRole::Embedded => PersistentKind::Embedded,
        AttributeRole::ElementCollection => PersistentKind::ElementCollection,
        AttributeRole::Basic | AttributeRole::Id | AttributeRole::Version => PersistentKind::Basic,
    }
}

fn declared_type_of(ty: &TypeRef, member_name: &str) -> String {
    mapped_members(ty.as_ref())
        .into_iter()
        .find(|member| member.name == member_name)
        .map_or_else(String::new, |member| match member.kind {
            MemberKind::Scalar { type_name } => type_name,
            MemberKind::Collection { element } => element,
            MemberKind::Typed { ty } => ty.type_name().to_string(),
        })
}

fn runtime_name(ty: &TypeRef) -> String {
    ty.markers()
        .entity_name
        .clone()
        .unwrap_or_else(|| ty.simple_name().to_string())
}

fn flat_attributes(ty: &TypeRef) -> Vec<Arc<FakeAttribute>> {
    mapped_members(ty.as_ref())
        .iter()
        .map(|member| match &member.kind {
            MemberKind::Scalar { type_name } => {
                attribute(&member.name, PersistentKind::Basic, type_name)
            }
            MemberKind::Collection { element } => {
                attribute(&member.name, PersistentKind::ElementCollection, element)
            }
            MemberKind::Typed { ty } if ty.markers().embeddable => {
                attribute(&member.name, PersistentKind::Embedded, ty.type_name())
            }
            MemberKind::Typed { ty } => attribute(&member.name, PersistentKind::Basic, ty.type_name()),
        })
        .collect()
}

fn attributes_from_descriptor(
    ty: &TypeRef,
    embeddables: &mut HashMap<String, Arc<FakeManagedType>>,
) -> Vec<Arc<FakeAttribute>> {
    mapped_members(ty.as_ref())
        .iter()
        .map(|member| match &member.kind {
            MemberKind::Typed { ty: member_ty } if member_ty.markers().embeddable => {
                embeddables
                    .entry(member_ty.type_name().to_string())
                    .or_insert_with(|| managed(flat_attributes(member_ty)));
                attribute(&member.name, PersistentKind::Embedded, member_ty.type_name())
            }
            MemberKind::Collection { element } => {
                attribute(&member.name, PersistentKind::ElementCollection, element)
            }
            MemberKind::Scalar { type_name } => {
                attribute(&member.name, PersistentKind::Basic, type_name)
            }
            MemberKind::Typed { ty: member_ty } => {
                attribute(&member.name, PersistentKind::Basic, member_ty.type_name())
            }
        })
        .collect()
}

/// Derive a runtime metamodel the way the real factory would: synthesized
/// entries come from the document, recognized entities from their own
/// descriptors.
pub(crate) fn build_metamodel(
    resolver: &Arc<dyn TypeResolver>,
    document: &MappingDocument,
    recognized: &[String],
    omit: Option<&str>,
) -> FakeMetamodel {
    let mut entities = Vec::new();
    let mut embeddables = HashMap::new();

    for entry in &document.entries {
        if omit == Some(entry.type_name()) {
            continue;
        }

        match entry {
            MappingEntry::Entity(mapping) => {
                let ty = resolver
                    .resolve(&mapping.type_name)
                    .expect("entity descriptor should resolve");
                let attributes = mapping
                    .attributes
                    .iter()
                    .map(|attr| {
                        attribute(&attr.name, kind_of(attr.role), &declared_type_of(&ty, &attr.name))
                    })
                    .collect();
                entities.push(Arc::new(FakeEntityType {
                    name: runtime_name(&ty),
                    ty,
                    attributes,
                }));
            }
            MappingEntry::Embeddable(mapping) => {
                let ty = resolver
                    .resolve(&mapping.type_name)
                    .expect("embeddable descriptor should resolve");
                let attributes = mapping
                    .attributes
                    .iter()
                    .map(|attr| {
                        attribute(&attr.name, kind_of(attr.role), &declared_type_of(&ty, &attr.name))
                    })
                    .collect();
                embeddables.insert(mapping.type_name.clone(), managed(attributes));
            }
        }
    }

    for name in recognized {
        if omit == Some(name.as_str()) {
            continue;
        }

        let ty = resolver
            .resolve(name)
            .expect("recognized descriptor should resolve");
        let attributes = attributes_from_descriptor(&ty, &mut embeddables);
        entities.push(Arc::new(FakeEntityType {
            name: runtime_name(&ty),
            ty,
            attributes,
        }));
    }

    FakeMetamodel {
        entities,
        embeddables,
    }
}

///
/// SessionGauge
/// Counts sessions currently open against one fake store.
///

#[derive(Clone, Debug, Default)]
pub(crate) struct SessionGauge {
    open: Arc<AtomicUsize>,
}

impl SessionGauge {
    pub(crate) fn open(&self) -> usize {
        self.open.load(Ordering::SeqCst)
    }
}

///
/// FakeStore
///

pub(crate) struct FakeStore {
    prefix: String,
    fail_factory: bool,
    omit: Option<String>,
    sessions: SessionGauge,
}

impl FakeStore {
    pub(crate) fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            fail_factory: false,
            omit: None,
            sessions: SessionGauge::default(),
        }
    }

    /// Make every `create_unit` call raise a factory fault.
    pub(crate) fn failing(mut self) -> Self {
        self.fail_factory = true;
        self
    }

    /// Drop one type from the derived metamodel.
    pub(crate) fn omitting(mut self, type_name: &str) -> Self {
        self.omit = Some(type_name.to_string());
        self
    }

    pub(crate) fn session_gauge(&self) -> SessionGauge {
        self.sessions.clone()
    }
}

impl BackingStore for FakeStore {
    fn table_prefix(&self) -> &str {
        &self.prefix
    }

    fn create_unit(
        &self,
        resolver: &Arc<dyn TypeResolver>,
        document: &MappingDocument,
        recognized: &[String],
    ) -> Result<Arc<dyn PersistenceUnit>, FactoryFault> {
        if self.fail_factory {
            return Err("injected factory fault".into());
        }

        let metamodel = Arc::new(build_metamodel(
            resolver,
            document,
            recognized,
            self.omit.as_deref(),
        ));
        Ok(Arc::new(FakeUnit {
            metamodel,
            sessions: self.sessions.clone(),
        }))
    }
}

///
/// FakeUnit
///

#[derive(Debug)]
pub(crate) struct FakeUnit {
    metamodel: Arc<FakeMetamodel>,
    sessions: SessionGauge,
}

impl FakeUnit {
    pub(crate) fn empty() -> Self {
        Self {
            metamodel: Arc::new(FakeMetamodel::default()),
            sessions: SessionGauge::default(),
        }
    }
}

impl PersistenceUnit for FakeUnit {
    fn open_session(&self) -> Result<Box<dyn Session>, FactoryFault> {
        self.sessions.open.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeSession {
            metamodel: self.metamodel.clone(),
            sessions: self.sessions.clone(),
        }))
    }
}

///
/// FakeSession
///

pub(crate) struct FakeSession {
    metamodel: Arc<FakeMetamodel>,
    sessions: SessionGauge,
}

impl Session for FakeSession {
    fn metamodel(&self) -> &dyn RuntimeMetamodel {
        self.metamodel.as_ref()
    }
}

impl Drop for FakeSession {
    fn drop(&mut self) {
        self.sessions.open.fetch_sub(1, Ordering::SeqCst);
    }
}

///
/// FakeLocator
///

#[derive(Default)]
pub(crate) struct FakeLocator {
    stores: HashMap<String, Arc<dyn BackingStore>>,
}

impl FakeLocator {
    pub(crate) fn with_store(store_id: &str, store: FakeStore) -> Self {
        Self::default().and_store(store_id, store)
    }

    pub(crate) fn and_store(mut self, store_id: &str, store: FakeStore) -> Self {
        self.stores.insert(store_id.to_string(), Arc::new(store));
        self
    }
}

impl StoreLocator for FakeLocator {
    fn resolve_store(&self, store_id: &str) -> Option<Arc<dyn BackingStore>> {
        self.stores.get(store_id).cloned()
    }
}

///
/// FakeResolver
///

#[derive(Default)]
pub(crate) struct FakeResolver {
    types: HashMap<String, TypeRef>,
}

impl FakeResolver {
    /// Indexes the given descriptors plus everything reachable through
    /// typed members and superclasses.
    pub(crate) fn of(roots: &[TypeRef]) -> Self {
        let mut resolver = Self::default();
        for ty in roots {
            resolver.index(ty);
        }
        resolver
    }

    fn index(&mut self, ty: &TypeRef) {
        if self
            .types
            .insert(ty.type_name().to_string(), ty.clone())
            .is_some()
        {
            return;
        }

        for member in ty.members() {
            if let MemberKind::Typed { ty } = &member.kind {
                self.index(ty);
            }
        }
        if let Some(superclass) = ty.superclass() {
            self.index(&superclass);
        }
    }
}

impl TypeResolver for FakeResolver {
    fn resolve(&self, type_name: &str) -> Option<TypeRef> {
        self.types.get(type_name).cloned()
    }
}
