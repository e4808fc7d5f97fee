//! Capability surface over structural record types.
//!
//! Entwine performs no native reflection. Every target type reaches the
//! engine through a [`TypeDescriptor`] adapter — generated, build-script
//! emitted, or hand-written via [`crate::describe::TypeSpec`].

use crate::types::GeneratedStrategy;
use std::{fmt, sync::Arc};

/// Shared handle to a described type.
pub type TypeRef = Arc<dyn TypeDescriptor>;

///
/// TypeDescriptor
///
/// One structural record type: named, typed members, a superclass chain,
/// and the metadata markers the classifier consumes.
///

pub trait TypeDescriptor: fmt::Debug + Send + Sync {
    /// Fully-qualified type name. Identity for registry keys and for
    /// embeddable deduplication.
    fn type_name(&self) -> &str;

    /// Short name used when deriving table names.
    fn simple_name(&self) -> &str;

    /// Declared members, in declaration order. Inherited members are
    /// reached through [`TypeDescriptor::superclass`].
    fn members(&self) -> &[Member];

    /// Direct superclass, if any.
    fn superclass(&self) -> Option<TypeRef>;

    fn markers(&self) -> &TypeMarkers;
}

///
/// TypeMarkers
///
/// Type-level metadata markers.
///

#[derive(Clone, Debug, Default)]
pub struct TypeMarkers {
    /// Candidate entity type.
    pub entity: bool,

    /// Explicit entity-name override used for table naming.
    pub entity_name: Option<String>,

    /// Already native to the persistence runtime; bypasses synthesis.
    pub recognized: bool,

    /// No independent identity; inlined into the owning entity's storage.
    pub embeddable: bool,

    /// Ancestor whose members are mapped into each inheriting entity.
    pub mapped_superclass: bool,

    /// Single-table inheritance header; the root supplies the table.
    pub single_table_inheritance: bool,

    pub discriminator_value: Option<String>,
    pub discriminator_column: Option<String>,
}

///
/// Member
///
/// One declared member of a described type.
///

#[derive(Clone, Debug)]
pub struct Member {
    pub name: String,
    pub kind: MemberKind,
    pub markers: MemberMarkers,
}

impl Member {
    /// Plain scalar member.
    #[must_use]
    pub fn scalar(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Scalar {
                type_name: type_name.into(),
            },
            markers: MemberMarkers::default(),
        }
    }

    /// Multi-valued container member.
    #[must_use]
    pub fn collection(name: impl Into<String>, element: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Collection {
                element: element.into(),
            },
            markers: MemberMarkers::default(),
        }
    }

    /// Member whose declared type is itself described.
    #[must_use]
    pub fn typed(name: impl Into<String>, ty: &TypeRef) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Typed { ty: ty.clone() },
            markers: MemberMarkers::default(),
        }
    }

    /// Mark as the identifier member.
    #[must_use]
    pub fn id(mut self) -> Self {
        self.markers.id = true;
        self
    }

    /// Explicit identifier-column override carried by the identifier marker.
    #[must_use]
    pub fn id_column(mut self, column: impl Into<String>) -> Self {
        self.markers.id_column = Some(column.into());
        self
    }

    /// Explicit column name.
    #[must_use]
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.markers.column = Some(column.into());
        self
    }

    /// Value-generation strategy.
    #[must_use]
    pub fn generated(mut self, strategy: GeneratedStrategy) -> Self {
        self.markers.generated = Some(strategy);
        self
    }
}

///
/// MemberKind
///

#[derive(Clone, Debug)]
pub enum MemberKind {
    /// Plain scalar mapped as a single column.
    Scalar { type_name: String },

    /// Ordered or unordered multi-valued container.
    Collection { element: String },

    /// Declared type is itself described; embeddable iff its markers say so.
    Typed { ty: TypeRef },
}

///
/// MemberMarkers
///
/// Member-level metadata markers. Adapters map empty marker values to
/// `None`.
///

#[derive(Clone, Debug, Default)]
pub struct MemberMarkers {
    pub id: bool,
    pub id_column: Option<String>,
    pub column: Option<String>,
    pub generated: Option<GeneratedStrategy>,
}

/// Members mapped for `ty`: its own declared members first, then the
/// declared members of every mapped-superclass ancestor. Ancestors without
/// the marker contribute nothing but do not stop the walk.
#[must_use]
pub fn mapped_members(ty: &dyn TypeDescriptor) -> Vec<Member> {
    let mut members: Vec<Member> = ty.members().to_vec();

    let mut next = ty.superclass();
    while let Some(ancestor) = next {
        if ancestor.markers().mapped_superclass {
            members.extend(ancestor.members().iter().cloned());
        }
        next = ancestor.superclass();
    }

    members
}

/// Every accessible member on the full superclass chain. Identifier
/// discovery scans these regardless of mapped-superclass markers.
#[must_use]
pub fn accessible_members(ty: &dyn TypeDescriptor) -> Vec<Member> {
    let mut members: Vec<Member> = ty.members().to_vec();

    let mut next = ty.superclass();
    while let Some(ancestor) = next {
        members.extend(ancestor.members().iter().cloned());
        next = ancestor.superclass();
    }

    members
}
