use crate::reflect::{Member, TypeDescriptor, TypeMarkers, TypeRef};
use std::sync::Arc;

///
/// TypeSpec
///
/// Programmatic [`TypeDescriptor`] for hand-written adapters and fixtures.
/// Built with chained setters and sealed into a shared [`TypeRef`].
///

#[derive(Debug)]
pub struct TypeSpec {
    type_name: String,
    simple_name: String,
    members: Vec<Member>,
    superclass: Option<TypeRef>,
    markers: TypeMarkers,
}

impl TypeSpec {
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        let simple_name = type_name
            .rsplit("::")
            .next()
            .unwrap_or(type_name.as_str())
            .to_string();

        Self {
            type_name,
            simple_name,
            members: Vec::new(),
            superclass: None,
            markers: TypeMarkers::default(),
        }
    }

    /// Mark as a candidate entity type.
    #[must_use]
    pub fn entity(mut self) -> Self {
        self.markers.entity = true;
        self
    }

    /// Mark as a candidate entity with an explicit name override.
    #[must_use]
    pub fn entity_named(mut self, name: impl Into<String>) -> Self {
        self.markers.entity = true;
        self.markers.entity_name = Some(name.into());
        self
    }

    /// Mark as already recognized by the persistence runtime.
    #[must_use]
    pub fn recognized(mut self) -> Self {
        self.markers.recognized = true;
        self
    }

    #[must_use]
    pub fn embeddable(mut self) -> Self {
        self.markers.embeddable = true;
        self
    }

    #[must_use]
    pub fn mapped_superclass(mut self) -> Self {
        self.markers.mapped_superclass = true;
        self
    }

    #[must_use]
    pub fn single_table_inheritance(mut self) -> Self {
        self.markers.single_table_inheritance = true;
        self
    }

    #[must_use]
    pub fn discriminator_value(mut self, value: impl Into<String>) -> Self {
        self.markers.discriminator_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn discriminator_column(mut self, column: impl Into<String>) -> Self {
        self.markers.discriminator_column = Some(column.into());
        self
    }

    #[must_use]
    pub fn extends(mut self, superclass: &TypeRef) -> Self {
        self.superclass = Some(superclass.clone());
        self
    }

    #[must_use]
    pub fn member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    /// Seal into a shared descriptor handle.
    #[must_use]
    pub fn seal(self) -> TypeRef {
        Arc::new(self)
    }
}

impl TypeDescriptor for TypeSpec {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn simple_name(&self) -> &str {
        &self.simple_name
    }

    fn members(&self) -> &[Member] {
        &self.members
    }

    fn superclass(&self) -> Option<TypeRef> {
        self.superclass.clone()
    }

    fn markers(&self) -> &TypeMarkers {
        &self.markers
    }
}
