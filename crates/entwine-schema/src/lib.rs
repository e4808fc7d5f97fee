//! Mapping-description side of Entwine: the reflection capability surface,
//! the attribute classifier, and the mapping-document nodes and builder.

pub mod build;
pub mod classify;
pub mod describe;
pub mod node;
pub mod reflect;
pub mod types;

use crate::{build::BuildError, classify::ClassifyError};
use thiserror::Error as ThisError;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
///

pub mod prelude {
    pub use crate::{
        describe::TypeSpec,
        node::{
            AttributeDescriptor, AttributeList, EmbeddableMapping, EntityMapping, MappingDocument,
            MappingEntry,
        },
        reflect::{Member, MemberKind, TypeDescriptor, TypeRef},
        types::{AttributeRole, GeneratedStrategy, InheritanceStrategy},
    };
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    BuildError(#[from] BuildError),

    #[error(transparent)]
    ClassifyError(#[from] ClassifyError),
}
