//! Core runtime for Entwine: the error taxonomy, persistence-factory
//! interfaces, metamodel reconciliation, the metadata registry, and the
//! definition task.

pub mod define;
pub mod error;
pub mod interface;
pub mod model;
pub mod provider;
pub mod reconcile;
pub mod registry;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
///

pub mod prelude {
    pub use crate::{
        define::DefineTask,
        error::{DefineError, ErrorClass},
        model::EntityMetadata,
        provider::MetadataProvider,
        registry::EntityRegistry,
    };
    pub use entwine_schema::prelude::*;
}
