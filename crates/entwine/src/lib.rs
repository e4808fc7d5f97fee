//! Entwine — entity-metadata definition for repository and query layers.
//!
//! This is the public meta-crate. Downstream users depend on **entwine**
//! only.
//!
//! It re-exports the stable public API from:
//!   - `entwine-schema` (reflection capability, classifier, mapping documents)
//!   - `entwine-core`   (reconciler, registry, definition tasks)

pub use entwine_core as core;
pub use entwine_schema as schema;

//
// Prelude
//

pub mod prelude {
    pub use entwine_core::prelude::*;
}
