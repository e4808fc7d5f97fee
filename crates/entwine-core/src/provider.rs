//! Provider facade: batch submission and blocking metadata lookup.

use crate::{
    define::DefineTask,
    error::DefineError,
    interface::{StoreLocator, TypeResolver},
    model::EntityMetadata,
    registry::EntityRegistry,
};
use entwine_schema::reflect::TypeRef;
use std::{sync::Arc, thread};

///
/// MetadataProvider
///
/// Owns the registry and the backing-store locator; submits one background
/// definition task per batch and serves blocking metadata lookups for the
/// query-building layer.
///

pub struct MetadataProvider {
    registry: Arc<EntityRegistry>,
    locator: Arc<dyn StoreLocator>,
}

impl MetadataProvider {
    #[must_use]
    pub fn new(locator: Arc<dyn StoreLocator>) -> Self {
        Self {
            registry: Arc::new(EntityRegistry::new()),
            locator,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<EntityRegistry> {
        &self.registry
    }

    /// Submit a batch of entity types for definition against `store_id`.
    /// Asynchronous: the work runs on a background worker and resolves the
    /// batch's registry cells when it finishes.
    pub fn define_entities(
        &self,
        store_id: impl Into<String>,
        resolver: Arc<dyn TypeResolver>,
        entities: Vec<TypeRef>,
    ) {
        let task = DefineTask::new(
            store_id,
            resolver,
            entities,
            self.registry.clone(),
            self.locator.clone(),
        );

        thread::Builder::new()
            .name("entwine-define".to_string())
            .spawn(move || {
                // A failure has already been fanned out to the batch's
                // cells and logged by the task.
                let _ = task.run();
            })
            .expect("definition worker threads should spawn");
    }

    /// Block until metadata for `type_name` is published, then return it
    /// or re-raise the recorded definition failure.
    pub fn metadata_for(&self, type_name: &str) -> Result<Arc<EntityMetadata>, DefineError> {
        self.registry.resolve(type_name)
    }
}
