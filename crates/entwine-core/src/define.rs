//! The definition task: one batch of entity types bound to one backing
//! store, run from classification through registry publication.

use crate::{
    error::DefineError,
    interface::{
        BackingStore, PersistenceUnit, RuntimeEntityType, RuntimeMetamodel, Session, StoreLocator,
        TypeResolver,
    },
    model::EntityMetadata,
    reconcile::reconcile_entity,
    registry::EntityRegistry,
};
use entwine_schema::{
    build::build_document,
    classify::discover_id,
    reflect::{TypeDescriptor, TypeRef},
};
use std::sync::Arc;
use tracing::{debug, error, warn};

///
/// DefineTask
///
/// Orchestrates Classifier → Builder → factory → Reconciler → Registry for
/// one batch. Any failure at any step fails every cell in the batch with
/// the same classified error.
///

pub struct DefineTask {
    store_id: String,
    resolver: Arc<dyn TypeResolver>,
    entities: Vec<TypeRef>,
    registry: Arc<EntityRegistry>,
    locator: Arc<dyn StoreLocator>,
}

impl DefineTask {
    #[must_use]
    pub fn new(
        store_id: impl Into<String>,
        resolver: Arc<dyn TypeResolver>,
        entities: Vec<TypeRef>,
        registry: Arc<EntityRegistry>,
        locator: Arc<dyn StoreLocator>,
    ) -> Self {
        Self {
            store_id: store_id.into(),
            resolver,
            entities,
            registry,
            locator,
        }
    }

    /// Run the batch to completion. Every cell in the batch is resolved on
    /// every path; a failure is re-raised to the invoker after fan-out.
    pub fn run(&self) -> Result<(), DefineError> {
        debug!(
            store = %self.store_id,
            entities = self.entities.len(),
            "define entities"
        );

        match self.define() {
            Ok(()) => Ok(()),
            Err(err) => {
                for ty in &self.entities {
                    self.registry.fail(ty.type_name(), err.clone());
                }
                error!(store = %self.store_id, %err, "entity definition failed");
                Err(err)
            }
        }
    }

    fn define(&self) -> Result<(), DefineError> {
        let store = self.locator.resolve_store(&self.store_id).ok_or_else(|| {
            DefineError::not_found(format!("backing store not found: {}", self.store_id))
        })?;

        // Pair every type with its identifier attribute up front; the same
        // names drive document synthesis and reconciliation.
        let mut batch = Vec::with_capacity(self.entities.len());
        for ty in &self.entities {
            let id_attribute = discover_id(ty.as_ref())?;
            batch.push((ty.clone(), id_attribute));
        }

        let built = build_document(&batch, store.table_prefix())?;
        debug!(
            store = %self.store_id,
            entries = built.document.len(),
            recognized = built.recognized.len(),
            "mapping document built"
        );

        let unit = store
            .create_unit(&self.resolver, &built.document, &built.recognized)
            .map_err(|fault| DefineError::factory(fault.as_ref()))?;

        // The session is owned by this task alone and released on every
        // exit path when it drops.
        let session = unit
            .open_session()
            .map_err(|fault| DefineError::factory(fault.as_ref()))?;
        let metamodel = session.metamodel();
        let runtime_entities = metamodel.entities();

        let mut published: Vec<(String, Arc<EntityMetadata>)> = Vec::with_capacity(batch.len());
        for (ty, id_attribute) in &batch {
            let entity = runtime_entities
                .iter()
                .find(|entity| entity.entity_type().type_name() == ty.type_name())
                .ok_or_else(|| {
                    DefineError::internal(format!(
                        "runtime metamodel does not contain entity '{}'",
                        ty.type_name()
                    ))
                })?;

            let metadata = reconcile_entity(metamodel, entity.as_ref(), id_attribute, &unit)?;
            debug!(
                entity = %metadata.entity_name,
                attributes = metadata.name_index.len(),
                "entity reconciled"
            );
            published.push((ty.type_name().to_string(), Arc::new(metadata)));
        }

        // Publish only once the whole batch reconciled; no partial success.
        for (type_name, metadata) in published {
            if let Err(err) = self.registry.complete(&type_name, metadata) {
                // Another batch got there first; its published outcome
                // stands, matching redundant-completion tolerance.
                warn!(%err, "skipping redundant completion");
            }
        }

        Ok(())
    }
}
