//! Metadata registry: the sole serialization point between definition
//! tasks and metadata consumers.

use crate::{error::DefineError, model::EntityMetadata};
use parking_lot::{Condvar, Mutex};
use std::{collections::HashMap, sync::Arc};
use thiserror::Error as ThisError;

///
/// RegistryError
///

#[derive(Debug, ThisError)]
pub enum RegistryError {
    #[error("metadata for '{0}' was already resolved")]
    AlreadyResolved(String),
}

///
/// CellState
///

enum CellState {
    Pending,
    Ready(Arc<EntityMetadata>),
    Failed(DefineError),
}

impl CellState {
    const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

///
/// MetadataCell
///
/// Single-assignment container for the eventual metadata of one entity
/// type. Transitions Pending → Ready | Failed exactly once; terminal
/// states never change.
///

pub struct MetadataCell {
    state: Mutex<CellState>,
    ready: Condvar,
}

impl MetadataCell {
    fn new() -> Self {
        Self {
            state: Mutex::new(CellState::Pending),
            ready: Condvar::new(),
        }
    }

    /// Block until the cell is terminal; re-raises a stored failure.
    pub fn wait(&self) -> Result<Arc<EntityMetadata>, DefineError> {
        let mut state = self.state.lock();
        loop {
            match &*state {
                CellState::Pending => self.ready.wait(&mut state),
                CellState::Ready(metadata) => return Ok(metadata.clone()),
                CellState::Failed(err) => return Err(err.clone()),
            }
        }
    }

    /// Non-blocking peek; `None` while pending.
    #[must_use]
    pub fn peek(&self) -> Option<Result<Arc<EntityMetadata>, DefineError>> {
        match &*self.state.lock() {
            CellState::Pending => None,
            CellState::Ready(metadata) => Some(Ok(metadata.clone())),
            CellState::Failed(err) => Some(Err(err.clone())),
        }
    }

    fn transition(&self, next: CellState) -> bool {
        let mut state = self.state.lock();
        if !state.is_pending() {
            return false;
        }

        *state = next;
        drop(state);
        self.ready.notify_all();
        true
    }
}

///
/// EntityRegistry
///
/// Concurrent map from entity type name to its metadata cell. Cell
/// creation is atomic get-or-create; completion is single-assignment.
///

#[derive(Default)]
pub struct EntityRegistry {
    cells: Mutex<HashMap<String, Arc<MetadataCell>>>,
}

impl EntityRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Existing cell for `type_name`, or a freshly created pending one.
    /// Never two distinct live cells for the same name.
    pub fn cell(&self, type_name: &str) -> Arc<MetadataCell> {
        self.cells
            .lock()
            .entry(type_name.to_string())
            .or_insert_with(|| Arc::new(MetadataCell::new()))
            .clone()
    }

    /// Complete a pending cell. Redundant completion is a programming
    /// error and is rejected explicitly.
    pub fn complete(
        &self,
        type_name: &str,
        metadata: Arc<EntityMetadata>,
    ) -> Result<(), RegistryError> {
        if self.cell(type_name).transition(CellState::Ready(metadata)) {
            Ok(())
        } else {
            Err(RegistryError::AlreadyResolved(type_name.to_string()))
        }
    }

    /// Fail a cell if it is still pending. Returns whether the cell
    /// transitioned; terminal cells are left untouched so batch-failure
    /// fan-out can race already-completed types safely.
    pub fn fail(&self, type_name: &str, error: DefineError) -> bool {
        self.cell(type_name).transition(CellState::Failed(error))
    }

    /// Block until metadata for `type_name` is published, then return it
    /// or re-raise the recorded failure.
    pub fn resolve(&self, type_name: &str) -> Result<Arc<EntityMetadata>, DefineError> {
        self.cell(type_name).wait()
    }

    /// Discard a terminal cell so a later definition attempt starts
    /// fresh. Pending cells are left in place — their waiters must still
    /// observe the in-flight outcome. Returns whether a cell was removed.
    pub fn evict(&self, type_name: &str) -> bool {
        let mut cells = self.cells.lock();
        match cells.get(type_name) {
            Some(cell) if !cell.state.lock().is_pending() => {
                cells.remove(type_name);
                true
            }
            _ => false,
        }
    }
}
