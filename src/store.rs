//! Declarative storage for schema and resolver-map records.
//!
//! A [`ClientFactory`] selects the backing store when it is constructed and
//! hands out [`ResourceClient`] handles sharing that store. One factory per
//! process (or per test) replaces any process-wide cache or setup toggle.
//! Only the in-memory backing exists here; a cluster-backed rendition would
//! be a second constructor handing out clients over the same surface.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::Deserialize;
use serde::Serialize;

use crate::error::StoreError;

/// A named record held by a [`ResourceClient`].
pub trait Resource: Clone + Send + Sync + 'static {
    /// Kind label used in store errors, e.g. `"schemas"`.
    const KIND: &'static str;

    /// The record's unique name within its kind.
    fn name(&self) -> &str;
}

/// A stored GraphQL schema document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDocument {
    pub name: String,

    /// SDL for the served schema.
    pub inline_schema: String,
}

impl Resource for SchemaDocument {
    const KIND: &'static str = "schemas";

    fn name(&self) -> &str {
        &self.name
    }
}

/// A stored mapping from `"Type.field"` to resolver configuration.
///
/// The configuration payloads are opaque here; materializing them into
/// callables is the embedding engine's concern.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverMapDocument {
    pub name: String,

    #[serde(default)]
    pub resolvers: HashMap<String, serde_json::Value>,
}

impl Resource for ResolverMapDocument {
    const KIND: &'static str = "resolvermaps";

    fn name(&self) -> &str {
        &self.name
    }
}

/// Read/write access to the records of one resource kind.
///
/// Clones are cheap and share the factory's cache.
#[derive(Clone, Debug)]
pub struct ResourceClient<R: Resource> {
    records: Arc<DashMap<String, R>>,
}

impl<R: Resource> ResourceClient<R> {
    fn new(records: Arc<DashMap<String, R>>) -> Self {
        Self { records }
    }

    pub fn write(&self, resource: R, overwrite: bool) -> Result<(), StoreError> {
        match self.records.entry(resource.name().to_owned()) {
            Entry::Occupied(mut slot) => {
                if !overwrite {
                    return Err(StoreError::AlreadyExists {
                        kind: R::KIND,
                        name: resource.name().to_owned(),
                    });
                }
                slot.insert(resource);
                Ok(())
            }
            Entry::Vacant(slot) => {
                slot.insert(resource);
                Ok(())
            }
        }
    }

    pub fn read(&self, name: &str) -> Result<R, StoreError> {
        self.records
            .get(name)
            .map(|record| record.value().clone())
            .ok_or_else(|| StoreError::NotFound {
                kind: R::KIND,
                name: name.to_owned(),
            })
    }

    pub fn delete(&self, name: &str) -> Result<(), StoreError> {
        self.records
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound {
                kind: R::KIND,
                name: name.to_owned(),
            })
    }

    /// All records of this kind, sorted by name.
    pub fn list(&self) -> Vec<R> {
        let mut records: Vec<R> = self
            .records
            .iter()
            .map(|record| record.value().clone())
            .collect();
        records.sort_by(|a, b| a.name().cmp(b.name()));
        records
    }
}

/// Hands out resource clients over one shared backing store, selected at
/// construction time.
#[derive(Clone, Debug, Default)]
pub struct ClientFactory {
    schemas: Arc<DashMap<String, SchemaDocument>>,
    resolver_maps: Arc<DashMap<String, ResolverMapDocument>>,
}

impl ClientFactory {
    /// Clients backed by a cache private to this factory.
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn schemas(&self) -> ResourceClient<SchemaDocument> {
        ResourceClient::new(Arc::clone(&self.schemas))
    }

    pub fn resolver_maps(&self) -> ResourceClient<ResolverMapDocument> {
        ResourceClient::new(Arc::clone(&self.resolver_maps))
    }
}
