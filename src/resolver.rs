use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json_bytes::Value;

use crate::context::ResolverContext;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Computes one field's value from the parent source and bound arguments.
///
/// A single function-capability type stands in for per-field behavior; there
/// is no resolver hierarchy to implement.
pub type ResolverFn = Arc<dyn Fn(ResolverContext) -> Result<Value, BoxError> + Send + Sync>;

/// User-supplied resolvers, keyed by `"Type.field"`.
///
/// Ownership moves into [`ResolverRegistry::new`](crate::ResolverRegistry::new),
/// which consumes entries as it binds them to declared fields.
#[derive(Clone, Default)]
pub struct Resolvers {
    resolvers: HashMap<String, ResolverFn>,
}

impl fmt::Debug for Resolvers {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut debug = f.debug_tuple("Resolvers");
        for key in self.resolvers.keys() {
            debug.field(key);
        }
        debug.finish()
    }
}

impl Resolvers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<F>(&mut self, field: impl Into<String>, resolver: F)
    where
        F: Fn(ResolverContext) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.resolvers
            .insert(field.into(), Arc::new(resolver) as ResolverFn);
    }

    pub fn contains(&self, field: impl AsRef<str>) -> bool {
        self.resolvers.contains_key(field.as_ref())
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    pub(crate) fn remove(&mut self, field: &str) -> Option<ResolverFn> {
        self.resolvers.remove(field)
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = &String> {
        self.resolvers.keys()
    }
}
