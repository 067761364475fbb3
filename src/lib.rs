//! Resolver registry and field dispatch for a schema-driven GraphQL executor.
//!
//! Given a parsed schema and a table of per-field resolver closures, build a
//! [`ResolverRegistry`] once, then answer `(type, field)` lookups against it
//! for the lifetime of that configuration. Schema and resolver-map documents
//! can be kept in a [`ResourceClient`] until they are materialized into the
//! inputs the registry consumes.

mod context;
mod error;
mod registry;
mod resolver;
mod schema;
mod store;

pub use context::*;
pub use error::*;
pub use registry::*;
pub use resolver::*;
pub use schema::*;
pub use store::*;
