use apollo_compiler::validation::DiagnosticList;
use displaydoc::Display;
use thiserror::Error;

use crate::resolver::BoxError;

/// Error types for field dispatch.
///
/// All of these indicate a caller or configuration bug except
/// [`ResolverFailed`](ResolveError::ResolverFailed), whose retriability
/// depends entirely on the wrapped cause.
#[derive(Error, Display, Debug)]
pub enum ResolveError {
    /// type '{type_name}' unknown
    TypeNotFound {
        /// The type that was not registered.
        type_name: String,
    },

    /// type '{type_name}' does not contain field '{field_name}'
    FieldNotFound {
        type_name: String,

        /// The field that is not declared on the type.
        field_name: String,
    },

    /// failed executing resolver for {type_name}.{field_name}: {source}
    ResolverFailed {
        type_name: String,
        field_name: String,

        /// The resolver's own failure.
        #[source]
        source: BoxError,
    },
}

/// Error types for registry construction.
#[derive(Error, Display, Debug)]
pub enum RegistryError {
    /// union type '{type_name}' cannot be registered for field resolution
    UnsupportedUnion { type_name: String },
}

/// Error in the schema.
#[derive(Error, Display, Debug)]
pub enum SchemaError {
    /// IO error: {0}
    IoError(#[from] std::io::Error),
    /// parsing error(s): {0}
    Parse(ParseErrors),
}

/// Collection of schema parse and validation diagnostics.
#[derive(Debug)]
pub struct ParseErrors {
    pub(crate) errors: DiagnosticList,
}

impl std::fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut errors = self.errors.iter();
        for (i, error) in errors.by_ref().take(5).enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", error)?;
        }
        let remaining = errors.count();
        if remaining > 0 {
            write!(f, "\n...and {remaining} more")?;
        }
        Ok(())
    }
}

/// Error types for resource storage.
#[derive(Error, Display, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// {kind} '{name}' not found
    NotFound { kind: &'static str, name: String },

    /// {kind} '{name}' already exists
    AlreadyExists { kind: &'static str, name: String },
}
