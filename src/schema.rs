//! Schema loading: SDL in, validated schema out.

use std::path::Path;

use apollo_compiler::validation::Valid;
use apollo_compiler::Schema;

use crate::error::ParseErrors;
use crate::error::SchemaError;

/// Parses and validates an SDL string.
pub fn parse_schema(sdl: &str) -> Result<Valid<Schema>, SchemaError> {
    Schema::parse_and_validate(sdl, "schema.graphql").map_err(|invalid| {
        SchemaError::Parse(ParseErrors {
            errors: invalid.errors,
        })
    })
}

/// Reads and parses a schema file.
pub fn read_schema(path: impl AsRef<Path>) -> Result<Valid<Schema>, SchemaError> {
    parse_schema(&std::fs::read_to_string(path)?)
}
