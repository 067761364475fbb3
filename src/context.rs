use serde_json_bytes::ByteString;
use serde_json_bytes::Map;
use serde_json_bytes::Value;

/// A JSON object as resolvers see it.
pub type Object = Map<ByteString, Value>;

/// Per-invocation input to a field resolver: the parent value being resolved
/// plus the arguments bound for this field.
///
/// Built by the executor for each field-resolution request and discarded when
/// the call returns.
#[derive(Clone, Debug, Default)]
pub struct ResolverContext {
    /// The parent object, opaque to the registry.
    pub source: Value,

    /// Arguments bound for this invocation. May be empty.
    pub args: Object,
}

impl ResolverContext {
    pub fn new(source: Value) -> Self {
        Self {
            source,
            args: Object::default(),
        }
    }

    pub fn with_args(source: Value, args: Object) -> Self {
        Self { source, args }
    }

    /// Returns the bound argument, or `None` when no arguments were bound or
    /// the name is unbound.
    pub fn arg(&self, name: &str) -> Option<&Value> {
        if self.args.is_empty() {
            return None;
        }
        self.args.get(name)
    }
}
