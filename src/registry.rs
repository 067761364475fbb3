//! The built Type → Field → Resolver index and per-field dispatch against it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use apollo_compiler::ast::FieldDefinition;
use apollo_compiler::collections::IndexMap;
use apollo_compiler::schema::Component;
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::schema::Type;
use apollo_compiler::Name;
use apollo_compiler::Schema;
use serde_json_bytes::Value;

use crate::context::ResolverContext;
use crate::error::RegistryError;
use crate::error::ResolveError;
use crate::resolver::ResolverFn;
use crate::resolver::Resolvers;

/// Built-in scalar and introspection type names. These are never
/// user-resolvable and never appear as registry keys.
const META_TYPES: &[&str] = &[
    "Float",
    "ID",
    "Int",
    "Boolean",
    "String",
    "__Schema",
    "__Type",
    "__TypeKind",
    "__Field",
    "__InputValue",
    "__EnumValue",
    "__Directive",
    "__DirectiveLocation",
];

fn is_meta_type(type_name: &str) -> bool {
    META_TYPES.contains(&type_name)
}

/// The immutable index of every resolvable field, built once from a schema
/// and a [`Resolvers`] table.
///
/// Dispatch reads are lock-free and safe from any number of threads; nothing
/// is mutated after construction. Reloading configuration means building a
/// new registry and swapping the reference handed to new dispatch calls,
/// while in-flight calls finish against the old one.
pub struct ResolverRegistry {
    types: HashMap<String, TypeResolvers>,
}

struct TypeResolvers {
    fields: HashMap<String, FieldResolver>,
}

/// A declared field's result type paired with its bound resolver.
pub struct FieldResolver {
    ty: Type,
    resolver: ResolverFn,
}

impl fmt::Debug for ResolverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut debug = f.debug_tuple("ResolverRegistry");
        for name in self.types.keys() {
            debug.field(name);
        }
        debug.finish()
    }
}

impl ResolverRegistry {
    /// Indexes the schema's declared fields against the supplied resolvers.
    ///
    /// Every declared object and interface field gets an entry: the matching
    /// `"Type.field"` resolver when one was supplied, a null resolver
    /// otherwise. Types that end up with no fields (scalars, enums, input
    /// objects, anything fully excluded) are not registered at all.
    ///
    /// Fails if the schema declares a union type: unions carry no resolvable
    /// fields of their own, so resolvers must be declared on the member types
    /// and the union removed from the schema handed to this registry.
    pub fn new(schema: &Schema, mut resolvers: Resolvers) -> Result<Self, RegistryError> {
        let null_resolver: ResolverFn = Arc::new(|_ctx| Ok(Value::Null));
        let mut types = HashMap::new();

        for (type_name, type_def) in &schema.types {
            if is_meta_type(type_name.as_str()) {
                continue;
            }
            let fields = match type_def {
                ExtendedType::Object(object) => {
                    bind_fields(type_name, &object.fields, &mut resolvers, &null_resolver)
                }
                ExtendedType::Interface(interface) => {
                    bind_fields(type_name, &interface.fields, &mut resolvers, &null_resolver)
                }
                ExtendedType::Union(_) => {
                    return Err(RegistryError::UnsupportedUnion {
                        type_name: type_name.to_string(),
                    });
                }
                // scalars, enums and input objects carry no resolvable fields
                _ => continue,
            };
            if fields.is_empty() {
                continue;
            }
            types.insert(type_name.to_string(), TypeResolvers { fields });
        }

        // anything left in the table matched no declared field
        for key in resolvers.keys() {
            tracing::warn!(%key, "resolver does not match any declared type field");
        }
        tracing::debug!(types = types.len(), "built resolver registry");

        Ok(Self { types })
    }

    /// Locates the resolver bound for `(type_name, field_name)` and invokes
    /// it with `ctx`.
    ///
    /// On success the resolver's value is returned unchanged; coercing it
    /// against the field's declared result type is the executor's concern.
    pub fn resolve(
        &self,
        type_name: &str,
        field_name: &str,
        ctx: ResolverContext,
    ) -> Result<Value, ResolveError> {
        let field = self.field_resolver(type_name, field_name)?;
        (field.resolver)(ctx).map_err(|source| ResolveError::ResolverFailed {
            type_name: type_name.to_string(),
            field_name: field_name.to_string(),
            source,
        })
    }

    /// The declared result type of a registered field.
    pub fn field_type(&self, type_name: &str, field_name: &str) -> Option<&Type> {
        let type_resolvers = self.types.get(type_name)?;
        Some(&type_resolvers.fields.get(field_name)?.ty)
    }

    pub fn contains_type(&self, type_name: impl AsRef<str>) -> bool {
        self.types.contains_key(type_name.as_ref())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn field_resolver(
        &self,
        type_name: &str,
        field_name: &str,
    ) -> Result<&FieldResolver, ResolveError> {
        let type_resolvers =
            self.types
                .get(type_name)
                .ok_or_else(|| ResolveError::TypeNotFound {
                    type_name: type_name.to_string(),
                })?;
        type_resolvers
            .fields
            .get(field_name)
            .ok_or_else(|| ResolveError::FieldNotFound {
                type_name: type_name.to_string(),
                field_name: field_name.to_string(),
            })
    }
}

fn bind_fields(
    type_name: &Name,
    declared: &IndexMap<Name, Component<FieldDefinition>>,
    resolvers: &mut Resolvers,
    null_resolver: &ResolverFn,
) -> HashMap<String, FieldResolver> {
    let mut fields = HashMap::with_capacity(declared.len());
    for (field_name, field) in declared {
        let resolver = resolvers
            .remove(&format!("{type_name}.{field_name}"))
            .unwrap_or_else(|| null_resolver.clone());
        fields.insert(
            field_name.as_str().to_owned(),
            FieldResolver {
                ty: field.ty.clone(),
                resolver,
            },
        );
    }
    fields
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use serde_json_bytes::json;
    use test_log::test;

    use super::*;
    use crate::schema::parse_schema;

    const SCHEMA: &str = r#"
        type Query {
            user: User
        }

        type User {
            id: ID
            name: String
        }
    "#;

    fn user_registry() -> ResolverRegistry {
        let schema = parse_schema(SCHEMA).unwrap();
        let mut resolvers = Resolvers::new();
        resolvers.insert("User.name", |_ctx| Ok(json!("ada")));
        ResolverRegistry::new(&schema, resolvers).unwrap()
    }

    #[test]
    fn supplied_resolver_is_invoked() {
        let registry = user_registry();
        let value = registry
            .resolve("User", "name", ResolverContext::default())
            .unwrap();
        assert_eq!(value, json!("ada"));
    }

    #[test]
    fn unbound_field_resolves_to_null() {
        let registry = user_registry();
        let value = registry
            .resolve("User", "id", ResolverContext::default())
            .unwrap();
        assert_eq!(value, Value::Null);
    }

    #[test]
    fn undeclared_field_is_an_error() {
        let registry = user_registry();
        let err = registry
            .resolve("User", "email", ResolverContext::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ResolveError::FieldNotFound { type_name, field_name }
                if type_name == "User" && field_name == "email"
        ));
    }

    #[test]
    fn unregistered_type_is_an_error() {
        let registry = user_registry();
        let err = registry
            .resolve("Unregistered", "x", ResolverContext::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ResolveError::TypeNotFound { type_name } if type_name == "Unregistered"
        ));
    }

    #[test]
    fn resolver_failure_is_wrapped() {
        let schema = parse_schema(SCHEMA).unwrap();
        let mut resolvers = Resolvers::new();
        resolvers.insert("User.name", |_ctx| Err("db down".into()));
        let registry = ResolverRegistry::new(&schema, resolvers).unwrap();

        let err = registry
            .resolve("User", "name", ResolverContext::default())
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("User"), "{message}");
        assert!(message.contains("name"), "{message}");
        assert_eq!(err.source().unwrap().to_string(), "db down");
    }

    #[test]
    fn meta_types_are_never_registered() {
        let mut resolvers = Resolvers::new();
        resolvers.insert("__Schema.types", |_ctx| Ok(json!([])));
        resolvers.insert("Int.value", |_ctx| Ok(json!(0)));
        let schema = parse_schema(SCHEMA).unwrap();
        let registry = ResolverRegistry::new(&schema, resolvers).unwrap();

        for meta in META_TYPES {
            assert!(!registry.contains_type(meta), "{meta} was registered");
        }
        assert!(registry.contains_type("Query"));
        assert!(registry.contains_type("User"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn zero_field_types_are_dropped() {
        let schema = parse_schema(
            r#"
            type Query {
                role: Role
            }

            enum Role {
                ADMIN
                USER
            }

            scalar Date
        "#,
        )
        .unwrap();
        let registry = ResolverRegistry::new(&schema, Resolvers::new()).unwrap();

        assert!(!registry.contains_type("Role"));
        assert!(!registry.contains_type("Date"));
        let err = registry
            .resolve("Role", "x", ResolverContext::default())
            .unwrap_err();
        assert!(matches!(err, ResolveError::TypeNotFound { .. }));
    }

    #[test]
    fn interface_fields_dispatch() {
        let schema = parse_schema(
            r#"
            type Query {
                node: Node
            }

            interface Node {
                id: ID
            }

            type User implements Node {
                id: ID
            }
        "#,
        )
        .unwrap();
        let mut resolvers = Resolvers::new();
        resolvers.insert("Node.id", |_ctx| Ok(json!("n1")));
        let registry = ResolverRegistry::new(&schema, resolvers).unwrap();

        let value = registry
            .resolve("Node", "id", ResolverContext::default())
            .unwrap();
        assert_eq!(value, json!("n1"));
    }

    #[test]
    fn union_types_fail_the_build() {
        let schema = parse_schema(
            r#"
            type Query {
                search: SearchResult
            }

            union SearchResult = User | Post

            type User {
                id: ID
            }

            type Post {
                id: ID
            }
        "#,
        )
        .unwrap();
        let err = ResolverRegistry::new(&schema, Resolvers::new()).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::UnsupportedUnion { type_name } if type_name == "SearchResult"
        ));
    }

    #[test]
    fn unmatched_resolvers_do_not_fail_the_build() {
        let schema = parse_schema(SCHEMA).unwrap();
        let mut resolvers = Resolvers::new();
        resolvers.insert("User.name", |_ctx| Ok(json!("ada")));
        resolvers.insert("User.nope", |_ctx| Ok(json!("unused")));
        resolvers.insert("Ghost.field", |_ctx| Ok(json!("unused")));
        let registry = ResolverRegistry::new(&schema, resolvers).unwrap();

        let value = registry
            .resolve("User", "name", ResolverContext::default())
            .unwrap();
        assert_eq!(value, json!("ada"));
        assert!(!registry.contains_type("Ghost"));
    }

    #[test]
    fn field_types_are_recorded() {
        let registry = user_registry();
        assert_eq!(
            registry.field_type("User", "name").unwrap().to_string(),
            "String"
        );
        assert_eq!(
            registry.field_type("Query", "user").unwrap().to_string(),
            "User"
        );
        assert!(registry.field_type("User", "email").is_none());
    }
}
