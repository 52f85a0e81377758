//! Small projects built on the in-memory checker.

use typegraph::Config;
use typegraph::checker::{
    EnumMemberDecl, LiteralValue, MemoryChecker, Parameter, Property, SymbolId, TypeNode,
};
use typegraph::config::{ScalarMapping, TsTypeRef};

pub const TYPES_FILE: &str = "src/schema/types.ts";
pub const RESOLVER_FILE: &str = "src/schema/resolvers.ts";

/// Symbols of the blog project that tests extend.
pub struct Blog {
    pub checker: MemoryChecker,
    pub user: SymbolId,
    pub post: SymbolId,
}

/// Config mapping the standard `Date` type to a `DateTime` scalar.
pub fn date_time_config() -> Config {
    Config {
        scalars: vec![ScalarMapping {
            name: "DateTime".into(),
            ts_type: TsTypeRef {
                name: "Date".into(),
                from: None,
            },
            only: None,
            description: Some("ISO-8601 timestamp".into()),
        }],
        ..Config::default()
    }
}

/// A `User` with one query returning a nullable `User`.
pub fn minimal_project() -> MemoryChecker {
    let mut checker = MemoryChecker::new();
    let user = checker.add_alias(
        TYPES_FILE,
        "User",
        TypeNode::object(vec![
            Property::new("id", checker.id_string()),
            Property::new("name", TypeNode::String),
            Property::new("email", TypeNode::nullable(TypeNode::String)).optional(),
        ]),
    );
    let me = checker.query_resolver(
        checker.no_args(),
        TypeNode::nullable(checker.reference(user)),
    );
    checker.add_value(RESOLVER_FILE, "me", me);
    checker
}

/// Interface, enum, objects, an input and one operation of each kind.
///
/// Needs [`date_time_config`] for `User.createdAt`.
pub fn blog_project() -> Blog {
    let mut checker = MemoryChecker::new();

    let node_shape = checker.interface_type(
        TypeNode::object(vec![Property::new("id", checker.id_string())]),
        MemoryChecker::type_meta(vec![], vec![]),
    );
    let node = checker.add_alias(TYPES_FILE, "Node", node_shape);

    let status = checker.add_enum(
        TYPES_FILE,
        "Status",
        vec![
            EnumMemberDecl::new("Active", LiteralValue::String("active".into())),
            EnumMemberDecl::new("Banned", LiteralValue::String("banned".into())),
        ],
    );

    let user_shape = checker.object_type(
        TypeNode::object(vec![
            Property::new("id", checker.id_string()),
            Property::new("name", TypeNode::String),
            Property::new("status", checker.reference(status)),
            Property::new("createdAt", checker.date()),
        ]),
        MemoryChecker::type_meta(vec![checker.reference(node)], vec![]),
    );
    let user = checker.add_alias(TYPES_FILE, "User", user_shape);

    let post = checker.add_alias(
        TYPES_FILE,
        "Post",
        TypeNode::object(vec![
            Property::new("id", checker.id_string()),
            Property::new("title", TypeNode::String),
            Property::new("body", TypeNode::nullable(TypeNode::String)).optional(),
        ]),
    );

    let create_input = checker.add_alias(
        TYPES_FILE,
        "CreatePostInput",
        TypeNode::object(vec![
            Property::new("title", TypeNode::String),
            Property::new("body", TypeNode::nullable(TypeNode::String)).optional(),
        ]),
    );

    let users = checker.query_resolver(
        checker.no_args(),
        TypeNode::array(checker.reference(user)),
    );
    checker.add_value(RESOLVER_FILE, "users", users);

    let create_post = checker.mutation_resolver(
        TypeNode::object(vec![Property::new("input", checker.reference(create_input))]),
        checker.promise(checker.reference(post)),
    );
    checker.add_value(RESOLVER_FILE, "createPost", create_post);

    let author = checker.field_resolver(
        checker.reference(post),
        checker.no_args(),
        checker.reference(user),
    );
    checker.add_value(RESOLVER_FILE, "author", author);

    Blog {
        checker,
        user,
        post,
    }
}

/// Declare `{stem}Resolver` plus its `{stem}Resolver` value (lower-cased
/// first letter) with one function property per entry.
pub fn add_legacy_resolver(
    checker: &mut MemoryChecker,
    stem: &str,
    properties: Vec<(&str, Vec<Parameter>, TypeNode)>,
) {
    let shape = checker.add_alias(
        RESOLVER_FILE,
        &format!("{}Resolver", stem),
        TypeNode::object(
            properties
                .into_iter()
                .map(|(name, params, ret)| Property::new(name, TypeNode::function(params, ret)))
                .collect(),
        ),
    );
    let mut value = stem.to_string();
    if let Some(first) = value.get_mut(0..1) {
        first.make_ascii_lowercase();
    }
    value.push_str("Resolver");
    checker.add_value(RESOLVER_FILE, &value, checker.reference(shape));
}

#[cfg(test)]
mod tests {
    use super::*;
    use typegraph::checker::TypeChecker;

    #[test]
    fn test_blog_project_declares_types() {
        let blog = blog_project();
        let declarations = blog.checker.declarations("src/schema");
        assert!(declarations.iter().any(|d| d.name == "User"));
        assert!(declarations.iter().any(|d| d.name == "createPost"));
        assert!(blog.checker.location(blog.post).is_some());
        assert!(blog.checker.location(blog.user).is_some());
    }
}
