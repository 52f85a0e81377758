#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use super::extract_operations;
use crate::checker::{MemoryChecker, Parameter, Property, SymbolId, TypeNode};
use crate::config::Config;
use crate::hir::diagnostics::{DiagnosticCollector, codes};
use crate::hir::extract::extract_types;
use crate::hir::types::{
    AuthoringStyle, OperationBinding, OperationKind, PrimitiveKind, SemanticKind, SemanticType,
};

const SCHEMA_FILE: &str = "src/schema/types.ts";
const RESOLVER_FILE: &str = "src/schema/resolvers.ts";

struct Fixture {
    checker: MemoryChecker,
    user: SymbolId,
    post: SymbolId,
}

fn fixture() -> Fixture {
    let mut checker = MemoryChecker::new();
    let user = checker.add_alias(
        SCHEMA_FILE,
        "User",
        TypeNode::object(vec![
            Property::new("id", checker.id_string()),
            Property::new("name", TypeNode::String),
        ]),
    );
    let post = checker.add_alias(
        SCHEMA_FILE,
        "Post",
        TypeNode::object(vec![Property::new("title", TypeNode::String)]),
    );
    Fixture {
        checker,
        user,
        post,
    }
}

fn run(checker: &MemoryChecker) -> (Vec<OperationBinding>, DiagnosticCollector) {
    let config = Config::default();
    let mut diagnostics = DiagnosticCollector::new();
    let (types, registry) = extract_types(checker, &config, &mut diagnostics);
    let bindings = extract_operations(checker, &config, &registry, &types, &mut diagnostics);
    (bindings, diagnostics)
}

fn resolver(parent: TypeNode, args: TypeNode, result: TypeNode) -> TypeNode {
    TypeNode::function(
        vec![Parameter::new("parent", parent), Parameter::new("args", args)],
        result,
    )
}

// ============================================================================
// OPERATION-DEFINING FUNCTIONS
// ============================================================================

#[test]
fn test_query_binding() {
    let Fixture {
        mut checker, user, ..
    } = fixture();
    let args = TypeNode::object(vec![
        Property::new("limit", checker.int()).optional(),
        Property::new("after", TypeNode::String).optional(),
    ]);
    let marker = checker.query_resolver(args, TypeNode::array(checker.reference(user)));
    checker.add_value(RESOLVER_FILE, "users", marker);

    let (bindings, diagnostics) = run(&checker);
    assert!(!diagnostics.has_errors(), "{:?}", diagnostics.errors());
    assert_eq!(bindings.len(), 1);

    let users = &bindings[0];
    assert_eq!(users.kind, OperationKind::Query);
    assert_eq!(users.target, "Query");
    assert_eq!(users.field_name, "users");
    assert_eq!(users.style, AuthoringStyle::Modern);
    assert_eq!(users.parent, None);
    let names: Vec<&str> = users.arguments.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["after", "limit"]);
    assert_eq!(
        users.return_type,
        SemanticType::array(SemanticType::reference("User"))
    );
    assert_eq!(users.implementation.module, RESOLVER_FILE);
    assert_eq!(users.implementation.export, "users");
    assert_eq!(users.implementation.property, None);
}

#[test]
fn test_mutation_result_is_awaited() {
    let Fixture {
        mut checker, user, ..
    } = fixture();
    let args = TypeNode::object(vec![Property::new("name", TypeNode::String)]);
    let marker = checker.mutation_resolver(args, checker.promise(checker.reference(user)));
    checker.add_value(RESOLVER_FILE, "createUser", marker);

    let (bindings, diagnostics) = run(&checker);
    assert!(!diagnostics.has_errors());
    assert_eq!(bindings[0].kind, OperationKind::Mutation);
    assert_eq!(bindings[0].target, "Mutation");
    assert_eq!(bindings[0].return_type, SemanticType::reference("User"));
}

#[test]
fn test_field_resolver_binding() {
    let Fixture {
        mut checker,
        user,
        post,
    } = fixture();
    let marker = checker.field_resolver(
        checker.reference(user),
        checker.no_args(),
        TypeNode::array(checker.reference(post)),
    );
    checker.add_value(RESOLVER_FILE, "posts", marker);

    let (bindings, diagnostics) = run(&checker);
    assert!(!diagnostics.has_errors());
    let posts = &bindings[0];
    assert_eq!(posts.kind, OperationKind::Field);
    assert_eq!(posts.target, "User");
    assert_eq!(posts.parent.as_deref(), Some("User"));
    assert!(posts.arguments.is_empty());
}

#[test]
fn test_inline_return_type() {
    let Fixture { mut checker, .. } = fixture();
    let payload = TypeNode::object(vec![
        Property::new("ok", TypeNode::Boolean),
        Property::new("message", TypeNode::nullable(TypeNode::String)),
    ]);
    let marker = checker.mutation_resolver(checker.no_args(), payload);
    checker.add_value(RESOLVER_FILE, "ping", marker);

    let (bindings, diagnostics) = run(&checker);
    assert!(!diagnostics.has_errors());
    match &bindings[0].return_type.kind {
        SemanticKind::InlineObject { fields } => {
            assert_eq!(fields.len(), 2);
            assert_eq!(
                fields[0].ty,
                SemanticType::primitive(PrimitiveKind::Boolean)
            );
        }
        other => panic!("expected inline payload, got {:?}", other),
    }
}

#[test]
fn test_missing_parent_type() {
    let Fixture { mut checker, .. } = fixture();
    let session = checker.add_opaque("express-session", "Session");
    let marker =
        checker.field_resolver(checker.reference(session), checker.no_args(), TypeNode::String);
    checker.add_value(RESOLVER_FILE, "token", marker);

    let (bindings, diagnostics) = run(&checker);
    assert!(bindings.is_empty());
    assert_eq!(diagnostics.errors()[0].code, codes::MISSING_PARENT_TYPE);
}

#[test]
fn test_invalid_arguments_type() {
    let Fixture {
        mut checker, user, ..
    } = fixture();
    let marker = checker.query_resolver(TypeNode::String, checker.reference(user));
    checker.add_value(RESOLVER_FILE, "user", marker);

    let (bindings, diagnostics) = run(&checker);
    assert!(bindings.is_empty());
    assert_eq!(diagnostics.errors()[0].code, codes::INVALID_ARGUMENTS_TYPE);
}

#[test]
fn test_duplicate_operation_field() {
    let Fixture {
        mut checker, user, ..
    } = fixture();
    let first = checker.query_resolver(checker.no_args(), checker.reference(user));
    checker.add_value(RESOLVER_FILE, "me", first);
    let second = checker.query_resolver(checker.no_args(), checker.reference(user));
    checker.add_value("src/schema/auth/resolvers.ts", "me", second);

    let (_, diagnostics) = run(&checker);
    let duplicate = &diagnostics.errors()[0];
    assert_eq!(duplicate.code, codes::DUPLICATE_OPERATION_FIELD);
    assert_eq!(duplicate.related.len(), 1);
}

#[test]
fn test_bindings_sorted_by_target_and_field() {
    let Fixture {
        mut checker,
        user,
        post,
    } = fixture();
    let users = checker.query_resolver(checker.no_args(), TypeNode::array(checker.reference(user)));
    checker.add_value(RESOLVER_FILE, "users", users);
    let author = checker.field_resolver(
        checker.reference(post),
        checker.no_args(),
        checker.reference(user),
    );
    checker.add_value(RESOLVER_FILE, "author", author);
    let me = checker.query_resolver(checker.no_args(), checker.reference(user));
    checker.add_value(RESOLVER_FILE, "me", me);

    let (bindings, _) = run(&checker);
    let order: Vec<String> = bindings
        .iter()
        .map(|b| format!("{}.{}", b.target, b.field_name))
        .collect();
    assert_eq!(order, vec!["Post.author", "Query.me", "Query.users"]);
}

#[test]
fn test_plain_values_are_not_operations() {
    let Fixture { mut checker, .. } = fixture();
    checker.add_value(RESOLVER_FILE, "PAGE_SIZE", TypeNode::Number);

    let (bindings, diagnostics) = run(&checker);
    assert!(bindings.is_empty());
    assert!(!diagnostics.has_errors());
}

// ============================================================================
// RESOLVER SHAPES
// ============================================================================

#[test]
fn test_legacy_field_resolvers() {
    let Fixture {
        mut checker,
        user,
        post,
    } = fixture();
    let args = TypeNode::object(vec![Property::new("first", checker.int())]);
    let shape = checker.add_alias(
        RESOLVER_FILE,
        "UserResolver",
        TypeNode::object(vec![Property::new(
            "posts",
            resolver(
                checker.reference(user),
                args,
                TypeNode::array(checker.reference(post)),
            ),
        )]),
    );
    checker.add_value(RESOLVER_FILE, "userResolver", checker.reference(shape));

    let (bindings, diagnostics) = run(&checker);
    assert!(!diagnostics.has_errors(), "{:?}", diagnostics.errors());
    let posts = &bindings[0];
    assert_eq!(posts.style, AuthoringStyle::Legacy);
    assert_eq!(posts.target, "User");
    assert_eq!(posts.arguments.len(), 1);
    assert_eq!(posts.implementation.export, "userResolver");
    assert_eq!(posts.implementation.property.as_deref(), Some("posts"));
    assert_eq!(posts.implementation.to_string(), "userResolver.posts");
}

#[test]
fn test_legacy_query_resolvers() {
    let Fixture {
        mut checker, user, ..
    } = fixture();
    let shape = checker.add_alias(
        RESOLVER_FILE,
        "QueryResolver",
        TypeNode::object(vec![Property::new(
            "me",
            resolver(TypeNode::Unknown, checker.no_args(), checker.reference(user)),
        )]),
    );
    checker.add_value(RESOLVER_FILE, "queryResolver", checker.reference(shape));

    let (bindings, diagnostics) = run(&checker);
    assert!(!diagnostics.has_errors());
    assert_eq!(bindings[0].kind, OperationKind::Query);
    assert_eq!(bindings[0].target, "Query");
    assert!(bindings[0].arguments.is_empty());
}

#[test]
fn test_legacy_target_without_parent_parameter() {
    let Fixture { mut checker, .. } = fixture();
    let shape = checker.add_alias(
        RESOLVER_FILE,
        "ReviewResolver",
        TypeNode::object(vec![Property::new(
            "score",
            TypeNode::function(vec![], TypeNode::Number),
        )]),
    );
    checker.add_value(RESOLVER_FILE, "reviewResolver", checker.reference(shape));

    let (bindings, diagnostics) = run(&checker);
    assert!(!diagnostics.has_errors());
    assert_eq!(bindings[0].target, "Review");
    assert_eq!(bindings[0].parent.as_deref(), Some("Review"));
}

#[test]
fn test_legacy_missing_value() {
    let Fixture {
        mut checker, post, ..
    } = fixture();
    checker.add_alias(
        RESOLVER_FILE,
        "UserResolver",
        TypeNode::object(vec![Property::new(
            "posts",
            TypeNode::function(vec![], TypeNode::array(checker.reference(post))),
        )]),
    );

    let (bindings, diagnostics) = run(&checker);
    assert!(bindings.is_empty());
    assert_eq!(diagnostics.errors()[0].code, codes::MISSING_RESOLVER_VALUE);
}

#[test]
fn test_legacy_non_function_property() {
    let Fixture {
        mut checker, post, ..
    } = fixture();
    let shape = checker.add_alias(
        RESOLVER_FILE,
        "UserResolver",
        TypeNode::object(vec![
            Property::new(
                "posts",
                TypeNode::function(vec![], TypeNode::array(checker.reference(post))),
            ),
            Property::new("cacheKey", TypeNode::String),
        ]),
    );
    checker.add_value(RESOLVER_FILE, "userResolver", checker.reference(shape));

    let (bindings, diagnostics) = run(&checker);
    assert_eq!(bindings.len(), 1);
    assert_eq!(diagnostics.errors()[0].code, codes::INVALID_RESOLVER_SIGNATURE);
}

#[test]
fn test_mixed_styles_rejected_once() {
    let Fixture {
        mut checker,
        user,
        post,
    } = fixture();
    let marker = checker.query_resolver(checker.no_args(), checker.reference(user));
    checker.add_value(RESOLVER_FILE, "me", marker);
    for name in ["User", "Post"] {
        let shape = checker.add_alias(
            RESOLVER_FILE,
            &format!("{}Resolver", name),
            TypeNode::object(vec![Property::new(
                "related",
                TypeNode::function(vec![], TypeNode::array(checker.reference(post))),
            )]),
        );
        let value = format!("{}Resolver", name.to_lowercase());
        checker.add_value(RESOLVER_FILE, &value, checker.reference(shape));
    }

    let (bindings, diagnostics) = run(&checker);
    assert!(bindings.is_empty());
    assert_eq!(diagnostics.error_count(), 1);
    let mixed = &diagnostics.errors()[0];
    assert_eq!(mixed.code, codes::LEGACY_API_DETECTED);
    assert_eq!(mixed.related.len(), 1);
    assert!(mixed.message.contains("UserResolver"));
    assert!(mixed.message.contains("'me'"));
}
