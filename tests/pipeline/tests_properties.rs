//! Behavioral guarantees of a full run.

use rstest::rstest;
use typegraph::checker::{EnumMemberDecl, LiteralValue, MemoryChecker, Parameter, Property, TypeNode};
use typegraph::{Config, codes, generate};

use crate::helpers::diagnostic_helpers::*;
use crate::helpers::fixtures::*;

// =============================================================================
// DETERMINISM
// =============================================================================

#[test]
fn test_repeated_runs_are_identical() {
    let blog = blog_project();
    let config = date_time_config();
    let first = generate(&blog.checker, &config).output.unwrap();
    let second = generate(&blog.checker, &config).output.unwrap();

    assert_eq!(first.sdl, second.sdl);
    assert_eq!(first.ast, second.ast);
    assert_eq!(first.resolver_map, second.resolver_map);
}

// =============================================================================
// INTERFACES
// =============================================================================

#[test]
fn test_missing_interface_field_reported_once() {
    let mut checker = MemoryChecker::new();
    let node_shape = checker.interface_type(
        TypeNode::object(vec![Property::new("id", checker.id_string())]),
        MemoryChecker::type_meta(vec![], vec![]),
    );
    let node = checker.add_alias(TYPES_FILE, "Node", node_shape);
    let user_shape = checker.object_type(
        TypeNode::object(vec![Property::new("name", TypeNode::String)]),
        MemoryChecker::type_meta(vec![checker.reference(node)], vec![]),
    );
    checker.add_alias(TYPES_FILE, "User", user_shape);

    let result = generate(&checker, &Config::default());
    let error = assert_single_error(&result, codes::INTERFACE_MISSING_FIELD);
    assert!(error.message.contains("'User'"));
    assert!(error.message.contains("'id'"));
    assert!(error.message.contains("'Node'"));
}

// =============================================================================
// CYCLES
// =============================================================================

fn input_pair(nullable_back_edge: bool) -> MemoryChecker {
    let mut checker = MemoryChecker::new();
    let a = checker.add_alias(TYPES_FILE, "AInput", TypeNode::Unknown);
    let b = checker.add_alias(
        TYPES_FILE,
        "BInput",
        TypeNode::object(vec![Property::new("a", checker.reference(a))]),
    );
    let back = if nullable_back_edge {
        TypeNode::nullable(checker.reference(b))
    } else {
        checker.reference(b)
    };
    checker.set_alias_body(a, TypeNode::object(vec![Property::new("b", back)]));
    checker
}

#[rstest]
#[case::nullable_edge(true)]
#[case::strict_edges(false)]
fn test_input_cycle(#[case] nullable_back_edge: bool) {
    let result = generate(&input_pair(nullable_back_edge), &Config::default());
    if nullable_back_edge {
        assert_success(&result);
    } else {
        let error = assert_single_error(&result, codes::CIRCULAR_REFERENCE);
        assert!(error.message.contains("AInput -> BInput -> AInput"));
    }
}

// =============================================================================
// INLINE NAMING
// =============================================================================

#[test]
fn test_inline_name_collision_is_not_renamed() {
    let mut checker = MemoryChecker::new();
    checker.add_alias(
        TYPES_FILE,
        "User",
        TypeNode::object(vec![Property::new(
            "profileDetails",
            TypeNode::object(vec![Property::new("bio", TypeNode::String)]),
        )]),
    );
    checker.add_alias(
        TYPES_FILE,
        "UserProfile",
        TypeNode::object(vec![Property::new(
            "details",
            TypeNode::object(vec![Property::new("bio", TypeNode::String)]),
        )]),
    );

    let result = generate(&checker, &Config::default());
    let error = assert_single_error(&result, codes::INLINE_TYPE_NAME_COLLISION);
    assert!(error.message.contains("UserProfileDetails"));
}

// =============================================================================
// OPERATIONS
// =============================================================================

#[test]
fn test_mixed_operation_styles_fail_once() {
    let Blog {
        mut checker, post, ..
    } = blog_project();
    let related = TypeNode::array(checker.reference(post));
    add_legacy_resolver(&mut checker, "Post", vec![("related", vec![], related)]);

    let result = generate(&checker, &date_time_config());
    let error = assert_single_error(&result, codes::LEGACY_API_DETECTED);
    assert!(error.message.contains("PostResolver"));
}

#[test]
fn test_legacy_target_without_declared_type() {
    let mut checker = MemoryChecker::new();
    checker.add_alias(
        TYPES_FILE,
        "User",
        TypeNode::object(vec![Property::new("name", TypeNode::String)]),
    );
    add_legacy_resolver(&mut checker, "Review", vec![("score", vec![], TypeNode::Number)]);

    let result = generate(&checker, &Config::default());
    let error = assert_single_error(&result, codes::UNKNOWN_TARGET_TYPE);
    assert!(error.message.contains("'Review'"));
}

#[test]
fn test_legacy_resolvers_bind_by_property() {
    let mut checker = MemoryChecker::new();
    let user = checker.add_alias(
        TYPES_FILE,
        "User",
        TypeNode::object(vec![Property::new("name", TypeNode::String)]),
    );
    let parent = Parameter::new("parent", checker.reference(user));
    add_legacy_resolver(
        &mut checker,
        "User",
        vec![("initials", vec![parent], TypeNode::String)],
    );

    let result = generate(&checker, &Config::default());
    assert_success(&result);
    let output = result.output.unwrap();
    assert!(output.sdl.contains("extend type User {\n  initials: String!\n}"));
    let binding = &output.resolver_map["User"]["initials"];
    assert_eq!(binding["export"], "userResolver");
    assert_eq!(binding["property"], "initials");
}

// =============================================================================
// EXCLUSION
// =============================================================================

#[test]
fn test_input_with_only_unsupported_fields() {
    let mut checker = MemoryChecker::new();
    checker.add_alias(
        TYPES_FILE,
        "FilterInput",
        TypeNode::object(vec![
            Property::new(
                "value",
                TypeNode::Union(vec![TypeNode::String, TypeNode::Number]),
            ),
            Property::new("matches", TypeNode::function(vec![], TypeNode::Boolean)),
        ]),
    );

    let result = generate(&checker, &Config::default());
    let error = assert_single_error(&result, codes::ALL_FIELDS_EXCLUDED);
    assert!(error.message.contains("'FilterInput'"));
    assert_eq!(
        warning_codes(&result),
        vec![codes::UNSUPPORTED_FIELD_TYPE, codes::UNSUPPORTED_FIELD_TYPE]
    );
}

// =============================================================================
// PRUNING
// =============================================================================

#[test]
fn test_pruning_keeps_scalars_and_drops_orphans() {
    let mut checker = minimal_project();
    checker.add_alias(
        TYPES_FILE,
        "Orphan",
        TypeNode::object(vec![Property::new("note", TypeNode::String)]),
    );
    let config = Config {
        prune_unreachable: true,
        ..date_time_config()
    };

    let result = generate(&checker, &config);
    assert_success(&result);
    let document = result.output.unwrap().document;
    assert!(document.get("Orphan").is_none());
    assert!(document.get("User").is_some());
    assert!(document.get("DateTime").is_some());
}

#[test]
fn test_without_pruning_orphans_stay() {
    let mut checker = minimal_project();
    checker.add_alias(
        TYPES_FILE,
        "Orphan",
        TypeNode::object(vec![Property::new("note", TypeNode::String)]),
    );

    let result = generate(&checker, &Config::default());
    assert!(result.output.unwrap().sdl.contains("type Orphan {"));
}

// =============================================================================
// DEFAULT VALUES
// =============================================================================

/// `minimal_project` plus `FilterInput.status` of enum `Status` with a default.
fn status_filter(default: &str) -> MemoryChecker {
    let mut checker = minimal_project();
    let status = checker.add_enum(
        TYPES_FILE,
        "Status",
        vec![
            EnumMemberDecl::new("Active", LiteralValue::String("active".into())),
            EnumMemberDecl::new("Banned", LiteralValue::String("banned".into())),
        ],
    );
    let status_field = checker.field(
        checker.reference(status),
        MemoryChecker::field_meta(vec![], Some(TypeNode::string_literal(default))),
    );
    checker.add_alias(
        TYPES_FILE,
        "FilterInput",
        TypeNode::object(vec![Property::new("status", status_field)]),
    );
    checker
}

#[test]
fn test_enum_default_prints_schema_name() {
    let result = generate(&status_filter("active"), &Config::default());
    assert_success(&result);
    let output = result.output.unwrap();
    assert!(output.sdl.contains("status: Status! = ACTIVE\n"), "{}", output.sdl);
    assert!(!output.sdl.contains("\"active\""));
}

#[test]
fn test_enum_default_outside_members_is_rejected() {
    let result = generate(&status_filter("archived"), &Config::default());
    let error = assert_single_error(&result, codes::INVALID_DEFAULT_VALUE);
    assert!(error.message.contains("'FilterInput.status'"));
    assert!(error.message.contains("\"archived\""));
}
