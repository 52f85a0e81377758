//! End-to-end generation over small projects.

use typegraph::checker::{MemoryChecker, Property, TypeNode};
use typegraph::config::{ScalarMapping, TsTypeRef};
use typegraph::emit::render_json;
use typegraph::{Config, codes, generate};

use crate::helpers::diagnostic_helpers::*;
use crate::helpers::fixtures::*;

// =============================================================================
// SUCCESSFUL RUNS
// =============================================================================

#[test]
fn test_minimal_project_sdl() {
    let result = generate(&minimal_project(), &Config::default());
    assert_success(&result);
    let output = result.output.unwrap();

    let expected = r#"type Query

type User {
  email: String
  id: ID!
  name: String!
}

extend type Query {
  me: User
}
"#;
    assert_eq!(output.sdl, expected);
}

#[test]
fn test_minimal_project_resolver_map() {
    let result = generate(&minimal_project(), &Config::default());
    let output = result.output.unwrap();

    let expected = r#"{
  "Query": {
    "me": {
      "export": "me",
      "module": "src/schema/resolvers.ts"
    }
  }
}
"#;
    assert_eq!(render_json(&output.resolver_map), expected);
    assert_eq!(output.resolvers.len(), 1);
}

#[test]
fn test_blog_project_generates_every_kind() {
    let blog = blog_project();
    let result = generate(&blog.checker, &date_time_config());
    assert_success(&result);
    let output = result.output.unwrap();

    for fragment in [
        "scalar DateTime",
        "interface Node {",
        "enum Status {",
        "type User implements Node {",
        "  createdAt: DateTime!",
        "input CreatePostInput {",
        "type Query",
        "type Mutation",
        "extend type Mutation {\n  createPost(input: CreatePostInput!): Post!\n}",
        "extend type Post {\n  author: User!\n}",
        "extend type Query {\n  users: [User!]!\n}",
    ] {
        assert!(
            output.sdl.contains(fragment),
            "missing {:?} in:\n{}",
            fragment,
            output.sdl
        );
    }

    assert_eq!(output.resolver_map["Post"]["author"]["export"], "author");
    assert_eq!(output.resolver_map["Mutation"]["createPost"]["export"], "createPost");
    assert_eq!(output.ast["kind"], "Document");
}

#[test]
fn test_ast_lists_definitions_in_sdl_order() {
    let result = generate(&minimal_project(), &Config::default());
    let output = result.output.unwrap();
    let kinds: Vec<&str> = output.ast["definitions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["kind"].as_str().unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec![
            "ObjectTypeDefinition",
            "ObjectTypeDefinition",
            "ObjectTypeExtension"
        ]
    );
}

#[test]
fn test_warnings_do_not_block_output() {
    let mut checker = minimal_project();
    checker.add_alias(
        TYPES_FILE,
        "Setting",
        TypeNode::object(vec![
            Property::new("key", TypeNode::String),
            Property::new(
                "value",
                TypeNode::Union(vec![TypeNode::String, TypeNode::Number]),
            ),
        ]),
    );

    let result = generate(&checker, &Config::default());
    assert_success(&result);
    assert_eq!(warning_codes(&result), vec![codes::UNSUPPORTED_FIELD_TYPE]);
    let sdl = result.output.unwrap().sdl;
    assert!(sdl.contains("type Setting {\n  key: String!\n}"));
}

// =============================================================================
// HALTING
// =============================================================================

#[test]
fn test_invalid_config_stops_before_extraction() {
    let config = Config {
        scalars: vec![ScalarMapping {
            name: "String".into(),
            ts_type: TsTypeRef {
                name: "Date".into(),
                from: None,
            },
            only: None,
            description: None,
        }],
        ..Config::default()
    };

    let result = generate(&minimal_project(), &config);
    let error = assert_single_error(&result, codes::INVALID_CONFIG);
    assert!(error.message.contains("String"));
}

#[test]
fn test_extraction_errors_stop_the_run() {
    let mut checker = MemoryChecker::new();
    checker.add_alias(
        TYPES_FILE,
        "Callback",
        TypeNode::object(vec![Property::new(
            "run",
            TypeNode::function(vec![], TypeNode::Undefined),
        )]),
    );

    let result = generate(&checker, &Config::default());
    assert!(!result.is_success());
    assert_eq!(error_codes(&result), vec![codes::ALL_FIELDS_EXCLUDED]);
}
