//! End-to-end completion tests through the public API.

use std::sync::Arc;

use attrsh::executor::{ExecutionContext, ResultData};
use attrsh::parser::{Command, Parser};
use attrsh::repl::SharedState;
use attrsh::schema::{ResourceAddress, StaticSchemaSource, attributes_from_response};
use serde_json::json;

/// Helper building a context over one described resource.
fn create_context() -> ExecutionContext {
    let response = json!({
        "outcome": "success",
        "result": [
            {
                "address": [{"subsystem": "web"}, {"connector": "http"}],
                "outcome": "success",
                "result": {"attributes": {"ignored": {"type": "STRING"}}}
            },
            {
                "address": [{"subsystem": "web"}, {"connector": "*"}],
                "outcome": "success",
                "result": {
                    "attributes": {
                        "name": {
                            "type": {"TYPE_MODEL_VALUE": "STRING"},
                            "access-type": "read-only",
                            "description": "Connector name"
                        },
                        "socket": {
                            "type": {"TYPE_MODEL_VALUE": "OBJECT"},
                            "access-type": "read-write",
                            "value-type": {
                                "port": {"type": "INT", "description": "Listening port"},
                                "host": {"type": "STRING", "access-type": "read-only"}
                            }
                        },
                        "aliases": {
                            "type": "LIST",
                            "value-type": {
                                "alias": {"type": "STRING"},
                                "weight": {"type": "INT", "access-type": "metric"}
                            }
                        },
                        "bytes-sent": {"type": "LONG", "access-type": "metric"}
                    }
                }
            }
        ]
    });

    let tree = attributes_from_response(&response)
        .expect("wildcard response should convert")
        .expect("wildcard entry should carry attributes");
    let address: ResourceAddress = "/subsystem=web/connector=*".parse().unwrap();
    let source = StaticSchemaSource::new().with(address.clone(), tree);
    ExecutionContext::new(SharedState::new(address), Arc::new(source))
}

fn candidates(ctx: &ExecutionContext, line: &str) -> Option<Vec<String>> {
    ctx.engine()
        .complete(line, line.len())
        .map(|completion| completion.candidates)
}

#[test]
fn test_wildcard_entry_is_used() {
    let ctx = create_context();
    assert_eq!(
        candidates(&ctx, "").unwrap(),
        ["aliases", "bytes-sent", "name", "socket"]
    );
}

#[test]
fn test_nested_and_list_completion() {
    let ctx = create_context();

    assert_eq!(candidates(&ctx, "socket").unwrap(), ["."]);
    assert_eq!(candidates(&ctx, "socket.").unwrap(), ["host", "port"]);
    assert_eq!(candidates(&ctx, "aliases").unwrap(), ["["]);
    assert!(candidates(&ctx, "aliases[").unwrap().is_empty());
    assert_eq!(candidates(&ctx, "aliases[3]").unwrap(), [".", "="]);
    assert_eq!(candidates(&ctx, "aliases[3].w").unwrap(), ["weight"]);

    let completion = ctx.engine().complete("aliases[3].w", 12).unwrap();
    assert_eq!(completion.offset, 11);
}

#[test]
fn test_no_completion_signal() {
    let ctx = create_context();
    assert_eq!(candidates(&ctx, ".socket"), None);
    assert_eq!(candidates(&ctx, "socket..port"), None);
    assert_eq!(candidates(&ctx, "aliases[]x"), None);
    assert_eq!(candidates(&ctx, "name."), None);
    assert_eq!(candidates(&ctx, "socket.port "), None);
}

#[test]
fn test_writable_only_session() {
    let ctx = create_context();
    let mut parser = Parser::new();

    let command = parser.parse("writable on").unwrap();
    assert_eq!(command, Command::Writable(true));
    ctx.execute(command).unwrap();

    assert_eq!(
        candidates(&ctx, "").unwrap(),
        ["aliases", "bytes-sent", "socket"]
    );
    assert_eq!(candidates(&ctx, "socket.").unwrap(), ["port"]);

    ctx.execute(parser.parse("writable off").unwrap()).unwrap();
    assert_eq!(candidates(&ctx, "socket.").unwrap(), ["host", "port"]);
}

#[test]
fn test_describe_and_cd() {
    let ctx = create_context();
    let mut parser = Parser::new();

    let result = ctx.execute(parser.parse("socket.port").unwrap()).unwrap();
    match result.data {
        ResultData::Attribute { path, descriptor } => {
            assert_eq!(path, "socket.port");
            assert_eq!(descriptor.description.as_deref(), Some("Listening port"));
        }
        other => panic!("unexpected {:?}", other),
    }

    assert!(ctx.execute(parser.parse("socket.missing").unwrap()).is_err());

    ctx.execute(parser.parse("cd /").unwrap()).unwrap();
    assert_eq!(candidates(&ctx, ""), None);
}
