//! Frozen schema and golden snapshot for the error envelope on the wire.

use jsonschema::validator_for;
use serde_json::{json, Value};

use rag_bridge::protocol::{JsonRpcError, JsonRpcResponse, RpcId};

#[test]
fn golden_error_envelope_schema_validation() {
    // 1. Build a canonical parse-error response
    let response = JsonRpcResponse::error(None, JsonRpcError::parse_error());
    let json_str = serde_json::to_string(&response).unwrap();
    let json_value: Value = serde_json::from_str(&json_str).unwrap();

    // 2. Schema — frozen
    let schema_str = r#"{
  "$schema": "https://json-schema.org/draft/2020-12/schema",
  "title": "Bridge Error Response",
  "type": "object",
  "required": ["jsonrpc", "id", "error"],
  "additionalProperties": false,
  "properties": {
    "jsonrpc": { "const": "2.0" },
    "id": { "type": ["integer", "string", "null"] },
    "error": {
      "type": "object",
      "required": ["code", "message"],
      "additionalProperties": false,
      "properties": {
        "code": { "type": "integer", "enum": [-32700, -32603] },
        "message": { "type": "string", "minLength": 1 },
        "data": {}
      }
    }
  }
}"#;

    let schema_json: Value = serde_json::from_str(schema_str).unwrap();
    let validator = validator_for(&schema_json).unwrap();

    // 3. Validate against schema
    assert!(
        validator.is_valid(&json_value),
        "error envelope must satisfy the frozen schema"
    );

    // 4. Golden snapshot (byte-identical, stable)
    let expected = r#"{"jsonrpc":"2.0","id":null,"error":{"code":-32700,"message":"Parse error"}}"#;
    assert_eq!(json_str, expected, "parse error snapshot mismatch");
}

#[test]
fn application_error_satisfies_schema_and_carries_category() {
    let err = JsonRpcError::application("Unknown method: zap", "unknown_method");
    let response = JsonRpcResponse::error(Some(RpcId::Number(4)), err);
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["error"]["code"], -32603);
    assert_eq!(value["error"]["message"], "Unknown method: zap");
    assert_eq!(value["error"]["data"]["type"], "unknown_method");
    assert_eq!(value["id"], 4);
    assert!(value.get("result").is_none(), "error responses carry no result");
}

#[test]
fn success_envelope_has_no_error_member() {
    let response = JsonRpcResponse::success(Some(RpcId::Str("abc".into())), json!({"ok": true}));
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["jsonrpc"], "2.0");
    assert_eq!(value["id"], "abc");
    assert_eq!(value["result"]["ok"], true);
    assert!(value.get("error").is_none(), "success responses carry no error");
}
