//! Transport-loop framing properties exercised over in-memory streams.

mod common;

use common::{mock_adapter, test_config, MockEngine};
use rag_bridge::server::BridgeServer;

/// Run the transport loop over the given input and collect the response
/// frames, one JSON value per output line.
async fn run_lines(input: &str) -> Vec<serde_json::Value> {
    let tmp = tempfile::tempdir().unwrap();
    let (adapter, _) = mock_adapter(test_config(tmp.path()), MockEngine::with_answer("ok"));
    let server = BridgeServer::new(adapter);

    let mut output: Vec<u8> = Vec::new();
    server.serve(input.as_bytes(), &mut output).await.unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn malformed_line_yields_parse_error_and_loop_continues() {
    let responses =
        run_lines("this is not json\n{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n").await;

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert!(responses[0]["id"].is_null(), "parse errors carry a null id");
    assert_eq!(responses[1]["id"], 1);
    assert_eq!(responses[1]["result"], "pong");
}

#[tokio::test]
async fn truncated_frame_yields_parse_error() {
    let responses = run_lines("{\"jsonrpc\":\"2.0\",\"id\":7,\"method\":\"pi\n").await;

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert!(responses[0]["id"].is_null());
}

#[tokio::test]
async fn blank_lines_produce_no_response() {
    let responses = run_lines("\n\n{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n\n").await;
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["result"], "pong");
}

#[tokio::test]
async fn end_of_stream_terminates_cleanly() {
    let responses = run_lines("").await;
    assert!(responses.is_empty());
}

#[tokio::test]
async fn one_response_per_request_line_in_order() {
    let input = "{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n\
                 {\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"ping\"}\n\
                 {\"jsonrpc\":\"2.0\",\"id\":3,\"method\":\"ping\"}\n";
    let responses = run_lines(input).await;

    assert_eq!(responses.len(), 3);
    for (i, resp) in responses.iter().enumerate() {
        assert_eq!(resp["id"], (i + 1) as i64);
        assert_eq!(resp["jsonrpc"], "2.0");
    }
}

#[tokio::test]
async fn request_without_id_still_gets_a_reply() {
    let responses = run_lines("{\"jsonrpc\":\"2.0\",\"method\":\"ping\"}\n").await;

    assert_eq!(responses.len(), 1);
    assert!(responses[0]["id"].is_null());
    assert_eq!(responses[0]["result"], "pong");
}

#[tokio::test]
async fn missing_required_key_is_application_error_with_id() {
    let responses =
        run_lines("{\"jsonrpc\":\"2.0\",\"id\":4,\"method\":\"index_files\"}\n").await;

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["id"], 4);
    assert_eq!(responses[0]["error"]["code"], -32603);
    assert_eq!(responses[0]["error"]["data"]["type"], "invalid_params");
}

#[tokio::test]
async fn final_line_without_newline_is_still_served() {
    let responses = run_lines("{\"jsonrpc\":\"2.0\",\"id\":9,\"method\":\"ping\"}").await;

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["id"], 9);
    assert_eq!(responses[0]["result"], "pong");
}
