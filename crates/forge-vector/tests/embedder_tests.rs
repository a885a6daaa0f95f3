use std::time::Duration;

use forge_vector::{Embedder, OpenAiEmbedder, OpenAiEmbedderConfig};

fn embedder(base_url: String, dimension: usize) -> OpenAiEmbedder {
    OpenAiEmbedder::new(OpenAiEmbedderConfig {
        base_url,
        api_key: "sk-test".into(),
        model: "text-embedding-3-small".into(),
        dimension,
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

#[test]
fn test_embed_parses_vector() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/embeddings")
        .match_header("authorization", "Bearer sk-test")
        .match_body(mockito::Matcher::PartialJsonString(
            r#"{"model": "text-embedding-3-small", "input": "hello", "dimensions": 3}"#.into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data": [{"embedding": [0.5, -0.25, 1.0], "index": 0}]}"#)
        .create();

    let vector = embedder(server.url(), 3).embed("hello").unwrap();

    mock.assert();
    assert_eq!(vector, vec![0.5, -0.25, 1.0]);
}

#[test]
fn test_embed_reports_api_error() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/embeddings")
        .with_status(401)
        .with_body("invalid api key")
        .create();

    let err = embedder(server.url(), 3).embed("hello").unwrap_err();

    match err {
        forge_vector::Error::Api { status, message } => {
            assert_eq!(status, 401);
            assert!(message.contains("invalid api key"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_embed_rejects_wrong_dimension() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/embeddings")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data": [{"embedding": [0.1, 0.2], "index": 0}]}"#)
        .create();

    let err = embedder(server.url(), 3).embed("hello").unwrap_err();
    assert!(matches!(
        err,
        forge_vector::Error::DimensionMismatch {
            expected: 3,
            actual: 2
        }
    ));
}

#[test]
fn test_embed_empty_data() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/embeddings")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data": []}"#)
        .create();

    let err = embedder(server.url(), 3).embed("hello").unwrap_err();
    assert!(matches!(err, forge_vector::Error::EmptyResponse));
}
