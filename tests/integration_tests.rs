//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: parameter file → HTTP requests → records

use fanout_fetch::engine::{run_job, Fetcher, Job};
use fanout_fetch::http::HttpClient;
use fanout_fetch::loader::load_params;
use fanout_fetch::output::{CollectSink, JsonLinesSink, RecordSink};
use fanout_fetch::pagination::PageSettings;
use fanout_fetch::{Error, JobConfig, OutputRecord, ParamsFormat};
use pretty_assertions::assert_eq;
use std::path::Path;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn write_params(dir: &Path, name: &str, content: &str) -> String {
    let file = dir.join(name);
    std::fs::write(&file, content).unwrap();
    file.to_str().unwrap().to_string()
}

fn echo_query() -> impl Fn(&Request) -> ResponseTemplate + Send + Sync {
    |req: &Request| ResponseTemplate::new(200).set_body_string(req.url.query().unwrap_or_default())
}

// ============================================================================
// Parameter Loading
// ============================================================================

#[tokio::test]
async fn test_load_params_preserves_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let location = write_params(dir.path(), "params.json", r#"["z", "a", "m", "a"]"#);

    let params = load_params(&location, ParamsFormat::Json).await.unwrap();
    assert_eq!(params, vec!["z", "a", "m", "a"]);
}

#[tokio::test]
async fn test_load_params_not_an_array() {
    let dir = tempfile::tempdir().unwrap();
    let location = write_params(dir.path(), "params.json", r#""not an array""#);

    let err = load_params(&location, ParamsFormat::Json).await.unwrap_err();
    assert!(matches!(err, Error::ParamsParse { .. }));
}

// ============================================================================
// End-to-end Jobs
// ============================================================================

#[tokio::test]
async fn test_two_parameters_without_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("id", "a"))
        .and(header("User-Agent", "Mozilla/5.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"id\":\"a\"}"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("id", "b"))
        .and(header("User-Agent", "Mozilla/5.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"id\":\"b\"}"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let location = write_params(dir.path(), "params.json", r#"["a","b"]"#);
    let config = JobConfig::new(format!("{}/items?id=${{param}}", server.uri()), location);

    let mut sink = CollectSink::new();
    let stats = run_job(&config, &mut sink).await.unwrap();

    assert_eq!(stats.units_total, 2);
    assert_eq!(stats.records_emitted, 2);
    assert!(stats.is_success());

    let mut responses = sink.responses();
    responses.sort_unstable();
    assert_eq!(responses, vec!["{\"id\":\"a\"}", "{\"id\":\"b\"}"]);
}

#[tokio::test]
async fn test_empty_parameter_file_produces_no_records() {
    let server = MockServer::start().await;

    let dir = tempfile::tempdir().unwrap();
    let location = write_params(dir.path(), "params.json", "[]");
    let config = JobConfig::new(format!("{}/items?id=${{param}}", server.uri()), location)
        .with_pagination("page", 3);

    let mut sink = CollectSink::new();
    let stats = run_job(&config, &mut sink).await.unwrap();

    assert_eq!(stats.units_total, 0);
    assert!(sink.records.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_csv_parameter_file() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(echo_query())
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let location = write_params(dir.path(), "params.csv", "10,first\n20,second\n");
    let config = JobConfig::new(format!("{}/items?id=${{param}}", server.uri()), location);

    let mut sink = CollectSink::new();
    run_job(&config, &mut sink).await.unwrap();

    let mut responses = sink.responses();
    responses.sort_unstable();
    assert_eq!(responses, vec!["id=10", "id=20"]);
}

#[tokio::test]
async fn test_pagination_three_pages_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(echo_query())
        .expect(3)
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(
        HttpClient::new().unwrap(),
        format!("{}/items?id=${{param}}", server.uri()),
        PageSettings::new("page", 3),
    );
    let job = Job::new(fetcher);
    let mut sink = CollectSink::new();
    job.run(vec!["42".to_string()], &mut sink).await.unwrap();

    assert_eq!(
        sink.responses(),
        vec!["id=42&page=1", "id=42&page=2", "id=42&page=3"]
    );
}

#[tokio::test]
async fn test_second_page_failure_keeps_first_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("page 1"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let location = write_params(dir.path(), "params.json", r#"["42"]"#);
    let config = JobConfig::new(format!("{}/items?id=${{param}}", server.uri()), location)
        .with_pagination("page", 3);

    let mut sink = CollectSink::new();
    let stats = run_job(&config, &mut sink).await.unwrap();

    assert_eq!(sink.responses(), vec!["page 1"]);
    assert_eq!(stats.units_failed, 1);
    assert!(!stats.is_success());
}

#[tokio::test]
async fn test_json_lines_output() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("line one\nline two"))
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(
        HttpClient::new().unwrap(),
        format!("{}/items?id=${{param}}", server.uri()),
        None,
    );
    let mut sink = JsonLinesSink::new(Vec::new());
    Job::new(fetcher)
        .run(vec!["x".to_string()], &mut sink)
        .await
        .unwrap();

    let output = String::from_utf8(sink.into_inner().unwrap()).unwrap();
    let lines: Vec<_> = output.lines().collect();
    assert_eq!(lines.len(), 1);

    let record: OutputRecord = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(record.response, "line one\nline two");
}

#[tokio::test]
async fn test_sink_failure_is_reported() {
    struct FailingSink;

    #[async_trait::async_trait]
    impl RecordSink for FailingSink {
        async fn emit(&mut self, _record: OutputRecord) -> fanout_fetch::Result<()> {
            Err(Error::output("disk full"))
        }
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(
        HttpClient::new().unwrap(),
        format!("{}/items?id=${{param}}", server.uri()),
        PageSettings::new("page", 2),
    );
    let params: Vec<String> = (0..20).map(|i| format!("p{i}")).collect();
    let result = Job::new(fetcher)
        .with_concurrency(1)
        .run(params, &mut FailingSink)
        .await;

    assert!(matches!(
        result.unwrap_err(),
        Error::Output { ref message } if message == "disk full"
    ));

    // At most the request in flight when the sink failed follows the first one
    let requests = server.received_requests().await.unwrap().len();
    assert!(requests <= 2, "{requests} requests sent after the sink failed");
}
