//! Integration tests for the source-tracker client using wiremock

use mig_client::{ClientError, SourceClient};
use mig_core::ReferenceKind;

use std::time::Duration;

use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

fn client(uri: &str) -> SourceClient {
    SourceClient::new(
        uri,
        "source-key",
        7,
        Duration::from_secs(5),
        Duration::from_secs(10),
    )
    .unwrap()
}

fn issue_page(ids: std::ops::RangeInclusive<u64>) -> serde_json::Value {
    let issues: Vec<_> = ids
        .map(|id| json!({ "id": id, "subject": format!("Issue {}", id) }))
        .collect();
    json!({ "issues": issues })
}

// =========================================================================
// Issue Fetching
// =========================================================================

#[tokio::test]
async fn test_fetch_all_issues_sends_filter_and_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/issues.json"))
        .and(header("X-Redmine-API-Key", "source-key"))
        .and(query_param("fixed_version_id", "7"))
        .and(query_param("limit", "100"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(issue_page(1..=2)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let issues = client(&mock_server.uri()).fetch_all_issues().await.unwrap();

    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].id, 1);
    assert_eq!(issues[0].subject, "Issue 1");
}

#[tokio::test]
async fn test_fetch_all_issues_paginates_until_short_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/issues.json"))
        .and(query_param("offset", "0"))
        .and(query_param("include", "attachments,relations,children,journals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(issue_page(1..=100)))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/issues.json"))
        .and(query_param("offset", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(issue_page(101..=130)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let issues = client(&mock_server.uri()).fetch_all_issues().await.unwrap();

    assert_eq!(issues.len(), 130);
    // Source order is preserved across page boundaries
    assert_eq!(issues[0].id, 1);
    assert_eq!(issues[99].id, 100);
    assert_eq!(issues[100].id, 101);
    assert_eq!(issues[129].id, 130);
}

#[tokio::test]
async fn test_fetch_all_issues_full_final_page_costs_one_empty_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/issues.json"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(issue_page(1..=100)))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/issues.json"))
        .and(query_param("offset", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "issues": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let issues = client(&mock_server.uri()).fetch_all_issues().await.unwrap();

    assert_eq!(issues.len(), 100);
}

#[tokio::test]
async fn test_fetch_all_issues_propagates_page_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/issues.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server.uri())
        .fetch_all_issues()
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Status { status: 500, .. }));
}

#[tokio::test]
async fn test_trailing_slash_in_base_url_is_trimmed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/issues.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "issues": [] })))
        .mount(&mock_server)
        .await;

    let slashed = format!("{}/", mock_server.uri());
    let issues = client(&slashed).fetch_all_issues().await.unwrap();

    assert!(issues.is_empty());
}

// =========================================================================
// Reference Data
// =========================================================================

#[tokio::test]
async fn test_fetch_reference_caches_after_first_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trackers/4.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "tracker": { "id": 4, "name": "Ошибка" } })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client(&mock_server.uri());

    let first = client.fetch_reference(ReferenceKind::Tracker, 4).await;
    let second = client.fetch_reference(ReferenceKind::Tracker, 4).await;

    assert_eq!(first.name, "Ошибка");
    assert_eq!(second, first);
}

#[tokio::test]
async fn test_fetch_reference_missing_entity_yields_cached_placeholder() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/issue_statuses/9.json"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client(&mock_server.uri());

    let first = client.fetch_reference(ReferenceKind::Status, 9).await;
    // Second hit must come from the cache, not retry the fetch
    let second = client.fetch_reference(ReferenceKind::Status, 9).await;

    assert_eq!(first.name, "status #9");
    assert_eq!(second, first);
}

#[tokio::test]
async fn test_fetch_priority_filters_enumeration() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/enumerations/issue_priorities.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "issue_priorities": [
                { "id": 1, "name": "Низкий" },
                { "id": 2, "name": "Обычный", "is_default": true },
                { "id": 3, "name": "Высокий" }
            ]
        })))
        .mount(&mock_server)
        .await;

    let mut client = client(&mock_server.uri());

    let priority = client.fetch_reference(ReferenceKind::Priority, 3).await;

    assert_eq!(priority.name, "Высокий");
    assert!(!priority.is_default);
}

#[tokio::test]
async fn test_fetch_priority_absent_from_enumeration_yields_placeholder() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/enumerations/issue_priorities.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "issue_priorities": [{ "id": 1, "name": "Low" }]
        })))
        .mount(&mock_server)
        .await;

    let mut client = client(&mock_server.uri());

    let priority = client.fetch_reference(ReferenceKind::Priority, 42).await;

    assert_eq!(priority.name, "priority #42");
}

// =========================================================================
// Attachments and Journals
// =========================================================================

#[tokio::test]
async fn test_fetch_attachments_lists_issue_attachments() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/issues/11.json"))
        .and(query_param("include", "attachments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "issue": {
                "id": 11,
                "attachments": [{
                    "id": 77,
                    "filename": "design.pdf",
                    "content_type": "application/pdf",
                    "content_url": "http://old.example.com/attachments/download/77/design.pdf"
                }]
            }
        })))
        .mount(&mock_server)
        .await;

    let attachments = client(&mock_server.uri()).fetch_attachments(11).await;

    assert_eq!(attachments.len(), 1);
    assert_eq!(attachments[0].filename, "design.pdf");
    assert_eq!(
        attachments[0].content_type.as_deref(),
        Some("application/pdf")
    );
}

#[tokio::test]
async fn test_fetch_attachments_failure_yields_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/issues/11.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let attachments = client(&mock_server.uri()).fetch_attachments(11).await;

    assert!(attachments.is_empty());
}

#[tokio::test]
async fn test_fetch_journals_lists_entries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/issues/11.json"))
        .and(query_param("include", "journals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "issue": {
                "id": 11,
                "journals": [
                    {
                        "id": 301,
                        "user": { "id": 5, "name": "Anna Petrova" },
                        "notes": "Проверено.",
                        "created_on": "2024-03-01T14:30:00Z"
                    },
                    { "id": 302, "user": { "id": 6, "name": "Boris" } }
                ]
            }
        })))
        .mount(&mock_server)
        .await;

    let journals = client(&mock_server.uri()).fetch_journals(11).await;

    assert_eq!(journals.len(), 2);
    assert_eq!(journals[0].notes.as_deref(), Some("Проверено."));
    assert!(journals[1].notes.is_none());
}

#[tokio::test]
async fn test_download_attachment_returns_raw_bytes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/attachments/download/77/design.pdf"))
        .and(header("X-Redmine-API-Key", "source-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string("file-bytes"))
        .mount(&mock_server)
        .await;

    let url = format!("{}/attachments/download/77/design.pdf", mock_server.uri());
    let data = client(&mock_server.uri())
        .download_attachment(&url)
        .await
        .unwrap();

    assert_eq!(&data[..], b"file-bytes");
}

#[tokio::test]
async fn test_download_attachment_non_200_is_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/attachments/download/77/design.pdf"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let url = format!("{}/attachments/download/77/design.pdf", mock_server.uri());
    let err = client(&mock_server.uri())
        .download_attachment(&url)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Status { status: 403, .. }));
}
