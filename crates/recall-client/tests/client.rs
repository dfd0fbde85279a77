//! Client tests against a mock recall service.

use recall_client::{ClientError, RecallClient};
use recall_core::PracticeDate;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn signed_in(server: &MockServer) -> RecallClient {
    RecallClient::new(server.uri()).unwrap().with_token("tok-123")
}

#[tokio::test]
async fn login_returns_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({ "email": "ada@example.com", "password": "secret-pass" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok-123",
            "user": { "email": "ada@example.com" }
        })))
        .mount(&server)
        .await;

    let client = RecallClient::new(server.uri()).unwrap();
    let session = client.login("ada@example.com", "secret-pass").await.unwrap();

    assert_eq!(session.token, "tok-123");
    assert_eq!(session.user.email, "ada@example.com");
    assert_eq!(session.user.user_id, None);
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "Invalid email or password",
            "code": "invalid_credentials"
        })))
        .mount(&server)
        .await;

    let client = RecallClient::new(server.uri()).unwrap();
    let err = client.login("ada@example.com", "nope").await.unwrap_err();

    assert!(matches!(err, ClientError::Unauthorized(msg) if msg == "Invalid email or password"));
}

#[tokio::test]
async fn register_conflict_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/register"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": "User already exists",
            "code": "conflict"
        })))
        .mount(&server)
        .await;

    let client = RecallClient::new(server.uri()).unwrap();
    let err = client.register("ada@example.com", "secret-pass").await.unwrap_err();

    match err {
        ClientError::Api { code, message, status } => {
            assert_eq!(code, "conflict");
            assert_eq!(message, "User already exists");
            assert_eq!(status, 409);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn rejected_token_verifies_as_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/verify"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "valid": false,
            "error": "Invalid or expired token"
        })))
        .mount(&server)
        .await;

    let client = RecallClient::new(server.uri()).unwrap();
    let status = client.verify("stale").await.unwrap();

    assert!(!status.valid);
    assert_eq!(status.error.as_deref(), Some("Invalid or expired token"));
}

#[tokio::test]
async fn record_score_sends_bearer_and_date() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scores"))
        .and(header("authorization", "Bearer tok-123"))
        .and(body_json(json!({ "score": 12.5, "date": "2024-03-05" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "updated": true })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in(&server).await;
    let update = client
        .record_score(12.5, Some("2024-03-05".parse().unwrap()))
        .await
        .unwrap();

    assert!(update.success);
    assert!(update.updated);
}

#[tokio::test]
async fn missing_daily_record_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/scores/daily/2024-03-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
        .mount(&server)
        .await;

    let client = signed_in(&server).await;
    let record = client.daily("2024-03-01".parse().unwrap()).await.unwrap();

    assert!(record.is_none());
}

#[tokio::test]
async fn heatmap_passes_range_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/scores/heatmap"))
        .and(query_param("from", "2024-01-31"))
        .and(query_param("to", "2024-02-10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "scores": { "2024-02-02": 11.0 },
            "from": "2024-01-31",
            "to": "2024-02-10"
        })))
        .mount(&server)
        .await;

    let client = signed_in(&server).await;
    let heatmap = client
        .heatmap("2024-01-31".parse().unwrap(), "2024-02-10".parse().unwrap())
        .await
        .unwrap();

    assert_eq!(heatmap.scores.len(), 1);
    let day: PracticeDate = "2024-02-02".parse().unwrap();
    assert_eq!(heatmap.scores.get(&day), Some(&11.0));
}

#[tokio::test]
async fn monthly_summary_decodes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/scores/monthly/2024-03"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "month": "2024-03",
            "practiceDays": 2,
            "bestScore": 15.0,
            "averageScore": 12.5,
            "dailyScores": [
                { "date": "2024-03-01", "highestScore": 10.0, "updatedAt": 1_709_251_200_000_i64 },
                { "date": "2024-03-02", "highestScore": 15.0, "updatedAt": 1_709_337_600_000_i64 }
            ]
        })))
        .mount(&server)
        .await;

    let client = signed_in(&server).await;
    let summary = client.monthly("2024-03".parse().unwrap()).await.unwrap();

    assert_eq!(summary.practice_days, 2);
    assert!((summary.average_score - 12.5).abs() < f64::EPSILON);
    assert_eq!(summary.daily_scores.len(), 2);
}

#[tokio::test]
async fn recent_unwraps_days() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/scores/recent"))
        .and(query_param("days", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "days": [
                { "date": "2024-03-15", "score": 6.0 },
                { "date": "2024-03-14", "score": null }
            ]
        })))
        .mount(&server)
        .await;

    let client = signed_in(&server).await;
    let days = client.recent(Some(2), None).await.unwrap();

    assert_eq!(days.len(), 2);
    assert_eq!(days[0].score, Some(6.0));
    assert_eq!(days[1].score, None);
}

#[tokio::test]
async fn score_call_without_token_fails_locally() {
    let server = MockServer::start().await;

    let client = RecallClient::new(server.uri()).unwrap();
    let err = client.record_score(1.0, None).await.unwrap_err();

    assert!(matches!(err, ClientError::Configuration(_)));
}

#[tokio::test]
async fn malformed_success_body_is_serialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/scores/monthly/2024-03"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let client = signed_in(&server).await;
    let err = client.monthly("2024-03".parse().unwrap()).await.unwrap_err();

    assert!(matches!(err, ClientError::Serialization(_)));
}

#[tokio::test]
async fn graded_attempt_is_recorded_as_percentage() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scores"))
        .and(body_json(json!({ "score": 75.0 })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "updated": true })),
        )
        .mount(&server)
        .await;

    let words = [vec!["apple", "river"], vec!["stone", "cloud"]];
    let answers = [vec!["APPLE", "river"], vec!["stone"]];
    let grade = recall_client::grade_recall(&words, &answers);
    assert_eq!(grade.percentage, 75);
    assert_eq!(grade.mistakes[0].user_answer, "(empty)");

    let client = signed_in(&server).await;
    let update = client
        .record_score(f64::from(grade.percentage), None)
        .await
        .unwrap();

    assert!(update.updated);
}
