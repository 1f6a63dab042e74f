use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde_json::{json, Value};

use waterwatch_ai::{ConfidenceModel, FixedRandom, SatelliteImage, SatelliteSource, SimplifiedAnalyzer, WeatherSnapshot};
use waterwatch_api::app::{build_app_with, AppServices};
use waterwatch_core::Coordinates;
use waterwatch_infra::gateway::{ImageryGateway, WeatherGateway};
use waterwatch_infra::verification::SimulationDelay;
use waterwatch_infra::{InMemoryReportStore, InMemoryVerificationHistory, VerificationOrchestrator};

struct StubImagery {
    available: bool,
}

#[async_trait]
impl ImageryGateway for StubImagery {
    async fn fetch_image(&self, coordinates: Coordinates, _date: Option<NaiveDate>) -> Option<SatelliteImage> {
        self.available.then(|| SatelliteImage {
            bytes: vec![0; 12],
            source: SatelliteSource::Sentinel,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            coordinates,
        })
    }
}

struct NoWeather;

#[async_trait]
impl WeatherGateway for NoWeather {
    async fn current(&self, _coordinates: Coordinates) -> Option<WeatherSnapshot> {
        None
    }
}

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Same router as prod, stubbed gateways, pinned randomness, ephemeral port.
    async fn spawn(imagery_available: bool) -> Self {
        let model = ConfidenceModel::new(Arc::new(FixedRandom(0.5)));
        let verifier = VerificationOrchestrator::new(
            Arc::new(StubImagery {
                available: imagery_available,
            }),
            Arc::new(NoWeather),
            Arc::new(SimplifiedAnalyzer::new(model.clone())),
            Arc::new(InMemoryVerificationHistory::new()),
        )
        .with_model(model)
        .with_delay(SimulationDelay::none());
        let services = AppServices::new(Arc::new(InMemoryReportStore::new()), verifier);

        let app = build_app_with(Arc::new(services));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            client: reqwest::Client::new(),
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn submit(&self, pollution_type: &str) -> String {
        let res = self
            .client
            .post(self.url("/api/reports"))
            .json(&json!({
                "photo_url": "https://cdn.example/reports/1.jpg",
                "lat": 12.97,
                "lng": 77.59,
                "manual_location": "Ulsoor Lake",
                "pollution_type": pollution_type,
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["message"], "Report Submitted. Awaiting AI Verification.");
        body["reportId"].as_str().unwrap().to_string()
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let res = self.client.get(self.url(path)).send().await.unwrap();
        let status = res.status();
        (status, res.json().await.unwrap())
    }

    async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let res = self.client.post(self.url(path)).json(&body).send().await.unwrap();
        let status = res.status();
        (status, res.json().await.unwrap())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn health_reports_ok() {
    let srv = TestServer::spawn(true).await;
    let (status, body) = srv.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn submitted_report_is_pending_and_listed() {
    let srv = TestServer::spawn(true).await;
    let first = srv.submit("oil").await;
    let second = srv.submit("foam").await;

    let (status, body) = srv.get(&format!("/api/reports/{first}/status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reportId"], first.as_str());
    assert_eq!(body["status"], "Pending");
    assert!(body["ai_confidence"].is_null());

    let (status, body) = srv.get("/api/reports").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["id"], second.as_str());
    assert_eq!(rows[0]["pollution_type"], "foam");
    assert_eq!(rows[1]["manual_location"], "Ulsoor Lake");
}

#[tokio::test]
async fn malformed_submissions_are_rejected() {
    let srv = TestServer::spawn(true).await;

    let (status, body) = srv
        .post("/api/reports", json!({ "photo_url": "https://x/y.jpg", "lat": 1.0 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_body");

    let (status, body) = srv
        .post(
            "/api/reports",
            json!({ "photo_url": "https://x/y.jpg", "lat": 91.0, "lng": 0.0, "pollution_type": "oil" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn verify_updates_report_and_history() {
    let srv = TestServer::spawn(true).await;
    let id = srv.submit("oil").await;

    let (status, body) = srv.post(&format!("/api/reports/{id}/verify"), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Verified");
    assert_eq!(body["verified"], true);
    assert_eq!(body["message"], "Report verified by AI with 75.0% confidence");
    assert_eq!(body["analysis"]["method"], "simplified_analysis");
    assert_eq!(body["analysis"]["satelliteSource"], "sentinel");
    assert_eq!(body["analysis"]["pixelCount"], 65536);

    let (_, row) = srv.get(&format!("/api/reports/{id}/status")).await;
    assert_eq!(row["status"], "Verified");
    assert!((row["ai_confidence"].as_f64().unwrap() - 0.75).abs() < 1e-9);

    let (status, cached) = srv.get(&format!("/api/reports/{id}/verification")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cached["reportId"], id.as_str());
    assert_eq!(cached["status"], "Verified");
}

#[tokio::test]
async fn missing_imagery_rejects_at_floor() {
    let srv = TestServer::spawn(false).await;
    let id = srv.submit("turbidity").await;

    let (status, body) = srv.post(&format!("/api/reports/{id}/verify"), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Rejected");
    assert_eq!(body["reason"], "No satellite imagery available");
    assert_eq!(body["message"], "Report rejected by AI with 10.0% confidence");

    let (_, row) = srv.get(&format!("/api/reports/{id}/status")).await;
    assert_eq!(row["status"], "Rejected");
}

#[tokio::test]
async fn simulate_verify_works_without_gateways() {
    let srv = TestServer::spawn(false).await;
    let id = srv.submit("plastic").await;

    let (status, body) = srv.post(&format!("/api/reports/{id}/simulate-verify"), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Report verified by AI simulation with 65.0% confidence");
    assert_eq!(body["analysis"]["method"], "simulated");
    assert_eq!(body["analysis"]["satelliteSource"], "simulated");
    assert!(body["analysis"]["weather"]["visibility"].as_f64().unwrap() >= 5000.0);
}

#[tokio::test]
async fn batch_verify_skips_unknown_reports() {
    let srv = TestServer::spawn(true).await;
    let a = srv.submit("oil").await;
    let b = srv.submit("foam").await;
    let unknown = "0190a6f4-0000-7000-8000-000000000000";

    let (status, body) = srv
        .post("/api/reports/batch-verify", json!({ "reportIds": [a, b, unknown] }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Batch verification completed for 2 reports");
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);

    let (_, stats) = srv.get("/api/ai/stats").await;
    assert_eq!(stats["totalReports"], 2);
    assert_eq!(stats["verifiedReports"], 1);
    assert_eq!(stats["rejectedReports"], 1);
    assert_eq!(stats["verificationRate"], 50.0);
}

#[tokio::test]
async fn bad_ids_map_to_400_and_404() {
    let srv = TestServer::spawn(true).await;

    let (status, body) = srv.get("/api/reports/not-a-uuid/status").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_id");

    let (status, body) = srv
        .post("/api/reports/0190a6f4-0000-7000-8000-000000000000/verify", json!({}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let (status, _) = srv.post("/api/reports/batch-verify", json!({ "ids": [] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn stats_start_empty() {
    let srv = TestServer::spawn(true).await;
    let (status, body) = srv.get("/api/ai/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "totalReports": 0,
            "verifiedReports": 0,
            "rejectedReports": 0,
            "verificationRate": 0.0,
            "averageConfidence": 0.0,
        })
    );
}
