use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use connector_avail::DataSubmitter;
use log::{error, info};
use std::sync::Arc;
use tokio::net::TcpListener;

pub const SUBMIT_PATH: &str = "/submit_data";

#[derive(Clone)]
pub struct AppState {
    pub submitter: Arc<dyn DataSubmitter>,
    pub payload: Arc<str>,
}

impl AppState {
    pub fn new(submitter: Arc<dyn DataSubmitter>, payload: impl Into<Arc<str>>) -> Self {
        AppState { submitter, payload: payload.into() }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(SUBMIT_PATH, any(submit_data))
        .with_state(state)
}

pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, router(state)).await
}

// Method and body are ignored: every request submits the startup payload once.
async fn submit_data(State(state): State<AppState>) -> Response {
    match state.submitter.submit_data(&state.payload).await {
        Ok(receipt) => {
            info!("Data submitted to Avail: {} (app {})", receipt.tx_hash, receipt.app_id);
            StatusCode::OK.into_response()
        }
        Err(e) => {
            error!("data submission failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::spawn_status_loop;
    use async_trait::async_trait;
    use connector_avail::SubmissionReceipt;
    use connectors_common::{ConnectorError, OrderSnapshot};
    use std::sync::Mutex;
    use std::time::Duration;

    const PAYLOAD: &str = r#"{"sell_orders":[],"buy_orders":[],"pair":""}"#;

    #[derive(Default)]
    struct RecordingSubmitter {
        calls: Mutex<Vec<String>>,
        fail: bool,
    }

    impl RecordingSubmitter {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DataSubmitter for RecordingSubmitter {
        async fn submit_data(&self, payload: &str) -> Result<SubmissionReceipt, ConnectorError> {
            self.calls.lock().unwrap().push(payload.to_string());
            if self.fail {
                return Err(ConnectorError::Submission("1010: Invalid Transaction".to_string()));
            }
            Ok(SubmissionReceipt { tx_hash: "0x01".to_string(), app_id: 0, submitted_at: 0 })
        }
    }

    async fn spawn_app(submitter: Arc<RecordingSubmitter>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve(listener, AppState::new(submitter, PAYLOAD)));
        format!("http://{}", addr)
    }

    #[test]
    fn test_startup_payload_is_empty_snapshot() {
        assert_eq!(OrderSnapshot::default().to_payload().unwrap(), PAYLOAD);
    }

    #[tokio::test]
    async fn test_get_submits_once() {
        let submitter = Arc::new(RecordingSubmitter::default());
        let base = spawn_app(submitter.clone()).await;

        let resp = reqwest::get(format!("{}{}", base, SUBMIT_PATH)).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        assert!(resp.text().await.unwrap().is_empty());
        assert_eq!(submitter.calls(), vec![PAYLOAD.to_string()]);
    }

    #[tokio::test]
    async fn test_method_and_body_ignored() {
        let submitter = Arc::new(RecordingSubmitter::default());
        let base = spawn_app(submitter.clone()).await;
        let client = reqwest::Client::new();
        let url = format!("{}{}", base, SUBMIT_PATH);

        for method in [reqwest::Method::POST, reqwest::Method::PUT, reqwest::Method::DELETE] {
            let resp = client
                .request(method, &url)
                .body(r#"{"sell_orders":[1,2,3],"buy_orders":[4],"pair":"BTC/USDT"}"#)
                .send()
                .await
                .unwrap();
            assert_eq!(resp.status(), reqwest::StatusCode::OK);
        }
        assert_eq!(submitter.calls(), vec![PAYLOAD.to_string(); 3]);
    }

    #[tokio::test]
    async fn test_submission_failure_is_500() {
        let submitter = Arc::new(RecordingSubmitter { fail: true, ..Default::default() });
        let base = spawn_app(submitter.clone()).await;

        let resp = reqwest::get(format!("{}{}", base, SUBMIT_PATH)).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("Invalid Transaction"));
        assert_eq!(submitter.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_other_paths_do_not_submit() {
        let submitter = Arc::new(RecordingSubmitter::default());
        let base = spawn_app(submitter.clone()).await;

        let resp = reqwest::get(format!("{}/submit", base)).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
        assert!(submitter.calls().is_empty());
    }

    #[tokio::test]
    async fn test_status_loop_does_not_block_requests() {
        let status = spawn_status_loop(Duration::from_millis(1));
        let submitter = Arc::new(RecordingSubmitter::default());
        let base = spawn_app(submitter.clone()).await;
        let url = format!("{}{}", base, SUBMIT_PATH);

        let requests = async {
            for _ in 0..5 {
                let resp = reqwest::get(&url).await.unwrap();
                assert_eq!(resp.status(), reqwest::StatusCode::OK);
            }
        };
        tokio::time::timeout(Duration::from_secs(5), requests).await.unwrap();
        assert_eq!(submitter.calls().len(), 5);
        assert!(!status.is_finished());
        status.abort();
    }

    #[tokio::test]
    async fn test_refused_before_bind() {
        let reserved = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = reserved.local_addr().unwrap();
        drop(reserved);
        let url = format!("http://{}{}", addr, SUBMIT_PATH);

        let err = reqwest::get(&url).await.unwrap_err();
        assert!(err.is_connect());

        let submitter = Arc::new(RecordingSubmitter::default());
        let listener = TcpListener::bind(addr).await.unwrap();
        tokio::spawn(serve(listener, AppState::new(submitter.clone(), PAYLOAD)));
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        assert_eq!(submitter.calls().len(), 1);
    }
}
