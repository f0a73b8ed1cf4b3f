//! connector_avail
//!
//! Submission client for the Avail data-availability network. Each payload goes out as a signed
//! `DataAvailability.submit_data` extrinsic carrying the configured app id in its extrinsic params.

pub mod config;
pub mod signer;

use async_trait::async_trait;
use avail_subxt::api::runtime_types::avail_core::AppId;
use avail_subxt::api::runtime_types::bounded_collections::bounded_vec::BoundedVec;
use avail_subxt::avail::Client as AvailSubxtClient;
use avail_subxt::primitives::AvailExtrinsicParams;
use avail_subxt::{api as AvailApi, build_client};
use connectors_common::ConnectorError;
use log::{info, warn};
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tokio::sync::Mutex;

pub use config::AvailConfig;
pub use signer::{AvailPairSigner, Signer};

/// What the network returned for an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    pub tx_hash: String,
    pub app_id: u32,
    pub submitted_at: i64,
}

#[async_trait]
pub trait DataSubmitter: Send + Sync {
    async fn submit_data(&self, payload: &str) -> Result<SubmissionReceipt, ConnectorError>;
}

pub struct AvailClient {
    ws_url: String,
    app_id: u32,
    timeout: Duration,
    validate_codegen: bool,
    signer: Signer,
    pair_signer: AvailPairSigner,
    // connected on first submission, dropped again when the node asks for a restart
    online: Mutex<Option<AvailSubxtClient>>,
}

impl AvailClient {
    pub fn new(conf: &AvailConfig) -> Result<Self, ConnectorError> {
        if conf.timeout_secs == 0 {
            return Err(ConnectorError::InvalidInput("timeout must be at least 1s".to_string()));
        }
        let signer = Signer::from_phrase(&conf.seed)?;
        Ok(AvailClient {
            ws_url: conf.ws_url.clone(),
            app_id: conf.app_id,
            timeout: Duration::from_secs(conf.timeout_secs),
            validate_codegen: conf.validate_codegen,
            pair_signer: signer.pair_signer(),
            signer,
            online: Mutex::new(None),
        })
    }

    pub fn address(&self) -> String {
        self.signer.address()
    }

    async fn publish_data(&self, bytes: Vec<u8>) -> Result<String, ConnectorError> {
        let mut online = self.online.lock().await;
        if online.is_none() {
            info!("Connecting to {}", self.ws_url);
            let client = build_client(self.ws_url.as_str(), self.validate_codegen)
                .await
                .map_err(|e| connect_error(e.to_string()))?;
            *online = Some(client);
        }
        let client = online.as_ref().ok_or(ConnectorError::Closed)?;

        let data_transfer = AvailApi::tx().data_availability().submit_data(BoundedVec(bytes));
        let extrinsic_params = AvailExtrinsicParams::new_with_app_id(AppId(self.app_id));

        match client.tx().sign_and_submit(&data_transfer, &self.pair_signer, extrinsic_params).await {
            Ok(hash) => Ok(format!("{:?}", hash)),
            Err(e) => {
                let err = submit_error(e.to_string());
                if matches!(err, ConnectorError::Closed) {
                    warn!("avail connection lost, reconnecting on next submission");
                    *online = None;
                }
                Err(err)
            }
        }
    }
}

#[async_trait]
impl DataSubmitter for AvailClient {
    async fn submit_data(&self, payload: &str) -> Result<SubmissionReceipt, ConnectorError> {
        let tx_hash = match tokio::time::timeout(self.timeout, self.publish_data(payload.as_bytes().to_vec())).await {
            Ok(res) => res?,
            Err(_) => return Err(ConnectorError::Timeout(self.timeout.as_millis() as u64)),
        };
        info!("submitted {} bytes under app {}: {}", payload.len(), self.app_id, tx_hash);
        Ok(SubmissionReceipt {
            tx_hash,
            app_id: self.app_id,
            submitted_at: chrono::Utc::now().timestamp_millis(),
        })
    }
}

impl fmt::Debug for AvailClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvailClient")
            .field("ws_url", &self.ws_url)
            .field("app_id", &self.app_id)
            .field("timeout", &self.timeout)
            .field("signer", &self.signer)
            .finish()
    }
}

fn is_connection_lost(msg: &str) -> bool {
    msg.contains("restart required") || msg.contains("connection closed") || msg.contains("Connection closed")
}

fn connect_error(msg: String) -> ConnectorError {
    if is_connection_lost(&msg) {
        ConnectorError::Closed
    } else {
        ConnectorError::Network(msg)
    }
}

fn submit_error(msg: String) -> ConnectorError {
    if is_connection_lost(&msg) {
        ConnectorError::Closed
    } else {
        ConnectorError::Submission(msg)
    }
}

/// One-shot submission: builds a client for the given endpoint and account, then submits `data`.
pub async fn data_submit(
    timeout_secs: u64,
    api_url: &str,
    seed: &str,
    app_id: u32,
    data: &str,
) -> Result<SubmissionReceipt, ConnectorError> {
    let conf = AvailConfig {
        ws_url: api_url.to_string(),
        seed: seed.to_string(),
        app_id,
        timeout_secs,
        ..AvailConfig::default()
    };
    AvailClient::new(&conf)?.submit_data(data).await
}
