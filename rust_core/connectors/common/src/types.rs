use serde::{Deserialize, Serialize};

use crate::errors::ConnectorError;

/// Sell and buy order lists for a single trading pair, as published to the DA layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub sell_orders: Vec<i64>,
    pub buy_orders: Vec<i64>,
    pub pair: String,
}

impl OrderSnapshot {
    /// Compact JSON text handed to the submission client.
    pub fn to_payload(&self) -> Result<String, ConnectorError> {
        Ok(serde_json::to_string(self)?)
    }
}
