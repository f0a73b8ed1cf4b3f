use serde::Deserialize;
use std::fmt;

pub const DEFAULT_AVAIL_WS: &str = "wss://turing-rpc.avail.so/ws";
pub const DEFAULT_APP_ID: u32 = 0;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_AVAIL_VALIDATE_CODEGEN: bool = false;

#[derive(Clone, PartialEq, Deserialize)]
pub struct AvailConfig {
    #[serde(default = "default_ws")]
    pub ws_url: String,
    /// Seed phrase or secret URI. No default: it must come from the environment or a config file.
    #[serde(default)]
    pub seed: String,
    #[serde(default = "default_app_id")]
    pub app_id: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_validate_codegen")]
    pub validate_codegen: bool,
}

fn default_ws() -> String {
    DEFAULT_AVAIL_WS.to_string()
}

fn default_app_id() -> u32 {
    DEFAULT_APP_ID
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_validate_codegen() -> bool {
    DEFAULT_AVAIL_VALIDATE_CODEGEN
}

impl Default for AvailConfig {
    fn default() -> Self {
        Self {
            ws_url: default_ws(),
            seed: String::new(),
            app_id: default_app_id(),
            timeout_secs: default_timeout_secs(),
            validate_codegen: default_validate_codegen(),
        }
    }
}

impl fmt::Debug for AvailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seed = if self.seed.is_empty() { "<unset>" } else { "<redacted>" };
        f.debug_struct("AvailConfig")
            .field("ws_url", &self.ws_url)
            .field("seed", &seed)
            .field("app_id", &self.app_id)
            .field("timeout_secs", &self.timeout_secs)
            .field("validate_codegen", &self.validate_codegen)
            .finish()
    }
}
