pub mod errors;
pub mod types;

pub use errors::ConnectorError;
pub use types::OrderSnapshot;
