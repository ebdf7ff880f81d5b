//! BuildOps customers source: settings validation, REST client and the
//! connector that turns fetched customers into operations.

pub mod client;
pub mod models;
pub mod settings;
pub mod sync;

pub use client::{BuildOpsClient, BuildOpsClientError};
pub use settings::{validate_configuration, BuildOpsSettings};
pub use sync::{customers_schema, BuildOpsConnector, SyncOperations, CUSTOMERS_TABLE};
