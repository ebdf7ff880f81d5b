//! Connector contract shared by the HTTP service and the local debug runner.
//!
//! A connector declares its tables through [`Connector::schema`] and produces
//! an ordered sequence of [`Operation`]s from [`Connector::update`]: zero or
//! more upserts followed by exactly one checkpoint.

pub mod configuration;
pub mod connector;
pub mod operation;
pub mod schema;
pub mod state;
pub mod warehouse;

pub use configuration::Configuration;
pub use connector::{handle, Connector, Operations, SyncResponse};
pub use operation::{Operation, Record};
pub use schema::{Column, ColumnType, TableSchema};
pub use state::State;
pub use warehouse::{debug, DebugReport, LocalWarehouse};
