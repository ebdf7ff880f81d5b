pub mod env;
pub mod tracing_init;

pub use env::{AppConfig, BuildOpsEnv, DEFAULT_BUILDOPS_HOST};
pub use tracing_init::init_tracing;
