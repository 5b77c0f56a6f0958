pub mod tracing;

pub use self::tracing::{TracingConfig, TracingGuard, init_tracing, init_tracing_with_writer};
