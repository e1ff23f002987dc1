pub mod telemetry;

pub use tracing::{debug, error, info, instrument, trace, warn, Level};
