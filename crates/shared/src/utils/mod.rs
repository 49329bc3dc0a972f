mod logs;
mod metadata;
mod metrics;
mod otel;

pub use self::logs::init_logger;
pub use self::metadata::KafkaHeaderExtractor;
pub use self::metrics::{Method, Metrics, Status};
pub use self::otel::{Telemetry, TracingContext};
