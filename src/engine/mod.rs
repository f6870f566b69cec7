pub mod qaif;
pub mod tracer;

pub use qaif::Qaif;
pub use qaif::QaifArgs;
pub use qaif::TraceOutcome;
pub use tracer::TraceOptions;
pub use tracer::TransferTracer;
pub use tracer::VisitedSet;
