//! Swipe feed engine: job source IO, record decoding, timers and persistence.
mod decode;
mod engine;
mod fetch;
mod persist;
mod record;
mod scheduler;
mod types;

pub use decode::{decode_field, decode_records, format_salary, Decoded, FallbackReason};
pub use engine::EngineHandle;
pub use fetch::{FetchSettings, JobSource, ReqwestJobSource, StaticJobSource, DEFAULT_API_URL};
pub use persist::{ensure_state_dir, AtomicFileWriter, PersistError};
pub use record::{ApiFullDescription, ApiJob, ApiSalary};
pub use scheduler::Scheduler;
pub use types::{DecodeReport, EngineEvent, FailureKind, FetchError, FetchedJobs, FieldFallback};
