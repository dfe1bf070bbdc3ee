pub mod broker;
pub mod error;
pub mod http;
pub mod rate_limit;
pub mod transcriber;

pub mod test_support;

pub use broker::{OpenAlgoClient, OrderExecutor};
pub use error::ClientError;
pub use http::build_http_client;
pub use rate_limit::SlidingWindowLimiter;
pub use transcriber::{AudioClip, Transcriber, WhisperApiTranscriber};
