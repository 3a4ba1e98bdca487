//! Meter AI Common Library
//!
//! CLIとWeb(WASM)で共有される型とフローロジック

pub mod error;
pub mod parser;
pub mod progress;
pub mod session;
pub mod types;

pub use error::{Error, Result};
pub use parser::parse_analysis_response;
pub use progress::AnalysisProgress;
pub use session::{ImageInfo, MeterSession, Phase, RequestToken, Verification};
pub use types::{AnalysisResponse, ReadingValue, SubmitPayload};
