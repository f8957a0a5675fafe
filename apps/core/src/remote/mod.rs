//! Optional remote model, used in front of the local detector.

pub mod gemini;
pub mod hybrid;
pub mod traits;

pub use gemini::GeminiClassifier;
pub use hybrid::{HybridAnalyzer, LOCAL_MODEL};
pub use traits::{AnalysisMode, RemoteClassifier, RemoteVerdict, WebSource};
