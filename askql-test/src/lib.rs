//! Test utilities: an in-process HTTP client and doubles for the language
//! model and the database.

mod app;
mod doubles;

pub use app::{TestApp, TestRequest, TestResponse};
pub use doubles::{ModelCall, RecordingExecutor, StubModel};
