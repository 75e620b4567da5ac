//! # askql: ask a SQL table questions in plain language
//!
//! One page, one pipeline:
//!
//! ```text
//! question ─▶ PromptBuilder ─▶ LanguageModel ─▶ normalize + SELECT/FROM check
//!          ─▶ QueryExecutor (fresh connection) ─▶ QueryOutcome ─▶ HTML / JSON
//! ```
//!
//! | Route | Description |
//! |-------|-------------|
//! | `GET /` | Empty form |
//! | `POST /` | Form field `question`; renders the statement and its result |
//! | `POST /api/query` | `{"question": ...}` → `{"state", "sql", "result", "message"}` |
//! | `GET /health` | `OK` |

pub mod controllers;
pub mod pipeline;
pub mod server;
pub mod state;
pub mod views;

pub use pipeline::{QueryPipeline, RequestState, Resolution};
pub use server::{router, serve, ServerConfig};
pub use state::AppState;
