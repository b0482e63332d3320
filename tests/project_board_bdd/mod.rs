//! Support modules for the project board BDD tests.

#[path = "../support/runtime.rs"]
pub(crate) mod runtime;
pub(crate) mod state;

pub(crate) use state::{ProjectBoardState, ensure_runtime_and_server};
