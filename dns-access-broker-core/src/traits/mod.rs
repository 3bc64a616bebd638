//! Trait definition module

mod retry_sleeper;

pub use retry_sleeper::{RetrySleeper, TokioSleeper};
