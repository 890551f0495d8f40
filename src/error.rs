//! Error types for configuration and engine runs.

use thiserror::Error;

/// Invalid configuration, rejected before any worker is spawned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("worker count must be at least 1")]
    ZeroWorkers,
    #[error("dataset size 10^{exponent} is too large to allocate")]
    ExponentTooLarge { exponent: u32 },
    #[error("sweep has no {0} to run")]
    EmptySweep(&'static str),
}

/// Failure of a single aggregation run.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
    #[error("worker panicked: {0}")]
    WorkerPanicked(String),
}

impl EngineError {
    /// Render a caught panic payload into an error.
    pub(crate) fn from_panic(payload: &(dyn std::any::Any + Send)) -> Self {
        let msg = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_string());
        Self::WorkerPanicked(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;

    fn message(payload: Box<dyn Any + Send>) -> String {
        match EngineError::from_panic(payload.as_ref()) {
            EngineError::WorkerPanicked(msg) => msg,
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_from_panic_str_payload() {
        assert_eq!(message(Box::new("range out of bounds")), "range out of bounds");
    }

    #[test]
    fn test_from_panic_string_payload() {
        assert_eq!(message(Box::new(String::from("index 5"))), "index 5");
    }

    #[test]
    fn test_from_panic_other_payload() {
        assert_eq!(message(Box::new(42u32)), "unknown panic payload");
    }

    #[test]
    fn test_from_caught_panic() {
        let payload = std::panic::catch_unwind(|| -> u8 { panic!("worker {} died", 3) }).unwrap_err();
        assert_eq!(message(payload), "worker 3 died");
    }
}
