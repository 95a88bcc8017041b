use log::{error, info, warn};

/// Sink for the per-source outcomes of an aggregation pass
pub trait EventReporter: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards events to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

const TARGET: &str = "best_recipe::aggregator";

impl EventReporter for LogReporter {
    fn info(&self, message: &str) {
        info!(target: TARGET, "{}", message);
    }

    fn warn(&self, message: &str) {
        warn!(target: TARGET, "{}", message);
    }

    fn error(&self, message: &str) {
        error!(target: TARGET, "{}", message);
    }
}
