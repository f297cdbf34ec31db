pub mod accuracy;

pub use accuracy::{evaluate_events, signal_accuracy, EventOutcome, SignalAccuracy, DEFAULT_LOOKAHEAD};
