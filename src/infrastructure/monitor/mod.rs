//! Completion monitoring

mod monitored;

pub use monitored::{wrap, MonitorOptions, MonitoredProvider};
