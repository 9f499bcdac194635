//! Infrastructure layer - HTTP delivery, the monitored provider and process plumbing

pub mod delivery;
pub mod llm;
pub mod logging;
pub mod monitor;
pub mod observability;
