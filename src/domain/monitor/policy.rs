use serde::Deserialize;

/// What a failed telemetry delivery does to the monitored call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryPolicy {
    /// Log the failure and hand the completion back to the caller
    #[default]
    BestEffort,
    /// Fail the call with the delivery error even though the completion succeeded
    Strict,
}

impl DeliveryPolicy {
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Strict)
    }
}
