use std::time::Duration;

use async_trait::async_trait;

use super::domain::OrderDraft;

/// Outbound port for booking confirmation. The production implementation
/// would call the payment/booking backend; the simulated one stands in for
/// it with a fixed delay so caller contracts stay unchanged when the real
/// call lands.
#[async_trait]
pub trait ConfirmationGateway: Send + Sync {
    async fn confirm(&self, draft: &OrderDraft) -> Result<(), GatewayError>;
}

/// Confirmation dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("confirmation cancelled after waiting {0:?}")]
    Cancelled(Duration),
    #[error("confirmation transport unavailable: {0}")]
    Transport(String),
}

/// Fixed-delay confirmation used in development and demos.
#[derive(Debug, Clone)]
pub struct SimulatedConfirmation {
    delay: Duration,
}

impl SimulatedConfirmation {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Zero-delay variant for tests and the CLI demo.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl Default for SimulatedConfirmation {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500))
    }
}

#[async_trait]
impl ConfirmationGateway for SimulatedConfirmation {
    async fn confirm(&self, _draft: &OrderDraft) -> Result<(), GatewayError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(())
    }
}
