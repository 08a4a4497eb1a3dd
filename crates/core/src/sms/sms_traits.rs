use async_trait::async_trait;

use crate::errors::Result;

/// Outbound SMS channel. Callers treat delivery as best-effort: errors are
/// logged at the call site and never fail the mutation that triggered them.
#[async_trait]
pub trait SmsChannelTrait: Send + Sync {
    async fn send(&self, phone_number: &str, message: &str) -> Result<()>;
}
