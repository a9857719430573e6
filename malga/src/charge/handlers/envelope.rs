use crate::charge::handler::ChargeHandler;
use crate::charge::payload::ChargePayload;
use crate::error::MalgaError;
use crate::service::BoxFuture;

/// First step of the chain: renames `threeDSecure` to `threeDSecure2`, the
/// field name the charge endpoint reads.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvelopeHandler;

impl ChargeHandler for EnvelopeHandler {
    fn name(&self) -> &'static str {
        "charge"
    }

    fn handle(
        &self,
        mut payload: ChargePayload,
    ) -> BoxFuture<'_, Result<ChargePayload, MalgaError>> {
        if let Some(three_d_secure) = payload.three_d_secure.take() {
            payload.three_d_secure2 = Some(three_d_secure);
        }
        Box::pin(std::future::ready(Ok(payload)))
    }
}
