use super::customer_payment_source;
use crate::charge::handler::ChargeHandler;
use crate::charge::payload::{ChargePayload, NormalizedPaymentMethod, PaymentMethodState};
use crate::charge::request::PaymentMethod;
use crate::error::MalgaError;
use crate::service::BoxFuture;

/// Normalizes pix charges. The customer becomes the payment source.
#[derive(Debug, Clone, Copy, Default)]
pub struct PixHandler;

impl ChargeHandler for PixHandler {
    fn name(&self) -> &'static str {
        "pix"
    }

    fn handle(
        &self,
        mut payload: ChargePayload,
    ) -> BoxFuture<'_, Result<ChargePayload, MalgaError>> {
        let pix = match payload.payment_method {
            PaymentMethodState::Pending(PaymentMethod::Pix(pix)) => pix,
            other => {
                payload.payment_method = other;
                return Box::pin(std::future::ready(Ok(payload)));
            }
        };
        payload.payment_method =
            PaymentMethodState::Normalized(NormalizedPaymentMethod::Pix(pix));
        payload.payment_source = Some(customer_payment_source(&mut payload));
        Box::pin(std::future::ready(Ok(payload)))
    }
}
