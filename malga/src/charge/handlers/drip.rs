use super::customer_payment_source;
use crate::charge::handler::ChargeHandler;
use crate::charge::payload::{ChargePayload, NormalizedPaymentMethod, PaymentMethodState};
use crate::charge::request::PaymentMethod;
use crate::error::MalgaError;
use crate::service::BoxFuture;

/// Normalizes drip (installment pix) charges.
#[derive(Debug, Clone, Copy, Default)]
pub struct DripHandler;

impl ChargeHandler for DripHandler {
    fn name(&self) -> &'static str {
        "drip"
    }

    fn handle(
        &self,
        mut payload: ChargePayload,
    ) -> BoxFuture<'_, Result<ChargePayload, MalgaError>> {
        let drip = match payload.payment_method {
            PaymentMethodState::Pending(PaymentMethod::Drip(drip)) => drip,
            other => {
                payload.payment_method = other;
                return Box::pin(std::future::ready(Ok(payload)));
            }
        };
        payload.payment_method =
            PaymentMethodState::Normalized(NormalizedPaymentMethod::Drip(drip));
        payload.payment_source = Some(customer_payment_source(&mut payload));
        Box::pin(std::future::ready(Ok(payload)))
    }
}
