use super::customer_payment_source;
use crate::charge::handler::ChargeHandler;
use crate::charge::payload::{ChargePayload, NormalizedPaymentMethod, PaymentMethodState};
use crate::charge::request::PaymentMethod;
use crate::error::MalgaError;
use crate::service::BoxFuture;

/// Normalizes boleto charges.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoletoHandler;

impl ChargeHandler for BoletoHandler {
    fn name(&self) -> &'static str {
        "boleto"
    }

    fn handle(
        &self,
        mut payload: ChargePayload,
    ) -> BoxFuture<'_, Result<ChargePayload, MalgaError>> {
        let boleto = match payload.payment_method {
            PaymentMethodState::Pending(PaymentMethod::Boleto(boleto)) => boleto,
            other => {
                payload.payment_method = other;
                return Box::pin(std::future::ready(Ok(payload)));
            }
        };
        payload.payment_method =
            PaymentMethodState::Normalized(NormalizedPaymentMethod::Boleto(boleto));
        payload.payment_source = Some(customer_payment_source(&mut payload));
        Box::pin(std::future::ready(Ok(payload)))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::charge::request::ChargeCreateRequest;

    #[tokio::test]
    async fn test_boleto_keeps_interest_and_fine() {
        let payload: ChargePayload = serde_json::from_value::<ChargeCreateRequest>(json!({
            "merchantId": "m-1",
            "amount": 100,
            "customerId": "c-1",
            "paymentMethod": {
                "type": "boleto",
                "expiresDate": "2030-12-31",
                "instructions": "Pay before due date",
                "interest": { "days": 1, "amount": 100 },
                "fine": { "days": 2, "percentage": 2.5 }
            }
        }))
        .unwrap()
        .into();

        let out = BoletoHandler.handle(payload).await.unwrap();
        let value = serde_json::to_value(&out).unwrap();
        assert_eq!(
            value["paymentMethod"],
            json!({
                "paymentType": "boleto",
                "expiresDate": "2030-12-31",
                "instructions": "Pay before due date",
                "interest": { "days": 1, "amount": 100 },
                "fine": { "days": 2, "percentage": 2.5 }
            })
        );
        assert_eq!(value["paymentSource"]["customerId"], "c-1");
    }
}
