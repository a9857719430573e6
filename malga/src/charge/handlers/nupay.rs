use super::customer_payment_source;
use crate::charge::handler::ChargeHandler;
use crate::charge::payload::{ChargePayload, NormalizedPaymentMethod, PaymentMethodState};
use crate::charge::request::{FraudAnalysisCart, NuPayMethod, PaymentMethod};
use crate::error::MalgaError;
use crate::service::BoxFuture;

/// Normalizes NuPay charges.
///
/// NuPay items are not part of the method on the wire. They replace the
/// fraud-analysis cart items, keeping every other fraud-analysis field.
#[derive(Debug, Clone, Copy, Default)]
pub struct NuPayHandler;

impl ChargeHandler for NuPayHandler {
    fn name(&self) -> &'static str {
        "nupay"
    }

    fn handle(
        &self,
        mut payload: ChargePayload,
    ) -> BoxFuture<'_, Result<ChargePayload, MalgaError>> {
        let nupay = match payload.payment_method {
            PaymentMethodState::Pending(PaymentMethod::NuPay(nupay)) => nupay,
            other => {
                payload.payment_method = other;
                return Box::pin(std::future::ready(Ok(payload)));
            }
        };
        let NuPayMethod { checkout, items } = nupay;
        payload.payment_method =
            PaymentMethodState::Normalized(NormalizedPaymentMethod::NuPay(checkout));
        payload.payment_source = Some(customer_payment_source(&mut payload));
        payload
            .fraud_analysis
            .get_or_insert_with(Default::default)
            .cart
            .get_or_insert_with(FraudAnalysisCart::default)
            .items = items;
        Box::pin(std::future::ready(Ok(payload)))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::charge::request::ChargeCreateRequest;

    fn item() -> serde_json::Value {
        json!({
            "name": "Donut",
            "quantity": 2,
            "sku": "D-1",
            "unitPrice": 150,
            "risk": "Low"
        })
    }

    #[tokio::test]
    async fn test_items_move_to_fraud_analysis_cart() {
        let payload: ChargePayload = serde_json::from_value::<ChargeCreateRequest>(json!({
            "merchantId": "m-1",
            "amount": 300,
            "fraudAnalysis": {
                "sla": 30,
                "cart": { "items": [] },
                "customer": { "name": "Homer Simpson" }
            },
            "paymentMethod": {
                "type": "nupay",
                "orderUrl": "https://example.com/order",
                "delayToAutoCancel": 30,
                "taxValue": 0.5,
                "items": [item()]
            }
        }))
        .unwrap()
        .into();

        let out = NuPayHandler.handle(payload).await.unwrap();
        let value = serde_json::to_value(&out).unwrap();
        assert_eq!(
            value["paymentMethod"],
            json!({
                "paymentType": "nupay",
                "orderUrl": "https://example.com/order",
                "taxValue": 0.5,
                "delayToAutoCancel": 30
            })
        );
        assert_eq!(value["fraudAnalysis"]["cart"]["items"], json!([item()]));
        assert_eq!(value["fraudAnalysis"]["sla"], 30);
        assert_eq!(value["fraudAnalysis"]["customer"]["name"], "Homer Simpson");
    }

    #[tokio::test]
    async fn test_fraud_analysis_created_when_absent() {
        let payload: ChargePayload = serde_json::from_value::<ChargeCreateRequest>(json!({
            "merchantId": "m-1",
            "amount": 300,
            "customerId": "c-1",
            "paymentMethod": { "type": "nupay", "items": [item()] }
        }))
        .unwrap()
        .into();

        let out = NuPayHandler.handle(payload).await.unwrap();
        let value = serde_json::to_value(&out).unwrap();
        assert_eq!(value["fraudAnalysis"], json!({ "cart": { "items": [item()] } }));
        assert_eq!(value["paymentSource"]["customerId"], "c-1");
    }
}
