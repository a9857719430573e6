use crate::charge::handler::ChargeHandler;
use crate::charge::payload::ChargePayload;
use crate::charge::request::ChargeTarget;
use crate::error::MalgaError;
use crate::service::BoxFuture;

/// Last step of the chain: strips `sessionId`, `publicKey` and `appInfo`
/// from session-scoped charges. The session endpoint derives them from the
/// session itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionHandler;

impl ChargeHandler for SessionHandler {
    fn name(&self) -> &'static str {
        "session"
    }

    fn handle(
        &self,
        mut payload: ChargePayload,
    ) -> BoxFuture<'_, Result<ChargePayload, MalgaError>> {
        if matches!(payload.target, Some(ChargeTarget::Session(_))) {
            payload.target = None;
            payload.app_info = None;
        }
        Box::pin(std::future::ready(Ok(payload)))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::charge::request::ChargeCreateRequest;

    fn payload(envelope: serde_json::Value) -> ChargePayload {
        let mut body = envelope;
        body["paymentMethod"] = json!({ "type": "pix", "expiresIn": 60 });
        body["appInfo"] = json!({ "system": { "name": "shop", "version": "1.0" } });
        serde_json::from_value::<ChargeCreateRequest>(body)
            .unwrap()
            .into()
    }

    #[tokio::test]
    async fn test_session_fields_stripped() {
        let out = SessionHandler
            .handle(payload(json!({ "sessionId": "s-1", "publicKey": "pk" })))
            .await
            .unwrap();
        let value = serde_json::to_value(&out).unwrap();
        assert!(value.get("sessionId").is_none());
        assert!(value.get("publicKey").is_none());
        assert!(value.get("appInfo").is_none());
        assert_eq!(value["paymentMethod"]["expiresIn"], 60);
    }

    #[tokio::test]
    async fn test_merchant_charge_untouched() {
        let input = payload(json!({ "merchantId": "m-1", "amount": 100 }));
        let out = SessionHandler.handle(input.clone()).await.unwrap();
        assert_eq!(out, input);
        let value = serde_json::to_value(&out).unwrap();
        assert_eq!(value["appInfo"]["system"]["name"], "shop");
    }
}
