use super::handler::HandlerChain;
use super::handlers::{
    BoletoHandler, CreditHandler, DripHandler, EnvelopeHandler, NuPayHandler, PixHandler,
    SessionHandler, VoucherHandler,
};
use super::payload::ChargePayload;
use super::request::ChargeCreateRequest;
use crate::error::MalgaError;
use crate::service::{CardService, CustomerService};

/// Builds the normalized body of a charge.
///
/// Every call to [`build`](Self::build) assembles a fresh chain, so
/// concurrent builds share nothing but the injected services.
#[derive(Clone, Copy)]
pub struct ChargePayloadBuilder<'a> {
    cards: &'a dyn CardService,
    customers: &'a dyn CustomerService,
}

impl std::fmt::Debug for ChargePayloadBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChargePayloadBuilder").finish_non_exhaustive()
    }
}

impl<'a> ChargePayloadBuilder<'a> {
    /// Creates a builder issuing side effects through the given services.
    #[must_use]
    pub fn new(cards: &'a dyn CardService, customers: &'a dyn CustomerService) -> Self {
        Self { cards, customers }
    }

    /// The handler chain, in its fixed order.
    #[must_use]
    pub fn chain(&self) -> HandlerChain<'a> {
        HandlerChain::new()
            .with_handler(EnvelopeHandler)
            .with_handler(CreditHandler::new(self.cards, self.customers))
            .with_handler(PixHandler)
            .with_handler(BoletoHandler)
            .with_handler(DripHandler)
            .with_handler(NuPayHandler)
            .with_handler(VoucherHandler::new(self.cards, self.customers))
            .with_handler(SessionHandler)
    }

    /// Normalizes a charge request, issuing the customer and card calls its
    /// payment method needs.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing remote call, unchanged.
    /// Customers and cards created before the failure are not removed.
    pub async fn build(&self, request: ChargeCreateRequest) -> Result<ChargePayload, MalgaError> {
        self.chain().run(ChargePayload::from(request)).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ApiError;
    use crate::testing::{Call, FakeCards, FakeCustomers, homer_json};

    fn request(body: serde_json::Value) -> ChargeCreateRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_chain_order() {
        let cards = FakeCards::default();
        let customers = FakeCustomers::default();
        assert_eq!(
            ChargePayloadBuilder::new(&cards, &customers).chain().names(),
            vec!["charge", "credit", "pix", "boleto", "drip", "nupay", "voucher", "session"]
        );
    }

    #[tokio::test]
    async fn test_stored_card_charge() {
        let cards = FakeCards::default();
        let customers = FakeCustomers::default();
        let payload = ChargePayloadBuilder::new(&cards, &customers)
            .build(request(json!({
                "merchantId": "m-1",
                "amount": 100,
                "paymentMethod": {
                    "type": "credit",
                    "installments": 1,
                    "cardId": "X",
                    "cardCvv": "170"
                }
            })))
            .await
            .unwrap();

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "merchantId": "m-1",
                "amount": 100,
                "paymentMethod": { "paymentType": "credit", "installments": 1 },
                "paymentSource": { "sourceType": "card", "cardId": "X", "cardCvv": "170" }
            })
        );
        assert!(customers.calls().is_empty());
        assert!(cards.calls().is_empty());
    }

    #[tokio::test]
    async fn test_one_shot_customer_with_token() {
        let cards = FakeCards::default();
        let customers = FakeCustomers::default();
        let payload = ChargePayloadBuilder::new(&cards, &customers)
            .build(request(json!({
                "merchantId": "m-1",
                "amount": 100,
                "customer": homer_json(),
                "paymentMethod": {
                    "type": "credit",
                    "installments": 2,
                    "card": {
                        "holderName": "Homer Simpson",
                        "number": "5402502027127339",
                        "cvv": "391",
                        "expirationDate": "01/2030"
                    }
                }
            })))
            .await
            .unwrap();

        assert_eq!(customers.calls().len(), 1);
        assert_eq!(cards.calls(), vec![Call::Tokenize("5402502027127339".into())]);
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["customerId"], FakeCustomers::CUSTOMER_ID);
        assert_eq!(
            value["paymentSource"],
            json!({ "sourceType": "token", "tokenId": FakeCards::TOKEN_ID })
        );
    }

    #[tokio::test]
    async fn test_zero_dollar_card_linked_to_existing_customer() {
        let cards = FakeCards::default();
        let customers = FakeCustomers::default();
        let payload = ChargePayloadBuilder::new(&cards, &customers)
            .build(request(json!({
                "merchantId": "m-1",
                "amount": 100,
                "customerId": "C",
                "paymentMethod": {
                    "type": "credit",
                    "card": {
                        "holderName": "Homer Simpson",
                        "number": "5402502027127339",
                        "cvv": "391",
                        "expirationDate": "01/2030",
                        "zeroDollar": { "cvvCheck": true }
                    },
                    "linkCardToCustomer": true
                }
            })))
            .await
            .unwrap();

        assert_eq!(
            cards.calls(),
            vec![
                Call::Tokenize("5402502027127339".into()),
                Call::CreateCard(FakeCards::TOKEN_ID.into()),
            ]
        );
        assert_eq!(
            customers.calls(),
            vec![Call::LinkCard("C".into(), FakeCards::CARD_ID.into())]
        );
        assert_eq!(
            serde_json::to_value(&payload).unwrap()["paymentSource"],
            json!({ "sourceType": "card", "cardId": FakeCards::CARD_ID })
        );
    }

    #[tokio::test]
    async fn test_pix_with_inline_customer_makes_no_calls() {
        let cards = FakeCards::default();
        let customers = FakeCustomers::default();
        let payload = ChargePayloadBuilder::new(&cards, &customers)
            .build(request(json!({
                "merchantId": "m-1",
                "amount": 100,
                "customer": homer_json(),
                "paymentMethod": { "type": "pix", "expiresIn": 600 }
            })))
            .await
            .unwrap();

        assert!(cards.calls().is_empty());
        assert!(customers.calls().is_empty());
        assert_eq!(
            serde_json::to_value(&payload).unwrap()["paymentSource"],
            json!({ "sourceType": "customer", "customer": homer_json() })
        );
    }

    #[tokio::test]
    async fn test_session_charge_is_reduced() {
        let cards = FakeCards::default();
        let customers = FakeCustomers::default();
        let payload = ChargePayloadBuilder::new(&cards, &customers)
            .build(request(json!({
                "sessionId": "s-1",
                "publicKey": "pk",
                "appInfo": { "platform": { "name": "shop", "version": "1", "integrator": "x" } },
                "customerId": "C",
                "paymentMethod": { "type": "boleto", "expiresDate": "2030-12-31" }
            })))
            .await
            .unwrap();

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "paymentMethod": { "paymentType": "boleto", "expiresDate": "2030-12-31" },
                "paymentSource": { "sourceType": "customer", "customerId": "C" }
            })
        );
    }

    #[tokio::test]
    async fn test_failure_propagates_unchanged() {
        let cards = FakeCards::failing_tokenize(
            ApiError::new(ApiError::CARD_DECLINED, 402, "declined").with_declined_code("51"),
        );
        let customers = FakeCustomers::default();
        let err = ChargePayloadBuilder::new(&cards, &customers)
            .build(request(json!({
                "merchantId": "m-1",
                "amount": 100,
                "customer": homer_json(),
                "paymentMethod": {
                    "type": "voucher",
                    "card": {
                        "holderName": "Homer Simpson",
                        "number": "6062825624254001",
                        "cvv": "123",
                        "expirationDate": "12/2030"
                    }
                }
            })))
            .await
            .unwrap_err();

        let api = err.as_api().unwrap();
        assert!(api.is_card_declined());
        assert_eq!(api.declined_code.as_deref(), Some("51"));
        assert_eq!(customers.calls(), vec![Call::CreateCustomer("Homer Simpson".into())]);
    }

    #[tokio::test]
    async fn test_concurrent_builds_are_independent() {
        let cards = FakeCards::default();
        let customers = FakeCustomers::default();
        let builder = ChargePayloadBuilder::new(&cards, &customers);
        let pix = request(json!({
            "merchantId": "m-1",
            "amount": 100,
            "customerId": "C",
            "paymentMethod": { "type": "pix", "expiresIn": 600 }
        }));
        let credit = request(json!({
            "merchantId": "m-1",
            "amount": 100,
            "paymentMethod": { "type": "credit", "tokenId": "T" }
        }));

        let (a, b) = tokio::join!(builder.build(pix), builder.build(credit));
        assert_eq!(a.unwrap().payment_method.kind(), "pix");
        assert_eq!(b.unwrap().payment_method.kind(), "credit");
    }
}
