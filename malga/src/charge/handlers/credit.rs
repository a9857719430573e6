use super::card_flow::CardFlow;
use crate::charge::handler::ChargeHandler;
use crate::charge::payload::{
    ChargePayload, CreditCheckout, NormalizedPaymentMethod, PaymentMethodState,
};
use crate::charge::request::{CreditMethod, PaymentMethod};
use crate::error::MalgaError;
use crate::service::{BoxFuture, CardService, CustomerService};

/// Normalizes credit charges.
///
/// An inline customer is created first. The card reference is then resolved
/// to a token or a stored card, tokenizing, storing and linking the card as
/// requested. Nothing is rolled back if a later call fails.
#[derive(Clone, Copy)]
pub struct CreditHandler<'a> {
    flow: CardFlow<'a>,
}

impl std::fmt::Debug for CreditHandler<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreditHandler").finish_non_exhaustive()
    }
}

impl<'a> CreditHandler<'a> {
    /// Creates a credit handler issuing side effects through the given services.
    #[must_use]
    pub fn new(cards: &'a dyn CardService, customers: &'a dyn CustomerService) -> Self {
        Self {
            flow: CardFlow::new(cards, customers),
        }
    }
}

impl ChargeHandler for CreditHandler<'_> {
    fn name(&self) -> &'static str {
        "credit"
    }

    fn handle(
        &self,
        mut payload: ChargePayload,
    ) -> BoxFuture<'_, Result<ChargePayload, MalgaError>> {
        Box::pin(async move {
            let CreditMethod { installments, card } = match payload.payment_method {
                PaymentMethodState::Pending(PaymentMethod::Credit(credit)) => credit,
                other => {
                    payload.payment_method = other;
                    return Ok(payload);
                }
            };
            payload.payment_method = PaymentMethodState::Normalized(
                NormalizedPaymentMethod::Credit(CreditCheckout { installments }),
            );

            let customer_id = self.flow.resolve_customer(payload.take_customer()).await?;
            let source = self
                .flow
                .resolve_source(card, customer_id.as_deref())
                .await?;

            payload.customer_id = customer_id;
            payload.payment_source = Some(source);
            Ok(payload)
        })
    }
}
