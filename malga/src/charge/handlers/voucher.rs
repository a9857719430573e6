use super::card_flow::CardFlow;
use crate::charge::handler::ChargeHandler;
use crate::charge::payload::{
    ChargePayload, NormalizedPaymentMethod, PaymentMethodState, VoucherCheckout,
};
use crate::charge::request::{PaymentMethod, VoucherMethod};
use crate::error::MalgaError;
use crate::service::{BoxFuture, CardService, CustomerService};

/// Normalizes voucher (meal and food card) charges. Resolves customer and
/// card exactly like [`CreditHandler`](super::CreditHandler).
#[derive(Clone, Copy)]
pub struct VoucherHandler<'a> {
    flow: CardFlow<'a>,
}

impl std::fmt::Debug for VoucherHandler<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoucherHandler").finish_non_exhaustive()
    }
}

impl<'a> VoucherHandler<'a> {
    /// Creates a voucher handler issuing side effects through the given services.
    #[must_use]
    pub fn new(cards: &'a dyn CardService, customers: &'a dyn CustomerService) -> Self {
        Self {
            flow: CardFlow::new(cards, customers),
        }
    }
}

impl ChargeHandler for VoucherHandler<'_> {
    fn name(&self) -> &'static str {
        "voucher"
    }

    fn handle(
        &self,
        mut payload: ChargePayload,
    ) -> BoxFuture<'_, Result<ChargePayload, MalgaError>> {
        Box::pin(async move {
            let VoucherMethod { items, card } = match payload.payment_method {
                PaymentMethodState::Pending(PaymentMethod::Voucher(voucher)) => voucher,
                other => {
                    payload.payment_method = other;
                    return Ok(payload);
                }
            };
            payload.payment_method = PaymentMethodState::Normalized(
                NormalizedPaymentMethod::Voucher(VoucherCheckout { items }),
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
