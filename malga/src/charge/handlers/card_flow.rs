//! Customer and payment-source resolution for card methods.
//!
//! Resolution runs as two sequential stages. [`CardFlow::resolve_customer`]
//! yields the customer id that [`CardFlow::resolve_source`] needs for card
//! linking. Inside the second stage a token feeds card storage, and the
//! stored card id feeds linking. Each remote call waits for the previous one.

use crate::card::CardCreatePayload;
use crate::charge::payload::PaymentSource;
use crate::charge::request::{CardData, CardReference, CustomerSource};
use crate::customer::CustomerLinkCardPayload;
use crate::error::MalgaError;
use crate::service::{CardService, CustomerService};

#[derive(Clone, Copy)]
pub(super) struct CardFlow<'a> {
    cards: &'a dyn CardService,
    customers: &'a dyn CustomerService,
}

impl<'a> CardFlow<'a> {
    pub(super) fn new(cards: &'a dyn CardService, customers: &'a dyn CustomerService) -> Self {
        Self { cards, customers }
    }

    /// Stage one: turns the charge's customer into an id, creating an inline
    /// customer on the way.
    pub(super) async fn resolve_customer(
        self,
        source: Option<CustomerSource>,
    ) -> Result<Option<String>, MalgaError> {
        match source {
            None => Ok(None),
            Some(CustomerSource::Id(id)) => Ok(non_empty(Some(id))),
            Some(CustomerSource::Inline(customer)) => {
                let created = self.customers.create(&customer).await?;
                #[cfg(feature = "telemetry")]
                tracing::info!(customer_id = %created.id, "customer created for charge");
                Ok(Some(created.id))
            }
        }
    }

    /// Stage two: turns the card reference into a payment source.
    ///
    /// Full card data wins over `cardId`, which wins over `tokenId`. Empty
    /// strings count as absent.
    pub(super) async fn resolve_source(
        self,
        reference: CardReference,
        customer_id: Option<&str>,
    ) -> Result<PaymentSource, MalgaError> {
        let link_to = customer_id
            .filter(|id| !id.is_empty())
            .filter(|_| reference.link_card_to_customer);

        if let Some(card) = reference.card {
            return self.resolve_card(card, link_to).await;
        }

        if let Some(card_id) = non_empty(reference.card_id) {
            if let Some(customer_id) = link_to {
                self.link(customer_id, &card_id).await?;
            }
            return Ok(PaymentSource::Card {
                card_id,
                card_cvv: non_empty(reference.card_cvv),
                token_cvv: non_empty(reference.token_cvv),
            });
        }

        Ok(non_empty(reference.token_id)
            .map_or(PaymentSource::Unresolved, |token_id| {
                PaymentSource::Token { token_id }
            }))
    }

    async fn resolve_card(
        self,
        card: CardData,
        link_to: Option<&str>,
    ) -> Result<PaymentSource, MalgaError> {
        let token = self.cards.tokenize(&card.tokenization_payload()).await?;
        #[cfg(feature = "telemetry")]
        tracing::info!("card tokenized for charge");

        let Some(zero_dollar) = card.zero_dollar else {
            return Ok(PaymentSource::Token {
                token_id: token.token_id,
            });
        };

        let stored = self
            .cards
            .create(&CardCreatePayload {
                token_id: token.token_id,
                zero_dollar: Some(zero_dollar),
            })
            .await?;
        #[cfg(feature = "telemetry")]
        tracing::info!(card_id = %stored.id, status = ?stored.status, "card stored for charge");

        if let Some(customer_id) = link_to {
            self.link(customer_id, &stored.id).await?;
        }
        Ok(PaymentSource::Card {
            card_id: stored.id,
            card_cvv: None,
            token_cvv: None,
        })
    }

    async fn link(self, customer_id: &str, card_id: &str) -> Result<(), MalgaError> {
        self.customers
            .link_card(customer_id, &CustomerLinkCardPayload::new(card_id))
            .await?;
        #[cfg(feature = "telemetry")]
        tracing::info!(customer_id, card_id, "card linked to customer");
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
