//! The charge payload as it flows through the handler chain.
//!
//! A [`ChargePayload`] starts as a direct image of a
//! [`ChargeCreateRequest`] and leaves the chain as the body sent to the
//! charge endpoint. Its payment method moves from
//! [`PaymentMethodState::Pending`] (still tagged by `type`) to
//! [`PaymentMethodState::Normalized`] (tagged by `paymentType`) exactly once.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_with::skip_serializing_none;

use super::request::{
    AppInfo, BoletoMethod, ChargeCreateRequest, ChargeTarget, CustomerSource, DripMethod,
    FraudAnalysis, NuPayCheckout, PaymentFlow, PaymentItem, PaymentMethod, PixMethod, ThreeDSecure,
};
use crate::customer::Customer;

/// Credit fields left once the card reference is resolved.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreditCheckout {
    /// Number of installments.
    pub installments: Option<u32>,
}

/// Voucher fields left once the card reference is resolved.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VoucherCheckout {
    /// Items paid with the voucher.
    pub items: Option<Vec<PaymentItem>>,
}

/// Payment method in the shape the charge endpoint expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "paymentType", rename_all = "lowercase")]
pub enum NormalizedPaymentMethod {
    /// Credit card.
    Credit(CreditCheckout),
    /// Meal or food voucher card.
    Voucher(VoucherCheckout),
    /// Pix.
    Pix(PixMethod),
    /// Boleto bancário.
    Boleto(BoletoMethod),
    /// Drip (pix installments).
    Drip(DripMethod),
    /// NuPay.
    #[serde(rename = "nupay")]
    NuPay(NuPayCheckout),
}

impl NormalizedPaymentMethod {
    /// Canonical method name.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Credit(_) => "credit",
            Self::Voucher(_) => "voucher",
            Self::Pix(_) => "pix",
            Self::Boleto(_) => "boleto",
            Self::Drip(_) => "drip",
            Self::NuPay(_) => "nupay",
        }
    }
}

/// Payment method before or after normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PaymentMethodState {
    /// Not yet claimed by any handler.
    Pending(PaymentMethod),
    /// Rewritten by the handler owning the method.
    Normalized(NormalizedPaymentMethod),
}

impl PaymentMethodState {
    /// Canonical method name, in either state.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Pending(m) => m.kind(),
            Self::Normalized(m) => m.kind(),
        }
    }

    /// Returns `true` until a handler has normalized the method.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }
}

/// What funds the charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentSource {
    /// A card token: `{sourceType: "token", tokenId}`.
    Token {
        /// Token id.
        token_id: String,
    },
    /// A stored card, with every CVV proof supplied.
    Card {
        /// Stored card id.
        card_id: String,
        /// Plain CVV.
        card_cvv: Option<String>,
        /// Tokenized CVV.
        token_cvv: Option<String>,
    },
    /// The customer, by id or inline.
    Customer(CustomerSource),
    /// No source: the remote defaults apply. Serialized as `{}`.
    RemoteDefault,
    /// A card method without any card reference. Serialized as `null`.
    Unresolved,
}

impl Serialize for PaymentSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = match self {
            Self::Unresolved => return serializer.serialize_none(),
            Self::RemoteDefault => return serializer.serialize_map(Some(0))?.end(),
            Self::Token { .. } | Self::Customer(_) => serializer.serialize_map(Some(2))?,
            Self::Card { .. } => serializer.serialize_map(None)?,
        };
        match self {
            Self::Token { token_id } => {
                map.serialize_entry("sourceType", "token")?;
                map.serialize_entry("tokenId", token_id)?;
            }
            Self::Card {
                card_id,
                card_cvv,
                token_cvv,
            } => {
                map.serialize_entry("sourceType", "card")?;
                map.serialize_entry("cardId", card_id)?;
                if let Some(cvv) = card_cvv {
                    map.serialize_entry("cardCvv", cvv)?;
                }
                if let Some(token) = token_cvv {
                    map.serialize_entry("tokenCvv", token)?;
                }
            }
            Self::Customer(CustomerSource::Id(id)) => {
                map.serialize_entry("sourceType", "customer")?;
                map.serialize_entry("customerId", id)?;
            }
            Self::Customer(CustomerSource::Inline(customer)) => {
                map.serialize_entry("sourceType", "customer")?;
                map.serialize_entry("customer", customer)?;
            }
            Self::RemoteDefault | Self::Unresolved => {}
        }
        map.end()
    }
}

/// A charge payload between handlers, and the normalized body at the end.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargePayload {
    /// Merchant or session envelope. The session envelope is removed before
    /// sending.
    #[serde(flatten)]
    pub target: Option<ChargeTarget>,
    /// Inline customer not yet folded into a payment source.
    pub customer: Option<Customer>,
    /// Customer id, as supplied or as resolved by a card method.
    pub customer_id: Option<String>,
    /// Payment method, pending or normalized.
    pub payment_method: PaymentMethodState,
    /// Resolved payment source.
    pub payment_source: Option<PaymentSource>,
    /// Anti-fraud data. NuPay items land in its cart.
    pub fraud_analysis: Option<FraudAnalysis>,
    /// Payment-flow metadata.
    pub payment_flow: Option<PaymentFlow>,
    /// 3-D Secure data as supplied. Moved to `threeDSecure2`.
    pub three_d_secure: Option<ThreeDSecure>,
    /// 3-D Secure data under the key the endpoint reads.
    pub three_d_secure2: Option<ThreeDSecure>,
    /// Software issuing the charge.
    pub app_info: Option<AppInfo>,
}

impl ChargePayload {
    /// Takes the top-level customer, leaving neither field set.
    pub fn take_customer(&mut self) -> Option<CustomerSource> {
        let inline = self.customer.take();
        match self.customer_id.take() {
            Some(id) => Some(CustomerSource::Id(id)),
            None => inline.map(CustomerSource::Inline),
        }
    }
}

impl From<ChargeCreateRequest> for ChargePayload {
    fn from(request: ChargeCreateRequest) -> Self {
        let (customer, customer_id) = match request.customer {
            Some(CustomerSource::Inline(c)) => (Some(c), None),
            Some(CustomerSource::Id(id)) => (None, Some(id)),
            None => (None, None),
        };
        Self {
            target: Some(request.target),
            customer,
            customer_id,
            payment_method: PaymentMethodState::Pending(request.payment_method),
            payment_source: None,
            fraud_analysis: request.fraud_analysis,
            payment_flow: request.payment_flow,
            three_d_secure: request.three_d_secure,
            three_d_secure2: None,
            app_info: request.app_info,
        }
    }
}
