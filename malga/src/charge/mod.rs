//! Charge creation: request types, the normalization chain and charge
//! resources.
//!
//! [`ChargePayloadBuilder`] turns a [`ChargeCreateRequest`] into the body
//! the charge endpoint accepts. Handlers run in a fixed order:
//!
//! `charge → credit → pix → boleto → drip → nupay → voucher → session`
//!
//! Credit and voucher charges may create a customer, tokenize a card, store
//! it and link it to the customer before the charge itself is sent. These
//! calls are sequential and are never undone: when one fails, the resources
//! created before it remain.

mod builder;
pub mod handler;
pub mod handlers;
pub mod payload;
pub mod request;
pub mod response;

pub use builder::ChargePayloadBuilder;
pub use handler::{ChargeHandler, HandlerChain};
pub use payload::{ChargePayload, NormalizedPaymentMethod, PaymentMethodState, PaymentSource};
pub use request::{
    CardData, CardReference, ChargeCreateRequest, ChargeTarget, CustomerSource, MerchantCharge,
    PaymentMethod, SessionCharge,
};
pub use response::{
    Charge, ChargeCapturePayload, ChargeListParams, ChargeRefundPayload, ChargeStatus,
};
