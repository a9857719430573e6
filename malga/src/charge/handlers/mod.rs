//! The handlers making up the charge chain.
//!
//! Envelope and session handlers adapt the request envelope. One handler per
//! payment method claims its method and rewrites it; pix, boleto, drip and
//! nupay are pure transforms, while credit and voucher may create customers
//! and cards on the way.

mod boleto;
mod card_flow;
mod credit;
mod drip;
mod envelope;
mod nupay;
mod pix;
mod session;
mod voucher;

pub use boleto::BoletoHandler;
pub use credit::CreditHandler;
pub use drip::DripHandler;
pub use envelope::EnvelopeHandler;
pub use nupay::NuPayHandler;
pub use pix::PixHandler;
pub use session::SessionHandler;
pub use voucher::VoucherHandler;

use super::payload::{ChargePayload, PaymentSource};

/// Moves the top-level customer into a payment source.
///
/// A customer id wins over an inline customer. Without either, the remote
/// defaults apply.
fn customer_payment_source(payload: &mut ChargePayload) -> PaymentSource {
    payload
        .take_customer()
        .map_or(PaymentSource::RemoteDefault, PaymentSource::Customer)
}
