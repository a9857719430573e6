//! The [`Malga`] facade.

use std::sync::Arc;

use crate::api::Api;
use crate::cards::Cards;
use crate::charges::Charges;
use crate::config::{ConfigError, MalgaConfig};
use crate::customers::Customers;

/// Entry point to the Malga API.
///
/// All resource clients share one transport, so connection pooling and the
/// retry policy apply across them.
///
/// # Example
///
/// ```no_run
/// use malga_http::{Malga, MalgaConfig};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let malga = Malga::new(MalgaConfig::new("API_KEY", "CLIENT_ID").with_sandbox(true))?;
/// let card = malga.cards().find("e917fc6d-c640-47a1-83eb-aa820dbd92fe").await?;
/// println!("{:?}", card.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Malga {
    api: Arc<Api>,
    cards: Cards,
    customers: Customers,
    charges: Charges,
}

impl Malga {
    /// Builds a client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the base URL or a credential is invalid.
    pub fn new(config: MalgaConfig) -> Result<Self, ConfigError> {
        let api = Arc::new(Api::new(&config)?);
        #[cfg(feature = "telemetry")]
        tracing::debug!(base_url = %api.base_url(), sandbox = config.sandbox(), "Malga client ready");
        Ok(Self {
            cards: Cards::new(Arc::clone(&api)),
            customers: Customers::new(Arc::clone(&api)),
            charges: Charges::new(Arc::clone(&api)),
            api,
        })
    }

    /// Builds a client from `MALGA_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required variable is missing or a value
    /// is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(MalgaConfig::from_env()?)
    }

    /// The shared transport.
    #[must_use]
    pub fn api(&self) -> &Api {
        &self.api
    }

    /// Card and token operations.
    #[must_use]
    pub const fn cards(&self) -> &Cards {
        &self.cards
    }

    /// Customer operations.
    #[must_use]
    pub const fn customers(&self) -> &Customers {
        &self.customers
    }

    /// Charge operations.
    #[must_use]
    pub const fn charges(&self) -> &Charges {
        &self.charges
    }
}
