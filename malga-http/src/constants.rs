//! API endpoints, header names and transport defaults.

use std::time::Duration;

/// Production API base URL.
pub const PRODUCTION_API_URL: &str = "https://api.malga.io/v1";

/// Sandbox API base URL.
pub const SANDBOX_API_URL: &str = "https://sandbox-api.malga.io/v1";

/// Environment variable overriding the base URL.
pub const API_URL_ENV: &str = "MALGA_API_URL";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "MALGA_API_KEY";

/// Environment variable holding the client id.
pub const CLIENT_ID_ENV: &str = "MALGA_CLIENT_ID";

/// Environment variable enabling the sandbox (`true` or `1`).
pub const SANDBOX_ENV: &str = "MALGA_SANDBOX";

/// Environment variable overriding the retry count.
pub const RETRIES_ENV: &str = "MALGA_RETRIES";

/// Environment variable overriding the retry delay, in milliseconds.
pub const RETRY_DELAY_MS_ENV: &str = "MALGA_RETRY_DELAY_MS";

/// Header carrying the secret API key, or a session public key.
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Header carrying the client id.
pub const CLIENT_ID_HEADER: &str = "X-Client-Id";

/// Header carrying a caller-chosen idempotency key.
pub const IDEMPOTENCY_KEY_HEADER: &str = "X-Idempotency-Key";

/// Extra attempts made for a retryable request.
pub const DEFAULT_RETRIES: u32 = 3;

/// Delay between attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(10);
