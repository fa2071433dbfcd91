//! # bizops-rs
//!
//! Client-side building blocks for business-management front ends: a REST client that
//! retries transient failures with linear backoff, and a masked currency input buffer.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bizops_rs::{ApiClient, Config};
//!
//! # async fn example() -> anyhow::Result<()> {
//! // Load configuration from config.toml
//! let config = Config::new()?;
//! let client = ApiClient::new(config)?;
//!
//! // Retried up to three times on network errors, 429 and 502/503/504
//! let contracts: serde_json::Value = client.get_json("contracts").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Currency input
//!
//! ```
//! use bizops_rs::currency::{Currency, CurrencyInputBuffer};
//!
//! let mut field = CurrencyInputBuffer::with_currency(Currency::Brl);
//! field.on_digits_typed("123456");
//! assert_eq!(field.display(), "R$ 1.234,56");
//! ```
//!
//! ## Configuration
//!
//! Every section of `config.toml` is optional:
//!
//! ```toml
//! [http]
//! base_url = "https://api.example.com"
//! request_timeout_secs = 30
//!
//! [retry]
//! max_retries = 3
//! base_delay_ms = 1000
//!
//! [currency]
//! currency = "BRL"
//! max_value = 100000
//! ```

pub mod api_client;
pub mod config;
pub mod currency;
pub mod error;
pub mod retry;

// Re-export commonly used types at the crate root
pub use api_client::ApiClient;
pub use config::Config;
pub use currency::{Currency, CurrencyInputBuffer, CurrencyInputOptions, InputValue};
pub use error::{RequestError, TransientFailure};
pub use retry::{RetryConfig, RetryPolicy, Sleeper, TokioSleeper};
