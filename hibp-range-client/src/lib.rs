//! Breached password lookups against the Have I Been Pwned range API.
//!
//! The range API implements k-anonymity: the client sends only the first five
//! hex characters of a password's digest and receives every known suffix
//! sharing that prefix (a few hundred `SUFFIX:COUNT` lines). The suffix is
//! then matched locally, so the full digest never leaves the process.
//!
//! # Example
//!
//! ```no_run
//! use hibp_range_client::{Error, RangeClient};
//!
//! let client = RangeClient::new()?;
//! match client.check_password("p@ssword") {
//!     Ok(0) => println!("not found in any known breach"),
//!     Ok(count) => println!("seen {count} times in breaches"),
//!     Err(Error::RateLimited { retry_in }) => println!("rate limited, retry in {retry_in}s"),
//!     Err(e) => return Err(e),
//! }
//! # Ok::<(), Error>(())
//! ```
//!
//! A digest from any RustCrypto hasher can be passed as-is:
//!
//! ```no_run
//! use hibp_range_client::RangeClient;
//! use sha1::{Digest, Sha1};
//!
//! let mut hasher = Sha1::new();
//! hasher.update(b"p@ssword");
//! let count = RangeClient::new()?.match_hasher(hasher)?;
//! println!("p@ssword: {count}");
//! # Ok::<(), hibp_range_client::Error>(())
//! ```
//!
//! # Rate limiting
//!
//! The public service allows roughly one request every 1500ms per client
//! address. Nothing here retries: a `429` comes back as
//! [`Error::RateLimited`] with the number of seconds to wait.
//!
//! # Features
//!
//! - `tokio`: enables [`AsyncRangeClient`], the same protocol on an async
//!   transport.

pub mod client;
pub mod config;
pub mod conversion;
pub mod error;
pub mod response;
pub mod scan;

#[cfg(feature = "tokio")]
pub mod async_client;

#[cfg(feature = "tokio")]
pub use async_client::AsyncRangeClient;
pub use client::RangeClient;
pub use config::{ClientConfig, DEFAULT_RANGE_URL, HashMode, RANGE_URL_ENV};
pub use conversion::{RangeKey, match_record, password_digest};
pub use error::{Error, ProtocolError};
pub use response::check_status;
pub use scan::scan_range;
#[cfg(feature = "tokio")]
pub use scan::scan_range_async;

/// The length of the digest prefix sent to the range API (5 hex characters).
pub const PREFIX_LEN: usize = 5;
