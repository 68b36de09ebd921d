//! # USPS Address API client
//!
//! Asynchronous client for the USPS Address Information API, covering its
//! three operations: address validation, ZIP code lookup, and city/state
//! lookup. Requests are serialized to the API's XML wire format and issued
//! as a single HTTP GET per batch; responses are decoded into typed results
//! that keep a reference to the originally submitted item, re-associated by
//! tracking identifier even when the API returns items out of order.
//!
//! ## Usage
//!
//! Configure with [`AddressApiOptions`] (a USPS Web Tools `USERID` is
//! required), then call any of the three operations with 1 to 5 items:
//!
//! ```no_run
//! use usps_address_api::{Address, AddressApiClient, AddressApiOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), usps_address_api::Error> {
//!     let client = AddressApiClient::new(AddressApiOptions::new("YOUR_USERID"))?;
//!
//!     let address = Address {
//!         address2: Some("1600 Pennsylvania Ave NW".into()),
//!         city: Some("Washington".into()),
//!         state: Some("DC".into()),
//!         ..Default::default()
//!     };
//!     let response = client.validate_address(&[address]).await?;
//!
//!     if let Some(error) = &response.error {
//!         eprintln!("request rejected: {:?}", error.description);
//!     }
//!     for result in &response.results {
//!         println!("{:?}: {:?} {:?}", result.result_type, result.zip5, result.zip4);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! Transport, configuration, and batch-size failures surface as [`Error`];
//! errors reported by USPS itself are data, not `Err` values — a top-level
//! rejection populates [`ApiResponse::error`], and per-item outcomes are
//! classified into [`ApiResultType`] on each result.
//!
//! ## Runtime
//!
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest`.
//! The crate logs through the `log` facade and never installs a logger.

mod client;
mod codes;
mod config;
mod error;
mod model;
mod request;
mod response;

pub use client::{AddressApiClient, MAX_BATCH_SIZE};
pub use codes::{ApiResultType, DpvConfirmationCode, DpvFootnoteCode, FootnoteCode};
pub use config::{AddressApiOptions, DEFAULT_API_BASE_URI};
pub use error::{Error, Result};
pub use model::{Address, ZipCode};
pub use response::{
    ApiError, ApiResponse, CityStateLookupResponse, CityStateLookupResult,
    ValidateAddressResponse, ValidateAddressResult, ZipCodeLookupResponse, ZipCodeLookupResult,
};
