use crate::error::{Error, Result};

/// The well-known production endpoint of the USPS Address Information API.
pub const DEFAULT_API_BASE_URI: &str = "https://secure.shippingapis.com/ShippingAPI.dll";

const USER_ID_ENV_VAR: &str = "USPS_USER_ID";
const BASE_URI_ENV_VAR: &str = "USPS_API_BASE_URI";

/// Configuration for [`AddressApiClient`](crate::AddressApiClient).
///
/// The account identifier is required and has no default; the base URI
/// defaults to the production endpoint and normally only changes for tests
/// or for the USPS staging environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressApiOptions {
    /// The account identifier USPS issued for the Web Tools APIs. Sent as
    /// the `USERID` attribute on every request document.
    pub user_id: String,
    /// The base URI requests are issued against.
    pub base_api_uri: String,
}

impl AddressApiOptions {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            base_api_uri: DEFAULT_API_BASE_URI.to_string(),
        }
    }

    pub fn with_base_api_uri(mut self, base_api_uri: impl Into<String>) -> Self {
        self.base_api_uri = base_api_uri.into();
        self
    }

    /// Load options from the environment.
    ///
    /// `USPS_USER_ID` must be set; `USPS_API_BASE_URI` overrides the default
    /// endpoint when present.
    pub fn from_env() -> Result<Self> {
        let user_id = std::env::var(USER_ID_ENV_VAR).map_err(|_| Error::MissingUserId)?;
        let mut options = Self::new(user_id);
        if let Ok(base_api_uri) = std::env::var(BASE_URI_ENV_VAR) {
            options.base_api_uri = base_api_uri;
        }
        Ok(options)
    }
}
