use std::sync::{PoisonError, RwLock};

use log::{debug, error};
use reqwest::Client;
use url::Url;

use crate::config::AddressApiOptions;
use crate::error::{Error, Result};
use crate::model::{Address, ZipCode};
use crate::request;
use crate::response::{
    self, CityStateLookupResponse, ValidateAddressResponse, ZipCodeLookupResponse,
};

const API_QUERY_PARAM: &str = "API";
const XML_QUERY_PARAM: &str = "XML";

const ZIPCODE_LOOKUP_OPERATION: &str = "ZipCodeLookup";
const CITY_STATE_LOOKUP_OPERATION: &str = "CityStateLookup";
const ADDRESS_VALIDATE_OPERATION: &str = "Verify";

/// The most items a single batch request may carry.
pub const MAX_BATCH_SIZE: usize = 5;

/// HTTP client for the USPS Address Information API.
///
/// One instance can serve concurrent calls; each call reads a snapshot of
/// the current options at entry, so [`set_options`](Self::set_options) never
/// disturbs requests already in flight.
pub struct AddressApiClient {
    http: Client,
    options: RwLock<AddressApiOptions>,
}

impl AddressApiClient {
    pub fn new(options: AddressApiOptions) -> Result<Self> {
        Ok(
            Self {
                http: Client::builder().build()?,
                options: RwLock::new(options),
            }
        )
    }

    /// Replace the configuration used by subsequent calls.
    pub fn set_options(&self, options: AddressApiOptions) {
        *self
            .options
            .write()
            .unwrap_or_else(PoisonError::into_inner) = options;
    }

    fn current_options(&self) -> AddressApiOptions {
        self.options
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the ZIP Code and ZIP Code + 4 corresponding to the given
    /// address, city, and state (use USPS state abbreviations).
    ///
    /// * `addresses` - 1 to 5 addresses to look up per request.
    pub async fn lookup_zip_code(&self, addresses: &[Address]) -> Result<ZipCodeLookupResponse> {
        check_batch(addresses)?;
        let options = self.current_options();
        let xml = request::zip_code_lookup(addresses, &options.user_id)?;
        let body = self.execute(&options, ZIPCODE_LOOKUP_OPERATION, &xml).await?;
        response::parse_zip_code_lookup(&body, addresses)
    }

    /// Returns the city and state corresponding to the given ZIP Code.
    ///
    /// * `zip_codes` - 1 to 5 ZIP codes to look up per request.
    pub async fn lookup_city_state(&self, zip_codes: &[ZipCode]) -> Result<CityStateLookupResponse> {
        check_batch(zip_codes)?;
        let options = self.current_options();
        let xml = request::city_state_lookup(zip_codes, &options.user_id)?;
        let body = self.execute(&options, CITY_STATE_LOOKUP_OPERATION, &xml).await?;
        response::parse_city_state_lookup(&body, zip_codes)
    }

    /// Corrects errors in street addresses, including abbreviations and
    /// missing information, and supplies ZIP Codes and ZIP Codes + 4.
    ///
    /// * `addresses` - 1 to 5 addresses to validate per request.
    pub async fn validate_address(&self, addresses: &[Address]) -> Result<ValidateAddressResponse> {
        check_batch(addresses)?;
        let options = self.current_options();
        let xml = request::address_validate(addresses, &options.user_id)?;
        let body = self.execute(&options, ADDRESS_VALIDATE_OPERATION, &xml).await?;
        response::parse_validate_address(&body, addresses)
    }

    /// One GET round trip: operation name and payload travel as query
    /// parameters; the response body comes back as text.
    async fn execute(
        &self,
        options: &AddressApiOptions,
        operation: &str,
        xml: &str,
    ) -> Result<String> {
        let mut url = base_url(options)?;
        url.query_pairs_mut()
            .append_pair(API_QUERY_PARAM, operation)
            .append_pair(XML_QUERY_PARAM, xml);

        debug!("executing [{operation}] request against [{url}]");
        let fetch = || async {
            let response = self.http.get(url.clone()).send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>((status, body))
        };
        let (status, body) = fetch().await.map_err(|err| {
            error!("[{operation}] request to [{url}] failed: {err:?}");
            Error::Transport(err)
        })?;
        debug!("[{operation}] response received with status [{status}]");
        Ok(body)
    }
}

fn check_batch<T>(items: &[T]) -> Result<()> {
    if items.is_empty() {
        return Err(Error::EmptyBatch);
    }
    if items.len() > MAX_BATCH_SIZE {
        return Err(Error::BatchTooLarge(items.len()));
    }
    Ok(())
}

fn base_url(options: &AddressApiOptions) -> Result<Url> {
    if options.base_api_uri.trim().is_empty() {
        return Err(Error::MissingBaseUri);
    }
    Url::parse(&options.base_api_uri).map_err(|source| Error::InvalidBaseUri {
        uri: options.base_api_uri.clone(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batches_of_one_to_five_are_accepted() {
        for len in 1..=MAX_BATCH_SIZE {
            assert!(check_batch(&vec![(); len]).is_ok());
        }
    }

    #[test]
    fn empty_batch_is_rejected() {
        let err = check_batch::<()>(&[]).unwrap_err();
        assert!(matches!(err, Error::EmptyBatch));
    }

    #[test]
    fn oversized_batch_is_rejected() {
        let err = check_batch(&[(); 6]).unwrap_err();
        assert!(matches!(err, Error::BatchTooLarge(6)));
    }

    #[test]
    fn blank_base_uri_is_a_configuration_error() {
        let options = AddressApiOptions::new("USER").with_base_api_uri("  ");
        assert!(matches!(base_url(&options), Err(Error::MissingBaseUri)));
    }

    #[test]
    fn relative_base_uri_is_a_configuration_error() {
        let options = AddressApiOptions::new("USER").with_base_api_uri("ShippingAPI.dll");
        assert!(matches!(
            base_url(&options),
            Err(Error::InvalidBaseUri { .. })
        ));
    }

    #[test]
    fn query_parameters_carry_operation_and_payload() {
        let options = AddressApiOptions::new("USER");
        let mut url = base_url(&options).unwrap();
        url.query_pairs_mut()
            .append_pair(API_QUERY_PARAM, ADDRESS_VALIDATE_OPERATION)
            .append_pair(XML_QUERY_PARAM, "<AddressValidateRequest/>");
        let query: Vec<(String, String)> = url
            .query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        assert_eq!(
            query,
            [
                ("API".to_string(), "Verify".to_string()),
                ("XML".to_string(), "<AddressValidateRequest/>".to_string()),
            ]
        );
    }
}
