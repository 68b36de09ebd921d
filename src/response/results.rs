//! Item-level result types for the three operations, and the decoding of a
//! single result element into each of them.

use roxmltree::Node;
use serde::Serialize;

use crate::codes::{ApiResultType, DpvConfirmationCode, DpvFootnoteCode, FootnoteCode};
use crate::model::{Address, ZipCode};
use crate::response::{child_text, yn_flag, ApiError};

/// The item-level result of a ZIP code lookup.
#[derive(Debug, Clone, Serialize)]
pub struct ZipCodeLookupResult {
    /// The exact item submitted in the original request.
    pub original: Address,
    /// The classified outcome for this item.
    pub result_type: ApiResultType,
    /// Additional message USPS sent back for this item.
    pub message: Option<String>,
    pub firm_name: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub urbanization: Option<String>,
    pub zip5: Option<String>,
    pub zip4: Option<String>,
}

/// The item-level result of a city/state lookup.
#[derive(Debug, Clone, Serialize)]
pub struct CityStateLookupResult {
    /// The exact item submitted in the original request.
    pub original: ZipCode,
    /// The classified outcome for this item.
    pub result_type: ApiResultType,
    /// Additional message USPS sent back for this item.
    pub message: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip5: Option<String>,
}

/// The item-level result of an address validation.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateAddressResult {
    /// The exact item submitted in the original request.
    pub original: Address,
    /// The classified outcome for this item.
    pub result_type: ApiResultType,
    /// Additional message USPS sent back for this item.
    pub message: Option<String>,
    pub firm_name: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub urbanization: Option<String>,
    pub zip5: Option<String>,
    pub zip4: Option<String>,
    /// The abbreviation for `address2`.
    pub address2_abbreviation: Option<String>,
    /// The abbreviated city name.
    pub city_abbreviation: Option<String>,
    /// The delivery point information.
    pub delivery_point: Option<String>,
    /// The carrier route number.
    pub carrier_route: Option<String>,
    /// Notes on the nature of the match and any corrections applied.
    /// Unrecognized codes on the wire are dropped, not errors.
    pub footnotes: Vec<FootnoteCode>,
    /// USPS's primary deliverability signal.
    pub dpv_confirmation: Option<DpvConfirmationCode>,
    /// DPV standardized footnotes. Unrecognized codes are dropped.
    pub dpv_footnotes: Vec<DpvFootnoteCode>,
    /// Whether the address is a commercial mail-receiving agency. `None`
    /// when USPS did not report the flag.
    pub is_cmra: Option<bool>,
    /// Whether the address is a business. `None` when not reported.
    pub is_business: Option<bool>,
    /// Whether delivery is to a central point (call window, cluster box).
    /// `None` when not reported.
    pub is_central_delivery_point: Option<bool>,
    /// Whether the location is unoccupied. `None` when not reported.
    pub is_vacant: Option<bool>,
}

/// Classify one result element: an embedded `Error` child translates into a
/// non-match outcome via its description text, with the raw text preserved
/// as the message; no error means a match.
fn classify(element: Node) -> (ApiResultType, Option<String>) {
    match ApiError::from_node(element) {
        Some(error) => {
            let result_type = error
                .description
                .as_deref()
                .and_then(|text| ApiResultType::from_code(text.trim()))
                .unwrap_or(ApiResultType::UnknownResult);
            (result_type, error.description)
        }
        None => (ApiResultType::Match, None),
    }
}

pub(crate) fn decode_zip_code_lookup(element: Node, original: &Address) -> ZipCodeLookupResult {
    let (result_type, message) = classify(element);
    ZipCodeLookupResult {
        original: original.clone(),
        result_type,
        message,
        firm_name: child_text(element, "FirmName"),
        address1: child_text(element, "Address1"),
        address2: child_text(element, "Address2"),
        city: child_text(element, "City"),
        state: child_text(element, "State"),
        urbanization: child_text(element, "Urbanization"),
        zip5: child_text(element, "Zip5"),
        zip4: child_text(element, "Zip4"),
    }
}

pub(crate) fn decode_city_state_lookup(element: Node, original: &ZipCode) -> CityStateLookupResult {
    let (result_type, message) = classify(element);
    CityStateLookupResult {
        original: original.clone(),
        result_type,
        message,
        city: child_text(element, "City"),
        state: child_text(element, "State"),
        zip5: child_text(element, "Zip5"),
    }
}

pub(crate) fn decode_validate_address(element: Node, original: &Address) -> ValidateAddressResult {
    let (mut result_type, message) = classify(element);
    // ReturnText marks a default/ambiguous match even without an Error child.
    if child_text(element, "ReturnText").is_some() {
        result_type = ApiResultType::DefaultReturned;
    }

    let footnotes = child_text(element, "Footnotes")
        .map(|codes| {
            codes
                .chars()
                .filter_map(|code| {
                    let mut buf = [0u8; 4];
                    FootnoteCode::from_code(code.encode_utf8(&mut buf))
                })
                .collect()
        })
        .unwrap_or_default();

    // Fixed-width pairs, no delimiter; an odd trailing character is ignored.
    let dpv_footnotes = child_text(element, "DPVFootnotes")
        .map(|codes| {
            codes
                .as_bytes()
                .chunks_exact(2)
                .filter_map(|pair| std::str::from_utf8(pair).ok())
                .filter_map(DpvFootnoteCode::from_code)
                .collect()
        })
        .unwrap_or_default();

    ValidateAddressResult {
        original: original.clone(),
        result_type,
        message,
        firm_name: child_text(element, "FirmName"),
        address1: child_text(element, "Address1"),
        address2: child_text(element, "Address2"),
        city: child_text(element, "City"),
        state: child_text(element, "State"),
        urbanization: child_text(element, "Urbanization"),
        zip5: child_text(element, "Zip5"),
        zip4: child_text(element, "Zip4"),
        address2_abbreviation: child_text(element, "Address2Abbreviation"),
        city_abbreviation: child_text(element, "CityAbbreviation"),
        delivery_point: child_text(element, "DeliveryPoint"),
        carrier_route: child_text(element, "CarrierRoute"),
        footnotes,
        dpv_confirmation: child_text(element, "DPVConfirmation")
            .and_then(|value| DpvConfirmationCode::from_code(value.trim())),
        dpv_footnotes,
        is_cmra: yn_flag(element, "DPVCMRA"),
        is_business: yn_flag(element, "Business"),
        is_central_delivery_point: yn_flag(element, "CentralDeliveryPoint"),
        is_vacant: yn_flag(element, "Vacant"),
    }
}
