//! Response-side decoding: envelope construction, top-level error
//! detection, and re-association of out-of-order result items with the
//! originally submitted batch via their tracking identifiers.

mod results;

pub use results::{CityStateLookupResult, ValidateAddressResult, ZipCodeLookupResult};

use roxmltree::{Document, Node};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{Address, ZipCode};
use crate::request::{ADDRESS_ELEMENT, ID_ATTRIBUTE, ZIP_CODE_ELEMENT};

const ERROR_ELEMENT: &str = "Error";
const YES_VALUE: &str = "Y";

/// A protocol-level error reported by the USPS API itself, either for the
/// whole request or for a single item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    pub number: Option<String>,
    pub source: Option<String>,
    pub description: Option<String>,
}

impl ApiError {
    /// Decode an `Error` element found at `node`: either `node` itself or a
    /// direct child of it. Returns `None` when no error is present.
    fn from_node(node: Node) -> Option<Self> {
        let error = if node.has_tag_name(ERROR_ELEMENT) {
            node
        } else {
            node.children().find(|child| child.has_tag_name(ERROR_ELEMENT))?
        };
        Some(Self {
            number: child_text(error, "Number"),
            source: child_text(error, "Source"),
            description: child_text(error, "Description"),
        })
    }
}

/// The decoded response to one batch operation.
///
/// Exactly one of the two shapes occurs: a top-level `error` with no
/// results, or a list of per-item results (each of which may still carry an
/// item-level non-match outcome).
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<R> {
    pub results: Vec<R>,
    pub error: Option<ApiError>,
}

pub type ZipCodeLookupResponse = ApiResponse<ZipCodeLookupResult>;
pub type CityStateLookupResponse = ApiResponse<CityStateLookupResult>;
pub type ValidateAddressResponse = ApiResponse<ValidateAddressResult>;

pub(crate) fn parse_zip_code_lookup(
    body: &str,
    originals: &[Address],
) -> Result<ZipCodeLookupResponse> {
    parse_items(body, ADDRESS_ELEMENT, originals, results::decode_zip_code_lookup)
}

pub(crate) fn parse_city_state_lookup(
    body: &str,
    originals: &[ZipCode],
) -> Result<CityStateLookupResponse> {
    parse_items(body, ZIP_CODE_ELEMENT, originals, results::decode_city_state_lookup)
}

pub(crate) fn parse_validate_address(
    body: &str,
    originals: &[Address],
) -> Result<ValidateAddressResponse> {
    parse_items(body, ADDRESS_ELEMENT, originals, results::decode_validate_address)
}

/// Decode a response document into an envelope.
///
/// Items are matched back to `originals` by the `ID` attribute each element
/// carries; output order follows the numeric identifier, not the wire
/// order. Every identifier must be present, integral, and in range of the
/// submitted batch, and the response may not contain more items than were
/// submitted — anything else means correlation is impossible and the whole
/// response is rejected.
fn parse_items<T, R, F>(body: &str, item_tag: &str, originals: &[T], decode: F) -> Result<ApiResponse<R>>
where
    F: Fn(Node, &T) -> R,
{
    let document = Document::parse(body)?;
    let root = document.root_element();

    if let Some(error) = ApiError::from_node(root) {
        return Ok(ApiResponse {
            results: Vec::new(),
            error: Some(error),
        });
    }

    let mut items = Vec::new();
    for element in root.children().filter(|child| child.has_tag_name(item_tag)) {
        let raw_id = element
            .attribute(ID_ATTRIBUTE)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(Error::MissingTrackingId)?;
        let tracking_id: usize = raw_id
            .parse()
            .map_err(|_| Error::InvalidTrackingId(raw_id.to_string()))?;
        let original = originals.get(tracking_id).ok_or(Error::TrackingIdOutOfRange {
            id: tracking_id,
            batch_len: originals.len(),
        })?;
        items.push((tracking_id, element, original));
    }

    if items.len() > originals.len() {
        return Err(Error::TooManyResults {
            returned: items.len(),
            submitted: originals.len(),
        });
    }

    items.sort_by_key(|(tracking_id, ..)| *tracking_id);
    let results = items
        .into_iter()
        .map(|(_, element, original)| decode(element, original))
        .collect();
    Ok(ApiResponse {
        results,
        error: None,
    })
}

/// Non-empty text content of the named child element.
pub(crate) fn child_text(element: Node, name: &str) -> Option<String> {
    element
        .children()
        .find(|child| child.has_tag_name(name))
        .and_then(|child| child.text())
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// Y/N flag decoding: `"Y"` is true, any other present value is false, an
/// absent element stays unknown.
pub(crate) fn yn_flag(element: Node, name: &str) -> Option<bool> {
    child_text(element, name).map(|value| value == YES_VALUE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id_of(element: Node, _original: &i32) -> String {
        element.attribute(ID_ATTRIBUTE).unwrap_or_default().to_string()
    }

    #[test]
    fn top_level_error_yields_empty_results() {
        let body = "<Error>\
                    <Number>80040B1A</Number>\
                    <Source>USPSCOM::DoAuth</Source>\
                    <Description>Authorization failure.</Description>\
                    </Error>";
        let response = parse_items(body, "Item", &[0], id_of).unwrap();
        assert!(response.results.is_empty());
        let error = response.error.unwrap();
        assert_eq!(error.number.as_deref(), Some("80040B1A"));
        assert_eq!(error.description.as_deref(), Some("Authorization failure."));
    }

    #[test]
    fn items_are_ordered_by_numeric_identifier() {
        let body = "<Response>\
                    <Item ID=\"2\"/><Item ID=\"0\"/><Item ID=\"1\"/>\
                    </Response>";
        let response = parse_items(body, "Item", &[0, 1, 2], id_of).unwrap();
        assert!(response.error.is_none());
        assert_eq!(response.results, ["0", "1", "2"]);
    }

    #[test]
    fn missing_identifier_is_a_correlation_error() {
        let body = "<Response><Item/></Response>";
        let err = parse_items(body, "Item", &[0], id_of).unwrap_err();
        assert!(matches!(err, Error::MissingTrackingId));

        let body = "<Response><Item ID=\"  \"/></Response>";
        let err = parse_items(body, "Item", &[0], id_of).unwrap_err();
        assert!(matches!(err, Error::MissingTrackingId));
    }

    #[test]
    fn non_integer_identifier_is_a_correlation_error() {
        let body = "<Response><Item ID=\"first\"/></Response>";
        let err = parse_items(body, "Item", &[0], id_of).unwrap_err();
        assert!(matches!(err, Error::InvalidTrackingId(value) if value == "first"));
    }

    #[test]
    fn out_of_range_identifier_is_a_correlation_error() {
        let body = "<Response><Item ID=\"3\"/></Response>";
        let err = parse_items(body, "Item", &[0, 1], id_of).unwrap_err();
        assert!(matches!(
            err,
            Error::TrackingIdOutOfRange { id: 3, batch_len: 2 }
        ));
    }

    #[test]
    fn surplus_items_are_a_correlation_error() {
        let body = "<Response><Item ID=\"0\"/><Item ID=\"0\"/></Response>";
        let err = parse_items(body, "Item", &[0], id_of).unwrap_err();
        assert!(matches!(
            err,
            Error::TooManyResults { returned: 2, submitted: 1 }
        ));
    }

    #[test]
    fn unparseable_body_is_a_parse_error() {
        let err = parse_items("not xml at all <", "Item", &[0], id_of).unwrap_err();
        assert!(matches!(err, Error::ResponseParse(_)));
    }

    #[test]
    fn yn_flags_decode_to_tri_state() {
        let body = "<Item><Yes>Y</Yes><No>N</No><Empty></Empty></Item>";
        let document = Document::parse(body).unwrap();
        let element = document.root_element();
        assert_eq!(yn_flag(element, "Yes"), Some(true));
        assert_eq!(yn_flag(element, "No"), Some(false));
        assert_eq!(yn_flag(element, "Empty"), None);
        assert_eq!(yn_flag(element, "Absent"), None);
    }
}
