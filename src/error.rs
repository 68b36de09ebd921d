use thiserror::Error;

use crate::client::MAX_BATCH_SIZE;

/// Everything that can go wrong while talking to the USPS Address API.
///
/// Protocol-level failures reported by USPS itself (a top-level `Error`
/// element, or a per-item error) are not represented here: they come back as
/// data on the response envelope for the caller to inspect.
#[derive(Error, Debug)]
pub enum Error {
    #[error("at least one item must be supplied per request")]
    EmptyBatch,

    #[error("at most {MAX_BATCH_SIZE} items may be supplied per request, got [{0}]")]
    BatchTooLarge(usize),

    #[error("base API URI is unset; check the client configuration")]
    MissingBaseUri,

    #[error("`USPS_USER_ID` environment variable must be set")]
    MissingUserId,

    #[error("base API URI [{uri}] is not a well-formed absolute URI: {source}")]
    InvalidBaseUri {
        uri: String,
        #[source]
        source: url::ParseError,
    },

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to encode request XML: {0}")]
    RequestEncode(#[from] std::io::Error),

    #[error("malformed XML in response body: {0}")]
    ResponseParse(#[from] roxmltree::Error),

    #[error("result item carries no tracking identifier; unable to associate it with an original item")]
    MissingTrackingId,

    #[error("tracking identifier [{0}] is not an integer; unable to associate the result with an original item")]
    InvalidTrackingId(String),

    #[error("tracking identifier [{id}] is out of range for a batch of [{batch_len}] items")]
    TrackingIdOutOfRange { id: usize, batch_len: usize },

    #[error("response contains [{returned}] items for a batch of [{submitted}]")]
    TooManyResults { returned: usize, submitted: usize },
}

/// Result type alias for USPS Address API operations.
pub type Result<T> = std::result::Result<T, Error>;
