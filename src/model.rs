use serde::{Deserialize, Serialize};

/// A mailing or physical address as submitted to the USPS Address API.
///
/// Every field is optional; unset fields are sent as empty elements. USPS
/// expects the unit/suite designator in `address1` and the street address in
/// `address2`.
#[derive(Debug, Clone, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// The name of the business or firm. Example: XYZ Corp.
    pub firm_name: Option<String>,
    /// The address prefix. Example: SUITE K
    pub address1: Option<String>,
    /// The street address. Example: 1234 Someplace St E
    pub address2: Option<String>,
    /// Example: Minneapolis
    pub city: Option<String>,
    /// The two character state code. Example: MN
    pub state: Option<String>,
    /// For Puerto Rico addresses only.
    pub urbanization: Option<String>,
    /// The 5-digit ZIP Code. Example: 55111
    pub zip5: Option<String>,
    /// The ZIP+4 extension. Example: 8765
    pub zip4: Option<String>,
}

/// A ZIP Code as submitted to a city/state lookup.
#[derive(Debug, Clone, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZipCode {
    /// The 5-digit ZIP Code. Example: 55111
    pub zip5: Option<String>,
}

impl ZipCode {
    pub fn new(zip5: impl Into<String>) -> Self {
        Self {
            zip5: Some(zip5.into()),
        }
    }
}
