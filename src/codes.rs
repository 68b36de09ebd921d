//! Enumerations for the compact codes USPS embeds in responses, and the
//! translation from wire text back into typed values.
//!
//! Each enumeration carries a static table of its values in declaration
//! order. Translation matches the incoming text against a value's display
//! label or its symbolic name, case-sensitively; the first match wins and an
//! unmatched string simply yields `None`, so callers decide whether absence
//! is an error or a leave-unset situation.

/// Generates an enumeration plus its wire-code lookup table.
///
/// A variant written as `Name = "label"` matches either `"label"` or
/// `"Name"`; a variant without a label matches its name only.
macro_rules! wire_codes {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident $(= $label:literal)?
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Every value, in declaration order.
            pub const VALUES: &'static [$name] = &[
                $($name::$variant,)+
            ];

            /// The symbolic identifier of this value.
            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant),)+
                }
            }

            /// The display label USPS uses on the wire, where one exists.
            pub fn label(self) -> Option<&'static str> {
                match self {
                    $($name::$variant => wire_codes!(@label $($label)?),)+
                }
            }

            /// Translate wire text into a value, matching the display label
            /// or the symbolic name exactly.
            pub fn from_code(text: &str) -> Option<Self> {
                Self::VALUES
                    .iter()
                    .copied()
                    .find(|value| value.label() == Some(text) || value.name() == text)
            }
        }
    };
    (@label $label:literal) => { Some($label) };
    (@label) => { None };
}

wire_codes! {
    /// The item-level outcome of a request to the USPS Address API.
    ///
    /// USPS reports non-match outcomes as free-text error descriptions; the
    /// labels here are the exact strings the API sends back.
    pub enum ApiResultType {
        /// A match was found for the item.
        Match = "Match",
        /// The address was found but more information is needed (such as an
        /// apartment, suite, or box number) to match to a specific address.
        DefaultReturned = "Default address: The address you entered was found but more information is needed (such as an apartment, suite, or box number) to match to a specific address.",
        /// The address is invalid.
        InvalidAddress = "Invalid Address.",
        /// The ZIP Code value was invalid.
        InvalidZipCode = "Invalid Zip Code.",
        /// The ZIP Code was not exactly 5 digits.
        InvalidZipCodeLength = "ZIPCode must be 5 characters",
        /// The city value was invalid.
        InvalidCity = "Invalid City.",
        /// The two-character state code was invalid.
        InvalidStateCode = "Invalid State Code.",
        /// The address was not found.
        AddressNotFound = "Address Not Found.",
        /// Multiple addresses were found and no default exists.
        MultipleFoundNoDefault = "Multiple addresses were found for the information you entered, and no default exists.",
        /// The API returned an outcome this crate does not recognize; the
        /// raw text is preserved on the result's message.
        UnknownResult,
    }
}

wire_codes! {
    /// Footnotes describing what correction or observation was made while
    /// matching an address. Returned as a string of single-character codes.
    pub enum FootnoteCode {
        /// The address had a different 5-digit ZIP Code; the correct one is
        /// in the output address.
        ZipCodeCorrected = "A",
        /// City or state spelling was corrected to the standard form.
        CityStateSpellingCorrected = "B",
        /// Neither a valid city/state nor a valid 5-digit ZIP was present.
        InvalidCityStateZip = "C",
        /// Listed on the national ZIP+4 file as a non-deliverable location.
        NoZip4Assigned = "D",
        /// Multiple records returned, all sharing the same 5-digit ZIP.
        ZipCodeAssignedForMultipleResponse = "E",
        /// The address could not be found in the city, state, or ZIP given.
        AddressNotFoundInNationalDirectory = "F",
        /// Part of the firm line was moved into the address line to match.
        InformationInFirmLineUsedForMatching = "G",
        /// The address is a building; no apartment/suite number was given.
        MissingSecondaryNumber = "H",
        /// Insufficient or incorrect data to determine a single ZIP+4.
        InsufficientIncorrectAddressData = "I",
        /// The input contained two addresses.
        DualAddress = "J",
        /// Cardinal-point directional changed more than 90 degrees.
        MultipleResponseDueToCardinalRule = "K",
        /// An address component was added, changed, or deleted to match.
        AddressComponentChanged = "L",
        /// Match has been converted via LACS.
        MatchConvertedViaLacs = "LI",
        /// Street name spelling was changed to achieve a match.
        StreetNameChanged = "M",
        /// The delivery address was standardized.
        AddressStandardized = "N",
        /// Lowest ZIP+4 add-on used to break a tie between records.
        LowestZip4TieBreaker = "O",
        /// The address is matchable but known by another, preferred name.
        BetterAddressExists = "P",
        /// Match to an address with a unique ZIP Code.
        UniqueZipCodeMatch = "Q",
        /// The EWS file indicates an exact match will be available soon.
        NoMatchDueToEws = "R",
        /// Secondary information was present but not valid on the ZIP+4 file.
        IncorrectSecondaryAddress = "S",
        /// Single response, but flagged as magnet street syndrome.
        MultipleResponseDueToMagnetStreetSyndrome = "T",
        /// City name is not an official last-line name for the ZIP.
        UnofficialPostOfficeName = "U",
        /// City and state could not be verified against the 5-digit ZIP.
        UnverifiableCityState = "V",
        /// Street delivery is not provided for this "small town default" ZIP.
        InvalidDeliveryAddress = "W",
        /// Default match inside a unique ZIP Code.
        UniqueZipCodeGenerated = "X",
        /// Match made to a record with a military ZIP Code.
        MilitaryMatch = "Y",
        /// Matched via the ZIPMOVE product data.
        MatchMadeUsingZipMoveProductData = "Z",
    }
}

wire_codes! {
    /// DPV standardized footnotes, returned as fixed-width two-character
    /// code pairs with no delimiter.
    pub enum DpvFootnoteCode {
        /// Input address matched to the ZIP+4 file.
        InputMatchedToZip4File = "AA",
        /// Input address not matched to the ZIP+4 file.
        InputNotMatchedToZip4File = "A1",
        /// Matched to DPV (all components).
        MatchedAllDpvComponents = "BB",
        /// Secondary number present but invalid.
        SecondaryNumberNotMatched = "CC",
        /// High-rise address missing a secondary number.
        HighRiseAddressMissingSecondaryNumber = "N1",
        /// Primary number missing.
        PrimaryNumberMissing = "M1",
        /// Primary number invalid.
        PrimaryNumberInvalid = "M3",
        /// Input address RR or HC box number missing.
        RuralRouteBoxNumberMissing = "P1",
        /// Input address PO, RR, or HC box number invalid.
        BoxNumberInvalid = "P3",
        /// Matched to a military address.
        MatchedMilitaryAddress = "F1",
        /// Matched to a general delivery address.
        MatchedGeneralDeliveryAddress = "G1",
        /// Matched to a unique ZIP Code.
        MatchedUniqueZipCode = "U1",
    }
}

wire_codes! {
    /// The DPV confirmation indicator: USPS's primary signal for whether an
    /// address was considered deliverable.
    pub enum DpvConfirmationCode {
        /// Confirmed for both primary and (if present) secondary numbers.
        BothConfirmed = "Y",
        /// Primary confirmed; secondary number information was missing.
        ConfirmedPrimaryMissingSecondary = "D",
        /// Primary confirmed; secondary was present but not confirmed.
        ConfirmedPrimaryUnconfirmedSecondary = "S",
        /// Neither primary nor secondary information confirmed.
        BothNotConfirmed = "N",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_by_display_label() {
        assert_eq!(
            ApiResultType::from_code("Invalid Address."),
            Some(ApiResultType::InvalidAddress)
        );
        assert_eq!(
            DpvConfirmationCode::from_code("D"),
            Some(DpvConfirmationCode::ConfirmedPrimaryMissingSecondary)
        );
    }

    #[test]
    fn translates_by_symbolic_name() {
        assert_eq!(
            ApiResultType::from_code("InvalidAddress"),
            Some(ApiResultType::InvalidAddress)
        );
        // UnknownResult has no wire label and is reachable by name only.
        assert_eq!(
            ApiResultType::from_code("UnknownResult"),
            Some(ApiResultType::UnknownResult)
        );
    }

    #[test]
    fn unmatched_text_is_not_an_error() {
        assert_eq!(ApiResultType::from_code("test"), None);
        assert_eq!(FootnoteCode::from_code("?"), None);
        assert_eq!(DpvFootnoteCode::from_code("ZZ"), None);
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(ApiResultType::from_code("invalid address."), None);
        assert_eq!(DpvConfirmationCode::from_code("y"), None);
    }

    #[test]
    fn two_character_codes_translate() {
        assert_eq!(
            DpvFootnoteCode::from_code("AA"),
            Some(DpvFootnoteCode::InputMatchedToZip4File)
        );
        assert_eq!(
            DpvFootnoteCode::from_code("BB"),
            Some(DpvFootnoteCode::MatchedAllDpvComponents)
        );
    }
}
