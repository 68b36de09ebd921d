//! Request-side wire encoding: sanitization of free-text fields and
//! serialization of item batches into the XML documents USPS expects.

use std::borrow::Cow;
use std::io;
use std::sync::LazyLock;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use regex::Regex;

use crate::error::Result;
use crate::model::{Address, ZipCode};

/// Characters the wire format does not accept in text fields.
static INVALID_WIRE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[*,.()":;'@&<>-]+"#).unwrap());

pub(crate) const ID_ATTRIBUTE: &str = "ID";
pub(crate) const ADDRESS_ELEMENT: &str = "Address";
pub(crate) const ZIP_CODE_ELEMENT: &str = "ZipCode";

const USERID_ATTRIBUTE: &str = "USERID";
const REVISION_ELEMENT: &str = "Revision";
const ZIPCODE_LOOKUP_REQUEST_ELEMENT: &str = "ZipCodeLookupRequest";
const CITY_STATE_LOOKUP_REQUEST_ELEMENT: &str = "CityStateLookupRequest";
const ADDRESS_VALIDATE_REQUEST_ELEMENT: &str = "AddressValidateRequest";

/// Strip the punctuation set USPS rejects, leaving all other characters
/// untouched. Absent input serializes as the empty string.
fn clean(field: Option<&str>) -> Cow<'_, str> {
    match field {
        Some(text) => INVALID_WIRE_CHARS.replace_all(text, ""),
        None => Cow::Borrowed(""),
    }
}

fn write_field<W: io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    value: Option<&str>,
) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(&clean(value))))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_address<W: io::Write>(
    writer: &mut Writer<W>,
    address: &Address,
    tracking_id: usize,
) -> io::Result<()> {
    let mut start = BytesStart::new(ADDRESS_ELEMENT);
    start.push_attribute((ID_ATTRIBUTE, tracking_id.to_string().as_str()));
    writer.write_event(Event::Start(start))?;
    write_field(writer, "FirmName", address.firm_name.as_deref())?;
    write_field(writer, "Address1", address.address1.as_deref())?;
    write_field(writer, "Address2", address.address2.as_deref())?;
    write_field(writer, "City", address.city.as_deref())?;
    write_field(writer, "State", address.state.as_deref())?;
    write_field(writer, "Urbanization", address.urbanization.as_deref())?;
    write_field(writer, "Zip5", address.zip5.as_deref())?;
    write_field(writer, "Zip4", address.zip4.as_deref())?;
    writer.write_event(Event::End(BytesEnd::new(ADDRESS_ELEMENT)))
}

fn write_zip_code<W: io::Write>(
    writer: &mut Writer<W>,
    zip_code: &ZipCode,
    tracking_id: usize,
) -> io::Result<()> {
    let mut start = BytesStart::new(ZIP_CODE_ELEMENT);
    start.push_attribute((ID_ATTRIBUTE, tracking_id.to_string().as_str()));
    writer.write_event(Event::Start(start))?;
    write_field(writer, "Zip5", zip_code.zip5.as_deref())?;
    writer.write_event(Event::End(BytesEnd::new(ZIP_CODE_ELEMENT)))
}

/// Build a request document: the operation-specific root element carrying
/// the `USERID` attribute, with one child per item written in submission
/// order by `write_items`.
fn document<F>(root: &str, user_id: &str, write_items: F) -> Result<String>
where
    F: FnOnce(&mut Writer<Vec<u8>>) -> io::Result<()>,
{
    let mut writer = Writer::new(Vec::new());
    let mut start = BytesStart::new(root);
    start.push_attribute((USERID_ATTRIBUTE, user_id));
    writer.write_event(Event::Start(start))?;
    write_items(&mut writer)?;
    writer.write_event(Event::End(BytesEnd::new(root)))?;
    let xml = writer.into_inner();
    Ok(String::from_utf8(xml).expect("XML writer emitted invalid UTF-8"))
}

pub(crate) fn zip_code_lookup(addresses: &[Address], user_id: &str) -> Result<String> {
    document(ZIPCODE_LOOKUP_REQUEST_ELEMENT, user_id, |writer| {
        for (tracking_id, address) in addresses.iter().enumerate() {
            write_address(writer, address, tracking_id)?;
        }
        Ok(())
    })
}

pub(crate) fn city_state_lookup(zip_codes: &[ZipCode], user_id: &str) -> Result<String> {
    document(CITY_STATE_LOOKUP_REQUEST_ELEMENT, user_id, |writer| {
        for (tracking_id, zip_code) in zip_codes.iter().enumerate() {
            write_zip_code(writer, zip_code, tracking_id)?;
        }
        Ok(())
    })
}

pub(crate) fn address_validate(addresses: &[Address], user_id: &str) -> Result<String> {
    document(ADDRESS_VALIDATE_REQUEST_ELEMENT, user_id, |writer| {
        // Revision selects the extended (DPV) response fields.
        write_field(writer, REVISION_ELEMENT, Some("1"))?;
        for (tracking_id, address) in addresses.iter().enumerate() {
            write_address(writer, address, tracking_id)?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(address1: &str) -> Address {
        Address {
            address1: Some(address1.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn strips_invalid_characters() {
        assert_eq!(clean(Some("test&")), "test");
        assert_eq!(clean(Some("&")), "");
        assert_eq!(clean(Some(r#"*,.()":;'-@&<>"#)), "");
        assert_eq!(clean(Some("&&test,.tes*t>")), "testtest");
    }

    #[test]
    fn leaves_other_characters_untouched() {
        assert_eq!(clean(Some("1600 Pennsylvania Ave NW #2")), "1600 Pennsylvania Ave NW #2");
    }

    #[test]
    fn absent_input_maps_to_empty() {
        assert_eq!(clean(None), "");
        assert_eq!(clean(Some("")), "");
    }

    #[test]
    fn serializes_a_full_address_batch() {
        let addresses = [Address {
            firm_name: None,
            address1: Some("TEST_ADDRESS1".into()),
            address2: Some("TEST_ADDRESS2".into()),
            city: Some("TEST_CITY".into()),
            state: Some("MN".into()),
            urbanization: None,
            zip5: Some("TEST_ZIP5".into()),
            zip4: Some("TEST_ZIP4".into()),
        }];

        let xml = zip_code_lookup(&addresses, "TESTUSER123").unwrap();
        assert_eq!(
            xml,
            "<ZipCodeLookupRequest USERID=\"TESTUSER123\">\
             <Address ID=\"0\">\
             <FirmName></FirmName>\
             <Address1>TEST_ADDRESS1</Address1>\
             <Address2>TEST_ADDRESS2</Address2>\
             <City>TEST_CITY</City>\
             <State>MN</State>\
             <Urbanization></Urbanization>\
             <Zip5>TEST_ZIP5</Zip5>\
             <Zip4>TEST_ZIP4</Zip4>\
             </Address>\
             </ZipCodeLookupRequest>"
        );
    }

    #[test]
    fn assigns_positional_tracking_identifiers() {
        let addresses: Vec<Address> =
            ["3", "4", "1", "2"].iter().map(|a| address(a)).collect();
        let xml = address_validate(&addresses, "USER").unwrap();

        let document = roxmltree::Document::parse(&xml).unwrap();
        let ids: Vec<&str> = document
            .root_element()
            .children()
            .filter(|node| node.has_tag_name(ADDRESS_ELEMENT))
            .map(|node| node.attribute(ID_ATTRIBUTE).unwrap())
            .collect();
        assert_eq!(ids, ["0", "1", "2", "3"]);
    }

    #[test]
    fn validation_request_carries_revision_marker() {
        let xml = address_validate(&[address("A ST")], "USER").unwrap();
        assert!(xml.starts_with("<AddressValidateRequest USERID=\"USER\"><Revision>1</Revision>"));
    }

    #[test]
    fn city_state_request_wraps_zip_codes() {
        let zip_codes = [ZipCode::new("55111"), ZipCode::new("90210")];
        let xml = city_state_lookup(&zip_codes, "USER").unwrap();
        assert_eq!(
            xml,
            "<CityStateLookupRequest USERID=\"USER\">\
             <ZipCode ID=\"0\"><Zip5>55111</Zip5></ZipCode>\
             <ZipCode ID=\"1\"><Zip5>90210</Zip5></ZipCode>\
             </CityStateLookupRequest>"
        );
    }

    #[test]
    fn fields_are_sanitized_before_serialization() {
        let xml = zip_code_lookup(&[address("Main & 1st, Suite 'B'")], "USER").unwrap();
        assert!(xml.contains("<Address1>Main  1st Suite B</Address1>"));
    }
}
