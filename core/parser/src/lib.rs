//! SMS backup XML parsing.
//!
//! Backups are XML documents with a root element wrapping zero or more `sms`
//! elements, each carrying optional `address`, `date`, `type`, `body`, `read`
//! and `status` attributes. Parsing extracts one [`SmsRecord`] per `sms`
//! element in document order; no schema validation is performed beyond
//! well-formedness, and unexpected elements are ignored.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use smsvault_common::{Error, Result, SmsRecord};

/// Parse a complete SMS backup document into ordered records.
///
/// # Postconditions
/// - Returns exactly one record per direct `sms` child of the root, in
///   document order; missing attributes yield `None` fields.
///
/// # Errors
/// - `Error::Parse` if the input is not well-formed XML (including invalid
///   UTF-8, mismatched tags, a truncated document, no root element, or
///   content after the root element).
pub fn parse_sms_xml(content: &[u8]) -> Result<Vec<SmsRecord>> {
    let text = std::str::from_utf8(content)
        .map_err(|e| Error::Parse(format!("Backup is not valid UTF-8: {}", e)))?;

    let mut reader = Reader::from_str(text);
    let mut records = Vec::new();
    let mut depth = 0usize;
    let mut saw_root = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if depth == 0 {
                    mark_root(&mut saw_root, &reader)?;
                } else if depth == 1 && e.local_name().as_ref() == b"sms" {
                    records.push(record_from_element(&e)?);
                }
                depth += 1;
            }
            Ok(Event::Empty(e)) => {
                if depth == 0 {
                    mark_root(&mut saw_root, &reader)?;
                } else if depth == 1 && e.local_name().as_ref() == b"sms" {
                    records.push(record_from_element(&e)?);
                }
            }
            Ok(Event::End(_)) => {
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Text(t)) => {
                // Only whitespace is legal between the document boundaries
                // and the root element.
                if depth == 0 && !t.as_ref().iter().all(u8::is_ascii_whitespace) {
                    return Err(Error::Parse(format!(
                        "Text outside the root element at byte {}",
                        reader.buffer_position()
                    )));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(Error::Parse(format!(
                    "Malformed XML at byte {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
        }
    }

    if !saw_root {
        return Err(Error::Parse("Document has no root element".to_string()));
    }
    if depth != 0 {
        return Err(Error::Parse("Unexpected end of document".to_string()));
    }

    Ok(records)
}

/// Record that a depth-0 element opened, rejecting a second root.
fn mark_root<R>(saw_root: &mut bool, reader: &Reader<R>) -> Result<()> {
    if *saw_root {
        return Err(Error::Parse(format!(
            "Content after the root element at byte {}",
            reader.buffer_position()
        )));
    }
    *saw_root = true;
    Ok(())
}

/// Copy the known attributes of one `sms` element into a record.
fn record_from_element(element: &BytesStart<'_>) -> Result<SmsRecord> {
    let mut record = SmsRecord::empty();

    for attribute in element.attributes() {
        let attribute =
            attribute.map_err(|e| Error::Parse(format!("Malformed attribute: {}", e)))?;
        let value = attribute
            .unescape_value()
            .map_err(|e| Error::Parse(format!("Malformed attribute value: {}", e)))?
            .into_owned();

        match attribute.key.as_ref() {
            b"address" => record.address = Some(value),
            b"date" => record.date = Some(value),
            b"type" => record.message_type = Some(value),
            b"body" => record.body = Some(value),
            b"read" => record.read = Some(value),
            b"status" => record.status = Some(value),
            _ => {}
        }
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BACKUP_TWO_MESSAGES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<smses count="2">
  <sms address="+15551234567" date="1672574400000" type="1" body="Happy new year!" read="1" status="-1" />
  <sms address="+15557654321" date="1672660800000" type="2" body="You too" read="1" status="-1" />
</smses>"#;

    #[test]
    fn test_parses_records_in_document_order() {
        let records = parse_sms_xml(BACKUP_TWO_MESSAGES.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].address.as_deref(), Some("+15551234567"));
        assert_eq!(records[0].body.as_deref(), Some("Happy new year!"));
        assert_eq!(records[0].message_type.as_deref(), Some("1"));
        assert_eq!(records[1].address.as_deref(), Some("+15557654321"));
        assert_eq!(records[1].message_type.as_deref(), Some("2"));
    }

    #[test]
    fn test_empty_backup_yields_no_records() {
        let records = parse_sms_xml(b"<smses count=\"0\"></smses>").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_missing_attributes_become_none() {
        let xml = r#"<smses><sms address="+15551234567" body="no metadata" /></smses>"#;
        let records = parse_sms_xml(xml.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].address.as_deref(), Some("+15551234567"));
        assert_eq!(records[0].body.as_deref(), Some("no metadata"));
        assert_eq!(records[0].date, None);
        assert_eq!(records[0].message_type, None);
        assert_eq!(records[0].read, None);
        assert_eq!(records[0].status, None);
    }

    #[test]
    fn test_unknown_attributes_are_ignored() {
        let xml = r#"<smses><sms address="a" locked="0" sub_id="1" /></smses>"#;
        let records = parse_sms_xml(xml.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].address.as_deref(), Some("a"));
    }

    #[test]
    fn test_unexpected_elements_are_ignored() {
        let xml = r#"<smses>
            <mms address="ignored" />
            <sms address="kept" />
            <sms address="nested-parent"><part body="not a record" /></sms>
        </smses>"#;
        let records = parse_sms_xml(xml.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].address.as_deref(), Some("kept"));
        assert_eq!(records[1].address.as_deref(), Some("nested-parent"));
    }

    #[test]
    fn test_nested_sms_elements_are_not_records() {
        // Only direct children of the root count.
        let xml = r#"<smses><wrapper><sms address="deep" /></wrapper></smses>"#;
        let records = parse_sms_xml(xml.as_bytes()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_escaped_attribute_values_are_unescaped() {
        let xml = r#"<smses><sms body="fish &amp; chips &lt;3" /></smses>"#;
        let records = parse_sms_xml(xml.as_bytes()).unwrap();
        assert_eq!(records[0].body.as_deref(), Some("fish & chips <3"));
    }

    #[test]
    fn test_mismatched_tags_fail() {
        let result = parse_sms_xml(b"<smses><sms address=\"a\"></smses>");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_truncated_document_fails() {
        let result = parse_sms_xml(b"<smses><sms address=\"a\" />");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_text_after_root_fails() {
        let result = parse_sms_xml(b"<smses></smses>junk");
        assert!(matches!(result, Err(Error::Parse(_))));

        let result = parse_sms_xml(b"<smses/>junk");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_second_root_element_fails() {
        let result = parse_sms_xml(b"<smses></smses><smses><sms address=\"a\" /></smses>");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_text_before_root_fails() {
        let result = parse_sms_xml(b"junk<smses/>");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_whitespace_and_comments_around_root_are_allowed() {
        let xml = "\n<!-- exported backup -->\n<smses><sms address=\"a\" /></smses>\n\n";
        let records = parse_sms_xml(xml.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_empty_input_fails() {
        let result = parse_sms_xml(b"");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_invalid_utf8_fails() {
        let result = parse_sms_xml(&[0x3c, 0xff, 0xfe, 0x3e]);
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_records_serialize_with_expected_keys() {
        let records = parse_sms_xml(BACKUP_TWO_MESSAGES.as_bytes()).unwrap();
        let json = serde_json::to_value(&records).unwrap();

        assert_eq!(json[0]["address"], "+15551234567");
        assert_eq!(json[0]["type"], "1");
        assert_eq!(json[1]["body"], "You too");
    }
}
