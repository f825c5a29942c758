//! Common types used throughout SmsVault.

use serde::{Deserialize, Serialize};

/// One parsed SMS message entry.
///
/// All fields are copied verbatim from the backup XML attributes; a missing
/// attribute is `None` and serializes as JSON `null`. No type coercion is
/// performed — `date`, `read` and `status` keep whatever encoding the
/// producing device wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsRecord {
    /// Phone number or contact address.
    pub address: Option<String>,
    /// Message timestamp in the device's own encoding (unparsed).
    pub date: Option<String>,
    /// Message type code (e.g. "1" received, "2" sent).
    #[serde(rename = "type")]
    pub message_type: Option<String>,
    /// Message text.
    pub body: Option<String>,
    /// Read flag ("0"/"1").
    pub read: Option<String>,
    /// Delivery status code.
    pub status: Option<String>,
}

impl SmsRecord {
    /// Create an empty record with every field absent.
    pub fn empty() -> Self {
        Self {
            address: None,
            date: None,
            message_type: None,
            body: None,
            read: None,
            status: None,
        }
    }
}
