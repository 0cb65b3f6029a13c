//! HTTP response envelopes shared by the server and the remote client.

use serde::{Deserialize, Serialize};

use crate::sos::SosRecord;

pub const MSG_SUBMITTED: &str = "SOS submitted successfully";
pub const MSG_RESOLVED: &str = "SOS resolved successfully";
pub const MSG_DELETED: &str = "SOS submission deleted successfully";
pub const MSG_INTERNAL: &str = "Internal Server Error";
pub const MSG_CORS_OK: &str = "CORS OK";

/// `{message, data}` body for submit and resolve.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordResponse {
    pub message: String,
    pub data: SosRecord,
}

/// `{success, data, count}` body for listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListResponse {
    pub success: bool,
    pub data: Vec<SosRecord>,
    #[serde(default)]
    pub count: usize,
}

impl ListResponse {
    pub fn new(data: Vec<SosRecord>) -> Self {
        Self { success: true, count: data.len(), data }
    }
}
