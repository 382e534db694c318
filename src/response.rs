//! Acknowledgement bodies for write endpoints.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Success {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

pub fn success() -> Success {
    Success { success: true, id: None }
}

pub fn success_with_id(id: i64) -> Success {
    Success {
        success: true,
        id: Some(id),
    }
}
