use serde::{Deserialize, Serialize};

/// Success envelope for every endpoint that returns drink records. The `drinks` field is always a
/// list, even when a single record is returned (create and update wrap their record in a
/// one-element list).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrinkList<T> {
    pub success: bool,
    pub drinks: Vec<T>,
}

impl<T> DrinkList<T> {
    pub fn new(drinks: Vec<T>) -> Self {
        Self { success: true, drinks }
    }
}

/// Success envelope for deletions. Unlike the other endpoints, this returns the bare id of the
/// deleted record rather than a list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub delete: i64,
}

impl DeleteResponse {
    pub fn new(id: i64) -> Self {
        Self { success: true, delete: id }
    }
}

/// The uniform error envelope. `error` always equals the HTTP status code of the response.
/// Authentication failures additionally carry a short machine-readable `code`, e.g.
/// `invalid_header` or `token_expired`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}
