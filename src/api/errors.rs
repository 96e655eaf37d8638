use reqwest::Response;
use serde_json::Value;

use crate::error::AppError;

/// Pass successful responses through; turn the rest into `AppError::Status`.
///
/// The error body is read as JSON only to pick up its `message` field.
/// Bodies that are not JSON, or have no string `message`, give `None`.
pub async fn ensure_success(response: Response) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<Value>()
        .await
        .ok()
        .as_ref()
        .and_then(error_message);

    tracing::warn!(status = status.as_u16(), ?message, "Blog API request failed");

    Err(AppError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Extract the `message` field of an API error body.
pub fn error_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(&json!({ "message": "Title taken" })).as_deref(),
            Some("Title taken")
        );
        assert_eq!(error_message(&json!({ "message": "" })), None);
        assert_eq!(error_message(&json!({ "message": 3 })), None);
        assert_eq!(error_message(&json!({ "error": "x" })), None);
        assert_eq!(error_message(&json!("message")), None);
    }
}
