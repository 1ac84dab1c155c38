//! Transient UI notifications.

use serde::{Deserialize, Serialize};

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

/// A `{type, message}` notification shown by the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    #[serde(rename = "type")]
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    /// An error toast.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }

    /// A success toast.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    /// Value for an `HX-Trigger` header that raises this toast client-side.
    #[must_use]
    pub fn hx_trigger(&self) -> String {
        serde_json::json!({ "show-toast": self }).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_serializes_kind_as_type() {
        let toast = Toast::error("nope");
        assert_eq!(
            serde_json::to_value(&toast).ok(),
            Some(serde_json::json!({"type": "error", "message": "nope"}))
        );
    }

    #[test]
    fn test_hx_trigger_wraps_in_show_toast() {
        let header = Toast::success("Saved").hx_trigger();
        let parsed: serde_json::Value = serde_json::from_str(&header).unwrap_or_default();
        assert_eq!(
            parsed,
            serde_json::json!({"show-toast": {"type": "success", "message": "Saved"}})
        );
    }
}
