use serde::{Deserialize, Serialize};

/// Visual validation state of a single form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldState {
    /// Neither error nor success styling.
    Clear,
    Success,
    Error(String),
}

impl FieldState {
    pub fn is_error(&self) -> bool {
        matches!(self, FieldState::Error(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Failure,
}

impl ToastKind {
    /// Class applied to the toast container next to `toast`.
    pub fn class(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Failure => "error",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ToastKind::Success => "✅",
            ToastKind::Failure => "❌",
        }
    }
}

/// Template parameters of the outbound contact message. Field names match
/// the email template placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePayload {
    pub from_name: String,
    pub from_email: String,
    pub phone: String,
    pub service: String,
    pub budget: String,
    pub message: String,
    pub to_name: String,
}
