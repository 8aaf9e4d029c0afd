use std::collections::BTreeMap;
use std::sync::LazyLock;

use folio_protocol::{DomCommand, FieldState, MessagePayload, ToastKind};
use regex::Regex;
use tracing::{error, info, warn};

use crate::config::ContactConfig;
use crate::effects::Effects;
use crate::toast::Toaster;

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_EMAIL: &str = "Enter a valid email.";
pub const FIX_ERRORS: &str = "Please fix the errors above.";
pub const SENT: &str = "Message sent! I'll get back to you within 24 hours. 🎉";
pub const SEND_FAILED: &str = "Something went wrong. Please try again!";

const NOT_PROVIDED: &str = "Not provided";
const NOT_SPECIFIED: &str = "Not specified";

#[allow(clippy::expect_used)]
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Snapshot of one form control at the time of an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInput {
    pub name: String,
    pub value: String,
    pub required: bool,
}

impl FieldInput {
    pub fn new(name: impl Into<String>, value: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            required,
        }
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// Validate one field. Rules apply in order: required, email shape,
/// minimum message length.
pub fn validate(field: &FieldInput, min_message_len: usize) -> FieldState {
    let value = field.value.trim();
    if value.is_empty() && field.required {
        return FieldState::Error(REQUIRED.into());
    }
    if field.name == "email" && !value.is_empty() && !is_valid_email(value) {
        return FieldState::Error(INVALID_EMAIL.into());
    }
    if field.name == "message" && value.chars().count() < min_message_len {
        return FieldState::Error(format!(
            "Message must be at least {min_message_len} characters."
        ));
    }
    FieldState::Success
}

/// Build the template parameters, substituting defaults for empty optional
/// fields.
pub fn build_payload(fields: &[FieldInput], recipient: &str) -> MessagePayload {
    let value = |name: &str| {
        fields
            .iter()
            .find(|f| f.name == name)
            .map_or("", |f| f.value.as_str())
    };
    let or_default = |name: &str, default: &str| {
        let v = value(name);
        let chosen = if v.is_empty() { default } else { v };
        chosen.to_owned()
    };
    MessagePayload {
        from_name: format!("{} {}", value("firstName"), value("lastName")),
        from_email: value("email").to_owned(),
        phone: or_default("phone", NOT_PROVIDED),
        service: or_default("service", NOT_SPECIFIED),
        budget: or_default("budget", NOT_SPECIFIED),
        message: value("message").to_owned(),
        to_name: recipient.to_owned(),
    }
}

/// Contact form: inline validation, submission and the in-flight send.
#[derive(Debug)]
pub struct ContactForm {
    config: ContactConfig,
    states: BTreeMap<String, FieldState>,
    in_flight: bool,
}

impl ContactForm {
    pub fn new(config: ContactConfig) -> Self {
        Self {
            config,
            states: BTreeMap::new(),
            in_flight: false,
        }
    }

    pub fn state(&self, field: &str) -> Option<&FieldState> {
        self.states.get(field)
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Validate a field that lost focus.
    pub fn blurred(&mut self, field: &FieldInput, fx: &mut Effects) -> bool {
        self.check(field, fx)
    }

    /// Re-validate an edited field, but only while it shows an error.
    pub fn edited(&mut self, field: &FieldInput, fx: &mut Effects) {
        if self.states.get(&field.name).is_some_and(FieldState::is_error) {
            self.check(field, fx);
        }
    }

    /// Validate every required field and start the send if all pass.
    /// Returns `true` when a message was dispatched.
    pub fn submit(&mut self, fields: &[FieldInput], toaster: &mut Toaster, fx: &mut Effects) -> bool {
        if self.in_flight {
            warn!("submit ignored while a message is being sent");
            return false;
        }
        let mut ok = true;
        for field in fields.iter().filter(|f| f.required) {
            if !self.check(field, fx) {
                ok = false;
            }
        }
        if !ok {
            toaster.show(FIX_ERRORS, ToastKind::Failure, fx);
            return false;
        }
        let payload = build_payload(fields, &self.config.recipient_name);
        info!(from = %payload.from_email, "sending contact message");
        self.in_flight = true;
        fx.push(DomCommand::SetSubmitBusy { busy: true });
        fx.push(DomCommand::SendMessage { payload });
        true
    }

    /// Outcome of the send started by `submit`.
    pub fn finished(&mut self, result: Result<(), String>, toaster: &mut Toaster, fx: &mut Effects) {
        if !self.in_flight {
            warn!("send result arrived with no send in flight");
            return;
        }
        self.in_flight = false;
        fx.push(DomCommand::SetSubmitBusy { busy: false });
        match result {
            Ok(()) => {
                fx.push(DomCommand::ResetForm);
                for (field, _) in std::mem::take(&mut self.states) {
                    fx.push(DomCommand::SetFieldState {
                        field,
                        state: FieldState::Clear,
                    });
                }
                toaster.show(SENT, ToastKind::Success, fx);
            }
            Err(e) => {
                error!(error = %e, "contact message failed");
                toaster.show(SEND_FAILED, ToastKind::Failure, fx);
            }
        }
    }

    fn check(&mut self, field: &FieldInput, fx: &mut Effects) -> bool {
        let state = validate(field, self.config.min_message_len);
        let ok = !state.is_error();
        self.states.insert(field.name.clone(), state.clone());
        fx.push(DomCommand::SetFieldState {
            field: field.name.clone(),
            state,
        });
        ok
    }
}
