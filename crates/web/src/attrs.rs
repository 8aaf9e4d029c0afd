//! Markup conventions and data-attribute parsing. Kept free of `web-sys` so
//! it can be tested natively.

use folio_protocol::ElementId;

pub const PAGE_SELECTOR: &str = ".page";
pub const NAV_LINK_SELECTOR: &str = ".nav-links a[data-page]";
pub const NAV_MENU_SELECTOR: &str = ".nav-links";
pub const NAV_SELECTOR: &str = "nav";
pub const HAMBURGER_SELECTOR: &str = ".hamburger";
pub const REVEAL_SELECTOR: &str = ".reveal";
pub const COUNTER_SELECTOR: &str = "[data-count]";
pub const SKILL_FILL_SELECTOR: &str = ".sk-fill";
pub const FORM_CONTROL_SELECTOR: &str = "input,textarea,select";
pub const FORM_GROUP_SELECTOR: &str = ".form-group";
pub const FIELD_ERROR_SELECTOR: &str = ".field-error";
pub const SUBMIT_SELECTOR: &str = ".form-submit";

pub const TYPED_TEXT_ID: &str = "typedText";
pub const TOAST_ID: &str = "toast";
pub const TOAST_ICON_ID: &str = "toastIcon";
pub const TOAST_MESSAGE_ID: &str = "toastMsg";
pub const CONTACT_FORM_ID: &str = "contactForm";
pub const THEME_TOGGLE_ID: &str = "themeToggle";
pub const THEME_LABEL_ID: &str = "themeLabel";
pub const CONFIG_ID: &str = "folio-config";

pub const ACTIVE_CLASS: &str = "active";
pub const OPEN_CLASS: &str = "open";
pub const SCROLLED_CLASS: &str = "scrolled";
pub const VISIBLE_CLASS: &str = "visible";
pub const SHOW_CLASS: &str = "show";
pub const ERROR_CLASS: &str = "error";
pub const SUCCESS_CLASS: &str = "success";

/// Attribute carrying the id the scanner assigned to an animatable element.
pub const ELEMENT_ID_ATTR: &str = "data-folio-id";

pub const SENDING_HTML: &str = concat!(
    r#"<svg style="animation:spin 0.9s linear infinite;width:18px;height:18px" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2.5">"#,
    r#"<path d="M12 2v4M12 18v4M4.93 4.93l2.83 2.83M16.24 16.24l2.83 2.83M2 12h4M18 12h4M4.93 19.07l2.83-2.83M16.24 7.76l2.83-2.83"/></svg> Sending…"#,
);

pub const SPIN_KEYFRAMES: &str = "@keyframes spin{to{transform:rotate(360deg)}}";

/// Parse a leading integer the way `parseInt(s, 10)` does: optional
/// whitespace and sign, then digits; trailing text is ignored.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// `data-delay` in milliseconds; missing, malformed or negative is 0.
pub fn parse_delay(raw: Option<&str>) -> u32 {
    raw.and_then(parse_int_prefix)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(0)
}

/// `data-count` target. `None` means the counter cannot be animated.
pub fn parse_count(raw: &str) -> Option<i64> {
    parse_int_prefix(raw)
}

/// `data-width`, defaulting to an empty bar.
pub fn skill_width(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(w) if !w.is_empty() => w.to_owned(),
        _ => "0%".to_owned(),
    }
}

pub fn parse_element_id(raw: &str) -> Option<ElementId> {
    raw.parse().ok().map(ElementId)
}

/// Selector for a form control by `name`.
pub fn control_selector(name: &str) -> String {
    format!("[name=\"{}\"]", name.replace('\\', "\\\\").replace('"', "\\\""))
}
