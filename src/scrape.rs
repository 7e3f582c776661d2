//! Pattern-based extraction of typed values out of the portal's
//! server-rendered HTML.
//!
//! The diagnostics page renders each value as a labeled pair:
//!
//! ```html
//! <label class="col-xs-6 control-label">Kamertemperatuur</label>
//! <div class="col-xs-6">
//!     <p class="form-control-static">18,5</p>
//! </div>
//! ```
//!
//! Labels come in Dutch with an English fallback, values may use a
//! comma as decimal separator. The separator is normalized to a dot
//! before any coercion, for text values too.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::{Error, Result};

// <input name="__RequestVerificationToken" type="hidden" value="lFVlMZlt2-..." />
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)name="__RequestVerificationToken"[^>]+ value="(.*?)""#)
        .expect("token pattern")
});

// <tr onclick="javascript:changeDeviceAndRedirect('/Home/Index/{0}','6808-1401-3109_15-30-001-544');">
static DEVICE_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]{4}-[0-9]{4}-[0-9]{4}_[0-9]{2}-[0-9]{2}-[0-9]{3}-[0-9]{3}")
        .expect("device id pattern")
});

// {"ch_control_mode":0,...,"room_temp":18.0,"ch_mode_temp":18.2,...}
static ROOM_TEMP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)room_temp.*?:([0-9\.]{1,4})").expect("room temp pattern"));

/// Anti-forgery token embedded as a hidden form field, or `None` when
/// the page carries none.
pub fn verification_token(html: &str) -> Option<String> {
    TOKEN_PATTERN
        .captures(html)
        .map(|caps| caps[1].to_string())
}

/// First device identifier found in the page. The id has a fixed
/// structure, four digit groups like `6808-1401-3109_15-30-001-544`.
pub fn device_id(html: &str) -> Option<String> {
    DEVICE_ID_PATTERN.find(html).map(|m| m.as_str().to_string())
}

/// Current room temperature from the JSON fragment embedded in the
/// setpoint acknowledgement.
pub fn room_temperature(html: &str) -> Option<f64> {
    ROOM_TEMP_PATTERN
        .captures(html)
        .and_then(|caps| caps[1].parse().ok())
}

/// Labeled text value. Labels are tried in order; a label that matches
/// with an empty value does not stop the search, so an empty capture
/// and a missing label both come out as `None`.
pub fn text_by_label(html: &str, labels: &[&str]) -> Option<String> {
    labels.iter().find_map(|label| raw_by_label(html, label))
}

/// Labeled decimal value. The captured text has its comma separator
/// normalized before parsing; a non-empty capture that still fails to
/// parse is an error rather than a silent `None`.
pub fn number_by_label(html: &str, labels: &[&str]) -> Result<Option<f64>> {
    match text_by_label(html, labels) {
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| Error::Parse(format!("invalid decimal value: '{value}'"))),
        None => Ok(None),
    }
}

/// Labeled on/off value. `"aan"` and `"on"` (any case) are `true`, any
/// other non-empty capture is `false`. Only a missing label or empty
/// capture yields `None`.
pub fn flag_by_label(html: &str, labels: &[&str]) -> Option<bool> {
    text_by_label(html, labels)
        .map(|value| value.eq_ignore_ascii_case("aan") || value.eq_ignore_ascii_case("on"))
}

fn raw_by_label(html: &str, label: &str) -> Option<String> {
    let pattern = RegexBuilder::new(&format!(
        ">{}</label>.*?<p[^>]*>(.*?)<",
        regex::escape(label)
    ))
    .dot_matches_new_line(true)
    .case_insensitive(true)
    .build()
    .expect("label pattern");

    let value = pattern.captures(html)?.get(1)?.as_str();
    if value.is_empty() {
        return None;
    }
    Some(value.replace(',', ".").trim().to_string())
}
