// SPDX-License-Identifier: MPL-2.0
//! Message text dialect.
//!
//! Notification text carries a small inline markup dialect:
//!
//! - `~<c>~text~s~` wraps `text` in a span with class `<c>`, where `<c>` is
//!   any single character other than the reserved `h` and `s`.
//! - `~h~text~` wraps `text` in a span with class `h` (bold).
//! - `~s~` is the terminator marker, stripped wherever it remains.
//! - newlines become `<br />`.
//!
//! The dialect is non-nesting and is applied by ordered text substitution
//! rather than a real parser. Color and bold run as two separate passes so
//! the bold marker stays distinct from arbitrary single-character color
//! markers.

use regex::Regex;
use std::sync::LazyLock;

static COLOR_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"~([^hs])~([^~]+)").expect("valid color regex"));
static BOLD_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"~h~([^~]+)(?:~s~|~)?").expect("valid bold regex"));
static STOP_MARK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"~s~").expect("valid stop regex"));

/// Expands the inline markup dialect into HTML.
///
/// Substitutions run in fixed order: color spans, bold spans, stray
/// terminator removal, newline conversion. Color spans end at the next `~`
/// and rely on the terminator pass to strip an explicit `~s~`; bold spans
/// consume their own closing marker.
#[must_use]
pub fn parse_message(text: &str) -> String {
    let message = COLOR_SPAN
        .replace_all(text, "<span class='${1}'>${2}</span>")
        .into_owned();
    let message = BOLD_SPAN
        .replace_all(&message, "<span class='h'>${1}</span>")
        .into_owned();
    let message = STOP_MARK.replace_all(&message, "").into_owned();
    message.replace('\n', "<br />")
}
