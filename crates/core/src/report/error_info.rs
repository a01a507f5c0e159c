//! Structured extraction of code/message from free-form error text.

use regex_lite::Regex;
use std::sync::OnceLock;

use crate::filespec::StatusCode;

/// Wrapper token the upstream middleware prefixes onto backend error details.
const WRAPPER_PREFIX: &str = "[PilotException(";

static CODE_RE: OnceLock<Regex> = OnceLock::new();
static MSG_RE: OnceLock<Regex> = OnceLock::new();

/// Recover a numeric error code and a human-readable detail string from a
/// free-form error message.
///
/// Two independent patterns: digits after the literal `error code: ` and the
/// remainder after the literal `details: `. A missing code yields `0`, a
/// missing message yields the empty string; absence of a match is a normal,
/// silent outcome. The detail string has the wrapper prefix stripped and
/// surrounding whitespace trimmed.
pub fn extract_error_info(err: &str) -> (StatusCode, String) {
    let mut error_code = StatusCode::Int(0);
    let mut error_message = String::new();

    let code_re = CODE_RE
        .get_or_init(|| Regex::new(r"error code: (\d+)").expect("static pattern compiles"));
    if let Some(captures) = code_re.captures(err) {
        error_code = StatusCode::Text(captures[1].to_string());
    }

    let msg_re =
        MSG_RE.get_or_init(|| Regex::new(r"details: (.+)").expect("static pattern compiles"));
    if let Some(captures) = msg_re.captures(err) {
        let details = &captures[1];
        // a wrapped message carries noise before the wrapper token; keep only
        // what follows it
        error_message = match details.find(WRAPPER_PREFIX) {
            Some(idx) => details[idx + WRAPPER_PREFIX.len()..].trim().to_string(),
            None => details.trim().to_string(),
        };
    }

    (error_code, error_message)
}
