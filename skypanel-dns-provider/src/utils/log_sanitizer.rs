//! Log sanitization
//!
//! Zone listings can be large and TXT records carry DKIM keys, so response
//! bodies are truncated before they reach the debug log. API keys are only
//! ever logged in masked form.

/// Maximum number of bytes of a body kept in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of trailing characters of a secret left visible.
const SECRET_VISIBLE_TAIL: usize = 4;

/// Largest char boundary `<= index`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    (0..=index).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}

/// Truncate a response body for logging.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }
    let cut = floor_char_boundary(s, TRUNCATE_LIMIT);
    format!("{}... [truncated, total {} bytes]", &s[..cut], s.len())
}

/// Mask a secret, keeping only its last few characters (`****abcd`).
///
/// Secrets too short to hide anything are masked completely.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= SECRET_VISIBLE_TAIL * 2 {
        return "*".repeat(count.max(4));
    }
    let tail: String = secret.chars().skip(count - SECRET_VISIBLE_TAIL).collect();
    format!("****{tail}")
}
