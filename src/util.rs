//! Small utility helpers used across modules.

/// Log-safe truncation for user text.
/// Avoids spamming logs with whole stories; cuts on a char boundary.
pub fn trunc_for_log(s: &str, max_chars: usize) -> String {
  match s.char_indices().nth(max_chars) {
    None => s.to_string(),
    Some((cut, _)) => format!("{}… ({} chars total)", &s[..cut], s.chars().count()),
  }
}
