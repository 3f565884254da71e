//! Secret masking for logs and diagnostics

/// Partially hides a secret string by masking the middle characters
///
/// Shows `visible_chars` characters at the start and end of the secret.
/// Secrets too short to keep any part hidden are fully masked.
///
/// # Arguments
///
/// * `secret` - The secret string to hide
/// * `visible_chars` - Number of characters to show at each end
///
/// # Returns
///
/// * `String` - The masked secret, e.g. "abcd********wxyz"
pub fn hide_secret(secret: &str, visible_chars: usize) -> String {
    if secret.is_empty() {
        return String::new();
    }

    if secret.len() <= visible_chars * 2 {
        return "*".repeat(secret.len());
    }

    let start = &secret[..visible_chars];
    let end = &secret[secret.len() - visible_chars..];
    let hidden = "*".repeat(secret.len() - visible_chars * 2);
    format!("{}{}{}", start, hidden, end)
}
