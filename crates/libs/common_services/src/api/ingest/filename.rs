use crate::utils::{now_millis, random_base36};

const MAX_BASENAME_LEN: usize = 64;
const RANDOM_LEN: usize = 6;
const FALLBACK_BASENAME: &str = "image";

/// Reduces an uploaded file name to a safe basename.
///
/// Any client-side directory is dropped, then everything from the first `.` on.
/// Characters outside `[A-Za-z0-9_-]` become `-`, leading and trailing dashes are
/// trimmed and the result is capped at 64 characters.
#[must_use]
pub fn sanitize_basename(original_name: &str) -> String {
    let name = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original_name);
    let stem = name.split('.').next().unwrap_or_default();

    let replaced: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect();
    let trimmed: String = replaced
        .trim_matches('-')
        .chars()
        .take(MAX_BASENAME_LEN)
        .collect();
    let trimmed = trimmed.trim_end_matches('-');

    if trimmed.is_empty() {
        FALLBACK_BASENAME.to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// `{timestamp}-{random}-{basename}.{extension}`
#[must_use]
pub fn format_filename(millis: i64, random: &str, original_name: &str, extension: &str) -> String {
    format!(
        "{millis}-{random}-{}.{extension}",
        sanitize_basename(original_name)
    )
}

/// A fresh collision-resistant name for an upload.
#[must_use]
pub fn unique_filename(original_name: &str, extension: &str) -> String {
    format_filename(
        now_millis(),
        &random_base36(RANDOM_LEN),
        original_name,
        extension,
    )
}
