/// Used when a name has no characters that survive slugging.
const FALLBACK_SLUG: &str = "event";

/// Derives a URL-safe slug from an event name.
///
/// Lowercases, turns every whitespace run into a single `-` and drops anything
/// that is not an ASCII letter, digit, `_` or `-`.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_whitespace = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            slug.push(c);
        }
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_owned()
    } else {
        slug
    }
}

/// The collision variant of a slug: `{slug}-{millis}`.
#[must_use]
pub fn timestamped_slug(slug: &str, millis: i64) -> String {
    format!("{slug}-{millis}")
}
