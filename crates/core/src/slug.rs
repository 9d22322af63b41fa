//! Slug rules for download titles.
//!
//! Storage adapters compute the slug when a download is first persisted; the
//! API layer only ever reads it back.

/// Slug used when a title contains no usable characters.
pub const FALLBACK_SLUG: &str = "download";

/// Convert a title into a URL-safe slug.
///
/// Lower-cases ASCII letters, keeps ASCII digits, and collapses every other
/// run of characters into a single `-`. Leading and trailing separators are
/// dropped.
///
/// ```
/// use dlm_core::slug::slugify;
///
/// assert_eq!(slugify("My Plugin v2.0"), "my-plugin-v2-0");
/// assert_eq!(slugify("  --  "), "download");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;

    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Pick a slug for `base` that does not collide with any slug in `taken`.
///
/// Returns `base` itself when free, otherwise the first of `base-2`,
/// `base-3`, … that is not taken.
pub fn unique_slug<S: AsRef<str>>(base: &str, taken: &[S]) -> String {
    let is_taken = |candidate: &str| taken.iter().any(|s| s.as_ref() == candidate);

    if !is_taken(base) {
        return base.to_string();
    }

    (2u32..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !is_taken(candidate))
        .unwrap_or_else(|| base.to_string())
}
