//! Slug derivation
//!
//! Maps a display name to a URL-safe identifier.

/// Derive a slug from a display name
///
/// Lower-cases, trims, drops everything outside `[a-z0-9]`, whitespace and
/// `-`, then turns each run of whitespace or hyphens into a single hyphen.
/// Total: all-punctuation input yields an empty string.
///
/// The byte order mark counts as whitespace, both for trimming and inside
/// the name.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());

    for c in lowered.trim_matches(is_space).chars() {
        let c = if is_space(c) { '-' } else { c };
        match c {
            'a'..='z' | '0'..='9' => slug.push(c),
            '-' if !slug.ends_with('-') => slug.push('-'),
            _ => {}
        }
    }

    slug
}

fn is_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Tech Startup NYC!!"), "tech-startup-nyc");
        assert_eq!(slugify("Coffee Shop Brooklyn"), "coffee-shop-brooklyn");
    }

    #[test]
    fn test_slugify_whitespace() {
        assert_eq!(slugify("  a   b  "), "a-b");
        assert_eq!(slugify("tab\tand\nnewline"), "tab-and-newline");
    }

    #[test]
    fn test_slugify_byte_order_mark() {
        assert_eq!(slugify("a\u{feff}b"), "a-b");
        assert_eq!(slugify("\u{feff}Acme\u{feff}"), "acme");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("   "), "");
    }

    #[test]
    fn test_slugify_hyphen_runs() {
        assert_eq!(slugify("a - - b"), "a-b");
        assert_eq!(slugify("pre--built"), "pre-built");
    }

    #[test]
    fn test_slugify_trims_before_stripping() {
        // The space survives trimming because "!" was still behind it
        assert_eq!(slugify("Hello !"), "hello-");
        assert_eq!(slugify("-lead-"), "-lead-");
    }

    #[test]
    fn test_slugify_drops_non_ascii() {
        assert_eq!(slugify("Café Zürich"), "caf-zrich");
    }

    #[test]
    fn test_slugify_is_deterministic() {
        assert_eq!(slugify("SF Tech Company"), slugify("SF Tech Company"));
    }
}
