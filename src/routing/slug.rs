/// URL-safe identifier for an artist name: lowercase, each run of
/// whitespace collapsed to one hyphen.
pub fn slugify(name: &str) -> String {
    let lower = name.to_lowercase();
    let mut out = String::with_capacity(lower.len());
    let mut in_space = false;
    for c in lower.chars() {
        if is_space(c) {
            if !in_space {
                out.push('-');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// Separator characters for slugs: Unicode `White_Space` minus NEL (U+0085),
/// plus the byte-order mark.
fn is_space(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

/// The artist a slug refers to.
///
/// Falls back to the first artist when the slug is absent, empty or matches
/// nobody. Only `None` when there are no artists at all.
pub fn resolve_artist<'a>(slug: Option<&str>, artists: &'a [String]) -> Option<&'a str> {
    let matched = slug
        .filter(|s| !s.is_empty())
        .and_then(|s| artists.iter().find(|name| slugify(name) == s));
    matched.or_else(|| artists.first()).map(String::as_str)
}

/// Like [`resolve_artist`] but without the fallback.
pub fn find_artist<'a>(slug: &str, artists: &'a [String]) -> Option<&'a str> {
    if slug.is_empty() {
        return None;
    }
    artists
        .iter()
        .find(|name| slugify(name) == slug)
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Los Piojos"), "los-piojos");
        assert_eq!(slugify("  Soda   Stereo "), "-soda-stereo-");
        assert_eq!(slugify("Ángel\tÑandú"), "ángel-ñandú");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_slugify_whole_word_case_and_space_class() {
        assert_eq!(slugify("ΟΔΟΣ"), "οδος");
        assert_eq!(slugify("ΟΔΟΣ ΚΑΙ"), "οδος-και");
        assert_eq!(slugify("a\u{feff}b"), "a-b");
        assert_eq!(slugify("a\u{85}b"), "a\u{85}b");
        assert_eq!(slugify("a\u{a0}\u{3000}b"), "a-b");
    }

    #[test]
    fn test_slugify_idempotent() {
        for name in ["Los Piojos", "ÁNGEL  Vivo", " a\n\nb ", "x-y z", "ß Straße", ""] {
            let once = slugify(name);
            assert_eq!(slugify(&once), once, "{name:?}");
        }
    }

    #[test]
    fn test_resolve_artist() {
        let artists = names(&["Alfa", "Los Piojos", "Zeta"]);
        assert_eq!(resolve_artist(Some("los-piojos"), &artists), Some("Los Piojos"));
        assert_eq!(resolve_artist(Some("nadie"), &artists), Some("Alfa"));
        assert_eq!(resolve_artist(Some(""), &artists), Some("Alfa"));
        assert_eq!(resolve_artist(None, &artists), Some("Alfa"));
        assert_eq!(resolve_artist(Some("alfa"), &[]), None);
    }

    #[test]
    fn test_resolve_always_member() {
        let artists = names(&["Alfa", "Beta Gamma", "Zeta"]);
        for slug in ["", "alfa", "beta-gamma", "BETA-GAMMA", "zeta", "?", "beta gamma"] {
            let got = resolve_artist(Some(slug), &artists).unwrap();
            assert!(artists.iter().any(|a| a == got), "{slug:?}");
        }
    }

    #[test]
    fn test_collision_first_wins() {
        let artists = names(&["A B", "a  b"]);
        assert_eq!(resolve_artist(Some("a-b"), &artists), Some("A B"));
        assert_eq!(find_artist("a-b", &artists), Some("A B"));
        assert_eq!(find_artist("", &artists), None);
    }
}
