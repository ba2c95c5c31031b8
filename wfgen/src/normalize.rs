use unicode_normalization::{
    char::is_combining_mark,
    UnicodeNormalization,
};
use wfcore::traits::Normalizer;

/// The default identifier normalizer.
///
/// Produces lower case ASCII slugs: diacritics are folded into their
/// base letters, a handful of letters without a decomposition are
/// transliterated, and every run of other characters becomes a single
/// `-` separator.  Underscores are kept as is.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdNormalizer;

fn transliterate(c: char) -> Option<&'static str> {
    match c {
        'ß' => Some("ss"),
        'æ' => Some("ae"),
        'œ' => Some("oe"),
        'ø' => Some("o"),
        'đ' | 'ð' => Some("d"),
        'ł' => Some("l"),
        'þ' => Some("th"),
        'ı' => Some("i"),
        _ => None,
    }
}

impl Normalizer for IdNormalizer {
    fn normalize(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len());
        let mut separate = false;
        for c in text.nfkd()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase)
        {
            let mut buf = [0; 4];
            let piece = match c {
                'a'..='z' | '0'..='9' | '_' => &*c.encode_utf8(&mut buf),
                c => match transliterate(c) {
                    Some(s) => s,
                    None => {
                        separate = true;
                        continue;
                    }
                },
            };
            if separate && !result.is_empty() {
                result.push('-');
            }
            separate = false;
            result.push_str(piece);
        }
        result
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn slugs() {
        let n = IdNormalizer;
        assert_eq!(n.normalize("Foo"), "foo");
        assert_eq!(n.normalize("Hello W\u{f6}rld"), "hello-world");
        assert_eq!(n.normalize("b\u{e4}rize"), "barize");
        assert_eq!(n.normalize("f\u{fc}ize"), "fuize");
        assert_eq!(n.normalize("  Pending -- review!  "), "pending-review");
        assert_eq!(n.normalize("Stra\u{df}e"), "strasse");
        assert_eq!(n.normalize("snake_case title"), "snake_case-title");
        assert_eq!(n.normalize("Version 1.5"), "version-1-5");
        assert_eq!(n.normalize("\u{ff26}\u{ff55}\u{ff4c}\u{ff4c}"), "full");
        assert_eq!(n.normalize("!!!"), "");
    }

    #[test]
    fn idempotent() {
        let n = IdNormalizer;
        for text in [
            "Example Workflow",
            "Hello W\u{f6}rld",
            "-leading and trailing-",
            "R\u{e9}vision \u{c6}sthetics / \u{152}uvre",
            "a__b--c  d",
            "\u{65e5}\u{672c} text",
            "",
        ] {
            let once = n.normalize(text);
            assert_eq!(n.normalize(&once), once, "normalizing {text:?}");
        }
    }
}
