use once_cell::sync::Lazy;
use regex::Regex;

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(www\.\S+)|(https?://\S+)").unwrap());
static MENTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\S+").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
// Only markers at the start of a token; a bare `#` token is left alone.
static HASHTAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(^|\s)#+(\S)").unwrap());

pub const URL_TOKEN: &str = "url";
pub const MENTION_TOKEN: &str = "at_user";

/// Prepares raw post text for scoring.
///
/// Lowercases, replaces links with `url` and mentions with `at_user`,
/// collapses whitespace, drops hashtag markers and trims. The output is a
/// fixed point: normalizing it again returns it unchanged.
pub fn normalize(raw: &str) -> String {
    let text = raw.to_lowercase();
    let text = URL_RE.replace_all(&text, URL_TOKEN);
    let text = MENTION_RE.replace_all(&text, MENTION_TOKEN);
    let text = WHITESPACE_RE.replace_all(&text, " ");
    let text = HASHTAG_RE.replace_all(&text, "${1}${2}");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_url_hashtag_and_mention_together() {
        assert_eq!(
            normalize("Check this out http://example.com/x #cool @bob"),
            "check this out url cool at_user"
        );
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t\n "), "");
    }

    #[test]
    fn plain_text_is_only_lowercased_collapsed_and_trimmed() {
        assert_eq!(normalize("  Hello \t  WORLD\n\nagain  "), "hello world again");
    }

    #[test]
    fn every_occurrence_is_replaced() {
        assert_eq!(
            normalize("@a @b see www.one.com and HTTPS://two.org/p?q=1"),
            "at_user at_user see url and url"
        );
        assert_eq!(normalize("#rust #async #tokio"), "rust async tokio");
    }

    #[test]
    fn hashtag_keeps_tag_text() {
        assert_eq!(normalize("Loving #RustLang today"), "loving rustlang today");
        assert_eq!(normalize("##double"), "double");
    }

    #[test]
    fn inner_and_bare_markers_are_kept() {
        assert_eq!(normalize("c# is fine"), "c# is fine");
        assert_eq!(normalize("a # b"), "a # b");
    }

    #[test]
    fn mention_inside_hashtag_becomes_token() {
        assert_eq!(normalize("#@someone hi"), "at_user hi");
    }

    #[test]
    fn normalization_is_idempotent() {
        let samples = [
            "Check this out http://example.com/x #cool @bob",
            "  RT @User: GREAT news!!! www.site.com/a   #Win #win ",
            "##tag # @ #@ ww#w.x www. http:// https://a",
            "Ünïcödé TEXT\u{00A0}with\u{2003}odd   spaces #Straße",
            "",
            "#",
            "@",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }
}
