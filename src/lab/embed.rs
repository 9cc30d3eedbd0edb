//! Wiki-style image embed rewriting.
//!
//! `![[shot.png]]` and `![[shot.png|label]]` become standard markdown images
//! pointing at the lab folder: `![shot.png](/labs/<slug>/shot.png)`.

use std::borrow::Cow;
use std::sync::LazyLock;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::{Captures, Regex};

/// `![[target]]` or `![[target|label]]`.
static EMBED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[\[([^\[\]|]+)(?:\|[^\]]+)?\]\]").expect("valid embed pattern")
});

/// Characters left unescaped in a path segment (`encodeURIComponent` set).
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Rewrite every embed in `body` to an image under `/<url_prefix>/<slug>/`.
///
/// The alias part is dropped. Text without embeds is returned borrowed, so
/// rewriting already-rewritten text is a no-op.
pub fn rewrite_embeds<'a>(body: &'a str, url_prefix: &str, slug: &str) -> Cow<'a, str> {
    EMBED.replace_all(body, |caps: &Captures<'_>| {
        let target = caps[1].trim();
        format!("![{}]({})", target, asset_url(url_prefix, slug, target))
    })
}

/// Whether `body` still holds an embed to rewrite.
pub fn has_embeds(body: &str) -> bool {
    EMBED.is_match(body)
}

/// `/<url_prefix>/<slug>/<target>` with the slug and each target segment
/// percent-encoded. The prefix is used as configured.
pub fn asset_url(url_prefix: &str, slug: &str, target: &str) -> String {
    let encoded = target
        .split('/')
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/");
    let slug = utf8_percent_encode(slug, SEGMENT);
    format!("/{url_prefix}/{slug}/{encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_embed() {
        assert_eq!(
            rewrite_embeds("![[screenshot.png]]", "labs", "acme"),
            "![screenshot.png](/labs/acme/screenshot.png)"
        );
    }

    #[test]
    fn test_alias_is_dropped() {
        assert_eq!(
            rewrite_embeds("see ![[nmap scan.png|Nmap results]] here", "labs", "acme"),
            "see ![nmap scan.png](/labs/acme/nmap%20scan.png) here"
        );
    }

    #[test]
    fn test_segments_encoded_independently() {
        assert_eq!(
            rewrite_embeds("![[img/step #1.png]]", "labs", "box"),
            "![img/step #1.png](/labs/box/img/step%20%231.png)"
        );
    }

    #[test]
    fn test_unreserved_kept() {
        assert_eq!(
            asset_url("labs", "x", "a-b_c.d!~*'(e).png"),
            "/labs/x/a-b_c.d!~*'(e).png"
        );
        assert_eq!(asset_url("labs", "x", "中.png"), "/labs/x/%E4%B8%AD.png");
    }

    #[test]
    fn test_target_trimmed() {
        assert_eq!(
            rewrite_embeds("![[ shot.png ]]", "labs", "acme"),
            "![shot.png](/labs/acme/shot.png)"
        );
    }

    #[test]
    fn test_multiple_embeds() {
        let out = rewrite_embeds("![[a.png]]\ntext\n![[b.png|B]]", "labs", "s");
        assert_eq!(out, "![a.png](/labs/s/a.png)\ntext\n![b.png](/labs/s/b.png)");
    }

    #[test]
    fn test_idempotent() {
        for input in [
            "![[a.png]] and ![[dir/b c.png|alias]]",
            "![[[odd.png]]",
            "plain ![alt](x.png)",
            "![[]] ![[|x]]",
        ] {
            let once = rewrite_embeds(input, "labs", "s").into_owned();
            let twice = rewrite_embeds(&once, "labs", "s").into_owned();
            assert_eq!(once, twice, "not idempotent for {input:?}");
            assert!(!has_embeds(&once));
        }
    }

    #[test]
    fn test_no_embed_borrows() {
        assert!(matches!(
            rewrite_embeds("nothing here", "labs", "s"),
            Cow::Borrowed(_)
        ));
    }
}
