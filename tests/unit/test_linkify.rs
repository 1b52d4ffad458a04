//! Unit tests for file URL linking

use ansicolor::linkify::{find_links, FILE_URL};
use ansicolor::{linkify, linkify_host, HostText, MarkupText};

#[cfg(test)]
mod linkify_tests {
    use super::*;

    #[test]
    fn test_trailing_punctuation_trimmed() {
        for (input, target) in [
            ("at file:///tmp/out.log.", "file:///tmp/out.log"),
            ("at file:///tmp/out.log,", "file:///tmp/out.log"),
            ("(file:///tmp/out.log)", "file:///tmp/out.log"),
            ("[file:///a/b]:", "file:///a/b"),
            ("key=file:///etc/x=", "file:///etc/x"),
        ] {
            let links = find_links(input);
            assert_eq!(links.len(), 1, "{input}");
            assert_eq!(links[0].target, target, "{input}");
        }
    }

    #[test]
    fn test_quoted_url_with_spaces() {
        assert_eq!(
            linkify("open \"file://C:/a b/c.txt\" now"),
            "open <a href=\"file://C:/a b/c.txt\">file://C:/a b/c.txt</a> now"
        );
    }

    #[test]
    fn test_entity_quoted_url_in_colorized_html() {
        let html = "<b>&quot;file:///build dir/log.txt&quot;</b>";
        assert_eq!(
            linkify(html),
            "<b><a href=\"file:///build dir/log.txt\">file:///build dir/log.txt</a></b>"
        );
    }

    #[test]
    fn test_unquoted_url_inside_tags() {
        let html = "<span style=\"color: #CD0000;\">file:///var/log/x.log</span>";
        assert_eq!(
            linkify(html),
            "<span style=\"color: #CD0000;\"><a href=\"file:///var/log/x.log\">file:///var/log/x.log</a></span>"
        );
    }

    #[test]
    fn test_unquoted_url_stops_at_escaped_quote() {
        let links = find_links("path=file:///x/y&quot;, done");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].target, "file:///x/y");
    }

    #[test]
    fn test_text_without_urls_untouched() {
        for input in ["", "no links", "http://example.com", "file:/not/a/url"] {
            assert_eq!(linkify(input), input);
        }
    }

    #[test]
    fn test_pattern_is_shared() {
        assert!(FILE_URL.is_match("file:///x"));
        assert!(!FILE_URL.is_match("file://"));
    }

    #[test]
    fn test_linkify_host_within_range() {
        let mut host = MarkupText::new("file:///a then file:///b");
        let len = host.len();
        let count = linkify_host(&mut host, 9..len).unwrap();
        assert_eq!(count, 1);
        assert_eq!(
            host.render(),
            "file:///a then <a href=\"file:///b\">file:///b</a>"
        );
    }

    #[test]
    fn test_linkify_host_escapes_raw_text() {
        let mut host = MarkupText::new("see 'file:///a&b.txt'");
        let len = host.len();
        let count = linkify_host(&mut host, 0..len).unwrap();
        assert_eq!(count, 1);
        assert_eq!(
            host.render(),
            "see <a href=\"file:///a&amp;b.txt\">'file:///a&amp;b.txt'</a>"
        );
    }

    #[test]
    fn test_linkify_host_rejects_bad_range() {
        let mut host = MarkupText::new("short");
        assert!(linkify_host(&mut host, 2..40).is_err());
        assert!(!host.has_markup());
    }
}
