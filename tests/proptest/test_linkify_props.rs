//! Property-based tests for file URL linking

#[path = "../test_utils/fixtures.rs"]
mod fixtures;

use ansicolor::linkify::find_links;
use ansicolor::{linkify, linkify_host, HostText, MarkupText};
use fixtures::*;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_linkify_doesnt_panic(s in "\\PC*") {
        let _ = linkify(&s);
        let mut host = MarkupText::new(s.as_str());
        let len = host.len();
        let _ = linkify_host(&mut host, 0..len);
    }

    #[test]
    fn test_links_never_overlap(s in "([a-z ,.\"']{0,6}file://[a-z/. \"']{0,10}){0,5}") {
        let links = find_links(&s);
        for pair in links.windows(2) {
            prop_assert!(pair[0].range.end <= pair[1].range.start);
        }
        for link in &links {
            prop_assert!(link.target.starts_with("file://"));
            prop_assert!(!link.target.contains('"'));
            prop_assert!(!link.target.contains('\''));
        }
    }

    #[test]
    fn test_unquoted_targets_are_trimmed(
        path in "[a-z0-9/]{1,20}",
        tail in "[,.:)\\]=]{0,3}",
    ) {
        let text = format!("see file:///{path}{tail} next");
        let links = find_links(&text);
        prop_assert_eq!(links.len(), 1);
        prop_assert_eq!(&links[0].target, &format!("file:///{path}"));
    }

    #[test]
    fn test_host_links_are_well_formed(s in "([a-z ]{0,6}\"?file://[a-z][a-z/.]{0,7}\"?){1,4}") {
        let mut host = MarkupText::new(s.as_str());
        let len = host.len();
        let count = linkify_host(&mut host, 0..len).unwrap();
        prop_assert!(count >= 1);
        prop_assert!(host.is_well_formed());

        let html = host.render();
        let anchors = tag_balance(&html)[3];
        prop_assert_eq!(anchors, (count, count));
        prop_assert!(is_nested(&html));
    }
}
