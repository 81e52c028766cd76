//! Child link harvesting.

use scraper::{Html, Selector};
use std::collections::BTreeSet;
use std::sync::LazyLock;

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("ANCHOR_SELECTOR: hardcoded selector is valid"));

/// Collect the slugs linked directly below `prefix`.
///
/// Every anchor whose `href` starts with `prefix` contributes the first path
/// segment after it, so `/cars/bmw/x5/` under `/cars/bmw/` yields `x5`.
/// Links to `prefix` itself and `.`/`..` segments are skipped. Query
/// strings and fragments are kept as part of the slug.
pub fn child_slugs(html: &str, prefix: &str) -> BTreeSet<String> {
    let document = Html::parse_document(html);

    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| href.strip_prefix(prefix))
        .filter_map(|rest| rest.split('/').next())
        .filter(|slug| !matches!(*slug, "" | "." | ".."))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BRAND_PAGE: &str = r#"
        <html><body>
          <a href="/cars/bmw/1-series/">1 Series</a>
          <a href="/cars/bmw/x5/">X5</a>
          <a href="/cars/bmw/x5/">X5 again</a>
          <a href="/cars/bmw/i3">i3</a>
          <a href="/cars/bmw/">BMW</a>
          <a href="/cars/mini/cooper/">Cooper</a>
          <a href="https://bimmercode.app/cars/bmw/z4/">absolute</a>
          <a>no href</a>
        </body></html>
    "#;

    #[test]
    fn test_harvests_direct_children() {
        let slugs = child_slugs(BRAND_PAGE, "/cars/bmw/");
        let expected: BTreeSet<String> =
            ["1-series", "x5", "i3"].iter().map(|s| s.to_string()).collect();
        assert_eq!(slugs, expected);
    }

    #[test]
    fn test_nested_links_yield_first_segment() {
        let html = r#"<a href="/cars/bmw/x5/g05/">G05</a><a href="/cars/bmw/x5/e70">E70</a>"#;
        let slugs = child_slugs(html, "/cars/bmw/x5/");
        assert_eq!(slugs.into_iter().collect::<Vec<_>>(), vec!["e70", "g05"]);

        let html = r#"<a href="/cars/bmw/x5/g05/">G05</a>"#;
        let slugs = child_slugs(html, "/cars/bmw/");
        assert_eq!(slugs.into_iter().collect::<Vec<_>>(), vec!["x5"]);
    }

    #[test]
    fn test_prefix_is_case_sensitive() {
        let html = r#"<a href="/cars/BMW/x5/">X5</a>"#;
        assert!(child_slugs(html, "/cars/bmw/").is_empty());
    }

    #[test]
    fn test_dot_segments_are_skipped() {
        let html = r#"<a href="/cars/bmw/x5/../">up</a><a href="/cars/bmw/x5/./">here</a><a href="/cars/bmw/x5/g05/">G05</a>"#;
        let slugs: Vec<_> = child_slugs(html, "/cars/bmw/x5/").into_iter().collect();
        assert_eq!(slugs, vec!["g05".to_string()]);
    }

    #[test]
    fn test_no_anchors() {
        assert!(child_slugs("<p>nothing here</p>", "/cars/bmw/").is_empty());
        assert!(child_slugs("", "/cars/bmw/").is_empty());
    }
}
