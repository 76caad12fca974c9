//! Comprehensive tests for thicket-css
//!
//! Selectors are matched against parsed HTML documents.

use thicket_css::{parse, select_all, SelectorError, SelectorList};
use thicket_dom::{Document, NodeId};

const PAGE: &str = r#"
<div id="app" class="shell">
  <header><h1 id="title">Title</h1></header>
  <ul id="menu">
    <li id="m1" class="entry"><a href="https://example.com/docs" lang="en-US">Docs</a></li>
    <li id="m2" class="entry active"><a href="/blog.html" data-kind="Post">Blog</a></li>
    <li id="m3" class="entry"></li>
    <li id="m4"><span>x</span></li>
  </ul>
  <p id="p1">One</p>
  <p id="p2">Two</p>
</div>
"#;

fn document() -> Document {
    thicket_html::parse(PAGE).unwrap()
}

fn ids(doc: &Document, selector: &str) -> Vec<String> {
    let list: SelectorList = selector.parse().unwrap();
    select_all(doc.tree(), doc.tree().root(), &list)
        .into_iter()
        .map(|id| doc.tree().describe(id))
        .collect()
}

fn by_id(doc: &Document, id: &str) -> NodeId {
    doc.get_element_by_id(id).unwrap()
}

#[test]
fn test_type_id_and_class() {
    let doc = document();
    assert_eq!(ids(&doc, "h1"), vec!["h1#title"]);
    assert_eq!(ids(&doc, "#p2"), vec!["p#p2"]);
    assert_eq!(ids(&doc, ".active"), vec!["li#m2.entry.active"]);
    assert_eq!(ids(&doc, "LI.entry.active"), vec!["li#m2.entry.active"]);
    assert!(ids(&doc, "table").is_empty());
}

#[test]
fn test_combinators() {
    let doc = document();
    assert_eq!(ids(&doc, "#app > p").len(), 2);
    assert_eq!(ids(&doc, "div a").len(), 2);
    assert!(ids(&doc, "#app > a").is_empty());
    assert_eq!(ids(&doc, "#m1 + li"), vec!["li#m2.entry.active"]);
    assert_eq!(ids(&doc, "#m2 ~ li").len(), 2);
    assert_eq!(ids(&doc, "header ~ p"), vec!["p#p1", "p#p2"]);
    assert_eq!(ids(&doc, "ul > li > a[href]").len(), 2);
}

#[test]
fn test_selector_list_keeps_document_order() {
    let doc = document();
    assert_eq!(ids(&doc, "#p2, h1, #p1"), vec!["h1#title", "p#p1", "p#p2"]);
}

#[test]
fn test_attribute_operators() {
    let doc = document();
    assert_eq!(ids(&doc, "[data-kind]").len(), 1);
    assert_eq!(ids(&doc, "[data-kind=Post]").len(), 1);
    assert!(ids(&doc, "[data-kind=post]").is_empty());
    assert_eq!(ids(&doc, "[data-kind=post i]").len(), 1);
    assert_eq!(ids(&doc, "[href^='https:']").len(), 1);
    assert_eq!(ids(&doc, "[href$=\".html\"]").len(), 1);
    assert_eq!(ids(&doc, "[href*=example]").len(), 1);
    assert_eq!(ids(&doc, "[lang|=en]").len(), 1);
    assert_eq!(ids(&doc, "[class~=active]").len(), 1);
    assert!(ids(&doc, "[class~=act]").is_empty());
}

#[test]
fn test_structural_pseudo_classes() {
    let doc = document();
    assert_eq!(ids(&doc, "li:first-child"), vec!["li#m1.entry"]);
    assert_eq!(ids(&doc, "li:last-child"), vec!["li#m4"]);
    assert_eq!(ids(&doc, "li:nth-child(2n)").len(), 2);
    assert_eq!(ids(&doc, "li:nth-last-child(1)"), vec!["li#m4"]);
    assert_eq!(ids(&doc, "p:first-of-type"), vec!["p#p1"]);
    assert_eq!(ids(&doc, "p:last-of-type"), vec!["p#p2"]);
    assert_eq!(ids(&doc, "span:only-child").len(), 1);
    assert_eq!(ids(&doc, "ul:only-of-type").len(), 1);
    assert_eq!(ids(&doc, "li:empty"), vec!["li#m3.entry"]);
    assert_eq!(ids(&doc, ":root"), vec!["html"]);
    assert_eq!(ids(&doc, "li:not(.entry)"), vec!["li#m4"]);
    assert_eq!(ids(&doc, "li:not(.active, #m4)").len(), 2);
}

#[test]
fn test_matches_single_nodes() {
    let doc = document();
    let list = parse("ul > .entry").unwrap();
    assert!(list.matches(doc.tree(), by_id(&doc, "m1")));
    assert!(!list.matches(doc.tree(), by_id(&doc, "m4")));
    assert!(!list.matches(doc.tree(), doc.tree().root()));
}

#[test]
fn test_select_all_excludes_root() {
    let doc = document();
    let list = parse("*").unwrap();
    let app = by_id(&doc, "app");
    let found = select_all(doc.tree(), app, &list);
    assert!(!found.contains(&app));
    assert_eq!(found.first(), Some(&doc.tree().element_children(app).next().unwrap()));
}

#[test]
fn test_parse_errors() {
    assert_eq!(parse(""), Err(SelectorError::Empty));
    assert!(matches!(parse("> p"), Err(SelectorError::UnexpectedChar { found: '>', .. })));
    assert!(matches!(parse("p >"), Err(SelectorError::UnexpectedEnd { .. })));
    assert!(matches!(parse("a:visited"), Err(SelectorError::UnsupportedPseudoClass { .. })));
    assert!(matches!(parse("[a=\"x]"), Err(SelectorError::UnexpectedEnd { .. })));
    assert!(parse("li:nth-child(2n+)").is_err());
}

#[test]
fn test_error_messages() {
    let err = parse("p !").unwrap_err();
    assert_eq!(err.to_string(), "unexpected '!' at offset 2 in selector \"p !\"");
    assert_eq!(
        SelectorError::UnsupportedPseudoClass { name: "hover".into() }.to_string(),
        "unsupported pseudo-class :hover"
    );
}
