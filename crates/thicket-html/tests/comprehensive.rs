//! Comprehensive tests for thicket-html
//!
//! Document parsing, attribute caching and fragment materialization.

use thicket_html::{HtmlParser, parse};

#[test]
fn test_parse_minimal_html() {
    let doc = parse("").unwrap();
    assert!(doc.tree().len() >= 1, "Even empty HTML should have root");
    assert!(doc.body().is_some(), "html5ever always synthesizes a body");
}

#[test]
fn test_parse_nested_structure() {
    let html = r#"
        <html>
            <head>
                <title>Test Page</title>
                <meta charset="utf-8">
            </head>
            <body>
                <div id="container">
                    <h1>Welcome</h1>
                    <p class="intro lead">This is a test.</p>
                    <ul>
                        <li>Item 1</li>
                        <li>Item 2</li>
                    </ul>
                </div>
            </body>
        </html>
    "#;

    let doc = parse(html).unwrap();
    assert_eq!(doc.title(), "Test Page");

    let container = doc.get_element_by_id("container").unwrap();
    let tree = doc.tree();
    let kids: Vec<_> = tree
        .element_children(container)
        .map(|id| tree.element(id).unwrap().name.clone())
        .collect();
    assert_eq!(kids, vec!["h1", "p", "ul"]);

    let p = tree.element_children(container).nth(1).unwrap();
    let elem = tree.element(p).unwrap();
    assert!(elem.has_class("intro"));
    assert!(elem.has_class("lead"));
    assert_eq!(tree.text_content(p), "This is a test.");
}

#[test]
fn test_whitespace_text_is_dropped() {
    let doc = parse("<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>").unwrap();
    let body = doc.body().unwrap();
    let tree = doc.tree();
    let ul = tree.element_children(body).next().unwrap();
    assert_eq!(tree.children(ul).count(), 2);
}

#[test]
fn test_parse_malformed_html() {
    let html = r#"
        <div>
            <p>Unclosed paragraph
            <span>Unclosed span
        </div>
        <p>Another paragraph without closing
    "#;

    let doc = parse(html).unwrap();
    assert!(doc.tree().len() > 1);
}

#[test]
fn test_parse_comments_and_doctype() {
    let doc = parse("<!DOCTYPE html><!-- top --><div><!-- inner --></div>").unwrap();
    let tree = doc.tree();
    let described: Vec<_> = tree
        .children(tree.root())
        .map(|(id, _)| tree.describe(id))
        .collect();
    assert_eq!(described, vec!["#doctype", "#comment", "html"]);
}

#[test]
fn test_fragments_are_distinct_each_time() {
    let mut doc = parse("<body></body>").unwrap();
    let parser = HtmlParser::new();
    let first = parser.parse_fragment("<span>a</span>", doc.tree_mut()).unwrap();
    let second = parser.parse_fragment("<span>a</span>", doc.tree_mut()).unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_ne!(first[0], second[0]);
}

#[test]
fn test_fragment_with_attributes() {
    let mut doc = parse("").unwrap();
    let nodes = HtmlParser::new()
        .parse_fragment(r#"<a href="/x" class="btn primary">go</a>"#, doc.tree_mut())
        .unwrap();
    let elem = doc.tree().element(nodes[0]).unwrap();
    assert_eq!(elem.get_attr("href"), Some("/x"));
    assert_eq!(elem.classes, vec!["btn", "primary"]);
}

#[test]
fn test_parse_large_document() {
    let mut html = String::from("<html><body>");
    for i in 0..500 {
        html.push_str(&format!(r#"<div id="div-{i}" class="item"><p>Paragraph {i}</p></div>"#));
    }
    html.push_str("</body></html>");

    let doc = parse(&html).unwrap();
    assert!(doc.tree().len() > 1500);
    assert!(doc.get_element_by_id("div-499").is_some());
}
