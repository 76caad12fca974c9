//! Input resolution, context propagation and diagnostics

#![cfg(feature = "dom")]

use serde_json::json;
use thicket::dom::{DomHost, HostError, NodeId};
use thicket::{Attributes, Config, ExtensionError, Host, Input, Origin, Query, Text};

const PAGE: &str = r#"
<main id="main">
  <h1 id="title" class="heading">Hello</h1>
  <a id="link" href="/docs" class="nav primary">Docs</a>
  <p id="note">Some <em>text</em></p>
</main>
"#;

fn host() -> DomHost {
    DomHost::parse(PAGE).unwrap()
}

#[test]
fn test_pattern_input_resolves_in_document_order() {
    let host = host();
    let query = Query::new(&host);

    let found = query.select("p, h1").unwrap();
    assert_eq!(
        found.to_vec(),
        vec![host.element_by_id("title").unwrap(), host.element_by_id("note").unwrap()]
    );
    assert_eq!(found.origin(), &Origin::Expression("p, h1".to_string()));
}

#[test]
fn test_text_input_is_trimmed() {
    let host = host();
    let query = Query::new(&host);

    let found = query.select("  #link \n").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found.origin(), &Origin::Expression("#link".to_string()));
}

#[test]
fn test_empty_inputs_yield_empty_selections() {
    let host = host();
    let query = Query::new(&host);

    for input in [Input::Empty, Input::from(""), Input::from("   \t")] {
        let found = query.select(input).unwrap();
        assert!(found.is_empty());
        assert_eq!(found.origin(), &Origin::Programmatic);
    }
    assert!(query.select(Vec::<NodeId>::new()).unwrap().is_empty());
    assert!(query.select("table").unwrap().is_empty());
}

#[test]
fn test_node_inputs() {
    let host = host();
    let query = Query::new(&host);

    let document = query.select(host.document()).unwrap();
    assert_eq!(document.len(), 1);
    assert_eq!(document.origin(), &Origin::Programmatic);
    assert_eq!(document.find_all("em").unwrap().len(), 1);

    let link = host.element_by_id("link").unwrap();
    let note = host.element_by_id("note").unwrap();
    let listed = query.select(vec![note, link, note]).unwrap();
    // Input lists are copied as-is, repeats included.
    assert_eq!(listed.to_vec(), vec![note, link, note]);
    assert_eq!(query.select(&[link][..]).unwrap().to_vec(), vec![link]);
}

#[test]
fn test_reselecting_a_selection_is_identity() {
    let host = host();
    let query = Query::new(&host);

    let first = query.select("main > *").unwrap();
    let again = query.select(&first).unwrap();
    assert_eq!(again.to_vec(), first.to_vec());
    assert_eq!(first.select(&first).unwrap().to_vec(), first.to_vec());
}

#[test]
fn test_markup_input_builds_detached_nodes() {
    let host = host();
    let query = Query::new(&host);

    let items = query.select("<li>a</li><li>b</li>").unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items.origin(), &Origin::Expression("<li>a</li><li>b</li>".to_string()));
    assert!(items.is("li").unwrap());
    assert!(items.parent().is_empty());

    let first = items.first();
    assert_eq!(first.next(None).unwrap().to_vec(), vec![items[1]]);
    assert_eq!(items.last().siblings(None).unwrap().to_vec(), vec![items[0]]);

    // Fragments never become part of the document.
    assert!(query.select("li").unwrap().is_empty());

    let again = query.select("<li>a</li><li>b</li>").unwrap();
    assert_ne!(again.to_vec(), items.to_vec());
}

#[test]
fn test_markup_input_keeps_table_parts() {
    let host = host();
    let query = Query::new(&host);

    let rows = query.select("<tr><td>x</td></tr><tr><td>y</td></tr>").unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.is("tr").unwrap());
    assert_eq!(rows.summary().entries, vec!["tr", "tr"]);

    let cells = rows.children(Some("td")).unwrap();
    assert_eq!(cells.len(), 2);
    assert_eq!(cells.first().closest("tr").unwrap().to_vec(), vec![rows[0]]);
    assert_eq!(rows.first().next(None).unwrap().to_vec(), vec![rows[1]]);
}

#[test]
fn test_nth_pattern_with_extreme_offset() {
    let host = DomHost::parse("<ul><li></li><li></li></ul>").unwrap();
    let query = Query::new(&host);

    assert_eq!(query.select("li:nth-child(n-2147483648)").unwrap().len(), 2);
    assert_eq!(query.select("li:nth-last-child(-n+2147483647)").unwrap().len(), 2);
}

#[test]
fn test_invalid_pattern_is_reported() {
    let host = host();
    let query = Query::new(&host);

    let err = query.select("main >").unwrap_err();
    assert!(matches!(err, HostError::Selector(_)));
    assert!(!err.to_string().is_empty());

    let main = query.select("#main").unwrap();
    assert!(matches!(main.children(Some("[href")), Err(HostError::Selector(_))));
}

#[test]
fn test_summary_is_bounded() {
    let items: String = (0..12).map(|i| format!("<li class=i{i}></li>")).collect();
    let host = DomHost::parse(&format!("<ul>{items}</ul>")).unwrap();
    let query = Query::new(&host);

    let found = query.select("li").unwrap();
    let summary = found.summary();
    assert_eq!(summary.length, 12);
    assert_eq!(summary.entries.len(), 10);
    assert_eq!(summary.entries[0], "li.i0");
    assert_eq!(summary.origin, Origin::Expression("li".to_string()));

    let debug = format!("{found:?}");
    assert!(debug.contains("length: 12"));
    assert!(!debug.contains("li.i10"));

    let narrow = Query::builder(&host)
        .config(Config { summary_limit: 3, ..Config::default() })
        .build();
    let found = narrow.select("li").unwrap();
    assert_eq!(found.summary().entries, vec!["li.i0", "li.i1", "li.i2"]);
    assert_eq!(found.parent().config().summary_limit, 3);
}

#[test]
fn test_selection_serializes_as_summary() {
    let host = host();
    let query = Query::new(&host);

    let found = query.select("#link").unwrap();
    assert_eq!(
        serde_json::to_value(&found).unwrap(),
        json!({
            "length": 1,
            "entries": ["a#link.nav.primary"],
            "origin": { "expression": "#link" }
        })
    );

    let parent = found.parent();
    assert_eq!(
        serde_json::to_value(&parent).unwrap(),
        json!({ "length": 1, "entries": ["main#main"], "origin": "programmatic" })
    );
}

#[test]
fn test_extensions_survive_chaining() {
    let host = host();
    let query = Query::builder(&host)
        .extension(Attributes)
        .unwrap()
        .extension(Text)
        .unwrap()
        .build();
    assert_eq!(query.extensions().names().collect::<Vec<_>>(), vec!["attributes", "text"]);

    let link = query
        .select("h1")
        .unwrap()
        .parent()
        .children(None)
        .unwrap()
        .filter_by("a")
        .unwrap();

    let attrs = link.extension::<Attributes>().unwrap();
    assert_eq!(attrs.attr(&link, "href").as_deref(), Some("/docs"));
    assert_eq!(attrs.attr(&link, "title"), None);
    assert!(attrs.has_class(&link, "primary"));
    assert!(!attrs.has_class(&link, "prim"));

    let note = link.next(None).unwrap();
    let text = note.extension::<Text>().unwrap();
    assert_eq!(text.text(&note), "Some text");
    assert_eq!(note.extensions().by_name("text").map(|e| e.name()), Some("text"));
}

#[test]
fn test_plain_query_has_no_extensions() {
    let host = host();
    let query = Query::new(&host);

    let found = query.select("p").unwrap();
    assert!(found.extension::<Attributes>().is_none());
    assert!(found.extensions().is_empty());
    assert_eq!(query.config(), &Config::default());
}

#[test]
fn test_duplicate_extension_is_rejected() {
    let host = host();
    let result = Query::builder(&host)
        .extension(Attributes)
        .unwrap()
        .extension(Attributes);

    assert!(matches!(result, Err(ExtensionError::Duplicate("attributes"))));
}

#[test]
fn test_slicing_and_indexing() {
    let host = host();
    let query = Query::new(&host);
    let children = query.select("#main > *").unwrap();
    assert_eq!(children.len(), 3);

    assert_eq!(children.slice(1..).len(), 2);
    assert_eq!(children.slice(..=0).to_vec(), vec![children[0]]);
    assert!(children.slice(5..9).is_empty());
    assert_eq!(children.get(2), Some(children[2]));
    assert_eq!(children.get(3), None);
    assert_eq!(children.iter().count(), 3);
    assert_eq!(children.clone().to_vec(), children.to_vec());
}
