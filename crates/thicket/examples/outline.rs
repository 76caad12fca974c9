//! Example: print a document outline with chained selections
//!
//! Run with `RUST_LOG=thicket=debug` to see resolution logs.

use thicket::dom::DomHost;
use thicket::{Attributes, Query, Text};
use tracing_subscriber::EnvFilter;

const PAGE: &str = r#"
<article id="guide">
  <h1>Getting started</h1>
  <section id="install">
    <h2>Install</h2>
    <p>Add the crate.</p>
    <a href="/crates/thicket">crate page</a>
  </section>
  <section id="usage">
    <h2>Usage</h2>
    <p>Build a query, then chain.</p>
    <ul><li>select</li><li class="hot">find_all</li><li>closest</li></ul>
  </section>
</article>
"#;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let host = DomHost::parse(PAGE)?;
    let query = Query::builder(&host)
        .extension(Attributes)?
        .extension(Text)?
        .build();

    println!("thicket v{}", thicket::VERSION);

    let headings = query.select("h1, h2")?;
    println!("{} headings: {:?}", headings.len(), headings);

    for heading in &headings {
        let heading = query.select(heading)?;
        let text = heading.extension::<Text>().map(|t| t.text(&heading));
        let section = heading.closest("section")?;
        let attrs = section.extension::<Attributes>();
        let id = attrs.and_then(|a| a.attr(&section, "id"));
        println!("  {:<20} in #{}", text.unwrap_or_default(), id.as_deref().unwrap_or("-"));
    }

    let hot = query.select(".hot")?;
    let around = hot.siblings(None)?;
    println!("siblings of .hot: {}", serde_json::to_string(&around)?);

    let links = query.select("#guide")?.descendants_until("ul", Some("a, li"))?;
    println!("links outside lists: {:?}", links.summary().entries);

    let extra = query.select("<li>matches</li>")?;
    let list = hot.parent().add(&extra)?;
    println!("combined: {}", serde_json::to_string_pretty(&list)?);

    Ok(())
}
