use scraper::{Html, Node};

const SKIPPED_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Reduce an HTML fragment to its visible text.
///
/// Every tag is removed. Text inside script-like elements is dropped with
/// its tag. Runs of whitespace collapse to a single space.
pub fn strip_markup(html: &str) -> String {
    if !html.contains('<') && !html.contains('&') {
        return collapse_whitespace(html);
    }

    let fragment = Html::parse_fragment(html);
    let mut text = String::new();

    for node in fragment.tree.root().descendants() {
        let Node::Text(chunk) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| SKIPPED_ELEMENTS.contains(&el.name()))
        });
        if hidden {
            continue;
        }

        text.push_str(chunk);
        text.push(' ');
    }

    collapse_whitespace(&text)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
