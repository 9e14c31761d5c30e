//! Host document generation for vector sources.
//!
//! Each SVG is inlined into a tiny HTML page so the engine can load it and the
//! renderer can find the drawable deterministically at `#container svg`.

/// Selector whose presence signals the host document is ready
pub const CONTAINER_SELECTOR: &str = "#container";

/// Selector of the element that gets screenshotted
pub const DRAWABLE_SELECTOR: &str = "#container svg";

const HOST_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<style>
  html, body { margin: 0; padding: 0; background: transparent; }
  #container { display: inline-block; line-height: 0; }
</style>
</head>
<body>
<div id="container">"#;

const HOST_TAIL: &str = "</div>\n</body>\n</html>\n";

/// Wrap raw vector markup into a host document.
///
/// The markup is inlined as-is (surrounding whitespace trimmed so no stray
/// text node precedes the drawable). Nothing is validated here: markup that
/// does not contain an `<svg>` element only fails later, when the renderer
/// looks up [`DRAWABLE_SELECTOR`].
pub fn render_template(markup: &str) -> String {
    let markup = markup.trim();
    let mut doc = String::with_capacity(HOST_HEAD.len() + markup.len() + HOST_TAIL.len());
    doc.push_str(HOST_HEAD);
    doc.push_str(markup);
    doc.push_str(HOST_TAIL);
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    const POINTER: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32"><rect width="8" height="8"/></svg>"#;

    #[test]
    fn wraps_markup_in_single_container() {
        let doc = render_template(POINTER);
        assert_eq!(doc.matches(r#"id="container""#).count(), 1);
        assert!(doc.contains(&format!(r#"<div id="container">{}</div>"#, POINTER)));
        assert!(doc.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn braces_in_markup_survive() {
        let tricky = "<svg><text>{{name}} {x}</text></svg>";
        let doc = render_template(tricky);
        assert!(doc.contains(tricky));
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let doc = render_template("\n  <svg/>\n\n");
        assert!(doc.contains(r#"<div id="container"><svg/></div>"#));
    }

    #[test]
    fn malformed_markup_passes_through() {
        let doc = render_template("<g>not an svg</g>");
        assert!(doc.contains("<g>not an svg</g>"));
        assert!(!doc.contains("<svg"));
    }
}
