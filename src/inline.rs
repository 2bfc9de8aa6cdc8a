use std::sync::LazyLock;

use regex::Regex;

use crate::error::Error;
use crate::node::{IMAGE_TAG, Node};
use crate::span::{Span, SpanKind};

pub const BOLD_TAG: &str = "b";
pub const ITALIC_TAG: &str = "i";
pub const CODE_TAG: &str = "code";
pub const LINK_TAG: &str = "a";

static IMAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").expect("valid image pattern"));

// No look-behind in `regex`; images are filtered out by hand in `split_links`.
static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").expect("valid link pattern"));

/// Tokenize a run of inline markdown into typed spans.
///
/// Passes run in a fixed order (bold, italic, code, images, links) and each
/// one only subdivides spans that are still plain text, so styles never nest.
pub fn text_to_spans(text: &str) -> Result<Vec<Span>, Error> {
    let spans = if text.is_empty() {
        Vec::new()
    } else {
        vec![Span::text(text)]
    };
    let spans = split_delimiter(spans, "**", |t| Span::bold(t))?;
    let spans = split_delimiter(spans, "*", |t| Span::italic(t))?;
    let spans = split_delimiter(spans, "`", |t| Span::code(t))?;
    let spans = split_images(spans);
    Ok(split_links(spans))
}

/// Tokenize text and convert every span to a leaf node.
pub fn text_to_leaves(text: &str) -> Result<Vec<Node>, Error> {
    Ok(text_to_spans(text)?.iter().map(span_to_leaf).collect())
}

/// Map a span onto the leaf node that renders it.
pub fn span_to_leaf(span: &Span) -> Node {
    let text = span.content();
    match (span.kind(), span.url()) {
        (SpanKind::Text, _) => Node::raw(text),
        (SpanKind::Bold, _) => Node::leaf(BOLD_TAG, text),
        (SpanKind::Italic, _) => Node::leaf(ITALIC_TAG, text),
        (SpanKind::Code, _) => Node::leaf(CODE_TAG, text),
        (SpanKind::Link, Some(url)) => Node::leaf(LINK_TAG, text).with_attributes([("href", url)]),
        (SpanKind::Image, Some(url)) => {
            Node::leaf(IMAGE_TAG, "").with_attributes([("src", url), ("alt", text)])
        }
        (SpanKind::Link | SpanKind::Image, None) => {
            unreachable!("link and image spans are always built with a url")
        }
    }
}

/// Split text spans on `delimiter`; odd-numbered pieces are built with `style`.
fn split_delimiter(
    spans: Vec<Span>,
    delimiter: &str,
    style: impl Fn(&str) -> Span,
) -> Result<Vec<Span>, Error> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        if !span.is_text() {
            out.push(span);
            continue;
        }

        let parts: Vec<&str> = span.content().split(delimiter).collect();
        if parts.len() == 1 {
            out.push(span);
            continue;
        }
        if parts.len() % 2 == 0 {
            return Err(Error::DelimiterImbalance {
                delimiter: delimiter.to_string(),
                text: span.content().to_string(),
            });
        }

        for (i, part) in parts.into_iter().enumerate() {
            if part.is_empty() {
                continue;
            }
            out.push(if i % 2 == 0 { Span::text(part) } else { style(part) });
        }
    }

    Ok(out)
}

fn push_text(out: &mut Vec<Span>, text: &str) {
    if !text.is_empty() {
        out.push(Span::text(text));
    }
}

pub(crate) fn split_images(spans: Vec<Span>) -> Vec<Span> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        if !span.is_text() {
            out.push(span);
            continue;
        }

        let text = span.content();
        let mut rest = 0;
        for caps in IMAGE_PATTERN.captures_iter(text) {
            let whole = caps.get(0).expect("group 0 always matches");
            push_text(&mut out, &text[rest..whole.start()]);
            out.push(Span::image(&caps[1], &caps[2]));
            rest = whole.end();
        }
        push_text(&mut out, &text[rest..]);
    }

    out
}

pub(crate) fn split_links(spans: Vec<Span>) -> Vec<Span> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        if !span.is_text() {
            out.push(span);
            continue;
        }

        let text = span.content();
        let mut rest = 0;
        let mut search = 0;
        while let Some(caps) = LINK_PATTERN.captures_at(text, search) {
            let whole = caps.get(0).expect("group 0 always matches");
            // Image syntax stays literal; retry from just past the `[`.
            if text[..whole.start()].ends_with('!') {
                search = whole.start() + 1;
                continue;
            }
            push_text(&mut out, &text[rest..whole.start()]);
            out.push(Span::link(&caps[1], &caps[2]));
            rest = whole.end();
            search = whole.end();
        }
        push_text(&mut out, &text[rest..]);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strip_markers(text: &str) -> String {
        text.replace("**", "").replace(['*', '`'], "")
    }

    #[test]
    fn bold() {
        assert_eq!(
            text_to_spans("good bold **text** is good").unwrap(),
            vec![
                Span::text("good bold "),
                Span::bold("text"),
                Span::text(" is good"),
            ]
        );
    }

    #[test]
    fn italic() {
        assert_eq!(
            text_to_spans("good italic *text* is good").unwrap(),
            vec![
                Span::text("good italic "),
                Span::italic("text"),
                Span::text(" is good"),
            ]
        );
    }

    #[test]
    fn code_at_edges() {
        assert_eq!(
            text_to_spans("good code `text`").unwrap(),
            vec![Span::text("good code "), Span::code("text")]
        );
        assert_eq!(
            text_to_spans("`text` code").unwrap(),
            vec![Span::code("text"), Span::text(" code")]
        );
        assert_eq!(text_to_spans("`text`").unwrap(), vec![Span::code("text")]);
    }

    #[test]
    fn empty_pair_yields_nothing() {
        assert_eq!(
            text_to_spans("a `` b").unwrap(),
            vec![Span::text("a "), Span::text(" b")]
        );
        assert_eq!(text_to_spans("").unwrap(), Vec::new());
    }

    #[test]
    fn bold_content_is_not_resplit() {
        assert_eq!(
            text_to_spans("**a `b` c**").unwrap(),
            vec![Span::bold("a `b` c")]
        );
    }

    #[test]
    fn uneven_delimiter() {
        assert_eq!(
            text_to_spans("bad *text"),
            Err(Error::DelimiterImbalance {
                delimiter: "*".to_string(),
                text: "bad *text".to_string(),
            })
        );
        assert!(matches!(
            text_to_spans("**a** and **b"),
            Err(Error::DelimiterImbalance { delimiter, .. }) if delimiter == "**"
        ));
        assert!(text_to_spans("one `tick").is_err());
    }

    #[test]
    fn balanced_text_keeps_all_content() {
        for text in [
            "plain words only",
            "This is **text** with an *italic* word and a `code block`",
            "**a****b** *c* `d` e",
            "*x*`y`**z**",
        ] {
            let spans = text_to_spans(text).unwrap();
            assert!(spans.iter().all(|s| !s.content().is_empty()));
            let joined: String = spans.iter().map(Span::content).collect();
            assert_eq!(joined, strip_markers(text));
        }
    }

    #[test]
    fn images_only() {
        let text = "This is text with a ![rick roll](https://i.imgur.com/aKaOqIh.gif) and ![obi wan](https://i.imgur.com/fJRm4Vk.jpeg)";
        assert_eq!(
            split_images(vec![Span::text(text)]),
            vec![
                Span::text("This is text with a "),
                Span::image("rick roll", "https://i.imgur.com/aKaOqIh.gif"),
                Span::text(" and "),
                Span::image("obi wan", "https://i.imgur.com/fJRm4Vk.jpeg"),
            ]
        );
    }

    #[test]
    fn image_pass_leaves_links() {
        let text = "a ![img](u) and [link](v)";
        assert_eq!(
            split_images(vec![Span::text(text)]),
            vec![
                Span::text("a "),
                Span::image("img", "u"),
                Span::text(" and [link](v)"),
            ]
        );
    }

    #[test]
    fn links_only() {
        let text = "This is text with a link [to boot dev](https://www.boot.dev) and [to youtube](https://www.youtube.com/@bootdotdev)";
        assert_eq!(
            split_links(vec![Span::text(text)]),
            vec![
                Span::text("This is text with a link "),
                Span::link("to boot dev", "https://www.boot.dev"),
                Span::text(" and "),
                Span::link("to youtube", "https://www.youtube.com/@bootdotdev"),
            ]
        );
    }

    #[test]
    fn link_pass_skips_images() {
        let text = "link ![to boot dev](https://www.boot.dev) and [to youtube](https://www.youtube.com), then ![to boot dev](https://www.boot.dev)";
        assert_eq!(
            split_links(vec![Span::text(text)]),
            vec![
                Span::text("link ![to boot dev](https://www.boot.dev) and "),
                Span::link("to youtube", "https://www.youtube.com"),
                Span::text(", then ![to boot dev](https://www.boot.dev)"),
            ]
        );
    }

    #[test]
    fn link_pass_finds_link_inside_skipped_candidate() {
        assert_eq!(
            split_links(vec![Span::text("![a [b](v)")]),
            vec![Span::text("![a "), Span::link("b", "v")]
        );
    }

    #[test]
    fn image_then_link() {
        assert_eq!(
            text_to_spans("![a](u) and [b](v)").unwrap(),
            vec![
                Span::image("a", "u"),
                Span::text(" and "),
                Span::link("b", "v"),
            ]
        );
    }

    #[test]
    fn every_style() {
        let text = "This is **text** with an *italic* word and a `code block` and an ![obi wan image](https://i.imgur.com/fJRm4Vk.jpeg) and a [link](https://boot.dev)";
        assert_eq!(
            text_to_spans(text).unwrap(),
            vec![
                Span::text("This is "),
                Span::bold("text"),
                Span::text(" with an "),
                Span::italic("italic"),
                Span::text(" word and a "),
                Span::code("code block"),
                Span::text(" and an "),
                Span::image("obi wan image", "https://i.imgur.com/fJRm4Vk.jpeg"),
                Span::text(" and a "),
                Span::link("link", "https://boot.dev"),
            ]
        );
    }

    #[test]
    fn leaves_for_every_kind() {
        assert_eq!(span_to_leaf(&Span::text("t")), Node::raw("t"));
        assert_eq!(span_to_leaf(&Span::bold("t")), Node::leaf("b", "t"));
        assert_eq!(span_to_leaf(&Span::italic("t")), Node::leaf("i", "t"));
        assert_eq!(span_to_leaf(&Span::code("t")), Node::leaf("code", "t"));
        assert_eq!(
            span_to_leaf(&Span::link("t", "u")),
            Node::leaf("a", "t").with_attributes([("href", "u")])
        );
        assert_eq!(
            span_to_leaf(&Span::image("t", "u")),
            Node::leaf("img", "").with_attributes([("src", "u"), ("alt", "t")])
        );
    }

    #[test]
    fn tokenized_links_and_images_render_their_urls() {
        let leaves = text_to_leaves("[site](https://boot.dev) ![logo](/logo.png)").unwrap();
        let html: Vec<String> = leaves.iter().map(|l| l.render().unwrap()).collect();
        assert_eq!(
            html,
            vec![
                "<a href=\"https://boot.dev\">site</a>".to_string(),
                " ".to_string(),
                "<img src=\"/logo.png\" alt=\"logo\"></img>".to_string(),
            ]
        );
    }

    #[test]
    fn leaf_conversion_is_deterministic() {
        let span = Span::image("alt text", "/pic.png");
        let first = span_to_leaf(&span);
        assert_eq!(first, span_to_leaf(&span));
        assert_eq!(
            first.render().unwrap(),
            "<img src=\"/pic.png\" alt=\"alt text\"></img>"
        );
    }
}
