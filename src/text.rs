/*
 * Rich text for the content, footer and expanded-information areas. A text
 * value is either a plain string or a tree of runs, line breaks and hyperlinks
 * that renders to the single string the native dialog consumes. Hyperlinks
 * render as anchor markup only when the owning dialog enables hyperlinks.
 */
use crate::dialog::{DialogHandler, TaskDialog};

use std::fmt;

/// A clickable link inside a `RichText`.
pub struct Hyperlink {
    text: String,
    target: String,
    pub(crate) on_click: Option<DialogHandler>,
}

impl Hyperlink {
    pub fn new(text: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target: target.into(),
            on_click: None,
        }
    }

    pub fn on_click(mut self, handler: impl FnMut(&mut TaskDialog) + 'static) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    fn render(&self, hyperlinks_enabled: bool) -> String {
        if hyperlinks_enabled {
            format!("<A HREF=\"{}\">{}</A>", self.target, self.text)
        } else {
            self.text.clone()
        }
    }
}

impl fmt::Debug for Hyperlink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hyperlink")
            .field("text", &self.text)
            .field("target", &self.target)
            .field("has_click_handler", &self.on_click.is_some())
            .finish()
    }
}

#[derive(Debug)]
pub enum TextNode {
    Run(String),
    /// A paragraph break renders as an empty line.
    LineBreak { paragraph: bool },
    Link(Hyperlink),
}

impl TextNode {
    fn render(&self, hyperlinks_enabled: bool) -> String {
        match self {
            TextNode::Run(text) => text.clone(),
            TextNode::LineBreak { paragraph: false } => "\n".to_string(),
            TextNode::LineBreak { paragraph: true } => "\n\n".to_string(),
            TextNode::Link(link) => link.render(hyperlinks_enabled),
        }
    }
}

/// Ordered sequence of text nodes.
#[derive(Debug, Default)]
pub struct RichText {
    nodes: Vec<TextNode>,
}

impl RichText {
    pub fn new() -> Self {
        Self::default()
    }

    /*
     * Ingests a plain text fragment. An empty fragment or a single space is a
     * separator left over from markup and produces no node; anything else,
     * line breaks included, becomes its own run.
     */
    pub fn push_text(&mut self, fragment: &str) {
        if fragment.is_empty() || fragment == " " {
            return;
        }
        self.nodes.push(TextNode::Run(fragment.to_string()));
    }

    pub fn push(&mut self, node: TextNode) {
        self.nodes.push(node);
    }

    pub fn text(mut self, fragment: &str) -> Self {
        self.push_text(fragment);
        self
    }

    pub fn link(mut self, link: Hyperlink) -> Self {
        self.nodes.push(TextNode::Link(link));
        self
    }

    pub fn line_break(mut self) -> Self {
        self.nodes.push(TextNode::LineBreak { paragraph: false });
        self
    }

    pub fn paragraph_break(mut self) -> Self {
        self.nodes.push(TextNode::LineBreak { paragraph: true });
        self
    }

    pub fn nodes(&self) -> &[TextNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn render(&self, hyperlinks_enabled: bool) -> String {
        self.nodes
            .iter()
            .map(|node| node.render(hyperlinks_enabled))
            .collect()
    }

    /// First link whose target equals `target` exactly.
    pub(crate) fn find_link_mut(&mut self, target: &str) -> Option<&mut Hyperlink> {
        self.nodes.iter_mut().find_map(|node| match node {
            TextNode::Link(link) if link.target == target => Some(link),
            _ => None,
        })
    }

    /*
     * Parses text containing `<A HREF="target">text</A>` anchors (tag names are
     * case-insensitive) into runs and links. Text between anchors goes through
     * `push_text`, so single-space separators vanish. An unterminated anchor
     * is kept as literal text.
     */
    pub fn parse_markup(markup: &str) -> Self {
        const OPEN: &str = "<a href=\"";
        const CLOSE: &str = "</a>";

        let mut result = RichText::new();
        let lower = markup.to_ascii_lowercase();
        let mut cursor = 0;

        while let Some(start) = lower[cursor..].find(OPEN).map(|i| cursor + i) {
            let target_start = start + OPEN.len();
            let Some(target_end) = lower[target_start..].find('"').map(|i| target_start + i)
            else {
                break;
            };
            let Some(tag_end) = lower[target_end..].find('>').map(|i| target_end + i) else {
                break;
            };
            let Some(close) = lower[tag_end..].find(CLOSE).map(|i| tag_end + i) else {
                break;
            };

            result.push_text(&markup[cursor..start]);
            result.nodes.push(TextNode::Link(Hyperlink::new(
                &markup[tag_end + 1..close],
                &markup[target_start..target_end],
            )));
            cursor = close + CLOSE.len();
        }

        result.push_text(&markup[cursor..]);
        result
    }
}

impl From<Vec<TextNode>> for RichText {
    fn from(nodes: Vec<TextNode>) -> Self {
        Self { nodes }
    }
}

/// Value of a text property: plain string or rich text.
#[derive(Debug)]
pub enum DialogText {
    Plain(String),
    Rich(RichText),
}

impl DialogText {
    pub fn render(&self, hyperlinks_enabled: bool) -> String {
        match self {
            DialogText::Plain(text) => text.clone(),
            DialogText::Rich(rich) => rich.render(hyperlinks_enabled),
        }
    }

    pub(crate) fn find_link_mut(&mut self, target: &str) -> Option<&mut Hyperlink> {
        match self {
            DialogText::Plain(_) => None,
            DialogText::Rich(rich) => rich.find_link_mut(target),
        }
    }
}

impl From<&str> for DialogText {
    fn from(text: &str) -> Self {
        DialogText::Plain(text.to_string())
    }
}

impl From<String> for DialogText {
    fn from(text: String) -> Self {
        DialogText::Plain(text)
    }
}

impl From<RichText> for DialogText {
    fn from(text: RichText) -> Self {
        DialogText::Rich(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hello_link() -> RichText {
        RichText::new()
            .text("Hello ")
            .link(Hyperlink::new("click", "http://x"))
            .text("!")
    }

    #[test]
    fn test_links_render_as_anchors_when_hyperlinks_enabled() {
        assert_eq!(
            hello_link().render(true),
            "Hello <A HREF=\"http://x\">click</A>!"
        );
    }

    #[test]
    fn test_links_render_as_plain_text_when_hyperlinks_disabled() {
        assert_eq!(hello_link().render(false), "Hello click!");
    }

    #[test]
    fn test_empty_and_single_space_text_render_empty() {
        // Arrange
        let empty = RichText::new();
        let mut spaced = RichText::new();
        // Act
        spaced.push_text(" ");
        // Assert
        assert_eq!(empty.render(true), "");
        assert_eq!(spaced.render(true), "");
        assert!(spaced.is_empty());
    }

    #[test]
    fn test_line_breaks_and_wider_whitespace_survive() {
        // Arrange
        let text = RichText::new().text("a").text("\n").text("b").text("  ");
        // Act
        let rendered = text.render(false);
        // Assert
        assert_eq!(rendered, "a\nb  ");
    }

    #[test]
    fn test_non_whitespace_fragments_stay_independent_runs() {
        let mut text = RichText::new();
        text.push_text("one");
        text.push_text(" ");
        text.push_text("two ");
        assert_eq!(text.nodes().len(), 2);
        assert_eq!(text.render(false), "onetwo ");
    }

    #[test]
    fn test_line_breaks_render_single_or_double_newlines() {
        let text = RichText::new()
            .text("a")
            .line_break()
            .text("b")
            .paragraph_break()
            .text("c");
        assert_eq!(text.render(false), "a\nb\n\nc");
    }

    #[test]
    fn test_find_link_returns_first_exact_match() {
        let mut text = RichText::new()
            .link(Hyperlink::new("first", "app://open"))
            .link(Hyperlink::new("second", "app://open"))
            .link(Hyperlink::new("third", "app://OPEN"));

        let found = text.find_link_mut("app://open").expect("link present");
        assert_eq!(found.text(), "first");
        assert!(text.find_link_mut("app://missing").is_none());
    }

    #[test]
    fn test_parse_markup_splits_runs_and_links() {
        // Act
        let parsed = RichText::parse_markup("See <a href=\"app://docs\">the docs</a> now");
        // Assert
        assert_eq!(parsed.nodes().len(), 3);
        assert_eq!(
            parsed.render(true),
            "See <A HREF=\"app://docs\">the docs</A> now"
        );
        assert_eq!(parsed.render(false), "See the docs now");
    }

    #[test]
    fn test_parse_markup_drops_whitespace_between_anchors() {
        let parsed =
            RichText::parse_markup("<A HREF=\"a\">one</A> <A HREF=\"b\">two</A>");
        assert_eq!(parsed.nodes().len(), 2);
        assert_eq!(parsed.render(false), "onetwo");
    }

    #[test]
    fn test_parse_markup_keeps_unterminated_anchor_as_text() {
        let parsed = RichText::parse_markup("broken <A HREF=\"x\">link");
        assert_eq!(parsed.nodes().len(), 1);
        assert_eq!(parsed.render(true), "broken <A HREF=\"x\">link");
    }

    #[test]
    fn test_plain_dialog_text_has_no_links() {
        let mut text = DialogText::from("plain");
        assert_eq!(text.render(true), "plain");
        assert!(text.find_link_mut("plain").is_none());
    }
}
