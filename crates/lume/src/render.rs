//! String-template rendering.
//!
//! A widget renders into a [`RenderContext`]: it writes markup with `write!`,
//! adds override rules to the instance's [`ScopedStyleSheet`], and registers
//! every element that receives listeners as an interactive node. The result is
//! a [`RenderedOutput`], which replaces the previous output wholesale.
//!
//! ```ignore
//! fn render(&self, config: &ButtonConfig, ctx: &mut RenderContext<'_>) -> fmt::Result {
//!     ctx.sheet().rule("& .lume-btn").decl_opt("background", config.bg_color.as_ref());
//!     let node = ctx.node("button");
//!     write!(ctx, "<button class=\"lume-btn\"{node}>{}</button>", esc(&config.label))
//! }
//! ```
//!
//! Free text goes into markup only through [`esc`]; style positions only take
//! [`CssValue`](lume_style::CssValue)s.

use std::fmt::{self, Write as _};
use std::sync::Arc;

use lume_core::{EventKind, EventTarget};
use lume_style::ScopedStyleSheet;
use rand::Rng;

const ID_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 9;

/// A per-instance identifier: the widget prefix followed by nine base-36
/// characters. It is the scope class of the instance's stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstanceId(String);

impl InstanceId {
    /// Generate a fresh id with `prefix` (for example `"lume-btn-"`).
    pub fn generate(prefix: &str) -> Self {
        let mut rng = rand::thread_rng();
        let mut id = String::with_capacity(prefix.len() + ID_SUFFIX_LEN);
        id.push_str(prefix);
        for _ in 0..ID_SUFFIX_LEN {
            id.push(ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char);
        }
        Self(id)
    }

    /// The id text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for InstanceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Escape text for an HTML text or attribute position.
pub fn escape_html(text: &str) -> String {
    esc(text).to_string()
}

/// Display wrapper that HTML-escapes its contents.
pub fn esc(text: &str) -> Escape<'_> {
    Escape(text)
}

/// See [`esc`].
#[derive(Debug, Clone, Copy)]
pub struct Escape<'a>(&'a str);

impl fmt::Display for Escape<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut last = 0;
        for (i, c) in self.0.char_indices() {
            let replacement = match c {
                '&' => "&amp;",
                '<' => "&lt;",
                '>' => "&gt;",
                '"' => "&quot;",
                '\'' => "&#39;",
                _ => continue,
            };
            f.write_str(&self.0[last..i])?;
            f.write_str(replacement)?;
            last = i + c.len_utf8();
        }
        f.write_str(&self.0[last..])
    }
}

/// Data carried by an interactive node (href, text, index, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeData(Vec<(&'static str, String)>);

impl NodeData {
    /// Empty data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry.
    pub fn with(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.0.push((key, value.into()));
        self
    }

    /// Add an entry when a value is present.
    pub fn with_opt(self, key: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    /// Look up an entry.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Look up and parse an index entry.
    pub fn index(&self, key: &str) -> Option<usize> {
        self.get(key).and_then(|v| v.parse().ok())
    }
}

/// An element of the rendered output that can receive events.
#[derive(Debug, Clone)]
pub struct InteractiveNode {
    index: usize,
    role: &'static str,
    data: NodeData,
    target: Arc<EventTarget>,
}

impl InteractiveNode {
    /// Position in the node table (the value of `data-lume-node`).
    pub fn index(&self) -> usize {
        self.index
    }

    /// The node's role within its widget.
    pub fn role(&self) -> &'static str {
        self.role
    }

    /// Data attached at render time.
    pub fn data(&self) -> &NodeData {
        &self.data
    }

    /// The node's event target.
    pub fn target(&self) -> &Arc<EventTarget> {
        &self.target
    }
}

/// Attribute marker written into markup for an interactive node.
#[derive(Debug, Clone, Copy)]
pub struct NodeAttr(usize);

impl fmt::Display for NodeAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " data-lume-node=\"{}\"", self.0)
    }
}

/// The output of one render pass.
#[derive(Debug)]
pub struct RenderedOutput {
    style: String,
    markup: String,
    nodes: Vec<InteractiveNode>,
}

impl RenderedOutput {
    /// Output before the first render.
    pub fn empty() -> Self {
        Self {
            style: String::new(),
            markup: String::new(),
            nodes: Vec::new(),
        }
    }

    /// The instance stylesheet.
    pub fn style(&self) -> &str {
        &self.style
    }

    /// The markup.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Style and markup as one shadow-root fragment.
    pub fn html(&self) -> String {
        if self.style.is_empty() {
            self.markup.clone()
        } else {
            format!("<style>\n{}</style>\n{}", self.style, self.markup)
        }
    }

    /// All interactive nodes.
    pub fn nodes(&self) -> &[InteractiveNode] {
        &self.nodes
    }

    /// The first node with `role`.
    pub fn node(&self, role: &str) -> Option<&InteractiveNode> {
        self.nodes.iter().find(|node| node.role == role)
    }

    /// Every node with `role`, in markup order.
    pub fn nodes_with_role<'a>(&'a self, role: &'a str) -> impl Iterator<Item = &'a InteractiveNode> + 'a {
        self.nodes.iter().filter(move |node| node.role == role)
    }

    /// The node with the given `data-lume-node` index.
    pub fn node_at(&self, index: usize) -> Option<&InteractiveNode> {
        self.nodes.get(index)
    }

    /// Listeners currently attached to this output's nodes.
    pub fn listener_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|node| node.target.total_listener_count())
            .sum()
    }

    /// Listeners of one kind attached to nodes with `role`.
    pub fn listener_count_for(&self, role: &str, kind: EventKind) -> usize {
        self.nodes_with_role(role)
            .map(|node| node.target.listener_count(kind))
            .sum()
    }
}

/// Render target handed to [`Widget::render`](crate::Widget::render).
pub struct RenderContext<'a> {
    id: &'a InstanceId,
    tag: &'static str,
    sheet: ScopedStyleSheet,
    markup: String,
    nodes: Vec<(&'static str, NodeData)>,
}

impl<'a> RenderContext<'a> {
    pub(crate) fn new(id: &'a InstanceId, tag: &'static str) -> Self {
        Self {
            id,
            tag,
            sheet: ScopedStyleSheet::new(id.as_str()),
            markup: String::new(),
            nodes: Vec::new(),
        }
    }

    /// The instance id.
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// The instance stylesheet.
    pub fn sheet(&mut self) -> &mut ScopedStyleSheet {
        &mut self.sheet
    }

    /// Register an interactive node and return its markup attribute.
    pub fn node(&mut self, role: &'static str) -> NodeAttr {
        self.node_with(role, NodeData::new())
    }

    /// Register an interactive node carrying `data`.
    pub fn node_with(&mut self, role: &'static str, data: NodeData) -> NodeAttr {
        self.nodes.push((role, data));
        NodeAttr(self.nodes.len() - 1)
    }

    /// Append raw, already-safe markup.
    pub fn push(&mut self, markup: &str) {
        self.markup.push_str(markup);
    }

    pub(crate) fn finish(self) -> RenderedOutput {
        let mut markup = String::with_capacity(self.markup.len() + 64);
        let _ = write!(
            markup,
            "<div class=\"{}\" data-lume-root=\"{}\">{}</div>",
            self.id, self.tag, self.markup
        );
        let nodes = self
            .nodes
            .into_iter()
            .enumerate()
            .map(|(index, (role, data))| InteractiveNode {
                index,
                role,
                data,
                target: Arc::new(EventTarget::new(format!("{}#{index}:{role}", self.id))),
            })
            .collect();
        RenderedOutput {
            style: self.sheet.to_css(),
            markup,
            nodes,
        }
    }
}

impl fmt::Write for RenderContext<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.markup.push_str(s);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Write;

    use super::*;

    #[test]
    fn test_instance_id_shape() {
        let id = InstanceId::generate("lume-btn-");
        let suffix = id.as_str().strip_prefix("lume-btn-").unwrap();
        assert_eq!(suffix.len(), 9);
        assert!(suffix.bytes().all(|b| ID_ALPHABET.contains(&b)));
        assert_ne!(id, InstanceId::generate("lume-btn-"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape_html(r#"<img src=x onerror="alert('x')">&"#),
            "&lt;img src=x onerror=&quot;alert(&#39;x&#39;)&quot;&gt;&amp;"
        );
        assert_eq!(escape_html("plain – text"), "plain – text");
    }

    #[test]
    fn test_nodes_are_numbered_in_order() {
        let id = InstanceId::generate("lume-test-");
        let mut ctx = RenderContext::new(&id, "lume-test");
        let first = ctx.node("link");
        let second = ctx.node_with("link", NodeData::new().with("href", "/about"));
        write!(ctx, "<a{first}>Home</a><a{second}>About</a>").unwrap();
        let output = ctx.finish();

        assert!(output.markup().contains("<a data-lume-node=\"0\">Home</a>"));
        assert!(output.markup().contains("<a data-lume-node=\"1\">About</a>"));
        assert_eq!(output.nodes_with_role("link").count(), 2);
        assert_eq!(output.node_at(1).unwrap().data().get("href"), Some("/about"));
        assert!(output.markup().starts_with(&format!("<div class=\"{id}\"")));
    }
}
