use std::fmt::Write as _;

use crate::foundation::core::Size;
use crate::foundation::error::{FlipError, FlipResult};

/// Opaque handle to a node owned by a [`SceneGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

impl NodeId {
    /// Construct a [`NodeId`] from a raw host handle.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Access the raw host handle.
    pub fn as_raw(self) -> u64 {
        self.0
    }
}

/// Element kinds the player asks a host to create.
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    /// Block-level image stretched to an explicit size.
    Image {
        /// Image URL.
        src: String,
        /// Display size in pixels.
        size: Size,
    },
    /// Plain container, optionally sized and clipping its overflow.
    Container {
        /// Class name (`strip`, `frame`).
        class: String,
        /// Explicit size, if any.
        size: Option<Size>,
        /// Hide content outside the container box.
        clip: bool,
    },
    /// Hyperlink opening in a new tab.
    Link {
        /// Target URL, also used as the tooltip.
        href: String,
    },
}

/// Scene-graph builder provided by the host environment.
///
/// The player only creates nodes, appends them under its mount point, and moves one node
/// vertically afterwards.
pub trait SceneGraph {
    /// Node the player attaches its output to.
    fn mount_point(&self) -> NodeId;
    /// Create a detached node.
    fn create(&mut self, element: Element) -> FlipResult<NodeId>;
    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> FlipResult<()>;
    /// Translate `node` vertically by `offset_px` (negative moves up).
    fn set_translate_y(&mut self, node: NodeId, offset_px: f64) -> FlipResult<()>;
}

#[derive(Clone, Debug)]
struct SceneNode {
    element: Option<Element>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    translate_y: Option<f64>,
}

/// In-memory scene graph that can be serialized to HTML.
///
/// Node 0 is the mount point; it renders as a `div` carrying the player's manifest URL.
#[derive(Clone, Debug)]
pub struct RetainedScene {
    player_url: String,
    nodes: Vec<SceneNode>,
}

impl RetainedScene {
    /// Empty scene whose mount point was discovered for `player_url`.
    pub fn new(player_url: impl Into<String>) -> Self {
        Self {
            player_url: player_url.into(),
            nodes: vec![SceneNode {
                element: None,
                parent: None,
                children: Vec::new(),
                translate_y: None,
            }],
        }
    }

    /// Manifest URL the mount point was discovered for.
    pub fn player_url(&self) -> &str {
        &self.player_url
    }

    /// Number of nodes, mount point included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` when nothing has been created besides the mount point.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Element behind `id`; `None` for the mount point and unknown ids.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.node(id).ok()?.element.as_ref()
    }

    /// Children of `id` in document order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Parent of `id`, if attached.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).ok()?.parent
    }

    /// Current vertical translation of `id`.
    pub fn translate_y(&self, id: NodeId) -> Option<f64> {
        self.node(id).ok()?.translate_y
    }

    /// Serialize the mount point and everything under it.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_node(&mut out, self.mount_point(), 0);
        out
    }

    fn node(&self, id: NodeId) -> FlipResult<&SceneNode> {
        usize::try_from(id.0)
            .ok()
            .and_then(|i| self.nodes.get(i))
            .ok_or_else(|| FlipError::scene(format!("unknown node {}", id.0)))
    }

    fn node_mut(&mut self, id: NodeId) -> FlipResult<&mut SceneNode> {
        usize::try_from(id.0)
            .ok()
            .and_then(|i| self.nodes.get_mut(i))
            .ok_or_else(|| FlipError::scene(format!("unknown node {}", id.0)))
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == candidate {
                return true;
            }
            match self.parent(node) {
                Some(p) => node = p,
                None => return false,
            }
        }
    }

    fn write_node(&self, out: &mut String, id: NodeId, depth: usize) {
        let Ok(node) = self.node(id) else {
            return;
        };
        let indent = "  ".repeat(depth);

        let (open, close) = match &node.element {
            None => (
                format!(
                    "<div data-player-url=\"{}\">",
                    escape_attr(&self.player_url)
                ),
                "</div>",
            ),
            Some(Element::Image { src, size }) => {
                let style = format!(
                    "width: {}px; height: {}px; display: block;",
                    size.width, size.height
                );
                let _ = writeln!(
                    out,
                    "{indent}<img src=\"{}\" style=\"{}\">",
                    escape_attr(src),
                    self.with_transform(style, node)
                );
                return;
            }
            Some(Element::Container { class, size, clip }) => {
                let mut style = String::new();
                if let Some(size) = size {
                    let _ = write!(style, "width: {}px; height: {}px;", size.width, size.height);
                }
                if *clip {
                    if !style.is_empty() {
                        style.push(' ');
                    }
                    style.push_str("overflow: hidden;");
                }
                let style = self.with_transform(style, node);
                let style_attr = if style.is_empty() {
                    String::new()
                } else {
                    format!(" style=\"{style}\"")
                };
                (
                    format!("<div class=\"{}\"{style_attr}>", escape_attr(class)),
                    "</div>",
                )
            }
            Some(Element::Link { href }) => {
                let href = escape_attr(href);
                (
                    format!("<a href=\"{href}\" title=\"{href}\" target=\"_blank\">"),
                    "</a>",
                )
            }
        };

        let _ = writeln!(out, "{indent}{open}");
        for &child in &node.children {
            self.write_node(out, child, depth + 1);
        }
        let _ = writeln!(out, "{indent}{close}");
    }

    fn with_transform(&self, mut style: String, node: &SceneNode) -> String {
        if let Some(y) = node.translate_y {
            if !style.is_empty() {
                style.push(' ');
            }
            let _ = write!(style, "transform: translateY({y}px);");
        }
        style
    }
}

impl SceneGraph for RetainedScene {
    fn mount_point(&self) -> NodeId {
        NodeId(0)
    }

    fn create(&mut self, element: Element) -> FlipResult<NodeId> {
        let id = NodeId(self.nodes.len() as u64);
        self.nodes.push(SceneNode {
            element: Some(element),
            parent: None,
            children: Vec::new(),
            translate_y: None,
        });
        Ok(id)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> FlipResult<()> {
        let parent_node = self.node(parent)?;
        if matches!(parent_node.element, Some(Element::Image { .. })) {
            return Err(FlipError::scene(format!(
                "image node {} cannot have children",
                parent.0
            )));
        }
        let child_node = self.node(child)?;
        if child_node.parent.is_some() || child == self.mount_point() {
            return Err(FlipError::scene(format!("node {} is already attached", child.0)));
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(FlipError::scene(format!(
                "appending node {} under {} would create a cycle",
                child.0, parent.0
            )));
        }

        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    fn set_translate_y(&mut self, node: NodeId, offset_px: f64) -> FlipResult<()> {
        self.node_mut(node)?.translate_y = Some(offset_px);
        Ok(())
    }
}

fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/strip/scene.rs"]
mod tests;
