//! Document node tree for the Quill rendering engine.
//!
//! This crate provides an arena-based node tree in the shape the layout
//! engine consumes: element nodes with a name, an attribute map, and ordered
//! children, plus plain text nodes. A parsing front end (external to this
//! workspace) is expected to build the tree; the engine treats it as
//! read-only for the duration of a layout pass.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships, providing O(1) access and traversal without borrow checker
//! issues. Layout output refers back into the tree through `NodeId` handles,
//! never through a second owner.

use std::collections::HashMap;

use serde::Serialize;

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// A type-safe index into the node tree.
///
/// `NodeId` provides O(1) access to any node in the tree, and is the
/// non-owning handle layout boxes use to refer back to their element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The document node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// A single node in the tree, storing indices for parent/child
/// relationships.
#[derive(Debug, Clone)]
pub struct Node {
    /// What kind of node this is.
    pub node_type: NodeType,
    /// The parent node, or `None` for the document node.
    pub parent: Option<NodeId>,
    /// Ordered list of children.
    pub children: Vec<NodeId>,
}

/// The kind of a node.
#[derive(Debug, Clone)]
pub enum NodeType {
    /// The root document node. Exactly one per tree, at [`NodeId::ROOT`].
    Document,
    /// An element with a name, attributes, and children.
    Element(ElementData),
    /// A run of literal text.
    Text(String),
}

/// Element-specific data: a name plus an attribute map.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// The element's name (e.g. `"p"`, `"img"`).
    pub name: String,
    /// The element's attributes.
    pub attrs: AttributesMap,
}

impl ElementData {
    /// Create element data with the given name and no attributes.
    #[must_use]
    pub fn new(name: &str) -> Self {
        ElementData {
            name: name.to_string(),
            attrs: AttributesMap::new(),
        }
    }

    /// Returns the value of an attribute if present.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

/// Arena-based node tree with O(1) node access.
///
/// All nodes live in a contiguous vector, using indices for relationships.
/// The document node is always at index 0. The tree is built once per
/// document load and must not be mutated while a layout pass is running.
#[derive(Debug, Clone)]
pub struct NodeTree {
    nodes: Vec<Node>,
}

impl NodeTree {
    /// Create a new tree with just the document node.
    #[must_use]
    pub fn new() -> Self {
        let document = Node {
            node_type: NodeType::Document,
            parent: None,
            children: Vec::new(),
        };
        NodeTree {
            nodes: vec![document],
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get the number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (should always have at least the document).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Allocate an element node with the given name.
    pub fn alloc_element(&mut self, name: &str) -> NodeId {
        self.alloc(NodeType::Element(ElementData::new(name)))
    }

    /// Allocate a text node with the given content.
    pub fn alloc_text(&mut self, content: &str) -> NodeId {
        self.alloc(NodeType::Text(content.to_string()))
    }

    /// Append `child` as the last child of `parent`, updating both sides of
    /// the relationship.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Set an attribute on an element node. Does nothing if `id` does not
    /// refer to an element.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            if let NodeType::Element(data) = &mut node.node_type {
                let _ = data.attrs.insert(name.to_string(), value.to_string());
            }
        }
    }

    /// The document element: the first element child of the document node,
    /// if it exists. A tree without one is not a layoutable document.
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .find(|&&id| matches!(self.get(id).map(|n| &n.node_type), Some(NodeType::Element(_))))
            .copied()
    }
}

impl Default for NodeTree {
    fn default() -> Self {
        Self::new()
    }
}
