//! Node definitions for the decision tree
//!
//! A tree is a nest of owned [`Node`]s: question nodes ask about one
//! attribute and branch on the answer, leaves hold the objects still
//! consistent with every answer on the path. Trees are immutable once built;
//! traversal state lives in the traverser, never in the nodes.

use std::collections::BTreeSet;
use std::fmt;

/// Represents a position in the decision tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Ask whether the object has `attribute`
    Question {
        /// Attribute being asked about
        attribute: String,
        /// Subtree for objects with the attribute set to 1
        yes: Box<Node>,
        /// Subtree for objects with the attribute set to 0
        no: Box<Node>,
    },
    /// Objects that the path so far cannot tell apart
    Leaf {
        /// Candidate object names, never empty
        candidates: Vec<String>,
    },
}

impl Node {
    /// Create a leaf from candidate names
    pub fn leaf<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Node::Leaf {
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a question node
    pub fn question(attribute: impl Into<String>, yes: Node, no: Node) -> Self {
        Node::Question {
            attribute: attribute.into(),
            yes: Box::new(yes),
            no: Box::new(no),
        }
    }

    /// Check if this is a leaf node
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Check if this is a question node
    pub fn is_question(&self) -> bool {
        matches!(self, Node::Question { .. })
    }

    /// Attribute asked at this node (None for leaves)
    pub fn attribute(&self) -> Option<&str> {
        match self {
            Node::Question { attribute, .. } => Some(attribute),
            Node::Leaf { .. } => None,
        }
    }

    /// Child to follow for an answer (None for leaves)
    pub fn child(&self, answer: bool) -> Option<&Node> {
        match self {
            Node::Question { yes, no, .. } => Some(if answer { &**yes } else { &**no }),
            Node::Leaf { .. } => None,
        }
    }

    /// Every candidate beneath this node, in leaf order (yes side first).
    pub fn candidates(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_candidates(&mut out);
        out
    }

    fn collect_candidates<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Node::Leaf { candidates } => out.extend(candidates.iter().map(String::as_str)),
            Node::Question { yes, no, .. } => {
                yes.collect_candidates(out);
                no.collect_candidates(out);
            }
        }
    }

    /// Candidate set beneath this node
    pub fn candidate_set(&self) -> BTreeSet<&str> {
        self.candidates().into_iter().collect()
    }

    /// Number of nodes in this subtree
    pub fn node_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Question { yes, no, .. } => 1 + yes.node_count() + no.node_count(),
        }
    }

    /// Longest question chain from this node to a leaf
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Question { yes, no, .. } => 1 + yes.depth().max(no.depth()),
        }
    }

    fn write_outline(&self, f: &mut fmt::Formatter<'_>, indent: usize, label: &str) -> fmt::Result {
        let pad = "  ".repeat(indent);
        match self {
            Node::Leaf { candidates } => writeln!(f, "{pad}{label}[{}]", candidates.join(", ")),
            Node::Question { attribute, yes, no } => {
                writeln!(f, "{pad}{label}{attribute}?")?;
                yes.write_outline(f, indent + 1, "yes: ")?;
                no.write_outline(f, indent + 1, "no: ")
            }
        }
    }
}

/// Indented outline, one node per line.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_outline(f, 0, "")
    }
}

/// Decision tree wrapper
///
/// An empty dataset produces a tree with no root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecisionTree {
    root: Option<Node>,
}

impl DecisionTree {
    /// Wrap an optional root
    pub fn new(root: Option<Node>) -> Self {
        DecisionTree { root }
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    /// Check if the tree has no nodes
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.root.as_ref().map_or(0, Node::node_count)
    }

    /// Every object reachable from the root
    pub fn candidates(&self) -> Vec<&str> {
        self.root.as_ref().map(Node::candidates).unwrap_or_default()
    }
}

impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            Some(root) => write!(f, "{root}"),
            None => writeln!(f, "(empty tree)"),
        }
    }
}
