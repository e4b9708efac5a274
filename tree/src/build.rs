//! Recursive tree construction
//!
//! Each call owns its partition of the candidates; the two recursive calls
//! of a question node get disjoint halves and the attribute list minus the
//! attribute just asked, so every attribute appears at most once per path.
//! Large partitions build their two subtrees in parallel with Rayon. The
//! result is identical to a sequential build since the halves share nothing.

use rayon::join;
use tracing::{debug, info};
use twenty_engine::{Dataset, DecisionTree, Node};

use crate::select::{select_attribute, Entry};

/// Partitions at least this large build their subtrees in parallel
pub const PARALLEL_THRESHOLD: usize = 256;

/// Build the decision tree for a whole dataset.
pub fn build_tree(dataset: &Dataset) -> DecisionTree {
    let objects: Vec<Entry> = dataset.objects().collect();
    let root = build(objects, dataset.attributes());
    let tree = DecisionTree::new(root);
    info!(
        objects = dataset.len(),
        attributes = dataset.attributes().len(),
        nodes = tree.len(),
        depth = tree.root().map_or(0, Node::depth),
        "Built decision tree"
    );
    tree
}

/// Build a subtree over `objects`, asking only about `attributes`.
///
/// Returns None when there are no objects.
pub fn build<S: AsRef<str>>(objects: Vec<Entry<'_>>, attributes: &[S]) -> Option<Node> {
    if objects.is_empty() {
        return None;
    }
    let attributes: Vec<&str> = attributes.iter().map(AsRef::as_ref).collect();
    Some(grow(objects, &attributes, PARALLEL_THRESHOLD))
}

/// `objects` is never empty here. Partitions of at least `parallel_from`
/// objects build their subtrees with [`join`].
fn grow(objects: Vec<Entry<'_>>, attributes: &[&str], parallel_from: usize) -> Node {
    if objects.len() == 1 || attributes.is_empty() {
        return leaf(objects);
    }
    let Some(attribute) = select_attribute(&objects, attributes) else {
        debug!(candidates = objects.len(), "No attribute separates the candidates");
        return leaf(objects);
    };

    let parallel = objects.len() >= parallel_from;
    let (yes, no): (Vec<Entry>, Vec<Entry>) = objects
        .into_iter()
        .partition(|(_, record)| record.value(attribute));
    let remaining: Vec<&str> = attributes
        .iter()
        .copied()
        .filter(|a| *a != attribute)
        .collect();
    debug!(
        attribute,
        yes = yes.len(),
        no = no.len(),
        "Splitting candidates"
    );

    // The selector only returns attributes with both sides non-empty.
    let (yes, no) = if parallel {
        join(
            || grow(yes, &remaining, parallel_from),
            || grow(no, &remaining, parallel_from),
        )
    } else {
        (
            grow(yes, &remaining, parallel_from),
            grow(no, &remaining, parallel_from),
        )
    };
    Node::question(attribute, yes, no)
}

fn leaf(objects: Vec<Entry<'_>>) -> Node {
    Node::leaf(objects.into_iter().map(|(name, _)| name))
}
