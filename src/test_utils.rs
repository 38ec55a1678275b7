use std::fmt::{Debug, Display, Write};

use proptest::prelude::*;

use crate::{node::Node, AvlTree};

const KEY_MAX: usize = 20;

/// Generate arbitrary keys from [0..[`KEY_MAX`]).
pub(crate) fn arbitrary_key() -> impl Strategy<Value = usize> {
    0..KEY_MAX
}

/// Assert the BST, AVL and order-statistic properties of tree nodes, ensuring
/// the tree is well-formed.
pub(crate) fn validate_tree_structure<K, V>(t: &AvlTree<K, V>)
where
    K: Ord + Debug,
    V: Debug,
{
    let root = match t.0.as_deref() {
        Some(v) => v,
        None => {
            assert_eq!(t.len(), 0);
            assert_eq!(t.height(), -1);
            return;
        }
    };

    // Invariant 1: symmetric order - every key in the tree is strictly
    // greater than all keys visited before it in an in-order traversal.
    //
    // Checking adjacent keys of the in-order walk is equivalent to checking
    // each node against the bounds imposed by all of its ancestors.
    let keys = t.keys().collect::<Vec<_>>();
    for window in keys.windows(2) {
        assert!(window[0] < window[1], "keys out of order: {window:?}");
    }
    assert_eq!(keys.len(), root.size());

    // Perform a pre-order traversal of the tree.
    let mut stack = vec![root];
    while let Some(n) = stack.pop() {
        // Prepare to visit the children
        stack.extend(n.left().iter().chain(n.right().iter()));

        // The direct children are ordered relative to this node.
        assert!(n.left().map(|v| v.key() < n.key()).unwrap_or(true));
        assert!(n.right().map(|v| v.key() > n.key()).unwrap_or(true));

        // Invariant 2: the absolute height difference between the left
        // subtree and right subtree (the "balance factor") cannot exceed 1.
        let left_height = n.left().map(|v| v.height() as i64).unwrap_or(-1);
        let right_height = n.right().map(|v| v.height() as i64).unwrap_or(-1);
        let balance = (left_height - right_height).abs();
        assert!(
            balance <= 1,
            "balance={balance}, node={n:?}, stack={stack:?}"
        );

        // Invariant 3: the size of this node is the sum of the child subtree
        // sizes, +1 for itself.
        let want_size = n.left().map(|v| v.size()).unwrap_or_default()
            + n.right().map(|v| v.size()).unwrap_or_default()
            + 1;
        assert_eq!(
            n.size(),
            want_size,
            "expect node with key {:?} to have size {}, has {}",
            n.key(),
            want_size,
            n.size(),
        );

        // Invariant 4: the height of this node is always +1 of the maximum
        // child height, where an absent child has a height of -1.
        let want_height = left_height.max(right_height) + 1;
        assert_eq!(
            n.height() as i64,
            want_height,
            "expect node with key {:?} to have height {}, has {}",
            n.key(),
            want_height,
            n.height(),
        );
    }

    // Invariant 5: rank and select are inverses of each other.
    for i in 0..t.len() {
        let key = t.select(i).unwrap();
        assert_eq!(t.rank(key).unwrap(), i);
    }
    for key in t.keys() {
        let rank = t.rank(key).unwrap();
        assert_eq!(t.select(rank).unwrap(), key);
    }
}

/// Render the subtree rooted at `n` as a Graphviz digraph.
#[allow(unused)]
pub(crate) fn print_dot<K, V>(n: &Node<K, V>) -> String
where
    K: Display,
    V: Display,
{
    let mut buf = String::new();

    writeln!(buf, "digraph {{").unwrap();
    writeln!(buf, r#"bgcolor = "transparent";"#).unwrap();
    writeln!(
        buf,
        r#"node [shape = record; style = filled; fontcolor = orange4; fillcolor = white;];"#
    )
    .unwrap();
    recurse(n, &mut buf);
    writeln!(buf, "}}").unwrap();

    buf
}

fn recurse<K, V, W>(n: &Node<K, V>, buf: &mut W)
where
    W: std::fmt::Write,
    K: Display,
    V: Display,
{
    writeln!(
        buf,
        r#""{}" [label="{} | {} | {{ size={} | h={} }}"];"#,
        n.key(),
        n.key(),
        n.value(),
        n.size(),
        n.height(),
    )
    .unwrap();

    for v in [n.left(), n.right()] {
        match v {
            Some(v) => {
                writeln!(
                    buf,
                    "\"{}\" -> \"{}\" [color = \"orange1\";];",
                    n.key(),
                    v.key()
                )
                .unwrap();
                recurse(v, buf);
            }
            None => {
                writeln!(buf, "\"null_{}\" [shape=point,style=invis];", n.key()).unwrap();
                writeln!(
                    buf,
                    "\"{}\" -> \"null_{}\" [style=invis];",
                    n.key(),
                    n.key()
                )
                .unwrap();
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_dot() {
        let t = [(2, "b"), (1, "a"), (3, "c")]
            .into_iter()
            .collect::<AvlTree<_, _>>();

        let dot = print_dot(t.0.as_deref().unwrap());

        assert!(dot.starts_with("digraph {"));
        assert!(dot.contains(r#""2" [label="2 | b | { size=3 | h=1 }"];"#));
        assert!(dot.contains(r#""2" -> "1" [color = "orange1";];"#));
        assert!(dot.contains(r#""2" -> "3" [color = "orange1";];"#));
    }
}
