use std::collections::VecDeque;

use crate::node::Node;

/// A breadth-first walk of a tree, yielding [`Node`] references level by
/// level, root first and left-to-right within each level.
#[derive(Debug)]
pub(crate) struct LevelOrderIter<'a, K, V> {
    queue: VecDeque<&'a Node<K, V>>,
}

impl<'a, K, V> LevelOrderIter<'a, K, V> {
    pub(crate) fn new(root: Option<&'a Node<K, V>>) -> Self {
        Self {
            queue: root.into_iter().collect(),
        }
    }
}

impl<'a, K, V> Iterator for LevelOrderIter<'a, K, V> {
    type Item = &'a Node<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let v = self.queue.pop_front()?;

        self.queue.extend(v.left());
        self.queue.extend(v.right());

        Some(v)
    }
}
