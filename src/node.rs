use std::{borrow::Borrow, cmp::Ordering};

use log::trace;

/// An owned, possibly absent, subtree.
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

#[derive(Debug, Clone)]
pub(crate) struct Node<K, V> {
    /// Child nodes pointers.
    left: Link<K, V>,
    right: Link<K, V>,

    /// The node's AVL height.
    ///
    /// A leaf has a height of 0.
    ///
    /// A u8 holds a maximum value of 255, meaning it can represent the height
    /// of a balanced tree of up to 5.78*10⁷⁶ entries.
    height: u8,

    /// The number of nodes in the subtree rooted at this [`Node`], including
    /// itself.
    size: usize,

    key: K,
    value: V,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            height: 0,
            size: 1,
        }
    }

    /// Insert `key` into the subtree rooted at `self`, returning the value it
    /// replaced if the key was already present.
    pub(crate) fn insert(self: &mut Box<Self>, key: K, value: V) -> Option<V>
    where
        K: Ord,
    {
        let child = match key.cmp(&self.key) {
            Ordering::Less => &mut self.left,
            Ordering::Equal => {
                return Some(std::mem::replace(&mut self.value, value));
            }
            Ordering::Greater => &mut self.right,
        };

        let replaced = match *child {
            Some(ref mut v) => v.insert(key, value),
            None => {
                trace!("linking new leaf node");
                *child = Some(Box::new(Self::new(key, value)));
                None
            }
        };

        if replaced.is_some() {
            // An existing value was overwritten in place - the tree structure
            // has not been modified, so it does not require rebalancing.
            return replaced;
        }

        rebalance(self);
        None
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&Self>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match key.cmp(self.key.borrow()) {
            Ordering::Less => self.left()?.get(key),
            Ordering::Equal => Some(self),
            Ordering::Greater => self.right()?.get(key),
        }
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match key.cmp(self.key.borrow()) {
            Ordering::Less => self.left.as_mut()?.get_mut(key),
            Ordering::Equal => Some(&mut self.value),
            Ordering::Greater => self.right.as_mut()?.get_mut(key),
        }
    }

    /// Return the largest key in this subtree that is less than or equal to
    /// `key`, if any.
    pub(crate) fn floor<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match key.cmp(self.key.borrow()) {
            Ordering::Equal => Some(&self.key),
            Ordering::Less => self.left()?.floor(key),
            // This node is a candidate, but a deeper match in the right
            // subtree is closer to the target.
            Ordering::Greater => {
                let deeper = self.right().and_then(|v| v.floor(key));
                deeper.or(Some(&self.key))
            }
        }
    }

    /// Return the smallest key in this subtree that is greater than or equal
    /// to `key`, if any.
    pub(crate) fn ceiling<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match key.cmp(self.key.borrow()) {
            Ordering::Equal => Some(&self.key),
            Ordering::Greater => self.right()?.ceiling(key),
            Ordering::Less => {
                let deeper = self.left().and_then(|v| v.ceiling(key));
                deeper.or(Some(&self.key))
            }
        }
    }

    /// Return the node holding the `k`-th smallest key (0-indexed) in this
    /// subtree, or [`None`] if `k` is out of bounds.
    pub(crate) fn select(&self, k: usize) -> Option<&Self> {
        let left_size = size(self.left());
        match k.cmp(&left_size) {
            Ordering::Less => self.left()?.select(k),
            Ordering::Equal => Some(self),
            Ordering::Greater => self.right()?.select(k - left_size - 1),
        }
    }

    /// Return the number of keys in this subtree strictly less than `key`.
    pub(crate) fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match key.cmp(self.key.borrow()) {
            Ordering::Less => self.left().map(|v| v.rank(key)).unwrap_or_default(),
            Ordering::Equal => size(self.left()),
            Ordering::Greater => {
                size(self.left()) + 1 + self.right().map(|v| v.rank(key)).unwrap_or_default()
            }
        }
    }

    /// Return the left-most node in this subtree.
    pub(crate) fn leftmost(&self) -> &Self {
        let mut n = self;
        while let Some(v) = n.left() {
            n = v;
        }
        n
    }

    /// Return the right-most node in this subtree.
    pub(crate) fn rightmost(&self) -> &Self {
        let mut n = self;
        while let Some(v) = n.right() {
            n = v;
        }
        n
    }

    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    pub(crate) fn value(&self) -> &V {
        &self.value
    }

    pub(crate) fn height(&self) -> u8 {
        self.height
    }

    pub(crate) fn size(&self) -> usize {
        self.size
    }

    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    pub(crate) fn left_mut(&mut self) -> Option<&mut Box<Self>> {
        self.left.as_mut()
    }

    /// Remove the left child, if any.
    pub(crate) fn take_left(&mut self) -> Option<Box<Self>> {
        self.left.take()
    }

    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    pub(crate) fn right_mut(&mut self) -> Option<&mut Box<Self>> {
        self.right.as_mut()
    }

    /// Remove the right child, if any.
    pub(crate) fn take_right(&mut self) -> Option<Box<Self>> {
        self.right.take()
    }

    /// Explode this [`Node`] into the key and value it contains.
    pub(crate) fn into_tuple(self) -> (K, V) {
        (self.key, self.value)
    }
}

/// Return the size of the (possibly absent) subtree `n`.
fn size<K, V>(n: Option<&Node<K, V>>) -> usize {
    n.map(|v| v.size()).unwrap_or_default()
}

/// Return the height of the (possibly absent) subtree `n`, where an absent
/// subtree has a height of -1.
fn height<K, V>(n: Option<&Node<K, V>>) -> i16 {
    n.map(|v| v.height() as i16).unwrap_or(-1)
}

fn update_height<K, V>(n: &mut Node<K, V>) {
    n.height = n
        .left()
        .map(|v| v.height() + 1)
        .max(n.right().map(|v| v.height() + 1))
        .unwrap_or_default()
}

fn update_size<K, V>(n: &mut Node<K, V>) {
    n.size = size(n.left()) + size(n.right()) + 1;
}

/// Compute the "balance factor" of the subtree rooted at `n`.
///
/// Returns the subtree height skew / magnitude, which is a positive number when
/// left heavy, and a negative number when right heavy.
fn balance<K, V>(n: &Node<K, V>) -> i8 {
    // Correctness: both heights lie in [-1, 255] so the difference of two
    // valid child heights always fits in an i8 for a balanced tree.
    (height(n.left()) - height(n.right())) as i8
}

/// Left rotate the given subtree rooted at `x` around the pivot point `P`.
///
/// ```text
///
///      x
///     / \                               P
///    1   P         Rotate Left        /   \
///       / \      --------------->    x     y
///      2   y                        / \   / \
///         / \                      1   2 3   4
///        3   4
/// ```
///
/// # Panics
///
/// Panics if `x` has no right pointer (cannot be rotated).
fn rotate_left<K, V>(x: &mut Box<Node<K, V>>) {
    trace!("rotating subtree of {} nodes left", x.size);

    // Rotation does not change the set of nodes in the subtree.
    let subtree_size = x.size;

    let mut p = x.right.take().expect("no right child");
    std::mem::swap(x, &mut p);

    p.right = x.left.take();
    update_height(&mut p);
    update_size(&mut p);

    x.left = Some(p);
    update_height(x);
    x.size = subtree_size;
}

/// Right rotate the given subtree rooted at `y` around the pivot point `P`.
///
/// ```text
///          y
///         / \                           P
///        P   4     Rotate Right       /   \
///       / \      --------------->    x     y
///      x   3                        / \   / \
///     / \                          1   2 3   4
///    1   2
/// ```
///
/// # Panics
///
/// Panics if `y` has no left pointer (cannot be rotated).
fn rotate_right<K, V>(y: &mut Box<Node<K, V>>) {
    trace!("rotating subtree of {} nodes right", y.size);

    let subtree_size = y.size;

    let mut p = y.left.take().expect("no left child");
    std::mem::swap(y, &mut p);

    p.left = y.right.take();
    update_height(&mut p);
    update_size(&mut p);

    y.right = Some(p);
    update_height(y);
    y.size = subtree_size;
}

/// Recompute the cached size and height of `v` from its children, then
/// restore the AVL balance of the subtree rooted at `v` with at most two
/// rotations.
///
/// Must be called on every node of a mutated path, bottom-up, after its
/// children have been relinked.
fn rebalance<K, V>(v: &mut Box<Node<K, V>>) {
    update_size(v);
    update_height(v);

    match balance(v) {
        // Left-heavy
        (2..) => {
            trace!("rebalancing left-heavy subtree of {} nodes", v.size);
            if v.left().map(balance).unwrap_or_default() < 0 {
                // Left-right case: reduce to the left-left case.
                if let Some(l) = v.left_mut() {
                    rotate_left(l);
                }
            }
            rotate_right(v);
        }
        // Right-heavy
        (..=-2) => {
            trace!("rebalancing right-heavy subtree of {} nodes", v.size);
            if v.right().map(balance).unwrap_or_default() > 0 {
                if let Some(r) = v.right_mut() {
                    rotate_right(r);
                }
            }
            rotate_left(v);
        }

        #[allow(clippy::manual_range_patterns)]
        -1 | 0 | 1 => { /* balanced */ }
    }

    // Invariant: the absolute difference between tree heights ("balance
    // factor") cannot exceed 1.
    debug_assert!(balance(v).abs() <= 1);
}

/// Detach the node holding the minimum key of the subtree rooted at `root`.
///
/// Returns the detached node (with no children) and the remainder of the
/// subtree, rebalanced, if any.
pub(crate) fn split_min<K, V>(mut root: Box<Node<K, V>>) -> (Box<Node<K, V>>, Link<K, V>) {
    match root.take_left() {
        Some(left) => {
            let (min, rest) = split_min(left);
            root.left = rest;
            rebalance(&mut root);
            (min, Some(root))
        }
        None => {
            // "root" is the end of the left edge, and it is replaced by its
            // right subtree (if any).
            let rest = root.take_right();
            (root, rest)
        }
    }
}

/// Detach the node holding the maximum key of the subtree rooted at `root`.
///
/// Mirror of [`split_min()`].
pub(crate) fn split_max<K, V>(mut root: Box<Node<K, V>>) -> (Box<Node<K, V>>, Link<K, V>) {
    match root.take_right() {
        Some(right) => {
            let (max, rest) = split_max(right);
            root.right = rest;
            rebalance(&mut root);
            (max, Some(root))
        }
        None => {
            let rest = root.take_left();
            (root, rest)
        }
    }
}

/// Recurse into `node`, removing the entry for `key` from the subtree rooted
/// at `node` if it exists, and rebalancing every node on the path back up.
///
/// Returns [`None`] if the key is not found, in which case the subtree is left
/// unchanged.
pub(crate) fn remove_recurse<K, V, Q>(node: &mut Link<K, V>, key: &Q) -> Option<(K, V)>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let n = node.as_mut()?;

    let removed = match key.cmp(n.key.borrow()) {
        Ordering::Less => remove_recurse(&mut n.left, key)?,
        Ordering::Greater => remove_recurse(&mut n.right, key)?,
        Ordering::Equal => {
            // This node holds the entry to be removed from the tree.
            let old = node.take()?;
            let (replacement, entry) = unlink(*old);
            *node = replacement;
            return Some(entry);
        }
    };

    rebalance(n);
    Some(removed)
}

/// Unlink `old` from its subtree, returning the subtree that replaces it and
/// the entry it held.
fn unlink<K, V>(mut old: Node<K, V>) -> (Link<K, V>, (K, V)) {
    trace!("unlinking node with subtree size {}", old.size);

    // This node may have 0, 1 or 2 child node(s):
    //
    //                          +----------+
    //                          |  parent  |
    //                          +----------+
    //                                |
    //                                v
    //                          +----------+
    //                     +----|   old    |----+
    //                     |    +----------+    |
    //                     |                    |
    //                     v                    v
    //               +-----------+       +------------+
    //               | old.left  |       | old.right  |
    //               +-----------+       +------------+
    //
    // If either child is absent, the other child (if any) replaces "old".
    //
    // Otherwise the in-order successor (the minimum node of "old.right") is
    // detached and replaces "old", adopting "old.left" and the remainder of
    // "old.right".
    let replacement = match (old.take_left(), old.take_right()) {
        (None, right) => right,
        (left, None) => left,
        (Some(left), Some(right)) => {
            let (mut successor, rest) = split_min(right);

            // Invariant: the successor is detached with no children.
            debug_assert!(successor.left.is_none());
            debug_assert!(successor.right.is_none());

            successor.left = Some(left);
            successor.right = rest;
            rebalance(&mut successor);
            Some(successor)
        }
    };

    (replacement, old.into_tuple())
}
