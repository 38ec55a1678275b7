use std::borrow::Borrow;

use log::trace;

use crate::{
    error::{Error, Result},
    iter::{IntoIter, Iter, LevelOrderIter, RefIter},
    node::{remove_recurse, split_max, split_min, Node},
};

/// An ordered symbol table backed by an AVL tree, supporting logarithmic
/// order-statistic queries.
///
/// Every mutating operation rebalances the path from the edited node back up
/// to the root, bounding the tree height to roughly `1.44 * log2(n + 2)`.
#[derive(Debug, Clone)]
pub struct AvlTree<K, V>(pub(crate) Option<Box<Node<K, V>>>);

impl<K, V> Default for AvlTree<K, V> {
    fn default() -> Self {
        Self(Default::default())
    }
}

impl<K, V> AvlTree<K, V> {
    /// Construct an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the tree contains no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Returns the number of keys in the tree.
    pub fn len(&self) -> usize {
        self.0.as_ref().map(|v| v.size()).unwrap_or_default()
    }

    /// Returns the height of the tree, where a single node has a height of 0
    /// and an empty tree has a height of -1.
    pub fn height(&self) -> isize {
        self.0.as_ref().map(|v| v.height() as isize).unwrap_or(-1)
    }

    /// Returns the smallest key in the tree.
    pub fn min(&self) -> Result<&K> {
        self.root("min").map(|v| v.leftmost().key())
    }

    /// Returns the largest key in the tree.
    pub fn max(&self) -> Result<&K> {
        self.root("max").map(|v| v.rightmost().key())
    }

    /// Remove and return the entry with the smallest key.
    pub fn delete_min(&mut self) -> Result<(K, V)> {
        let root = self
            .0
            .take()
            .ok_or(Error::EmptyCollection { op: "delete_min" })?;

        let (min, rest) = split_min(root);
        self.0 = rest;

        trace!("removed minimum entry");
        Ok(min.into_tuple())
    }

    /// Remove and return the entry with the largest key.
    pub fn delete_max(&mut self) -> Result<(K, V)> {
        let root = self
            .0
            .take()
            .ok_or(Error::EmptyCollection { op: "delete_max" })?;

        let (max, rest) = split_max(root);
        self.0 = rest;

        trace!("removed maximum entry");
        Ok(max.into_tuple())
    }

    /// Returns the key with rank `k` - the `k`-th smallest key, counting from
    /// 0.
    ///
    /// Returns [`Error::InvalidArgument`] if `k` is not in `[0, len)`.
    pub fn select(&self, k: usize) -> Result<&K> {
        let invalid = Error::InvalidArgument {
            rank: k,
            len: self.len(),
        };

        self.0
            .as_deref()
            .and_then(|v| v.select(k))
            .map(|v| v.key())
            .ok_or(invalid)
    }

    /// Iterate over the keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        RefIter::new(self.0.as_deref()).map(|v| v.key())
    }

    /// Iterate over the values in ascending key order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        RefIter::new(self.0.as_deref()).map(|v| v.value())
    }

    /// Iterate over the keys in breadth-first (level) order, starting at the
    /// root and visiting each level from left to right.
    pub fn keys_level_order(&self) -> impl Iterator<Item = &K> {
        LevelOrderIter::new(self.0.as_deref()).map(|v| v.key())
    }

    /// Iterate over the `(key, value)` entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.0.as_deref())
    }

    fn root(&self, op: &'static str) -> Result<&Node<K, V>> {
        self.0.as_deref().ok_or(Error::EmptyCollection { op })
    }
}

impl<K, V> AvlTree<K, V>
where
    K: Ord,
{
    /// Insert `key` and `value`, returning the value previously associated
    /// with `key`, if any.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.0 {
            Some(ref mut v) => v.insert(key, value),
            None => {
                trace!("linking new root node");
                self.0 = Some(Box::new(Node::new(key, value)));
                None
            }
        }
    }

    /// Associate `value` with `key`, overwriting any existing value.
    ///
    /// A `value` of [`None`] removes `key` from the tree, and is equivalent to
    /// calling [`AvlTree::delete()`].
    pub fn put(&mut self, key: K, value: Option<V>) {
        match value {
            Some(v) => {
                self.insert(key, v);
            }
            None => self.delete(&key),
        }
    }

    /// Remove `key` from the tree, returning the value it held.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        remove_recurse(&mut self.0, key).map(|(_k, v)| v)
    }

    /// Remove `key` from the tree, if present.
    pub fn delete<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove(key);
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_key_value(key).map(|(_k, v)| v)
    }

    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.0
            .as_ref()
            .and_then(|v| v.get(key))
            .map(|v| (v.key(), v.value()))
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.0.as_mut().and_then(|v| v.get_mut(key))
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Returns the largest key less than or equal to `key`.
    ///
    /// Returns `Ok(None)` if every key in the tree is greater than `key`.
    pub fn floor<Q>(&self, key: &Q) -> Result<Option<&K>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.root("floor").map(|v| v.floor(key))
    }

    /// Returns the smallest key greater than or equal to `key`.
    ///
    /// Returns `Ok(None)` if every key in the tree is less than `key`.
    pub fn ceiling<Q>(&self, key: &Q) -> Result<Option<&K>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.root("ceiling").map(|v| v.ceiling(key))
    }

    /// Returns the number of keys in the tree strictly less than `key`.
    ///
    /// `key` does not need to be present in the tree.
    pub fn rank<Q>(&self, key: &Q) -> Result<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.root("rank").map(|v| v.rank(key))
    }
}

impl<K, V> IntoIterator for AvlTree<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.0)
    }
}

impl<'a, K, V> IntoIterator for &'a AvlTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for AvlTree<K, V>
where
    K: Ord,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut t = Self::default();
        t.extend(iter);
        t
    }
}

impl<K, V> Extend<(K, V)> for AvlTree<K, V>
where
    K: Ord,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}
