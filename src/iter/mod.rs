mod level_order;
mod owned_iter;
mod ref_iter;

pub(crate) use level_order::*;
pub use owned_iter::*;
pub(crate) use ref_iter::*;

/// An iterator over the `(key, value)` entries of an
/// [`AvlTree`](crate::AvlTree), in ascending key order.
#[derive(Debug)]
pub struct Iter<'a, K, V> {
    inner: RefIter<'a, K, V>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(root: Option<&'a crate::node::Node<K, V>>) -> Self {
        Self {
            remaining: root.map(|v| v.size()).unwrap_or_default(),
            inner: RefIter::new(root),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let v = self.inner.next()?;
        self.remaining -= 1;
        Some((v.key(), v.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
