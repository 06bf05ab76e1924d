use std::collections::HashSet;
use std::hash::Hash;

/// Tracks which cards are still waiting for their first appearance in the
/// viewport. A card is revealed at most once.
#[derive(Debug)]
pub struct VisibilityAnimator<K> {
    pending: HashSet<K>,
}

impl<K> Default for VisibilityAnimator<K> {
    fn default() -> Self {
        Self {
            pending: HashSet::new(),
        }
    }
}

impl<K> VisibilityAnimator<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, key: K) -> bool {
        self.pending.insert(key)
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.contains(key)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Feeds one batch of intersection reports `(key, is_visible)` and returns
    /// the keys to reveal and stop watching.
    pub fn observe<I>(&mut self, entries: I) -> Vec<K>
    where
        I: IntoIterator<Item = (K, bool)>,
    {
        let mut revealed = Vec::new();
        for (key, visible) in entries {
            if visible && self.pending.remove(&key) {
                revealed.push(key);
            }
        }
        revealed
    }
}
