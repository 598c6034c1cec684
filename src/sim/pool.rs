//! Ordered entity pools
//!
//! A pool keeps its members in spawn order. Capping drops the oldest members
//! first, so the front of the pool is always the oldest survivor.

/// An ordered, optionally capacity-bounded collection of one entity kind
#[derive(Debug, Clone)]
pub struct Pool<T> {
    members: Vec<T>,
    capacity: Option<usize>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<T> Pool<T> {
    /// Pool trimmed to `capacity` by [`Pool::cap`]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            members: Vec::with_capacity(capacity + 1),
            capacity: Some(capacity),
        }
    }

    /// Pool with no configured cap
    pub fn unbounded() -> Self {
        Self {
            members: Vec::new(),
            capacity: None,
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Append a new member
    pub fn spawn(&mut self, member: T) -> &T {
        self.members.push(member);
        let last = self.members.len() - 1;
        &self.members[last]
    }

    /// Mutate every member in place
    pub fn advance(&mut self, mut step: impl FnMut(&mut T)) {
        for member in self.members.iter_mut() {
            step(member);
        }
    }

    /// Drop members failing the liveness predicate; returns how many were removed
    pub fn cull(&mut self, mut is_live: impl FnMut(&T) -> bool) -> usize {
        let before = self.members.len();
        self.members.retain(|m| is_live(m));
        before - self.members.len()
    }

    /// Keep only the newest `n` members; returns how many were dropped
    pub fn cap_at(&mut self, n: usize) -> usize {
        let len = self.members.len();
        if len <= n {
            return 0;
        }
        let excess = len - n;
        self.members.drain(..excess);
        excess
    }

    /// Apply the configured cap (no-op for unbounded pools)
    pub fn cap(&mut self) -> usize {
        match self.capacity {
            Some(n) => self.cap_at(n),
            None => 0,
        }
    }

    /// True when a capped pool holds at least its capacity
    pub fn is_full(&self) -> bool {
        self.capacity.is_some_and(|n| self.members.len() >= n)
    }

    /// Remove the member at `index`, keeping the order of the rest
    pub fn remove(&mut self, index: usize) -> T {
        self.members.remove(index)
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.members.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.members.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.members.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.members.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.members
    }
}

impl<'a, T> IntoIterator for &'a Pool<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_appends_in_order() {
        let mut pool = Pool::unbounded();
        pool.spawn(1);
        pool.spawn(2);
        assert_eq!(*pool.spawn(3), 3);
        assert_eq!(pool.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_cull_preserves_survivor_order() {
        let mut pool = Pool::unbounded();
        for n in 1..=6 {
            pool.spawn(n);
        }
        let removed = pool.cull(|n| n % 2 == 0);
        assert_eq!(removed, 3);
        assert_eq!(pool.as_slice(), &[2, 4, 6]);
    }

    #[test]
    fn test_cap_drops_oldest() {
        let mut pool = Pool::with_capacity(3);
        for n in 1..=5 {
            pool.spawn(n);
        }
        assert_eq!(pool.cap(), 2);
        assert_eq!(pool.as_slice(), &[3, 4, 5]);

        // Already within bounds
        assert_eq!(pool.cap(), 0);
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn test_unbounded_cap_is_noop() {
        let mut pool = Pool::unbounded();
        for n in 0..100 {
            pool.spawn(n);
        }
        assert_eq!(pool.cap(), 0);
        assert!(!pool.is_full());
        assert_eq!(pool.len(), 100);
    }

    #[test]
    fn test_advance_and_remove() {
        let mut pool = Pool::with_capacity(4);
        pool.spawn(10);
        pool.spawn(20);
        pool.spawn(30);
        pool.advance(|n| *n += 1);
        assert_eq!(pool.remove(1), 21);
        assert_eq!(pool.as_slice(), &[11, 31]);
    }

    #[test]
    fn test_is_full() {
        let mut pool = Pool::with_capacity(2);
        pool.spawn(());
        assert!(!pool.is_full());
        pool.spawn(());
        assert!(pool.is_full());
    }
}
