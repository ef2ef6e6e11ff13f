//! Consumer-side board cache with explicit invalidation
//!
//! A board consumer polls the projection; caching the last view is fine,
//! but only as a scoped object with a defined lifetime: a time-boxed TTL
//! plus invalidate-on-mutation. Never a module-level global.

use crate::projection::BoardView;
use std::time::{Duration, Instant};

/// Holds the last fetched [`BoardView`] while it is still fresh
#[derive(Debug)]
pub struct BoardCache {
    ttl: Duration,
    entry: Option<(Instant, BoardView)>,
}

impl BoardCache {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    /// The cached view, if present and within its TTL
    pub fn get(&self) -> Option<&BoardView> {
        match &self.entry {
            Some((fetched_at, view)) if fetched_at.elapsed() < self.ttl => Some(view),
            _ => None,
        }
    }

    /// Store a freshly fetched view
    pub fn put(&mut self, view: BoardView) {
        self.entry = Some((Instant::now(), view));
    }

    /// Drop the cached view. Call after every successful reorder.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::BoardProjection;
    use board_types::EntityKind;

    fn make_view() -> BoardView {
        BoardProjection::columns(EntityKind::Project, vec![])
    }

    #[test]
    fn test_fresh_entry_is_served() {
        let mut cache = BoardCache::new(Duration::from_secs(60));
        assert!(cache.get().is_none());

        cache.put(make_view());
        assert!(cache.get().is_some());
    }

    #[test]
    fn test_expired_entry_is_not_served() {
        let mut cache = BoardCache::new(Duration::ZERO);
        cache.put(make_view());
        assert!(cache.get().is_none());
    }

    #[test]
    fn test_invalidate_on_mutation() {
        let mut cache = BoardCache::new(Duration::from_secs(60));
        cache.put(make_view());
        cache.invalidate();
        assert!(cache.get().is_none());
    }
}
