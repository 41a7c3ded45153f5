//! Client-local view-count semantics.

/// One-shot latch: a mounted detail view fires at most one view-count
/// increment, and none while the page is still resolving.
///
/// This guards against duplicate *client* calls from re-renders. It does not
/// make the store idempotent; every accepted call legitimately adds one.
#[derive(Debug, Default)]
pub struct ViewLatch {
    fired: bool,
}

impl ViewLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true exactly once, and only when the page is resolved.
    /// Re-renders of the same mounted view get `false` forever after.
    pub fn should_fire(&mut self, resolved: bool) -> bool {
        if !resolved || self.fired {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn fired(&self) -> bool {
        self.fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_across_re_renders() {
        let mut latch = ViewLatch::new();
        let fired: Vec<bool> = (0..5).map(|_| latch.should_fire(true)).collect();
        assert_eq!(fired, vec![true, false, false, false, false]);
    }

    #[test]
    fn never_fires_while_resolving() {
        let mut latch = ViewLatch::new();
        assert!(!latch.should_fire(false));
        assert!(!latch.should_fire(false));
        assert!(!latch.fired());
    }

    #[test]
    fn fires_after_resolution_completes() {
        let mut latch = ViewLatch::new();
        assert!(!latch.should_fire(false));
        assert!(latch.should_fire(true));
        assert!(!latch.should_fire(true));
    }
}
