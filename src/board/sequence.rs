use std::time::{Duration, Instant};

/// Actions observed from the layout-mode buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutClick {
    Grid,
    Custom,
}

/// Six grid clicks, one custom, one grid.
const TARGET: [LayoutClick; 8] = [
    LayoutClick::Grid,
    LayoutClick::Grid,
    LayoutClick::Grid,
    LayoutClick::Grid,
    LayoutClick::Grid,
    LayoutClick::Grid,
    LayoutClick::Custom,
    LayoutClick::Grid,
];

/// After a completed match the matcher holds the completed state briefly and
/// then resets itself so the sequence can be triggered again.
const RESET_COOLDOWN: Duration = Duration::from_millis(100);

/// Prefix matcher over the fixed target sequence. Synchronous and
/// deterministic; the only time involved is the post-completion cooldown.
#[derive(Debug, Default)]
pub struct SecretSequence {
    observed: Vec<LayoutClick>,
    completed_at: Option<Instant>,
}

impl SecretSequence {
    /// Observe one action. Returns true exactly when this action completes
    /// the target sequence.
    pub fn feed(&mut self, click: LayoutClick) -> bool {
        self.expire_completion();
        self.observed.push(click);
        if !TARGET.starts_with(&self.observed) {
            // The new action becomes the sole basis for a fresh attempt; it
            // may itself be a valid sequence start.
            self.observed = vec![click];
            return false;
        }
        if self.observed.len() == TARGET.len() {
            self.completed_at = Some(Instant::now());
            return true;
        }
        false
    }

    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Length of the currently matched prefix.
    pub fn progress(&self) -> usize {
        self.observed.len()
    }

    pub fn observed(&self) -> &[LayoutClick] {
        &self.observed
    }

    pub fn reset(&mut self) {
        self.observed.clear();
        self.completed_at = None;
    }

    fn expire_completion(&mut self) {
        if let Some(at) = self.completed_at {
            if at.elapsed() >= RESET_COOLDOWN {
                self.reset();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LayoutClick::{Custom, Grid};

    #[test]
    fn full_sequence_completes() {
        let mut seq = SecretSequence::default();
        let clicks = [Grid, Grid, Grid, Grid, Grid, Grid, Custom, Grid];
        let mut fired = false;
        for click in clicks {
            fired = seq.feed(click);
        }
        assert!(fired);
        assert!(seq.is_complete());
    }

    #[test]
    fn prefix_break_restarts_from_the_breaking_action() {
        let mut seq = SecretSequence::default();
        assert!(!seq.feed(Grid));
        assert!(!seq.feed(Grid));
        assert!(!seq.feed(Custom));
        assert_eq!(seq.observed(), &[Custom]);
        assert!(!seq.is_complete());
    }

    #[test]
    fn restarted_attempt_can_still_complete() {
        let mut seq = SecretSequence::default();
        seq.feed(Grid);
        seq.feed(Custom); // breaks at position 2, restarts with [Custom]
        assert_eq!(seq.observed(), &[Custom]);
        // Custom is not a valid start either, so the next grid begins fresh.
        for _ in 0..6 {
            assert!(!seq.feed(Grid));
        }
        assert!(!seq.feed(Custom));
        assert!(seq.feed(Grid));
    }

    #[test]
    fn resets_after_the_cooldown_and_can_retrigger() {
        let mut seq = SecretSequence::default();
        for click in [Grid, Grid, Grid, Grid, Grid, Grid, Custom] {
            seq.feed(click);
        }
        assert!(seq.feed(Grid));
        std::thread::sleep(RESET_COOLDOWN + Duration::from_millis(20));
        // The first feed after the cooldown starts a fresh attempt.
        assert!(!seq.feed(Grid));
        assert!(!seq.is_complete());
        assert_eq!(seq.progress(), 1);
    }
}
