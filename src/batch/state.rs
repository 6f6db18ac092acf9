use std::fmt;

/// Where an item is in its lifecycle.
///
/// ```text
/// Pending -> Resolved -> Rendered -> DryRun | Submitted | SubmissionFailed
/// Pending -> ResolutionFailed | Skipped
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemState {
    Pending,
    Resolved,
    Rendered,
    DryRun,
    /// carries the scheduler's job id
    Submitted(String),
    /// already processed
    Skipped,
    ResolutionFailed,
    SubmissionFailed,
}

impl ItemState {
    pub fn can_become(&self, next: &ItemState) -> bool {
        use ItemState::*;
        matches!(
            (self, next),
            (Pending, Resolved | ResolutionFailed | Skipped)
                | (Resolved, Rendered)
                | (Rendered, DryRun | Submitted(_) | SubmissionFailed)
        )
    }

    pub fn is_terminal(&self) -> bool {
        use ItemState::*;
        matches!(
            self,
            DryRun | Submitted(_) | Skipped | ResolutionFailed | SubmissionFailed
        )
    }

    /// The phase an item in this state is working through.
    pub fn phase(&self) -> Phase {
        match self {
            Self::Pending => Phase::Resolve,
            Self::Resolved => Phase::Render,
            _ => Phase::Submit,
        }
    }
}

/// Step of the per-item process in which a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Resolve,
    Render,
    Submit,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Resolve => "resolve",
            Self::Render => "render",
            Self::Submit => "submit",
        };
        f.write_str(s)
    }
}

/// Follows a single item through its states.
#[derive(Debug)]
pub struct ItemTracker<'a> {
    name: &'a str,
    state: ItemState,
}

impl<'a> ItemTracker<'a> {
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            state: ItemState::Pending,
        }
    }

    pub fn state(&self) -> &ItemState {
        &self.state
    }

    pub fn advance(&mut self, next: ItemState) {
        debug_assert!(
            self.state.can_become(&next),
            "invalid transition {:?} -> {:?} for {}",
            self.state,
            next,
            self.name
        );
        log::trace!("{}: {:?} -> {:?}", self.name, self.state, next);
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        use ItemState::*;
        assert!(Pending.can_become(&Resolved));
        assert!(Pending.can_become(&Skipped));
        assert!(Rendered.can_become(&Submitted("12".to_owned())));
        assert!(!Pending.can_become(&Rendered));
        assert!(!DryRun.can_become(&Submitted("12".to_owned())));
        assert!(!Skipped.can_become(&Resolved));
        assert!(!Resolved.can_become(&SubmissionFailed));
    }

    #[test]
    fn test_tracker() {
        let mut tracker = ItemTracker::new("strip01");
        assert_eq!(tracker.state().phase(), Phase::Resolve);
        tracker.advance(ItemState::Resolved);
        tracker.advance(ItemState::Rendered);
        assert_eq!(tracker.state().phase(), Phase::Submit);
        assert!(!tracker.state().is_terminal());
        tracker.advance(ItemState::DryRun);
        assert!(tracker.state().is_terminal());
    }
}
