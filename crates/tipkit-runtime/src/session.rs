#![forbid(unsafe_code)]

//! Per-container lifecycle state.
//!
//! One [`ScopedSession`] exists per popup id. It owns the container surface
//! and records which target (if any) currently owns it.
//!
//! # Invariants
//!
//! 1. `is_tip_open` implies `active_hover.is_some()`.
//! 2. `desync_timer` is live only while the tip is open.
//! 3. `is_closing` is true only inside a hide; it is never observed between
//!    calls.

use crate::host::TargetId;
use crate::scheduler::TimerId;

/// Coarse lifecycle phase of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TipPhase {
    /// Nothing shown, nothing pending.
    Hidden,
    /// A show is pending: waiting on hover intent or on the previous tip to
    /// close.
    Showing,
    /// The container is visible.
    Shown,
    /// A hide is in progress.
    Hiding,
}

/// Container state for one popup id.
#[derive(Debug)]
pub struct ScopedSession<S> {
    pub(crate) surface: S,
    pub(crate) active_hover: Option<TargetId>,
    pub(crate) is_tip_open: bool,
    pub(crate) is_closing: bool,
    /// A delayed hide is counting down; desync checks are suspended.
    pub(crate) delay_in_progress: bool,
    pub(crate) desync_timer: Option<TimerId>,
    /// Targets registered against this container.
    pub(crate) members: usize,
}

impl<S> ScopedSession<S> {
    pub(crate) fn new(surface: S) -> Self {
        Self {
            surface,
            active_hover: None,
            is_tip_open: false,
            is_closing: false,
            delay_in_progress: false,
            desync_timer: None,
            members: 0,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Target that owns the container.
    pub fn active_hover(&self) -> Option<TargetId> {
        self.active_hover
    }

    pub fn is_tip_open(&self) -> bool {
        self.is_tip_open
    }

    pub fn is_closing(&self) -> bool {
        self.is_closing
    }

    pub fn delay_in_progress(&self) -> bool {
        self.delay_in_progress
    }

    /// Phase from the session flags. `show_pending` reports whether any
    /// member target is waiting to open.
    pub fn phase(&self, show_pending: bool) -> TipPhase {
        if self.is_closing {
            TipPhase::Hiding
        } else if self.is_tip_open {
            TipPhase::Shown
        } else if show_pending {
            TipPhase::Showing
        } else {
            TipPhase::Hidden
        }
    }

    /// Whether the desync check should run now.
    pub(crate) fn desync_check_due(&self) -> bool {
        self.is_tip_open && !self.is_closing && !self.delay_in_progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_follows_flags() {
        let mut s = ScopedSession::new(());
        assert_eq!(s.phase(false), TipPhase::Hidden);
        assert_eq!(s.phase(true), TipPhase::Showing);

        s.is_tip_open = true;
        s.active_hover = Some(TargetId::new(1));
        assert_eq!(s.phase(false), TipPhase::Shown);
        assert_eq!(s.phase(true), TipPhase::Shown);

        s.is_closing = true;
        assert_eq!(s.phase(false), TipPhase::Hiding);
    }

    #[test]
    fn desync_check_suspended_by_delay_and_closing() {
        let mut s = ScopedSession::new(());
        assert!(!s.desync_check_due());
        s.is_tip_open = true;
        assert!(s.desync_check_due());
        s.delay_in_progress = true;
        assert!(!s.desync_check_due());
        s.delay_in_progress = false;
        s.is_closing = true;
        assert!(!s.desync_check_due());
    }
}
