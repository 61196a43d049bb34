#![forbid(unsafe_code)]

//! Per-target display state and deferred tasks.
//!
//! Each registered target carries an [`AnnotationInstance`]: its options,
//! its content provider, the hover flags the lifecycle reads, and the timers
//! it owns. The transitions themselves live on
//! [`Registry`](crate::Registry), which can reach the container and the
//! host.
//!
//! # Hover intent
//!
//! A pointer-initiated open does not show right away. Every
//! `intent_poll_interval` the pointer's Manhattan travel since the last
//! sample is compared to `intent_sensitivity`:
//!
//! - below it: the pointer has settled, the tip opens.
//! - otherwise: the sample is moved to the current position and the poll
//!   repeats.

use std::fmt;

use crate::content::ContentProvider;
use crate::host::TargetId;
use crate::options::TipOptions;
use crate::scheduler::TimerId;

/// Deferred continuations driven by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Task {
    /// Retry a show that found another tip open.
    ShowRetry(TargetId),
    /// Sample pointer travel for hover intent.
    HoverIntent(TargetId),
    /// Finish a delayed hide.
    CloseDelay(TargetId),
    /// Periodic desync check for a container.
    DesyncPoll(String),
}

/// Outcome of one hover-intent sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Pointer settled; open the tip.
    Settled,
    /// Pointer still moving; sample again.
    Moving,
}

impl Intent {
    /// Classify pointer `travel` against `sensitivity`.
    #[inline]
    pub fn classify(travel: f64, sensitivity: f64) -> Self {
        if travel < sensitivity {
            Intent::Settled
        } else {
            Intent::Moving
        }
    }
}

/// Per-target lifecycle record.
pub struct AnnotationInstance {
    pub(crate) options: TipOptions,
    pub(crate) content: Box<dyn ContentProvider>,
    /// This target has claimed (or is claiming) the container.
    pub(crate) has_active_hover: bool,
    /// Opened through the API; pointer and focus loss do not close it.
    pub(crate) forced_open: bool,
    /// Pending hover-intent poll.
    pub(crate) hover_timer: Option<TimerId>,
    /// Pending delayed hide.
    pub(crate) close_delay: Option<TimerId>,
    /// Pending show retry.
    pub(crate) show_retry: Option<TimerId>,
}

impl AnnotationInstance {
    pub(crate) fn new(options: TipOptions, content: Box<dyn ContentProvider>) -> Self {
        Self {
            options,
            content,
            has_active_hover: false,
            forced_open: false,
            hover_timer: None,
            close_delay: None,
            show_retry: None,
        }
    }

    pub fn options(&self) -> &TipOptions {
        &self.options
    }

    pub fn has_active_hover(&self) -> bool {
        self.has_active_hover
    }

    pub fn is_forced_open(&self) -> bool {
        self.forced_open
    }

    /// Whether a show is waiting on hover intent or on a retry.
    pub fn is_show_pending(&self) -> bool {
        self.show_retry.is_some() || self.hover_timer.is_some()
    }

    /// Whether a delayed hide is counting down.
    pub fn is_close_pending(&self) -> bool {
        self.close_delay.is_some()
    }

    /// Timers this instance owns, emptied.
    pub(crate) fn take_timers(&mut self) -> impl Iterator<Item = TimerId> + use<> {
        self.hover_timer
            .take()
            .into_iter()
            .chain(self.close_delay.take())
            .chain(self.show_retry.take())
    }
}

impl fmt::Debug for AnnotationInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotationInstance")
            .field("options", &self.options)
            .field("has_active_hover", &self.has_active_hover)
            .field("forced_open", &self.forced_open)
            .field("hover_timer", &self.hover_timer)
            .field("close_delay", &self.close_delay)
            .field("show_retry", &self.show_retry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::TipContent;
    use crate::scheduler::Scheduler;
    use std::time::Duration;

    #[test]
    fn intent_threshold_is_strict() {
        assert_eq!(Intent::classify(0.0, 7.0), Intent::Settled);
        assert_eq!(Intent::classify(6.9, 7.0), Intent::Settled);
        assert_eq!(Intent::classify(7.0, 7.0), Intent::Moving);
        assert_eq!(Intent::classify(30.0, 7.0), Intent::Moving);
    }

    #[test]
    fn take_timers_empties_every_slot() {
        let mut sched: Scheduler<()> = Scheduler::new();
        let mut inst = AnnotationInstance::new(
            TipOptions::default(),
            Box::new(TipContent::from("x")),
        );
        inst.hover_timer = Some(sched.schedule_once(Duration::from_millis(1), ()));
        inst.close_delay = Some(sched.schedule_once(Duration::from_millis(2), ()));
        inst.show_retry = Some(sched.schedule_once(Duration::from_millis(3), ()));
        assert!(inst.is_show_pending());
        assert!(inst.is_close_pending());
        assert_eq!(inst.take_timers().count(), 3);
        assert!(inst.hover_timer.is_none());
        assert!(inst.close_delay.is_none());
        assert!(inst.show_retry.is_none());
    }

    #[test]
    fn debug_skips_content_provider() {
        let inst = AnnotationInstance::new(TipOptions::default(), Box::new(TipContent::from("x")));
        let dbg = format!("{inst:?}");
        assert!(dbg.contains("has_active_hover: false"));
        assert!(dbg.contains(".."));
    }
}
