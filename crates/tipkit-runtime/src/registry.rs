#![forbid(unsafe_code)]

//! Target registry and tooltip lifecycle.
//!
//! [`Registry`] is the context object a host embeds. It owns the viewport
//! tracker, the timer queue, one [`ScopedSession`] per popup id and one
//! [`AnnotationInstance`] per registered target. Hosts forward pointer,
//! scroll and resize events into it and drive time with
//! [`advance`](Registry::advance) or [`pump`](Registry::pump).
//!
//! # Lifecycle
//!
//! ```text
//!  show(ev) ──► intent poll ──settled──► show_tip ──► Shown
//!                   │  ▲                    │
//!                   └──┘ moving             └─ container busy: hide owner,
//!                                              retry in 100ms
//!  hide(delayed) ──► close delay ──► hide_tip ──► Hidden
//!  desync poll (500ms while Shown) ──desynced──► hide_tip
//! ```
//!
//! # Invariants
//!
//! 1. At most one target owns a container at any time.
//! 2. After `hide_tip` returns, the owner's `has_active_hover` and
//!    `forced_open` are false and the container has no owner.
//! 3. Every timer a target owns is cancelled when it is destroyed.
//! 4. Nothing inside a transition fails: a missing target rectangle or a
//!    stale timer is logged and skipped.
//! 5. A container's `delay_in_progress` is set exactly while one of its
//!    targets has a close delay counting down.

use std::collections::HashMap;
use std::time::Duration;

use tipkit_core::{Coordinates, Point, Size, ViewportState};
use tracing::{debug, debug_span, trace};
use web_time::Instant;

use crate::content::ContentProvider;
use crate::display::{AnnotationInstance, Intent, Task};
use crate::error::{Result, TipError};
use crate::host::{Host, TargetId, TipSurface};
use crate::options::{DESYNC_POLL_INTERVAL, SHOW_RETRY_DELAY, TipOptions};
use crate::scheduler::{Scheduler, TimerId};
use crate::session::{ScopedSession, TipPhase};
use crate::smart::{self, Selection};

/// Registered targets, their containers, and the clock that drives them.
pub struct Registry<H: Host> {
    host: H,
    viewport: ViewportState,
    scheduler: Scheduler<Task>,
    instances: HashMap<TargetId, AnnotationInstance>,
    sessions: HashMap<String, ScopedSession<H::Surface>>,
    last_pump: Option<Instant>,
}

impl<H: Host> Registry<H> {
    /// Create a registry for a window of the given size.
    pub fn new(host: H, window: Size) -> Self {
        Self {
            host,
            viewport: ViewportState::new(window),
            scheduler: Scheduler::new(),
            instances: HashMap::new(),
            sessions: HashMap::new(),
            last_pump: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    /// Logical time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// When the next timer fires, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    pub fn is_registered(&self, target: TargetId) -> bool {
        self.instances.contains_key(&target)
    }

    pub fn instance(&self, target: TargetId) -> Option<&AnnotationInstance> {
        self.instances.get(&target)
    }

    pub fn session(&self, popup_id: &str) -> Option<&ScopedSession<H::Surface>> {
        self.sessions.get(popup_id)
    }

    pub fn surface(&self, popup_id: &str) -> Option<&H::Surface> {
        self.sessions.get(popup_id).map(ScopedSession::surface)
    }

    /// Lifecycle phase of a container. Unknown popup ids are `Hidden`.
    pub fn phase(&self, popup_id: &str) -> TipPhase {
        let Some(session) = self.sessions.get(popup_id) else {
            return TipPhase::Hidden;
        };
        let pending = self
            .instances
            .values()
            .any(|inst| inst.options.popup_id == popup_id && inst.is_show_pending());
        session.phase(pending)
    }

    /// Close every open tip, drop all timers and hand back the host.
    pub fn teardown(mut self) -> H {
        let owners: Vec<TargetId> = self.sessions.values().filter_map(|s| s.active_hover).collect();
        for owner in owners {
            self.hide_tip(owner);
        }
        self.scheduler.clear();
        debug!(targets = self.instances.len(), "registry torn down");
        self.host
    }

    // ─────────────────────────────────────────────────────────────────────
    // Registration
    // ─────────────────────────────────────────────────────────────────────

    /// Attach a tooltip to `target`.
    ///
    /// Registering a target twice replaces the first registration.
    pub fn register(
        &mut self,
        target: TargetId,
        options: TipOptions,
        content: impl ContentProvider + 'static,
    ) -> Result<()> {
        options.validate()?;
        if self.instances.contains_key(&target) {
            debug!(target_id = %target, "replacing existing registration");
            self.destroy(target)?;
        }

        let popup = options.popup_id.clone();
        let host = &mut self.host;
        let session = self.sessions.entry(popup).or_insert_with_key(|popup| {
            debug!(popup = %popup, "creating tip container");
            ScopedSession::new(host.create_surface(popup))
        });
        session.members += 1;

        debug!(
            target_id = %target,
            popup = %options.popup_id,
            placement = %options.placement,
            manual = options.manual,
            "target registered"
        );
        self.instances
            .insert(target, AnnotationInstance::new(options, Box::new(content)));
        Ok(())
    }

    /// Detach the tooltip from `target`, closing it if it is open.
    ///
    /// The container is dropped with its last target.
    pub fn destroy(&mut self, target: TargetId) -> Result<()> {
        let popup = self.popup_of(target)?;
        self.cancel_pending(target);
        if self
            .sessions
            .get(&popup)
            .is_some_and(|s| s.active_hover == Some(target))
        {
            self.hide_tip(target);
        }

        if let Some(mut inst) = self.instances.remove(&target) {
            for id in inst.take_timers() {
                self.scheduler.cancel(id);
            }
        }

        let drop_session = match self.sessions.get_mut(&popup) {
            Some(session) => {
                session.members = session.members.saturating_sub(1);
                session.members == 0
            }
            None => false,
        };
        if drop_session {
            if let Some(mut session) = self.sessions.remove(&popup) {
                if let Some(id) = session.desync_timer.take() {
                    self.scheduler.cancel(id);
                }
                debug!(popup = %popup, "tip container released");
            }
        }

        debug!(target_id = %target, "target destroyed");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // API
    // ─────────────────────────────────────────────────────────────────────

    /// Open the tooltip for `target`.
    ///
    /// With a pointer position the open waits for hover intent. Without
    /// one it is immediate and the tip is held open until hidden through
    /// the API.
    pub fn show(&mut self, target: TargetId, pointer: Option<Point>) -> Result<()> {
        self.ensure_registered(target)?;
        let _span = debug_span!(
            "tipkit.show",
            target_id = %target,
            from_pointer = pointer.is_some()
        )
        .entered();
        match pointer {
            Some(p) => {
                self.viewport.begin_intent(p);
                self.open(target, false, false);
            }
            None => self.open(target, true, true),
        }
        Ok(())
    }

    /// Close the tooltip for `target`, or every open tooltip when `target`
    /// is `None`.
    ///
    /// A targeted hide waits `close_delay` unless `immediate`; the untargeted
    /// form is always immediate.
    pub fn hide(&mut self, target: Option<TargetId>, immediate: bool) -> Result<()> {
        match target {
            Some(target) => {
                self.ensure_registered(target)?;
                self.close(target, immediate);
            }
            None => {
                let owners: Vec<TargetId> =
                    self.sessions.values().filter_map(|s| s.active_hover).collect();
                for owner in owners {
                    self.close(owner, true);
                }
            }
        }
        Ok(())
    }

    /// Abort a pending hover-intent poll or close delay for `target`.
    pub fn cancel(&mut self, target: TargetId) -> Result<()> {
        self.ensure_registered(target)?;
        self.cancel_pending(target);
        trace!(target_id = %target, "pending transition cancelled");
        Ok(())
    }

    /// Recompute the container position for `target`.
    ///
    /// Returns the kept placement, or `None` if the target or its container
    /// could not be measured.
    pub fn reset_position(&mut self, target: TargetId) -> Result<Option<Selection>> {
        self.ensure_registered(target)?;
        Ok(self.reposition(target))
    }

    /// Drop `target`'s hover claim without closing its tip.
    ///
    /// For hosts that learn a hover ended without a leave event (the element
    /// was detached or re-rendered). The next desync check closes the tip.
    pub fn release_hover(&mut self, target: TargetId) -> Result<()> {
        let inst = self
            .instances
            .get_mut(&target)
            .ok_or(TipError::UnknownTarget(target))?;
        inst.has_active_hover = false;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Events
    // ─────────────────────────────────────────────────────────────────────

    /// Pointer moved (document coordinates).
    pub fn pointer_moved(&mut self, pointer: Point) {
        self.viewport.track_pointer(pointer);
    }

    /// Document scrolled to the given offsets.
    pub fn scrolled(&mut self, scroll_left: f64, scroll_top: f64) {
        self.viewport.scroll_to(scroll_left, scroll_top);
    }

    pub fn resized(&mut self, window: Size) {
        self.viewport.resize(window);
    }

    /// Pointer entered `target`. Ignored for manual targets.
    pub fn pointer_entered(&mut self, target: TargetId, pointer: Point) -> Result<()> {
        if self.options_of(target)?.manual {
            self.viewport.track_pointer(pointer);
            return Ok(());
        }
        self.show(target, Some(pointer))
    }

    /// Pointer left `target`. Ignored for manual targets.
    pub fn pointer_left(&mut self, target: TargetId) -> Result<()> {
        if self.options_of(target)?.manual {
            return Ok(());
        }
        self.hide(Some(target), false)
    }

    /// Pointer entered the container: keep it open.
    pub fn tip_pointer_entered(&mut self, popup_id: &str) {
        if let Some(owner) = self.owner_of(popup_id) {
            self.cancel_pending(owner);
        }
    }

    /// Pointer left the container: start a delayed close.
    pub fn tip_pointer_left(&mut self, popup_id: &str) {
        if let Some(owner) = self.owner_of(popup_id) {
            self.close(owner, false);
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Time
    // ─────────────────────────────────────────────────────────────────────

    /// Advance logical time by `dt`, firing every timer that comes due.
    pub fn advance(&mut self, dt: Duration) {
        let until = self.scheduler.now() + dt;
        let _span = debug_span!("tipkit.advance", until_ms = until.as_millis() as u64).entered();
        while let Some((id, task)) = self.scheduler.pop_due(until) {
            self.run_task(id, task);
        }
        self.scheduler.settle(until);
    }

    /// Advance by the wall-clock time since the previous pump.
    ///
    /// The first pump only records `now`.
    pub fn pump(&mut self, now: Instant) {
        let elapsed = self
            .last_pump
            .map_or(Duration::ZERO, |prev| now.saturating_duration_since(prev));
        self.last_pump = Some(now);
        self.advance(elapsed);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────

    fn run_task(&mut self, id: TimerId, task: Task) {
        match task {
            Task::ShowRetry(target) => {
                let Some(inst) = self.instances.get_mut(&target) else {
                    return;
                };
                if inst.show_retry != Some(id) {
                    return;
                }
                inst.show_retry = None;
                trace!(target_id = %target, "retrying show");
                self.show_tip(target);
            }
            Task::HoverIntent(target) => {
                let Some(inst) = self.instances.get_mut(&target) else {
                    return;
                };
                if inst.hover_timer != Some(id) {
                    return;
                }
                inst.hover_timer = None;
                let travel = self.viewport.intent_travel();
                match Intent::classify(travel, inst.options.intent_sensitivity) {
                    Intent::Settled => {
                        trace!(target_id = %target, travel, "hover intent settled");
                        self.begin_show(target);
                    }
                    Intent::Moving => {
                        trace!(target_id = %target, travel, "pointer still moving");
                        self.viewport.resample_intent();
                        self.open(target, false, false);
                    }
                }
            }
            Task::CloseDelay(target) => {
                let Some(inst) = self.instances.get_mut(&target) else {
                    return;
                };
                if inst.close_delay != Some(id) {
                    return;
                }
                inst.close_delay = None;
                let popup = inst.options.popup_id.clone();
                self.hide_tip(target);
                self.sync_delay_flag(&popup);
            }
            Task::DesyncPoll(popup) => {
                if self
                    .sessions
                    .get(&popup)
                    .is_some_and(|s| s.desync_timer == Some(id))
                {
                    self.close_if_desynced(&popup);
                }
            }
        }
    }

    /// Request an open. `immediate` skips hover intent; `force` pins the tip
    /// open against pointer and focus loss.
    fn open(&mut self, target: TargetId, immediate: bool, force: bool) {
        self.cancel_pending(target);
        let Some(inst) = self.instances.get_mut(&target) else {
            return;
        };
        if inst.has_active_hover {
            if force {
                inst.forced_open = true;
            }
            return;
        }
        if immediate {
            if force {
                inst.forced_open = true;
            }
            self.begin_show(target);
        } else {
            let interval = inst.options.intent_poll_interval;
            inst.hover_timer = Some(
                self.scheduler
                    .schedule_once(interval, Task::HoverIntent(target)),
            );
        }
    }

    /// Request a close.
    fn close(&mut self, target: TargetId, immediate: bool) {
        self.cancel_pending(target);
        let Some(inst) = self.instances.get_mut(&target) else {
            return;
        };
        if !inst.has_active_hover {
            return;
        }
        inst.forced_open = false;
        if immediate {
            self.hide_tip(target);
            return;
        }
        let delay = inst.options.close_delay;
        inst.close_delay = Some(self.scheduler.schedule_once(delay, Task::CloseDelay(target)));
        let popup = inst.options.popup_id.clone();
        self.sync_delay_flag(&popup);
        trace!(target_id = %target, delay_ms = delay.as_millis() as u64, "close delayed");
    }

    /// Clear the target's pending intent poll and close delay.
    fn cancel_pending(&mut self, target: TargetId) {
        let Some(inst) = self.instances.get_mut(&target) else {
            return;
        };
        if let Some(id) = inst.hover_timer.take() {
            self.scheduler.cancel(id);
        }
        if let Some(id) = inst.close_delay.take() {
            self.scheduler.cancel(id);
            let popup = inst.options.popup_id.clone();
            self.sync_delay_flag(&popup);
        }
    }

    /// `delay_in_progress` holds while any member of the container has a
    /// close delay counting down.
    fn sync_delay_flag(&mut self, popup: &str) {
        let pending = self
            .instances
            .values()
            .any(|inst| inst.options.popup_id == popup && inst.close_delay.is_some());
        if let Some(session) = self.sessions.get_mut(popup) {
            session.delay_in_progress = pending;
        }
    }

    fn begin_show(&mut self, target: TargetId) {
        if let Some(inst) = self.instances.get_mut(&target) {
            inst.has_active_hover = true;
            self.show_tip(target);
        }
    }

    fn show_tip(&mut self, target: TargetId) {
        let Some(inst) = self.instances.get_mut(&target) else {
            return;
        };
        // The hover may have ended while this show was queued.
        if !inst.has_active_hover {
            return;
        }
        let Some(session) = self.sessions.get_mut(&inst.options.popup_id) else {
            return;
        };
        if session.is_tip_open && session.active_hover == Some(target) {
            return;
        }
        if let Some(id) = inst.show_retry.take() {
            self.scheduler.cancel(id);
        }

        if session.is_tip_open {
            let owner = if session.is_closing {
                None
            } else {
                session.active_hover
            };
            inst.show_retry = Some(
                self.scheduler
                    .schedule_once(SHOW_RETRY_DELAY, Task::ShowRetry(target)),
            );
            debug!(
                target_id = %target,
                popup = %inst.options.popup_id,
                "container busy; show deferred"
            );
            if let Some(owner) = owner {
                self.hide_tip(owner);
            }
            return;
        }

        session.surface.empty();
        if let Some(hook) = &inst.options.pre_render {
            hook.call(target);
        }
        if let Some(content) = inst.content.content(target) {
            session.surface.set_content(content);
        }
        session.active_hover = Some(target);
        session.is_tip_open = true;
        let popup = inst.options.popup_id.clone();

        let selection = self.reposition(target);

        let Some(session) = self.sessions.get_mut(&popup) else {
            return;
        };
        session.surface.set_visible(true);
        if session.desync_timer.is_none() {
            session.desync_timer = Some(
                self.scheduler
                    .schedule_every(DESYNC_POLL_INTERVAL, Task::DesyncPoll(popup.clone())),
            );
        }
        let side = selection.map(|s| s.placement.to_string()).unwrap_or_default();
        debug!(target_id = %target, popup = %popup, side = %side, "tip shown");
    }

    fn hide_tip(&mut self, target: TargetId) {
        let Some(inst) = self.instances.get_mut(&target) else {
            return;
        };
        inst.has_active_hover = false;
        inst.forced_open = false;
        if let Some(id) = inst.show_retry.take() {
            self.scheduler.cancel(id);
        }
        let stale_close = inst.close_delay.take();
        let offset = inst.options.offset;
        let popup = inst.options.popup_id.clone();
        if let Some(id) = stale_close {
            self.scheduler.cancel(id);
            self.sync_delay_flag(&popup);
        }
        let Some(session) = self.sessions.get_mut(&popup) else {
            return;
        };
        if session.active_hover != Some(target) {
            trace!(target_id = %target, "hide for a target that does not own the container");
            return;
        }

        session.is_closing = true;
        session.active_hover = None;
        session.is_tip_open = false;
        if let Some(id) = session.desync_timer.take() {
            self.scheduler.cancel(id);
        }
        session.surface.set_visible(false);
        session.is_closing = false;
        session.surface.reset_classes();

        // Park the container next to the pointer for the next show.
        let p = self.viewport.pointer;
        session
            .surface
            .apply(&Coordinates::at(p.y + offset, p.x + offset), &self.viewport);
        debug!(target_id = %target, popup = %popup, "tip hidden");
    }

    fn reposition(&mut self, target: TargetId) -> Option<Selection> {
        let inst = self.instances.get(&target)?;
        let options = &inst.options;
        let _span = debug_span!(
            "tipkit.reposition",
            target_id = %target,
            popup = %options.popup_id
        )
        .entered();

        let Some(anchor) = self.host.target_rect(target) else {
            debug!(target_id = %target, "target not laid out; placement skipped");
            return None;
        };
        let session = self.sessions.get_mut(&options.popup_id)?;

        let selection = if options.smart_placement {
            smart::select(
                &mut session.surface,
                &anchor,
                options.placement.priority_list(),
                options.placement,
                options.default_size,
                options.offset,
                &self.viewport,
            )
        } else {
            smart::single(
                &mut session.surface,
                &anchor,
                options.placement,
                options.default_size,
                options.offset,
                &self.viewport,
            )
        };
        session.surface.set_placement(selection.placement);

        debug!(
            side = %selection.placement,
            collisions = selection.collisions.bits(),
            attempts = selection.attempts,
            passes = selection.placed.passes,
            "placement chosen"
        );
        Some(selection)
    }

    /// Close the container's tip if its owner no longer holds it open.
    fn close_if_desynced(&mut self, popup: &str) {
        let Some(session) = self.sessions.get(popup) else {
            return;
        };
        if !session.desync_check_due() {
            return;
        }
        let Some(owner) = session.active_hover else {
            return;
        };
        let Some(inst) = self.instances.get(&owner) else {
            return;
        };

        let reason = if !inst.has_active_hover {
            Some("hover released")
        } else if self.host.is_disabled(owner) {
            Some("target disabled")
        } else {
            let over_target = self
                .host
                .target_rect(owner)
                .is_some_and(|r| self.viewport.pointer_over(&r));
            let over_tip = self.viewport.pointer_over(&session.surface.document_rect());
            let held = over_target || over_tip || self.host.has_focus(owner) || inst.forced_open;
            (!held).then_some("pointer left target and tip")
        };

        if let Some(reason) = reason {
            debug!(target_id = %owner, popup = %popup, reason, "closing desynced tip");
            self.hide_tip(owner);
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Lookups
    // ─────────────────────────────────────────────────────────────────────

    fn ensure_registered(&self, target: TargetId) -> Result<()> {
        if self.instances.contains_key(&target) {
            Ok(())
        } else {
            Err(TipError::UnknownTarget(target))
        }
    }

    fn options_of(&self, target: TargetId) -> Result<&TipOptions> {
        self.instances
            .get(&target)
            .map(AnnotationInstance::options)
            .ok_or(TipError::UnknownTarget(target))
    }

    fn popup_of(&self, target: TargetId) -> Result<String> {
        self.options_of(target).map(|o| o.popup_id.clone())
    }

    fn owner_of(&self, popup_id: &str) -> Option<TargetId> {
        self.sessions.get(popup_id).and_then(|s| s.active_hover)
    }
}
