#![forbid(unsafe_code)]

//! In-memory host for tests and simulations.
//!
//! [`HeadlessHost`] keeps target rectangles, focus and disabled state in
//! plain maps. [`HeadlessSurface`] records what the runtime did to it and can
//! model a container that wraps its content when squeezed against the
//! window's edge, which makes its height depend on where it is placed.

use std::collections::{HashMap, HashSet};

use tipkit_core::{Coordinates, Placement, Point, Rect, Size, ViewportState};

use crate::content::TipContent;
use crate::host::{Host, TargetId, TipSurface};

/// Recording surface.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    popup_id: String,
    natural: Size,
    elastic: bool,
    window: Size,
    coords: Coordinates,
    visible: bool,
    content: Option<TipContent>,
    placement: Option<Placement>,
    applies: usize,
    class_resets: usize,
}

impl HeadlessSurface {
    /// A surface whose content measures `natural` when unconstrained.
    #[must_use]
    pub fn new(popup_id: impl Into<String>, natural: Size) -> Self {
        Self {
            popup_id: popup_id.into(),
            natural,
            elastic: false,
            window: Size::default(),
            coords: Coordinates::EMPTY,
            visible: false,
            content: None,
            placement: None,
            applies: 0,
            class_resets: 0,
        }
    }

    /// Wrap content when the space between the positioned edge and the far
    /// side of the window is narrower than the natural width.
    #[must_use]
    pub fn elastic(mut self, elastic: bool) -> Self {
        self.elastic = elastic;
        self
    }

    pub fn popup_id(&self) -> &str {
        &self.popup_id
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn content(&self) -> Option<&TipContent> {
        self.content.as_ref()
    }

    pub fn coords(&self) -> Coordinates {
        self.coords
    }

    /// Placement recorded by the last show, cleared on hide.
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// Number of `apply` calls so far.
    pub fn applies(&self) -> usize {
        self.applies
    }

    pub fn class_resets(&self) -> usize {
        self.class_resets
    }
}

impl TipSurface for HeadlessSurface {
    fn outer_size(&self) -> Size {
        if self.content.is_none() {
            return Size::default();
        }
        if !self.elastic {
            return self.natural;
        }
        let available = match (self.coords.left, self.coords.right) {
            (Some(left), _) => self.window.width - left,
            (None, Some(right)) => self.window.width - right,
            (None, None) => self.natural.width,
        };
        if available <= 0.0 || available >= self.natural.width {
            return self.natural;
        }
        let lines = (self.natural.width / available).ceil();
        Size::new(available, self.natural.height * lines)
    }

    fn apply(&mut self, coords: &Coordinates, viewport: &ViewportState) {
        self.coords = *coords;
        self.window = viewport.window();
        self.applies += 1;
    }

    fn document_rect(&self) -> Rect {
        let size = self.outer_size();
        self.coords
            .to_rect(size, self.window)
            .unwrap_or_else(|| Rect::from_origin_size(Point::default(), size))
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn empty(&mut self) {
        self.content = None;
    }

    fn set_content(&mut self, content: TipContent) {
        self.content = Some(content);
    }

    fn set_placement(&mut self, placement: Placement) {
        self.placement = Some(placement);
    }

    fn reset_classes(&mut self) {
        self.placement = None;
        self.class_resets += 1;
    }
}

/// Scripted host.
#[derive(Debug, Clone, Default)]
pub struct HeadlessHost {
    targets: HashMap<TargetId, Rect>,
    disabled: HashSet<TargetId>,
    focused: Option<TargetId>,
    tip_size: Size,
    elastic: bool,
    created: Vec<String>,
}

impl HeadlessHost {
    /// Host whose surfaces measure `tip_size` once they have content.
    #[must_use]
    pub fn new(tip_size: Size) -> Self {
        Self {
            tip_size,
            ..Self::default()
        }
    }

    /// Create elastic surfaces.
    #[must_use]
    pub fn elastic(mut self, elastic: bool) -> Self {
        self.elastic = elastic;
        self
    }

    /// Add or move a target.
    pub fn set_target(&mut self, target: TargetId, rect: Rect) {
        self.targets.insert(target, rect);
    }

    /// Take a target out of layout.
    pub fn remove_target(&mut self, target: TargetId) {
        self.targets.remove(&target);
    }

    pub fn set_disabled(&mut self, target: TargetId, disabled: bool) {
        if disabled {
            self.disabled.insert(target);
        } else {
            self.disabled.remove(&target);
        }
    }

    pub fn set_focus(&mut self, target: Option<TargetId>) {
        self.focused = target;
    }

    /// Popup ids surfaces were created for, in creation order.
    pub fn created_surfaces(&self) -> &[String] {
        &self.created
    }
}

impl Host for HeadlessHost {
    type Surface = HeadlessSurface;

    fn create_surface(&mut self, popup_id: &str) -> HeadlessSurface {
        self.created.push(popup_id.to_owned());
        HeadlessSurface::new(popup_id, self.tip_size).elastic(self.elastic)
    }

    fn target_rect(&self, target: TargetId) -> Option<Rect> {
        self.targets.get(&target).copied()
    }

    fn is_disabled(&self, target: TargetId) -> bool {
        self.disabled.contains(&target)
    }

    fn has_focus(&self, target: TargetId) -> bool {
        self.focused == Some(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> ViewportState {
        ViewportState::new(Size::new(800.0, 600.0))
    }

    #[test]
    fn empty_surface_measures_zero() {
        let mut s = HeadlessSurface::new("tooltip", Size::new(200.0, 20.0));
        assert_eq!(s.outer_size(), Size::default());
        s.set_content("hi".into());
        assert_eq!(s.outer_size(), Size::new(200.0, 20.0));
        s.empty();
        assert!(s.content().is_none());
    }

    #[test]
    fn elastic_surface_wraps_near_right_edge() {
        let vp = viewport();
        let mut s = HeadlessSurface::new("tooltip", Size::new(200.0, 20.0)).elastic(true);
        s.set_content("long text".into());
        s.apply(&Coordinates::at(0.0, 100.0), &vp);
        assert_eq!(s.outer_size(), Size::new(200.0, 20.0));
        s.apply(&Coordinates::at(0.0, 730.0), &vp);
        assert_eq!(s.outer_size(), Size::new(70.0, 60.0));
        assert_eq!(s.applies(), 2);
    }

    #[test]
    fn document_rect_mirrors_far_edges() {
        let vp = viewport();
        let mut s = HeadlessSurface::new("tooltip", Size::new(100.0, 40.0));
        s.set_content("x".into());
        s.apply(&Coordinates::EMPTY.with_bottom(510.0).with_right(700.0), &vp);
        assert_eq!(s.document_rect(), Rect::new(0.0, 50.0, 100.0, 40.0));
    }

    #[test]
    fn host_tracks_targets_focus_and_disabled() {
        let mut host = HeadlessHost::new(Size::new(10.0, 10.0));
        let a = TargetId::new(1);
        host.set_target(a, Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(host.target_rect(a), Some(Rect::new(1.0, 2.0, 3.0, 4.0)));
        host.set_disabled(a, true);
        assert!(host.is_disabled(a));
        host.set_focus(Some(a));
        assert!(host.has_focus(a));
        host.remove_target(a);
        assert_eq!(host.target_rect(a), None);

        let surface = host.create_surface("help");
        assert_eq!(surface.popup_id(), "help");
        assert_eq!(host.created_surfaces(), ["help".to_owned()]);
    }
}
