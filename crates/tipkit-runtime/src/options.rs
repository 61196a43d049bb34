#![forbid(unsafe_code)]

//! Per-target options.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use tipkit_core::{Placement, Size};

use crate::error::{Result, TipError};
use crate::host::TargetId;

/// Delay before a show blocked by another open tip is retried.
pub const SHOW_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Period of the desync check while a tip is open.
pub const DESYNC_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Callback run right before a tip's content is built.
#[derive(Clone)]
pub struct PreRenderHook(Rc<dyn Fn(TargetId)>);

impl PreRenderHook {
    pub fn new(f: impl Fn(TargetId) + 'static) -> Self {
        Self(Rc::new(f))
    }

    #[inline]
    pub fn call(&self, target: TargetId) {
        (self.0)(target)
    }
}

impl fmt::Debug for PreRenderHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PreRenderHook(..)")
    }
}

/// Options for one registered target.
///
/// Targets sharing a `popup_id` share one annotation container; the other
/// fields apply to the target they were registered with.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct TipOptions {
    /// Container id.
    /// Default: "tooltip"
    pub popup_id: String,

    /// Maximum Manhattan pointer travel between intent samples for a hover
    /// to count as intentional.
    /// Default: 7 px
    pub intent_sensitivity: f64,

    /// Hover-intent sampling period.
    /// Default: 150ms
    #[cfg_attr(feature = "serde", serde(with = "millis"))]
    pub intent_poll_interval: Duration,

    /// Delay before a non-immediate hide takes effect.
    /// Default: 150ms
    #[cfg_attr(feature = "serde", serde(with = "millis"))]
    pub close_delay: Duration,

    /// Preferred placement.
    /// Default: n
    pub placement: Placement,

    /// Walk the placement's priority list when the preferred placement
    /// collides with the viewport.
    /// Default: true
    pub smart_placement: bool,

    /// Size assumed when the container measures zero.
    /// Default: 260x120
    pub default_size: Size,

    /// Gap between target and tip.
    /// Default: 10 px
    pub offset: f64,

    /// Ignore pointer enter/leave on the target; only API calls open and
    /// close the tip.
    /// Default: false
    pub manual: bool,

    #[cfg_attr(feature = "serde", serde(skip))]
    pub pre_render: Option<PreRenderHook>,
}

impl Default for TipOptions {
    fn default() -> Self {
        Self {
            popup_id: "tooltip".to_owned(),
            intent_sensitivity: 7.0,
            intent_poll_interval: Duration::from_millis(150),
            close_delay: Duration::from_millis(150),
            placement: Placement::default(),
            smart_placement: true,
            default_size: Size::new(260.0, 120.0),
            offset: 10.0,
            manual: false,
            pre_render: None,
        }
    }
}

impl TipOptions {
    #[must_use]
    pub fn popup_id(mut self, id: impl Into<String>) -> Self {
        self.popup_id = id.into();
        self
    }

    #[must_use]
    pub fn intent_sensitivity(mut self, px: f64) -> Self {
        self.intent_sensitivity = px;
        self
    }

    #[must_use]
    pub fn intent_poll_interval(mut self, interval: Duration) -> Self {
        self.intent_poll_interval = interval;
        self
    }

    #[must_use]
    pub fn close_delay(mut self, delay: Duration) -> Self {
        self.close_delay = delay;
        self
    }

    #[must_use]
    pub fn placement(mut self, placement: impl Into<Placement>) -> Self {
        self.placement = placement.into();
        self
    }

    #[must_use]
    pub fn smart_placement(mut self, enabled: bool) -> Self {
        self.smart_placement = enabled;
        self
    }

    #[must_use]
    pub fn default_size(mut self, size: Size) -> Self {
        self.default_size = size;
        self
    }

    #[must_use]
    pub fn offset(mut self, px: f64) -> Self {
        self.offset = px;
        self
    }

    #[must_use]
    pub fn manual(mut self, manual: bool) -> Self {
        self.manual = manual;
        self
    }

    #[must_use]
    pub fn pre_render(mut self, hook: impl Fn(TargetId) + 'static) -> Self {
        self.pre_render = Some(PreRenderHook::new(hook));
        self
    }

    /// Parse the placement from its string form (`"se"`, `"nw-alt"`, ...).
    pub fn placement_str(mut self, placement: &str) -> Result<Self> {
        self.placement = placement.parse()?;
        Ok(self)
    }

    /// Check option values.
    pub fn validate(&self) -> Result<()> {
        if self.popup_id.is_empty() {
            return Err(TipError::Config("popup id must not be empty".into()));
        }
        if !self.offset.is_finite() || self.offset < 0.0 {
            return Err(TipError::Config(format!(
                "offset must be a non-negative number, got {}",
                self.offset
            )));
        }
        if !self.intent_sensitivity.is_finite() || self.intent_sensitivity < 0.0 {
            return Err(TipError::Config(format!(
                "intent sensitivity must be a non-negative number, got {}",
                self.intent_sensitivity
            )));
        }
        if self.intent_poll_interval.is_zero() {
            return Err(TipError::Config(
                "intent poll interval must be greater than zero".into(),
            ));
        }
        let Size { width, height } = self.default_size;
        if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
            return Err(TipError::Config(format!(
                "default size must be non-negative, got {width}x{height}"
            )));
        }
        Ok(())
    }

    /// Decode options from a JSON object and validate them. Missing keys
    /// take their default values.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: TipOptions =
            serde_json::from_str(json).map_err(|e| TipError::Json(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }
}

#[cfg(feature = "serde")]
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tipkit_core::Side;

    #[test]
    fn defaults() {
        let o = TipOptions::default();
        assert_eq!(o.popup_id, "tooltip");
        assert_eq!(o.intent_sensitivity, 7.0);
        assert_eq!(o.intent_poll_interval, Duration::from_millis(150));
        assert_eq!(o.close_delay, Duration::from_millis(150));
        assert_eq!(o.placement, Placement::new(Side::N));
        assert!(o.smart_placement);
        assert_eq!(o.default_size, Size::new(260.0, 120.0));
        assert_eq!(o.offset, 10.0);
        assert!(!o.manual);
        assert!(o.pre_render.is_none());
        assert!(o.validate().is_ok());
    }

    #[test]
    fn builder_setters() {
        let o = TipOptions::default()
            .popup_id("help")
            .placement(Side::SE)
            .smart_placement(false)
            .offset(4.0)
            .manual(true)
            .close_delay(Duration::ZERO);
        assert_eq!(o.popup_id, "help");
        assert_eq!(o.placement, Placement::new(Side::SE));
        assert!(!o.smart_placement);
        assert_eq!(o.offset, 4.0);
        assert!(o.manual);
        assert!(o.close_delay.is_zero());
    }

    #[test]
    fn placement_str_parses_alt_corners() {
        let o = TipOptions::default().placement_str("sw-alt").unwrap();
        assert_eq!(o.placement, Placement::alt(Side::SW).unwrap());
        assert!(matches!(
            TipOptions::default().placement_str("middle"),
            Err(TipError::Placement(_))
        ));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let bad = [
            TipOptions::default().popup_id(""),
            TipOptions::default().offset(-1.0),
            TipOptions::default().offset(f64::NAN),
            TipOptions::default().intent_sensitivity(f64::INFINITY),
            TipOptions::default().intent_poll_interval(Duration::ZERO),
            TipOptions::default().default_size(Size::new(-1.0, 10.0)),
        ];
        for o in bad {
            assert!(matches!(o.validate(), Err(TipError::Config(_))), "{o:?}");
        }
    }

    #[test]
    fn pre_render_hook_is_called() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let o = TipOptions::default().pre_render(move |_| counter.set(counter.get() + 1));
        let hook = o.pre_render.clone().unwrap();
        hook.call(TargetId::new(1));
        hook.call(TargetId::new(2));
        assert_eq!(hits.get(), 2);
        assert_eq!(format!("{hook:?}"), "PreRenderHook(..)");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_uses_camel_case_and_milliseconds() {
        let o = TipOptions::from_json_str(
            r#"{"popupId":"help","placement":"ne-alt","closeDelay":300,"defaultSize":[100,40]}"#,
        )
        .unwrap();
        assert_eq!(o.popup_id, "help");
        assert_eq!(o.placement, Placement::alt(Side::NE).unwrap());
        assert_eq!(o.close_delay, Duration::from_millis(300));
        assert_eq!(o.default_size, Size::new(100.0, 40.0));
        assert_eq!(o.intent_poll_interval, Duration::from_millis(150));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_errors() {
        assert!(matches!(
            TipOptions::from_json_str(r#"{"placement":"up"}"#),
            Err(TipError::Json(_))
        ));
        assert!(matches!(
            TipOptions::from_json_str(r#"{"intentPollInterval":0}"#),
            Err(TipError::Config(_))
        ));
    }
}
