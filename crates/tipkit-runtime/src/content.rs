#![forbid(unsafe_code)]

//! Annotation content.
//!
//! Content is rebuilt every time a tip opens, so a provider can return
//! something different each time.

use crate::host::TargetId;

/// What to render inside the annotation container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TipContent {
    /// Plain text.
    Text(String),
    /// Host markup, inserted as-is.
    Markup(String),
    /// Copy of the host element with this id.
    Element(String),
}

impl TipContent {
    /// Check if there is nothing to render.
    pub fn is_empty(&self) -> bool {
        match self {
            TipContent::Text(s) | TipContent::Markup(s) | TipContent::Element(s) => s.is_empty(),
        }
    }
}

impl From<&str> for TipContent {
    fn from(text: &str) -> Self {
        TipContent::Text(text.to_owned())
    }
}

impl From<String> for TipContent {
    fn from(text: String) -> Self {
        TipContent::Text(text)
    }
}

/// Produces content for a target when its tip opens.
///
/// Returning `None` leaves the container empty; it is still shown and sized
/// from the configured default size.
pub trait ContentProvider {
    fn content(&mut self, target: TargetId) -> Option<TipContent>;
}

impl ContentProvider for TipContent {
    fn content(&mut self, _target: TargetId) -> Option<TipContent> {
        Some(self.clone())
    }
}

impl<F> ContentProvider for F
where
    F: FnMut(TargetId) -> Option<TipContent>,
{
    fn content(&mut self, target: TargetId) -> Option<TipContent> {
        self(target)
    }
}
