//! Screen width discovery.
//!
//! The renderer never queries the terminal directly. It asks a [`ScreenWidthProvider`],
//! which lets tests (and embedders with their own idea of the screen) pin the width.

use crate::progress::LOG_TARGET;

/// How wide the screen is assumed to be when the provider cannot tell.
pub const DEFAULT_SCREEN_WIDTH: usize = 80;

/// A source of the current screen width, in columns.
///
/// Returning `None` (or `Some(0)`) means "unknown"; the renderer then falls back to
/// [`DEFAULT_SCREEN_WIDTH`].
pub trait ScreenWidthProvider {
    /// Returns the current width in columns, if known.
    fn screen_width(&self) -> Option<usize>;
}

/// Queries the attached terminal on every call, so resizes are picked up by the next draw.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalWidth;

impl ScreenWidthProvider for TerminalWidth {
    fn screen_width(&self) -> Option<usize> {
        terminal_size::terminal_size().map(|(terminal_size::Width(w), _)| usize::from(w))
    }
}

/// Always reports the same width.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FixedWidth(pub usize);

impl ScreenWidthProvider for FixedWidth {
    fn screen_width(&self) -> Option<usize> {
        Some(self.0)
    }
}

impl<F> ScreenWidthProvider for F
where
    F: Fn() -> Option<usize>,
{
    fn screen_width(&self) -> Option<usize> {
        self()
    }
}

/// Resolves the width to lay out against, applying the default when unknown.
pub fn resolve_width(provider: &dyn ScreenWidthProvider) -> usize {
    match provider.screen_width() {
        Some(width) if width > 0 => width,
        reported => {
            log::trace!(
                target: LOG_TARGET,
                "Screen width unavailable ({reported:?}), assuming {DEFAULT_SCREEN_WIDTH} columns"
            );
            DEFAULT_SCREEN_WIDTH
        }
    }
}
