//! Fluent interface for constructing [`ProgressBar`] instances.
//!
//! The shorthand constructors on [`ProgressBar`] cover the common cases. The
//! [`ProgressBuilder`] is for everything else:
//!
//! * **Output sink:** Draw to any [`Write`] instead of standard error, e.g. a buffer
//!   in tests or a log pane in a larger UI.
//! * **Screen width:** Replace the terminal query with any [`ScreenWidthProvider`],
//!   such as a [`FixedWidth`] for reproducible output.
//! * **Time Travel:** Set the `start` time explicitly, useful when resuming work that
//!   began before the bar was created.

use std::io::{self, Stderr, Write};

use compact_str::CompactString;
use web_time::Instant;

use crate::{
    progress::ProgressBar,
    screen::{FixedWidth, ScreenWidthProvider, TerminalWidth},
    style::Borders,
};

/// A builder pattern for constructing [`ProgressBar`] instances.
pub struct ProgressBuilder {
    label: CompactString,
    maximum: u64,
    borders: Borders,
    start: Option<Instant>,
    screen: Option<Box<dyn ScreenWidthProvider + Send>>,
}

impl ProgressBuilder {
    /// Starts building a bar of `maximum` steps.
    #[must_use]
    pub fn new(label: impl Into<CompactString>, maximum: u64) -> Self {
        Self {
            label: label.into(),
            maximum,
            borders: Borders::default(),
            start: None,
            screen: None,
        }
    }

    /// Sets the border glyphs.
    #[must_use]
    pub const fn with_borders(mut self, borders: Borders) -> Self {
        self.borders = borders;
        self
    }

    /// Sets the border glyphs from a three character format such as `"[#]"`.
    ///
    /// # Panics
    ///
    /// Panics if `format` is not exactly three characters long.
    #[must_use]
    pub fn with_format(self, format: &str) -> Self {
        self.with_borders(Borders::from_format(format))
    }

    /// Sets the start time explicitly. Defaults to the moment the bar is built.
    #[must_use]
    pub const fn with_start_time(mut self, start: Instant) -> Self {
        self.start = Some(start);
        self
    }

    /// Uses `provider` instead of querying the terminal for its width.
    #[must_use]
    pub fn with_screen_width(mut self, provider: impl ScreenWidthProvider + Send + 'static) -> Self {
        self.screen = Some(Box::new(provider));
        self
    }

    /// Lays the bar out for a screen of exactly `columns` columns.
    #[must_use]
    pub fn with_fixed_width(self, columns: usize) -> Self {
        self.with_screen_width(FixedWidth(columns))
    }

    /// Builds a bar drawing to standard error and draws it.
    #[must_use]
    pub fn build(self) -> ProgressBar<Stderr> {
        self.build_with_writer(io::stderr())
    }

    /// Builds a bar drawing to `out` and draws it.
    #[must_use]
    pub fn build_with_writer<W: Write>(self, out: W) -> ProgressBar<W> {
        let mut bar = ProgressBar {
            label: self.label,
            maximum: self.maximum,
            current: 0,
            start: self.start.unwrap_or_else(Instant::now),
            borders: self.borders,
            screen: self.screen.unwrap_or_else(|| Box::new(TerminalWidth)),
            out: Some(out),
        };
        bar.draw();
        bar
    }
}
