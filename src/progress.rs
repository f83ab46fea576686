//! The progress renderer.
//!
//! [`ProgressBar`] owns the bar state (value, maximum, start time, label, borders) and
//! redraws a single terminal line after every state change. Drawing goes through a
//! [`ProgressSnapshot`], a plain-data copy of the state from which one frame is rendered
//! as a pure function of the screen width.
//!
//! # Lifecycle
//!
//! * **Create:** [`ProgressBar::new`] and friends (or a [`ProgressBuilder`]) capture the
//!   start time and draw immediately.
//! * **Update:** [`set_value`](ProgressBar::set_value), [`inc`](ProgressBar::inc) and
//!   [`inc_by`](ProgressBar::inc_by) redraw; [`set_label`](ProgressBar::set_label) does not.
//! * **Finish:** [`finish`](ProgressBar::finish) draws one last time, ends the line and
//!   hands back the output sink. A bar dropped without finishing does the same, so early
//!   returns never leave the cursor in the middle of a bar.
//!
//! # Frame format
//!
//! ```text
//! \x1b[2K\r<label> |=======      | ETA: 0h01m05s\r
//! ```
//!
//! The trailing carriage return leaves the cursor at column zero so the next frame
//! overwrites this one. Once the bar is complete, the ETA slot shows the total elapsed
//! time instead of an estimate.

use std::{
    fmt,
    io::{self, Stderr, Write},
    iter,
    time::Duration,
};

use compact_str::CompactString;
use web_time::Instant;

use crate::{
    builder::ProgressBuilder,
    eta::{TimeComponents, eta_secs},
    layout::{Layout, filled_cells},
    screen::{ScreenWidthProvider, resolve_width},
    style::Borders,
};

pub(crate) const LOG_TARGET: &str = "eta_progress";

/// Erases the current line and returns the cursor to its first column.
pub const CLEAR_LINE: &str = "\x1b[2K\r";

/// A single-line progress bar drawing to `W` (standard error by default).
///
/// A bar has exactly one owner and is driven from one thread; it does no internal
/// locking. Only one bar should be drawing to a given terminal at a time.
pub struct ProgressBar<W: Write = Stderr> {
    pub(crate) label: CompactString,
    pub(crate) maximum: u64,
    pub(crate) current: u64,
    pub(crate) start: Instant,
    pub(crate) borders: Borders,
    pub(crate) screen: Box<dyn ScreenWidthProvider + Send>,

    /// Only `None` once the bar has been finished.
    pub(crate) out: Option<W>,
}

impl ProgressBar<Stderr> {
    /// Creates a bar of `maximum` steps with the default `|=|` borders and draws it.
    #[must_use]
    pub fn new(label: impl Into<CompactString>, maximum: u64) -> Self {
        ProgressBuilder::new(label, maximum).build()
    }

    /// Creates a bar whose borders are given as a three character format such as `"<->"`.
    ///
    /// # Panics
    ///
    /// Panics if `format` is not exactly three characters long.
    #[must_use]
    pub fn with_format(label: impl Into<CompactString>, maximum: u64, format: &str) -> Self {
        ProgressBuilder::new(label, maximum).with_format(format).build()
    }

    /// Creates a bar with explicit borders.
    #[must_use]
    pub fn with_borders(label: impl Into<CompactString>, maximum: u64, borders: Borders) -> Self {
        ProgressBuilder::new(label, maximum).with_borders(borders).build()
    }
}

impl<W: Write> ProgressBar<W> {
    // ========================================================================
    // Updates
    // ========================================================================

    /// Sets the current value and redraws.
    ///
    /// The value is not clamped: anything at or past the maximum draws as complete, and
    /// moving backwards is allowed.
    pub fn set_value(&mut self, value: u64) {
        self.current = value;
        self.draw();
    }

    /// Advances by one step and redraws.
    pub fn inc(&mut self) {
        self.inc_by(1);
    }

    /// Advances by `steps` and redraws.
    pub fn inc_by(&mut self, steps: u64) {
        self.set_value(self.current.saturating_add(steps));
    }

    /// Replaces the label. Nothing is drawn until the next update or [`draw`](Self::draw).
    pub fn set_label(&mut self, label: impl Into<CompactString>) {
        self.label = label.into();
    }

    /// Prints a line of text above the bar, then redraws the bar beneath it.
    pub fn println(&mut self, message: impl fmt::Display) {
        let text = format!("{CLEAR_LINE}{message}\n");
        self.write_best_effort(text.as_bytes());
        self.draw();
    }

    /// Redraws the bar in place.
    pub fn draw(&mut self) {
        let width = resolve_width(self.screen.as_ref());
        let frame = self.snapshot().frame(width);
        self.write_best_effort(frame.as_bytes());
    }

    /// Draws a final frame, ends the line and returns the output sink.
    ///
    /// The final frame reflects the actual value, so a bar finished early shows how far
    /// it got rather than a full bar.
    pub fn finish(mut self) -> W {
        self.close();
        match self.out.take() {
            Some(out) => out,
            None => unreachable!("output sink is only released by finish"),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Current value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.current
    }

    /// Number of steps at which the bar is complete.
    #[must_use]
    pub const fn maximum(&self) -> u64 {
        self.maximum
    }

    /// Border glyphs.
    #[must_use]
    pub const fn borders(&self) -> Borders {
        self.borders
    }

    /// Time since the bar was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Whether the value has reached the maximum.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.current >= self.maximum
    }

    /// Copies the current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.into()
    }

    // ========================================================================
    // Internal
    // ========================================================================

    fn close(&mut self) {
        self.draw();
        self.write_best_effort(b"\n");
        log::debug!(
            target: LOG_TARGET,
            "Finished {:?} at {}/{} after {:.3}s",
            self.label,
            self.current,
            self.maximum,
            self.elapsed().as_secs_f64()
        );
    }

    fn write_best_effort(&mut self, bytes: &[u8]) {
        let Some(out) = self.out.as_mut() else {
            return;
        };
        if let Err(e) = write_and_flush(out, bytes) {
            log::debug!(target: LOG_TARGET, "Could not draw progress bar: {e}");
        }
    }
}

fn write_and_flush(out: &mut impl Write, bytes: &[u8]) -> io::Result<()> {
    out.write_all(bytes)?;
    out.flush()
}

impl<W: Write> Drop for ProgressBar<W> {
    fn drop(&mut self) {
        if self.out.is_some() {
            self.close();
        }
    }
}

impl<W: Write> fmt::Debug for ProgressBar<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressBar")
            .field("label", &self.label)
            .field("current", &self.current)
            .field("maximum", &self.maximum)
            .field("borders", &self.borders)
            .finish_non_exhaustive()
    }
}

/// A plain-data copy of a [`ProgressBar`] at one instant.
///
/// Rendering a snapshot depends only on its fields and the screen width, so the same
/// snapshot always renders the same frame.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressSnapshot {
    label: CompactString,
    current: u64,
    maximum: u64,
    elapsed: Duration,
    borders: Borders,
}

impl<W: Write> From<&ProgressBar<W>> for ProgressSnapshot {
    fn from(bar: &ProgressBar<W>) -> Self {
        Self {
            label: bar.label.clone(),
            current: bar.current,
            maximum: bar.maximum,
            elapsed: bar.elapsed(),
            borders: bar.borders,
        }
    }
}

impl ProgressSnapshot {
    /// Builds a snapshot from raw parts.
    #[must_use]
    pub fn new(
        label: impl Into<CompactString>,
        current: u64,
        maximum: u64,
        elapsed: Duration,
        borders: Borders,
    ) -> Self {
        Self {
            label: label.into(),
            current,
            maximum,
            elapsed,
            borders,
        }
    }

    /// Returns the label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the current value.
    #[must_use]
    pub const fn current(&self) -> u64 {
        self.current
    }

    /// Returns the maximum.
    #[must_use]
    pub const fn maximum(&self) -> u64 {
        self.maximum
    }

    /// Returns the elapsed time at the moment of the snapshot.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Whether the value has reached the maximum. A zero maximum is always complete.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.current >= self.maximum
    }

    /// Time shown in the ETA slot: elapsed time if complete, otherwise the estimate of
    /// what remains.
    #[must_use]
    pub fn eta(&self) -> TimeComponents {
        TimeComponents::from_secs(eta_secs(self.elapsed.as_secs(), self.current, self.maximum))
    }

    /// Layout of this snapshot on a screen of `screen_width` columns.
    #[must_use]
    pub fn layout(&self, screen_width: usize) -> Layout {
        Layout::compute(screen_width, self.label.chars().count())
    }

    /// Renders the visible text of one frame, without control sequences.
    #[must_use]
    pub fn render(&self, screen_width: usize) -> String {
        let layout = self.layout(screen_width);
        let cells = layout.cell_count();
        let filled = filled_cells(cells, self.current, self.maximum);

        let mut line = String::with_capacity(layout.line_width() * 4);
        if layout.label_width > 0 {
            line.extend(self.label.chars().take(layout.label_width));
            line.push(' ');
        }

        line.push(self.borders.begin);
        line.extend(iter::repeat_n(self.borders.fill, filled));
        line.extend(iter::repeat_n(' ', cells - filled));
        line.push(self.borders.end);

        line.push(' ');
        line.push_str(&self.eta().to_string());
        line
    }

    /// Renders one frame as written to the terminal: line clear, text, carriage return.
    #[must_use]
    pub fn frame(&self, screen_width: usize) -> String {
        format!("{CLEAR_LINE}{}\r", self.render(screen_width))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use web_time::Instant;

    use super::{CLEAR_LINE, ProgressSnapshot};
    use crate::{builder::ProgressBuilder, style::Borders};

    fn started_secs_ago(secs: u64) -> Instant {
        Instant::now()
            .checked_sub(Duration::from_secs(secs))
            .unwrap()
    }

    /// Splits captured output into the frames drawn, dropping control sequences.
    fn frames(output: &[u8]) -> Vec<String> {
        String::from_utf8(output.to_vec())
            .unwrap()
            .split(CLEAR_LINE)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// Basic Lifecycle
    /// Create draws once, each increment draws once, and the last increment completes
    /// the bar and switches the ETA slot to elapsed time.
    #[test]
    fn test_loading_scenario() {
        let mut bar = ProgressBuilder::new("Loading", 10)
            .with_fixed_width(80)
            .with_start_time(started_secs_ago(90))
            .build_with_writer(Vec::new());

        for _ in 0..9 {
            bar.inc();
        }
        assert_eq!(bar.value(), 9);
        assert!(!bar.is_complete());

        // 7 + 1 + 58 + 1 + 13 = 80; 56 cells, 90% of them filled
        let ninety = bar.snapshot().render(80);
        assert_eq!(
            ninety,
            format!("Loading |{}{}| ETA: 0h00m10s", "=".repeat(50), " ".repeat(6))
        );

        bar.inc();
        assert!(bar.is_complete());

        let out = bar.finish();
        let frames = frames(&out);
        assert_eq!(frames.len(), 1 + 10 + 1);
        assert_eq!(frames[9], format!("{ninety}\r"));
        assert_eq!(
            frames[10],
            format!("Loading |{}| ETA: 0h01m30s\r", "=".repeat(56))
        );
        assert_eq!(frames[11], format!("{}\n", frames[10]));
    }

    /// Early Finish
    /// Finishing with no progress draws an empty bar with a zero ETA and ends the line.
    #[test]
    fn test_finish_without_progress() {
        let bar = ProgressBuilder::new("X", 100)
            .with_fixed_width(80)
            .build_with_writer(Vec::new());

        let out = bar.finish();
        let frames = frames(&out);

        let empty = format!("X |{}| ETA: 0h00m00s\r", " ".repeat(62));
        assert_eq!(frames, vec![empty.clone(), format!("{empty}\n")]);
        assert!(out.ends_with(b"\r\n"));
    }

    /// Narrow Screen
    /// A label that cannot fit is dropped and the bar grows by one column.
    #[test]
    fn test_label_sacrificed_on_narrow_screen() {
        let mut bar = ProgressBuilder::new("VeryLongLabelName", 4)
            .with_fixed_width(20)
            .build_with_writer(Vec::new());
        bar.set_value(2);

        let line = bar.snapshot().render(20);
        assert_eq!(line, "|====     | ETA: 0h00m00s");
        assert!(!line.contains("Very"));
    }

    /// Custom Borders
    #[test]
    fn test_custom_format() {
        let mut bar = ProgressBuilder::new("", 2)
            .with_format("<->")
            .with_fixed_width(30)
            .build_with_writer(Vec::new());
        bar.inc();

        // Empty label donates its space: 30 - 13 - 2 + 1 = 16 columns, 14 cells
        assert_eq!(
            bar.snapshot().render(30),
            format!("<{}{}> ETA: 0h00m00s", "-".repeat(7), " ".repeat(7))
        );
        assert_eq!(bar.borders(), Borders::new('<', '-', '>'));
    }

    /// Relabel
    /// A new label is not drawn until the next update.
    #[test]
    fn test_set_label_defers_redraw() {
        let mut bar = ProgressBuilder::new("first", 10)
            .with_fixed_width(40)
            .build_with_writer(Vec::new());

        bar.set_label(String::from("second"));
        assert_eq!(bar.label(), "second");

        bar.inc();
        let out = bar.finish();
        let frames = frames(&out);
        assert_eq!(frames.len(), 3);
        assert!(frames[0].starts_with("first "));
        assert!(frames[1].starts_with("second "));
    }

    /// Idempotence
    /// Drawing twice without a state change writes the same frame twice.
    #[test]
    fn test_draw_is_idempotent() {
        let mut bar = ProgressBuilder::new("same", 50)
            .with_fixed_width(60)
            .with_start_time(started_secs_ago(30))
            .build_with_writer(Vec::new());
        bar.set_value(20);
        bar.draw();

        let out = bar.finish();
        let frames = frames(&out);
        assert_eq!(frames[1], frames[2]);

        let snap = ProgressSnapshot::new("same", 20, 50, Duration::from_secs(30), Borders::default());
        assert_eq!(snap.frame(60), snap.frame(60));
        assert_eq!(snap.frame(60), format!("{CLEAR_LINE}{}", frames[1]));
    }

    /// Out Of Range Values
    /// Overshooting draws complete; moving backwards is rendered from the ratio as is.
    #[test]
    fn test_values_outside_contract() {
        let mut bar = ProgressBuilder::new("odd", 10)
            .with_fixed_width(80)
            .build_with_writer(Vec::new());

        bar.set_value(15);
        assert!(bar.is_complete());
        assert_eq!(bar.snapshot().layout(80).cell_count(), 60);
        assert!(bar.snapshot().render(80).contains(&"=".repeat(60)));

        bar.set_value(5);
        assert!(!bar.is_complete());
        assert!(bar.snapshot().render(80).contains(&format!("|{}{}|", "=".repeat(30), " ".repeat(30))));
    }

    /// Zero Maximum
    /// Nothing to divide by: the bar is complete from the start.
    #[test]
    fn test_zero_maximum_is_complete() {
        let bar = ProgressBuilder::new("none", 0)
            .with_fixed_width(40)
            .build_with_writer(Vec::new());
        assert!(bar.is_complete());

        let snap = bar.snapshot();
        let cells = snap.layout(40).cell_count();
        assert!(snap.render(40).contains(&"=".repeat(cells)));
    }

    /// Scoped Guard
    /// Dropping an unfinished bar still ends the line.
    #[test]
    fn test_drop_finishes_bar() {
        let mut out = Vec::new();
        {
            let mut bar = ProgressBuilder::new("guard", 3)
                .with_fixed_width(40)
                .build_with_writer(&mut out);
            bar.inc();
        }

        let frames = frames(&out);
        assert_eq!(frames.len(), 3);
        assert!(frames[2].ends_with("\r\n"));
    }

    /// Messages Above The Bar
    #[test]
    fn test_println_redraws_below_message() {
        let mut bar = ProgressBuilder::new("log", 3)
            .with_fixed_width(40)
            .build_with_writer(Vec::new());
        bar.println("hello");

        let out = bar.finish();
        let frames = frames(&out);
        assert_eq!(frames[1], "hello\n");
        assert_eq!(frames[0], frames[2]);
    }

    /// Multi-byte Labels
    /// Truncation happens on character boundaries.
    #[test]
    fn test_truncates_unicode_label() {
        let snap = ProgressSnapshot::new("ééééééééé", 0, 1, Duration::ZERO, Borders::default());

        // 30 - 10 - 13 - 2 = 5 characters of label
        assert_eq!(snap.render(30), format!("ééééé |{}| ETA: 0h00m00s", " ".repeat(8)));
    }
}
