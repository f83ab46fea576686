//! Iterator adapters for automatic progress tracking.
//!
//! [`ProgressIteratorExt`] attaches a bar to a loop with a single method call:
//!
//! ```no_run
//! use eta_progress::ProgressIteratorExt;
//!
//! for _file in ["a.txt", "b.txt", "c.txt"].into_iter().progress_bar("Copying") {
//!     // ...
//! }
//! ```
//!
//! An item counts as done once the loop asks for the next one, so the bar tracks
//! completed work rather than started work. When the iterator is exhausted the bar is
//! finished; dropping the adapter early (`break`, `?`) finishes it at whatever value it
//! reached.

use std::io::{Stderr, Write};

use compact_str::CompactString;

use crate::progress::ProgressBar;

/// An iterator adapter that advances a [`ProgressBar`] as items are consumed.
pub struct ProgressIter<I, W: Write = Stderr> {
    iter: I,
    bar: Option<ProgressBar<W>>,
    in_flight: bool,
}

impl<I, W: Write> ProgressIter<I, W> {
    /// Wraps `iter`, advancing `bar` once per consumed item.
    ///
    /// Note: This is usually constructed via [`ProgressIteratorExt`] methods.
    pub const fn new(iter: I, bar: ProgressBar<W>) -> Self {
        Self {
            iter,
            bar: Some(bar),
            in_flight: false,
        }
    }

    /// The bar being driven, until the iterator is exhausted.
    ///
    /// Useful for relabelling mid-loop.
    pub const fn bar_mut(&mut self) -> Option<&mut ProgressBar<W>> {
        self.bar.as_mut()
    }
}

impl<I: Iterator, W: Write> Iterator for ProgressIter<I, W> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if std::mem::take(&mut self.in_flight) {
            if let Some(bar) = self.bar.as_mut() {
                bar.inc();
            }
        }

        let item = self.iter.next();
        if item.is_some() {
            self.in_flight = true;
        } else if let Some(bar) = self.bar.take() {
            bar.finish();
        }
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// Extension trait to attach a progress bar to any iterator.
pub trait ProgressIteratorExt: Iterator + Sized {
    /// Wraps the iterator in a bar on standard error whose maximum is the iterator's length.
    fn progress_bar(self, label: impl Into<CompactString>) -> ProgressIter<Self>
    where
        Self: ExactSizeIterator;

    /// Wraps the iterator using an existing bar.
    fn progress_with<W: Write>(self, bar: ProgressBar<W>) -> ProgressIter<Self, W>;
}

impl<I: Iterator> ProgressIteratorExt for I {
    fn progress_bar(self, label: impl Into<CompactString>) -> ProgressIter<Self>
    where
        Self: ExactSizeIterator,
    {
        let maximum = self.len() as u64;
        ProgressIter::new(self, ProgressBar::new(label, maximum))
    }

    fn progress_with<W: Write>(self, bar: ProgressBar<W>) -> ProgressIter<Self, W> {
        ProgressIter::new(self, bar)
    }
}
