//! # `eta_progress`
//!
//! A single-line, self-updating progress bar for the terminal, with an ETA.
//!
//! ```text
//! Loading |==================================================      | ETA: 0h00m10s
//! ```
//!
//! The bar is drawn to standard error (so piped standard output stays clean) and is
//! redrawn in place after every update. While running, the ETA field is a linear
//! extrapolation from the average time per step; once complete it shows the total
//! elapsed time instead.
//!
//! ```no_run
//! use eta_progress::ProgressBar;
//!
//! let mut bar = ProgressBar::new("Loading", 10);
//! for _ in 0..10 {
//!     // ... one unit of work ...
//!     bar.inc();
//! }
//! bar.finish();
//! ```
//!
//! ## Modules
//!
//! * [`progress`]: The [`ProgressBar`] renderer and its [`ProgressSnapshot`].
//! * [`builder`]: Fluent interface for configuring borders, start time, screen width and output.
//! * [`layout`]: How the screen is split between label, bar and ETA.
//! * [`eta`]: Remaining-time estimation and the ETA field format.
//! * [`screen`]: Pluggable screen width discovery.
//! * [`style`]: Border glyphs.
//! * [`iter`]: Extension traits for tracking progress on Iterators.
//! * [`io`]: Wrappers for [`std::io::Read`] and [`std::io::Write`] that track bytes moved.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod builder;
pub mod error;
pub mod eta;
pub mod io;
pub mod iter;
pub mod layout;
pub mod progress;
pub mod screen;
pub mod style;

pub use builder::ProgressBuilder;
pub use error::{Error, Result};
pub use eta::TimeComponents;
pub use iter::{ProgressIter, ProgressIteratorExt};
pub use layout::Layout;
pub use progress::{ProgressBar, ProgressSnapshot};
pub use screen::{FixedWidth, ScreenWidthProvider, TerminalWidth};
pub use style::Borders;
