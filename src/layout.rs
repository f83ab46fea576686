//! Apportioning the screen between the label, bar and ETA fields.
//!
//! A rendered line looks like `<label> <begin><fill...><spaces...><end> ETA:HHhMMmSSs`.
//! The bar keeps at least [`MINIMUM_BAR_WIDTH`] columns and the ETA field is fixed, so
//! when the screen is too narrow the label is shortened (or dropped) first.

/// The smallest the bar can ever be, borders included.
pub const MINIMUM_BAR_WIDTH: usize = 10;
/// Width of the ETA field, `ETA:%2dh%02dm%02ds`.
pub const ETA_FORMAT_LENGTH: usize = 13;
/// Whitespace between the label, bar and ETA fields.
pub const WHITESPACE_LENGTH: usize = 2;
/// Columns taken by the begin and end glyphs.
pub const BAR_BORDER_WIDTH: usize = 2;

/// Column budget for one rendered frame.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    /// Characters of the label to print. Zero means the label is not drawn at all.
    pub label_width: usize,
    /// Columns of the bar including both borders.
    ///
    /// When the label is dropped, the column its trailing space would have used is
    /// given to the bar.
    pub bar_width: usize,
}

impl Layout {
    /// Computes the layout for a screen of `screen_width` columns and a label of
    /// `label_len` characters.
    #[must_use]
    pub fn compute(screen_width: usize, label_len: usize) -> Self {
        let bar_width = bar_width(screen_width, label_len);
        let label_width = label_width(screen_width, label_len, bar_width);

        Self {
            label_width,
            bar_width: if label_width == 0 { bar_width + 1 } else { bar_width },
        }
    }

    /// Number of fill cells between the two borders.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.bar_width - BAR_BORDER_WIDTH
    }

    /// Total columns of the rendered line, excluding control characters.
    #[must_use]
    pub const fn line_width(&self) -> usize {
        let label = if self.label_width > 0 {
            self.label_width + 1
        } else {
            0
        };
        label + self.bar_width + 1 + ETA_FORMAT_LENGTH
    }
}

/// Width of the bar (borders included) before any label sacrifice.
#[must_use]
pub fn bar_width(screen_width: usize, label_len: usize) -> usize {
    MINIMUM_BAR_WIDTH.max(screen_width.saturating_sub(label_len + ETA_FORMAT_LENGTH + WHITESPACE_LENGTH))
}

/// Width left for the label once the bar and ETA field are placed.
#[must_use]
pub fn label_width(screen_width: usize, label_len: usize, bar_width: usize) -> usize {
    if label_len + 1 + bar_width + 1 + ETA_FORMAT_LENGTH > screen_width {
        screen_width.saturating_sub(bar_width + ETA_FORMAT_LENGTH + WHITESPACE_LENGTH)
    } else {
        label_len
    }
}

/// Number of filled cells out of `cell_count` for `current` of `maximum` steps.
///
/// Anything at or past `maximum` (including every value when `maximum` is zero) fills
/// the whole bar. Otherwise the ratio is truncated, never rounded.
#[must_use]
pub fn filled_cells(cell_count: usize, current: u64, maximum: u64) -> usize {
    if current >= maximum {
        return cell_count;
    }
    let filled = cell_count as u128 * u128::from(current) / u128::from(maximum);
    // filled < cell_count since current < maximum
    usize::try_from(filled).unwrap_or(cell_count)
}
