//! Grid arithmetic for the displayed month: how many day cells are in use,
//! how far day 1 is pushed to the right, and which trailing cells change
//! visibility when moving from one month to another.
use crate::date::YearMonth;
use std::cmp::Ordering;
use std::ops::Range;

/// Number of day cells in the grid.  Cells are created once and only ever
/// shown or hidden afterwards, so this must cover the longest month.
pub const MAX_CELLS: usize = 31;

/// Number of weekday caption cells above the days
pub const DAYS_IN_WEEK: usize = 7;

/// Width of one grid cell, in the surface's margin unit (terminal columns
/// for the bundled view)
pub const CELL_WIDTH: u16 = 4;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Visibility {
    Unchanged,
    /// Cells at these indices become visible
    Show(Range<usize>),
    /// Cells at these indices become hidden
    Hide(Range<usize>),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GridLayout {
    pub day_count: u8,
    /// Number of blank cells before day 1 (Monday = 0, Sunday = 6)
    pub leading_offset: u8,
    pub visibility: Visibility,
}

impl GridLayout {
    pub fn leading_margin(&self) -> u16 {
        u16::from(self.leading_offset) * CELL_WIDTH
    }

    pub fn cells_to_show(&self) -> Range<usize> {
        match &self.visibility {
            Visibility::Show(r) => r.clone(),
            _ => 0..0,
        }
    }

    pub fn cells_to_hide(&self) -> Range<usize> {
        match &self.visibility {
            Visibility::Hide(r) => r.clone(),
            _ => 0..0,
        }
    }
}

/// Lays out `ym`.  `previous_day_count` is the day count of the month that
/// was shown before, or `None` if nothing has been laid out yet (in which
/// case every cell is assumed to be visible).
pub fn compute_layout(ym: YearMonth, previous_day_count: Option<u8>) -> GridLayout {
    let day_count = ym.day_count();
    let now = usize::from(day_count);
    let visibility = match previous_day_count.map(usize::from) {
        None => Visibility::Hide(now..MAX_CELLS),
        Some(before) => match now.cmp(&before) {
            Ordering::Greater => Visibility::Show(before..now),
            Ordering::Less => Visibility::Hide(now..before),
            Ordering::Equal => Visibility::Unchanged,
        },
    };
    GridLayout {
        day_count,
        leading_offset: ym.leading_offset(),
        visibility,
    }
}
