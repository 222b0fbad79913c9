//! Month grid construction.
use smallvec::SmallVec;

use crate::{
    calendar::{CalendarDate, DAYS_PER_WEEK, DateRange, YearMonth, padding_count},
    locale::Locale,
};

/// Maximum number of cells a month grid can hold (six week rows).
pub const MAX_GRID_CELLS: usize = DAYS_PER_WEEK * 6;

/// Cells of one rendered month.
pub type MonthGrid = SmallVec<[GridCell; MAX_GRID_CELLS]>;

/// One cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell {
    /// Blank leading cell that aligns day 1 under its weekday.
    Padding,
    /// A real day of the displayed month.
    Day {
        /// The day this cell shows.
        date: CalendarDate,
        /// Whether the day is today.
        is_today: bool,
        /// Whether the day is the committed value.
        is_selected: bool,
        /// Whether the day may be selected.
        is_in_range: bool,
    },
}

impl GridCell {
    /// The day shown by this cell, if it is not padding.
    pub fn date(&self) -> Option<CalendarDate> {
        match self {
            GridCell::Padding => None,
            GridCell::Day { date, .. } => Some(*date),
        }
    }
}

/// Per-day markers applied while building a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayMarks {
    /// The day treated as today.
    pub today: CalendarDate,
    /// The committed value, if any.
    pub selected: Option<CalendarDate>,
    /// Selectable bounds.
    pub range: DateRange,
}

/// Builds the padding cells followed by one cell per day of `month`.
pub fn build_grid(month: YearMonth, locale: &Locale, marks: &DayMarks) -> MonthGrid {
    let padding = padding_count(month, locale.first_day_of_week());
    let mut cells = MonthGrid::new();
    cells.extend(std::iter::repeat_n(GridCell::Padding, padding));
    cells.extend((1..=month.days_in_month()).map(|day| {
        let date = CalendarDate::new_unchecked(month.year(), month.month(), day);
        GridCell::Day {
            date,
            is_today: date.is_same_day(&marks.today),
            is_selected: marks.selected.is_some_and(|selected| selected.is_same_day(&date)),
            is_in_range: marks.range.contains(date),
        }
    }));
    cells
}

/// Maps a day index (0 = day 1) to its position in the grid for `month`.
pub fn day_cell_index(month: YearMonth, locale: &Locale, day_index: usize) -> usize {
    padding_count(month, locale.first_day_of_week()) + day_index
}
