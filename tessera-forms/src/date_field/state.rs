//! Selection and highlight state machine of the date field.
//!
//! The state owns the displayed month, the keyboard highlight, the raw input
//! text and the tentative suggestion parsed from it. It never changes the
//! committed value on its own: commits are reported through [`Outcome`] and
//! the owner feeds the accepted value back with
//! [`DateFieldState::set_value`].
use tracing::{debug, trace};

use super::event::{DateFieldEvent, DateValue, FocusChange, Key, Outcome};
use crate::{
    calendar::{CalendarDate, DateRange, YearMonth},
    grid::{DayMarks, MonthGrid, build_grid, day_cell_index},
    locale::{Locale, ParsedDate, format_date, parse_date},
};

/// Visual treatment of the date field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Appearance {
    /// Input with a popup grid.
    #[default]
    Default,
    /// Borderless inline grid that stays open, used inside filter bars.
    Filter,
}

/// Holds everything the date field remembers between events.
#[derive(Debug, Clone)]
pub struct DateFieldState {
    value: Option<CalendarDate>,
    range: DateRange,
    locale: Locale,
    today: CalendarDate,
    appearance: Appearance,
    is_disabled: bool,
    is_read_only: bool,
    text: String,
    is_open: bool,
    displayed_month: YearMonth,
    highlighted: Option<usize>,
    suggestion: Option<CalendarDate>,
}

impl DateFieldState {
    /// Creates a closed field showing the month of `value`, or of today when
    /// there is no value.
    pub fn new(value: Option<CalendarDate>, range: DateRange, locale: Locale) -> Self {
        let today = CalendarDate::today();
        Self {
            value,
            range,
            text: value.map(|date| format_date(date, &locale)).unwrap_or_default(),
            locale,
            today,
            appearance: Appearance::Default,
            is_disabled: false,
            is_read_only: false,
            is_open: false,
            displayed_month: value.unwrap_or(today).year_month(),
            highlighted: None,
            suggestion: None,
        }
    }

    /// Replaces the day treated as today.
    pub fn with_today(mut self, today: CalendarDate) -> Self {
        if self.value.is_none() {
            self.displayed_month = today.year_month();
        }
        self.today = today;
        self
    }

    /// Sets the appearance. The filter appearance keeps the grid open.
    pub fn with_appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = appearance;
        if appearance == Appearance::Filter {
            self.is_open = true;
        }
        self
    }

    /// The committed value last supplied by the owner.
    pub fn value(&self) -> Option<CalendarDate> {
        self.value
    }

    /// Raw text currently in the input.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the grid is shown.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Month currently rendered in the grid.
    pub fn displayed_month(&self) -> YearMonth {
        self.displayed_month
    }

    /// Highlighted day index within the displayed month (0 = day 1).
    pub fn highlighted_index(&self) -> Option<usize> {
        self.highlighted
    }

    /// Highlighted day.
    pub fn highlighted_date(&self) -> Option<CalendarDate> {
        self.highlighted.and_then(|index| self.day_at(index))
    }

    /// Position of the highlighted day within [`DateFieldState::grid`].
    pub fn highlighted_cell_index(&self) -> Option<usize> {
        self.highlighted
            .map(|index| day_cell_index(self.displayed_month, &self.locale, index))
    }

    /// Tentative matches parsed from the input text. Holds at most one day.
    pub fn suggestions(&self) -> &[CalendarDate] {
        self.suggestion.as_slice()
    }

    /// Selectable bounds.
    pub fn range(&self) -> &DateRange {
        &self.range
    }

    /// Locale used for parsing, formatting and the grid layout.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// The day treated as today.
    pub fn today(&self) -> CalendarDate {
        self.today
    }

    /// The appearance.
    pub fn appearance(&self) -> Appearance {
        self.appearance
    }

    /// Whether every event is ignored.
    pub fn is_disabled(&self) -> bool {
        self.is_disabled
    }

    /// Whether the value can be viewed but not changed.
    pub fn is_read_only(&self) -> bool {
        self.is_read_only
    }

    /// Builds the grid for the displayed month.
    pub fn grid(&self) -> MonthGrid {
        build_grid(
            self.displayed_month,
            &self.locale,
            &DayMarks {
                today: self.today,
                selected: self.value,
                range: self.range,
            },
        )
    }

    /// Applies one event and reports what the owner should do.
    pub fn handle(&mut self, event: DateFieldEvent) -> Outcome {
        if self.is_disabled {
            trace!(?event, "date field disabled; ignoring event");
            return Outcome::ignored();
        }
        debug!(?event, "date field event");
        let outcome = match event {
            DateFieldEvent::Focus => {
                self.open();
                Outcome::ignored().with_focus(FocusChange::Focused)
            }
            DateFieldEvent::Blur => self.blur(),
            DateFieldEvent::Open => {
                self.open();
                Outcome::ignored()
            }
            DateFieldEvent::Close => {
                self.close();
                Outcome::ignored()
            }
            DateFieldEvent::Input(text) => self.input(text),
            DateFieldEvent::Key(Key::ArrowDown) => self.navigate_down(),
            DateFieldEvent::Key(Key::ArrowUp) => self.navigate_up(),
            DateFieldEvent::Key(Key::Enter) => self.enter(),
            DateFieldEvent::Key(Key::Escape) => {
                if !self.is_open {
                    return Outcome::ignored();
                }
                self.close();
                Outcome::handled()
            }
            DateFieldEvent::PointerEnterInput | DateFieldEvent::PointerLeaveDay => {
                if self.is_open {
                    self.highlighted = None;
                }
                Outcome::ignored()
            }
            DateFieldEvent::PointerEnterDay(index) => {
                if self.is_open
                    && self
                        .day_at(index)
                        .is_some_and(|date| self.range.contains(date))
                {
                    self.highlighted = Some(index);
                }
                Outcome::ignored()
            }
            DateFieldEvent::DayClicked(date) => {
                if self.is_read_only || !self.range.contains(date) {
                    return Outcome::ignored();
                }
                self.commit(date)
            }
            DateFieldEvent::PreviousMonth => self.show_month(self.displayed_month.add_months(-1)),
            DateFieldEvent::NextMonth => self.show_month(self.displayed_month.add_months(1)),
            DateFieldEvent::PreviousYear => self.show_month(self.displayed_month.add_years(-1)),
            DateFieldEvent::NextYear => self.show_month(self.displayed_month.add_years(1)),
            DateFieldEvent::Today => {
                self.displayed_month = self.today.year_month();
                self.highlighted = Some(day_index(self.today));
                Outcome {
                    focus_input: true,
                    ..Outcome::handled()
                }
            }
            DateFieldEvent::Clear => {
                if self.is_read_only {
                    return Outcome::ignored();
                }
                self.commit_empty()
            }
        };
        trace!(
            displayed_month = %self.displayed_month,
            highlighted = ?self.highlighted,
            suggestion = ?self.suggestion,
            is_open = self.is_open,
            "date field state updated"
        );
        outcome
    }

    /// Updates the committed value supplied by the owner.
    pub fn set_value(&mut self, value: Option<CalendarDate>) {
        if self.value == value {
            return;
        }
        self.value = value;
        self.suggestion = None;
        self.text = value
            .map(|date| format_date(date, &self.locale))
            .unwrap_or_default();
        if let Some(date) = value {
            self.displayed_month = date.year_month();
        }
        self.highlighted = if self.is_open { self.selected_index() } else { None };
    }

    /// Updates the selectable bounds, dropping a highlight that falls outside.
    pub fn set_range(&mut self, range: DateRange) {
        self.range = range;
        if self
            .highlighted_date()
            .is_some_and(|date| !self.range.contains(date))
        {
            self.highlighted = None;
        }
    }

    /// Switches locale and re-derives anything parsed under the old one.
    pub fn set_locale(&mut self, locale: Locale) {
        if self.locale == locale {
            return;
        }
        let showing_value = self.suggestion.is_none()
            && self
                .value
                .is_some_and(|date| self.text == format_date(date, &self.locale));
        self.locale = locale;
        if showing_value {
            if let Some(date) = self.value {
                self.text = format_date(date, &self.locale);
            }
        } else if self.suggestion.is_some() {
            self.suggest_from_text();
        }
    }

    /// Enables or disables the field. Disabling collapses the grid.
    pub fn set_disabled(&mut self, is_disabled: bool) {
        self.is_disabled = is_disabled;
        if is_disabled {
            self.close();
            self.highlighted = None;
        }
    }

    /// Makes the field read-only or editable.
    pub fn set_read_only(&mut self, is_read_only: bool) {
        self.is_read_only = is_read_only;
    }

    /// Replaces the day treated as today.
    pub fn set_today(&mut self, today: CalendarDate) {
        self.today = today;
    }

    fn open(&mut self) {
        self.is_open = true;
        self.highlighted = self.selected_index();
    }

    fn close(&mut self) {
        if self.appearance == Appearance::Filter {
            return;
        }
        self.is_open = false;
        self.highlighted = None;
    }

    fn input(&mut self, text: String) -> Outcome {
        if self.is_read_only {
            return Outcome::ignored();
        }
        self.text = text;
        self.is_open = true;
        self.suggest_from_text();
        Outcome::ignored()
    }

    fn suggest_from_text(&mut self) {
        match parse_date(&self.text, &self.locale) {
            ParsedDate::Date(date) => {
                self.displayed_month = date.year_month();
                self.suggestion = Some(date);
                self.highlighted = self.range.contains(date).then(|| day_index(date));
            }
            ParsedDate::Empty | ParsedDate::Unparseable => {
                self.suggestion = None;
                self.highlighted = None;
            }
        }
    }

    fn navigate_down(&mut self) -> Outcome {
        if !self.is_open {
            self.open();
            return Outcome::handled();
        }
        let Some(current) = self.highlighted_date() else {
            let first = self.selectable_indices().next();
            self.highlighted = first;
            return Outcome::handled();
        };
        let candidate = current.next_day();
        if !self.range.contains(candidate) {
            trace!(%candidate, "navigation blocked at range boundary");
            return Outcome::handled();
        }
        if !self.displayed_month.contains(candidate) {
            self.displayed_month = candidate.year_month();
        }
        self.highlighted = Some(day_index(candidate));
        Outcome::handled()
    }

    fn navigate_up(&mut self) -> Outcome {
        if !self.is_open {
            self.open();
            return Outcome::handled();
        }
        let Some(current) = self.highlighted_date() else {
            let last = self.selectable_indices().next_back();
            self.highlighted = last;
            return Outcome::handled();
        };
        let candidate = current.previous_day();
        if !self.range.contains(candidate) {
            trace!(%candidate, "navigation blocked at range boundary");
            return Outcome::handled();
        }
        if !self.displayed_month.contains(candidate) {
            self.displayed_month = candidate.year_month();
        }
        self.highlighted = Some(day_index(candidate));
        Outcome::handled()
    }

    fn enter(&mut self) -> Outcome {
        if self.is_read_only {
            return Outcome::ignored();
        }
        let target = self
            .highlighted_date()
            .filter(|date| self.range.contains(*date))
            .or_else(|| self.suggestion.filter(|date| self.range.contains(*date)));
        if let Some(date) = target {
            return self.commit(date);
        }
        if self.text.trim().is_empty() {
            return self.commit_empty();
        }
        Outcome::ignored()
    }

    fn blur(&mut self) -> Outcome {
        let mut outcome = Outcome::ignored().with_focus(FocusChange::Blurred);
        if !self.is_read_only {
            match parse_date(&self.text, &self.locale) {
                ParsedDate::Empty => {
                    self.suggestion = None;
                    outcome = outcome.with_change(DateValue::Empty);
                }
                ParsedDate::Date(date) if self.range.contains(date) => {
                    self.suggestion = None;
                    self.text = format_date(date, &self.locale);
                    outcome = outcome.with_change(DateValue::Date(date));
                }
                ParsedDate::Date(_) | ParsedDate::Unparseable => {
                    debug!(text = %self.text, "discarding unusable text on blur");
                }
            }
        }
        self.close();
        outcome
    }

    fn commit(&mut self, date: CalendarDate) -> Outcome {
        self.suggestion = None;
        self.text = format_date(date, &self.locale);
        self.displayed_month = date.year_month();
        self.highlighted = Some(day_index(date));
        self.close();
        Outcome::committed(DateValue::Date(date))
    }

    fn commit_empty(&mut self) -> Outcome {
        self.suggestion = None;
        self.highlighted = None;
        self.text.clear();
        Outcome::committed(DateValue::Empty)
    }

    fn show_month(&mut self, month: YearMonth) -> Outcome {
        self.displayed_month = month;
        self.highlighted = Some(0);
        Outcome::handled()
    }

    fn day_at(&self, index: usize) -> Option<CalendarDate> {
        let day = u8::try_from(index).ok()?.checked_add(1)?;
        self.displayed_month.to_date(day)
    }

    fn selected_index(&self) -> Option<usize> {
        self.value
            .filter(|date| self.displayed_month.contains(*date) && self.range.contains(*date))
            .map(day_index)
    }

    fn selectable_indices(&self) -> impl DoubleEndedIterator<Item = usize> + '_ {
        (0..self.displayed_month.days_in_month() as usize)
            .filter(move |index| self.day_at(*index).is_some_and(|date| self.range.contains(date)))
    }
}

fn day_index(date: CalendarDate) -> usize {
    date.day() as usize - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_field::event::Propagation;

    fn date(year: i32, month: u8, day: u8) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    fn month(year: i32, month: u8) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    fn field(value: Option<CalendarDate>, range: DateRange) -> DateFieldState {
        DateFieldState::new(value, range, Locale::iso()).with_today(date(2024, 6, 12))
    }

    fn open_at(state: &mut DateFieldState, day: CalendarDate) {
        let _ = state.handle(DateFieldEvent::Input(day.to_string()));
        assert_eq!(state.highlighted_date(), Some(day));
    }

    #[test]
    fn test_initial_month_follows_value_or_today() {
        let state = field(None, DateRange::unbounded());
        assert_eq!(state.displayed_month(), month(2024, 6));
        assert!(!state.is_open());
        let state = field(Some(date(2023, 2, 3)), DateRange::unbounded());
        assert_eq!(state.displayed_month(), month(2023, 2));
        assert_eq!(state.text(), "2023-02-03");
    }

    #[test]
    fn test_open_highlights_selected_day() {
        let mut state = field(Some(date(2024, 6, 20)), DateRange::unbounded());
        let outcome = state.handle(DateFieldEvent::Focus);
        assert_eq!(outcome.focus, Some(FocusChange::Focused));
        assert!(state.is_open());
        assert_eq!(state.highlighted_index(), Some(19));

        let mut state = field(None, DateRange::unbounded());
        let _ = state.handle(DateFieldEvent::Open);
        assert!(state.is_open());
        assert_eq!(state.highlighted_index(), None);
    }

    #[test]
    fn test_typing_blank_clears_and_enter_commits_empty() {
        let mut state = field(Some(date(2024, 6, 20)), DateRange::unbounded());
        let _ = state.handle(DateFieldEvent::Focus);
        let _ = state.handle(DateFieldEvent::Input("2024-06-21".into()));
        assert_eq!(state.suggestions(), &[date(2024, 6, 21)]);
        let _ = state.handle(DateFieldEvent::Input("  ".into()));
        assert!(state.suggestions().is_empty());
        assert_eq!(state.highlighted_index(), None);
        let outcome = state.handle(DateFieldEvent::Key(Key::Enter));
        assert_eq!(outcome.change, Some(DateValue::Empty));
        assert_eq!(state.text(), "");
    }

    #[test]
    fn test_typing_valid_date_moves_month_and_highlights() {
        let mut state = field(None, DateRange::unbounded());
        let _ = state.handle(DateFieldEvent::Input("2024-03-15".into()));
        assert!(state.is_open());
        assert_eq!(state.displayed_month(), month(2024, 3));
        assert_eq!(state.highlighted_index(), Some(14));
        let outcome = state.handle(DateFieldEvent::Key(Key::Enter));
        assert_eq!(outcome.change, Some(DateValue::Date(date(2024, 3, 15))));
        assert!(outcome.is_handled());
        assert!(state.suggestions().is_empty());
        assert!(!state.is_open());
        // The committed value is only a prop; the owner has not fed it back.
        assert_eq!(state.value(), None);
    }

    #[test]
    fn test_typing_out_of_range_date_shows_month_without_highlight() {
        let range = DateRange::new(Some(date(2024, 3, 20)), None);
        let mut state = field(None, range);
        let _ = state.handle(DateFieldEvent::Input("2024-03-15".into()));
        assert_eq!(state.displayed_month(), month(2024, 3));
        assert_eq!(state.highlighted_index(), None);
        assert_eq!(state.suggestions(), &[date(2024, 3, 15)]);
        let outcome = state.handle(DateFieldEvent::Key(Key::Enter));
        assert_eq!(outcome.change, None);
        assert_eq!(outcome.propagation, Propagation::Continue);
    }

    #[test]
    fn test_typing_garbage_clears_suggestion() {
        let mut state = field(None, DateRange::unbounded());
        let _ = state.handle(DateFieldEvent::Input("2024-03-15".into()));
        let _ = state.handle(DateFieldEvent::Input("2024-03-1x".into()));
        assert!(state.suggestions().is_empty());
        assert_eq!(state.highlighted_index(), None);
        assert_eq!(state.displayed_month(), month(2024, 3));
    }

    #[test]
    fn test_navigate_down_within_month() {
        let mut state = field(None, DateRange::unbounded());
        open_at(&mut state, date(2024, 3, 15));
        let outcome = state.handle(DateFieldEvent::Key(Key::ArrowDown));
        assert!(outcome.is_handled());
        assert_eq!(state.highlighted_index(), Some(15));
    }

    #[test]
    fn test_navigate_down_rolls_into_next_month() {
        let mut state = field(None, DateRange::unbounded());
        open_at(&mut state, date(2024, 2, 29));
        let _ = state.handle(DateFieldEvent::Key(Key::ArrowDown));
        assert_eq!(state.displayed_month(), month(2024, 3));
        assert_eq!(state.highlighted_index(), Some(0));

        open_at(&mut state, date(2024, 12, 31));
        let _ = state.handle(DateFieldEvent::Key(Key::ArrowDown));
        assert_eq!(state.displayed_month(), month(2025, 1));
        assert_eq!(state.highlighted_index(), Some(0));
    }

    #[test]
    fn test_navigate_down_blocked_by_max() {
        let range = DateRange::new(None, Some(date(2024, 2, 29)));
        let mut state = field(None, range);
        open_at(&mut state, date(2024, 2, 29));
        let outcome = state.handle(DateFieldEvent::Key(Key::ArrowDown));
        assert!(outcome.is_handled());
        assert_eq!(outcome.change, None);
        assert_eq!(state.displayed_month(), month(2024, 2));
        assert_eq!(state.highlighted_index(), Some(28));
    }

    #[test]
    fn test_navigate_up_rolls_into_previous_month() {
        let mut state = field(None, DateRange::unbounded());
        open_at(&mut state, date(2024, 3, 1));
        let _ = state.handle(DateFieldEvent::Key(Key::ArrowUp));
        assert_eq!(state.displayed_month(), month(2024, 2));
        assert_eq!(state.highlighted_index(), Some(28));

        open_at(&mut state, date(2024, 1, 1));
        let _ = state.handle(DateFieldEvent::Key(Key::ArrowUp));
        assert_eq!(state.displayed_month(), month(2023, 12));
        assert_eq!(state.highlighted_index(), Some(30));
    }

    #[test]
    fn test_navigate_up_blocked_by_min() {
        let range = DateRange::new(Some(date(2024, 3, 1)), None);
        let mut state = field(None, range);
        open_at(&mut state, date(2024, 3, 1));
        let _ = state.handle(DateFieldEvent::Key(Key::ArrowUp));
        assert_eq!(state.displayed_month(), month(2024, 3));
        assert_eq!(state.highlighted_index(), Some(0));
    }

    #[test]
    fn test_arrow_without_highlight_starts_at_first_selectable_day() {
        let range = DateRange::new(Some(date(2024, 6, 5)), Some(date(2024, 6, 25)));
        let mut state = field(None, range);
        let outcome = state.handle(DateFieldEvent::Key(Key::ArrowDown));
        assert!(outcome.is_handled());
        assert!(state.is_open());
        assert_eq!(state.highlighted_index(), None);
        let _ = state.handle(DateFieldEvent::Key(Key::ArrowDown));
        assert_eq!(state.highlighted_index(), Some(4));
        let _ = state.handle(DateFieldEvent::PointerEnterInput);
        let _ = state.handle(DateFieldEvent::Key(Key::ArrowUp));
        assert_eq!(state.highlighted_index(), Some(24));
    }

    #[test]
    fn test_pointer_clears_and_sets_highlight() {
        let range = DateRange::new(Some(date(2024, 6, 10)), None);
        let mut state = field(None, range);
        let _ = state.handle(DateFieldEvent::Open);
        let _ = state.handle(DateFieldEvent::PointerEnterDay(3));
        assert_eq!(state.highlighted_index(), None);
        let _ = state.handle(DateFieldEvent::PointerEnterDay(12));
        assert_eq!(state.highlighted_index(), Some(12));
        let _ = state.handle(DateFieldEvent::PointerLeaveDay);
        assert_eq!(state.highlighted_index(), None);
        let _ = state.handle(DateFieldEvent::PointerEnterDay(40));
        assert_eq!(state.highlighted_index(), None);
        let _ = state.handle(DateFieldEvent::PointerEnterDay(255));
        let _ = state.handle(DateFieldEvent::PointerEnterDay(usize::MAX));
        assert_eq!(state.highlighted_index(), None);
        assert_eq!(state.highlighted_date(), None);
    }

    #[test]
    fn test_month_and_year_buttons() {
        let mut state = field(None, DateRange::unbounded());
        let _ = state.handle(DateFieldEvent::Open);
        let _ = state.handle(DateFieldEvent::NextMonth);
        assert_eq!(state.displayed_month(), month(2024, 7));
        assert_eq!(state.highlighted_index(), Some(0));
        let _ = state.handle(DateFieldEvent::PreviousYear);
        assert_eq!(state.displayed_month(), month(2023, 7));
        let _ = state.handle(DateFieldEvent::NextYear);
        let _ = state.handle(DateFieldEvent::PreviousMonth);
        assert_eq!(state.displayed_month(), month(2024, 6));
        let _ = state.handle(DateFieldEvent::PreviousMonth);
        let outcome = state.handle(DateFieldEvent::Today);
        assert!(outcome.focus_input);
        assert_eq!(state.displayed_month(), month(2024, 6));
        assert_eq!(state.highlighted_index(), Some(11));
    }

    #[test]
    fn test_enter_skips_out_of_range_button_highlight() {
        let range = DateRange::new(Some(date(2024, 7, 10)), None);
        let mut state = field(None, range);
        let _ = state.handle(DateFieldEvent::Input("2024-06-01".into()));
        let _ = state.handle(DateFieldEvent::NextMonth);
        assert_eq!(state.displayed_month(), month(2024, 7));
        assert_eq!(state.highlighted_date(), Some(date(2024, 7, 1)));
        let outcome = state.handle(DateFieldEvent::Key(Key::Enter));
        assert_eq!(outcome.change, None);
        assert!(state.is_open());
    }

    #[test]
    fn test_navigation_stops_at_last_representable_day() {
        let last = date(9999, 12, 31);
        let mut state = field(Some(last), DateRange::unbounded());
        open_at(&mut state, last);
        let outcome = state.handle(DateFieldEvent::Key(Key::ArrowDown));
        assert!(outcome.is_handled());
        assert_eq!(state.highlighted_date(), Some(last));
        let _ = state.handle(DateFieldEvent::NextMonth);
        let _ = state.handle(DateFieldEvent::NextYear);
        assert_eq!(state.displayed_month(), month(9999, 12));
    }

    #[test]
    fn test_day_click_commits_only_in_range() {
        let range = DateRange::new(None, Some(date(2024, 6, 15)));
        let mut state = field(None, range);
        let _ = state.handle(DateFieldEvent::Open);
        let outcome = state.handle(DateFieldEvent::DayClicked(date(2024, 6, 16)));
        assert_eq!(outcome.change, None);
        assert!(state.is_open());
        let outcome = state.handle(DateFieldEvent::DayClicked(date(2024, 6, 14)));
        assert_eq!(outcome.change, Some(DateValue::Date(date(2024, 6, 14))));
        assert_eq!(state.text(), "2024-06-14");
        assert!(!state.is_open());
    }

    #[test]
    fn test_blur_commits_valid_text() {
        let mut state = field(None, DateRange::unbounded());
        let _ = state.handle(DateFieldEvent::Focus);
        let _ = state.handle(DateFieldEvent::Input("2024-5-1".into()));
        let outcome = state.handle(DateFieldEvent::Blur);
        assert_eq!(outcome.focus, Some(FocusChange::Blurred));
        assert_eq!(outcome.change, Some(DateValue::Date(date(2024, 5, 1))));
        assert_eq!(state.text(), "2024-05-01");
        assert!(!state.is_open());
    }

    #[test]
    fn test_blur_with_invalid_text_keeps_value() {
        let mut state = field(None, DateRange::unbounded());
        let _ = state.handle(DateFieldEvent::Focus);
        let _ = state.handle(DateFieldEvent::Input("2024-05-01".into()));
        let outcome = state.handle(DateFieldEvent::Key(Key::Enter));
        assert_eq!(outcome.change, Some(DateValue::Date(date(2024, 5, 1))));
        state.set_value(outcome.change.and_then(DateValue::date));

        let _ = state.handle(DateFieldEvent::Input("2024-05-01 nope".into()));
        let outcome = state.handle(DateFieldEvent::Blur);
        assert_eq!(outcome.change, None);
        assert_eq!(state.value(), Some(date(2024, 5, 1)));
    }

    #[test]
    fn test_blur_with_out_of_range_text_keeps_value() {
        let range = DateRange::new(Some(date(2024, 1, 1)), None);
        let mut state = field(Some(date(2024, 5, 1)), range);
        let _ = state.handle(DateFieldEvent::Input("2023-05-01".into()));
        let outcome = state.handle(DateFieldEvent::Blur);
        assert_eq!(outcome.change, None);
    }

    #[test]
    fn test_blur_with_blank_text_commits_empty() {
        let mut state = field(Some(date(2024, 5, 1)), DateRange::unbounded());
        let _ = state.handle(DateFieldEvent::Input(String::new()));
        let outcome = state.handle(DateFieldEvent::Blur);
        assert_eq!(outcome.change, Some(DateValue::Empty));
    }

    #[test]
    fn test_clear_commits_empty() {
        let mut state = field(Some(date(2024, 5, 1)), DateRange::unbounded());
        let outcome = state.handle(DateFieldEvent::Clear);
        assert_eq!(outcome.change, Some(DateValue::Empty));
        assert_eq!(state.text(), "");
        assert!(state.suggestions().is_empty());
    }

    #[test]
    fn test_escape_closes() {
        let mut state = field(None, DateRange::unbounded());
        assert!(!state.handle(DateFieldEvent::Key(Key::Escape)).is_handled());
        let _ = state.handle(DateFieldEvent::Input("2024-06-01".into()));
        assert!(state.handle(DateFieldEvent::Key(Key::Escape)).is_handled());
        assert!(!state.is_open());
        assert_eq!(state.highlighted_index(), None);
        assert_eq!(state.suggestions(), &[date(2024, 6, 1)]);
    }

    #[test]
    fn test_disabled_ignores_everything() {
        let mut state = field(None, DateRange::unbounded());
        state.set_disabled(true);
        for event in [
            DateFieldEvent::Focus,
            DateFieldEvent::Input("2024-06-01".into()),
            DateFieldEvent::Key(Key::Enter),
            DateFieldEvent::Clear,
        ] {
            assert_eq!(state.handle(event), Outcome::ignored());
        }
        assert!(!state.is_open());
        assert_eq!(state.text(), "");
    }

    #[test]
    fn test_read_only_allows_navigation_only() {
        let mut state = field(Some(date(2024, 6, 3)), DateRange::unbounded());
        state.set_read_only(true);
        let _ = state.handle(DateFieldEvent::Focus);
        let _ = state.handle(DateFieldEvent::Key(Key::ArrowDown));
        assert_eq!(state.highlighted_index(), Some(3));
        assert_eq!(state.handle(DateFieldEvent::Key(Key::Enter)).change, None);
        assert_eq!(state.handle(DateFieldEvent::Clear).change, None);
        let _ = state.handle(DateFieldEvent::Input("x".into()));
        assert_eq!(state.text(), "2024-06-03");
        assert_eq!(state.handle(DateFieldEvent::Blur).change, None);
    }

    #[test]
    fn test_filter_appearance_stays_open() {
        let mut state = field(None, DateRange::unbounded()).with_appearance(Appearance::Filter);
        assert!(state.is_open());
        let _ = state.handle(DateFieldEvent::Close);
        assert!(state.is_open());
        let outcome = state.handle(DateFieldEvent::DayClicked(date(2024, 6, 2)));
        assert!(outcome.change.is_some());
        assert!(state.is_open());
        let _ = state.handle(DateFieldEvent::Blur);
        assert!(state.is_open());
    }

    #[test]
    fn test_set_value_refreshes_text_and_month() {
        let mut state = field(None, DateRange::unbounded());
        let _ = state.handle(DateFieldEvent::Open);
        state.set_value(Some(date(2025, 1, 9)));
        assert_eq!(state.text(), "2025-01-09");
        assert_eq!(state.displayed_month(), month(2025, 1));
        assert_eq!(state.highlighted_index(), Some(8));
        state.set_value(None);
        assert_eq!(state.text(), "");
        assert_eq!(state.displayed_month(), month(2025, 1));
    }

    #[test]
    fn test_set_range_drops_stale_highlight() {
        let mut state = field(None, DateRange::unbounded());
        open_at(&mut state, date(2024, 6, 10));
        state.set_range(DateRange::new(Some(date(2024, 6, 11)), None));
        assert_eq!(state.highlighted_index(), None);
    }

    #[test]
    fn test_locale_change_rederives_suggestion() {
        let mut state = DateFieldState::new(None, DateRange::unbounded(), Locale::en_us());
        let _ = state.handle(DateFieldEvent::Input("03/04/2024".into()));
        assert_eq!(state.suggestions(), &[date(2024, 3, 4)]);
        state.set_locale(Locale::en_gb());
        assert_eq!(state.suggestions(), &[date(2024, 4, 3)]);
        assert_eq!(state.displayed_month(), month(2024, 4));
        state.set_locale(Locale::iso());
        assert!(state.suggestions().is_empty());
    }

    #[test]
    fn test_locale_change_reformats_committed_text() {
        let mut state =
            DateFieldState::new(Some(date(2024, 3, 4)), DateRange::unbounded(), Locale::en_us());
        assert_eq!(state.text(), "03/04/2024");
        state.set_locale(Locale::de_de());
        assert_eq!(state.text(), "04.03.2024");
    }

    #[test]
    fn test_grid_and_highlight_cell() {
        let mut state = DateFieldState::new(None, DateRange::unbounded(), Locale::en_us())
            .with_today(date(2024, 9, 10));
        open_at(&mut state, date(2024, 9, 3));
        let grid = state.grid();
        // 2024-09-01 was a Sunday, the first column in en-US.
        assert_eq!(grid.len(), 30);
        assert_eq!(state.highlighted_cell_index(), Some(2));
        assert_eq!(grid[2].date(), Some(date(2024, 9, 3)));
    }
}
