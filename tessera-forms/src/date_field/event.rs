//! Events consumed by the date field and the outcome of each transition.
use std::{fmt, str::FromStr};

use crate::{calendar::CalendarDate, error::DateParseError};

/// Keys the date field reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Move the highlight one day forward.
    ArrowDown,
    /// Move the highlight one day back.
    ArrowUp,
    /// Commit the highlighted or suggested day.
    Enter,
    /// Collapse the grid.
    Escape,
}

/// Everything that can happen to a date field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateFieldEvent {
    /// The input gained focus.
    Focus,
    /// The input lost focus.
    Blur,
    /// Explicit request to show the grid.
    Open,
    /// Explicit request to hide the grid.
    Close,
    /// The raw input text changed.
    Input(String),
    /// A key was pressed in the input.
    Key(Key),
    /// The pointer entered the text input while the grid is open.
    PointerEnterInput,
    /// The pointer entered the day cell with this day index (0 = day 1).
    PointerEnterDay(usize),
    /// The pointer left a day cell.
    PointerLeaveDay,
    /// A day cell was clicked.
    DayClicked(CalendarDate),
    /// Previous-month button.
    PreviousMonth,
    /// Next-month button.
    NextMonth,
    /// Previous-year button.
    PreviousYear,
    /// Next-year button.
    NextYear,
    /// "Today" button.
    Today,
    /// Clear button.
    Clear,
}

/// Value delivered to the change callback.
///
/// The external text form is `YYYY-MM-DD`, or the empty string for no date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateValue {
    /// No date chosen.
    #[default]
    Empty,
    /// A chosen day.
    Date(CalendarDate),
}

impl DateValue {
    /// The chosen day, if any.
    pub fn date(self) -> Option<CalendarDate> {
        match self {
            DateValue::Empty => None,
            DateValue::Date(date) => Some(date),
        }
    }

    /// Returns true when no date is chosen.
    pub fn is_empty(self) -> bool {
        matches!(self, DateValue::Empty)
    }
}

impl From<Option<CalendarDate>> for DateValue {
    fn from(value: Option<CalendarDate>) -> Self {
        value.map_or(DateValue::Empty, DateValue::Date)
    }
}

impl From<CalendarDate> for DateValue {
    fn from(value: CalendarDate) -> Self {
        DateValue::Date(value)
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateValue::Empty => Ok(()),
            DateValue::Date(date) => fmt::Display::fmt(date, f),
        }
    }
}

impl FromStr for DateValue {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            Ok(DateValue::Empty)
        } else {
            s.parse().map(DateValue::Date)
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};

    use super::DateValue;

    impl Serialize for DateValue {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for DateValue {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let text = String::deserialize(deserializer)?;
            text.parse().map_err(D::Error::custom)
        }
    }
}

/// Whether the host should keep dispatching the triggering input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Propagation {
    /// Let other handlers see the event.
    #[default]
    Continue,
    /// The date field consumed the event.
    Stop,
}

/// Notification raised by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusChange {
    /// The field gained focus.
    Focused,
    /// The field lost focus.
    Blurred,
}

/// Result of one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[must_use]
pub struct Outcome {
    /// Whether the triggering event should propagate further.
    pub propagation: Propagation,
    /// Value to emit through the change callback.
    pub change: Option<DateValue>,
    /// Focus notification to emit.
    pub focus: Option<FocusChange>,
    /// The host should move keyboard focus to the text input.
    pub focus_input: bool,
}

impl Outcome {
    pub(crate) fn ignored() -> Self {
        Self::default()
    }

    pub(crate) fn handled() -> Self {
        Self {
            propagation: Propagation::Stop,
            ..Self::default()
        }
    }

    pub(crate) fn committed(value: DateValue) -> Self {
        Self {
            propagation: Propagation::Stop,
            change: Some(value),
            ..Self::default()
        }
    }

    pub(crate) fn with_change(mut self, value: DateValue) -> Self {
        self.change = Some(value);
        self
    }

    pub(crate) fn with_focus(mut self, focus: FocusChange) -> Self {
        self.focus = Some(focus);
        self
    }

    /// Returns true when the host should stop propagating the event.
    pub fn is_handled(&self) -> bool {
        self.propagation == Propagation::Stop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_value_text_form() {
        let date = CalendarDate::new(2024, 5, 1).unwrap();
        assert_eq!(DateValue::Date(date).to_string(), "2024-05-01");
        assert_eq!(DateValue::Empty.to_string(), "");
        assert_eq!("".parse::<DateValue>(), Ok(DateValue::Empty));
        assert_eq!("2024-05-01".parse::<DateValue>(), Ok(DateValue::Date(date)));
        assert!("05/01/2024".parse::<DateValue>().is_err());
        assert_eq!(DateValue::from(None::<CalendarDate>), DateValue::Empty);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_date_value_serde() {
        assert_eq!(serde_json::to_string(&DateValue::Empty).unwrap(), "\"\"");
        let value: DateValue = serde_json::from_str("\"2024-05-01\"").unwrap();
        assert_eq!(value.date(), CalendarDate::new(2024, 5, 1));
    }
}
