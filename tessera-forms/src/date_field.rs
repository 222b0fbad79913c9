//! Date field: a text input paired with a calendar grid.
//!
//! ## Usage
//!
//! Build a [`DateField`] from [`DateFieldArgs`], forward every input event to
//! [`DateField::handle`] and render from [`DateField::state`]. Committed
//! values arrive through `on_change`; feed them back with
//! [`DateField::set_value`] to keep the field controlled.
use derive_builder::Builder;
use tracing::{instrument, warn};

pub use event::{DateFieldEvent, DateValue, FocusChange, Key, Outcome, Propagation};
pub use state::{Appearance, DateFieldState};

use crate::{
    calendar::{CalendarDate, DateRange},
    locale::Locale,
    prop::CallbackWith,
};

mod event;
mod state;

/// Identity of a field, passed to focus callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldIdentity {
    /// Element id.
    pub id: String,
    /// Form field name.
    pub name: String,
}

/// Arguments for [`DateField`].
#[derive(Builder, Clone, Debug)]
#[builder(pattern = "owned")]
pub struct DateFieldArgs {
    /// Committed value; `None` means no date chosen.
    #[builder(default, setter(strip_option))]
    pub value: Option<CalendarDate>,
    /// Earliest selectable day.
    #[builder(default, setter(strip_option))]
    pub min_value: Option<CalendarDate>,
    /// Latest selectable day.
    #[builder(default, setter(strip_option))]
    pub max_value: Option<CalendarDate>,
    /// Locale for parsing, formatting and the first weekday column.
    #[builder(default)]
    pub locale: Locale,
    /// Ignore every event.
    #[builder(default = "false")]
    pub is_disabled: bool,
    /// Allow browsing but not changing the value.
    #[builder(default = "false")]
    pub is_read_only: bool,
    /// Visual treatment; [`Appearance::Filter`] keeps the grid open.
    #[builder(default)]
    pub appearance: Appearance,
    /// Element id reported to focus callbacks.
    #[builder(default, setter(into))]
    pub id: String,
    /// Form field name reported to focus callbacks.
    #[builder(default, setter(into))]
    pub name: String,
    /// Day treated as today. Defaults to the current UTC date.
    #[builder(default, setter(strip_option))]
    pub today: Option<CalendarDate>,
    /// Called with each committed value.
    #[builder(default, setter(strip_option, into))]
    pub on_change: Option<CallbackWith<DateValue>>,
    /// Called when the field gains focus.
    #[builder(default, setter(strip_option, into))]
    pub on_focus: Option<CallbackWith<FieldIdentity>>,
    /// Called when the field loses focus.
    #[builder(default, setter(strip_option, into))]
    pub on_blur: Option<CallbackWith<FieldIdentity>>,
}

impl DateFieldArgs {
    fn range(&self) -> DateRange {
        DateRange::new(self.min_value, self.max_value)
    }

    fn identity(&self) -> FieldIdentity {
        FieldIdentity {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

impl Default for DateFieldArgs {
    fn default() -> Self {
        DateFieldArgsBuilder::default()
            .build()
            .expect("DateFieldArgsBuilder default build should succeed")
    }
}

impl From<DateFieldArgsBuilder> for DateFieldArgs {
    fn from(builder: DateFieldArgsBuilder) -> Self {
        builder
            .build()
            .expect("DateFieldArgsBuilder build should succeed; every field has a default")
    }
}

/// A date field bound to its consumer callbacks.
#[derive(Debug)]
pub struct DateField {
    args: DateFieldArgs,
    state: DateFieldState,
}

impl DateField {
    /// Creates a date field.
    ///
    /// A field that can change its value but has no `on_change` callback logs a
    /// warning; it still behaves normally.
    pub fn new(args: impl Into<DateFieldArgs>) -> Self {
        let args: DateFieldArgs = args.into();
        warn_missing_on_change(&args);
        let mut state = DateFieldState::new(args.value, args.range(), args.locale.clone())
            .with_appearance(args.appearance);
        if let Some(today) = args.today {
            state = state.with_today(today);
        }
        state.set_disabled(args.is_disabled);
        state.set_read_only(args.is_read_only);
        Self { args, state }
    }

    /// Current state, for rendering.
    pub fn state(&self) -> &DateFieldState {
        &self.state
    }

    /// Current arguments.
    pub fn args(&self) -> &DateFieldArgs {
        &self.args
    }

    /// Applies one event and notifies the consumer.
    #[instrument(level = "debug", skip(self), fields(field = %self.args.name))]
    pub fn handle(&mut self, event: DateFieldEvent) -> Outcome {
        let outcome = self.state.handle(event);
        if let (Some(value), Some(on_change)) = (outcome.change, &self.args.on_change) {
            on_change.call(value);
        }
        let focus_callback = match outcome.focus {
            Some(FocusChange::Focused) => self.args.on_focus.as_ref(),
            Some(FocusChange::Blurred) => self.args.on_blur.as_ref(),
            None => None,
        };
        if let Some(callback) = focus_callback {
            callback.call(self.args.identity());
        }
        outcome
    }

    /// Updates the committed value, as a controlled consumer does after
    /// `on_change`.
    pub fn set_value(&mut self, value: Option<CalendarDate>) {
        self.args.value = value;
        self.state.set_value(value);
    }

    /// Replaces the arguments while keeping transient state such as the
    /// typed text and displayed month.
    pub fn update(&mut self, args: impl Into<DateFieldArgs>) {
        let args: DateFieldArgs = args.into();
        if args.on_change.is_none() != self.args.on_change.is_none()
            || args.is_read_only != self.args.is_read_only
        {
            warn_missing_on_change(&args);
        }
        self.state.set_value(args.value);
        self.state.set_range(args.range());
        self.state.set_locale(args.locale.clone());
        self.state.set_disabled(args.is_disabled);
        self.state.set_read_only(args.is_read_only);
        if let Some(today) = args.today {
            self.state.set_today(today);
        }
        self.args = args;
    }
}

fn warn_missing_on_change(args: &DateFieldArgs) {
    if args.on_change.is_none() && !args.is_read_only {
        warn!(
            field = %args.name,
            "date field is editable but has no on_change callback; commits will not reach the consumer"
        );
    }
}
