//! Form controls for the Tessera UI toolkit.
//!
//! The date field is the only control here with state of its own. This crate
//! holds its calendar arithmetic, locale-aware text parsing, month grid and
//! the selection/highlight state machine; rendering is left to the host.
//!
//! # Example
//!
//! ```
//! use tessera_forms::{
//!     calendar::CalendarDate,
//!     date_field::{DateField, DateFieldArgsBuilder, DateFieldEvent, DateValue, Key},
//!     locale::Locale,
//! };
//!
//! let mut field = DateField::new(
//!     DateFieldArgsBuilder::default()
//!         .locale(Locale::en_us())
//!         .on_change(|value: DateValue| println!("committed {value}")),
//! );
//!
//! let _ = field.handle(DateFieldEvent::Focus);
//! let _ = field.handle(DateFieldEvent::Input("03/15/2024".into()));
//! let outcome = field.handle(DateFieldEvent::Key(Key::Enter));
//! assert_eq!(outcome.change, CalendarDate::new(2024, 3, 15).map(DateValue::Date));
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod calendar;
pub mod date_field;
pub mod error;
pub mod grid;
pub mod locale;
pub mod prop;
