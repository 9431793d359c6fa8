//! calendar-grid computes calendar month grids and date selections for UI
//! components.
//!
//! The crate owns no rendering. A host keeps a [`CalendarState`], feeds it
//! [`Action`]s from its event handlers, and draws the [`MonthGrid`]s returned
//! by [`CalendarState::render`]. Selections are persisted as ISO 8601 strings
//! (see [`iso`]).
//!
//! # Selection modes
//!
//! - [`CalendarMode::Single`]: a click selects one day.
//! - [`CalendarMode::Range`]: a first click anchors a range, a second click
//!   completes it. Days of neighbouring months are hidden.
//! - [`CalendarMode::Week`]: a click selects the week around the day.
//! - [`CalendarMode::Month`]: a click selects the month around the day.
//!
//! # Example
//!
//! ```
//! use calendar_grid::{Action, CalendarArgs, CalendarDate, CalendarMode, CalendarState};
//!
//! let args = CalendarArgs::default()
//!     .mode(CalendarMode::Week)
//!     .value("2024-03-03/2024-03-09");
//! let mut calendar = CalendarState::from_args(&args)?;
//!
//! let grid = &calendar.render()[0];
//! assert_eq!(grid.label(), "March 2024");
//! assert_eq!(grid.cells().len(), 42);
//!
//! let day = CalendarDate::new(2024, 3, 14).unwrap();
//! let changed = calendar.apply(Action::Click(day)).unwrap();
//! assert_eq!(changed.iso(), "2024-03-10/2024-03-16");
//! # Ok::<(), calendar_grid::CalendarError>(())
//! ```

pub mod args;
pub mod date;
pub mod error;
pub mod grid;
pub mod iso;
pub mod selection;
pub mod shared;
pub mod state;

pub use crate::{
    args::CalendarArgs,
    date::{CalendarDate, Weekday, YearMonth},
    error::{CalendarError, IsoFormatError},
    grid::{Cell, MonthGrid, RangeEdge, build_month_grid, weekday_labels},
    selection::{CalendarMode, DateBounds, DateRange, SelectionValue},
    shared::SharedCalendar,
    state::{Action, CalendarState, FocusMove, SelectionChanged, reduce},
};
