//! Selection state machine.
//!
//! A calendar is an explicit [`CalendarState`] value. Every user or host
//! interaction is an [`Action`]; [`reduce`] computes the complete next state in
//! one step so the selected value and the selecting anchor can never be
//! observed half updated. [`CalendarState::render`] turns a state into grids.
//!
//! ```
//! use calendar_grid::{Action, CalendarDate, CalendarMode, CalendarState, DateBounds, Weekday};
//!
//! let d = |day| CalendarDate::new(2024, 3, day).unwrap();
//! let mut state = CalendarState::new(
//!     CalendarMode::Range,
//!     calendar_grid::SelectionValue::range(d(1), d(1)),
//!     DateBounds::UNBOUNDED,
//!     Weekday::Sunday,
//! );
//!
//! assert!(state.apply(Action::Click(d(20))).is_none());
//! let changed = state.apply(Action::Click(d(12))).unwrap();
//! assert_eq!(changed.iso(), "2024-03-12/2024-03-20");
//! ```
use tracing::{debug, warn};

use crate::{
    args::CalendarArgs,
    date::{CalendarDate, Weekday, YearMonth},
    error::CalendarError,
    grid::{FIRST_GRID_MONTH, LAST_GRID_MONTH, MonthGrid, build_month_grid},
    selection::{CalendarMode, DateBounds, DateRange, SelectionValue},
};

/// Day of the month the focus lands on when paging with the header buttons.
const HEADER_NAVIGATION_DAY: u8 = 15;

/// Most months a calendar renders at once.
pub const MAX_MONTHS: usize = 12;

/// Keyboard focus movements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusMove {
    /// One day back.
    Left,
    /// One day forward.
    Right,
    /// One week back.
    Up,
    /// One week forward.
    Down,
    /// One month forward.
    PageUp,
    /// One month back.
    PageDown,
}

impl FocusMove {
    /// The date this movement lands on from `from`.
    pub fn apply(self, from: CalendarDate) -> CalendarDate {
        match self {
            FocusMove::Left => from.add_days(-1),
            FocusMove::Right => from.add_days(1),
            FocusMove::Up => from.add_days(-7),
            FocusMove::Down => from.add_days(7),
            FocusMove::PageUp => from.add_months(1),
            FocusMove::PageDown => from.add_months(-1),
        }
    }
}

/// An interaction applied to a calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// A date was clicked.
    Click(CalendarDate),
    /// The pointer entered a date.
    Hover(CalendarDate),
    /// The pointer left the grid.
    HoverEnd,
    /// The keyboard focus moved.
    MoveFocus(FocusMove),
    /// The activation key was pressed on the focused date.
    Activate,
    /// The host replaced the value.
    SetValue(SelectionValue),
    /// The host asked to show the month of a date.
    ResetView(CalendarDate),
    /// Header "next" button.
    ShowNextMonth,
    /// Header "previous" button.
    ShowPreviousMonth,
}

/// Notification emitted when the persisted value changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChanged {
    /// The new value.
    pub value: SelectionValue,
}

impl SelectionChanged {
    /// The new value in its persisted ISO form.
    pub fn iso(&self) -> String {
        self.value.to_string()
    }
}

/// Complete state of one calendar instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
    mode: CalendarMode,
    value: SelectionValue,
    anchor: Option<CalendarDate>,
    focus: CalendarDate,
    hover: Option<CalendarDate>,
    bounds: DateBounds,
    first_day_of_week: Weekday,
    number_of_months: usize,
}

impl CalendarState {
    /// Creates a calendar holding `value`, focused on its first day.
    ///
    /// Week and month modes anchor on the first day of the value.
    pub fn new(
        mode: CalendarMode,
        value: SelectionValue,
        bounds: DateBounds,
        first_day_of_week: Weekday,
    ) -> Self {
        let anchor = match mode {
            CalendarMode::Week | CalendarMode::Month => Some(value.start()),
            CalendarMode::Single | CalendarMode::Range => None,
        };
        Self {
            mode,
            value,
            anchor,
            focus: value.start(),
            hover: None,
            bounds,
            first_day_of_week,
            number_of_months: 1,
        }
    }

    /// Builds a calendar from configuration, using the current UTC date for an
    /// empty value.
    pub fn from_args(args: &CalendarArgs) -> Result<Self, CalendarError> {
        Self::from_args_at(args, CalendarDate::today())
    }

    /// Builds a calendar from configuration with an explicit "today".
    pub fn from_args_at(args: &CalendarArgs, today: CalendarDate) -> Result<Self, CalendarError> {
        let value = args.selection(today)?;
        let bounds = args.bounds()?;
        Ok(Self::new(args.mode, value, bounds, args.first_day_of_week)
            .with_number_of_months(args.number_of_months))
    }

    /// Like [`CalendarState::from_args`], but replaces invalid configuration
    /// with defaults instead of failing.
    pub fn from_args_or_default(args: &CalendarArgs) -> Self {
        Self::from_args_or_default_at(args, CalendarDate::today())
    }

    /// Like [`CalendarState::from_args_at`], but replaces an invalid value
    /// with today's default and invalid bounds with no bounds.
    pub fn from_args_or_default_at(args: &CalendarArgs, today: CalendarDate) -> Self {
        let value = args.selection(today).unwrap_or_else(|err| {
            warn!(%err, "falling back to today for calendar value");
            SelectionValue::default_for(args.mode, today, args.first_day_of_week)
        });
        let bounds = args.bounds().unwrap_or_else(|err| {
            warn!(%err, "ignoring calendar bounds");
            DateBounds::UNBOUNDED
        });
        Self::new(args.mode, value, bounds, args.first_day_of_week)
            .with_number_of_months(args.number_of_months)
    }

    /// Sets how many consecutive months [`CalendarState::render`] produces,
    /// between 1 and [`MAX_MONTHS`].
    pub fn with_number_of_months(mut self, number_of_months: usize) -> Self {
        self.number_of_months = number_of_months.clamp(1, MAX_MONTHS);
        self
    }

    /// Selection mode.
    pub fn mode(&self) -> CalendarMode {
        self.mode
    }

    /// Persisted value.
    pub fn value(&self) -> SelectionValue {
        self.value
    }

    /// Persisted value in ISO form.
    pub fn iso_value(&self) -> String {
        self.value.to_string()
    }

    /// Selecting anchor, see [`CalendarMode`] for its meaning per mode.
    pub fn anchor(&self) -> Option<CalendarDate> {
        self.anchor
    }

    /// Keyboard focus date. Its month is the first month displayed.
    pub fn focus(&self) -> CalendarDate {
        self.focus
    }

    /// Date under the pointer, if any.
    pub fn hover(&self) -> Option<CalendarDate> {
        self.hover
    }

    /// Selectable bounds.
    pub fn bounds(&self) -> DateBounds {
        self.bounds
    }

    /// First column of the grid.
    pub fn first_day_of_week(&self) -> Weekday {
        self.first_day_of_week
    }

    /// Number of months rendered.
    pub fn number_of_months(&self) -> usize {
        self.number_of_months
    }

    /// The first month displayed.
    pub fn displayed_month(&self) -> YearMonth {
        self.focus.year_month()
    }

    /// Whether a two-click range gesture is in progress.
    pub fn is_selecting(&self) -> bool {
        self.mode == CalendarMode::Range && self.anchor.is_some()
    }

    /// The transient hover preview span.
    pub fn preview_range(&self) -> Option<DateRange> {
        let hover = self.hover?;
        match self.mode {
            CalendarMode::Single => None,
            CalendarMode::Range => self.anchor.map(|anchor| DateRange::new(anchor, hover)),
            CalendarMode::Week => Some(DateRange::week_of(hover, self.first_day_of_week)),
            CalendarMode::Month => Some(DateRange::month_of(hover)),
        }
    }

    /// Builds one grid per displayed month, hover preview applied.
    ///
    /// Near the end of the supported range the months shift back so that
    /// every grid shows a distinct month.
    pub fn render(&self) -> Vec<MonthGrid> {
        let latest_first = LAST_GRID_MONTH.add_months(1 - self.number_of_months as i32);
        let first = self
            .displayed_month()
            .clamp(FIRST_GRID_MONTH, latest_first);
        let preview = self.preview_range();
        (0..self.number_of_months)
            .map(|offset| {
                build_month_grid(
                    first.add_months(offset as i32),
                    self.first_day_of_week,
                    self.mode,
                    &self.value,
                    self.anchor,
                    &self.bounds,
                )
                .with_hover(preview)
            })
            .collect()
    }

    /// Applies `action` in place and returns the notification it emits.
    pub fn apply(&mut self, action: Action) -> Option<SelectionChanged> {
        let (next, changed) = reduce(self, action);
        *self = next;
        changed
    }

    fn step(&mut self, action: Action) -> Option<SelectionChanged> {
        match action {
            Action::Click(date) => self.interact(date),
            Action::Activate => self.interact(self.focus),
            Action::Hover(date) => {
                self.hover = Some(date);
                None
            }
            Action::HoverEnd => {
                self.hover = None;
                None
            }
            Action::MoveFocus(movement) => {
                self.focus = movement.apply(self.focus);
                self.hover = self.tracks_focus().then_some(self.focus);
                None
            }
            Action::SetValue(value) => self.set_value(value),
            Action::ResetView(date) => {
                self.focus = date;
                self.hover = None;
                None
            }
            Action::ShowNextMonth => {
                self.page_header(1);
                None
            }
            Action::ShowPreviousMonth => {
                self.page_header(-1);
                None
            }
        }
    }

    fn interact(&mut self, date: CalendarDate) -> Option<SelectionChanged> {
        if self.bounds.is_out_of_bounds(date) {
            debug!(%date, mode = %self.mode, "ignoring interaction outside bounds");
            return None;
        }
        self.hover = None;
        match self.mode {
            CalendarMode::Single => {
                self.focus = date;
                self.commit(SelectionValue::Single(date))
            }
            CalendarMode::Range => match self.anchor {
                None => {
                    self.anchor = Some(date);
                    self.value = SelectionValue::Range(DateRange::day(date));
                    debug!(%date, "range selection started");
                    None
                }
                Some(anchor) => {
                    self.anchor = None;
                    self.focus = date;
                    self.commit(SelectionValue::range(anchor, date))
                }
            },
            CalendarMode::Week => {
                self.anchor = Some(date);
                self.focus = date;
                self.commit(SelectionValue::Range(DateRange::week_of(
                    date,
                    self.first_day_of_week,
                )))
            }
            CalendarMode::Month => {
                self.anchor = Some(date);
                self.focus = date;
                self.commit(SelectionValue::Range(DateRange::month_of(date)))
            }
        }
    }

    fn set_value(&mut self, value: SelectionValue) -> Option<SelectionChanged> {
        if !value.matches_mode(self.mode) {
            warn!(%value, mode = %self.mode, "ignoring value that does not match the calendar mode");
            return None;
        }
        self.anchor = match self.mode {
            CalendarMode::Week | CalendarMode::Month => Some(value.start()),
            CalendarMode::Single | CalendarMode::Range => None,
        };
        self.focus = value.start();
        self.hover = None;
        self.commit(value)
    }

    fn commit(&mut self, value: SelectionValue) -> Option<SelectionChanged> {
        self.value = value;
        debug!(%value, mode = %self.mode, "calendar value changed");
        Some(SelectionChanged { value })
    }

    fn page_header(&mut self, delta: i32) {
        self.focus = self
            .focus
            .year_month()
            .add_months(delta)
            .clamped_date(HEADER_NAVIGATION_DAY);
        self.hover = None;
    }

    fn tracks_focus(&self) -> bool {
        match self.mode {
            CalendarMode::Single => false,
            CalendarMode::Range => self.anchor.is_some(),
            CalendarMode::Week | CalendarMode::Month => true,
        }
    }
}

/// Computes the state that follows `state` after `action`.
///
/// Returns the next state together with the notification to emit, if the
/// persisted value changed. Interactions on out-of-bounds dates return an
/// unchanged state and no notification.
pub fn reduce(state: &CalendarState, action: Action) -> (CalendarState, Option<SelectionChanged>) {
    let mut next = state.clone();
    let changed = next.step(action);
    (next, changed)
}
