//! Month grid construction.
//!
//! A month is always laid out as six weeks of seven days starting on the
//! configured first day of the week, so the grid keeps its shape from month to
//! month. Days of the neighbouring months fill the leading and trailing slots.
use crate::{
    date::{
        CalendarDate, DAYS_PER_WEEK, MAX_YEAR, MIN_YEAR, Weekday, YearMonth, weekday_sequence,
    },
    selection::{CalendarMode, DateBounds, DateRange, SelectionValue},
};

/// Number of week rows in a month grid.
pub const GRID_ROWS: usize = 6;
/// Number of cells in a month grid.
pub const GRID_CELLS: usize = GRID_ROWS * DAYS_PER_WEEK;

/// Earliest month whose whole grid lies within the supported date range.
pub const FIRST_GRID_MONTH: YearMonth = YearMonth::new_unchecked(MIN_YEAR, 2);
/// Latest month whose whole grid lies within the supported date range.
pub const LAST_GRID_MONTH: YearMonth = YearMonth::new_unchecked(MAX_YEAR, 11);

/// Which end of the selected range a cell sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeEdge {
    /// First day of the range.
    Start,
    /// Last day of the range.
    End,
    /// The range is a single day.
    Both,
}

/// One day slot of a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// The day shown in this slot.
    pub date: CalendarDate,
    /// Whether the day belongs to the grid's month.
    pub in_current_month: bool,
    /// Whether the slot should be left empty. Only range mode hides the days of
    /// neighbouring months.
    pub hidden: bool,
    /// Whether the day is outside the selectable bounds.
    pub disabled: bool,
    /// Whether the day is an endpoint of the selection.
    pub selected: bool,
    /// Whether the day lies inside the selected span.
    pub in_range: bool,
    /// Whether the day lies inside the hover preview.
    pub hovered: bool,
    /// Endpoint marker for range mode.
    pub edge: Option<RangeEdge>,
}

/// A six-week view of one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    month: YearMonth,
    first_day_of_week: Weekday,
    cells: [Cell; GRID_CELLS],
}

impl MonthGrid {
    /// The month this grid shows.
    pub fn month(&self) -> YearMonth {
        self.month
    }

    /// The weekday of the first column.
    pub fn first_day_of_week(&self) -> Weekday {
        self.first_day_of_week
    }

    /// All 42 cells in display order.
    pub fn cells(&self) -> &[Cell; GRID_CELLS] {
        &self.cells
    }

    /// The cell showing `date`, if the date is on this grid.
    pub fn cell(&self, date: CalendarDate) -> Option<&Cell> {
        let offset = self.cells[0].date.days_until(date);
        usize::try_from(offset)
            .ok()
            .and_then(|index| self.cells.get(index))
    }

    /// All six week rows, hidden ones included.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    /// Week rows that have at least one visible cell.
    pub fn visible_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows()
            .filter(|week| week.iter().any(|cell| !cell.hidden))
    }

    /// Header label such as `"March 2024"`.
    pub fn label(&self) -> String {
        format!("{} {}", self.month.month_name(), self.month.year())
    }

    /// Marks the visible cells inside `preview` as hovered.
    pub fn with_hover(mut self, preview: Option<DateRange>) -> Self {
        for cell in &mut self.cells {
            cell.hovered = preview.is_some_and(|range| !cell.hidden && range.contains(cell.date));
        }
        self
    }
}

/// Narrow weekday labels for the grid header, starting at `first_day_of_week`.
pub fn weekday_labels(first_day_of_week: Weekday) -> [&'static str; DAYS_PER_WEEK] {
    weekday_sequence(first_day_of_week).map(Weekday::narrow_label)
}

/// Date shown in the top-left cell of the grid for `month`.
pub fn grid_start(month: YearMonth, first_day_of_week: Weekday) -> CalendarDate {
    let first = month.first_day();
    let offset = first.weekday().days_since(first_day_of_week);
    first.add_days(-(offset as i64))
}

/// Builds the 6×7 grid for `month`.
///
/// `month` is clamped into [`FIRST_GRID_MONTH`]..=[`LAST_GRID_MONTH`] so that
/// every cell holds a real date.
///
/// `anchor` is the selecting anchor of the calendar. Week and month modes
/// highlight the span around it rather than the stored value, and fall back to
/// the stored value when no anchor is set.
#[tracing::instrument(level = "trace", skip(value, bounds))]
pub fn build_month_grid(
    month: YearMonth,
    first_day_of_week: Weekday,
    mode: CalendarMode,
    value: &SelectionValue,
    anchor: Option<CalendarDate>,
    bounds: &DateBounds,
) -> MonthGrid {
    let month = month.clamp(FIRST_GRID_MONTH, LAST_GRID_MONTH);
    let start = grid_start(month, first_day_of_week);
    let marks = SelectionMarks::new(mode, value, anchor, first_day_of_week);
    let cells = std::array::from_fn(|index| {
        let date = start.add_days(index as i64);
        let in_current_month = date.year_month() == month;
        let hidden = !in_current_month && mode == CalendarMode::Range;
        let mut cell = Cell {
            date,
            in_current_month,
            hidden,
            disabled: bounds.is_out_of_bounds(date),
            selected: false,
            in_range: false,
            hovered: false,
            edge: None,
        };
        marks.apply(&mut cell);
        cell
    });

    MonthGrid {
        month,
        first_day_of_week,
        cells,
    }
}

/// Which dates a grid marks as selected, for one render pass.
struct SelectionMarks {
    endpoints: SelectionValue,
    span: Option<DateRange>,
    edges: bool,
}

impl SelectionMarks {
    fn new(
        mode: CalendarMode,
        value: &SelectionValue,
        anchor: Option<CalendarDate>,
        first_day_of_week: Weekday,
    ) -> Self {
        let derived = match (mode, anchor) {
            (CalendarMode::Week, Some(anchor)) => {
                SelectionValue::Range(DateRange::week_of(anchor, first_day_of_week))
            }
            (CalendarMode::Month, Some(anchor)) => SelectionValue::Range(DateRange::month_of(anchor)),
            _ => *value,
        };
        Self {
            endpoints: derived,
            span: if mode == CalendarMode::Single {
                None
            } else {
                derived.as_range()
            },
            edges: mode == CalendarMode::Range,
        }
    }

    fn apply(&self, cell: &mut Cell) {
        let date = cell.date;
        cell.selected = match self.endpoints {
            SelectionValue::Single(selected) => date == selected,
            SelectionValue::Range(range) => range.is_endpoint(date),
        };
        cell.in_range = !cell.hidden && self.span.is_some_and(|span| span.contains(date));
        if self.edges
            && let SelectionValue::Range(range) = self.endpoints
        {
            cell.edge = match (date == range.start(), date == range.end()) {
                (true, true) => Some(RangeEdge::Both),
                (true, false) => Some(RangeEdge::Start),
                (false, true) => Some(RangeEdge::End),
                (false, false) => None,
            };
        }
    }
}
