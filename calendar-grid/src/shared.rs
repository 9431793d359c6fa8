//! Shared calendar handle.
//!
//! Hosts that deliver events from more than one thread can wrap a calendar in
//! a [`SharedCalendar`]. Each action is applied under one write lock, so
//! readers observe either the state before an interaction or the state after
//! it, never a value updated without its anchor.
use std::sync::Arc;

use parking_lot::RwLock;

use crate::{
    grid::MonthGrid,
    selection::SelectionValue,
    state::{Action, CalendarState, SelectionChanged},
};

/// Cloneable handle to one calendar's state.
#[derive(Debug, Clone)]
pub struct SharedCalendar {
    inner: Arc<RwLock<CalendarState>>,
}

impl SharedCalendar {
    /// Wraps `state`.
    pub fn new(state: CalendarState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    /// Applies `action` atomically and returns the notification it emits.
    pub fn dispatch(&self, action: Action) -> Option<SelectionChanged> {
        self.inner.write().apply(action)
    }

    /// Execute a closure with a shared reference to the state.
    pub fn with<R>(&self, f: impl FnOnce(&CalendarState) -> R) -> R {
        let guard = self.inner.read();
        f(&guard)
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> CalendarState {
        self.with(Clone::clone)
    }

    /// Current persisted value.
    pub fn value(&self) -> SelectionValue {
        self.with(CalendarState::value)
    }

    /// Renders the current state.
    pub fn render(&self) -> Vec<MonthGrid> {
        self.with(CalendarState::render)
    }
}

impl From<CalendarState> for SharedCalendar {
    fn from(state: CalendarState) -> Self {
        Self::new(state)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::{
        date::{CalendarDate, Weekday},
        selection::{CalendarMode, DateBounds},
    };

    fn date(year: i32, month: u8, day: u8) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    #[test]
    fn clones_share_state() {
        let shared = SharedCalendar::new(CalendarState::new(
            CalendarMode::Single,
            SelectionValue::Single(date(2024, 3, 1)),
            DateBounds::UNBOUNDED,
            Weekday::Sunday,
        ));
        let other = shared.clone();
        other.dispatch(Action::Click(date(2024, 3, 9)));
        assert_eq!(shared.value(), SelectionValue::Single(date(2024, 3, 9)));
        assert_eq!(shared.render().len(), 1);
    }

    #[test]
    fn concurrent_range_clicks_keep_value_and_anchor_consistent() {
        let shared = SharedCalendar::new(CalendarState::new(
            CalendarMode::Range,
            SelectionValue::range(date(2024, 3, 1), date(2024, 3, 1)),
            DateBounds::UNBOUNDED,
            Weekday::Sunday,
        ));

        let handles: Vec<_> = (1..=8u8)
            .map(|day| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        shared.dispatch(Action::Click(date(2024, 3, day)));
                        shared.with(|state| {
                            let range = state.value().as_range().unwrap();
                            assert!(range.start() <= range.end());
                            if let Some(anchor) = state.anchor() {
                                assert_eq!(range.start(), anchor);
                                assert_eq!(range.end(), anchor);
                            }
                        });
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // 400 clicks in total: every gesture was completed.
        assert!(!shared.snapshot().is_selecting());
    }
}
