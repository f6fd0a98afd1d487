// File: crates/whisker-core/src/series.rs
// Summary: Append-only interval series with running extremum indices.

use std::rc::Rc;

use crate::error::ChartError;
use crate::event::{SeriesChangeEvent, SeriesListener};
use crate::interval::{IntervalValue, TimeInterval};

/// An ordered collection of interval/value pairs. Items are kept in
/// insertion order (which is also display order) and intervals may overlap.
///
/// The series tracks which item holds the minimum and maximum start, middle
/// and end instants. Growth is append-only, so each extremum needs exactly
/// one comparison per append and is never recomputed by rescanning.
pub struct IntervalSeries {
    name: String,
    data: Vec<IntervalValue>,
    listeners: Vec<Rc<dyn SeriesListener>>,
    min_start: Option<usize>,
    max_start: Option<usize>,
    min_middle: Option<usize>,
    max_middle: Option<usize>,
    min_end: Option<usize>,
    max_end: Option<usize>,
}

impl IntervalSeries {
    /// Create a new, empty series.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: Vec::new(),
            listeners: Vec::new(),
            min_start: None,
            max_start: None,
            min_middle: None,
            max_middle: None,
            min_end: None,
            max_end: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn item_count(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The item at `index`.
    pub fn item(&self, index: usize) -> Result<&IntervalValue, ChartError> {
        self.data.get(index).ok_or(ChartError::IndexOutOfRange {
            index,
            len: self.data.len(),
        })
    }

    /// The time interval of the item at `index`.
    pub fn interval(&self, index: usize) -> Result<TimeInterval, ChartError> {
        self.item(index).map(|iv| iv.interval)
    }

    /// The value of the item at `index` (`None` when the item carries no
    /// value).
    pub fn value(&self, index: usize) -> Result<Option<f64>, ChartError> {
        self.item(index).map(|iv| iv.value)
    }

    /// Append an item to the end of the series and notify listeners.
    ///
    /// Each extremum index is refreshed with a single comparison against the
    /// incumbent; ties keep the earlier item.
    pub fn append(&mut self, item: IntervalValue) {
        self.data.push(item);
        self.update_bounds(self.data.len() - 1);
        self.fire_changed();
    }

    /// Register a listener for change events. Delivery is synchronous and
    /// in insertion order.
    pub fn subscribe(&mut self, listener: Rc<dyn SeriesListener>) {
        self.listeners.push(listener);
    }

    /// Index of the item with the earliest start instant.
    pub fn min_start_index(&self) -> Option<usize> {
        self.min_start
    }

    /// Index of the item with the latest start instant.
    pub fn max_start_index(&self) -> Option<usize> {
        self.max_start
    }

    /// Index of the item with the earliest middle instant.
    pub fn min_middle_index(&self) -> Option<usize> {
        self.min_middle
    }

    /// Index of the item with the latest middle instant.
    pub fn max_middle_index(&self) -> Option<usize> {
        self.max_middle
    }

    /// Index of the item with the earliest end instant.
    pub fn min_end_index(&self) -> Option<usize> {
        self.min_end
    }

    /// Index of the item with the latest end instant.
    pub fn max_end_index(&self) -> Option<usize> {
        self.max_end
    }

    fn update_bounds(&mut self, index: usize) {
        let data = &self.data;
        let interval = data[index].interval;

        let start_of = |i: usize| data[i].interval.start;
        let middle_of = |i: usize| data[i].interval.middle();
        let end_of = |i: usize| data[i].interval.end;

        let min_start = lower_index(self.min_start, interval.start, index, start_of);
        let max_start = upper_index(self.max_start, interval.start, index, start_of);
        let min_middle = lower_index(self.min_middle, interval.middle(), index, middle_of);
        let max_middle = upper_index(self.max_middle, interval.middle(), index, middle_of);
        let min_end = lower_index(self.min_end, interval.end, index, end_of);
        let max_end = upper_index(self.max_end, interval.end, index, end_of);

        self.min_start = min_start;
        self.max_start = max_start;
        self.min_middle = min_middle;
        self.max_middle = max_middle;
        self.min_end = min_end;
        self.max_end = max_end;
    }

    fn fire_changed(&self) {
        let event = SeriesChangeEvent {
            item_count: self.data.len(),
        };
        for listener in &self.listeners {
            listener.series_changed(&event);
        }
    }
}

/// Pick the index holding the smaller value; the incumbent wins ties.
fn lower_index(
    current: Option<usize>,
    value: i64,
    index: usize,
    value_at: impl Fn(usize) -> i64,
) -> Option<usize> {
    match current {
        Some(i) if value_at(i) <= value => Some(i),
        _ => Some(index),
    }
}

/// Pick the index holding the larger value; the incumbent wins ties.
fn upper_index(
    current: Option<usize>,
    value: i64,
    index: usize,
    value_at: impl Fn(usize) -> i64,
) -> Option<usize> {
    match current {
        Some(i) if value_at(i) >= value => Some(i),
        _ => Some(index),
    }
}
