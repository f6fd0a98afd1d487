// File: crates/whisker-core/tests/bounds.rs
// Purpose: Validate running extremum indices over append-only growth.

use std::cell::RefCell;
use std::rc::Rc;

use whisker_core::{
    ChartError, IntervalSeries, IntervalValue, SeriesChangeEvent, SeriesListener, TimeInterval,
};

fn item(start: i64, end: i64, value: f64) -> IntervalValue {
    IntervalValue::new(TimeInterval::new(start, end).unwrap(), Some(value))
}

/// Brute-force check: every extremum index must beat (or tie) every other
/// position in its tracked dimension.
fn assert_bound_invariants(series: &IntervalSeries) {
    let n = series.item_count();
    let starts: Vec<i64> = (0..n).map(|i| series.interval(i).unwrap().start).collect();
    let middles: Vec<i64> = (0..n)
        .map(|i| series.interval(i).unwrap().middle())
        .collect();
    let ends: Vec<i64> = (0..n).map(|i| series.interval(i).unwrap().end).collect();

    let extremum = |idx: Option<usize>| idx.expect("index set for non-empty series");
    assert_eq!(
        starts[extremum(series.min_start_index())],
        *starts.iter().min().unwrap()
    );
    assert_eq!(
        starts[extremum(series.max_start_index())],
        *starts.iter().max().unwrap()
    );
    assert_eq!(
        middles[extremum(series.min_middle_index())],
        *middles.iter().min().unwrap()
    );
    assert_eq!(
        middles[extremum(series.max_middle_index())],
        *middles.iter().max().unwrap()
    );
    assert_eq!(
        ends[extremum(series.min_end_index())],
        *ends.iter().min().unwrap()
    );
    assert_eq!(
        ends[extremum(series.max_end_index())],
        *ends.iter().max().unwrap()
    );
}

#[test]
fn empty_series_has_no_bound_indices() {
    let series = IntervalSeries::new("empty");
    assert_eq!(series.item_count(), 0);
    assert!(series.is_empty());
    assert_eq!(series.min_start_index(), None);
    assert_eq!(series.max_start_index(), None);
    assert_eq!(series.min_middle_index(), None);
    assert_eq!(series.max_middle_index(), None);
    assert_eq!(series.min_end_index(), None);
    assert_eq!(series.max_end_index(), None);
}

#[test]
fn indices_track_extrema_after_every_append() {
    // overlapping, out-of-order spans
    let spans = [
        (10, 20),
        (0, 40),
        (15, 16),
        (-5, 100),
        (15, 35),
        (0, 40),
        (7, 7),
        (-5, -5),
        (90, 120),
    ];
    let mut series = IntervalSeries::new("mixed");
    for (k, &(s, e)) in spans.iter().enumerate() {
        series.append(item(s, e, k as f64));
        assert_bound_invariants(&series);
    }
    assert_eq!(series.item_count(), spans.len());
}

#[test]
fn increasing_starts_keep_max_start_at_last_index() {
    let mut series = IntervalSeries::new("ascending");
    for k in 0..50i64 {
        series.append(item(k * 10, k * 10 + 5, k as f64));
        assert_eq!(series.max_start_index(), Some(series.item_count() - 1));
        assert_eq!(series.min_start_index(), Some(0));
    }
}

#[test]
fn ties_keep_the_earliest_item() {
    let mut series = IntervalSeries::new("ties");
    series.append(item(5, 15, 1.0));
    series.append(item(5, 15, 2.0));
    series.append(item(5, 15, 3.0));
    assert_eq!(series.min_start_index(), Some(0));
    assert_eq!(series.max_start_index(), Some(0));
    assert_eq!(series.min_middle_index(), Some(0));
    assert_eq!(series.max_middle_index(), Some(0));
    assert_eq!(series.min_end_index(), Some(0));
    assert_eq!(series.max_end_index(), Some(0));
}

#[test]
fn accessors_return_interval_and_value() {
    let mut series = IntervalSeries::new("accessors");
    series.append(item(100, 200, 42.0));
    series.append(IntervalValue::new(TimeInterval::new(300, 400).unwrap(), None));

    assert_eq!(series.interval(0).unwrap(), TimeInterval::new(100, 200).unwrap());
    assert_eq!(series.value(0).unwrap(), Some(42.0));
    assert_eq!(series.value(1).unwrap(), None);
    assert_eq!(series.item(1).unwrap().interval.start, 300);
}

#[test]
fn out_of_range_access_fails() {
    let mut series = IntervalSeries::new("range");
    series.append(item(0, 10, 1.0));
    let err = series.item(1).unwrap_err();
    assert_eq!(err, ChartError::IndexOutOfRange { index: 1, len: 1 });
    assert!(series.interval(7).is_err());
    assert!(series.value(7).is_err());
}

#[test]
fn reversed_interval_is_rejected() {
    let err = TimeInterval::new(10, 5).unwrap_err();
    assert!(matches!(err, ChartError::InvalidArgument { name: "interval", .. }));
}

#[test]
fn middle_floors_toward_start() {
    assert_eq!(TimeInterval::new(0, 3).unwrap().middle(), 1);
    assert_eq!(TimeInterval::new(0, 4).unwrap().middle(), 2);
    assert_eq!(TimeInterval::new(-3, 0).unwrap().middle(), -2);
    assert_eq!(TimeInterval::new(7, 7).unwrap().middle(), 7);
}

struct CountingListener {
    events: RefCell<Vec<SeriesChangeEvent>>,
}

impl SeriesListener for CountingListener {
    fn series_changed(&self, event: &SeriesChangeEvent) {
        self.events.borrow_mut().push(*event);
    }
}

#[test]
fn listeners_hear_one_event_per_append() {
    let listener = Rc::new(CountingListener {
        events: RefCell::new(Vec::new()),
    });
    let mut series = IntervalSeries::new("observed");
    series.subscribe(listener.clone());

    series.append(item(0, 10, 1.0));
    series.append(item(10, 20, 2.0));
    series.append(item(20, 30, 3.0));

    let events = listener.events.borrow();
    assert_eq!(events.len(), 3);
    // events report the post-append count
    assert_eq!(events[0], SeriesChangeEvent { item_count: 1 });
    assert_eq!(events[2], SeriesChangeEvent { item_count: 3 });
}
