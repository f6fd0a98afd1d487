// File: crates/whisker-demo/src/main.rs
// Summary: Demo loads grouped samples, tracks series bounds, renders a box plot PNG.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use whisker_core::{
    draw_vertical_item, BoxStyle, BoxWhiskerStats, Color, IntervalSeries, IntervalValue,
    LinearScale, Rect, SeriesChangeEvent, SeriesListener, TimeInterval,
};
use whisker_render_skia::render_png_file;

struct Sample {
    group: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    value: f64,
}

#[derive(Default)]
struct RedrawCounter {
    fired: Cell<usize>,
}

impl SeriesListener for RedrawCounter {
    fn series_changed(&self, _event: &SeriesChangeEvent) {
        self.fired.set(self.fired.get() + 1);
    }
}

fn main() -> Result<()> {
    let samples = match std::env::args().nth(1) {
        Some(raw) => {
            let path = PathBuf::from(&raw);
            println!("Using input file: {}", path.display());
            load_samples_csv(&path)
                .with_context(|| format!("failed to load CSV '{}'", path.display()))?
        }
        None => {
            println!("No CSV given; using generated samples");
            generate_samples()
        }
    };
    if samples.is_empty() {
        anyhow::bail!("no samples loaded — check headers/delimiter.");
    }

    // Observation windows feed an interval series; the listener stands in
    // for a redraw trigger.
    let counter = Rc::new(RedrawCounter::default());
    let mut series = IntervalSeries::new("observation-windows");
    series.subscribe(counter.clone());
    for s in &samples {
        let interval = TimeInterval::from_datetimes(s.start, s.end)?;
        series.append(IntervalValue::new(interval, Some(s.value)));
    }
    println!(
        "Series '{}': {} items, {} change events",
        series.name(),
        series.item_count(),
        counter.fired.get()
    );
    if let (Some(lo), Some(hi)) = (series.min_start_index(), series.max_end_index()) {
        let first = series.interval(lo)?.start;
        let last = series.interval(hi)?.end;
        println!(
            "Observed span: {} .. {}",
            Utc.timestamp_millis_opt(first).unwrap(),
            Utc.timestamp_millis_opt(last).unwrap()
        );
    }

    // Per-group five-number summaries
    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for s in &samples {
        groups.entry(s.group.clone()).or_default().push(s.value);
    }
    let mut items: Vec<(String, BoxWhiskerStats)> = Vec::new();
    for (name, values) in &groups {
        let stats = box_stats(values)
            .with_context(|| format!("group '{name}' has no samples"))?;
        println!(
            "  {name}: median {:.2}, IQR [{:.2}, {:.2}], {} outlier(s)",
            stats.median,
            stats.q1,
            stats.q3,
            stats.outliers.len()
        );
        items.push((name.clone(), stats));
    }

    let out = PathBuf::from("target/out/boxplot.png");
    render_chart(&out, &items)?;
    println!("Wrote {}", out.display());
    Ok(())
}

fn render_chart(out: &Path, items: &[(String, BoxWhiskerStats)]) -> Result<()> {
    let (width, height) = (1024, 640);
    let area = Rect::from_bounds(72.0, 24.0, f64::from(width) - 24.0, f64::from(height) - 56.0);

    // scale covers every group's full extent with a small margin
    let mut vmin = f64::INFINITY;
    let mut vmax = f64::NEG_INFINITY;
    for (_, stats) in items {
        vmin = vmin.min(stats.min_regular);
        vmax = vmax.max(stats.max_regular);
        for &v in &stats.outliers {
            vmin = vmin.min(v);
            vmax = vmax.max(v);
        }
    }
    let margin = (vmax - vmin) * 0.02;
    let scale = LinearScale::new(area.min_y, area.max_y, vmin - margin, vmax + margin);

    let background = Color::from_argb(255, 18, 18, 20);
    let style = BoxStyle::default();
    let slot = area.width() / items.len() as f64;
    let box_width = (slot * 0.4).min(64.0);

    render_png_file(out, width, height, background, |surface| {
        for (i, (_, stats)) in items.iter().enumerate() {
            let x = area.min_x + slot * (i as f64 + 0.5);
            draw_vertical_item(surface, &area, &scale, stats, x, box_width, &style);
        }
    })
}

/// Five-number summary with Tukey fences: regular bounds are the most
/// extreme samples within 1.5 * IQR of the quartiles, far-out fences sit at
/// 2 * IQR.
fn box_stats(values: &[f64]) -> Option<BoxWhiskerStats> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let q1 = quantile(&sorted, 0.25);
    let median = quantile(&sorted, 0.5);
    let q3 = quantile(&sorted, 0.75);
    let iqr = q3 - q1;
    let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;

    let regular_low = q1 - 1.5 * iqr;
    let regular_high = q3 + 1.5 * iqr;
    let min_regular = sorted
        .iter()
        .copied()
        .find(|v| *v >= regular_low)
        .unwrap_or(q1);
    let max_regular = sorted
        .iter()
        .rev()
        .copied()
        .find(|v| *v <= regular_high)
        .unwrap_or(q3);
    let outliers: Vec<f64> = sorted
        .iter()
        .copied()
        .filter(|v| *v < min_regular || *v > max_regular)
        .collect();

    Some(BoxWhiskerStats {
        mean: Some(mean),
        median,
        q1,
        q3,
        min_regular,
        max_regular,
        min_outlier: q1 - 2.0 * iqr,
        max_outlier: q3 + 2.0 * iqr,
        outliers,
    })
}

/// Interpolated quantile over an already-sorted slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Expected columns: group,start,end,value with RFC 3339 timestamps.
fn load_samples_csv(path: &Path) -> Result<Vec<Sample>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;
    let mut out = Vec::new();
    for record in reader.records() {
        let record = record?;
        let group = record
            .get(0)
            .context("missing 'group' column")?
            .to_string();
        let start = DateTime::parse_from_rfc3339(record.get(1).context("missing 'start' column")?)
            .context("bad 'start' timestamp")?
            .with_timezone(&Utc);
        let end = DateTime::parse_from_rfc3339(record.get(2).context("missing 'end' column")?)
            .context("bad 'end' timestamp")?
            .with_timezone(&Utc);
        let value: f64 = record
            .get(3)
            .context("missing 'value' column")?
            .parse()
            .context("bad 'value' number")?;
        out.push(Sample {
            group,
            start,
            end,
            value,
        });
    }
    Ok(out)
}

/// Deterministic sample set: three groups with different spreads and a few
/// planted outliers, one observation window per hour.
fn generate_samples() -> Vec<Sample> {
    let base = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    let specs: &[(&str, f64, f64)] = &[
        ("control", 50.0, 6.0),
        ("treatment-a", 58.0, 9.0),
        ("treatment-b", 44.0, 4.0),
    ];
    let mut out = Vec::new();
    let mut state = 0x2545f4914f6cdd1du64;
    for (gi, &(name, center, spread)) in specs.iter().enumerate() {
        for k in 0..120usize {
            // xorshift keeps the demo reproducible without a rand dependency
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let unit = (state >> 11) as f64 / (1u64 << 53) as f64;
            let mut value = center + (unit - 0.5) * 2.0 * spread;
            if k % 37 == 0 {
                value += spread * 4.0; // regular outlier
            }
            if k == 77 {
                value += spread * 8.0; // far out
            }
            let start = base + chrono::Duration::hours((gi * 120 + k) as i64);
            let end = start + chrono::Duration::minutes(45);
            out.push(Sample {
                group: name.to_string(),
                start,
                end,
                value,
            });
        }
    }
    out
}
