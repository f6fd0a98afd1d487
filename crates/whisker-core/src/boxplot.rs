// File: crates/whisker-core/src/boxplot.rs
// Summary: Vertical box-and-whisker item layout drawn onto a Surface.

use crate::geometry::{clip_segment, Point, Rect, Segment};
use crate::outlier::{classify, Fences, OutlierCollection};
use crate::scale::LinearScale;
use crate::surface::{Color, LineStyle, Surface};

/// Statistical summary of one box-and-whisker item. The regular bounds are
/// the whisker extents; the outlier fences separate regular outliers from
/// far-out values.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxWhiskerStats {
    pub mean: Option<f64>,
    pub median: f64,
    pub q1: f64,
    pub q3: f64,
    pub min_regular: f64,
    pub max_regular: f64,
    pub min_outlier: f64,
    pub max_outlier: f64,
    /// Raw statistical values outside the regular bounds, unordered.
    pub outliers: Vec<f64>,
}

impl BoxWhiskerStats {
    pub fn fences(&self) -> Fences {
        Fences {
            min_regular: self.min_regular,
            max_regular: self.max_regular,
            min_outlier: self.min_outlier,
            max_outlier: self.max_outlier,
        }
    }
}

/// Colors and stroke width for one item, passed explicitly into every draw
/// call — the surface never holds pending style state.
#[derive(Clone, Copy, Debug)]
pub struct BoxStyle {
    pub outline: Color,
    /// Box interior; `None` leaves the box unfilled.
    pub fill: Option<Color>,
    /// Paint for artifacts: median line, mean marker, outlier markers.
    pub artifact: Color,
    pub stroke_width: f32,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            outline: Color::from_argb(255, 180, 180, 190),
            fill: Some(Color::from_argb(255, 64, 160, 255)),
            artifact: Color::from_argb(255, 255, 230, 70),
            stroke_width: 1.0,
        }
    }
}

/// Draw one vertical box-and-whisker item at pairing-axis position `x`.
///
/// Whisker and median segments are clipped to `area` before drawing; the
/// mean marker is drawn only when it falls inside the area. Returns the
/// classified outliers so callers can hit-test or annotate them.
pub fn draw_vertical_item(
    surface: &mut dyn Surface,
    area: &Rect,
    scale: &LinearScale,
    stats: &BoxWhiskerStats,
    x: f64,
    width: f64,
    style: &BoxStyle,
) -> OutlierCollection {
    let yy_max = scale.to_px(stats.max_regular);
    let yy_min = scale.to_px(stats.min_regular);
    let yy_median = scale.to_px(stats.median);
    let yy_q1 = scale.to_px(stats.q1);
    let yy_q3 = scale.to_px(stats.q3);

    let outline = LineStyle::new(style.outline, style.stroke_width);
    let artifact = LineStyle::new(style.artifact, style.stroke_width);
    let half = width / 2.0;

    // upper whisker and cap
    stroke_clipped(surface, area, Segment::new(x, yy_max, x, yy_q3), &outline);
    stroke_clipped(
        surface,
        area,
        Segment::new(x - half, yy_max, x + half, yy_max),
        &outline,
    );

    // lower whisker and cap
    stroke_clipped(surface, area, Segment::new(x, yy_min, x, yy_q1), &outline);
    stroke_clipped(
        surface,
        area,
        Segment::new(x - half, yy_min, x + half, yy_min),
        &outline,
    );

    // interquartile box; q1 can map above q3 on screen, so normalize
    let (top, bottom) = if yy_q3 < yy_q1 {
        (yy_q3, yy_q1)
    } else {
        (yy_q1, yy_q3)
    };
    let box_rect = Rect::from_bounds(x - half, top, x + half, bottom);
    if let Some(fill) = style.fill {
        surface.fill_rect(&box_rect, fill);
    }
    surface.draw_rect(&box_rect, &outline);

    // median
    stroke_clipped(
        surface,
        area,
        Segment::new(x - half, yy_median, x + half, yy_median),
        &artifact,
    );

    // mean marker, skipped when it would land outside the area
    let mean_radius = width / 4.0;
    if let Some(mean) = stats.mean {
        let yy_mean = scale.to_px(mean);
        if yy_mean > area.min_y - mean_radius && yy_mean < area.max_y + mean_radius {
            let center = Point::new(x, yy_mean);
            surface.fill_ellipse(center, mean_radius, mean_radius, style.artifact);
            surface.draw_ellipse(center, mean_radius, mean_radius, &artifact);
        }
    }

    let marker_radius = width / 3.0;
    let collection = classify(&stats.outliers, &stats.fences(), x, marker_radius, |v| {
        scale.to_px(v)
    });
    draw_outliers(surface, &collection, width, scale, mean_radius, &artifact);
    collection
}

fn draw_outliers(
    surface: &mut dyn Surface,
    collection: &OutlierCollection,
    width: f64,
    scale: &LinearScale,
    cap_radius: f64,
    style: &LineStyle,
) {
    let half = width / 2.0;
    for cluster in collection.clusters() {
        let p = cluster.averaged_point();
        let r = cluster.radius();
        if cluster.is_multiple() {
            // two dots straddling the item position
            surface.draw_ellipse(Point::new(p.x - half + r, p.y), r, r, style);
            surface.draw_ellipse(Point::new(p.x + half, p.y), r, r, style);
        } else {
            surface.draw_ellipse(p, r, r, style);
        }
    }
    if let Some(p) = collection.high_far_out() {
        let apex_y = scale.to_px(scale.vmax) + cap_radius;
        draw_far_out_marker(surface, p.x, apex_y, cap_radius * 2.0, true, style);
    }
    if let Some(p) = collection.low_far_out() {
        let apex_y = scale.to_px(scale.vmin) - cap_radius;
        draw_far_out_marker(surface, p.x, apex_y, cap_radius * 2.0, false, style);
    }
}

/// Triangle marker pinned at the axis edge, apex pointing off-scale.
fn draw_far_out_marker(
    surface: &mut dyn Surface,
    x: f64,
    apex_y: f64,
    side: f64,
    high: bool,
    style: &LineStyle,
) {
    let base_y = if high { apex_y + side } else { apex_y - side };
    let points = [
        Point::new(x - side, base_y),
        Point::new(x, apex_y),
        Point::new(x + side, base_y),
        Point::new(x - side, base_y),
    ];
    surface.draw_path(&points, style);
}

/// Clip to the data area, then draw. Segments entirely outside the area (or
/// carrying non-finite coordinates) are skipped.
fn stroke_clipped(surface: &mut dyn Surface, area: &Rect, mut segment: Segment, style: &LineStyle) {
    if clip_segment(&mut segment, area) {
        surface.draw_line(&segment, style);
    }
}
