// File: crates/whisker-core/src/outlier.rs
// Summary: Outlier classification and proximity clustering for box plots.

use crate::geometry::Point;

/// Cluster merge distance, in multiples of the outlier marker radius.
/// Two markers closer than one diameter would overlap when drawn, so
/// consecutive sorted points within `radius * CLUSTER_RADIUS_FACTOR` of each
/// other collapse into one averaged marker. Tunable.
pub const CLUSTER_RADIUS_FACTOR: f64 = 2.0;

/// A single outlier marker in display space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Outlier {
    pub point: Point,
    pub radius: f64,
}

impl Outlier {
    pub const fn new(point: Point, radius: f64) -> Self {
        Self { point, radius }
    }
}

/// A group of outliers close enough to draw as one averaged marker.
#[derive(Clone, Debug, PartialEq)]
pub struct OutlierCluster {
    members: Vec<Point>,
    radius: f64,
}

impl OutlierCluster {
    fn new(first: &Outlier) -> Self {
        Self {
            members: vec![first.point],
            radius: first.radius,
        }
    }

    fn push(&mut self, outlier: &Outlier) {
        self.members.push(outlier.point);
    }

    /// Arithmetic mean of the member points; the marker drawn for the
    /// cluster.
    pub fn averaged_point(&self) -> Point {
        let n = self.members.len() as f64;
        let (sx, sy) = self
            .members
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Point::new(sx / n, sy / n)
    }

    pub fn members(&self) -> &[Point] {
        &self.members
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Whether this cluster merged more than one source outlier. Multiple
    /// clusters are drawn with the clustered marker shape.
    pub fn is_multiple(&self) -> bool {
        self.members.len() > 1
    }
}

/// Value fences for one box-and-whisker item. Values beyond the regular
/// fences are outliers; values beyond the outlier fences are far out.
/// Supplying sane orderings (`min_regular <= max_regular` and wider outlier
/// fences) is the caller's job; nothing here checks them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fences {
    pub min_regular: f64,
    pub max_regular: f64,
    pub min_outlier: f64,
    pub max_outlier: f64,
}

/// The classified outliers of one item: averaged clusters in display order,
/// plus far-out markers carrying at most one representative point per side.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OutlierCollection {
    clusters: Vec<OutlierCluster>,
    high_far_out: Option<Point>,
    low_far_out: Option<Point>,
}

impl OutlierCollection {
    pub fn clusters(&self) -> &[OutlierCluster] {
        &self.clusters
    }

    /// Representative point of the last value seen beyond the high outlier
    /// fence, if any.
    pub fn high_far_out(&self) -> Option<Point> {
        self.high_far_out
    }

    /// Representative point of the last value seen below the low outlier
    /// fence, if any.
    pub fn low_far_out(&self) -> Option<Point> {
        self.low_far_out
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty() && self.high_far_out.is_none() && self.low_far_out.is_none()
    }
}

/// Classify raw statistical values against `fences` and cluster the regular
/// outliers for display.
///
/// `x` is the item's position on the pairing axis, `radius` the marker
/// radius, and `map_to_display` the caller-supplied mapping from a
/// statistical value to its display coordinate. Values beyond the outlier
/// fences only mark the matching side (the last one seen supplies the
/// representative point); values inside the regular fences are dropped; the
/// rest become markers, sorted by display position with a total order and
/// merged when consecutive points fall within the closeness threshold.
/// Identical inputs always produce identical clusters.
pub fn classify<F>(
    values: &[f64],
    fences: &Fences,
    x: f64,
    radius: f64,
    map_to_display: F,
) -> OutlierCollection
where
    F: Fn(f64) -> f64,
{
    let mut collection = OutlierCollection::default();
    let mut working: Vec<Outlier> = Vec::new();

    for &v in values {
        if v > fences.max_outlier {
            collection.high_far_out = Some(Point::new(x, map_to_display(v)));
        } else if v < fences.min_outlier {
            collection.low_far_out = Some(Point::new(x, map_to_display(v)));
        } else if v > fences.max_regular || v < fences.min_regular {
            working.push(Outlier::new(Point::new(x, map_to_display(v)), radius));
        }
    }

    working.sort_by(|a, b| {
        a.point
            .y
            .total_cmp(&b.point.y)
            .then(a.point.x.total_cmp(&b.point.x))
    });

    let threshold = radius * CLUSTER_RADIUS_FACTOR;
    for (i, outlier) in working.iter().enumerate() {
        let starts_cluster =
            i == 0 || working[i - 1].point.distance_to(outlier.point) >= threshold;
        if starts_cluster {
            collection.clusters.push(OutlierCluster::new(outlier));
        } else if let Some(cluster) = collection.clusters.last_mut() {
            cluster.push(outlier);
        }
    }

    collection
}
