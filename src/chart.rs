use std::collections::BTreeMap;

use eframe::egui::Color32;

use crate::color::CategoryColors;
use crate::data::model::{Catalog, Planet, StarSize, Status};

/// Marker radius (points) when no size column is mapped.
pub const DEFAULT_MARKER_RADIUS: f32 = 3.0;
/// Radius given to the largest value of a size column.
pub const MAX_MARKER_RADIUS: f32 = 12.0;
/// Floor so tiny planets remain visible.
pub const MIN_MARKER_RADIUS: f32 = 1.5;
/// Marker radii are drawn in steps of this many points.
pub const MARKER_RADIUS_STEP: f32 = 0.5;

// ---------------------------------------------------------------------------
// Chart description
// ---------------------------------------------------------------------------

/// A renderer-independent scatter plot: what to draw, not how.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChart {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    /// Column whose categories split the series (legend title).
    pub color_by: &'static str,
    /// Column mapped to marker area, if any.
    pub size_by: Option<&'static str>,
    pub series: Vec<ScatterSeries>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub name: String,
    pub color: Color32,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub radius: f32,
    /// Catalogue row the point was drawn from.
    pub row: usize,
}

impl ScatterChart {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

impl ScatterSeries {
    /// Positions grouped by marker radius rounded to `MARKER_RADIUS_STEP`,
    /// smallest radius first. One plot item per group instead of per point.
    pub fn by_radius(&self) -> Vec<(f32, Vec<[f64; 2]>)> {
        let mut groups: BTreeMap<u32, Vec<[f64; 2]>> = BTreeMap::new();
        for p in &self.points {
            let step = (p.radius / MARKER_RADIUS_STEP).round().max(0.0) as u32;
            groups.entry(step).or_default().push([p.x, p.y]);
        }
        groups
            .into_iter()
            .map(|(step, points)| (step as f32 * MARKER_RADIUS_STEP, points))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// Planet temperature against distance from the star, coloured by star size.
pub fn distance_temperature(catalog: &Catalog, indices: &[usize]) -> ScatterChart {
    let colors = CategoryColors::new(&StarSize::ALL);
    let series = StarSize::ALL
        .iter()
        .map(|&size| {
            build_series(
                size.label(),
                colors.color_for(size),
                catalog,
                indices,
                |p| p.features.star_size == size,
                |p| (p.record.tplanet, p.record.a, DEFAULT_MARKER_RADIUS),
            )
        })
        .filter(|s| !s.points.is_empty())
        .collect();

    ScatterChart {
        title: "Planet Temperature-Distance from the Star",
        x_label: "TPLANET",
        y_label: "A",
        color_by: "StarSize",
        size_by: None,
        series,
    }
}

/// Position on the celestial sphere, sized by planet radius and coloured by
/// status.
pub fn celestial(catalog: &Catalog, indices: &[usize]) -> ScatterChart {
    let largest = indices
        .iter()
        .filter_map(|&i| catalog.get(i))
        .map(|p| p.record.rplanet)
        .filter(|v| v.is_finite() && *v > 0.0)
        .fold(0.0_f64, f64::max);

    let colors = CategoryColors::new(&Status::ALL);
    let series = Status::ALL
        .iter()
        .map(|&status| {
            build_series(
                status.label(),
                colors.color_for(status),
                catalog,
                indices,
                |p| p.features.status == status,
                |p| (p.record.ra, p.record.dec, area_radius(p.record.rplanet, largest)),
            )
        })
        .filter(|s| !s.points.is_empty())
        .collect();

    ScatterChart {
        title: "Position on the Celestial Sphere",
        x_label: "RA",
        y_label: "DEC",
        color_by: "status",
        size_by: Some("RPLANET"),
        series,
    }
}

/// Marker radius with area proportional to `value / largest`.
fn area_radius(value: f64, largest: f64) -> f32 {
    if !(value.is_finite() && value > 0.0 && largest > 0.0) {
        return MIN_MARKER_RADIUS;
    }
    let r = MAX_MARKER_RADIUS * (value / largest).sqrt() as f32;
    r.max(MIN_MARKER_RADIUS)
}

fn build_series(
    name: &str,
    color: Color32,
    catalog: &Catalog,
    indices: &[usize],
    belongs: impl Fn(&Planet) -> bool,
    project: impl Fn(&Planet) -> (f64, f64, f32),
) -> ScatterSeries {
    let points = indices
        .iter()
        .filter_map(|&row| catalog.get(row).map(|p| (row, p)))
        .filter(|(_, p)| belongs(p))
        .map(|(row, p)| {
            let (x, y, radius) = project(p);
            ScatterPoint { x, y, radius, row }
        })
        .filter(|pt| pt.x.is_finite() && pt.y.is_finite())
        .collect();

    ScatterSeries {
        name: name.to_string(),
        color,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn catalog() -> Catalog {
        let mut far = Record::sample(1.0, 1.0, 300.0);
        far.a = 1.2;
        far.ra = 291.0;
        far.dec = 47.0;
        let mut big = Record::sample(4.0, 0.5, 600.0);
        big.ra = 295.0;
        let mut no_axis = Record::sample(1.5, 2.0, f64::NAN);
        no_axis.ra = f64::NAN;
        Catalog::from_records(vec![far, big, no_axis], "test")
    }

    #[test]
    fn test_distance_temperature_groups_by_star_size() {
        let cat = catalog();
        let chart = distance_temperature(&cat, &[0, 1, 2]);
        assert_eq!((chart.x_label, chart.y_label), ("TPLANET", "A"));
        let names: Vec<&str> = chart.series.iter().map(|s| s.name.as_str()).collect();
        // row 2 has no temperature and is dropped, leaving its series empty
        assert_eq!(names, ["small", "similar"]);
        let similar = &chart.series[1];
        assert_eq!(similar.points.len(), 1);
        assert_eq!(similar.points[0].row, 0);
        assert_eq!((similar.points[0].x, similar.points[0].y), (300.0, 1.2));
        assert_eq!(similar.points[0].radius, DEFAULT_MARKER_RADIUS);
    }

    #[test]
    fn test_celestial_sizes_by_radius() {
        let cat = catalog();
        let chart = celestial(&cat, &[0, 1, 2]);
        assert_eq!(chart.size_by, Some("RPLANET"));
        assert_eq!(chart.point_count(), 2);

        let promising = chart.series.iter().find(|s| s.name == "promising").unwrap();
        let extreme = chart.series.iter().find(|s| s.name == "extreme").unwrap();
        assert_eq!(promising.points[0].radius, MAX_MARKER_RADIUS / 2.0);
        assert_eq!(extreme.points[0].radius, MAX_MARKER_RADIUS);
        assert_eq!(extreme.points[0].x, 295.0);
    }

    #[test]
    fn test_empty_subset_gives_empty_chart() {
        let cat = catalog();
        assert_eq!(distance_temperature(&cat, &[]).point_count(), 0);
        assert!(celestial(&cat, &[]).series.is_empty());
    }

    #[test]
    fn test_colors_stable_across_subsets() {
        let cat = catalog();
        let all = celestial(&cat, &[0, 1]);
        let one = celestial(&cat, &[1]);
        let color = |c: &ScatterChart| c.series.iter().find(|s| s.name == "extreme").unwrap().color;
        assert_eq!(color(&all), color(&one));
    }

    #[test]
    fn test_area_radius_floor() {
        assert_eq!(area_radius(0.0001, 100.0), MIN_MARKER_RADIUS);
        assert_eq!(area_radius(f64::NAN, 1.0), MIN_MARKER_RADIUS);
    }

    #[test]
    fn test_by_radius_groups_similar_markers() {
        let point = |radius: f32, row: usize| ScatterPoint {
            x: row as f64,
            y: 0.0,
            radius,
            row,
        };
        let series = ScatterSeries {
            name: "promising".into(),
            color: Color32::GRAY,
            points: vec![point(3.1, 0), point(12.0, 1), point(2.9, 2), point(3.4, 3)],
        };

        let groups = series.by_radius();
        let radii: Vec<f32> = groups.iter().map(|(r, _)| *r).collect();
        assert_eq!(radii, [3.0, 3.5, 12.0]);
        assert_eq!(groups[0].1, vec![[0.0, 0.0], [2.0, 0.0]]);
        assert_eq!(groups[2].1, vec![[1.0, 0.0]]);
        let total: usize = groups.iter().map(|(_, pts)| pts.len()).sum();
        assert_eq!(total, series.points.len());
    }
}
