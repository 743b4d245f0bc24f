//! Structured JSON tour report.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::algorithm::PipelineReport;
use crate::bound::LowerBoundEstimator;
use crate::error::{Error, Result};
use crate::models::{Point, Tour};

/// One point of a report, with its 1-based visiting position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexedPoint {
    pub index: usize,
    pub x: f64,
    pub y: f64,
}

/// A finished tour together with its cost and lower bound.
///
/// # Examples
///
/// ```
/// use u_tsp::io::TourReport;
/// use u_tsp::models::{Point, Tour};
///
/// let tour = Tour::new("square", vec![
///     Point::new(0.0, 0.0),
///     Point::new(1.0, 0.0),
///     Point::new(1.0, 1.0),
///     Point::new(0.0, 1.0),
/// ]);
/// let report = TourReport::from_tour(&tour);
/// assert_eq!(report.dimension, 4);
/// assert!((report.lower_bound.unwrap() - 4.0).abs() < 1e-10);
///
/// let json = report.to_json().unwrap();
/// let back = TourReport::from_json(&json).unwrap().into_tour().unwrap();
/// assert_eq!(back.points(), tour.points());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourReport {
    pub name: String,
    pub dimension: usize,
    #[serde(default)]
    pub lower_bound: Option<f64>,
    pub cost: f64,
    pub points: Vec<IndexedPoint>,
}

impl TourReport {
    /// Builds a report, computing the one-tree lower bound.
    pub fn from_tour(tour: &Tour) -> Self {
        Self::with_lower_bound(tour, Some(LowerBoundEstimator::compute(tour.points())))
    }

    /// Builds a report with a known (or absent) lower bound.
    pub fn with_lower_bound(tour: &Tour, lower_bound: Option<f64>) -> Self {
        let points = tour
            .points()
            .iter()
            .enumerate()
            .map(|(i, p)| IndexedPoint {
                index: i + 1,
                x: p.x(),
                y: p.y(),
            })
            .collect();
        Self {
            name: tour.name().to_string(),
            dimension: tour.len(),
            lower_bound,
            cost: tour.cost(),
            points,
        }
    }

    /// Serializes as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a JSON report. Consistency is checked by [`into_tour`](Self::into_tour).
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Writes the report to `path` as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Reads a JSON report from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Rebuilds the tour, visiting points in index order.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidReport`] if `dimension` disagrees with the point
    /// count or the indices are not exactly `1..=dimension`.
    pub fn into_tour(self) -> Result<Tour> {
        if self.dimension != self.points.len() {
            return Err(Error::InvalidReport(format!(
                "dimension is {} but {} points are listed",
                self.dimension,
                self.points.len()
            )));
        }
        let mut slots: Vec<Option<Point>> = vec![None; self.dimension];
        for p in &self.points {
            if p.index == 0 || p.index > self.dimension {
                let message = format!("index {} out of range", p.index);
                return Err(Error::InvalidReport(message));
            }
            if slots[p.index - 1].replace(Point::new(p.x, p.y)).is_some() {
                return Err(Error::InvalidReport(format!("index {} repeated", p.index)));
            }
        }
        let points: Vec<Point> = slots.into_iter().flatten().collect();
        Ok(Tour::new(self.name, points))
    }
}

impl From<&PipelineReport> for TourReport {
    fn from(report: &PipelineReport) -> Self {
        Self::with_lower_bound(&report.tour, report.lower_bound)
    }
}
