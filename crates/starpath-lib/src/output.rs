use std::fmt::Write;

use serde::Serialize;

use crate::points::Point;
use crate::search::{FrontierSelection, PathSearchEngine, SearchOutcome};

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    /// One line per step with coordinates and hop distance.
    PlainText,
    /// Only the index list, e.g. `[0, 1, 2]`.
    Indices,
}

/// Step taken during traversal of a found route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    /// Position of the step within the route.
    pub index: usize,
    /// Index of the point in the loaded set.
    pub point: usize,
    pub x: f32,
    pub y: f32,
    /// Approximate distance from the previous step; absent for the start.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f32>,
}

/// Everything a renderer needs: the full point set plus the search outcome.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub start: usize,
    pub goal: usize,
    pub radius: f32,
    pub selection: FrontierSelection,
    pub found: bool,
    /// Point indices from start to goal, or `None` when no path exists.
    pub path: Option<Vec<usize>>,
    pub hops: usize,
    pub total_distance: f32,
    pub steps: Vec<RouteStep>,
    pub points: Vec<Point>,
}

impl RouteSummary {
    /// Collect the renderer inputs for a completed search.
    pub fn from_outcome(
        engine: &PathSearchEngine,
        start: usize,
        goal: usize,
        radius: f32,
        outcome: &SearchOutcome,
    ) -> Self {
        let points = engine.points().points().to_vec();
        let route = outcome.route();

        let steps = route
            .map(|route| {
                let mut previous: Option<usize> = None;
                route
                    .steps
                    .iter()
                    .enumerate()
                    .filter_map(|(index, &point_index)| {
                        let point = points.get(point_index)?;
                        let distance = previous.map(|p| engine.matrix().get(p, point_index));
                        previous = Some(point_index);
                        Some(RouteStep {
                            index,
                            point: point_index,
                            x: point.x,
                            y: point.y,
                            distance,
                        })
                    })
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        Self {
            start,
            goal,
            radius,
            selection: engine.options().selection,
            found: route.is_some(),
            path: route.map(|route| route.steps.clone()),
            hops: route.map(|route| route.hop_count()).unwrap_or_default(),
            total_distance: route.map(|route| route.distance).unwrap_or_default(),
            steps,
            points,
        }
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        if !self.found {
            return "No Path Found\n".to_string();
        }
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::Indices => self.render_indices(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} hops, radius {}, selection: {})",
            self.start, self.goal, self.hops, self.radius, self.selection
        );
        for step in &self.steps {
            match step.distance {
                Some(distance) => {
                    let _ = writeln!(
                        buffer,
                        "{:>3}: #{} ({:.2}, {:.2}) +{:.2}",
                        step.index, step.point, step.x, step.y, distance
                    );
                }
                None => {
                    let _ = writeln!(
                        buffer,
                        "{:>3}: #{} ({:.2}, {:.2})",
                        step.index, step.point, step.x, step.y
                    );
                }
            }
        }
        let _ = writeln!(buffer, "Total distance: {:.2}", self.total_distance);
        buffer
    }

    fn render_indices(&self) -> String {
        let joined = self
            .path
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|index| index.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("[{joined}]\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::points::PointSet;

    fn engine() -> PathSearchEngine {
        PathSearchEngine::new(PointSet::from_coordinates([
            (0.0, 0.0),
            (1.0, 0.0),
            (2.0, 0.0),
            (10.0, 10.0),
        ]))
    }

    #[test]
    fn summary_of_found_route() {
        let engine = engine();
        let outcome = engine.find_path(0, 2, 1.5).unwrap();
        let summary = RouteSummary::from_outcome(&engine, 0, 2, 1.5, &outcome);

        assert!(summary.found);
        assert_eq!(summary.path, Some(vec![0, 1, 2]));
        assert_eq!(summary.hops, 2);
        assert_eq!(summary.points.len(), 4);
        assert_eq!(summary.steps[0].distance, None);
        assert_eq!(summary.steps[2].distance, Some(0.98));
        assert_eq!(summary.render(RouteRenderMode::Indices), "[0, 1, 2]\n");

        let plain = summary.render(RouteRenderMode::PlainText);
        assert!(plain.starts_with("Route: 0 -> 2 (2 hops"));
        assert!(plain.contains("  2: #2 (2.00, 0.00) +0.98"));
        assert!(plain.contains("Total distance: 1.96"));
    }

    #[test]
    fn summary_of_missing_route_keeps_points() {
        let engine = engine();
        let outcome = engine.find_path(0, 3, 1.5).unwrap();
        let summary = RouteSummary::from_outcome(&engine, 0, 3, 1.5, &outcome);

        assert!(!summary.found);
        assert_eq!(summary.path, None);
        assert!(summary.steps.is_empty());
        assert_eq!(summary.points.len(), 4);
        assert_eq!(summary.render(RouteRenderMode::Indices), "No Path Found\n");
    }

    #[test]
    fn single_point_route_is_distinct_from_no_path() {
        let engine = engine();
        let outcome = engine.find_path(3, 3, 0.0).unwrap();
        let summary = RouteSummary::from_outcome(&engine, 3, 3, 0.0, &outcome);
        assert!(summary.found);
        assert_eq!(summary.render(RouteRenderMode::Indices), "[3]\n");
    }
}
