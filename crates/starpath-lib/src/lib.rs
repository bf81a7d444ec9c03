//! Starpath library entry points.
//!
//! This crate loads a 2-D star field, precomputes approximate pairwise
//! distances, and searches for routes whose every hop stays within a caller
//! supplied radius. Higher-level consumers (the CLI, renderers) should only
//! depend on the items exported here.
//!

#![deny(warnings)]

pub mod distance;
pub mod error;
pub mod neighbors;
pub mod output;
pub mod points;
pub mod search;

pub use distance::{approximate_distance, DistanceMatrix};
pub use error::{Error, Result};
pub use neighbors::NeighborFinder;
pub use output::{RouteRenderMode, RouteStep, RouteSummary};
pub use points::{Point, PointSet};
pub use search::{FrontierSelection, PathSearchEngine, Route, SearchOptions, SearchOutcome};
