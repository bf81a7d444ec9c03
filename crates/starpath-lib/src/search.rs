//! Best-first route search over the radius graph.
//!
//! Two points are connected when their approximate distance is within the
//! caller's radius. The frontier is ordered by the configured
//! [`FrontierSelection`]; by default that is the accumulated distance from the
//! start alone, while duplicate entries for the same point are always
//! reconciled by total estimated cost.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;
use tracing::{debug, trace};

use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::neighbors::{validate_radius, NeighborFinder};
use crate::points::PointSet;

/// Key used to pick the next frontier node to finalize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrontierSelection {
    /// Smallest distance travelled from the start; the heuristic only takes
    /// part in duplicate reconciliation.
    #[default]
    DistanceFromStart,
    /// Smallest `distance_from_start + distance_to_end` (canonical A*).
    TotalCost,
}

impl fmt::Display for FrontierSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            FrontierSelection::DistanceFromStart => "distance_from_start",
            FrontierSelection::TotalCost => "total_cost",
        };
        f.write_str(value)
    }
}

/// Tunables applied to every search run by an engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub selection: FrontierSelection,
}

/// A successful search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    /// Point indices from start to goal, inclusive.
    pub steps: Vec<usize>,
    /// Sum of the approximate distances between consecutive steps.
    pub distance: f32,
}

impl Route {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Outcome of a search that ran to completion.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(Route),
    /// The goal is not reachable from the start within the radius.
    NoPath,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn route(&self) -> Option<&Route> {
        match self {
            SearchOutcome::Found(route) => Some(route),
            SearchOutcome::NoPath => None,
        }
    }

    /// Consume the outcome, returning the path indices if one was found.
    pub fn into_path(self) -> Option<Vec<usize>> {
        match self {
            SearchOutcome::Found(route) => Some(route.steps),
            SearchOutcome::NoPath => None,
        }
    }
}

/// Search engine bound to a single point set.
///
/// The distance matrix is built once on construction. Every call to
/// [`find_path`](Self::find_path) uses fresh frontier and visited state, so one
/// engine can serve any number of searches.
#[derive(Debug, Clone)]
pub struct PathSearchEngine {
    points: PointSet,
    matrix: DistanceMatrix,
    options: SearchOptions,
}

impl PathSearchEngine {
    pub fn new(points: PointSet) -> Self {
        Self::with_options(points, SearchOptions::default())
    }

    pub fn with_options(points: PointSet, options: SearchOptions) -> Self {
        let matrix = DistanceMatrix::build(points.points());
        Self {
            points,
            matrix,
            options,
        }
    }

    pub fn points(&self) -> &PointSet {
        &self.points
    }

    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    pub fn options(&self) -> SearchOptions {
        self.options
    }

    /// Points within `radius` of `index`, ascending.
    pub fn neighbors(&self, index: usize, radius: f32) -> Result<Vec<usize>> {
        NeighborFinder::new(&self.matrix).neighbors(index, radius)
    }

    /// Find a route from `start` to `end` where every hop is at most `radius`.
    ///
    /// Returns an error without searching when either index is out of range or
    /// the radius is negative. `start == end` yields the single-step route.
    pub fn find_path(&self, start: usize, end: usize, radius: f32) -> Result<SearchOutcome> {
        self.matrix.check_index(start)?;
        self.matrix.check_index(end)?;
        validate_radius(radius)?;

        if start == end {
            return Ok(SearchOutcome::Found(Route {
                steps: vec![start],
                distance: 0.0,
            }));
        }

        let finder = NeighborFinder::new(&self.matrix);
        let mut visited = vec![false; self.matrix.len()];
        let mut frontier = Frontier::new(self.options.selection, self.matrix.len());

        visited[start] = true;
        let origin = SearchNode::origin(start, self.matrix.get(start, end));
        for next in finder.within(start, radius) {
            frontier.offer(origin.extend(
                next,
                self.matrix.get(start, next),
                self.matrix.get(next, end),
            ));
        }

        let mut expanded = 0usize;
        while let Some(current) = frontier.pop() {
            visited[current.index] = true;

            if current.index == end {
                let route = current.into_route();
                debug!(
                    start,
                    end,
                    radius,
                    expanded,
                    hops = route.hop_count(),
                    distance = route.distance,
                    "route found"
                );
                return Ok(SearchOutcome::Found(route));
            }

            expanded += 1;
            trace!(
                index = current.index,
                distance_from_start = current.distance_from_start,
                "expanding node"
            );

            for next in finder.within(current.index, radius) {
                if visited[next] {
                    continue;
                }
                let candidate = current.extend(
                    next,
                    self.matrix.get(current.index, next),
                    self.matrix.get(next, end),
                );
                frontier.offer(candidate);
            }
        }

        debug!(start, end, radius, expanded, "frontier exhausted without reaching goal");
        Ok(SearchOutcome::NoPath)
    }
}

/// Immutable path cell; siblings share their common prefix.
#[derive(Debug)]
struct PathLink {
    index: usize,
    parent: Option<Rc<PathLink>>,
}

#[derive(Debug, Clone)]
struct SearchNode {
    index: usize,
    distance_from_start: f32,
    distance_to_end: f32,
    path: Rc<PathLink>,
}

impl SearchNode {
    fn origin(index: usize, distance_to_end: f32) -> Self {
        Self {
            index,
            distance_from_start: 0.0,
            distance_to_end,
            path: Rc::new(PathLink {
                index,
                parent: None,
            }),
        }
    }

    fn extend(&self, index: usize, step: f32, distance_to_end: f32) -> Self {
        Self {
            index,
            distance_from_start: self.distance_from_start + step,
            distance_to_end,
            path: Rc::new(PathLink {
                index,
                parent: Some(Rc::clone(&self.path)),
            }),
        }
    }

    fn total_cost(&self) -> f32 {
        self.distance_from_start + self.distance_to_end
    }

    fn into_route(self) -> Route {
        let mut steps = Vec::new();
        let mut link = Some(&self.path);
        while let Some(cell) = link {
            steps.push(cell.index);
            link = cell.parent.as_ref();
        }
        steps.reverse();
        Route {
            steps,
            distance: self.distance_from_start,
        }
    }
}

/// Open set with at most one live node per point index.
///
/// Superseded heap entries are left in place and skipped on pop.
struct Frontier {
    selection: FrontierSelection,
    heap: BinaryHeap<FrontierEntry>,
    slots: Vec<Option<FrontierSlot>>,
    next_sequence: u64,
}

struct FrontierSlot {
    sequence: u64,
    node: SearchNode,
}

impl Frontier {
    fn new(selection: FrontierSelection, size: usize) -> Self {
        let mut slots = Vec::with_capacity(size);
        slots.resize_with(size, || None);
        Self {
            selection,
            heap: BinaryHeap::new(),
            slots,
            next_sequence: 0,
        }
    }

    /// Add `node`, or replace the live entry for the same point when `node`
    /// has a strictly lower total cost. Returns whether the frontier changed.
    fn offer(&mut self, node: SearchNode) -> bool {
        if let Some(existing) = &self.slots[node.index] {
            if node.total_cost() >= existing.node.total_cost() {
                return false;
            }
            trace!(
                index = node.index,
                previous = existing.node.total_cost(),
                replacement = node.total_cost(),
                "replacing frontier entry"
            );
        }

        let index = node.index;
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(FrontierEntry {
            key: self.key(&node),
            sequence,
            index,
        });
        self.slots[index] = Some(FrontierSlot { sequence, node });
        true
    }

    fn pop(&mut self) -> Option<SearchNode> {
        while let Some(entry) = self.heap.pop() {
            let live = matches!(
                &self.slots[entry.index],
                Some(slot) if slot.sequence == entry.sequence
            );
            if live {
                return self.slots[entry.index].take().map(|slot| slot.node);
            }
        }
        None
    }

    fn key(&self, node: &SearchNode) -> i64 {
        let cost = match self.selection {
            FrontierSelection::DistanceFromStart => node.distance_from_start,
            FrontierSelection::TotalCost => node.total_cost(),
        };
        // Distances are multiples of 0.01; compare in whole hundredths so float
        // noise from accumulation never splits a tie.
        (f64::from(cost) * 100.0).round() as i64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrontierEntry {
    key: i64,
    sequence: u64,
    index: usize,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by key, oldest
        // insertion first among equal keys.
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
