//! Point loading and storage.
//!
//! Points are read once from a headerless `x,y` CSV file. Each record's
//! position among the data records becomes its stable index.

use std::fs;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

/// A single star in the field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub index: usize,
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(index: usize, x: f32, y: f32) -> Self {
        Self { index, x, y }
    }
}

/// Ordered collection of points with dense indices `0..len`.
#[derive(Debug, Clone, Default)]
pub struct PointSet {
    points: Vec<Point>,
    source: Option<PathBuf>,
}

impl PointSet {
    /// Build a point set from raw coordinates, assigning indices in order.
    pub fn from_coordinates<I>(coordinates: I) -> Self
    where
        I: IntoIterator<Item = (f32, f32)>,
    {
        let points = coordinates
            .into_iter()
            .enumerate()
            .map(|(index, (x, y))| Point::new(index, x, y))
            .collect();
        Self {
            points,
            source: None,
        }
    }

    /// Load a point set from a CSV file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => Error::PointsNotFound {
                path: path.to_path_buf(),
            },
            _ => Error::Io(err),
        })?;
        let mut set = Self::from_reader(file)?;
        set.source = Some(path.to_path_buf());
        debug!(path = %path.display(), points = set.len(), "loaded point set");
        Ok(set)
    }

    /// Load a point set from any reader producing `x,y` records.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);

        let mut points = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let (x, y) = parse_record(&record, line)?;
            points.push(Point::new(points.len(), x, y));
        }

        Ok(Self {
            points,
            source: None,
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Get the source path if the set was loaded from a file.
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

fn parse_record(record: &StringRecord, line: u64) -> Result<(f32, f32)> {
    if record.len() != 2 {
        return Err(Error::PointParse {
            line,
            message: format!("expected 2 fields (x,y), found {}", record.len()),
        });
    }

    let x = parse_coordinate(&record[0], "x", line)?;
    let y = parse_coordinate(&record[1], "y", line)?;
    Ok((x, y))
}

fn parse_coordinate(raw: &str, axis: &str, line: u64) -> Result<f32> {
    let value = raw.parse::<f32>().map_err(|e| Error::PointParse {
        line,
        message: format!("invalid {axis} coordinate '{raw}': {e}"),
    })?;

    if !value.is_finite() {
        return Err(Error::PointParse {
            line,
            message: format!("{axis} coordinate '{raw}' is not finite"),
        });
    }

    Ok(value)
}
