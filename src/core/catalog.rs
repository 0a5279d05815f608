use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Coordinate columns differ in length: coord1={coord1}, coord2={coord2}, coord3={coord3}")]
    LengthMismatch {
        coord1: usize,
        coord2: usize,
        coord3: usize,
    },
}

/// An ordered catalog of points stored as three parallel coordinate columns.
///
/// The position of a point in the columns is its identity: every index
/// reported by the matcher refers back to this order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CatalogColumns")]
pub struct Catalog {
    coord1: Vec<f64>,
    coord2: Vec<f64>,
    coord3: Vec<f64>,
}

#[derive(Deserialize)]
struct CatalogColumns {
    coord1: Vec<f64>,
    coord2: Vec<f64>,
    coord3: Vec<f64>,
}

impl TryFrom<CatalogColumns> for Catalog {
    type Error = CatalogError;

    fn try_from(columns: CatalogColumns) -> Result<Self, Self::Error> {
        Self::new(columns.coord1, columns.coord2, columns.coord3)
    }
}

impl Catalog {
    /// Build a catalog from its three coordinate columns.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::LengthMismatch` if the columns differ in length.
    pub fn new(
        coord1: Vec<f64>,
        coord2: Vec<f64>,
        coord3: Vec<f64>,
    ) -> Result<Self, CatalogError> {
        if coord1.len() != coord2.len() || coord1.len() != coord3.len() {
            return Err(CatalogError::LengthMismatch {
                coord1: coord1.len(),
                coord2: coord2.len(),
                coord3: coord3.len(),
            });
        }
        Ok(Self {
            coord1,
            coord2,
            coord3,
        })
    }

    /// Build a catalog from `(coord1, coord2, coord3)` triples, in order
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64, f64)>,
    {
        let mut catalog = Self::default();
        for (c1, c2, c3) in points {
            catalog.coord1.push(c1);
            catalog.coord2.push(c2);
            catalog.coord3.push(c3);
        }
        catalog
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.coord1.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coord1.is_empty()
    }

    /// First on-sky coordinate (x, or ra/l in degrees)
    pub fn coord1(&self) -> &[f64] {
        &self.coord1
    }

    /// Second on-sky coordinate (y, or dec/b in degrees)
    pub fn coord2(&self) -> &[f64] {
        &self.coord2
    }

    /// Line-of-sight coordinate (z, velocity or redshift)
    pub fn coord3(&self) -> &[f64] {
        &self.coord3
    }

    /// View of the point at `index`, if it exists
    #[must_use]
    pub fn point(&self, index: usize) -> Option<Point> {
        if index >= self.len() {
            return None;
        }
        Some(Point {
            index,
            coord1: self.coord1[index],
            coord2: self.coord2[index],
            coord3: self.coord3[index],
        })
    }

    /// Iterate over all points in catalog order
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.len()).filter_map(move |i| self.point(i))
    }
}

/// A single point of a catalog, used as a search query
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Position of the point in the catalog it was taken from
    pub index: usize,
    pub coord1: f64,
    pub coord2: f64,
    pub coord3: f64,
}

impl Point {
    /// A free-standing query point, not drawn from any catalog
    pub fn new(coord1: f64, coord2: f64, coord3: f64) -> Self {
        Self {
            index: 0,
            coord1,
            coord2,
            coord3,
        }
    }
}
