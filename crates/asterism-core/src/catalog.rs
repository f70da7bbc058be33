//! Star catalog and the render layers built from it.
//!
//! A star's `original_index` is its position in the catalog file. It is the
//! only piece of a star that is ever persisted, so it must stay stable for a
//! given catalog.

use crate::constants::{MAGNITUDE_BANDS, SKY_RADIUS};
use crate::error::CatalogError;
use crate::geometry::spherical_to_cartesian;
use glam::Vec3;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

fn default_mag() -> f32 {
    6.0
}

/// Catalog record as stored in `stars.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ra: f32,
    #[serde(default)]
    pub dec: f32,
    #[serde(default = "default_mag")]
    pub mag: f32,
    #[serde(skip)]
    pub original_index: usize,
}

/// A star picked on screen or resolved from a saved constellation.
#[derive(Clone, Debug, PartialEq)]
pub struct StarRef {
    pub original_index: usize,
    pub position: Vec3,
    pub record: StarRecord,
}

/// A batch of points rendered together: flat xyz triples plus the parallel
/// catalog records.
#[derive(Clone, Debug, Default)]
pub struct StarLayer {
    pub positions: Vec<f32>,
    pub data: Vec<StarRecord>,
}

impl StarLayer {
    pub fn len(&self) -> usize {
        self.data.len().min(self.positions.len() / 3)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::new(
            self.positions[i * 3],
            self.positions[i * 3 + 1],
            self.positions[i * 3 + 2],
        )
    }

    pub fn push(&mut self, position: Vec3, record: StarRecord) {
        self.positions.extend_from_slice(&position.to_array());
        self.data.push(record);
    }
}

#[derive(Clone, Debug)]
pub struct Catalog {
    stars: Vec<StarRecord>,
    radius: f32,
}

impl Catalog {
    pub fn new(mut stars: Vec<StarRecord>, radius: f32) -> Self {
        for (i, s) in stars.iter_mut().enumerate() {
            s.original_index = i;
        }
        Self { stars, radius }
    }

    /// Parse a JSON array of `{name, ra, dec, mag}` records.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let stars: Vec<StarRecord> = serde_json::from_str(json)?;
        if stars.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self::new(stars, SKY_RADIUS))
    }

    /// Deterministic stand-in sky used when no catalog file is available.
    pub fn procedural(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let stars = (0..count)
            .map(|i| {
                let ra = rng.gen_range(0.0..360.0f32);
                let dec = rng.gen_range(-1.0..1.0f32).asin().to_degrees();
                // few bright stars, many faint ones
                let mag = -1.0 + 6.0 * rng.gen::<f32>().sqrt();
                StarRecord {
                    name: format!("Star {}", i + 1),
                    ra,
                    dec,
                    mag,
                    original_index: i,
                }
            })
            .collect();
        Self::new(stars, SKY_RADIUS)
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn get(&self, original_index: usize) -> Option<&StarRecord> {
        self.stars.get(original_index)
    }

    pub fn position(&self, original_index: usize) -> Option<Vec3> {
        self.get(original_index)
            .map(|s| spherical_to_cartesian(s.ra, s.dec, self.radius))
    }

    /// Resolve a persisted index to a star, or `None` when the catalog no
    /// longer has it.
    pub fn resolve(&self, original_index: usize) -> Option<StarRef> {
        let record = self.get(original_index)?;
        Some(StarRef {
            original_index,
            position: spherical_to_cartesian(record.ra, record.dec, self.radius),
            record: record.clone(),
        })
    }

    /// Split the catalog into magnitude bands, brightest first.
    pub fn layers(&self) -> Vec<StarLayer> {
        let mut layers = vec![StarLayer::default(); MAGNITUDE_BANDS.len()];
        for s in &self.stars {
            let band = MAGNITUDE_BANDS
                .iter()
                .position(|limit| s.mag <= *limit)
                .unwrap_or(MAGNITUDE_BANDS.len() - 1);
            layers[band].push(spherical_to_cartesian(s.ra, s.dec, self.radius), s.clone());
        }
        layers
    }
}
