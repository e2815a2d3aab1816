//! Route data model
//!
//! A directions response is an ordered tree: [`RouteResponse`] holds
//! alternative [`Route`]s, each route holds [`Leg`]s, each leg holds
//! [`Step`]s, and each step carries a [`Maneuver`] plus an optional polyline
//! [`Geometry`]. Only the first route and first leg are ever drawn.
//!
//! Steps compare and hash by content (maneuver + geometry), not by position,
//! so a step collection can be diffed without positional indices. Floating
//! point fields are compared and hashed by bit pattern.

use std::hash::{DefaultHasher, Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::value_objects::GeoLocation;

/// A single turn instruction with its location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Maneuver {
    /// Raw `[longitude, latitude]` pair as delivered by the API
    pub location: Vec<f64>,
    /// Human-readable instruction text
    pub instruction: String,
}

impl Maneuver {
    /// The maneuver position, only when the raw location is a well-formed
    /// 2-element pair
    #[must_use]
    pub fn coordinate(&self) -> Option<GeoLocation> {
        if self.location.len() != 2 {
            return None;
        }
        GeoLocation::from_lon_lat(&self.location)
    }
}

impl PartialEq for Maneuver {
    fn eq(&self, other: &Self) -> bool {
        self.instruction == other.instruction
            && bits(&self.location).eq(bits(&other.location))
    }
}

impl Eq for Maneuver {}

impl Hash for Maneuver {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.instruction.hash(state);
        self.location.len().hash(state);
        for b in bits(&self.location) {
            b.hash(state);
        }
    }
}

/// Polyline geometry attached to a step
///
/// Holds the ordered raw `[longitude, latitude]` pairs of a GeoJSON line
/// string. Absent when the API omits geometry for a step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    /// Ordered raw coordinate pairs
    pub coordinates: Vec<Vec<f64>>,
}

impl Geometry {
    /// Decode the raw pairs into coordinates, preserving order
    ///
    /// Malformed pairs (too short or out of range) are skipped.
    #[must_use]
    pub fn decoded_coordinates(&self) -> Vec<GeoLocation> {
        self.coordinates
            .iter()
            .filter_map(|pair| GeoLocation::from_lon_lat(pair))
            .collect()
    }
}

impl PartialEq for Geometry {
    fn eq(&self, other: &Self) -> bool {
        self.coordinates.len() == other.coordinates.len()
            && self
                .coordinates
                .iter()
                .zip(&other.coordinates)
                .all(|(a, b)| bits(a).eq(bits(b)))
    }
}

impl Eq for Geometry {}

impl Hash for Geometry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.coordinates.len().hash(state);
        for pair in &self.coordinates {
            pair.len().hash(state);
            for b in bits(pair) {
                b.hash(state);
            }
        }
    }
}

/// One maneuver-level segment of a leg
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Step {
    /// Polyline for this segment, when the API provides one
    pub geometry: Option<Geometry>,
    /// The turn instruction opening this segment
    pub maneuver: Maneuver,
}

/// One origin-to-destination segment of a route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leg {
    /// Ordered steps of this leg
    pub steps: Vec<Step>,
}

/// A full routing result, possibly spanning multiple legs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Ordered legs of this route
    pub legs: Vec<Leg>,
}

/// The parsed body of a directions call
///
/// The API may return alternatives; only the first route is used. Built
/// fresh on every successful call and discarded after step extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteResponse {
    /// Alternative routes, best first
    pub routes: Vec<Route>,
}

impl RouteResponse {
    /// Extract the steps of the first leg of the first route
    ///
    /// Returns `None` when the response carries no route or the first route
    /// carries no leg - the explicit "no route found" signal.
    #[must_use]
    pub fn primary_steps(&self) -> Option<RouteSteps> {
        let leg = self.routes.first()?.legs.first()?;
        Some(RouteSteps::new(leg.steps.clone()))
    }
}

/// An ordered step collection with a precomputed content fingerprint
///
/// The fingerprint is derived from the steps' content hash at construction,
/// so change detection is a single integer comparison instead of a rebuild
/// of step sets on every render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSteps {
    steps: Vec<Step>,
    fingerprint: u64,
}

impl RouteSteps {
    /// Build a step collection and fingerprint it
    #[must_use]
    pub fn new(steps: Vec<Step>) -> Self {
        let mut hasher = DefaultHasher::new();
        steps.hash(&mut hasher);
        let fingerprint = hasher.finish();
        Self { steps, fingerprint }
    }

    /// An empty collection (the initial view-model state)
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// The steps, in drawing order
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Content fingerprint for cheap change detection
    #[must_use]
    pub const fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Number of steps
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True when there are no steps
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Default for RouteSteps {
    fn default() -> Self {
        Self::empty()
    }
}

/// Iterate f64 slices as bit patterns for total equality and hashing
fn bits(values: &[f64]) -> impl Iterator<Item = u64> + '_ {
    values.iter().map(|v| v.to_bits())
}
