//! Domain layer for Footpath
//!
//! Contains the route data model and geographic value objects.
//! This layer has no external-service dependencies and defines the
//! ubiquitous language for the rest of the workspace.

pub mod entities;
pub mod value_objects;

pub use entities::{Geometry, Leg, Maneuver, Route, RouteResponse, RouteSteps, Step};
pub use value_objects::{GeoLocation, InvalidCoordinates};
