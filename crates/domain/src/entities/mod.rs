//! Domain entities - The route data model

mod route;

pub use route::{Geometry, Leg, Maneuver, Route, RouteResponse, RouteSteps, Step};
