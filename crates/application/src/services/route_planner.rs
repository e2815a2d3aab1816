//! Route planning service
//!
//! The view model of the route pipeline: resolves both addresses, fetches a
//! walking route, and publishes the outcome as an observable snapshot.
//! All observable mutation funnels through a single watch channel, so
//! observers never see a partially-updated state.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use domain::entities::{RouteSteps, Step};
use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{DirectionsPort, GeocodingPort};

/// Route outcome visible to observers
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RouteState {
    /// No route has been requested yet
    #[default]
    Idle,
    /// The directions service answered, but without a usable route
    NoRouteFound,
    /// Steps ready to draw (a leg may legitimately carry zero steps)
    Ready(RouteSteps),
}

impl RouteState {
    /// Steps to draw for this state (empty unless `Ready`)
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        match self {
            Self::Ready(steps) => steps.steps(),
            Self::Idle | Self::NoRouteFound => &[],
        }
    }

    /// Content fingerprint for cheap change detection
    ///
    /// All states without drawable steps share the empty fingerprint.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        match self {
            Self::Ready(steps) => steps.fingerprint(),
            Self::Idle | Self::NoRouteFound => RouteSteps::empty().fingerprint(),
        }
    }
}

/// Observable snapshot of the planner
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteSnapshot {
    /// Current route outcome
    pub route: RouteState,
    /// Human-readable description of the most recent failure, if any
    pub last_error: Option<String>,
}

/// Service orchestrating geocoding and directions into route snapshots
///
/// Concurrent `calculate_route` calls are sequenced by a generation
/// counter: only the latest-started call may publish its outcome, so a
/// stale response can never overwrite a newer one.
pub struct RoutePlanner {
    geocoding: Arc<dyn GeocodingPort>,
    directions: Arc<dyn DirectionsPort>,
    snapshot_tx: watch::Sender<RouteSnapshot>,
    generation: AtomicU64,
    publish_lock: Mutex<()>,
}

impl fmt::Debug for RoutePlanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutePlanner")
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl RoutePlanner {
    /// Create a new planner in the idle state
    #[must_use]
    pub fn new(geocoding: Arc<dyn GeocodingPort>, directions: Arc<dyn DirectionsPort>) -> Self {
        let (snapshot_tx, _) = watch::channel(RouteSnapshot::default());
        Self {
            geocoding,
            directions,
            snapshot_tx,
            generation: AtomicU64::new(0),
            publish_lock: Mutex::new(()),
        }
    }

    /// Observe snapshot updates
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RouteSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Current snapshot
    #[must_use]
    pub fn snapshot(&self) -> RouteSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Resolve both addresses, fetch a walking route, and publish the result
    ///
    /// A blank address makes the call a no-op. On failure the previous route
    /// state is kept and only `last_error` changes; on success the route
    /// state is replaced and `last_error` cleared, in one atomic update.
    #[instrument(skip(self))]
    pub async fn calculate_route(&self, start_address: &str, end_address: &str) {
        if start_address.trim().is_empty() || end_address.trim().is_empty() {
            debug!("Blank address, ignoring route request");
            return;
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!(generation, "Calculating route");

        let outcome = self.run_pipeline(start_address, end_address).await;
        self.publish(generation, outcome);
    }

    /// Geocode both endpoints concurrently, then fetch directions
    ///
    /// Both resolutions must succeed; the first failure wins and the other
    /// result is discarded.
    async fn run_pipeline(
        &self,
        start_address: &str,
        end_address: &str,
    ) -> Result<RouteState, ApplicationError> {
        let (start, end) = tokio::try_join!(
            self.geocoding.resolve(start_address),
            self.geocoding.resolve(end_address),
        )?;
        debug!(start = %start.location, end = %end.location, "Addresses resolved");

        let response = self.directions.fetch_route(start.location, end.location).await?;

        Ok(response
            .primary_steps()
            .map_or(RouteState::NoRouteFound, RouteState::Ready))
    }

    /// Apply an outcome unless a newer request has started since
    fn publish(&self, generation: u64, outcome: Result<RouteState, ApplicationError>) {
        let _guard = self.publish_lock.lock();
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "Dropping superseded route result");
            return;
        }

        self.snapshot_tx.send_modify(|snapshot| match outcome {
            Ok(state) => {
                if matches!(state, RouteState::NoRouteFound) {
                    info!("Directions service returned no usable route");
                } else {
                    info!(steps = state.steps().len(), "Route updated");
                }
                snapshot.route = state;
                snapshot.last_error = None;
            }
            Err(error) => {
                warn!(%error, "Route calculation failed");
                snapshot.last_error = Some(error.to_string());
            }
        });
    }
}
