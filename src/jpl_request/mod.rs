//! # JPL Horizons requests
//!
//! Positions of the Moon and the planets are not computed locally: they are requested from the
//! [JPL Horizons API](https://ssd.jpl.nasa.gov/api/horizons.api) as a geocentric observer table
//! (`EPHEM_TYPE='OBSERVER'`, RA/Dec and apparent magnitude) and parsed by
//! [`ephemeris_row::parse_observer_table`].
//!
//! One request is issued per body. [`HorizonsClient::fetch_batch`] runs them concurrently and
//! hands every per-body result back, failures included, so that
//! [`ObservationFrame::apply_ephemeris_batch`] can apply the whole batch at once.
//!
//! ```rust,no_run
//! use skyframe::env_state::SkyEnv;
//! use skyframe::frame_params::FrameParams;
//! use skyframe::jpl_request::{refresh_ephemerides, HorizonsClient};
//! use skyframe::observation_frame::ObservationFrame;
//! use tokio::sync::RwLock;
//!
//! # async fn run() -> Result<(), skyframe::skyframe_errors::SkyframeError> {
//! let params = FrameParams::default();
//! let client = HorizonsClient::new(&SkyEnv::new()?, &params);
//! let frame = RwLock::new(ObservationFrame::new(params, 1_710_903_960.0, &[])?);
//! let outcome = refresh_ephemerides(&frame, &client).await;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```
pub mod ephemeris_row;
pub mod horizon_ids;

use std::fmt;

use itertools::Itertools;
use tokio::sync::RwLock;
use tokio::task::JoinSet;
use tracing::{trace, warn};

use crate::constants::{JulianDate, UnixSeconds, SECONDS_PER_DAY};
use crate::env_state::SkyEnv;
use crate::frame_params::FrameParams;
use crate::observation_frame::{BatchOutcome, ObservationFrame};
use crate::skyframe_errors::SkyframeError;
use crate::time::instant_to_julian_date;

use ephemeris_row::{parse_observer_table, EphemerisLayout, EphemerisSample};
use horizon_ids::TrackedBody;

pub const HORIZONS_API_URL: &str = "https://ssd.jpl.nasa.gov/api/horizons.api";

/// Geocentric observer: body center of the Earth.
const GEOCENTER: &str = "'500@399'";

/// Result of one body request, as handed to the frame.
pub type BodyResult = (TrackedBody, Result<EphemerisSample, SkyframeError>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepUnit {
    Minutes,
    Hours,
    Days,
    Months,
    Years,
}

/// Horizons `STEP_SIZE`, e.g. `60m` or `1d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub value: u32,
    pub unit: StepUnit,
}

impl Step {
    pub fn new(value: u32, unit: StepUnit) -> Self {
        Step { value, unit }
    }

    /// Duration of the step in seconds. Months and years use their mean Julian length.
    pub fn seconds(&self) -> f64 {
        let unit = match self.unit {
            StepUnit::Minutes => 60.0,
            StepUnit::Hours => 3_600.0,
            StepUnit::Days => SECONDS_PER_DAY,
            StepUnit::Months => 30.4375 * SECONDS_PER_DAY,
            StepUnit::Years => 365.25 * SECONDS_PER_DAY,
        };
        self.value as f64 * unit
    }
}

impl Default for Step {
    fn default() -> Self {
        Step::new(60, StepUnit::Minutes)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            StepUnit::Minutes => write!(f, "{}m", self.value),
            StepUnit::Hours => write!(f, "{}h", self.value),
            StepUnit::Days => write!(f, "{}d", self.value),
            StepUnit::Months => write!(f, "{}mo", self.value),
            StepUnit::Years => write!(f, "{}y", self.value),
        }
    }
}

/// Time span of a Horizons table, in Julian dates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalTime {
    pub start_time: JulianDate,
    pub stop_time: JulianDate,
    pub step: Step,
}

impl IntervalTime {
    /// Interval covering exactly one step from `instant`, so the first data row is `instant`.
    pub fn starting_at(instant: UnixSeconds, step: Step) -> Result<Self, SkyframeError> {
        if !instant.is_finite() {
            return Err(SkyframeError::OutOfRange(format!(
                "ephemeris instant {instant} is not finite"
            )));
        }
        if step.value == 0 {
            return Err(SkyframeError::OutOfRange(
                "ephemeris step must be at least 1".into(),
            ));
        }
        Ok(IntervalTime {
            start_time: instant_to_julian_date(instant),
            stop_time: instant_to_julian_date(instant + step.seconds()),
            step,
        })
    }
}

/// Query parameters of an observer-table request for one body.
pub fn horizons_params(body: TrackedBody, interval: &IntervalTime) -> [(&'static str, String); 10] {
    [
        ("format", "text".into()),
        ("COMMAND", body.command()),
        ("OBJ_DATA", "'NO'".into()),
        ("MAKE_EPHEM", "'YES'".into()),
        ("EPHEM_TYPE", "'OBSERVER'".into()),
        ("CENTER", GEOCENTER.into()),
        ("START_TIME", format!("'JD{}'", interval.start_time)),
        ("STOP_TIME", format!("'JD{}'", interval.stop_time)),
        ("STEP_SIZE", format!("'{}'", interval.step)),
        ("QUANTITIES", "'1,9'".into()),
    ]
}

/// Query string of a Horizons request, as logged.
fn query_string(params: &[(&str, String)]) -> String {
    params.iter().map(|(k, v)| format!("{k}={v}")).join("&")
}

/// Client of the Horizons observer-table service.
///
/// Cloning is cheap: the underlying HTTP client is reference counted.
#[derive(Debug, Clone)]
pub struct HorizonsClient {
    env: SkyEnv,
    base_url: String,
    layout: EphemerisLayout,
    step: Step,
}

impl HorizonsClient {
    pub fn new(env: &SkyEnv, params: &FrameParams) -> Self {
        HorizonsClient {
            env: env.clone(),
            base_url: HORIZONS_API_URL.to_string(),
            layout: EphemerisLayout::default(),
            step: params.ephemeris_step,
        }
    }

    /// Point the client at another endpoint (a proxy or a local mock).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_layout(mut self, layout: EphemerisLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn layout(&self) -> &EphemerisLayout {
        &self.layout
    }

    /// Request the observer table of one body starting at `instant` and parse its first row.
    ///
    /// Arguments
    /// ---------
    /// * `body`: the body to request
    /// * `instant`: Unix seconds of the requested position
    ///
    /// Return
    /// ------
    /// * The parsed sample, a [`SkyframeError::ReqwestError`] if the request failed or a
    ///   [`SkyframeError::EphemerisFormat`] if the response is not a usable table.
    pub async fn fetch_body(
        &self,
        body: TrackedBody,
        instant: UnixSeconds,
    ) -> Result<EphemerisSample, SkyframeError> {
        let interval = IntervalTime::starting_at(instant, self.step)?;
        let params = horizons_params(body, &interval);
        // field values are only built when TRACE is enabled
        trace!(
            body = %body,
            start = interval.start_time,
            stop = interval.stop_time,
            query = %query_string(&params),
            "Horizons request"
        );

        let response = self.env.get_text(&self.base_url, &params).await?;
        parse_observer_table(&response, &self.layout)
    }

    /// Fetch every body concurrently and collect all the results, in the order of `bodies`.
    ///
    /// A task that panics is logged and left out of the batch; the frame then keeps that body
    /// at its last-known state, as for any other failure.
    pub async fn fetch_batch(
        &self,
        bodies: &[TrackedBody],
        instant: UnixSeconds,
    ) -> Vec<BodyResult> {
        let mut tasks = JoinSet::new();
        for &body in bodies {
            let client = self.clone();
            tasks.spawn(async move { (body, client.fetch_body(body, instant).await) });
        }

        let mut results = Vec::with_capacity(bodies.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(result) => results.push(result),
                Err(e) => warn!(error = %e, "Horizons request task failed"),
            }
        }

        results.sort_by_key(|(body, _)| bodies.iter().position(|b| b == body));
        results
    }
}

/// Refresh every tracked body of a shared frame.
///
/// A ticket is taken first, the batch is fetched without holding the lock, and the results are
/// applied under a single write guard. A refresh overtaken by a newer one is discarded when it
/// completes.
pub async fn refresh_ephemerides(
    frame: &RwLock<ObservationFrame>,
    client: &HorizonsClient,
) -> BatchOutcome {
    let (ticket, bodies) = {
        let mut guard = frame.write().await;
        let ticket = guard.begin_ephemeris_update();
        (ticket, guard.params().tracked_bodies.clone())
    };

    let batch = client.fetch_batch(&bodies, ticket.instant()).await;

    frame.write().await.apply_ephemeris_batch(ticket, batch)
}

/// Move a shared frame to `instant` and refresh its tracked bodies for that instant.
///
/// The frame keeps its current instant while the batch is fetched. The new instant, the
/// rotation, the Sun and the bodies are then applied under a single write guard, unless the
/// instant was changed again in the meantime ([`BatchOutcome::Outdated`]).
pub async fn advance_ephemerides(
    frame: &RwLock<ObservationFrame>,
    client: &HorizonsClient,
    instant: UnixSeconds,
) -> Result<BatchOutcome, SkyframeError> {
    let (ticket, bodies) = {
        let mut guard = frame.write().await;
        let ticket = guard.begin_time_advance(instant)?;
        (ticket, guard.params().tracked_bodies.clone())
    };

    let batch = client.fetch_batch(&bodies, ticket.instant()).await;

    frame.write().await.apply_time_advance(ticket, batch)
}
