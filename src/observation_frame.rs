//! # Observation frame
//!
//! [`ObservationFrame`] owns every piece of mutable sky state: the current instant, the observer
//! location, the composed observer rotation, the catalog stars, the Sun and the bodies whose
//! positions come from the ephemeris service.
//!
//! ## Rotation
//!
//! The composed rotation is rebuilt from identity after every change of latitude, longitude or
//! instant:
//!
//! ```text
//! R = Rx(90° - lat) · Ry(-(long + longitude_offset)) · Ry(sidereal_angle(instant))
//! ```
//!
//! A renderer applies `R` to the body-frame [`Direction`] of every object
//! ([`ObservationFrame::to_world`]).
//!
//! ## Ephemeris batches
//!
//! Ephemeris updates are sequence numbered. [`ObservationFrame::begin_ephemeris_update`] hands
//! out an [`EphemerisTicket`]; the results fetched for it are applied in one call to
//! [`ObservationFrame::apply_ephemeris_batch`]. A batch whose ticket is older than the last
//! applied one is discarded whole, so the most recently issued request always wins regardless
//! of completion order. A batch fetched for an instant the frame has since left is discarded
//! as well. Inside a batch, bodies whose request failed keep their last-known direction and
//! size.
//!
//! To move time and refresh the bodies together, [`ObservationFrame::begin_time_advance`]
//! issues a ticket for the target instant and [`ObservationFrame::apply_time_advance`] changes
//! the instant, the rotation, the Sun and the bodies in one call.
use std::collections::BTreeMap;

use nalgebra::{Rotation3, Vector3};
use tracing::{debug, warn};

use crate::catalog::{build_stars, BodyKind, CelestialBody, StarRecord};
use crate::constants::{Degree, UnixSeconds, RADEG, SUN_APPARENT_MAGNITUDE};
use crate::frame_params::FrameParams;
use crate::jpl_request::horizon_ids::TrackedBody;
use crate::jpl_request::BodyResult;
use crate::magnitude::MagnitudeScaler;
use crate::observers::city::parse_city_value;
use crate::observers::{parse_latitude, parse_longitude, ObserverLocation};
use crate::ref_system::{observer_rotation, to_direction, Direction};
use crate::skyframe_errors::SkyframeError;
use crate::solar_ephemeris::sun_direction;
use crate::time::{instant_to_epoch, sidereal_angle};

/// Handle of one ephemeris update, issued by [`ObservationFrame::begin_ephemeris_update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EphemerisTicket {
    sequence: u64,
    instant: UnixSeconds,
    advances_time: bool,
}

impl EphemerisTicket {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Instant the batch must be fetched for: the frame instant when the ticket was issued,
    /// or the target instant of a time advance.
    pub fn instant(&self) -> UnixSeconds {
        self.instant
    }

    pub fn advances_time(&self) -> bool {
        self.advances_time
    }
}

/// What [`ObservationFrame::apply_ephemeris_batch`] did with a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    Applied {
        updated: Vec<TrackedBody>,
        kept: Vec<TrackedBody>,
    },
    /// A newer batch was already applied.
    Stale { sequence: u64, applied: u64 },
    /// The frame instant changed after the ticket was issued.
    Outdated { sequence: u64 },
}

#[derive(Debug, Clone)]
pub struct ObservationFrame {
    params: FrameParams,
    scaler: MagnitudeScaler,
    instant: UnixSeconds,
    location: ObserverLocation,
    rotation: Rotation3<f64>,
    stars: Vec<CelestialBody>,
    sun: CelestialBody,
    bodies: BTreeMap<TrackedBody, CelestialBody>,
    issued_sequence: u64,
    applied_sequence: u64,
    /// Last issued sequence when the instant last changed; tickets up to it are outdated.
    instant_sequence: u64,
}

fn check_instant(instant: UnixSeconds) -> Result<(), SkyframeError> {
    if !instant.is_finite() {
        return Err(SkyframeError::OutOfRange(format!(
            "instant {instant} is not finite"
        )));
    }
    Ok(())
}

fn sun_body(
    instant: UnixSeconds,
    scaler: &MagnitudeScaler,
) -> Result<CelestialBody, SkyframeError> {
    Ok(CelestialBody {
        name: TrackedBody::Sun.name().to_string(),
        kind: BodyKind::Sun,
        direction: sun_direction(instant)?,
        magnitude: SUN_APPARENT_MAGNITUDE,
        size: scaler.size_for_magnitude(SUN_APPARENT_MAGNITUDE)?,
        computed_at: Some(instant),
    })
}

impl ObservationFrame {
    /// Create a frame at `instant`, observed from the start-up location of `params`.
    ///
    /// Arguments
    /// ---------
    /// * `params`: frame configuration, usually built with [`FrameParams::builder`]
    /// * `instant`: Unix seconds
    /// * `catalog`: star records; each one is parsed once here and never changes afterwards
    ///
    /// Return
    /// ------
    /// * The frame, or the first error met while validating the parameters, the instant or
    ///   a catalog entry.
    pub fn new(
        params: FrameParams,
        instant: UnixSeconds,
        catalog: &[StarRecord],
    ) -> Result<Self, SkyframeError> {
        check_instant(instant)?;
        params.validate()?;
        let scaler = params.scaler()?;
        let location = params.initial_location()?;
        let stars = build_stars(catalog, &scaler)?;
        let sun = sun_body(instant, &scaler)?;

        let mut frame = ObservationFrame {
            params,
            scaler,
            instant,
            location,
            rotation: Rotation3::identity(),
            stars,
            sun,
            bodies: BTreeMap::new(),
            issued_sequence: 0,
            applied_sequence: 0,
            instant_sequence: 0,
        };
        frame.recompose();
        Ok(frame)
    }

    fn recompose(&mut self) {
        let sidereal = sidereal_angle(self.instant);
        self.rotation = observer_rotation(
            self.location.latitude(),
            self.location.longitude(),
            self.params.longitude_offset_deg,
            sidereal,
        );
        debug!(
            latitude = self.location.latitude(),
            longitude = self.location.longitude(),
            sidereal_angle = sidereal,
            "observer rotation recomposed"
        );
    }

    /// Move the observer. Out-of-range values are rejected and the previous location is kept.
    pub fn set_location(&mut self, latitude: Degree, longitude: Degree) -> Result<(), SkyframeError> {
        self.location = ObserverLocation::new(latitude, longitude)?;
        self.recompose();
        Ok(())
    }

    /// Move the observer from raw text fields.
    ///
    /// Both fields are parsed before anything changes, so a bad longitude does not leave a new
    /// latitude behind.
    pub fn set_location_from_input(
        &mut self,
        latitude: &str,
        longitude: &str,
    ) -> Result<(), SkyframeError> {
        let latitude = parse_latitude(latitude)?;
        let longitude = parse_longitude(longitude)?;
        self.set_location(latitude, longitude)
    }

    /// Move the observer to a city picker entry (`LAT<lat>LNG<long>`).
    pub fn set_city(&mut self, value: &str) -> Result<(), SkyframeError> {
        self.location = parse_city_value(value)?;
        self.recompose();
        Ok(())
    }

    /// Change the current instant, recomputing the rotation and the Sun.
    ///
    /// Ephemeris bodies are left untouched and every ticket issued so far becomes outdated; a
    /// new ticket must be requested for them.
    pub fn set_instant(&mut self, instant: UnixSeconds) -> Result<(), SkyframeError> {
        self.move_to(instant)?;
        self.instant_sequence = self.issued_sequence;
        Ok(())
    }

    fn move_to(&mut self, instant: UnixSeconds) -> Result<(), SkyframeError> {
        check_instant(instant)?;
        let sun = sun_body(instant, &self.scaler)?;
        self.instant = instant;
        self.sun = sun;
        self.recompose();
        Ok(())
    }

    pub fn params(&self) -> &FrameParams {
        &self.params
    }

    pub fn scaler(&self) -> &MagnitudeScaler {
        &self.scaler
    }

    pub fn instant(&self) -> UnixSeconds {
        self.instant
    }

    pub fn location(&self) -> ObserverLocation {
        self.location
    }

    pub fn composed_rotation(&self) -> &Rotation3<f64> {
        &self.rotation
    }

    pub fn sun(&self) -> &CelestialBody {
        &self.sun
    }

    pub fn sun_direction(&self) -> &Direction {
        &self.sun.direction
    }

    pub fn stars(&self) -> &[CelestialBody] {
        &self.stars
    }

    /// Ephemeris bodies received so far, keyed by body.
    pub fn bodies(&self) -> &BTreeMap<TrackedBody, CelestialBody> {
        &self.bodies
    }

    pub fn body(&self, body: TrackedBody) -> Option<&CelestialBody> {
        self.bodies.get(&body)
    }

    /// Apply the composed rotation to a body-frame direction.
    pub fn to_world(&self, direction: &Direction) -> Vector3<f64> {
        self.rotation * direction.as_unit().into_inner()
    }

    /// Altitude above the local horizon, in degrees (negative below it).
    pub fn horizon_altitude(&self, direction: &Direction) -> Degree {
        self.to_world(direction).y.clamp(-1.0, 1.0).asin() / RADEG
    }

    /// Issue a ticket for an ephemeris update at the current instant.
    pub fn begin_ephemeris_update(&mut self) -> EphemerisTicket {
        self.issue_ticket(self.instant, false)
    }

    /// Issue a ticket for moving the frame to `instant` together with its ephemeris bodies.
    ///
    /// Nothing changes until [`ObservationFrame::apply_time_advance`] is called with the batch
    /// fetched for [`EphemerisTicket::instant`].
    pub fn begin_time_advance(
        &mut self,
        instant: UnixSeconds,
    ) -> Result<EphemerisTicket, SkyframeError> {
        check_instant(instant)?;
        Ok(self.issue_ticket(instant, true))
    }

    fn issue_ticket(&mut self, instant: UnixSeconds, advances_time: bool) -> EphemerisTicket {
        self.issued_sequence += 1;
        let ticket = EphemerisTicket {
            sequence: self.issued_sequence,
            instant,
            advances_time,
        };
        debug!(
            sequence = ticket.sequence,
            epoch = %instant_to_epoch(instant),
            advances_time,
            "ephemeris ticket issued"
        );
        ticket
    }

    fn outdated(&self, ticket: &EphemerisTicket) -> BatchOutcome {
        warn!(
            sequence = ticket.sequence,
            ticket_epoch = %instant_to_epoch(ticket.instant),
            frame_epoch = %instant_to_epoch(self.instant),
            "ephemeris batch for a previous instant discarded"
        );
        BatchOutcome::Outdated {
            sequence: ticket.sequence,
        }
    }

    /// Apply the results fetched for `ticket` in a single update.
    ///
    /// Arguments
    /// ---------
    /// * `ticket`: the ticket the batch was fetched for
    /// * `batch`: one result per requested body
    ///
    /// Return
    /// ------
    /// * [`BatchOutcome::Stale`] if a batch with a newer ticket was already applied.
    /// * [`BatchOutcome::Outdated`] if the frame instant changed since the ticket was issued,
    ///   or the ticket targets another instant.
    /// * [`BatchOutcome::Applied`] otherwise, listing the bodies replaced and the ones kept at
    ///   their last-known state because their result was an error.
    ///
    /// Nothing changes when the batch is discarded.
    pub fn apply_ephemeris_batch(
        &mut self,
        ticket: EphemerisTicket,
        batch: Vec<BodyResult>,
    ) -> BatchOutcome {
        if ticket.sequence <= self.applied_sequence {
            warn!(
                sequence = ticket.sequence,
                applied = self.applied_sequence,
                "stale ephemeris batch discarded"
            );
            return BatchOutcome::Stale {
                sequence: ticket.sequence,
                applied: self.applied_sequence,
            };
        }
        if ticket.sequence <= self.instant_sequence || ticket.instant != self.instant {
            return self.outdated(&ticket);
        }

        self.apply_bodies(&ticket, batch)
    }

    /// Move the frame to the instant of a time-advance ticket and apply its batch, in one
    /// update.
    ///
    /// Arguments
    /// ---------
    /// * `ticket`: a ticket from [`ObservationFrame::begin_time_advance`]
    /// * `batch`: one result per requested body, fetched for the ticket instant
    ///
    /// Return
    /// ------
    /// * [`BatchOutcome::Outdated`] if the instant was changed by a newer call, or if `ticket`
    ///   is a plain update ticket; nothing changes in that case.
    /// * [`BatchOutcome::Applied`] otherwise, after the instant, the rotation, the Sun and the
    ///   bodies were updated.
    /// * An error if the Sun cannot be computed for the ticket instant.
    pub fn apply_time_advance(
        &mut self,
        ticket: EphemerisTicket,
        batch: Vec<BodyResult>,
    ) -> Result<BatchOutcome, SkyframeError> {
        if !ticket.advances_time || ticket.sequence <= self.instant_sequence {
            return Ok(self.outdated(&ticket));
        }

        self.move_to(ticket.instant)?;
        self.instant_sequence = ticket.sequence;
        Ok(self.apply_bodies(&ticket, batch))
    }

    fn apply_bodies(&mut self, ticket: &EphemerisTicket, batch: Vec<BodyResult>) -> BatchOutcome {
        let mut replacements = Vec::with_capacity(batch.len());
        let mut kept = Vec::new();
        for (body, result) in batch {
            let sample = result.and_then(|sample| {
                let direction = to_direction(sample.ra, sample.dec)?;
                let size = self.scaler.size_for_magnitude(sample.magnitude)?;
                Ok((sample, direction, size))
            });
            match sample {
                Ok((sample, direction, size)) => replacements.push((
                    body,
                    CelestialBody {
                        name: body.name().to_string(),
                        kind: BodyKind::Ephemeris(body),
                        direction,
                        magnitude: sample.magnitude,
                        size,
                        computed_at: Some(ticket.instant),
                    },
                )),
                Err(e) => {
                    warn!(
                        body = %body,
                        kind = e.kind(),
                        error = %e,
                        "ephemeris update failed, keeping last-known position"
                    );
                    kept.push(body);
                }
            }
        }

        let updated = replacements
            .into_iter()
            .map(|(body, celestial)| {
                self.bodies.insert(body, celestial);
                body
            })
            .collect();
        self.applied_sequence = self.applied_sequence.max(ticket.sequence);

        BatchOutcome::Applied { updated, kept }
    }
}
