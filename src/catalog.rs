//! # Star catalog and celestial bodies
//!
//! The star catalog is an ordered list of `{RA, Dec, V, name}` records, read once at start-up
//! from JSON or CSV. Each record is parsed through the catalog angle parser and turned into a
//! [`CelestialBody`] whose direction never changes afterwards.
//!
//! Movable bodies (Sun, Moon, planets) use the same [`CelestialBody`] type, carry the instant
//! at which they were computed, and are replaced wholesale on every update.
use std::io::Read;

use serde::Deserialize;
use tracing::info;

use crate::constants::UnixSeconds;
use crate::conversion::{parse_catalog_dec, parse_catalog_ra};
use crate::jpl_request::horizon_ids::TrackedBody;
use crate::magnitude::MagnitudeScaler;
use crate::ref_system::{to_direction, Direction};
use crate::skyframe_errors::SkyframeError;

/// One entry of the star catalog, as found in the Yale Bright Star extract.
///
/// The display name is `name` (or `N`), falling back to the Harvard Revised number.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StarRecord {
    #[serde(rename = "RA")]
    pub ra: String,
    #[serde(rename = "Dec")]
    pub dec: String,
    #[serde(rename = "V")]
    pub vmag: f64,
    #[serde(default, alias = "N")]
    pub name: Option<String>,
    #[serde(default, rename = "HR")]
    pub hr: Option<u32>,
}

impl StarRecord {
    pub fn display_name(&self) -> String {
        match (&self.name, self.hr) {
            (Some(name), _) if !name.trim().is_empty() => name.trim().to_string(),
            (_, Some(hr)) => format!("HR {hr}"),
            _ => "unnamed".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Star,
    Sun,
    Ephemeris(TrackedBody),
}

/// A named object placed on the sky.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    pub name: String,
    pub kind: BodyKind,
    pub direction: Direction,
    pub magnitude: f64,
    pub size: f64,
    /// Instant of the last computation; `None` for catalog stars.
    pub computed_at: Option<UnixSeconds>,
}

impl CelestialBody {
    /// Build a catalog star from its record.
    ///
    /// Return
    /// ------
    /// * The star, or [`SkyframeError::Format`] if the angles or the magnitude are malformed.
    pub fn from_record(
        record: &StarRecord,
        scaler: &MagnitudeScaler,
    ) -> Result<Self, SkyframeError> {
        let ra = parse_catalog_ra(&record.ra)?;
        let dec = parse_catalog_dec(&record.dec)?;
        if !record.vmag.is_finite() {
            return Err(SkyframeError::Format(format!(
                "magnitude {} is not finite",
                record.vmag
            )));
        }
        Ok(CelestialBody {
            name: record.display_name(),
            kind: BodyKind::Star,
            direction: to_direction(ra, dec)?,
            magnitude: record.vmag,
            size: scaler.size_for_magnitude(record.vmag)?,
            computed_at: None,
        })
    }
}

/// Turn every record into a star, failing on the first malformed entry.
///
/// The error names the index and the display name of the offending record so that a broken
/// catalog line can be found.
pub fn build_stars(
    records: &[StarRecord],
    scaler: &MagnitudeScaler,
) -> Result<Vec<CelestialBody>, SkyframeError> {
    let stars = records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            CelestialBody::from_record(record, scaler).map_err(|e| match e {
                SkyframeError::Format(msg) => SkyframeError::Format(format!(
                    "catalog entry {idx} ({}): {msg}",
                    record.display_name()
                )),
                other => other,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    info!(stars = stars.len(), "star catalog loaded");
    Ok(stars)
}

/// Read a JSON array of star records.
pub fn read_json_catalog<R: Read>(reader: R) -> Result<Vec<StarRecord>, SkyframeError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Read a CSV catalog with an `RA,Dec,V,name,HR` header (the last two columns are optional).
pub fn read_csv_catalog<R: Read>(reader: R) -> Result<Vec<StarRecord>, SkyframeError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    csv_reader
        .deserialize::<StarRecord>()
        .map(|record| record.map_err(SkyframeError::from))
        .collect()
}
