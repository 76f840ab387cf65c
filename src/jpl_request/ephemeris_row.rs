//! Parser for the Horizons observer table.
//!
//! A response to an `EPHEM_TYPE='OBSERVER'`, `QUANTITIES='1,9'` query looks like:
//!
//! ```text
//! *******************************************************************************
//!  Date__(UT)__HR:MN     R.A._(ICRF)_DEC    APmag   S-brt
//! *******************************************************************************
//! $$SOE
//!  2024-Mar-20 00:00     23 59 11.29 -00 05 08.9  -26.897  -16.019
//!  2024-Mar-20 01:00     23 59 20.39 -00 04 09.7  -26.897  -16.019
//! $$EOE
//! ```
//!
//! Only one row is read: the line found `row_offset` lines after the `$$SOE` marker. Its
//! whitespace tokens are taken at fixed column offsets given by [`EphemerisLayout`].
use crate::constants::Degree;
use crate::conversion::{ephemeris_dec, ephemeris_ra};
use crate::skyframe_errors::SkyframeError;

const START_OF_EPHEMERIS: &str = "$$SOE";
const END_OF_EPHEMERIS: &str = "$$EOE";

/// Location of the fields inside the observer table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EphemerisLayout {
    /// Line offset of the data row, counted from the `$$SOE` marker line (1 = first data line).
    pub row_offset: usize,
    /// Token index of the RA hours; minutes and seconds follow.
    pub ra_column: usize,
    /// Token index of the signed Dec degrees; minutes and seconds follow.
    pub dec_column: usize,
    /// Token index of the apparent magnitude.
    pub magnitude_column: usize,
}

impl Default for EphemerisLayout {
    fn default() -> Self {
        EphemerisLayout {
            row_offset: 1,
            ra_column: 2,
            dec_column: 5,
            magnitude_column: 8,
        }
    }
}

/// Position and brightness of one body at one time step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EphemerisSample {
    pub ra: Degree,
    pub dec: Degree,
    pub magnitude: f64,
}

fn field<'a>(tokens: &[&'a str], idx: usize, row: &str) -> Result<&'a str, SkyframeError> {
    tokens.get(idx).copied().ok_or_else(|| {
        SkyframeError::EphemerisFormat(format!(
            "row has {} fields, field {idx} is missing: {row:?}",
            tokens.len()
        ))
    })
}

/// Extract the data row from a raw Horizons response.
fn data_row<'a>(response: &'a str, layout: &EphemerisLayout) -> Result<&'a str, SkyframeError> {
    let mut lines = response
        .lines()
        .skip_while(|line| line.trim() != START_OF_EPHEMERIS);

    if lines.next().is_none() {
        return Err(SkyframeError::EphemerisFormat(
            "no $$SOE marker in ephemeris response".into(),
        ));
    }

    let row = layout
        .row_offset
        .checked_sub(1)
        .and_then(|n| lines.nth(n))
        .ok_or_else(|| {
            SkyframeError::EphemerisFormat(format!(
                "ephemeris response has no row at offset {}",
                layout.row_offset
            ))
        })?;

    if row.trim() == END_OF_EPHEMERIS || row.trim().is_empty() {
        return Err(SkyframeError::EphemerisFormat(format!(
            "ephemeris table ends before offset {}",
            layout.row_offset
        )));
    }
    Ok(row)
}

/// Parse the observer table of a Horizons response into one [`EphemerisSample`].
///
/// Arguments
/// ---------
/// * `response`: the raw text returned by the Horizons API (`format=text`)
/// * `layout`: where to find the row and its fields
///
/// Return
/// ------
/// * The sample, or [`SkyframeError::EphemerisFormat`] for a missing marker, a short row or a
///   non-numeric field (Horizons prints `n.a.` when a quantity is unavailable).
pub fn parse_observer_table(
    response: &str,
    layout: &EphemerisLayout,
) -> Result<EphemerisSample, SkyframeError> {
    let row = data_row(response, layout)?;
    let tokens: Vec<&str> = row.split_whitespace().collect();

    let ra = ephemeris_ra(
        field(&tokens, layout.ra_column, row)?,
        field(&tokens, layout.ra_column + 1, row)?,
        field(&tokens, layout.ra_column + 2, row)?,
    )?;
    let dec = ephemeris_dec(
        field(&tokens, layout.dec_column, row)?,
        field(&tokens, layout.dec_column + 1, row)?,
        field(&tokens, layout.dec_column + 2, row)?,
    )?;

    let magnitude_token = field(&tokens, layout.magnitude_column, row)?;
    let magnitude = magnitude_token
        .parse::<f64>()
        .ok()
        .filter(|m| m.is_finite())
        .ok_or_else(|| {
            SkyframeError::EphemerisFormat(format!(
                "invalid apparent magnitude {magnitude_token:?} in {row:?}"
            ))
        })?;

    Ok(EphemerisSample { ra, dec, magnitude })
}
