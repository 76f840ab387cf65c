use crate::skyframe_errors::SkyframeError;

/// Bodies whose position comes from JPL Horizons, keyed by their Horizons `COMMAND` id.
///
/// Conversions
/// -----------
/// * Use [`TryFrom<i32>`] to convert a raw Horizons id into a `TrackedBody`. Unknown ids
///   return [`SkyframeError::UnknownBody`].
/// * Use [`From<TrackedBody>`] to recover the id for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TrackedBody {
    Sun = 10,
    Mercury = 199,
    Venus = 299,
    Moon = 301,
    Mars = 499,
    Jupiter = 599,
    Saturn = 699,
    Uranus = 799,
    Neptune = 899,
}

impl TrackedBody {
    /// Bodies refreshed from the ephemeris service by default. The Sun is computed analytically
    /// and is not part of it.
    pub const DEFAULT_SET: [TrackedBody; 8] = [
        TrackedBody::Moon,
        TrackedBody::Mercury,
        TrackedBody::Venus,
        TrackedBody::Mars,
        TrackedBody::Jupiter,
        TrackedBody::Saturn,
        TrackedBody::Uranus,
        TrackedBody::Neptune,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TrackedBody::Sun => "Sun",
            TrackedBody::Mercury => "Mercury",
            TrackedBody::Venus => "Venus",
            TrackedBody::Moon => "Moon",
            TrackedBody::Mars => "Mars",
            TrackedBody::Jupiter => "Jupiter",
            TrackedBody::Saturn => "Saturn",
            TrackedBody::Uranus => "Uranus",
            TrackedBody::Neptune => "Neptune",
        }
    }

    /// Horizons `COMMAND` value for this body.
    pub fn command(&self) -> String {
        format!("'{}'", i32::from(*self))
    }
}

impl TryFrom<i32> for TrackedBody {
    type Error = SkyframeError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            10 => Ok(TrackedBody::Sun),
            199 => Ok(TrackedBody::Mercury),
            299 => Ok(TrackedBody::Venus),
            301 => Ok(TrackedBody::Moon),
            499 => Ok(TrackedBody::Mars),
            599 => Ok(TrackedBody::Jupiter),
            699 => Ok(TrackedBody::Saturn),
            799 => Ok(TrackedBody::Uranus),
            899 => Ok(TrackedBody::Neptune),
            _ => Err(SkyframeError::UnknownBody(value)),
        }
    }
}

impl From<TrackedBody> for i32 {
    fn from(body: TrackedBody) -> Self {
        body as i32
    }
}

impl std::fmt::Display for TrackedBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
