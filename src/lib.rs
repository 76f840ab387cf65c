//! # skyframe
//!
//! Celestial coordinate and time transforms for a live sky view.
//!
//! Catalog and ephemeris coordinates become unit [`ref_system::Direction`]s of one fixed
//! equatorial frame. An [`observation_frame::ObservationFrame`] orients that frame to an
//! observer's horizon at a given instant, computes the Sun locally and keeps the Moon and the
//! planets up to date from JPL Horizons ([`jpl_request`]).
//!
//! ```rust
//! use skyframe::catalog::read_json_catalog;
//! use skyframe::frame_params::FrameParams;
//! use skyframe::observation_frame::ObservationFrame;
//! use skyframe::time::parse_instant;
//!
//! let catalog = read_json_catalog(
//!     r#"[{"RA": "06h 45m 08.9s", "Dec": "-16° 42′ 58″", "V": -1.46, "N": "Sirius"}]"#.as_bytes(),
//! )
//! .unwrap();
//! let instant = parse_instant("2024-03-20T03:06:00").unwrap();
//!
//! let mut frame = ObservationFrame::new(FrameParams::default(), instant, &catalog).unwrap();
//! frame.set_location(48.85, 2.35).unwrap();
//!
//! let sirius = &frame.stars()[0];
//! let altitude = frame.horizon_altitude(&sirius.direction);
//! assert!((-90.0..=90.0).contains(&altitude));
//! ```
pub mod catalog;
pub mod constants;
pub mod conversion;
pub mod env_state;
pub mod frame_params;
pub mod jpl_request;
pub mod magnitude;
pub mod observation_frame;
pub mod observers;
pub mod ref_system;
pub mod skyframe_errors;
pub mod solar_ephemeris;
pub mod time;
