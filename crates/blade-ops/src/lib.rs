//! Blade construction pipeline on top of the host kernel: shaft frame,
//! helix guides, ruled surfaces, thickened flights and the composed blade.

pub mod blade;
pub mod config;
pub mod flight;
pub mod frame;
pub mod helix;
pub mod kernel_ext;
pub mod math;
pub mod params;
pub mod surface;
pub mod types;

pub use blade::{blade_body_name, compose_blade, flight_phases};
pub use config::{BuildConfig, ConfigError};
pub use flight::{band_thickness, build_flight, taper_bands, TaperBand};
pub use frame::{resolve_shaft_frame, shaft_radius, ShaftFrame};
pub use helix::{
    variable_pitch_segments, variable_pitch_stations, HelixBuilder, HelixProfile, HelixSignMode,
    HelixSpec, HelixStation, PitchSegment,
};
pub use kernel_ext::KernelBundle;
pub use params::BladeParameters;
pub use surface::{build_surface_between, phase_at_fraction, GuideRing};
pub use types::*;
