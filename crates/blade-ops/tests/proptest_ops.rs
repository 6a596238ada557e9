use std::f64::consts::TAU;

use blade_ops::*;
use proptest::prelude::*;

fn arb_pitch() -> impl Strategy<Value = f64> {
    1.0f64..500.0
}

proptest! {
    #[test]
    fn phase_is_linear(base in -10.0f64..10.0, wrap in 0.0f64..2.1, f in 0.0f64..1.0, right in any::<bool>()) {
        let sign = if right { 1.0 } else { -1.0 };
        let at0 = phase_at_fraction(base, sign, wrap, 0.0);
        let at1 = phase_at_fraction(base, sign, wrap, 1.0);
        let mid = phase_at_fraction(base, sign, wrap, f);
        prop_assert!((at0 - base).abs() < 1e-12);
        prop_assert!((mid - (at0 + (at1 - at0) * f)).abs() < 1e-9);
    }

    #[test]
    fn variable_stations_reach_mean_pitch_length(
        turns in 0.1f64..20.0,
        p0 in arb_pitch(),
        p1 in arb_pitch(),
        segments in 1usize..64,
    ) {
        let stations = variable_pitch_stations(turns, p0, p1, segments);
        prop_assert_eq!(stations.len(), segments + 1);
        let last = stations[segments];
        prop_assert!((last.z - turns * 0.5 * (p0 + p1)).abs() < 1e-6 * last.z.max(1.0));
        prop_assert!((last.angle - TAU * turns).abs() < 1e-9);
        for pair in stations.windows(2) {
            prop_assert!(pair[1].z > pair[0].z);
        }
    }

    #[test]
    fn segment_pitch_stays_between_endpoints(
        turns in 0.5f64..10.0,
        p0 in arb_pitch(),
        p1 in arb_pitch(),
    ) {
        let lo = p0.min(p1) - 1e-6;
        let hi = p0.max(p1) + 1e-6;
        for seg in variable_pitch_segments(turns, p0, p1, 24, 1e-9) {
            prop_assert!(seg.pitch >= lo && seg.pitch <= hi);
        }
    }

    #[test]
    fn taper_bands_cover_span(bands in 1usize..16, overlap in 0.0f64..0.1, hub in 0.5f64..10.0, ratio in 0.05f64..1.0) {
        let tip = hub * ratio;
        let list = taper_bands(bands, overlap);
        prop_assert_eq!(list.len(), bands);
        prop_assert_eq!(list[0].t0e, 0.0);
        prop_assert_eq!(list[bands - 1].t1e, 1.0);
        for band in &list {
            prop_assert!(band.t0e <= band.t0 && band.t1 <= band.t1e);
            let t = band_thickness(hub, tip, band.t_mid);
            prop_assert!(t <= hub + 1e-12 && t >= tip - 1e-12);
        }
    }

    #[test]
    fn flight_phases_are_equally_spaced(start in -3.0f64..3.0, n in 1usize..12) {
        let phases = flight_phases(start, n);
        prop_assert_eq!(phases.len(), n);
        for pair in phases.windows(2) {
            prop_assert!((pair[1] - pair[0] - TAU / n as f64).abs() < 1e-9);
        }
    }
}
