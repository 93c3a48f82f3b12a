mod common;

use cane_core::config::DetectorCfg;
use cane_core::detector::FallDetector;
use cane_core::locate::parse_fix_sentence;
use cane_core::motion::AccelSample;
use proptest::prelude::*;

proptest! {
    /// The baseline after N observed samples is exactly the N-th sample's
    /// magnitude, for any sequence.
    #[test]
    fn baseline_tracks_last_sample(
        seq in prop::collection::vec((-4.0f32..4.0, -4.0f32..4.0, -4.0f32..4.0), 1..64)
    ) {
        let mut det = FallDetector::new(DetectorCfg::default());
        for &(x, y, z) in &seq {
            det.observe(&AccelSample { x, y, z });
        }
        let (x, y, z) = *seq.last().unwrap();
        prop_assert_eq!(det.prev_magnitude(), AccelSample { x, y, z }.magnitude());
    }

    /// The sentence parser never panics, whatever the receiver emits.
    #[test]
    fn fix_parser_never_panics(line in ".{0,200}") {
        let _ = parse_fix_sentence(&line);
    }

    /// Comma-heavy near-miss sentences are handled gracefully too.
    #[test]
    fn fix_parser_survives_arbitrary_fields(
        fields in prop::collection::vec("[^,\\r\\n]{0,12}", 0..12)
    ) {
        let line = format!("$GPGGA,{}", fields.join(","));
        let _ = parse_fix_sentence(&line);
    }

    /// Hand-rolled ddmm.mmmm values round-trip within float tolerance.
    #[test]
    fn ddmm_values_convert_consistently(
        deg in 0u32..90,
        minutes in 0.0f64..60.0,
    ) {
        let line = format!(
            "$GPGGA,123519,{:02}{:07.4},N,{:03}{:07.4},E,1,08,0.9,545.4,M,46.9,M,,*47",
            deg, minutes, deg, minutes
        );
        let c = parse_fix_sentence(&line).unwrap();
        let expected = deg as f64 + minutes / 60.0;
        prop_assert!((c.lat - expected).abs() < 1e-6);
        prop_assert!((c.lon - expected).abs() < 1e-6);
    }
}
