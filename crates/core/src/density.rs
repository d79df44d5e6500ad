//! Pure sizing and falloff formulas shared by the field and its hosts.

/// Upper bound on the nodes a single field will hold, whatever the canvas size.
pub const MAX_NODES: usize = 20_000;

/// Node count for a backing buffer: `round(base * (w * h) / reference_area)`,
/// capped at [`MAX_NODES`].
///
/// `f64::round` rounds halves away from zero, which for these non-negative
/// inputs is round-half-up (17.5 -> 18).
pub fn node_count(base: usize, width: u32, height: u32, reference_area: f64) -> usize {
    if reference_area.is_nan() || reference_area <= 0.0 {
        return 0;
    }
    let area = width as f64 * height as f64;
    let count = (base as f64 * area / reference_area).round();
    count.min(MAX_NODES as f64) as usize
}

/// Maximum connection distance: `min(width, height) * ratio`. Zero for an
/// empty canvas, which means no pair ever connects.
pub fn connection_threshold(width: f64, height: f64, ratio: f64) -> f64 {
    width.min(height) * ratio
}

/// Line alpha for two nodes `distance` apart: `base * (1 - distance / threshold)`.
///
/// Linear falloff from `base` at distance 0 to 0 at the threshold, clamped
/// to 0 beyond it and for a zero threshold.
pub fn falloff_alpha(distance: f64, threshold: f64, base: f64) -> f64 {
    if threshold <= 0.0 {
        return 0.0;
    }
    (base * (1.0 - distance / threshold)).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_HD: f64 = 1920.0 * 1080.0;

    #[test]
    fn full_hd_gives_base_count() {
        assert_eq!(node_count(70, 1920, 1080, FULL_HD), 70);
        assert_eq!(node_count(35, 1920, 1080, FULL_HD), 35);
    }

    #[test]
    fn quarter_area_rounds_half_up() {
        // 70 * 0.25 = 17.5
        assert_eq!(node_count(70, 960, 540, FULL_HD), 18);
    }

    #[test]
    fn high_density_display_scales_with_backing_area() {
        // 1440x900 CSS at dpr 2 -> 2880x1800 backing
        assert_eq!(node_count(70, 2880, 1800, FULL_HD), 175);
    }

    #[test]
    fn empty_canvas_has_no_nodes() {
        assert_eq!(node_count(70, 0, 1080, FULL_HD), 0);
        assert_eq!(node_count(70, 1920, 0, FULL_HD), 0);
        assert_eq!(node_count(70, 100, 100, 0.0), 0);
    }

    #[test]
    fn count_is_capped_for_huge_inputs() {
        assert_eq!(node_count(usize::MAX, 1920, 1080, FULL_HD), MAX_NODES);
        assert_eq!(node_count(1_000, u32::MAX, u32::MAX, FULL_HD), MAX_NODES);
        assert_eq!(node_count(70, 1920, 1080, f64::NAN), 0);
    }

    #[test]
    fn threshold_uses_shorter_side() {
        assert!((connection_threshold(1920.0, 1080.0, 0.08) - 86.4).abs() < 1e-9);
        assert_eq!(connection_threshold(0.0, 1080.0, 0.08), 0.0);
    }

    #[test]
    fn falloff_endpoints() {
        assert!((falloff_alpha(0.0, 86.4, 0.15) - 0.15).abs() < f64::EPSILON);
        assert_eq!(falloff_alpha(86.4, 86.4, 0.15), 0.0);
        assert!((falloff_alpha(43.2, 86.4, 0.15) - 0.075).abs() < 1e-12);
    }

    #[test]
    fn falloff_degenerate_threshold_is_zero() {
        assert_eq!(falloff_alpha(0.0, 0.0, 0.15), 0.0);
        assert_eq!(falloff_alpha(200.0, 86.4, 0.15), 0.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn count_matches_formula(
                w in 1_u32..4000,
                h in 1_u32..4000,
                dpr in prop::sample::select(vec![1.0_f64, 1.5, 2.0, 3.0]),
                reduced: bool,
            ) {
                let base = if reduced { 35 } else { 70 };
                let bw = (w as f64 * dpr).floor() as u32;
                let bh = (h as f64 * dpr).floor() as u32;
                let expected = (base as f64 * (bw as f64 * bh as f64) / FULL_HD).round() as usize;
                let expected = expected.min(MAX_NODES);
                prop_assert_eq!(node_count(base, bw, bh, FULL_HD), expected);
            }

            #[test]
            fn falloff_is_monotone_and_bounded(
                a in 0.0_f64..100.0,
                b in 0.0_f64..100.0,
                threshold in 1.0_f64..100.0,
            ) {
                let (near, far) = if a <= b { (a, b) } else { (b, a) };
                let an = falloff_alpha(near, threshold, 0.15);
                let af = falloff_alpha(far, threshold, 0.15);
                prop_assert!(an >= af);
                prop_assert!((0.0..=0.15).contains(&an));
            }
        }
    }
}
