use crate::models::{PieSegment, PieSlice};

/// Neutral fill for the synthetic unspent wedge.
pub const REMAINING_COLOR: &str = "#E5E7EB";
pub const REMAINING_LABEL: &str = "Remaining";

const FULL_CIRCLE: f64 = 360.0;

/// Lay out proportional arc segments for the given slices.
///
/// Segments accumulate consecutively from 0° in the order the slices are
/// given; ordering is the caller's responsibility (ranker output, or a
/// card's breakdown insertion order). When the slices sum to less than the
/// denominator a synthetic "Remaining" wedge closes the circle. When they
/// meet or exceed it (over-budget) no wedge is added. Division is guarded:
/// a zero denominator produces 0% segments, and zero entries with a zero
/// denominator produce nothing at all rather than a misleading full
/// "Remaining" circle.
pub fn segment(slices: &[PieSlice], denominator: i64) -> Vec<PieSegment> {
    if slices.is_empty() && denominator <= 0 {
        return Vec::new();
    }

    let percentage_of = |amount: i64| {
        if denominator > 0 {
            amount as f64 / denominator as f64 * 100.0
        } else {
            0.0
        }
    };

    let mut segments = Vec::with_capacity(slices.len() + 1);
    let mut start_angle = 0.0;
    let mut allocated = 0;

    for slice in slices {
        let percentage = percentage_of(slice.amount);
        let sweep_angle = percentage / 100.0 * FULL_CIRCLE;

        segments.push(PieSegment {
            label: slice.label.clone(),
            amount: slice.amount,
            percentage,
            start_angle,
            sweep_angle,
            large_arc: sweep_angle > 180.0,
            color: slice.color.clone(),
        });

        start_angle += sweep_angle;
        allocated += slice.amount;
    }

    if allocated < denominator {
        let amount = denominator - allocated;
        let percentage = percentage_of(amount);
        let sweep_angle = percentage / 100.0 * FULL_CIRCLE;

        segments.push(PieSegment {
            label: REMAINING_LABEL.to_string(),
            amount,
            percentage,
            start_angle,
            sweep_angle,
            large_arc: sweep_angle > 180.0,
            color: REMAINING_COLOR.to_string(),
        });
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(label: &str, amount: i64) -> PieSlice {
        PieSlice { label: label.into(), amount, color: "#3B82F6".into() }
    }

    #[test]
    fn test_segments_accumulate_in_input_order() {
        let segments = segment(&[slice("A", 2500), slice("B", 2500)], 10000);

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].start_angle, 0.0);
        assert_eq!(segments[0].sweep_angle, 90.0);
        assert_eq!(segments[1].start_angle, 90.0);
        assert_eq!(segments[1].sweep_angle, 90.0);

        let remaining = &segments[2];
        assert_eq!(remaining.label, REMAINING_LABEL);
        assert_eq!(remaining.amount, 5000);
        assert_eq!(remaining.start_angle, 180.0);
        assert_eq!(remaining.sweep_angle, 180.0);
        assert_eq!(remaining.color, REMAINING_COLOR);
    }

    #[test]
    fn test_pie_closes_to_full_circle() {
        let segments = segment(&[slice("A", 1234), slice("B", 873), slice("C", 4422)], 20000);
        let total_sweep: f64 = segments.iter().map(|s| s.sweep_angle).sum();
        assert!((total_sweep - 360.0).abs() < 1e-9);
    }

    #[test]
    fn test_exactly_spent_has_no_remaining_wedge() {
        let segments = segment(&[slice("A", 10000)], 10000);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].sweep_angle, 360.0);
        assert!(segments[0].large_arc);
    }

    #[test]
    fn test_over_budget_has_no_remaining_wedge() {
        let segments = segment(&[slice("A", 15000)], 10000);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].percentage, 150.0);
        assert_eq!(segments[0].sweep_angle, 540.0);
    }

    #[test]
    fn test_large_arc_flag_threshold() {
        // 55% sweeps 198°, which needs the large-arc path variant.
        let segments = segment(&[slice("A", 5500), slice("B", 4500)], 10000);
        assert!(segments[0].large_arc);
        assert!(!segments[1].large_arc);

        // Exactly half does not.
        let half = segment(&[slice("A", 5000)], 10000);
        assert!(!half[0].large_arc);
    }

    #[test]
    fn test_zero_denominator_with_entries_is_all_zero() {
        let segments = segment(&[slice("A", 5000)], 0);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].percentage, 0.0);
        assert_eq!(segments[0].sweep_angle, 0.0);
    }

    #[test]
    fn test_zero_denominator_and_no_entries_is_empty() {
        // A zero-limit card must not render as a fully available circle.
        assert!(segment(&[], 0).is_empty());
    }

    #[test]
    fn test_no_entries_with_denominator_yields_single_remaining() {
        let segments = segment(&[], 10000);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].label, REMAINING_LABEL);
        assert_eq!(segments[0].sweep_angle, 360.0);
    }
}
