#[cfg(test)]
mod tests {
    use crate::conflict::overlaps;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use proptest::prelude::*;

    // Helper mapping a minute offset onto a fixed day
    fn instant(offset_minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(offset_minutes)
    }

    proptest! {
        // Overlap must not depend on argument order
        #[test]
        fn overlap_is_symmetric(
            a_start in 0..500i64,
            a_len in 1..100i64,
            b_start in 0..500i64,
            b_len in 1..100i64,
        ) {
            let (a0, a1) = (instant(a_start), instant(a_start + a_len));
            let (b0, b1) = (instant(b_start), instant(b_start + b_len));

            prop_assert_eq!(
                overlaps(a0, a1, b0, b1),
                overlaps(b0, b1, a0, a1),
                "overlap must be symmetric for [{},{}) vs [{},{})",
                a_start, a_start + a_len, b_start, b_start + b_len
            );
        }

        // Half-open semantics: an interval starting where another ends is free
        #[test]
        fn touching_intervals_never_overlap(
            start in 0..500i64,
            len_a in 1..100i64,
            len_b in 1..100i64,
        ) {
            let a0 = instant(start);
            let a1 = instant(start + len_a);
            let b1 = instant(start + len_a + len_b);

            prop_assert!(!overlaps(a0, a1, a1, b1));
            prop_assert!(!overlaps(a1, b1, a0, a1));
        }

        #[test]
        fn contained_interval_always_overlaps(
            start in 0..500i64,
            len in 3..100i64,
        ) {
            let outer0 = instant(start);
            let outer1 = instant(start + len);
            let inner0 = instant(start + 1);
            let inner1 = instant(start + len - 1);

            prop_assert!(overlaps(outer0, outer1, inner0, inner1));
        }

        #[test]
        fn interval_overlaps_itself(start in 0..500i64, len in 1..100i64) {
            let a0 = instant(start);
            let a1 = instant(start + len);
            prop_assert!(overlaps(a0, a1, a0, a1));
        }

        // A real gap between intervals means no conflict either way
        #[test]
        fn gapped_intervals_never_overlap(
            start in 0..500i64,
            len_a in 1..100i64,
            gap in 1..50i64,
            len_b in 1..100i64,
        ) {
            let a0 = instant(start);
            let a1 = instant(start + len_a);
            let b0 = instant(start + len_a + gap);
            let b1 = instant(start + len_a + gap + len_b);

            prop_assert!(!overlaps(a0, a1, b0, b1));
            prop_assert!(!overlaps(b0, b1, a0, a1));
        }
    }
}
