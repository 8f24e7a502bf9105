//! Duplicate search between a new read and the previous frame's entries.

use crate::tracker::entry::Entry;
use crate::tracker::region::{Region, centers_overlap};

/// Whether a candidate region overlaps an entry's expanded region.
///
/// Overlap means either region's center lies inside the other.
#[inline]
pub fn has_overlap(candidate: &Region, expanded: &Region) -> bool {
    centers_overlap(candidate, expanded)
}

/// Find the previous-frame entry a new read duplicates.
///
/// `claimed[i]` marks entries already matched earlier in this frame; they are
/// skipped. The first unclaimed entry with an equal payload and overlapping
/// regions wins, in `previous` order. Returns its index.
pub fn find_duplicate<P: PartialEq, M>(
    payload: &P,
    region: &Region,
    previous: &[Entry<P, M>],
    claimed: &[bool],
) -> Option<usize> {
    previous.iter().enumerate().position(|(i, entry)| {
        !claimed[i] && entry.payload() == payload && has_overlap(region, entry.expanded_region())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::region::ExpansionProfile;

    fn entry(id: u64, payload: &'static str, region: Region) -> Entry<&'static str, ()> {
        Entry::new(id, payload, region, (), 0, &ExpansionProfile::default()).unwrap()
    }

    #[test]
    fn test_match_requires_equal_payload() {
        let previous = vec![entry(0, "A", Region::from_tlbr(0, 0, 100, 100))];
        let region = Region::from_tlbr(5, 5, 105, 105);

        assert_eq!(find_duplicate(&"A", &region, &previous, &[false]), Some(0));
        assert_eq!(find_duplicate(&"B", &region, &previous, &[false]), None);
    }

    #[test]
    fn test_no_match_when_far_apart() {
        let previous = vec![entry(0, "A", Region::from_tlbr(0, 0, 100, 100))];
        let region = Region::from_tlbr(500, 500, 600, 600);
        assert_eq!(find_duplicate(&"A", &region, &previous, &[false]), None);
    }

    #[test]
    fn test_expanded_region_tolerates_vertical_jitter() {
        // Flat code, 100x10. A 20px vertical jump leaves the plain regions
        // disjoint but still inside the expanded one.
        let old = Region::from_tlbr(0, 0, 100, 10);
        let new = Region::from_tlbr(0, 20, 100, 30);
        assert!(!centers_overlap(&old, &new));

        let previous = vec![entry(0, "A", old)];
        assert_eq!(find_duplicate(&"A", &new, &previous, &[false]), Some(0));
    }

    #[test]
    fn test_candidate_covering_old_expanded_center_matches() {
        // The small old code's expanded center sits inside the large new
        // region, while the new center lies outside the old expanded region.
        let old = Region::from_tlbr(0, 0, 10, 10);
        let new = Region::from_tlbr(-200, -200, 300, 300);
        let expanded = old.expanded().unwrap();
        assert!(!expanded.contains(&new.center()));
        assert!(new.contains(&expanded.center()));

        let previous = vec![entry(0, "A", old)];
        assert_eq!(find_duplicate(&"A", &new, &previous, &[false]), Some(0));
    }

    #[test]
    fn test_claimed_entries_are_skipped() {
        let region = Region::from_tlbr(0, 0, 100, 100);
        let previous = vec![entry(0, "A", region), entry(1, "A", region)];

        assert_eq!(find_duplicate(&"A", &region, &previous, &[false, false]), Some(0));
        assert_eq!(find_duplicate(&"A", &region, &previous, &[true, false]), Some(1));
        assert_eq!(find_duplicate(&"A", &region, &previous, &[true, true]), None);
    }

    #[test]
    fn test_first_match_wins_over_closer_match() {
        let previous = vec![
            entry(0, "A", Region::from_tlbr(0, 0, 100, 100)),
            entry(1, "A", Region::from_tlbr(20, 20, 120, 120)),
        ];
        // Exactly on top of entry 1, but entry 0 also overlaps and comes first.
        let region = Region::from_tlbr(20, 20, 120, 120);
        assert_eq!(find_duplicate(&"A", &region, &previous, &[false, false]), Some(0));
    }
}
