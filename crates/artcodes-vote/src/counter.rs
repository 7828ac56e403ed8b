//! Per-code consecutive-frame vote counter.

use std::collections::HashMap;

use artcodes_core::MarkerCode;

#[derive(Clone, Copy, Debug)]
struct Tally {
    count: u32,
    /// Last frame stamp in which the code was observed.
    seen: u64,
}

/// Mapping from marker code to its consecutive-frame vote count.
///
/// Every tracked code has a count of at least 1. Codes iterate in the order
/// they started being tracked; a code that is evicted and observed again is
/// tracked anew at the end.
#[derive(Clone, Debug, Default)]
pub struct VoteCounter {
    tallies: HashMap<MarkerCode, Tally>,
    order: Vec<MarkerCode>,
    stamp: u64,
}

impl VoteCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracked codes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Current count for `code`, `0` when untracked.
    pub fn count(&self, code: &str) -> u32 {
        self.tallies.get(code).map_or(0, |t| t.count)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.tallies.contains_key(code)
    }

    /// Tracked codes with their counts, in first-tracked order.
    pub fn iter(&self) -> impl Iterator<Item = (&MarkerCode, u32)> + '_ {
        self.order
            .iter()
            .filter_map(|code| self.tallies.get(code).map(|t| (code, t.count)))
    }

    /// Drop all votes.
    pub fn clear(&mut self) {
        self.tallies.clear();
        self.order.clear();
    }

    /// Apply one frame of observations and return the evicted codes.
    ///
    /// Each occurrence of a code adds one vote (duplicates count). A count
    /// already above `max` is clamped to `max` before the increment, and the
    /// increment itself saturates at `max`. Every code tracked before this
    /// frame but absent from it is removed outright.
    ///
    /// A `max` of 0 is treated as 1: a tracked code always holds one vote.
    pub fn record_frame<I, C>(&mut self, codes: I, max: u32) -> Vec<MarkerCode>
    where
        I: IntoIterator<Item = C>,
        C: AsRef<str>,
    {
        let max = max.max(1);
        self.stamp = self.stamp.wrapping_add(1);
        let stamp = self.stamp;

        for code in codes {
            let code = code.as_ref();
            match self.tallies.get_mut(code) {
                Some(tally) => {
                    if tally.count > max {
                        tally.count = max;
                    }
                    tally.count = tally.count.saturating_add(1).min(max);
                    tally.seen = stamp;
                }
                None => {
                    let code = MarkerCode::from(code);
                    self.tallies.insert(
                        code.clone(),
                        Tally {
                            count: 1,
                            seen: stamp,
                        },
                    );
                    self.order.push(code);
                }
            }
        }

        self.evict_unseen(stamp)
    }

    fn evict_unseen(&mut self, stamp: u64) -> Vec<MarkerCode> {
        let mut evicted = Vec::new();
        let tallies = &mut self.tallies;
        self.order.retain(|code| {
            let keep = tallies.get(code).is_some_and(|t| t.seen == stamp);
            if !keep {
                tallies.remove(code);
                evicted.push(code.clone());
            }
            keep
        });
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(counter: &VoteCounter) -> Vec<(String, u32)> {
        counter
            .iter()
            .map(|(code, count)| (code.to_string(), count))
            .collect()
    }

    #[test]
    fn duplicates_in_one_frame_add_one_vote_each() {
        let mut counter = VoteCounter::new();
        counter.record_frame(["A", "B", "B"], 80);
        assert_eq!(
            counts(&counter),
            vec![("A".to_string(), 1), ("B".to_string(), 2)]
        );

        counter.record_frame(["B", "B", "B", "A"], 80);
        assert_eq!(counter.count("B"), 5);
        assert_eq!(counter.count("A"), 2);
    }

    #[test]
    fn absent_codes_are_removed_not_decremented() {
        let mut counter = VoteCounter::new();
        for _ in 0..7 {
            counter.record_frame(["A", "B"], 80);
        }
        let evicted = counter.record_frame(["B"], 80);
        assert_eq!(evicted, vec![MarkerCode::from("A")]);
        assert!(!counter.contains("A"));
        assert_eq!(counter.count("A"), 0);
        assert_eq!(counter.count("B"), 8);
    }

    #[test]
    fn empty_frame_evicts_everything() {
        let mut counter = VoteCounter::new();
        counter.record_frame(["A", "B", "C"], 80);
        let evicted = counter.record_frame(std::iter::empty::<&str>(), 80);
        assert_eq!(evicted.len(), 3);
        assert!(counter.is_empty());
    }

    #[test]
    fn count_saturates_at_cap() {
        let mut counter = VoteCounter::new();
        for _ in 0..10 {
            counter.record_frame(["Z", "Z", "Z"], 4);
            assert!(counter.count("Z") <= 4);
        }
        assert_eq!(counter.count("Z"), 4);
    }

    #[test]
    fn zero_cap_still_tracks_with_a_single_vote() {
        let mut counter = VoteCounter::new();
        counter.record_frame(["A"], 0);
        assert_eq!(counter.count("A"), 1);
        counter.record_frame(["A", "A", "A"], 0);
        assert_eq!(counter.count("A"), 1);
        assert!(counter.iter().all(|(_, count)| count >= 1));
    }

    #[test]
    fn count_above_cap_is_clamped_before_increment() {
        let mut counter = VoteCounter::new();
        for _ in 0..30 {
            counter.record_frame(["Z"], 80);
        }
        assert_eq!(counter.count("Z"), 30);

        // A smaller cap takes effect on the next observation.
        counter.record_frame(["Z"], 10);
        assert_eq!(counter.count("Z"), 10);
    }

    #[test]
    fn retracked_code_moves_to_the_end_of_the_order() {
        let mut counter = VoteCounter::new();
        counter.record_frame(["A", "B"], 80);
        counter.record_frame(["B"], 80);
        counter.record_frame(["B", "A"], 80);
        let order: Vec<&str> = counter.iter().map(|(code, _)| code.as_str()).collect();
        assert_eq!(order, vec!["B", "A"]);
    }
}
