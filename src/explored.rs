use rustc_hash::FxHashMap;

use crate::cost::Cost;
use crate::space::State;

#[derive(Copy, Clone, Debug)]
struct CostRecord<C>
where
    C: Cost,
{
    g: C,
    finalized: bool,
}

/// Best-known-cost map doubling as the closed set.
///
/// One `FxHashMap` keyed by canonical state value carries both facts the
/// engine needs about a state: the cheapest `g` discovered so far, and
/// whether the state was already popped and expanded. Duplicate/cyclic
/// revisits are pruned here instead of by pointer-chasing cycle checks.
///
/// Once a state is finalized it is never reopened. With an inconsistent
/// heuristic a cheaper `g` can in principle show up afterwards; it is
/// ignored, that is the documented precondition trade-off, not an error.
#[derive(Debug)]
#[cfg_attr(feature = "inspect", derive(Clone))]
pub struct ExploredSet<St, C>
where
    St: State,
    C: Cost,
{
    map: FxHashMap<St, CostRecord<C>>,
}

impl<St, C> ExploredSet<St, C>
where
    St: State,
    C: Cost,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }

    /// Best `g` recorded so far for `s`, finalized or not.
    #[inline(always)]
    #[must_use]
    pub fn best_g(&self, s: &St) -> Option<C> {
        self.map.get(s).map(|r| r.g)
    }

    /// Records a newly-discovered cost for `s`. Last write wins; callers
    /// only call this with an improvement (or a first sighting).
    #[inline(always)]
    pub fn record(&mut self, s: St, g: C) {
        debug_assert!(
            !self.is_finalized(&s),
            "Tried recording a cost for a finalized state"
        );
        self.map.insert(s, CostRecord { g, finalized: false });
    }

    /// Marks `s` expanded with confirmed cost `g`.
    #[inline(always)]
    pub fn finalize(&mut self, s: St, g: C) {
        self.map.insert(s, CostRecord { g, finalized: true });
    }

    #[inline(always)]
    #[must_use]
    pub fn is_finalized(&self, s: &St) -> bool {
        match self.map.get(s) {
            Some(r) => r.finalized,
            None => false,
        }
    }

    /// Number of states ever recorded.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Finalized states with their confirmed costs.
    pub fn finalized(&self) -> impl Iterator<Item = (&St, C)> {
        self.map
            .iter()
            .filter(|(_, r)| r.finalized)
            .map(|(s, r)| (s, r.g))
    }
}

impl<St, C> Default for ExploredSet<St, C>
where
    St: State,
    C: Cost,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::State;

    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    struct S(u8);
    impl State for S {}

    #[test]
    fn record_then_improve() {
        let mut set = ExploredSet::<S, u32>::new();
        assert_eq!(set.best_g(&S(1)), None);

        set.record(S(1), 10);
        assert_eq!(set.best_g(&S(1)), Some(10));
        assert!(!set.is_finalized(&S(1)));

        set.record(S(1), 4);
        assert_eq!(set.best_g(&S(1)), Some(4));
    }

    #[test]
    fn finalize_marks_and_keeps_cost() {
        let mut set = ExploredSet::<S, u32>::new();
        set.record(S(2), 9);
        set.finalize(S(2), 9);
        assert!(set.is_finalized(&S(2)));
        assert_eq!(set.best_g(&S(2)), Some(9));
        assert_eq!(set.finalized().count(), 1);
    }
}
