use std::fmt::Debug;
use std::hash::Hash;

use crate::cost::Cost;

/// A transition label. The blank moving left, a road taken, a pour between
/// jugs.
pub trait Action: Copy + Clone + Debug + PartialEq + Eq {}

/// A domain state.
///
/// States are compared and hashed by value only; the engine never compares
/// node identity. Two states are the same search state iff they are `==`.
pub trait State: Copy + Clone + Debug + PartialEq + Eq + Hash {}

/// A start-to-goal path through a search space.
///
/// Fully materialized: downstream consumers (printing, plotting) want
/// random access and the total length up front, so this is a plain `Vec`
/// rather than a lazy walk of parent links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    pub start: St,
    /// Each step is the action taken and the state it led to, in
    /// start-to-goal order.
    pub steps: Vec<(A, St)>,
    pub cost: C,
}

impl<St, A, C> Path<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    #[inline(always)]
    pub fn new_from_start(start: St) -> Self {
        Self {
            start,
            steps: vec![],
            cost: C::zero(),
        }
    }

    /// Number of actions taken. An already-solved start is a 0-length path.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline(always)]
    pub fn end(&self) -> &St {
        match self.steps.last() {
            Some((_, s)) => s,
            None => &self.start,
        }
    }

    /// Runs sanity checks
    #[inline(always)]
    pub fn seems_valid(&self) -> bool {
        self.cost.valid() && (!self.steps.is_empty() || self.cost.is_zero())
    }

    #[inline(always)]
    pub fn append(&mut self, step: (A, St), c: C) {
        self.steps.push(step);
        self.cost = self.cost.saturating_add(&c);
    }

    /// Visited states, start first.
    pub fn states(&self) -> impl Iterator<Item = &St> {
        std::iter::once(&self.start).chain(self.steps.iter().map(|(_, s)| s))
    }

    /// Actions taken, in order.
    pub fn actions(&self) -> impl Iterator<Item = &A> {
        self.steps.iter().map(|(a, _)| a)
    }
}

impl<St, A, C> std::fmt::Display for Path<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Path({}, {:?}:{:?}:{:?})",
            self.cost,
            self.start,
            self.actions().take(20).collect::<Vec<_>>(),
            self.end(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    struct S(u8);
    impl State for S {}

    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    struct Hop;
    impl Action for Hop {}

    #[test]
    fn empty_path() {
        let p = Path::<S, Hop, u32>::new_from_start(S(0));
        assert!(p.is_empty());
        assert_eq!(p.len(), 0);
        assert_eq!(*p.end(), S(0));
        assert!(p.seems_valid());
    }

    #[test]
    fn append_accumulates() {
        let mut p = Path::<S, Hop, u32>::new_from_start(S(0));
        p.append((Hop, S(1)), 2);
        p.append((Hop, S(2)), 3);
        assert_eq!(p.len(), 2);
        assert_eq!(p.cost, 5);
        assert_eq!(*p.end(), S(2));
        assert_eq!(p.states().copied().collect::<Vec<_>>(), [S(0), S(1), S(2)]);
    }
}
