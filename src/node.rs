use std::fmt::Debug;

use nonmax::NonMaxUsize;

use crate::cost::Cost;
use crate::space::Action;
use crate::space::Path;
use crate::space::State;

/// A reference to a `SearchNode` inside its `SearchTree`.
///
/// `NonMaxUsize` keeps `Option<(NodeId, A)>` the size of `(usize, A)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NodeId(NonMaxUsize);

impl NodeId {
    #[inline(always)]
    fn new(index: usize) -> Self {
        Self(NonMaxUsize::new(index).unwrap())
    }

    #[inline(always)]
    pub fn index(&self) -> usize {
        self.0.get()
    }
}

/// A state reached through a particular sequence of actions.
///
/// `g` is the accumulated cost along that sequence: the parent's `g` plus
/// the cost of the edge that produced this node. The root has no parent
/// and `g = 0`. Nodes are immutable once pushed; a better route to the
/// same state becomes a *new* node, the old one goes stale in the
/// frontier.
#[derive(Debug)]
#[cfg_attr(feature = "inspect", derive(Clone))]
pub struct SearchNode<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    pub(crate) parent: Option<(NodeId, A)>,
    pub(crate) state: St,
    pub(crate) g: C,
}

impl<St, A, C> SearchNode<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    pub fn state(&self) -> &St {
        &self.state
    }
    pub fn g(&self) -> C {
        self.g
    }
    pub fn parent(&self) -> Option<(NodeId, A)> {
        self.parent
    }
}

/// All the Search Nodes. Naturally forms a Search Forest as each node may
/// have a parent Node.
///
/// The collection only grows; nodes superseded by a cheaper route stay in
/// place (unreferenced from the frontier) until the whole search is
/// dropped.
#[derive(Debug)]
#[cfg_attr(feature = "inspect", derive(Clone))]
pub struct SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    nodes: Vec<SearchNode<St, A, C>>,
}

impl<St, A, C> SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    #[inline(always)]
    #[must_use]
    pub(crate) fn new() -> Self {
        Self { nodes: vec![] }
    }

    #[inline(always)]
    pub(crate) fn push(&mut self, state: St, parent: Option<(NodeId, A)>, g: C) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(SearchNode { parent, state, g });
        id
    }

    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in insertion order, paired with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SearchNode<St, A, C>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i), n))
    }

    /// Reconstructs the start-to-goal path ending at `node_id`.
    ///
    /// Walks parent links back to the root collecting `(action, state)`
    /// pairs, then reverses into start-to-goal order. The result is
    /// materialized, callers get random access and total length up front.
    #[must_use]
    pub fn path(&self, node_id: NodeId) -> Path<St, A, C> {
        let total = self[node_id].g;

        let mut steps: Vec<(A, St)> = vec![];
        let mut cursor = node_id;
        while let Some((parent_id, a)) = self[cursor].parent {
            debug_assert!(parent_id != cursor);
            debug_assert!(self[parent_id].g <= self[cursor].g);
            steps.push((a, self[cursor].state));
            cursor = parent_id;
        }
        steps.reverse();

        let mut path = Path::new_from_start(self[cursor].state);
        path.steps = steps;
        path.cost = total;
        debug_assert!(path.seems_valid());
        path
    }
}

impl<St, A, C> Default for SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<St, A, C> std::ops::Index<NodeId> for SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    type Output = SearchNode<St, A, C>;

    #[inline(always)]
    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.index()]
    }
}
