//! Best-first A* search over any hashable node type in the style of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html),
//! extended with an explicit closed set, a deterministic tie-break and an optional expansion
//! budget.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::debug;
use num_traits::{SaturatingAdd, Zero};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Marks the start node, which has no parent.
const NO_PARENT: usize = usize::MAX;

/// Per-node record kept in the arena. The node itself is the arena key and its parent is
/// referenced by arena index.
#[derive(Clone, Copy, Debug)]
struct SearchNode<C> {
    parent: usize,
    g: C,
    h: C,
    closed: bool,
}

impl<C: SaturatingAdd> SearchNode<C> {
    /// Saturates instead of overflowing for very large estimates.
    fn f(&self) -> C {
        self.g.saturating_add(&self.h)
    }
}

/// Frontier entry. Entries are never updated in place: a cheaper route pushes a new entry and
/// the outdated one is skipped when popped.
struct SmallestCostHolder<K> {
    estimated_cost: K,
    cost: K,
    index: usize,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost)
            && self.cost.eq(&other.cost)
            && self.index == other.index
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Smallest estimated cost first, then the largest cost (deepest node), then the node
        // that was discovered first.
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| self.cost.cmp(&other.cost))
            .then_with(|| other.index.cmp(&self.index))
    }
}

/// Result of a search. Running out of candidates and running out of budget are kept apart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome<N, C> {
    Found { path: Vec<N>, cost: C },
    NoPath,
    LimitReached { expanded: usize },
}

/// Follows parent indices from `goal` back to the start and returns the nodes in start-to-goal
/// order.
fn reconstruct_path<N: Clone, C>(nodes: &FxIndexMap<N, SearchNode<C>>, goal: usize) -> Vec<N> {
    let mut path = itertools::unfold(goal, |ix| {
        let (node, record) = nodes.get_index(*ix)?;
        *ix = record.parent;
        Some(node.clone())
    })
    .collect::<Vec<N>>();
    path.reverse();
    path
}

/// Searches from `start` until a node satisfying `success` is finalized.
///
/// Nodes are expanded in order of smallest `g + h`. Ties are broken by preferring the larger
/// `g`, and after that the node discovered first, so results are reproducible. A node is closed
/// when expanded and is never reopened, even if `heuristic` is inconsistent and a cheaper route
/// shows up later. At most `limit` nodes are expanded when a limit is given.
pub fn astar<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
    limit: Option<usize>,
) -> SearchOutcome<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + SaturatingAdd + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut nodes: FxIndexMap<N, SearchNode<C>> = FxIndexMap::default();
    let h = heuristic(start);
    nodes.insert(
        start.clone(),
        SearchNode {
            parent: NO_PARENT,
            g: Zero::zero(),
            h,
            closed: false,
        },
    );
    let mut to_see = BinaryHeap::new();
    to_see.push(SmallestCostHolder {
        estimated_cost: h,
        cost: Zero::zero(),
        index: 0,
    });
    let mut expanded = 0;
    while let Some(SmallestCostHolder { cost, index, .. }) = to_see.pop() {
        let successors = {
            let Some((node, record)) = nodes.get_index_mut(index) else {
                continue;
            };
            // We may have pushed a node several times if a cheaper route was found in the
            // meantime. Only the entry matching the recorded cost is live.
            if record.closed || cost != record.g {
                continue;
            }
            record.closed = true;
            if success(node) {
                debug!(
                    "Goal reached after expanding {} of {} discovered nodes",
                    expanded,
                    nodes.len()
                );
                let path = reconstruct_path(&nodes, index);
                return SearchOutcome::Found { path, cost };
            }
            if limit.is_some_and(|max| expanded >= max) {
                debug!("Expansion limit of {} reached", expanded);
                return SearchOutcome::LimitReached { expanded };
            }
            expanded += 1;
            successors(node)
        };
        for (successor, move_cost) in successors {
            let new_cost = cost.saturating_add(&move_cost);
            let n; // index for successor
            let f; // estimated total cost through successor
            match nodes.entry(successor) {
                Vacant(e) => {
                    let h = heuristic(e.key());
                    n = e.index();
                    let record = SearchNode {
                        parent: index,
                        g: new_cost,
                        h,
                        closed: false,
                    };
                    f = record.f();
                    e.insert(record);
                }
                Occupied(mut e) => {
                    let record = e.get_mut();
                    if record.closed || record.g <= new_cost {
                        continue;
                    }
                    record.parent = index;
                    record.g = new_cost;
                    f = record.f();
                    n = e.index();
                }
            }

            to_see.push(SmallestCostHolder {
                estimated_cost: f,
                cost: new_cost,
                index: n,
            });
        }
    }
    debug!("Open set exhausted after expanding {} nodes", expanded);
    SearchOutcome::NoPath
}
