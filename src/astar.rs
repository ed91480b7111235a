//! This module implements a variant of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html).
//! The open set is a [BinaryHeap] that tolerates several entries for the same node; entries
//! made stale by a later improvement are dropped when popped instead of being decreased in place.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::debug;
use num_traits::Zero;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use std::hash::Hash;

struct SmallestCostHolder<K> {
    estimated_cost: K,
    cost: K,
    index: usize,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost) && self.cost.eq(&other.cost)
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Lowest estimated cost first; among equal estimates the deeper node (higher cost)
        // is expanded first, which only affects which of several optimal paths is returned.
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => self.cost.cmp(&other.cost),
            s => s,
        }
    }
}

fn reverse_path<N, V, F>(parents: &FxIndexMap<N, V>, mut parent: F, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
    F: FnMut(&V) -> usize,
{
    let mut path: Vec<N> = std::iter::successors(Some(start), |&i| {
        parents.get_index(i).map(|(_, value)| parent(value))
    })
    .map_while(|i| parents.get_index(i).map(|(node, _)| node.clone()))
    .collect();
    path.reverse();
    path
}

/// Searches from `start` until `success` holds for a popped node. The search state (open set,
/// parents and best known costs) lives only for the duration of the call. Returns the nodes
/// from `start` to the goal inclusive together with the path cost, or [None] once the open set
/// is exhausted.
pub fn astar<N, C, FN, IN, FH, FS>(
    start: &N,
    successors: FN,
    heuristic: FH,
    success: FS,
) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let (result, expanded) = astar_counted(start, successors, heuristic, success);
    debug!(
        "Search {} after expanding {} nodes",
        if result.is_some() { "succeeded" } else { "exhausted" },
        expanded
    );
    result
}

/// [astar] that also reports how many nodes had their successors generated. Stale open set
/// entries and the goal itself are not counted.
pub fn astar_counted<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
) -> (Option<(Vec<N>, C)>, usize)
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut to_see = BinaryHeap::new();
    to_see.push(SmallestCostHolder {
        estimated_cost: heuristic(start),
        cost: Zero::zero(),
        index: 0,
    });
    let mut parents: FxIndexMap<N, (usize, C)> = FxIndexMap::default();
    parents.insert(start.clone(), (usize::MAX, Zero::zero()));
    let mut expanded = 0;
    while let Some(SmallestCostHolder { cost, index, .. }) = to_see.pop() {
        let successors = {
            let Some((node, &(_, c))) = parents.get_index(index) else {
                break;
            };
            if success(node) {
                let path = reverse_path(&parents, |&(p, _)| p, index);
                return (Some((path, cost)), expanded);
            }
            // We may have inserted a node several times into the binary heap if we found
            // a better way to access it. Ensure that we are currently dealing with the
            // best path and discard the others.
            if cost > c {
                continue;
            }
            expanded += 1;
            successors(node)
        };
        for (successor, move_cost) in successors {
            let new_cost = cost + move_cost;
            let h; // heuristic(&successor)
            let n; // index for successor
            match parents.entry(successor) {
                Vacant(e) => {
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert((index, new_cost));
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        h = heuristic(e.key());
                        n = e.index();
                        e.insert((index, new_cost));
                    } else {
                        continue;
                    }
                }
            }

            to_see.push(SmallestCostHolder {
                estimated_cost: new_cost + h,
                cost: new_cost,
                index: n,
            });
        }
    }
    (None, expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Chain 0 -> 1 -> ... -> 9 with a costly shortcut 0 -> 9.
    fn chain_successors(n: &u32) -> Vec<(u32, u32)> {
        let mut succ = Vec::new();
        if *n < 9 {
            succ.push((n + 1, 1));
        }
        if *n == 0 {
            succ.push((9, 20));
        }
        succ
    }

    #[test]
    fn prefers_cheaper_long_route() {
        let (path, cost) = astar(&0u32, chain_successors, |_| 0, |n| *n == 9).unwrap();
        assert_eq!(path, (0..10).collect::<Vec<u32>>());
        assert_eq!(cost, 9);
    }

    /// Nodes 0 to 8 are expanded once each; the stale shortcut entry for 9 is never expanded.
    #[test]
    fn counts_expanded_nodes() {
        let (result, expanded) = astar_counted(&0u32, chain_successors, |_| 0, |n| *n == 9);
        assert_eq!(result.map(|(_, c)| c), Some(9));
        assert_eq!(expanded, 9);

        let succ = |n: &u32| vec![((n + 1) % 5, 1u32), ((n + 4) % 5, 1u32)];
        let (result, expanded) = astar_counted(&0u32, succ, |_| 0, |n| *n == 7);
        assert!(result.is_none());
        assert_eq!(expanded, 5);
    }

    /// With a consistent heuristic on an open grid only cells on one shortest path are expanded.
    #[test]
    fn manhattan_heuristic_expands_one_path_on_open_grid() {
        let goal = (4i32, 4i32);
        let succ = |&(x, y): &(i32, i32)| {
            [(-1, 0), (1, 0), (0, -1), (0, 1)]
                .into_iter()
                .map(move |(dx, dy)| (x + dx, y + dy))
                .filter(|&(x, y)| (0..5).contains(&x) && (0..5).contains(&y))
                .map(|p| (p, 1))
                .collect::<Vec<_>>()
        };
        let h = |&(x, y): &(i32, i32)| (x - goal.0).abs() + (y - goal.1).abs();
        let (result, expanded) = astar_counted(&(0, 0), succ, h, |p| *p == goal);
        assert_eq!(result.map(|(path, _)| path.len()), Some(9));
        assert_eq!(expanded, 8);
    }

    #[test]
    fn start_is_goal() {
        let (path, cost) = astar(&3u32, chain_successors, |_| 0, |n| *n == 3).unwrap();
        assert_eq!(path, vec![3]);
        assert_eq!(cost, 0);
    }

    #[test]
    fn exhausted_open_set_returns_none() {
        assert!(astar(&0u32, chain_successors, |_| 0, |n| *n == 42).is_none());
    }

    /// A cycle must not keep the search alive once every node has been settled.
    #[test]
    fn terminates_on_cycles() {
        let succ = |n: &u32| vec![((n + 1) % 5, 1u32), ((n + 4) % 5, 1u32)];
        assert!(astar(&0u32, succ, |_| 0, |n| *n == 7).is_none());
    }
}
