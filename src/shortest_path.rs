//! Shortest-path engine with three interchangeable algorithms.
//!
//! All three implement [`ShortestPathSolver`] over the same [`Graph`];
//! [`Algorithm`] selects one by its public name and times the run.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use crate::traits::ShortestPathSolver;

/// Output of one algorithm run.
#[derive(Debug, Clone)]
pub struct PathResult {
    /// Minimal total cost per node; unreachable nodes hold `f64::INFINITY`.
    pub distances: HashMap<NodeId, f64>,
    /// Wall time of the algorithm body only.
    pub elapsed: Duration,
    pub complexity: &'static str,
}

impl PathResult {
    pub fn distance_to(&self, node: NodeId) -> f64 {
        self.distances.get(&node).copied().unwrap_or(f64::INFINITY)
    }
}

/// Selectable algorithm, named as callers spell it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Dijkstra,
    FloydWarshall,
    BellmanFord,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Dijkstra,
        Algorithm::FloydWarshall,
        Algorithm::BellmanFord,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::FloydWarshall => "Floyd-Warshall",
            Algorithm::BellmanFord => "Bellman-Ford",
        }
    }

    fn solver(&self) -> &'static dyn ShortestPathSolver {
        match self {
            Algorithm::Dijkstra => &PriorityQueueSolver,
            Algorithm::FloydWarshall => &AllPairsSolver,
            Algorithm::BellmanFord => &EdgeRelaxationSolver,
        }
    }

    pub fn complexity(&self) -> &'static str {
        self.solver().complexity()
    }

    /// Run the algorithm from `source`, timing only the algorithm body.
    pub fn run(&self, graph: &Graph, source: NodeId) -> Result<PathResult> {
        if *self == Algorithm::Dijkstra && graph.has_negative_edge_beyond(source) {
            warn!(
                source,
                "negative edge away from the source; priority-queue distances may diverge from Bellman-Ford"
            );
        }

        let solver = self.solver();
        let start = Instant::now();
        let distances = solver.distances_from(graph, source)?;
        let elapsed = start.elapsed();

        debug!(
            algorithm = self.name(),
            elapsed_us = elapsed.as_micros() as u64,
            reachable = distances.values().filter(|d| d.is_finite()).count(),
            "shortest paths computed"
        );

        Ok(PathResult {
            distances,
            elapsed,
            complexity: solver.complexity(),
        })
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == name)
            .ok_or_else(|| Error::UnsupportedAlgorithm {
                name: name.to_string(),
            })
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn unreached(graph: &Graph) -> HashMap<NodeId, f64> {
    graph
        .nodes()
        .iter()
        .map(|&node| (node, f64::INFINITY))
        .collect()
}

/// Single-source search with a binary-heap priority queue.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityQueueSolver;

impl ShortestPathSolver for PriorityQueueSolver {
    fn complexity(&self) -> &'static str {
        "O(E + V log V)"
    }

    fn distances_from(&self, graph: &Graph, source: NodeId) -> Result<HashMap<NodeId, f64>> {
        let mut distances = unreached(graph);
        let mut queue = BinaryHeap::new();

        distances.insert(source, 0.0);
        queue.push(QueueEntry::new(source, 0.0));

        // A negative edge can improve a settled node and re-queue it. A search
        // still popping after V·E entries is treated as a negative cycle.
        let max_pops = graph.node_count().saturating_mul(graph.edge_count().max(1));
        let mut pops = 0usize;

        while let Some(entry) = queue.pop() {
            pops += 1;
            if pops > max_pops {
                return Err(Error::NegativeCycleDetected);
            }

            let best = distances.get(&entry.node).copied().unwrap_or(f64::INFINITY);
            if entry.cost.0 > best {
                continue;
            }

            for (next, weight) in graph.neighbours(entry.node) {
                let next_cost = entry.cost.0 + weight;
                if next_cost < distances.get(&next).copied().unwrap_or(f64::INFINITY) {
                    distances.insert(next, next_cost);
                    queue.push(QueueEntry::new(next, next_cost));
                }
            }
        }

        Ok(distances)
    }
}

/// All-pairs triple relaxation; only the source row is returned.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllPairsSolver;

impl AllPairsSolver {
    /// Full distance table indexed by position in `graph.nodes()`.
    pub fn table(&self, graph: &Graph) -> Vec<Vec<f64>> {
        let nodes = graph.nodes();
        let n = nodes.len();
        let mut dist = vec![vec![f64::INFINITY; n]; n];

        for (i, &from) in nodes.iter().enumerate() {
            for (j, &to) in nodes.iter().enumerate() {
                if i == j {
                    dist[i][j] = 0.0;
                } else if let Some(weight) = graph.weight(from, to) {
                    dist[i][j] = weight;
                }
            }
        }

        for k in 0..n {
            for i in 0..n {
                let through = dist[i][k];
                if through == f64::INFINITY {
                    continue;
                }
                for j in 0..n {
                    let candidate = through + dist[k][j];
                    if candidate < dist[i][j] {
                        dist[i][j] = candidate;
                    }
                }
            }
        }

        dist
    }
}

impl ShortestPathSolver for AllPairsSolver {
    fn complexity(&self) -> &'static str {
        "O(V^3)"
    }

    fn distances_from(&self, graph: &Graph, source: NodeId) -> Result<HashMap<NodeId, f64>> {
        let nodes = graph.nodes();
        let Some(row) = nodes.iter().position(|&node| node == source) else {
            let mut distances = unreached(graph);
            distances.insert(source, 0.0);
            return Ok(distances);
        };

        let table = self.table(graph);
        Ok(nodes
            .iter()
            .zip(&table[row])
            .map(|(&node, &distance)| (node, distance))
            .collect())
    }
}

/// Single-source edge relaxation with a final negative-cycle check.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeRelaxationSolver;

impl ShortestPathSolver for EdgeRelaxationSolver {
    fn complexity(&self) -> &'static str {
        "O(V × E)"
    }

    fn distances_from(&self, graph: &Graph, source: NodeId) -> Result<HashMap<NodeId, f64>> {
        let mut distances = unreached(graph);
        distances.insert(source, 0.0);

        let edges = graph.edges();
        let passes = graph.node_count().saturating_sub(1);

        for _ in 0..passes {
            let mut changed = false;
            for &(from, to, weight) in &edges {
                if let Some(candidate) = relax(&distances, from, to, weight) {
                    distances.insert(to, candidate);
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }

        if edges
            .iter()
            .any(|&(from, to, weight)| relax(&distances, from, to, weight).is_some())
        {
            return Err(Error::NegativeCycleDetected);
        }

        Ok(distances)
    }
}

/// Improved distance for `to` through `from`, if the edge offers one.
fn relax(distances: &HashMap<NodeId, f64>, from: NodeId, to: NodeId, weight: f64) -> Option<f64> {
    let base = distances.get(&from).copied().unwrap_or(f64::INFINITY);
    if base == f64::INFINITY {
        return None;
    }
    let candidate = base + weight;
    (candidate < distances.get(&to).copied().unwrap_or(f64::INFINITY)).then_some(candidate)
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: NodeId,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: NodeId, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
