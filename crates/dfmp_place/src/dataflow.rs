//! Dataflow graph over macros and its critical-path energy.
//!
//! Every net contributes one directed edge per (output pin, input pin) pair on
//! distinct macros, from the driving macro to the receiving macro. The edge
//! weight is the squared distance between the two ports, a proxy for the
//! energy of moving data across it. The graph is rebuilt for every cost
//! evaluation and never stored.
//!
//! The energy objective is the weight of the longest path. It is computed by
//! relaxing edges in topological order, the same forward propagation static
//! timing analysis uses for arrival times; a cycle makes it undefined and is
//! reported as [`CyclicDataflowError`].

use crate::error::CyclicDataflowError;
use dfmp_model::{Design, MacroId, NetId};
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

/// An edge of the dataflow graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataflowEdge {
    /// The net carrying the data.
    pub net: NetId,
    /// Squared port-to-port distance.
    pub energy: f64,
}

/// The heaviest path through the dataflow graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CriticalPath {
    /// Macros along the path, source first.
    pub macros: Vec<MacroId>,
    /// Sum of edge energies along the path.
    pub energy: f64,
}

/// Directed multigraph whose node `i` is the macro with ID `i`.
#[derive(Debug, Clone, Default)]
pub struct DataflowGraph {
    graph: DiGraph<MacroId, DataflowEdge>,
}

impl DataflowGraph {
    /// Creates a graph with nodes for macros `0..count` and no edges.
    pub fn with_macros(count: usize) -> Self {
        let mut graph = DiGraph::with_capacity(count, 0);
        for i in 0..count {
            graph.add_node(MacroId::from_raw(i as u32));
        }
        Self { graph }
    }

    /// Builds the graph from the current positions and rotations of `design`.
    ///
    /// Pairs whose output and input sit on the same macro are skipped.
    pub fn build(design: &Design) -> Self {
        let mut dfg = Self::with_macros(design.macro_count());
        for net in design.nets() {
            for &out in net.outputs() {
                let out_loc = design.pin_location(out);
                for &inp in net.inputs() {
                    if out.macro_id == inp.macro_id {
                        continue;
                    }
                    let energy = (design.pin_location(inp) - out_loc).norm_squared();
                    dfg.add_edge(
                        out.macro_id,
                        inp.macro_id,
                        DataflowEdge {
                            net: net.id(),
                            energy,
                        },
                    );
                }
            }
        }
        dfg
    }

    /// Adds a directed edge. Parallel edges are kept.
    pub fn add_edge(&mut self, from: MacroId, to: MacroId, edge: DataflowEdge) {
        self.graph
            .add_edge(node_of(from), node_of(to), edge);
    }

    /// Returns the number of macro nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterates over `(from, to, edge)` triples.
    pub fn edges(&self) -> impl Iterator<Item = (MacroId, MacroId, &DataflowEdge)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (self.graph[e.source()], self.graph[e.target()], e.weight()))
    }

    /// Returns the heaviest edge energy from `from` to `to`, if connected.
    pub fn edge_energy(&self, from: MacroId, to: MacroId) -> Option<f64> {
        self.graph
            .edges_connecting(node_of(from), node_of(to))
            .map(|e| e.weight().energy)
            .reduce(f64::max)
    }

    /// Returns the macros in a topological order, or the cycle that prevents
    /// one.
    pub fn topological_order(&self) -> Result<Vec<MacroId>, CyclicDataflowError> {
        toposort(&self.graph, None)
            .map(|order| order.into_iter().map(|n| self.graph[n]).collect())
            .map_err(|cycle| CyclicDataflowError {
                macro_id: self.graph[cycle.node_id()],
            })
    }

    /// Fails if the graph contains a cycle.
    pub fn check_acyclic(&self) -> Result<(), CyclicDataflowError> {
        self.topological_order().map(|_| ())
    }

    /// Finds the path of maximum total energy (not hop count).
    pub fn longest_path(&self) -> Result<CriticalPath, CyclicDataflowError> {
        let order = self.topological_order()?;
        if order.is_empty() {
            return Ok(CriticalPath::default());
        }

        let n = self.graph.node_count();
        let mut dist = vec![0.0_f64; n];
        let mut pred: Vec<Option<NodeIndex>> = vec![None; n];

        for &id in &order {
            let u = node_of(id);
            for edge in self.graph.edges(u) {
                let v = edge.target();
                let candidate = dist[u.index()] + edge.weight().energy;
                if candidate > dist[v.index()] {
                    dist[v.index()] = candidate;
                    pred[v.index()] = Some(u);
                }
            }
        }

        let mut end = node_of(order[0]);
        for &id in &order {
            if dist[id.index()] > dist[end.index()] {
                end = node_of(id);
            }
        }

        let mut macros = vec![self.graph[end]];
        let mut current = end;
        while let Some(p) = pred[current.index()] {
            macros.push(self.graph[p]);
            current = p;
        }
        macros.reverse();

        Ok(CriticalPath {
            macros,
            energy: dist[end.index()],
        })
    }
}

/// Builds the dataflow graph of `design` and returns its critical-path energy.
pub fn dataflow_energy(design: &Design) -> Result<f64, CyclicDataflowError> {
    DataflowGraph::build(design)
        .longest_path()
        .map(|path| path.energy)
}

fn node_of(id: MacroId) -> NodeIndex {
    NodeIndex::new(id.index())
}
