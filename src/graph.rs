use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::graphmap::{DiGraphMap, NodeTrait};
use petgraph::Direction::{Incoming, Outgoing};

/// A directed graph with nodes identified by `N`, each carrying data `D`.
///
/// Parallel edges collapse into one; self loops are allowed.
/// Iteration follows insertion order, so building the same graph twice yields the same traversal.
#[derive(Clone, Debug)]
pub struct DirectedGraph<N: NodeTrait, D = ()> {
    graph: DiGraphMap<N, ()>,
    data: HashMap<N, D>,
}

impl<N: NodeTrait, D> Default for DirectedGraph<N, D> {
    fn default() -> Self {
        Self {
            graph: DiGraphMap::new(),
            data: HashMap::new(),
        }
    }
}

/// An index-based view of a [`DirectedGraph`]: `adjacency[i]` lists the indices `j` such that `ids[i] -> ids[j]`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdjacencyList<N> {
    /// Node ids, position in this vector is the node's index.
    pub ids: Vec<N>,
    /// Outgoing neighbor indices per node index.
    pub adjacency: Vec<Vec<usize>>,
}

impl<N: NodeTrait, D> DirectedGraph<N, D> {
    /// Construct an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, replacing the data of an existing node with the same id.
    pub fn add_node(&mut self, id: N, data: D) -> N {
        self.data.insert(id, data);
        self.graph.add_node(id)
    }

    /// Add an edge `from -> to`, creating either endpoint with default data if missing.
    ///
    /// Returns `true` if the edge did not exist before.
    pub fn add_edge(&mut self, from: N, to: N) -> bool
    where
        D: Default,
    {
        for id in [from, to] {
            self.data.entry(id).or_default();
        }

        self.graph.add_edge(from, to, ()).is_none()
    }

    /// Remove a node and every edge incident to it. Returns `false` if there was no such node.
    pub fn remove_node(&mut self, id: N) -> bool {
        self.data.remove(&id);
        self.graph.remove_node(id)
    }

    /// Look up the data of a node.
    pub fn node(&self, id: N) -> Option<&D> {
        self.data.get(&id)
    }

    /// Whether a node with this id exists.
    pub fn contains_node(&self, id: N) -> bool {
        self.graph.contains_node(id)
    }

    /// Whether the edge `from -> to` exists.
    pub fn contains_edge(&self, from: N, to: N) -> bool {
        self.graph.contains_edge(from, to)
    }

    /// All node ids.
    pub fn nodes(&self) -> impl Iterator<Item = N> + '_ {
        self.graph.nodes()
    }

    /// All node ids alongside their data.
    pub fn nodes_with_data(&self) -> impl Iterator<Item = (N, &D)> + '_ {
        self.graph.nodes().filter_map(|id| self.data.get(&id).map(|data| (id, data)))
    }

    /// All edges as `(from, to)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (N, N)> + '_ {
        self.graph.all_edges().map(|(from, to, _)| (from, to))
    }

    /// Nodes with an edge towards `id`.
    pub fn incoming(&self, id: N) -> impl Iterator<Item = N> + '_ {
        self.graph.neighbors_directed(id, Incoming)
    }

    /// Nodes `id` has an edge towards.
    pub fn outgoing(&self, id: N) -> impl Iterator<Item = N> + '_ {
        self.graph.neighbors_directed(id, Outgoing)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub(crate) fn inner(&self) -> &DiGraphMap<N, ()> {
        &self.graph
    }

    /// Convert to an index-based adjacency list, indexing nodes in iteration order.
    pub fn to_adjacency_list(&self) -> AdjacencyList<N> {
        let ids = self.graph.nodes().collect_vec();
        let index_of: HashMap<N, usize> = ids.iter()
            .enumerate()
            .map(|(index, id)| (*id, index))
            .collect();

        let mut adjacency = vec![Vec::new(); ids.len()];
        for (from, to) in self.edges() {
            if let (Some(from), Some(to)) = (index_of.get(&from), index_of.get(&to)) {
                if let Some(targets) = adjacency.get_mut(*from) {
                    targets.push(*to);
                }
            }
        }

        AdjacencyList { ids, adjacency }
    }

    /// Build a graph from an adjacency list over `ids`.
    ///
    /// `data` is attached to nodes by index; nodes beyond its end get default data.
    /// Indices without a matching id are skipped.
    pub fn from_adjacency_list(ids: &[N], adjacency: &[Vec<usize>], data: impl IntoIterator<Item = D>) -> Self
    where
        D: Default,
    {
        let mut graph = Self::new();
        let mut data = data.into_iter();

        for id in ids {
            graph.add_node(*id, data.next().unwrap_or_default());
        }

        for (from, targets) in adjacency.iter().enumerate() {
            let Some(from) = ids.get(from) else { continue };
            for to in targets.iter().filter_map(|to| ids.get(*to)) {
                graph.add_edge(*from, *to);
            }
        }

        graph
    }
}

impl<D: Default> DirectedGraph<usize, D> {
    /// Build a graph from an adjacency list, using each node's index as its id.
    pub fn from_indexed_adjacency_list(adjacency: &[Vec<usize>], data: impl IntoIterator<Item = D>) -> Self {
        let ids = (0..adjacency.len()).collect_vec();
        Self::from_adjacency_list(&ids, adjacency, data)
    }
}

/// Renders isolated nodes first, one per line, then one `from->to` line per edge.
/// Nodes print as `id(data)`, or just `id` if their data renders empty.
impl<N, D> Display for DirectedGraph<N, D>
where
    N: NodeTrait + Display,
    D: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = |id: N| match self.node(id).map(|data| data.to_string()) {
            Some(data) if !data.is_empty() => format!("{}({})", id, data),
            _ => id.to_string(),
        };

        let isolated = self.nodes()
            .filter(|id| self.incoming(*id).next().is_none() && self.outgoing(*id).next().is_none())
            .map(label);
        let edges = self.edges().map(|(from, to)| format!("{}->{}", label(from), label(to)));

        write!(f, "{}", isolated.chain(edges).join("\n"))
    }
}

/// A strongly connected component: a maximal set of nodes that can all reach each other.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Component<N> {
    /// Ids of the original nodes in this component, sorted.
    pub members: Vec<N>,
}

impl<N> Default for Component<N> {
    fn default() -> Self {
        Self { members: Vec::new() }
    }
}

impl<N: Display> Display for Component<N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.members.iter().join(" "))
    }
}

/// The condensation of a graph into its strongly connected components, numbered from `0`.
pub type ComponentGraph<N> = DirectedGraph<usize, Component<N>>;

impl<N: NodeTrait> ComponentGraph<N> {
    /// Map every original node id to the id of its component.
    pub fn membership(&self) -> HashMap<N, usize> {
        self.nodes_with_data()
            .flat_map(|(component, data)| data.members.iter().map(move |member| (*member, component)))
            .collect()
    }

    /// The component containing `member`, if any.
    pub fn component_of(&self, member: N) -> Option<usize> {
        self.nodes_with_data()
            .find(|(_, data)| data.members.contains(&member))
            .map(|(component, _)| component)
    }
}

/// Condense `graph` into its strongly connected components.
///
/// Every node lands in exactly one component and the result is acyclic.
/// Components are numbered in reverse topological order, so a component only has edges towards lower-numbered ones.
/// An edge `a -> b` exists between components wherever the original graph has an edge between their members.
pub fn find_strongly_connected_components<N: NodeTrait, D>(graph: &DirectedGraph<N, D>) -> ComponentGraph<N> {
    let AdjacencyList { ids, adjacency } = graph.to_adjacency_list();

    let mut indexed: DiGraph<(), ()> = DiGraph::with_capacity(ids.len(), graph.edge_count());
    for _ in &ids {
        indexed.add_node(());
    }
    indexed.extend_with_edges(adjacency.iter()
        .enumerate()
        .flat_map(|(from, targets)| targets.iter().map(move |to| (NodeIndex::new(from), NodeIndex::new(*to)))));

    // tarjan emits components in postorder, i.e. sinks first
    let sccs = tarjan_scc(&indexed);

    let mut component_of = vec![0; ids.len()];
    let mut components = ComponentGraph::new();
    for (component, scc) in sccs.iter().enumerate() {
        let mut members = Vec::with_capacity(scc.len());
        for index in scc {
            if let (Some(slot), Some(id)) = (component_of.get_mut(index.index()), ids.get(index.index())) {
                *slot = component;
                members.push(*id);
            }
        }
        members.sort();

        components.add_node(component, Component { members });
    }

    for (from, targets) in adjacency.iter().enumerate() {
        for to in targets {
            if let (Some(a), Some(b)) = (component_of.get(from), component_of.get(*to)) {
                if a != b {
                    components.add_edge(*a, *b);
                }
            }
        }
    }

    components
}
