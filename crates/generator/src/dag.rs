//! Leveled DAG synthesis.

use std::collections::HashSet;
use rand::Rng;
use runmap_core::{BuiltinContent, ContentResolver, Edge, Graph, Node, NodeId, NodeType};
use tracing::debug;
use crate::config::{GeneratorConfig, Result};

/// Maximum number of next-level nodes a node links to before repairs.
pub const MAX_FAN_OUT: usize = 2;

/// Generates floors of a fixed size.
#[derive(Debug, Clone)]
pub struct GraphGenerator<C = BuiltinContent> {
    config: GeneratorConfig,
    resolver: C,
}

impl GraphGenerator<BuiltinContent> {
    /// Create a generator with the builtin content table.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            resolver: BuiltinContent,
        })
    }
}

impl<C: ContentResolver> GraphGenerator<C> {
    /// Replace the content resolver.
    pub fn with_resolver<D: ContentResolver>(self, resolver: D) -> GraphGenerator<D> {
        GraphGenerator {
            config: self.config,
            resolver,
        }
    }

    /// Generator configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a floor. The same `rng` state always yields the same graph.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Graph> {
        let levels = self.synthesize_nodes(rng);
        let links = synthesize_edges(&levels, rng);

        let edges = links
            .order
            .iter()
            .map(|&(level, from, to)| {
                let level = level as usize;
                Edge::new(levels[level][from].id.clone(), levels[level + 1][to].id.clone())
            })
            .collect::<Vec<_>>();
        let nodes = levels.into_iter().flatten().collect::<Vec<_>>();

        debug!(
            "Generated floor: {} levels, {} nodes, {} edges",
            self.config.max_level + 1,
            nodes.len(),
            edges.len()
        );

        let graph = Graph::new(nodes, edges)?;
        debug_assert!(graph.validate().is_ok(), "{:?}", graph.validate());
        Ok(graph)
    }

    /// Nodes per level, in creation order.
    fn synthesize_nodes<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Vec<Node>> {
        let max_level = self.config.max_level;
        let mut levels = Vec::with_capacity(max_level as usize + 1);

        for level in 0..=max_level {
            if level == max_level {
                levels.push(vec![self.make_node(level, 0, NodeType::Boss)]);
                continue;
            }

            let count = rng.gen_range(1..=self.config.max_nodes_per_level) as usize;
            let nodes = (0..count)
                .map(|index| {
                    let node_type = if level == 0 {
                        NodeType::Safe
                    } else {
                        NodeType::ENCOUNTER_POOL[rng.gen_range(0..NodeType::ENCOUNTER_POOL.len())]
                    };
                    self.make_node(level, index, node_type)
                })
                .collect();
            levels.push(nodes);
        }

        levels
    }

    fn make_node(&self, level: u32, index: usize, node_type: NodeType) -> Node {
        let label = if node_type == NodeType::Boss {
            "Boss".to_string()
        } else {
            format!("Level {}", level)
        };
        Node::new(NodeId::at(level, index), label, node_type, level)
            .with_content(self.resolver.resolve(node_type))
    }
}

/// Generate a floor with the builtin content table.
pub fn generate_dag_graph<R: Rng + ?Sized>(
    max_level: u32,
    max_nodes_per_level: u32,
    rng: &mut R,
) -> Result<Graph> {
    GraphGenerator::new(GeneratorConfig::new(max_level, max_nodes_per_level))?.generate(rng)
}

/// Edge bookkeeping by position: `(level of source, source index, target index)`.
struct Links {
    order: Vec<(u32, usize, usize)>,
    present: HashSet<(u32, usize, usize)>,
    out_degree: Vec<Vec<usize>>,
    in_degree: Vec<Vec<usize>>,
}

impl Links {
    fn new(levels: &[Vec<Node>]) -> Self {
        Self {
            order: Vec::new(),
            present: HashSet::new(),
            out_degree: levels.iter().map(|l| vec![0; l.len()]).collect(),
            in_degree: levels.iter().map(|l| vec![0; l.len()]).collect(),
        }
    }

    fn link(&mut self, level: u32, from: usize, to: usize) {
        if !self.present.insert((level, from, to)) {
            return;
        }
        self.order.push((level, from, to));
        self.out_degree[level as usize][from] += 1;
        self.in_degree[level as usize + 1][to] += 1;
    }

    fn has(&self, level: u32, from: usize, to: usize) -> bool {
        self.present.contains(&(level, from, to))
    }
}

fn synthesize_edges<R: Rng + ?Sized>(levels: &[Vec<Node>], rng: &mut R) -> Links {
    let mut links = Links::new(levels);
    let max_level = (levels.len() - 1) as u32;

    // Diagonal windows, then give every orphaned target a random parent,
    // one level boundary at a time.
    for level in 0..max_level {
        let sources = levels[level as usize].len();
        let targets = levels[level as usize + 1].len();
        let window = targets.min(MAX_FAN_OUT);

        for from in 0..sources {
            let start = from.min(targets - window);
            for to in start..start + window {
                links.link(level, from, to);
            }
        }

        for to in 0..targets {
            if links.in_degree[level as usize + 1][to] == 0 {
                let from = rng.gen_range(0..sources);
                debug!("Inbound repair: {} -> {}", levels[level as usize][from].id, levels[level as usize + 1][to].id);
                links.link(level, from, to);
            }
        }
    }

    // Outbound repair runs only once the whole edge set exists.
    for level in 0..max_level {
        let targets = levels[level as usize + 1].len();
        for from in 0..levels[level as usize].len() {
            if links.out_degree[level as usize][from] == 0 {
                let to = rng.gen_range(0..targets);
                debug!("Outbound repair: {} -> {}", levels[level as usize][from].id, levels[level as usize + 1][to].id);
                links.link(level, from, to);
            }
        }
    }

    // Everything on the level below the boss converges on it.
    if max_level > 0 {
        let level = max_level - 1;
        for from in 0..levels[level as usize].len() {
            if !links.has(level, from, 0) {
                links.link(level, from, 0);
            }
        }
    }

    links
}
