//! Net segments: the routed copper of one net.
//!
//! A net segment owns its junctions, vias and net lines. Net lines are
//! anchored to junctions, vias or device pads; pads are referenced by the
//! owning device's UUID rather than by pointer. Connectivity questions
//! (unconnected junctions, disjoint clusters for air wires) run over a
//! petgraph view of the anchors.

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::geometry::{Point, PositiveLength};

use super::via::Via;

/// Endpoint of a net line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetLineAnchor {
    Junction(Uuid),
    Via(Uuid),
    Pad { device: Uuid, pad: Uuid },
}

/// A free routing point inside a net segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Junction {
    pub uuid: Uuid,
    pub position: Point,
}

/// One straight routed trace on a copper layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetLine {
    pub uuid: Uuid,
    pub layer: String,
    pub width: PositiveLength,
    pub start: NetLineAnchor,
    pub end: NetLineAnchor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetSegment {
    pub uuid: Uuid,
    pub net: Option<Uuid>,
    junctions: Vec<Junction>,
    vias: Vec<Via>,
    lines: Vec<NetLine>,
}

impl NetSegment {
    pub fn new(net: Option<Uuid>) -> Self {
        NetSegment {
            uuid: Uuid::new_v4(),
            net,
            junctions: Vec::new(),
            vias: Vec::new(),
            lines: Vec::new(),
        }
    }

    pub fn add_junction(&mut self, position: Point) -> Uuid {
        let uuid = Uuid::new_v4();
        self.junctions.push(Junction { uuid, position });
        uuid
    }

    pub fn add_via(&mut self, via: Via) -> Uuid {
        let uuid = via.uuid;
        self.vias.push(via);
        uuid
    }

    pub fn add_line(
        &mut self,
        layer: impl Into<String>,
        width: PositiveLength,
        start: NetLineAnchor,
        end: NetLineAnchor,
    ) -> Uuid {
        let uuid = Uuid::new_v4();
        self.lines.push(NetLine {
            uuid,
            layer: layer.into(),
            width,
            start,
            end,
        });
        uuid
    }

    pub fn junctions(&self) -> &[Junction] {
        &self.junctions
    }

    pub fn junction(&self, uuid: Uuid) -> Option<&Junction> {
        self.junctions.iter().find(|j| j.uuid == uuid)
    }

    pub fn vias(&self) -> &[Via] {
        &self.vias
    }

    pub fn via(&self, uuid: Uuid) -> Option<&Via> {
        self.vias.iter().find(|v| v.uuid == uuid)
    }

    pub fn lines(&self) -> &[NetLine] {
        &self.lines
    }

    pub fn has_lines(&self) -> bool {
        !self.lines.is_empty()
    }

    /// Number of net lines attached to the given junction.
    pub fn junction_line_count(&self, junction: Uuid) -> usize {
        let anchor = NetLineAnchor::Junction(junction);
        self.lines
            .iter()
            .filter(|l| l.start == anchor || l.end == anchor)
            .count()
    }

    /// Groups the segment's anchors into electrically connected clusters:
    /// anchors are graph nodes, net lines are edges, clusters are the
    /// connected components. Junctions and vias without any line form
    /// singleton clusters; pad anchors only appear through lines.
    pub fn anchor_clusters(&self) -> Vec<Vec<NetLineAnchor>> {
        let mut graph: UnGraph<NetLineAnchor, ()> = UnGraph::new_undirected();
        let mut nodes: HashMap<NetLineAnchor, NodeIndex> = HashMap::new();
        let mut add_node = |graph: &mut UnGraph<NetLineAnchor, ()>,
                            nodes: &mut HashMap<NetLineAnchor, NodeIndex>,
                            anchor: NetLineAnchor| {
            *nodes
                .entry(anchor)
                .or_insert_with(|| graph.add_node(anchor))
        };
        for junction in &self.junctions {
            add_node(&mut graph, &mut nodes, NetLineAnchor::Junction(junction.uuid));
        }
        for via in &self.vias {
            add_node(&mut graph, &mut nodes, NetLineAnchor::Via(via.uuid));
        }
        for line in &self.lines {
            let a = add_node(&mut graph, &mut nodes, line.start);
            let b = add_node(&mut graph, &mut nodes, line.end);
            graph.add_edge(a, b, ());
        }

        let mut union = UnionFind::new(graph.node_count());
        for edge in graph.edge_references() {
            union.union(edge.source().index(), edge.target().index());
        }
        let mut clusters: HashMap<usize, Vec<NetLineAnchor>> = HashMap::new();
        for index in graph.node_indices() {
            clusters
                .entry(union.find(index.index()))
                .or_default()
                .push(graph[index]);
        }
        let mut result: Vec<Vec<NetLineAnchor>> = clusters.into_values().collect();
        // Deterministic output order for callers that chain clusters.
        result.sort_by_key(|c| c.len());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_junction_line_count() {
        let mut segment = NetSegment::new(None);
        let a = segment.add_junction(Point::from_nm(0, 0));
        let b = segment.add_junction(Point::from_nm(1_000_000, 0));
        let lonely = segment.add_junction(Point::from_nm(5_000_000, 0));
        segment.add_line(
            "top_cu",
            PositiveLength::from_nm(200_000),
            NetLineAnchor::Junction(a),
            NetLineAnchor::Junction(b),
        );
        assert_eq!(segment.junction_line_count(a), 1);
        assert_eq!(segment.junction_line_count(lonely), 0);
    }

    #[test]
    fn test_anchor_clusters() {
        let mut segment = NetSegment::new(None);
        let a = segment.add_junction(Point::from_nm(0, 0));
        let b = segment.add_junction(Point::from_nm(1_000_000, 0));
        let c = segment.add_junction(Point::from_nm(9_000_000, 0));
        segment.add_line(
            "top_cu",
            PositiveLength::from_nm(200_000),
            NetLineAnchor::Junction(a),
            NetLineAnchor::Junction(b),
        );
        let clusters = segment.anchor_clusters();
        assert_eq!(clusters.len(), 2);
        assert!(clusters
            .iter()
            .any(|cl| cl.len() == 1 && cl[0] == NetLineAnchor::Junction(c)));
        assert!(clusters.iter().any(|cl| cl.len() == 2));
    }
}
