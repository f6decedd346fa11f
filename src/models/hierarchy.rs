//! Hierarchy tree produced by the allocator.

use super::ipv4::{number_to_ip, Ipv4};
use itertools::Itertools;
use serde::Serialize;
use std::net::Ipv4Addr;

/// Display name of the leftover-space node at each partitioned level.
pub const UNALLOCATED: &str = "Unallocated";

/// What a [`HierarchyNode`] stands for.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Supernet,
    Region,
    Territory,
    Unallocated,
    /// One CIDR block of a fragmented Unallocated remainder.
    FreeBlock,
}

/// Optional per-node figures.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sites_capacity: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// One node of the supernet → region → territory tree.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyNode {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
    /// CIDR text; a comma separated list for a fragmented Unallocated node.
    pub cidr: String,
    /// The block itself, `None` only for a fragmented Unallocated node.
    #[serde(skip)]
    pub block: Option<Ipv4>,
    pub network: Ipv4Addr,
    pub broadcast: Ipv4Addr,
    pub total_addresses: u64,
    pub address_range: String,
    pub children: Vec<HierarchyNode>,
    pub metadata: NodeMetadata,
}

impl HierarchyNode {
    /// A node covering exactly one CIDR block.
    pub fn from_block(id: &str, name: &str, kind: NodeKind, block: Ipv4) -> HierarchyNode {
        HierarchyNode {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            cidr: block.to_string(),
            block: Some(block),
            network: block.addr(),
            broadcast: block.broadcast(),
            total_addresses: block.address_count(),
            address_range: block.address_range(),
            children: vec![],
            metadata: NodeMetadata::default(),
        }
    }

    /// The leftover space of one level, given as its contiguous CIDR cover.
    ///
    /// Returns `None` when there is nothing left over.
    pub fn unallocated(parent_id: &str, blocks: Vec<Ipv4>) -> Option<HierarchyNode> {
        let id = format!("{parent_id}-unallocated");
        match blocks.as_slice() {
            [] => None,
            [block] => Some(HierarchyNode::from_block(
                &id,
                UNALLOCATED,
                NodeKind::Unallocated,
                *block,
            )),
            [first, .., last] => {
                let total_addresses = blocks.iter().map(|b| b.address_count()).sum();
                let children = blocks
                    .iter()
                    .enumerate()
                    .map(|(i, b)| {
                        HierarchyNode::from_block(
                            &format!("{id}-{}", i + 1),
                            &format!("{UNALLOCATED} {b}"),
                            NodeKind::FreeBlock,
                            *b,
                        )
                    })
                    .collect();
                Some(HierarchyNode {
                    id: id.clone(),
                    name: UNALLOCATED.to_string(),
                    kind: NodeKind::Unallocated,
                    cidr: blocks.iter().join(", "),
                    block: None,
                    network: first.addr(),
                    broadcast: last.broadcast(),
                    total_addresses,
                    address_range: format!("{} - {}", number_to_ip(first.lo()), number_to_ip(last.hi())),
                    children,
                    metadata: NodeMetadata::default(),
                })
            }
        }
    }

    pub fn with_children(mut self, children: Vec<HierarchyNode>) -> HierarchyNode {
        self.children = children;
        self
    }

    pub fn with_metadata(mut self, metadata: NodeMetadata) -> HierarchyNode {
        self.metadata = metadata;
        self
    }

    pub fn is_unallocated(&self) -> bool {
        self.kind == NodeKind::Unallocated
    }

    /// Children other than the Unallocated remainder.
    pub fn allocated_children(&self) -> impl Iterator<Item = &HierarchyNode> {
        self.children.iter().filter(|c| !c.is_unallocated())
    }

    pub fn unallocated_child(&self) -> Option<&HierarchyNode> {
        self.children.iter().find(|c| c.is_unallocated())
    }

    pub fn sites_capacity(&self) -> u64 {
        self.metadata.sites_capacity.unwrap_or(0)
    }

    /// Depth-first, pre-order walk over this node and all descendants.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a HierarchyNode)) {
        visit(self);
        for child in &self.children {
            child.walk(&mut *visit);
        }
    }

    pub fn find(&self, id: &str) -> Option<&HierarchyNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }
}
