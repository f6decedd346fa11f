//! Proportional, power-of-two constrained splitting of one block.
//!
//! Every share is rounded down to the largest CIDR block that fits it. Blocks
//! are packed from the parent's network address, largest first, which keeps
//! each one aligned and leaves a single contiguous tail of unallocated space.
//! When shares are declared largest first this is plain declaration order.

use crate::error::PlanError;
use crate::models::{range_to_cidrs, Ipv4, MAX_LENGTH};
use itertools::Itertools;

// A few ULPs of relative slack, so a share that is a power of two up to float
// rounding still gets that block. Far below one address for any /0 share.
const SHARE_EPSILON: f64 = 4.0 * f64::EPSILON;

/// Result of one split: a block per weight (in weight order) and the CIDR
/// cover of whatever is left over.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub blocks: Vec<Ipv4>,
    pub unallocated: Vec<Ipv4>,
}

impl Partition {
    pub fn allocated_addresses(&self) -> u64 {
        self.blocks.iter().map(|b| b.address_count()).sum()
    }

    pub fn unallocated_addresses(&self) -> u64 {
        self.unallocated.iter().map(|b| b.address_count()).sum()
    }
}

/// Longest prefix inside `parent_mask` whose block does not exceed `share` addresses.
fn largest_block_within(parent_mask: u8, share: f64) -> Option<u8> {
    (parent_mask..=MAX_LENGTH).find(|&mask| {
        let size = (1u64 << (MAX_LENGTH - mask)) as f64;
        size <= share * (1.0 + SHARE_EPSILON)
    })
}

/// Split `parent` into one block per weight, each rounded down to a power of two.
///
/// `what` names the children in error messages ("region", "territory").
pub fn split_proportional(parent: Ipv4, weights: &[f64], what: &str) -> Result<Partition, PlanError> {
    let parent = parent.network();
    let total_weight: f64 = weights.iter().sum();
    if weights.is_empty() || total_weight.is_nan() || total_weight <= 0.0 {
        return Err(PlanError::Configuration(format!(
            "cannot split {parent} without positive {what} weights"
        )));
    }
    let total = parent.address_count();

    let mut masks = Vec::with_capacity(weights.len());
    for (i, weight) in weights.iter().enumerate() {
        let share = total as f64 * weight / total_weight;
        let mask = largest_block_within(parent.mask(), share).ok_or_else(|| {
            PlanError::Configuration(format!(
                "{parent} is too small to give {what} {} its share of {share:.2} addresses",
                i + 1
            ))
        })?;
        masks.push(mask);
    }

    // Largest first; stable so equal sizes keep their declared order.
    let mut order: Vec<usize> = (0..masks.len()).collect();
    order.sort_by_key(|&i| masks[i]);

    let end = parent.lo() as u64 + total;
    let mut cursor = parent.lo() as u64;
    let mut placed: Vec<Option<Ipv4>> = vec![None; masks.len()];
    for i in order {
        let size = 1u64 << (MAX_LENGTH - masks[i]);
        if cursor + size > end {
            return Err(PlanError::Configuration(format!(
                "{what} blocks overflow {parent}"
            )));
        }
        placed[i] = Some(Ipv4::from_bits(cursor as u32, masks[i])?);
        cursor += size;
    }
    let blocks: Vec<Ipv4> = placed.into_iter().flatten().collect();

    let unallocated = if cursor < end {
        range_to_cidrs(cursor as u32, parent.hi())
    } else {
        vec![]
    };

    log::debug!(
        "split {parent} into {} {what} block(s) [{}], {} address(es) unallocated",
        blocks.len(),
        blocks.iter().join(", "),
        end - cursor
    );

    Ok(Partition {
        blocks,
        unallocated,
    })
}
