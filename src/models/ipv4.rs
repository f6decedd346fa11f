//! IPv4 address and CIDR arithmetic.
//!
//! Stateless functions over `(address, prefix length)` pairs plus the [`Ipv4`]
//! block type. Addresses are `u32`, address counts are `u64` so that a `/0`
//! (2^32 addresses) never wraps.

use crate::error::PlanError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

lazy_static! {
    // Octets and prefix lengths without leading zeros.
    static ref IP_RE: Regex = Regex::new(
        r"^(0|[1-9]\d{0,2})\.(0|[1-9]\d{0,2})\.(0|[1-9]\d{0,2})\.(0|[1-9]\d{0,2})$"
    )
    .expect("Invalid Regex?");
    static ref CIDR_RE: Regex = Regex::new(r"^([0-9.]+)/(0|[1-9]\d?)$").expect("Invalid Regex?");
}

fn check_len(len: u8) -> Result<u8, PlanError> {
    if len > MAX_LENGTH {
        Err(PlanError::InvalidFormat(format!(
            "prefix length /{len} is out of range 0..=32"
        )))
    } else {
        Ok(len)
    }
}

// Caller guarantees len <= 32.
fn block_size(len: u8) -> u64 {
    1u64 << (MAX_LENGTH - len)
}

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use subnet_planner::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, PlanError> {
    let right_len = MAX_LENGTH - check_len(len)?;
    let all_bits = u32::MAX as u64;
    let mask = (all_bits >> right_len) << right_len;
    Ok(mask as u32)
}

/// Get the network address for a given address and prefix length.
pub fn cut_addr(addr: u32, len: u8) -> Result<u32, PlanError> {
    Ok(addr & get_cidr_mask(len)?)
}

/// True when `addr` has all low `32 - len` bits zero.
pub fn is_aligned(addr: u32, len: u8) -> Result<bool, PlanError> {
    Ok(cut_addr(addr, len)? == addr)
}

/// Convert dotted-quad text to its 32-bit value.
pub fn ip_to_number(text: &str) -> Result<u32, PlanError> {
    let caps = IP_RE
        .captures(text.trim())
        .ok_or_else(|| PlanError::InvalidFormat(format!("invalid IPv4 address '{text}'")))?;

    let mut bits: u32 = 0;
    for i in 1..=4 {
        let octet: u8 = caps[i].parse().map_err(|_| {
            PlanError::InvalidFormat(format!("octet '{}' of '{text}' is not 0-255", &caps[i]))
        })?;
        bits = (bits << 8) | octet as u32;
    }
    Ok(bits)
}

/// Convert a 32-bit value to dotted-quad text.
pub fn number_to_ip(bits: u32) -> String {
    Ipv4Addr::from(bits).to_string()
}

/// Parse `a.b.c.d/n` into `(address, prefix length)`.
///
/// The address does not have to be a network address.
pub fn parse_cidr(text: &str) -> Result<(u32, u8), PlanError> {
    let text = text.trim();
    let caps = CIDR_RE
        .captures(text)
        .ok_or_else(|| PlanError::InvalidFormat(format!("invalid CIDR '{text}'")))?;
    let addr = ip_to_number(&caps[1])?;
    let len: u8 = caps[2]
        .parse()
        .map_err(|_| PlanError::InvalidFormat(format!("invalid prefix in '{text}'")))?;
    Ok((addr, check_len(len)?))
}

/// Number of addresses in a block of the given prefix length.
pub fn subnet_address_count(len: u8) -> Result<u64, PlanError> {
    Ok(block_size(check_len(len)?))
}

/// Usable hosts, excluding network and broadcast only when both exist (/0 - /30).
pub fn usable_hosts(len: u8) -> Result<u64, PlanError> {
    let count = subnet_address_count(len)?;
    if len <= MAX_LENGTH - 2 {
        Ok(count - 2)
    } else {
        Ok(count)
    }
}

/// Number of `inner` blocks that tile one `outer` block.
pub fn subnet_count(outer: u8, inner: u8) -> Result<u64, PlanError> {
    check_len(outer)?;
    check_len(inner)?;
    if inner < outer {
        return Err(PlanError::PrefixOrder { outer, inner });
    }
    Ok(1u64 << (inner - outer))
}

/// Address of the `n`th `inner` block inside the `outer` block starting at `base`.
pub fn get_nth_subnet(base: u32, outer: u8, inner: u8, n: u64) -> Result<u32, PlanError> {
    let count = subnet_count(outer, inner)?;
    if n >= count {
        return Err(PlanError::IndexOutOfRange { index: n, count });
    }
    let addr = base as u64 + n * block_size(inner);
    u32::try_from(addr).map_err(|_| PlanError::IndexOutOfRange { index: n, count })
}

/// Last address of the block starting at `network`.
pub fn get_broadcast_address(network: u32, len: u8) -> Result<u32, PlanError> {
    let last = network as u64 + subnet_address_count(len)? - 1;
    u32::try_from(last).map_err(|_| {
        PlanError::InvalidFormat(format!(
            "{}/{len} runs past 255.255.255.255",
            number_to_ip(network)
        ))
    })
}

/// First and last usable host of the block starting at `network`.
pub fn get_host_range(network: u32, len: u8) -> Result<(u32, u32), PlanError> {
    let broadcast = get_broadcast_address(network, len)?;
    if len <= MAX_LENGTH - 2 {
        Ok((network + 1, broadcast - 1))
    } else {
        Ok((network, broadcast))
    }
}

/// Render a count with K/M/B suffixes for display.
pub fn format_size(count: u64) -> String {
    const UNITS: [(u64, &str); 3] = [(1_000_000_000, "B"), (1_000_000, "M"), (1_000, "K")];

    let Some(mut unit) = UNITS.iter().position(|&(scale, _)| count >= scale) else {
        return count.to_string();
    };
    let tenths = |scale: u64| (count as f64 / scale as f64 * 10.0).round() / 10.0;
    // 999_999 rounds to 1000K; show it as 1M instead.
    if unit > 0 && tenths(UNITS[unit].0) >= 1000.0 {
        unit -= 1;
    }
    let (scale, suffix) = UNITS[unit];
    let value = format!("{:.1}", tenths(scale));
    let value = value.strip_suffix(".0").unwrap_or(&value);
    format!("{value}{suffix}")
}

/// Minimal list of aligned CIDR blocks covering `first..=last`.
pub fn range_to_cidrs(first: u32, last: u32) -> Vec<Ipv4> {
    let mut blocks = Vec::new();
    let mut start = first as u64;
    let end = last as u64 + 1;

    while start < end {
        let mut size = if start == 0 {
            1u64 << MAX_LENGTH
        } else {
            1u64 << start.trailing_zeros()
        };
        while size > end - start {
            size >>= 1;
        }
        let mask = MAX_LENGTH - size.trailing_zeros() as u8;
        blocks.push(Ipv4 {
            addr: Ipv4Addr::from(start as u32),
            mask,
        });
        start += size;
    }
    blocks
}

/// IPv4 address with CIDR notation support.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    addr: Ipv4Addr,
    mask: u8,
}

impl Serialize for Ipv4 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Ipv4 {
    fn deserialize<D>(deserializer: D) -> Result<Ipv4, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv4::new(&s).map_err(de::Error::custom)
    }
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from a CIDR string (e.g., "10.0.0.0/24").
    pub fn new(addr_cidr: &str) -> Result<Ipv4, PlanError> {
        let (bits, mask) = parse_cidr(addr_cidr)?;
        Ok(Ipv4 {
            addr: Ipv4Addr::from(bits),
            mask,
        })
    }

    /// Create an [`Ipv4`] from a numeric address and prefix length.
    pub fn from_bits(bits: u32, mask: u8) -> Result<Ipv4, PlanError> {
        Ok(Ipv4 {
            addr: Ipv4Addr::from(bits),
            mask: check_len(mask)?,
        })
    }

    pub fn addr(&self) -> Ipv4Addr {
        self.addr
    }

    pub fn mask(&self) -> u8 {
        self.mask
    }

    pub fn bits(&self) -> u32 {
        u32::from(self.addr)
    }

    /// The block this address belongs to, with host bits cleared.
    pub fn network(&self) -> Ipv4 {
        let right_len = MAX_LENGTH - self.mask;
        let bits = ((self.bits() as u64 >> right_len) << right_len) as u32;
        Ipv4 {
            addr: Ipv4Addr::from(bits),
            mask: self.mask,
        }
    }

    pub fn is_network(&self) -> bool {
        self.network() == *self
    }

    pub fn address_count(&self) -> u64 {
        block_size(self.mask)
    }

    /// Lowest (network) address in the block.
    pub fn lo(&self) -> u32 {
        self.network().bits()
    }

    /// Highest (broadcast) address in the block.
    pub fn hi(&self) -> u32 {
        (self.lo() as u64 + self.address_count() - 1) as u32
    }

    pub fn broadcast(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.hi())
    }

    /// Usable host range rendered as `"first - last"`.
    pub fn address_range(&self) -> String {
        let (first, last) = if self.mask <= MAX_LENGTH - 2 {
            (self.lo() + 1, self.hi() - 1)
        } else {
            (self.lo(), self.hi())
        };
        format!("{} - {}", number_to_ip(first), number_to_ip(last))
    }

    /// True when `other` lies entirely inside this block.
    pub fn contains(&self, other: &Ipv4) -> bool {
        self.lo() <= other.lo() && other.hi() <= self.hi()
    }

    /// True when the two blocks share at least one address.
    pub fn overlaps(&self, other: &Ipv4) -> bool {
        self.lo() <= other.hi() && other.lo() <= self.hi()
    }

    /// The `n`th block of prefix `mask` inside this block.
    pub fn nth_subnet(&self, mask: u8, n: u64) -> Result<Ipv4, PlanError> {
        let bits = get_nth_subnet(self.lo(), self.mask, mask, n)?;
        Ipv4::from_bits(bits, mask)
    }
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}
