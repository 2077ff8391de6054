//! Interface snapshots and their canonical byte form.
//!
//! A [`Snapshot`] is built fresh on every poll by [`capture`], turned into
//! bytes by [`encode`], and only those bytes survive between polls. Two
//! polls are considered identical exactly when their encodings are equal.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::network::{FetchError, InterfaceSource, LinkInfo};

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

/// Indentation used for every nesting level of the output file.
const INDENT: &[u8] = b"\t";

/// One entry per interface that passed the name filter.
///
/// Field order is the key order of the output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceRecord {
    /// Interface name (e.g., "eth0").
    pub name: String,
    /// Index assigned by the operating system.
    pub index: u32,
    /// Human-readable interface flags (e.g., "up|broadcast|multicast").
    #[serde(rename = "flag")]
    pub flags: String,
    /// Link-layer address, may be empty.
    #[serde(rename = "mac")]
    pub hardware_addr: String,
    /// Maximum transmission unit.
    pub mtu: u32,
    /// Bound addresses in CIDR notation, in OS order.
    ///
    /// Written as `null` when empty.
    #[serde(
        rename = "ip",
        default,
        serialize_with = "serialize_addresses",
        deserialize_with = "deserialize_addresses"
    )]
    pub addresses: Vec<String>,
}

impl InterfaceRecord {
    /// Builds a record from link metadata and the addresses read for it.
    #[must_use]
    pub fn from_link(link: LinkInfo, addresses: Vec<String>) -> Self {
        Self {
            flags: link.flags.to_string(),
            name: link.name,
            index: link.index,
            hardware_addr: link.hardware_addr,
            mtu: link.mtu,
            addresses,
        }
    }
}

fn serialize_addresses<S: Serializer>(addrs: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    if addrs.is_empty() {
        serializer.serialize_none()
    } else {
        serializer.serialize_some(addrs)
    }
}

fn deserialize_addresses<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// The filtered set of interfaces captured in one poll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    records: Vec<InterfaceRecord>,
}

impl Snapshot {
    /// Creates a snapshot from records, keeping their order.
    #[must_use]
    pub const fn new(records: Vec<InterfaceRecord>) -> Self {
        Self { records }
    }

    /// Returns the captured records.
    #[must_use]
    pub fn records(&self) -> &[InterfaceRecord] {
        &self.records
    }

    /// Returns the number of captured interfaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no interface was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Error type for snapshot encoding and decoding.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Failed to serialize the snapshot.
    #[error("Failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    /// Failed to parse snapshot bytes.
    #[error("Failed to decode snapshot: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Reads every interface from `source` and builds a snapshot.
///
/// A failure to read one interface's addresses is logged and leaves that
/// interface in the snapshot with no addresses.
///
/// # Errors
///
/// Returns [`FetchError`] when the interface list itself cannot be read.
pub fn capture<S: InterfaceSource + ?Sized>(source: &S) -> Result<Snapshot, FetchError> {
    let links = source.links()?;

    let records = links
        .into_iter()
        .map(|link| {
            let addresses = source.addresses(&link).unwrap_or_else(|e| {
                tracing::warn!("{e}");
                Vec::new()
            });
            InterfaceRecord::from_link(link, addresses)
        })
        .collect();

    Ok(Snapshot::new(records))
}

/// Serializes a snapshot to its canonical form: a JSON array, one tab per
/// nesting level, keys in declaration order.
///
/// # Errors
///
/// Returns [`SnapshotError::Encode`] if serialization fails.
pub fn encode(snapshot: &Snapshot) -> Result<Vec<u8>, SnapshotError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    snapshot
        .serialize(&mut serializer)
        .map_err(SnapshotError::Encode)?;
    Ok(buf)
}

/// Parses bytes produced by [`encode`] (or any equivalent JSON).
///
/// # Errors
///
/// Returns [`SnapshotError::Decode`] if the bytes are not a valid snapshot.
pub fn decode(bytes: &[u8]) -> Result<Snapshot, SnapshotError> {
    serde_json::from_slice(bytes).map_err(SnapshotError::Decode)
}
