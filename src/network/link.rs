//! Core network types for interface representation.

use std::fmt;

/// Interface state bits reported by the operating system.
///
/// Only the bits that matter for the persisted snapshot are modelled.
/// The [`Display`](fmt::Display) form is the `flag` field of the output file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct InterfaceFlags(u8);

impl InterfaceFlags {
    /// Interface is administratively up.
    pub const UP: Self = Self(1 << 0);
    /// Interface supports broadcast access.
    pub const BROADCAST: Self = Self(1 << 1);
    /// Interface is a loopback interface.
    pub const LOOPBACK: Self = Self(1 << 2);
    /// Interface belongs to a point-to-point link.
    pub const POINT_TO_POINT: Self = Self(1 << 3);
    /// Interface supports multicast access.
    pub const MULTICAST: Self = Self(1 << 4);
    /// Interface is operationally running.
    pub const RUNNING: Self = Self(1 << 5);

    /// Display names, in bit order.
    const NAMES: [(Self, &'static str); 6] = [
        (Self::UP, "up"),
        (Self::BROADCAST, "broadcast"),
        (Self::LOOPBACK, "loopback"),
        (Self::POINT_TO_POINT, "pointtopoint"),
        (Self::MULTICAST, "multicast"),
        (Self::RUNNING, "running"),
    ];

    /// Returns an empty flag set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Returns true if no flag is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if every bit of `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of both sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Sets `other` when `enabled` is true.
    #[must_use]
    pub const fn with_if(self, other: Self, enabled: bool) -> Self {
        if enabled { self.union(other) } else { self }
    }
}

impl std::ops::BitOr for InterfaceFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl fmt::Display for InterfaceFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("0");
        }

        let mut first = true;
        for (flag, name) in Self::NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Link-level metadata of a single network interface.
///
/// Addresses are not part of this type; they are read separately through
/// [`InterfaceSource::addresses`](super::InterfaceSource::addresses) so that
/// a failure for one interface does not hide the others.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkInfo {
    /// Interface name (e.g., "eth0").
    pub name: String,
    /// Index assigned by the operating system.
    pub index: u32,
    /// Interface state bits.
    pub flags: InterfaceFlags,
    /// Link-layer address, empty when the interface has none.
    pub hardware_addr: String,
    /// Maximum transmission unit.
    pub mtu: u32,
}

impl LinkInfo {
    /// Creates link metadata with no flags, no hardware address and MTU 0.
    #[must_use]
    pub fn new(name: impl Into<String>, index: u32) -> Self {
        Self {
            name: name.into(),
            index,
            flags: InterfaceFlags::empty(),
            hardware_addr: String::new(),
            mtu: 0,
        }
    }

    /// Sets the interface flags.
    #[must_use]
    pub const fn with_flags(mut self, flags: InterfaceFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the hardware address string.
    #[must_use]
    pub fn with_hardware_addr(mut self, addr: impl Into<String>) -> Self {
        self.hardware_addr = addr.into();
        self
    }

    /// Sets the MTU.
    #[must_use]
    pub const fn with_mtu(mut self, mtu: u32) -> Self {
        self.mtu = mtu;
        self
    }
}

/// Formats a link-layer address as lowercase, colon-separated hex.
///
/// An all-zero or empty address formats as the empty string, which is
/// how loopback interfaces end up with no `mac` in the snapshot.
#[must_use]
pub fn format_hardware_addr(octets: &[u8]) -> String {
    if octets.iter().all(|b| *b == 0) {
        return String::new();
    }

    octets
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(":")
}
