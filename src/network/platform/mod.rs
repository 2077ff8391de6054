//! Operating-system interface source.
//!
//! Link metadata (name, index, flags, MAC, MTU) comes from `netdev`, which
//! covers Linux, the BSDs, macOS and Windows. Bound addresses come from
//! `if-addrs` and are attached to links by interface index, so labeled
//! aliases (`eth0:vip`) land on their parent interface and Windows adapters
//! match regardless of which of their names each crate reports.

use std::io;
use std::net::IpAddr;
use std::sync::{Mutex, PoisonError};

use if_addrs::IfAddr;

use super::{FetchError, InterfaceFlags, InterfaceSource, LinkInfo, format_hardware_addr};

/// One address reported by the OS, reduced to what matching needs.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BoundAddress {
    name: String,
    index: Option<u32>,
    cidr: String,
}

/// Addresses read together with the link list of the current poll.
///
/// A failed read is kept as kind and message so every interface of the
/// poll reports it.
type AddressTable = Result<Vec<BoundAddress>, (io::ErrorKind, String)>;

/// [`InterfaceSource`] backed by the host operating system.
///
/// Addresses are enumerated once per [`InterfaceSource::links`] call and
/// served from that table until the next one, so a snapshot never mixes
/// addresses from different moments.
#[derive(Debug, Default)]
pub struct PlatformSource {
    table: Mutex<Option<AddressTable>>,
}

impl PlatformSource {
    /// Creates a new platform source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn store(&self, table: AddressTable) {
        *self.table.lock().unwrap_or_else(PoisonError::into_inner) = Some(table);
    }
}

impl InterfaceSource for PlatformSource {
    fn links(&self) -> Result<Vec<LinkInfo>, FetchError> {
        let interfaces = netdev::get_interfaces();
        // netdev swallows OS errors; a host always has at least a loopback
        if interfaces.is_empty() {
            return Err(FetchError::Platform {
                message: "no network interfaces reported by the OS".to_string(),
            });
        }

        let mut links: Vec<LinkInfo> = interfaces.iter().map(link_info).collect();
        links.sort_by_key(|link| link.index);

        self.store(read_addresses());
        Ok(links)
    }

    fn addresses(&self, link: &LinkInfo) -> Result<Vec<String>, FetchError> {
        let guard = self.table.lock().unwrap_or_else(PoisonError::into_inner);

        match guard.as_ref() {
            Some(Ok(table)) => Ok(addresses_for(table, link)),
            Some(Err((kind, message))) => Err(FetchError::AddressRead {
                interface: link.name.clone(),
                source: io::Error::new(*kind, message.clone()),
            }),
            None => Err(FetchError::AddressRead {
                interface: link.name.clone(),
                source: io::Error::other("interfaces have not been listed yet"),
            }),
        }
    }
}

fn read_addresses() -> AddressTable {
    let interfaces = if_addrs::get_if_addrs().map_err(|e| (e.kind(), e.to_string()))?;

    Ok(interfaces
        .into_iter()
        .map(|iface| BoundAddress {
            cidr: cidr(&iface.addr),
            name: iface.name,
            index: iface.index,
        })
        .collect())
}

/// Selects the addresses bound to `link`, keeping OS order.
///
/// Entries are matched by index. Entries without an index fall back to the
/// name with any `:label` suffix removed.
fn addresses_for(table: &[BoundAddress], link: &LinkInfo) -> Vec<String> {
    table
        .iter()
        .filter(|addr| match addr.index {
            Some(index) => index == link.index,
            None => base_name(&addr.name) == link.name,
        })
        .map(|addr| addr.cidr.clone())
        .collect()
}

fn base_name(name: &str) -> &str {
    name.split_once(':').map_or(name, |(base, _)| base)
}

fn link_info(iface: &netdev::Interface) -> LinkInfo {
    let flags = InterfaceFlags::empty()
        .with_if(InterfaceFlags::UP, iface.is_up())
        .with_if(InterfaceFlags::BROADCAST, iface.is_broadcast())
        .with_if(InterfaceFlags::LOOPBACK, iface.is_loopback())
        .with_if(InterfaceFlags::POINT_TO_POINT, iface.is_point_to_point())
        .with_if(InterfaceFlags::MULTICAST, iface.is_multicast())
        .with_if(InterfaceFlags::RUNNING, iface.is_running());

    let hardware_addr = iface
        .mac_addr
        .as_ref()
        .map(|mac| format_hardware_addr(&mac.octets()))
        .unwrap_or_default();

    LinkInfo::new(display_name(&iface.name, iface.friendly_name.as_deref()), iface.index)
        .with_flags(flags)
        .with_hardware_addr(hardware_addr)
        .with_mtu(iface.mtu.unwrap_or_default())
}

/// Name shown to users and matched by the filter.
///
/// Windows identifies adapters by GUID and names them by their friendly
/// name ("Ethernet", "Wi-Fi"); elsewhere there is only one name.
fn display_name(name: &str, friendly_name: Option<&str>) -> String {
    friendly_name
        .filter(|friendly| !friendly.is_empty())
        .unwrap_or(name)
        .to_string()
}

/// Formats an interface address in CIDR notation.
fn cidr(addr: &IfAddr) -> String {
    match addr {
        IfAddr::V4(v4) => format_cidr(IpAddr::V4(v4.ip), &v4.netmask.octets()),
        IfAddr::V6(v6) => format_cidr(IpAddr::V6(v6.ip), &v6.netmask.octets()),
    }
}

/// Joins an address with the prefix length counted from its netmask.
fn format_cidr(ip: IpAddr, netmask: &[u8]) -> String {
    let prefix: u32 = netmask.iter().map(|b| b.count_ones()).sum();
    format!("{ip}/{prefix}")
}
