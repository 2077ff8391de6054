//! Tests for snapshot capture and encoding.

use super::*;
use crate::network::mock::MockSource;
use crate::network::{InterfaceFlags, LinkInfo};

fn eth0() -> LinkInfo {
    LinkInfo::new("eth0", 2)
        .with_flags(InterfaceFlags::UP | InterfaceFlags::BROADCAST)
        .with_hardware_addr("aa:bb:cc:dd:ee:ff")
        .with_mtu(1500)
}

fn eth1() -> LinkInfo {
    LinkInfo::new("eth1", 3)
        .with_flags(InterfaceFlags::UP | InterfaceFlags::MULTICAST)
        .with_hardware_addr("aa:bb:cc:dd:ee:01")
        .with_mtu(9000)
}

fn record(name: &str, index: u32, addresses: &[&str]) -> InterfaceRecord {
    InterfaceRecord {
        name: name.to_string(),
        index,
        flags: "up".to_string(),
        hardware_addr: String::new(),
        mtu: 1500,
        addresses: addresses.iter().map(ToString::to_string).collect(),
    }
}

mod interface_record {
    use super::*;

    #[test]
    fn from_link_copies_metadata_and_renders_flags() {
        let rec = InterfaceRecord::from_link(eth0(), vec!["10.0.0.2/24".to_string()]);

        assert_eq!(rec.name, "eth0");
        assert_eq!(rec.index, 2);
        assert_eq!(rec.flags, "up|broadcast");
        assert_eq!(rec.hardware_addr, "aa:bb:cc:dd:ee:ff");
        assert_eq!(rec.mtu, 1500);
        assert_eq!(rec.addresses, vec!["10.0.0.2/24".to_string()]);
    }

    #[test]
    fn flagless_link_renders_zero() {
        let rec = InterfaceRecord::from_link(LinkInfo::new("dummy0", 9), vec![]);
        assert_eq!(rec.flags, "0");
    }
}

mod capture {
    use super::*;

    #[test]
    fn keeps_interface_order() {
        let source = MockSource::steady(vec![eth1(), eth0()]);

        let snapshot = super::super::capture(&source).unwrap();

        let names: Vec<_> = snapshot.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["eth1", "eth0"]);
    }

    #[test]
    fn partial_address_failure_keeps_interface_without_addresses() {
        let source = MockSource::steady(vec![eth0(), eth1()])
            .with_addresses("eth0", &["10.0.0.2/24", "fe80::1/64"])
            .failing_addresses("eth1");

        let snapshot = super::super::capture(&source).unwrap();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(
            snapshot.records()[0].addresses,
            vec!["10.0.0.2/24".to_string(), "fe80::1/64".to_string()]
        );
        assert_eq!(snapshot.records()[1].name, "eth1");
        assert!(snapshot.records()[1].addresses.is_empty());
    }

    #[test]
    fn enumeration_failure_is_returned() {
        let source = MockSource::default().then(Err(FetchError::Platform {
            message: "netlink unavailable".to_string(),
        }));

        let result = super::super::capture(&source);

        assert!(matches!(result, Err(FetchError::Platform { .. })));
        assert_eq!(source.address_calls(), 0);
    }

    #[test]
    fn no_interfaces_yields_empty_snapshot() {
        let source = MockSource::default();

        let snapshot = super::super::capture(&source).unwrap();
        assert!(snapshot.is_empty());
    }
}

mod encoding {
    use super::*;

    #[test]
    fn uses_tab_indentation_and_fixed_key_order() {
        let snapshot = Snapshot::new(vec![InterfaceRecord::from_link(
            eth0(),
            vec!["10.0.0.2/24".to_string()],
        )]);

        let bytes = encode(&snapshot).unwrap();

        let expected = "[\n\t{\n\t\t\"name\": \"eth0\",\n\t\t\"index\": 2,\n\t\t\"flag\": \"up|broadcast\",\n\t\t\"mac\": \"aa:bb:cc:dd:ee:ff\",\n\t\t\"mtu\": 1500,\n\t\t\"ip\": [\n\t\t\t\"10.0.0.2/24\"\n\t\t]\n\t}\n]";
        assert_eq!(String::from_utf8(bytes).unwrap(), expected);
    }

    #[test]
    fn empty_addresses_encode_as_null() {
        let snapshot = Snapshot::new(vec![record("lo", 1, &[])]);

        let text = String::from_utf8(encode(&snapshot).unwrap()).unwrap();

        assert!(text.contains("\"ip\": null"));
    }

    #[test]
    fn empty_snapshot_encodes_as_empty_array() {
        let bytes = encode(&Snapshot::default()).unwrap();
        assert_eq!(bytes, b"[]");
    }

    #[test]
    fn identical_snapshots_encode_identically() {
        let a = Snapshot::new(vec![record("eth0", 2, &["10.0.0.2/24"])]);
        let b = Snapshot::new(vec![record("eth0", 2, &["10.0.0.2/24"])]);

        assert_eq!(encode(&a).unwrap(), encode(&b).unwrap());
    }

    #[test]
    fn address_order_changes_encoding() {
        let a = Snapshot::new(vec![record("eth0", 2, &["10.0.0.2/24", "10.0.0.3/24"])]);
        let b = Snapshot::new(vec![record("eth0", 2, &["10.0.0.3/24", "10.0.0.2/24"])]);

        assert_ne!(encode(&a).unwrap(), encode(&b).unwrap());
    }

    #[test]
    fn round_trip_preserves_every_field() {
        let snapshot = Snapshot::new(vec![
            InterfaceRecord::from_link(eth0(), vec!["10.0.0.2/24".to_string()]),
            InterfaceRecord::from_link(eth1(), vec![]),
            record("wlan0", 4, &["192.168.1.7/24", "fe80::abcd/64"]),
        ]);

        let decoded = decode(&encode(&snapshot).unwrap()).unwrap();

        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn decode_accepts_missing_ip_key() {
        let json = r#"[{"name":"lo","index":1,"flag":"up|loopback","mac":"","mtu":65536}]"#;

        let snapshot = decode(json.as_bytes()).unwrap();

        assert_eq!(snapshot.records()[0].mtu, 65536);
        assert!(snapshot.records()[0].addresses.is_empty());
    }

    #[test]
    fn decode_rejects_invalid_json() {
        let result = decode(b"{not json");
        assert!(matches!(result, Err(SnapshotError::Decode(_))));
    }
}
