//! End-to-end permission parsing and lookup.
//!
//! Covers the documented entry examples, config loading from JSON, and the
//! rendering round trip through the name table.

use std::net::{IpAddr, SocketAddr};

use netperm::core::PERMISSION_NAMES;
use netperm::{
    BoundPermission, ConfigError, ConnectionDirection, ParseError, PermissionConfig,
    PermissionFlags, PermissionSet, SubnetPermission,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

#[test]
fn relay_noban_subnet() {
    init_tracing();
    let perm = SubnetPermission::try_parse("relay,noban@10.0.0.0/8").unwrap();

    assert_eq!(perm.subnet, "10.0.0.0/8".parse::<ipnet::IpNet>().unwrap());
    assert_eq!(perm.direction, ConnectionDirection::Both);
    assert!(perm.flags.has_flag(PermissionFlags::RELAY));
    assert!(perm.flags.has_flag(PermissionFlags::NO_BAN));
    assert!(perm.flags.has_flag(PermissionFlags::DOWNLOAD));
    assert!(!perm.flags.is_implicit());
}

#[test]
fn unknown_token_fails_for_both_kinds() {
    init_tracing();
    let expected = ParseError::UnknownPermission("bogus".into());

    assert_eq!(SubnetPermission::try_parse("bogus@1.2.3.4"), Err(expected.clone()));
    assert_eq!(BoundPermission::try_parse("bogus@1.2.3.4:8333"), Err(expected.clone()));
    assert_eq!(expected.to_string(), "invalid P2P permission: 'bogus'");
}

#[test]
fn bound_without_list_is_implicit() {
    init_tracing();
    let perm = BoundPermission::try_parse("1.2.3.4:8333").unwrap();

    assert_eq!(perm.flags, PermissionFlags::IMPLICIT);
    assert!(perm.flags.capabilities().is_empty());
}

#[test]
fn all_is_exact_aggregate() {
    init_tracing();
    let perm = SubnetPermission::try_parse("all@5.6.7.8/24").unwrap();

    assert_eq!(perm.flags, PermissionFlags::ALL);
    assert!(!perm
        .permissions()
        .to_strings()
        .contains(&"blockfilters-explicit"));

    let named = SubnetPermission::try_parse("all,blockfilters@5.6.7.8/24").unwrap();
    assert_eq!(
        named.flags,
        PermissionFlags::ALL | PermissionFlags::BLOCK_FILTERS_EXPLICIT
    );
    assert!(named
        .permissions()
        .to_strings()
        .contains(&"blockfilters-explicit"));
}

#[test]
fn rendered_tokens_reparse() {
    for name in PERMISSION_NAMES {
        let mut flags = PermissionFlags::NONE;
        flags.add_flag(name.flags);

        let list = PermissionSet::new(flags).to_strings().join(",");
        let entry = format!("{list}@192.0.2.1");
        let perm = SubnetPermission::try_parse(&entry).unwrap();

        assert!(perm.flags.has_flag(name.flags), "{entry}");
    }
}

#[test]
fn error_kinds() {
    init_tracing();
    assert!(matches!(
        BoundPermission::try_parse("relay@nowhere"),
        Err(ParseError::MalformedAddress(_))
    ));
    assert!(matches!(
        BoundPermission::try_parse("relay@1.2.3.4"),
        Err(ParseError::MissingPort(_))
    ));
    assert!(matches!(
        SubnetPermission::try_parse("relay@1.2.3.4/99"),
        Err(ParseError::MalformedSubnet(_))
    ));
    assert!(matches!(
        SubnetPermission::try_parse("><relay@1.2.3.4"),
        Err(ParseError::MalformedDirection(_))
    ));
}

#[test]
fn config_from_json() {
    init_tracing();
    let json = r#"{
        "whitebind": ["noban@127.0.0.1:8334", "[::1]:8335"],
        "whitelist": ["<relay,mempool@10.0.0.0/8", ">addr@2001:db8::/32"],
        "implicit": { "force_relay": true }
    }"#;

    let config: PermissionConfig = serde_json::from_str(json).unwrap();
    assert!(config.implicit.relay);
    assert!(config.implicit.force_relay);

    let table = config.load().unwrap();
    let peer: IpAddr = "10.9.9.9".parse().unwrap();

    let explicit_bind: SocketAddr = "127.0.0.1:8334".parse().unwrap();
    let flags = table.inbound_flags(Some(&explicit_bind), &peer);
    assert_eq!(
        flags,
        PermissionFlags::NO_BAN | PermissionFlags::RELAY | PermissionFlags::MEMPOOL
    );

    let implicit_bind: SocketAddr = "[::1]:8335".parse().unwrap();
    let loopback: IpAddr = "::1".parse().unwrap();
    let flags = table.inbound_flags(Some(&implicit_bind), &loopback);
    assert!(flags.has_flag(PermissionFlags::FORCE_RELAY));
    assert!(flags.has_flag(PermissionFlags::NO_BAN));
    assert!(flags.has_flag(PermissionFlags::MEMPOOL));
    assert!(!flags.is_implicit());

    let v6_peer: IpAddr = "2001:db8::42".parse().unwrap();
    assert_eq!(table.outbound_flags(&v6_peer), PermissionFlags::ADDR);
    assert_eq!(table.inbound_flags(None, &v6_peer), PermissionFlags::NONE);
}

#[test]
fn config_defaults_when_empty() {
    let config: PermissionConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, PermissionConfig::default());

    let table = config.load().unwrap();
    assert!(table.binds().is_empty());
    assert!(table.subnets().is_empty());
}

#[test]
fn config_error_names_entry() {
    init_tracing();
    let config = PermissionConfig {
        whitebind: vec!["relay@10.0.0.1".into()],
        ..Default::default()
    };

    match config.load() {
        Err(ConfigError::Whitebind { entry, source }) => {
            assert_eq!(entry, "relay@10.0.0.1");
            assert_eq!(source, ParseError::MissingPort("10.0.0.1".into()));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn permission_docs_listed() {
    let docs = netperm::permission_docs();
    assert!(docs.iter().any(|line| line.starts_with("forcerelay (")));
    assert!(docs.iter().all(|line| !line.starts_with("all ")));
}
