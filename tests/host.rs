use uri_parts::{Host, HostError};

#[track_caller]
fn name(raw: &str) -> Host {
    let host = Host::parse(raw).unwrap();
    assert!(!host.is_ip());
    host
}

#[test]
fn idn_round_trips() {
    // Unicode and ACE forms of the same name parse to equal hosts.
    let cases = [
        ("مثال.إختبار", "xn--mgbh0fb.xn--kgbechtv"),
        ("스타벅스코리아.com", "xn--oy2b35ckwhba574atvuzkc.com"),
        ("президент.рф", "xn--d1abbgf6aiiy.xn--p1ai"),
    ];
    for (unicode, ascii) in cases {
        let host = name(unicode);
        assert!(host.is_idn());
        assert_eq!(host.to_ascii(), ascii);
        assert_eq!(host.to_string(), unicode);
        assert_eq!(host, name(ascii));
    }
}

#[test]
fn folds_ascii_case() {
    let host = name("WWW.Example.COM");
    assert_eq!(host.to_ascii(), "www.example.com");
    assert_eq!(host, name("www.example.com"));
    assert_eq!(name("XN--P1AI"), name("рф"));
}

#[test]
fn fqdn_trailing_dot() {
    let host = name("example.com.");
    assert!(host.is_absolute());
    assert_eq!(host.to_ascii(), "example.com.");
    assert_ne!(host, name("example.com"));
}

#[test]
fn label_bounds() {
    // 128 one-letter labels: one too many.
    let raw = vec!["a"; 128].join(".");
    assert!(matches!(
        Host::parse(&raw),
        Err(HostError::TooManyLabels { count: 128 })
    ));
    assert!(Host::parse(&vec!["a"; 127].join(".")).is_ok());

    // A single label of 64 octets: one too long.
    let raw = "a".repeat(64);
    assert!(matches!(
        Host::parse(&raw),
        Err(HostError::InvalidLabelLength { .. })
    ));
    assert!(Host::parse(&"a".repeat(63)).is_ok());

    // Five 60-octet labels: 304 encoded octets, over the 255 total.
    let raw = vec!["a".repeat(60); 5].join(".");
    assert!(matches!(
        Host::parse(&raw),
        Err(HostError::HostTooLong { .. })
    ));
}

#[test]
fn label_content() {
    for raw in ["-leading.com", "trailing-.com", "under_score.com", "a..b"] {
        assert!(matches!(
            Host::parse(raw),
            Err(HostError::InvalidLabelContent { .. } | HostError::InvalidLabelLength { .. })
        ));
    }
}

#[test]
fn ip_literals() {
    assert!(matches!(Host::parse("127.0.0.1"), Ok(Host::Ipv4(_))));
    // A dotted quad with a leading zero is not an IPv4 address; it falls
    // back to a registered name.
    assert!(matches!(Host::parse("127.0.00.1"), Ok(Host::Name(_))));

    let host = Host::parse("[2001:db8::1]").unwrap();
    assert!(host.is_ip());
    assert_eq!(host.to_ascii(), "[2001:db8::1]");

    assert!(matches!(
        Host::parse("[::1"),
        Err(HostError::InvalidIpLiteral { .. })
    ));
    assert!(matches!(Host::parse("[v1.x]"), Ok(Host::IpvFuture(_))));
}

#[test]
fn scoped_ipv6() {
    // RFC 6874: the zone is introduced by the encoded "%25".
    let host = Host::parse("[fe80::1234%25eth0]").unwrap();
    match &host {
        Host::Ipv6 { zone, .. } => assert_eq!(zone.as_deref(), Some("eth0")),
        _ => panic!("expected an IPv6 host"),
    }
    assert_eq!(host.to_string(), "[fe80::1234%eth0]");
    assert_eq!(host.to_ascii(), "[fe80::1234%25eth0]");

    // A bare "%" is accepted on input.
    assert_eq!(host, Host::parse("[fe80::1234%eth0]").unwrap());

    // Zones are only for link-local addresses.
    assert!(matches!(
        Host::parse("[::1%eth0]"),
        Err(HostError::InvalidScopeId { .. })
    ));

    // An empty zone is rejected.
    assert!(matches!(
        Host::parse("[fe80::1%25]"),
        Err(HostError::InvalidScopeId { .. })
    ));
}
