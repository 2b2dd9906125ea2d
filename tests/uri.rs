use uri_parts::{Authority, Host, OperationError, ParseErrorKind, Path, Uri, UriError};

#[test]
fn parse_absolute() {
    let u = Uri::parse("file:///etc/hosts").unwrap();
    assert_eq!(u.scheme().unwrap().as_str(), "file");
    let a = u.authority().unwrap();
    assert_eq!(a.userinfo(), None);
    assert_eq!(a.host(), None);
    assert_eq!(a.port(), None);
    assert!(u.path().segments().iter().eq(["etc", "hosts"]));
    assert_eq!(u.query(), None);
    assert_eq!(u.fragment(), None);
    assert_eq!(u.to_string(), "file:///etc/hosts");

    let u = Uri::parse("ftp://ftp.is.co.za/rfc/rfc1808.txt").unwrap();
    assert_eq!(u.scheme().unwrap().as_str(), "ftp");
    assert_eq!(u.host().unwrap().to_ascii(), "ftp.is.co.za");
    assert!(u.path().segments().iter().eq(["rfc", "rfc1808.txt"]));

    let u = Uri::parse("ldap://[2001:db8::7]/c=GB?objectClass?one").unwrap();
    assert!(matches!(u.host(), Some(Host::Ipv6 { .. })));
    assert_eq!(u.query().unwrap().to_string(), "objectClass?one");
    assert_eq!(u.to_string(), "ldap://[2001:db8::7]/c=GB?objectClass?one");

    let u = Uri::parse("http://user@example.com:8080/?k=v#frag").unwrap();
    assert_eq!(u.userinfo(), Some("user"));
    assert_eq!(u.port(), Some(8080));
    assert_eq!(u.fragment(), Some("frag"));
    assert_eq!(u.to_string(), "http://user@example.com:8080/?k=v#frag");
}

#[test]
fn parse_relative() {
    let u = Uri::parse("//example.com").unwrap();
    assert!(u.is_relative());
    assert!(u.authority().is_some());
    assert!(u.path().is_empty());

    let u = Uri::parse("a/b/c").unwrap();
    assert!(u.is_relative());
    assert!(u.authority().is_none());
    assert!(!u.path().is_absolute());

    let u = Uri::parse("?q").unwrap();
    assert!(u.path().is_empty());
    assert!(u.query().is_some());

    let u = Uri::parse("").unwrap();
    assert!(u.path().is_empty());
    assert_eq!(u.to_string(), "");
}

#[test]
fn empty_port_is_absent() {
    let u = Uri::parse("http://example.com:/").unwrap();
    assert_eq!(u.port(), None);
    // And it does not come back on render.
    assert_eq!(u.to_string(), "http://example.com/");

    let e = Uri::parse("http://example.com:65536/").unwrap_err();
    assert!(matches!(e, UriError::Parse(e) if e.kind() == ParseErrorKind::InvalidPort));
}

#[test]
fn rejects_invalid_scheme() {
    for s in ["1http://a", "+x:y", ":missing"] {
        let e = Uri::parse(s).unwrap_err();
        assert!(matches!(e, UriError::Parse(e) if e.kind() == ParseErrorKind::InvalidScheme));
    }
}

#[test]
fn host_errors_carry_through() {
    assert!(matches!(
        Uri::parse("http://-bad-.example/"),
        Err(UriError::Host(_))
    ));
    assert!(matches!(
        Uri::parse("http://[:::]/"),
        Err(UriError::Host(_))
    ));
    // An unterminated bracket never reaches host validation.
    assert!(matches!(
        Uri::parse("http://[::1/"),
        Err(UriError::Parse(_))
    ));
}

#[test]
fn idn_host_renders_ascii() {
    // Only the host takes Unicode; the path stays within the URI grammar.
    let u = Uri::parse("https://президент.рф/%D0%BF%D1%83%D1%82%D1%8C").unwrap();
    assert!(u.host().unwrap().is_idn());
    assert!(u.path().segments().iter().eq(["путь"]));
    assert_eq!(
        u.to_string(),
        "https://xn--d1abbgf6aiiy.xn--p1ai/%D0%BF%D1%83%D1%82%D1%8C"
    );
}

#[test]
fn with_methods_are_value_identity() {
    let u = Uri::parse("http://example.com/a?b#c").unwrap();

    // Same value: the original comes back unchanged.
    assert_eq!(u.with_fragment(Some("c")), u);
    assert_eq!(u.with_port(None).unwrap(), u);
    assert_eq!(u.with_path(Path::parse("/a").unwrap()).unwrap(), u);

    let v = u.with_fragment(None);
    assert_eq!(v.to_string(), "http://example.com/a?b");
    // The original is untouched.
    assert_eq!(u.fragment(), Some("c"));

    let v = u.with_port(Some(81)).unwrap();
    assert_eq!(v.to_string(), "http://example.com:81/a?b#c");

    let host = Host::parse("example.org").unwrap();
    let v = u.with_host(Some(host)).unwrap();
    assert_eq!(v.to_string(), "http://example.org/a?b#c");

    let v = u.with_scheme(Some("https")).unwrap();
    assert_eq!(v.to_string(), "https://example.com/a?b#c");
    assert!(u.with_scheme(Some("no spaces")).is_err());

    let v = u
        .with_authority(Some(Authority::new(None, None, Some(80))))
        .unwrap();
    assert_eq!(v.port(), Some(80));
}

#[test]
fn rejects_rootless_path_with_authority() {
    let u = Uri::parse("http://a").unwrap();
    assert_eq!(
        u.with_path(Path::parse("b").unwrap()),
        Err(OperationError::RootlessPathWithAuthority)
    );
    // An absolute or empty path is fine.
    assert!(u.with_path(Path::parse("/b").unwrap()).is_ok());
    assert!(u.with_path(Path::parse("").unwrap()).is_ok());

    // Attaching an authority to a rootless path fails the same way.
    let rel = Uri::parse("b").unwrap();
    let host = Host::parse("a").unwrap();
    assert_eq!(
        rel.with_host(Some(host)),
        Err(OperationError::RootlessPathWithAuthority)
    );
    assert_eq!(
        rel.with_port(Some(80)),
        Err(OperationError::RootlessPathWithAuthority)
    );
    assert_eq!(
        rel.with_authority(Some(Authority::new(None, None, Some(80)))),
        Err(OperationError::RootlessPathWithAuthority)
    );
    // Dropping the authority never fails.
    assert!(u.with_authority(None).is_ok());
}

#[test]
fn display_guards_ambiguous_paths() {
    // A path starting with "//" must not read back as an authority.
    let u = Uri::parse("foo:/.//@@").unwrap();
    assert!(u.authority().is_none());
    assert_eq!(u.to_string(), "foo:/.//@@");
    assert_eq!(Uri::parse(&u.to_string()).unwrap(), u);

    // A relative first segment with ":" must not read back as a scheme.
    let u = Uri::parse("./a:b").unwrap();
    assert!(u.scheme().is_none());
    assert_eq!(u.to_string(), "./a:b");
    assert_eq!(Uri::parse(&u.to_string()).unwrap(), u);
}
