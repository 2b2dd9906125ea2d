use uri_parts::{ParseErrorKind, Query, QueryMode};

#[test]
fn preserves_duplicates_and_order() {
    let query = Query::parse("a=1&b=2&a=3", QueryMode::Rfc3986).unwrap();
    assert_eq!(query.len(), 3);
    assert_eq!(query.get("a"), Some("1"));
    assert_eq!(query.get_all("a").collect::<Vec<_>>(), ["1", "3"]);
    assert_eq!(query.to_string(), "a=1&b=2&a=3");
}

#[test]
fn value_less_vs_empty_value() {
    let query = Query::parse("flag&empty=", QueryMode::Rfc3986).unwrap();
    assert!(query.contains_key("flag"));
    assert_eq!(query.get("flag"), None);
    assert_eq!(query.get("empty"), Some(""));
    // The distinction survives a round trip.
    assert_eq!(query.to_string(), "flag&empty=");
}

#[test]
fn plus_handling_per_mode() {
    let query = Query::parse("q=a+b", QueryMode::Rfc3986).unwrap();
    assert_eq!(query.get("q"), Some("a+b"));
    // A literal plus is textually stable in this mode.
    assert_eq!(query.to_string(), "q=a+b");

    let query = Query::parse("q=a+b", QueryMode::Rfc1738).unwrap();
    assert_eq!(query.get("q"), Some("a b"));
    assert_eq!(query.to_string(), "q=a+b");

    // A literal plus under RFC 1738 must come back encoded.
    let query = Query::from_pairs([("q", Some("a+b"))], QueryMode::Rfc1738);
    assert_eq!(query.to_string(), "q=a%2Bb");

    // An encoded space decodes the same in both modes but renders per mode.
    let query = Query::parse("q=a%20b", QueryMode::Rfc3986).unwrap();
    assert_eq!(query.get("q"), Some("a b"));
    assert_eq!(query.to_string(), "q=a%20b");
}

#[test]
fn decodes_and_reencodes() {
    let query = Query::parse("k%3D=v%26w", QueryMode::Rfc3986).unwrap();
    assert_eq!(query.pairs(), [("k=".to_owned(), Some("v&w".to_owned()))]);
    // Structure characters come back encoded.
    assert_eq!(query.to_string(), "k%3D=v%26w");
}

#[test]
fn structural_edits() {
    let query = Query::parse("a=1&b=2&a=3", QueryMode::Rfc3986).unwrap();

    let edited = query.without_key("a");
    assert_eq!(edited.to_string(), "b=2");
    // Removing an absent key is a no-op.
    assert_eq!(edited.without_key("zzz"), edited);

    let edited = query.with_pair("c", Some("4"));
    assert_eq!(edited.to_string(), "a=1&b=2&a=3&c=4");

    assert_eq!(query.sorted().to_string(), "a=1&a=3&b=2");
}

#[test]
fn rejects_bad_input() {
    let e = Query::parse("a=%zz", QueryMode::Rfc3986).unwrap_err();
    assert_eq!(e.kind(), ParseErrorKind::InvalidOctet);
    assert_eq!(e.index(), 2);

    let e = Query::parse("a=b c", QueryMode::Rfc3986).unwrap_err();
    assert_eq!(e.kind(), ParseErrorKind::UnexpectedChar);
    assert_eq!(e.index(), 3);
}

#[test]
fn empty_query() {
    let query = Query::parse("", QueryMode::Rfc3986).unwrap();
    assert!(query.is_empty());
    assert_eq!(query.to_string(), "");
}
