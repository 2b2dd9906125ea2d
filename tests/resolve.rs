use uri_parts::{resolve, ResolveError, Uri};

trait Test {
    fn pass(&self, r: &str, res: &str);
    fn fail(&self, r: &str, err: ResolveError);
}

impl Test for Uri {
    #[track_caller]
    fn pass(&self, r: &str, expected: &str) {
        let r = Uri::parse(r).unwrap();
        assert_eq!(resolve(self, &r).unwrap().to_string(), expected);
    }

    #[track_caller]
    fn fail(&self, r: &str, expected: ResolveError) {
        let r = Uri::parse(r).unwrap();
        assert_eq!(resolve(self, &r).unwrap_err(), expected);
    }
}

#[test]
fn resolve_rfc_examples() {
    // Examples from Section 5.4 of RFC 3986.
    let base = Uri::parse("http://a/b/c/d;p?q").unwrap();

    base.pass("g:h", "g:h");
    base.pass("g", "http://a/b/c/g");
    base.pass("./g", "http://a/b/c/g");
    base.pass("g/", "http://a/b/c/g/");
    base.pass("/g", "http://a/g");
    base.pass("//g", "http://g");
    base.pass("?y", "http://a/b/c/d;p?y");
    base.pass("g?y", "http://a/b/c/g?y");
    base.pass("#s", "http://a/b/c/d;p?q#s");
    base.pass("g#s", "http://a/b/c/g#s");
    base.pass("g?y#s", "http://a/b/c/g?y#s");
    base.pass(";x", "http://a/b/c/;x");
    base.pass("g;x", "http://a/b/c/g;x");
    base.pass("g;x?y#s", "http://a/b/c/g;x?y#s");
    base.pass("", "http://a/b/c/d;p?q");
    base.pass(".", "http://a/b/c/");
    base.pass("./", "http://a/b/c/");
    base.pass("..", "http://a/b/");
    base.pass("../", "http://a/b/");
    base.pass("../g", "http://a/b/g");
    base.pass("../..", "http://a/");
    base.pass("../../", "http://a/");
    base.pass("../../g", "http://a/g");

    // Abnormal examples: excess ".." is absorbed, never an error.
    base.pass("../../../g", "http://a/g");
    base.pass("../../../../g", "http://a/g");
    base.pass("/./g", "http://a/g");
    base.pass("/../g", "http://a/g");
    base.pass("g.", "http://a/b/c/g.");
    base.pass(".g", "http://a/b/c/.g");
    base.pass("g..", "http://a/b/c/g..");
    base.pass("..g", "http://a/b/c/..g");

    base.pass("./../g", "http://a/b/g");
    base.pass("./g/.", "http://a/b/c/g/");
    base.pass("g/./h", "http://a/b/c/g/h");
    base.pass("g/../h", "http://a/b/c/h");
    base.pass("g;x=1/./y", "http://a/b/c/g;x=1/y");
    base.pass("g;x=1/../y", "http://a/b/c/y");

    base.pass("g?y/./x", "http://a/b/c/g?y/./x");
    base.pass("g?y/../x", "http://a/b/c/g?y/../x");
    base.pass("g#s/./x", "http://a/b/c/g#s/./x");
    base.pass("g#s/../x", "http://a/b/c/g#s/../x");

    base.pass("http:g", "http:g");
    base.pass("mailto:x@y", "mailto:x@y");
}

#[test]
fn resolve_against_opaque_base() {
    // Non-hierarchical base URI.
    let base = Uri::parse("foo:bar").unwrap();

    base.pass("", "foo:bar");
    base.pass("#baz", "foo:bar#baz");
    base.pass("http://example.com/", "http://example.com/");
    base.pass("foo:baz", "foo:baz");
    base.pass("bar:baz", "bar:baz");
}

#[test]
fn resolve_keeps_round_trippable_output() {
    let base = Uri::parse("foo:/").unwrap();
    // A plain join would produce "foo://@@", which reads as an authority.
    base.pass(".//@@", "foo:/.//@@");

    let base = Uri::parse("foo:/bar/baz/.%2E/").unwrap();
    base.pass("..", "foo:/");

    // A trailing ".." in the base path is not stripped before merging, so
    // resolving after normalizing gives the same answer.
    let base = Uri::parse("foo:/bar/..").unwrap();
    base.pass(".", "foo:/");
}

#[test]
fn resolve_errors() {
    let base = Uri::parse("http://example.com/#title1").unwrap();
    base.fail("foo", ResolveError::BaseWithFragment);

    let base = Uri::parse("foo:bar").unwrap();
    base.fail("baz", ResolveError::InvalidReferenceAgainstOpaqueBase);
    base.fail("?baz", ResolveError::InvalidReferenceAgainstOpaqueBase);

    let base = Uri::parse("//example.com/a").unwrap();
    base.fail("b", ResolveError::NonAbsoluteBase);
}
