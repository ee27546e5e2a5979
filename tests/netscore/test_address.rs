//! Tests for repository addresses and package URL parsing.

use netscore::{RepositoryAddress, ScoreError, normalize_repository_url, npm_package_name};

#[test]
fn test_parse_github_forms() {
    let forms = [
        "https://github.com/lodash/lodash",
        "https://github.com/lodash/lodash/",
        "http://www.github.com/lodash/lodash/tree/main/src",
        "https://github.com/lodash/lodash.git",
        "git@github.com:lodash/lodash.git",
        "ssh://git@github.com/lodash/lodash",
        "github:lodash/lodash",
        "  https://github.com/lodash/lodash  ",
    ];
    for form in forms {
        let address = RepositoryAddress::parse(form).unwrap();
        assert_eq!(address.owner(), "lodash", "{form}");
        assert_eq!(address.repo(), "lodash", "{form}");
        assert_eq!(address.host(), "github.com");
    }
}

#[test]
fn test_parse_rejects_incomplete_addresses() {
    for bad in [
        "https://github.com/",
        "https://github.com/lodash",
        "https://gitlab.com/lodash/lodash",
        "github:",
        "",
    ] {
        let err = RepositoryAddress::parse(bad).unwrap_err();
        assert!(matches!(err, ScoreError::InvalidAddress(_)), "{bad}");
    }
}

#[test]
fn test_address_display_and_route() {
    let address: RepositoryAddress = "git@github.com:expressjs/express.git".parse().unwrap();
    assert_eq!(address.to_string(), "https://github.com/expressjs/express");
    assert_eq!(address.api_route(), "/repos/expressjs/express");

    assert!(RepositoryAddress::new("", "repo").is_err());
    assert!(RepositoryAddress::new("owner", " ").is_err());
}

#[test]
fn test_parse_drops_query_and_fragment() {
    for form in [
        "https://github.com/acme/widget?tab=readme-ov-file",
        "https://github.com/acme/widget#readme",
        "https://github.com/acme/widget/?tab=readme-ov-file#install",
        "github:acme/widget#main",
    ] {
        let address = RepositoryAddress::parse(form).unwrap();
        assert_eq!(address.repo(), "widget", "{form}");
        assert_eq!(address.api_route(), "/repos/acme/widget", "{form}");
    }

    let err = RepositoryAddress::parse("https://github.com/acme?repo=widget").unwrap_err();
    assert!(matches!(err, ScoreError::InvalidAddress(_)));
}

#[test]
fn test_normalize_repository_url() {
    let cases = [
        (
            "git+https://github.com/lodash/lodash.git",
            "https://github.com/lodash/lodash",
        ),
        (
            "git://github.com/browserify/browserify.git",
            "https://github.com/browserify/browserify",
        ),
        (
            "git+ssh://git@github.com/foo/bar.git",
            "ssh://git@github.com/foo/bar",
        ),
        ("https://github.com/foo/bar/", "https://github.com/foo/bar"),
        ("https://github.com/foo/bar", "https://github.com/foo/bar"),
    ];
    for (raw, expected) in cases {
        assert_eq!(normalize_repository_url(raw), expected, "{raw}");
    }

    let address = RepositoryAddress::parse(&normalize_repository_url(
        "git+ssh://git@github.com/foo/bar.git",
    ))
    .unwrap();
    assert_eq!(address.to_string(), "https://github.com/foo/bar");
}

#[test]
fn test_npm_package_name() {
    let cases = [
        ("https://www.npmjs.com/package/express", "express"),
        ("https://www.npmjs.com/package/express/v/4.18.2", "express"),
        ("https://www.npmjs.com/package/@babel/core", "@babel/core"),
        ("https://npmjs.com/package/lodash?activeTab=versions", "lodash"),
        ("https://www.npmjs.com/package/left-pad#readme", "left-pad"),
    ];
    for (url, expected) in cases {
        assert_eq!(npm_package_name(url).unwrap(), expected, "{url}");
    }

    for bad in [
        "https://www.npmjs.com/",
        "https://www.npmjs.com/package/",
        "https://www.npmjs.com/package/@scope",
    ] {
        let err = npm_package_name(bad).unwrap_err();
        assert!(matches!(err, ScoreError::InvalidIdentifier(_)), "{bad}");
    }
}
