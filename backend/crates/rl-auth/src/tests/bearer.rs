use crate::{AuthError, parse_bearer};

use googletest::prelude::*;

#[test]
fn given_bearer_header_when_parsed_then_returns_token() {
    let token = parse_bearer("Bearer aaa.bbb.ccc").unwrap();

    assert_that!(token, eq("aaa.bbb.ccc"));
}

#[test]
fn given_extra_whitespace_when_parsed_then_token_trimmed() {
    let token = parse_bearer("  Bearer \t aaa.bbb.ccc  ").unwrap();

    assert_that!(token, eq("aaa.bbb.ccc"));
}

#[test]
fn given_empty_header_when_parsed_then_missing_header() {
    assert!(matches!(
        parse_bearer("   "),
        Err(AuthError::MissingHeader { .. })
    ));
}

#[test]
fn given_wrong_scheme_when_parsed_then_invalid_scheme() {
    assert!(matches!(
        parse_bearer("Basic dXNlcjpwYXNz"),
        Err(AuthError::InvalidScheme { .. })
    ));
    assert!(matches!(
        parse_bearer("bearer aaa.bbb.ccc"),
        Err(AuthError::InvalidScheme { .. })
    ));
}

#[test]
fn given_scheme_without_token_when_parsed_then_invalid_scheme() {
    assert!(matches!(
        parse_bearer("Bearer"),
        Err(AuthError::InvalidScheme { .. })
    ));
}

#[test]
fn given_trailing_field_after_token_when_parsed_then_invalid_scheme() {
    assert!(matches!(
        parse_bearer("Bearer aaa.bbb.ccc extra"),
        Err(AuthError::InvalidScheme { .. })
    ));
}
