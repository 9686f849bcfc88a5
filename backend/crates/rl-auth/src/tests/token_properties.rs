use crate::tests::{ISSUER, SIGNING_KEY, TTL_HOURS, utc};
use crate::Token;

use chrono::Duration;
use proptest::prelude::*;
use serde_json::json;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_.";

fn encoded_token(sub: &str, name: &str, ttl_hours: i64, custom: &str) -> Token {
    Token::build(ISSUER, SIGNING_KEY, ttl_hours)
        .unwrap()
        .with_subject(sub, name, "user")
        .with_custom_claims([("note", json!(custom))])
        .encode_at(utc(2024, 4, 1, 10, 0))
        .unwrap()
}

proptest! {
    #[test]
    fn given_any_claims_when_round_tripped_then_decoded_token_equal(
        sub in "[a-f0-9-]{1,36}",
        name in "\\PC{0,32}",
        ttl_hours in 1i64..=8760,
        custom in "\\PC{0,16}",
    ) {
        let token = encoded_token(&sub, &name, ttl_hours, &custom);

        let decoded = Token::decode(token.encoded(), SIGNING_KEY).unwrap();

        prop_assert_eq!(decoded, token);
    }

    #[test]
    fn given_any_single_character_mutation_then_decode_fails_or_token_invalid(
        position in any::<prop::sample::Index>(),
        replacement in any::<prop::sample::Index>(),
    ) {
        let token = encoded_token("subject", "Reader", TTL_HOURS, "x");
        let mut bytes = token.encoded().as_bytes().to_vec();
        let at = position.index(bytes.len());
        let mut new_byte = ALPHABET[replacement.index(ALPHABET.len())];
        if new_byte == bytes[at] {
            new_byte = if bytes[at] == b'A' { b'B' } else { b'A' };
        }
        bytes[at] = new_byte;
        let mutated = String::from_utf8(bytes).unwrap();

        let accepted = Token::decode(&mutated, SIGNING_KEY)
            .map(|decoded| decoded.is_valid_at(utc(2024, 4, 1, 10, 0) + Duration::minutes(1)))
            .unwrap_or(false);

        prop_assert!(!accepted, "mutated token was accepted: {}", mutated);
    }

    #[test]
    fn given_any_other_key_when_decoded_then_never_valid(
        other_key in "[a-zA-Z0-9]{1,40}",
    ) {
        prop_assume!(other_key != SIGNING_KEY);
        let token = encoded_token("subject", "Reader", TTL_HOURS, "x");

        let accepted = Token::decode(token.encoded(), other_key.as_str())
            .map(|decoded| decoded.is_valid_at(utc(2024, 4, 1, 10, 1)))
            .unwrap_or(false);

        prop_assert!(!accepted);
    }
}
