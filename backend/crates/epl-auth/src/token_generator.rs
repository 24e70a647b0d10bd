//! Random bearer-token plaintexts.
//!
//! Each plaintext is [`TOKEN_ENTROPY_BYTES`] from the thread-local CSPRNG,
//! encoded as unpadded RFC 4648 base32 (`A-Z`, `2-7`), giving exactly
//! [`TOKEN_PLAINTEXT_LENGTH`] characters.

use epl_core::{TOKEN_ENTROPY_BYTES, Token, TokenHash, TokenScope};

use chrono::{SubsecRound, TimeDelta, Utc};
use rand::RngCore;

const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

pub fn generate_plaintext() -> String {
    let mut bytes = [0u8; TOKEN_ENTROPY_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    encode_base32(&bytes)
}

/// A new token for `user_id`, expiring `ttl` from now.
///
/// Expiry is truncated to whole seconds, the precision the store keeps.
pub fn new_token(user_id: i64, ttl: TimeDelta, scope: TokenScope) -> Token {
    let plaintext = generate_plaintext();
    Token {
        hash: TokenHash::of(&plaintext),
        plaintext,
        user_id,
        expiry: (Utc::now() + ttl).trunc_subsecs(0),
        scope,
    }
}

/// Is `plaintext` shaped like something this module could have produced?
pub fn is_well_formed(plaintext: &str) -> bool {
    plaintext.len() == epl_core::TOKEN_PLAINTEXT_LENGTH
        && plaintext.bytes().all(|b| BASE32_ALPHABET.contains(&b))
}

pub(crate) fn encode_base32(bytes: &[u8]) -> String {
    let mut out = String::with_capacity((bytes.len() * 8).div_ceil(5));
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;

    for &byte in bytes {
        buffer = (buffer << 8) | u32::from(byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(BASE32_ALPHABET[((buffer >> bits) & 0x1f) as usize] as char);
        }
        buffer &= (1 << bits) - 1;
    }

    if bits > 0 {
        out.push(BASE32_ALPHABET[((buffer << (5 - bits)) & 0x1f) as usize] as char);
    }

    out
}
