//! Creator capability tokens.
//!
//! A room's creator token is an opaque unguessable string minted at room
//! creation, returned once to the creating client, and checked on every
//! creator-only operation. Tokens are 20 characters of Crockford's Base32.

use rand::Rng;

const CROCKFORD: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ"; // no I, L, O, U
const TOKEN_LEN: usize = 20;

/// Mint a creator token from OS-seeded entropy.
pub fn generate_creator_token() -> String {
    let mut rng = rand::rng();
    let mut s = String::with_capacity(TOKEN_LEN);
    for _ in 0..TOKEN_LEN {
        let i = rng.random_range(0..CROCKFORD.len());
        s.push(CROCKFORD[i] as char);
    }
    s
}
