//! Opaque refresh-token generation.

use rand::{Rng, distributions::Alphanumeric};

/// 64 alphanumeric characters is ~380 bits of entropy, comfortably above the
/// unguessability floor for a bearer credential.
pub const REFRESH_TOKEN_LENGTH: usize = 64;

/// Generates a refresh token from the thread-local CSPRNG.
///
/// The token carries no embedded claims; its validity is determined entirely
/// by a session lookup on the server.
pub fn generate_refresh_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(REFRESH_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}
