//! Symmetric obfuscation of outbound request bodies.
//!
//! The service expects every XML-RPC body Blowfish-ECB encrypted with a key
//! baked into the client, then hex-encoded.  Responses come back in
//! cleartext, so no decryption path exists here.

use blowfish::{
    cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit},
    Blowfish,
};

// Shared with the official clients; requests encrypted under any other key
// are rejected outright.
const REQUEST_KEY: &[u8] = b"6#26FRL$ZWD";

const BLOCK_SIZE: usize = 8;

/// Encrypt a request body for transmission: zero-pad to the cipher block
/// size, encrypt block by block, hex-encode.  Deterministic for the fixed
/// key.
pub fn encrypt_body(plaintext: &str) -> Vec<u8> {
    let cipher: Blowfish =
        Blowfish::new_from_slice(REQUEST_KEY).expect("Blowfish accepts keys of 4 to 56 bytes");

    let mut data = plaintext.as_bytes().to_vec();
    let trailing = data.len() % BLOCK_SIZE;
    if trailing != 0 {
        data.resize(data.len() + BLOCK_SIZE - trailing, 0);
    }
    for block in data.chunks_mut(BLOCK_SIZE) {
        cipher.encrypt_block(GenericArray::from_mut_slice(block));
    }
    hex::encode(data).into_bytes()
}
