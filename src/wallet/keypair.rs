//! SR25519 keypairs for wallet hotkeys.
//!
//! Key files carry their secret as hex; this module turns canonical hex into a
//! usable [`Keypair`] and exposes the SS58 address the dashboard shows.

// ZeroizeOnDrop expands to field writes that trip the unused_assignments lint
#![allow(unused_assignments)]

use sp_core::{
    crypto::{Ss58AddressFormat, Ss58Codec},
    sr25519, Pair,
};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Bittensor SS58 address format (42 = "bt")
pub const BITTENSOR_SS58_FORMAT: u16 = 42;

/// Length of an sr25519 mini secret key (seed).
pub const MINI_SECRET_LENGTH: usize = 32;

/// Length of an expanded sr25519 secret key (key + nonce).
pub const SECRET_KEY_LENGTH: usize = 64;

/// Errors that can occur while constructing a keypair.
#[derive(Debug, Error)]
pub enum KeypairError {
    #[error("Invalid secret length: expected 32 or 64 bytes, got {0}")]
    InvalidSecretLength(usize),

    #[error("Invalid hex private key: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// An SR25519 keypair backing a wallet hotkey.
///
/// `sr25519::Pair` does not implement `Zeroize`, so only the cached public key
/// is cleared on drop.
#[derive(ZeroizeOnDrop)]
pub struct Keypair {
    #[zeroize(skip)]
    pair: sr25519::Pair,
    public_key: [u8; 32],
    #[zeroize(skip)]
    ss58_address: String,
}

impl Clone for Keypair {
    fn clone(&self) -> Self {
        Self {
            pair: self.pair.clone(),
            public_key: self.public_key,
            ss58_address: self.ss58_address.clone(),
        }
    }
}

impl std::fmt::Debug for Keypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print secret material
        f.debug_struct("Keypair")
            .field("ss58_address", &self.ss58_address)
            .finish()
    }
}

impl PartialEq for Keypair {
    fn eq(&self, other: &Self) -> bool {
        self.public_key == other.public_key
    }
}

impl Eq for Keypair {}

impl Keypair {
    fn from_pair(pair: sr25519::Pair) -> Self {
        let public = pair.public();
        let ss58_address =
            public.to_ss58check_with_version(Ss58AddressFormat::custom(BITTENSOR_SS58_FORMAT));

        Self {
            public_key: public.0,
            pair,
            ss58_address,
        }
    }

    /// Construct a keypair from a canonical (lowercase, unprefixed) hex private key.
    ///
    /// Accepts either a 32-byte mini secret or a 64-byte expanded secret key,
    /// the two shapes found in wallet key files.
    ///
    /// # Example
    /// ```
    /// use bittensor_dash::wallet::Keypair;
    /// let hex_key = "2a".repeat(32);
    /// let keypair = Keypair::from_private_key_hex(&hex_key).unwrap();
    /// assert!(keypair.ss58_address().starts_with('5'));
    /// ```
    pub fn from_private_key_hex(private_key: &str) -> Result<Self, KeypairError> {
        let mut bytes = hex::decode(private_key)?;
        let keypair = Self::from_bytes(&bytes);
        bytes.zeroize();
        keypair
    }

    /// Create a keypair from a 32-byte seed.
    pub fn from_seed(seed: &[u8]) -> Result<Self, KeypairError> {
        if seed.len() != MINI_SECRET_LENGTH {
            return Err(KeypairError::InvalidSecretLength(seed.len()));
        }

        let mut seed_arr = [0u8; MINI_SECRET_LENGTH];
        seed_arr.copy_from_slice(seed);
        let pair = sr25519::Pair::from_seed(&seed_arr);
        seed_arr.zeroize();

        Ok(Self::from_pair(pair))
    }

    /// Restore a keypair from raw secret bytes (32-byte seed or 64-byte secret key).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeypairError> {
        match bytes.len() {
            MINI_SECRET_LENGTH | SECRET_KEY_LENGTH => {}
            other => return Err(KeypairError::InvalidSecretLength(other)),
        }
        let pair = sr25519::Pair::from_seed_slice(bytes)
            .map_err(|_| KeypairError::InvalidSecretLength(bytes.len()))?;
        Ok(Self::from_pair(pair))
    }

    pub fn public_key(&self) -> &[u8; 32] {
        &self.public_key
    }

    /// SS58 address with the Bittensor prefix (42).
    pub fn ss58_address(&self) -> &str {
        &self.ss58_address
    }

    /// The 64-byte expanded secret key.
    ///
    /// WARNING: This exposes the private key. Handle with care.
    pub fn to_full_bytes(&self) -> Vec<u8> {
        self.pair.to_raw_vec()
    }
}
