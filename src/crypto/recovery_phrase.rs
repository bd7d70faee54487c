//! 24-word BIP-39 recovery phrases.
//!
//! Word lists, checksums and seed derivation come from the `bip39` crate.

use crate::error::{ChathamError, Result};
use bip39::{Language, Mnemonic};
use rand::RngCore;
use std::{fmt, str::FromStr};

/// Words in every phrase this crate generates or accepts
pub const WORD_COUNT: usize = 24;

// 256 bits of entropy encode to 24 words
const ENTROPY_BYTES: usize = 32;

/// A checksum-valid 24-word English mnemonic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryPhrase(Mnemonic);

impl RecoveryPhrase {
    /// Generates a phrase from fresh OS-seeded entropy
    pub fn generate() -> Result<Self> {
        let mut entropy = [0u8; ENTROPY_BYTES];
        rand::thread_rng().fill_bytes(&mut entropy);
        let mnemonic = Mnemonic::from_entropy_in(Language::English, &entropy)?;
        Ok(Self(mnemonic))
    }

    /// Parses a phrase, tolerating surrounding whitespace, repeated spaces
    /// and upper-case letters. Any rejection is `InvalidRecoveryPhrase`.
    pub fn parse(phrase: &str) -> Result<Self> {
        let normalized = normalize(phrase);
        let mnemonic = Mnemonic::parse_in_normalized(Language::English, &normalized)
            .map_err(|_| ChathamError::InvalidRecoveryPhrase)?;
        if mnemonic.word_count() != WORD_COUNT {
            return Err(ChathamError::InvalidRecoveryPhrase);
        }
        Ok(Self(mnemonic))
    }

    pub fn words(&self) -> Vec<&'static str> {
        self.0.words().collect()
    }

    /// Derives the 64-byte BIP-39 seed
    pub fn to_seed(&self, passphrase: &str) -> [u8; 64] {
        self.0.to_seed(passphrase)
    }
}

impl FromStr for RecoveryPhrase {
    type Err = ChathamError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RecoveryPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn normalize(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Generates a new 24-word phrase as lowercase space-separated words
pub fn generate_recovery_phrase() -> Result<String> {
    Ok(RecoveryPhrase::generate()?.to_string())
}

/// True iff `phrase` is a checksum-valid 24-word English mnemonic
pub fn validate_phrase(phrase: &str) -> bool {
    RecoveryPhrase::parse(phrase).is_ok()
}
