pub mod recovery_phrase;

pub use recovery_phrase::{generate_recovery_phrase, validate_phrase, RecoveryPhrase};
