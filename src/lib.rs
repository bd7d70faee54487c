//! # Chatham Core
//!
//! Domain layer of the Chatham collaborative kanban board.
//!
//! Boards live in a replicated document ([`BoardDocument`]). The functions in
//! [`domain`] take a snapshot and return a new one, each edit recorded as a
//! single labelled change so that snapshots edited on different replicas can
//! be merged. The crate also wraps recovery phrase generation and validation,
//! and models the first-run setup flow, without depending on any UI.

pub mod crypto;
pub mod document;
pub mod domain;
pub mod error;
pub mod setup;
pub mod storage;

// Re-export commonly used types
pub use crypto::{generate_recovery_phrase, validate_phrase, RecoveryPhrase};
pub use document::BoardDocument;
pub use domain::{
    add_card, create_board, delete_card, move_card, update_card, BoardContent, Card, CardUpdate,
    Column, CreatorProfile, NewCard,
};
pub use error::{ChathamError, Result};
pub use setup::{EvaluationPolicy, SetupFlow, SetupOutcome, SetupStep};
pub use storage::Storage;
