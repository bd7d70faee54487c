//! Replicated board document.
//!
//! [`BoardDocument`] wraps an automerge document holding one [`BoardContent`].
//! Every edit goes through [`BoardDocument::apply_change`], which never touches
//! the receiver: it forks the underlying document, writes the edited content
//! into the fork as one labelled change, and returns the fork. Snapshots that
//! share a base can later be combined with [`BoardDocument::merge`]; conflict
//! resolution is left entirely to automerge.

use crate::{
    domain::{board::BoardContent, card::Card},
    error::{ChathamError, Result},
};
use automerge::{transaction::CommitOptions, Automerge};
use autosurgeon::{hydrate, reconcile};
use log::debug;

/// Immutable snapshot of a board
#[derive(Debug, Clone)]
pub struct BoardDocument {
    doc: Automerge,
}

impl BoardDocument {
    const INITIAL_CHANGE: &'static str = "Create board";

    /// Creates a document whose first change writes `content`
    pub fn from_content(content: &BoardContent) -> Result<Self> {
        let mut doc = Automerge::new();
        commit(&mut doc, Self::INITIAL_CHANGE, content)?;
        Ok(Self { doc })
    }

    /// Loads a snapshot from bytes produced by [`BoardDocument::save`]
    pub fn load(bytes: &[u8]) -> Result<Self> {
        let doc = Automerge::load(bytes)?;
        Ok(Self { doc })
    }

    /// Serializes the full document, history included
    pub fn save(&self) -> Vec<u8> {
        self.doc.save()
    }

    /// Reads the logical board fields
    pub fn content(&self) -> Result<BoardContent> {
        Ok(hydrate(&self.doc)?)
    }

    pub fn id(&self) -> Result<String> {
        Ok(self.content()?.id)
    }

    pub fn card(&self, card_id: &str) -> Result<Card> {
        self.content()?
            .cards
            .remove(card_id)
            .ok_or_else(|| ChathamError::CardNotFound(card_id.to_string()))
    }

    /// Cards of one column, ordered by position then id
    pub fn cards_in_column(&self, column_id: &str) -> Result<Vec<Card>> {
        let mut cards: Vec<Card> = self
            .content()?
            .cards
            .into_values()
            .filter(|card| card.column_id == column_id)
            .collect();
        cards.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.id.cmp(&b.id)));
        Ok(cards)
    }

    /// Applies `mutator` to a copy of the content and returns a new snapshot
    /// holding exactly those writes as one change labelled `label`.
    ///
    /// If `mutator` fails nothing is written and the error is returned.
    pub fn apply_change<F>(&self, label: &str, mutator: F) -> Result<Self>
    where
        F: FnOnce(&mut BoardContent) -> Result<()>,
    {
        let mut content = self.content()?;
        mutator(&mut content)?;

        let mut next = self.doc.fork();
        commit(&mut next, label, &content)?;
        debug!("event=apply_change module=document status=ok label={:?}", label);
        Ok(Self { doc: next })
    }

    /// Returns a snapshot holding the changes of both `self` and `other`
    pub fn merge(&self, other: &BoardDocument) -> Result<Self> {
        let mut merged = self.doc.clone();
        let mut theirs = other.doc.clone();
        let applied = merged.merge(&mut theirs)?;
        debug!(
            "event=merge module=document status=ok applied_changes={}",
            applied.len()
        );
        Ok(Self { doc: merged })
    }

    /// Change labels in causal order, oldest first
    pub fn history(&self) -> Vec<String> {
        self.doc
            .get_changes(&[])
            .into_iter()
            .filter_map(|change| change.message().cloned())
            .collect()
    }
}

fn commit(doc: &mut Automerge, label: &str, content: &BoardContent) -> Result<()> {
    doc.transact_with(
        |_| CommitOptions::default().with_message(label.to_string()),
        |tx| reconcile(tx, content).map_err(ChathamError::from),
    )
    .map_err(|failure| failure.error)?;
    Ok(())
}
