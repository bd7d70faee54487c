use crate::{
    document::BoardDocument,
    domain::{
        card::{now_millis, Card, CardUpdate, NewCard},
        position::generate_position,
    },
    error::{ChathamError, Result},
};
use autosurgeon::{Hydrate, Reconcile};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Titles of the columns every board starts with, in display order
pub const DEFAULT_COLUMNS: [&str; 3] = ["To Do", "In Progress", "Done"];

/// A board column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hydrate, Reconcile)]
pub struct Column {
    pub id: String,
    pub title: String,
}

impl Column {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
        }
    }
}

/// Display metadata and key material of a board member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hydrate, Reconcile)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub display_name: String,
    pub public_key: String,
    pub wrapped_board_key: String,
    pub color: String,
    pub joined_at: i64,
}

/// How the creator of a board presents to other members
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorProfile {
    pub display_name: String,
    pub public_key: String,
    pub wrapped_board_key: String,
    pub color: String,
}

impl Default for CreatorProfile {
    fn default() -> Self {
        Self {
            display_name: "Anonymous".to_string(),
            public_key: String::new(),
            wrapped_board_key: String::new(),
            color: "#3b82f6".to_string(),
        }
    }
}

impl CreatorProfile {
    fn to_member(&self, joined_at: i64) -> Member {
        Member {
            display_name: self.display_name.clone(),
            public_key: self.public_key.clone(),
            wrapped_board_key: self.wrapped_board_key.clone(),
            color: self.color.clone(),
            joined_at,
        }
    }
}

/// Logical fields of a board document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hydrate, Reconcile)]
#[serde(rename_all = "camelCase")]
pub struct BoardContent {
    pub id: String,
    pub name: String,
    pub columns: Vec<Column>,
    pub cards: HashMap<String, Card>,
    pub members: HashMap<String, Member>,
    pub created_by: String,
    pub created_at: i64,
}

impl BoardContent {
    pub fn new(name: String, creator: String, profile: &CreatorProfile) -> Self {
        let now = now_millis();
        let mut members = HashMap::new();
        members.insert(creator.clone(), profile.to_member(now));

        Self {
            id: Uuid::new_v4().to_string(),
            name,
            columns: DEFAULT_COLUMNS.iter().map(|title| Column::new(*title)).collect(),
            cards: HashMap::new(),
            members,
            created_by: creator,
            created_at: now,
        }
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|col| col.id == column_id)
    }

    fn require_column(&self, column_id: &str) -> Result<()> {
        self.column(column_id)
            .map(|_| ())
            .ok_or_else(|| ChathamError::ColumnNotFound(column_id.to_string()))
    }

    fn card_mut(&mut self, card_id: &str) -> Result<&mut Card> {
        self.cards
            .get_mut(card_id)
            .ok_or_else(|| ChathamError::CardNotFound(card_id.to_string()))
    }
}

/// Creates a board with the default columns, recording `creator` with the
/// default profile
pub fn create_board(name: &str, creator: &str) -> Result<BoardDocument> {
    create_board_with_profile(name, creator, &CreatorProfile::default())
}

pub fn create_board_with_profile(
    name: &str,
    creator: &str,
    profile: &CreatorProfile,
) -> Result<BoardDocument> {
    let content = BoardContent::new(name.to_string(), creator.to_string(), profile);
    let board = BoardDocument::from_content(&content)?;
    info!(
        "event=create_board module=board status=ok board_id={} creator={}",
        content.id, creator
    );
    Ok(board)
}

/// Adds a card at a generated position in `column_id`
pub fn add_card(board: &BoardDocument, column_id: &str, card: NewCard) -> Result<BoardDocument> {
    board.apply_change("Add card", |content| {
        content.require_column(column_id)?;
        let card = Card::new(
            column_id.to_string(),
            generate_position(),
            card.title,
            card.description,
        );
        debug!(
            "event=add_card module=board card_id={} column_id={}",
            card.id, column_id
        );
        content.cards.insert(card.id.clone(), card);
        Ok(())
    })
}

/// Moves a card to `target_column_id` at `position`
pub fn move_card(
    board: &BoardDocument,
    card_id: &str,
    target_column_id: &str,
    position: &str,
) -> Result<BoardDocument> {
    board.apply_change("Move card", |content| {
        content.require_column(target_column_id)?;
        let card = content.card_mut(card_id)?;
        card.column_id = target_column_id.to_string();
        card.position = position.to_string();
        card.touch();
        debug!(
            "event=move_card module=board card_id={} column_id={} position={}",
            card_id, target_column_id, position
        );
        Ok(())
    })
}

/// Writes the fields present in `updates` to a card
pub fn update_card(
    board: &BoardDocument,
    card_id: &str,
    updates: CardUpdate,
) -> Result<BoardDocument> {
    board.apply_change("Update card", |content| {
        content.card_mut(card_id)?.apply(updates);
        debug!("event=update_card module=board card_id={}", card_id);
        Ok(())
    })
}

/// Removes a card from the board
pub fn delete_card(board: &BoardDocument, card_id: &str) -> Result<BoardDocument> {
    board.apply_change("Delete card", |content| {
        content
            .cards
            .remove(card_id)
            .ok_or_else(|| ChathamError::CardNotFound(card_id.to_string()))?;
        debug!("event=delete_card module=board card_id={}", card_id);
        Ok(())
    })
}
