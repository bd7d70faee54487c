pub mod board;
pub mod card;
pub mod position;
pub mod sorting;

pub use board::{
    add_card, create_board, create_board_with_profile, delete_card, move_card, update_card,
    BoardContent, Column, CreatorProfile, Member,
};
pub use card::{Card, CardUpdate, FieldUpdate, NewCard};
pub use sorting::{sort_cards, SortField, SortOrder};
