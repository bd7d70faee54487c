use crate::domain::card::Card;
use std::cmp::Ordering;
use std::str::FromStr;

/// Fields available for sorting cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Position,
    Title,
    Created,
    Updated,
    Due,
    Labels,
}

/// Sort order direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "position" => Ok(SortField::Position),
            "title" => Ok(SortField::Title),
            "created" => Ok(SortField::Created),
            "updated" => Ok(SortField::Updated),
            "due" => Ok(SortField::Due),
            "labels" => Ok(SortField::Labels),
            _ => Err(format!(
                "Invalid sort field '{}'. Valid fields: position, title, created, updated, due, labels",
                s
            )),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Ascending),
            "desc" => Ok(SortOrder::Descending),
            _ => Err(format!(
                "Invalid sort order '{}'. Valid orders: asc, desc",
                s
            )),
        }
    }
}

/// Sorts cards in place by `field` in the given direction.
///
/// Cards without a due date always come last when sorting by [`SortField::Due`].
///
/// # Examples
/// ```
/// use chatham_core::domain::card::Card;
/// use chatham_core::domain::sorting::{sort_cards, SortField, SortOrder};
///
/// let card = |title: &str, position: &str| {
///     Card::new("col".to_string(), position.to_string(), title.to_string(), String::new())
/// };
/// let mut cards = vec![card("C", "a2"), card("A", "a0"), card("B", "a1")];
///
/// sort_cards(&mut cards, SortField::Position, SortOrder::Ascending);
/// assert_eq!(cards[0].title, "A");
/// ```
pub fn sort_cards(cards: &mut [Card], field: SortField, order: SortOrder) {
    cards.sort_by(|a, b| {
        if field == SortField::Due {
            return compare_due_dates(a.due_date, b.due_date, order);
        }

        let cmp = match field {
            SortField::Position => a.position.cmp(&b.position),
            SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortField::Created => a.created_at.cmp(&b.created_at),
            SortField::Updated => a.updated_at.cmp(&b.updated_at),
            SortField::Labels => a.labels.len().cmp(&b.labels.len()),
            SortField::Due => Ordering::Equal,
        };

        match order {
            SortOrder::Ascending => cmp,
            SortOrder::Descending => cmp.reverse(),
        }
    });
}

/// Due dates compare in `order`; a missing due date sorts after any present one
fn compare_due_dates(a: Option<i64>, b: Option<i64>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(a_due), Some(b_due)) => match order {
            SortOrder::Ascending => a_due.cmp(&b_due),
            SortOrder::Descending => b_due.cmp(&a_due),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(title: &str, position: &str) -> Card {
        Card::new(
            "col".to_string(),
            position.to_string(),
            title.to_string(),
            String::new(),
        )
    }

    #[test]
    fn test_sort_by_position() {
        let mut cards = vec![card("C", "a2"), card("A", "a0"), card("B", "a1")];

        sort_cards(&mut cards, SortField::Position, SortOrder::Ascending);

        assert_eq!(cards[0].title, "A");
        assert_eq!(cards[1].title, "B");
        assert_eq!(cards[2].title, "C");
    }

    #[test]
    fn test_sort_by_title_case_insensitive() {
        let mut cards = vec![card("zebra", "a"), card("Apple", "b"), card("BANANA", "c")];

        sort_cards(&mut cards, SortField::Title, SortOrder::Ascending);

        assert_eq!(cards[0].title, "Apple");
        assert_eq!(cards[1].title, "BANANA");
        assert_eq!(cards[2].title, "zebra");
    }

    #[test]
    fn test_sort_by_title_descending() {
        let mut cards = vec![card("Alpha", "a"), card("Charlie", "b"), card("Bravo", "c")];

        sort_cards(&mut cards, SortField::Title, SortOrder::Descending);

        assert_eq!(cards[0].title, "Charlie");
        assert_eq!(cards[1].title, "Bravo");
        assert_eq!(cards[2].title, "Alpha");
    }

    #[test]
    fn test_sort_by_labels() {
        let mut many = card("Many", "a");
        many.labels = vec!["a".to_string(), "b".to_string()];
        let mut one = card("One", "b");
        one.labels = vec!["a".to_string()];
        let none = card("None", "c");

        let mut cards = vec![many, none, one];
        sort_cards(&mut cards, SortField::Labels, SortOrder::Ascending);

        assert_eq!(cards[0].title, "None");
        assert_eq!(cards[1].title, "One");
        assert_eq!(cards[2].title, "Many");
    }

    #[test]
    fn test_missing_due_dates_sort_last_both_ways() {
        let mut soon = card("Soon", "a");
        soon.due_date = Some(1_000);
        let mut later = card("Later", "b");
        later.due_date = Some(2_000);
        let undated = card("Undated", "c");

        let mut cards = vec![undated.clone(), later.clone(), soon.clone()];
        sort_cards(&mut cards, SortField::Due, SortOrder::Ascending);
        assert_eq!(cards[0].title, "Soon");
        assert_eq!(cards[1].title, "Later");
        assert_eq!(cards[2].title, "Undated");

        let mut cards = vec![undated, soon, later];
        sort_cards(&mut cards, SortField::Due, SortOrder::Descending);
        assert_eq!(cards[0].title, "Later");
        assert_eq!(cards[1].title, "Soon");
        assert_eq!(cards[2].title, "Undated");
    }

    #[test]
    fn test_parse_sort_options() {
        assert_eq!("Due".parse::<SortField>(), Ok(SortField::Due));
        assert_eq!("position".parse::<SortField>(), Ok(SortField::Position));
        assert!("status".parse::<SortField>().is_err());
        assert_eq!("DESC".parse::<SortOrder>(), Ok(SortOrder::Descending));
        assert!("sideways".parse::<SortOrder>().is_err());
    }
}
