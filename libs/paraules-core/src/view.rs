//! Read-only snapshot of the game for renderers.

use crate::game::Game;
use crate::selection::PendingSelection;
use crate::types::{Column, LetterCase, RoundId};
use serde::Serialize;

/// What a card shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum CardFace {
    /// The word, already cased for display.
    Word(String),
    /// A speaker button; the word is only heard.
    Sound,
    Image(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub key: String,
    pub face: CardFace,
    pub selected: bool,
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnView {
    pub column: Column,
    pub cards: Vec<CardView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameView {
    pub round: RoundId,
    pub round_size: usize,
    pub round_sizes: Vec<usize>,
    pub completed: usize,
    pub total: usize,
    pub columns: Vec<ColumnView>,
    pub pending: PendingSelection,
    pub celebrating: bool,
    pub letter_case: LetterCase,
}

impl GameView {
    pub(crate) fn build(game: &Game) -> Self {
        let round = game.round();
        let (completed, total) = round.progress();

        let columns = Column::ALL
            .iter()
            .map(|&column| ColumnView {
                column,
                cards: round
                    .display()
                    .column(column)
                    .iter()
                    .map(|key| CardView {
                        key: key.clone(),
                        face: face(game, column, key),
                        selected: game.pending().get(column) == Some(key.as_str()),
                        done: round.is_completed(key),
                    })
                    .collect(),
            })
            .collect();

        Self {
            round: round.id(),
            round_size: game.round_size(),
            round_sizes: game.round_sizes().to_vec(),
            completed,
            total,
            columns,
            pending: game.pending().clone(),
            celebrating: game.is_celebrating(),
            letter_case: game.letter_case(),
        }
    }

    pub fn column(&self, column: Column) -> Option<&ColumnView> {
        self.columns.iter().find(|view| view.column == column)
    }
}

fn face(game: &Game, column: Column, key: &str) -> CardFace {
    match column {
        Column::Word => CardFace::Word(game.letter_case().apply(key)),
        Column::Sound => CardFace::Sound,
        Column::Image => CardFace::Image(
            game.vocabulary()
                .get(key)
                .map(|item| item.pictogram.clone())
                .unwrap_or_default(),
        ),
    }
}
