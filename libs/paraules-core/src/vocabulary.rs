//! Vocabulary store and its file format.
//!
//! # Format
//! ```markdown
//! # Animals
//! W: gos
//! P: 🐶
//!
//! W: gat
//! P: 🐱
//! ```
//!
//! Each entry is a `W:` line with the word followed by a `P:` line with the
//! picture. Blank lines separate entries and `#` lines are comments.

use crate::error::{Result, VocabularyError};
use crate::types::VocabularyItem;
use std::collections::HashSet;

/// Words shipped with the game.
const BUILTIN: &[(&str, &str)] = &[
    ("gos", "🐶"),
    ("gat", "🐱"),
    ("sol", "☀️"),
    ("sí", "✅"),
    ("no", "❌"),
    ("papa", "👨"),
    ("mama", "👩"),
    ("lluna", "🌙"),
    ("paper", "📄"),
    ("pal", "🪵"),
    ("poma", "🍎"),
    ("kiwi", "🥝"),
    ("plàtan", "🍌"),
    ("menjar", "🍽️"),
    ("pastís", "🎂"),
    ("cotxe", "🚗"),
    ("cor", "❤️"),
    ("avió", "✈️"),
    ("ulls", "👀"),
    ("foc", "🔥"),
    ("serp", "🐍"),
    ("llibre", "📚"),
    ("cuiner", "👨‍🍳"),
    ("llapis", "✏️"),
    ("tissora", "✂️"),
    ("llit", "🛏️"),
    ("bebé", "👶"),
];

/// Immutable list of matchable items with unique keys.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    items: Vec<VocabularyItem>,
}

impl Vocabulary {
    /// Build a vocabulary, rejecting duplicate keys.
    pub fn new(items: Vec<VocabularyItem>) -> Result<Self> {
        if items.is_empty() {
            return Err(VocabularyError::Empty);
        }
        let mut seen = HashSet::new();
        for (idx, item) in items.iter().enumerate() {
            if !seen.insert(item.key.as_str()) {
                return Err(VocabularyError::DuplicateItem {
                    key: item.key.clone(),
                    index: idx,
                });
            }
        }
        Ok(Self { items })
    }

    /// The built-in Catalan word list.
    pub fn builtin() -> Self {
        Self {
            items: BUILTIN
                .iter()
                .map(|(key, pictogram)| VocabularyItem::new(*key, *pictogram))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[VocabularyItem] {
        &self.items
    }

    pub fn get(&self, key: &str) -> Option<&VocabularyItem> {
        self.items.iter().find(|item| item.key == key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.items.iter().map(|item| item.key.clone()).collect()
    }
}

/// Parse vocabulary file content.
pub fn parse(content: &str) -> Result<Vocabulary> {
    let mut items = Vec::new();
    let mut seen = HashSet::new();
    let mut parser = Parser::new();

    for (idx, line) in content.lines().enumerate() {
        let line_num = idx + 1;
        if let Some(entry) = parser.process_line(line, line_num)? {
            push_unique(&mut items, &mut seen, entry)?;
        }
    }

    if let Some(entry) = parser.finalize()? {
        push_unique(&mut items, &mut seen, entry)?;
    }

    if items.is_empty() {
        return Err(VocabularyError::Empty);
    }
    Ok(Vocabulary {
        items: items.into_iter().map(|(item, _)| item).collect(),
    })
}

fn push_unique(
    items: &mut Vec<(VocabularyItem, usize)>,
    seen: &mut HashSet<String>,
    entry: (VocabularyItem, usize),
) -> Result<()> {
    if !seen.insert(entry.0.key.clone()) {
        return Err(VocabularyError::DuplicateKey {
            key: entry.0.key,
            line: entry.1,
        });
    }
    items.push(entry);
    Ok(())
}

struct EntryBuilder {
    key: Option<String>,
    pictogram: Option<String>,
    start_line: usize,
}

impl EntryBuilder {
    fn new(start_line: usize) -> Self {
        Self {
            key: None,
            pictogram: None,
            start_line,
        }
    }

    fn build(self) -> Result<(VocabularyItem, usize)> {
        let key = self.key.ok_or(VocabularyError::MissingWord {
            line: self.start_line,
        })?;
        let pictogram = self.pictogram.ok_or(VocabularyError::MissingPictogram {
            line: self.start_line,
        })?;
        Ok((VocabularyItem { key, pictogram }, self.start_line))
    }
}

struct Parser {
    current: Option<EntryBuilder>,
}

impl Parser {
    fn new() -> Self {
        Self { current: None }
    }

    /// Feed one line. Returns an entry when the line closes one.
    fn process_line(&mut self, line: &str, line_num: usize) -> Result<Option<(VocabularyItem, usize)>> {
        match Self::parse_line(line) {
            LineType::Word(word) => {
                let finished = self.finalize()?;
                let mut entry = EntryBuilder::new(line_num);
                if !word.is_empty() {
                    entry.key = Some(word.to_string());
                }
                self.current = Some(entry);
                Ok(finished)
            }
            LineType::Picture(picture) => {
                let entry = self
                    .current
                    .get_or_insert_with(|| EntryBuilder::new(line_num));
                if entry.pictogram.is_some() {
                    return Err(VocabularyError::UnexpectedLine {
                        line: line_num,
                        text: line.trim().to_string(),
                    });
                }
                if !picture.is_empty() {
                    entry.pictogram = Some(picture.to_string());
                }
                Ok(None)
            }
            LineType::Empty => self.finalize(),
            LineType::Comment => Ok(None),
            LineType::Text(text) => Err(VocabularyError::UnexpectedLine {
                line: line_num,
                text: text.to_string(),
            }),
        }
    }

    fn parse_line(line: &str) -> LineType<'_> {
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix("W:") {
            LineType::Word(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("P:") {
            LineType::Picture(rest.trim())
        } else if trimmed.starts_with('#') {
            LineType::Comment
        } else if trimmed.is_empty() {
            LineType::Empty
        } else {
            LineType::Text(trimmed)
        }
    }

    fn finalize(&mut self) -> Result<Option<(VocabularyItem, usize)>> {
        self.current.take().map(EntryBuilder::build).transpose()
    }
}

enum LineType<'a> {
    Word(&'a str),
    Picture(&'a str),
    Comment,
    Text(&'a str),
    Empty,
}
