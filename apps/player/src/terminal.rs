//! Line-based terminal driver.
//!
//! Stands in for a graphical front end: it turns typed commands into game
//! intents and prints the view after each one.

use crate::engine::EngineHandle;
use paraules_core::types::Column;
use paraules_core::{CardFace, GameView};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub const HELP: &str = "\
commands:
  w N | s N | i N   pick card N in the word / sound / image column
  next              new round
  size N            round size
  case upper|lower  word casing
  show | json       print the board (text or JSON)
  quit";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Pick { column: Column, position: usize },
    NextRound,
    Size(usize),
    Case(bool),
    Show,
    Json,
    Help,
    Quit,
}

/// Parse one input line. Positions are 1-based.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(Command::Show);
    };
    let arg = parts.next();

    if let Some(column) = Column::from_str(head) {
        let position = arg
            .and_then(|n| n.parse::<usize>().ok())
            .filter(|n| *n > 0)
            .ok_or_else(|| format!("usage: {head} N"))?;
        return Ok(Command::Pick { column, position });
    }

    match head {
        "next" | "n" => Ok(Command::NextRound),
        "size" => arg
            .and_then(|n| n.parse().ok())
            .map(Command::Size)
            .ok_or_else(|| "usage: size N".to_string()),
        "case" => match arg {
            Some("upper") => Ok(Command::Case(true)),
            Some("lower") => Ok(Command::Case(false)),
            _ => Err("usage: case upper|lower".to_string()),
        },
        "show" => Ok(Command::Show),
        "json" => Ok(Command::Json),
        "help" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command: {other}")),
    }
}

/// Text rendering of a view.
pub fn render(view: &GameView) -> String {
    let mut out = format!("round {}  {}/{}\n", view.round, view.completed, view.total);
    for column in &view.columns {
        let cards: Vec<String> = column
            .cards
            .iter()
            .enumerate()
            .map(|(idx, card)| {
                let face = match &card.face {
                    CardFace::Word(word) => word.clone(),
                    CardFace::Sound => "🔊".to_string(),
                    CardFace::Image(picture) => picture.clone(),
                };
                let face = if card.done {
                    format!("{face}✓")
                } else if card.selected {
                    format!("[{face}]")
                } else {
                    face
                };
                format!("{} {}", idx + 1, face)
            })
            .collect();
        out.push_str(&format!("{:<6}{}\n", column.column.as_str(), cards.join("   ")));
    }
    if view.celebrating {
        out.push_str("🎉 Molt bé!\n");
    }
    out
}

/// Read commands from `input` until it ends or the player quits.
pub async fn drive<R, W>(handle: &EngineHandle, input: R, mut output: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    output
        .write_all(render(&handle.snapshot().await?).as_bytes())
        .await?;

    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                output.write_all(format!("{message}\n").as_bytes()).await?;
                continue;
            }
        };

        match command {
            Command::Pick { column, position } => {
                let view = handle.snapshot().await?;
                let key = view
                    .column(column)
                    .and_then(|col| col.cards.get(position - 1))
                    .map(|card| card.key.clone());
                match key {
                    Some(key) => handle.select_card(column, key)?,
                    None => {
                        output
                            .write_all(format!("no card {position} in {}\n", column.as_str()).as_bytes())
                            .await?;
                        continue;
                    }
                }
            }
            Command::NextRound => handle.start_new_round()?,
            Command::Size(size) => handle.set_round_size(size)?,
            Command::Case(uppercase) => handle.set_case(uppercase)?,
            Command::Show => {}
            Command::Json => {
                let view = handle.snapshot().await?;
                let json = serde_json::to_string_pretty(&view)?;
                output.write_all(format!("{json}\n").as_bytes()).await?;
                continue;
            }
            Command::Help => {
                let view = handle.snapshot().await?;
                let sizes: Vec<String> = view.round_sizes.iter().map(usize::to_string).collect();
                output
                    .write_all(format!("{HELP}\nsizes: {}\n", sizes.join(" ")).as_bytes())
                    .await?;
                continue;
            }
            Command::Quit => break,
        }

        let view = handle.snapshot().await?;
        output.write_all(render(&view).as_bytes()).await?;
    }
    output.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use paraules_core::{CardView, ColumnView, LetterCase, PendingSelection};
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_commands() {
        assert_eq!(
            parse_command("w 2"),
            Ok(Command::Pick {
                column: Column::Word,
                position: 2
            })
        );
        assert_eq!(
            parse_command("sound 1"),
            Ok(Command::Pick {
                column: Column::Sound,
                position: 1
            })
        );
        assert_eq!(parse_command("next"), Ok(Command::NextRound));
        assert_eq!(parse_command("size 6"), Ok(Command::Size(6)));
        assert_eq!(parse_command("case lower"), Ok(Command::Case(false)));
        assert_eq!(parse_command(""), Ok(Command::Show));
        assert_eq!(parse_command("q"), Ok(Command::Quit));
    }

    #[test]
    fn rejects_bad_commands() {
        assert!(parse_command("w 0").is_err());
        assert!(parse_command("i x").is_err());
        assert!(parse_command("size").is_err());
        assert!(parse_command("case sideways").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn renders_marks() {
        let view = GameView {
            round: paraules_core::RoundId(2),
            round_size: 2,
            round_sizes: vec![2, 4],
            completed: 1,
            total: 2,
            columns: vec![ColumnView {
                column: Column::Word,
                cards: vec![
                    CardView {
                        key: "gos".into(),
                        face: CardFace::Word("GOS".into()),
                        selected: false,
                        done: true,
                    },
                    CardView {
                        key: "gat".into(),
                        face: CardFace::Word("GAT".into()),
                        selected: true,
                        done: false,
                    },
                ],
            }],
            pending: PendingSelection::default(),
            celebrating: true,
            letter_case: LetterCase::Upper,
        };
        assert_eq!(
            render(&view),
            "round #2  1/2\nword  1 GOS✓   2 [GAT]\n🎉 Molt bé!\n"
        );
    }
}
