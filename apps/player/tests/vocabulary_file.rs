mod common;

use std::path::PathBuf;

use common::fixtures;
use paraules_player::load_vocabulary;
use pretty_assertions::assert_eq;

fn write_temp(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("paraules-{}-{name}", std::process::id()));
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn loads_words_from_disk() {
    let path = write_temp("words.txt", &fixtures::vocabulary_file(5));

    let vocabulary = load_vocabulary(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(vocabulary.len(), 5);
    assert_eq!(vocabulary.get("paraula3").unwrap().pictogram, "#3");
}

#[test]
fn parse_errors_name_the_file() {
    let path = write_temp("broken.txt", "W: gos\nP: 🐶\n\nW: gat\n");

    let err = load_vocabulary(&path).unwrap_err();
    std::fs::remove_file(&path).unwrap();

    let message = format!("{err:#}");
    assert!(message.contains("broken.txt"));
    assert!(message.contains("line 4"));
}

#[test]
fn missing_file_is_an_error() {
    let path = std::env::temp_dir().join("paraules-does-not-exist.txt");
    assert!(load_vocabulary(&path).is_err());
}
