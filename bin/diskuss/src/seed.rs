//! Board seeding. The board set is a deployment-time decision: it is read
//! once at startup and never changes while the process runs.

use std::collections::HashSet;
use std::{env, fs};

use anyhow::Context;
use ds_core::models::Board;

/// Environment variable naming a JSON file with the board list:
/// `[{"name": "abc", "description": "General"}, ...]`.
pub const BOARDS_FILE_VAR: &str = "DISKUSS_BOARDS";

fn default_boards() -> Vec<Board> {
    vec![
        Board {
            name: "abc".to_string(),
            description: "General discussion".to_string(),
        },
        Board {
            name: "test".to_string(),
            description: "Testing grounds".to_string(),
        },
    ]
}

/// Loads the board seed from the configured file, or falls back to the
/// built-in defaults. Duplicate names (case-insensitive) are a startup
/// error regardless of which storage plugin is compiled in.
pub fn load_boards() -> anyhow::Result<Vec<Board>> {
    let Ok(path) = env::var(BOARDS_FILE_VAR) else {
        return Ok(default_boards());
    };
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("reading board seed file {path}"))?;
    let boards: Vec<Board> =
        serde_json::from_str(&raw).with_context(|| format!("parsing board seed file {path}"))?;
    anyhow::ensure!(!boards.is_empty(), "board seed file {path} lists no boards");
    ensure_unique(&boards)?;
    Ok(boards)
}

fn ensure_unique(boards: &[Board]) -> anyhow::Result<()> {
    let mut seen = HashSet::with_capacity(boards.len());
    for board in boards {
        anyhow::ensure!(
            seen.insert(board.name.to_ascii_lowercase()),
            "duplicate board name in seed: {}",
            board.name
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_standard_boards() {
        let boards = default_boards();
        let names: Vec<_> = boards.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["abc", "test"]);
    }

    #[test]
    fn seed_files_parse_as_a_board_list() {
        let raw = r#"[{"name": "rs", "description": "Rust talk"}]"#;
        let boards: Vec<Board> = serde_json::from_str(raw).unwrap();
        assert_eq!(boards[0].name, "rs");
        assert_eq!(boards[0].description, "Rust talk");
    }

    #[test]
    fn duplicate_names_differ_only_by_case_are_rejected() {
        let raw = r#"[
            {"name": "abc", "description": "one"},
            {"name": "ABC", "description": "two"}
        ]"#;
        let boards: Vec<Board> = serde_json::from_str(raw).unwrap();
        assert!(ensure_unique(&boards).is_err());
        assert!(ensure_unique(&default_boards()).is_ok());
    }
}
