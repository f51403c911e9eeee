// src/input/parser.rs

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::FdmResult;
use crate::input::ProblemDeck;

/// Parses a problem deck from a YAML file.
///
/// # Arguments
///
/// * `file_path` - Path to the YAML input file.
///
/// # Returns
///
/// * `Ok(ProblemDeck)` if parsing is successful.
/// * `Err` if an error occurs during file reading or parsing.
pub fn parse_problem_deck<P: AsRef<Path>>(file_path: P) -> FdmResult<ProblemDeck> {
    let mut file = File::open(file_path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    ProblemDeck::from_yaml_str(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FdmError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_problem_deck_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "grid: {{ nx: 4, ny: 4 }}\n\
             domain: {{ lower: [0.0, 0.0], upper: [1.0, 1.0] }}\n\
             source: 4.0\n\
             operators:\n  - {{ kind: d2dx, spacing: 0.2 }}\n  - {{ kind: d2dy, spacing: 0.2 }}"
        )
        .unwrap();

        let deck = parse_problem_deck(file.path()).unwrap();
        assert_eq!(deck.source, 4.0);
        assert_eq!(deck.operators.len(), 2);

        let solver = deck.build_solver().unwrap();
        let u = solver.solve(deck.grid.nx, deck.grid.ny).unwrap();
        assert_eq!(u.shape(), (4, 4));
        assert!(u.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = parse_problem_deck(dir.path().join("missing.yaml"));
        assert!(matches!(result, Err(FdmError::Io(_))));
    }
}
