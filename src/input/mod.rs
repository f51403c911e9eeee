// src/input/mod.rs

pub mod input_deck;
pub mod parser;

pub use input_deck::{DomainSettings, GridSettings, OperatorSpec, ProblemDeck};
pub use parser::parse_problem_deck;
