//! Name matching commands: `match` and `canon`

use serde::Serialize;

use super::common::print_json;
use crate::{
    matching::{canonical::canonicalize, fuzzy::best_match, fuzzy::AnchorMatch},
    Result,
};

/// A name, its canonical form and the best-scoring candidate.
#[derive(Debug, Clone, Serialize)]
pub struct NameMatch {
    pub name: String,
    pub candidates: Vec<String>,
    #[serde(flatten)]
    pub result: AnchorMatch,
}

pub fn match_name(name: &str, candidates: &[String]) -> NameMatch {
    NameMatch {
        name: name.to_string(),
        candidates: candidates.to_vec(),
        result: best_match(name, candidates),
    }
}

/// Handle the match command
pub fn handle_name_match(name: &str, candidates: &[String], as_json: bool) -> Result<()> {
    let m = match_name(name, candidates);
    if as_json {
        return print_json(&m);
    }

    println!("{} -> \"{}\"", m.name, m.result.canonical_seed);
    match &m.result.best_candidate {
        Some(c) => println!("best: \"{}\" (score {:.3})", c, m.result.score),
        None => println!("no candidate matched"),
    }
    Ok(())
}

/// Handle the canon command: one `name<TAB>canonical` line per name.
pub fn handle_canon(names: &[String]) -> Result<()> {
    for name in names {
        println!("{}\t{}", name, canonicalize(name));
    }
    Ok(())
}
