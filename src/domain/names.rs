use std::sync::LazyLock;

use regex::{Captures, Regex};

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)").expect("valid parenthetical regex"));
static MC_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bMc([a-z])").expect("valid Mc regex"));
static O_APOSTROPHE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bO'([a-z])").expect("valid O' regex"));

/// Canonical form of a player name as typed into the pairing site.
///
/// Drops parenthetical nicknames, collapses whitespace, title-cases every
/// token and restores the `Mc`/`O'` capitalisation that title-casing loses.
pub fn normalize(raw: &str) -> String {
    let stripped = PARENTHETICAL.replace_all(raw, "");
    let titled = stripped
        .split_whitespace()
        .map(title_case_token)
        .collect::<Vec<_>>()
        .join(" ");

    let titled = MC_PREFIX.replace_all(&titled, |caps: &Captures| {
        format!("Mc{}", caps[1].to_uppercase())
    });
    O_APOSTROPHE
        .replace_all(&titled, |caps: &Captures| {
            format!("O'{}", caps[1].to_uppercase())
        })
        .into_owned()
}

fn title_case_token(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
