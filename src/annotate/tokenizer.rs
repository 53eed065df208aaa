//! Lossless whitespace tokenizer.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Split `text` into word tokens and whitespace runs.
///
/// Whitespace runs are kept as their own tokens, so the sequence always
/// alternates: a (possibly empty) non-whitespace token, a whitespace run,
/// a non-whitespace token, and so on. Word tokens therefore sit at even
/// indices and the sequence has odd length. Concatenating the tokens in
/// order reproduces `text` exactly.
///
/// ```
/// use typolens::annotate::tokenize;
///
/// assert_eq!(tokenize("hi  there"), vec!["hi", "  ", "there"]);
/// assert_eq!(tokenize(" x"), vec!["", " ", "x"]);
/// assert_eq!(tokenize(""), vec![""]);
/// ```
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut last = 0;
    for run in WHITESPACE_RUN.find_iter(text) {
        tokens.push(&text[last..run.start()]);
        tokens.push(run.as_str());
        last = run.end();
    }
    tokens.push(&text[last..]);
    tokens
}

/// Reassemble a token sequence into a single string.
pub fn join(tokens: &[&str]) -> String {
    tokens.concat()
}

/// Whether a token is a whitespace run.
pub fn is_whitespace_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_whitespace)
}
