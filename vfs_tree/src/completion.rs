//! Completion matching
//!
//! Given a partially typed path token, find the entry names that could
//! finish its last segment.

use crate::entry::Entry;

/// A completion candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionCandidate {
    /// Entry name
    pub name: String,
    /// Whether the entry is a directory
    pub is_directory: bool,
}

/// Outcome of a completion query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Nothing matches; the token stays as typed
    NoMatch,
    /// Exactly one match; the full replacement token
    Unique(String),
    /// Several matches, in directory order
    Candidates(Vec<CompletionCandidate>),
}

/// Splits a token into its directory part and the partial last segment
///
/// The directory part keeps its trailing slash so it can be glued back
/// onto a completed name.
///
/// ```
/// use vfs_tree::split_token;
///
/// assert_eq!(split_token("rea"), ("", "rea"));
/// assert_eq!(split_token("/home/us"), ("/home/", "us"));
/// assert_eq!(split_token("docs/"), ("docs/", ""));
/// ```
pub fn split_token(token: &str) -> (&str, &str) {
    match token.rfind('/') {
        Some(index) => token.split_at(index + 1),
        None => ("", token),
    }
}

impl Completion {
    /// Matches `partial` against the children of `dir`
    ///
    /// A name matches when it starts with `partial` and is not exactly
    /// `partial`. `prefix` is prepended to a unique match.
    pub fn from_directory(dir: &Entry, prefix: &str, partial: &str) -> Self {
        let mut matches: Vec<CompletionCandidate> = dir
            .children()
            .unwrap_or_default()
            .iter()
            .filter(|e| e.name.starts_with(partial) && e.name != partial)
            .map(|e| CompletionCandidate {
                name: e.name.clone(),
                is_directory: e.is_directory(),
            })
            .collect();

        match matches.len() {
            0 => Completion::NoMatch,
            1 => {
                let only = matches.remove(0);
                Completion::Unique(format!("{}{}", prefix, only.name))
            }
            _ => Completion::Candidates(matches),
        }
    }
}
