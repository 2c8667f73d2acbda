//! Lightweight source classification
//!
//! This is a substring and pattern heuristic, not a Solidity parser. A marker
//! inside a comment or string literal counts the same as a real declaration,
//! so `// not a library here` excludes the file and `string s = "contract X";`
//! can make a file exportable.

use lazy_static::lazy_static;
use regex::Regex;

/// Substrings that exclude a whole file from export
const EXCLUSION_MARKERS: [&str; 2] = ["abstract contract", "library "];

lazy_static! {
    // No word boundary before the keyword: `myinterface Foo` matches too.
    static ref INTERFACE_DECL: Regex = Regex::new(r"interface\s+([A-Za-z0-9_]+)").unwrap();
    static ref CONTRACT_DECL: Regex = Regex::new(r"contract\s+([A-Za-z0-9_]+)").unwrap();
}

/// Which pattern produced a declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Interface,
    Contract,
}

/// The first exportable declaration found in a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: String,
}

/// True when the file mentions an abstract contract or a library anywhere.
pub fn is_excluded(content: &str) -> bool {
    EXCLUSION_MARKERS
        .iter()
        .any(|marker| content.contains(marker))
}

/// Find the declaration that identifies this file's artifact.
///
/// Both patterns are searched independently; the first interface match wins
/// over any contract match regardless of position in the file.
pub fn find_declaration(content: &str) -> Option<Declaration> {
    if let Some(name) = first_capture(&INTERFACE_DECL, content) {
        return Some(Declaration {
            kind: DeclarationKind::Interface,
            name,
        });
    }
    first_capture(&CONTRACT_DECL, content).map(|name| Declaration {
        kind: DeclarationKind::Contract,
        name,
    })
}

fn first_capture(re: &Regex, content: &str) -> Option<String> {
    re.captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Classify a source file: `None` if excluded or declaring nothing exportable.
pub fn classify(content: &str) -> Option<Declaration> {
    if is_excluded(content) {
        return None;
    }
    find_declaration(content)
}
