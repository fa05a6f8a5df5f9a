//! Line lexer: splits source text into significant lines and applies keyword
//! aliases.

use indexmap::IndexMap;
use regex::{Captures, Regex};

/// A significant source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number in the original source.
    pub number: usize,
    /// Right-trimmed text with aliases applied. Leading indentation is kept.
    pub text: String,
}

impl Line {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// Rewrites alias keywords to their canonical form.
///
/// Matching is on word boundaries and never looks inside string literals, so
/// `let` is rewritten in `let x = 1` but not in `letter = 1` or `show "let"`.
pub struct Aliaser {
    pattern: Option<Regex>,
    table: IndexMap<String, String>,
}

impl Aliaser {
    pub fn new(table: &IndexMap<String, String>) -> Self {
        let pattern = if table.is_empty() {
            None
        } else {
            let words: Vec<String> = table.keys().map(|k| regex::escape(k)).collect();
            match Regex::new(&format!(r"\b(?:{})\b", words.join("|"))) {
                Ok(re) => Some(re),
                Err(e) => {
                    log::warn!("alias table ignored: {}", e);
                    None
                }
            }
        };

        Self {
            pattern,
            table: table.clone(),
        }
    }

    /// Apply the alias table to one line.
    pub fn apply(&self, line: &str) -> String {
        let Some(pattern) = &self.pattern else {
            return line.to_string();
        };

        let mut out = String::with_capacity(line.len());
        let mut code = String::new();
        let mut chars = line.chars();

        while let Some(c) = chars.next() {
            if c != '"' && c != '\'' {
                code.push(c);
                continue;
            }

            out.push_str(&self.rewrite(pattern, &code));
            code.clear();

            // Copy the literal through untouched, including its quotes.
            out.push(c);
            while let Some(inner) = chars.next() {
                out.push(inner);
                if inner == '\\' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else if inner == c {
                    break;
                }
            }
        }

        out.push_str(&self.rewrite(pattern, &code));
        out
    }

    fn rewrite(&self, pattern: &Regex, code: &str) -> String {
        pattern
            .replace_all(code, |caps: &Captures| {
                let word = &caps[0];
                self.table
                    .get(word)
                    .cloned()
                    .unwrap_or_else(|| word.to_string())
            })
            .into_owned()
    }
}

/// Turn raw source lines into significant lines.
///
/// Blank lines are dropped, the rest are right-trimmed and aliased. Never
/// fails.
pub fn lex<S: AsRef<str>>(source_lines: &[S], aliases: &IndexMap<String, String>) -> Vec<Line> {
    let aliaser = Aliaser::new(aliases);

    let lines: Vec<Line> = source_lines
        .iter()
        .enumerate()
        .filter(|(_, raw)| !raw.as_ref().trim().is_empty())
        .map(|(i, raw)| Line::new(i + 1, aliaser.apply(raw.as_ref()).trim_end()))
        .collect();

    log::debug!(
        "lexed {} significant lines out of {}",
        lines.len(),
        source_lines.len()
    );
    lines
}

/// Convenience wrapper splitting a whole source text.
pub fn lex_source(source: &str, aliases: &IndexMap<String, String>) -> Vec<Line> {
    let raw: Vec<&str> = source.lines().collect();
    lex(&raw, aliases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn texts(lines: &[Line]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_drops_blank_lines_and_trims_right() {
        let source = ["show 1   ", "", "   ", "  set x = 2\t"];
        let lines = lex(&source, &IndexMap::new());
        assert_eq!(texts(&lines), vec!["show 1", "  set x = 2"]);
        assert_eq!(lines[0].number, 1);
        assert_eq!(lines[1].number, 4);
    }

    #[test]
    fn test_no_alias_matches_is_identity() {
        let source = "show \"Hi\"\nset x = 2\n\nloop x\n    show x\nend\n";
        let config = Config::default();
        let lines = lex_source(source, &config.aliases);
        assert_eq!(
            texts(&lines),
            vec!["show \"Hi\"", "set x = 2", "loop x", "    show x", "end"]
        );
    }

    #[test]
    fn test_aliases_rewrite_whole_words() {
        let config = Config::default();
        let lines = lex_source("print 1\nlet x = 2\nset letter = 3\nshow println", &config.aliases);
        assert_eq!(
            texts(&lines),
            vec!["show 1", "set x = 2", "set letter = 3", "show println"]
        );
    }

    #[test]
    fn test_aliases_skip_string_literals() {
        let config = Config::default();
        let lines = lex_source(
            "print \"let it print\"\nprint 'let' + \"a \\\" print\" + let",
            &config.aliases,
        );
        assert_eq!(
            texts(&lines),
            vec![
                "show \"let it print\"",
                "show 'let' + \"a \\\" print\" + set"
            ]
        );
    }

    #[test]
    fn test_aliases_are_not_chained() {
        let mut table = IndexMap::new();
        table.insert("a".to_string(), "b".to_string());
        table.insert("b".to_string(), "c".to_string());
        let aliaser = Aliaser::new(&table);
        assert_eq!(aliaser.apply("a b"), "b c");
    }
}
