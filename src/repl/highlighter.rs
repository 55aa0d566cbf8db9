//! Syntax highlighter for attribute paths and shell commands
//!
//! Shell commands get their keyword styled. Anything else is run through the
//! attribute path grammar: names, separators and list indexes are colored,
//! the tail from a syntax error is shown in red and text past the end of
//! the path is left plain.

use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};

use crate::parser::{ShellCommandParser, is_attribute_name_char, parse_attribute_path};

/// Highlighter for the attrsh input line
pub struct PathHighlighter {
    enabled: bool,
}

impl PathHighlighter {
    /// Create a new highlighter
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Default for PathHighlighter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Highlighter for PathHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled = StyledText::new();
        if !self.enabled {
            styled.push((Style::default(), line.to_string()));
            return styled;
        }

        let body = line.trim_start();
        let indent = &line[..line.len() - body.len()];
        if !indent.is_empty() {
            styled.push((Style::default(), indent.to_string()));
        }

        if ShellCommandParser::is_shell_command(body.trim_end()) {
            CommandHighlighter::highlight(body, &mut styled);
        } else {
            PathStyler::highlight(body, &mut styled);
        }
        styled
    }
}

// ============================================================================
// Shell Command Highlighter
// ============================================================================

struct CommandHighlighter;

impl CommandHighlighter {
    fn highlight(line: &str, styled: &mut StyledText) {
        let keyword_end = line.find(char::is_whitespace).unwrap_or(line.len());
        let (keyword, rest) = line.split_at(keyword_end);

        styled.push((Color::Blue.bold(), keyword.to_string()));
        if !rest.is_empty() {
            styled.push((Color::Green.into(), rest.to_string()));
        }
    }
}

// ============================================================================
// Attribute Path Highlighter
// ============================================================================

/// Character classes within a valid path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Name,
    Separator,
    Index,
    Other,
}

impl Token {
    fn style(self) -> Style {
        match self {
            Token::Name => Color::Cyan.into(),
            Token::Separator => Color::DarkGray.into(),
            Token::Index => Color::Purple.into(),
            Token::Other => Style::default(),
        }
    }
}

struct PathStyler;

impl PathStyler {
    fn highlight(line: &str, styled: &mut StyledText) {
        let (valid_end, tail_style) = match parse_attribute_path(line) {
            Ok(path) => (path.halted_at().unwrap_or(line.len()), Style::default()),
            Err(e) => (
                e.offset().unwrap_or(0).min(line.len()),
                Color::Red.underline(),
            ),
        };
        // offsets always fall on character boundaries; guard anyway
        let (valid, tail) = match (line.get(..valid_end), line.get(valid_end..)) {
            (Some(valid), Some(tail)) => (valid, tail),
            _ => ("", line),
        };

        Self::push_tokens(valid, styled);
        if !tail.is_empty() {
            styled.push((tail_style, tail.to_string()));
        }
    }

    /// Split a syntactically valid path into runs of one token class
    fn push_tokens(path: &str, styled: &mut StyledText) {
        let mut in_brackets = false;
        let mut run = String::new();
        let mut run_token = Token::Other;

        for ch in path.chars() {
            let token = match ch {
                '[' => {
                    in_brackets = true;
                    Token::Separator
                }
                ']' => {
                    in_brackets = false;
                    Token::Separator
                }
                '.' => Token::Separator,
                c if in_brackets && c.is_ascii_digit() => Token::Index,
                c if is_attribute_name_char(c) => Token::Name,
                _ => Token::Other,
            };

            if token != run_token && !run.is_empty() {
                styled.push((run_token.style(), std::mem::take(&mut run)));
            }
            run_token = token;
            run.push(ch);
        }

        if !run.is_empty() {
            styled.push((run_token.style(), run));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pieces(line: &str) -> Vec<(Style, String)> {
        PathHighlighter::new(true).highlight(line, line.len()).buffer
    }

    #[test]
    fn test_disabled_is_plain() {
        let result = PathHighlighter::new(false).highlight("socket.port", 0);
        assert_eq!(
            result.buffer,
            vec![(Style::default(), "socket.port".to_string())]
        );
    }

    #[test]
    fn test_path_tokens() {
        let result = pieces("servers[12].name");
        let texts: Vec<&str> = result.iter().map(|(_, s)| s.as_str()).collect();
        assert_eq!(texts, ["servers", "[", "12", "].", "name"]);
        assert_eq!(result[0].0, Token::Name.style());
        assert_eq!(result[2].0, Token::Index.style());
        assert_eq!(result[3].0, Token::Separator.style());
    }

    #[test]
    fn test_error_tail_is_red() {
        let result = pieces("socket..port");
        let last = result.last().unwrap();
        assert_eq!(last.1, ".port");
        assert_eq!(last.0, Color::Red.underline());
    }

    #[test]
    fn test_halted_tail_is_plain() {
        let result = pieces("socket.port = 8080");
        let last = result.last().unwrap();
        assert_eq!(last.1, " = 8080");
        assert_eq!(last.0, Style::default());
    }

    #[test]
    fn test_shell_command_keyword() {
        let result = pieces("cd /subsystem=web");
        assert_eq!(result[0], (Color::Blue.bold(), "cd".to_string()));
        assert_eq!(result[1].1, " /subsystem=web");
    }

    #[test]
    fn test_command_word_prefix_is_a_path() {
        let result = pieces("helper.x");
        assert_eq!(result[0], (Token::Name.style(), "helper".to_string()));
    }

    #[test]
    fn test_render_keeps_text() {
        let highlighter = PathHighlighter::default();
        let line = "  list[0].x";
        let result = highlighter.highlight(line, 0);
        let text: String = result.buffer.iter().map(|(_, s)| s.as_str()).collect();
        assert_eq!(text, line);
        assert!(!result.render_simple().is_empty());
    }
}
