// # nginx Configuration Parser
//
// This crate turns nginx-style configuration text into a
// `resolvelint_core::ConfigTree`.
//
// ## Grammar
//
// - Directives are words terminated by `;` or followed by a `{ ... }` block
// - Words may be single- or double-quoted; `\` escapes the quote character
// - `#` starts a comment that runs to the end of the line
// - `${name}` inside a word belongs to the word
//
// ## Scope
//
// The parser builds the tree only. `include` directives are kept as plain
// directives and are not expanded.

use resolvelint_core::{ConfigTree, NodeId};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Parser errors with line number information
#[derive(Error, Debug)]
pub enum ParseError {
    /// A `}` without a matching `{`
    #[error("Line {line}: unexpected \"}}\"")]
    UnexpectedClose { line: usize },

    /// A block still open at end of input
    #[error("Line {line}: block is never closed")]
    UnclosedBlock { line: usize },

    /// Words not terminated by `;` or `{`
    #[error("Line {line}: directive is not terminated by \";\"")]
    MissingSemicolon { line: usize },

    /// A `;` or `{` without a directive name
    #[error("Line {line}: empty directive")]
    EmptyDirective { line: usize },

    /// A quoted string running to end of input
    #[error("Line {line}: unterminated quoted string")]
    UnterminatedQuote { line: usize },

    /// The configuration file could not be read
    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<ParseError> for resolvelint_core::Error {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Io { source, .. } => resolvelint_core::Error::Io(source),
            other => resolvelint_core::Error::parse(other.to_string()),
        }
    }
}

type Result<T> = std::result::Result<T, ParseError>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Word(String),
    Semicolon,
    Open,
    Close,
}

/// Parse configuration text
pub fn parse_str(text: &str) -> Result<ConfigTree> {
    let mut tree = ConfigTree::new();
    let mut blocks: Vec<(NodeId, usize)> = Vec::new();
    let mut words: Vec<String> = Vec::new();
    let mut words_line = 0;

    for (token, line) in tokenize(text)? {
        let parent = blocks.last().map_or(NodeId::ROOT, |(id, _)| *id);

        match token {
            Token::Word(word) => {
                if words.is_empty() {
                    words_line = line;
                }
                words.push(word);
            }
            Token::Semicolon | Token::Open => {
                if words.is_empty() {
                    return Err(ParseError::EmptyDirective { line });
                }
                let name = words.remove(0);
                let args = std::mem::take(&mut words);

                let id = if token == Token::Open {
                    let id = tree.push_block(parent, name, args);
                    blocks.push((id, words_line));
                    id
                } else {
                    tree.push(parent, name, args)
                };
                tree.set_line(id, words_line);
            }
            Token::Close => {
                if !words.is_empty() {
                    return Err(ParseError::MissingSemicolon { line: words_line });
                }
                if blocks.pop().is_none() {
                    return Err(ParseError::UnexpectedClose { line });
                }
            }
        }
    }

    if !words.is_empty() {
        return Err(ParseError::MissingSemicolon { line: words_line });
    }
    if let Some((_, line)) = blocks.last() {
        return Err(ParseError::UnclosedBlock { line: *line });
    }

    Ok(tree)
}

/// Parse a configuration file
pub fn parse_file(path: impl AsRef<Path>) -> Result<ConfigTree> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let tree = parse_str(&text)?;
    debug!("Parsed {} directive(s) from {}", tree.len(), path.display());
    Ok(tree)
}

fn tokenize(text: &str) -> Result<Vec<(Token, usize)>> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();
    let mut line = 1;

    while let Some(c) = chars.next() {
        match c {
            '\n' => line += 1,
            c if c.is_whitespace() => {}
            '#' => {
                while chars.next_if(|&n| n != '\n').is_some() {}
            }
            ';' => tokens.push((Token::Semicolon, line)),
            '{' => tokens.push((Token::Open, line)),
            '}' => tokens.push((Token::Close, line)),
            '"' | '\'' => {
                let start = line;
                let mut value = String::new();
                loop {
                    match chars.next() {
                        None => return Err(ParseError::UnterminatedQuote { line: start }),
                        Some(q) if q == c => break,
                        Some('\\') => match chars.next() {
                            None => return Err(ParseError::UnterminatedQuote { line: start }),
                            Some(n) if n == c || n == '\\' => value.push(n),
                            Some(n) => {
                                if n == '\n' {
                                    line += 1;
                                }
                                value.push('\\');
                                value.push(n);
                            }
                        },
                        Some(n) => {
                            if n == '\n' {
                                line += 1;
                            }
                            value.push(n);
                        }
                    }
                }
                tokens.push((Token::Word(value), start));
            }
            _ => {
                let mut value = String::from(c);
                let mut prev = c;
                while let Some(&n) = chars.peek() {
                    if n.is_whitespace() || n == ';' || n == '}' || (n == '{' && prev != '$') {
                        break;
                    }
                    chars.next();
                    value.push(n);
                    if n == '{' {
                        // `${name}`: the braces belong to the word
                        while let Some(v) = chars.next_if(|&v| v != '}' && v != '\n') {
                            value.push(v);
                        }
                        if let Some(close) = chars.next_if_eq(&'}') {
                            value.push(close);
                        }
                    }
                    prev = n;
                }
                tokens.push((Token::Word(value), line));
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
# upstream pool
http {
    resolver 8.8.8.8 valid=30s;
    upstream backend {
        zone backend 64k;
        server api.example.com:8080 resolve;
    }

    server {
        listen 80;
        set $target "api.example.com";
        location / {
            proxy_pass http://${target}:8080; # trailing comment
        }
    }
}
"#;

    #[test]
    fn test_parse_structure() {
        let tree = parse_str(SAMPLE).unwrap();
        let names: Vec<_> = tree.walk().iter().map(|d| d.name()).collect();
        assert_eq!(
            names,
            vec![
                "http", "resolver", "upstream", "zone", "server", "server", "listen", "set",
                "location", "proxy_pass"
            ]
        );

        let proxy = tree.walk().into_iter().find(|d| d.name() == "proxy_pass").unwrap();
        assert_eq!(proxy.args(), ["http://${target}:8080"]);
        assert_eq!(proxy.line(), Some(14));

        let set = tree.walk().into_iter().find(|d| d.name() == "set").unwrap();
        assert_eq!(set.args(), ["$target", "api.example.com"]);

        let upstream = proxy
            .find_imperative_directives_in_scope("upstream", true)
            .pop()
            .unwrap();
        assert!(upstream.is_block());
        assert_eq!(upstream.line(), Some(5));
    }

    #[test]
    fn test_quotes_and_escapes() {
        let tree = parse_str(r#"add_header X-Msg "say \"hi\"; ok" 'single';"#).unwrap();
        let header = tree.walk()[0];
        assert_eq!(header.args(), ["X-Msg", "say \"hi\"; ok", "single"]);
    }

    #[test]
    fn test_empty_block() {
        let tree = parse_str("events {}").unwrap();
        let events = tree.walk()[0];
        assert!(events.is_block());
        assert_eq!(events.children().count(), 0);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(parse_str("}"), Err(ParseError::UnexpectedClose { line: 1 })));
        assert!(matches!(
            parse_str("http {\n  server {\n"),
            Err(ParseError::UnclosedBlock { line: 2 })
        ));
        assert!(matches!(
            parse_str("listen 80"),
            Err(ParseError::MissingSemicolon { line: 1 })
        ));
        assert!(matches!(
            parse_str("server { listen 80 }"),
            Err(ParseError::MissingSemicolon { line: 1 })
        ));
        assert!(matches!(parse_str("\n;"), Err(ParseError::EmptyDirective { line: 2 })));
        assert!(matches!(
            parse_str("return 200 \"open"),
            Err(ParseError::UnterminatedQuote { line: 1 })
        ));
    }

    #[test]
    fn test_error_converts_to_core_error() {
        let err: resolvelint_core::Error = ParseError::UnexpectedClose { line: 3 }.into();
        assert!(matches!(err, resolvelint_core::Error::Parse(msg) if msg.contains("Line 3")));
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "proxy_pass http://api.example.com;").unwrap();

        let tree = parse_file(file.path()).unwrap();
        assert_eq!(tree.len(), 1);

        let missing = parse_file("/nonexistent/resolvelint/nginx.conf");
        assert!(matches!(missing, Err(ParseError::Io { .. })));
    }
}
