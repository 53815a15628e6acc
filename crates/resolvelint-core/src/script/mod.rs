// # Variable Scripts
//
// nginx arguments may interpolate variables (`http://$backend:8080`,
// `${scheme}://api`). This module splits such a script into literal and
// variable segments and computes, for every variable, the value it is known
// to hold when the configuration is loaded.
//
// ## Folding Model
//
// - Request-time builtins (`$remote_addr`, `$http_*`) and regex captures
//   (`$1`) are never known statically.
// - A variable assigned with `set $name value;` in an enclosing block is
//   known if its value folds to a literal. The nearest block wins; inside one
//   block the last assignment wins.
// - Anything else (`map`, `geo`, undeclared names) is dynamic.

mod builtins;

pub use builtins::is_builtin;

use crate::error::{Error, Result};
use crate::tree::Directive;

/// Maximum depth of `set` chains followed while folding
const MAX_FOLD_DEPTH: usize = 8;

/// Statically known value of a script segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinalValue {
    /// Value known at configuration load time
    Literal(String),
    /// Value only known while serving a request
    Dynamic,
}

impl FinalValue {
    /// The literal value, if known
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            FinalValue::Literal(value) => Some(value),
            FinalValue::Dynamic => None,
        }
    }
}

/// One segment of a compiled script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptVar {
    /// Variable name without `$`; `None` for literal fragments
    pub name: Option<String>,
    /// Value known at configuration load time
    pub final_value: FinalValue,
}

impl ScriptVar {
    fn literal(text: &str) -> Self {
        Self {
            name: None,
            final_value: FinalValue::Literal(text.to_string()),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Segment<'t> {
    Literal(&'t str),
    Variable(&'t str),
}

/// Compile `text` as seen from `scope`
///
/// `scope` is the directive the text belongs to; variable assignments are
/// looked up in its enclosing blocks.
///
/// # Errors
///
/// Returns [`Error::Script`] for a `$` without a valid variable name or an
/// unterminated `${`.
pub fn compile_script(text: &str, scope: Directive<'_>) -> Result<Vec<ScriptVar>> {
    compile_from(text, scope, &mut Vec::new())
}

fn compile_from(text: &str, scope: Directive<'_>, visiting: &mut Vec<String>) -> Result<Vec<ScriptVar>> {
    split_segments(text)?
        .into_iter()
        .map(|segment| match segment {
            Segment::Literal(fragment) => Ok(ScriptVar::literal(fragment)),
            Segment::Variable(name) => Ok(ScriptVar {
                name: Some(name.to_string()),
                final_value: variable_value(name, scope, visiting),
            }),
        })
        .collect()
}

fn split_segments(text: &str) -> Result<Vec<Segment<'_>>> {
    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'$' {
            i += 1;
            continue;
        }

        if i > literal_start {
            segments.push(Segment::Literal(&text[literal_start..i]));
        }

        let (name, end) = match bytes.get(i + 1) {
            Some(b'{') => {
                let close = text[i + 2..]
                    .find('}')
                    .ok_or_else(|| Error::script(format!("unterminated variable in \"{}\"", text)))?;
                (&text[i + 2..i + 2 + close], i + 3 + close)
            }
            // Captures are a single digit: `$10` is `$1` followed by `0`
            Some(b) if b.is_ascii_digit() => (&text[i + 1..i + 2], i + 2),
            _ => {
                let len = bytes[i + 1..]
                    .iter()
                    .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
                    .count();
                (&text[i + 1..i + 1 + len], i + 1 + len)
            }
        };

        if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
            return Err(Error::script(format!("invalid variable name in \"{}\"", text)));
        }

        segments.push(Segment::Variable(name));
        i = end;
        literal_start = end;
    }

    if literal_start < bytes.len() {
        segments.push(Segment::Literal(&text[literal_start..]));
    }

    Ok(segments)
}

fn variable_value(name: &str, scope: Directive<'_>, visiting: &mut Vec<String>) -> FinalValue {
    let is_capture = name.bytes().all(|b| b.is_ascii_digit());
    if is_builtin(name)
        || is_capture
        || visiting.len() >= MAX_FOLD_DEPTH
        || visiting.iter().any(|v| v == name)
    {
        return FinalValue::Dynamic;
    }

    let Some(assignment) = find_assignment(name, scope) else {
        return FinalValue::Dynamic;
    };
    let Some(value) = assignment.args().get(1) else {
        return FinalValue::Dynamic;
    };

    visiting.push(name.to_string());
    let folded = compile_from(value, assignment, visiting)
        .ok()
        .and_then(|vars| fold_literals(&vars));
    visiting.pop();

    folded.map_or(FinalValue::Dynamic, FinalValue::Literal)
}

/// Nearest `set $name ...;` visible from `scope`
fn find_assignment<'a>(name: &str, scope: Directive<'a>) -> Option<Directive<'a>> {
    let target = format!("${}", name);
    let matches: Vec<_> = scope
        .find_imperative_directives_in_scope("set", true)
        .into_iter()
        .filter(|d| d.first_arg() == Some(target.as_str()))
        .collect();

    let nearest_block = matches.first()?.parent()?.id();
    matches
        .into_iter()
        .filter(|d| d.parent().map(|p| p.id()) == Some(nearest_block))
        .last()
}

fn fold_literals(vars: &[ScriptVar]) -> Option<String> {
    vars.iter()
        .map(|var| var.final_value.as_literal())
        .collect::<Option<Vec<_>>>()
        .map(|parts| parts.concat())
}
