//! Template Renderer: a small placeholder engine for prompt and output templates.
//!
//! Supported syntax:
//! - `{{ path }}`                          substitution (`path` = `ident(.ident)*`)
//! - `{% if path %} … {% else %} … {% endif %}`
//! - `{% for name in path %} … {% endfor %}`
//!
//! The context is any `Serialize` value. Lookup is plain key/value on its JSON form,
//! so callers can pass typed context structs while templates stay untyped.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TemplateError {
    #[error("Template syntax error at byte {offset}: {message}")]
    Syntax { message: String, offset: usize },

    #[error("Template placeholder '{0}' has no value in the context")]
    MissingValue(String),

    #[error("Template loop source '{0}' is not a sequence")]
    NotIterable(String),

    #[error("Template context error: {0}")]
    Context(String),
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Text(String),
    Var(String),
    If {
        cond: String,
        then: Vec<Node>,
        otherwise: Vec<Node>,
    },
    For {
        binding: String,
        source: String,
        body: Vec<Node>,
    },
}

#[derive(Debug, PartialEq)]
enum Token<'a> {
    Text(&'a str),
    Expr(&'a str, usize),
    Tag(&'a str, usize),
}

/// A parsed template, reusable across renders.
#[derive(Debug, Clone)]
pub struct Template {
    nodes: Vec<Node>,
}

/// Parses and renders `source` against `context` in one step.
pub fn render_template<C: Serialize>(source: &str, context: &C) -> Result<String, TemplateError> {
    Template::parse(source)?.render(context)
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let tokens = tokenize(source)?;
        let mut pos = 0;
        let (nodes, terminator) = parse_block(&tokens, &mut pos)?;
        if let Some((tag, offset)) = terminator {
            return Err(TemplateError::Syntax {
                message: format!("unexpected '{{% {tag} %}}'"),
                offset,
            });
        }
        Ok(Self { nodes })
    }

    pub fn render<C: Serialize>(&self, context: &C) -> Result<String, TemplateError> {
        let root =
            serde_json::to_value(context).map_err(|e| TemplateError::Context(e.to_string()))?;
        if !root.is_object() {
            return Err(TemplateError::Context(
                "template context must serialize to an object".to_string(),
            ));
        }

        let mut scope = Scope {
            root: &root,
            locals: Vec::new(),
        };
        let mut out = String::new();
        render_nodes(&self.nodes, &mut scope, &mut out)?;
        Ok(out)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tokenizer / parser
// ────────────────────────────────────────────────────────────────────────────

fn tokenize(source: &str) -> Result<Vec<Token<'_>>, TemplateError> {
    let mut tokens = Vec::new();
    let mut rest = source;
    let mut offset = 0;

    loop {
        let next_expr = rest.find("{{");
        let next_tag = rest.find("{%");
        let (start, is_tag) = match (next_expr, next_tag) {
            (None, None) => break,
            (Some(e), None) => (e, false),
            (None, Some(t)) => (t, true),
            (Some(e), Some(t)) => (e.min(t), t < e),
        };

        if start > 0 {
            tokens.push(Token::Text(&rest[..start]));
        }

        let close = if is_tag { "%}" } else { "}}" };
        let inner_start = start + 2;
        let Some(len) = rest[inner_start..].find(close) else {
            return Err(TemplateError::Syntax {
                message: format!("unclosed '{}'", if is_tag { "{%" } else { "{{" }),
                offset: offset + start,
            });
        };

        let inner = rest[inner_start..inner_start + len].trim();
        if is_tag {
            tokens.push(Token::Tag(inner, offset + start));
        } else {
            tokens.push(Token::Expr(inner, offset + start));
        }

        let consumed = inner_start + len + 2;
        rest = &rest[consumed..];
        offset += consumed;
    }

    if !rest.is_empty() {
        tokens.push(Token::Text(rest));
    }
    Ok(tokens)
}

/// Parses nodes until EOF or a block-closing tag (`else`, `endif`, `endfor`),
/// which is returned to the caller along with its offset.
fn parse_block<'a>(
    tokens: &[Token<'a>],
    pos: &mut usize,
) -> Result<(Vec<Node>, Option<(&'a str, usize)>), TemplateError> {
    let mut nodes = Vec::new();

    while let Some(token) = tokens.get(*pos) {
        *pos += 1;
        match token {
            Token::Text(text) => nodes.push(Node::Text((*text).to_string())),
            Token::Expr(expr, offset) => nodes.push(Node::Var(parse_path(expr, *offset)?)),
            Token::Tag(tag, offset) => {
                let tag: &'a str = *tag;
                let mut words = tag.split_whitespace();
                match words.next() {
                    Some("if") => {
                        let cond = match (words.next(), words.next()) {
                            (Some(path), None) => parse_path(path, *offset)?,
                            _ => {
                                return Err(TemplateError::Syntax {
                                    message: format!("malformed if tag '{tag}'"),
                                    offset: *offset,
                                })
                            }
                        };
                        let (then, end) = parse_block(tokens, pos)?;
                        let otherwise = match end {
                            Some(("endif", _)) => Vec::new(),
                            Some(("else", _)) => {
                                let (otherwise, end) = parse_block(tokens, pos)?;
                                expect_terminator(end, "endif", *offset)?;
                                otherwise
                            }
                            other => return Err(unterminated("if", "endif", other, *offset)),
                        };
                        nodes.push(Node::If {
                            cond,
                            then,
                            otherwise,
                        });
                    }
                    Some("for") => {
                        let (binding, source) =
                            match (words.next(), words.next(), words.next(), words.next()) {
                                (Some(binding), Some("in"), Some(source), None)
                                    if is_ident(binding) =>
                                {
                                    (binding.to_string(), parse_path(source, *offset)?)
                                }
                                _ => {
                                    return Err(TemplateError::Syntax {
                                        message: format!("malformed for tag '{tag}'"),
                                        offset: *offset,
                                    })
                                }
                            };
                        let (body, end) = parse_block(tokens, pos)?;
                        expect_terminator(end, "endfor", *offset)?;
                        nodes.push(Node::For {
                            binding,
                            source,
                            body,
                        });
                    }
                    Some(word @ ("else" | "endif" | "endfor")) => {
                        return Ok((nodes, Some((word, *offset))));
                    }
                    _ => {
                        return Err(TemplateError::Syntax {
                            message: format!("unknown tag '{tag}'"),
                            offset: *offset,
                        })
                    }
                }
            }
        }
    }

    Ok((nodes, None))
}

fn expect_terminator(
    end: Option<(&str, usize)>,
    expected: &str,
    open_offset: usize,
) -> Result<(), TemplateError> {
    match end {
        Some((tag, _)) if tag == expected => Ok(()),
        other => Err(unterminated(
            if expected == "endif" { "if" } else { "for" },
            expected,
            other,
            open_offset,
        )),
    }
}

fn unterminated(
    open: &str,
    expected: &str,
    found: Option<(&str, usize)>,
    open_offset: usize,
) -> TemplateError {
    match found {
        Some((tag, offset)) => TemplateError::Syntax {
            message: format!("expected '{{% {expected} %}}' to close '{open}', found '{tag}'"),
            offset,
        },
        None => TemplateError::Syntax {
            message: format!("'{open}' is never closed with '{{% {expected} %}}'"),
            offset: open_offset,
        },
    }
}

fn parse_path(expr: &str, offset: usize) -> Result<String, TemplateError> {
    if !expr.is_empty() && expr.split('.').all(is_ident) {
        Ok(expr.to_string())
    } else {
        Err(TemplateError::Syntax {
            message: format!("invalid placeholder '{expr}'"),
            offset,
        })
    }
}

fn is_ident(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// ────────────────────────────────────────────────────────────────────────────
// Evaluation
// ────────────────────────────────────────────────────────────────────────────

struct Scope<'v> {
    root: &'v Value,
    locals: Vec<(String, &'v Value)>,
}

impl<'v> Scope<'v> {
    /// `None` means the path is absent; `Some(Value::Null)` means present but null.
    fn lookup(&self, path: &str) -> Option<&'v Value> {
        let mut segments = path.split('.');
        let head = segments.next()?;

        let mut current = self
            .locals
            .iter()
            .rev()
            .find(|(name, _)| name == head)
            .map(|(_, value)| *value)
            .or_else(|| self.root.get(head))?;

        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                // A field of null is treated as null so optional records can be dereferenced.
                Value::Null => return Some(current),
                _ => return None,
            };
        }
        Some(current)
    }
}

fn render_nodes<'v>(
    nodes: &[Node],
    scope: &mut Scope<'v>,
    out: &mut String,
) -> Result<(), TemplateError> {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Var(path) => {
                let value = scope
                    .lookup(path)
                    .ok_or_else(|| TemplateError::MissingValue(path.clone()))?;
                write_value(value, out);
            }
            Node::If {
                cond,
                then,
                otherwise,
            } => {
                let branch = if scope.lookup(cond).is_some_and(is_truthy) {
                    then
                } else {
                    otherwise
                };
                render_nodes(branch, scope, out)?;
            }
            Node::For {
                binding,
                source,
                body,
            } => {
                let items = match scope.lookup(source) {
                    None => return Err(TemplateError::MissingValue(source.clone())),
                    Some(Value::Null) => continue,
                    Some(Value::Array(items)) => items,
                    Some(_) => return Err(TemplateError::NotIterable(source.clone())),
                };
                for item in items {
                    scope.locals.push((binding.clone(), item));
                    let rendered = render_nodes(body, scope, out);
                    scope.locals.pop();
                    rendered?;
                }
            }
        }
    }
    Ok(())
}

fn write_value(value: &Value, out: &mut String) {
    match value {
        Value::Null => {}
        Value::String(s) => out.push_str(s),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(item, out);
            }
        }
        Value::Object(_) => out.push_str(&value.to_string()),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
