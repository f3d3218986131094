//! Output line templates.
//!
//! A template is plain text with `{field}` or `{field:spec}` placeholders.
//! Fields are `addr`, `instr` and `mnemonic`; a spec is `[0][width][x|X]`.
//! `{{` and `}}` produce literal braces.

use std::io::Write;

use disarmv4t::Line;

pub const DEFAULT_TEMPLATE: &str = "{addr:08X}  {instr:08X}  {mnemonic}";

/// Largest field width a placeholder may request.
pub const MAX_WIDTH: usize = 64;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unclosed placeholder starting at column {pos}")]
    Unclosed { pos: usize },
    #[error("unmatched '}}' at column {pos}")]
    StrayBrace { pos: usize },
    #[error("unknown field '{0}' (expected addr, instr or mnemonic)")]
    UnknownField(String),
    #[error("invalid format spec '{spec}' for field '{field}'")]
    BadSpec { field: String, spec: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Addr,
    Instr,
    Mnemonic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Radix {
    #[default]
    Decimal,
    LowerHex,
    UpperHex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Spec {
    zero: bool,
    width: usize,
    radix: Radix,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Literal(String),
    Placeholder(Field, Spec),
}

/// A parsed output template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    parts: Vec<Part>,
}

impl Default for Template {
    fn default() -> Self {
        // The built-in template is known to be well formed.
        Self::parse(DEFAULT_TEMPLATE).unwrap_or(Self { parts: Vec::new() })
    }
}

impl Template {
    pub fn parse(src: &str) -> Result<Self, TemplateError> {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut chars = src.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            let next = chars.peek().map(|&(_, n)| n);
            match c {
                '{' if next == Some('{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if next == Some('}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let body_start = pos + 1;
                    let len = src[body_start..].find('}').ok_or(TemplateError::Unclosed { pos })?;
                    let body = &src[body_start..body_start + len];
                    // Skip the body and its closing brace.
                    while chars.peek().is_some_and(|&(i, _)| i <= body_start + len) {
                        chars.next();
                    }
                    if !literal.is_empty() {
                        parts.push(Part::Literal(std::mem::take(&mut literal)));
                    }
                    let (field, spec) = parse_placeholder(body)?;
                    parts.push(Part::Placeholder(field, spec));
                }
                '}' => return Err(TemplateError::StrayBrace { pos }),
                _ => literal.push(c),
            }
        }
        if !literal.is_empty() {
            parts.push(Part::Literal(literal));
        }
        Ok(Self { parts })
    }

    /// Render one listing line, without a trailing newline.
    pub fn render(&self, line: &Line) -> String {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Placeholder(Field::Addr, spec) => out.push_str(&number(line.addr, *spec)),
                Part::Placeholder(Field::Instr, spec) => out.push_str(&number(line.raw, *spec)),
                Part::Placeholder(Field::Mnemonic, spec) => {
                    out.push_str(&format!("{:<width$}", line.mnemonic, width = spec.width));
                }
            }
        }
        out
    }
}

/// Write every line through `template`, one per output line.
pub fn write_text<W: Write>(out: &mut W, template: &Template, lines: &[Line]) -> std::io::Result<()> {
    for line in lines {
        writeln!(out, "{}", template.render(line))?;
    }
    Ok(())
}

pub fn write_json<W: Write>(out: &mut W, lines: &[Line]) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(&mut *out, lines)?;
    writeln!(out).map_err(serde_json::Error::io)
}

fn parse_placeholder(body: &str) -> Result<(Field, Spec), TemplateError> {
    let (name, spec_src) = body.split_once(':').unwrap_or((body, ""));
    let field = match name.trim() {
        "addr" => Field::Addr,
        "instr" => Field::Instr,
        "mnemonic" => Field::Mnemonic,
        other => return Err(TemplateError::UnknownField(other.to_string())),
    };
    let bad = || TemplateError::BadSpec { field: name.to_string(), spec: spec_src.to_string() };

    let (rest, radix) = match spec_src.strip_suffix('x') {
        Some(rest) => (rest, Radix::LowerHex),
        None => match spec_src.strip_suffix('X') {
            Some(rest) => (rest, Radix::UpperHex),
            None => (spec_src, Radix::Decimal),
        },
    };
    let (zero, digits) = match rest.strip_prefix('0') {
        Some(digits) => (true, digits),
        None => (false, rest),
    };
    let width: usize = if digits.is_empty() { 0 } else { digits.parse().map_err(|_| bad())? };
    if width > MAX_WIDTH {
        return Err(bad());
    }
    let spec = Spec { zero, width, radix };

    if field == Field::Mnemonic && (zero || radix != Radix::Decimal) {
        return Err(bad());
    }
    Ok((field, spec))
}

fn number(value: u32, spec: Spec) -> String {
    let digits = match spec.radix {
        Radix::Decimal => value.to_string(),
        Radix::LowerHex => format!("{value:x}"),
        Radix::UpperHex => format!("{value:X}"),
    };
    let pad = spec.width.saturating_sub(digits.len());
    let fill = if spec.zero { "0" } else { " " };
    format!("{}{digits}", fill.repeat(pad))
}
