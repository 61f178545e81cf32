//! Content stream walking: text-showing operators to positioned spans, and
//! positioned spans to visual lines.

use std::collections::HashMap;

use lopdf::content::Operation;
use lopdf::Object;

use crate::model::{RawSpan, SpanLine, DEFAULT_FONT_SIZE, FLAG_BOLD, FLAG_ITALIC};

/// TJ adjustments beyond this (thousandths of text space) read as a word gap.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Spans whose baselines differ by less than this fraction of the font size share a line.
const LINE_Y_TOLERANCE: f32 = 0.3;

/// A shown string with its baseline origin and effective size.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedSpan {
    /// Decoded text
    pub text: String,
    /// X of the text origin in user space
    pub x: f32,
    /// Baseline Y in user space (grows upward)
    pub y: f32,
    /// Font size after the text matrix scale
    pub font_size: f32,
    /// Base font name (e.g., "Helvetica-BoldOblique")
    pub base_font: String,
}

impl PositionedSpan {
    /// Wire form with style bits derived from the font name.
    pub fn to_raw(&self) -> RawSpan {
        RawSpan::new(self.text.clone(), self.font_size).with_flags(style_flags(&self.base_font))
    }
}

/// Style bits implied by a base font name.
pub fn style_flags(base_font: &str) -> u32 {
    let name = base_font.to_lowercase();
    let mut flags = 0;
    if name.contains("bold") || name.contains("black") || name.contains("heavy") {
        flags |= FLAG_BOLD;
    }
    if name.contains("italic") || name.contains("oblique") {
        flags |= FLAG_ITALIC;
    }
    flags
}

#[derive(Debug, Clone, Copy)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn translate(self, tx: f32, ty: f32) -> Matrix {
        Matrix {
            e: tx * self.a + ty * self.c + self.e,
            f: tx * self.b + ty * self.d + self.f,
            ..self
        }
    }

    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

struct TextState {
    font_key: Vec<u8>,
    font_size: f32,
    leading: f32,
    matrix: Matrix,
    line_matrix: Matrix,
    in_text: bool,
}

impl TextState {
    fn new() -> Self {
        Self {
            font_key: Vec::new(),
            font_size: DEFAULT_FONT_SIZE,
            leading: 0.0,
            matrix: Matrix::IDENTITY,
            line_matrix: Matrix::IDENTITY,
            in_text: false,
        }
    }

    fn move_line(&mut self, tx: f32, ty: f32) {
        self.line_matrix = self.line_matrix.translate(tx, ty);
        self.matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        let leading = if self.leading != 0.0 {
            self.leading
        } else {
            self.font_size * 1.2
        };
        self.move_line(0.0, -leading);
    }

    /// Rendered size in points. Negative `Tf` sizes mirror glyphs but keep
    /// their magnitude.
    fn effective_size(&self) -> f32 {
        let size = (self.font_size * self.matrix.vertical_scale()).abs();
        if size.is_finite() && size > 0.0 {
            size
        } else {
            self.font_size.abs()
        }
    }
}

/// Walk decoded operations and collect every non-blank shown string.
///
/// `decode` turns string bytes into text for a font resource name;
/// `base_fonts` maps resource names to base font names.
pub fn walk_operations<F>(
    operations: &[Operation],
    base_fonts: &HashMap<Vec<u8>, String>,
    decode: F,
) -> Vec<PositionedSpan>
where
    F: Fn(&[u8], &[u8]) -> String,
{
    let mut spans = Vec::new();
    let mut state = TextState::new();

    for op in operations {
        let operands = &op.operands;
        let shown = match op.operator.as_str() {
            "BT" => {
                state.in_text = true;
                state.matrix = Matrix::IDENTITY;
                state.line_matrix = Matrix::IDENTITY;
                None
            }
            "ET" => {
                state.in_text = false;
                None
            }
            "Tf" => {
                if let Some(Object::Name(name)) = operands.first() {
                    state.font_key = name.clone();
                }
                if let Some(size) = operands.get(1).and_then(number) {
                    state.font_size = size;
                }
                None
            }
            "TL" => {
                if let Some(leading) = operands.first().and_then(number) {
                    state.leading = leading;
                }
                None
            }
            "Td" | "TD" => {
                let tx = operands.first().and_then(number).unwrap_or(0.0);
                let ty = operands.get(1).and_then(number).unwrap_or(0.0);
                if op.operator == "TD" {
                    state.leading = -ty;
                }
                state.move_line(tx, ty);
                None
            }
            "Tm" => {
                if operands.len() >= 6 {
                    let v: Vec<f32> = operands.iter().take(6).map(|o| number(o).unwrap_or(0.0)).collect();
                    state.line_matrix = Matrix {
                        a: v[0],
                        b: v[1],
                        c: v[2],
                        d: v[3],
                        e: v[4],
                        f: v[5],
                    };
                    state.matrix = state.line_matrix;
                }
                None
            }
            "T*" => {
                state.next_line();
                None
            }
            "Tj" => operands.first().map(|o| show_string(o, &state.font_key, &decode)),
            "TJ" => operands.first().map(|o| show_array(o, &state.font_key, &decode)),
            "'" => {
                state.next_line();
                operands.first().map(|o| show_string(o, &state.font_key, &decode))
            }
            "\"" => {
                state.next_line();
                operands.get(2).map(|o| show_string(o, &state.font_key, &decode))
            }
            _ => None,
        };

        if let Some(text) = shown {
            if state.in_text && !text.trim().is_empty() {
                spans.push(PositionedSpan {
                    text,
                    x: state.matrix.e,
                    y: state.matrix.f,
                    font_size: state.effective_size(),
                    base_font: base_fonts
                        .get(&state.font_key)
                        .cloned()
                        .unwrap_or_else(|| String::from_utf8_lossy(&state.font_key).into_owned()),
                });
            }
        }
    }

    spans
}

fn show_string<F>(obj: &Object, font_key: &[u8], decode: &F) -> String
where
    F: Fn(&[u8], &[u8]) -> String,
{
    match obj {
        Object::String(bytes, _) => decode(font_key, bytes),
        _ => String::new(),
    }
}

fn show_array<F>(obj: &Object, font_key: &[u8], decode: &F) -> String
where
    F: Fn(&[u8], &[u8]) -> String,
{
    let Object::Array(items) = obj else {
        return String::new();
    };

    let mut combined = String::new();
    for item in items {
        match item {
            Object::String(bytes, _) => combined.push_str(&decode(font_key, bytes)),
            other => {
                // Negative adjustments move the next glyph right.
                let gap = number(other).map(|n| -n).unwrap_or(0.0);
                if gap > TJ_SPACE_THRESHOLD && !combined.is_empty() && !combined.ends_with(' ') {
                    combined.push(' ');
                }
            }
        }
    }
    combined
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Group spans into visual lines, top to bottom then left to right.
pub fn group_into_lines(mut spans: Vec<PositionedSpan>) -> Vec<SpanLine> {
    spans.sort_by(|a, b| b.y.total_cmp(&a.y).then_with(|| a.x.total_cmp(&b.x)));

    let mut lines: Vec<Vec<PositionedSpan>> = Vec::new();
    let mut line_y: Option<f32> = None;

    for span in spans {
        let tolerance = span.font_size * LINE_Y_TOLERANCE;
        match (line_y, lines.last_mut()) {
            (Some(y), Some(current)) if (span.y - y).abs() <= tolerance => current.push(span),
            _ => {
                line_y = Some(span.y);
                lines.push(vec![span]);
            }
        }
    }

    lines
        .into_iter()
        .map(|mut line| {
            line.sort_by(|a, b| a.x.total_cmp(&b.x));
            SpanLine::new(line.iter().map(PositionedSpan::to_raw).collect())
        })
        .collect()
}
