// RustGamekit
// copyright rust_gamekit contributors 2016～2025

//! Plain text persistence of dialogs.
//!
//! One field per line, written as `<value>| <label>`. The label documents
//! the field for humans and is ignored on read: the value is everything
//! before the last `|` of the line. Fields are read back in exactly the
//! order they were written, base control fields first. Booleans are `0`/`1`,
//! colors are four space separated floats, list item payloads are JSON.

use crate::render::style::Color;
use crate::ui::{UIError, UIResult};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Default)]
pub struct FieldWriter {
    out: String,
}

impl FieldWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write<V: Display>(&mut self, value: V, label: &str) {
        // a field must stay on one line
        let value = value.to_string().replace(['\n', '\r'], " ");
        self.out.push_str(&value);
        self.out.push_str("| ");
        self.out.push_str(label);
        self.out.push('\n');
    }

    pub fn write_bool(&mut self, value: bool, label: &str) {
        self.write(if value { 1 } else { 0 }, label);
    }

    pub fn write_color(&mut self, c: Color, label: &str) {
        self.write(format!("{} {} {} {}", c.r, c.g, c.b, c.a), label);
    }

    pub fn write_json<T: Serialize>(&mut self, value: &T, label: &str) -> UIResult<()> {
        let s = serde_json::to_string(value)?;
        self.write(s, label);
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn finish(self) -> String {
        self.out
    }
}

pub struct FieldReader<'a> {
    lines: std::str::Lines<'a>,
    line: usize,
}

impl<'a> FieldReader<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            line: 0,
        }
    }

    /// Line number of the last field read, 1 based
    pub fn line(&self) -> usize {
        self.line
    }

    fn next_value(&mut self, label: &str) -> UIResult<&'a str> {
        let raw = self.lines.next().ok_or_else(|| UIError::MissingField {
            line: self.line + 1,
            label: label.to_string(),
        })?;
        self.line += 1;
        Ok(match raw.rfind('|') {
            Some(pos) => &raw[..pos],
            None => raw,
        })
    }

    pub(crate) fn invalid(&self, label: &str, value: &str) -> UIError {
        UIError::InvalidField {
            line: self.line,
            label: label.to_string(),
            value: value.to_string(),
        }
    }

    /// Raw value, surrounding spaces kept
    pub fn read_string(&mut self, label: &str) -> UIResult<String> {
        Ok(self.next_value(label)?.to_string())
    }

    pub fn read<T: FromStr>(&mut self, label: &str) -> UIResult<T> {
        let v = self.next_value(label)?.trim();
        v.parse().map_err(|_| self.invalid(label, v))
    }

    pub fn read_bool(&mut self, label: &str) -> UIResult<bool> {
        let v = self.next_value(label)?.trim();
        match v {
            "1" | "true" => Ok(true),
            "0" | "false" => Ok(false),
            _ => Err(self.invalid(label, v)),
        }
    }

    pub fn read_color(&mut self, label: &str) -> UIResult<Color> {
        let v = self.next_value(label)?.trim();
        let parts: Vec<f32> = v
            .split_whitespace()
            .map(|p| p.parse::<f32>())
            .collect::<Result<_, _>>()
            .map_err(|_| self.invalid(label, v))?;
        match parts.as_slice() {
            [r, g, b, a] => Ok(Color::new(*r, *g, *b, *a)),
            _ => Err(self.invalid(label, v)),
        }
    }

    pub fn read_json<T: DeserializeOwned>(&mut self, label: &str) -> UIResult<T> {
        let v = self.next_value(label)?;
        Ok(serde_json::from_str(v.trim())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_is_text_before_last_pipe() {
        let mut w = FieldWriter::new();
        w.write("a|b", "Control Text");
        w.write(42, "Control X");
        w.write_bool(true, "is Control Visible");
        let text = w.finish();
        assert_eq!(text.lines().nth(1), Some("42| Control X"));
        assert_eq!(text.lines().nth(2), Some("1| is Control Visible"));

        let mut r = FieldReader::new(&text);
        assert_eq!(r.read_string("text").unwrap(), "a|b");
        assert_eq!(r.read::<i32>("x").unwrap(), 42);
        assert!(r.read_bool("visible").unwrap());
        assert_eq!(r.line(), 3);
    }

    #[test]
    fn test_missing_and_invalid_fields() {
        let mut r = FieldReader::new("abc| Control X\n");
        match r.read::<i32>("Control X") {
            Err(UIError::InvalidField { line, value, .. }) => {
                assert_eq!(line, 1);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected {:?}", other),
        }
        match r.read::<i32>("Control Y") {
            Err(UIError::MissingField { line, label }) => {
                assert_eq!(line, 2);
                assert_eq!(label, "Control Y");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_color_and_json_fields() {
        let mut w = FieldWriter::new();
        w.write_color(Color::new(1.0, 0.5, 0.25, 1.0), "Control Text Color");
        w.write_json(&vec!["x|y".to_string()], "Item Data").unwrap();
        let text = w.finish();
        let mut r = FieldReader::new(&text);
        assert_eq!(r.read_color("color").unwrap(), Color::new(1.0, 0.5, 0.25, 1.0));
        assert_eq!(r.read_json::<Vec<String>>("data").unwrap(), vec!["x|y".to_string()]);

        let mut bad = FieldReader::new("1 2 3| color\n2| flag\n");
        assert!(matches!(bad.read_color("color"), Err(UIError::InvalidField { .. })));
        assert!(matches!(bad.read_bool("flag"), Err(UIError::InvalidField { .. })));
    }
}
