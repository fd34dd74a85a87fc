//! Documentation extracted from the schema source text.
//!
//! Generated objects carry their original JSON definition as a comment.
//! [`DocSource`] looks the definition up; [`IndentScan`] finds it by
//! scanning the pretty-printed source line by line:
//!
//! ```text
//!         [
//!             "sw_interface_dump",      <- title, base indent = 12
//!             [                         <- echoed
//!                 "u16",                <- echoed
//!                 "_vl_msg_id"          <- echoed
//!             ],                        <- echoed
//!             ...
//!         ],                            <- indented less: end of object
//! ```

use std::fmt;

/// Kind of a documented object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Enum,
    Alias,
    Type,
    Union,
    Message,
    Service,
}

impl ObjectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Enum => "enum",
            ObjectKind::Alias => "alias",
            ObjectKind::Type => "type",
            ObjectKind::Union => "union",
            ObjectKind::Message => "message",
            ObjectKind::Service => "service",
        }
    }

    /// Objects written as `"name": {..}` entries rather than array elements.
    pub fn is_map_entry(self) -> bool {
        matches!(self, ObjectKind::Alias | ObjectKind::Service)
    }

    /// The literal that opens the object's definition in the source.
    pub fn title(self, name: &str) -> String {
        if self.is_map_entry() {
            format!("\"{name}\": {{")
        } else {
            format!("\"{name}\",")
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of an object's textual definition.
pub trait DocSource {
    /// Lines of the definition of `name`, empty when it cannot be found.
    fn definition(&self, kind: ObjectKind, name: &str) -> Vec<String>;
}

/// Finds definitions by title and indentation in pretty-printed JSON.
#[derive(Debug, Clone, Copy)]
pub struct IndentScan<'a> {
    text: &'a str,
}

impl<'a> IndentScan<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }
}

impl DocSource for IndentScan<'_> {
    fn definition(&self, kind: ObjectKind, name: &str) -> Vec<String> {
        let title = kind.title(name);
        let map_entry = kind.is_map_entry();

        let mut lines = Vec::new();
        let mut found = false;
        let mut indent = 0;
        let mut base = "";

        for line in self.text.split_inclusive('\n') {
            // an unterminated last line is not part of any definition
            let Some(content) = line.strip_suffix('\n') else {
                break;
            };
            let text_at = content.find(|c: char| !c.is_whitespace());

            if !found {
                let Some(at) = content.find(&title) else {
                    continue;
                };
                indent = at;
                base = &content[..at];
                if content.trim() != title {
                    continue;
                }
                found = true;
            } else {
                match text_at {
                    None => break,
                    Some(at) if at < indent => break,
                    Some(at) if map_entry && at == indent => {
                        lines.push(strip_base(content, base));
                        break;
                    }
                    Some(_) => {}
                }
            }

            lines.push(strip_base(content, base));
        }

        lines
    }
}

fn strip_base(line: &str, base: &str) -> String {
    line.strip_prefix(base).unwrap_or(line).to_string()
}

/// Render an object comment: the header line and the framed definition.
pub fn render_comment(header: &str, definition: &[String]) -> String {
    let mut code = format!("// {header}\n");

    if !definition.is_empty() {
        code.push_str("//\n");
        for line in definition {
            code.push_str(&format!("//\t{line}\n"));
        }
        code.push_str("//\n");
    }

    code
}

#[cfg(test)]
#[path = "docs/docs_tests.rs"]
mod docs_tests;
