use crate::parse::{parse, Error, Piece};

/// An owned template segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Role(String),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("no value for role \"{0}\"")]
pub struct MissingRole(pub String);

/// Parsed command or file-name template.
///
/// Rendering substitutes every role with a value from a lookup fn and
/// is deterministic: the same lookup always produces the same text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    text: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse `text`, merging adjacent literal pieces.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let pieces = parse(text)?;
        let mut segments: Vec<Segment> = Vec::with_capacity(pieces.len());
        for piece in pieces {
            if let (Piece::Literal(s), Some(Segment::Literal(prev))) = (piece, segments.last_mut()) {
                prev.push_str(s);
                continue;
            }
            match piece {
                Piece::Literal(s) => segments.push(Segment::Literal(s.to_owned())),
                Piece::Role(r) => segments.push(Segment::Role(r.to_owned())),
            }
        }
        Ok(Self {
            text: text.to_owned(),
            segments,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of all roles referenced, in order of appearance (may repeat).
    pub fn roles(&self) -> impl Iterator<Item = &str> + '_ {
        self.segments.iter().filter_map(|s| match s {
            Segment::Role(r) => Some(r.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Append the rendered template to `buf`.
    /// On error, `buf` may contain a partial rendering.
    pub fn render_into<'v, F>(&self, buf: &mut String, mut lookup: F) -> Result<(), MissingRole>
    where
        F: FnMut(&str) -> Option<&'v str>,
    {
        for segment in &self.segments {
            match segment {
                Segment::Literal(s) => buf.push_str(s),
                Segment::Role(r) => {
                    let value = lookup(r).ok_or_else(|| MissingRole(r.clone()))?;
                    buf.push_str(value);
                }
            }
        }
        Ok(())
    }

    pub fn render<'v, F>(&self, lookup: F) -> Result<String, MissingRole>
    where
        F: FnMut(&str) -> Option<&'v str>,
    {
        let mut buf = String::with_capacity(self.text.len() * 2);
        self.render_into(&mut buf, lookup)?;
        Ok(buf)
    }
}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
