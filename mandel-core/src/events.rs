//! JSON encoding of the transition event stream.
//!
//! A UI layer that lives in another process (or language) sends one
//! [`Transition`] per line, e.g.
//!
//! ```text
//! {"type":"zoom_in","factor":2.0}
//! {"type":"set_max_iter","max_iter":10}
//! {"type":"reset"}
//! ```

use std::io::BufRead;

use crate::error::{CoreError, Result};
use crate::view::Transition;

pub fn parse_transition(json: &str) -> Result<Transition> {
    Ok(serde_json::from_str(json)?)
}

pub fn transition_json(transition: &Transition) -> serde_json::Result<String> {
    serde_json::to_string(transition)
}

pub fn transition_ndjson(transition: &Transition) -> serde_json::Result<String> {
    let mut json = transition_json(transition)?;
    json.push('\n');
    Ok(json)
}

/// Iterator over newline-delimited transitions. Blank lines are skipped.
pub struct TransitionStream<R> {
    reader: R,
    line: String,
}

impl<R: BufRead> TransitionStream<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }
}

impl<R: BufRead> Iterator for TransitionStream<R> {
    type Item = Result<Transition>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) => {
                    let trimmed = self.line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    return Some(parse_transition(trimmed));
                }
                Err(e) => return Some(Err(CoreError::from(e))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_skips_blank_lines() {
        let input = "{\"type\":\"zoom_in\",\"factor\":2.0}\n\n{\"type\":\"reset\"}\n";
        let events: Vec<Transition> = TransitionStream::new(input.as_bytes())
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(events, vec![Transition::ZoomIn { factor: 2.0 }, Transition::Reset]);
    }

    #[test]
    fn malformed_line_is_reported() {
        let input = "{\"type\":\"spin\"}\n";
        let mut stream = TransitionStream::new(input.as_bytes());
        assert!(matches!(stream.next(), Some(Err(CoreError::Json(_)))));
        assert!(stream.next().is_none());
    }

    #[test]
    fn ndjson_ends_with_newline() {
        let line = transition_ndjson(&Transition::Reset).unwrap();
        assert_eq!(line, "{\"type\":\"reset\"}\n");
        assert_eq!(parse_transition(line.trim()).unwrap(), Transition::Reset);
    }
}
