// Router Dashboard - Server-Sent Events Decoder
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Incremental decoder for `text/event-stream` bodies.
//!
//! Bytes arrive in arbitrary chunks; the decoder buffers partial lines and
//! emits one [`SseMessage`] per blank-line terminated event that carried data.
//! Lines may end in LF, CRLF or a bare CR.

/// One dispatched server-sent event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SseMessage {
    /// Value of the `event:` field, empty for the default type.
    pub event: String,
    /// All `data:` lines joined with `\n`.
    pub data: String,
    /// Value of the last `id:` field seen.
    pub id: Option<String>,
}

/// Stateful decoder fed with raw body chunks.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    event: String,
    data: Vec<String>,
    last_id: Option<String>,
    /// The previous chunk ended on CR, so a leading LF belongs to it.
    skip_lf: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk and collect every event it completes.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseMessage> {
        self.buffer.extend_from_slice(chunk);
        if self.skip_lf && !self.buffer.is_empty() {
            if self.buffer[0] == b'\n' {
                self.buffer.remove(0);
            }
            self.skip_lf = false;
        }

        let mut messages = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\r' || b == b'\n') {
            let mut line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if line.pop() == Some(b'\r') {
                match self.buffer.first().copied() {
                    Some(b'\n') => {
                        self.buffer.remove(0);
                    }
                    Some(_) => {}
                    None => self.skip_lf = true,
                }
            }
            let line = String::from_utf8_lossy(&line);
            if let Some(message) = self.process_line(&line) {
                messages.push(message);
            }
        }
        messages
    }

    /// Flush a trailing event when the body ended without a blank line.
    pub fn finish(&mut self) -> Option<SseMessage> {
        self.skip_lf = false;
        if !self.buffer.is_empty() {
            let rest = std::mem::take(&mut self.buffer);
            let line = String::from_utf8_lossy(&rest).into_owned();
            if let Some(message) = self.process_line(&line) {
                return Some(message);
            }
        }
        self.dispatch()
    }

    fn process_line(&mut self, line: &str) -> Option<SseMessage> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match field {
            "data" => self.data.push(value.to_string()),
            "event" => self.event = value.to_string(),
            "id" if !value.contains('\0') => self.last_id = Some(value.to_string()),
            // retry and unknown fields
            _ => {}
        }
        None
    }

    fn dispatch(&mut self) -> Option<SseMessage> {
        let event = std::mem::take(&mut self.event);
        if self.data.is_empty() {
            return None;
        }
        let data = std::mem::take(&mut self.data).join("\n");
        Some(SseMessage {
            event,
            data,
            id: self.last_id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_of(messages: &[SseMessage]) -> Vec<&str> {
        messages.iter().map(|m| m.data.as_str()).collect()
    }

    #[test]
    fn test_single_event() {
        let mut decoder = SseDecoder::new();
        let messages = decoder.feed(b"data: {\"total\": 3}\n\n");
        assert_eq!(data_of(&messages), vec!["{\"total\": 3}"]);
    }

    #[test]
    fn test_multiline_data_joined() {
        let mut decoder = SseDecoder::new();
        let messages = decoder.feed(b"data: first\ndata: second\n\n");
        assert_eq!(data_of(&messages), vec!["first\nsecond"]);
    }

    #[test]
    fn test_comments_and_unknown_fields_ignored() {
        let mut decoder = SseDecoder::new();
        let messages = decoder.feed(b": keep-alive\nretry: 3000\nfoo: bar\n\n: ping\n\ndata: x\n\n");
        assert_eq!(data_of(&messages), vec!["x"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let mut decoder = SseDecoder::new();
        let messages = decoder.feed(b"event: log\r\nid: 7\r\ndata: a\r\n\r\n");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].event, "log");
        assert_eq!(messages[0].id.as_deref(), Some("7"));
        assert_eq!(messages[0].data, "a");
    }

    #[test]
    fn test_bare_cr_line_endings() {
        let mut decoder = SseDecoder::new();
        let messages = decoder.feed(b"event: log\rdata: a\r\rdata: b\r\r");
        assert_eq!(data_of(&messages), vec!["a", "b"]);
        assert_eq!(messages[0].event, "log");
        assert_eq!(messages[1].event, "");
    }

    #[test]
    fn test_crlf_split_between_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"data: a\r").is_empty());
        assert!(decoder.feed(b"\n").is_empty());
        let messages = decoder.feed(b"data: b\r\n\r");
        assert_eq!(data_of(&messages), vec!["a\nb"]);
        let messages = decoder.feed(b"\ndata: c\n\n");
        assert_eq!(data_of(&messages), vec!["c"]);
    }

    #[test]
    fn test_event_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"da").is_empty());
        assert!(decoder.feed(b"ta: {\"rid\":").is_empty());
        assert!(decoder.feed(b" \"r1\"}\r").is_empty());
        let messages = decoder.feed(b"\n\r\ndata: next\n\n");
        assert_eq!(data_of(&messages), vec!["{\"rid\": \"r1\"}", "next"]);
    }

    #[test]
    fn test_field_without_space_and_without_colon() {
        let mut decoder = SseDecoder::new();
        let messages = decoder.feed(b"data:tight\ndata\n\n");
        assert_eq!(data_of(&messages), vec!["tight\n"]);
    }

    #[test]
    fn test_finish_flushes_unterminated_event() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"data: tail").is_empty());
        let message = decoder.finish();
        assert_eq!(message.map(|m| m.data), Some("tail".to_string()));
        assert_eq!(decoder.finish(), None);
    }
}
