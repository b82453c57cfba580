// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Stream Tokenizer
//!
//! Turns line-oriented `mysqlbinlog -v` output into classified [`Event`]s.
//!
//! # Line Rules
//! - Everything before the first `# at ` line is the tool banner and is dropped
//! - `# at <offset>` closes the in-flight event and opens a new one
//! - A line containing `server id` is the in-flight event's header
//! - Any other line is appended, newline included, to the in-flight body
//!
//! # Invariants
//! - Total body bytes retained across the stream never exceed the size limit
//! - A single read never buffers more than the remaining body budget or
//!   [`MAX_HEADER_LINE_BYTES`], whichever is larger
//! - Lines inside an event must be valid UTF-8; nothing is ever substituted
//! - Events are emitted in arrival order; `Unknown` events are never emitted
//! - The stop check runs once per input line

use crate::config::{EVENT_BOUNDARY_PREFIX, HEADER_MARKER, MAX_HEADER_LINE_BYTES};
use crate::error::{ParseError, ParseResult};
use crate::event::{Event, EventKind};
use std::io::{BufRead, Read};

/// Stateless between calls: all in-flight state lives in [`Tokenizer::tokenize`].
#[derive(Clone, Copy, Debug)]
pub struct Tokenizer {
    size_limit: usize,
}

impl Tokenizer {
    pub fn new(size_limit: usize) -> Self {
        Self { size_limit }
    }

    /// Reads `reader` to the end, handing every complete event to `emit`.
    ///
    /// `should_stop` is polled before each line; returning `true` aborts with
    /// [`ParseError::Cancelled`]. Returns the number of events emitted.
    pub fn tokenize<R, S, F>(&self, mut reader: R, mut should_stop: S, mut emit: F) -> ParseResult<usize>
    where
        R: BufRead,
        S: FnMut() -> bool,
        F: FnMut(Event) -> ParseResult<()>,
    {
        // None until the first boundary marker has been seen.
        let mut in_flight: Option<Event> = None;
        let mut body_bytes = 0usize;
        let mut emitted = 0usize;
        let mut offset = 0u64;
        let mut raw = Vec::new();

        loop {
            if should_stop() {
                return Err(ParseError::Cancelled);
            }

            raw.clear();
            let line_start = offset;
            let cap = (self.size_limit - body_bytes)
                .max(MAX_HEADER_LINE_BYTES)
                .saturating_add(1);
            let read = (&mut reader).take(cap as u64).read_until(b'\n', &mut raw)?;
            if read == 0 {
                break;
            }
            offset += read as u64;

            let is_boundary = raw.starts_with(EVENT_BOUNDARY_PREFIX.as_bytes());
            if read == cap && !raw.ends_with(b"\n") {
                // Longer than anything an event may retain.
                if in_flight.is_some() && !is_boundary {
                    return Err(self.limit_exceeded());
                }
                offset += skip_line(&mut reader)? as u64;
            }

            if is_boundary {
                if let Some(done) = in_flight.replace(Event::default()) {
                    emitted += emit_complete(done, &mut emit)?;
                }
                continue;
            }

            // Banner lines are dropped undecoded.
            let Some(event) = in_flight.as_mut() else {
                continue;
            };

            let line = std::str::from_utf8(&raw).map_err(|e| ParseError::InvalidEncoding {
                offset: line_start + e.valid_up_to() as u64,
            })?;

            if line.contains(HEADER_MARKER) {
                event.kind = EventKind::from_header(line);
                event.header = line.to_string();
                continue;
            }

            body_bytes += line.len();
            if body_bytes > self.size_limit {
                return Err(self.limit_exceeded());
            }
            event.body.push_str(line);
        }

        if let Some(done) = in_flight {
            emitted += emit_complete(done, &mut emit)?;
        }

        tracing::debug!(emitted, body_bytes, "tokenized binlog stream");
        Ok(emitted)
    }

    /// Convenience form collecting every event into a vector.
    pub fn collect<R: BufRead>(&self, reader: R) -> ParseResult<Vec<Event>> {
        let mut events = Vec::new();
        self.tokenize(reader, || false, |event| {
            events.push(event);
            Ok(())
        })?;
        Ok(events)
    }

    fn limit_exceeded(&self) -> ParseError {
        ParseError::SizeLimitExceeded {
            limit: self.size_limit,
        }
    }
}

fn emit_complete<F>(event: Event, emit: &mut F) -> ParseResult<usize>
where
    F: FnMut(Event) -> ParseResult<()>,
{
    if event.kind == EventKind::Unknown {
        return Ok(0);
    }
    emit(event)?;
    Ok(1)
}

/// Consumes the rest of the current line without buffering it.
fn skip_line<R: BufRead>(reader: &mut R) -> std::io::Result<usize> {
    let mut skipped = 0;
    loop {
        let (used, done) = {
            let buf = reader.fill_buf()?;
            if buf.is_empty() {
                return Ok(skipped);
            }
            match buf.iter().position(|&b| b == b'\n') {
                Some(i) => (i + 1, true),
                None => (buf.len(), false),
            }
        };
        reader.consume(used);
        skipped += used;
        if done {
            return Ok(skipped);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    const STREAM: &str = "DELIMITER /*!*/;\n\
# at 690\n\
#221017 14:25:24 server id 1  end_log_pos 772 CRC32 0x37cb53f6 \tQuery\tthread_id=53771\texec_time=0\terror_code=0\n\
SET TIMESTAMP=1665987924/*!*/;\n\
BEGIN\n\
/*!*/;\n\
# at 772\n\
#221017 14:25:24 server id 1  end_log_pos 838 CRC32 0x449e64c7 \tTable_map: `binlog_test`.`user` mapped to number 259\n\
# at 838\n\
#221017 14:25:24 server id 1  end_log_pos 916 CRC32 0x896854fc \tWrite_rows: table id 259 flags: STMT_END_F\n\
### INSERT INTO `binlog_test`.`user`\n\
### SET\n\
###   @1=1\n\
# at 916\n\
#221017 14:25:24 server id 1  end_log_pos 947 CRC32 0xaf8e8303 \tXid = 327602\n\
COMMIT/*!*/;";

    #[test]
    fn test_empty_input() {
        let events = Tokenizer::new(1024).collect("".as_bytes()).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_banner_only() {
        let stream = "# The proper term is pseudo_replica_mode\nDELIMITER /*!*/;\nSET @@session.server id=1;\n";
        let events = Tokenizer::new(1024).collect(stream.as_bytes()).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_events_in_order_without_unknown() {
        let events = Tokenizer::new(1024).collect(STREAM.as_bytes()).unwrap();

        let kinds: Vec<_> = events.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EventKind::Query, EventKind::WriteRows, EventKind::Xid]);

        assert_eq!(
            events[0].header,
            "#221017 14:25:24 server id 1  end_log_pos 772 CRC32 0x37cb53f6 \tQuery\tthread_id=53771\texec_time=0\terror_code=0\n"
        );
        assert_eq!(events[0].body, "SET TIMESTAMP=1665987924/*!*/;\nBEGIN\n/*!*/;\n");
        assert_eq!(
            events[1].body,
            "### INSERT INTO `binlog_test`.`user`\n### SET\n###   @1=1\n"
        );
        // Final line has no terminator.
        assert_eq!(events[2].body, "COMMIT/*!*/;");
    }

    #[test]
    fn test_size_limit_exceeded() {
        let err = Tokenizer::new(16).collect(STREAM.as_bytes()).unwrap_err();
        assert!(err.is_size_limit_exceeded());
    }

    #[test]
    fn test_size_limit_counts_unknown_bodies() {
        let stream = "# at 4\n#221017 server id 1 \tTable_map: `a`.`b`\n0123456789\n0123456789\n";
        let err = Tokenizer::new(15).collect(stream.as_bytes()).unwrap_err();
        assert!(matches!(err, ParseError::SizeLimitExceeded { limit: 15 }));
    }

    #[test]
    fn test_invalid_utf8_value_rejected() {
        let mut stream = b"# at 4\n#1 server id 1  end_log_pos 90 \tDelete_rows: table id 1\n### DELETE FROM `db`.`user`\n### WHERE\n###   @1=1\n###   @2='Jos".to_vec();
        let bad_at = stream.len() as u64;
        stream.extend_from_slice(b"\xE9'\n###   @3=5\n");

        let err = Tokenizer::new(1024).collect(stream.as_slice()).unwrap_err();
        assert!(matches!(err, ParseError::InvalidEncoding { offset } if offset == bad_at));
    }

    #[test]
    fn test_invalid_utf8_in_banner_ignored() {
        let stream = b"-- caf\xE9\n# at 4\n#1 server id 1 \tXid = 1\nCOMMIT\n";
        let events = Tokenizer::new(1024).collect(&stream[..]).unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_endless_body_line_bounded() {
        let head = "# at 4\n#1 server id 1 \tWrite_rows: table id 1\n### INSERT INTO `db`.`t`\n###   @1='".as_bytes();
        let reader = std::io::BufReader::new(head.chain(std::io::repeat(b'x')));
        let err = Tokenizer::new(64).collect(reader).unwrap_err();
        assert!(matches!(err, ParseError::SizeLimitExceeded { limit: 64 }));
    }

    #[test]
    fn test_long_banner_line_skipped() {
        let stream = format!("{}\n# at 4\n#1 server id 1 \tXid = 1\nCOMMIT\n", "x".repeat(MAX_HEADER_LINE_BYTES * 3));
        let events = Tokenizer::new(8).collect(stream.as_bytes()).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].body, "COMMIT\n");
    }

    #[test]
    fn test_banner_not_counted() {
        let stream = format!("{}\n# at 4\n#1 server id 1 \tXid = 1\nCOMMIT\n", "x".repeat(4096));
        let events = Tokenizer::new(8).collect(stream.as_bytes()).unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_cancellation_polled_per_line() {
        let mut polls = 0;
        let result = Tokenizer::new(1024).tokenize(
            STREAM.as_bytes(),
            || {
                polls += 1;
                polls > 3
            },
            |_| Ok(()),
        );
        assert!(matches!(result, Err(ParseError::Cancelled)));
        assert_eq!(polls, 4);
    }

    #[test]
    fn test_emit_error_aborts() {
        let result = Tokenizer::new(1024).tokenize(STREAM.as_bytes(), || false, |_| Err(ParseError::Cancelled));
        assert!(matches!(result, Err(ParseError::Cancelled)));
    }
}
