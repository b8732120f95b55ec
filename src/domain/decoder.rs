// Line decoder - turns a raw byte stream into numeric samples, one per line
use bytes::BytesMut;

const LINE_TERMINATOR: u8 = b'\n';

/// Splits an unbounded byte stream on `\n` and parses each trimmed line as an
/// `f64`. Lines that do not parse (or parse to NaN/inf) are dropped and counted.
/// A trailing partial line stays buffered until the next chunk arrives.
#[derive(Debug)]
pub struct LineSampleDecoder {
    buffer: BytesMut,
    max_line_length: usize,
    discarding: bool,
    dropped: u64,
}

impl LineSampleDecoder {
    pub fn new(max_line_length: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(max_line_length.min(4096)),
            max_line_length,
            discarding: false,
            dropped: 0,
        }
    }

    /// Append a chunk to the partial-line buffer without decoding it.
    pub fn push(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);
    }

    /// Feed a chunk and lazily yield the values of every complete line in it.
    /// Lines left unread when the iterator is dropped are yielded by the next call.
    pub fn decode<'a>(&'a mut self, chunk: &[u8]) -> DecodedValues<'a> {
        self.push(chunk);
        DecodedValues { decoder: self }
    }

    /// Pop the next valid value from the buffered complete lines.
    pub fn next_value(&mut self) -> Option<f64> {
        loop {
            let Some(pos) = self.buffer.iter().position(|b| *b == LINE_TERMINATOR) else {
                self.guard_partial_line();
                return None;
            };

            let line = self.buffer.split_to(pos + 1);
            if self.discarding {
                // Tail of a line that already overflowed the buffer
                self.discarding = false;
                continue;
            }
            if pos > self.max_line_length {
                self.drop_line("line too long");
                continue;
            }

            match parse_line(&line[..pos]) {
                Line::Value(value) => return Some(value),
                Line::Blank => continue,
                Line::Malformed => self.drop_line("not a number"),
            }
        }
    }

    /// Number of lines dropped since construction or the last reset.
    pub fn dropped_lines(&self) -> u64 {
        self.dropped
    }

    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Restart counting mid-stream. A buffered partial line belongs to a line
    /// that is still arriving, so its tail is skipped up to the next terminator.
    pub fn reset(&mut self) {
        self.discarding = self.discarding || !self.buffer.is_empty();
        self.buffer.clear();
        self.dropped = 0;
    }

    /// Forget all buffered bytes, for when the stream itself has ended.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.discarding = false;
        self.dropped = 0;
    }

    fn guard_partial_line(&mut self) {
        if self.buffer.len() <= self.max_line_length {
            return;
        }
        if !self.discarding {
            self.drop_line("partial line exceeds buffer");
            self.discarding = true;
        }
        self.buffer.clear();
    }

    fn drop_line(&mut self, reason: &str) {
        self.dropped += 1;
        tracing::debug!("Dropping telemetry line ({}), {} dropped so far", reason, self.dropped);
    }
}

pub struct DecodedValues<'a> {
    decoder: &'a mut LineSampleDecoder,
}

impl Iterator for DecodedValues<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        self.decoder.next_value()
    }
}

enum Line {
    Value(f64),
    Blank,
    Malformed,
}

fn parse_line(raw: &[u8]) -> Line {
    let Ok(text) = std::str::from_utf8(raw) else {
        return Line::Malformed;
    };
    let text = text.trim();
    if text.is_empty() {
        return Line::Blank;
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Line::Value(value),
        _ => Line::Malformed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(decoder: &mut LineSampleDecoder, chunk: &[u8]) -> Vec<f64> {
        decoder.decode(chunk).collect()
    }

    #[test]
    fn test_decodes_multiple_lines_in_order() {
        let mut decoder = LineSampleDecoder::new(1024);
        let values = decode_all(&mut decoder, b"1\n2.5\n-3\n");
        assert_eq!(values, vec![1.0, 2.5, -3.0]);
        assert_eq!(decoder.buffered_len(), 0);
    }

    #[test]
    fn test_buffers_partial_line_across_chunks() {
        let mut decoder = LineSampleDecoder::new(1024);
        assert!(decode_all(&mut decoder, b"12").is_empty());
        assert!(decode_all(&mut decoder, b"").is_empty());
        assert_eq!(decode_all(&mut decoder, b".75\n4"), vec![12.75]);
        assert_eq!(decode_all(&mut decoder, b"2\n"), vec![42.0]);
    }

    #[test]
    fn test_trims_whitespace_and_carriage_returns() {
        let mut decoder = LineSampleDecoder::new(1024);
        assert_eq!(decode_all(&mut decoder, b"  7.25 \r\n\t8\r\n"), vec![7.25, 8.0]);
    }

    #[test]
    fn test_drops_malformed_lines_silently() {
        let mut decoder = LineSampleDecoder::new(1024);
        assert_eq!(decode_all(&mut decoder, b"abc\n3.5\n"), vec![3.5]);
        assert_eq!(decoder.dropped_lines(), 1);
    }

    #[test]
    fn test_rejects_non_finite_and_invalid_utf8() {
        let mut decoder = LineSampleDecoder::new(1024);
        let values = decode_all(&mut decoder, b"NaN\ninf\n\xff\xfe\n5\n");
        assert_eq!(values, vec![5.0]);
        assert_eq!(decoder.dropped_lines(), 3);
    }

    #[test]
    fn test_blank_lines_are_not_counted() {
        let mut decoder = LineSampleDecoder::new(1024);
        assert_eq!(decode_all(&mut decoder, b"\n\r\n1\n"), vec![1.0]);
        assert_eq!(decoder.dropped_lines(), 0);
    }

    #[test]
    fn test_overlong_partial_line_is_discarded() {
        let mut decoder = LineSampleDecoder::new(8);
        assert!(decode_all(&mut decoder, b"1234567890").is_empty());
        assert_eq!(decoder.buffered_len(), 0);
        assert!(decode_all(&mut decoder, b"123").is_empty());
        // The rest of the overlong line is skipped, the following one survives
        assert_eq!(decode_all(&mut decoder, b"45\n6\n"), vec![6.0]);
        assert_eq!(decoder.dropped_lines(), 1);
    }

    #[test]
    fn test_overlong_complete_line_is_dropped() {
        let mut decoder = LineSampleDecoder::new(4);
        assert_eq!(decode_all(&mut decoder, b"1.000000\n2\n"), vec![2.0]);
        assert_eq!(decoder.dropped_lines(), 1);
    }

    #[test]
    fn test_unread_values_survive_to_next_call() {
        let mut decoder = LineSampleDecoder::new(1024);
        let first = decoder.decode(b"1\n2\n3\n").next();
        assert_eq!(first, Some(1.0));
        assert_eq!(decode_all(&mut decoder, b"4\n"), vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_reset_mid_line_skips_rest_of_line() {
        let mut decoder = LineSampleDecoder::new(1024);
        decode_all(&mut decoder, b"x\n12");
        decoder.reset();
        assert_eq!(decoder.dropped_lines(), 0);
        assert!(decode_all(&mut decoder, b"3").is_empty());
        assert_eq!(decode_all(&mut decoder, b"\n4\n"), vec![4.0]);
        assert_eq!(decoder.dropped_lines(), 0);
    }

    #[test]
    fn test_reset_on_line_boundary_loses_nothing() {
        let mut decoder = LineSampleDecoder::new(1024);
        decode_all(&mut decoder, b"12\n");
        decoder.reset();
        assert_eq!(decode_all(&mut decoder, b"3\n"), vec![3.0]);
    }

    #[test]
    fn test_clear_forgets_partial_line() {
        let mut decoder = LineSampleDecoder::new(1024);
        decode_all(&mut decoder, b"x\n12");
        decoder.clear();
        assert_eq!(decoder.dropped_lines(), 0);
        assert_eq!(decode_all(&mut decoder, b"3\n"), vec![3.0]);
    }
}
