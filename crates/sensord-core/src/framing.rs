//! Line framing — reassembles newline-terminated lines from arbitrary byte
//! chunks and splits them into comma-separated fields.
//!
//! Chunks arrive at whatever granularity the pipe delivers, with no line
//! alignment: a line may span several chunks and a chunk may carry several
//! lines. [`LineBuffer`] carries the trailing partial line across calls and
//! never emits a line before its terminator has been observed. The sensor
//! bridge console emits CRLF, so a trailing `\r` is stripped.

/// Stateful line reassembler. One instance per feed.
#[derive(Debug, Default)]
pub struct LineBuffer {
    partial: String,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one chunk and return every line it completes, in order.
    ///
    /// Bytes after the last terminator are buffered and prepended to the
    /// next chunk. Non-UTF-8 input is lossily converted.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.partial.push_str(&String::from_utf8_lossy(chunk));

        let mut lines = Vec::new();
        while let Some(pos) = self.partial.find('\n') {
            let mut line: String = self.partial.drain(..=pos).collect();
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
            lines.push(line);
        }
        lines
    }

    /// Whether an unterminated line is currently buffered.
    pub fn has_partial(&self) -> bool {
        !self.partial.is_empty()
    }
}

/// Split a complete line into comma-separated fields, trimming surrounding
/// whitespace from each. No quoting or escaping — fields are plain numeric
/// and boolean tokens in this feed.
pub fn split_fields(line: &str) -> Vec<String> {
    line.split(',').map(|field| field.trim().to_string()).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn whole_lines_in_one_chunk() {
        let mut buf = LineBuffer::new();
        let lines = buf.feed(b"temperature,21.5\nrssi,3,-75.5\n");
        assert_eq!(lines, vec!["temperature,21.5", "rssi,3,-75.5"]);
        assert!(!buf.has_partial());
    }

    #[test]
    fn partial_line_spans_chunks() {
        let mut buf = LineBuffer::new();
        assert!(buf.feed(b"temp").is_empty());
        assert!(buf.has_partial());
        assert_eq!(buf.feed(b"erature,5\n"), vec!["temperature,5"]);
        assert!(!buf.has_partial());
    }

    #[test]
    fn crlf_terminator_split_across_chunks() {
        let mut buf = LineBuffer::new();
        assert!(buf.feed(b"2,18.3,-60,1\r").is_empty());
        assert_eq!(buf.feed(b"\n"), vec!["2,18.3,-60,1"]);
    }

    #[test]
    fn trailing_bytes_stay_buffered() {
        let mut buf = LineBuffer::new();
        assert_eq!(buf.feed(b"temperature,20\ntempera"), vec!["temperature,20"]);
        assert_eq!(buf.feed(b"ture,21\n"), vec!["temperature,21"]);
    }

    #[test]
    fn empty_chunk_is_a_no_op() {
        let mut buf = LineBuffer::new();
        assert!(buf.feed(b"").is_empty());
        assert!(!buf.has_partial());
    }

    #[test]
    fn fields_are_trimmed() {
        assert_eq!(split_fields(" temperature , 21.5 "), vec!["temperature", "21.5"]);
    }

    #[test]
    fn empty_line_yields_one_empty_field() {
        assert_eq!(split_fields(""), vec![""]);
    }

    // Chunk boundaries must be invisible: however the input is cut up, the
    // emitted lines are the same as a single-chunk delivery.
    const CORPUS: &str = "temperature,21.5\nrssi,3,-75.5\r\n2,18.3,-60,1\ntemperature,19\ntrailing-partial";

    proptest! {
        #[test]
        fn chunking_is_transparent(mut cuts in prop::collection::vec(0..CORPUS.len(), 0..6)) {
            cuts.sort_unstable();

            let mut buf = LineBuffer::new();
            let mut lines = Vec::new();
            let mut start = 0;
            for cut in cuts.into_iter().chain(std::iter::once(CORPUS.len())) {
                lines.extend(buf.feed(CORPUS[start..cut].as_bytes()));
                start = cut;
            }

            let mut whole = LineBuffer::new();
            prop_assert_eq!(lines, whole.feed(CORPUS.as_bytes()));
        }
    }
}
