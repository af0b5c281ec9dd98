//! Terminal Clipboard
//!
//! Copies text via the OSC 52 escape sequence, which modern terminal
//! emulators translate into a system clipboard write. Best effort: the
//! sequence is emitted blind and terminals that ignore it simply drop
//! it, so failure here never surfaces past a log line.

use std::io::Write;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// Build the OSC 52 sequence that places `text` on the clipboard.
#[must_use]
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", BASE64.encode(text.as_bytes()))
}

/// Emit an OSC 52 clipboard write for `text`.
pub fn copy(text: &str) {
    let sequence = osc52_sequence(text);
    let mut stdout = std::io::stdout();
    if let Err(e) = stdout
        .write_all(sequence.as_bytes())
        .and_then(|()| stdout.flush())
    {
        tracing::warn!("Clipboard write failed: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sequence_shape() {
        // "hi" -> base64 "aGk="
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
    }

    #[test]
    fn test_sequence_round_trips_payload() {
        let text = "#ff8800";
        let seq = osc52_sequence(text);
        let payload = seq
            .strip_prefix("\x1b]52;c;")
            .and_then(|s| s.strip_suffix('\x07'))
            .unwrap();
        assert_eq!(BASE64.decode(payload).unwrap(), text.as_bytes());
    }
}
