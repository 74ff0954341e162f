//! Byte-level line scanning over a received packet.
//!
//! The cursor operates on raw bytes rather than decoded text so the position
//! after the header block is an exact byte offset into the packet. Header
//! lines may contain multi-byte characters and the body may be arbitrary
//! binary; neither disturbs the other.

/// Forward-only cursor yielding lines terminated by `\n` or `\r\n`.
pub(crate) struct ByteCursor<'a> {
    packet: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    pub(crate) fn new(packet: &'a [u8]) -> Self {
        Self {
            packet,
            position: 0,
        }
    }

    /// Next line without its terminator, or `None` at end of input.
    ///
    /// Accepts `\n` and `\r\n` terminators; an unterminated final line is
    /// returned as-is, minus a trailing `\r` if one is present.
    pub(crate) fn read_line(&mut self) -> Option<&'a [u8]> {
        if self.position >= self.packet.len() {
            return None;
        }
        let rest = &self.packet[self.position..];
        let line = match rest.iter().position(|&byte| byte == b'\n') {
            Some(newline) => {
                self.position += newline + 1;
                &rest[..newline]
            }
            None => {
                self.position = self.packet.len();
                rest
            }
        };
        Some(strip_carriage_return(line))
    }

    /// Bytes after the last terminator consumed.
    pub(crate) fn remaining(&self) -> &'a [u8] { &self.packet[self.position..] }
}

fn strip_carriage_return(line: &[u8]) -> &[u8] {
    match line.split_last() {
        Some((b'\r', head)) => head,
        _ => line,
    }
}
