use std::str::{self, FromStr};

/// Forward-only cursor over the bytes of a texture pack file.
///
/// The format interleaves whitespace-delimited ASCII tokens with
/// length-prefixed binary runs, so the cursor exposes exactly those two
/// shapes: token reads stop at whitespace, [`Reader::bytes`] returns an
/// exact count of raw bytes with no delimiter interpretation. Every
/// read returns `None` once the input runs out.
#[derive(Debug)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Skips leading whitespace and returns the next run of
    /// non-whitespace bytes.
    pub fn token(&mut self) -> Option<&'a [u8]> {
        while self.pos < self.buf.len() && self.buf[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }

        let start = self.pos;
        while self.pos < self.buf.len() && !self.buf[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }

        if self.pos > start {
            Some(&self.buf[start..self.pos])
        } else {
            None
        }
    }

    /// Reads the next token as a decimal unsigned integer.
    pub fn read_u32(&mut self) -> Option<u32> {
        parse(self.token()?)
    }

    /// Reads the next token as a decimal signed integer.
    pub fn read_i32(&mut self) -> Option<i32> {
        parse(self.token()?)
    }

    /// Consumes the single whitespace byte that separates a length
    /// token from the raw bytes it describes. Must not be skipped:
    /// raw runs may themselves start with a whitespace byte.
    pub fn skip_delimiter(&mut self) -> Option<()> {
        if self.pos < self.buf.len() {
            self.pos += 1;
            Some(())
        } else {
            None
        }
    }

    /// Returns exactly `count` raw bytes.
    pub fn bytes(&mut self, count: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(count)?;
        let run = self.buf.get(self.pos..end)?;
        self.pos = end;
        Some(run)
    }
}

fn parse<T: FromStr>(token: &[u8]) -> Option<T> {
    str::from_utf8(token).ok()?.parse().ok()
}
