//! Bounds-checked byte reading and the 12.4 fixed-point format.

use crate::error::DecodeError;

/// Sequential reader over a record buffer.
///
/// Every accessor fails with [`DecodeError::ShortBuffer`] instead of
/// panicking when the buffer runs out, carrying the record name for context.
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
    record: &'static str,
}

impl<'a> Reader<'a> {
    pub fn new(record: &'static str, buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            record,
        }
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn need(&self, n: usize) -> Result<(), DecodeError> {
        if self.remaining() < n {
            return Err(DecodeError::ShortBuffer {
                record: self.record,
                need: self.pos + n,
                got: self.buf.len(),
            });
        }
        Ok(())
    }

    pub fn u8(&mut self) -> Result<u8, DecodeError> {
        self.need(1)?;
        let v = self.buf[self.pos];
        self.pos += 1;
        Ok(v)
    }

    pub fn i8(&mut self) -> Result<i8, DecodeError> {
        Ok(self.u8()? as i8)
    }

    pub fn u16_le(&mut self) -> Result<u16, DecodeError> {
        self.need(2)?;
        let v = u16::from_le_bytes([self.buf[self.pos], self.buf[self.pos + 1]]);
        self.pos += 2;
        Ok(v)
    }

    pub fn u16_be(&mut self) -> Result<u16, DecodeError> {
        self.need(2)?;
        let v = u16::from_be_bytes([self.buf[self.pos], self.buf[self.pos + 1]]);
        self.pos += 2;
        Ok(v)
    }

    pub fn u32_le(&mut self) -> Result<u32, DecodeError> {
        self.need(4)?;
        let v = u32::from_le_bytes(self.buf[self.pos..self.pos + 4].try_into().unwrap());
        self.pos += 4;
        Ok(v)
    }

    pub fn skip(&mut self, n: usize) -> Result<(), DecodeError> {
        self.need(n)?;
        self.pos += n;
        Ok(())
    }

    /// Reads exactly `n` bytes as text.
    pub fn ascii(&mut self, n: usize) -> Result<String, DecodeError> {
        self.need(n)?;
        let s = String::from_utf8_lossy(&self.buf[self.pos..self.pos + n]).into_owned();
        self.pos += n;
        Ok(s)
    }

    /// Reads bytes up to (not including) the next NUL, then skips the NUL.
    pub fn cstr(&mut self) -> Result<String, DecodeError> {
        let start = self.pos;
        while self.pos < self.buf.len() && self.buf[self.pos] != 0 {
            self.pos += 1;
        }
        if self.pos >= self.buf.len() {
            return Err(DecodeError::UnterminatedString {
                record: self.record,
            });
        }
        let s = String::from_utf8_lossy(&self.buf[start..self.pos]).into_owned();
        self.pos += 1;
        Ok(s)
    }
}

/// Decodes the 16-bit 12.4 fixed-point format used for focal lengths.
pub fn fp12_4_decode(raw: u16) -> f32 {
    f32::from(raw >> 4) + f32::from(raw & 0x0F) / 16.0
}

/// Encodes into 12.4 fixed point, clamping to the representable range.
pub fn fp12_4_encode(value: f32) -> u16 {
    let clamped = value.clamp(0.0, 4095.9375);
    (clamped * 16.0 + 0.5) as u16
}
