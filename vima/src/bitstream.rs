use crate::{Result, VimaError};

/// MSB-first reader over a 16-bit sliding register.
///
/// The register always holds the next unread bits at its top, with up to 7 of its leading bits already consumed.
/// Refills may look one byte past the end of `data`; such bytes read as zero and only become an error when one of
/// their bits is actually handed out.
pub struct BitCursor<'a> {
    data: &'a [u8],
    register: u16,
    consumed: u32,
    next: usize,
    position: usize,
}

impl<'a> BitCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        let mut cursor = Self {
            data,
            register: 0,
            consumed: 0,
            next: 0,
            position: 0,
        };
        cursor.register = u16::from_be_bytes([cursor.fetch(), cursor.fetch()]);

        cursor
    }

    fn fetch(&mut self) -> u8 {
        let byte = self.data.get(self.next).copied().unwrap_or(0);
        self.next += 1;

        byte
    }

    /// Bits handed out so far.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn available_bits(&self) -> usize {
        self.data.len() * 8
    }

    /// Reads `count` bits (1 to 8), most significant first.
    pub fn read_bits(&mut self, count: u32) -> Result<u8> {
        debug_assert!((1..=8).contains(&count));

        let needed_bits = self.position + count as usize;
        if needed_bits > self.available_bits() {
            return Err(VimaError::TruncatedStream {
                needed_bits,
                available_bits: self.available_bits(),
            });
        }

        let value = (self.register << self.consumed) >> (16 - count);
        self.position = needed_bits;
        self.consumed += count;
        if self.consumed > 7 {
            self.register = (self.register << 8) | self.fetch() as u16;
            self.consumed -= 8;
        }

        Ok(value as u8)
    }

    /// Reads a big-endian 16-bit word at the current bit position, without realigning to a byte boundary.
    pub fn read_u16(&mut self) -> Result<u16> {
        let high = self.read_bits(8)?;
        let low = self.read_bits(8)?;

        Ok(u16::from_be_bytes([high, low]))
    }
}
