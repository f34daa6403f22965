use crate::{
    bitstream::BitCursor,
    header::ChannelSeed,
    tables::{offset_table, INTERPOLATION_TABLE, MAX_INDEX, PHASE_COUNT, STEP_TABLE, WIDTH_TABLE},
    Result,
};

/// One decoded symbol, before it is applied to the accumulator.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Symbol {
    Delta(i32),
    /// Escape: the accumulator is replaced outright.
    Literal(i16),
}

/// Adaptation state of a single channel.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ChannelState {
    index: u8,
    accumulator: i16,
}

impl ChannelState {
    pub fn new(index: u8, accumulator: i16) -> Self {
        Self {
            index: index.min(MAX_INDEX),
            accumulator,
        }
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn accumulator(&self) -> i16 {
        self.accumulator
    }

    /// Reads the next symbol and adapts the index. The accumulator is left untouched.
    pub fn next_symbol(&mut self, cursor: &mut BitCursor) -> Result<Symbol> {
        let index = self.index as usize;
        let width = WIDTH_TABLE[index];
        let raw = cursor.read_bits(width as u32)?;

        let high_bit = 1u8 << (width - 1);
        let low_mask = high_bit - 1;
        let code = raw & low_mask;

        let symbol = if code == low_mask {
            Symbol::Literal(cursor.read_u16()? as i16)
        } else {
            let phase = (code as usize) << (7 - width);
            let mut delta = INTERPOLATION_TABLE[index * PHASE_COUNT + phase] as i32;
            if code != 0 {
                delta += (STEP_TABLE[index] >> (width - 1)) as i32;
            }
            if raw & high_bit != 0 {
                delta = -delta;
            }

            Symbol::Delta(delta)
        };

        // indexed by the raw value, sign bit included
        let offset = offset_table(width).and_then(|x| x.get(raw as usize)).copied().unwrap_or(0);
        self.index = i32::clamp(self.index as i32 + offset as i32, 0, MAX_INDEX as i32) as u8;

        Ok(symbol)
    }

    pub fn apply(&mut self, symbol: Symbol) -> i16 {
        self.accumulator = match symbol {
            Symbol::Literal(x) => x,
            Symbol::Delta(x) => i32::clamp(self.accumulator as i32 + x, i16::MIN as i32, i16::MAX as i32) as i16,
        };

        self.accumulator
    }

    /// Decodes the next symbol, updates the state and returns the new output sample.
    pub fn decode_symbol(&mut self, cursor: &mut BitCursor) -> Result<i16> {
        let symbol = self.next_symbol(cursor)?;

        Ok(self.apply(symbol))
    }
}

impl From<ChannelSeed> for ChannelState {
    fn from(seed: ChannelSeed) -> Self {
        Self::new(seed.initial_index, seed.initial_accumulator)
    }
}

/// Runs one channel to completion, writing a sample into each slot `out` yields.
pub(crate) fn decode_channel<'b>(state: &mut ChannelState, cursor: &mut BitCursor, out: impl Iterator<Item = &'b mut i16>) -> Result<()> {
    for sample in out {
        *sample = state.decode_symbol(cursor)?;
    }

    Ok(())
}
