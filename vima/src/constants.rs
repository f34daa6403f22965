use crate::HeaderFault;

/// Bit 7 of the first seed's index byte.
pub const STEREO_FLAG: u8 = 0b1000_0000;

#[repr(u8)]
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Channel {
    Mono = 1,
    Stereo = 2,
}

impl Channel {
    pub fn count(self) -> usize {
        self as usize
    }

    /// Bytes per interleaved output frame.
    pub fn frame_size(self) -> usize {
        self.count() * 2
    }
}

impl TryFrom<u8> for Channel {
    type Error = HeaderFault;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Mono),
            2 => Ok(Self::Stereo),
            _ => Err(HeaderFault::UnsupportedChannelCount(value as usize)),
        }
    }
}
