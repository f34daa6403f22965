use nom_derive::{NomBE, Parse};

use crate::{
    constants::{Channel, STEREO_FLAG},
    tables::MAX_INDEX,
    Result, VimaError,
};

const SEED_LEN: usize = 3;

#[derive(NomBE)]
struct RawSeed {
    index: u8,
    accumulator: i16,
}

#[derive(NomBE)]
#[nom(Complete)]
struct RawHeader {
    lead_index: u8,
    lead_accumulator: i16,
    #[nom(Cond = "(lead_index & STEREO_FLAG) != 0")]
    trail: Option<RawSeed>,
}

/// Starting state of one channel, read verbatim from the block header.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ChannelSeed {
    pub initial_index: u8,
    pub initial_accumulator: i16,
}

impl ChannelSeed {
    fn from_raw(index: u8, accumulator: i16) -> Self {
        if index > MAX_INDEX {
            log::warn!("seed index {} out of range, saturating to {}", index, MAX_INDEX);
        }

        Self {
            initial_index: index.min(MAX_INDEX),
            initial_accumulator: accumulator,
        }
    }
}

/// Per-channel seeds at the front of a compressed block.
///
/// Bit 7 of the first index byte doubles as the stereo flag. When it is set the byte holds the one's complement of the
/// first channel's index, and a second seed follows the first.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct BlockHeader {
    pub stereo_flag: bool,
    pub seeds: [ChannelSeed; 2],
}

impl BlockHeader {
    /// Parses the header, returning it together with the bitstream that follows.
    pub fn parse(data: &[u8]) -> Result<(Self, &[u8])> {
        let (rest, raw) = <RawHeader as Parse<&[u8]>>::parse(data).map_err(|_| VimaError::TruncatedStream {
            needed_bits: Self::required_len(data) * 8,
            available_bits: data.len() * 8,
        })?;

        let stereo_flag = raw.lead_index & STEREO_FLAG != 0;
        let lead_index = if stereo_flag { !raw.lead_index } else { raw.lead_index };
        let lead = ChannelSeed::from_raw(lead_index, raw.lead_accumulator);
        let trail = raw.trail.map_or(lead, |x| ChannelSeed::from_raw(x.index, x.accumulator));

        Ok((
            Self {
                stereo_flag,
                seeds: [lead, trail],
            },
            rest,
        ))
    }

    // header size implied by whatever prefix of the block is present
    fn required_len(data: &[u8]) -> usize {
        match data.first() {
            Some(x) if x & STEREO_FLAG != 0 => SEED_LEN * 2,
            _ => SEED_LEN,
        }
    }

    pub fn channel(&self) -> Channel {
        if self.stereo_flag {
            Channel::Stereo
        } else {
            Channel::Mono
        }
    }

    /// Seeds of the channels actually present.
    pub fn channel_seeds(&self) -> &[ChannelSeed] {
        &self.seeds[..self.channel().count()]
    }

    pub fn byte_len(&self) -> usize {
        SEED_LEN * self.channel().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mono_header() {
        let data = [0x3C, 0x03, 0xE8, 0xAA];
        let (header, rest) = BlockHeader::parse(&data).unwrap();

        assert!(!header.stereo_flag);
        assert_eq!(header.channel(), Channel::Mono);
        assert_eq!(header.byte_len(), 3);
        assert_eq!(
            header.channel_seeds(),
            &[ChannelSeed {
                initial_index: 60,
                initial_accumulator: 1000
            }]
        );
        assert_eq!(rest, &[0xAA]);
    }

    #[test]
    fn complements_stereo_first_index() {
        // !5 == 0xFA
        let data = [0xFA, 0xFF, 0xFE, 0x07, 0x80, 0x00];
        let (header, rest) = BlockHeader::parse(&data).unwrap();

        assert!(header.stereo_flag);
        assert_eq!(header.byte_len(), 6);
        assert_eq!(header.seeds[0].initial_index, 5);
        assert_eq!(header.seeds[0].initial_accumulator, -2);
        assert_eq!(header.seeds[1].initial_index, 7);
        assert_eq!(header.seeds[1].initial_accumulator, i16::MIN);
        assert!(rest.is_empty());
    }

    #[test]
    fn complemented_index_boundaries() {
        let (header, _) = BlockHeader::parse(&[0xFF, 0x00, 0x00, 0x00, 0x00, 0x00]).unwrap();
        assert_eq!(header.seeds[0].initial_index, 0);

        let (header, _) = BlockHeader::parse(&[0xA8, 0x00, 0x00, 0x00, 0x00, 0x00]).unwrap();
        assert_eq!(header.seeds[0].initial_index, 0x57);
    }

    #[test]
    fn saturates_out_of_range_index() {
        // !0x80 == 127
        let data = [0x80, 0x00, 0x00, 0xC8, 0x00, 0x00];
        let (header, _) = BlockHeader::parse(&data).unwrap();

        assert_eq!(header.seeds[0].initial_index, MAX_INDEX);
        assert_eq!(header.seeds[1].initial_index, MAX_INDEX);
    }

    #[test]
    fn short_header_is_truncated() {
        assert_eq!(
            BlockHeader::parse(&[0x80, 0x00, 0x00, 0x01]),
            Err(VimaError::TruncatedStream {
                needed_bits: 48,
                available_bits: 32
            })
        );
        assert!(matches!(BlockHeader::parse(&[]), Err(VimaError::TruncatedStream { needed_bits: 24, .. })));
    }
}
