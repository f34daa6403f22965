use alloc::{vec, vec::Vec};
use core::ops::Range;

use crate::{
    bitstream::BitCursor,
    channel::{decode_channel, ChannelState},
    constants::Channel,
    header::BlockHeader,
    tables::MIN_SYMBOL_WIDTH,
    HeaderFault, Result, VimaError,
};

/// Where one channel's symbols sit inside a block.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct ChannelSpan {
    /// Bit range within the bitstream that follows the header.
    pub bits: Range<usize>,
    pub header_len: usize,
    pub final_state: ChannelState,
}

impl ChannelSpan {
    /// Block-relative byte range made up only of this channel's bits.
    pub fn byte_range(&self) -> Range<usize> {
        let start = self.header_len + self.bits.start.div_ceil(8);
        let end = self.header_len + self.bits.end / 8;

        start..end.max(start)
    }
}

#[derive(Eq, PartialEq, Clone, Debug)]
pub struct DecodeReport {
    pub channel: Channel,
    pub samples_per_channel: usize,
    pub spans: Vec<ChannelSpan>,
}

/// Decodes one compressed block into `decoded_len / 2` interleaved samples.
///
/// `declared` is the channel layout reported by the container, if any. It must agree with the block's own stereo
/// flag.
pub fn decode(data: &[u8], declared: Option<Channel>, decoded_len: usize) -> Result<Vec<i16>> {
    let (header, bitstream) = BlockHeader::parse(data)?;
    let channel = resolve_channel(&header, declared)?;
    check_length(decoded_len, channel)?;
    check_capacity(decoded_len / 2, bitstream)?;

    let mut result = vec![0; decoded_len / 2];
    run(&header, bitstream, channel, &mut result)?;

    Ok(result)
}

/// Decodes one compressed block into `out`, which receives `out.len()` interleaved samples.
///
/// On error `out` is left silent.
pub fn decode_into(data: &[u8], declared: Option<Channel>, out: &mut [i16]) -> Result<DecodeReport> {
    let result = BlockHeader::parse(data).and_then(|(header, bitstream)| {
        let channel = resolve_channel(&header, declared)?;
        check_length(out.len() * 2, channel)?;
        check_capacity(out.len(), bitstream)?;

        run(&header, bitstream, channel, out)
    });

    if result.is_err() {
        out.fill(0);
    }

    result
}

fn resolve_channel(header: &BlockHeader, declared: Option<Channel>) -> Result<Channel> {
    let in_band = header.channel();
    match declared {
        Some(x) if x != in_band => Err(HeaderFault::ChannelMismatch {
            in_band: in_band.count(),
            declared: x.count(),
        }
        .into()),
        _ => Ok(in_band),
    }
}

fn check_length(decoded_len: usize, channel: Channel) -> Result<()> {
    let frame = channel.frame_size();
    if decoded_len % frame != 0 {
        return Err(HeaderFault::UnalignedLength { length: decoded_len, frame }.into());
    }

    Ok(())
}

// every symbol takes at least MIN_SYMBOL_WIDTH bits, so longer requests fail before anything is allocated
fn check_capacity(samples: usize, bitstream: &[u8]) -> Result<()> {
    let needed_bits = samples.saturating_mul(MIN_SYMBOL_WIDTH);
    let available_bits = bitstream.len().saturating_mul(8);
    if needed_bits > available_bits {
        return Err(VimaError::TruncatedStream {
            needed_bits,
            available_bits,
        });
    }

    Ok(())
}

// channel-major: each channel consumes its whole run of symbols before the next one starts
fn run(header: &BlockHeader, bitstream: &[u8], channel: Channel, out: &mut [i16]) -> Result<DecodeReport> {
    let channels = channel.count();
    let samples_per_channel = out.len() / channels;

    let mut cursor = BitCursor::new(bitstream);
    let mut spans = Vec::with_capacity(channels);

    for (i, seed) in header.channel_seeds().iter().enumerate() {
        let start = cursor.position();
        log::trace!("channel {} starts at bit {} with {:?}", i, start, seed);

        let mut state = ChannelState::from(*seed);
        decode_channel(&mut state, &mut cursor, out.iter_mut().skip(i).step_by(channels))?;

        spans.push(ChannelSpan {
            bits: start..cursor.position(),
            header_len: header.byte_len(),
            final_state: state,
        });
    }

    log::debug!(
        "decoded {:?} block: {} samples per channel, {} of {} bits",
        channel,
        samples_per_channel,
        cursor.position(),
        cursor.available_bits()
    );

    Ok(DecodeReport {
        channel,
        samples_per_channel,
        spans,
    })
}

pub fn pcm_to_le_bytes(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|x| x.to_le_bytes()).collect()
}

pub fn pcm_to_be_bytes(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|x| x.to_be_bytes()).collect()
}
