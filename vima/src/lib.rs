#![no_std]
extern crate alloc;

mod bitstream;
mod channel;
mod constants;
mod decoder;
mod header;
pub mod tables;

use core::result;

use thiserror::Error;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum HeaderFault {
    #[error("unsupported channel count {0}")]
    UnsupportedChannelCount(usize),
    #[error("stereo flag implies {in_band} channel(s) but {declared} were declared")]
    ChannelMismatch { in_band: usize, declared: usize },
    #[error("decoded length {length} is not a multiple of the {frame} byte frame")]
    UnalignedLength { length: usize, frame: usize },
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum VimaError {
    #[error("malformed header: {0}")]
    MalformedHeader(#[from] HeaderFault),
    #[error("truncated stream: {needed_bits} bits needed, {available_bits} available")]
    TruncatedStream { needed_bits: usize, available_bits: usize },
}

pub type Result<T> = result::Result<T, VimaError>;

pub use self::{
    bitstream::BitCursor,
    channel::{ChannelState, Symbol},
    constants::Channel,
    decoder::{decode, decode_into, pcm_to_be_bytes, pcm_to_le_bytes, ChannelSpan, DecodeReport},
    header::{BlockHeader, ChannelSeed},
};
