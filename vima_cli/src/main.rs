use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use rodio::{buffer::SamplesBuffer, OutputStream, Sink};

use vima::{decode, pcm_to_le_bytes, BlockHeader, Channel};

/// Decodes a single VIMA compressed block to 16-bit PCM.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// File holding the compressed block
    input: PathBuf,

    /// Decoded length in bytes
    #[arg(short, long)]
    length: usize,

    /// Channel count declared by the container (1 or 2)
    #[arg(short, long)]
    channels: Option<u8>,

    /// Byte offset of the block within the input file
    #[arg(long, default_value_t = 0)]
    offset: usize,

    /// Write raw signed 16-bit little-endian PCM here
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Play the decoded block
    #[arg(short, long)]
    play: bool,

    /// Sample rate used for playback
    #[arg(short, long, default_value_t = 22050)]
    rate: u32,
}

fn play_wave(channel: Channel, sampling_rate: u32, wave_data: &[i16]) -> anyhow::Result<()> {
    let buffer = SamplesBuffer::new(channel.count() as _, sampling_rate, wave_data);

    let (_output_stream, stream_handle) = OutputStream::try_default()?;
    let sink = Sink::try_new(&stream_handle)?;
    sink.append(buffer);
    sink.sleep_until_end();

    Ok(())
}

pub fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let file = fs::read(&args.input).with_context(|| format!("Failed to read {}", args.input.display()))?;
    let data = file.get(args.offset..).context("Offset is past the end of the file")?;

    let declared = args.channels.map(Channel::try_from).transpose()?;
    let (header, _) = BlockHeader::parse(data)?;
    log::info!("{:?} block, seeds {:?}", header.channel(), header.channel_seeds());

    let decoded = decode(data, declared, args.length)?;
    println!(
        "decoded {} samples ({} per channel)",
        decoded.len(),
        decoded.len() / header.channel().count()
    );

    if let Some(output) = &args.output {
        fs::write(output, pcm_to_le_bytes(&decoded)).with_context(|| format!("Failed to write {}", output.display()))?;
    }

    if args.play {
        play_wave(header.channel(), args.rate, &decoded)?;
    }

    Ok(())
}
