//! Audio decoding using symphonia.

use crate::audio::AudioAsset;
use crate::error::{Error, Result};
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Decode an audio file into planar f32 channels.
///
/// Channel layout is preserved; nothing is mixed down. The returned asset's
/// `path` is `relative_path`.
pub fn decode_audio_file(path: &Path, relative_path: &Path) -> Result<AudioAsset> {
    let file = File::open(path).map_err(|e| Error::AudioOpen {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| Error::AudioOpen {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| Error::NoAudioTracks {
            path: path.to_path_buf(),
        })?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .filter(|&sr| sr > 0)
        .ok_or_else(|| Error::AudioDecode {
            path: path.to_path_buf(),
            source: "missing sample rate".into(),
        })?;
    let channel_count = track
        .codec_params
        .channels
        .map_or(1, symphonia::core::audio::Channels::count);

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| Error::AudioDecode {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    let mut channels: Vec<Vec<f32>> = vec![Vec::new(); channel_count];
    let mut scratch: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                return Err(Error::AudioDecode {
                    path: path.to_path_buf(),
                    source: Box::new(e),
                });
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder.decode(&packet).map_err(|e| Error::AudioDecode {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

        let frames = decoded.frames();
        if frames == 0 {
            continue;
        }

        // Codec params may omit or misreport the layout; trust the first decoded packet.
        let spec_channels = decoded.spec().channels.count();
        if spec_channels != channels.len() && channels.iter().all(Vec::is_empty) {
            channels = vec![Vec::new(); spec_channels];
        }

        let needs_alloc = scratch
            .as_ref()
            .is_none_or(|buf| buf.capacity() < decoded.capacity() * spec_channels);
        if needs_alloc {
            scratch = Some(SampleBuffer::new(
                decoded.capacity() as u64,
                *decoded.spec(),
            ));
        }

        if let Some(buf) = scratch.as_mut() {
            buf.copy_planar_ref(decoded);
            append_planar(buf.samples(), frames, &mut channels);
        }
    }

    Ok(AudioAsset::new(relative_path, sample_rate, channels))
}

/// Split a planar sample block (`[ch0.., ch1.., ..]`) onto per-channel vectors.
fn append_planar(block: &[f32], frames: usize, channels: &mut [Vec<f32>]) {
    for (ch, out) in channels.iter_mut().enumerate() {
        let start = ch * frames;
        if let Some(plane) = block.get(start..start + frames) {
            out.extend_from_slice(plane);
        }
    }
}
