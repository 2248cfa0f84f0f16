//! Audio loading, rate probing, resampling and PCM encoding.

mod asset;
mod decode;
mod encode;
mod probe;
mod resample;

pub use asset::AudioAsset;
pub use decode::decode_audio_file;
pub use encode::write_wav;
pub use probe::{ContainerProbe, RateReader, WavHeaderReader, read_sample_rate};
pub use resample::{RationalRatio, resample, resample_asset};
