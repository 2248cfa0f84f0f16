//! Sample-rate conversion.
//!
//! The default path is rational polyphase resampling: the rate ratio is
//! reduced to lowest terms `up / down`, the signal is conceptually
//! upsampled by `up`, low-pass filtered with a Kaiser-windowed sinc, and
//! decimated by `down`. Only the filter taps that touch non-zero upsampled
//! samples are evaluated. An FFT-based path via rubato is kept as an
//! alternative.

use crate::audio::AudioAsset;
use crate::config::ResampleMethod;
use crate::constants::{FFT_CHUNK_SIZE, polyphase};
use crate::error::{Error, Result};
use audioadapter_buffers::direct::SequentialSlice;
use rubato::{Fft, FixedSync, Resampler};
use std::f64::consts::PI;

/// A resampling ratio `up / down` in lowest terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RationalRatio {
    /// Upsampling factor, `to_rate / gcd`.
    pub up: u32,
    /// Downsampling factor, `from_rate / gcd`.
    pub down: u32,
}

impl RationalRatio {
    /// Reduce `to_rate / from_rate` to lowest terms.
    pub fn new(from_rate: u32, to_rate: u32) -> Result<Self> {
        if from_rate == 0 {
            return Err(Error::InvalidSampleRate { value: from_rate });
        }
        if to_rate == 0 {
            return Err(Error::InvalidSampleRate { value: to_rate });
        }
        let g = gcd(from_rate, to_rate);
        Ok(Self {
            up: to_rate / g,
            down: from_rate / g,
        })
    }

    /// True when the ratio is 1/1.
    pub fn is_identity(self) -> bool {
        self.up == 1 && self.down == 1
    }

    /// Output length for `input_len` input samples: `ceil(input_len * up / down)`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn output_len(self, input_len: usize) -> usize {
        let num = input_len as u128 * u128::from(self.up);
        num.div_ceil(u128::from(self.down)) as usize
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Anti-aliasing FIR filter for one rational ratio.
#[derive(Debug, Clone)]
pub(crate) struct PolyphaseFilter {
    ratio: RationalRatio,
    coeffs: Vec<f64>,
    half_len: usize,
}

impl PolyphaseFilter {
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn new(ratio: RationalRatio) -> Self {
        let max_rate = ratio.up.max(ratio.down) as usize;
        let half_len = polyphase::HALF_LEN_FACTOR * max_rate;
        let taps = 2 * half_len + 1;
        // Cutoff relative to the upsampled Nyquist frequency.
        let cutoff = 1.0 / max_rate as f64;
        let i0_beta = bessel_i0(polyphase::KAISER_BETA);
        let span = (taps - 1) as f64;

        let mut coeffs: Vec<f64> = (0..taps)
            .map(|n| {
                let offset = n as f64 - half_len as f64;
                let x = 2.0 * n as f64 / span - 1.0;
                let window =
                    bessel_i0(polyphase::KAISER_BETA * (1.0 - x * x).max(0.0).sqrt()) / i0_beta;
                cutoff * sinc(cutoff * offset) * window
            })
            .collect();

        // Unity DC gain after zero-stuffing by `up`.
        let sum: f64 = coeffs.iter().sum();
        let gain = f64::from(ratio.up) / sum;
        for c in &mut coeffs {
            *c *= gain;
        }

        Self {
            ratio,
            coeffs,
            half_len,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn apply(&self, input: &[f32]) -> Vec<f32> {
        let up = self.ratio.up as usize;
        let down = self.ratio.down as usize;
        let out_len = self.ratio.output_len(input.len());
        let last_tap = self.coeffs.len() - 1;
        let last_input = input.len().saturating_sub(1);

        let mut output = Vec::with_capacity(out_len);
        for m in 0..out_len {
            // Position of output sample m on the upsampled grid, shifted by the filter delay.
            let center = m * down + self.half_len;
            let k_min = center.saturating_sub(last_tap).div_ceil(up);
            let k_max = (center / up).min(last_input);

            let mut acc = 0.0f64;
            if k_min <= k_max {
                for k in k_min..=k_max {
                    acc += f64::from(input[k]) * self.coeffs[center - k * up];
                }
            }
            output.push(acc as f32);
        }
        output
    }
}

fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}

/// Zeroth-order modified Bessel function of the first kind (power series).
fn bessel_i0(x: f64) -> f64 {
    let half = x / 2.0;
    let mut term = 1.0;
    let mut sum = 1.0;
    let mut k = 1.0;
    while term > sum * 1e-12 {
        term *= (half / k) * (half / k);
        sum += term;
        k += 1.0;
    }
    sum
}

/// Resample one channel to the target sample rate.
///
/// Returns the input unchanged if already at the target rate.
pub fn resample(
    samples: Vec<f32>,
    from_rate: u32,
    to_rate: u32,
    method: ResampleMethod,
) -> Result<Vec<f32>> {
    if from_rate == to_rate {
        return Ok(samples);
    }
    let ratio = RationalRatio::new(from_rate, to_rate)?;
    match method {
        ResampleMethod::Polyphase => Ok(PolyphaseFilter::new(ratio).apply(&samples)),
        ResampleMethod::Fft => resample_fft(&samples, from_rate, to_rate, ratio),
    }
}

/// Resample every channel of an asset to `to_rate`.
///
/// Returns the asset untouched if it is already at `to_rate`.
pub fn resample_asset(
    asset: AudioAsset,
    to_rate: u32,
    method: ResampleMethod,
) -> Result<AudioAsset> {
    if asset.sample_rate == to_rate {
        return Ok(asset);
    }
    let ratio = RationalRatio::new(asset.sample_rate, to_rate)?;

    let channels = match method {
        ResampleMethod::Polyphase => {
            let filter = PolyphaseFilter::new(ratio);
            asset.channels.iter().map(|ch| filter.apply(ch)).collect()
        }
        ResampleMethod::Fft => asset
            .channels
            .iter()
            .map(|ch| resample_fft(ch, asset.sample_rate, to_rate, ratio))
            .collect::<Result<Vec<_>>>()?,
    };

    Ok(AudioAsset {
        path: asset.path,
        sample_rate: to_rate,
        channels,
    })
}

fn resample_fft(
    samples: &[f32],
    from_rate: u32,
    to_rate: u32,
    ratio: RationalRatio,
) -> Result<Vec<f32>> {
    let sub_chunks = 1;
    let channels = 1;

    let mut resampler = Fft::<f32>::new(
        from_rate as usize,
        to_rate as usize,
        FFT_CHUNK_SIZE,
        sub_chunks,
        channels,
        FixedSync::Both,
    )
    .map_err(|e| Error::Resample {
        reason: e.to_string(),
    })?;

    let input_frames_needed = resampler.input_frames_next();
    let expected_len = ratio.output_len(samples.len());
    let mut output = Vec::with_capacity(expected_len + FFT_CHUNK_SIZE);

    let mut pos = 0;
    while pos < samples.len() {
        let end = (pos + input_frames_needed).min(samples.len());
        let mut chunk = samples[pos..end].to_vec();
        // Zero-pad the final partial chunk
        chunk.resize(input_frames_needed, 0.0);

        let input_adapter =
            SequentialSlice::new(&chunk, channels, input_frames_needed).map_err(|e| {
                Error::Resample {
                    reason: format!("failed to create input adapter: {e}"),
                }
            })?;

        let resampled =
            resampler
                .process(&input_adapter, 0, None)
                .map_err(|e| Error::Resample {
                    reason: e.to_string(),
                })?;

        output.extend_from_slice(&resampled.take_data());
        pos = end;
    }

    output.resize(expected_len, 0.0);
    Ok(output)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::cast_precision_loss)]
mod tests {
    use super::*;

    fn sine(len: usize, freq: f32, rate: f32) -> Vec<f32> {
        (0..len)
            .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / rate).sin() * 0.5)
            .collect()
    }

    #[test]
    fn test_ratio_lowest_terms() {
        let pairs = [
            (44100, 22050, 1, 2),
            (48000, 22050, 147, 320),
            (16000, 22050, 441, 320),
            (22050, 44100, 2, 1),
            (8000, 12000, 3, 2),
        ];
        for (from, to, up, down) in pairs {
            let ratio = RationalRatio::new(from, to).unwrap();
            assert_eq!(ratio, RationalRatio { up, down }, "{from} -> {to}");
            assert_eq!(gcd(ratio.up, ratio.down), 1);
        }
    }

    #[test]
    fn test_ratio_identity() {
        let ratio = RationalRatio::new(22050, 22050).unwrap();
        assert!(ratio.is_identity());
    }

    #[test]
    fn test_ratio_rejects_zero() {
        assert!(RationalRatio::new(0, 22050).is_err());
        assert!(RationalRatio::new(22050, 0).is_err());
    }

    #[test]
    fn test_output_len() {
        let ratio = RationalRatio::new(44100, 22050).unwrap();
        assert_eq!(ratio.output_len(100), 50);
        assert_eq!(ratio.output_len(101), 51);
        assert_eq!(ratio.output_len(0), 0);
    }

    #[test]
    fn test_resample_same_rate_returns_input() {
        let samples = vec![0.1, 0.2, 0.3, 0.4, 0.5];
        for method in [ResampleMethod::Polyphase, ResampleMethod::Fft] {
            let result = resample(samples.clone(), 48000, 48000, method).unwrap();
            assert_eq!(result, samples);
        }
    }

    #[test]
    fn test_polyphase_downsample_length() {
        let samples = sine(44100, 440.0, 44100.0);
        let output = resample(samples, 44100, 22050, ResampleMethod::Polyphase).unwrap();
        assert_eq!(output.len(), 22050);
    }

    #[test]
    fn test_polyphase_upsample_length() {
        let samples = sine(16000, 440.0, 16000.0);
        let output = resample(samples, 16000, 22050, ResampleMethod::Polyphase).unwrap();
        assert_eq!(output.len(), 22050);
    }

    #[test]
    fn test_polyphase_preserves_dc() {
        let samples = vec![0.5f32; 4800];
        let output = resample(samples, 48000, 22050, ResampleMethod::Polyphase).unwrap();
        // Edges see a partial filter; check the steady-state middle.
        let mid = &output[output.len() / 4..output.len() * 3 / 4];
        for &s in mid {
            assert!((s - 0.5).abs() < 0.01, "got {s}");
        }
    }

    #[test]
    fn test_polyphase_preserves_tone_amplitude() {
        let samples = sine(44100, 1000.0, 44100.0);
        let output = resample(samples, 44100, 22050, ResampleMethod::Polyphase).unwrap();
        let mid = &output[2000..20000];
        let peak = mid.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!((peak - 0.5).abs() < 0.02, "peak {peak}");
    }

    #[test]
    fn test_polyphase_removes_content_above_new_nyquist() {
        // 15 kHz cannot be represented at 22050 Hz
        let samples = sine(44100, 15000.0, 44100.0);
        let output = resample(samples, 44100, 22050, ResampleMethod::Polyphase).unwrap();
        let mid = &output[2000..20000];
        let peak = mid.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(peak < 0.05, "peak {peak}");
    }

    #[test]
    fn test_fft_output_length_matches_ratio() {
        let samples = sine(48000, 440.0, 48000.0);
        let output = resample(samples, 48000, 32000, ResampleMethod::Fft).unwrap();
        assert_eq!(output.len(), 32000);
    }

    #[test]
    fn test_resample_asset_preserves_channels() {
        let asset = AudioAsset::new(
            "a.wav",
            44100,
            vec![sine(4410, 440.0, 44100.0), sine(4410, 880.0, 44100.0)],
        );
        let out = resample_asset(asset, 22050, ResampleMethod::Polyphase).unwrap();
        assert_eq!(out.sample_rate, 22050);
        assert_eq!(out.channel_count(), 2);
        assert_eq!(out.frames(), 2205);
    }

    #[test]
    fn test_resample_asset_identity() {
        let asset = AudioAsset::new("a.wav", 22050, vec![vec![0.25; 10]]);
        let out = resample_asset(asset.clone(), 22050, ResampleMethod::Polyphase).unwrap();
        assert_eq!(out, asset);
    }
}
