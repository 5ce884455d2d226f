//! cpal output: pulls mono blocks from the engine and copies them to every
//! channel of the device.

use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    Device, SampleFormat, SampleRate, Stream, SupportedStreamConfig,
};
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use keyloop::{engine::Engine, MAX_BLOCK_SIZE};
use tracing::{debug, error};

pub struct Output {
    pub device: Device,
    pub config: SupportedStreamConfig,
}

impl Output {
    /// The default output device, at `preferred_rate` when it supports an
    /// f32 stream at that rate.
    pub fn default_device(preferred_rate: f64) -> EyreResult<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;

        let rate = SampleRate(preferred_rate as u32);
        let preferred = device
            .supported_output_configs()
            .wrap_err("failed to query output configs")?
            .filter(|range| range.sample_format() == SampleFormat::F32)
            .find(|range| range.min_sample_rate() <= rate && rate <= range.max_sample_rate())
            .map(|range| range.with_sample_rate(rate));

        let config = match preferred {
            Some(config) => config,
            None => {
                debug!(rate = rate.0, "preferred rate unsupported, using device default");
                device
                    .default_output_config()
                    .wrap_err("failed to fetch default output config")?
            }
        };
        Ok(Self { device, config })
    }

    pub fn sample_rate(&self) -> f64 {
        self.config.sample_rate().0 as f64
    }

    pub fn channels(&self) -> usize {
        self.config.channels() as usize
    }

    /// Move the engine onto the audio thread and begin playback.
    pub fn start(&self, mut engine: Engine) -> EyreResult<Stream> {
        let channels = self.channels();
        let mut mono = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = self.device.build_output_stream(
            &self.config.clone().into(),
            move |data: &mut [f32], _| {
                for chunk in data.chunks_mut(MAX_BLOCK_SIZE * channels) {
                    let block = &mut mono[..chunk.len() / channels];
                    engine.render(block);
                    for (frame, &sample) in chunk.chunks_mut(channels).zip(block.iter()) {
                        frame.fill(sample);
                    }
                }
            },
            |err| error!(%err, "audio stream error"),
            None,
        )?;

        stream.play().wrap_err("failed to start audio stream")?;
        Ok(stream)
    }
}

/// Halt playback before the stream is dropped.
pub fn stop(stream: Stream) -> EyreResult<()> {
    stream.pause().wrap_err("failed to stop audio stream")?;
    drop(stream);
    Ok(())
}
