//! Delay line.

use shared_types::AutomationRate;

use super::RenderContext;
use crate::domain::block::{AudioBlock, Channel, RENDER_QUANTUM};
use crate::domain::param::AudioParam;

/// Longest delay the node accepts, in seconds.
pub const MAX_DELAY_SECONDS: f32 = 0.2;

/// Fractional delay line with linear interpolation.
#[derive(Debug)]
pub struct DelayNode {
    delay_time: AudioParam,
    buffers: Vec<Vec<f32>>,
    write_index: usize,
    capacity: usize,
    delays: Channel,
}

impl DelayNode {
    pub fn new(sample_rate: f32) -> Self {
        // One extra quantum so a full-length delay never reads what it just wrote.
        let capacity = (MAX_DELAY_SECONDS * sample_rate).ceil() as usize + RENDER_QUANTUM + 1;
        Self {
            delay_time: AudioParam::new(0.0, AutomationRate::ARate).with_range(0.0, MAX_DELAY_SECONDS),
            buffers: Vec::new(),
            write_index: 0,
            capacity,
            delays: [0.0; RENDER_QUANTUM],
        }
    }

    pub fn delay_time_mut(&mut self) -> &mut AudioParam {
        &mut self.delay_time
    }

    pub fn process(&mut self, input: &AudioBlock, output: &mut AudioBlock, ctx: &RenderContext<'_>) {
        let channels = input.channel_count();
        output.set_channel_count(channels);
        if self.buffers.len() < channels {
            self.buffers.resize(channels, vec![0.0; self.capacity]);
        }

        self.delay_time.fill(ctx.start_frame, ctx.sample_rate, &mut self.delays);
        let cap = self.capacity as f64;

        for (ch, buffer) in self.buffers.iter_mut().enumerate().take(channels) {
            let inp = input.channel(ch);
            let out = output.channel_mut(ch);
            let mut w = self.write_index;
            for i in 0..RENDER_QUANTUM {
                buffer[w] = inp[i];

                let delay = self.delays[i] as f64 * ctx.sample_rate as f64;
                let mut read = w as f64 - delay;
                if read < 0.0 {
                    read += cap;
                }
                let k = read.floor() as usize % self.capacity;
                let frac = (read - read.floor()) as f32;
                let next = (k + 1) % self.capacity;
                out[i] = buffer[k] + (buffer[next] - buffer[k]) * frac;

                w = (w + 1) % self.capacity;
            }
        }

        self.write_index = (self.write_index + RENDER_QUANTUM) % self.capacity;
    }
}
