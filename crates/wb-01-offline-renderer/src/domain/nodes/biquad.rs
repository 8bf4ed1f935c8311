//! Lowpass biquad filter.

use shared_types::AutomationRate;

use super::RenderContext;
use crate::domain::block::{AudioBlock, Channel, RENDER_QUANTUM};
use crate::domain::param::AudioParam;

const DEFAULT_FREQUENCY: f32 = 350.0;

// Resonance beyond this makes the filter ring without bound.
const MAX_Q_DB: f32 = 40.0;

#[derive(Debug, Clone, Copy, Default)]
struct Coefficients {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
}

impl Coefficients {
    /// Lowpass with resonance `q_db` (dB) at `frequency` Hz, detuned by `detune` cents.
    fn lowpass(frequency: f32, q_db: f32, detune: f32, sample_rate: f32) -> Self {
        let nyquist = sample_rate as f64 / 2.0;
        let f = frequency as f64 * 2f64.powf(detune as f64 / 1200.0);
        let normalized = (f / nyquist).clamp(0.0, 1.0);

        if normalized >= 1.0 {
            return Self { b0: 1.0, ..Self::default() };
        }
        if normalized <= 0.0 {
            return Self::default();
        }

        let q = q_db.clamp(-MAX_Q_DB, MAX_Q_DB) as f64;
        let w0 = std::f64::consts::PI * normalized;
        let (sin, cos) = w0.sin_cos();
        let alpha = sin / (2.0 * 10f64.powf(q / 20.0));
        let a0 = 1.0 + alpha;
        let b = (1.0 - cos) / 2.0;

        Self {
            b0: b / a0,
            b1: 2.0 * b / a0,
            b2: b / a0,
            a1: -2.0 * cos / a0,
            a2: (1.0 - alpha) / a0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct State {
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl State {
    #[inline]
    fn tick(&mut self, c: &Coefficients, x: f64) -> f64 {
        let y = c.b0 * x + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2;
        self.x2 = self.x1;
        self.x1 = x;
        self.y2 = self.y1;
        self.y1 = y;
        y
    }
}

/// Lowpass biquad with automatable frequency, Q, gain and detune.
///
/// Coefficients are recomputed per frame when any parameter is a-rate
/// automated, otherwise once per quantum.
#[derive(Debug)]
pub struct BiquadNode {
    frequency: AudioParam,
    q: AudioParam,
    gain: AudioParam,
    detune: AudioParam,
    states: Vec<State>,
    frequencies: Channel,
    qs: Channel,
    detunes: Channel,
}

impl BiquadNode {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            frequency: AudioParam::new(DEFAULT_FREQUENCY, AutomationRate::ARate)
                .with_range(0.0, sample_rate / 2.0),
            q: AudioParam::new(1.0, AutomationRate::ARate),
            gain: AudioParam::new(0.0, AutomationRate::ARate),
            detune: AudioParam::new(0.0, AutomationRate::ARate),
            states: Vec::new(),
            frequencies: [0.0; RENDER_QUANTUM],
            qs: [0.0; RENDER_QUANTUM],
            detunes: [0.0; RENDER_QUANTUM],
        }
    }

    pub fn frequency_mut(&mut self) -> &mut AudioParam {
        &mut self.frequency
    }

    pub fn q_mut(&mut self) -> &mut AudioParam {
        &mut self.q
    }

    /// Apply `rate` to every parameter.
    pub fn set_automation_rate(&mut self, rate: AutomationRate) {
        self.frequency.set_rate(rate);
        self.q.set_rate(rate);
        self.gain.set_rate(rate);
        self.detune.set_rate(rate);
    }

    fn varies_per_frame(&self) -> bool {
        self.frequency.varies_per_frame() || self.q.varies_per_frame() || self.detune.varies_per_frame()
    }

    pub fn process(&mut self, input: &AudioBlock, output: &mut AudioBlock, ctx: &RenderContext<'_>) {
        let channels = input.channel_count();
        output.set_channel_count(channels);
        if self.states.len() < channels {
            self.states.resize(channels, State::default());
        }

        self.frequency.fill(ctx.start_frame, ctx.sample_rate, &mut self.frequencies);
        self.q.fill(ctx.start_frame, ctx.sample_rate, &mut self.qs);
        self.detune.fill(ctx.start_frame, ctx.sample_rate, &mut self.detunes);

        if self.varies_per_frame() {
            for i in 0..RENDER_QUANTUM {
                let c = Coefficients::lowpass(self.frequencies[i], self.qs[i], self.detunes[i], ctx.sample_rate);
                for (ch, state) in self.states.iter_mut().enumerate().take(channels) {
                    output.channel_mut(ch)[i] = state.tick(&c, input.channel(ch)[i] as f64) as f32;
                }
            }
            return;
        }

        let c = Coefficients::lowpass(self.frequencies[0], self.qs[0], self.detunes[0], ctx.sample_rate);
        for (ch, state) in self.states.iter_mut().enumerate().take(channels) {
            let inp = input.channel(ch);
            let out = output.channel_mut(ch);
            for (o, &x) in out.iter_mut().zip(inp.iter()) {
                *o = state.tick(&c, x as f64) as f32;
            }
        }
    }
}
