//! Graph construction.
//!
//! `build_graph` is the only place that knows how each `WorkloadKind` maps to
//! nodes and automation schedules.

use shared_types::{AutomationRate, RampType, WorkloadKind, WorkloadSpec};

use crate::domain::nodes::delay::MAX_DELAY_SECONDS;
use crate::domain::nodes::wave_shaper::DEFAULT_CURVE;
use crate::domain::nodes::{
    sine_buffer, AnalyserNode, BiquadNode, ChannelMergerNode, ChannelSplitterNode, CompressorNode,
    ConvolverNode, DelayNode, GainNode, Generator, LoopingBufferSource, PannerNode, ProcessingNode,
    SineOscillator, StereoPannerNode, WaveShaperNode,
};
use crate::domain::{AudioParam, RenderGraph};
use crate::error::RenderError;

/// Playback rate of the shared graph source.
pub const SOURCE_PLAYBACK_RATE: f32 = 0.9;

/// Where every 3D panner is placed.
pub const PANNER_POSITION: [f32; 3] = [1.0, 1.0, 1.0];

const AUTOMATION_CURVE: [f32; 5] = [1.1, 1.2, 1.3, 1.6, 2.0];

/// Schedule the three-segment ramp shared by the gain and biquad automation
/// workloads, starting from `initial` at t = 0.
fn schedule_ramps(param: &mut AudioParam, ramp: RampType, initial: f32) {
    param.set_value_at_time(initial, 0.0);
    match ramp {
        RampType::Exp => {
            param
                .exponential_ramp_to_value_at_time(800.0, 1000.0)
                .exponential_ramp_to_value_at_time(1.0, 1001.0)
                .exponential_ramp_to_value_at_time(800.0, 1002.0);
        }
        RampType::Linear => {
            param
                .linear_ramp_to_value_at_time(800.0, 1000.0)
                .linear_ramp_to_value_at_time(1.0, 1001.0)
                .linear_ramp_to_value_at_time(800.0, 1002.0);
        }
        RampType::Target => {
            param
                .set_target_at_time(800.0, 0.1, 1000.0)
                .set_target_at_time(1.0, 1000.0, 1000.0)
                .set_target_at_time(800.0, 1001.0, 1000.0);
        }
        RampType::Curve => {
            param
                .set_value_curve_at_time(&AUTOMATION_CURVE, 0.1, 1000.0)
                .set_value_curve_at_time(&AUTOMATION_CURVE, 1001.0, 1.0)
                .set_value_curve_at_time(&AUTOMATION_CURVE, 1003.0, 1.0);
        }
    }
}

fn invalid(spec: &WorkloadSpec, reason: impl Into<String>) -> RenderError {
    RenderError::InvalidParameter {
        workload: spec.name.to_string(),
        reason: reason.into(),
    }
}

fn gain_node(gain: Option<f32>, rate: Option<AutomationRate>, cancel: bool) -> GainNode {
    let mut node = GainNode::new();
    if let Some(value) = gain {
        node.gain_mut().set_value(value);
        if cancel {
            node.gain_mut().cancel_scheduled_values(0.001);
        }
    }
    if let Some(rate) = rate {
        node.gain_mut().set_rate(rate);
    }
    node
}

/// Check a workload's parameters without building anything.
pub fn validate(spec: &WorkloadSpec) -> Result<(), RenderError> {
    match spec.kind {
        WorkloadKind::Gain { gain: Some(g), .. } | WorkloadKind::GainCancel { gain: Some(g), .. }
            if !g.is_finite() =>
        {
            Err(invalid(spec, format!("gain {g} is not finite")))
        }
        WorkloadKind::Biquad { frequency: Some(f) } if !(f.is_finite() && f >= 0.0) => {
            Err(invalid(spec, format!("frequency {f} out of range")))
        }
        WorkloadKind::AudioBufferSource { playback_rate } if !playback_rate.is_finite() => {
            Err(invalid(spec, format!("playback rate {playback_rate} is not finite")))
        }
        WorkloadKind::Delay { delay: Some(d) } if !(0.0..=MAX_DELAY_SECONDS).contains(&d) => Err(
            invalid(spec, format!("delay {d}s outside 0..={MAX_DELAY_SECONDS}s")),
        ),
        WorkloadKind::Compressor { knee } if !(0.0..=40.0).contains(&knee) => {
            Err(invalid(spec, format!("knee {knee} dB outside 0..=40")))
        }
        WorkloadKind::Convolver { length: 0 } => Err(invalid(spec, "empty impulse response")),
        WorkloadKind::StereoPanner { pan: Some(p) } if !(-1.0..=1.0).contains(&p) => {
            Err(invalid(spec, format!("pan {p} outside -1..=1")))
        }
        _ => Ok(()),
    }
}

/// Build the render graph for `spec`.
pub fn build_graph(spec: &WorkloadSpec, sample_rate: f32) -> Result<RenderGraph, RenderError> {
    if !(sample_rate.is_finite() && sample_rate > 0.0) {
        return Err(RenderError::InvalidSampleRate {
            workload: spec.name.to_string(),
            sample_rate,
        });
    }
    validate(spec)?;

    // One second of tone, looped.
    let tone = sine_buffer(sample_rate as usize, sample_rate);
    let mut source = LoopingBufferSource::new(tone.clone());
    source.playback_rate_mut().set_value(SOURCE_PLAYBACK_RATE);
    let mut graph = RenderGraph::new(source, sample_rate);

    for _ in 0..spec.unit_count {
        match spec.kind {
            WorkloadKind::Passthrough => break,
            WorkloadKind::Biquad { frequency } => {
                let mut node = BiquadNode::new(sample_rate);
                if let Some(f) = frequency {
                    node.frequency_mut().set_value(f);
                }
                graph.push(ProcessingNode::Biquad(node));
            }
            WorkloadKind::BiquadAutomation { ramp, rate } => {
                let mut node = BiquadNode::new(sample_rate);
                schedule_ramps(node.q_mut(), ramp, 1.0);
                node.set_automation_rate(rate);
                graph.push(ProcessingNode::Biquad(node));
            }
            WorkloadKind::AudioBufferSource { playback_rate } => {
                let mut node = LoopingBufferSource::new(tone.clone());
                if playback_rate != 1.0 {
                    node.playback_rate_mut().set_value(playback_rate);
                }
                graph.add_generator(Generator::BufferSource(node));
            }
            WorkloadKind::Oscillator => {
                graph.add_generator(Generator::Oscillator(SineOscillator::new(sample_rate)));
            }
            WorkloadKind::OscillatorAutomation { rate } => {
                let mut node = SineOscillator::new(sample_rate);
                let frequency = node.frequency_mut();
                frequency.set_rate(rate);
                frequency
                    .set_value_at_time(100.0, 0.0)
                    .linear_ramp_to_value_at_time(4000.0, 1000.0);
                graph.add_generator(Generator::Oscillator(node));
            }
            WorkloadKind::Gain { gain, rate } => {
                graph.push(ProcessingNode::Gain(gain_node(gain, rate, false)));
            }
            WorkloadKind::GainCancel { gain, rate } => {
                graph.push(ProcessingNode::Gain(gain_node(gain, rate, true)));
            }
            WorkloadKind::GainAutomation { ramp, rate } => {
                let mut node = GainNode::new();
                node.gain_mut().set_rate(rate);
                schedule_ramps(node.gain_mut(), ramp, 1.01);
                graph.push(ProcessingNode::Gain(node));
            }
            WorkloadKind::GainAutomationConn { rate } => {
                let mut node = GainNode::new().with_source_modulation();
                node.gain_mut().set_rate(rate);
                graph.push(ProcessingNode::Gain(node));
            }
            WorkloadKind::Delay { delay } => {
                let mut node = DelayNode::new(sample_rate);
                if let Some(d) = delay {
                    node.delay_time_mut().set_value(d);
                }
                graph.push(ProcessingNode::Delay(node));
            }
            WorkloadKind::DelayAutomation { rate } => {
                let mut node = DelayNode::new(sample_rate);
                let delay_time = node.delay_time_mut();
                delay_time
                    .set_value_at_time(0.0, 0.0)
                    .set_value_at_time(0.1, 1000.0);
                delay_time.set_rate(rate);
                graph.push(ProcessingNode::Delay(node));
            }
            WorkloadKind::ChannelSplitter => {
                graph.push(ProcessingNode::ChannelSplitter(ChannelSplitterNode::new()));
            }
            WorkloadKind::ChannelMerger => {
                graph.push(ProcessingNode::ChannelMerger(ChannelMergerNode::new()));
            }
            WorkloadKind::Analyser => {
                graph.push(ProcessingNode::Analyser(AnalyserNode::new()));
            }
            WorkloadKind::WaveShaper { oversample } => {
                graph.push(ProcessingNode::WaveShaper(WaveShaperNode::new(
                    &DEFAULT_CURVE,
                    oversample,
                )));
            }
            WorkloadKind::Compressor { knee } => {
                graph.push(ProcessingNode::Compressor(CompressorNode::new(knee)));
            }
            WorkloadKind::Convolver { length } => {
                let response = sine_buffer(length, sample_rate);
                graph.push(ProcessingNode::Convolver(Box::new(ConvolverNode::new(
                    &response, true,
                ))));
            }
            WorkloadKind::Panner { model } => {
                graph.push(ProcessingNode::Panner(Box::new(PannerNode::new(
                    model,
                    PANNER_POSITION,
                    sample_rate,
                ))));
            }
            WorkloadKind::StereoPanner { pan } => {
                let mut node = StereoPannerNode::new();
                if let Some(p) = pan {
                    node.pan_mut().set_value(p);
                }
                graph.push(ProcessingNode::StereoPanner(node));
            }
        }
    }

    tracing::trace!(
        workload = spec.name,
        chain = graph.chain_len(),
        generators = graph.generator_count(),
        "graph built"
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{Oversample, WorkloadCatalog};

    const SR: f32 = 44_100.0;

    #[test]
    fn test_every_catalog_entry_builds() {
        let catalog = WorkloadCatalog::standard();
        for spec in std::iter::once(catalog.baseline()).chain(catalog.iter()) {
            let graph = build_graph(spec, SR);
            assert!(graph.is_ok(), "{} failed to build", spec.name);
        }
    }

    #[test]
    fn test_unit_count_sets_chain_length() {
        let spec = WorkloadSpec::new("Gain-x", 30, WorkloadKind::Gain { gain: None, rate: None });
        let graph = build_graph(&spec, SR).unwrap();
        assert_eq!(graph.chain_len(), 30);
        assert_eq!(graph.generator_count(), 0);
    }

    #[test]
    fn test_sources_become_generators() {
        let spec = WorkloadSpec::new("Osc", 3, WorkloadKind::Oscillator);
        let graph = build_graph(&spec, SR).unwrap();
        assert_eq!(graph.chain_len(), 0);
        assert_eq!(graph.generator_count(), 3);
    }

    #[test]
    fn test_baseline_has_no_nodes() {
        let catalog = WorkloadCatalog::standard();
        let graph = build_graph(catalog.baseline(), SR).unwrap();
        assert_eq!(graph.chain_len(), 0);
        assert_eq!(graph.generator_count(), 0);
    }

    #[test]
    fn test_rejects_excessive_delay() {
        let spec = WorkloadSpec::new("Delay-1", 2, WorkloadKind::Delay { delay: Some(1.0) });
        assert!(matches!(
            build_graph(&spec, SR),
            Err(RenderError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_impulse_response() {
        let spec = WorkloadSpec::new("Convolver-0", 1, WorkloadKind::Convolver { length: 0 });
        assert!(build_graph(&spec, SR).is_err());
    }

    #[test]
    fn test_rejects_bad_sample_rate() {
        let spec = WorkloadSpec::new(
            "WaveShaper-1x",
            1,
            WorkloadKind::WaveShaper { oversample: Oversample::None },
        );
        assert_eq!(
            build_graph(&spec, 0.0).unwrap_err(),
            RenderError::InvalidSampleRate {
                workload: "WaveShaper-1x".to_string(),
                sample_rate: 0.0,
            }
        );
    }

    #[test]
    fn test_gain_automation_schedules_from_initial_value() {
        let mut param = AudioParam::new(1.0, AutomationRate::ARate);
        schedule_ramps(&mut param, RampType::Linear, 1.01);
        assert_eq!(param.events().len(), 4);
        assert!((param.value_at(0.0) - 1.01).abs() < 1e-6);
        assert!(param.value_at(500.0) > 300.0);
    }
}
