//! Scheduled parameter automation.
//!
//! An `AudioParam` has an intrinsic value plus an ordered timeline of
//! automation events. Values are evaluated either once per render quantum
//! (k-rate) or once per frame (a-rate), and are clamped to the parameter's
//! nominal range.

use shared_types::AutomationRate;

use super::block::{Channel, RENDER_QUANTUM};

/// One scheduled change on a parameter timeline.
#[derive(Debug, Clone, PartialEq)]
pub enum AutomationEvent {
    SetValue { time: f64, value: f32 },
    LinearRamp { time: f64, value: f32 },
    ExponentialRamp { time: f64, value: f32 },
    SetTarget { start: f64, target: f32, time_constant: f64 },
    ValueCurve { start: f64, duration: f64, curve: Vec<f32> },
}

impl AutomationEvent {
    /// Time at which the event takes effect.
    pub fn time(&self) -> f64 {
        match self {
            AutomationEvent::SetValue { time, .. }
            | AutomationEvent::LinearRamp { time, .. }
            | AutomationEvent::ExponentialRamp { time, .. } => *time,
            AutomationEvent::SetTarget { start, .. } | AutomationEvent::ValueCurve { start, .. } => {
                *start
            }
        }
    }
}

/// An automatable node parameter.
#[derive(Debug, Clone)]
pub struct AudioParam {
    value: f32,
    rate: AutomationRate,
    min: f32,
    max: f32,
    events: Vec<AutomationEvent>,
}

impl AudioParam {
    /// Parameter with an unbounded nominal range.
    pub fn new(default_value: f32, rate: AutomationRate) -> Self {
        Self {
            value: default_value,
            rate,
            min: f32::MIN,
            max: f32::MAX,
            events: Vec::new(),
        }
    }

    /// Builder-style method to set the nominal range.
    pub fn with_range(mut self, min: f32, max: f32) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Intrinsic value used when no automation applies.
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn set_value(&mut self, value: f32) {
        self.value = value;
    }

    pub fn rate(&self) -> AutomationRate {
        self.rate
    }

    pub fn set_rate(&mut self, rate: AutomationRate) {
        self.rate = rate;
    }

    /// Whether any automation event is scheduled.
    pub fn is_automated(&self) -> bool {
        !self.events.is_empty()
    }

    pub fn events(&self) -> &[AutomationEvent] {
        &self.events
    }

    pub fn set_value_at_time(&mut self, value: f32, time: f64) -> &mut Self {
        self.insert(AutomationEvent::SetValue { time, value })
    }

    pub fn linear_ramp_to_value_at_time(&mut self, value: f32, time: f64) -> &mut Self {
        self.insert(AutomationEvent::LinearRamp { time, value })
    }

    pub fn exponential_ramp_to_value_at_time(&mut self, value: f32, time: f64) -> &mut Self {
        self.insert(AutomationEvent::ExponentialRamp { time, value })
    }

    pub fn set_target_at_time(&mut self, target: f32, start: f64, time_constant: f64) -> &mut Self {
        self.insert(AutomationEvent::SetTarget {
            start,
            target,
            time_constant,
        })
    }

    pub fn set_value_curve_at_time(&mut self, curve: &[f32], start: f64, duration: f64) -> &mut Self {
        self.insert(AutomationEvent::ValueCurve {
            start,
            duration,
            curve: curve.to_vec(),
        })
    }

    /// Drop every event scheduled at or after `time`.
    pub fn cancel_scheduled_values(&mut self, time: f64) -> &mut Self {
        self.events.retain(|event| event.time() < time);
        self
    }

    // Events with equal times keep insertion order.
    fn insert(&mut self, event: AutomationEvent) -> &mut Self {
        let time = event.time();
        let pos = self.events.partition_point(|e| e.time() <= time);
        self.events.insert(pos, event);
        self
    }

    /// Parameter value at `time` seconds.
    pub fn value_at(&self, time: f64) -> f32 {
        let mut prev_time = 0.0f64;
        let mut prev_value = self.value;

        for (index, event) in self.events.iter().enumerate() {
            match event {
                AutomationEvent::SetValue { time: at, value } => {
                    if time < *at {
                        break;
                    }
                    prev_time = *at;
                    prev_value = *value;
                }
                AutomationEvent::LinearRamp { time: end, value } => {
                    if time < *end {
                        let span = end - prev_time;
                        let f = if span > 0.0 { ((time - prev_time) / span) as f32 } else { 1.0 };
                        return self.clamp(prev_value + (value - prev_value) * f);
                    }
                    prev_time = *end;
                    prev_value = *value;
                }
                AutomationEvent::ExponentialRamp { time: end, value } => {
                    if time < *end {
                        // No exponential path through or to zero: hold.
                        if prev_value == 0.0 || *value == 0.0 || prev_value.signum() != value.signum() {
                            return self.clamp(prev_value);
                        }
                        let span = end - prev_time;
                        let f = if span > 0.0 { (time - prev_time) / span } else { 1.0 };
                        let ratio = (*value as f64) / (prev_value as f64);
                        return self.clamp((prev_value as f64 * ratio.powf(f)) as f32);
                    }
                    prev_time = *end;
                    prev_value = *value;
                }
                AutomationEvent::SetTarget {
                    start,
                    target,
                    time_constant,
                } => {
                    if time < *start {
                        break;
                    }
                    // Runs until the next event takes over.
                    let next = self.events.get(index + 1).map(|e| e.time()).filter(|&t| t <= time);
                    let until = next.unwrap_or(time);
                    let v = if *time_constant <= 0.0 {
                        *target
                    } else {
                        let decay = (-(until - start) / time_constant).exp() as f32;
                        target + (prev_value - target) * decay
                    };
                    if next.is_none() {
                        return self.clamp(v);
                    }
                    prev_time = until;
                    prev_value = v;
                }
                AutomationEvent::ValueCurve {
                    start,
                    duration,
                    curve,
                } => {
                    if time < *start {
                        break;
                    }
                    let Some(&last) = curve.last() else {
                        continue;
                    };
                    if time < start + duration && curve.len() > 1 {
                        let pos = (curve.len() - 1) as f64 * (time - start) / duration;
                        let k = pos.floor() as usize;
                        let f = (pos - k as f64) as f32;
                        let v = curve[k] + (curve[(k + 1).min(curve.len() - 1)] - curve[k]) * f;
                        return self.clamp(v);
                    }
                    prev_time = start + duration;
                    prev_value = last;
                }
            }
        }

        self.clamp(prev_value)
    }

    /// Fill `out` with the values for the quantum starting at `start_frame`.
    pub fn fill(&self, start_frame: u64, sample_rate: f32, out: &mut Channel) {
        if !self.is_automated() {
            out.fill(self.clamp(self.value));
            return;
        }
        let t0 = start_frame as f64 / sample_rate as f64;
        match self.rate {
            AutomationRate::KRate => out.fill(self.value_at(t0)),
            AutomationRate::ARate => {
                let dt = 1.0 / sample_rate as f64;
                for (i, slot) in out.iter_mut().enumerate() {
                    *slot = self.value_at(t0 + i as f64 * dt);
                }
            }
        }
    }

    /// Whether values can change from frame to frame within a quantum.
    pub fn varies_per_frame(&self) -> bool {
        self.is_automated() && self.rate == AutomationRate::ARate
    }

    fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(default: f32) -> AudioParam {
        AudioParam::new(default, AutomationRate::ARate)
    }

    #[test]
    fn test_intrinsic_value_without_events() {
        let p = param(0.5);
        assert_eq!(p.value_at(0.0), 0.5);
        assert_eq!(p.value_at(100.0), 0.5);
    }

    #[test]
    fn test_set_value_holds() {
        let mut p = param(0.0);
        p.set_value_at_time(1.0, 1.0);
        assert_eq!(p.value_at(0.5), 0.0);
        assert_eq!(p.value_at(1.0), 1.0);
        assert_eq!(p.value_at(5.0), 1.0);
    }

    #[test]
    fn test_linear_ramp_interpolates() {
        let mut p = param(0.0);
        p.set_value_at_time(0.0, 0.0).linear_ramp_to_value_at_time(10.0, 10.0);
        assert!((p.value_at(5.0) - 5.0).abs() < 1e-5);
        assert_eq!(p.value_at(20.0), 10.0);
    }

    #[test]
    fn test_exponential_ramp_is_geometric() {
        let mut p = param(1.0);
        p.set_value_at_time(1.0, 0.0).exponential_ramp_to_value_at_time(100.0, 2.0);
        assert!((p.value_at(1.0) - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_exponential_ramp_from_zero_holds() {
        let mut p = param(0.0);
        p.exponential_ramp_to_value_at_time(1.0, 1.0);
        assert_eq!(p.value_at(0.5), 0.0);
    }

    #[test]
    fn test_set_target_approaches_target() {
        let mut p = param(0.0);
        p.set_target_at_time(1.0, 0.0, 1.0);
        let one_tau = p.value_at(1.0);
        assert!((one_tau - (1.0 - (-1.0f32).exp())).abs() < 1e-4);
        assert!(p.value_at(50.0) > 0.999);
    }

    #[test]
    fn test_value_curve_interpolates_and_holds_last() {
        let mut p = param(0.0);
        p.set_value_curve_at_time(&[0.0, 1.0, 2.0], 1.0, 2.0);
        assert_eq!(p.value_at(0.5), 0.0);
        assert!((p.value_at(1.5) - 0.5).abs() < 1e-5);
        assert_eq!(p.value_at(10.0), 2.0);
    }

    #[test]
    fn test_cancel_drops_later_events() {
        let mut p = param(0.9);
        p.set_value_at_time(0.1, 0.5);
        p.cancel_scheduled_values(0.001);
        assert!(!p.is_automated());
        assert_eq!(p.value_at(1.0), 0.9);
    }

    #[test]
    fn test_range_clamps() {
        let p = AudioParam::new(5.0, AutomationRate::KRate).with_range(0.0, 1.0);
        assert_eq!(p.value_at(0.0), 1.0);
    }

    #[test]
    fn test_k_rate_fill_is_constant_per_quantum() {
        let mut p = AudioParam::new(0.0, AutomationRate::KRate);
        p.set_value_at_time(0.0, 0.0).linear_ramp_to_value_at_time(1.0, 1.0);
        let mut out = [0.0; RENDER_QUANTUM];
        p.fill(4410, 44_100.0, &mut out);
        assert!(out.iter().all(|&v| (v - 0.1).abs() < 1e-5));
    }

    #[test]
    fn test_a_rate_fill_varies_per_frame() {
        let mut p = param(0.0);
        p.set_value_at_time(0.0, 0.0).linear_ramp_to_value_at_time(1.0, 1.0);
        let mut out = [0.0; RENDER_QUANTUM];
        p.fill(0, 100.0, &mut out);
        assert!((out[50] - 0.5).abs() < 1e-5);
        assert!(p.varies_per_frame());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn linear_ramp_stays_between_endpoints(
                from in -10.0f32..10.0,
                to in -10.0f32..10.0,
                t in 0.0f64..2.0,
            ) {
                let mut p = param(from);
                p.set_value_at_time(from, 0.0).linear_ramp_to_value_at_time(to, 1.0);
                let v = p.value_at(t);
                prop_assert!(v >= from.min(to) - 1e-4 && v <= from.max(to) + 1e-4);
            }

            #[test]
            fn values_respect_range(
                value in -1000.0f32..1000.0,
                t in 0.0f64..10.0,
            ) {
                let mut p = AudioParam::new(0.0, AutomationRate::ARate).with_range(-1.0, 1.0);
                p.set_value_at_time(value, 0.0).set_target_at_time(value * 2.0, 1.0, 0.5);
                let v = p.value_at(t);
                prop_assert!((-1.0..=1.0).contains(&v));
            }
        }
    }
}
