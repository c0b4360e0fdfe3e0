//! Unit tests for distribution specs and samplers.

use crowd_core::SimRng;

use crate::{DistributionSpec, build_sampler};

fn rng() -> SimRng {
    SimRng::new(99)
}

#[cfg(test)]
mod constant {
    use super::*;

    #[test]
    fn fixed_period() {
        let spec = DistributionSpec::Constant { update_frequency_secs: 2.5 };
        let mut s = build_sampler(&spec, rng()).unwrap();
        assert_eq!(s.next_sample(0.0), 2.5);
        assert_eq!(s.next_sample(2.5), 5.0);
        assert_eq!(s.next_sample(10.0), 12.5);
    }

    #[test]
    fn rejects_non_positive_period() {
        let zero = DistributionSpec::Constant { update_frequency_secs: 0.0 };
        assert!(build_sampler(&zero, rng()).is_err());
        let nan = DistributionSpec::Constant { update_frequency_secs: f64::NAN };
        assert!(build_sampler(&nan, rng()).is_err());
    }
}

#[cfg(test)]
mod binomial {
    use super::*;

    #[test]
    fn sample_within_trial_bounds() {
        let spec = DistributionSpec::Binomial { trials: 10, probability: 0.5 };
        let mut s = build_sampler(&spec, rng()).unwrap();
        for _ in 0..200 {
            let t = s.next_sample(100.0);
            assert!((100.0..=110.0).contains(&t), "got {t}");
            assert_eq!(t.fract(), 0.0, "binomial gaps are whole seconds");
        }
    }

    #[test]
    fn rejects_probability_out_of_range() {
        let spec = DistributionSpec::Binomial { trials: 10, probability: 1.5 };
        assert!(build_sampler(&spec, rng()).is_err());
    }
}

#[cfg(test)]
mod poisson {
    use super::*;

    #[test]
    fn gaps_are_positive_and_advance() {
        let spec = DistributionSpec::Poisson { events_per_second: 2.0 };
        let mut s = build_sampler(&spec, rng()).unwrap();
        let mut t = 0.0;
        for _ in 0..100 {
            let next = s.next_sample(t);
            assert!(next > t);
            t = next;
        }
    }

    #[test]
    fn mean_gap_tracks_rate() {
        let spec = DistributionSpec::Poisson { events_per_second: 4.0 };
        let mut s = build_sampler(&spec, rng()).unwrap();
        let n = 20_000;
        let mut total = 0.0;
        for _ in 0..n {
            total += s.next_sample(0.0);
        }
        let mean = total / n as f64;
        assert!((mean - 0.25).abs() < 0.01, "mean gap {mean}, expected 0.25");
    }

    #[test]
    fn rejects_non_positive_rate() {
        let spec = DistributionSpec::Poisson { events_per_second: 0.0 };
        assert!(build_sampler(&spec, rng()).is_err());
        let neg = DistributionSpec::Poisson { events_per_second: -1.0 };
        assert!(build_sampler(&neg, rng()).is_err());
    }
}

#[cfg(test)]
mod single_spawn {
    use super::*;

    #[test]
    fn always_returns_spawn_time() {
        let spec = DistributionSpec::SingleSpawn { spawn_time_secs: 7.0 };
        let mut s = build_sampler(&spec, rng()).unwrap();
        assert_eq!(s.next_sample(0.0), 7.0);
        assert_eq!(s.next_sample(7.0), 7.0);
        assert_eq!(s.next_sample(100.0), 7.0);
    }

    #[test]
    fn first_event_ignores_the_schedule_start() {
        let spec = DistributionSpec::SingleSpawn { spawn_time_secs: 7.0 };
        let mut s = build_sampler(&spec, rng()).unwrap();
        assert_eq!(s.first_sample(0.0), 7.0);

        let repeating = DistributionSpec::Constant { update_frequency_secs: 1.0 };
        let mut r = build_sampler(&repeating, rng()).unwrap();
        assert_eq!(r.first_sample(3.0), 3.0);
    }
}

#[cfg(test)]
mod determinism {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let spec = DistributionSpec::Poisson { events_per_second: 1.0 };
        let mut a = build_sampler(&spec, SimRng::new(7)).unwrap();
        let mut b = build_sampler(&spec, SimRng::new(7)).unwrap();
        let mut t_a = 0.0;
        let mut t_b = 0.0;
        for _ in 0..50 {
            t_a = a.next_sample(t_a);
            t_b = b.next_sample(t_b);
            assert_eq!(t_a, t_b);
        }
    }
}

#[cfg(test)]
mod serde_format {
    use super::*;

    #[test]
    fn tagged_roundtrip() {
        let spec = DistributionSpec::Poisson { events_per_second: 0.5 };
        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains("\"type\":\"poisson\""), "got {json}");
        let back: DistributionSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
    }
}
