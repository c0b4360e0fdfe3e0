//! The source controller: scheduled creation of agents.
//!
//! Event times come from the configured distribution.  The first event of a
//! repeating distribution fires at the schedule start; following events are
//! sampled from the time of the event just processed, so a long step catches
//! up on every event it skipped over.  A sample that fails to advance past
//! the current event marks the schedule as exhausted, which is how a
//! one-shot distribution ends after its single event.

use crowd_core::{Point2, SimRng, SourceId};
use crowd_dist::{TimeSampler, build_sampler};
use crowd_state::{SourceAttributes, Topography};
use tracing::debug;

use crate::error::{ControlError, ControlResult};

/// Attempts at drawing a random in-shape position before giving up and
/// using the shape center.
const SPAWN_POSITION_TRIES: usize = 100;

/// Drives one source's spawn schedule.
pub struct SourceController {
    attributes: SourceAttributes,
    sampler: Box<dyn TimeSampler>,
    rng: SimRng,
    next_event_secs: Option<f64>,
    spawned_total: u32,
}

impl SourceController {
    pub fn new(attributes: SourceAttributes, mut rng: SimRng) -> ControlResult<Self> {
        let spawner = &attributes.spawner;
        if let Some(end) = spawner.end_time_secs {
            if end < spawner.start_time_secs {
                return Err(ControlError::Config(format!(
                    "source {}: end_time_secs {} precedes start_time_secs {}",
                    attributes.id, end, spawner.start_time_secs
                )));
            }
        }
        let sampler_rng = rng.child(0);
        let mut sampler = build_sampler(&spawner.distribution, sampler_rng)?;
        let first_event = sampler.first_sample(spawner.start_time_secs);

        Ok(Self {
            attributes,
            sampler,
            rng,
            next_event_secs: Some(first_event),
            spawned_total: 0,
        })
    }

    #[inline]
    pub fn source_id(&self) -> SourceId {
        self.attributes.id
    }

    /// Agents created so far.
    pub fn spawned_total(&self) -> u32 {
        self.spawned_total
    }

    /// `true` once no further event can occur.
    pub fn is_exhausted(&self) -> bool {
        self.next_event_secs.is_none()
    }

    /// Fire every pending event up to and including `sim_time_secs`.
    pub fn update(&mut self, sim_time_secs: f64, topography: &mut Topography) {
        while let Some(event_time) = self.next_event_secs {
            if event_time > sim_time_secs {
                break;
            }
            if self.past_end(event_time) || self.remaining_budget() == Some(0) {
                self.next_event_secs = None;
                break;
            }
            self.spawn_event(event_time, topography);
            if self.remaining_budget() == Some(0) {
                self.next_event_secs = None;
                break;
            }
            let following = self.sampler.next_sample(event_time);
            self.next_event_secs = (following > event_time).then_some(following);
        }
    }

    fn past_end(&self, event_time_secs: f64) -> bool {
        self.attributes
            .spawner
            .end_time_secs
            .is_some_and(|end| event_time_secs >= end)
    }

    /// Spawns left under `max_spawn_total`; `None` when uncapped.
    fn remaining_budget(&self) -> Option<u32> {
        self.attributes
            .spawner
            .max_spawn_total
            .map(|cap| cap.saturating_sub(self.spawned_total))
    }

    fn spawn_event(&mut self, event_time_secs: f64, topography: &mut Topography) {
        let count = match self.remaining_budget() {
            Some(remaining) => self.attributes.spawner.event_element_count.min(remaining),
            None => self.attributes.spawner.event_element_count,
        };
        for _ in 0..count {
            let position = self.draw_position();
            let agent = topography.spawn_pedestrian(position);
            if let Some(pedestrian) = topography.pedestrian_mut(agent) {
                pedestrian.set_targets(self.attributes.target_ids.iter().copied());
            }
            self.spawned_total += 1;
            debug!(
                %agent,
                source = %self.attributes.id,
                time = event_time_secs,
                "spawned"
            );
        }
    }

    fn draw_position(&mut self) -> Point2 {
        let shape = &self.attributes.shape;
        if !self.attributes.spawner.spawn_at_random_positions {
            return shape.center();
        }
        let bounds = shape.bounds();
        for _ in 0..SPAWN_POSITION_TRIES {
            let candidate = Point2::new(
                self.rng.gen_range(bounds.x..bounds.x + bounds.width),
                self.rng.gen_range(bounds.y..bounds.y + bounds.height),
            );
            if shape.contains(candidate) {
                return candidate;
            }
        }
        shape.center()
    }
}
