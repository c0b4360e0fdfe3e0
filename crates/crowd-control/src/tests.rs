//! Unit tests for the scenario-element controllers.

use std::cell::RefCell;
use std::rc::Rc;

use crowd_core::{AgentId, Point2, Rect, Shape, SimRng, SourceId, TargetId};
use crowd_dist::DistributionSpec;
use crowd_grid::CellGrid;
use crowd_state::{
    AbsorberAttributes, AgentAttributes, SourceAttributes, SpawnerAttributes, Target,
    TargetAttributes, Topography, WaiterAttributes,
};

fn topo() -> Topography {
    Topography::new(Rect::new(0.0, 0.0, 10.0, 3.0), AgentAttributes::default())
}

fn grid(topo: &Topography) -> CellGrid {
    CellGrid::build(topo.bounds(), 1.0, topo.positions()).unwrap()
}

fn disk(x: f64, y: f64) -> Shape {
    Shape::Circle {
        center: Point2::new(x, y),
        radius: 0.5,
    }
}

/// An absorbing, non-waiting exit at `(x, y)`.
fn exit_target(id: u32, x: f64, y: f64) -> TargetAttributes {
    TargetAttributes {
        id: TargetId(id),
        shape: disk(x, y),
        absorber: AbsorberAttributes::default(),
        waiter: WaiterAttributes::default(),
        leaving_speed_mps: None,
        parallel_events: 0,
    }
}

fn waiting(distribution: DistributionSpec, individual: bool) -> WaiterAttributes {
    WaiterAttributes {
        enabled: true,
        distribution: Some(distribution),
        individual_waiting: individual,
    }
}

fn spawn_walker(topo: &mut Topography, x: f64, y: f64, target: u32) -> AgentId {
    let id = topo.spawn_pedestrian(Point2::new(x, y));
    topo.pedestrian_mut(id).unwrap().set_targets([TargetId(target)]);
    id
}

#[cfg(test)]
mod target {
    use super::*;
    use crate::error::ControlError;
    use crate::target::{TargetController, TargetListener};

    struct RecordingListener(Rc<RefCell<Vec<AgentId>>>);

    impl TargetListener for RecordingListener {
        fn reached_target(&mut self, _target: &Target, agent: AgentId) {
            self.0.borrow_mut().push(agent);
        }
    }

    fn controller(topo: &Topography, id: u32) -> TargetController {
        TargetController::new(topo.target(TargetId(id)).unwrap(), SimRng::new(5)).unwrap()
    }

    #[test]
    fn immediate_absorption_removes_and_notifies() {
        let mut topo = topo();
        topo.add_target(Target::new(exit_target(1, 5.0, 1.0)));
        let agent = spawn_walker(&mut topo, 5.0, 1.0, 1);

        let mut controller = controller(&topo, 1);
        let seen = Rc::new(RefCell::new(Vec::new()));
        controller.register_listener(Box::new(RecordingListener(Rc::clone(&seen))));

        let grid = grid(&topo);
        controller.update(0.4, &mut topo, &grid).unwrap();

        assert!(topo.pedestrian(agent).is_none());
        assert_eq!(*seen.borrow(), vec![agent]);
    }

    #[test]
    fn arrival_requires_head_of_queue() {
        let mut topo = topo();
        topo.add_target(Target::new(exit_target(1, 5.0, 1.0)));
        // Standing inside target 1, but heading for target 2.
        let agent = spawn_walker(&mut topo, 5.0, 1.0, 2);

        let mut controller = controller(&topo, 1);
        let grid = grid(&topo);
        controller.update(0.4, &mut topo, &grid).unwrap();

        assert!(topo.pedestrian(agent).is_some());
    }

    #[test]
    fn deletion_distance_extends_reach() {
        let mut topo = topo();
        topo.add_target(Target::new(exit_target(1, 5.0, 1.0)));
        // 0.05 m outside the disk: within the 0.1 m deletion distance.
        let near = spawn_walker(&mut topo, 5.55, 1.0, 1);
        // 0.2 m outside: beyond it.
        let far = spawn_walker(&mut topo, 5.7, 1.0, 1);

        let mut controller = controller(&topo, 1);
        let grid = grid(&topo);
        controller.update(0.4, &mut topo, &grid).unwrap();

        assert!(topo.pedestrian(near).is_none());
        assert!(topo.pedestrian(far).is_some());
    }

    #[test]
    fn deletion_reach_stops_past_the_margin() {
        let mut topo = topo();
        let mut attrs = exit_target(1, 5.0, 1.0);
        attrs.shape = Shape::Circle {
            center: Point2::new(5.0, 1.0),
            radius: 1.0,
        };
        attrs.absorber.deletion_distance_m = 0.5;
        topo.add_target(Target::new(attrs));
        // 0.3 m from the center: well inside the disk.
        let inside = spawn_walker(&mut topo, 5.3, 1.0, 1);
        // 1.3 m outside the boundary: beyond the 0.5 m margin.
        let outside = spawn_walker(&mut topo, 7.3, 1.0, 1);

        let mut controller = controller(&topo, 1);
        let g = grid(&topo);
        controller.update(0.4, &mut topo, &g).unwrap();

        assert!(topo.pedestrian(inside).is_none());
        assert!(topo.pedestrian(outside).is_some());
    }

    #[test]
    fn individual_waiting_delays_removal() {
        let mut topo = topo();
        let mut attrs = exit_target(1, 5.0, 1.0);
        attrs.waiter = waiting(
            DistributionSpec::Constant { update_frequency_secs: 5.0 },
            true,
        );
        topo.add_target(Target::new(attrs));
        let agent = spawn_walker(&mut topo, 5.0, 1.0, 1);

        let mut controller = controller(&topo, 1);
        let g = grid(&topo);
        controller.update(0.4, &mut topo, &g).unwrap();
        assert!(topo.pedestrian(agent).is_some());
        assert_eq!(controller.scheduled_leaving_time(agent), Some(Some(5.4)));

        let g = grid(&topo);
        controller.update(5.3, &mut topo, &g).unwrap();
        assert!(topo.pedestrian(agent).is_some());

        let g = grid(&topo);
        controller.update(5.4, &mut topo, &g).unwrap();
        assert!(topo.pedestrian(agent).is_none());
        assert_eq!(controller.waiting_count(), 0);
    }

    #[test]
    fn individual_cap_queues_admissions() {
        let mut topo = topo();
        let mut attrs = exit_target(1, 5.0, 1.0);
        attrs.waiter = waiting(
            DistributionSpec::Constant { update_frequency_secs: 5.0 },
            true,
        );
        attrs.parallel_events = 1;
        topo.add_target(Target::new(attrs));
        let first = spawn_walker(&mut topo, 5.0, 1.0, 1);
        let second = spawn_walker(&mut topo, 5.2, 1.0, 1);

        let mut controller = controller(&topo, 1);
        let g = grid(&topo);
        controller.update(0.4, &mut topo, &g).unwrap();
        assert_eq!(controller.scheduled_leaving_time(first), Some(Some(5.4)));
        assert_eq!(controller.scheduled_leaving_time(second), None);

        // First leaves at 5.4; the freed slot admits the second in the same
        // pass.
        let g = grid(&topo);
        controller.update(5.4, &mut topo, &g).unwrap();
        assert!(topo.pedestrian(first).is_none());
        assert!(topo.pedestrian(second).is_some());
        assert_eq!(controller.scheduled_leaving_time(second), Some(Some(10.4)));

        let g = grid(&topo);
        controller.update(10.4, &mut topo, &g).unwrap();
        assert!(topo.pedestrian(second).is_none());
    }

    #[test]
    fn batch_fills_then_departs_together() {
        let mut topo = topo();
        let mut attrs = exit_target(1, 5.0, 1.0);
        attrs.waiter = waiting(
            DistributionSpec::Constant { update_frequency_secs: 3.0 },
            false,
        );
        attrs.parallel_events = 3;
        topo.add_target(Target::new(attrs));

        let first = spawn_walker(&mut topo, 5.0, 1.0, 1);
        let mut controller = controller(&topo, 1);
        let g = grid(&topo);
        controller.update(0.5, &mut topo, &g).unwrap();
        let second = spawn_walker(&mut topo, 5.2, 1.0, 1);
        let g = grid(&topo);
        controller.update(1.0, &mut topo, &g).unwrap();
        // Two of three slots filled: no departure time yet for anyone.
        assert_eq!(controller.scheduled_leaving_time(first), Some(None));
        assert_eq!(controller.scheduled_leaving_time(second), Some(None));

        let third = spawn_walker(&mut topo, 4.8, 1.0, 1);
        let g = grid(&topo);
        controller.update(1.5, &mut topo, &g).unwrap();
        // Batch full: one sample stamps all three identically.
        for agent in [first, second, third] {
            assert_eq!(controller.scheduled_leaving_time(agent), Some(Some(4.5)));
        }

        let g = grid(&topo);
        controller.update(4.4, &mut topo, &g).unwrap();
        assert_eq!(topo.agent_count(), 3);
        assert_eq!(controller.waiting_count(), 3);

        let g = grid(&topo);
        controller.update(4.5, &mut topo, &g).unwrap();
        assert_eq!(topo.agent_count(), 0);
        assert_eq!(controller.waiting_count(), 0);
    }

    #[test]
    fn zero_batch_never_departs() {
        let mut topo = topo();
        let mut attrs = exit_target(1, 5.0, 1.0);
        attrs.waiter = waiting(
            DistributionSpec::Constant { update_frequency_secs: 3.0 },
            false,
        );
        attrs.parallel_events = 0;
        topo.add_target(Target::new(attrs));
        let agent = spawn_walker(&mut topo, 5.0, 1.0, 1);

        let mut controller = controller(&topo, 1);
        for t in [0.4, 50.0, 500.0] {
            let g = grid(&topo);
            controller.update(t, &mut topo, &g).unwrap();
        }
        assert!(topo.pedestrian(agent).is_some());
        assert_eq!(controller.scheduled_leaving_time(agent), None);
    }

    #[test]
    fn non_absorbing_target_advances_the_queue() {
        let mut topo = topo();
        let mut attrs = exit_target(1, 5.0, 1.0);
        attrs.absorber.enabled = false;
        attrs.leaving_speed_mps = Some(0.6);
        topo.add_target(Target::new(attrs));
        let agent = spawn_walker(&mut topo, 5.0, 1.0, 1);
        topo.pedestrian_mut(agent)
            .unwrap()
            .set_targets([TargetId(1), TargetId(2)]);

        let mut controller = controller(&topo, 1);
        let g = grid(&topo);
        controller.update(0.4, &mut topo, &g).unwrap();

        let ped = topo.pedestrian(agent).unwrap();
        assert_eq!(ped.next_target_id(), Some(TargetId(2)));
        assert_eq!(ped.free_flow_speed_mps(), 0.6);
    }

    #[test]
    fn no_leaving_speed_keeps_the_agents_own() {
        let mut topo = topo();
        let mut attrs = exit_target(1, 5.0, 1.0);
        attrs.absorber.enabled = false;
        topo.add_target(Target::new(attrs));
        let agent = spawn_walker(&mut topo, 5.0, 1.0, 1);

        let mut controller = controller(&topo, 1);
        let g = grid(&topo);
        controller.update(0.4, &mut topo, &g).unwrap();

        let ped = topo.pedestrian(agent).unwrap();
        assert_eq!(ped.free_flow_speed_mps(), AgentAttributes::default().free_flow_speed_mps);
        assert!(!ped.has_next_target());
    }

    #[test]
    fn absorption_redirects_followers_to_the_target() {
        let mut topo = topo();
        topo.add_target(Target::new(exit_target(1, 5.0, 1.0)));
        let leader = spawn_walker(&mut topo, 5.0, 1.0, 1);
        let follower = topo.spawn_pedestrian(Point2::new(1.0, 1.0));
        topo.pedestrian_mut(leader).unwrap().add_follower(follower);

        let mut controller = controller(&topo, 1);
        let g = grid(&topo);
        controller.update(0.4, &mut topo, &g).unwrap();

        assert!(topo.pedestrian(leader).is_none());
        let ped = topo.pedestrian(follower).unwrap();
        assert_eq!(ped.next_target_id(), Some(TargetId(1)));
        assert!(!ped.is_following_agent_target());
    }

    #[test]
    fn proxy_targets_are_never_processed() {
        let mut topo = topo();
        let leader = topo.spawn_pedestrian(Point2::new(5.0, 1.0));
        topo.add_target(Target::for_agent(exit_target(9, 5.0, 1.0), leader));
        let follower = topo.spawn_pedestrian(Point2::new(5.0, 1.0));
        topo.pedestrian_mut(follower)
            .unwrap()
            .set_single_target(TargetId(9), true);

        let mut controller = controller(&topo, 9);
        let g = grid(&topo);
        controller.update(0.4, &mut topo, &g).unwrap();

        assert_eq!(topo.agent_count(), 2);
    }

    #[test]
    fn agent_following_another_agent_never_arrives() {
        let mut topo = topo();
        topo.add_target(Target::new(exit_target(1, 5.0, 1.0)));
        let agent = topo.spawn_pedestrian(Point2::new(5.0, 1.0));
        // Standing inside target 1, but its target queue points at an agent.
        topo.pedestrian_mut(agent)
            .unwrap()
            .set_single_target(TargetId(1), true);

        let mut controller = controller(&topo, 1);
        let g = grid(&topo);
        controller.update(0.4, &mut topo, &g).unwrap();
        assert!(topo.pedestrian(agent).is_some());
    }

    #[test]
    fn missing_target_is_skipped() {
        let target = Target::new(exit_target(1, 5.0, 1.0));
        let mut controller = TargetController::new(&target, SimRng::new(5)).unwrap();

        let mut topo = topo();
        let agent = spawn_walker(&mut topo, 5.0, 1.0, 1);
        let g = grid(&topo);
        controller.update(0.4, &mut topo, &g).unwrap();
        assert!(topo.pedestrian(agent).is_some());
    }

    #[test]
    fn waiting_target_requires_a_distribution() {
        let mut attrs = exit_target(1, 5.0, 1.0);
        attrs.waiter.enabled = true;
        let result = TargetController::new(&Target::new(attrs), SimRng::new(5));
        assert!(matches!(result, Err(ControlError::Config(_))));
    }
}

#[cfg(test)]
mod source {
    use super::*;
    use crate::source::SourceController;

    fn source(distribution: DistributionSpec) -> SourceAttributes {
        SourceAttributes {
            id: SourceId(1),
            shape: Shape::Rectangle(Rect::new(2.0, 1.0, 2.0, 1.0)),
            spawner: SpawnerAttributes {
                distribution,
                event_element_count: 1,
                max_spawn_total: None,
                start_time_secs: 0.0,
                end_time_secs: None,
                spawn_at_random_positions: false,
            },
            target_ids: Vec::new(),
        }
    }

    fn constant(period: f64) -> DistributionSpec {
        DistributionSpec::Constant { update_frequency_secs: period }
    }

    #[test]
    fn constant_schedule_fires_from_the_start() {
        let mut topo = topo();
        let mut ctl = SourceController::new(source(constant(1.0)), SimRng::new(3)).unwrap();
        assert_eq!(ctl.source_id(), SourceId(1));

        ctl.update(0.0, &mut topo);
        assert_eq!(topo.agent_count(), 1);
        ctl.update(0.5, &mut topo);
        assert_eq!(topo.agent_count(), 1);
        // A long step catches up on all skipped events (t = 1, 2, 3).
        ctl.update(3.0, &mut topo);
        assert_eq!(topo.agent_count(), 4);
    }

    #[test]
    fn events_spawn_groups_of_agents() {
        let mut topo = topo();
        let mut attrs = source(constant(1.0));
        attrs.spawner.event_element_count = 3;
        let mut ctl = SourceController::new(attrs, SimRng::new(3)).unwrap();

        ctl.update(0.0, &mut topo);
        assert_eq!(topo.agent_count(), 3);
    }

    #[test]
    fn total_cap_truncates_the_last_event() {
        let mut topo = topo();
        let mut attrs = source(constant(1.0));
        attrs.spawner.event_element_count = 3;
        attrs.spawner.max_spawn_total = Some(5);
        let mut ctl = SourceController::new(attrs, SimRng::new(3)).unwrap();

        ctl.update(0.0, &mut topo);
        assert_eq!(ctl.spawned_total(), 3);
        ctl.update(1.0, &mut topo);
        assert_eq!(ctl.spawned_total(), 5);
        assert!(ctl.is_exhausted());

        ctl.update(2.0, &mut topo);
        assert_eq!(topo.agent_count(), 5);
    }

    #[test]
    fn single_spawn_fires_once_at_its_time() {
        let mut topo = topo();
        let spec = DistributionSpec::SingleSpawn { spawn_time_secs: 5.0 };
        let mut ctl = SourceController::new(source(spec), SimRng::new(3)).unwrap();

        ctl.update(4.9, &mut topo);
        assert_eq!(topo.agent_count(), 0);
        ctl.update(5.0, &mut topo);
        assert_eq!(topo.agent_count(), 1);
        assert!(ctl.is_exhausted());
        ctl.update(10.0, &mut topo);
        assert_eq!(topo.agent_count(), 1);
    }

    #[test]
    fn end_time_excludes_events_at_the_boundary() {
        let mut topo = topo();
        let mut attrs = source(constant(1.0));
        attrs.spawner.end_time_secs = Some(2.0);
        let mut ctl = SourceController::new(attrs, SimRng::new(3)).unwrap();

        ctl.update(10.0, &mut topo);
        assert_eq!(topo.agent_count(), 2, "events at t = 0 and t = 1 only");
        assert!(ctl.is_exhausted());
    }

    #[test]
    fn end_before_start_is_rejected() {
        let mut attrs = source(constant(1.0));
        attrs.spawner.start_time_secs = 5.0;
        attrs.spawner.end_time_secs = Some(2.0);
        assert!(SourceController::new(attrs, SimRng::new(3)).is_err());
    }

    #[test]
    fn spawned_agents_get_the_source_target_queue() {
        let mut topo = topo();
        let mut attrs = source(constant(1.0));
        attrs.target_ids = vec![TargetId(3), TargetId(7)];
        let mut ctl = SourceController::new(attrs, SimRng::new(3)).unwrap();

        ctl.update(0.0, &mut topo);
        let ped = topo.pedestrian(AgentId(0)).unwrap();
        assert_eq!(ped.next_target_id(), Some(TargetId(3)));
    }

    #[test]
    fn agents_appear_at_the_shape_center_by_default() {
        let mut topo = topo();
        let mut ctl = SourceController::new(source(constant(1.0)), SimRng::new(3)).unwrap();

        ctl.update(0.0, &mut topo);
        let position = topo.pedestrian(AgentId(0)).unwrap().position();
        assert_eq!(position, Point2::new(3.0, 1.5));
    }

    #[test]
    fn random_positions_stay_inside_the_shape() {
        let mut topo = topo();
        let mut attrs = source(constant(1.0));
        attrs.spawner.event_element_count = 20;
        attrs.spawner.spawn_at_random_positions = true;
        let shape = attrs.shape.clone();
        let mut ctl = SourceController::new(attrs, SimRng::new(3)).unwrap();

        ctl.update(0.0, &mut topo);
        assert_eq!(topo.agent_count(), 20);
        let mut distinct = 0;
        for (_, position) in topo.positions() {
            assert!(shape.contains(position), "{position:?} outside the source");
            if position != shape.center() {
                distinct += 1;
            }
        }
        assert!(distinct > 10, "positions should scatter, got {distinct} off-center");
    }
}

#[cfg(test)]
mod absorbing_area {
    use super::*;
    use crate::absorbing_area::AbsorbingAreaController;
    use crowd_core::AreaId;
    use crowd_state::AbsorbingAreaAttributes;

    fn area(x: f64, y: f64) -> AbsorbingAreaAttributes {
        AbsorbingAreaAttributes {
            id: AreaId(1),
            shape: disk(x, y),
            deletion_distance_m: 0.1,
        }
    }

    #[test]
    fn removes_agents_regardless_of_their_targets() {
        let mut topo = topo();
        let idle = topo.spawn_pedestrian(Point2::new(5.0, 1.0));
        let walker = spawn_walker(&mut topo, 5.2, 1.0, 4);

        let mut ctl = AbsorbingAreaController::new(area(5.0, 1.0));
        let grid = grid(&topo);
        ctl.update(0.4, &mut topo, &grid);

        assert!(topo.pedestrian(idle).is_none());
        assert!(topo.pedestrian(walker).is_none());
        assert_eq!(ctl.absorbed_total(), 2);
    }

    #[test]
    fn deletion_distance_bounds_the_reach() {
        let mut topo = topo();
        let near = topo.spawn_pedestrian(Point2::new(5.55, 1.0));
        let far = topo.spawn_pedestrian(Point2::new(5.7, 1.0));

        let mut ctl = AbsorbingAreaController::new(area(5.0, 1.0));
        let grid = grid(&topo);
        ctl.update(0.4, &mut topo, &grid);

        assert!(topo.pedestrian(near).is_none());
        assert!(topo.pedestrian(far).is_some());
        assert_eq!(ctl.absorbed_total(), 1);
    }
}
