//! Unit tests for world-state containers.

use crowd_core::{AgentId, GroupId, Point2, Rect, TargetId};

use crate::attributes::AgentAttributes;
use crate::pedestrian::Pedestrian;

fn ped(id: u32) -> Pedestrian {
    Pedestrian::new(AgentId(id), Point2::new(0.0, 0.0), &AgentAttributes::default())
}

#[cfg(test)]
mod pedestrian {
    use super::*;

    #[test]
    fn target_queue_advances_in_order() {
        let mut p = ped(0);
        assert!(!p.has_next_target());
        p.set_targets([TargetId(3), TargetId(5)]);
        assert_eq!(p.next_target_id(), Some(TargetId(3)));
        p.advance_to_next_target();
        assert_eq!(p.next_target_id(), Some(TargetId(5)));
        p.advance_to_next_target();
        assert_eq!(p.next_target_id(), None);
    }

    #[test]
    fn single_target_replaces_queue() {
        let mut p = ped(0);
        p.set_targets([TargetId(1), TargetId(2), TargetId(3)]);
        p.set_single_target(TargetId(9), true);
        assert_eq!(p.next_target_id(), Some(TargetId(9)));
        assert!(p.is_following_agent_target());
        p.advance_to_next_target();
        assert!(!p.is_following_agent_target());
        assert!(!p.has_next_target());
    }

    #[test]
    fn assign_group_is_exclusive() {
        let mut p = ped(0);
        p.assign_group(GroupId(4), 12);
        p.assign_group(GroupId(7), 3);
        assert_eq!(p.primary_group_id(), Some(GroupId(7)));
        assert_eq!(p.group_ids(), &[GroupId(7)]);
        assert_eq!(p.group_sizes(), &[3]);
    }

    #[test]
    fn take_followers_detaches() {
        let mut p = ped(0);
        p.add_follower(AgentId(1));
        p.add_follower(AgentId(2));
        let taken = p.take_followers();
        assert_eq!(taken, vec![AgentId(1), AgentId(2)]);
        assert!(p.followers().is_empty());
    }

    #[test]
    fn move_records_footstep_but_place_does_not() {
        let mut p = ped(0);
        p.place(Point2::new(1.0, 1.0));
        assert!(p.footsteps().is_empty());
        p.move_to(Point2::new(2.0, 1.0), 0.4);
        assert_eq!(p.footsteps().len(), 1);
        assert_eq!(p.position(), Point2::new(2.0, 1.0));
    }

    #[test]
    fn psychology_starts_neutral() {
        use crate::psychology::{InformationState, SelfCategory};

        let mut p = ped(0);
        assert_eq!(p.self_category(), SelfCategory::TargetOriented);
        assert_eq!(p.information_state(), InformationState::NoInformation);
        p.set_information_state(InformationState::FollowInformedGroupMember);
        assert_eq!(
            p.information_state(),
            InformationState::FollowInformedGroupMember
        );
    }
}

#[cfg(test)]
mod footstep {
    use crate::footstep::{Footstep, FootstepHistory};
    use crowd_core::Point2;

    fn step(x: f64, t: f64) -> Footstep {
        Footstep {
            position: Point2::new(x, 0.0),
            time_secs: t,
        }
    }

    #[test]
    fn window_evicts_oldest() {
        let mut h = FootstepHistory::new(3);
        for i in 0..5 {
            h.push(step(i as f64, i as f64));
        }
        assert_eq!(h.len(), 3);
        assert_eq!(h.latest().unwrap().time_secs, 4.0);
    }

    #[test]
    fn average_speed_over_window() {
        let mut h = FootstepHistory::new(10);
        h.push(step(0.0, 0.0));
        h.push(step(1.0, 1.0));
        h.push(step(2.0, 2.0));
        // 2 m of path over 2 s.
        assert!((h.average_speed_mps() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn stalled_agent_has_zero_speed() {
        let mut h = FootstepHistory::new(10);
        h.push(step(3.0, 0.0));
        h.push(step(3.0, 1.0));
        assert_eq!(h.average_speed_mps(), 0.0);
    }

    #[test]
    fn too_few_steps_is_zero() {
        let mut h = FootstepHistory::new(10);
        assert_eq!(h.average_speed_mps(), 0.0);
        h.push(step(0.0, 0.0));
        assert_eq!(h.average_speed_mps(), 0.0);
    }
}

#[cfg(test)]
mod group {
    use crate::group::Group;
    use crowd_core::{AgentId, GroupId};

    #[test]
    fn membership_roundtrip() {
        let mut g = Group::new(GroupId(1), 100);
        g.add_member(AgentId(0));
        g.add_member(AgentId(1));
        assert_eq!(g.len(), 2);
        assert!(g.contains(AgentId(0)));
        assert!(!g.remove_member(AgentId(0)));
        assert!(!g.contains(AgentId(0)));
    }

    #[test]
    fn removing_last_member_reports_empty() {
        let mut g = Group::new(GroupId(1), 100);
        g.add_member(AgentId(5));
        assert!(g.remove_member(AgentId(5)));
        assert!(g.is_empty());
    }
}

#[cfg(test)]
mod topography {
    use super::*;
    use crate::topography::{Topography, TopographyEvent};

    fn topo() -> Topography {
        Topography::new(Rect::new(0.0, 0.0, 20.0, 10.0), AgentAttributes::default())
    }

    #[test]
    fn spawn_assigns_dense_ascending_ids() {
        let mut t = topo();
        let a = t.spawn_pedestrian(Point2::new(1.0, 1.0));
        let b = t.spawn_pedestrian(Point2::new(2.0, 1.0));
        assert_eq!((a, b), (AgentId(0), AgentId(1)));
        let ids = t.agent_ids();
        assert_eq!(ids, vec![AgentId(0), AgentId(1)]);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut t = topo();
        let a = t.spawn_pedestrian(Point2::new(1.0, 1.0));
        assert!(t.remove_pedestrian(a));
        let b = t.spawn_pedestrian(Point2::new(2.0, 1.0));
        assert_ne!(a, b);
    }

    #[test]
    fn events_record_mutations_in_order() {
        let mut t = topo();
        let a = t.spawn_pedestrian(Point2::new(1.0, 1.0));
        t.pedestrian_mut(a).unwrap().assign_group(GroupId(2), 4);
        assert!(t.remove_pedestrian(a));
        let events = t.take_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], TopographyEvent::PedestrianAdded(id) if id == a));
        match &events[1] {
            TopographyEvent::PedestrianRemoved(p) => {
                assert_eq!(p.id(), a);
                // Membership survives removal for the model's bookkeeping.
                assert_eq!(p.primary_group_id(), Some(GroupId(2)));
            }
            other => panic!("expected removal event, got {other:?}"),
        }
        assert!(!t.has_pending_events());
    }

    #[test]
    fn double_remove_is_reported() {
        let mut t = topo();
        let a = t.spawn_pedestrian(Point2::new(1.0, 1.0));
        assert!(t.remove_pedestrian(a));
        assert!(!t.remove_pedestrian(a));
    }

    #[test]
    fn spawned_pedestrians_inherit_shared_attributes() {
        let attrs = AgentAttributes {
            free_flow_speed_mps: 2.5,
            ..AgentAttributes::default()
        };
        let mut t = Topography::new(Rect::new(0.0, 0.0, 20.0, 10.0), attrs);
        let a = t.spawn_pedestrian(Point2::new(1.0, 1.0));
        assert_eq!(t.agent_attributes().free_flow_speed_mps, 2.5);
        assert_eq!(t.pedestrian(a).unwrap().free_flow_speed_mps(), 2.5);
    }
}

#[cfg(test)]
mod attributes {
    use crate::attributes::{SimulationAttributes, TargetAttributes};

    #[test]
    fn simulation_defaults_match_scenario_format() {
        let attrs: SimulationAttributes = serde_json::from_str("{}").unwrap();
        assert_eq!(attrs.step_length_secs, 0.4);
        assert_eq!(attrs.finish_time_secs, 500.0);
        assert_eq!(attrs.seed, 0);
    }

    #[test]
    fn minimal_target_document() {
        let json = r#"{
            "id": 1,
            "shape": { "type": "rectangle", "x": 18.0, "y": 4.0, "width": 2.0, "height": 2.0 }
        }"#;
        let attrs: TargetAttributes = serde_json::from_str(json).unwrap();
        assert!(attrs.absorber.enabled);
        assert_eq!(attrs.absorber.deletion_distance_m, 0.1);
        assert!(!attrs.waiter.enabled);
        assert!(attrs.waiter.individual_waiting);
        assert_eq!(attrs.leaving_speed_mps, None);
        assert_eq!(attrs.parallel_events, 0);
    }
}
