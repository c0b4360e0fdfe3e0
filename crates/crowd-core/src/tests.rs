//! Unit tests for crowd-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, GroupId, TargetId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(AgentId(0) < AgentId(1));
        assert!(TargetId(100) > TargetId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(TargetId::INVALID.0, u32::MAX);
        assert_eq!(GroupId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod geometry {
    use crate::{Point2, Rect, Shape};

    #[test]
    fn rect_contains_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 5.0);
        assert!(r.contains(Point2::new(0.0, 0.0)));
        assert!(r.contains(Point2::new(5.0, 2.0)));
        assert!(!r.contains(Point2::new(10.0, 2.5)));
        assert!(!r.contains(Point2::new(5.0, 5.0)));
    }

    #[test]
    fn rect_signed_distance() {
        let r = Rect::new(0.0, 0.0, 10.0, 5.0);
        // Center of the rect: 2.5 m in from the near edges.
        assert!((r.signed_distance(Point2::new(5.0, 2.5)) + 2.5).abs() < 1e-12);
        // 3 m past the right edge.
        assert!((r.signed_distance(Point2::new(13.0, 2.5)) - 3.0).abs() < 1e-12);
        // Outside past a corner: diagonal distance.
        let d = r.signed_distance(Point2::new(12.0, 7.0));
        assert!((d - (8.0f64).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn circle_queries() {
        let c = Shape::Circle {
            center: Point2::new(0.0, 0.0),
            radius: 2.0,
        };
        assert!(c.contains(Point2::new(1.0, 0.0)));
        assert!(c.contains(Point2::new(2.0, 0.0)));
        assert!(!c.contains(Point2::new(2.1, 0.0)));
        assert!((c.signed_distance(Point2::new(3.0, 0.0)) - 1.0).abs() < 1e-12);
        assert!((c.signed_distance(Point2::new(0.0, 0.0)) + 2.0).abs() < 1e-12);
        let b = c.bounds();
        assert_eq!((b.x, b.y, b.width, b.height), (-2.0, -2.0, 4.0, 4.0));
    }

    #[test]
    fn polygon_queries() {
        let square = Shape::Polygon {
            points: vec![
                Point2::new(0.0, 0.0),
                Point2::new(4.0, 0.0),
                Point2::new(4.0, 4.0),
                Point2::new(0.0, 4.0),
            ],
        };
        assert!(square.contains(Point2::new(2.0, 2.0)));
        assert!(!square.contains(Point2::new(5.0, 2.0)));
        assert!((square.signed_distance(Point2::new(2.0, 2.0)) + 2.0).abs() < 1e-12);
        assert!((square.signed_distance(Point2::new(6.0, 2.0)) - 2.0).abs() < 1e-12);
        assert_eq!(square.center(), Point2::new(2.0, 2.0));
    }

    #[test]
    fn step_towards_clamps_at_goal() {
        let from = Point2::new(0.0, 0.0);
        let goal = Point2::new(10.0, 0.0);
        assert_eq!(from.step_towards(goal, 3.0), Point2::new(3.0, 0.0));
        assert_eq!(from.step_towards(goal, 20.0), goal);
        assert_eq!(goal.step_towards(goal, 1.0), goal);
    }

    #[test]
    fn validate_rejects_degenerate_shapes() {
        assert!(Shape::Rectangle(Rect::new(0.0, 0.0, 0.0, 5.0)).validate().is_err());
        let bad_circle = Shape::Circle {
            center: Point2::new(0.0, 0.0),
            radius: -1.0,
        };
        assert!(bad_circle.validate().is_err());
        let bad_polygon = Shape::Polygon {
            points: vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)],
        };
        assert!(bad_polygon.validate().is_err());
        assert!(Shape::Rectangle(Rect::new(0.0, 0.0, 10.0, 5.0)).validate().is_ok());
    }

    #[test]
    fn rect_max_extent() {
        assert_eq!(Rect::new(0.0, 0.0, 10.0, 5.0).max_extent(), 10.0);
        assert_eq!(Rect::new(0.0, 0.0, 3.0, 5.0).max_extent(), 5.0);
    }
}

#[cfg(test)]
mod time {
    use crate::SimClock;

    #[test]
    fn clock_advances_in_fixed_steps() {
        let mut clock = SimClock::new(0.4);
        assert_eq!(clock.now_secs(), 0.0);
        clock.advance();
        assert!((clock.now_secs() - 0.4).abs() < 1e-12);
        clock.advance();
        assert!((clock.now_secs() - 0.8).abs() < 1e-12);
        assert_eq!(clock.step_count, 2);
    }

    #[test]
    fn time_is_derived_not_accumulated() {
        let mut clock = SimClock::new(0.4);
        for _ in 0..10 {
            clock.advance();
        }
        // 10 * 0.4 computed once, not 0.4 added ten times.
        assert!((clock.now_secs() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn next_secs_is_one_step_ahead() {
        let clock = SimClock::new(0.5);
        assert!((clock.next_secs() - 0.5).abs() < 1e-12);
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            let a: f64 = r1.random();
            let b: f64 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn child_streams_diverge() {
        let mut root_a = SimRng::new(1);
        let mut root_b = SimRng::new(1);
        let mut c0 = root_a.child(0);
        let mut c1 = root_b.child(1);
        let a: u64 = c0.random();
        let b: u64 = c1.random();
        assert_ne!(a, b, "children with different offsets should diverge");
    }

    #[test]
    fn gen_range_in_bounds() {
        let mut rng = SimRng::new(0);
        for _ in 0..1000 {
            let v = rng.gen_range(0.0f64..1.0);
            assert!((0.0..1.0).contains(&v));
        }
    }
}
