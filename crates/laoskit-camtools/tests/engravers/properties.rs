use laoskit_camtools::{classify, ChannelSet, CurveFlattener, MotionEmitter, MAX_FIT_POINTS, MIN_FIT_POINTS};
use laoskit_core::{OperationMode, PaintAttributes, Point};
use proptest::prelude::*;

fn channel_value() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), Just(1.0), 0.0..=1.0f64]
}

proptest! {
    #[test]
    fn classification_is_total(
        r in channel_value(),
        g in channel_value(),
        b in channel_value(),
        width in 0.0..5.0f64,
        filled in any::<bool>(),
    ) {
        let attrs = PaintAttributes { stroke: [r, g, b], stroke_width: width, filled };
        let mode = classify(&attrs);

        let hairline = width <= 1.0;
        let expected = if filled {
            OperationMode::FillEngrave
        } else if (r, g, b) == (1.0, 0.0, 0.0) && hairline {
            OperationMode::Cut
        } else if (r, g, b) == (0.0, 0.0, 0.0) && hairline {
            OperationMode::Mark
        } else {
            OperationMode::StrokeEngrave
        };
        prop_assert_eq!(mode, expected);
    }

    #[test]
    fn closed_curves_use_minimum_fit_points(
        x in -1000.0..1000.0f64,
        y in -1000.0..1000.0f64,
        scale in 0.0..10_000.0f64,
    ) {
        let p = Point::new(x, y);
        let flattener = CurveFlattener::new(scale);
        prop_assert_eq!(flattener.fit_points(p, p), MIN_FIT_POINTS);
        let points = flattener.flatten(p, Point::new(x + 5.0, y), Point::new(x, y + 5.0), p);
        prop_assert_eq!(points.len(), MIN_FIT_POINTS - 1);
    }

    #[test]
    fn fit_points_grow_with_distance(
        d1 in 0.0..2000.0f64,
        extra in 0.0..2000.0f64,
        scale in 0.0..1000.0f64,
    ) {
        let flattener = CurveFlattener::new(scale);
        let origin = Point::new(0.0, 0.0);
        let near = flattener.fit_points(origin, Point::new(d1, 0.0));
        let far = flattener.fit_points(origin, Point::new(d1 + extra, 0.0));
        prop_assert!(near <= far);
        prop_assert!((MIN_FIT_POINTS..=MAX_FIT_POINTS).contains(&near));
        prop_assert!((MIN_FIT_POINTS..=MAX_FIT_POINTS).contains(&far));
    }

    #[test]
    fn pending_move_is_flushed_once(
        points in prop::collection::vec((-100.0..100.0f64, -100.0..100.0f64), 1..20),
    ) {
        let mut emitter = MotionEmitter::new(1.0, 3);
        let mut channels = ChannelSet::new();
        emitter.move_to(Point::new(0.0, 0.0));
        for (x, y) in &points {
            emitter.line_to(&mut channels, OperationMode::Cut, Point::new(*x, *y));
        }

        let lines = channels.cut.lines();
        prop_assert_eq!(lines.len(), points.len() + 1);
        prop_assert!(lines[0].starts_with("0 "));
        prop_assert!(lines[1..].iter().all(|l| l.starts_with("1 ")));
    }
}
