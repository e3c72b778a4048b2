use std::{collections::HashMap, time::Duration};

use pill_tabs::{Geometry, GeometryCache, MotionController, SpringConfig};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum CacheOp {
    Record(usize, Geometry),
    Prune(Vec<usize>),
}

const IDS: [&str; 5] = ["a", "b", "c", "d", "e"];

fn geometry() -> impl Strategy<Value = Geometry> {
    (0.0..500.0f64, 1.0..80.0f64).prop_map(|(offset, width)| Geometry::new(offset, width))
}

fn cache_op() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        3 => (0..IDS.len(), geometry()).prop_map(|(id, g)| CacheOp::Record(id, g)),
        1 => prop::collection::vec(0..IDS.len(), 0..IDS.len()).prop_map(CacheOp::Prune),
    ]
}

proptest! {
    /// The cache answers exactly like a map replaying the same records and prunes.
    #[test]
    fn cache_matches_model(ops in prop::collection::vec(cache_op(), 0..40)) {
        let mut cache = GeometryCache::default();
        let mut model: HashMap<&str, Geometry> = HashMap::new();

        for op in ops {
            match op {
                CacheOp::Record(id, g) => {
                    cache.record(IDS[id], g);
                    model.insert(IDS[id], g);
                }
                CacheOp::Prune(keep) => {
                    let keep: Vec<&str> = keep.into_iter().map(|i| IDS[i]).collect();
                    cache.prune(keep.iter().copied());
                    model.retain(|id, _| keep.contains(id));
                }
            }
            for id in IDS {
                prop_assert_eq!(cache.lookup(id), model.get(id).copied());
            }
        }
    }

    /// Any chain of retargets settles on the last target in bounded frames.
    #[test]
    fn motion_settles_on_last_target(
        targets in prop::collection::vec((geometry(), 0usize..20), 1..6),
        stiffness in 60.0..400.0f64,
    ) {
        let mut motion = MotionController::new(SpringConfig::critical(stiffness));
        let frame = Duration::from_millis(16);

        for (target, frames) in &targets {
            let before = motion.current();
            motion.retarget(*target);
            if let Some(before) = before {
                prop_assert_eq!(motion.current(), Some(before), "retarget must not jump");
            }
            for _ in 0..*frames {
                motion.tick(frame);
            }
        }

        let mut settle_frames = 0;
        while motion.tick(frame) {
            settle_frames += 1;
            prop_assert!(settle_frames < 1000, "did not settle");
        }
        let last = targets.last().map(|(g, _)| *g);
        prop_assert_eq!(motion.current(), last);
    }
}
