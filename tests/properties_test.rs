use std::collections::HashSet;

use iou_tracker::{BoundingBox, BoxFormat, IouTracker, TrackerConfig, greedy_assignment};
use proptest::prelude::*;

fn offset_strategy() -> impl Strategy<Value = f32> {
    prop_oneof![0.0f32..500.0, -1.0e9f32..1.0e9]
}

fn extent_strategy() -> impl Strategy<Value = f32> {
    prop_oneof![1.0f32..100.0, 1.0e-30f32..1.0e-3, 1.0e3f32..1.0e30]
}

fn bbox_strategy() -> impl Strategy<Value = BoundingBox> {
    (offset_strategy(), offset_strategy(), extent_strategy(), extent_strategy())
        .prop_map(|(x, y, w, h)| BoundingBox::new(x, y, w, h))
}

fn frame_strategy() -> impl Strategy<Value = Vec<[f32; 4]>> {
    prop::collection::vec(bbox_strategy().prop_map(|b| b.to_xywh()), 0..12)
}

proptest! {
    #[test]
    fn prop_iou_self_is_one(b in bbox_strategy()) {
        prop_assert_eq!(b.iou(&b), 1.0);
    }

    #[test]
    fn prop_iou_symmetric(a in bbox_strategy(), b in bbox_strategy()) {
        prop_assert_eq!(a.iou(&b), b.iou(&a));
    }

    #[test]
    fn prop_iou_in_unit_range(a in bbox_strategy(), b in bbox_strategy()) {
        let iou = a.iou(&b);
        prop_assert!((0.0..=1.0).contains(&iou));
    }

    #[test]
    fn prop_disjoint_boxes_have_zero_iou(a in bbox_strategy(), gap in 0.0f32..50.0) {
        let b = BoundingBox::new(a.x + a.width + gap, a.y, a.width, a.height);
        // f32 rounding of the sum can land b back inside a.
        prop_assume!(b.x > a.x && f64::from(b.x) >= f64::from(a.x) + f64::from(a.width));
        prop_assert_eq!(a.iou(&b), 0.0);
        prop_assert_eq!(b.iou(&a), 0.0);
    }

    #[test]
    fn prop_assignment_is_one_to_one(
        dets in prop::collection::vec(bbox_strategy(), 0..10),
        tracks in prop::collection::vec(bbox_strategy(), 0..10),
        thresh in 0.05f32..1.0,
    ) {
        let tracks: Vec<_> = tracks.into_iter().enumerate().map(|(i, b)| (i as u64, b)).collect();
        let result = greedy_assignment(&dets, &tracks, thresh);

        let det_ids: HashSet<usize> = result.matches.iter().map(|m| m.0).collect();
        let trk_ids: HashSet<u64> = result.matches.iter().map(|m| m.1).collect();
        prop_assert_eq!(det_ids.len(), result.matches.len());
        prop_assert_eq!(trk_ids.len(), result.matches.len());
        prop_assert_eq!(result.matches.len() + result.unmatched_detections.len(), dets.len());
        prop_assert_eq!(result.matches.len() + result.unmatched_tracks.len(), tracks.len());

        for &(det_idx, id) in &result.matches {
            prop_assert!(dets[det_idx].iou(&tracks[id as usize].1) >= thresh);
        }
    }

    #[test]
    fn prop_first_frame_is_sequential(frame in frame_strategy()) {
        let config = TrackerConfig::default().with_input_format(BoxFormat::Xywh);
        let mut tracker = IouTracker::new(config).unwrap();

        let ids = tracker.track_objects(&frame);
        let expected: Vec<Option<u64>> = (0..frame.len() as u64).map(Some).collect();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn prop_ids_unique_per_frame_and_never_reused(
        frames in prop::collection::vec(frame_strategy(), 1..15),
    ) {
        let config = TrackerConfig::default().with_input_format(BoxFormat::Xywh);
        let mut tracker = IouTracker::new(config).unwrap();
        let mut purged: HashSet<u64> = HashSet::new();

        for frame in &frames {
            let before = tracker.next_id();
            let ids: Vec<u64> = tracker.track_objects(frame).into_iter().flatten().collect();
            prop_assert_eq!(ids.len(), frame.len());

            let unique: HashSet<u64> = ids.iter().copied().collect();
            prop_assert_eq!(unique.len(), ids.len());
            for id in &ids {
                prop_assert!(!purged.contains(id));
                prop_assert!(*id < tracker.next_id());
            }
            prop_assert!(tracker.next_id() >= before);

            for lost in tracker.lost_tracks().iter() {
                prop_assert!(!tracker.active_tracks().contains(lost.id));
                prop_assert!(lost.age < tracker.config().lost_threshold);
            }
            for id in 0..tracker.next_id() {
                if !tracker.active_tracks().contains(id) && !tracker.lost_tracks().contains(id) {
                    purged.insert(id);
                }
            }
        }
    }
}
