//! Property tests for limit validation, speed synchronization, IK candidate
//! selection and pulse conversion.

mod common;

use arm_motion::config::{check_joints, AngleLimits};
use arm_motion::motion::{select_closest, DEG_TO_PULSE};
use arm_motion::{ArmConfig, Degrees, Error, Joint6D, MotionPlanner, MovePlan, Pulses, SyncProfile};
use proptest::prelude::*;

use common::{open_config, StubKinematics};

fn joint6() -> impl Strategy<Value = Joint6D> {
    prop::array::uniform6(-200.0f64..200.0).prop_map(Joint6D)
}

fn outside(limits: &AngleLimits, angle: f64) -> bool {
    angle < limits.min.0 || angle > limits.max.0
}

proptest! {
    #[test]
    fn validation_rejects_iff_some_axis_outside(target in joint6()) {
        let config = ArmConfig::default();
        let planner = MotionPlanner::new(&config, StubKinematics::default());

        let expected: Vec<u8> = config
            .axes
            .iter()
            .zip(target.0.iter())
            .enumerate()
            .filter(|(_, (axis, angle))| outside(&axis.limits, **angle))
            .map(|(i, _)| i as u8 + 1)
            .collect();

        match planner.validate_joints(&target) {
            Ok(()) => prop_assert!(expected.is_empty()),
            Err(Error::Motion(arm_motion::error::MotionError::LimitViolation(v))) => {
                let reported: Vec<u8> = v.iter().map(|v| v.axis).collect();
                prop_assert_eq!(reported, expected);
            }
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }

    #[test]
    fn rejected_move_changes_nothing(target in joint6()) {
        let config = ArmConfig::default();
        let mut planner = MotionPlanner::new(&config, StubKinematics::default());
        let before = planner.snapshot();

        if planner.move_j(target).is_err() {
            prop_assert_eq!(planner.snapshot(), before);
        }
    }

    #[test]
    fn sync_axis_runs_at_nominal_and_all_finish_together(
        delta in prop::array::uniform6(-180.0f64..180.0),
        reductions in prop::array::uniform6(1.0f64..100.0),
        nominal in 1.0f64..200.0,
    ) {
        let delta = Joint6D(delta);
        let (sync_axis, max) = delta.abs_max();
        prop_assume!(max.0 > 1e-6);

        let profile = SyncProfile::compute(&delta, &reductions, nominal).unwrap();
        prop_assert_eq!(profile.sync_axis, sync_axis);
        prop_assert!((profile.speeds[sync_axis] - nominal).abs() <= 1e-9 * nominal);

        for i in 0..6 {
            if profile.speeds[i] > 0.0 {
                let t = profile.axis_time(&delta, &reductions, i);
                prop_assert!((t - profile.duration).abs() <= 1e-9 * profile.duration.max(1.0));
            } else {
                prop_assert_eq!(delta[i], 0.0);
            }
        }
    }

    #[test]
    fn closest_candidate_is_valid_and_minimal(
        from in joint6(),
        candidates in prop::collection::vec(joint6(), 0..8),
    ) {
        let config = ArmConfig::default();
        let limits = || config.axes.iter().map(|a| &a.limits);
        let valid = |c: &Joint6D| check_joints(limits(), c).is_empty();

        let chosen = select_closest(&from, candidates.iter().copied(), valid);

        match chosen {
            None => prop_assert!(candidates.iter().all(|c| !valid(c))),
            Some(index) => {
                let best = candidates[index];
                prop_assert!(valid(&best));
                let best_distance = (best - from).abs_max().1;
                for c in candidates.iter().filter(|&c| valid(c)) {
                    prop_assert!(best_distance <= (*c - from).abs_max().1);
                }
            }
        }
    }

    #[test]
    fn pulses_are_truncated_product(
        delta in -720.0f64..720.0,
        reduction in 0.5f64..100.0,
    ) {
        let pulses = Pulses::from_degrees(Degrees(delta), DEG_TO_PULSE, reduction);
        let exact = delta * DEG_TO_PULSE * reduction;

        prop_assert_eq!(pulses, Pulses::from_degrees(Degrees(delta), DEG_TO_PULSE, reduction));
        prop_assert_eq!(pulses.value(), exact.trunc() as i64);
        prop_assert!((pulses.value() as f64).abs() <= exact.abs());
    }

    #[test]
    fn committed_move_becomes_reference(target in prop::array::uniform6(-170.0f64..170.0)) {
        let target = Joint6D(target);
        let mut planner = MotionPlanner::new(&open_config(), StubKinematics::default());
        let mut transport = common::RecordingTransport::new();
        let mut delay = common::RecordingDelay::new();

        let plan = planner.move_j(target).unwrap();
        if let MovePlan::Synchronized(_) = plan {
            planner.commit(&mut transport, &mut delay).unwrap();
            prop_assert_eq!(transport.moves().len(), 6);
            prop_assert_eq!(planner.generation(), 1);
        }
        prop_assert_eq!(*planner.reference(), target);
    }
}
