//! Camera fly-to scenarios driven frame by frame.

use bevy::math::Vec3;
use cadet_mission::camera::{
    CameraFollow, CameraPose, CameraStep, FocusTarget, SETTLE_THRESHOLD, desired_pose,
};
use cadet_mission::content::BodyId;

fn target(id: BodyId, position: Vec3) -> FocusTarget {
    FocusTarget {
        position,
        size: id.data().size,
    }
}

/// Step until the flight settles, returning the number of frames taken.
fn fly(follow: &mut CameraFollow, goal: CameraPose) -> usize {
    for frame in 1..=2000 {
        if follow.step(goal) == CameraStep::Settled {
            return frame;
        }
    }
    panic!("camera never settled");
}

#[test]
fn test_retarget_mid_flight_lands_on_new_body() {
    let mut follow = CameraFollow::default();
    let mars = target(BodyId::Mars, Vec3::new(40.0, 0.0, 0.0));
    let jupiter = target(BodyId::Jupiter, Vec3::new(0.0, 0.0, -55.0));

    assert!(follow.observe_selection(Some(BodyId::Mars)));
    for _ in 0..20 {
        assert_eq!(follow.step(desired_pose(Some(mars))), CameraStep::Transitioning);
    }

    assert!(follow.observe_selection(Some(BodyId::Jupiter)));
    let goal = desired_pose(Some(jupiter));
    fly(&mut follow, goal);

    let (position_error, look_error) = follow.current.error_to(&goal);
    assert!(position_error < SETTLE_THRESHOLD);
    assert!(look_error < SETTLE_THRESHOLD);
    assert_eq!(follow.tracked(), Some(BodyId::Jupiter));
}

#[test]
fn test_free_mode_after_arrival_until_selection_changes() {
    let mut follow = CameraFollow::default();
    let earth = target(BodyId::Earth, Vec3::new(25.0, 0.0, 0.0));

    follow.observe_selection(Some(BodyId::Earth));
    fly(&mut follow, desired_pose(Some(earth)));
    assert_eq!(follow.step(desired_pose(Some(earth))), CameraStep::Free);

    // Same selection again does not restart the flight.
    assert!(!follow.observe_selection(Some(BodyId::Earth)));
    assert_eq!(follow.step(desired_pose(Some(earth))), CameraStep::Free);

    // Deselecting flies back to the overview.
    assert!(follow.observe_selection(None));
    let frames = fly(&mut follow, desired_pose(None));
    assert!(frames > 1);
    assert_eq!(follow.desired, CameraPose::overview());
}
