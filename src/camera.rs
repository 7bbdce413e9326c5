//! Camera system for the solar-system scene.
//!
//! The camera either rests in a fixed overview pose or flies to frame the
//! selected body. Flights blend a fixed fraction of the remaining distance
//! every frame, so far bodies take visibly longer to reach. Once the camera
//! has arrived the cadet can orbit and zoom freely; the controller then only
//! keeps the look-at point centred on the selection.

use bevy::{
    input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll},
    prelude::*,
};
use bevy_egui::EguiContexts;

use crate::content::BodyId;
use crate::flow::AppPhase;
use crate::render::{BodyVisual, SelectedBody};
use crate::types::SceneSystemSet;

/// Where the camera is created, looking at the Sun.
pub const INITIAL_POSITION: Vec3 = Vec3::new(0.0, 50.0, 90.0);

/// Overview pose the camera returns to when nothing is selected.
pub const OVERVIEW_POSITION: Vec3 = Vec3::new(0.0, 60.0, 100.0);

/// Fraction of the remaining distance covered per frame during a flight.
pub const TRANSITION_BLEND: f32 = 0.04;

/// Fraction used to re-centre the look-at point after arrival.
pub const RECENTER_BLEND: f32 = 0.1;

/// A flight ends when position and look-at are both this close to the goal.
pub const SETTLE_THRESHOLD: f32 = 0.5;

/// Framing distance behind a body: `size * PER_SIZE + BASE`.
pub const FOCUS_DISTANCE_PER_SIZE: f32 = 3.5;
pub const FOCUS_DISTANCE_BASE: f32 = 3.0;

/// Vertical lift and lateral shift of the framing pose, per unit of size.
pub const FOCUS_LIFT_PER_SIZE: f32 = 0.5;
pub const FOCUS_SIDE_PER_SIZE: f32 = 0.5;

/// Vertical field of view in degrees.
pub const FIELD_OF_VIEW_DEG: f32 = 40.0;

/// Zoom limits for free controls.
pub const MAX_DISTANCE: f32 = 200.0;
pub const OVERVIEW_MIN_DISTANCE: f32 = 10.0;

/// Radians of orbit per pixel of mouse drag.
pub const ORBIT_SPEED: f32 = 0.005;

/// Zoom speed multiplier for scroll wheel.
pub const ZOOM_SPEED: f32 = 0.1;

/// Keeps the orbit away from the poles so `look_at` never degenerates.
const MIN_POLAR: f32 = 0.05;
const MAX_POLAR: f32 = std::f32::consts::PI - 0.05;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Camera position plus the point it looks at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraPose {
    /// Fixed overview of the whole system.
    pub fn overview() -> Self {
        Self {
            position: OVERVIEW_POSITION,
            look_at: Vec3::ZERO,
        }
    }

    /// Over-the-shoulder framing of a body of `size` at `body_position`.
    ///
    /// The camera sits on the sun-side of the body, so the body is lit, and is
    /// lifted and shifted sideways so the body is not dead centre.
    pub fn framing(body_position: Vec3, size: f32) -> Self {
        let direction = body_position.try_normalize().unwrap_or(Vec3::Z);
        let back = direction * (size * FOCUS_DISTANCE_PER_SIZE + FOCUS_DISTANCE_BASE);
        let lift = Vec3::Y * (size * FOCUS_LIFT_PER_SIZE);
        let side = Vec3::new(-direction.z, 0.0, direction.x).normalize_or_zero()
            * (size * FOCUS_SIDE_PER_SIZE);

        Self {
            position: body_position - back + lift + side,
            look_at: body_position,
        }
    }

    /// Distance of position and look-at from `goal`.
    pub fn error_to(&self, goal: &CameraPose) -> (f32, f32) {
        (
            self.position.distance(goal.position),
            self.look_at.distance(goal.look_at),
        )
    }
}

/// The selected body as seen by the camera this frame.
#[derive(Clone, Copy, Debug)]
pub struct FocusTarget {
    pub position: Vec3,
    pub size: f32,
}

/// Pose the camera should head for. A selection whose body has no world
/// position yet falls back to the overview.
pub fn desired_pose(target: Option<FocusTarget>) -> CameraPose {
    match target {
        Some(target) => CameraPose::framing(target.position, target.size),
        None => CameraPose::overview(),
    }
}

/// Closest the free controls may zoom in.
pub fn min_distance(selected_size: Option<f32>) -> f32 {
    match selected_size {
        Some(size) => size * 1.3 + 1.0,
        None => OVERVIEW_MIN_DISTANCE,
    }
}

/// Rotate `offset` (camera relative to its target) by `yaw` around +Y and by
/// `pitch` towards the poles, keeping its length.
pub fn orbit_offset(offset: Vec3, yaw: f32, pitch: f32) -> Vec3 {
    let radius = offset.length();
    if radius <= f32::EPSILON {
        return offset;
    }
    let polar = (offset.y / radius).clamp(-1.0, 1.0).acos();
    let azimuth = offset.x.atan2(offset.z);

    let polar = (polar + pitch).clamp(MIN_POLAR, MAX_POLAR);
    let azimuth = azimuth + yaw;

    Vec3::new(
        radius * polar.sin() * azimuth.sin(),
        radius * polar.cos(),
        radius * polar.sin() * azimuth.cos(),
    )
}

/// Scale `offset` for a scroll of `scroll` lines, clamped to `[min, max]`.
pub fn zoom_offset(offset: Vec3, scroll: f32, min: f32, max: f32) -> Vec3 {
    let Some(direction) = offset.try_normalize() else {
        return offset;
    };
    let zoom_factor = 1.0 - scroll * ZOOM_SPEED;
    let distance = (offset.length() * zoom_factor).clamp(min, max);
    direction * distance
}

/// Result of one controller step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraStep {
    /// Still flying towards the goal.
    Transitioning,
    /// Arrived this frame; free controls take over from now on.
    Settled,
    /// Free controls active; only the look-at point is being re-centred.
    Free,
}

/// Resource for the camera fly-to animation.
#[derive(Resource, Debug, Clone)]
pub struct CameraFollow {
    pub current: CameraPose,
    pub desired: CameraPose,
    pub transitioning: bool,
    tracked: Option<BodyId>,
}

impl Default for CameraFollow {
    fn default() -> Self {
        Self {
            current: CameraPose {
                position: INITIAL_POSITION,
                look_at: Vec3::ZERO,
            },
            desired: CameraPose::overview(),
            transitioning: false,
            tracked: None,
        }
    }
}

impl CameraFollow {
    /// Selection the controller last reacted to.
    pub fn tracked(&self) -> Option<BodyId> {
        self.tracked
    }

    /// Start a flight if `selection` differs from the last one seen.
    ///
    /// Returns true when a new flight started. A flight already under way is
    /// simply retargeted.
    pub fn observe_selection(&mut self, selection: Option<BodyId>) -> bool {
        if selection == self.tracked {
            return false;
        }
        self.tracked = selection;
        self.transitioning = true;
        true
    }

    /// Advance one frame towards `desired`.
    pub fn step(&mut self, desired: CameraPose) -> CameraStep {
        self.desired = desired;

        if !self.transitioning {
            self.current.look_at = self.current.look_at.lerp(desired.look_at, RECENTER_BLEND);
            return CameraStep::Free;
        }

        self.current.position = self.current.position.lerp(desired.position, TRANSITION_BLEND);
        self.current.look_at = self.current.look_at.lerp(desired.look_at, TRANSITION_BLEND);

        let (position_error, look_error) = self.current.error_to(&desired);
        if position_error < SETTLE_THRESHOLD && look_error < SETTLE_THRESHOLD {
            self.transitioning = false;
            CameraStep::Settled
        } else {
            CameraStep::Transitioning
        }
    }
}

/// Plugin providing camera functionality.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraFollow>()
            .add_systems(Startup, setup_camera)
            .add_systems(OnEnter(AppPhase::SolarSystem), reset_camera)
            .add_systems(
                Update,
                (follow_selection, orbit_controls)
                    .chain()
                    .in_set(SceneSystemSet::Animate),
            );
    }
}

/// Spawn the main camera with a perspective projection.
fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: FIELD_OF_VIEW_DEG.to_radians(),
            far: 2000.0,
            ..default()
        }),
        Transform::from_translation(INITIAL_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
    ));
}

/// Put the camera back at its starting pose whenever the scene is entered.
fn reset_camera(
    mut follow: ResMut<CameraFollow>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    *follow = CameraFollow::default();

    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };
    *transform = Transform::from_translation(INITIAL_POSITION).looking_at(Vec3::ZERO, Vec3::Y);
}

/// Drive the camera towards the selected body (or the overview).
fn follow_selection(
    selected: Res<SelectedBody>,
    bodies: Query<(&BodyVisual, &GlobalTransform)>,
    mut follow: ResMut<CameraFollow>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };

    if follow.observe_selection(selected.id) {
        debug!("Camera retargeting to {:?}", selected.id);
    }

    let target = selected.id.and_then(|id| {
        bodies
            .iter()
            .find(|(visual, _)| visual.id == id)
            .map(|(visual, global)| FocusTarget {
                position: global.translation(),
                size: visual.size,
            })
    });

    // Free controls may have moved the camera since the last frame.
    follow.current.position = transform.translation;

    if follow.step(desired_pose(target)) == CameraStep::Settled {
        debug!("Camera settled on {:?}", selected.id);
    }

    transform.translation = follow.current.position;
    transform.look_at(follow.current.look_at, Vec3::Y);
}

/// Left-drag to orbit, scroll to zoom. Inactive during flights.
fn orbit_controls(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    selected: Res<SelectedBody>,
    follow: Res<CameraFollow>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
    mut contexts: EguiContexts,
) {
    if follow.transitioning {
        return;
    }

    if let Ok(ctx) = contexts.ctx_mut()
        && (ctx.wants_pointer_input() || ctx.is_pointer_over_area())
    {
        return;
    }

    let dragging = mouse_buttons.pressed(MouseButton::Left) && mouse_motion.delta != Vec2::ZERO;
    if !dragging && mouse_scroll.delta.y == 0.0 {
        return;
    }

    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };

    let look_at = follow.current.look_at;
    let mut offset = transform.translation - look_at;

    if dragging {
        offset = orbit_offset(
            offset,
            -mouse_motion.delta.x * ORBIT_SPEED,
            -mouse_motion.delta.y * ORBIT_SPEED,
        );
    }

    let selected_size = selected.id.map(|id| id.data().size);
    offset = zoom_offset(
        offset,
        mouse_scroll.delta.y,
        min_distance(selected_size),
        MAX_DISTANCE,
    );

    transform.translation = look_at + offset;
    transform.look_at(look_at, Vec3::Y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assertions::assert_near;
    use approx::assert_relative_eq;

    #[test]
    fn test_overview_when_nothing_selected() {
        let pose = desired_pose(None);
        assert_eq!(pose, CameraPose::overview());
        assert_eq!(pose.look_at, Vec3::ZERO);
    }

    #[test]
    fn test_framing_body_on_x_axis() {
        let pose = CameraPose::framing(Vec3::new(17.0, 0.0, 0.0), 1.15);
        // back = 3.5 * 1.15 + 3 = 7.025, lift = side = 0.575
        assert_near(pose.position, Vec3::new(9.975, 0.575, 0.575), 1e-4);
        assert_eq!(pose.look_at, Vec3::new(17.0, 0.0, 0.0));
    }

    #[test]
    fn test_framing_at_centre_falls_back_to_z_axis() {
        let pose = CameraPose::framing(Vec3::ZERO, 4.5);
        // back = 18.75 along +Z, side along -X
        assert_near(pose.position, Vec3::new(-2.25, 2.25, -18.75), 1e-4);
    }

    #[test]
    fn test_selection_is_edge_triggered() {
        let mut follow = CameraFollow::default();
        assert!(follow.observe_selection(Some(BodyId::Mars)));
        follow.transitioning = false;
        assert!(!follow.observe_selection(Some(BodyId::Mars)));
        assert!(!follow.transitioning);
        assert!(follow.observe_selection(None));
        assert!(follow.transitioning);
    }

    #[test]
    fn test_settles_and_then_only_recentres() {
        let mut follow = CameraFollow::default();
        follow.observe_selection(Some(BodyId::Earth));
        let goal = CameraPose::framing(Vec3::new(17.0, 0.0, 0.0), 1.15);

        let mut ticks = 0;
        while follow.step(goal) != CameraStep::Settled {
            ticks += 1;
            assert!(ticks < 1000, "camera never settled");
        }
        assert!(!follow.transitioning);

        // User moves the camera; the controller leaves position alone.
        follow.current.position = Vec3::new(30.0, 5.0, 0.0);
        assert_eq!(follow.step(goal), CameraStep::Free);
        assert_eq!(follow.current.position, Vec3::new(30.0, 5.0, 0.0));
    }

    #[test]
    fn test_retarget_mid_flight() {
        let mut follow = CameraFollow::default();
        follow.observe_selection(Some(BodyId::Jupiter));
        let to_jupiter = CameraPose::framing(Vec3::new(32.0, 0.0, 0.0), 3.5);
        for _ in 0..10 {
            follow.step(to_jupiter);
        }
        assert!(follow.transitioning);

        assert!(follow.observe_selection(Some(BodyId::Mercury)));
        let to_mercury = CameraPose::framing(Vec3::new(0.0, 0.0, 8.0), 0.8);
        let (before, _) = follow.current.error_to(&to_mercury);
        follow.step(to_mercury);
        let (after, _) = follow.current.error_to(&to_mercury);

        assert!(follow.transitioning);
        assert_eq!(follow.desired, to_mercury);
        assert!(after < before);
    }

    #[test]
    fn test_orbit_preserves_radius() {
        let offset = Vec3::new(10.0, 5.0, 20.0);
        let rotated = orbit_offset(offset, 0.7, -0.3);
        assert_relative_eq!(rotated.length(), offset.length(), epsilon = 1e-3);
    }

    #[test]
    fn test_orbit_clamped_near_pole() {
        let rotated = orbit_offset(Vec3::new(0.0, 10.0, 1.0), 0.0, -5.0);
        assert!(rotated.y < 10.0);
        assert!(Vec3::new(rotated.x, 0.0, rotated.z).length() > 0.0);
    }

    #[test]
    fn test_zoom_clamps() {
        let offset = Vec3::new(0.0, 0.0, 50.0);
        assert_relative_eq!(zoom_offset(offset, 100.0, 10.0, 200.0).length(), 10.0);
        assert_relative_eq!(zoom_offset(offset, -100.0, 10.0, 200.0).length(), 200.0);
        assert_relative_eq!(zoom_offset(offset, 1.0, 10.0, 200.0).length(), 45.0, epsilon = 1e-4);
    }

    #[test]
    fn test_min_distance_depends_on_selection() {
        assert_eq!(min_distance(None), OVERVIEW_MIN_DISTANCE);
        assert_relative_eq!(min_distance(Some(2.0)), 3.6);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn coord() -> impl Strategy<Value = f32> {
            -150.0f32..150.0
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn flight_error_shrinks_every_tick_and_settles(
                (sx, sy, sz) in (coord(), coord(), coord()),
                (tx, ty, tz) in (coord(), coord(), coord()),
                size in 0.3f32..5.0,
            ) {
                let mut follow = CameraFollow {
                    current: CameraPose { position: Vec3::new(sx, sy, sz), look_at: Vec3::ZERO },
                    ..CameraFollow::default()
                };
                follow.observe_selection(Some(BodyId::Jupiter));
                let desired = CameraPose::framing(Vec3::new(tx, ty, tz), size);

                let (mut last_pos, mut last_look) = follow.current.error_to(&desired);
                let mut settled = false;
                for _ in 0..1000 {
                    let step = follow.step(desired);
                    let (pos, look) = follow.current.error_to(&desired);
                    prop_assert_ne!(step, CameraStep::Free);
                    // Below a hundredth the blend step is lost to f32 rounding.
                    if last_pos > 1e-2 {
                        prop_assert!(pos < last_pos, "position error {last_pos} -> {pos}");
                    } else {
                        prop_assert!(pos <= last_pos + 1e-3);
                    }
                    if last_look > 1e-2 {
                        prop_assert!(look < last_look, "look error {last_look} -> {look}");
                    } else {
                        prop_assert!(look <= last_look + 1e-3);
                    }
                    last_pos = pos;
                    last_look = look;
                    if step == CameraStep::Settled {
                        settled = true;
                        break;
                    }
                }
                prop_assert!(settled);
                prop_assert!(!follow.transitioning);
            }
        }
    }
}
