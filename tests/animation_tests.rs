use std::time::Duration;

use chart_geometry::ChartError;
use chart_geometry::core::{Animation, AnimationController, Easing};

#[test]
fn controller_advances_to_completion() {
    let mut controller =
        AnimationController::new(Animation::enabled(1000).expect("valid duration"))
            .with_easing(Easing::Linear);
    assert_eq!(controller.progress(), 0.0);
    assert!(controller.is_running());

    let progress = controller.tick(Duration::from_millis(250));
    assert!((progress - 0.25).abs() <= 1e-9);

    controller.tick(Duration::from_millis(2000));
    assert_eq!(controller.progress(), 1.0);
    assert!(controller.is_finished());
    assert!(!controller.is_running());
}

#[test]
fn disabled_animation_is_immediately_complete() {
    let mut controller = AnimationController::new(Animation::Disabled);
    assert_eq!(controller.progress(), 1.0);
    assert_eq!(controller.tick(Duration::from_millis(16)), 1.0);
    assert!(!controller.is_running());
}

#[test]
fn zero_duration_is_rejected() {
    assert!(matches!(
        Animation::enabled(0),
        Err(ChartError::InvalidConfig(_))
    ));
    assert_eq!(Animation::default(), Animation::DEFAULT);
    assert_eq!(Animation::FAST.duration(), Duration::from_millis(400));
}

#[test]
fn reset_and_reconfigure_restart_progress() {
    let mut controller = AnimationController::new(Animation::FAST);
    controller.tick(Duration::from_millis(400));
    assert!(controller.is_finished());

    controller.reset();
    assert_eq!(controller.progress(), 0.0);

    controller.tick(Duration::from_millis(100));
    controller.set_animation(Animation::FAST);
    assert!(controller.progress() > 0.0);

    controller.set_animation(Animation::SLOW);
    assert_eq!(controller.progress(), 0.0);
    assert_eq!(controller.animation(), Animation::SLOW);
}

#[test]
fn default_easing_starts_fast_and_settles() {
    let easing = Easing::default();
    assert_eq!(easing, Easing::FastOutSlowIn);
    assert!(easing.apply(0.5) > 0.5);
    assert_eq!(easing.apply(-1.0), 0.0);
    assert!((easing.apply(2.0) - 1.0).abs() <= 1e-12);
}

#[test]
fn ease_in_out_cubic_is_symmetric() {
    let easing = Easing::EaseInOutCubic;
    assert!((easing.apply(0.5) - 0.5).abs() <= 1e-12);
    assert!((easing.apply(0.25) + easing.apply(0.75) - 1.0).abs() <= 1e-12);
}

#[test]
fn cubic_bezier_validates_time_control_points() {
    assert!(Easing::cubic_bezier(0.25, 0.1, 0.25, 1.0).is_ok());
    assert!(Easing::cubic_bezier(1.5, 0.0, 0.5, 1.0).is_err());
    assert!(Easing::cubic_bezier(0.5, f64::NAN, 0.5, 1.0).is_err());

    let linear = Easing::cubic_bezier(0.0, 0.0, 1.0, 1.0).expect("valid curve");
    assert!((linear.apply(0.3) - 0.3).abs() <= 1e-5);
}
