use super::Constraints;
use trellis_ui_graphics::Size;

#[test]
fn unbounded_constraints_keep_desired_size() {
    let c = Constraints::UNBOUNDED;
    assert!(!c.has_bounded_width());
    assert!(!c.has_bounded_height());
    assert_eq!(c.constrain(Size::new(120.0, 40.0)), Size::new(120.0, 40.0));
}

#[test]
fn tight_constraints_force_their_size() {
    let c = Constraints::tight(50.0, 20.0);
    assert_eq!(c.constrain(Size::new(500.0, 1.0)), Size::new(50.0, 20.0));
}

#[test]
fn available_size_bounds_only_finite_axes() {
    let c = Constraints::from_available(Size::new(10.0, f32::INFINITY));
    assert_eq!(c.min_width, 0.0);
    assert!(c.has_bounded_width());
    assert!(!c.has_bounded_height());
}

#[test]
fn loosen_drops_minimums() {
    let c = Constraints::tight(30.0, 30.0).loosen();
    assert_eq!(c.min_width, 0.0);
    assert_eq!(c.max_size(), Size::new(30.0, 30.0));
}
