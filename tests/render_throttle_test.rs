use flap_combat::core::GameState;
use flap_combat::term::RenderThrottle;

#[test]
fn render_throttle_renders_first_frame() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, 1, true));
}

#[test]
fn render_throttle_static_renders_on_change() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, 1, true));
    assert!(t.should_render(1, 2, true));
}

#[test]
fn render_throttle_static_throttles_when_unchanged() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, 1, true));
    assert!(!t.should_render(10, 1, true));
    assert!(!t.should_render(249, 1, true));
    assert!(t.should_render(250, 1, true));
}

#[test]
fn render_throttle_dynamic_always_renders() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, 1, false));
    assert!(t.should_render(1, 1, false));
    assert!(t.should_render(2, 1, false));
}

#[test]
fn render_throttle_reset_forces_next_frame() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, 1, true));
    assert!(!t.should_render(5, 1, true));
    t.reset();
    assert!(t.should_render(6, 1, true));
}

#[test]
fn start_screen_is_static_and_stable() {
    let mut gs = GameState::new(4);
    let before = gs.snapshot();
    assert!(before.is_static());

    // Frames on the start screen change nothing a renderer would see.
    gs.frame(0);
    gs.frame(500);
    let after = gs.snapshot();
    assert_eq!(before.fingerprint(), after.fingerprint());

    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, before.fingerprint(), before.is_static()));
    assert!(!t.should_render(16, after.fingerprint(), after.is_static()));
}

#[test]
fn running_frames_always_render() {
    let mut gs = GameState::new(4);
    gs.frame(0);
    gs.flap();
    let mut t = RenderThrottle::new(250);
    for i in 1..10u64 {
        gs.frame(i * 16);
        let snap = gs.snapshot();
        assert!(!snap.is_static());
        assert!(t.should_render(i * 16, snap.fingerprint(), snap.is_static()));
    }
}
