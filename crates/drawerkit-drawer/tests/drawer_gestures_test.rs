//! End-to-end drawer gestures driven through the intercept/touch protocol.

use drawerkit_drawer::{
    CloseType, Constraints, Dimension, DrawerConfig, DrawerEdge, DrawerError, DrawerLayout,
    Gravity, LayoutDirection, LayoutParams, Mode, Stacking,
};
use drawerkit_gesture::{ElementId, PointerEventKind};
use drawerkit_graphics::Rect;
use drawerkit_testing::{
    assert_approx_eq, assert_rect_approx_eq, FakeScrollQuery, GestureRobot, Notification,
    RecordingListener,
};

const CONTENT: ElementId = ElementId(1);
const LEFT: ElementId = ElementId(2);
const RIGHT: ElementId = ElementId(3);
const TOP: ElementId = ElementId(4);
const BOTTOM: ElementId = ElementId(5);

fn left_drawer() -> LayoutParams {
    LayoutParams::drawer(Gravity::Left).with_width(Dimension::Fixed(300.0))
}

fn build(config: DrawerConfig, drawers: &[(ElementId, LayoutParams)]) -> DrawerLayout {
    let mut layout = DrawerLayout::new(config);
    layout
        .add_child(CONTENT, LayoutParams::content())
        .expect("content attaches");
    for &(id, params) in drawers {
        layout.add_child(id, params).expect("drawer attaches");
    }
    layout
        .measure(Constraints::tight(1000.0, 800.0))
        .expect("measure succeeds");
    layout.layout();
    layout
}

fn robot(drawers: &[(ElementId, LayoutParams)]) -> GestureRobot<DrawerLayout> {
    GestureRobot::new(build(DrawerConfig::default(), drawers))
}

fn four_drawers() -> Vec<(ElementId, LayoutParams)> {
    vec![
        (LEFT, left_drawer()),
        (
            RIGHT,
            LayoutParams::drawer(Gravity::Right).with_width(Dimension::Fixed(300.0)),
        ),
        (
            TOP,
            LayoutParams::drawer(Gravity::Top).with_height(Dimension::Fixed(200.0)),
        ),
        (
            BOTTOM,
            LayoutParams::drawer(Gravity::Bottom).with_height(Dimension::Fixed(200.0)),
        ),
    ]
}

fn open_count(layout: &DrawerLayout) -> usize {
    let panels = layout.coordinator();
    DrawerEdge::ALL
        .into_iter()
        .filter(|&edge| panels.panel(edge).is_open(panels.children()))
        .count()
}

#[test]
fn slow_drag_past_half_opens_the_drawer() {
    let mut robot = robot(&[(LEFT, left_drawer())]);

    // 8px every 16ms: 500 px/s.
    robot.drag_to((500.0, 400.0), (700.0, 400.0), 25);
    assert_approx_eq(
        robot.host().visible_size(DrawerEdge::Left),
        200.0,
        0.01,
        "visible size before release",
    );
    robot.up();
    assert!(robot.host().is_open());

    robot.pump_frames();
    let layout = robot.host();
    assert_eq!(layout.visible_size(DrawerEdge::Left), 300.0);
    assert_eq!(layout.child_frame(LEFT), Some(Rect::new(0.0, 0.0, 300.0, 800.0)));
    assert_eq!(layout.child_frame(CONTENT), Some(Rect::new(300.0, 0.0, 1000.0, 800.0)));
    assert!(layout.is_child_visible(LEFT));
}

#[test]
fn still_release_below_threshold_closes_open_drawer() {
    let mut robot = robot(&[(LEFT, left_drawer())]);
    robot.host_mut().open(Gravity::Left);
    robot.pump_frames();
    assert_eq!(robot.host().visible_size(DrawerEdge::Left), 300.0);
    robot.host_mut().take_events();

    robot.drag_and_hold((600.0, 400.0), (400.0, 400.0), 25);
    assert!(!robot.host().is_open());
    robot.pump_frames();

    let layout = robot.host_mut();
    assert_eq!(layout.visible_size(DrawerEdge::Left), 0.0);
    assert!(!layout.is_child_visible(LEFT));
    let events = layout.take_events();
    assert_eq!(events.len(), 1);
    assert!(!events[0].is_open);
}

#[test]
fn fast_fling_opens_from_a_short_drag() {
    let mut robot = robot(&[(LEFT, left_drawer())]);

    // Two 25px moves 16ms apart: well past the settle velocity.
    robot.drag((500.0, 400.0), (550.0, 400.0), 2);
    assert!(robot.host().is_open());
    robot.pump_frames();
    assert_eq!(robot.host().visible_size(DrawerEdge::Left), 300.0);
}

#[test]
fn concat_drag_moves_drawer_and_content_together() {
    let mut robot = robot(&[(LEFT, left_drawer())]);
    robot.drag_to((500.0, 400.0), (600.0, 400.0), 10);

    let layout = robot.host();
    assert_rect_approx_eq(
        layout.child_frame(LEFT).unwrap_or_default(),
        Rect::new(-200.0, 0.0, 300.0, 800.0),
        0.01,
        "drawer",
    );
    assert_rect_approx_eq(
        layout.child_frame(CONTENT).unwrap_or_default(),
        Rect::new(100.0, 0.0, 1000.0, 800.0),
        0.01,
        "content",
    );
}

#[test]
fn cover_drawer_in_front_moves_alone() {
    let mut robot = robot(&[(LEFT, left_drawer().with_mode(Mode::Cover))]);
    robot.drag_to((500.0, 400.0), (600.0, 400.0), 10);

    let layout = robot.host();
    assert_approx_eq(layout.child_frame(LEFT).unwrap_or_default().x, -200.0, 0.01, "drawer x");
    assert_eq!(layout.child_frame(CONTENT).map(|frame| frame.x), Some(0.0));
}

#[test]
fn front_stacking_overrides_attach_order() {
    let mut layout = DrawerLayout::new(DrawerConfig::default());
    layout
        .add_child(
            LEFT,
            left_drawer()
                .with_mode(Mode::Cover)
                .with_stacking(Stacking::Front),
        )
        .expect("drawer attaches");
    layout
        .add_child(CONTENT, LayoutParams::content())
        .expect("content attaches");
    layout
        .measure(Constraints::tight(1000.0, 800.0))
        .expect("measure succeeds");
    layout.layout();

    let mut robot = GestureRobot::new(layout);
    robot.drag_to((500.0, 400.0), (600.0, 400.0), 10);

    let layout = robot.host();
    assert_approx_eq(layout.child_frame(LEFT).unwrap_or_default().x, -200.0, 0.01, "drawer x");
    assert_eq!(layout.child_frame(CONTENT).map(|frame| frame.x), Some(0.0));
}

#[test]
fn visible_size_stays_within_panel_extent() {
    let mut layout = build(DrawerConfig::default(), &[(LEFT, left_drawer())]);
    for distance in [120.0, 250.0, -50.0, 900.0, -1200.0, 30.0, 299.0] {
        layout.scroll_panel_by(DrawerEdge::Left, distance);
        let visible = layout.visible_size(DrawerEdge::Left);
        assert!(
            (0.0..=300.0).contains(&visible),
            "visible size {visible} out of range after {distance}"
        );
    }
}

#[test]
fn open_then_close_settles_back_to_zero() {
    let mut layout = build(DrawerConfig::default(), &[(LEFT, left_drawer())]);
    let mut robot = GestureRobot::new(layout);
    robot.host_mut().settle(DrawerEdge::Left, true);
    robot.pump_frames();
    robot.host_mut().settle(DrawerEdge::Left, false);
    robot.pump_frames();
    layout = robot.into_host();
    assert_eq!(layout.visible_size(DrawerEdge::Left), 0.0);
    assert_eq!(layout.child_frame(CONTENT).map(|frame| frame.x), Some(0.0));
}

#[test]
fn at_most_one_drawer_is_open() {
    let mut robot = robot(&four_drawers());
    for gravity in [
        Gravity::Left,
        Gravity::Top,
        Gravity::Right,
        Gravity::Bottom,
        Gravity::Left,
    ] {
        robot.host_mut().open(gravity);
        assert_eq!(open_count(robot.host()), 1);
        robot.pump_frames();
        assert_eq!(open_count(robot.host()), 1);
    }
    assert_eq!(robot.host().opened_drawer(), Some(LEFT));
    for edge in [DrawerEdge::Top, DrawerEdge::Right, DrawerEdge::Bottom] {
        assert_eq!(robot.host().visible_size(edge), 0.0);
    }
}

#[test]
fn opening_while_another_drawer_closes_hides_it() {
    let mut robot = robot(&[
        (LEFT, left_drawer().with_mode(Mode::Cover)),
        (
            TOP,
            LayoutParams::drawer(Gravity::Top).with_height(Dimension::Fixed(200.0)),
        ),
    ]);
    robot.host_mut().open(Gravity::Left);
    robot.pump_frames();
    robot.host_mut().close();
    for _ in 0..3 {
        robot.advance_frame();
    }
    assert!(robot.host().visible_size(DrawerEdge::Left) > 0.0);

    robot.host_mut().open(Gravity::Top);
    robot.pump_frames();

    let layout = robot.host_mut();
    assert_eq!(layout.visible_size(DrawerEdge::Left), 0.0);
    assert_eq!(layout.child_frame(LEFT).map(|frame| frame.x), Some(-300.0));
    assert!(!layout.coordinator().children()[&LEFT].visible);
    assert_eq!(layout.visible_size(DrawerEdge::Top), 200.0);

    let mut listener = RecordingListener::new();
    layout.dispatch_events(&mut listener);
    assert_eq!(
        listener.take(),
        vec![
            Notification::DrawerOpened(LEFT, DrawerEdge::Left),
            Notification::DrawerClosed(LEFT, DrawerEdge::Left),
            Notification::DrawerOpened(TOP, DrawerEdge::Top),
        ]
    );
}

#[test]
fn opening_another_edge_reports_both_transitions() {
    let mut robot = robot(&four_drawers());
    robot.host_mut().open(Gravity::Left);
    robot.pump_frames();
    robot.host_mut().open(Gravity::Right);
    robot.pump_frames();

    let mut listener = RecordingListener::new();
    robot.host_mut().dispatch_events(&mut listener);
    assert_eq!(
        listener.take(),
        vec![
            Notification::DrawerOpened(LEFT, DrawerEdge::Left),
            Notification::DrawerClosed(LEFT, DrawerEdge::Left),
            Notification::DrawerOpened(RIGHT, DrawerEdge::Right),
        ]
    );
    assert!(!robot.host().has_pending_events());
}

#[test]
fn vertical_start_without_vertical_drawer_keeps_left_draggable() {
    // The wrong-axis lock only engages once an edge has been selected, so
    // a gesture that opens vertically with nothing to select can still
    // turn into a horizontal drag.
    let mut robot = robot(&[(LEFT, left_drawer())]);
    robot.down(500.0, 400.0);
    robot.move_to(502.0, 420.0);
    assert!(!robot.host().engine().is_dragging());
    robot.move_to(540.0, 422.0);

    assert!(robot.host().engine().is_dragging());
    assert_approx_eq(robot.host().visible_size(DrawerEdge::Left), 38.0, 0.01, "visible size");
}

#[test]
fn vertical_gesture_drags_only_the_top_drawer() {
    let mut robot = robot(&four_drawers());
    robot.drag_to((500.0, 400.0), (502.0, 500.0), 5);

    let layout = robot.host();
    assert_eq!(layout.coordinator().active_edge(), Some(DrawerEdge::Top));
    assert_approx_eq(layout.visible_size(DrawerEdge::Top), 100.0, 0.01, "top visible");
    assert_eq!(layout.visible_size(DrawerEdge::Left), 0.0);
}

#[test]
fn tap_on_content_closes_open_drawer() {
    let mut robot = robot(&[(LEFT, left_drawer())]);
    robot.host_mut().open(Gravity::Left);
    robot.pump_frames();

    robot.tap(600.0, 400.0);
    assert!(!robot.host().is_open());
    robot.pump_frames();
    assert_eq!(robot.host().visible_size(DrawerEdge::Left), 0.0);
}

#[test]
fn tap_on_content_during_a_closing_settle_keeps_it_closing() {
    let mut robot = robot(&[(LEFT, left_drawer())]);
    robot.host_mut().open(Gravity::Left);
    robot.pump_frames();
    robot.host_mut().close();
    robot.advance_frame();
    robot.advance_frame();
    assert!(robot.host().visible_size(DrawerEdge::Left) > 150.0);

    // The down catches the settle, so the gesture counts as a drag that
    // never moved. Released as a drag it would reopen past half.
    robot.tap(900.0, 400.0);
    assert!(!robot.host().engine().is_dragging());
    assert!(!robot.host().is_open());

    robot.pump_frames();
    assert_eq!(robot.host().visible_size(DrawerEdge::Left), 0.0);
    assert_eq!(robot.host().child_frame(CONTENT).map(|frame| frame.x), Some(0.0));
}

#[test]
fn tap_on_open_drawer_leaves_it_open() {
    let mut robot = robot(&[(LEFT, left_drawer())]);
    robot.host_mut().open(Gravity::Left);
    robot.pump_frames();

    robot.tap(150.0, 400.0);
    assert!(robot.host().is_open());
}

#[test]
fn locked_drawer_ignores_drags_but_opens_programmatically() {
    let mut robot = robot(&[(LEFT, left_drawer())]);
    robot.host_mut().lock(Gravity::Left, true);
    assert!(robot.host().is_locked(Gravity::Left));

    robot.drag((500.0, 400.0), (800.0, 400.0), 10);
    assert_eq!(robot.host().visible_size(DrawerEdge::Left), 0.0);

    robot.host_mut().open(Gravity::Left);
    robot.pump_frames();
    assert_eq!(robot.host().visible_size(DrawerEdge::Left), 300.0);
}

#[test]
fn always_close_drawer_never_stays_open_after_drag() {
    let mut robot = robot(&[(LEFT, left_drawer().with_close_type(CloseType::AlwaysClose))]);
    robot.drag((500.0, 400.0), (790.0, 400.0), 10);
    assert!(!robot.host().is_open());
    robot.pump_frames();
    assert_eq!(robot.host().visible_size(DrawerEdge::Left), 0.0);
}

#[test]
fn consuming_child_loses_gesture_once_drag_begins() {
    let layout = build(DrawerConfig::default(), &[(LEFT, left_drawer())]);
    let mut robot = GestureRobot::new(layout).with_consuming_children(true);

    robot.drag_to((500.0, 400.0), (700.0, 400.0), 25);
    assert_eq!(
        robot.child_events(),
        &[
            PointerEventKind::Down,
            PointerEventKind::Move,
            PointerEventKind::Cancel
        ]
    );
    // The claiming move is consumed by the intercept phase.
    assert_approx_eq(robot.host().visible_size(DrawerEdge::Left), 184.0, 0.01, "visible size");
}

#[test]
fn scrollable_content_keeps_the_gesture() {
    let scroll = FakeScrollQuery::new();
    scroll.set_scrollable(CONTENT, true, false);
    let mut layout = build(DrawerConfig::default(), &[(LEFT, left_drawer())]);
    layout.set_scroll_query(Box::new(scroll.clone()));
    let mut robot = GestureRobot::new(layout).with_consuming_children(true);

    robot.drag((500.0, 400.0), (700.0, 400.0), 10);
    assert!(!robot.child_events().contains(&PointerEventKind::Cancel));
    assert_eq!(robot.host().visible_size(DrawerEdge::Left), 0.0);
    assert!(scroll.stopped().is_empty());
}

#[test]
fn edge_swipe_wins_over_scrollable_content() {
    let scroll = FakeScrollQuery::new();
    scroll.set_scrollable(CONTENT, true, false);
    let mut layout = build(DrawerConfig::default(), &[(LEFT, left_drawer())]);
    layout.set_scroll_query(Box::new(scroll.clone()));
    let mut robot = GestureRobot::new(layout).with_consuming_children(true);

    robot.drag_to((5.0, 400.0), (105.0, 400.0), 5);
    assert_eq!(robot.child_events().last(), Some(&PointerEventKind::Cancel));
    assert_approx_eq(robot.host().visible_size(DrawerEdge::Left), 80.0, 0.01, "visible size");
    assert_eq!(scroll.stopped(), vec![CONTENT]);
}

#[test]
fn disallow_intercept_closes_open_drawer() {
    let mut robot = robot(&[(LEFT, left_drawer())]);
    robot.host_mut().open(Gravity::Left);
    robot.pump_frames();

    robot.request_disallow_intercept(true);
    robot.pump_frames();
    assert!(!robot.host().is_open());
    assert_eq!(robot.host().visible_size(DrawerEdge::Left), 0.0);
}

#[test]
fn second_pointer_takes_over_the_drag() {
    let mut robot = robot(&[(LEFT, left_drawer())]);
    robot.down(500.0, 400.0);
    robot.move_to(516.0, 400.0);
    robot.move_to(532.0, 400.0);
    assert_approx_eq(robot.host().visible_size(DrawerEdge::Left), 32.0, 0.01, "first pointer");

    robot.pointer_down(1, 100.0, 400.0);
    robot.move_pointer(1, 120.0, 400.0);
    assert_approx_eq(robot.host().visible_size(DrawerEdge::Left), 32.0, 0.01, "inactive pointer");

    robot.pointer_up(0);
    robot.move_pointer(1, 170.0, 400.0);
    assert_approx_eq(robot.host().visible_size(DrawerEdge::Left), 82.0, 0.01, "adopted pointer");
}

#[test]
fn start_gravity_follows_layout_direction() {
    let config = DrawerConfig::default().with_layout_direction(LayoutDirection::Rtl);
    let mut layout = build(
        config,
        &[(
            LEFT,
            LayoutParams::drawer(Gravity::Start).with_width(Dimension::Fixed(300.0)),
        )],
    );
    assert_eq!(layout.coordinator().panel(DrawerEdge::Right).drawer(), Some(LEFT));
    assert_eq!(layout.child_frame(LEFT), Some(Rect::new(1000.0, 0.0, 300.0, 800.0)));

    layout.open(Gravity::Start);
    assert_eq!(layout.opened_edge(), Some(DrawerEdge::Right));
}

#[test]
fn sixth_child_is_a_configuration_error() {
    let mut layout = build(DrawerConfig::default(), &four_drawers());
    assert_eq!(
        layout.add_child(ElementId(6), LayoutParams::drawer(Gravity::Left)),
        Err(DrawerError::TooManyChildren { max: 5 })
    );
    assert!(layout.remove_child(TOP).is_ok());
    assert_eq!(
        layout.remove_child(TOP),
        Err(DrawerError::UnknownChild { id: TOP })
    );
}

#[test]
fn scrim_alpha_tracks_reveal() {
    let mut robot = robot(&[(LEFT, left_drawer())]);
    assert!(robot.host().scrim().is_none());

    robot.host_mut().open(Gravity::Left);
    robot.pump_frames();
    let scrim = robot.host().scrim().expect("open drawer has a scrim");
    assert_eq!(scrim.rect, Rect::from_ltrb(300.0, 0.0, 1000.0, 800.0));
    assert_approx_eq(scrim.color.a(), 0.6, 0.01, "scrim alpha");
}
