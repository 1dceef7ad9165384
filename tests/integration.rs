use shapeview_engine::geom::{Point2, Tolerance};
use shapeview_engine::render::{RecordingBackend, RenderBackend, parse_shader_source};
use shapeview_engine::scene::{App, InputState, SceneDesc, ShapeKind};
use shapeview_engine::BezierCurve;

#[test]
fn full_frame_cycle_uploads_draws_and_picks() {
    let mut app = App::new(800.0, 600.0);
    let mut backend = RecordingBackend::new();

    // Simulate a few frames of flying toward the scene while clicking the
    // center pixel.
    let input = InputState {
        move_forward: true,
        pick_at: Some((400.0, 300.0)),
        ..InputState::default()
    };
    for _ in 0..10 {
        app.update(&input, 0.016);
    }

    let hit = app.last_hit().expect("the sphere stays dead ahead");
    assert_eq!(hit.shape_index, 1);
    // The camera closed in, so the hit is nearer than the initial 5 units.
    assert!(hit.distance < 5.0);

    let handles = app.upload_scene(&mut backend);
    app.draw_scene(&mut backend, &handles);
    assert_eq!(backend.uploads.len(), app.shapes().len());
    assert_eq!(backend.draws.len(), app.shapes().len());
    assert_eq!(backend.live_handles().len(), app.shapes().len());
}

#[test]
fn interactive_curve_session_matches_the_original_demo() {
    // The four control points of the curve demo's startup state.
    let mut curve = BezierCurve::new(100);
    curve.add_control_point(Point2::new(-0.8, -0.8));
    curve.add_control_point(Point2::new(-0.3, 0.8));
    curve.add_control_point(Point2::new(0.3, -0.8));
    curve.add_control_point(Point2::new(0.8, 0.8));

    assert_eq!(curve.point_count(), 101);
    assert_eq!(curve.curve_points().len(), 202);

    // The drawn line strip starts and ends on the outer control points.
    let flat = curve.curve_points();
    let tol = Tolerance::DEFAULT;
    assert!(tol.approx_eq_point2(Point2::new(flat[0], flat[1]), Point2::new(-0.8, -0.8)));
    assert!(tol.approx_eq_point2(
        Point2::new(flat[200], flat[201]),
        Point2::new(0.8, 0.8)
    ));

    curve.clear_control_points();
    assert_eq!(curve.point_count(), 0);
    assert!(curve.control_points().is_empty());
    assert!(curve.curve_points().is_empty());
}

#[test]
fn regenerated_shapes_reupload_cleanly() {
    let mut app = App::new(800.0, 600.0);
    let mut backend = RecordingBackend::new();

    let first = app.upload_scene(&mut backend);

    // Crank the sphere resolution; the owning shape regenerates its mesh
    // and the old buffer can be released before the new upload.
    if let Some(shape) = app.shapes().get(1) {
        assert_eq!(shape.kind().name(), "sphere");
    }
    let input = InputState {
        select_shape: Some(1),
        ..InputState::default()
    };
    app.update(&input, 0.016);
    app.active_shape_mut()
        .expect("selection is in range")
        .modify_kind(|kind| {
            if let ShapeKind::Sphere { sectors, stacks, .. } = kind {
                *sectors *= 2;
                *stacks *= 2;
            }
        });

    for handle in first {
        backend.free_mesh(handle);
    }
    let second = app.upload_scene(&mut backend);
    assert_eq!(backend.live_handles(), second);

    // The re-uploaded sphere is denser than the first pass.
    assert!(backend.uploads[4].vertex_count > backend.uploads[1].vertex_count);
}

#[test]
fn scene_json_survives_a_full_roundtrip() {
    let app = App::new(800.0, 600.0);
    let json = serde_json::to_string(&app.scene_desc()).expect("serialize scene");
    let desc: SceneDesc = serde_json::from_str(&json).expect("parse scene");

    let mut restored = App::with_shapes(800.0, 600.0, Vec::new());
    restored.load_scene(desc);

    assert_eq!(restored.shapes().len(), 3);
    for (restored_shape, original) in restored.shapes().iter().zip(app.shapes()) {
        assert_eq!(restored_shape.kind(), original.kind());
        assert_eq!(restored_shape.mesh(), original.mesh());
    }
}

#[test]
fn combined_shader_files_split_into_stages() {
    let combined = "\
#shader vertex
layout(location = 0) in vec3 position;
layout(location = 1) in vec3 normal;
uniform mat4 u_Model;
void main() { gl_Position = u_Model * vec4(position, 1.0); }
#shader fragment
uniform vec4 u_Color;
out vec4 color;
void main() { color = u_Color; }
";
    let source = parse_shader_source(combined).expect("well-formed source");
    assert!(source.vertex.contains("u_Model"));
    assert!(source.fragment.contains("u_Color"));
    assert!(!source.vertex.contains("out vec4 color"));
}
