//! Lifecycle tests: container resolution, mount failures, teardown.

use lottie_view_core::{
    AnimationSource, Container, FollowUp, LoopBehavior, LottieView, Phase, Renderer, SourceKind,
    ViewError, ViewProps,
};
use lottie_view_test_fixtures::{sample_document, HandleCall, RecordingEngine};

fn data_props() -> ViewProps {
    ViewProps::data(sample_document())
}

fn mounted_view(engine: &mut RecordingEngine, props: ViewProps) -> LottieView<RecordingEngine> {
    let mut view = LottieView::new(props);
    view.render();
    view.attach(engine).unwrap();
    view.render();
    view
}

#[test]
fn test_render_before_attach_defers() {
    let mut view: LottieView<RecordingEngine> = LottieView::new(data_props());

    view.render();
    view.render();

    // Two handle-less passes collapse into one deferred render request.
    assert_eq!(view.take_follow_ups(), vec![FollowUp::Render]);
    assert!(view.take_follow_ups().is_empty());

    // Still no handle: the next pass queues again.
    view.render();
    assert_eq!(view.take_follow_ups(), vec![FollowUp::Render]);
}

#[test]
fn test_mount_uses_rendered_element_as_container() {
    let mut engine = RecordingEngine::new();
    let mut view: LottieView<RecordingEngine> = LottieView::new(data_props());

    let rendered = view.render();
    view.attach(&mut engine).unwrap();

    let config = engine.last_config().unwrap();
    assert!(config.container.ptr_eq(&rendered));
    assert_eq!(config.container.id(), view.id());
    assert_eq!(view.phase(), Phase::Attached);
}

#[test]
fn test_explicit_container_wins() {
    let mut engine = RecordingEngine::new();
    let external = Container::with_id("host-stage");
    let mut view: LottieView<RecordingEngine> =
        LottieView::new(data_props().with_container(external.clone()));

    let rendered = view.render();
    view.attach(&mut engine).unwrap();

    assert!(rendered.ptr_eq(&external));
    assert!(engine.last_config().unwrap().container.ptr_eq(&external));
}

#[test]
fn test_attach_without_container_fails() {
    let mut engine = RecordingEngine::new();
    let mut view: LottieView<RecordingEngine> = LottieView::new(data_props());

    // No render pass, no caller-supplied container: nothing to mount into.
    let err = view.attach(&mut engine).unwrap_err();
    assert_eq!(err, ViewError::MissingContainer);
    assert!(engine.configs().is_empty());
    assert_eq!(view.phase(), Phase::Idle);
}

#[test]
fn test_attach_twice_fails() {
    let mut engine = RecordingEngine::new();
    let mut view = mounted_view(&mut engine, data_props());

    let err = view.attach(&mut engine).unwrap_err();
    assert!(matches!(err, ViewError::AlreadyAttached { .. }));
    assert_eq!(engine.configs().len(), 1);
}

#[test]
fn test_source_mismatch_fails_attach() {
    let mut engine = RecordingEngine::new();

    let mut props = data_props();
    props.animation_data = None;
    let mut view: LottieView<RecordingEngine> = LottieView::new(props);
    view.render();

    let err = view.attach(&mut engine).unwrap_err();
    assert_eq!(
        err,
        ViewError::SourceMismatch {
            kind: SourceKind::Data,
            missing: "animationData".to_string()
        }
    );
    assert!(engine.configs().is_empty());
}

#[test]
fn test_config_forwards_engine_fields() {
    let mut engine = RecordingEngine::new();
    let props = data_props()
        .with_renderer(Renderer::Canvas)
        .with_looping(LoopBehavior::Count(2))
        .with_autoplay(false)
        .with_name("pulse")
        .with_renderer_settings(serde_json::json!({"clearCanvas": true}));
    let _view = mounted_view(&mut engine, props);

    let config = engine.last_config().unwrap();
    assert_eq!(config.renderer, Renderer::Canvas);
    assert_eq!(config.looping, LoopBehavior::Count(2));
    assert!(!config.autoplay);
    assert_eq!(config.name.as_deref(), Some("pulse"));
    assert_eq!(config.renderer_settings["clearCanvas"], true);
    assert!(matches!(config.source, AnimationSource::Data { .. }));
}

#[test]
fn test_path_source_reaches_engine() {
    let mut engine = RecordingEngine::new();
    let _view = mounted_view(&mut engine, ViewProps::path("animations/pulse.json"));

    match &engine.last_config().unwrap().source {
        AnimationSource::Path { path } => assert_eq!(path, "animations/pulse.json"),
        other => panic!("expected a path source, got {other:?}"),
    }
}

#[test]
fn test_engine_failure_propagates() {
    let mut engine = RecordingEngine::new();
    engine.fail_with("renderer unavailable");

    let mut view: LottieView<RecordingEngine> = LottieView::new(data_props());
    view.render();
    let err = view.attach(&mut engine).unwrap_err();
    assert_eq!(
        err,
        ViewError::Engine {
            message: "renderer unavailable".to_string()
        }
    );

    // The failed mount left no handle behind; renders keep deferring.
    view.render();
    view.take_follow_ups();
    view.render();
    assert_eq!(view.take_follow_ups(), vec![FollowUp::Render]);
}

#[test]
fn test_detach_destroys_exactly_once() {
    let mut engine = RecordingEngine::new();
    let log = engine.log();
    let mut view = mounted_view(&mut engine, data_props());
    let state = engine.last_handle().unwrap();

    log.clear();
    view.detach();
    assert_eq!(log.calls(), vec![HandleCall::Destroy]);
    assert!(state.borrow().destroyed());
    assert_eq!(view.phase(), Phase::Detached);

    // A second detach is a no-op.
    view.detach();
    assert_eq!(log.count(&HandleCall::Destroy), 1);
}

#[test]
fn test_detach_before_attach_is_silent() {
    let engine = RecordingEngine::new();
    let mut view: LottieView<RecordingEngine> = LottieView::new(data_props());

    view.detach();
    assert_eq!(view.phase(), Phase::Detached);
    assert!(engine.log().is_empty());
}

#[test]
fn test_drop_releases_the_handle() {
    let mut engine = RecordingEngine::new();
    let log = engine.log();

    {
        let _view = mounted_view(&mut engine, data_props());
        assert_eq!(log.count(&HandleCall::Destroy), 0);
    }

    assert_eq!(log.count(&HandleCall::Destroy), 1);
    assert!(engine.last_handle().unwrap().borrow().destroyed());
}
