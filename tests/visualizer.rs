mod common;

use std::cell::Cell;

use common::{Call, CountingScheduler, FixedSource, RecordingSurface};
use nightsky::visualizer::{
    waveform_points, Playback, VisualizerLoop, Waveform, GRADIENT_END, GRADIENT_START, LINE_WIDTH,
};
use nightsky::Error;

const PLAYING: Playback = Playback {
    paused: false,
    ended: false,
    duration: 180.0,
};

#[test]
fn paused_or_unloaded_playback_draws_nothing() {
    let mut waveform = Waveform::new(4);
    let mut source = FixedSource::new(vec![0, 64, 128, 255]);
    let mut surface = RecordingSurface::default();

    let idle = [
        Playback::default(),
        Playback { paused: true, ..PLAYING },
        Playback { ended: true, ..PLAYING },
        Playback { duration: 0.0, ..PLAYING },
        Playback { duration: f64::NAN, ..PLAYING },
    ];
    for playback in idle {
        assert!(!waveform.draw(&mut source, playback, 1000.0, 150.0, &mut surface));
    }
    assert!(surface.calls.is_empty());
    assert_eq!(source.reads, 0);
}

#[test]
fn live_playback_clears_and_strokes_one_gradient_path() {
    let mut waveform = Waveform::new(1024);
    let mut source = FixedSource::new(vec![0, 64, 128, 255]);
    let mut surface = RecordingSurface::default();

    assert!(waveform.draw(&mut source, PLAYING, 1000.0, 150.0, &mut surface));
    assert_eq!(waveform.samples().len(), 4);
    assert_eq!(surface.calls.len(), 2);
    assert_eq!(surface.calls[0], Call::Clear);
    match &surface.calls[1] {
        Call::Polyline { points, start, end, width } => {
            assert_eq!(points.len(), 5);
            assert_eq!((*start, *end, *width), (GRADIENT_START, GRADIENT_END, LINE_WIDTH));
        }
        other => panic!("expected a polyline, got {other:?}"),
    }
}

#[test]
fn samples_map_around_the_midline() {
    let pts = waveform_points(&[0, 64, 128, 255], 1000.0, 150.0);
    assert_eq!(pts[0], (0.0, 0.0));
    assert_eq!(pts[1], (250.0, 37.5));
    assert_eq!(pts[2], (500.0, 75.0));
    assert!((pts[3].1 - (75.0 + 127.0 / 128.0 * 75.0)).abs() < 1e-12);
    assert_eq!(pts[4], (1000.0, 75.0));

    assert_eq!(waveform_points(&[], 1000.0, 150.0), vec![(1000.0, 75.0)]);
}

#[test]
fn graph_is_built_once_across_play_pause_cycles() {
    let sched = CountingScheduler::default();
    let mut vis: VisualizerLoop<FixedSource, _> = VisualizerLoop::new(sched.clone());
    let builds = Cell::new(0);
    let build = || {
        builds.set(builds.get() + 1);
        Ok(FixedSource::new(vec![128; 8]))
    };

    vis.on_play(build).unwrap();
    assert_eq!(vis.active_frames(), 1);
    vis.on_pause();
    assert_eq!(vis.active_frames(), 0);
    assert_eq!(sched.outstanding(), 0);

    vis.on_play(build).unwrap();
    vis.on_play(build).unwrap();
    assert_eq!(builds.get(), 1);
    assert_eq!(sched.outstanding(), 1);
    assert_eq!(vis.waveform().samples().len(), 8);
}

#[test]
fn frames_rearm_only_while_live() {
    let sched = CountingScheduler::default();
    let mut vis = VisualizerLoop::new(sched.clone());
    vis.on_play(|| Ok(FixedSource::new(vec![100, 150]))).unwrap();

    let mut surface = RecordingSurface::default();
    for _ in 0..3 {
        assert!(sched.fire());
        assert!(vis.on_frame(PLAYING, 300.0, 100.0, &mut surface).unwrap());
        assert_eq!(sched.outstanding(), 1);
    }
    assert_eq!(vis.graph().unwrap().reads, 3);

    // Playback ended between frames: nothing drawn, loop winds down, the
    // last waveform stays on screen.
    let drawn = surface.calls.len();
    assert!(sched.fire());
    let ended = Playback { ended: true, ..PLAYING };
    assert!(!vis.on_frame(ended, 300.0, 100.0, &mut surface).unwrap());
    assert_eq!(surface.calls.len(), drawn);
    assert_eq!(sched.outstanding(), 0);
}

#[test]
fn play_before_metadata_keeps_the_loop_armed_until_it_can_draw() {
    let sched = CountingScheduler::default();
    let mut vis = VisualizerLoop::new(sched.clone());
    vis.on_play(|| Ok(FixedSource::new(vec![0, 255]))).unwrap();

    let mut surface = RecordingSurface::default();
    let loading = Playback { duration: f64::NAN, ..PLAYING };
    for _ in 0..3 {
        assert!(sched.fire());
        assert!(!vis.on_frame(loading, 300.0, 100.0, &mut surface).unwrap());
        assert_eq!(vis.active_frames(), 1);
        assert_eq!(sched.outstanding(), 1);
    }
    assert!(surface.calls.is_empty());
    assert_eq!(vis.graph().unwrap().reads, 0);

    // Metadata arrives while the element keeps playing.
    assert!(sched.fire());
    assert!(vis.on_frame(PLAYING, 300.0, 100.0, &mut surface).unwrap());
    assert_eq!(surface.calls.len(), 2);
    assert_eq!(vis.active_frames(), 1);
}

#[test]
fn paused_frame_stops_the_loop() {
    let sched = CountingScheduler::default();
    let mut vis = VisualizerLoop::new(sched.clone());
    vis.on_play(|| Ok(FixedSource::new(vec![128]))).unwrap();

    let mut surface = RecordingSurface::default();
    assert!(sched.fire());
    let paused = Playback { paused: true, duration: f64::NAN, ..PLAYING };
    assert!(!vis.on_frame(paused, 300.0, 100.0, &mut surface).unwrap());
    assert_eq!(vis.active_frames(), 0);
    assert_eq!(sched.outstanding(), 0);
}

#[test]
fn frame_without_a_graph_draws_nothing() {
    let mut vis: VisualizerLoop<FixedSource, _> = VisualizerLoop::new(CountingScheduler::default());
    let mut surface = RecordingSurface::default();
    assert!(!vis.on_frame(PLAYING, 300.0, 100.0, &mut surface).unwrap());
    assert!(surface.calls.is_empty());
}

#[test]
fn failed_graph_build_arms_nothing_and_retries_next_play() {
    let sched = CountingScheduler::default();
    let mut vis: VisualizerLoop<FixedSource, _> = VisualizerLoop::new(sched.clone());

    let err = vis
        .on_play(|| Err(Error::AudioGraph("no user gesture".into())))
        .unwrap_err();
    assert!(matches!(err, Error::AudioGraph(_)));
    assert!(vis.graph().is_none());
    assert_eq!(sched.outstanding(), 0);

    vis.on_play(|| Ok(FixedSource::new(vec![128]))).unwrap();
    assert!(vis.graph().is_some());
    assert_eq!(sched.outstanding(), 1);
}

#[test]
fn teardown_hands_back_the_graph_and_stops() {
    let sched = CountingScheduler::default();
    let mut vis = VisualizerLoop::new(sched.clone());
    vis.on_play(|| Ok(FixedSource::new(vec![1, 2, 3]))).unwrap();

    let graph = vis.teardown().expect("graph was built");
    assert_eq!(graph.samples, vec![1, 2, 3]);
    assert_eq!(sched.outstanding(), 0);
    assert!(vis.graph().is_none());
}
