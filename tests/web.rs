#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Event, HtmlAudioElement, HtmlCanvasElement, MouseEvent, MouseEventInit};

use nightsky::wasm::{attach_visualizer, mount_background};

wasm_bindgen_test_configure!(run_in_browser);

fn canvas() -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

#[wasm_bindgen_test]
fn background_fills_the_window_and_runs_one_loop() {
    let window = web_sys::window().unwrap();
    let canvas = canvas();
    let mut bg = mount_background(canvas.clone(), None)
        .unwrap()
        .expect("2d context available");

    let w = window.inner_width().unwrap().as_f64().unwrap();
    assert_eq!(canvas.width(), w as u32);
    assert_eq!(bg.active_frames(), 1);
    assert_eq!(bg.epoch(), 1.0);

    bg.unmount();
    assert_eq!(bg.active_frames(), 0);
}

#[wasm_bindgen_test]
fn bad_config_is_rejected() {
    assert!(mount_background(canvas(), Some("{\"mouse_radius\": -1}".into())).is_err());
}

#[wasm_bindgen_test]
fn visualizer_waits_for_playback() {
    let audio = HtmlAudioElement::new().unwrap();
    let player = attach_visualizer(audio.into(), canvas())
        .unwrap()
        .expect("2d context available");
    assert_eq!(player.active_frames(), 0);
    assert_eq!(player.progress(), 0.0);
    assert_eq!(player.current_label(), "0:00");
}

#[wasm_bindgen_test]
fn resize_reseeds_once_and_keeps_one_loop() {
    let window = web_sys::window().unwrap();
    let canvas = canvas();
    let mut bg = mount_background(canvas.clone(), None).unwrap().unwrap();

    assert!(bg.resize(500, 400).unwrap());
    assert_eq!((canvas.width(), canvas.height()), (500, 400));
    assert_eq!(bg.epoch(), 2.0);
    assert_eq!(bg.active_frames(), 1);

    assert!(!bg.resize(500, 400).unwrap());
    assert_eq!(bg.epoch(), 2.0);

    // The window listener fits the canvas back to the window.
    window.dispatch_event(&Event::new("resize").unwrap()).unwrap();
    let w = window.inner_width().unwrap().as_f64().unwrap() as u32;
    assert_eq!(canvas.width(), w);
    assert!(bg.epoch() >= 2.0 && bg.epoch() <= 3.0);
    assert_eq!(bg.active_frames(), 1);

    // A second identical resize event changes nothing.
    let epoch = bg.epoch();
    window.dispatch_event(&Event::new("resize").unwrap()).unwrap();
    assert_eq!(bg.epoch(), epoch);
    assert_eq!(bg.active_frames(), 1);

    bg.unmount();
    window.dispatch_event(&Event::new("resize").unwrap()).unwrap();
    assert_eq!(bg.active_frames(), 0);
}

#[wasm_bindgen_test]
fn pointer_events_drive_the_cursor() {
    let window = web_sys::window().unwrap();
    let bg = mount_background(canvas(), None).unwrap().unwrap();
    assert_eq!(bg.cursor(), None);

    let init = MouseEventInit::new();
    init.set_client_x(40);
    init.set_client_y(60);
    let moved = MouseEvent::new_with_mouse_event_init_dict("mousemove", &init).unwrap();
    window.dispatch_event(&moved).unwrap();
    assert_eq!(bg.cursor().as_deref(), Some(&[40.0, 60.0][..]));

    let left = MouseEvent::new("mouseout").unwrap();
    window.dispatch_event(&left).unwrap();
    assert_eq!(bg.cursor(), None);
}
