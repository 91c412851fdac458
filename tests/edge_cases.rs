//! Edge case and boundary condition tests across the display stack

use rs_matrixclock::config::{ClockConfig, Config, SensorConfig};
use rs_matrixclock::font::Font8x16;
use rs_matrixclock::hal::{MockBus, MockConnectivity, MockDelay, MockSensor};
use rs_matrixclock::render::{RenderEngine, RenderError};
use rs_matrixclock::scheduler::{DisplayScheduler, Message};
use rs_matrixclock::text::{humidity_text, pressure_text, temperature_text};
use rs_matrixclock::traits::{GlyphSource, Offline, TimeOfDay};
use rs_matrixclock::{Cell, CellColor, Frame, PANEL_CELLS, VISIBLE_CELLS};

type TestScheduler = DisplayScheduler<MockBus, MockDelay, Font8x16, MockSensor, MockConnectivity>;

const NOON: TimeOfDay = TimeOfDay::new(12, 0, 0);

fn engine() -> RenderEngine<MockBus, MockDelay> {
    RenderEngine::new(MockBus::new(), MockDelay::new())
}

fn scheduler_with(config: Config) -> TestScheduler {
    DisplayScheduler::new(
        engine(),
        Font8x16,
        MockSensor::new(),
        MockConnectivity::new(),
        MockDelay::new(),
        config,
    )
}

// ============================================================================
// Panel Width Boundaries
// ============================================================================

#[test]
fn text_filling_the_panel_exactly_renders() {
    let mut engine = engine();
    let mut frame = Frame::new();
    Font8x16
        .resolve(
            "THE QUICK BROWN FOX JUMPS OVER!!",
            CellColor::Green,
            &mut frame,
        )
        .unwrap();
    assert_eq!(frame.len(), PANEL_CELLS);

    engine.render_static(frame.cells()).unwrap();
    assert_eq!(engine.bus().row_writes.len(), 16);
    assert!(engine
        .bus()
        .row_writes
        .iter()
        .all(|write| write.cells.len() == PANEL_CELLS));
}

#[test]
fn text_one_past_the_cell_budget_fails_resolution() {
    let mut frame = Frame::new();
    let result = Font8x16.resolve(
        "THE QUICK BROWN FOX JUMPS OVER!!!",
        CellColor::Green,
        &mut frame,
    );
    assert!(result.is_err());
    // Everything that fit was pushed before the overflow.
    assert_eq!(frame.len(), PANEL_CELLS);
}

#[test]
fn overfull_cell_slice_is_rejected_untouched() {
    let mut engine = engine();
    let cells = [Cell::new([0xFF; 16], CellColor::Red); 33];

    let result = engine.render_static(&cells);
    assert_eq!(result, Err(RenderError::TooManyCells { count: 33 }));
    assert!(engine.bus().events.is_empty());
}

#[test]
fn empty_frames_error_but_blank_darkens() {
    let mut engine = engine();
    assert_eq!(engine.render_static(&[]), Err(RenderError::EmptyFrame));

    // Going dark deliberately is a blank render, not an empty frame.
    engine.blank();
    assert_eq!(engine.bus().row_writes.len(), 16);
    assert!(engine
        .bus()
        .row_writes
        .iter()
        .all(|write| write.cells.len() == VISIBLE_CELLS));
}

#[test]
fn maximum_width_scroll_runs_to_completion() {
    let mut engine = engine();
    let cells = [Cell::new([0xAA; 16], CellColor::Green); PANEL_CELLS];
    engine.render_scroll(&cells, 1).unwrap();

    assert_eq!(engine.bus().frames().count(), 8 * PANEL_CELLS + 2);
    let last = engine.bus().frames().last().unwrap();
    assert!(last
        .iter()
        .all(|row| row.cells.iter().all(|c| c.red == 0 && c.green == 0)));
}

// ============================================================================
// Text Resolution Edge Cases
// ============================================================================

#[test]
fn unknown_characters_render_as_blank_cells() {
    let mut engine = engine();
    let mut frame = Frame::new();
    Font8x16
        .resolve("1\u{00B0}C", CellColor::Green, &mut frame)
        .unwrap();
    assert_eq!(frame.len(), 3);

    engine.render_static(frame.cells()).unwrap();
    for write in &engine.bus().row_writes {
        // The degree sign is outside the font; its cell stays dark.
        assert_eq!(write.cells[1].red, 0);
        assert_eq!(write.cells[1].green, 0);
    }
    // The neighbors still carry their glyphs.
    assert!(engine
        .bus()
        .row_writes
        .iter()
        .any(|write| write.cells[0].green != 0 && write.cells[2].green != 0));
}

#[test]
fn overwide_readout_values_still_fit_the_panel() {
    // Out-of-range values push the readouts past their usual eight cells;
    // they widen instead of truncating and stay well under the panel limit.
    let texts = [
        temperature_text(-273.1),
        humidity_text(100.0),
        pressure_text(10000.0),
    ];
    for text in &texts {
        let mut engine = engine();
        let mut frame = Frame::new();
        Font8x16
            .resolve(text.as_str(), CellColor::Green, &mut frame)
            .unwrap();
        engine.render_static(frame.cells()).unwrap();
        assert_eq!(engine.bus().row_writes.len(), 16);
    }
}

// ============================================================================
// Display Window Boundaries
// ============================================================================

#[test]
fn window_end_hour_is_exclusive() {
    let mut s = scheduler_with(Config::default());
    s.start_clock(0);
    s.poll(1, TimeOfDay::new(23, 0, 0));
    assert!(!s.lamp_on());
}

#[test]
fn window_start_hour_is_inclusive() {
    let mut s = scheduler_with(Config::default());
    s.start_clock(0);
    s.poll(1, TimeOfDay::new(6, 0, 0));
    assert!(s.lamp_on());
}

#[test]
fn overnight_window_wraps_past_midnight() {
    let config = Config::default().with_clock(ClockConfig::default().with_window(22, 6));
    let mut s = scheduler_with(config);
    s.start_clock(0);

    s.poll(1, TimeOfDay::new(23, 0, 0));
    assert!(s.lamp_on());

    // The noon check closes the display.
    s.poll(60_000, NOON);
    assert!(!s.lamp_on());

    // A small-hours check reopens it.
    s.poll(120_000, TimeOfDay::new(2, 0, 0));
    assert!(s.lamp_on());
}

// ============================================================================
// Sensor Retry Boundaries
// ============================================================================

#[test]
fn single_attempt_config_fetches_exactly_once() {
    let config =
        Config::default().with_sensor(SensorConfig::default().with_max_attempts(1));
    let mut s = scheduler_with(config);
    s.start_clock(0);
    s.poll(1, NOON);

    s.poll(60_000, NOON);
    assert_eq!(s.sensor_mut().fetch_count, 1);
    assert_eq!(s.message(), Message::StartClock);
}

// ============================================================================
// Connectivity Edge Cases
// ============================================================================

#[test]
fn instant_connection_skips_the_blink() {
    let mut s = scheduler_with(Config::default());
    s.begin_connecting(0);
    s.connectivity_mut().connect("10.0.0.42");

    // The network was already up at the first poll: straight to the
    // announcement, no blink frame in front of it.
    s.poll(1, NOON);
    assert_eq!(s.message(), Message::StartClock);
    assert_eq!(s.engine().bus().bank_toggles, 170 + 138);
}

#[test]
fn offline_connectivity_never_leaves_connecting() {
    let mut s = DisplayScheduler::new(
        engine(),
        Font8x16,
        MockSensor::new(),
        Offline,
        MockDelay::new(),
        Config::default(),
    );
    s.begin_connecting(0);

    s.poll(500, NOON);
    s.poll(1000, NOON);
    s.poll(100_000, NOON);
    assert_eq!(s.message(), Message::Connecting);
    // The blink kept animating the whole time.
    assert_eq!(s.engine().bus().bank_toggles, 3);
}

#[test]
fn optional_connectivity_reports_through_the_wrapper() {
    let mut s: DisplayScheduler<_, _, _, _, Option<MockConnectivity>> = DisplayScheduler::new(
        engine(),
        Font8x16,
        MockSensor::new(),
        None,
        MockDelay::new(),
        Config::default(),
    );
    s.begin_connecting(0);
    s.poll(1, NOON);
    assert_eq!(s.message(), Message::Connecting);

    // Swapping a live link in behaves like a connection coming up.
    let mut conn = MockConnectivity::new();
    conn.connect("192.168.4.1");
    *s.connectivity_mut() = Some(conn);
    s.poll(2, NOON);
    assert_eq!(s.message(), Message::StartClock);
}
