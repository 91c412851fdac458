//! Cooperative display scheduler.
//!
//! A single [`Message`] token records what the panels should show next.
//! [`DisplayScheduler::poll`] runs once per main-loop iteration: first the
//! software tickers fire (their effects are single assignments and cheap
//! renders), then the token is dispatched exactly once. Nothing here is
//! preemptive; the only blocking calls are the scroll pacing inside the
//! render engine and the fixed hold between sensor readouts.
//!
//! Token flow:
//!
//! | Token | Action | Next |
//! |-------|--------|------|
//! | `Connecting` | blink ticker animates the startup banner | `Connected` once the network reports up |
//! | `Connected` | scroll `WiFi Started.` + station address, arm timers | `StartClock` |
//! | `Idle` | nothing; tickers decide what happens | `FetchSensor` on sensor ticker |
//! | `FetchSensor` | fetch with bounded retry | `StopClock` on success, `StartClock` on give-up |
//! | `StopClock` | stop the clock face | `ShowTemperature` |
//! | `ShowTemperature` | render readout, hold | `ShowHumidity` |
//! | `ShowHumidity` | render readout, hold | `ShowPressure` |
//! | `ShowPressure` | render readout, hold | `StartClock` |
//! | `StartClock` | resume the clock face if the display window is open | `Idle` |
//!
//! A separate window checker blanks the glass and stops the clock outside
//! the configured display hours, whatever the token says.
//!
//! # Example
//!
//! ```rust
//! use rs_matrixclock::config::Config;
//! use rs_matrixclock::font::Font8x16;
//! use rs_matrixclock::hal::mock::{MockBus, MockConnectivity, MockDelay, MockSensor};
//! use rs_matrixclock::render::RenderEngine;
//! use rs_matrixclock::scheduler::{DisplayScheduler, Message};
//! use rs_matrixclock::traits::TimeOfDay;
//!
//! let engine = RenderEngine::new(MockBus::new(), MockDelay::new());
//! let mut scheduler = DisplayScheduler::new(
//!     engine,
//!     Font8x16,
//!     MockSensor::new(),
//!     MockConnectivity::new(),
//!     MockDelay::new(),
//!     Config::default(),
//! );
//!
//! scheduler.begin_connecting(0);
//! assert_eq!(scheduler.message(), Message::Connecting);
//! scheduler.poll(500, TimeOfDay::new(12, 0, 0));
//! ```

use log::{debug, info, warn};

use crate::color::CellColor;
use crate::config::Config;
use crate::frame::Frame;
use crate::messages::SensorReading;
use crate::render::RenderEngine;
use crate::text::{
    banner_text, clock_colors, clock_text, humidity_text, init_banner_colors, pressure_text,
    temperature_text, INIT_BANNER_BLANK, INIT_BANNER_DOT, WIFI_STARTED_BANNER,
};
use crate::timer::{display_window_contains, Ticker};
use crate::traits::{Connectivity, Delay, GlyphSource, PanelBus, SensorSource, TimeOfDay};

/// The display token: which content class is pending.
///
/// Exactly one value is live at any instant. Only the scheduler writes it,
/// and every write is a single assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Message {
    /// Nothing pending; tickers decide the next transition.
    Idle,
    /// Waiting for the network; the blink ticker animates the startup banner.
    Connecting,
    /// Network just came up; announce it once.
    Connected,
    /// Sensor ticker elapsed; fetch a fresh reading.
    FetchSensor,
    /// Show the temperature readout.
    ShowTemperature,
    /// Show the humidity readout.
    ShowHumidity,
    /// Show the pressure readout.
    ShowPressure,
    /// Resume the clock face (subject to the display window).
    StartClock,
    /// Stop the clock face ahead of the readout sequence.
    StopClock,
}

/// Sequences clock, sensor readouts, and connectivity banners on the panels.
///
/// Owns the render engine (and through it the panel bus), the glyph source,
/// and the external collaborators. All state lives on one logical thread;
/// see the module docs for the token flow.
pub struct DisplayScheduler<B, D, G, S, N>
where
    B: PanelBus,
    D: Delay,
    G: GlyphSource,
    S: SensorSource,
    N: Connectivity,
{
    engine: RenderEngine<B, D>,
    glyphs: G,
    sensor: S,
    connectivity: N,
    delay: D,
    config: Config,
    message: Message,
    clock_ticker: Ticker,
    window_ticker: Ticker,
    sensor_ticker: Ticker,
    blink_ticker: Ticker,
    blink_phase: bool,
    last_reading: Option<SensorReading>,
    lamp: bool,
}

impl<B, D, G, S, N> DisplayScheduler<B, D, G, S, N>
where
    B: PanelBus,
    D: Delay,
    G: GlyphSource,
    S: SensorSource,
    N: Connectivity,
{
    /// Create a scheduler in the `Idle` state with all tickers detached.
    ///
    /// `delay` paces the holds between sensor readouts; the engine carries
    /// its own delay for scroll pacing.
    pub fn new(
        engine: RenderEngine<B, D>,
        glyphs: G,
        sensor: S,
        connectivity: N,
        delay: D,
        config: Config,
    ) -> Self {
        Self {
            engine,
            glyphs,
            sensor,
            connectivity,
            delay,
            config,
            message: Message::Idle,
            clock_ticker: Ticker::new(),
            window_ticker: Ticker::new(),
            sensor_ticker: Ticker::new(),
            blink_ticker: Ticker::new(),
            blink_phase: false,
            last_reading: None,
            lamp: false,
        }
    }

    /// Start the connecting animation and wait for the network.
    ///
    /// The blink ticker re-renders the startup banner until
    /// [`Connectivity::is_connected`] reports up, at which point the
    /// address announcement runs once and the clock takes over.
    pub fn begin_connecting(&mut self, now_ms: u64) {
        info!("waiting for network");
        self.blink_phase = false;
        self.blink_ticker
            .attach_ms(u64::from(self.config.display.blink_ms), now_ms);
        self.message = Message::Connecting;
    }

    /// Start the clock directly, skipping network bring-up.
    ///
    /// Arms the window checker (and the sensor ticker when polling is
    /// enabled) and queues `StartClock`; the next [`poll`](Self::poll)
    /// lights the clock face if the display window is open.
    pub fn start_clock(&mut self, now_ms: u64) {
        self.window_ticker
            .attach_secs(u64::from(self.config.clock.check_secs), now_ms);
        if self.config.sensor.enabled {
            self.sensor_ticker
                .attach_secs(u64::from(self.config.sensor.poll_secs), now_ms);
        }
        self.message = Message::StartClock;
    }

    /// Stop all periodic work and darken the glass.
    pub fn stop_clock(&mut self) {
        self.clock_ticker.detach();
        self.window_ticker.detach();
        self.sensor_ticker.detach();
        self.blink_ticker.detach();
        self.engine.blank();
        self.lamp = false;
        self.message = Message::Idle;
    }

    /// One cooperative dispatch: run the tickers, then act on the token.
    ///
    /// `now_ms` is a monotonic millisecond timestamp; `today` is the local
    /// wall time used for the clock face and the display window.
    pub fn poll(&mut self, now_ms: u64, today: TimeOfDay) {
        self.run_tickers(now_ms, today);

        // Covers a connection established between polls, before the next
        // blink tick.
        if self.message == Message::Connecting && self.connectivity.is_connected() {
            info!("network connected");
            self.message = Message::Connected;
        }

        self.dispatch(now_ms, today);
    }

    /// The current display token.
    pub fn message(&self) -> Message {
        self.message
    }

    /// Whether the display window is currently active.
    ///
    /// Mirrored onto the window lamp output by the firmware entry point.
    pub fn lamp_on(&self) -> bool {
        self.lamp
    }

    /// The most recent successful sensor reading, if any.
    pub fn last_reading(&self) -> Option<SensorReading> {
        self.last_reading
    }

    /// Access the render engine.
    pub fn engine(&self) -> &RenderEngine<B, D> {
        &self.engine
    }

    /// Mutable access to the render engine.
    pub fn engine_mut(&mut self) -> &mut RenderEngine<B, D> {
        &mut self.engine
    }

    /// Mutable access to the sensor collaborator.
    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    /// Mutable access to the connectivity collaborator.
    pub fn connectivity_mut(&mut self) -> &mut N {
        &mut self.connectivity
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn run_tickers(&mut self, now_ms: u64, today: TimeOfDay) {
        if self.blink_ticker.fire(now_ms) {
            self.blink_phase = !self.blink_phase;
            let text = if self.blink_phase {
                INIT_BANNER_DOT
            } else {
                INIT_BANNER_BLANK
            };
            self.render_static_text(text, &init_banner_colors());
        }

        if self.window_ticker.fire(now_ms) {
            self.check_window(today);
        }

        // Outside the display window the glass stays dark, so sensor polls
        // are not started there either.
        if self.sensor_ticker.fire(now_ms) && self.message == Message::Idle && self.lamp {
            self.message = Message::FetchSensor;
        }

        if self.clock_ticker.fire(now_ms) {
            self.render_clock(today);
        }
    }

    fn dispatch(&mut self, now_ms: u64, today: TimeOfDay) {
        match self.message {
            Message::Idle | Message::Connecting => {}
            Message::Connected => self.announce_connected(now_ms),
            Message::FetchSensor => self.fetch_sensor(),
            Message::StopClock => {
                self.clock_ticker.detach();
                self.message = Message::ShowTemperature;
            }
            Message::ShowTemperature => {
                if let Some(reading) = self.last_reading {
                    self.show_readout(temperature_text(reading.temperature).as_str());
                }
                self.message = Message::ShowHumidity;
            }
            Message::ShowHumidity => {
                if let Some(reading) = self.last_reading {
                    self.show_readout(humidity_text(reading.humidity).as_str());
                }
                self.message = Message::ShowPressure;
            }
            Message::ShowPressure => {
                if let Some(reading) = self.last_reading {
                    self.show_readout(pressure_text(reading.pressure).as_str());
                }
                self.message = Message::StartClock;
            }
            Message::StartClock => {
                let open = display_window_contains(
                    self.config.clock.start_hour,
                    self.config.clock.end_hour,
                    today.hour,
                );
                if open {
                    self.clock_ticker
                        .attach_ms(u64::from(self.config.clock.tick_ms), now_ms);
                    self.lamp = true;
                } else {
                    self.clock_ticker.detach();
                    self.engine.blank();
                    self.lamp = false;
                }
                self.message = Message::Idle;
            }
        }
    }

    /// Window checker: open or close the display as the hour crosses the
    /// configured bounds.
    fn check_window(&mut self, today: TimeOfDay) {
        let open = display_window_contains(
            self.config.clock.start_hour,
            self.config.clock.end_hour,
            today.hour,
        );
        if open && !self.lamp {
            if self.message == Message::Idle {
                info!("display window open at hour {}", today.hour);
                self.message = Message::StartClock;
            }
        } else if !open && self.lamp {
            info!("display window closed at hour {}", today.hour);
            self.clock_ticker.detach();
            self.engine.blank();
            self.lamp = false;
        }
    }

    /// Fetch a reading with bounded retry.
    ///
    /// On success the clock is stopped and the readout sequence starts; on
    /// exhaustion the clock simply resumes and the panel shows no update.
    fn fetch_sensor(&mut self) {
        self.clock_ticker.detach();
        let attempts = self.config.sensor.max_attempts.max(1);
        for attempt in 1..=attempts {
            match self.sensor.fetch() {
                Ok(reading) => {
                    debug!("sensor fetch ok on attempt {}", attempt);
                    self.last_reading = Some(reading);
                    self.message = Message::StopClock;
                    return;
                }
                Err(err) => {
                    warn!("sensor fetch attempt {} failed: {:?}", attempt, err);
                    if attempt < attempts {
                        self.delay.delay_ms(self.config.sensor.retry_backoff_ms);
                    }
                }
            }
        }
        warn!("sensor unavailable after {} attempts", attempts);
        self.message = Message::StartClock;
    }

    /// Scroll the connected banners once, then hand over to the clock.
    fn announce_connected(&mut self, now_ms: u64) {
        self.blink_ticker.detach();
        self.scroll_banner(WIFI_STARTED_BANNER);
        if let Some(address) = self.connectivity.address() {
            info!("station address {}", address.as_str());
            self.scroll_banner(address.as_str());
        }
        self.window_ticker
            .attach_secs(u64::from(self.config.clock.check_secs), now_ms);
        if self.config.sensor.enabled {
            self.sensor_ticker
                .attach_secs(u64::from(self.config.sensor.poll_secs), now_ms);
        }
        self.message = Message::StartClock;
    }

    fn render_clock(&mut self, today: TimeOfDay) {
        let text = clock_text(today);
        self.render_static_text(text.as_str(), &clock_colors());
    }

    fn show_readout(&mut self, text: &str) {
        self.render_static_text(text, &[CellColor::Green]);
        self.delay.delay_ms(self.config.sensor.hold_ms);
    }

    fn render_static_text(&mut self, text: &str, colors: &[CellColor]) {
        let mut frame = Frame::new();
        if self.glyphs.resolve_colored(text, colors, &mut frame).is_err() {
            warn!("text too wide for the panel: {}", text);
            return;
        }
        if let Err(err) = self.engine.render_static(frame.cells()) {
            warn!("static render failed: {}", err);
        }
    }

    fn scroll_banner(&mut self, message: &str) {
        let banner = banner_text(message);
        let mut frame = Frame::new();
        if self
            .glyphs
            .resolve(banner.as_str(), CellColor::Green, &mut frame)
            .is_err()
        {
            warn!("banner too wide for the panel: {}", message);
            return;
        }
        let interval = self.config.display.scroll_interval_ms;
        if let Err(err) = self.engine.render_scroll(frame.cells(), interval) {
            warn!("banner render failed: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::Font8x16;
    use crate::hal::mock::{MockBus, MockConnectivity, MockDelay, MockSensor};

    type TestScheduler =
        DisplayScheduler<MockBus, MockDelay, Font8x16, MockSensor, MockConnectivity>;

    const NOON: TimeOfDay = TimeOfDay::new(12, 0, 0);
    const NIGHT: TimeOfDay = TimeOfDay::new(2, 0, 0);

    fn scheduler() -> TestScheduler {
        let engine = RenderEngine::new(MockBus::new(), MockDelay::new());
        DisplayScheduler::new(
            engine,
            Font8x16,
            MockSensor::new(),
            MockConnectivity::new(),
            MockDelay::new(),
            Config::default(),
        )
    }

    fn reading() -> SensorReading {
        SensorReading {
            temperature: 21.5,
            humidity: 45.0,
            pressure: 1013.2,
        }
    }

    // =========================================================================
    // Startup / Connectivity Tests
    // =========================================================================

    #[test]
    fn starts_idle_and_dark() {
        let s = scheduler();
        assert_eq!(s.message(), Message::Idle);
        assert!(!s.lamp_on());
        assert!(s.last_reading().is_none());
    }

    #[test]
    fn connecting_blinks_the_banner() {
        let mut s = scheduler();
        s.begin_connecting(0);
        assert_eq!(s.message(), Message::Connecting);

        // Before the blink period nothing renders.
        s.poll(100, NOON);
        assert_eq!(s.engine().bus().bank_toggles, 0);

        // Each blink period publishes one banner frame.
        s.poll(500, NOON);
        assert_eq!(s.engine().bus().bank_toggles, 1);
        s.poll(1000, NOON);
        assert_eq!(s.engine().bus().bank_toggles, 2);
        assert_eq!(s.message(), Message::Connecting);
    }

    #[test]
    fn connection_triggers_announcement_then_clock() {
        let mut s = scheduler();
        s.begin_connecting(0);
        s.connectivity_mut().connect("192.168.10.54");

        // The poll notices the connection and scrolls both banners.
        s.poll(500, NOON);
        assert_eq!(s.message(), Message::StartClock);
        // Two 21-cell banners scrolled: well over a hundred published frames.
        assert!(s.engine().bus().bank_toggles > 100);

        s.poll(501, NOON);
        assert_eq!(s.message(), Message::Idle);
        assert!(s.lamp_on());
        assert!(s.clock_ticker.is_armed());
        assert!(!s.blink_ticker.is_armed());
        assert!(s.window_ticker.is_armed());
        assert!(s.sensor_ticker.is_armed());
    }

    #[test]
    fn blink_stops_for_good_after_connection() {
        let mut s = scheduler();
        s.begin_connecting(0);
        s.connectivity_mut().connect("10.0.0.2");
        s.poll(500, NOON);
        s.poll(501, NOON);

        // Long after the old blink deadline, the blink ticker stays dead.
        s.poll(10_000, NOON);
        assert!(!s.blink_ticker.is_armed());
    }

    // =========================================================================
    // Clock / Window Tests
    // =========================================================================

    #[test]
    fn start_clock_renders_time_on_tick() {
        let mut s = scheduler();
        s.start_clock(0);
        s.poll(1, NOON);
        assert_eq!(s.message(), Message::Idle);
        assert!(s.lamp_on());

        s.engine_mut().bus_mut().reset_capture();
        s.poll(502, NOON);
        // One full static frame: 16 rows, one publish.
        assert_eq!(s.engine().bus().row_writes.len(), 16);
        assert_eq!(s.engine().bus().bank_toggles, 1);
    }

    #[test]
    fn start_clock_outside_window_stays_dark() {
        let mut s = scheduler();
        s.start_clock(0);
        s.poll(1, NIGHT);
        assert_eq!(s.message(), Message::Idle);
        assert!(!s.lamp_on());
        assert!(!s.clock_ticker.is_armed());
    }

    #[test]
    fn window_close_blanks_and_stops_the_clock() {
        let mut s = scheduler();
        s.start_clock(0);
        s.poll(1, NOON);
        assert!(s.lamp_on());

        // Window checker fires at 60 s with the hour now past the end.
        s.poll(60_000, TimeOfDay::new(23, 0, 0));
        assert!(!s.lamp_on());
        assert!(!s.clock_ticker.is_armed());
        // The closing blank was published.
        let last_frame = s.engine().bus().frames().last().unwrap();
        assert!(last_frame
            .iter()
            .all(|row| row.cells.iter().all(|c| c.red == 0 && c.green == 0)));
    }

    #[test]
    fn window_reopen_restarts_the_clock() {
        let mut s = scheduler();
        s.start_clock(0);
        s.poll(1, NIGHT);
        assert!(!s.lamp_on());

        // The next window check with a daytime hour turns the clock back on
        // within the same poll: the checker queues the restart and the
        // dispatch that follows resolves it.
        s.poll(60_000, NOON);
        assert_eq!(s.message(), Message::Idle);
        assert!(s.lamp_on());
        assert!(s.clock_ticker.is_armed());
    }

    // =========================================================================
    // Sensor Cycle Tests
    // =========================================================================

    #[test]
    fn sensor_failure_gives_up_after_two_attempts() {
        let mut s = scheduler();
        s.start_clock(0);
        s.poll(1, NOON);

        // Empty script: every fetch fails.
        s.poll(60_000, NOON);
        assert_eq!(s.sensor_mut().fetch_count, 2);
        assert_eq!(s.message(), Message::StartClock);
        // One backoff delay between the two attempts.
        assert_eq!(s.delay.delays, vec![500]);

        // The clock resumes; no third attempt happens.
        s.poll(60_001, NOON);
        assert_eq!(s.message(), Message::Idle);
        assert!(s.clock_ticker.is_armed());
        assert_eq!(s.sensor_mut().fetch_count, 2);
        assert!(s.last_reading().is_none());
    }

    #[test]
    fn sensor_success_walks_the_readout_sequence() {
        let mut s = scheduler();
        s.start_clock(0);
        s.poll(1, NOON);
        s.sensor_mut().queue_ok(reading());

        s.poll(60_000, NOON);
        assert_eq!(s.sensor_mut().fetch_count, 1);
        assert_eq!(s.message(), Message::StopClock);

        s.poll(60_001, NOON);
        assert_eq!(s.message(), Message::ShowTemperature);
        assert!(!s.clock_ticker.is_armed());

        s.poll(60_002, NOON);
        assert_eq!(s.message(), Message::ShowHumidity);
        s.poll(63_002, NOON);
        assert_eq!(s.message(), Message::ShowPressure);
        s.poll(66_002, NOON);
        assert_eq!(s.message(), Message::StartClock);

        // Three readouts, each held for the configured duration.
        assert_eq!(s.delay.delays, vec![3000, 3000, 3000]);
        assert_eq!(s.last_reading(), Some(reading()));

        s.poll(66_003, NOON);
        assert_eq!(s.message(), Message::Idle);
        assert!(s.clock_ticker.is_armed());
    }

    #[test]
    fn sensor_ticker_is_ignored_outside_the_window() {
        let mut s = scheduler();
        s.start_clock(0);
        s.poll(1, NIGHT);
        assert!(!s.lamp_on());

        // The sensor ticker elapses, but the dark display stays dark.
        s.poll(60_000, NIGHT);
        assert_eq!(s.message(), Message::Idle);
        assert_eq!(s.sensor_mut().fetch_count, 0);
    }

    #[test]
    fn sensor_ticker_not_armed_when_polling_disabled() {
        let engine = RenderEngine::new(MockBus::new(), MockDelay::new());
        let config = Config::default()
            .with_sensor(crate::config::SensorConfig::default().with_enabled(false));
        let mut s = DisplayScheduler::new(
            engine,
            Font8x16,
            MockSensor::new(),
            MockConnectivity::new(),
            MockDelay::new(),
            config,
        );
        s.start_clock(0);
        s.poll(1, NOON);
        assert!(!s.sensor_ticker.is_armed());
    }

    // =========================================================================
    // Facade Tests
    // =========================================================================

    #[test]
    fn stop_clock_detaches_everything() {
        let mut s = scheduler();
        s.start_clock(0);
        s.poll(1, NOON);

        s.stop_clock();
        assert_eq!(s.message(), Message::Idle);
        assert!(!s.lamp_on());
        assert!(!s.clock_ticker.is_armed());
        assert!(!s.window_ticker.is_armed());
        assert!(!s.sensor_ticker.is_armed());
    }
}
