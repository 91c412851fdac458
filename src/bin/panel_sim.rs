//! Desktop panel simulator.
//!
//! Runs the real scheduler and render engine against an ANSI terminal
//! stand-in for the panel chain, so the whole display flow can be watched
//! without hardware:
//! - The init banner blinks for a few seconds, then "connects"
//! - The connected banner and a fake station address scroll past
//! - The clock face ticks (host UTC stands in for local wall time)
//! - Scripted sensor readings walk the readout sequence, then run out so
//!   the retry-and-give-up path shows too
//!
//! # Usage
//!
//! ```sh
//! cargo run --bin panel_sim
//! ```
//!
//! Runs until interrupted. Wants a terminal at least 66 columns wide.

use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use rs_matrixclock::config::{ClockConfig, Config, SensorConfig};
use rs_matrixclock::frame::PANEL_ROWS;
use rs_matrixclock::hal::{MockConnectivity, MockSensor};
use rs_matrixclock::messages::SensorReading;
use rs_matrixclock::timer::Ticker;
use rs_matrixclock::traits::{Clock, Delay, Level, Line, PanelBus, TimeOfDay};
use rs_matrixclock::{DisplayScheduler, Font8x16, RenderEngine};

/// Main loop interval in milliseconds (20Hz = 50ms)
const LOOP_INTERVAL_MS: u64 = 50;

/// Columns on the simulated glass (eight visible cells)
const GLASS_COLUMNS: usize = 64;

/// When the fake network "comes up" after start
const CONNECT_AFTER_MS: u64 = 3_000;

/// How often a fresh scripted reading is queued
const REPLENISH_SECS: u64 = 35;

fn main() {
    print!("\x1b[2J");
    let _ = io::stdout().flush();

    let clock = SimClock::new();
    let bus = TerminalBus::new();
    let mut engine = RenderEngine::new(bus, StdDelay);
    engine.init();

    // Always-open window so the sim works at any host hour; quick sensor
    // poll so a readout shows within seconds.
    let config = Config::default()
        .with_clock(ClockConfig::default().with_window(0, 24))
        .with_sensor(SensorConfig::default().with_poll_secs(15));

    let mut sensor = MockSensor::new();
    sensor.queue_ok(reading(0));
    sensor.queue_ok(reading(1));

    let mut scheduler = DisplayScheduler::new(
        engine,
        Font8x16,
        sensor,
        MockConnectivity::new(),
        StdDelay,
        config,
    );

    scheduler.begin_connecting(clock.now_ms());

    let mut connected = false;
    let mut served = 2u32;
    let mut replenish = Ticker::new();
    replenish.attach_secs(REPLENISH_SECS, clock.now_ms());

    loop {
        let now = clock.now_ms();

        if !connected && now >= CONNECT_AFTER_MS {
            scheduler.connectivity_mut().connect("192.168.10.54");
            connected = true;
        }

        // Top the script up slowly: polls outrun it, so the give-up path
        // shows between successful readouts.
        if replenish.fire(now) {
            scheduler.sensor_mut().queue_ok(reading(served));
            served += 1;
        }

        scheduler.poll(now, clock.time_of_day());
        thread::sleep(Duration::from_millis(LOOP_INTERVAL_MS));
    }
}

fn reading(step: u32) -> SensorReading {
    SensorReading {
        temperature: 21.5 + step as f32 * 0.3,
        humidity: 45.0 + step as f32,
        pressure: 1013.2 - step as f32 * 0.5,
    }
}

// ============================================================================
// Simulated Hardware
// ============================================================================

/// Wall clock for the sim: monotonic time from [`Instant`], time of day
/// from the host clock in UTC.
struct SimClock {
    started: Instant,
}

impl SimClock {
    fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Clock for SimClock {
    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    fn time_of_day(&self) -> TimeOfDay {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let day = secs % 86_400;
        TimeOfDay::new((day / 3_600) as u8, ((day % 3_600) / 60) as u8, (day % 60) as u8)
    }
}

/// Real sleeps, so scrolls and holds play out at device speed.
struct StdDelay;

impl Delay for StdDelay {
    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

/// Terminal stand-in for the panel chain.
///
/// Follows the wire protocol the same way the glass does: data clock
/// edges sample the color plane lines into a pending row, write enable
/// commits the row's first eight cells to the addressed row of the hidden
/// bank, and a bank level change swaps buffers and repaints the terminal.
struct TerminalBus {
    red: bool,
    green: bool,
    data_clock: bool,
    write_enable: bool,
    address: u8,
    /// Bits clocked since the last commit, in clock order.
    pending: Vec<(bool, bool)>,
    /// Two banks of sixteen rows, (red, green) plane bits per row;
    /// bit 63 is the leftmost column.
    banks: [[(u64, u64); PANEL_ROWS]; 2],
    /// Displayed bank, tracking the bank line level.
    displayed: usize,
    frames_drawn: usize,
}

impl TerminalBus {
    fn new() -> Self {
        Self {
            red: false,
            green: false,
            data_clock: false,
            write_enable: false,
            address: 0,
            pending: Vec::new(),
            banks: [[(0, 0); PANEL_ROWS]; 2],
            displayed: 0,
            frames_drawn: 0,
        }
    }

    fn set_address_bit(&mut self, bit: u8, high: bool) {
        if high {
            self.address |= 1 << bit;
        } else {
            self.address &= !(1 << bit);
        }
    }

    /// Latches the glass columns: the first eight cells of the pending row.
    fn commit_row(&mut self) {
        let mut red_bits = 0u64;
        let mut green_bits = 0u64;
        for (col, (red, green)) in self.pending.iter().take(GLASS_COLUMNS).enumerate() {
            let mask = 1u64 << (63 - col);
            if *red {
                red_bits |= mask;
            }
            if *green {
                green_bits |= mask;
            }
        }
        self.pending.clear();

        let hidden = 1 - self.displayed;
        let row = (self.address as usize) % PANEL_ROWS;
        self.banks[hidden][row] = (red_bits, green_bits);
    }

    fn redraw(&mut self) {
        self.frames_drawn += 1;
        let mut out = String::new();
        out.push_str("\x1b[H");
        out.push('+');
        for _ in 0..GLASS_COLUMNS {
            out.push('-');
        }
        out.push_str("+\n");

        for (red_bits, green_bits) in &self.banks[self.displayed] {
            out.push('|');
            for col in 0..GLASS_COLUMNS {
                let mask = 1u64 << (63 - col);
                let red = red_bits & mask != 0;
                let green = green_bits & mask != 0;
                match (red, green) {
                    (true, true) => out.push_str("\x1b[1;33m#\x1b[0m"),
                    (true, false) => out.push_str("\x1b[1;31m#\x1b[0m"),
                    (false, true) => out.push_str("\x1b[1;32m#\x1b[0m"),
                    (false, false) => out.push(' '),
                }
            }
            out.push_str("|\n");
        }

        out.push('+');
        for _ in 0..GLASS_COLUMNS {
            out.push('-');
        }
        out.push_str("+\n");
        out.push_str(&format!("frames: {}\n", self.frames_drawn));

        print!("{}", out);
        let _ = io::stdout().flush();
    }
}

impl PanelBus for TerminalBus {
    fn set_line(&mut self, line: Line, level: Level) {
        let high = level.is_high();
        match line {
            Line::Red => self.red = high,
            Line::Green => self.green = high,
            Line::A0 => self.set_address_bit(0, high),
            Line::A1 => self.set_address_bit(1, high),
            Line::A2 => self.set_address_bit(2, high),
            Line::A3 => self.set_address_bit(3, high),
            Line::DataClock => {
                if high && !self.data_clock {
                    self.pending.push((self.red, self.green));
                }
                self.data_clock = high;
            }
            Line::WriteEnable => {
                if high && !self.write_enable {
                    self.commit_row();
                }
                self.write_enable = high;
            }
            Line::Bank => {
                let bank = usize::from(high);
                if bank != self.displayed {
                    self.displayed = bank;
                    self.redraw();
                }
            }
            Line::AddressLatch | Line::Mode => {}
        }
    }
}
