//! ESP32 bicolor matrix panel firmware.
//!
//! This is the main entry point for the physical panel driver.
//! It runs a 20Hz display loop that:
//! - Blinks the init banner while WiFi associates and wall time syncs
//! - Scrolls the connected banner and the station address once
//! - Renders the clock face every tick inside the display window
//! - Polls the sensor gateway and holds the environment readouts (if enabled)
//! - Switches the cabinet lamp with the display window
//!
//! # Hardware Setup
//!
//! See `rs_matrixclock::hal::esp32::pins` for the GPIO wiring.
//!
//! # Build
//!
//! ```bash
//! # Clock from the local timer only (no wall time)
//! cargo build --release --bin esp32_main --features esp32
//!
//! # With WiFi and SNTP wall time
//! WIFI_SSID=net WIFI_PASSWORD=pass \
//!     cargo build --release --bin esp32_main --features wifi
//!
//! # Full: clock plus sensor readouts
//! WIFI_SSID=net WIFI_PASSWORD=pass SENSOR_URL=http://gateway/reading \
//!     cargo build --release --bin esp32_main --features sensor-http
//! ```

use esp_idf_hal::gpio::PinDriver;
use esp_idf_hal::peripherals::Peripherals;
use rs_matrixclock::hal::esp32::{panel_bus, Esp32Clock, Esp32Delay};
use rs_matrixclock::traits::Clock;
use rs_matrixclock::{Config, DisplayScheduler, Font8x16, Message, RenderEngine};
use std::thread;
use std::time::Duration;

/// Main loop interval in milliseconds (20Hz = 50ms)
const LOOP_INTERVAL_MS: u64 = 50;

/// Sleep between wall-clock checks while waiting for the top of a minute
const ALIGN_POLL_MS: u64 = 100;

/// Sensor stand-in for builds without the HTTP client compiled in.
#[cfg(not(feature = "sensor-http"))]
struct NoSensor;

#[cfg(not(feature = "sensor-http"))]
impl rs_matrixclock::traits::SensorSource for NoSensor {
    type Error = anyhow::Error;

    fn fetch(&mut self) -> Result<rs_matrixclock::SensorReading, Self::Error> {
        Err(anyhow::anyhow!("no sensor transport compiled in"))
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_hal::sys::link_patches();

    #[cfg(feature = "wifi")]
    esp_idf_svc::log::EspLogger::initialize_default();

    println!();
    println!("================================");
    println!("  rs-matrixclock panel driver");
    println!("================================");
    println!();

    // =========================================================================
    // Configuration
    // =========================================================================
    // TODO: Load from NVS or use compile-time env vars
    let mut config = Config::default()
        .with_wifi(
            rs_matrixclock::WifiConfig::default()
                .with_ssid(option_env!("WIFI_SSID").unwrap_or(""))
                .with_password(option_env!("WIFI_PASSWORD").unwrap_or("")),
        )
        .with_sensor(
            rs_matrixclock::SensorConfig::default()
                .with_url(option_env!("SENSOR_URL").unwrap_or("")),
        );

    if !config.sensor.is_configured() {
        config.sensor.enabled = false;
    }
    #[cfg(not(feature = "sensor-http"))]
    {
        config.sensor.enabled = false;
    }

    let peripherals = Peripherals::take()?;

    // =========================================================================
    // Initialize Panel Bus (eleven lines on GPIO16-27, 32)
    // =========================================================================
    let bus = panel_bus(
        peripherals.pins.gpio16.downgrade_output(),
        peripherals.pins.gpio17.downgrade_output(),
        peripherals.pins.gpio18.downgrade_output(),
        peripherals.pins.gpio19.downgrade_output(),
        peripherals.pins.gpio21.downgrade_output(),
        peripherals.pins.gpio22.downgrade_output(),
        peripherals.pins.gpio23.downgrade_output(),
        peripherals.pins.gpio25.downgrade_output(),
        peripherals.pins.gpio26.downgrade_output(),
        peripherals.pins.gpio27.downgrade_output(),
        peripherals.pins.gpio32.downgrade_output(),
    )?;
    println!("[OK] Panel bus initialized (GPIO16-27, 32)");

    // =========================================================================
    // Initialize Lamp Relay (GPIO33)
    // =========================================================================
    let mut lamp = PinDriver::output(peripherals.pins.gpio33)?;
    println!("[OK] Lamp relay initialized (GPIO33)");

    // =========================================================================
    // Initialize Render Engine
    // =========================================================================
    let mut engine = RenderEngine::new(bus, Esp32Delay::new());
    engine.init();
    println!("[OK] Render engine initialized, panel dark");

    // =========================================================================
    // Initialize WiFi (association runs in the background)
    // =========================================================================
    #[cfg(feature = "wifi")]
    let connectivity = {
        use esp_idf_svc::eventloop::EspSystemEventLoop;
        use esp_idf_svc::nvs::EspDefaultNvsPartition;
        use rs_matrixclock::hal::esp32::Esp32Wifi;

        if config.wifi.is_configured() {
            let sysloop = EspSystemEventLoop::take()?;
            let nvs = EspDefaultNvsPartition::take()?;

            let wifi = Esp32Wifi::new(
                peripherals.modem,
                sysloop,
                Some(nvs),
                &config.wifi,
                &config.clock,
            )?;
            println!("[OK] WiFi association started");
            Some(wifi)
        } else {
            println!("[SKIP] WiFi not configured (set WIFI_SSID/WIFI_PASSWORD)");
            None
        }
    };

    #[cfg(not(feature = "wifi"))]
    let connectivity: Option<rs_matrixclock::traits::Offline> = {
        println!("[SKIP] WiFi support not compiled in");
        None
    };

    // =========================================================================
    // Initialize Sensor Gateway Client
    // =========================================================================
    #[cfg(feature = "sensor-http")]
    let sensor = {
        use rs_matrixclock::hal::esp32::HttpSensor;

        if config.sensor.enabled {
            println!("[OK] Sensor gateway: {}", config.sensor.url);
        } else {
            println!("[SKIP] Sensor gateway not configured (set SENSOR_URL)");
        }
        HttpSensor::new(&config.sensor)
    };

    #[cfg(not(feature = "sensor-http"))]
    let sensor = {
        println!("[SKIP] Sensor support not compiled in");
        NoSensor
    };

    // =========================================================================
    // Initialize Clock and Scheduler
    // =========================================================================
    let clock = Esp32Clock::new();
    let have_network = connectivity.is_some();

    println!();
    println!(
        "Display window: {:02}:00 - {:02}:00",
        config.clock.start_hour, config.clock.end_hour
    );
    println!(
        "Clock tick: {}ms, sensor poll: {}s",
        config.clock.tick_ms, config.sensor.poll_secs
    );
    println!();

    let mut scheduler = DisplayScheduler::new(
        engine,
        Font8x16,
        sensor,
        connectivity,
        Esp32Delay::new(),
        config,
    );

    // =========================================================================
    // Bring-up: blink until the link and wall time are ready
    // =========================================================================
    if have_network {
        scheduler.begin_connecting(clock.now_ms());
        println!("Connecting...");

        while matches!(scheduler.message(), Message::Connecting | Message::Connected) {
            scheduler.poll(clock.now_ms(), clock.time_of_day());
            thread::sleep(Duration::from_millis(LOOP_INTERVAL_MS));
        }

        // Hold the clock start to the top of a minute so the face begins
        // in step with wall time.
        if scheduler.message() == Message::StartClock {
            println!("Waiting for the top of the minute...");
            while clock.time_of_day().second != 0 {
                thread::sleep(Duration::from_millis(ALIGN_POLL_MS));
            }
        }
    } else {
        scheduler.start_clock(clock.now_ms());
    }

    println!("Starting display loop (20Hz)...");
    println!();

    // =========================================================================
    // Main Display Loop (20Hz)
    // =========================================================================
    loop {
        let now = clock.now_ms();
        scheduler.poll(now, clock.time_of_day());

        // Mirror the scheduler's lamp state onto the relay pin
        if scheduler.lamp_on() {
            lamp.set_high()?;
        } else {
            lamp.set_low()?;
        }

        thread::sleep(Duration::from_millis(LOOP_INTERVAL_MS));
    }
}
