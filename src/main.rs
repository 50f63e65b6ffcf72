//! Apple Slice Firmware — Main Entry Point
//!
//! Hexagonal architecture with a single cooperative tick loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter     Ssd1306           LogEventSink            │
//! │  (Input+Output)      (Framebuffer)     (EventSink)             │
//! │  JsonConfigFile      MonotonicClock                            │
//! │  (ConfigPort)        (time base)                               │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Power · FSM · Feedback · Gestures · Render            │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::Result;
use log::{error, info, warn};

use appleslice::adapters::config_file::JsonConfigFile;
use appleslice::adapters::display::Display;
use appleslice::adapters::hardware::HardwareAdapter;
use appleslice::adapters::log_sink::LogEventSink;
use appleslice::adapters::time::MonotonicClock;
use appleslice::app::events::AppEvent;
use appleslice::app::guard::ShutdownGuard;
use appleslice::app::ports::{ConfigPort, EventSink};
use appleslice::app::service::AppService;
use appleslice::config::GameConfig;
use appleslice::drivers::hw_init;
use appleslice::drivers::ssd1306::Ssd1306;
use appleslice::pins;
use appleslice::render::{self, Screen};
use appleslice::sensors::adxl345::Adxl345;

/// Stop after this many seconds when set (host runs).
const RUN_SECS_ENV: &str = "APPLESLICE_RUN_SECS";

fn init_logging() -> Result<()> {
    #[cfg(target_os = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }
    #[cfg(not(target_os = "espidf"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    Ok(())
}

/// Log the panic and force the buzzer and LED off before the default
/// handler runs.  Covers `panic = "abort"` builds where no guard drops.
fn install_panic_handler() {
    let default = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        error!("PANIC: {info}");
        hw_init::outputs_inert();
        default(info);
    }));
}

/// Raise `stop` on Ctrl-C / SIGINT.
#[cfg(not(target_os = "espidf"))]
fn watch_interrupt(stop: Arc<AtomicBool>) -> Result<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_io()
        .build()?;
    std::thread::Builder::new()
        .name("interrupt".into())
        .spawn(move || {
            rt.block_on(async {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("interrupt received, stopping");
                    stop.store(true, Ordering::Relaxed);
                }
            });
        })?;
    Ok(())
}

#[cfg(target_os = "espidf")]
fn watch_interrupt(_stop: Arc<AtomicBool>) -> Result<()> {
    Ok(())
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. Bootstrap ──────────────────────────────────────────
    init_logging()?;
    install_panic_handler();
    let clock = MonotonicClock::new();
    let stop = Arc::new(AtomicBool::new(false));
    watch_interrupt(Arc::clone(&stop))?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Apple Slice v{}                  ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Config (file or defaults) ──────────────────────────
    let config = match JsonConfigFile::from_env().load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("config load failed ({}), using defaults", e);
            GameConfig::default()
        }
    };

    // ── 3. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals()?;

    let accel = match Adxl345::init(pins::ADXL345_I2C_ADDR) {
        Ok(a) => Some(a),
        Err(e) => {
            warn!("ADXL345 init failed: {}", e);
            None
        }
    };
    let mut hw = HardwareAdapter::new(&config, accel);

    let mut display = Display::from(match Ssd1306::init(pins::OLED_I2C_ADDR) {
        Ok(d) => Some(d),
        Err(e) => {
            warn!("OLED init failed ({}), running headless", e);
            None
        }
    });

    // ── 4. Welcome + calibration (blocking, before the loop) ──
    if !display.is_headless() {
        if let Err(e) = render::draw_frame(&mut display, &Screen::Welcome) {
            warn!("welcome screen: {}", e);
        }
        std::thread::sleep(Duration::from_secs_f64(config.welcome_secs));
    }
    hw.calibrate(&config);

    // ── 5. App service ────────────────────────────────────────
    let seed = config.rng_seed.unwrap_or_else(|| clock.uptime_us());
    let mut log_sink = LogEventSink::new();
    let mut app = AppService::new(config.clone(), seed);
    app.start(&mut hw, &mut log_sink, clock.now_secs());

    info!("Controls: rotate to choose difficulty, hold the button 1 s to start,");
    info!("          rotate or tilt to slice, press to leave the game-over screen");

    let run_for = std::env::var(RUN_SECS_ENV)
        .ok()
        .and_then(|s| s.parse::<f64>().ok());
    let draw_interval = f64::from(config.draw_interval_ms) / 1000.0;
    let status_interval = f64::from(config.status_interval_secs);
    let loop_sleep = Duration::from_millis(u64::from(config.loop_interval_ms));
    let mut last_draw = f64::NEG_INFINITY;
    let mut last_status = clock.now_secs();

    // ── 6. Tick loop (outputs go inert when `running` drops) ──
    let mut running = ShutdownGuard::new(&mut app, &mut hw, &mut display);
    while !stop.load(Ordering::Relaxed) {
        let now = clock.now_secs();
        running.app.tick(now, &mut *running.hw, &mut log_sink);

        if now - last_draw >= draw_interval {
            running.app.render(&mut *running.fb);
            last_draw = now;
        }

        if now - last_status >= status_interval {
            log_sink.emit(&AppEvent::Status(running.app.status()));
            last_status = now;
        }

        if run_for.is_some_and(|limit| now >= limit) {
            info!("{} reached, stopping", RUN_SECS_ENV);
            break;
        }

        std::thread::sleep(loop_sleep);
    }
    Ok(())
}
