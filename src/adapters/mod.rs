//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements        | Connects to                     |
//! |---------------|-------------------|---------------------------------|
//! | `hardware`    | InputPort         | GPIO, quadrature, ADXL345       |
//! |               | OutputPort        | LEDC PWM (RGB LED), buzzer GPIO |
//! | `log_sink`    | EventSink         | Serial log output               |
//! | `config_file` | ConfigPort        | JSON file (`APPLESLICE_CONFIG`) |
//! | `display`     | FramebufferPort   | SSD1306 OLED, or nothing        |
//! | `null`        | all ports         | nothing (headless / tests)      |
//! | `time`        | —                 | ESP32 system timer / `Instant`  |
//!
//! The SSD1306 driver itself implements `FramebufferPort` in
//! [`drivers::ssd1306`](crate::drivers::ssd1306); `display` only chooses
//! between it and the headless sink.

pub mod config_file;
pub mod display;
pub mod hardware;
pub mod log_sink;
pub mod null;
pub mod time;
