//! Input/output drivers, hardware initialisation, and peripheral helpers.

pub mod button;
pub mod buzzer;
pub mod debounce;
pub mod encoder;
pub mod gpio;
pub mod hw_init;
pub mod led_patterns;
pub mod ssd1306;
pub mod status_led;
