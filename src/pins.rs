//! GPIO / peripheral pin assignments for the Apple Slice board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Board is a XIAO ESP32-S3; the silkscreen `Dn`
//! label is noted next to each GPIO.

// ---------------------------------------------------------------------------
// Power switch (slide switch, external pull-up)
// ---------------------------------------------------------------------------

/// D0.  HIGH = switch OFF, LOW = switch ON.
pub const POWER_SWITCH_GPIO: i32 = 1;

// ---------------------------------------------------------------------------
// Rotary encoder (quadrature, internal pull-ups)
// ---------------------------------------------------------------------------

/// D1.  CLK line; a falling edge advances the position.
pub const ENCODER_CLK_GPIO: i32 = 2;
/// D2.  DT line; HIGH on a CLK falling edge means clockwise.
pub const ENCODER_DT_GPIO: i32 = 3;
/// D3.  Encoder push-button, active HIGH with pull-down.
pub const BUTTON_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// I²C bus (SSD1306 OLED + ADXL345)
// ---------------------------------------------------------------------------

/// D4.
pub const I2C_SDA_GPIO: i32 = 5;
/// D5.
pub const I2C_SCL_GPIO: i32 = 6;
pub const I2C_FREQ_HZ: u32 = 400_000;
/// Per-transaction timeout (milliseconds).
pub const I2C_TIMEOUT_MS: i32 = 50;

pub const OLED_I2C_ADDR: u8 = 0x3C;
pub const ADXL345_I2C_ADDR: u8 = 0x53;

// ---------------------------------------------------------------------------
// Buzzer (active, inverted drive)
// ---------------------------------------------------------------------------

/// D6.  LOW = sounding, HIGH = silent.
pub const BUZZER_GPIO: i32 = 43;

// ---------------------------------------------------------------------------
// Status LED (discrete RGB on LEDC)
// ---------------------------------------------------------------------------

/// D8.
pub const LED_R_GPIO: i32 = 7;
/// D9.
pub const LED_G_GPIO: i32 = 8;
/// D10.
pub const LED_B_GPIO: i32 = 9;

/// LEDC frequency for the RGB status LED (1 kHz).
pub const LED_PWM_FREQ_HZ: u32 = 1_000;
