//! One-shot hardware peripheral initialization and raw register helpers.
//!
//! Configures GPIO directions, the LEDC timer/channels for the status LED
//! and the I²C master bus shared by the OLED and the accelerometer,
//! using raw ESP-IDF sys calls.  Called once from `main()` before the
//! game loop starts.
//!
//! On host builds every helper is backed by atomics so tests and the
//! simulator can drive input levels and observe outputs.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use crate::error::{ActuatorError, SensorError};

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    LedcInitFailed(i32),
    I2cInitFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::LedcInitFailed(rc)   => write!(f, "LEDC timer/channel config failed (rc={})", rc),
            Self::I2cInitFailed(rc)    => write!(f, "I2C master install failed (rc={})", rc),
        }
    }
}

impl core::error::Error for HwInitError {}

#[cfg(target_os = "espidf")]
use log::info;

use crate::pins;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the game loop; single-threaded.
    unsafe {
        init_gpio_inputs()?;
        init_gpio_outputs()?;
        init_ledc()?;
        init_i2c()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<(), HwInitError> {
    // (pin, pull-up?)  The select button is active-high with a pull-down.
    let input_pins = [
        (pins::POWER_SWITCH_GPIO, true),
        (pins::ENCODER_CLK_GPIO, true),
        (pins::ENCODER_DT_GPIO, true),
        (pins::BUTTON_GPIO, false),
    ];

    for &(pin, pull_up) in &input_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: if pull_up { gpio_pullup_t_GPIO_PULLUP_ENABLE } else { gpio_pullup_t_GPIO_PULLUP_DISABLE },
            pull_down_en: if pull_up { gpio_pulldown_t_GPIO_PULLDOWN_DISABLE } else { gpio_pulldown_t_GPIO_PULLDOWN_ENABLE },
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
    }

    info!("hw_init: GPIO inputs configured (power, encoder CLK/DT, select)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

/// Simulated pin levels, one bit per GPIO.  Pulled-up inputs idle high;
/// the select button idles low and the power switch starts ON (low).
#[cfg(not(target_os = "espidf"))]
static SIM_GPIO_LEVELS: core::sync::atomic::AtomicU64 = core::sync::atomic::AtomicU64::new(
    u64::MAX
        & !(1u64 << crate::pins::BUTTON_GPIO)
        & !(1u64 << crate::pins::POWER_SWITCH_GPIO),
);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_level(pin: i32, high: bool) {
    use core::sync::atomic::Ordering;
    let bit = 1u64 << (pin as u32 & 63);
    if high {
        SIM_GPIO_LEVELS.fetch_or(bit, Ordering::Relaxed);
    } else {
        SIM_GPIO_LEVELS.fetch_and(!bit, Ordering::Relaxed);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(pin: i32) -> bool {
    use core::sync::atomic::Ordering;
    SIM_GPIO_LEVELS.load(Ordering::Relaxed) & (1u64 << (pin as u32 & 63)) != 0
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::BUZZER_GPIO,
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
    // Active-low buzzer: idle high.
    unsafe { gpio_set_level(pins::BUZZER_GPIO, 1) };

    info!("hw_init: GPIO outputs configured (buzzer)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) -> Result<(), ActuatorError> {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_gpio_outputs(). Main-loop only.
    let ret = unsafe { gpio_set_level(pin, u32::from(high)) };
    if ret != ESP_OK as i32 { return Err(ActuatorError::GpioWriteFailed); }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(pin: i32, high: bool) -> Result<(), ActuatorError> {
    sim_set_level(pin, high);
    Ok(())
}

// ── LEDC PWM ─────────────────────────────────────────────────

pub const LEDC_CH_LED_R: u32 = 0;
pub const LEDC_CH_LED_G: u32 = 1;
pub const LEDC_CH_LED_B: u32 = 2;

#[cfg(target_os = "espidf")]
unsafe fn init_ledc() -> Result<(), HwInitError> {
    // Timer 0: status LED (1 kHz, 8-bit)
    // SAFETY: Called from single main-task context via init_peripherals().
    let timer0 = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_0,
        duty_resolution: ledc_timer_bit_t_LEDC_TIMER_8_BIT,
        freq_hz: pins::LED_PWM_FREQ_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    let ret = unsafe { ledc_timer_config(&timer0) };
    if ret != ESP_OK as i32 { return Err(HwInitError::LedcInitFailed(ret)); }

    // Channels 0-2: RGB LED
    let led_gpios = [pins::LED_R_GPIO, pins::LED_G_GPIO, pins::LED_B_GPIO];
    for (i, &gpio) in led_gpios.iter().enumerate() {
        let ret = unsafe { ledc_channel_config(&ledc_channel_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel: (ledc_channel_t_LEDC_CHANNEL_0 + i as u32),
            timer_sel: ledc_timer_t_LEDC_TIMER_0,
            gpio_num: gpio,
            duty: 0,
            hpoint: 0,
            ..Default::default()
        }) };
        if ret != ESP_OK as i32 { return Err(HwInitError::LedcInitFailed(ret)); }
    }

    info!("hw_init: LEDC configured (led=CH0-2)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn ledc_set(channel: u32, duty: u8) -> Result<(), ActuatorError> {
    // SAFETY: LEDC channels were configured in init_ledc(); duty register
    // writes are race-free since only main loop calls this function.
    unsafe {
        let ret = ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, u32::from(duty));
        if ret != ESP_OK as i32 { return Err(ActuatorError::PwmWriteFailed); }
        let ret = ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel);
        if ret != ESP_OK as i32 { return Err(ActuatorError::PwmWriteFailed); }
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
static SIM_LEDC_DUTY: [core::sync::atomic::AtomicU8; 3] = [
    core::sync::atomic::AtomicU8::new(0),
    core::sync::atomic::AtomicU8::new(0),
    core::sync::atomic::AtomicU8::new(0),
];

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set(channel: u32, duty: u8) -> Result<(), ActuatorError> {
    use core::sync::atomic::Ordering;
    let slot = SIM_LEDC_DUTY
        .get(channel as usize)
        .ok_or(ActuatorError::PwmWriteFailed)?;
    slot.store(duty, Ordering::Relaxed);
    Ok(())
}

/// Last duty written to a simulated LEDC channel.
#[cfg(not(target_os = "espidf"))]
pub fn sim_ledc_duty(channel: u32) -> u8 {
    use core::sync::atomic::Ordering;
    SIM_LEDC_DUTY
        .get(channel as usize)
        .map_or(0, |d| d.load(Ordering::Relaxed))
}

// ── Safe state ───────────────────────────────────────────────

/// Silence the buzzer and darken the LED straight at the register level.
/// For the panic path, where the adapters may be mid-borrow.  Errors are
/// ignored.
pub fn outputs_inert() {
    let _ = gpio_write(pins::BUZZER_GPIO, true);
    for ch in [LEDC_CH_LED_R, LEDC_CH_LED_G, LEDC_CH_LED_B] {
        let _ = ledc_set(ch, 0);
    }
}

// ── I²C master bus (port 0) ──────────────────────────────────

#[cfg(target_os = "espidf")]
static mut I2C_BUS: i2c_master_bus_handle_t = core::ptr::null_mut();

/// Device handles for the two fixed bus addresses, indexed by [`i2c_slot`].
#[cfg(target_os = "espidf")]
static mut I2C_DEVICES: [i2c_master_dev_handle_t; 2] = [core::ptr::null_mut(); 2];

#[cfg(target_os = "espidf")]
const fn i2c_slot(addr: u8) -> Option<usize> {
    match addr {
        pins::OLED_I2C_ADDR => Some(0),
        pins::ADXL345_I2C_ADDR => Some(1),
        _ => None,
    }
}

#[cfg(target_os = "espidf")]
unsafe fn init_i2c() -> Result<(), HwInitError> {
    let mut bus_config = i2c_master_bus_config_t {
        i2c_port: i2c_port_t_I2C_NUM_0 as i2c_port_num_t,
        sda_io_num: pins::I2C_SDA_GPIO as gpio_num_t,
        scl_io_num: pins::I2C_SCL_GPIO as gpio_num_t,
        clk_source: soc_periph_i2c_clk_src_t_I2C_CLK_SRC_DEFAULT,
        glitch_ignore_cnt: 7,
        ..Default::default()
    };
    bus_config.flags.set_enable_internal_pullup(1);

    // SAFETY: I2C_BUS / I2C_DEVICES are only written here, once at boot.
    let ret = unsafe { i2c_new_master_bus(&bus_config, &raw mut I2C_BUS) };
    if ret != ESP_OK as i32 { return Err(HwInitError::I2cInitFailed(ret)); }

    for (slot, addr) in [pins::OLED_I2C_ADDR, pins::ADXL345_I2C_ADDR].into_iter().enumerate() {
        let dev_config = i2c_device_config_t {
            dev_addr_length: i2c_addr_bit_len_t_I2C_ADDR_BIT_LEN_7,
            device_address: u16::from(addr),
            scl_speed_hz: pins::I2C_FREQ_HZ,
            ..Default::default()
        };
        let ret = unsafe {
            i2c_master_bus_add_device(I2C_BUS, &dev_config, &raw mut I2C_DEVICES[slot])
        };
        if ret != ESP_OK as i32 { return Err(HwInitError::I2cInitFailed(ret)); }
    }

    info!("hw_init: I2C master on SDA={} SCL={}", pins::I2C_SDA_GPIO, pins::I2C_SCL_GPIO);
    Ok(())
}

/// SAFETY: handles are written once in init_i2c() before the game loop;
/// afterwards they are only read from the main task.
#[cfg(target_os = "espidf")]
unsafe fn i2c_device(addr: u8) -> Option<i2c_master_dev_handle_t> {
    let slot = i2c_slot(addr)?;
    let dev = unsafe { I2C_DEVICES[slot] };
    (!dev.is_null()).then_some(dev)
}

#[cfg(target_os = "espidf")]
pub fn i2c_write(addr: u8, bytes: &[u8]) -> Result<(), ActuatorError> {
    // SAFETY: i2c_device() contract; the buffer outlives the blocking call.
    let dev = unsafe { i2c_device(addr) }.ok_or(ActuatorError::I2cWriteFailed)?;
    let ret = unsafe {
        i2c_master_transmit(dev, bytes.as_ptr(), bytes.len(), pins::I2C_TIMEOUT_MS)
    };
    if ret != ESP_OK as i32 { return Err(ActuatorError::I2cWriteFailed); }
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn i2c_write_read(addr: u8, write: &[u8], read: &mut [u8]) -> Result<(), SensorError> {
    // SAFETY: as for i2c_write; `read` is exclusively borrowed for the call.
    let dev = unsafe { i2c_device(addr) }.ok_or(SensorError::NotPresent)?;
    let ret = unsafe {
        i2c_master_transmit_receive(
            dev,
            write.as_ptr(),
            write.len(),
            read.as_mut_ptr(),
            read.len(),
            pins::I2C_TIMEOUT_MS,
        )
    };
    if ret != ESP_OK as i32 { return Err(SensorError::I2cReadFailed); }
    Ok(())
}

/// Host I²C: writes are accepted and dropped; reads are served by the
/// per-device simulators (see `sensors::adxl345`).
#[cfg(not(target_os = "espidf"))]
pub fn i2c_write(_addr: u8, _bytes: &[u8]) -> Result<(), ActuatorError> {
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn i2c_write_read(_addr: u8, _write: &[u8], _read: &mut [u8]) -> Result<(), SensorError> {
    Err(SensorError::NotPresent)
}
