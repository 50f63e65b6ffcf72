//! Majority-vote debounce filter.
//!
//! Mechanical switches and the encoder's quadrature lines bounce, so a
//! single read is unreliable.  [`Debounced`] takes `samples` reads spaced
//! `gap_us` apart and returns the majority level of the reads that
//! succeeded.  With zero samples configured it falls back to one direct
//! read.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

/// Most common value in `samples`.  `None` for an empty slice; a tie
/// resolves to `false`.
pub fn majority(samples: &[bool]) -> Option<bool> {
    if samples.is_empty() {
        return None;
    }
    let high = samples.iter().filter(|&&s| s).count();
    Some(high * 2 > samples.len())
}

/// An input pin read through the majority filter.
pub struct Debounced<P, D> {
    pin: P,
    delay: D,
    samples: u8,
    gap_us: u32,
}

impl<P: InputPin, D: DelayNs> Debounced<P, D> {
    pub fn new(pin: P, delay: D, samples: u8, gap_us: u32) -> Self {
        Self {
            pin,
            delay,
            samples,
            gap_us,
        }
    }

    /// Debounced logic level (`true` = high).  Failed reads are skipped;
    /// the error surfaces only when every sample failed.
    pub fn read(&mut self) -> Result<bool, P::Error> {
        let n = usize::from(self.samples);
        if n == 0 {
            return self.pin.is_high();
        }
        let mut buf = [false; u8::MAX as usize];
        let mut good = 0;
        let mut last_err = None;
        for i in 0..n {
            if i > 0 {
                self.delay.delay_us(self.gap_us);
            }
            match self.pin.is_high() {
                Ok(level) => {
                    buf[good] = level;
                    good += 1;
                }
                Err(e) => last_err = Some(e),
            }
        }
        match (majority(&buf[..good]), last_err) {
            (Some(level), _) => Ok(level),
            (None, Some(e)) => Err(e),
            (None, None) => self.pin.is_high(),
        }
    }
}
