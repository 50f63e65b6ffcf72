//! Polled quadrature decoder for the rotary encoder.
//!
//! On a falling edge of CLK the DT level gives the direction: high is a
//! clockwise step (+1), low is counter-clockwise (−1).  The position is
//! cumulative and wraps on overflow; consumers bound the per-tick delta.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuadratureDecoder {
    position: i32,
    last_clk: Option<bool>,
}

impl QuadratureDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one debounced sample of both lines; returns the position.
    pub fn step(&mut self, clk: bool, dt: bool) -> i32 {
        if self.last_clk == Some(true) && !clk {
            self.position = self.position.wrapping_add(if dt { 1 } else { -1 });
        }
        self.last_clk = Some(clk);
        self.position
    }

    pub fn position(&self) -> i32 {
        self.position
    }
}
