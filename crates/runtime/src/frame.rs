use foundation::time::Time;

/// Metadata for one animation tick.
///
/// Ticks are driven by the display refresh; `dt_s` is whatever the host
/// measured, so the damping math stays per-tick rather than per-second.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based tick index.
    pub index: u64,
    /// Seconds since the previous tick.
    pub dt_s: f64,
    /// Accumulated time at the start of the tick.
    pub time: Time,
}

impl Frame {
    pub fn first(dt_s: f64) -> Self {
        Self {
            index: 0,
            dt_s,
            time: Time(0.0),
        }
    }

    /// Next tick after `dt_s` seconds.
    pub fn advance(self, dt_s: f64) -> Self {
        Self {
            index: self.index + 1,
            dt_s,
            time: Time(self.time.0 + self.dt_s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Frame;
    use foundation::time::Time;

    #[test]
    fn advance_accumulates_previous_delta() {
        let f0 = Frame::first(0.5);
        let f1 = f0.advance(0.25);
        let f2 = f1.advance(0.25);
        assert_eq!(f1.index, 1);
        assert_eq!(f1.time, Time(0.5));
        assert_eq!(f2.index, 2);
        assert_eq!(f2.time, Time(0.75));
    }
}
