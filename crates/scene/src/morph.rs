use crate::point_cloud::MorphFrame;

/// Maps the continuous time parameter onto per-slot morph influences.
///
/// Real frames are cross-faded pairwise: `t = 0` shows the first frame,
/// `t = 1` the last, and values in between blend the two neighbouring frames
/// linearly. Padding slots always carry zero influence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MorphBlender {
    time: f64,
    influences: Vec<f64>,
}

impl MorphBlender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Stores `t` and recomputes influences for `frames`.
    ///
    /// `t` is not clamped; values outside `[0, 1]` extrapolate the same
    /// formula and only the slots that land on a real frame are written.
    pub fn set_time(&mut self, t: f64, frames: &[MorphFrame]) -> &[f64] {
        self.time = t;
        self.refresh(frames)
    }

    /// Recomputes influences at the stored time, e.g. after a re-ingest.
    pub fn refresh(&mut self, frames: &[MorphFrame]) -> &[f64] {
        let real: Vec<usize> = frames
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.is_padding())
            .map(|(i, _)| i)
            .collect();

        self.influences.clear();
        self.influences.resize(frames.len(), 0.0);
        for (slot, weight) in blend_weights(self.time, real.len()) {
            self.influences[real[slot]] = weight;
        }
        &self.influences
    }

    pub fn influences(&self) -> &[f64] {
        &self.influences
    }
}

/// Non-zero `(frame, weight)` pairs for `frame_count` real frames at `t`.
pub fn blend_weights(t: f64, frame_count: usize) -> Vec<(usize, f64)> {
    if frame_count == 0 {
        return Vec::new();
    }

    let last = (frame_count - 1) as f64;
    let scaled = t * last + 1.0;
    let index = scaled.floor();
    let leftover = scaled - index;
    let index = index as i64;

    let mut out = Vec::with_capacity(2);
    let in_range = |i: i64| i >= 0 && (i as usize) < frame_count;
    if in_range(index - 1) {
        out.push(((index - 1) as usize, 1.0 - leftover));
    }
    if in_range(index) {
        out.push((index as usize, leftover));
    }
    out
}
