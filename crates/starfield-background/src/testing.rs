//! Deterministic random sources for reproducing exact particle fields.

use rand::RngCore;

/// A random source that replays a fixed script of `u32` outputs.
///
/// `rand` turns one `u32` into an `f32` as `(value >> 8) * 2^-24`, so `0`
/// yields `0.0` and `1 << 31` yields exactly `0.5`. Once the script is
/// exhausted the last value repeats.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    script: Vec<u32>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(script: Vec<u32>) -> Self {
        Self { script, cursor: 0 }
    }

    /// A source that always returns `value`.
    pub fn constant(value: u32) -> Self {
        Self::new(vec![value])
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        let Some(last) = self.script.len().checked_sub(1) else {
            return 0;
        };
        let value = self.script[self.cursor.min(last)];
        self.cursor += 1;
        value
    }

    fn next_u64(&mut self) -> u64 {
        (u64::from(self.next_u32()) << 32) | u64::from(self.next_u32())
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}
