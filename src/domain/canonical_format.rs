use std::path::Path;

/// Container extension the speech backend accepts.
pub const CANONICAL_EXTENSION: &str = "wav";

/// Target encoding for every file handed to the speech backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalFormat {
    pub channels: u16,
    pub sample_rate_hz: u32,
    pub codec: &'static str,
    pub container: &'static str,
}

impl CanonicalFormat {
    /// Mono, 16 kHz, signed 16-bit little-endian PCM in a wave container.
    pub const PCM16_MONO_16K: Self = Self {
        channels: 1,
        sample_rate_hz: 16_000,
        codec: "pcm_s16le",
        container: "wav",
    };
}

impl Default for CanonicalFormat {
    fn default() -> Self {
        Self::PCM16_MONO_16K
    }
}

pub fn is_canonical_container(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(CANONICAL_EXTENSION))
        .unwrap_or(false)
}
