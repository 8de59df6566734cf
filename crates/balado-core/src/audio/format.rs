//! Audio format labels: PCM descriptors and container extension lookup
//!
//! Synthesis responses tag each chunk with a MIME-type-like label such as
//! `audio/L16; rate=24000`. Parsing is deliberately lenient: responses are
//! not always rigorously labeled, so malformed input degrades to defaults
//! instead of failing.

/// Linear PCM format descriptor derived from a chunk's format label.
///
/// Channel count has no label-derived source: the synthesis API defines no
/// channel parameter, so it always defaults to mono. Known limitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmFormat {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
}

impl Default for PcmFormat {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
        }
    }
}

impl PcmFormat {
    /// Descriptor assumed when a stream carried no format label at all.
    pub const FALLBACK: PcmFormat = PcmFormat {
        channels: 1,
        sample_rate: 24000,
        bits_per_sample: 16,
    };

    /// Parse a label of the form `type/subtype; param=value; ...`.
    ///
    /// An `L<digits>` subtype sets the bit depth, a `rate` parameter sets
    /// the sample rate. Anything unparsable keeps its default.
    pub fn from_mime(label: &str) -> Self {
        let mut format = Self::default();
        let mut segments = label.split(';').map(str::trim);

        if let Some(essence) = segments.next() {
            if let Some(subtype) = essence.split('/').nth(1) {
                let subtype = subtype.trim();
                if let Some(digits) = subtype
                    .strip_prefix('L')
                    .or_else(|| subtype.strip_prefix('l'))
                {
                    if let Ok(bits) = digits.parse::<u16>() {
                        // Only linear PCM depths the container supports.
                        if matches!(bits, 8 | 16 | 24 | 32) {
                            format.bits_per_sample = bits;
                        }
                    }
                }
            }
        }

        for param in segments {
            let mut parts = param.splitn(2, '=');
            let key = parts.next().unwrap_or("").trim().to_ascii_lowercase();
            let value = parts.next().unwrap_or("").trim();
            if key == "rate" {
                if let Ok(rate) = value.parse::<u32>() {
                    format.sample_rate = rate;
                }
            }
        }

        format
    }

    /// Bytes of audio per second
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * self.channels as u32 * self.bits_per_sample as u32 / 8
    }

    /// Bytes per sample frame across all channels
    pub fn block_align(&self) -> u16 {
        self.channels * self.bits_per_sample / 8
    }
}

/// Map a format label to a canonical file extension when the payload is
/// already a complete, self-describing container. Raw PCM labels such as
/// `audio/L16` are not containers and return `None`.
pub fn container_extension(label: &str) -> Option<&'static str> {
    let essence = label.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    match essence.as_str() {
        "audio/mpeg" | "audio/mp3" => Some("mp3"),
        "audio/mp4" => Some("m4a"),
        "audio/aac" => Some("aac"),
        "audio/ogg" => Some("ogg"),
        "audio/opus" => Some("opus"),
        "audio/flac" => Some("flac"),
        "audio/wav" | "audio/x-wav" | "audio/wave" => Some("wav"),
        "audio/webm" => Some("webm"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_mono_44100_16() {
        let format = PcmFormat::default();
        assert_eq!(format.channels, 1);
        assert_eq!(format.sample_rate, 44100);
        assert_eq!(format.bits_per_sample, 16);
    }

    #[test]
    fn parses_l16_with_rate() {
        let format = PcmFormat::from_mime("audio/L16; rate=24000");
        assert_eq!(format.channels, 1);
        assert_eq!(format.sample_rate, 24000);
        assert_eq!(format.bits_per_sample, 16);
        assert_eq!(format.byte_rate(), 48000);
        assert_eq!(format.block_align(), 2);
    }

    #[test]
    fn parses_l24_subtype() {
        let format = PcmFormat::from_mime("audio/L24;rate=48000");
        assert_eq!(format.bits_per_sample, 24);
        assert_eq!(format.sample_rate, 48000);
    }

    #[test]
    fn parameter_names_are_case_insensitive() {
        let format = PcmFormat::from_mime("audio/L16; RATE=16000");
        assert_eq!(format.sample_rate, 16000);
    }

    #[test]
    fn malformed_rate_keeps_default() {
        let format = PcmFormat::from_mime("audio/L16; rate=fast");
        assert_eq!(format.sample_rate, 44100);
    }

    #[test]
    fn unsupported_depth_keeps_default() {
        let format = PcmFormat::from_mime("audio/L12; rate=8000");
        assert_eq!(format.bits_per_sample, 16);
        assert_eq!(format.sample_rate, 8000);
    }

    #[test]
    fn garbage_label_degrades_to_defaults() {
        assert_eq!(PcmFormat::from_mime("not a mime type"), PcmFormat::default());
        assert_eq!(PcmFormat::from_mime(""), PcmFormat::default());
    }

    #[test]
    fn resolution_is_idempotent() {
        let label = "audio/L16; rate=22050";
        assert_eq!(PcmFormat::from_mime(label), PcmFormat::from_mime(label));
    }

    #[test]
    fn recognizes_container_formats() {
        assert_eq!(container_extension("audio/mpeg"), Some("mp3"));
        assert_eq!(container_extension("audio/ogg; codecs=opus"), Some("ogg"));
        assert_eq!(container_extension("AUDIO/FLAC"), Some("flac"));
    }

    #[test]
    fn raw_pcm_labels_are_not_containers() {
        assert_eq!(container_extension("audio/L16; rate=24000"), None);
        assert_eq!(container_extension(""), None);
        assert_eq!(container_extension("text/plain"), None);
    }
}
