use super::AudioFormat;

pub const DEFAULT_SAMPLE_RATE: u32 = 24000;
pub const DEFAULT_BITS_PER_SAMPLE: u32 = 16;

/// Parse sample rate and bit depth from an audio MIME type such as
/// `audio/L16;rate=24000`.
///
/// Parsing is permissive: fields that are missing or fail to parse keep
/// their defaults (or the last valid value seen), so this never fails.
pub fn parse(mime_type: &str) -> AudioFormat {
    let mut format = AudioFormat::default();

    for param in mime_type.split(';').map(str::trim) {
        if let Some(rate) = strip_prefix_ignore_case(param, "rate=") {
            if let Ok(rate) = rate.trim().parse() {
                format.sample_rate = rate;
            }
        } else if let Some(bits) = param.strip_prefix("audio/L") {
            if let Ok(bits) = bits.trim().parse() {
                format.bits_per_sample = bits;
            }
        }
    }

    format
}

/// Whether the MIME type already describes a finished WAV file.
///
/// Only the bare type names match; anything carrying parameters is treated
/// as raw samples and gets wrapped.
pub fn is_wav_container(mime_type: &str) -> bool {
    let mime_type = mime_type.trim();
    ["audio/wav", "audio/x-wav"]
        .iter()
        .any(|wav| mime_type.eq_ignore_ascii_case(wav))
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(bits_per_sample: u32, sample_rate: u32) -> AudioFormat {
        AudioFormat {
            sample_rate,
            bits_per_sample,
        }
    }

    #[test]
    fn test_parse_well_formed() {
        assert_eq!(parse("audio/L16;rate=24000"), format(16, 24000));
        assert_eq!(parse("audio/L8;rate=8000"), format(8, 8000));
        assert_eq!(parse("audio/L32; rate=96000"), format(32, 96000));
    }

    #[test]
    fn test_parse_unrecognised_uses_defaults() {
        assert_eq!(parse("audio/ogg"), format(16, 24000));
        assert_eq!(parse(""), format(16, 24000));
        assert_eq!(parse(";;;"), format(16, 24000));
    }

    #[test]
    fn test_parse_ignores_unknown_params() {
        assert_eq!(parse("audio/L24;rate=48000;codec=x"), format(24, 48000));
    }

    #[test]
    fn test_parse_order_independent() {
        assert_eq!(parse("rate=16000;audio/L8"), format(8, 16000));
    }

    #[test]
    fn test_parse_rate_case_insensitive() {
        assert_eq!(parse("audio/L16;RATE=22050"), format(16, 22050));
        assert_eq!(parse("audio/L16;Rate=44100"), format(16, 44100));
    }

    #[test]
    fn test_parse_bits_prefix_case_sensitive() {
        assert_eq!(parse("audio/l24;rate=48000"), format(16, 48000));
        assert_eq!(parse("AUDIO/L24"), format(16, 24000));
    }

    #[test]
    fn test_parse_non_numeric_keeps_previous() {
        assert_eq!(parse("audio/Lxx;rate=fast"), format(16, 24000));
        assert_eq!(parse("audio/L24;rate=48000;rate=abc"), format(24, 48000));
        assert_eq!(parse("audio/L;rate="), format(16, 24000));
        assert_eq!(parse("audio/L16;rate=-1"), format(16, 24000));
    }

    #[test]
    fn test_parse_last_valid_wins() {
        assert_eq!(
            parse("audio/L8;rate=8000;audio/L24;rate=48000"),
            format(24, 48000)
        );
    }

    #[test]
    fn test_parse_multibyte_input() {
        assert_eq!(parse("räte=1;ü"), format(16, 24000));
    }

    #[test]
    fn test_is_wav_container() {
        assert!(is_wav_container("audio/wav"));
        assert!(is_wav_container("audio/x-wav"));
        assert!(is_wav_container("Audio/WAV"));
        assert!(!is_wav_container("audio/wav;rate=24000"));
        assert!(!is_wav_container("audio/wave"));
        assert!(!is_wav_container("audio/vnd.wave"));
        assert!(!is_wav_container("audio/L16;rate=24000"));
        assert!(!is_wav_container("audio/mpeg"));
        assert!(!is_wav_container(""));
    }
}
