#[path = "../../helpers/mod.rs"]
mod helpers;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use audioscribe::application::ports::TranscodeError;
use audioscribe::application::services::{AudioNormalizer, NormalizeError, canonical_path_for};
use audioscribe::domain::{AudioResource, CanonicalFormat};
use audioscribe::infrastructure::audio::{FfmpegTranscoder, check_ffmpeg_binary};

use helpers::fakes::{FakeTranscoder, TranscoderMode, scratch_entries};

fn write_input(dir: &Path, name: &str, body: &[u8]) -> AudioResource {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    let ext = format!(".{}", path.extension().unwrap().to_string_lossy());
    AudioResource::new("https://example.com/input", ext, path)
}

#[tokio::test]
async fn given_wav_input_when_normalizing_then_passes_through_without_transcoding() {
    let dir = tempfile::tempdir().unwrap();
    let resource = write_input(dir.path(), "audio_1.wav", b"RIFFWAVE");
    let transcoder = Arc::new(FakeTranscoder::new(TranscoderMode::Copy));
    let normalizer = AudioNormalizer::new(transcoder.clone(), None);

    let normalized = normalizer.normalize(&resource).await.unwrap();

    assert_eq!(normalized.path(), resource.path());
    assert!(!normalized.was_converted());
    assert_eq!(transcoder.calls(), 0);
}

#[tokio::test]
async fn given_mp3_input_when_normalizing_then_produces_distinct_wav_file() {
    let dir = tempfile::tempdir().unwrap();
    let resource = write_input(dir.path(), "audio_2.mp3", b"ID3fake");
    let transcoder = Arc::new(FakeTranscoder::new(TranscoderMode::Copy));
    let normalizer = AudioNormalizer::new(transcoder.clone(), None);

    let normalized = normalizer.normalize(&resource).await.unwrap();

    assert!(normalized.was_converted());
    assert_ne!(normalized.path(), resource.path());
    assert_eq!(normalized.path(), dir.path().join("audio_2.wav"));
    assert!(normalized.path().exists());
    assert_eq!(transcoder.calls(), 1);
    assert_eq!(transcoder.last_format(), Some(CanonicalFormat::PCM16_MONO_16K));
}

#[tokio::test]
async fn given_transcoder_fails_when_normalizing_then_partial_output_is_removed() {
    let dir = tempfile::tempdir().unwrap();
    let resource = write_input(dir.path(), "audio_3.ogg", b"OggS");
    let transcoder = Arc::new(FakeTranscoder::new(TranscoderMode::FailAfterPartialWrite));
    let normalizer = AudioNormalizer::new(transcoder, None);

    let result = normalizer.normalize(&resource).await;

    assert!(matches!(
        result,
        Err(NormalizeError::Transcode(TranscodeError::Failed { code: Some(1), .. }))
    ));
    assert!(!dir.path().join("audio_3.wav").exists());
    // Input is owned by the caller and left alone.
    assert!(resource.path().exists());
    assert_eq!(scratch_entries(dir.path()), 1);
}

#[tokio::test]
async fn given_transcoder_hangs_when_normalizing_then_times_out_and_removes_partial_output() {
    let dir = tempfile::tempdir().unwrap();
    let resource = write_input(dir.path(), "audio_4.m4a", b"ftyp");
    let transcoder = Arc::new(FakeTranscoder::new(TranscoderMode::Hang));
    let limit = Duration::from_millis(30);
    let normalizer = AudioNormalizer::new(transcoder, Some(limit));

    let result = normalizer.normalize(&resource).await;

    assert!(matches!(result, Err(NormalizeError::TimedOut(d)) if d == limit));
    assert!(!dir.path().join("audio_4.wav").exists());
}

#[test]
fn given_path_with_other_extension_when_computing_canonical_path_then_swaps_extension() {
    assert_eq!(
        canonical_path_for(Path::new("/tmp/x/audio_abc.mp3")),
        Path::new("/tmp/x/audio_abc.wav")
    );
}

#[tokio::test]
async fn given_ffmpeg_available_when_normalizing_real_audio_then_output_is_mono_16k_pcm() {
    let binary = Path::new("ffmpeg");
    if !check_ffmpeg_binary(binary).await {
        eprintln!("Skipping: ffmpeg not available");
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("tone.mp3");
    let status = tokio::process::Command::new("ffmpeg")
        .args(["-hide_banner", "-loglevel", "error", "-y", "-f", "lavfi", "-i"])
        .arg("sine=frequency=440:duration=1")
        .args(["-ac", "2", "-ar", "44100"])
        .arg(&input)
        .status()
        .await
        .unwrap();
    if !status.success() {
        eprintln!("Skipping: ffmpeg cannot encode mp3 here");
        return;
    }

    let resource = AudioResource::new("https://example.com/tone.mp3", ".mp3", input);
    let normalizer = AudioNormalizer::new(
        Arc::new(FfmpegTranscoder::new("ffmpeg")),
        Some(Duration::from_secs(30)),
    );

    let normalized = normalizer.normalize(&resource).await.unwrap();
    let bytes = std::fs::read(normalized.path()).unwrap();

    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(&bytes[8..12], b"WAVE");
    // fmt chunk sits right after the RIFF header.
    let channels = u16::from_le_bytes([bytes[22], bytes[23]]);
    let sample_rate = u32::from_le_bytes([bytes[24], bytes[25], bytes[26], bytes[27]]);
    let bits = u16::from_le_bytes([bytes[34], bytes[35]]);
    assert_eq!(channels, 1);
    assert_eq!(sample_rate, 16_000);
    assert_eq!(bits, 16);
}
