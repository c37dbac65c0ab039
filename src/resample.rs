//! PCM normalization for the streaming pipeline.
//!
//! Decoded frames arrive in whatever sample format the codec produces
//! (planar or interleaved, integer or float). The encoder wants interleaved
//! signed 16-bit PCM at the stream's native rate and channel count, so the
//! only work here is sample-format conversion and interleaving. No rate or
//! layout conversion happens; both stay pinned to the source.

use symphonia::core::audio::{AudioBufferRef, SampleBuffer};

/// Converts decoded frames into interleaved s16 PCM, one chunk per frame.
///
/// One instance lives for one conversion job. The scratch `SampleBuffer` is
/// sized from the first frame and reused; samples are never buffered across
/// frames, so ordering is preserved and nothing is dropped or duplicated at
/// frame boundaries.
pub struct S16Interleaver {
    scratch: Option<SampleBuffer<i16>>,
}

impl Default for S16Interleaver {
    fn default() -> Self {
        Self::new()
    }
}

impl S16Interleaver {
    pub fn new() -> Self {
        Self { scratch: None }
    }

    /// Convert one decoded frame into interleaved s16 samples.
    ///
    /// The returned slice is valid until the next `push` call. Its length is
    /// `frames * channels`, i.e. always a multiple of the channel count.
    pub fn push(&mut self, decoded: &AudioBufferRef<'_>) -> &[i16] {
        self.ensure_scratch(decoded);

        let buf = self
            .scratch
            .as_mut()
            .expect("scratch buffer initialized by ensure_scratch");

        buf.copy_interleaved_ref(decoded.clone());
        buf.samples()
    }

    fn ensure_scratch(&mut self, decoded: &AudioBufferRef<'_>) {
        let needed = decoded.capacity() as u64;

        // Re-allocate if a later frame is larger than the first one; some
        // codecs vary their frame size.
        let fits = self
            .scratch
            .as_ref()
            .is_some_and(|buf| buf.capacity() >= needed as usize * decoded.spec().channels.count());

        if !fits {
            self.scratch = Some(SampleBuffer::<i16>::new(needed, *decoded.spec()));
        }
    }
}

#[cfg(test)]
mod tests {
    use symphonia::core::audio::{AsAudioBufferRef, AudioBuffer, Channels, Signal, SignalSpec};

    use super::*;

    fn stereo_frame(left: &[f32], right: &[f32]) -> AudioBuffer<f32> {
        assert_eq!(left.len(), right.len());
        let spec = SignalSpec::new(16_000, Channels::FRONT_LEFT | Channels::FRONT_RIGHT);
        let mut buf = AudioBuffer::<f32>::new(left.len() as u64, spec);
        buf.render_reserved(Some(left.len()));
        buf.chan_mut(0).copy_from_slice(left);
        buf.chan_mut(1).copy_from_slice(right);
        buf
    }

    #[test]
    fn interleaves_planar_stereo_in_frame_order() {
        let frame = stereo_frame(&[0.5, 0.25], &[-0.5, -0.25]);

        let mut interleaver = S16Interleaver::new();
        let pcm = interleaver.push(&frame.as_audio_buffer_ref());

        assert_eq!(pcm.len(), 4);
        assert_eq!(pcm.len() % 2, 0);

        // L0 R0 L1 R1, signs preserved, magnitudes ordered.
        assert!(pcm[0] > 0 && pcm[1] < 0);
        assert!(pcm[2] > 0 && pcm[3] < 0);
        assert!(pcm[0] > pcm[2]);
        assert!(pcm[1] < pcm[3]);
    }

    #[test]
    fn silence_maps_to_zero_samples() {
        let frame = stereo_frame(&[0.0; 8], &[0.0; 8]);

        let mut interleaver = S16Interleaver::new();
        let pcm = interleaver.push(&frame.as_audio_buffer_ref());

        assert_eq!(pcm.len(), 16);
        assert!(pcm.iter().all(|&s| s == 0));
    }

    #[test]
    fn total_sample_count_is_preserved_across_frames() {
        let mut interleaver = S16Interleaver::new();

        let mut total = 0usize;
        for frames in [3usize, 7, 1, 5] {
            let frame = stereo_frame(&vec![0.1; frames], &vec![-0.1; frames]);
            total += interleaver.push(&frame.as_audio_buffer_ref()).len();
        }

        assert_eq!(total, (3 + 7 + 1 + 5) * 2);
    }

    #[test]
    fn scratch_grows_for_larger_later_frames() {
        let mut interleaver = S16Interleaver::new();

        let small = stereo_frame(&[0.1; 4], &[0.1; 4]);
        assert_eq!(interleaver.push(&small.as_audio_buffer_ref()).len(), 8);

        let large = stereo_frame(&[0.1; 64], &[0.1; 64]);
        assert_eq!(interleaver.push(&large.as_audio_buffer_ref()).len(), 128);
    }
}
