//! DFPlayer Mini serial protocol and playback state.
//!
//! Every command is a fixed 10-byte frame at 9600 8N1:
//! ```text
//! Byte 0:    0x7E start
//! Byte 1:    0xFF version
//! Byte 2:    0x06 length (bytes 1..=6)
//! Byte 3:    command
//! Byte 4:    feedback request (1 = module acknowledges)
//! Byte 5-6:  parameter, big-endian
//! Byte 7-8:  checksum, big-endian: 0 - sum(bytes 1..=6)
//! Byte 9:    0xEF end
//! ```

use crate::config::PLAYER_MAX_VOLUME;

/// Frame size in bytes.
pub const FRAME_SIZE: usize = 10;

const START: u8 = 0x7E;
const VERSION: u8 = 0xFF;
const LENGTH: u8 = 0x06;
const END: u8 = 0xEF;

/// Commands this driver issues.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Play track by index (1-based).
    PlayTrack,
    /// Set volume 0..=30.
    Volume,
    Reset,
    /// Resume after pause.
    Start,
    Pause,
    Stop,
}

impl Command {
    pub const fn code(self) -> u8 {
        match self {
            Command::PlayTrack => 0x03,
            Command::Volume => 0x06,
            Command::Reset => 0x0C,
            Command::Start => 0x0D,
            Command::Pause => 0x0E,
            Command::Stop => 0x16,
        }
    }
}

/// An encoded command frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame([u8; FRAME_SIZE]);

impl Frame {
    pub fn new(command: Command, param: u16, feedback: bool) -> Self {
        let [hi, lo] = param.to_be_bytes();
        let mut bytes = [
            START,
            VERSION,
            LENGTH,
            command.code(),
            feedback as u8,
            hi,
            lo,
            0,
            0,
            END,
        ];
        let [chk_hi, chk_lo] = checksum(&bytes[1..7]).to_be_bytes();
        bytes[7] = chk_hi;
        bytes[8] = chk_lo;
        Self(bytes)
    }

    pub fn bytes(&self) -> &[u8; FRAME_SIZE] {
        &self.0
    }
}

/// Two's complement of the byte sum.
pub fn checksum(body: &[u8]) -> u16 {
    let sum = body.iter().fold(0u16, |acc, &b| acc.wrapping_add(b as u16));
    0u16.wrapping_sub(sum)
}

/// Byte transport to one module (UART TX).
pub trait FrameSink {
    type Error;

    fn send(&mut self, frame: &Frame) -> Result<(), Self::Error>;
}

/// Playback state tracked on our side; the module is never queried.
pub struct Mp3Player<T> {
    sink: T,
    feedback: bool,
    playing: bool,
    paused: bool,
    last_track: u16,
}

impl<T: FrameSink> Mp3Player<T> {
    pub fn new(sink: T, feedback: bool) -> Self {
        Self {
            sink,
            feedback,
            playing: false,
            paused: false,
            last_track: 0,
        }
    }

    fn send(&mut self, command: Command, param: u16) -> Result<(), T::Error> {
        let frame = Frame::new(command, param, self.feedback);
        self.sink.send(&frame)
    }

    /// Optionally reset the module, then forget any playback state.
    pub fn begin(&mut self, reset: bool) -> Result<(), T::Error> {
        if reset {
            self.send(Command::Reset, 0)?;
        }
        self.playing = false;
        self.paused = false;
        self.last_track = 0;
        Ok(())
    }

    /// Volume is clamped to the module's 0..=30 range.
    pub fn set_volume(&mut self, volume: u8) -> Result<(), T::Error> {
        self.send(Command::Volume, volume.min(PLAYER_MAX_VOLUME) as u16)
    }

    /// Play a track; index 0 is ignored.
    pub fn play(&mut self, track: u16) -> Result<(), T::Error> {
        if track == 0 {
            return Ok(());
        }
        self.send(Command::PlayTrack, track)?;
        self.last_track = track;
        self.playing = true;
        self.paused = false;
        Ok(())
    }

    /// Pause, resume, or (when stopped) replay the last track or track 1.
    pub fn toggle_play_pause(&mut self) -> Result<(), T::Error> {
        if !self.playing {
            let track = if self.last_track == 0 { 1 } else { self.last_track };
            return self.play(track);
        }

        if self.paused {
            self.send(Command::Start, 0)?;
        } else {
            self.send(Command::Pause, 0)?;
        }
        self.paused = !self.paused;
        Ok(())
    }

    pub fn stop(&mut self) -> Result<(), T::Error> {
        self.send(Command::Stop, 0)?;
        self.playing = false;
        self.paused = false;
        Ok(())
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn last_track(&self) -> u16 {
        self.last_track
    }

    pub fn sink(&self) -> &T {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        frames: Vec<Frame>,
        fail: bool,
    }

    impl FrameSink for Recorder {
        type Error = ();

        fn send(&mut self, frame: &Frame) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.frames.push(*frame);
            Ok(())
        }
    }

    fn commands(player: &Mp3Player<Recorder>) -> Vec<u8> {
        player.sink().frames.iter().map(|f| f.bytes()[3]).collect()
    }

    #[test]
    fn frame_layout_for_play_track() {
        let frame = Frame::new(Command::PlayTrack, 1, false);
        // 0xFF + 0x06 + 0x03 + 0x00 + 0x00 + 0x01 = 0x109 → 0xFEF7
        assert_eq!(
            frame.bytes(),
            &[0x7E, 0xFF, 0x06, 0x03, 0x00, 0x00, 0x01, 0xFE, 0xF7, 0xEF]
        );
    }

    #[test]
    fn frame_with_feedback_and_wide_param() {
        let frame = Frame::new(Command::PlayTrack, 0x0102, true);
        let b = frame.bytes();
        assert_eq!(b[4], 1);
        assert_eq!((b[5], b[6]), (0x01, 0x02));
        let sum: u16 = b[1..7].iter().map(|&x| x as u16).sum();
        assert_eq!(sum.wrapping_add(u16::from_be_bytes([b[7], b[8]])), 0);
    }

    #[test]
    fn volume_is_clamped() {
        let mut p = Mp3Player::new(Recorder::default(), false);
        p.set_volume(99).unwrap();
        let b = p.sink().frames[0].bytes();
        assert_eq!(b[3], Command::Volume.code());
        assert_eq!(b[6], 30);
    }

    #[test]
    fn begin_with_reset_sends_reset() {
        let mut p = Mp3Player::new(Recorder::default(), true);
        p.begin(true).unwrap();
        p.begin(false).unwrap();
        assert_eq!(commands(&p), vec![0x0C]);
    }

    #[test]
    fn play_zero_is_ignored() {
        let mut p = Mp3Player::new(Recorder::default(), false);
        p.play(0).unwrap();
        assert!(commands(&p).is_empty());
        assert!(!p.is_playing());
    }

    #[test]
    fn toggle_from_stopped_plays_track_one() {
        let mut p = Mp3Player::new(Recorder::default(), false);
        p.toggle_play_pause().unwrap();
        assert!(p.is_playing());
        assert_eq!(p.last_track(), 1);
        assert_eq!(commands(&p), vec![0x03]);
    }

    #[test]
    fn toggle_cycles_pause_and_resume() {
        let mut p = Mp3Player::new(Recorder::default(), false);
        p.play(7).unwrap();
        p.toggle_play_pause().unwrap();
        assert!(p.is_paused());
        p.toggle_play_pause().unwrap();
        assert!(!p.is_paused());
        assert_eq!(commands(&p), vec![0x03, 0x0E, 0x0D]);
    }

    #[test]
    fn toggle_after_stop_resumes_last_track() {
        let mut p = Mp3Player::new(Recorder::default(), false);
        p.play(4).unwrap();
        p.stop().unwrap();
        assert!(!p.is_playing());
        p.toggle_play_pause().unwrap();
        assert_eq!(p.last_track(), 4);
        let last = p.sink().frames.last().unwrap().bytes();
        assert_eq!((last[3], last[6]), (0x03, 4));
    }

    #[test]
    fn failed_send_keeps_state() {
        let mut p = Mp3Player::new(Recorder::default(), false);
        p.play(2).unwrap();
        p.sink.fail = true;
        assert!(p.stop().is_err());
        assert!(p.is_playing());
    }
}
