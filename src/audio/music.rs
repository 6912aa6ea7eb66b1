//! Looping background music
//!
//! The track is read and probed once at startup so a missing or undecodable
//! file aborts before the terminal is switched into raw mode. Playback itself
//! is best effort: without an output device the game runs silently.
//!
//! Builds without the `audio` feature still require the file to be readable
//! but never open an output stream.

use anyhow::{Context, Result};
#[cfg(feature = "audio")]
use rodio::{Decoder, OutputStream, Sink, Source};
#[cfg(feature = "audio")]
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
#[cfg(feature = "audio")]
use tracing::info;
use tracing::warn;

/// An audio file held in memory and known to decode
#[derive(Debug, Clone)]
pub struct MusicTrack {
    path: PathBuf,
    bytes: Arc<[u8]>,
}

impl MusicTrack {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes: Arc<[u8]> = std::fs::read(path)
            .with_context(|| format!("Failed to read audio asset {:?}", path))?
            .into();

        let track = Self {
            path: path.to_path_buf(),
            bytes,
        };
        #[cfg(feature = "audio")]
        track.decoder()?;

        Ok(track)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(feature = "audio")]
    fn decoder(&self) -> Result<Decoder<Cursor<Arc<[u8]>>>> {
        Decoder::new(Cursor::new(self.bytes.clone()))
            .with_context(|| format!("Failed to decode audio asset {:?}", self.path))
    }
}

/// Keeps the output stream alive while the track loops
#[cfg(feature = "audio")]
pub struct BackgroundMusic {
    _stream: OutputStream,
    sink: Sink,
}

#[cfg(not(feature = "audio"))]
pub struct BackgroundMusic;

#[cfg(feature = "audio")]
impl BackgroundMusic {
    /// Start looping `track` on the default output device
    pub fn start(track: &MusicTrack) -> Result<Self> {
        let (stream, handle) =
            OutputStream::try_default().context("Failed to open audio output")?;
        let sink = Sink::try_new(&handle).context("Failed to create audio sink")?;

        sink.append(track.decoder()?.repeat_infinite());
        sink.play();
        info!(path = ?track.path(), "background music started");

        Ok(Self {
            _stream: stream,
            sink,
        })
    }

    pub fn stop(&self) {
        self.sink.stop();
    }
}

#[cfg(not(feature = "audio"))]
impl BackgroundMusic {
    pub fn start(track: &MusicTrack) -> Result<Self> {
        anyhow::bail!(
            "built without the audio feature, not playing {:?}",
            track.path()
        )
    }

    pub fn stop(&self) {}
}

impl BackgroundMusic {
    /// Like [`BackgroundMusic::start`], but logs and returns `None` on failure
    pub fn try_start(track: &MusicTrack) -> Option<Self> {
        match Self::start(track) {
            Ok(music) => Some(music),
            Err(err) => {
                warn!("playing without sound: {err:#}");
                None
            }
        }
    }
}
