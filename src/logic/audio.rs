//! Music and sound effect playback.
//!
//! Clips are read into memory on `load` and decoded again for every `play`,
//! so the same effect can overlap itself. Without an output device the
//! manager runs in silent mode: clips are still loaded and validated, but
//! nothing is played.

use crate::shared::ports::SoundPort;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::collections::HashMap;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct SoundManager {
    _stream: Option<OutputStream>,
    stream_handle: Option<OutputStreamHandle>,
    clips: HashMap<PathBuf, Arc<[u8]>>,
    /// Sinks still playing, keyed by the clip they play.
    playing: Vec<(PathBuf, Sink)>,
}

impl SoundManager {
    pub fn new() -> Self {
        match OutputStream::try_default() {
            Ok((stream, stream_handle)) => {
                log::info!("AUDIO: Device found, audio enabled");
                Self {
                    _stream: Some(stream),
                    stream_handle: Some(stream_handle),
                    clips: HashMap::new(),
                    playing: Vec::new(),
                }
            }
            Err(e) => {
                log::warn!(
                    "AUDIO: No audio device found ({}), running in silent mode",
                    e
                );
                Self::silent()
            }
        }
    }

    /// A manager that never opens an output device.
    pub fn silent() -> Self {
        Self {
            _stream: None,
            stream_handle: None,
            clips: HashMap::new(),
            playing: Vec::new(),
        }
    }

    fn decode(bytes: &Arc<[u8]>) -> Result<Decoder<Cursor<Arc<[u8]>>>, String> {
        Decoder::new(Cursor::new(Arc::clone(bytes))).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
impl SoundManager {
    pub fn has_audio(&self) -> bool {
        self.stream_handle.is_some()
    }

    pub fn is_loaded(&self, path: &Path) -> bool {
        self.clips.contains_key(path)
    }

    pub fn playing_count(&self) -> usize {
        self.playing.len()
    }
}

impl Default for SoundManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SoundPort for SoundManager {
    fn load(&mut self, path: &Path) -> Result<(), String> {
        if self.clips.contains_key(path) {
            return Ok(());
        }

        let bytes: Arc<[u8]> = fs::read(path)
            .map_err(|e| format!("Cannot open {}: {}", path.display(), e))?
            .into();
        Self::decode(&bytes).map_err(|e| format!("Cannot decode {}: {}", path.display(), e))?;

        log::info!("AUDIO: Loaded {}", path.display());
        self.clips.insert(path.to_path_buf(), bytes);
        Ok(())
    }

    fn play(&mut self, path: &Path) -> Result<(), String> {
        let Some(bytes) = self.clips.get(path) else {
            return Err(format!("{} is not loaded", path.display()));
        };
        let Some(stream_handle) = &self.stream_handle else {
            return Ok(());
        };

        let source = Self::decode(bytes)?;
        let sink = Sink::try_new(stream_handle).map_err(|e| format!("Failed to create sink: {}", e))?;
        sink.append(source);

        self.playing.push((path.to_path_buf(), sink));
        Ok(())
    }

    fn unload(&mut self, path: &Path) -> Result<(), String> {
        self.playing.retain(|(playing_path, sink)| {
            if playing_path == path {
                sink.stop();
                false
            } else {
                true
            }
        });

        if self.clips.remove(path).is_none() {
            return Err(format!("{} is not loaded", path.display()));
        }
        log::info!("AUDIO: Unloaded {}", path.display());
        Ok(())
    }

    fn update_sources(&mut self) {
        self.playing.retain(|(_, sink)| !sink.empty());
    }
}
