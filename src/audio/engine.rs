use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::debug;

use crate::config::AudioSettings;
use crate::player::{EngineEvent, MediaEngine};

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, AudioError};

/// Command proxy for the audio thread.
pub struct RodioEngine {
    tx: Sender<AudioCmd>,
    join: Option<JoinHandle<()>>,
}

impl RodioEngine {
    /// Start the audio thread on the default output device.
    ///
    /// Returns the engine handle and the receiving end of its event channel.
    pub fn spawn(settings: &AudioSettings) -> Result<(Self, Receiver<EngineEvent>), AudioError> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (event_tx, event_rx) = mpsc::channel::<EngineEvent>();
        let (ready_tx, ready_rx) = mpsc::sync_channel(1);

        let join = spawn_audio_thread(rx, event_tx, ready_tx, settings.clone());
        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => {
                return Err(AudioError::NoOutputDevice(
                    "audio thread exited during startup".to_string(),
                ));
            }
        }

        Ok((
            Self {
                tx,
                join: Some(join),
            },
            event_rx,
        ))
    }

    fn send(&self, cmd: AudioCmd) {
        if let Err(e) = self.tx.send(cmd) {
            debug!(cmd = ?e.0, "audio thread is gone, dropping command");
        }
    }

    /// Fade out, stop the audio thread and wait for it to exit.
    pub fn quit_softly(&mut self, fade_out: Duration) {
        self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}

impl MediaEngine for RodioEngine {
    fn load(&mut self, locator: &str, generation: u64) {
        self.send(AudioCmd::Load {
            locator: locator.to_string(),
            generation,
        });
    }

    fn play(&mut self) {
        self.send(AudioCmd::Play);
    }

    fn pause(&mut self) {
        self.send(AudioCmd::Pause);
    }

    fn seek(&mut self, position: f64) {
        let position = if position.is_finite() { position.max(0.0) } else { 0.0 };
        self.send(AudioCmd::Seek(Duration::from_secs_f64(position)));
    }

    fn set_volume(&mut self, volume: f64) {
        self.send(AudioCmd::SetVolume(volume as f32));
    }
}
