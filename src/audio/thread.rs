use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, SyncSender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, warn};

use crate::config::AudioSettings;
use crate::player::{EngineEvent, MediaEvent};

use super::clock::PlaybackClock;
use super::media::{Media, create_sink_at};
use super::types::{AudioCmd, AudioError};

/// State owned by the audio thread.
struct AudioThread {
    stream: OutputStream,
    client: reqwest::blocking::Client,
    events: Sender<EngineEvent>,
    generation: u64,
    media: Option<Media>,
    sink: Option<Sink>,
    paused: bool,
    clock: PlaybackClock,
    volume: f32,
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<EngineEvent>,
    ready: SyncSender<Result<(), AudioError>>,
    settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                let _ = ready.send(Err(AudioError::NoOutputDevice(e.to_string())));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);

        let client = match reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.fetch_timeout_secs))
            .build()
        {
            Ok(c) => c,
            Err(e) => {
                let _ = ready.send(Err(AudioError::Fetch {
                    url: String::new(),
                    source: e,
                }));
                return;
            }
        };
        let _ = ready.send(Ok(()));

        let mut state = AudioThread {
            stream,
            client,
            events,
            generation: 0,
            media: None,
            sink: None,
            paused: true,
            clock: PlaybackClock::default(),
            volume: 1.0,
        };

        let tick = Duration::from_millis(settings.tick_ms.max(1));
        loop {
            match rx.recv_timeout(tick) {
                Ok(cmd) => {
                    // Commands queued behind a slow load are applied together.
                    let mut batch = vec![cmd];
                    batch.extend(rx.try_iter());
                    for cmd in coalesce(batch) {
                        if let AudioCmd::Quit { fade_out_ms } = cmd {
                            state.quit(fade_out_ms);
                            return;
                        }
                        state.handle(cmd);
                    }
                }
                Err(RecvTimeoutError::Timeout) => state.tick(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

/// Reduce a batch of pending commands to the ones that still matter.
///
/// A `Quit` wins outright. Otherwise only the last `Load` is kept, together
/// with whatever follows it; transport commands aimed at superseded media are
/// dropped, but the most recent volume change before the load survives.
pub(super) fn coalesce(batch: Vec<AudioCmd>) -> Vec<AudioCmd> {
    if let Some(pos) = batch.iter().position(|c| matches!(c, AudioCmd::Quit { .. })) {
        return batch.into_iter().skip(pos).take(1).collect();
    }
    let Some(last_load) = batch.iter().rposition(|c| matches!(c, AudioCmd::Load { .. })) else {
        return batch;
    };

    let mut volume = None;
    let mut kept = Vec::with_capacity(batch.len() - last_load + 1);
    for (i, cmd) in batch.into_iter().enumerate() {
        if i >= last_load {
            kept.push(cmd);
        } else if let AudioCmd::SetVolume(_) = cmd {
            volume = Some(cmd);
        } else if let AudioCmd::Load { locator, generation } = &cmd {
            debug!(locator, generation, "skipping superseded load");
        }
    }
    if let Some(v) = volume {
        kept.insert(0, v);
    }
    kept
}

impl AudioThread {
    fn emit(&self, event: MediaEvent) {
        let _ = self.events.send(EngineEvent {
            generation: self.generation,
            event,
        });
    }

    fn handle(&mut self, cmd: AudioCmd) {
        match cmd {
            AudioCmd::Load {
                locator,
                generation,
            } => self.load(&locator, generation),
            AudioCmd::Play => self.play(),
            AudioCmd::Pause => {
                if let Some(s) = self.sink.as_ref() {
                    s.pause();
                }
                self.paused = true;
                self.clock.pause();
            }
            AudioCmd::Seek(to) => self.seek(to),
            AudioCmd::SetVolume(v) => {
                self.volume = v.clamp(0.0, 1.0);
                if let Some(s) = self.sink.as_ref() {
                    s.set_volume(self.volume);
                }
            }
            // Handled by the loop so it can exit.
            AudioCmd::Quit { .. } => {}
        }
    }

    fn load(&mut self, locator: &str, generation: u64) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.media = None;
        self.generation = generation;
        self.paused = true;
        self.clock.reset(Duration::ZERO);

        let opened = Media::open(locator, &self.client).and_then(|media| {
            let (sink, total) = create_sink_at(&self.stream, &media, Duration::ZERO)?;
            Ok((media, sink, total))
        });

        match opened {
            Ok((media, sink, total)) => {
                sink.set_volume(self.volume);
                let duration = total.or_else(|| media.tagged_duration());
                debug!(locator, generation, ?duration, "media loaded");
                self.media = Some(media);
                self.sink = Some(sink);
                self.emit(MediaEvent::MetadataLoaded {
                    duration: duration.map_or(0.0, |d| d.as_secs_f64()),
                });
            }
            Err(e) => {
                // The player keeps its state; a failed load just stays silent.
                warn!(locator, error = %e, "failed to load media");
            }
        }
    }

    fn play(&mut self) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        // A drained sink stays silent: the next tick reports `Ended` again and
        // the player restarts the track under a new generation.
        sink.play();
        self.paused = false;
        self.clock.start();
    }

    fn seek(&mut self, to: Duration) {
        if self.sink.is_none() {
            return;
        }
        self.rebuild_at(to);
        if !self.paused {
            if let Some(s) = self.sink.as_ref() {
                s.play();
            }
            self.clock.start();
        }
        self.emit(MediaEvent::TimeUpdate {
            position: to.as_secs_f64(),
        });
    }

    /// Replace the sink with a fresh, paused one positioned at `at`.
    fn rebuild_at(&mut self, at: Duration) {
        let Some(media) = self.media.as_ref() else {
            return;
        };
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.clock.reset(at);

        match create_sink_at(&self.stream, media, at) {
            Ok((sink, _)) => {
                sink.set_volume(self.volume);
                self.sink = Some(sink);
            }
            Err(e) => warn!(error = %e, "failed to reopen media"),
        }
    }

    fn tick(&mut self) {
        if self.paused || !self.clock.is_running() {
            return;
        }
        let Some(sink) = self.sink.as_ref() else {
            return;
        };

        if sink.empty() {
            self.paused = true;
            self.clock.pause();
            self.emit(MediaEvent::Ended);
        } else {
            self.emit(MediaEvent::TimeUpdate {
                position: self.clock.elapsed().as_secs_f64(),
            });
        }
    }

    fn quit(&mut self, fade_out_ms: u64) {
        if let Some(s) = self.sink.take() {
            // Fade out gently before stopping.
            if !self.paused {
                fade_out_sink(&s, self.volume, fade_out_ms);
            }
            s.stop();
        }
    }
}

fn fade_out_sink(sink: &Sink, from: f32, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(from * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}
