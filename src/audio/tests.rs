use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use super::clock::PlaybackClock;
use super::media::{Locator, Media};
use super::thread::coalesce;
use super::types::{AudioCmd, AudioError};

#[test]
fn locator_distinguishes_remote_file_urls_and_paths() {
    assert_eq!(
        Locator::parse("https://cdn.example/a.mp3"),
        Locator::Remote("https://cdn.example/a.mp3".into())
    );
    assert_eq!(
        Locator::parse("HTTP://cdn.example/a.mp3"),
        Locator::Remote("HTTP://cdn.example/a.mp3".into())
    );
    assert_eq!(
        Locator::parse("file:///srv/audio/a.flac"),
        Locator::Local(PathBuf::from("/srv/audio/a.flac"))
    );
    assert_eq!(
        Locator::parse(" /srv/audio/a.flac "),
        Locator::Local(PathBuf::from("/srv/audio/a.flac"))
    );
}

#[test]
fn opening_a_missing_file_reports_the_path() {
    let client = reqwest::blocking::Client::new();
    let err = Media::open("file:///definitely/not/here.mp3", &client)
        .err()
        .unwrap();
    match err {
        AudioError::Io { path, .. } => assert_eq!(path, PathBuf::from("/definitely/not/here.mp3")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn memory_media_has_no_tagged_duration() {
    let media = Media::Memory(std::sync::Arc::from(&b"abc"[..]));
    assert!(media.tagged_duration().is_none());
}

#[test]
fn clock_accumulates_only_while_running() {
    let mut clock = PlaybackClock::default();
    assert_eq!(clock.elapsed(), Duration::ZERO);
    assert!(!clock.is_running());

    clock.start();
    thread::sleep(Duration::from_millis(20));
    clock.pause();
    let paused_at = clock.elapsed();
    assert!(paused_at >= Duration::from_millis(20));

    thread::sleep(Duration::from_millis(20));
    assert_eq!(clock.elapsed(), paused_at);
}

#[test]
fn clock_reset_moves_origin_and_stops() {
    let mut clock = PlaybackClock::default();
    clock.start();
    clock.reset(Duration::from_secs(42));
    assert!(!clock.is_running());
    assert_eq!(clock.elapsed(), Duration::from_secs(42));

    clock.start();
    assert!(clock.elapsed() >= Duration::from_secs(42));
}

fn load(n: u64) -> AudioCmd {
    AudioCmd::Load {
        locator: format!("https://cdn.example/{n}.mp3"),
        generation: n,
    }
}

#[test]
fn coalesce_keeps_only_the_last_load_and_what_follows() {
    let batch = vec![
        load(2),
        AudioCmd::Play,
        AudioCmd::SetVolume(0.3),
        load(3),
        AudioCmd::Play,
        load(4),
        AudioCmd::Play,
        AudioCmd::Seek(Duration::from_secs(5)),
    ];
    assert_eq!(
        coalesce(batch),
        vec![
            AudioCmd::SetVolume(0.3),
            load(4),
            AudioCmd::Play,
            AudioCmd::Seek(Duration::from_secs(5)),
        ]
    );
}

#[test]
fn coalesce_leaves_batches_without_loads_alone() {
    let batch = vec![AudioCmd::Play, AudioCmd::Pause, AudioCmd::SetVolume(0.5)];
    assert_eq!(coalesce(batch.clone()), batch);
}

#[test]
fn coalesce_lets_quit_skip_pending_loads() {
    let batch = vec![load(2), load(3), AudioCmd::Quit { fade_out_ms: 0 }, AudioCmd::Play];
    assert_eq!(coalesce(batch), vec![AudioCmd::Quit { fade_out_ms: 0 }]);
}
