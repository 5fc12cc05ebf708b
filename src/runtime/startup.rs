use std::path::PathBuf;

use crate::config::PlaylistSettings;

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the terminal player on a manifest file or a directory.
    Play { source: PathBuf },
    /// Run the contact endpoint.
    Serve { memory: bool },
}

/// Parse `soundroom [PLAYLIST]` / `soundroom serve [--memory]`.
///
/// Without a playlist argument the configured `playlist.source` is used,
/// then the current directory.
pub fn parse_args<I>(args: I, playlist: &PlaylistSettings) -> Result<Command, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    match args.next() {
        Some(cmd) if cmd == "serve" => {
            let mut memory = false;
            for arg in args {
                match arg.as_str() {
                    "--memory" => memory = true,
                    other => return Err(format!("unknown serve option: {other}")),
                }
            }
            Ok(Command::Serve { memory })
        }
        Some(path) => {
            if let Some(extra) = args.next() {
                return Err(format!("unexpected argument: {extra}"));
            }
            Ok(Command::Play {
                source: PathBuf::from(path),
            })
        }
        None => {
            let source = playlist
                .source
                .clone()
                .or_else(|| std::env::current_dir().ok())
                .unwrap_or_else(|| PathBuf::from("."));
            Ok(Command::Play { source })
        }
    }
}
