//! Logging init: file under the XDG state dir, stderr when unavailable.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Log sink: the state-dir file, or stderr when the file can't be cloned.
enum LogSink {
    File(fs::File),
    Stderr,
}

impl io::Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogSink::File(f) => f.write(buf),
            LogSink::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogSink::File(f) => f.flush(),
            LogSink::Stderr => io::stderr().lock().flush(),
        }
    }
}

fn open_state_log() -> Result<(PathBuf, fs::File)> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cdm")?;
    let log_dir = xdg_dirs.get_state_home().join("cdm");
    fs::create_dir_all(&log_dir)?;
    let path = log_dir.join("cdm.log");
    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((path, file))
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,cdm=debug"))
}

/// Initialize structured logging to `~/.local/state/cdm/cdm.log`, falling
/// back to stderr when the state dir is unavailable.
pub fn init() {
    match open_state_log() {
        Ok((path, file)) => {
            struct StateFileWriter(fs::File);

            impl<'a> MakeWriter<'a> for StateFileWriter {
                type Writer = LogSink;

                fn make_writer(&'a self) -> Self::Writer {
                    self.0
                        .try_clone()
                        .map(LogSink::File)
                        .unwrap_or(LogSink::Stderr)
                }
            }

            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(BoxMakeWriter::new(StateFileWriter(file)))
                .with_ansi(false)
                .init();
            tracing::info!("cdm logging initialized at {}", path.display());
        }
        Err(err) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(io::stderr)
                .with_ansi(false)
                .init();
            tracing::warn!("state dir unavailable ({err:#}), logging to stderr");
        }
    }
}
