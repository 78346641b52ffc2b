//! Terminal output channels
//!
//! Four prefixed channels (info, success, warn, error) share one sink. Each
//! line is rendered as `<prefix><timestamp> <message>`, and the success, warn
//! and error channels paint the whole line. Prefixes start generic
//! (`[INFO] `) and are rewritten in place once the project name is known
//! (`[demo][INFO] `).

use chrono::Local;
use console::Style;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Timestamp layout prepended to every line
const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Severity of an output channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warn,
    Error,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Info, Level::Success, Level::Warn, Level::Error];

    /// Tag shown inside the prefix brackets
    pub fn tag(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Success => "SUCC",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }

    fn style(self) -> Style {
        match self {
            Level::Info => Style::new(),
            Level::Success => Style::new().green(),
            Level::Warn => Style::new().yellow(),
            Level::Error => Style::new().red(),
        }
    }

    fn index(self) -> usize {
        match self {
            Level::Info => 0,
            Level::Success => 1,
            Level::Warn => 2,
            Level::Error => 3,
        }
    }
}

/// When to emit ANSI colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Follow terminal detection
    #[default]
    Auto,
    Always,
    Never,
}

/// A single output channel: a mutable prefix and a fixed paint style
#[derive(Debug, Clone)]
pub struct Channel {
    level: Level,
    prefix: String,
    style: Style,
}

impl Channel {
    fn new(level: Level, colors: ColorMode) -> Self {
        Self {
            level,
            prefix: format!("[{}] ", level.tag()),
            style: styled(level, colors),
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn set_project(&mut self, project: &str) {
        self.prefix = format!("[{}][{}] ", project, self.level.tag());
    }

    fn set_colors(&mut self, colors: ColorMode) {
        self.style = styled(self.level, colors);
    }

    /// Render one line, painted with this channel's style
    pub fn render(&self, msg: &str, timestamp: Option<&str>) -> String {
        let line = match timestamp {
            Some(ts) => format!("{}{} {}", self.prefix, ts, msg),
            None => format!("{}{}", self.prefix, msg),
        };
        self.style.apply_to(line).to_string()
    }
}

fn styled(level: Level, colors: ColorMode) -> Style {
    let style = level.style();
    match colors {
        ColorMode::Auto => style,
        ColorMode::Always => style.force_styling(true),
        ColorMode::Never => style.force_styling(false),
    }
}

/// The four process-wide output channels and their shared sink
pub struct Output {
    channels: [Channel; 4],
    sink: Box<dyn Write + Send>,
    timestamps: bool,
}

impl std::fmt::Debug for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Output")
            .field("channels", &self.channels)
            .field("timestamps", &self.timestamps)
            .finish_non_exhaustive()
    }
}

impl Output {
    /// Channels writing to standard output with generic prefixes
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    pub fn with_writer(sink: impl Write + Send + 'static) -> Self {
        Self {
            channels: Level::ALL.map(|level| Channel::new(level, ColorMode::Auto)),
            sink: Box::new(sink),
            timestamps: true,
        }
    }

    pub fn set_colors(&mut self, colors: ColorMode) {
        for channel in &mut self.channels {
            channel.set_colors(colors);
        }
    }

    pub fn set_timestamps(&mut self, enabled: bool) {
        self.timestamps = enabled;
    }

    /// Rewrite every prefix to embed the project name
    pub fn set_project(&mut self, project: &str) {
        for channel in &mut self.channels {
            channel.set_project(project);
        }
    }

    pub fn channel(&self, level: Level) -> &Channel {
        &self.channels[level.index()]
    }

    /// Write one line to `level`'s channel and flush
    pub fn write(&mut self, level: Level, msg: &str) {
        let timestamp = self
            .timestamps
            .then(|| Local::now().format(TIMESTAMP_FORMAT).to_string());
        let line = self.channel(level).render(msg, timestamp.as_deref());
        // A closed stdout is not worth failing the command over.
        let _ = writeln!(self.sink, "{}", line);
        let _ = self.sink.flush();
    }

    /// Write an unprefixed block of text (usage, help)
    pub fn plain(&mut self, text: &str) {
        let _ = write!(self.sink, "{}", text);
        let _ = self.sink.flush();
    }

    pub fn info(&mut self, msg: &str) {
        self.write(Level::Info, msg);
    }

    pub fn success(&mut self, msg: &str) {
        self.write(Level::Success, msg);
    }

    pub fn warn(&mut self, msg: &str) {
        self.write(Level::Warn, msg);
    }

    pub fn error(&mut self, msg: &str) {
        self.write(Level::Error, msg);
    }
}

/// Cloneable in-memory sink for capturing output
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded
    pub fn contents(&self) -> String {
        let buf = self.buf.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&buf).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for MemorySink {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut buf = self.buf.lock().unwrap_or_else(|e| e.into_inner());
        buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
