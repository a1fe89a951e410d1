use std::io::Write;
use std::sync::{Arc, Mutex};

/// Timestamp layout for every report line: day/month/year hour:minute:second.
const STAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Clock-stamped log shared by every component of the harness.
///
/// Each call to [`log`](Self::log) produces exactly one line on the sink, so
/// output stays readable no matter how many listeners and probes write
/// concurrently. Write failures are swallowed: this is fire-and-forget
/// diagnostic output, and there is nowhere better to report a broken stdout.
pub struct ReportLog {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl ReportLog {
    /// Report log writing to the process's standard output.
    pub fn stdout() -> Arc<Self> {
        Self::with_sink(Box::new(std::io::stdout()))
    }

    /// Report log writing to an arbitrary sink. Tests use this to capture
    /// output in memory.
    pub fn with_sink(sink: Box<dyn Write + Send>) -> Arc<Self> {
        Arc::new(Self {
            sink: Mutex::new(sink),
        })
    }

    /// Writes one timestamped line to the sink.
    pub fn log(&self, message: impl AsRef<str>) {
        let stamp = chrono::Local::now().format(STAMP_FORMAT);
        let mut sink = self.sink.lock().unwrap_or_else(|e| e.into_inner());
        let _ = writeln!(sink, "{} {}", stamp, message.as_ref());
        let _ = sink.flush();
    }
}

/// In-memory capture of report output, shared with a `ReportLog` sink.
/// Only compiled for tests; every subsystem's tests assert on report lines
/// through this.
#[cfg(test)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

#[cfg(test)]
impl LogCapture {
    /// Returns a report log plus the capture handle reading what it wrote.
    pub fn new() -> (Arc<ReportLog>, LogCapture) {
        struct SharedSink(Arc<Mutex<Vec<u8>>>);

        impl Write for SharedSink {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let buffer = Arc::new(Mutex::new(Vec::new()));
        let report = ReportLog::with_sink(Box::new(SharedSink(buffer.clone())));
        (report, LogCapture { buffer })
    }

    /// All complete lines written so far.
    pub fn lines(&self) -> Vec<String> {
        let raw = String::from_utf8(self.buffer.lock().unwrap().clone()).unwrap();
        raw.lines().map(|line| line.to_string()).collect()
    }

    /// Lines whose message part contains `needle`.
    pub fn lines_containing(&self, needle: &str) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|line| line.contains(needle))
            .collect()
    }
}
