//! Human-readable rollover trace, mirrored into `tracing`.

/// Collects the `logs` lines of a rollover summary.
///
/// [`TraceLog::info`] and [`TraceLog::warn`] also emit the line as a tracing
/// event; [`TraceLog::record`] only appends, for lines another component has
/// already logged.
#[derive(Debug, Clone, Default)]
pub struct TraceLog {
    lines: Vec<String>,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, line: impl Into<String>) {
        let line = line.into();
        tracing::info!("{line}");
        self.lines.push(line);
    }

    pub fn warn(&mut self, line: impl Into<String>) {
        let line = line.into();
        tracing::warn!("{line}");
        self.lines.push(line);
    }

    pub fn record(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}
