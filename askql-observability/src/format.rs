use std::fmt;

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Timestamp layout of the event log, local time.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Event formatter for the append-only log file.
///
/// Produces one line per event: `2024-05-01 09:30:12 - INFO - User Question: ...`.
/// Structured fields other than the message follow it as `key=value`. Line
/// breaks inside the message are replaced by spaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogLineFormat;

/// Level label as written to the log; `WARN` is spelled out as `WARNING`.
pub fn level_label(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARNING",
        Level::INFO => "INFO",
        Level::DEBUG => "DEBUG",
        Level::TRACE => "TRACE",
    }
}

impl<S, N> FormatEvent<S, N> for LogLineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(
            writer,
            "{} - {} - ",
            chrono::Local::now().format(TIMESTAMP_FORMAT),
            level_label(event.metadata().level())
        )?;
        let mut fields = String::new();
        ctx.field_format().format_fields(Writer::new(&mut fields), event)?;
        // one event, one line: multi-line SQL is folded
        let line = fields.lines().collect::<Vec<_>>().join(" ");
        writeln!(writer, "{line}")
    }
}
