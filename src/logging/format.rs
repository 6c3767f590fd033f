//! Log line formatters.

use std::fmt;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{self, FormatEvent, FormatFields};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;

/// Dashboard text formatter.
///
/// Output format: `YYYY-MM-DD HH:MM:SS | LEVEL | target | message`
///
/// # Example Output
/// ```text
/// 2024-01-15 10:30:45 | DEBUG | bittensor_dash::wallet::scanner | Scanned hotkeys root=/home/me/.bittensor/wallets count=3
/// ```
pub struct DashFormatter;

impl<S, N> FormatEvent<S, N> for DashFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();
        write!(
            writer,
            "{} | {} | {} | ",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            format_level(*metadata.level()),
            metadata.target()
        )?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Minimal formatter: `[LEVEL] message`
pub struct CompactFormatter;

impl<S, N> FormatEvent<S, N> for CompactFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(writer, "[{}] ", format_level(*event.metadata().level()).trim())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Fixed-width level name for column alignment.
pub(crate) fn format_level(level: Level) -> &'static str {
    match level {
        Level::TRACE => "TRACE",
        Level::DEBUG => "DEBUG",
        Level::INFO => "INFO ",
        Level::WARN => "WARN ",
        Level::ERROR => "ERROR",
    }
}
