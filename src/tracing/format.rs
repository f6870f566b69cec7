use tracing::Event;
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::FormatFields;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::registry::LookupSpan;

/// `LEVEL timestamp::engine::file::line::message`, with the source path
/// relative to `src/`.
#[derive(Debug, Clone)]
pub struct QaifFormat {
    pub engine_name: String,
}

impl QaifFormat {
    pub fn new(engine_name: impl Into<String>) -> Self {
        Self {
            engine_name: engine_name.into(),
        }
    }
}

fn short_source_path(file: &str) -> &str {
    file.rsplit_once("src/").map(|(_, rest)| rest).unwrap_or(file)
}

impl<S, N> FormatEvent<S, N> for QaifFormat
where
    S: tracing::Subscriber + for<'lookup> LookupSpan<'lookup>,
    N: for<'writer> FormatFields<'writer> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();

        // Events without a source location come from dependencies' log bridges
        let Some(file) = metadata.file() else {
            if !cfg!(feature = "deep-trace") {
                return Ok(());
            }
            return self.write_line(ctx, writer, event, metadata.target(), 0);
        };

        self.write_line(ctx, writer, event, short_source_path(file), metadata.line().unwrap_or(0))
    }
}

impl QaifFormat {
    fn write_line<S, N>(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
        location: &str,
        line: u32,
    ) -> std::fmt::Result
    where
        S: tracing::Subscriber + for<'lookup> LookupSpan<'lookup>,
        N: for<'writer> FormatFields<'writer> + 'static,
    {
        let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S");

        write!(
            writer,
            "{:<5} {}::{}::{}::{}::",
            event.metadata().level(),
            timestamp,
            self.engine_name,
            location,
            line
        )?;

        if cfg!(feature = "deep-trace") {
            if let Some(scope) = ctx.event_scope() {
                for span in scope.from_root() {
                    write!(writer, "{}::", span.name())?;
                }
            }
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}
