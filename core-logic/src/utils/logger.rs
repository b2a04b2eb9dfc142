use std::fmt;

use nu_ansi_term::{Color, Style};
use tracing::{Event, Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{format::Writer, FmtContext, FormatEvent, FormatFields},
    prelude::*,
    registry::LookupSpan,
    EnvFilter, Layer,
};

/// Install the global subscriber: a message-only colored console layer
/// plus a daily-rotated plain file under `logs/`. The returned guard
/// must stay alive for the life of the process or file logs are lost.
pub fn setup_logger() -> Option<WorkerGuard> {
    std::fs::create_dir_all("logs").ok();

    let file_appender = tracing_appender::rolling::daily("logs", "run");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .with_filter(
            tracing_subscriber::filter::Targets::new().with_default(Level::INFO),
        );

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .event_format(ConsoleFormatter)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .init();

    Some(guard)
}

struct MessageVisitor {
    message: String,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

/// Console output is the user interface of these tools, so the console
/// layer prints bare messages (no timestamp, no target) and colors the
/// outcome keywords.
struct ConsoleFormatter;

impl<S, N> FormatEvent<S, N> for ConsoleFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut visitor = MessageVisitor {
            message: String::new(),
        };
        event.record(&mut visitor);
        let mut msg = visitor.message;

        if msg.contains("SUCCESS") {
            let green = Style::new().fg(Color::LightGreen).bold();
            msg = msg.replace("SUCCESS", &green.paint("SUCCESS").to_string());
        }
        if msg.contains("FAILED") {
            let red = Style::new().fg(Color::LightRed).bold();
            msg = msg.replace("FAILED", &red.paint("FAILED").to_string());
        }
        if *event.metadata().level() == Level::WARN {
            write!(writer, "{} ", Style::new().fg(Color::Yellow).paint("[warn]"))?;
        }

        writeln!(writer, "{}", msg)
    }
}
