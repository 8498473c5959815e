//! Panic hook printing a structured crash report.
//!
//! The report names the pipeline phase, the corpus file and overall
//! progress. Panics raised inside a recoverable section are reduced to a
//! single warning because the pipeline degrades that file and carries on.

use super::context::{get_current_context, get_progress, AnalysisContext};
use std::panic::PanicHookInfo;
use tracing::Span;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const WIDTH: usize = 78;

/// Install the crash-report hook; call early in `main`.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let context = get_current_context();
        if context.recoverable {
            log::warn!(
                "Recovered from panic while processing {}: {}",
                context.current_file.as_deref().unwrap_or("<unknown>"),
                extract_panic_message(info)
            );
            return;
        }
        print_crash_report(info, &context);
    }));
}

fn print_crash_report(info: &PanicHookInfo<'_>, context: &AnalysisContext) {
    let (processed, total) = get_progress();

    eprintln!();
    print_rule('╔', '╗');
    print_line("ARCHMAP CRASH REPORT");
    print_rule('╠', '╣');
    print_line(&format!("Version: {}", VERSION));
    print_line(&format!("Platform: {}", std::env::consts::OS));
    print_line(&format!(
        "Time: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    print_rule('╠', '╣');

    print_line(&format!("PANIC: {}", extract_panic_message(info)));
    if let Some(location) = info.location() {
        print_line(&format!(
            "Location: {}:{}:{}",
            location.file(),
            location.line(),
            location.column()
        ));
    }

    print_rule('╠', '╣');
    print_line("OPERATION CONTEXT:");
    match &context.phase {
        Some(phase) => print_line(&format!("  Phase: {}", phase)),
        None => print_line("  Phase: (not set, crash occurred before analysis started)"),
    }
    if let Some(metadata) = Span::current().metadata() {
        print_line(&format!("  Span: {}", metadata.name()));
    }
    if let Some(file) = &context.current_file {
        print_line(&format!("  File: {}", file));
    }
    if total > 0 {
        let pct = processed * 100 / total;
        print_line(&format!(
            "  Progress: {} / {} files ({}%)",
            processed, total, pct
        ));
    }

    print_rule('╠', '╣');
    if std::env::var("RUST_BACKTRACE").is_ok() {
        print_line("STACK TRACE:");
        print_rule('╚', '╝');
        eprintln!();
        eprintln!("{}", std::backtrace::Backtrace::capture());
    } else {
        print_line("Run with RUST_BACKTRACE=1 for stack trace");
        print_rule('╚', '╝');
    }
}

fn print_rule(left: char, right: char) {
    eprintln!("{}{}{}", left, "═".repeat(WIDTH), right);
}

fn print_line(text: &str) {
    eprintln!("║  {:<width$}║", truncate(text, WIDTH - 2), width = WIDTH - 2);
}

fn extract_panic_message(info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Cut to `max_len` characters, ending in `...` when shortened
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
