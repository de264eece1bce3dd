//! Demo binary for logbar E2E testing.
//!
//! This binary exercises logbar's public API for PTY-based integration tests.
//! Each subcommand demonstrates a specific feature.

use logbar::{
    BarConfig, BarGroup, Category, FillSide, Logger, OutputSink, ProgressBar, Update,
    dict_to_str, fill_line_to, format_duration, format_rate, set_output_sink,
};
use serde_json::json;
use std::env;
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

/// Simple stdout sink for demo purposes.
struct StdoutSink;

impl OutputSink for StdoutSink {
    fn emit(&self, message: &str) {
        println!("{}\n", message);
    }

    fn emit_line(&self, message: &str) {
        println!("{}", message);
    }

    fn emit_raw(&self, message: &str) {
        print!("{}", message);
        let _ = std::io::stdout().flush();
    }
}

fn usage() {
    eprintln!("Usage: logbar-demo <command> [args...]");
    eprintln!("Commands:");
    eprintln!("  bar [total] [step_ms]");
    eprintln!("  bar-unknown [count]");
    eprintln!("  bar-color [total]");
    eprintln!("  group [bars] [total]");
    eprintln!("  logger");
    eprintln!("  pretty [json]");
    eprintln!("  fill <text> [width]");
    eprintln!("  duration <secs>");
    eprintln!("  rate <per_sec>");
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage();
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            eprintln!("Unknown command: {}", args[1]);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn arg<T: std::str::FromStr>(args: &[String], index: usize, default: T) -> T {
    args.get(index).and_then(|s| s.parse().ok()).unwrap_or(default)
}

fn run(args: &[String]) -> logbar::Result<bool> {
    match args[1].as_str() {
        "bar" => {
            let total: u64 = arg(args, 2, 20);
            let step_ms: u64 = arg(args, 3, 5);
            let config = BarConfig::new(Some(total))
                .description("processing")
                .color(false)
                .datetime(false);
            let mut bar = ProgressBar::new(config)?;
            for _ in 0..total {
                std::thread::sleep(Duration::from_millis(step_ms));
                bar.inc(1)?;
            }
            bar.finish()?;
        }

        "bar-unknown" => {
            let count: u64 = arg(args, 2, 5);
            let config = BarConfig::new(None)
                .description("scanning")
                .color(false)
                .datetime(false);
            let mut bar = ProgressBar::new(config)?;
            bar.update(Update::absolute(count))?;
            bar.finish()?;
        }

        "bar-color" => {
            // Force color output even in non-TTY (for test capture)
            colored::control::set_override(true);
            let total: u64 = arg(args, 2, 8);
            let mut bar = ProgressBar::new(BarConfig::new(Some(total)).description("colors"))?;
            for _ in 0..total {
                bar.inc(1)?;
            }
            bar.update(Update::refresh().with_description("colors done"))?;
            bar.finish()?;
        }

        "group" => {
            let bars: usize = arg(args, 2, 3);
            let total: u64 = arg(args, 3, 4);
            let mut group = BarGroup::new();
            let ids = (0..bars)
                .map(|i| {
                    let config = BarConfig::new(Some(total))
                        .description(format!("task{i}"))
                        .color(false)
                        .datetime(false);
                    group.add(config)
                })
                .collect::<logbar::Result<Vec<_>>>()?;
            for _ in 0..total {
                for id in &ids {
                    group.update(*id, Update::delta(1))?;
                }
            }
            group.finish()?;
        }

        "logger" => {
            colored::control::set_override(true);
            set_output_sink(Arc::new(StdoutSink));
            let mut logger = Logger::new();
            logger.note("starting");
            logger.store_indent();
            logger.indent(2);
            logger.file("src/lib.rs");
            logger.back("debug is hidden at info level");
            logger.restore_indent();
            logger.warn("careful");
            logger.log_end(Category::Mesg, "loading...", " ");
            logger.success("finished");

            let named = Logger::new().with_name("demo").prefix(true);
            named.hint("with header");
        }

        "pretty" => {
            let value = match args.get(2) {
                Some(raw) => serde_json::from_str(raw).unwrap_or_else(|_| json!(raw)),
                None => json!({
                    "name": "logbar",
                    "bar": {"width": 25, "color": true},
                    "tags": ["cli", "progress"]
                }),
            };
            println!("{}", dict_to_str(&value));
        }

        "fill" => {
            let text = args.get(2).map(|s| s.as_str()).unwrap_or("section");
            let width: usize = arg(args, 3, 40);
            println!("{}", fill_line_to(text, width, '=', FillSide::Both, None));
        }

        "duration" => {
            let secs: u64 = arg(args, 2, 0);
            println!("{}", format_duration(Duration::from_secs(secs)));
        }

        "rate" => {
            let rate: f64 = arg(args, 2, 0.0);
            println!("[{}]", format_rate(Some(rate)));
        }

        _ => return Ok(false),
    }
    Ok(true)
}
