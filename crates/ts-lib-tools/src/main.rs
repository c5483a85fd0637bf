//! create-ts-lib - Project scaffolding for TypeScript libraries

mod ts_lib;

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use ts_lib::TsLibGenerator;

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    // Diagnostics go to stderr; RUST_LOG=debug shows every file written
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = scaffolder_kit::run(&TsLibGenerator, std::env::args_os()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        // Already shown as a cancelled outro
        Err(e) if scaffolder_kit::is_reported(&e) => std::process::exit(1),
        result => result,
    }
}
