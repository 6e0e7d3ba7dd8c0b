use log::*;

use xwinctl::control::{self, Outcome};
use xwinctl::display_context::DisplayContext;
use xwinctl::ewmh::EwmhManager;

/// Configure stderr logging.
fn setup_logger() {
    #[cfg(debug_assertions)]
    let current_log_level = log::LevelFilter::Debug;

    #[cfg(not(debug_assertions))]
    let current_log_level = log::LevelFilter::Warn;

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(current_log_level)
        .chain(std::io::stderr())
        .apply()
        .unwrap();
}

fn main() {
    setup_logger();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (spec, outer) = match control::parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Usage: xwinmv <PID[@ORDINAL]> <X> <Y> <WIDTH> <HEIGHT>");
            std::process::exit(1);
        }
    };

    let ctx = match DisplayContext::new() {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    let ewmh = EwmhManager::new(&ctx);

    match control::apply_geometry(&ewmh, spec, outer) {
        Outcome::Requested(Some(extents)) => {
            println!(
                "Frame extents: top={} left={} right={} bottom={}",
                extents.top, extents.left, extents.right, extents.bottom
            );
        }
        Outcome::Requested(None) => {
            info!("No frame extents published, rectangle sent unmodified");
        }
        // Not treated as a failure: the enumeration itself succeeded,
        // there was just nothing to act on.
        Outcome::NoMatch => {
            eprintln!("No window found with ID {}", args[0]);
        }
    }
}
