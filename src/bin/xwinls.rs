use log::*;

use xwinctl::display_context::DisplayContext;
use xwinctl::ewmh::EwmhManager;
use xwinctl::list;

/// Configure stderr logging; stdout carries the JSON document.
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

    let ctx = match DisplayContext::new() {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let ewmh = EwmhManager::new(&ctx);
    let records = list::list_windows(&ewmh);
    info!("Listing {} windows", records.len());

    // Serializing a vec of records cannot fail.
    println!("{}", serde_json::to_string_pretty(&records).unwrap());
}
