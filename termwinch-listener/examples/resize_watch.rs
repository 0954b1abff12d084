//! Resize watcher for manual testing.
//!
//! Run with: cargo run -p termwinch-listener --example resize_watch
//!
//! Then drag the terminal window around; every size change is printed.
//! Ctrl+C exits.

use std::thread;
use std::time::Duration;

use anyhow::Result;
use termwinch_listener::{ListenerConfig, ResizeListener};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_target(false)
        .init();

    let listener = ResizeListener::start(
        ListenerConfig::default(),
        Some(Box::new(|old, new| {
            println!("resized: {old} -> {new}");
        })),
    )?;

    println!("watching for resizes, current size {}", listener.current_size());

    loop {
        thread::sleep(Duration::from_secs(1));
    }
}
