use std::io::{self, BufReader};
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use group_picker::storage::{load_full_list, load_previous_groups};
use group_picker::{Config, Session, SessionOutcome};

const USAGE: &str = "Usage: group-picker [--config <path>]";

// Check if stdin is a TTY (interactive terminal)
fn stdin_is_tty() -> bool {
    #[cfg(unix)]
    let is_tty = {
        use std::os::unix::io::AsRawFd;
        unsafe { libc::isatty(io::stdin().as_raw_fd()) == 1 }
    };

    #[cfg(windows)]
    let is_tty = {
        use std::os::windows::io::AsRawHandle;
        let handle = io::stdin().as_raw_handle();
        let mut mode: u32 = 0;
        // GetConsoleMode returns 0 if the handle is not a console
        unsafe {
            #[link(name = "kernel32")]
            extern "system" {
                fn GetConsoleMode(hConsoleHandle: *mut std::ffi::c_void, lpMode: *mut u32) -> i32;
            }
            GetConsoleMode(handle as *mut std::ffi::c_void, &mut mode) != 0
        }
    };

    #[cfg(not(any(unix, windows)))]
    let is_tty = true;

    is_tty
}

fn config_path_from_args() -> Result<Option<PathBuf>> {
    let mut args = std::env::args().skip(1);
    let mut path = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => match args.next() {
                Some(value) => path = Some(PathBuf::from(value)),
                None => bail!("--config needs a path\n{}", USAGE),
            },
            "--help" | "-h" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            other => bail!("unexpected argument '{}'\n{}", other, USAGE),
        }
    }
    Ok(path)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = match config_path_from_args()? {
        Some(path) => Config::load(&path),
        None => Config::discover(),
    }
    .context("failed to load configuration")?;

    let list = load_full_list(&config.full_list_file).context("failed to read member list")?;
    let previous_groups =
        load_previous_groups(&config.group_dir).context("failed to read previous groups")?;

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    // Set up Ctrl+C handler
    ctrlc::set_handler(move || {
        println!("\n\nInterrupted. Press Enter to exit without saving.");
        r.store(false, Ordering::SeqCst);
    })
    .context("failed to set Ctrl-C handler")?;

    let interactive = stdin_is_tty();
    let stdin = io::stdin();
    let mut session = Session::new(
        config,
        list,
        previous_groups,
        BufReader::new(stdin.lock()),
        io::stdout(),
    )
    .interactive(interactive)
    .with_running_flag(running);

    match session.run(&mut rand::thread_rng())? {
        SessionOutcome::Saved(stem) => tracing::info!(stem = %stem.display(), "grouping kept"),
        SessionOutcome::Discarded => tracing::info!("no grouping kept"),
    }
    Ok(())
}
