//! inputviz - live keyboard and mouse input visualizer
//!
//! Reads every input device on the seat, and keeps a status line on the
//! controlling terminal showing held modifiers, mouse buttons, the wheel and
//! the last action.

use anyhow::{Context, Result};
use log::info;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use inputviz::config::Config;
use inputviz::constants::IDLE_POLL_MS;

/// Global flag for shutdown requested via signal (SIGTERM/SIGINT/SIGHUP)
static SHUTDOWN_REQUESTED: AtomicBool = AtomicBool::new(false);

/// How long to wait for libseat to enable the session at startup
#[cfg(all(target_os = "linux", feature = "seatd"))]
const SEAT_ENABLE_TIMEOUT_MS: i32 = 1000;

/// Set up signal handlers for graceful shutdown (call once at startup)
///
/// Handles SIGTERM (systemd stop), SIGINT (Ctrl+C), and SIGHUP (terminal hangup).
fn setup_signal_handlers() {
    unsafe {
        libc::signal(
            libc::SIGTERM,
            shutdown_signal_handler as *const () as libc::sighandler_t,
        );
        libc::signal(
            libc::SIGINT,
            shutdown_signal_handler as *const () as libc::sighandler_t,
        );
        libc::signal(
            libc::SIGHUP,
            shutdown_signal_handler as *const () as libc::sighandler_t,
        );
    }
}

extern "C" fn shutdown_signal_handler(_signo: libc::c_int) {
    SHUTDOWN_REQUESTED.store(true, Ordering::Relaxed);
}

fn print_help() {
    println!(
        r#"inputviz {} - live keyboard and mouse input visualizer

USAGE:
    inputviz [OPTIONS]

OPTIONS:
    -h, --help              Print this help message
    -V, --version           Print version information
    --init-config           Generate config file with defaults
    -f, --force             Overwrite config file without confirmation

EXAMPLES:
    inputviz                          Run (needs access to /dev/input or a seat)
    inputviz --init-config            Generate default config
    RUST_LOG=debug inputviz           Log every classified event

CONFIG FILE:
    ~/.config/inputviz/config.toml
"#,
        env!("CARGO_PKG_VERSION")
    );
}

/// poll(2) timeout until the next deadline, capped at the idle interval
///
/// Rounds up so the loop never wakes just before a deadline.
fn poll_timeout(deadline: Option<Instant>, now: Instant) -> i32 {
    match deadline {
        Some(deadline) => {
            let remaining = deadline.saturating_duration_since(now);
            let ms = (remaining.as_micros() + 999) / 1000;
            ms.min(IDLE_POLL_MS as u128) as i32
        }
        None => IDLE_POLL_MS,
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();

    // --help
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    // --version
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("inputviz {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // --init-config
    if args.iter().any(|a| a == "--init-config") {
        let force = args.iter().any(|a| a == "--force" || a == "-f");

        if let Some(config_path) = inputviz::config::default_config_path() {
            if config_path.exists() && !force {
                println!("Config file already exists: {}", config_path.display());
                print!("Overwrite? [y/N]: ");
                std::io::Write::flush(&mut std::io::stdout())?;

                let mut input = String::new();
                std::io::stdin().read_line(&mut input)?;
                let input = input.trim().to_lowercase();

                if input != "y" && input != "yes" {
                    println!("Aborted.");
                    return Ok(());
                }
            }
        }

        let path = Config::write_default_config()?;
        println!("Config file generated: {}", path.display());
        return Ok(());
    }

    info!("inputviz starting...");

    let cfg = Config::load();
    setup_signal_handlers();
    run(cfg)
}

#[cfg(target_os = "linux")]
fn run(mut cfg: Config) -> Result<()> {
    use inputviz::config::ConfigWatcher;
    use inputviz::input::InputSource;
    use inputviz::render::{EchoGuard, StatusLine};
    use inputviz::Visualizer;
    use log::warn;

    #[cfg(feature = "seatd")]
    use inputviz::session::{SeatSession, SessionEvent};
    #[cfg(feature = "seatd")]
    use std::cell::RefCell;
    #[cfg(feature = "seatd")]
    use std::rc::Rc;

    #[cfg(feature = "seatd")]
    let seat_session = {
        info!("Opening libseat session...");
        let mut session = SeatSession::open().context("Failed to open libseat session")?;
        if !session.wait_active(SEAT_ENABLE_TIMEOUT_MS)? {
            warn!("libseat: session not enabled yet, devices may fail to open");
        }
        Rc::new(RefCell::new(session))
    };

    #[cfg(feature = "seatd")]
    let mut source = InputSource::new_with_seat(
        seat_session.clone(),
        &cfg.keyboard,
        cfg.timing.double_click(),
    )
    .context("Cannot open input devices via libseat")?;

    #[cfg(not(feature = "seatd"))]
    let mut source = InputSource::new(&cfg.keyboard, cfg.timing.double_click())
        .context("Cannot open input devices")?;

    #[cfg(feature = "seatd")]
    let seat_fd = seat_session.borrow_mut().get_fd()?;

    // Watch the actual loaded config path, not just the default path
    let config_path = Config::config_path();
    let config_watcher = config_path
        .as_ref()
        .and_then(|path| ConfigWatcher::new(path).ok());
    if config_watcher.is_some() {
        info!("Config hot-reload enabled");
    }

    // Not a tty (e.g. output piped): nothing to silence
    let _echo = match EchoGuard::new() {
        Ok(guard) => Some(guard),
        Err(e) => {
            warn!("Terminal echo left on: {:#}", e);
            None
        }
    };

    let status = StatusLine::new(std::io::stdout(), &cfg);
    let mut viz = Visualizer::new(cfg.timing.wheel_clear(), status);
    viz.redraw();

    loop {
        if SHUTDOWN_REQUESTED.load(Ordering::Relaxed) {
            info!("Shutdown requested");
            break;
        }

        let timeout = poll_timeout(viz.next_deadline(), Instant::now());
        let mut fds = vec![libc::pollfd {
            fd: source.fd(),
            events: libc::POLLIN,
            revents: 0,
        }];
        #[cfg(feature = "seatd")]
        fds.push(libc::pollfd {
            fd: seat_fd,
            events: libc::POLLIN,
            revents: 0,
        });

        let ret = unsafe { libc::poll(fds.as_mut_ptr(), fds.len() as libc::nfds_t, timeout) };
        if ret < 0 {
            let err = std::io::Error::last_os_error();
            if err.kind() == std::io::ErrorKind::Interrupted {
                continue;
            }
            return Err(err).context("poll failed");
        }

        // Session enable/disable first, so a VT switch resets state
        // before any input queued behind it
        #[cfg(feature = "seatd")]
        {
            seat_session.borrow_mut().dispatch()?;
            let session_events: Vec<SessionEvent> =
                std::iter::from_fn(|| seat_session.borrow().try_recv_event()).collect();
            for event in session_events {
                match event {
                    SessionEvent::Disable => source.suspend(),
                    SessionEvent::Enable => {
                        if let Err(e) = source.resume() {
                            warn!("{}", e);
                        }
                    }
                }
                viz.handle_event(&event.to_raw_event(), Instant::now());
            }
        }

        match source.read_events(Instant::now()) {
            Ok(events) => {
                for event in &events {
                    viz.handle_event(event, Instant::now());
                }
            }
            Err(e) => warn!("{}", e),
        }

        viz.poll_timers(Instant::now());

        if let (Some(watcher), Some(path)) = (&config_watcher, &config_path) {
            if watcher.check_reload() {
                match Config::load_from_file(path) {
                    Ok(new_cfg) => {
                        cfg = new_cfg;
                        viz.set_wheel_clear(cfg.timing.wheel_clear());
                        source.set_double_click(cfg.timing.double_click());
                        viz.renderer_mut().apply_config(&cfg);
                        viz.redraw();
                        info!("Config reloaded: {}", path.display());
                    }
                    Err(e) => warn!("Config reload failed, keeping current: {:#}", e),
                }
            }
        }
    }

    // Leave the status line intact above the shell prompt
    println!();
    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn run(_cfg: Config) -> Result<()> {
    Err(anyhow::anyhow!("inputviz reads input through libinput (Linux only)"))
}
