//! Entry point for the networked append/replay server (spec §6).

use std::process::ExitCode;
use std::sync::Arc;

use aesd_net::{acceptor, signal, timer, ServerConfig, ShutdownFlag};
use aesdring::{RingConfig, Store};
use clap::Parser;

/// Networked append/replay server.
///
/// Listens on port 9000, accepts newline-terminated records from clients,
/// and replays the bounded record log back to each client after every
/// accepted record.
#[derive(Parser, Debug)]
#[command(name = "aesdsocket")]
struct Cli {
    /// Daemonize: double-fork, start a new session, chdir to `/`, clear
    /// the umask, and close inherited descriptors before serving.
    #[arg(short = 'd', long = "daemon")]
    daemon: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.daemon {
        if let Err(err) = daemonize() {
            eprintln!("aesdsocket: daemonization failed: {err}");
            return ExitCode::FAILURE;
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(err) => {
            tracing::error!(error = %err, "failed to start async runtime");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(serve()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "fatal startup failure");
            ExitCode::FAILURE
        }
    }
}

async fn serve() -> Result<(), aesd_net::ServerError> {
    let config = ServerConfig::default();
    let store = Arc::new(Store::new(RingConfig::default()));
    let shutdown = Arc::new(ShutdownFlag::new());

    let signal_task = signal::install(Arc::clone(&shutdown))?;
    let timer_task = tokio::spawn(timer::run(config.clone(), Arc::clone(&store), Arc::clone(&shutdown)));

    let result = acceptor::run(config, store, Arc::clone(&shutdown)).await;

    shutdown.trigger();
    let _ = timer_task.await;
    let _ = signal_task.await;

    result
}

/// Double-forks the process into the background, matching the reference
/// daemon's sequence (spec §6): fork, exit the parent; start a new
/// session; fork again so the daemon can never reacquire a controlling
/// terminal; chdir to `/`; clear the umask; close the inherited standard
/// descriptors.
fn daemonize() -> nix::Result<()> {
    use nix::sys::stat::{umask, Mode};
    use nix::unistd::{chdir, fork, setsid, ForkResult};

    // First fork: the original process exits, its child continues.
    match unsafe { fork() }? {
        ForkResult::Parent { .. } => std::process::exit(0),
        ForkResult::Child => {}
    }

    setsid()?;

    // Second fork: guarantees the daemon is not a session leader and so
    // can never acquire a controlling terminal.
    match unsafe { fork() }? {
        ForkResult::Parent { .. } => std::process::exit(0),
        ForkResult::Child => {}
    }

    chdir("/")?;
    umask(Mode::empty());

    redirect_standard_descriptors_to_dev_null();

    Ok(())
}

/// Points stdin/stdout/stderr at `/dev/null` rather than simply closing
/// them: plenty of library code assumes fds 0-2 are always open, and
/// `dup2` onto a fresh `/dev/null` handle is the usual way to satisfy that
/// while still detaching from the controlling terminal.
fn redirect_standard_descriptors_to_dev_null() {
    use std::ffi::CString;
    use std::os::fd::{AsRawFd, FromRawFd};

    let path = CString::new("/dev/null").expect("no interior NUL");
    // SAFETY: `path` is a valid NUL-terminated C string for the duration
    // of this call; the returned fd is owned and duped into 0/1/2 below.
    let devnull = unsafe { libc::open(path.as_ptr(), libc::O_RDWR) };
    if devnull < 0 {
        return;
    }
    for fd in 0..3 {
        unsafe {
            libc::dup2(devnull, fd);
        }
    }
    if devnull > 2 {
        let file = unsafe { std::fs::File::from_raw_fd(devnull) };
        debug_assert_eq!(file.as_raw_fd(), devnull);
        drop(file);
    }
}
