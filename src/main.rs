//! Spy Camera Detector - terminal shell
//!
//! Plays the host application: owns the timer-driven scan loop, renders a
//! text frame periodically and maps keyboard lines to button presses.
//!   s / Enter : Scan / Stop
//!   r         : Reset
//!   q         : Quit

use std::io::BufRead;
use std::process::ExitCode;
use std::thread;
use std::time::Instant;

use crossbeam::channel::{self, Receiver};
use crossbeam::select;

use spy_camera_detector::constants::{APP_NAME, APP_VERSION};
use spy_camera_detector::logic::display::ScreenModel;
use spy_camera_detector::{LogNotifier, ScanConfig, ScanLoop, ScanResult, SessionSnapshot};

enum Input {
    Toggle,
    Reset,
    Quit,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting {} v{}...", APP_NAME, APP_VERSION);

    match run() {
        Ok(last) => {
            log::info!(
                "Application exiting: {} signals found in {} scans",
                last.signals_found_total,
                last.total_scans
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> ScanResult<SessionSnapshot> {
    let config = ScanConfig::from_env()?;
    log::info!("Tick interval: {} ms", config.tick_interval_ms);
    match config.seed {
        Some(seed) => log::info!("Simulation seed: {}", seed),
        None => log::info!("Simulation seed: random"),
    }

    let deadline = config.deadline_from(Instant::now())?;
    let mut handle = ScanLoop::from_config(&config, Box::new(LogNotifier)).spawn()?;
    let input = spawn_input_reader();

    let frame_every = config.tick_interval() * config.render_every_ticks;
    let frames = channel::tick(frame_every);

    // stdin closed (e.g. piped) but a deadline is set: keep running on the timer
    let never = channel::never();
    let mut input_open = true;

    handle.start()?;

    loop {
        let input_rx = if input_open { &input } else { &never };
        select! {
            recv(frames) -> _ => {
                render(&handle.snapshot(), config.json_output);
                if deadline.is_some_and(|d| Instant::now() >= d) {
                    log::info!("Run time of {}s reached", config.run_secs);
                    break;
                }
            }
            recv(input_rx) -> msg => match msg {
                Ok(Input::Toggle) => handle.toggle()?,
                Ok(Input::Reset) => handle.reset()?,
                Ok(Input::Quit) => break,
                Err(_) if deadline.is_some() => input_open = false,
                Err(_) => break,
            },
        }
    }

    let last = handle.shutdown()?;
    render(&last, config.json_output);
    Ok(last)
}

fn render(snapshot: &SessionSnapshot, json: bool) {
    if json {
        match snapshot.to_json() {
            Ok(line) => println!("{}", line),
            Err(e) => log::error!("Failed to serialize snapshot: {}", e),
        }
    } else {
        println!("{}", ScreenModel::from_snapshot(snapshot).render_text());
    }
}

fn spawn_input_reader() -> Receiver<Input> {
    let (tx, rx) = channel::unbounded();

    // Detached: blocked on stdin until the process exits
    let spawned = thread::Builder::new()
        .name("input".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                let input = match line.trim() {
                    "" | "s" => Input::Toggle,
                    "r" => Input::Reset,
                    "q" => Input::Quit,
                    other => {
                        log::warn!("Unknown input '{}' (s = scan/stop, r = reset, q = quit)", other);
                        continue;
                    }
                };
                if tx.send(input).is_err() {
                    break;
                }
            }
        });

    if let Err(e) = spawned {
        log::warn!("Keyboard input unavailable: {}", e);
    }

    rx
}
