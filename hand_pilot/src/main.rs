//! hand_pilot — interactive entry point.

use hand_pilot::app::run;
use hand_pilot::config::{AppConfig, DetectorMode, Invocation, USAGE};
use hand_pilot::logging::init_logger;

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Hand Pilot — Webcam Gesture Flight Controller         ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let cfg = match AppConfig::from_args(std::env::args().skip(1)) {
        Ok(Invocation::Run(cfg)) => cfg,
        Ok(Invocation::Help) => {
            print!("{}", USAGE);
            return;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprint!("{}", USAGE);
            std::process::exit(2);
        }
    };

    init_logger(cfg.log_level());

    match cfg.detector_mode {
        DetectorMode::Sim       => println!("  Mode: Keyboard simulation  (arrows, W/S, L/R, 1/2; Esc quits)"),
        DetectorMode::MediaPipe => println!("  Mode: MediaPipe hand tracking"),
    }
    if cfg.dry_run {
        println!("  Dry run: nothing is sent to X-Plane");
    } else {
        println!("  X-Plane: {}:{}", cfg.xplane.host, cfg.xplane.port);
    }
    println!();

    if let Err(e) = run(cfg) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
