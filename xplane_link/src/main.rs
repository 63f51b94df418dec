//! Interactive sender: type a control vector, push it to X-Plane.
//!
//! Usage: `xpc_send [host[:port]]`

use std::io::{self, Write};

use xplane_link::{XPlaneConfig, XPlaneConnect};

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║          X-Plane Connect — manual CTRL sender        ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let mut cfg = XPlaneConfig::default();
    if let Some(endpoint) = std::env::args().nth(1) {
        cfg = match cfg.with_endpoint(&endpoint) {
            Ok(c)  => c,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(2);
            }
        };
    }

    let mut xp = match XPlaneConnect::open(&cfg) {
        Ok(xp) => xp,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    println!("  Sending to {}", xp.target());
    println!("  Enter: elevator aileron rudder throttle   (q to quit)");
    println!("  e.g.   -0.1 0.2 0 0.8");
    println!();

    loop {
        let raw = read_line("  ctrl> ");
        if raw.is_empty() { break; } // stdin closed
        let line = raw.trim();
        if line.is_empty() { continue; }
        if line.eq_ignore_ascii_case("q") {
            println!("\nGoodbye!\n");
            break;
        }

        let values = match parse_vector(line) {
            Some(v) => v,
            None    => {
                println!("  ⚠  Need four numbers: elevator aileron rudder throttle.");
                continue;
            }
        };

        match xp.send_controls(values[0], values[1], values[2], values[3]) {
            Ok(())  => println!(
                "  sent  E={:+.3}  A={:+.3}  R={:+.3}  T={:.3}",
                values[0], values[1], values[2], values[3]
            ),
            Err(e)  => println!("  ⚠  send failed: {}", e),
        }
    }
}

/// Four whitespace- or comma-separated floats.
fn parse_vector(line: &str) -> Option<[f32; 4]> {
    let nums: Vec<f32> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f32>())
        .collect::<Result<_, _>>()
        .ok()?;
    match nums.as_slice() {
        &[e, a, r, t] => Some([e, a, r, t]),
        _ => None,
    }
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_space_and_comma_separated() {
        assert_eq!(parse_vector("-0.1 0.2 0 0.8"), Some([-0.1, 0.2, 0.0, 0.8]));
        assert_eq!(parse_vector("1,2, 3 ,4"),      Some([1.0, 2.0, 3.0, 4.0]));
    }

    #[test]
    fn rejects_wrong_arity_or_garbage() {
        assert_eq!(parse_vector("1 2 3"), None);
        assert_eq!(parse_vector("1 2 3 4 5"), None);
        assert_eq!(parse_vector("1 two 3 4"), None);
    }
}
