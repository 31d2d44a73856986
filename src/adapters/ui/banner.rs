//! Welcome banner (DAILY READINGS) with a vertical gradient.
//! Uses figlet's built-in standard font.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Deep burgundy (#7b1e3a).
const BURGUNDY: (u8, u8, u8) = (0x7b, 0x1e, 0x3a);
/// Icon gold (#d4a017).
const GOLD: (u8, u8, u8) = (0xd4, 0xa0, 0x17);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let mix = |x: u8, y: u8| (f64::from(x) * (1.0 - t) + f64::from(y) * t).round() as u8;
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

fn gold() -> Color {
    Color::Rgb {
        r: GOLD.0,
        g: GOLD.1,
        b: GOLD.2,
    }
}

/// Prints "DAILY READINGS" in figlet art, burgundy fading to gold, then the version line.
/// Falls back to a plain title if the font cannot be loaded.
pub fn print_welcome() {
    let mut out = stdout();
    let art = FIGfont::standard()
        .ok()
        .and_then(|font| font.convert("DAILY READINGS").map(|f| f.to_string()))
        .unwrap_or_else(|| "DAILY READINGS".to_string());
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len();

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(BURGUNDY, GOLD, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let _ = out.execute(SetForegroundColor(gold()));
    let _ = out.execute(Print(format!("v{}\r\n", env!("CARGO_PKG_VERSION"))));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}

/// One highlighted heading line (card titles, turn separators).
pub fn print_heading(text: &str) {
    let mut out = stdout();
    let _ = out.execute(SetForegroundColor(gold()));
    let _ = out.execute(Print(format!("{}\r\n", text)));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}
