//! ASCII startup banner with a vertical color gradient.
//!
//! Uses the figlet standard font bundled with figlet-rs, so no font asset
//! ships with the binary.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Indigo (#4b6fff).
const INDIGO: (u8, u8, u8) = (0x4b, 0x6f, 0xff);
/// Mint (#2ed5b0).
const MINT: (u8, u8, u8) = (0x2e, 0xd5, 0xb0);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

/// Prints the welcome banner: "PO CLASSIFY" in figlet with an indigo-to-mint
/// gradient, then version and tagline. Falls back to plain text when the
/// figlet font is unavailable.
pub fn print_welcome() {
    let art = match FIGfont::standard() {
        Ok(font) => font
            .convert("PO CLASSIFY")
            .map(|figure| figure.to_string())
            .unwrap_or_else(|| "PO CLASSIFY\n".to_string()),
        Err(_) => "PO CLASSIFY\n".to_string(),
    };

    let mut out = stdout();
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(INDIGO, MINT, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let version = env!("CARGO_PKG_VERSION");
    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: MINT.0,
        g: MINT.1,
        b: MINT.2,
    }));
    let _ = out.execute(Print(format!("v{} | Procurement Taxonomy Engine\r\n", version)));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}
