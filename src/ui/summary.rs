use std::io::{self, Write};

use super::tui::state::{format_bytes, format_elapsed, DashboardStats};

/// Prints the end-of-run totals once the terminal is back to normal.
pub fn write_final_summary<W: Write>(out: &mut W, stats: &DashboardStats) -> io::Result<()> {
    let elapsed = stats.elapsed();

    writeln!(out, "\n[Aperture] Capture summary:")?;

    if stats.packet_count == 0 {
        writeln!(out, "  No packets captured")?;
    } else {
        writeln!(out, "  Duration:      {}", format_elapsed(elapsed))?;
        writeln!(out, "  Total packets: {}", stats.packet_count)?;
        writeln!(out, "  Packets/sec:   {:.2}", stats.packets_per_second(elapsed))?;
        writeln!(out, "  Data captured: {}", format_bytes(stats.total_bytes))?;
        writeln!(out, "  TCP:           {}", stats.tcp_count)?;
        writeln!(out, "  UDP:           {}", stats.udp_count)?;
        writeln!(out, "  Other:         {}", stats.other_count)?;
    }

    out.flush()
}
