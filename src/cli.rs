use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::capture::CaptureConfig;
use crate::pipeline::backoff::IdleBackoff;
use crate::ui::tui::DashboardConfig;

/// Aperture - live packet capture dashboard
#[derive(Parser, Debug)]
#[command(name = "aperture", version, about = "Live packet capture dashboard for the terminal")]
pub struct CliArgs {
    /// Capture on this device instead of prompting for one.
    #[arg(short, long, value_name = "NAME")]
    pub device: Option<String>,

    /// List capture devices and exit.
    #[arg(long)]
    pub list: bool,

    /// Print the device list as JSON.
    #[arg(long, requires = "list")]
    pub json: bool,

    /// Maximum bytes captured per packet.
    #[arg(long, value_name = "BYTES", default_value_t = 65535)]
    pub snaplen: i32,

    /// libpcap read timeout.
    #[arg(long, value_name = "MS", default_value_t = 100)]
    pub timeout_ms: i32,

    /// Do not put the device into promiscuous mode.
    #[arg(long)]
    pub no_promisc: bool,

    /// Summaries buffered between the poller and the dashboard.
    #[arg(long, value_name = "N", default_value_t = 1024)]
    pub channel_capacity: usize,

    /// Delay after an empty poll.
    #[arg(long, value_name = "MS", default_value_t = 10)]
    pub idle_ms: u64,

    /// Upper bound when consecutive empty polls back off.
    #[arg(long, value_name = "MS", default_value_t = 10)]
    pub idle_max_ms: u64,

    /// Packet lines kept in the scrollable log.
    #[arg(long, value_name = "N", default_value_t = 5000)]
    pub log_lines: usize,

    /// Dashboard redraw interval.
    #[arg(long, value_name = "MS", default_value_t = 33)]
    pub frame_ms: u64,

    /// Wait after stopping the capture before exiting.
    #[arg(long, value_name = "MS", default_value_t = 500)]
    pub grace_ms: u64,

    /// Write diagnostics to this file (discarded otherwise).
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Diagnostic verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CliArgs {
    pub fn capture_config(&self) -> CaptureConfig {
        CaptureConfig {
            snaplen: self.snaplen,
            timeout_ms: self.timeout_ms,
            promiscuous: !self.no_promisc,
            ..CaptureConfig::default()
        }
    }

    pub fn idle_backoff(&self) -> IdleBackoff {
        IdleBackoff::new(
            Duration::from_millis(self.idle_ms),
            Duration::from_millis(self.idle_max_ms),
        )
    }

    pub fn dashboard_config(&self) -> DashboardConfig {
        DashboardConfig {
            log_capacity: self.log_lines,
            frame_budget: Duration::from_millis(self.frame_ms),
            ..DashboardConfig::default()
        }
    }

    pub fn grace_period(&self) -> Duration {
        Duration::from_millis(self.grace_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = CliArgs::try_parse_from(["aperture"]).unwrap();
        assert_eq!(args.device, None);
        assert!(!args.list);
        assert_eq!(args.capture_config(), CaptureConfig::default());
        assert_eq!(args.idle_backoff(), IdleBackoff::default());
        assert_eq!(args.channel_capacity, 1024);
        assert_eq!(args.grace_period(), Duration::from_millis(500));

        let dashboard = args.dashboard_config();
        assert_eq!(dashboard.log_capacity, 5000);
        assert_eq!(dashboard.frame_budget, Duration::from_millis(33));
    }

    #[test]
    fn test_overrides() {
        let args = CliArgs::try_parse_from([
            "aperture",
            "-d",
            "wlan0",
            "--snaplen",
            "128",
            "--no-promisc",
            "--idle-ms",
            "5",
            "--idle-max-ms",
            "80",
            "--log-lines",
            "200",
            "-vv",
        ])
        .unwrap();

        assert_eq!(args.device.as_deref(), Some("wlan0"));
        assert_eq!(args.verbose, 2);

        let config = args.capture_config();
        assert_eq!(config.snaplen, 128);
        assert!(!config.promiscuous);

        assert_eq!(
            args.idle_backoff(),
            IdleBackoff::new(Duration::from_millis(5), Duration::from_millis(80))
        );
        assert_eq!(args.dashboard_config().log_capacity, 200);
    }

    #[test]
    fn test_json_requires_list() {
        assert!(CliArgs::try_parse_from(["aperture", "--json"]).is_err());
        let args = CliArgs::try_parse_from(["aperture", "--list", "--json"]).unwrap();
        assert!(args.list && args.json);
    }
}
