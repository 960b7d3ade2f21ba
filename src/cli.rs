//! Command line interface

use std::fmt::Write as _;
use std::path::PathBuf;

use clap::Parser;

use crate::config::PlaybackConfig;
use crate::playback::{PlaybackMode, Timing};
use crate::script::{Script, ScriptError};

/// Terminal demo of a scripted medical concierge chat
#[derive(Debug, Clone, Parser)]
#[command(name = "concierge", version)]
pub struct Cli {
    /// JSON script file to play
    #[arg(long, value_name = "PATH", conflicts_with = "builtin")]
    pub script: Option<PathBuf>,

    /// Built-in script to play
    #[arg(long, value_name = "NAME")]
    pub builtin: Option<String>,

    /// Override the playback mode stored in the script
    #[arg(long, value_enum)]
    pub mode: Option<PlaybackMode>,

    /// Playback speed factor (2 plays twice as fast)
    #[arg(long, value_name = "FACTOR", value_parser = parse_speed)]
    pub speed: Option<f64>,

    /// Print the built-in script names and exit
    #[arg(long)]
    pub list_scripts: bool,

    /// Validate the selected script, print a summary and exit
    #[arg(long)]
    pub check: bool,

    /// Data directory for config and logs (default ~/.concierge)
    #[arg(long, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,
}

fn parse_speed(s: &str) -> Result<f64, String> {
    let speed: f64 = s.parse().map_err(|_| format!("not a number: {s}"))?;
    if speed.is_finite() && speed > 0.0 {
        Ok(speed)
    } else {
        Err("speed must be greater than zero".to_string())
    }
}

/// What to play, after merging the command line over the config file
#[derive(Debug, Clone)]
pub struct PlaybackPlan {
    pub script: Script,
    pub mode: PlaybackMode,
    pub timing: Timing,
}

impl Cli {
    /// Resolve the script, mode and timing.
    ///
    /// Precedence for each setting: command line, then config file, then
    /// the script itself (mode) or built-in defaults.
    pub fn plan(&self, config: &PlaybackConfig) -> Result<PlaybackPlan, ScriptError> {
        let script = match (&self.script, &self.builtin, &config.script) {
            (Some(path), _, _) => Script::load(path)?,
            (None, Some(name), _) => Script::builtin(name)?,
            (None, None, Some(path)) => Script::load(path)?,
            (None, None, None) => Script::builtin(&config.builtin)?,
        };

        let mode = self.mode.or(config.mode).unwrap_or(script.mode);
        let timing = match self.speed {
            Some(speed) => config.timing.scaled(speed),
            None => config.timing,
        };

        Ok(PlaybackPlan {
            script,
            mode,
            timing,
        })
    }
}

impl PlaybackPlan {
    /// Human readable summary printed by `--check`
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "script: {}", self.script.name);
        let _ = writeln!(out, "title: {}", self.script.title);
        let _ = writeln!(out, "mode: {}", self.mode.as_str());
        let _ = writeln!(out, "steps: {}", self.script.len());
        for (kind, count) in self.script.kind_counts() {
            let _ = writeln!(out, "  {kind}: {count}");
        }
        let _ = writeln!(
            out,
            "phone call: {}",
            if self.script.has_phone_call() { "yes" } else { "no" }
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("concierge").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_to_configured_builtin() {
        let plan = cli(&[]).plan(&PlaybackConfig::default()).unwrap();
        assert_eq!(plan.script.name, "triage");
        assert_eq!(plan.mode, PlaybackMode::Scripted);
        assert_eq!(plan.timing, Timing::default());
    }

    #[test]
    fn test_mode_precedence() {
        let mut config = PlaybackConfig::default();
        config.mode = Some(PlaybackMode::Interactive);

        let plan = cli(&[]).plan(&config).unwrap();
        assert_eq!(plan.mode, PlaybackMode::Interactive);

        let plan = cli(&["--mode", "scripted"]).plan(&config).unwrap();
        assert_eq!(plan.mode, PlaybackMode::Scripted);
    }

    #[test]
    fn test_script_mode_used_when_nothing_overrides() {
        let plan = cli(&["--builtin", "triage-free-rating"])
            .plan(&PlaybackConfig::default())
            .unwrap();
        assert_eq!(plan.mode, PlaybackMode::Interactive);
    }

    #[test]
    fn test_speed_scales_timing() {
        let plan = cli(&["--speed", "2"]).plan(&PlaybackConfig::default()).unwrap();
        assert_eq!(plan.timing.first_delay, Duration::from_millis(250));
        assert_eq!(plan.timing.reveal_delay, Duration::from_millis(600));
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(Cli::try_parse_from(["concierge", "--speed", "0"]).is_err());
        assert!(Cli::try_parse_from(["concierge", "--speed", "fast"]).is_err());
        assert!(Cli::try_parse_from(["concierge", "--mode", "random"]).is_err());
        assert!(
            Cli::try_parse_from(["concierge", "--script", "a.json", "--builtin", "triage"])
                .is_err()
        );
    }

    #[test]
    fn test_unknown_builtin_is_an_error() {
        let err = cli(&["--builtin", "nope"])
            .plan(&PlaybackConfig::default())
            .unwrap_err();
        assert!(matches!(err, ScriptError::UnknownBuiltin(name) if name == "nope"));
    }

    #[test]
    fn test_summary_lists_kinds() {
        let plan = cli(&[]).plan(&PlaybackConfig::default()).unwrap();
        let summary = plan.summary();
        assert!(summary.contains("script: triage"));
        assert!(summary.contains("steps: 56"));
        assert!(summary.contains("phone-call: 1"));
        assert!(summary.contains("phone call: yes"));
    }
}
