pub mod cli;
pub mod config;
pub mod playback;
pub mod script;
pub mod ui;
pub mod util;

pub use cli::{Cli, PlaybackPlan};
pub use config::Config;
pub use playback::{Playback, PlaybackMode, Timing};
pub use script::{Script, ScriptError, Step, StepKind};
pub use ui::App;
