use circle_display::config::GaugeConfig;
use circle_display::protocol::ControlCommand;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Command(ControlCommand),
    /// Parsed off the UI thread, ready to apply.
    ConfigLoaded(Box<GaugeConfig>),
}
