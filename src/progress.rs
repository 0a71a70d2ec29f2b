/*
 * Progress bar model. The native control takes its range as two 16-bit halves
 * of one message parameter, so both bounds stay inside the signed 16-bit range.
 * Setting one bound past the other pushes the other bound along instead of
 * failing, and the value is pulled back into range whenever a bound moves.
 */
use crate::lifecycle::DialogCommand;
use crate::types::{ProgressBarState, ProgressBarStyle};

const DEFAULT_MAXIMUM: i32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressBar {
    minimum: i32,
    maximum: i32,
    value: i32,
    style: ProgressBarStyle,
    state: ProgressBarState,
    marquee_running: bool,
    marquee_interval: u32,
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self {
            minimum: 0,
            maximum: DEFAULT_MAXIMUM,
            value: 0,
            style: ProgressBarStyle::Normal,
            state: ProgressBarState::Normal,
            marquee_running: false,
            marquee_interval: 0,
        }
    }
}

impl ProgressBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marquee() -> Self {
        Self {
            style: ProgressBarStyle::Marquee,
            ..Self::default()
        }
    }

    pub fn minimum(&self) -> i32 {
        self.minimum
    }

    pub fn maximum(&self) -> i32 {
        self.maximum
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn style(&self) -> ProgressBarStyle {
        self.style
    }

    pub fn state(&self) -> ProgressBarState {
        self.state
    }

    pub fn is_marquee_running(&self) -> bool {
        self.marquee_running
    }

    /// Milliseconds between marquee animation steps; 0 lets the control pick.
    pub fn marquee_interval(&self) -> u32 {
        self.marquee_interval
    }

    pub fn set_minimum(&mut self, minimum: i32) {
        let minimum = minimum.clamp(i16::MIN as i32, i16::MAX as i32 - 1);
        self.minimum = minimum;
        if self.maximum <= minimum {
            self.maximum = minimum + 1;
        }
        self.clamp_value();
    }

    pub fn set_maximum(&mut self, maximum: i32) {
        let maximum = maximum.clamp(i16::MIN as i32 + 1, i16::MAX as i32);
        self.maximum = maximum;
        if self.minimum >= maximum {
            self.minimum = maximum - 1;
        }
        self.clamp_value();
    }

    /// Values outside `[minimum, maximum]` are clamped.
    pub fn set_value(&mut self, value: i32) {
        self.value = value.clamp(self.minimum, self.maximum);
    }

    pub fn set_style(&mut self, style: ProgressBarStyle) {
        self.style = style;
    }

    pub fn set_state(&mut self, state: ProgressBarState) {
        self.state = state;
    }

    pub fn set_marquee_running(&mut self, running: bool) {
        self.marquee_running = running;
    }

    pub fn set_marquee_interval(&mut self, interval: u32) {
        self.marquee_interval = interval;
    }

    fn clamp_value(&mut self) {
        self.value = self.value.clamp(self.minimum, self.maximum);
    }

    /*
     * Commands that bring a freshly constructed native bar to this state. The
     * style goes first; a normal bar then gets range, position and state, a
     * marquee bar its animation settings.
     */
    pub(crate) fn initial_commands(&self) -> Vec<DialogCommand> {
        let marquee = self.style == ProgressBarStyle::Marquee;
        let mut commands = vec![DialogCommand::SetMarqueeProgressBar(marquee)];
        if marquee {
            commands.push(self.marquee_command());
        } else {
            commands.push(self.range_command());
            commands.push(DialogCommand::SetProgressBarPosition(self.value));
            commands.push(DialogCommand::SetProgressBarState(self.state));
        }
        commands
    }

    /// Commands that turn the native bar from `previous` into `self`.
    pub(crate) fn diff_commands(&self, previous: &ProgressBar) -> Vec<DialogCommand> {
        let mut commands = Vec::new();
        if self.style != previous.style {
            return self.initial_commands();
        }
        if self.minimum != previous.minimum || self.maximum != previous.maximum {
            commands.push(self.range_command());
        }
        if self.value != previous.value {
            commands.push(DialogCommand::SetProgressBarPosition(self.value));
        }
        if self.state != previous.state {
            commands.push(DialogCommand::SetProgressBarState(self.state));
        }
        if self.marquee_running != previous.marquee_running
            || self.marquee_interval != previous.marquee_interval
        {
            commands.push(self.marquee_command());
        }
        commands
    }

    fn range_command(&self) -> DialogCommand {
        // Bounds are kept inside the 16-bit range by the setters.
        DialogCommand::SetProgressBarRange {
            min: self.minimum as i16,
            max: self.maximum as i16,
        }
    }

    fn marquee_command(&self) -> DialogCommand {
        DialogCommand::SetProgressBarMarquee {
            running: self.marquee_running,
            interval: self.marquee_interval,
        }
    }
}
