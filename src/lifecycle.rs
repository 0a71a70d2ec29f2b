/*
 * Show/callback lifecycle. `TaskDialog::show_with` checks its preconditions,
 * turns the configuration into a `DialogRequest` and hands it to a
 * `DialogBackend`, which performs the single blocking native call. While that
 * call runs, the backend feeds every native notification back through
 * `TaskDialog::dispatch_notification`, and the dialog talks to the live window
 * only through the `CommandSink` the backend attached on construction.
 *
 * The phases only move forward:
 * Unshown -> Constructing -> Activated -> Destroyed. A destroyed dialog cannot
 * be shown again.
 */
use crate::dialog::{DialogEvent, DialogHandler, TaskDialog};
use crate::error::{PlatformError, Result as PlatformResult};
use crate::native::{
    self, CallbackReply, DialogRequest, IconRequest, NativeOutcome, Notification,
};
use crate::text::Hyperlink;
use crate::types::{
    ButtonStyle, ControlsVersion, DialogIcon, DialogResult, ExpansionState, IconElement,
    IconImage, OwnerWindow, ProgressBarState, ProgressBarStyle, TextElement, TimerTick,
};

const MINIMUM_CONTROLS_MAJOR_VERSION: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DialogPhase {
    #[default]
    Unshown,
    /// The native call is running but the window is not visible yet.
    Constructing,
    Activated,
    Destroyed,
}

/// A change sent to the live native dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogCommand {
    EnableButton { id: i32, enabled: bool },
    EnableRadioButton { id: i32, enabled: bool },
    SetButtonElevationRequired { id: i32, required: bool },
    SetElementText { element: TextElement, text: String },
    UpdateIcon {
        element: IconElement,
        image: Option<IconImage>,
    },
    SetProgressBarRange { min: i16, max: i16 },
    SetProgressBarPosition(i32),
    SetProgressBarState(ProgressBarState),
    /// Switches the bar between normal (`false`) and marquee (`true`) mode.
    SetMarqueeProgressBar(bool),
    SetProgressBarMarquee { running: bool, interval: u32 },
}

/*
 * Receiver for commands aimed at the live dialog. Native message sends cannot
 * meaningfully fail once the window exists, so implementations log problems
 * instead of returning them.
 */
pub trait CommandSink {
    fn execute(&mut self, command: DialogCommand);
}

/// The native side of a dialog: environment queries and the blocking show call.
pub trait DialogBackend {
    fn common_controls_version(&self) -> PlatformResult<ControlsVersion>;

    fn is_owner_realized(&self, owner: OwnerWindow) -> bool {
        owner.is_realized()
    }

    /*
     * Runs the dialog to completion. Implementations must attach a command
     * sink with `TaskDialog::attach_command_sink` before dispatching
     * `Notification::DialogConstructed`, and forward every notification through
     * `TaskDialog::dispatch_notification`.
     */
    fn run_dialog(
        &mut self,
        request: &DialogRequest,
        dialog: &mut TaskDialog,
    ) -> PlatformResult<NativeOutcome>;
}

impl TaskDialog {
    /// Shows the dialog through `backend` and blocks until it is closed.
    pub fn show_with<B: DialogBackend + ?Sized>(
        &mut self,
        backend: &mut B,
    ) -> PlatformResult<DialogResult> {
        if self.phase != DialogPhase::Unshown || self.initialized {
            return Err(PlatformError::InvalidState(
                "a task dialog can only be shown once".to_string(),
            ));
        }

        let version = backend.common_controls_version()?;
        if version.major < MINIMUM_CONTROLS_MAJOR_VERSION {
            return Err(PlatformError::NotSupported(format!(
                "task dialogs require common controls version {MINIMUM_CONTROLS_MAJOR_VERSION} or later, found {}.{}.{}",
                version.major, version.minor, version.build
            )));
        }

        if let Some(owner) = self.owner {
            if !backend.is_owner_realized(owner) {
                return Err(PlatformError::InvalidHandle(format!(
                    "owner window {:#x} has not been created",
                    owner.raw()
                )));
            }
        }

        let request = self.build_request();
        self.phase = DialogPhase::Constructing;
        log::debug!(
            "TaskDialog: Showing dialog with {} buttons and {} radio buttons",
            request.buttons.len(),
            request.radio_buttons.len()
        );

        let outcome = backend.run_dialog(&request, self);
        self.end_native_session();

        let outcome = outcome?;
        if outcome.status != native::S_OK {
            log::error!(
                "TaskDialog: Native call failed with status {:#010x}",
                outcome.status
            );
            return Err(PlatformError::NativeCall {
                code: outcome.status,
            });
        }

        let result = DialogResult::new(
            outcome.selected_button,
            outcome.selected_radio_button,
            outcome.verification_checked,
        );
        log::debug!("TaskDialog: Closed with {result}");
        Ok(result)
    }

    /// Drops the link to the native window; the dialog cannot be shown again.
    pub(crate) fn end_native_session(&mut self) {
        self.sink = None;
        self.initialized = false;
        self.activated = false;
        self.phase = DialogPhase::Destroyed;
    }

    /// Gives the dialog its channel to the live native window.
    pub fn attach_command_sink(&mut self, sink: Box<dyn CommandSink>) {
        self.sink = Some(sink);
    }

    /// Handles one native notification and returns the reply for the callback.
    pub fn dispatch_notification(&mut self, notification: Notification) -> CallbackReply {
        match notification {
            Notification::DialogConstructed => {
                self.expansion_state = self.default_state;
                self.footer_icon_is_handle = self.footer_uses_icon_handle();
                self.initialize_elements();
                self.initialized = true;
                log::debug!("TaskDialog: Dialog constructed");
                self.raise(DialogEvent::Initialized);
                CallbackReply::Continue
            }
            Notification::Created => {
                self.activated = true;
                self.phase = DialogPhase::Activated;
                log::debug!("TaskDialog: Dialog activated");
                self.raise(DialogEvent::Activated);
                CallbackReply::Continue
            }
            Notification::Destroyed => {
                self.end_native_session();
                log::debug!("TaskDialog: Dialog destroyed");
                self.raise(DialogEvent::Closed);
                CallbackReply::Continue
            }
            Notification::ButtonClicked(id) => self.on_button_clicked(id),
            Notification::RadioButtonClicked(id) => {
                self.on_radio_button_clicked(id);
                CallbackReply::Continue
            }
            Notification::HyperlinkClicked(target) => {
                self.on_hyperlink_clicked(&target);
                CallbackReply::Continue
            }
            Notification::Timer(tick_count) => {
                let mut tick = TimerTick::new(tick_count);
                self.raise_timer(&mut tick);
                if tick.reset_requested() {
                    CallbackReply::ResetTimer
                } else {
                    CallbackReply::Continue
                }
            }
            Notification::VerificationClicked(checked) => {
                self.verification_checked = checked;
                self.raise(DialogEvent::VerificationChanged);
                CallbackReply::Continue
            }
            Notification::ExpandoButtonClicked(expanded) => {
                if expanded {
                    self.expansion_state = ExpansionState::Expanded;
                    self.raise(DialogEvent::Expanded);
                } else {
                    self.expansion_state = ExpansionState::Collapsed;
                    self.raise(DialogEvent::Collapsed);
                }
                CallbackReply::Continue
            }
            Notification::Help => {
                self.raise(DialogEvent::Help);
                CallbackReply::Continue
            }
            Notification::Navigated => {
                log::debug!("TaskDialog: Ignoring navigation notification");
                CallbackReply::Continue
            }
            Notification::Unknown(code) => {
                log::debug!("TaskDialog: Ignoring unknown notification {code}");
                CallbackReply::Continue
            }
        }
    }

    /*
     * Button ids are collection indices. An id without a custom button belongs
     * to a common button and closes the dialog normally.
     */
    fn on_button_clicked(&mut self, id: i32) -> CallbackReply {
        let Some(button) = self.buttons.get_mut(id) else {
            log::debug!("TaskDialog: Common button {id} clicked");
            return CallbackReply::Continue;
        };

        if let Some(mut handler) = button.on_click.take() {
            handler(self);
            if let Some(button) = self.buttons.get_mut(id) {
                button.on_click.get_or_insert(handler);
            }
        }

        match self.buttons.get(id) {
            Some(button) if button.is_prevent_close() => {
                log::debug!("TaskDialog: Button {id} keeps the dialog open");
                CallbackReply::KeepOpen
            }
            _ => CallbackReply::Continue,
        }
    }

    fn on_radio_button_clicked(&mut self, id: i32) {
        if self.radio_buttons.get(id).is_none() {
            log::warn!("TaskDialog: Radio button click for unknown ID {id}");
            return;
        }

        for (index, radio_button) in self.radio_buttons.iter_mut().enumerate() {
            radio_button.checked = index as i32 == id;
        }

        let handler = self
            .radio_buttons
            .get_mut(id)
            .and_then(|radio_button| radio_button.on_click.take());
        if let Some(mut handler) = handler {
            handler(self);
            if let Some(radio_button) = self.radio_buttons.get_mut(id) {
                radio_button.on_click.get_or_insert(handler);
            }
        }
    }

    /// Looks the target up in content, expanded information and footer, in that order.
    fn on_hyperlink_clicked(&mut self, target: &str) {
        let Some(mut handler) = self.take_link_handler(target) else {
            log::warn!("TaskDialog: No hyperlink handler for '{target}'");
            return;
        };
        handler(self);
        if let Some(link) = self.find_link_mut(target) {
            link.on_click.get_or_insert(handler);
        }
    }

    fn find_link_mut(&mut self, target: &str) -> Option<&mut Hyperlink> {
        [
            self.content.as_mut(),
            self.expanded_information.as_mut(),
            self.footer.as_mut(),
        ]
        .into_iter()
        .flatten()
        .find_map(|text| text.find_link_mut(target))
    }

    fn take_link_handler(&mut self, target: &str) -> Option<DialogHandler> {
        self.find_link_mut(target)
            .and_then(|link| link.on_click.take())
    }

    /*
     * Brings the freshly constructed native dialog in line with state that
     * `TASKDIALOGCONFIG` cannot express: disabled elements, elevation shields,
     * the selected radio button and the progress bar.
     */
    fn initialize_elements(&mut self) {
        let mut commands = Vec::new();

        for id in self.buttons.ids_where(|button| !button.is_enabled()) {
            commands.push(DialogCommand::EnableButton { id, enabled: false });
        }
        for id in self
            .buttons
            .ids_where(|button| button.is_elevation_required())
        {
            commands.push(DialogCommand::SetButtonElevationRequired { id, required: true });
        }
        for id in self
            .radio_buttons
            .ids_where(|radio_button| !radio_button.is_enabled())
        {
            commands.push(DialogCommand::EnableRadioButton { id, enabled: false });
        }

        let default_radio_button = self.default_radio_button;
        for (index, radio_button) in self.radio_buttons.iter_mut().enumerate() {
            radio_button.checked = index as i32 == default_radio_button;
        }

        if let Some(progress_bar) = &self.progress_bar {
            commands.extend(progress_bar.initial_commands());
        }

        for command in commands {
            self.send(command);
        }
    }

    pub(crate) fn send(&mut self, command: DialogCommand) {
        match self.sink.as_mut() {
            Some(sink) => {
                log::debug!("TaskDialog: Executing {command:?}");
                sink.execute(command);
            }
            None => log::debug!("TaskDialog: No native dialog for {command:?}"),
        }
    }

    pub(crate) fn send_if_activated(&mut self, command: DialogCommand) {
        if self.activated {
            self.send(command);
        }
    }

    /// Snapshot of the configuration in the shape the native call expects.
    pub(crate) fn build_request(&self) -> DialogRequest {
        let hyperlinks = self.enable_hyperlinks;
        let mut flags = native::TDF_USE_HICON_FOOTER;

        let set_flags = [
            (hyperlinks, native::TDF_ENABLE_HYPERLINKS),
            (self.allow_cancellation, native::TDF_ALLOW_DIALOG_CANCELLATION),
            (
                self.button_style == ButtonStyle::CommandLinks,
                native::TDF_USE_COMMAND_LINKS,
            ),
            (
                self.button_style == ButtonStyle::CommandLinksNoIcon,
                native::TDF_USE_COMMAND_LINKS_NO_ICON,
            ),
            (self.expand_footer, native::TDF_EXPAND_FOOTER_AREA),
            (
                self.default_state == ExpansionState::Expanded,
                native::TDF_EXPANDED_BY_DEFAULT,
            ),
            (self.verification_checked, native::TDF_VERIFICATION_FLAG_CHECKED),
            (self.enable_timer, native::TDF_CALLBACK_TIMER),
            (
                self.default_radio_button == -1,
                native::TDF_NO_DEFAULT_RADIO_BUTTON,
            ),
            (self.can_minimize, native::TDF_CAN_BE_MINIMIZED),
            (self.size_to_content, native::TDF_SIZE_TO_CONTENT),
        ];
        for (enabled, flag) in set_flags {
            if enabled {
                flags |= flag;
            }
        }

        if let Some(progress_bar) = &self.progress_bar {
            flags |= match progress_bar.style() {
                ProgressBarStyle::Normal => native::TDF_SHOW_PROGRESS_BAR,
                ProgressBarStyle::Marquee => native::TDF_SHOW_MARQUEE_PROGRESS_BAR,
            };
        }

        let main_icon = if self.use_default_icon {
            standard_icon(self.default_icon)
        } else {
            flags |= native::TDF_USE_HICON_MAIN;
            custom_icon(self.icon.as_ref())
        };

        let footer_icon = if self.footer_uses_icon_handle() {
            custom_icon(self.footer_icon.as_ref())
        } else {
            flags &= !native::TDF_USE_HICON_FOOTER;
            standard_icon(self.footer_default_icon)
        };

        DialogRequest {
            flags,
            common_buttons: self.common_buttons.bits(),
            owner: self.owner,
            title: self.title.clone(),
            instruction: self.instruction.as_ref().map(|text| text.render(false)),
            content: self.content.as_ref().map(|text| text.render(hyperlinks)),
            expanded_information: self
                .expanded_information
                .as_ref()
                .map(|text| text.render(hyperlinks)),
            expanded_control_text: self.expanded_control_text.clone(),
            collapsed_control_text: self.collapsed_control_text.clone(),
            footer: self.footer.as_ref().map(|text| text.render(hyperlinks)),
            verification_text: self.verification_text.clone(),
            main_icon,
            footer_icon,
            buttons: self.buttons.entries(self.button_style),
            radio_buttons: self.radio_buttons.entries(self.button_style),
            default_button: self.default_button,
            default_radio_button: self.default_radio_button,
            width: self.width,
        }
    }
}

fn standard_icon(icon: DialogIcon) -> IconRequest {
    match icon {
        DialogIcon::None => IconRequest::None,
        icon => IconRequest::Standard(icon.resource_id()),
    }
}

fn custom_icon(image: Option<&IconImage>) -> IconRequest {
    image.cloned().map_or(IconRequest::None, IconRequest::Custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Button, RadioButton};
    use crate::progress::ProgressBar;
    use crate::test_support::{RecordingSink, ScriptedBackend};
    use crate::text::{Hyperlink, RichText};
    use crate::types::CommonButtons;

    use std::cell::RefCell;
    use std::rc::Rc;

    fn shown_lifecycle() -> Vec<Notification> {
        vec![
            Notification::DialogConstructed,
            Notification::Created,
            Notification::Destroyed,
        ]
    }

    #[test]
    fn test_end_to_end_show_returns_native_selection() {
        // Arrange
        let mut dialog = TaskDialog::new();
        dialog.set_title("T").expect("title");
        dialog.set_instruction("I");
        dialog.set_content("C");
        dialog
            .set_common_buttons(CommonButtons::OK | CommonButtons::CANCEL)
            .expect("buttons");
        dialog.set_default_icon(DialogIcon::Warning).expect("icon");
        let mut backend = ScriptedBackend::new(shown_lifecycle());
        backend.outcome.selected_button = native::IDRETRY;

        // Act
        let result = dialog.show_with(&mut backend).expect("dialog shown");

        // Assert
        assert_eq!(result.selected_button(), native::IDRETRY);
        assert_eq!(result.selected_radio_button(), 0);
        assert!(!result.verification_checked());
        let request = backend.request.expect("request captured");
        assert_eq!(request.title.as_deref(), Some("T"));
        assert_eq!(request.instruction.as_deref(), Some("I"));
        assert_eq!(request.content.as_deref(), Some("C"));
        assert_eq!(
            request.common_buttons,
            native::TDCBF_OK_BUTTON | native::TDCBF_CANCEL_BUTTON
        );
        assert_eq!(
            request.main_icon,
            IconRequest::Standard(native::TD_WARNING_ICON)
        );
        assert_eq!(dialog.phase(), DialogPhase::Destroyed);
    }

    #[test]
    fn test_lifecycle_raises_events_in_order() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut dialog = TaskDialog::new();
        for event in [
            DialogEvent::Initialized,
            DialogEvent::Activated,
            DialogEvent::Closed,
        ] {
            let events = Rc::clone(&events);
            dialog.on(event, move |dialog| {
                events
                    .borrow_mut()
                    .push((event, dialog.is_initialized(), dialog.is_activated()));
            });
        }

        dialog
            .show_with(&mut ScriptedBackend::new(shown_lifecycle()))
            .expect("dialog shown");

        assert_eq!(
            *events.borrow(),
            vec![
                (DialogEvent::Initialized, true, false),
                (DialogEvent::Activated, true, true),
                (DialogEvent::Closed, false, false),
            ]
        );
    }

    #[test]
    fn test_prevent_close_button_keeps_dialog_open() {
        // Arrange
        let clicks = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&clicks);
        let mut dialog = TaskDialog::new();
        let id = dialog
            .add_button(
                Button::new("Apply")
                    .prevent_close(true)
                    .on_click(move |_| *counter.borrow_mut() += 1),
            )
            .expect("button");
        let mut backend = ScriptedBackend::new(vec![
            Notification::DialogConstructed,
            Notification::Created,
            Notification::ButtonClicked(id),
            Notification::ButtonClicked(id),
            Notification::Destroyed,
        ]);

        // Act
        dialog.show_with(&mut backend).expect("dialog shown");

        // Assert
        assert_eq!(*clicks.borrow(), 2);
        assert_eq!(
            backend.reply_to(&Notification::ButtonClicked(id)),
            Some(CallbackReply::KeepOpen)
        );
        assert_eq!(CallbackReply::KeepOpen.status_code(), native::S_FALSE);
    }

    #[test]
    fn test_handler_can_clear_prevent_close_before_reply() {
        let mut dialog = TaskDialog::new();
        let id = dialog
            .add_button(Button::new("Apply").prevent_close(true).on_click(|dialog| {
                dialog
                    .update_button(0, |button| button.set_prevent_close(false))
                    .expect("button exists");
            }))
            .expect("button");
        let mut backend = ScriptedBackend::new(vec![
            Notification::DialogConstructed,
            Notification::Created,
            Notification::ButtonClicked(id),
            Notification::Destroyed,
        ]);

        dialog.show_with(&mut backend).expect("dialog shown");

        assert_eq!(
            backend.reply_to(&Notification::ButtonClicked(id)),
            Some(CallbackReply::Continue)
        );
    }

    #[test]
    fn test_common_button_click_continues() {
        let mut dialog = TaskDialog::new();
        dialog.dispatch_notification(Notification::DialogConstructed);

        assert_eq!(
            dialog.dispatch_notification(Notification::ButtonClicked(native::IDOK)),
            CallbackReply::Continue
        );
    }

    #[test]
    fn test_radio_click_checks_only_the_clicked_button() {
        // Arrange
        let mut dialog = TaskDialog::new();
        for title in ["a", "b", "c"] {
            dialog.add_radio_button(RadioButton::new(title)).expect("radio");
        }
        dialog.dispatch_notification(Notification::DialogConstructed);
        // Act
        dialog.dispatch_notification(Notification::RadioButtonClicked(2));
        // Assert
        let checked: Vec<bool> = dialog
            .radio_buttons()
            .iter()
            .map(RadioButton::is_checked)
            .collect();
        assert_eq!(checked, vec![false, false, true]);
    }

    #[test]
    fn test_radio_click_raises_its_handler_and_ignores_unknown_ids() {
        let clicked = Rc::new(RefCell::new(false));
        let flag = Rc::clone(&clicked);
        let mut dialog = TaskDialog::new();
        dialog
            .add_radio_button(RadioButton::new("a").on_click(move |_| *flag.borrow_mut() = true))
            .expect("radio");
        dialog.dispatch_notification(Notification::DialogConstructed);

        assert_eq!(
            dialog.dispatch_notification(Notification::RadioButtonClicked(7)),
            CallbackReply::Continue
        );
        assert!(!*clicked.borrow());

        dialog.dispatch_notification(Notification::RadioButtonClicked(0));
        assert!(*clicked.borrow());
    }

    #[test]
    fn test_default_radio_button_is_checked_on_construction() {
        let mut dialog = TaskDialog::new();
        dialog.add_radio_button(RadioButton::new("a")).expect("radio");
        dialog.add_radio_button(RadioButton::new("b")).expect("radio");
        dialog.set_default_radio_button(1).expect("default radio");

        dialog.dispatch_notification(Notification::DialogConstructed);

        assert!(!dialog.radio_buttons().get(0).is_some_and(RadioButton::is_checked));
        assert!(dialog.radio_buttons().get(1).is_some_and(RadioButton::is_checked));
    }

    #[test]
    fn test_construction_applies_disabled_elevated_and_progress_state() {
        // Arrange
        let mut dialog = TaskDialog::new();
        dialog.add_button(Button::new("a").enabled(false)).expect("button");
        dialog
            .add_button(Button::new("b").elevation_required(true))
            .expect("button");
        dialog
            .add_radio_button(RadioButton::new("r").enabled(false))
            .expect("radio");
        dialog
            .set_progress_bar(Some(ProgressBar::marquee()))
            .expect("progress bar");
        let sink = RecordingSink::default();
        let commands = sink.commands();
        dialog.attach_command_sink(Box::new(sink));

        // Act
        dialog.dispatch_notification(Notification::DialogConstructed);

        // Assert
        let commands = commands.borrow();
        assert_eq!(
            commands[..3],
            [
                DialogCommand::EnableButton { id: 0, enabled: false },
                DialogCommand::SetButtonElevationRequired { id: 1, required: true },
                DialogCommand::EnableRadioButton { id: 0, enabled: false },
            ]
        );
        assert_eq!(commands[3], DialogCommand::SetMarqueeProgressBar(true));
        assert_eq!(
            commands[4],
            DialogCommand::SetProgressBarMarquee {
                running: false,
                interval: 0,
            }
        );
    }

    #[test]
    fn test_live_edits_reach_the_sink_only_while_activated() {
        // Arrange
        let mut dialog = TaskDialog::new();
        dialog
            .set_progress_bar(Some(ProgressBar::new()))
            .expect("progress bar");
        dialog.add_button(Button::new("Go")).expect("button");
        dialog.on(DialogEvent::Activated, |dialog| {
            dialog.set_content("Working");
            dialog
                .update_progress_bar(|bar| bar.set_value(10))
                .expect("progress bar");
            dialog
                .update_button(0, |button| button.set_enabled(false))
                .expect("button");
        });
        let mut backend = ScriptedBackend::new(shown_lifecycle());
        let commands = backend.commands();

        // Act
        dialog.set_footer("before show");
        dialog.show_with(&mut backend).expect("dialog shown");
        dialog.set_footer("after close");

        // Assert
        let commands = commands.borrow();
        let live: Vec<&DialogCommand> = commands
            .iter()
            .skip_while(|command| !matches!(command, DialogCommand::SetElementText { .. }))
            .collect();
        assert_eq!(
            live,
            vec![
                &DialogCommand::SetElementText {
                    element: TextElement::Content,
                    text: "Working".to_string(),
                },
                &DialogCommand::SetProgressBarPosition(10),
                &DialogCommand::EnableButton { id: 0, enabled: false },
            ]
        );
    }

    #[test]
    fn test_footer_icon_update_skipped_when_footer_uses_predefined_icon() {
        // Arrange
        let image = IconImage::from_bgra(1, 1, vec![0, 0, 0, 255]).expect("valid image");
        let mut dialog = TaskDialog::new();
        dialog
            .set_footer_default_icon(DialogIcon::Information)
            .expect("footer icon");
        let sink = RecordingSink::default();
        let commands = sink.commands();
        dialog.attach_command_sink(Box::new(sink));
        dialog.dispatch_notification(Notification::DialogConstructed);
        dialog.dispatch_notification(Notification::Created);

        // Act
        dialog.set_footer_icon(Some(image.clone()));

        // Assert
        assert!(commands.borrow().is_empty());
        assert_eq!(dialog.footer_icon(), Some(&image));
    }

    #[test]
    fn test_main_icon_updates_only_when_custom_icon_is_in_use() {
        let image = IconImage::from_bgra(1, 1, vec![0, 0, 0, 255]).expect("valid image");
        let mut dialog = TaskDialog::new();
        let sink = RecordingSink::default();
        let commands = sink.commands();
        dialog.attach_command_sink(Box::new(sink));
        dialog.dispatch_notification(Notification::DialogConstructed);
        dialog.dispatch_notification(Notification::Created);

        dialog.set_icon(Some(image.clone()));
        dialog.set_footer_icon(Some(image.clone()));

        assert_eq!(
            *commands.borrow(),
            vec![DialogCommand::UpdateIcon {
                element: IconElement::Footer,
                image: Some(image),
            }]
        );
    }

    #[test]
    fn test_hyperlink_search_prefers_content_then_expanded_then_footer() {
        // Arrange
        let hits = Rc::new(RefCell::new(Vec::new()));
        let link = |area: &'static str| {
            let hits = Rc::clone(&hits);
            Hyperlink::new(area, "app://target").on_click(move |_| hits.borrow_mut().push(area))
        };
        let mut dialog = TaskDialog::new();
        dialog.set_footer(RichText::new().link(link("footer")));
        dialog.set_expanded_information(RichText::new().link(link("expanded")));
        dialog.set_content(RichText::new().text("plain"));

        // Act
        dialog.dispatch_notification(Notification::HyperlinkClicked("app://target".into()));
        dialog.set_content(RichText::new().link(link("content")));
        dialog.dispatch_notification(Notification::HyperlinkClicked("app://target".into()));
        dialog.dispatch_notification(Notification::HyperlinkClicked("app://other".into()));

        // Assert
        assert_eq!(*hits.borrow(), vec!["expanded", "content"]);
    }

    #[test]
    fn test_hyperlink_handler_survives_repeated_clicks() {
        let count = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&count);
        let mut dialog = TaskDialog::new();
        dialog.set_content(
            RichText::new().link(
                Hyperlink::new("again", "app://again")
                    .on_click(move |_| *counter.borrow_mut() += 1),
            ),
        );

        for _ in 0..3 {
            dialog.dispatch_notification(Notification::HyperlinkClicked("app://again".into()));
        }

        assert_eq!(*count.borrow(), 3);
    }

    #[test]
    fn test_timer_reset_request_replies_reset() {
        // Arrange
        let mut dialog = TaskDialog::new();
        dialog.on_timer(|_, tick| {
            if tick.tick_count() >= 1000 {
                tick.request_reset();
            }
        });
        // Act
        let early = dialog.dispatch_notification(Notification::Timer(200));
        let late = dialog.dispatch_notification(Notification::Timer(1200));
        // Assert
        assert_eq!(early, CallbackReply::Continue);
        assert_eq!(late, CallbackReply::ResetTimer);
        assert_eq!(late.status_code(), native::S_FALSE);
    }

    #[test]
    fn test_verification_and_expando_update_state_and_raise_events() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut dialog = TaskDialog::new();
        for event in [
            DialogEvent::VerificationChanged,
            DialogEvent::Expanded,
            DialogEvent::Collapsed,
            DialogEvent::Help,
        ] {
            let events = Rc::clone(&events);
            dialog.on(event, move |_| events.borrow_mut().push(event));
        }

        dialog.dispatch_notification(Notification::VerificationClicked(true));
        assert!(dialog.is_verification_checked());
        dialog.dispatch_notification(Notification::ExpandoButtonClicked(true));
        assert_eq!(dialog.expansion_state(), ExpansionState::Expanded);
        dialog.dispatch_notification(Notification::ExpandoButtonClicked(false));
        assert_eq!(dialog.expansion_state(), ExpansionState::Collapsed);
        dialog.dispatch_notification(Notification::Help);

        assert_eq!(
            *events.borrow(),
            vec![
                DialogEvent::VerificationChanged,
                DialogEvent::Expanded,
                DialogEvent::Collapsed,
                DialogEvent::Help,
            ]
        );
    }

    #[test]
    fn test_destroyed_dialog_cannot_be_shown_again() {
        let mut dialog = TaskDialog::new();
        dialog
            .show_with(&mut ScriptedBackend::new(shown_lifecycle()))
            .expect("first show");

        let second = dialog.show_with(&mut ScriptedBackend::new(shown_lifecycle()));

        assert!(matches!(second, Err(PlatformError::InvalidState(_))));
        assert_eq!(dialog.phase(), DialogPhase::Destroyed);
        assert!(dialog.set_title("editable again").is_ok());
    }

    #[test]
    fn test_old_common_controls_are_not_supported() {
        let mut dialog = TaskDialog::new();
        let mut backend = ScriptedBackend::new(shown_lifecycle());
        backend.version = ControlsVersion {
            major: 5,
            minor: 82,
            build: 0,
        };

        let result = dialog.show_with(&mut backend);

        assert!(matches!(result, Err(PlatformError::NotSupported(_))));
        assert!(backend.request.is_none());
        assert_eq!(dialog.phase(), DialogPhase::Unshown);
    }

    #[test]
    fn test_unrealized_owner_is_rejected_before_the_native_call() {
        let mut dialog = TaskDialog::new();
        dialog
            .set_owner(Some(OwnerWindow::from_raw(0)))
            .expect("owner");
        let mut backend = ScriptedBackend::new(shown_lifecycle());

        let result = dialog.show_with(&mut backend);

        assert!(matches!(result, Err(PlatformError::InvalidHandle(_))));
        assert!(backend.request.is_none());
    }

    #[test]
    fn test_failing_native_status_surfaces_as_error() {
        let mut dialog = TaskDialog::new();
        let mut backend = ScriptedBackend::new(Vec::new());
        backend.outcome.status = 0x8007_0057_u32 as i32;

        let result = dialog.show_with(&mut backend);

        assert_eq!(
            result,
            Err(PlatformError::NativeCall {
                code: 0x8007_0057_u32 as i32
            })
        );
        assert_eq!(dialog.phase(), DialogPhase::Destroyed);
    }

    #[test]
    fn test_request_flags_follow_configuration() {
        // Arrange
        let mut dialog = TaskDialog::new();
        dialog.set_enable_hyperlinks(true).expect("hyperlinks");
        dialog.set_allow_cancellation(true).expect("cancellation");
        dialog
            .set_button_style(ButtonStyle::CommandLinks)
            .expect("style");
        dialog
            .set_default_state(ExpansionState::Expanded)
            .expect("state");
        dialog.set_default_radio_button(-1).expect("radio");
        dialog
            .set_progress_bar(Some(ProgressBar::new()))
            .expect("progress bar");
        dialog.set_content(
            RichText::new()
                .text("Read ")
                .link(Hyperlink::new("more", "app://more")),
        );

        // Act
        let request = dialog.build_request();

        // Assert
        for flag in [
            native::TDF_ENABLE_HYPERLINKS,
            native::TDF_ALLOW_DIALOG_CANCELLATION,
            native::TDF_USE_COMMAND_LINKS,
            native::TDF_EXPANDED_BY_DEFAULT,
            native::TDF_NO_DEFAULT_RADIO_BUTTON,
            native::TDF_SHOW_PROGRESS_BAR,
            native::TDF_USE_HICON_FOOTER,
        ] {
            assert!(request.has_flag(flag), "missing flag {flag:#x}");
        }
        assert!(!request.has_flag(native::TDF_USE_HICON_MAIN));
        assert!(!request.has_flag(native::TDF_CALLBACK_TIMER));
        assert_eq!(
            request.content.as_deref(),
            Some("Read <A HREF=\"app://more\">more</A>")
        );
    }

    #[test]
    fn test_request_icons_follow_icon_properties() {
        let image = IconImage::from_bgra(1, 1, vec![1, 2, 3, 255]).expect("valid image");
        let mut dialog = TaskDialog::new();
        dialog.set_use_default_icon(false).expect("custom main icon");
        dialog.set_icon(Some(image.clone()));
        dialog
            .set_footer_default_icon(DialogIcon::Information)
            .expect("footer icon");

        let request = dialog.build_request();

        assert!(request.has_flag(native::TDF_USE_HICON_MAIN));
        assert!(!request.has_flag(native::TDF_USE_HICON_FOOTER));
        assert_eq!(request.main_icon, IconRequest::Custom(image));
        assert_eq!(
            request.footer_icon,
            IconRequest::Standard(native::TD_INFORMATION_ICON)
        );
    }
}
