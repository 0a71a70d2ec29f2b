/*
 * The task dialog configuration object. A `TaskDialog` is built up with setters
 * and then shown once. Properties fall into two groups:
 *
 * - Construction-time properties (title, flags, common buttons, defaults, the
 *   element collections, ...) are baked into the native configuration when the
 *   dialog is created. Their setters return `PlatformError::InvalidState` once
 *   the dialog has been constructed.
 * - Live properties (content, instruction, footer, expanded information, icons,
 *   progress bar, button enabled/elevation) can change at any time. While the
 *   dialog is on screen each change is forwarded to the native window as a
 *   `DialogCommand`.
 *
 * Event handlers receive `&mut TaskDialog`, so a handler can make live edits to
 * the dialog that raised it. Handlers are not `Send`; the dialog is meant to be
 * driven from the single UI thread that shows it.
 */
use crate::elements::{Button, ElementCollection, RadioButton};
use crate::error::{PlatformError, Result as PlatformResult};
use crate::lifecycle::{CommandSink, DialogCommand, DialogPhase};
use crate::progress::ProgressBar;
use crate::text::DialogText;
use crate::types::{
    ButtonStyle, CommonButtons, DialogIcon, ExpansionState, IconElement, IconImage, OwnerWindow,
    TextElement, TimerTick,
};

use std::fmt;

pub type DialogHandler = Box<dyn FnMut(&mut TaskDialog)>;
pub type TimerHandler = Box<dyn FnMut(&mut TaskDialog, &mut TimerTick)>;

/// Dialog-level events that handlers can subscribe to with `TaskDialog::on`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogEvent {
    /// The native dialog exists and its elements have been initialized.
    Initialized,
    /// The dialog is visible.
    Activated,
    Closed,
    Expanded,
    Collapsed,
    /// The user pressed F1.
    Help,
    VerificationChanged,
}

#[derive(Default)]
pub(crate) struct EventHandlers {
    initialized: Vec<DialogHandler>,
    activated: Vec<DialogHandler>,
    closed: Vec<DialogHandler>,
    expanded: Vec<DialogHandler>,
    collapsed: Vec<DialogHandler>,
    help: Vec<DialogHandler>,
    verification_changed: Vec<DialogHandler>,
    pub(crate) timer: Vec<TimerHandler>,
}

impl EventHandlers {
    pub(crate) fn slot(&mut self, event: DialogEvent) -> &mut Vec<DialogHandler> {
        match event {
            DialogEvent::Initialized => &mut self.initialized,
            DialogEvent::Activated => &mut self.activated,
            DialogEvent::Closed => &mut self.closed,
            DialogEvent::Expanded => &mut self.expanded,
            DialogEvent::Collapsed => &mut self.collapsed,
            DialogEvent::Help => &mut self.help,
            DialogEvent::VerificationChanged => &mut self.verification_changed,
        }
    }
}

pub struct TaskDialog {
    pub(crate) title: Option<String>,
    pub(crate) instruction: Option<DialogText>,
    pub(crate) content: Option<DialogText>,
    pub(crate) footer: Option<DialogText>,
    pub(crate) expanded_information: Option<DialogText>,
    pub(crate) expanded_control_text: Option<String>,
    pub(crate) collapsed_control_text: Option<String>,
    pub(crate) verification_text: Option<String>,
    pub(crate) verification_checked: bool,
    pub(crate) buttons: ElementCollection<Button>,
    pub(crate) radio_buttons: ElementCollection<RadioButton>,
    pub(crate) common_buttons: CommonButtons,
    pub(crate) default_button: i32,
    pub(crate) default_radio_button: i32,
    pub(crate) default_icon: DialogIcon,
    pub(crate) use_default_icon: bool,
    pub(crate) icon: Option<IconImage>,
    pub(crate) footer_default_icon: DialogIcon,
    pub(crate) footer_icon: Option<IconImage>,
    // Footer slot mode fixed at construction: HICON or predefined resource id.
    pub(crate) footer_icon_is_handle: bool,
    pub(crate) button_style: ButtonStyle,
    pub(crate) default_state: ExpansionState,
    pub(crate) expansion_state: ExpansionState,
    pub(crate) allow_cancellation: bool,
    pub(crate) can_minimize: bool,
    pub(crate) enable_hyperlinks: bool,
    pub(crate) enable_timer: bool,
    pub(crate) expand_footer: bool,
    pub(crate) size_to_content: bool,
    pub(crate) width: u32,
    pub(crate) progress_bar: Option<ProgressBar>,
    pub(crate) owner: Option<OwnerWindow>,
    pub(crate) handlers: EventHandlers,
    pub(crate) phase: DialogPhase,
    pub(crate) initialized: bool,
    pub(crate) activated: bool,
    pub(crate) sink: Option<Box<dyn CommandSink>>,
}

impl Default for TaskDialog {
    fn default() -> Self {
        Self {
            title: None,
            instruction: None,
            content: None,
            footer: None,
            expanded_information: None,
            expanded_control_text: None,
            collapsed_control_text: None,
            verification_text: None,
            verification_checked: false,
            buttons: ElementCollection::default(),
            radio_buttons: ElementCollection::default(),
            common_buttons: CommonButtons::NONE,
            default_button: 0,
            default_radio_button: 0,
            default_icon: DialogIcon::None,
            use_default_icon: true,
            icon: None,
            footer_default_icon: DialogIcon::None,
            footer_icon: None,
            footer_icon_is_handle: true,
            button_style: ButtonStyle::Normal,
            default_state: ExpansionState::Collapsed,
            expansion_state: ExpansionState::Collapsed,
            allow_cancellation: false,
            can_minimize: false,
            enable_hyperlinks: false,
            enable_timer: false,
            expand_footer: false,
            size_to_content: false,
            width: 0,
            progress_bar: None,
            owner: None,
            handlers: EventHandlers::default(),
            phase: DialogPhase::Unshown,
            initialized: false,
            activated: false,
            sink: None,
        }
    }
}

impl fmt::Debug for TaskDialog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskDialog")
            .field("title", &self.title)
            .field("instruction", &self.instruction)
            .field("content", &self.content)
            .field("buttons", &self.buttons)
            .field("radio_buttons", &self.radio_buttons)
            .field("common_buttons", &self.common_buttons)
            .field("progress_bar", &self.progress_bar)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl TaskDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A ready-to-show message dialog with common buttons and a predefined icon.
    pub fn message(
        instruction: &str,
        content: &str,
        title: &str,
        buttons: CommonButtons,
        icon: DialogIcon,
    ) -> PlatformResult<Self> {
        let mut dialog = Self::new();
        dialog.set_title(title)?;
        dialog.set_instruction(instruction);
        dialog.set_content(content);
        dialog.set_common_buttons(buttons)?;
        dialog.set_default_icon(icon)?;
        Ok(dialog)
    }

    fn verify_write_access(&self, property: &str) -> PlatformResult<()> {
        if self.initialized {
            return Err(PlatformError::InvalidState(format!(
                "'{property}' cannot be changed after the dialog has been constructed"
            )));
        }
        Ok(())
    }

    /// True from dialog construction until the native window is destroyed.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// True while the dialog is on screen.
    pub fn is_activated(&self) -> bool {
        self.activated
    }

    pub fn phase(&self) -> DialogPhase {
        self.phase
    }

    // --- Construction-time properties ---

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> PlatformResult<()> {
        self.verify_write_access("title")?;
        self.title = Some(title.into());
        Ok(())
    }

    pub fn verification_text(&self) -> Option<&str> {
        self.verification_text.as_deref()
    }

    /// Shows the verification checkbox with this label.
    pub fn set_verification_text(&mut self, text: impl Into<String>) -> PlatformResult<()> {
        self.verify_write_access("verification_text")?;
        self.verification_text = Some(text.into());
        Ok(())
    }

    pub fn is_verification_checked(&self) -> bool {
        self.verification_checked
    }

    pub fn set_verification_checked(&mut self, checked: bool) -> PlatformResult<()> {
        self.verify_write_access("verification_checked")?;
        self.verification_checked = checked;
        Ok(())
    }

    pub fn expanded_control_text(&self) -> Option<&str> {
        self.expanded_control_text.as_deref()
    }

    /// Label of the expando button while the expanded information is shown.
    pub fn set_expanded_control_text(&mut self, text: impl Into<String>) -> PlatformResult<()> {
        self.verify_write_access("expanded_control_text")?;
        self.expanded_control_text = Some(text.into());
        Ok(())
    }

    pub fn collapsed_control_text(&self) -> Option<&str> {
        self.collapsed_control_text.as_deref()
    }

    pub fn set_collapsed_control_text(&mut self, text: impl Into<String>) -> PlatformResult<()> {
        self.verify_write_access("collapsed_control_text")?;
        self.collapsed_control_text = Some(text.into());
        Ok(())
    }

    pub fn common_buttons(&self) -> CommonButtons {
        self.common_buttons
    }

    pub fn set_common_buttons(&mut self, buttons: CommonButtons) -> PlatformResult<()> {
        self.verify_write_access("common_buttons")?;
        self.common_buttons = buttons;
        Ok(())
    }

    pub fn default_button(&self) -> i32 {
        self.default_button
    }

    /*
     * The default button is either the index of a custom button or the id of a
     * common button (`CommonButton::id`). Negative values are rejected before
     * the lifecycle gate is consulted.
     */
    pub fn set_default_button(&mut self, button: i32) -> PlatformResult<()> {
        if button < 0 {
            return Err(PlatformError::OutOfRange {
                property: "default_button",
                value: button,
                minimum: 0,
            });
        }
        self.verify_write_access("default_button")?;
        self.default_button = button;
        Ok(())
    }

    pub fn default_radio_button(&self) -> i32 {
        self.default_radio_button
    }

    /// Index of the initially selected radio button; -1 selects none.
    pub fn set_default_radio_button(&mut self, radio_button: i32) -> PlatformResult<()> {
        if radio_button < -1 {
            return Err(PlatformError::OutOfRange {
                property: "default_radio_button",
                value: radio_button,
                minimum: -1,
            });
        }
        self.verify_write_access("default_radio_button")?;
        self.default_radio_button = radio_button;
        Ok(())
    }

    pub fn default_icon(&self) -> DialogIcon {
        self.default_icon
    }

    pub fn set_default_icon(&mut self, icon: DialogIcon) -> PlatformResult<()> {
        self.verify_write_access("default_icon")?;
        self.default_icon = icon;
        Ok(())
    }

    pub fn use_default_icon(&self) -> bool {
        self.use_default_icon
    }

    /// Chooses between the predefined main icon and the custom one set with `set_icon`.
    pub fn set_use_default_icon(&mut self, use_default: bool) -> PlatformResult<()> {
        self.verify_write_access("use_default_icon")?;
        self.use_default_icon = use_default;
        Ok(())
    }

    pub fn footer_default_icon(&self) -> DialogIcon {
        self.footer_default_icon
    }

    pub fn set_footer_default_icon(&mut self, icon: DialogIcon) -> PlatformResult<()> {
        self.verify_write_access("footer_default_icon")?;
        self.footer_default_icon = icon;
        Ok(())
    }

    pub fn button_style(&self) -> ButtonStyle {
        self.button_style
    }

    pub fn set_button_style(&mut self, style: ButtonStyle) -> PlatformResult<()> {
        self.verify_write_access("button_style")?;
        self.button_style = style;
        Ok(())
    }

    pub fn default_state(&self) -> ExpansionState {
        self.default_state
    }

    pub fn set_default_state(&mut self, state: ExpansionState) -> PlatformResult<()> {
        self.verify_write_access("default_state")?;
        self.default_state = state;
        Ok(())
    }

    /// Current state of the expanded-information area.
    pub fn expansion_state(&self) -> ExpansionState {
        self.expansion_state
    }

    pub fn allow_cancellation(&self) -> bool {
        self.allow_cancellation
    }

    /// Lets Alt-F4, Escape and the title bar close button dismiss the dialog.
    pub fn set_allow_cancellation(&mut self, allow: bool) -> PlatformResult<()> {
        self.verify_write_access("allow_cancellation")?;
        self.allow_cancellation = allow;
        Ok(())
    }

    pub fn can_minimize(&self) -> bool {
        self.can_minimize
    }

    pub fn set_can_minimize(&mut self, can_minimize: bool) -> PlatformResult<()> {
        self.verify_write_access("can_minimize")?;
        self.can_minimize = can_minimize;
        Ok(())
    }

    pub fn enable_hyperlinks(&self) -> bool {
        self.enable_hyperlinks
    }

    pub fn set_enable_hyperlinks(&mut self, enable: bool) -> PlatformResult<()> {
        self.verify_write_access("enable_hyperlinks")?;
        self.enable_hyperlinks = enable;
        Ok(())
    }

    pub fn enable_timer(&self) -> bool {
        self.enable_timer
    }

    /// Raises timer handlers roughly every 200 ms while the dialog is shown.
    pub fn set_enable_timer(&mut self, enable: bool) -> PlatformResult<()> {
        self.verify_write_access("enable_timer")?;
        self.enable_timer = enable;
        Ok(())
    }

    pub fn expand_footer(&self) -> bool {
        self.expand_footer
    }

    /// Shows the expanded information below the footer instead of below the content.
    pub fn set_expand_footer(&mut self, expand_footer: bool) -> PlatformResult<()> {
        self.verify_write_access("expand_footer")?;
        self.expand_footer = expand_footer;
        Ok(())
    }

    pub fn size_to_content(&self) -> bool {
        self.size_to_content
    }

    pub fn set_size_to_content(&mut self, size_to_content: bool) -> PlatformResult<()> {
        self.verify_write_access("size_to_content")?;
        self.size_to_content = size_to_content;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Client width in dialog units; 0 lets the dialog choose.
    pub fn set_width(&mut self, width: u32) -> PlatformResult<()> {
        self.verify_write_access("width")?;
        self.width = width;
        Ok(())
    }

    pub fn owner(&self) -> Option<OwnerWindow> {
        self.owner
    }

    pub fn set_owner(&mut self, owner: Option<OwnerWindow>) -> PlatformResult<()> {
        self.verify_write_access("owner")?;
        self.owner = owner;
        Ok(())
    }

    pub fn progress_bar(&self) -> Option<&ProgressBar> {
        self.progress_bar.as_ref()
    }

    /// Adds or removes the progress bar. Its values stay editable through `update_progress_bar`.
    pub fn set_progress_bar(&mut self, progress_bar: Option<ProgressBar>) -> PlatformResult<()> {
        self.verify_write_access("progress_bar")?;
        self.progress_bar = progress_bar;
        Ok(())
    }

    pub fn buttons(&self) -> &ElementCollection<Button> {
        &self.buttons
    }

    /// Appends a custom button and returns its id.
    pub fn add_button(&mut self, button: Button) -> PlatformResult<i32> {
        self.verify_write_access("buttons")?;
        Ok(self.buttons.push(button))
    }

    pub fn radio_buttons(&self) -> &ElementCollection<RadioButton> {
        &self.radio_buttons
    }

    pub fn add_radio_button(&mut self, radio_button: RadioButton) -> PlatformResult<i32> {
        self.verify_write_access("radio_buttons")?;
        Ok(self.radio_buttons.push(radio_button))
    }

    // --- Live properties ---

    pub fn instruction(&self) -> Option<&DialogText> {
        self.instruction.as_ref()
    }

    pub fn set_instruction(&mut self, instruction: impl Into<DialogText>) {
        let instruction = instruction.into();
        let rendered = instruction.render(false);
        self.instruction = Some(instruction);
        self.send_if_activated(DialogCommand::SetElementText {
            element: TextElement::MainInstruction,
            text: rendered,
        });
    }

    pub fn content(&self) -> Option<&DialogText> {
        self.content.as_ref()
    }

    pub fn set_content(&mut self, content: impl Into<DialogText>) {
        let content = content.into();
        let rendered = content.render(self.enable_hyperlinks);
        self.content = Some(content);
        self.send_if_activated(DialogCommand::SetElementText {
            element: TextElement::Content,
            text: rendered,
        });
    }

    pub fn footer(&self) -> Option<&DialogText> {
        self.footer.as_ref()
    }

    pub fn set_footer(&mut self, footer: impl Into<DialogText>) {
        let footer = footer.into();
        let rendered = footer.render(self.enable_hyperlinks);
        self.footer = Some(footer);
        self.send_if_activated(DialogCommand::SetElementText {
            element: TextElement::Footer,
            text: rendered,
        });
    }

    pub fn expanded_information(&self) -> Option<&DialogText> {
        self.expanded_information.as_ref()
    }

    pub fn set_expanded_information(&mut self, information: impl Into<DialogText>) {
        let information = information.into();
        let rendered = information.render(self.enable_hyperlinks);
        self.expanded_information = Some(information);
        self.send_if_activated(DialogCommand::SetElementText {
            element: TextElement::ExpandedInformation,
            text: rendered,
        });
    }

    pub fn icon(&self) -> Option<&IconImage> {
        self.icon.as_ref()
    }

    /*
     * Custom main icon. It is only drawn when `use_default_icon` is off, so a
     * live update is forwarded only in that case.
     */
    pub fn set_icon(&mut self, icon: Option<IconImage>) {
        self.icon = icon.clone();
        if !self.use_default_icon {
            self.send_if_activated(DialogCommand::UpdateIcon {
                element: IconElement::Main,
                image: icon,
            });
        }
    }

    pub fn footer_icon(&self) -> Option<&IconImage> {
        self.footer_icon.as_ref()
    }

    /*
     * Custom footer icon. A dialog constructed with a predefined footer icon
     * expects resource ids in its footer slot, so live updates are only
     * forwarded when it was constructed with an icon handle there.
     */
    pub fn set_footer_icon(&mut self, icon: Option<IconImage>) {
        self.footer_icon = icon.clone();
        if self.footer_icon_is_handle {
            self.send_if_activated(DialogCommand::UpdateIcon {
                element: IconElement::Footer,
                image: icon,
            });
        }
    }

    /// True when the current configuration puts an `HICON` in the footer slot.
    pub(crate) fn footer_uses_icon_handle(&self) -> bool {
        self.footer_icon.is_some() || self.footer_default_icon == DialogIcon::None
    }

    /// Edits a custom button in place; enabled and elevation changes reach the live dialog.
    pub fn update_button(
        &mut self,
        id: i32,
        update: impl FnOnce(&mut Button),
    ) -> PlatformResult<()> {
        let button = self.buttons.get_mut(id).ok_or_else(|| {
            PlatformError::InvalidHandle(format!("Button with ID {id} not found"))
        })?;
        let before = (button.enabled, button.elevation_required);
        update(button);
        let after = (button.enabled, button.elevation_required);

        if before.0 != after.0 {
            self.send_if_activated(DialogCommand::EnableButton {
                id,
                enabled: after.0,
            });
        }
        if before.1 != after.1 {
            self.send_if_activated(DialogCommand::SetButtonElevationRequired {
                id,
                required: after.1,
            });
        }
        Ok(())
    }

    pub fn update_radio_button(
        &mut self,
        id: i32,
        update: impl FnOnce(&mut RadioButton),
    ) -> PlatformResult<()> {
        let radio_button = self.radio_buttons.get_mut(id).ok_or_else(|| {
            PlatformError::InvalidHandle(format!("Radio button with ID {id} not found"))
        })?;
        let was_enabled = radio_button.enabled;
        update(radio_button);
        let enabled = radio_button.enabled;

        if was_enabled != enabled {
            self.send_if_activated(DialogCommand::EnableRadioButton { id, enabled });
        }
        Ok(())
    }

    pub fn update_progress_bar(
        &mut self,
        update: impl FnOnce(&mut ProgressBar),
    ) -> PlatformResult<()> {
        let progress_bar = self.progress_bar.as_mut().ok_or_else(|| {
            PlatformError::InvalidState("dialog has no progress bar".to_string())
        })?;
        let previous = progress_bar.clone();
        update(progress_bar);
        let commands = progress_bar.diff_commands(&previous);

        for command in commands {
            self.send_if_activated(command);
        }
        Ok(())
    }

    // --- Events ---

    /// Subscribes a handler; several handlers per event run in subscription order.
    pub fn on(&mut self, event: DialogEvent, handler: impl FnMut(&mut TaskDialog) + 'static) {
        self.handlers.slot(event).push(Box::new(handler));
    }

    pub fn on_timer(&mut self, handler: impl FnMut(&mut TaskDialog, &mut TimerTick) + 'static) {
        self.handlers.timer.push(Box::new(handler));
    }

    /*
     * Handlers are moved out while they run so they can borrow the dialog
     * mutably. Handlers subscribed during the call are appended afterwards.
     */
    pub(crate) fn raise(&mut self, event: DialogEvent) {
        let mut handlers = std::mem::take(self.handlers.slot(event));
        for handler in handlers.iter_mut() {
            handler(self);
        }
        let added = std::mem::replace(self.handlers.slot(event), handlers);
        self.handlers.slot(event).extend(added);
    }

    pub(crate) fn raise_timer(&mut self, tick: &mut TimerTick) {
        let mut handlers = std::mem::take(&mut self.handlers.timer);
        for handler in handlers.iter_mut() {
            handler(self, tick);
        }
        let added = std::mem::replace(&mut self.handlers.timer, handlers);
        self.handlers.timer.extend(added);
    }
}
