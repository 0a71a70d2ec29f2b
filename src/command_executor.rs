/*
 * Executes `DialogCommand`s against a live native task dialog. The backend
 * creates one `Win32CommandSink` per shown dialog, bound to the dialog's HWND
 * as reported by `TDN_DIALOG_CONSTRUCTED`, and hands it to the `TaskDialog`.
 * Element-specific messages are delegated to the handlers in
 * `crate::controls`.
 */
use crate::controls::icon_handler::{self, IconHandle};
use crate::controls::{button_handler, progress_handler, radiobutton_handler};
use crate::lifecycle::{CommandSink, DialogCommand};
use crate::native::TDM_SET_ELEMENT_TEXT;
use crate::types::{IconElement, IconImage, TextElement};

use windows::{
    Win32::{
        Foundation::{HWND, LPARAM, WPARAM},
        UI::WindowsAndMessaging::SendMessageW,
    },
    core::HSTRING,
};

pub(crate) struct Win32CommandSink {
    hwnd: HWND,
    // Icons set through TDM_UPDATE_ICON; each replaces (and frees) the previous one.
    main_icon: IconHandle,
    footer_icon: IconHandle,
}

impl Win32CommandSink {
    pub(crate) fn new(hwnd: HWND) -> Self {
        Self {
            hwnd,
            main_icon: IconHandle::invalid(),
            footer_icon: IconHandle::invalid(),
        }
    }

    /*
     * Sends the new icon before the old handle is dropped, so the dialog never
     * points at a destroyed icon.
     */
    fn execute_update_icon(&mut self, element: IconElement, image: Option<IconImage>) {
        let icon = image
            .as_ref()
            .map(IconHandle::create)
            .unwrap_or_else(IconHandle::invalid);
        icon_handler::handle_update_icon(self.hwnd, element, &icon);
        match element {
            IconElement::Main => self.main_icon = icon,
            IconElement::Footer => self.footer_icon = icon,
        }
    }
}

/// The dialog copies the text before the message returns.
fn execute_set_element_text(hwnd: HWND, element: TextElement, text: &str) {
    log::debug!("CommandExecutor: Setting {element:?} text ({} chars)", text.len());
    let text = HSTRING::from(text);
    unsafe {
        SendMessageW(
            hwnd,
            TDM_SET_ELEMENT_TEXT,
            Some(WPARAM(element.native_value())),
            Some(LPARAM(text.as_ptr() as isize)),
        );
    }
}

impl CommandSink for Win32CommandSink {
    fn execute(&mut self, command: DialogCommand) {
        let hwnd = self.hwnd;
        match command {
            DialogCommand::EnableButton { id, enabled } => {
                button_handler::handle_enable_button(hwnd, id, enabled)
            }
            DialogCommand::SetButtonElevationRequired { id, required } => {
                button_handler::handle_set_elevation_required(hwnd, id, required)
            }
            DialogCommand::EnableRadioButton { id, enabled } => {
                radiobutton_handler::handle_enable_radio_button(hwnd, id, enabled)
            }
            DialogCommand::SetElementText { element, text } => {
                execute_set_element_text(hwnd, element, &text)
            }
            DialogCommand::UpdateIcon { element, image } => {
                self.execute_update_icon(element, image)
            }
            DialogCommand::SetProgressBarRange { min, max } => {
                progress_handler::handle_set_progress_bar_range(hwnd, min, max)
            }
            DialogCommand::SetProgressBarPosition(position) => {
                progress_handler::handle_set_progress_bar_position(hwnd, position)
            }
            DialogCommand::SetProgressBarState(state) => {
                progress_handler::handle_set_progress_bar_state(hwnd, state)
            }
            DialogCommand::SetMarqueeProgressBar(marquee) => {
                progress_handler::handle_set_marquee_mode(hwnd, marquee)
            }
            DialogCommand::SetProgressBarMarquee { running, interval } => {
                progress_handler::handle_set_marquee_animation(hwnd, running, interval)
            }
        }
    }
}
