/*
 * Encapsulates the messages that change a custom button of a live task dialog.
 * Buttons are addressed by the id they were given in the `TASKDIALOG_BUTTON`
 * array, which is their index in the dialog's button collection.
 */
use crate::native::{TDM_ENABLE_BUTTON, TDM_SET_BUTTON_ELEVATION_REQUIRED_STATE};

use windows::Win32::{
    Foundation::{HWND, LPARAM, WPARAM},
    UI::WindowsAndMessaging::SendMessageW,
};

pub(crate) fn handle_enable_button(hwnd: HWND, id: i32, enabled: bool) {
    log::debug!("ButtonHandler: Setting button {id} enabled={enabled}");
    unsafe {
        SendMessageW(
            hwnd,
            TDM_ENABLE_BUTTON,
            Some(WPARAM(id as usize)),
            Some(LPARAM(enabled as isize)),
        );
    }
}

/*
 * Shows or hides the UAC shield next to the button text. The dialog only
 * draws the shield; elevating is up to the click handler.
 */
pub(crate) fn handle_set_elevation_required(hwnd: HWND, id: i32, required: bool) {
    log::debug!("ButtonHandler: Setting button {id} elevation required={required}");
    unsafe {
        SendMessageW(
            hwnd,
            TDM_SET_BUTTON_ELEVATION_REQUIRED_STATE,
            Some(WPARAM(id as usize)),
            Some(LPARAM(required as isize)),
        );
    }
}
