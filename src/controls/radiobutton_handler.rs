/*
 * Radio buttons of a live task dialog. Selection is owned by the native dialog
 * and reported back through `TDN_RADIO_BUTTON_CLICKED`, so the only message we
 * send is the enabled state.
 */
use crate::native::TDM_ENABLE_RADIO_BUTTON;

use windows::Win32::{
    Foundation::{HWND, LPARAM, WPARAM},
    UI::WindowsAndMessaging::SendMessageW,
};

pub(crate) fn handle_enable_radio_button(hwnd: HWND, id: i32, enabled: bool) {
    log::debug!("RadioButtonHandler: Setting radio button {id} enabled={enabled}");
    unsafe {
        SendMessageW(
            hwnd,
            TDM_ENABLE_RADIO_BUTTON,
            Some(WPARAM(id as usize)),
            Some(LPARAM(enabled as isize)),
        );
    }
}
