/*
 * Progress bar messages for a live task dialog. The bar only exists when the
 * dialog was created with `TDF_SHOW_PROGRESS_BAR` or
 * `TDF_SHOW_MARQUEE_PROGRESS_BAR`; messages sent to a dialog without one are
 * ignored by the native side.
 */
use crate::native::{
    TDM_SET_MARQUEE_PROGRESS_BAR, TDM_SET_PROGRESS_BAR_MARQUEE, TDM_SET_PROGRESS_BAR_POS,
    TDM_SET_PROGRESS_BAR_RANGE, TDM_SET_PROGRESS_BAR_STATE, pack_progress_range,
};
use crate::types::ProgressBarState;

use windows::Win32::{
    Foundation::{HWND, LPARAM, WPARAM},
    UI::WindowsAndMessaging::SendMessageW,
};

/// Range is packed as two 16-bit words, so only `i16` bounds are representable.
pub(crate) fn handle_set_progress_bar_range(hwnd: HWND, min: i16, max: i16) {
    log::debug!("ProgressHandler: Setting range {min}..={max}");
    unsafe {
        SendMessageW(
            hwnd,
            TDM_SET_PROGRESS_BAR_RANGE,
            Some(WPARAM(0)),
            Some(LPARAM(pack_progress_range(min, max))),
        );
    }
}

pub(crate) fn handle_set_progress_bar_position(hwnd: HWND, position: i32) {
    log::debug!("ProgressHandler: Setting position {position}");
    unsafe {
        SendMessageW(
            hwnd,
            TDM_SET_PROGRESS_BAR_POS,
            Some(WPARAM(position as usize)),
            Some(LPARAM(0)),
        );
    }
}

pub(crate) fn handle_set_progress_bar_state(hwnd: HWND, state: ProgressBarState) {
    log::debug!("ProgressHandler: Setting state {state:?}");
    unsafe {
        SendMessageW(
            hwnd,
            TDM_SET_PROGRESS_BAR_STATE,
            Some(WPARAM(state.native_value())),
            Some(LPARAM(0)),
        );
    }
}

pub(crate) fn handle_set_marquee_mode(hwnd: HWND, marquee: bool) {
    log::debug!("ProgressHandler: Setting marquee mode={marquee}");
    unsafe {
        SendMessageW(
            hwnd,
            TDM_SET_MARQUEE_PROGRESS_BAR,
            Some(WPARAM(marquee as usize)),
            Some(LPARAM(0)),
        );
    }
}

/*
 * Starts or stops the marquee animation. `interval` is the time in
 * milliseconds between animation updates; zero picks the native default.
 */
pub(crate) fn handle_set_marquee_animation(hwnd: HWND, running: bool, interval: u32) {
    log::debug!("ProgressHandler: Setting marquee running={running}, interval={interval}ms");
    unsafe {
        SendMessageW(
            hwnd,
            TDM_SET_PROGRESS_BAR_MARQUEE,
            Some(WPARAM(running as usize)),
            Some(LPARAM(interval as isize)),
        );
    }
}
