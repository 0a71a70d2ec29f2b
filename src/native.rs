/*
 * Platform-agnostic mirror of the Task Dialog native surface: flag words,
 * notification and message codes, HRESULT values, and the plain-data request
 * and outcome records that a backend marshals into and out of
 * `TASKDIALOGCONFIG`. Keeping the numeric values here (instead of pulling them
 * from the `windows` crate) lets the request builder and notification decoding
 * compile and be tested on every host.
 */
use crate::types::{IconImage, OwnerWindow};

// HRESULT values used by the callback protocol.
pub const S_OK: i32 = 0;
pub const S_FALSE: i32 = 1;

// Dialog box command ids reported for common buttons.
pub const IDOK: i32 = 1;
pub const IDCANCEL: i32 = 2;
pub const IDRETRY: i32 = 4;
pub const IDYES: i32 = 6;
pub const IDNO: i32 = 7;
pub const IDCLOSE: i32 = 8;

// TASKDIALOG_FLAGS
pub const TDF_ENABLE_HYPERLINKS: u32 = 0x0000_0001;
pub const TDF_USE_HICON_MAIN: u32 = 0x0000_0002;
pub const TDF_USE_HICON_FOOTER: u32 = 0x0000_0004;
pub const TDF_ALLOW_DIALOG_CANCELLATION: u32 = 0x0000_0008;
pub const TDF_USE_COMMAND_LINKS: u32 = 0x0000_0010;
pub const TDF_USE_COMMAND_LINKS_NO_ICON: u32 = 0x0000_0020;
pub const TDF_EXPAND_FOOTER_AREA: u32 = 0x0000_0040;
pub const TDF_EXPANDED_BY_DEFAULT: u32 = 0x0000_0080;
pub const TDF_VERIFICATION_FLAG_CHECKED: u32 = 0x0000_0100;
pub const TDF_SHOW_PROGRESS_BAR: u32 = 0x0000_0200;
pub const TDF_SHOW_MARQUEE_PROGRESS_BAR: u32 = 0x0000_0400;
pub const TDF_CALLBACK_TIMER: u32 = 0x0000_0800;
pub const TDF_NO_DEFAULT_RADIO_BUTTON: u32 = 0x0000_4000;
pub const TDF_CAN_BE_MINIMIZED: u32 = 0x0000_8000;
pub const TDF_SIZE_TO_CONTENT: u32 = 0x0100_0000;

// TASKDIALOG_COMMON_BUTTON_FLAGS
pub const TDCBF_OK_BUTTON: u32 = 0x0001;
pub const TDCBF_YES_BUTTON: u32 = 0x0002;
pub const TDCBF_NO_BUTTON: u32 = 0x0004;
pub const TDCBF_CANCEL_BUTTON: u32 = 0x0008;
pub const TDCBF_RETRY_BUTTON: u32 = 0x0010;
pub const TDCBF_CLOSE_BUTTON: u32 = 0x0020;

// Predefined icon resource ids (MAKEINTRESOURCE values).
pub const TD_WARNING_ICON: u16 = 0xFFFF;
pub const TD_ERROR_ICON: u16 = 0xFFFE;
pub const TD_INFORMATION_ICON: u16 = 0xFFFD;
pub const TD_SHIELD_ICON: u16 = 0xFFFC;

// Progress bar states (PBST_*).
pub const PBST_NORMAL: usize = 0x0001;
pub const PBST_ERROR: usize = 0x0002;
pub const PBST_PAUSED: usize = 0x0003;

const WM_USER: u32 = 0x0400;

// TASKDIALOG_MESSAGES sent to the live dialog window.
pub const TDM_SET_MARQUEE_PROGRESS_BAR: u32 = WM_USER + 103;
pub const TDM_SET_PROGRESS_BAR_STATE: u32 = WM_USER + 104;
pub const TDM_SET_PROGRESS_BAR_RANGE: u32 = WM_USER + 105;
pub const TDM_SET_PROGRESS_BAR_POS: u32 = WM_USER + 106;
pub const TDM_SET_PROGRESS_BAR_MARQUEE: u32 = WM_USER + 107;
pub const TDM_SET_ELEMENT_TEXT: u32 = WM_USER + 108;
pub const TDM_ENABLE_BUTTON: u32 = WM_USER + 111;
pub const TDM_ENABLE_RADIO_BUTTON: u32 = WM_USER + 112;
pub const TDM_SET_BUTTON_ELEVATION_REQUIRED_STATE: u32 = WM_USER + 115;
pub const TDM_UPDATE_ICON: u32 = WM_USER + 116;

// TASKDIALOG_NOTIFICATIONS
pub const TDN_CREATED: u32 = 0;
pub const TDN_NAVIGATED: u32 = 1;
pub const TDN_BUTTON_CLICKED: u32 = 2;
pub const TDN_HYPERLINK_CLICKED: u32 = 3;
pub const TDN_TIMER: u32 = 4;
pub const TDN_DESTROYED: u32 = 5;
pub const TDN_RADIO_BUTTON_CLICKED: u32 = 6;
pub const TDN_DIALOG_CONSTRUCTED: u32 = 7;
pub const TDN_VERIFICATION_CLICKED: u32 = 8;
pub const TDN_HELP: u32 = 9;
pub const TDN_EXPANDO_BUTTON_CLICKED: u32 = 10;

/// A decoded callback notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    DialogConstructed,
    Created,
    Destroyed,
    Navigated,
    ButtonClicked(i32),
    RadioButtonClicked(i32),
    HyperlinkClicked(String),
    Timer(u32),
    VerificationClicked(bool),
    ExpandoButtonClicked(bool),
    Help,
    Unknown(u32),
}

impl Notification {
    /*
     * Decodes the raw `(uNotification, wParam)` pair. The hyperlink target lives
     * behind `lParam` as a wide string, so the backend reads it and passes it in;
     * a missing target decodes to an empty string.
     */
    pub fn decode(code: u32, wparam: usize, link_target: Option<String>) -> Self {
        match code {
            TDN_DIALOG_CONSTRUCTED => Notification::DialogConstructed,
            TDN_CREATED => Notification::Created,
            TDN_DESTROYED => Notification::Destroyed,
            TDN_NAVIGATED => Notification::Navigated,
            TDN_BUTTON_CLICKED => Notification::ButtonClicked(wparam as i32),
            TDN_RADIO_BUTTON_CLICKED => Notification::RadioButtonClicked(wparam as i32),
            TDN_HYPERLINK_CLICKED => {
                Notification::HyperlinkClicked(link_target.unwrap_or_default())
            }
            TDN_TIMER => Notification::Timer(wparam as u32),
            TDN_VERIFICATION_CLICKED => Notification::VerificationClicked(wparam != 0),
            TDN_HELP => Notification::Help,
            TDN_EXPANDO_BUTTON_CLICKED => Notification::ExpandoButtonClicked(wparam != 0),
            other => Notification::Unknown(other),
        }
    }
}

/// What the callback tells the native layer after handling a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackReply {
    Continue,
    /// Keeps the dialog open after a button click.
    KeepOpen,
    /// Resets the tick counter reported by timer notifications.
    ResetTimer,
}

impl CallbackReply {
    /*
     * Both control signals are `S_FALSE`. The platform documentation suggests
     * `E_FAIL` for keeping the dialog open, but returning a failure code makes
     * `TaskDialogIndirect` itself fail.
     */
    pub fn status_code(self) -> i32 {
        match self {
            CallbackReply::Continue => S_OK,
            CallbackReply::KeepOpen | CallbackReply::ResetTimer => S_FALSE,
        }
    }
}

/// Native id and display text of one custom button or radio button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonEntry {
    pub id: i32,
    pub text: String,
}

/// Icon source for the main or footer icon slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IconRequest {
    #[default]
    None,
    /// A predefined icon resource id (`TD_*_ICON`).
    Standard(u16),
    /// A custom bitmap converted to an `HICON` by the backend.
    Custom(IconImage),
}

/// Everything a backend needs to fill a `TASKDIALOGCONFIG`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DialogRequest {
    pub flags: u32,
    pub common_buttons: u32,
    pub owner: Option<OwnerWindow>,
    pub title: Option<String>,
    pub instruction: Option<String>,
    pub content: Option<String>,
    pub expanded_information: Option<String>,
    pub expanded_control_text: Option<String>,
    pub collapsed_control_text: Option<String>,
    pub footer: Option<String>,
    pub verification_text: Option<String>,
    pub main_icon: IconRequest,
    pub footer_icon: IconRequest,
    pub buttons: Vec<ButtonEntry>,
    pub radio_buttons: Vec<ButtonEntry>,
    pub default_button: i32,
    pub default_radio_button: i32,
    pub width: u32,
}

impl DialogRequest {
    pub fn has_flag(&self, flag: u32) -> bool {
        self.flags & flag == flag
    }
}

/// Raw result of the blocking native call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeOutcome {
    pub status: i32,
    pub selected_button: i32,
    pub selected_radio_button: i32,
    pub verification_checked: bool,
}

/*
 * Packs a progress range into the `lParam` of `TDM_SET_PROGRESS_BAR_RANGE`:
 * minimum in the low word, maximum in the high word.
 */
pub fn pack_progress_range(minimum: i16, maximum: i16) -> isize {
    let packed = ((maximum as u16 as u32) << 16) | (minimum as u16 as u32);
    packed as i32 as isize
}
