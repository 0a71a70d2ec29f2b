/*
 * Platform-agnostic value types used across the crate: common button flags,
 * standard icons, styles and states, the dialog result triple, timer event data,
 * owner window references and the bitmap payload used for custom icons.
 */
use crate::error::{PlatformError, Result as PlatformResult};
use crate::native;

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Set of predefined buttons supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CommonButtons(u32);

impl CommonButtons {
    pub const NONE: Self = Self(0);
    pub const OK: Self = Self(native::TDCBF_OK_BUTTON);
    pub const YES: Self = Self(native::TDCBF_YES_BUTTON);
    pub const NO: Self = Self(native::TDCBF_NO_BUTTON);
    pub const CANCEL: Self = Self(native::TDCBF_CANCEL_BUTTON);
    pub const RETRY: Self = Self(native::TDCBF_RETRY_BUTTON);
    pub const CLOSE: Self = Self(native::TDCBF_CLOSE_BUTTON);

    pub const OK_CANCEL: Self = Self(Self::OK.0 | Self::CANCEL.0);
    pub const YES_NO: Self = Self(Self::YES.0 | Self::NO.0);
    pub const YES_NO_CANCEL: Self = Self(Self::YES_NO.0 | Self::CANCEL.0);
    pub const RETRY_CANCEL: Self = Self(Self::RETRY.0 | Self::CANCEL.0);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for CommonButtons {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CommonButtons {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Identifier reported in `DialogResult::selected_button` for a common button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommonButton {
    Ok,
    Cancel,
    Retry,
    Yes,
    No,
    Close,
}

impl CommonButton {
    pub fn id(self) -> i32 {
        match self {
            CommonButton::Ok => native::IDOK,
            CommonButton::Cancel => native::IDCANCEL,
            CommonButton::Retry => native::IDRETRY,
            CommonButton::Yes => native::IDYES,
            CommonButton::No => native::IDNO,
            CommonButton::Close => native::IDCLOSE,
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            native::IDOK => Some(CommonButton::Ok),
            native::IDCANCEL => Some(CommonButton::Cancel),
            native::IDRETRY => Some(CommonButton::Retry),
            native::IDYES => Some(CommonButton::Yes),
            native::IDNO => Some(CommonButton::No),
            native::IDCLOSE => Some(CommonButton::Close),
            _ => None,
        }
    }
}

/// Predefined icons the native dialog can draw without an `HICON`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DialogIcon {
    #[default]
    None,
    Warning,
    Error,
    Information,
    Shield,
}

impl DialogIcon {
    pub(crate) fn resource_id(self) -> u16 {
        match self {
            DialogIcon::None => 0,
            DialogIcon::Warning => native::TD_WARNING_ICON,
            DialogIcon::Error => native::TD_ERROR_ICON,
            DialogIcon::Information => native::TD_INFORMATION_ICON,
            DialogIcon::Shield => native::TD_SHIELD_ICON,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonStyle {
    #[default]
    Normal,
    CommandLinks,
    CommandLinksNoIcon,
}

impl ButtonStyle {
    pub fn is_command_link(self) -> bool {
        self != ButtonStyle::Normal
    }
}

/// Whether the expanded-information area is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExpansionState {
    #[default]
    Collapsed,
    Expanded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProgressBarStyle {
    #[default]
    Normal,
    Marquee,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProgressBarState {
    #[default]
    Normal,
    Error,
    Paused,
}

impl ProgressBarState {
    pub fn native_value(self) -> usize {
        match self {
            ProgressBarState::Normal => native::PBST_NORMAL,
            ProgressBarState::Error => native::PBST_ERROR,
            ProgressBarState::Paused => native::PBST_PAUSED,
        }
    }
}

/// Text elements that can be replaced while the dialog is shown (`TDE_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextElement {
    Content,
    ExpandedInformation,
    Footer,
    MainInstruction,
}

impl TextElement {
    pub fn native_value(self) -> usize {
        match self {
            TextElement::Content => 0,
            TextElement::ExpandedInformation => 1,
            TextElement::Footer => 2,
            TextElement::MainInstruction => 3,
        }
    }
}

/// Icon slots that can be replaced while the dialog is shown (`TDIE_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconElement {
    Main,
    Footer,
}

impl IconElement {
    pub fn native_value(self) -> usize {
        match self {
            IconElement::Main => 0,
            IconElement::Footer => 1,
        }
    }
}

/// Outcome of a successful `show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DialogResult {
    selected_button: i32,
    selected_radio_button: i32,
    verification_checked: bool,
}

impl DialogResult {
    pub(crate) fn new(
        selected_button: i32,
        selected_radio_button: i32,
        verification_checked: bool,
    ) -> Self {
        Self {
            selected_button,
            selected_radio_button,
            verification_checked,
        }
    }

    pub fn selected_button(&self) -> i32 {
        self.selected_button
    }

    pub fn selected_radio_button(&self) -> i32 {
        self.selected_radio_button
    }

    pub fn verification_checked(&self) -> bool {
        self.verification_checked
    }

    /// The common button that closed the dialog, if the id names one.
    pub fn common_button(&self) -> Option<CommonButton> {
        CommonButton::from_id(self.selected_button)
    }
}

impl fmt::Display for DialogResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DialogResult {{ selected_button = {}, selected_radio_button = {}, verification_checked = {} }}",
            self.selected_button, self.selected_radio_button, self.verification_checked
        )
    }
}

/// Payload of a timer notification. Handlers may ask for the tick counter to restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTick {
    tick_count: u32,
    reset: bool,
}

impl TimerTick {
    pub(crate) fn new(tick_count: u32) -> Self {
        Self {
            tick_count,
            reset: false,
        }
    }

    /// Milliseconds since the dialog was created or the counter was last reset.
    pub fn tick_count(&self) -> u32 {
        self.tick_count
    }

    pub fn request_reset(&mut self) {
        self.reset = true;
    }

    pub fn reset_requested(&self) -> bool {
        self.reset
    }
}

/// Raw native handle of the window that owns a modal dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnerWindow(isize);

impl OwnerWindow {
    pub fn from_raw(raw: isize) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> isize {
        self.0
    }

    /// A zero handle means the owner has not been created yet or is already closed.
    pub fn is_realized(&self) -> bool {
        self.0 != 0
    }
}

#[cfg(target_os = "windows")]
impl From<windows::Win32::Foundation::HWND> for OwnerWindow {
    fn from(hwnd: windows::Win32::Foundation::HWND) -> Self {
        Self(hwnd.0 as isize)
    }
}

/// Version triple reported by the Common Controls library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ControlsVersion {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
}

/*
 * 32-bit premultiplied BGRA pixels in top-down row order. This is the layout of
 * a 32bpp top-down DIB section, so the Win32 icon handler copies the buffer
 * verbatim.
 */
#[derive(Clone, PartialEq, Eq)]
pub struct IconImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl IconImage {
    pub fn from_bgra(width: u32, height: u32, pixels: Vec<u8>) -> PlatformResult<Self> {
        let expected = expected_len(width, height)?;
        if pixels.len() != expected {
            return Err(PlatformError::OperationFailed(format!(
                "Icon pixel buffer has {} bytes, expected {expected} for {width}x{height}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Converts straight (non-premultiplied) RGBA pixels into the stored layout.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> PlatformResult<Self> {
        let expected = expected_len(width, height)?;
        if rgba.len() != expected {
            return Err(PlatformError::OperationFailed(format!(
                "Icon RGBA buffer has {} bytes, expected {expected} for {width}x{height}",
                rgba.len()
            )));
        }
        let mut pixels = Vec::with_capacity(expected);
        for px in rgba.chunks_exact(4) {
            let alpha = px[3] as u32;
            let premultiply = |channel: u8| ((channel as u32 * alpha + 127) / 255) as u8;
            pixels.extend_from_slice(&[
                premultiply(px[2]),
                premultiply(px[1]),
                premultiply(px[0]),
                px[3],
            ]);
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl fmt::Debug for IconImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IconImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

fn expected_len(width: u32, height: u32) -> PlatformResult<usize> {
    if width == 0 || height == 0 {
        return Err(PlatformError::OperationFailed(format!(
            "Icon dimensions must be non-zero, got {width}x{height}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(|| {
            PlatformError::OperationFailed(format!("Icon dimensions {width}x{height} overflow"))
        })
}
