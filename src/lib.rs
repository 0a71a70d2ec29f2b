/*
 * Public entry point of the `taskdialog` crate, a typed, event-driven binding
 * for the Win32 task dialog (`TaskDialogIndirect`).
 *
 * A `TaskDialog` is configured with setters, shown once, and reports what the
 * user chose as a `DialogResult`. While it is on screen, native notifications
 * become events on the dialog and live property changes are sent back to the
 * native window.
 *
 * The configuration object, the lifecycle state machine and the request
 * builder are platform-agnostic and compile (and are tested) everywhere. The
 * Win32 pieces that marshal the request, run the native call and send
 * messages to the live dialog are compiled on Windows only. A dialog and its
 * handlers belong to the thread that shows it; nothing here is `Send`.
 */
#[cfg(target_os = "windows")]
mod backend;
#[cfg(target_os = "windows")]
pub(crate) mod command_executor;
#[cfg(target_os = "windows")]
pub(crate) mod controls;
pub mod dialog;
pub mod elements;
pub mod error;
pub mod lifecycle;
pub mod native;
pub mod progress;
#[cfg(test)]
pub(crate) mod test_support;
pub mod text;
pub mod types;
#[cfg(target_os = "windows")]
pub(crate) mod window_common;

#[cfg(target_os = "windows")]
pub use backend::Win32Backend;
pub use dialog::{DialogEvent, DialogHandler, TaskDialog, TimerHandler};
pub use elements::{Button, ElementCollection, RadioButton};
pub use error::{PlatformError, Result as PlatformResult};
pub use lifecycle::{CommandSink, DialogBackend, DialogCommand, DialogPhase};
pub use native::{CallbackReply, DialogRequest, IconRequest, NativeOutcome, Notification};
pub use progress::ProgressBar;
pub use text::{DialogText, Hyperlink, RichText, TextNode};
pub use types::{
    ButtonStyle, CommonButton, CommonButtons, ControlsVersion, DialogIcon, DialogResult,
    ExpansionState, IconElement, IconImage, OwnerWindow, ProgressBarState, ProgressBarStyle,
    TextElement, TimerTick,
};
