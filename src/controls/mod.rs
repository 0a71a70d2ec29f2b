/*
 * Per-element message helpers for a live task dialog. Each handler turns one
 * kind of change into the matching `TDM_*` message sent to the dialog window.
 */
pub(crate) mod button_handler;
pub(crate) mod icon_handler;
pub(crate) mod progress_handler;
pub(crate) mod radiobutton_handler;
