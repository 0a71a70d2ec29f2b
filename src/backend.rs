/*
 * Win32 implementation of `DialogBackend`. `run_dialog` marshals a
 * `DialogRequest` into `TASKDIALOGCONFIG` (wide strings, button arrays, icon
 * handles), makes the blocking `TaskDialogIndirect` call and routes every
 * callback notification back into the `TaskDialog`.
 *
 * All native buffers are locals of `run_dialog` and outlive the call; icon
 * handles are released by `IconHandle` on every path. A panic inside an event
 * handler is caught at the callback boundary (unwinding through the native
 * frames is undefined behavior), the dialog is ended, and the panic resumes
 * once the native call has returned.
 */
use crate::command_executor::Win32CommandSink;
use crate::controls::icon_handler::IconHandle;
use crate::dialog::TaskDialog;
use crate::error::Result as PlatformResult;
use crate::lifecycle::DialogBackend;
use crate::native::{
    self, DialogRequest, IconRequest, NativeOutcome, Notification, TDN_HYPERLINK_CLICKED,
};
use crate::types::{CommonButtons, ControlsVersion, DialogIcon, DialogResult, OwnerWindow};
use crate::window_common::{is_window_realized, owner_hwnd, query_common_controls_version};

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use windows::{
    Win32::{
        Foundation::{HINSTANCE, HWND, LPARAM, WPARAM},
        System::LibraryLoader::GetModuleHandleW,
        UI::{
            Controls::{
                TASKDIALOG_BUTTON, TASKDIALOG_COMMON_BUTTON_FLAGS, TASKDIALOG_FLAGS,
                TASKDIALOG_NOTIFICATIONS, TASKDIALOGCONFIG, TASKDIALOGCONFIG_0,
                TASKDIALOGCONFIG_1, TaskDialogIndirect,
            },
            WindowsAndMessaging::EndDialog,
        },
    },
    core::{BOOL, HRESULT, HSTRING, PCWSTR},
};

/// Shows task dialogs through comctl32's `TaskDialogIndirect`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32Backend;

impl Win32Backend {
    pub fn new() -> Self {
        Self
    }
}

struct CallbackContext<'a> {
    dialog: &'a mut TaskDialog,
    panic: Option<Box<dyn Any + Send>>,
}

fn wide(text: &Option<String>) -> Option<HSTRING> {
    text.as_deref().map(HSTRING::from)
}

fn pcwstr(text: &Option<HSTRING>) -> PCWSTR {
    text.as_ref()
        .map_or(PCWSTR::null(), |text| PCWSTR(text.as_ptr()))
}

// MAKEINTRESOURCE for the predefined TD_*_ICON ids.
fn resource_pcwstr(id: u16) -> PCWSTR {
    PCWSTR(id as usize as *const u16)
}

fn icon_handle_for(request: &IconRequest) -> IconHandle {
    match request {
        IconRequest::Custom(image) => IconHandle::create(image),
        IconRequest::None | IconRequest::Standard(_) => IconHandle::invalid(),
    }
}

fn main_icon_union(request: &IconRequest, handle: &IconHandle) -> TASKDIALOGCONFIG_0 {
    match request {
        IconRequest::Standard(id) => TASKDIALOGCONFIG_0 {
            pszMainIcon: resource_pcwstr(*id),
        },
        IconRequest::None | IconRequest::Custom(_) => TASKDIALOGCONFIG_0 {
            hMainIcon: handle.raw(),
        },
    }
}

fn footer_icon_union(request: &IconRequest, handle: &IconHandle) -> TASKDIALOGCONFIG_1 {
    match request {
        IconRequest::Standard(id) => TASKDIALOGCONFIG_1 {
            pszFooterIcon: resource_pcwstr(*id),
        },
        IconRequest::None | IconRequest::Custom(_) => TASKDIALOGCONFIG_1 {
            hFooterIcon: handle.raw(),
        },
    }
}

/// Reads the `pszHREF` of a hyperlink notification.
unsafe fn read_link_target(lparam: LPARAM) -> Option<String> {
    if lparam.0 == 0 {
        return None;
    }
    unsafe { PCWSTR(lparam.0 as *const u16).to_string() }.ok()
}

unsafe extern "system" fn task_dialog_callback(
    hwnd: HWND,
    msg: TASKDIALOG_NOTIFICATIONS,
    wparam: WPARAM,
    lparam: LPARAM,
    ref_data: isize,
) -> HRESULT {
    if ref_data == 0 {
        return HRESULT(native::S_OK);
    }
    let context = unsafe { &mut *(ref_data as *mut CallbackContext) };
    if context.panic.is_some() {
        // A handler already panicked; let the dialog wind down untouched.
        return HRESULT(native::S_OK);
    }

    let code = msg.0 as u32;
    let link_target = if code == TDN_HYPERLINK_CLICKED {
        unsafe { read_link_target(lparam) }
    } else {
        None
    };
    let notification = Notification::decode(code, wparam.0, link_target);

    if notification == Notification::DialogConstructed {
        log::debug!("Backend: Dialog constructed with HWND {:?}", hwnd.0);
        context
            .dialog
            .attach_command_sink(Box::new(Win32CommandSink::new(hwnd)));
    }

    let dialog = &mut *context.dialog;
    match panic::catch_unwind(AssertUnwindSafe(|| {
        dialog.dispatch_notification(notification)
    })) {
        Ok(reply) => HRESULT(reply.status_code()),
        Err(payload) => {
            log::error!("Backend: Event handler panicked; closing the dialog");
            context.panic = Some(payload);
            if let Err(err) = unsafe { EndDialog(hwnd, native::IDCANCEL as isize) } {
                log::error!("Backend: EndDialog failed after handler panic: {err:?}");
            }
            HRESULT(native::S_OK)
        }
    }
}

impl DialogBackend for Win32Backend {
    fn common_controls_version(&self) -> PlatformResult<ControlsVersion> {
        query_common_controls_version()
    }

    fn is_owner_realized(&self, owner: OwnerWindow) -> bool {
        is_window_realized(owner)
    }

    fn run_dialog(
        &mut self,
        request: &DialogRequest,
        dialog: &mut TaskDialog,
    ) -> PlatformResult<NativeOutcome> {
        let title = wide(&request.title);
        let instruction = wide(&request.instruction);
        let content = wide(&request.content);
        let expanded_information = wide(&request.expanded_information);
        let expanded_control_text = wide(&request.expanded_control_text);
        let collapsed_control_text = wide(&request.collapsed_control_text);
        let footer = wide(&request.footer);
        let verification_text = wide(&request.verification_text);

        let button_texts: Vec<HSTRING> = request
            .buttons
            .iter()
            .map(|entry| HSTRING::from(entry.text.as_str()))
            .collect();
        let buttons: Vec<TASKDIALOG_BUTTON> = request
            .buttons
            .iter()
            .zip(&button_texts)
            .map(|(entry, text)| TASKDIALOG_BUTTON {
                nButtonID: entry.id,
                pszButtonText: PCWSTR(text.as_ptr()),
            })
            .collect();
        let radio_texts: Vec<HSTRING> = request
            .radio_buttons
            .iter()
            .map(|entry| HSTRING::from(entry.text.as_str()))
            .collect();
        let radio_buttons: Vec<TASKDIALOG_BUTTON> = request
            .radio_buttons
            .iter()
            .zip(&radio_texts)
            .map(|(entry, text)| TASKDIALOG_BUTTON {
                nButtonID: entry.id,
                pszButtonText: PCWSTR(text.as_ptr()),
            })
            .collect();

        let main_icon = icon_handle_for(&request.main_icon);
        let footer_icon = icon_handle_for(&request.footer_icon);

        let h_instance = unsafe { GetModuleHandleW(None) }
            .map(|module| HINSTANCE(module.0))
            .unwrap_or_default();

        let mut context = CallbackContext {
            dialog,
            panic: None,
        };

        let config = TASKDIALOGCONFIG {
            cbSize: std::mem::size_of::<TASKDIALOGCONFIG>() as u32,
            hwndParent: request.owner.map(owner_hwnd).unwrap_or_default(),
            hInstance: h_instance,
            dwFlags: TASKDIALOG_FLAGS(request.flags as i32),
            dwCommonButtons: TASKDIALOG_COMMON_BUTTON_FLAGS(request.common_buttons as i32),
            pszWindowTitle: pcwstr(&title),
            Anonymous1: main_icon_union(&request.main_icon, &main_icon),
            pszMainInstruction: pcwstr(&instruction),
            pszContent: pcwstr(&content),
            cButtons: buttons.len() as u32,
            pButtons: if buttons.is_empty() {
                std::ptr::null()
            } else {
                buttons.as_ptr()
            },
            nDefaultButton: request.default_button,
            cRadioButtons: radio_buttons.len() as u32,
            pRadioButtons: if radio_buttons.is_empty() {
                std::ptr::null()
            } else {
                radio_buttons.as_ptr()
            },
            nDefaultRadioButton: request.default_radio_button.max(0),
            pszVerificationText: pcwstr(&verification_text),
            pszExpandedInformation: pcwstr(&expanded_information),
            pszExpandedControlText: pcwstr(&expanded_control_text),
            pszCollapsedControlText: pcwstr(&collapsed_control_text),
            Anonymous2: footer_icon_union(&request.footer_icon, &footer_icon),
            pszFooter: pcwstr(&footer),
            pfCallback: Some(task_dialog_callback),
            lpCallbackData: &mut context as *mut CallbackContext as isize,
            cxWidth: request.width,
        };

        let mut selected_button = 0;
        let mut selected_radio_button = 0;
        let mut verification_checked = BOOL(0);
        let status = match unsafe {
            TaskDialogIndirect(
                &config,
                Some(&mut selected_button),
                Some(&mut selected_radio_button),
                Some(&mut verification_checked),
            )
        } {
            Ok(()) => native::S_OK,
            Err(err) => {
                log::error!("Backend: TaskDialogIndirect failed: {err:?}");
                err.code().0
            }
        };

        if let Some(payload) = context.panic.take() {
            context.dialog.end_native_session();
            panic::resume_unwind(payload);
        }

        Ok(NativeOutcome {
            status,
            selected_button,
            selected_radio_button,
            verification_checked: verification_checked.as_bool(),
        })
    }
}

impl TaskDialog {
    /// Shows the dialog modelessly (no owner unless one was set) and blocks until it closes.
    pub fn show(&mut self) -> PlatformResult<DialogResult> {
        self.show_with(&mut Win32Backend::new())
    }

    /// Shows the dialog owned by `owner`, which is disabled while the dialog is open.
    pub fn show_modal(&mut self, owner: OwnerWindow) -> PlatformResult<DialogResult> {
        self.set_owner(Some(owner))?;
        self.show()
    }

    /*
     * One-call message box: builds a dialog from the given texts, common
     * buttons and icon, shows it and returns the result.
     */
    pub fn show_message(
        instruction: &str,
        content: &str,
        title: &str,
        buttons: CommonButtons,
        icon: DialogIcon,
    ) -> PlatformResult<DialogResult> {
        Self::message(instruction, content, title, buttons, icon)?.show()
    }

    pub fn show_modal_message(
        owner: OwnerWindow,
        instruction: &str,
        content: &str,
        title: &str,
        buttons: CommonButtons,
        icon: DialogIcon,
    ) -> PlatformResult<DialogResult> {
        Self::message(instruction, content, title, buttons, icon)?.show_modal(owner)
    }
}
