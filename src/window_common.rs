/*
 * Win32 helpers shared by the backend and the command sink: the Common Controls
 * version probe, owner window checks, and conversions between the portable
 * handle types and `HWND`.
 */
use crate::error::{PlatformError, Result as PlatformResult};
use crate::types::{ControlsVersion, OwnerWindow};

use std::ffi::c_void;
use windows::Win32::{
    Foundation::HWND,
    System::LibraryLoader::{GetProcAddress, LoadLibraryW},
    UI::WindowsAndMessaging::IsWindow,
};
use windows::core::{HRESULT, s, w};

// Layout of DLLVERSIONINFO as filled in by DllGetVersion.
#[repr(C)]
#[derive(Debug, Default)]
struct DllVersionInfo {
    cb_size: u32,
    major_version: u32,
    minor_version: u32,
    build_number: u32,
    platform_id: u32,
}

type DllGetVersionFn = unsafe extern "system" fn(*mut DllVersionInfo) -> HRESULT;

/*
 * Asks the comctl32 loaded for this process which version it is. Which copy
 * gets loaded depends on the activation context: without a manifest that
 * requests Common Controls 6 the process gets version 5.x, which has no task
 * dialog.
 */
pub(crate) fn query_common_controls_version() -> PlatformResult<ControlsVersion> {
    unsafe {
        let module = LoadLibraryW(w!("comctl32.dll"))?;
        let Some(proc_address) = GetProcAddress(module, s!("DllGetVersion")) else {
            return Err(PlatformError::NotSupported(
                "comctl32.dll does not export DllGetVersion".to_string(),
            ));
        };
        let dll_get_version = std::mem::transmute::<*const c_void, DllGetVersionFn>(
            proc_address as *const c_void,
        );

        let mut info = DllVersionInfo {
            cb_size: std::mem::size_of::<DllVersionInfo>() as u32,
            ..Default::default()
        };
        dll_get_version(&mut info).ok()?;

        let version = ControlsVersion {
            major: info.major_version,
            minor: info.minor_version,
            build: info.build_number,
        };
        log::debug!(
            "WindowCommon: comctl32 version {}.{}.{} (platform {})",
            version.major,
            version.minor,
            version.build,
            info.platform_id
        );
        Ok(version)
    }
}

pub(crate) fn owner_hwnd(owner: OwnerWindow) -> HWND {
    HWND(owner.raw() as *mut c_void)
}

/// True when `owner` names an existing window.
pub(crate) fn is_window_realized(owner: OwnerWindow) -> bool {
    owner.is_realized() && unsafe { IsWindow(Some(owner_hwnd(owner))) }.as_bool()
}
