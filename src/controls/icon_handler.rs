/*
 * Turns portable `IconImage` pixel buffers into `HICON`s and swaps the main or
 * footer icon of a live task dialog. An `HICON` handed to the dialog must stay
 * alive as long as the dialog shows it, so handles are owned by `IconHandle`
 * and destroyed on drop.
 */
use crate::native::TDM_UPDATE_ICON;
use crate::types::{IconElement, IconImage};

use std::ffi::c_void;
use windows::Win32::{
    Foundation::{HWND, LPARAM, WPARAM},
    Graphics::Gdi::{
        BITMAPINFO, BITMAPINFOHEADER, CreateBitmap, CreateDIBSection, DIB_RGB_COLORS,
        DeleteObject, HBITMAP, HGDIOBJ,
    },
    UI::WindowsAndMessaging::{CreateIconIndirect, DestroyIcon, HICON, ICONINFO, SendMessageW},
};

#[derive(Debug)]
pub(crate) struct IconHandle(HICON);

impl IconHandle {
    pub(crate) fn invalid() -> Self {
        Self(HICON::default())
    }

    /*
     * Builds a 32bpp top-down DIB section from the premultiplied BGRA pixels,
     * pairs it with an all-zero 1bpp mask (the alpha channel defines the
     * shape) and creates the icon. Both bitmaps are copied by
     * `CreateIconIndirect` and deleted right away. Any failure yields an
     * invalid handle, which the dialog treats as "no icon".
     */
    pub(crate) fn create(image: &IconImage) -> Self {
        let width = image.width() as i32;
        let height = image.height() as i32;
        let info = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: width,
                biHeight: -height,
                biPlanes: 1,
                biBitCount: 32,
                biCompression: 0, // BI_RGB
                ..Default::default()
            },
            ..Default::default()
        };

        unsafe {
            let mut bits: *mut c_void = std::ptr::null_mut();
            let color = match CreateDIBSection(None, &info, DIB_RGB_COLORS, &mut bits, None, 0) {
                Ok(bitmap) if !bitmap.0.is_null() && !bits.is_null() => bitmap,
                Ok(_) => {
                    log::warn!("IconHandler: CreateDIBSection returned no pixel buffer");
                    return Self::invalid();
                }
                Err(err) => {
                    log::warn!("IconHandler: CreateDIBSection failed: {err:?}");
                    return Self::invalid();
                }
            };
            let pixels = image.pixels();
            std::ptr::copy_nonoverlapping(pixels.as_ptr(), bits as *mut u8, pixels.len());

            let mask = CreateBitmap(width, height, 1, 1, None);
            if mask.0.is_null() {
                log::warn!("IconHandler: CreateBitmap failed for {width}x{height} mask");
                delete_bitmap(color);
                return Self::invalid();
            }

            let icon_info = ICONINFO {
                fIcon: true.into(),
                xHotspot: 0,
                yHotspot: 0,
                hbmMask: mask,
                hbmColor: color,
            };
            let icon = CreateIconIndirect(&icon_info);
            delete_bitmap(color);
            delete_bitmap(mask);

            match icon {
                Ok(icon) => {
                    log::debug!("IconHandler: Created {width}x{height} icon {:?}", icon.0);
                    Self(icon)
                }
                Err(err) => {
                    log::warn!("IconHandler: CreateIconIndirect failed: {err:?}");
                    Self::invalid()
                }
            }
        }
    }

    pub(crate) fn is_invalid(&self) -> bool {
        self.0.0.is_null()
    }

    pub(crate) fn raw(&self) -> HICON {
        self.0
    }
}

impl Drop for IconHandle {
    fn drop(&mut self) {
        if self.is_invalid() {
            return;
        }
        if let Err(err) = unsafe { DestroyIcon(self.0) } {
            log::warn!("IconHandler: DestroyIcon failed for {:?}: {err:?}", self.0.0);
        }
    }
}

fn delete_bitmap(bitmap: HBITMAP) {
    unsafe {
        let _ = DeleteObject(HGDIOBJ(bitmap.0));
    }
}

/// An invalid handle removes the icon from the slot.
pub(crate) fn handle_update_icon(hwnd: HWND, element: IconElement, icon: &IconHandle) {
    log::debug!(
        "IconHandler: Updating {element:?} icon (present={})",
        !icon.is_invalid()
    );
    unsafe {
        SendMessageW(
            hwnd,
            TDM_UPDATE_ICON,
            Some(WPARAM(element.native_value())),
            Some(LPARAM(icon.raw().0 as isize)),
        );
    }
}
