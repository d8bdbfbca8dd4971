//! macOS workspace adapter over NSWorkspace / NSRunningApplication

use std::ffi::CStr;
use std::os::raw::c_char;

use async_trait::async_trait;
use cocoa::base::{id, nil};
use cocoa::foundation::NSString;
use objc::{class, msg_send, sel, sel_impl};

use crate::application::ports::Workspace;
use crate::domain::focus::AppHandle;

/// NSApplicationActivateIgnoringOtherApps
const ACTIVATE_IGNORING_OTHER_APPS: u64 = 1 << 1;

/// Workspace adapter backed by NSWorkspace
pub struct MacWorkspace;

impl MacWorkspace {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MacWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Workspace for MacWorkspace {
    async fn frontmost(&self) -> Option<AppHandle> {
        unsafe {
            let workspace: id = msg_send![class!(NSWorkspace), sharedWorkspace];
            let app: id = msg_send![workspace, frontmostApplication];
            if app == nil {
                return None;
            }
            let pid: i32 = msg_send![app, processIdentifier];
            let bundle_id: id = msg_send![app, bundleIdentifier];
            let name: id = msg_send![app, localizedName];
            Some(AppHandle {
                pid: Some(pid),
                identifier: nsstring_to_string(bundle_id),
                name: nsstring_to_string(name),
            })
        }
    }

    async fn activate(&self, app: &AppHandle) -> bool {
        unsafe {
            let running = resolve_running_app(app);
            if running == nil {
                return false;
            }
            let ok: objc::runtime::BOOL =
                msg_send![running, activateWithOptions: ACTIVATE_IGNORING_OTHER_APPS];
            ok != objc::runtime::NO
        }
    }
}

/// Find the NSRunningApplication for a handle, by pid when known,
/// otherwise by bundle identifier.
unsafe fn resolve_running_app(app: &AppHandle) -> id {
    if let Some(pid) = app.pid {
        let running: id = msg_send![
            class!(NSRunningApplication),
            runningApplicationWithProcessIdentifier: pid
        ];
        if running != nil {
            return running;
        }
    }
    if let Some(identifier) = &app.identifier {
        let ns_identifier = NSString::alloc(nil).init_str(identifier);
        let matches: id = msg_send![
            class!(NSRunningApplication),
            runningApplicationsWithBundleIdentifier: ns_identifier
        ];
        let count: usize = msg_send![matches, count];
        if count > 0 {
            return msg_send![matches, objectAtIndex: 0usize];
        }
    }
    nil
}

unsafe fn nsstring_to_string(value: id) -> Option<String> {
    if value == nil {
        return None;
    }
    let utf8: *const c_char = msg_send![value, UTF8String];
    if utf8.is_null() {
        return None;
    }
    CStr::from_ptr(utf8).to_str().ok().map(String::from)
}
