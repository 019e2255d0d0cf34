//! Native Windows message box notifier.

use std::ffi::OsStr;
use std::iter::once;
use std::os::windows::ffi::OsStrExt;
use std::ptr;
use std::sync::Mutex;
use std::thread::{self, JoinHandle};

use winapi::um::winuser::{MessageBoxW, MB_ICONERROR, MB_ICONWARNING, MB_OK, MB_SETFOREGROUND};

use crate::core::monitor::Notifier;
use crate::error::{QuotaError, Result};

const ERROR_TITLE: &str = "Quota Notify";

/// Dialog threads that are still open, so a short-lived process can wait for them.
#[derive(Debug, Default)]
struct DialogThreads {
    open: Mutex<Vec<JoinHandle<()>>>,
}

impl DialogThreads {
    fn spawn<F>(&self, show: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = thread::Builder::new()
            .name("quota-notify-dialog".to_string())
            .spawn(show)
            .map_err(|e| QuotaError::notification(format!("cannot open dialog: {}", e)))?;

        let mut open = self
            .open
            .lock()
            .map_err(|_| QuotaError::notification("dialog list poisoned"))?;
        open.retain(|h| !h.is_finished());
        open.push(handle);
        Ok(())
    }

    fn join_all(&self) {
        let handles = match self.open.lock() {
            Ok(mut open) => std::mem::take(&mut *open),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        };
        for handle in handles {
            if handle.join().is_err() {
                log::error!("Dialog thread panicked");
            }
        }
    }
}

/// Shows each notification in a modal message box on its own thread, so an unanswered
/// dialog never holds up the next tick.
#[derive(Debug, Default)]
pub struct MessageBoxNotifier {
    dialogs: DialogThreads,
}

impl MessageBoxNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn show(&self, title: &str, message: &str, icon: u32) -> Result<()> {
        let title = wide(title);
        let message = wide(message);

        self.dialogs.spawn(move || {
            let result = unsafe {
                MessageBoxW(
                    ptr::null_mut(),
                    message.as_ptr(),
                    title.as_ptr(),
                    MB_OK | icon | MB_SETFOREGROUND,
                )
            };
            if result == 0 {
                log::error!("MessageBoxW failed: {}", std::io::Error::last_os_error());
            }
        })
    }
}

impl Notifier for MessageBoxNotifier {
    fn notify(&self, title: &str, message: &str) -> Result<()> {
        self.show(title, message, MB_ICONWARNING)
    }

    fn show_error(&self, message: &str) -> Result<()> {
        self.show(ERROR_TITLE, message, MB_ICONERROR)
    }

    fn wait_idle(&self) {
        self.dialogs.join_all();
    }
}

fn wide(text: &str) -> Vec<u16> {
    OsStr::new(text).encode_wide().chain(once(0)).collect()
}
