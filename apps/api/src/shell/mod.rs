//! Shell — navigation, modal presence and the transient state that lives outside the document.
//!
//! Nothing here is persisted. The state sits behind a `std::sync::Mutex` in `AppState`;
//! every method is synchronous so the lock is never held across an `.await`.

pub mod handlers;

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default donation PIX copy-and-paste code.
pub const DEFAULT_PIX_CODE: &str = "00020126810014br.gov.bcb.pix01362989a9f4-54ba-4f35-87b5-700d326541020219Ajude no Cafezinho 27600016BR.COM.PAGSEGURO0136B9881BCF-4A89-4188-8A7B-59E81BD21DA6520489995303986540510.005802BR5925HUMBERTO DA SILVA MOURA N6007Gramado62290525PAGS0000010002511270919896304C7EE";
/// Printing this page is the PDF download.
pub const PRINT_URL: &str = "/api/v1/preview/print";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Landing,
    Editor,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorTab {
    Personal,
    #[default]
    Experience,
    Education,
    Courses,
    Skills,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modal {
    Settings,
    AtsScan,
    Donation,
}

#[derive(Debug, Error, PartialEq)]
pub enum ShellError {
    #[error("The {0:?} modal is not open")]
    ModalNotOpen(Modal),

    #[error("Job description is empty")]
    BlankJobDescription,

    #[error("Donation is only available from the editor")]
    DonationOutsideEditor,
}

#[derive(Debug, Default)]
pub struct ShellState {
    view: View,
    tab: EditorTab,
    modal: Option<Modal>,
    job_description: String,
    ats_analysis: Option<Vec<String>>,
}

/// Snapshot returned by `GET /shell`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShellStatus {
    pub view: View,
    pub tab: EditorTab,
    pub modal: Option<Modal>,
    pub job_description: String,
    pub ats_analysis: Option<Vec<String>>,
    /// An experience rewrite is running.
    pub rewriting: bool,
    /// An ATS scan is running.
    pub analyzing: bool,
}

impl ShellState {
    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    pub fn set_tab(&mut self, tab: EditorTab) {
        self.tab = tab;
    }

    /// Opens `modal`, replacing any open one.
    pub fn open_modal(&mut self, modal: Modal) -> Result<(), ShellError> {
        if modal == Modal::Donation && self.view != View::Editor {
            return Err(ShellError::DonationOutsideEditor);
        }
        self.modal = Some(modal);
        Ok(())
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Closes `modal` if it is the one open. Returns whether it was.
    pub fn close_if_open(&mut self, modal: Modal) -> bool {
        if self.modal == Some(modal) {
            self.modal = None;
            return true;
        }
        false
    }

    pub fn set_job_description(&mut self, text: String) {
        self.job_description = text;
    }

    /// Validates a scan request and clears the previous result.
    /// Returns the job description to analyze.
    pub fn begin_scan(&mut self) -> Result<String, ShellError> {
        if self.modal != Some(Modal::AtsScan) {
            return Err(ShellError::ModalNotOpen(Modal::AtsScan));
        }
        if self.job_description.trim().is_empty() {
            return Err(ShellError::BlankJobDescription);
        }
        self.ats_analysis = None;
        Ok(self.job_description.clone())
    }

    /// Stores a scan result if the ATS modal is still open. Returns whether it was kept.
    pub fn finish_scan(&mut self, suggestions: Vec<String>) -> bool {
        if self.modal != Some(Modal::AtsScan) {
            return false;
        }
        self.ats_analysis = Some(suggestions);
        true
    }

    pub fn clear_analysis(&mut self) {
        self.ats_analysis = None;
    }

    pub fn status(&self, rewriting: bool, analyzing: bool) -> ShellStatus {
        ShellStatus {
            view: self.view,
            tab: self.tab,
            modal: self.modal,
            job_description: self.job_description.clone(),
            ats_analysis: self.ats_analysis.clone(),
            rewriting,
            analyzing,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-flight flags
// ────────────────────────────────────────────────────────────────────────────

/// Marks an operation that may only run once at a time.
#[derive(Debug, Default)]
pub struct InFlightFlag(AtomicBool);

impl InFlightFlag {
    /// Claims the flag, or returns `None` when the operation is already running.
    pub fn try_begin(&self) -> Option<InFlightGuard<'_>> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard { flag: self })
    }

    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Releases its flag on drop.
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    flag: &'a InFlightFlag,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.0.store(false, Ordering::Release);
    }
}
