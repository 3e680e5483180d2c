//! Document decryptor and page access.
//!
//! A statement document is opened from bytes, unlocked with an optional
//! passphrase, and then exposes its pages in order. The handle is released
//! when it is dropped, which covers every exit path of the caller.

use lopdf::Document;
use lopdf::encryption::DecryptionError;
use tracing::{debug, trace};

use crate::error::{ExtractError, Result};

/// Ordered pages that can each yield their visible text
pub trait PagedDocument {
    fn page_count(&self) -> usize;

    /// Text of page `index` (0-based). `None` when the page has no extractable text.
    fn page_text(&self, index: usize) -> Option<String>;
}

/// Encryption state of an opened document
pub trait Lockable {
    fn is_encrypted(&self) -> bool;

    /// Try to unlock with `passphrase`.
    ///
    /// A passphrase that does not open the document is `IncorrectPassword`;
    /// a cipher the backend cannot handle is `UnsupportedEncryption`.
    fn unlock(&mut self, passphrase: &str) -> Result<()>;
}

/// Apply the passphrase policy to an opened document.
///
/// - encrypted, no passphrase -> `PasswordRequired` (unless the empty
///   user password opens it, as with owner-password-only documents)
/// - encrypted, passphrase does not unlock -> `IncorrectPassword`
/// - not encrypted -> passphrase ignored
pub fn unlock<D: Lockable>(doc: &mut D, passphrase: Option<&str>) -> Result<()> {
    if !doc.is_encrypted() {
        if passphrase.is_some() {
            trace!("document is not encrypted; ignoring passphrase");
        }
        return Ok(());
    }

    match passphrase.filter(|p| !p.is_empty()) {
        None => match doc.unlock("") {
            Ok(()) => {
                debug!("document opened with empty user password");
                Ok(())
            }
            Err(ExtractError::IncorrectPassword) => Err(ExtractError::PasswordRequired),
            Err(e) => Err(e),
        },
        Some(p) => {
            doc.unlock(p)?;
            debug!("document unlocked");
            Ok(())
        }
    }
}

/// PDF statement backed by lopdf
pub struct PdfStatement {
    doc: Document,
    page_numbers: Vec<u32>,
}

impl PdfStatement {
    /// Open a PDF from bytes and unlock it if needed.
    pub fn open(bytes: &[u8], passphrase: Option<&str>) -> Result<Self> {
        let mut doc = Document::load_mem(bytes).map_err(|e| ExtractError::Unreadable(e.to_string()))?;
        unlock(&mut LopdfLock(&mut doc), passphrase)?;

        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        debug!(pages = page_numbers.len(), "opened statement document");
        Ok(Self { doc, page_numbers })
    }
}

impl PagedDocument for PdfStatement {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn page_text(&self, index: usize) -> Option<String> {
        let number = *self.page_numbers.get(index)?;
        match self.doc.extract_text(&[number]) {
            Ok(text) => Some(text),
            Err(e) => {
                debug!(page = number, error = %e, "no extractable text on page");
                None
            }
        }
    }
}

impl Drop for PdfStatement {
    fn drop(&mut self) {
        trace!(pages = self.page_numbers.len(), "closing statement document");
    }
}

struct LopdfLock<'a>(&'a mut Document);

impl Lockable for LopdfLock<'_> {
    fn is_encrypted(&self) -> bool {
        self.0.is_encrypted()
    }

    fn unlock(&mut self, passphrase: &str) -> Result<()> {
        match self.0.decrypt(passphrase) {
            Ok(()) => Ok(()),
            Err(lopdf::Error::Decryption(DecryptionError::IncorrectPassword)) => Err(ExtractError::IncorrectPassword),
            Err(lopdf::Error::Decryption(e @ DecryptionError::UnsupportedEncryption)) => {
                Err(ExtractError::UnsupportedEncryption(e.to_string()))
            }
            Err(e) => Err(ExtractError::Unreadable(e.to_string())),
        }
    }
}
