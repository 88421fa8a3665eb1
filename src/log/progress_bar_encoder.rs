//! Log lines written while the day progress bar is drawn would leave pieces of the bar behind.
//! [`ClearLineEncoder`] erases the current terminal line before every record.

use log::Record;
use log4rs::encode::{Encode, Write};

// Erase the whole line, then return the cursor to column 0.
const CLEAR_LINE: &[u8] = b"\x1B[2K\r";

#[derive(Debug)]
pub(super) struct ClearLineEncoder {
    inner: Box<dyn Encode>,
}

impl ClearLineEncoder {
    pub(super) fn new(inner: Box<dyn Encode>) -> Self {
        ClearLineEncoder { inner }
    }
}

impl Encode for ClearLineEncoder {
    fn encode(&self, w: &mut dyn Write, record: &Record) -> anyhow::Result<()> {
        w.write_all(CLEAR_LINE)?;
        self.inner.encode(w, record)
    }
}
