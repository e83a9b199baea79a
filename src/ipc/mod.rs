//! Line-delimited JSON relay
//!
//! A front-end process sends one request per line on stdin and reads one
//! response per line from stdout. Channel names follow the desktop app's
//! bridge (`get-transactions`, `add-goal`, `save-to-goal`, ...).

pub mod dispatcher;
pub mod message;

pub use dispatcher::Dispatcher;
pub use message::{ErrorBody, Request, Response, SaveToGoal};

use std::io::{BufRead, Write};

use crate::error::FinanceResult;
use crate::storage::Storage;

/// Serve requests from `reader` until EOF, writing responses to `writer`
pub fn serve<R: BufRead, W: Write>(storage: &Storage, reader: R, writer: W) -> FinanceResult<()> {
    Dispatcher::new(storage).serve(reader, writer)
}
