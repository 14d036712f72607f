//! Interactive shell startup
//!
//! Opens the store for an interactive session. An unreadable data file is
//! not discarded silently: the user must confirm before it is moved aside
//! and the session starts empty.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::shell::input::confirm;
use crate::shell::Shell;
use crate::storage::ExpenseStore;

/// Load the store, asking before replacing an unreadable data file
///
/// A directory in place of the data file is always an error.
pub fn open_store_for_shell<R: BufRead, W: Write>(
    path: PathBuf,
    input: &mut R,
    output: &mut W,
) -> ExpenseResult<ExpenseStore> {
    let mut store = ExpenseStore::new(path);

    let err = match store.load() {
        Ok(()) => return Ok(store),
        Err(e) => e,
    };

    if !err.is_persistence() || store.path().is_dir() {
        return Err(err);
    }

    writeln!(output, "{}", err)?;
    let start_empty = confirm(
        input,
        output,
        "Start with an empty expense list? The unreadable file will be moved aside. (yes/no) [no]: ",
    )?;

    if !start_empty {
        return Err(ExpenseError::Persistence(format!(
            "{} left untouched; fix or remove it and try again",
            store.path().display()
        )));
    }

    let moved = store.quarantine()?;
    writeln!(output, "Moved unreadable file to {}", moved.display())?;
    store.load()?;
    Ok(store)
}

/// Run the interactive shell on stdin/stdout
pub fn start_shell(path: PathBuf, settings: Settings) -> ExpenseResult<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let store = open_store_for_shell(path, &mut input, &mut output)?;
    Shell::new(store, settings, input, output).run()
}
