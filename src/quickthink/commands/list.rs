use crate::backend::Backend;
use crate::commands::CmdResult;
use crate::error::Result;

use super::helpers::refresh_decks;

pub fn run<B: Backend>(backend: &B) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    refresh_decks(backend, &mut result)?;
    Ok(result)
}
