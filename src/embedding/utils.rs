use std::io;
use std::path::Path;
use tokenizers::{Tokenizer, TruncationParams};

/// Loads `tokenizer.json` and truncates every encoding to `max_len` tokens.
///
/// Padding shipped in the file is disabled: documents are encoded one at a
/// time, so padding would only add masked positions.
pub fn load_tokenizer_with_truncation(tokenizer_path: &Path, max_len: usize) -> io::Result<Tokenizer> {
    let mut tokenizer = Tokenizer::from_file(tokenizer_path).map_err(io::Error::other)?;

    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length: max_len,
            ..Default::default()
        }))
        .map_err(|e| io::Error::other(format!("truncation to {max_len} tokens rejected: {e}")))?;
    tokenizer.with_padding(None);

    Ok(tokenizer)
}
