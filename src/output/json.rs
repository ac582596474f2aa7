use crate::article::Article;
use crate::NewsrankError;
use std::io::Write;

/// Writes the ranked list as a pretty-printed JSON array followed by a newline
///
/// # Arguments
///
/// * `writer` - Destination, usually standard output
/// * `articles` - The ranked articles (may be empty)
pub fn write_ranking<W: Write>(mut writer: W, articles: &[Article]) -> Result<(), NewsrankError> {
    serde_json::to_writer_pretty(&mut writer, articles)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Renders the ranked list as it would be written by [`write_ranking`]
pub fn to_json_string(articles: &[Article]) -> Result<String, NewsrankError> {
    let mut buffer = Vec::new();
    write_ranking(&mut buffer, articles)?;
    // serde_json only emits UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
