use std::{io, path::Path};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Source {
    File,
    Text,
}

/// Number of whitespace-separated words once ASCII punctuation is stripped.
pub fn count_words(text: &str) -> usize {
    let cleaned: String = text.chars().filter(|c| !c.is_ascii_punctuation()).collect();
    cleaned.split_whitespace().count()
}

/// Counts words in the file named by `content` if it exists, otherwise in
/// `content` itself.
pub fn count_in(content: &str) -> io::Result<(Source, usize)> {
    let path = Path::new(content);
    if path.is_file() {
        let text = std::fs::read_to_string(path)?;
        Ok((Source::File, count_words(&text)))
    } else {
        Ok((Source::Text, count_words(content)))
    }
}

pub fn describe(content: &str) -> io::Result<String> {
    let (source, total) = count_in(content)?;
    Ok(match source {
        Source::File => format!("The file '{content}' contains {total} words."),
        Source::Text => format!("The string '{content}' contains {total} words."),
    })
}
