use crate::error::Error;

/// Find the text of the first level-one heading (`# Title`).
pub fn extract_title(markdown: &str) -> Result<&str, Error> {
    markdown
        .lines()
        .filter_map(|line| line.strip_prefix("# "))
        .find(|title| !title.is_empty())
        .ok_or(Error::NoTitleFound)
}
