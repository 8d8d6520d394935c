/// Absolute image URL: the storage domain joined with the stored object name.
pub fn image_url(domain: &str, name: &str) -> String {
    format!("{domain}/{name}")
}

/// Markdown image reference inserted into the editor, one per line.
pub fn image_snippet(url: &str) -> String {
    format!("![]({url})\n")
}

/// Storage directory that uploaded images are filed under for `year`.
pub fn upload_destination(year: i32) -> String {
    format!("/static/images/{year}/")
}
