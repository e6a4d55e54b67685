//! CSS for the EPUB book documents.

/// Generate the stylesheet shared by every book document.
pub fn generate_stylesheet() -> String {
    r#"/* Base styles */
body {
    font-family: serif;
    line-height: 1.5;
    margin: 1em;
}

h1 {
    font-size: 2em;
    text-align: center;
    margin: 1em 0;
}

p {
    text-align: justify;
    margin: 0;
}
"#
    .to_string()
}
