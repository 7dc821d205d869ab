// WHY: whitespace normalization kept apart from segmentation so raw segments stay lossless
// Also used by the plain-text markup converter for paragraph flattening

/// Collapse every whitespace run (line breaks included) into one space and trim the ends
pub fn normalize_sentence(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    normalize_sentence_into(text, &mut result);
    result
}

/// Normalize into a caller-owned buffer, clearing it first
pub fn normalize_sentence_into(text: &str, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len());

    for (i, word) in text.split_whitespace().enumerate() {
        if i > 0 {
            buffer.push(' ');
        }
        buffer.push_str(word);
    }
}

/// Normalize each blank-line separated paragraph, keeping one empty line between paragraphs
pub fn normalize_paragraphs(text: &str) -> String {
    let mut paragraphs = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(normalize_sentence(&current));
                current.clear();
            }
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    if !current.is_empty() {
        paragraphs.push(normalize_sentence(&current));
    }

    paragraphs.join("\n\n")
}
