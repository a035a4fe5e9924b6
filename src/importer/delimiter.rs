/// Only this many leading characters are inspected.
const SAMPLE_CHARS: usize = 4000;

/// Pick the field separator of a delimited export: tab, semicolon or comma.
///
/// Tab wins ties with both others, semicolon must strictly beat comma, and
/// comma is the fallback. Never fails.
pub fn detect_delimiter(text: &str) -> u8 {
    let (mut tabs, mut commas, mut semis) = (0usize, 0usize, 0usize);
    for c in text.chars().take(SAMPLE_CHARS) {
        match c {
            '\t' => tabs += 1,
            ',' => commas += 1,
            ';' => semis += 1,
            _ => {}
        }
    }
    if tabs >= commas && tabs >= semis {
        b'\t'
    } else if semis > commas {
        b';'
    } else {
        b','
    }
}
