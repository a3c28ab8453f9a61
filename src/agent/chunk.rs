/// Stays under Telegram's 4096 character message limit.
pub const DEFAULT_MAX_LEN: usize = 3800;

/// Splits `text` into trimmed, non-empty chunks of at most `max_len`
/// characters, cutting at the last newline that fits and falling back to a
/// hard cut when a single line is longer than the budget.
pub fn split_message(text: &str, max_len: usize) -> Vec<String> {
    let max_len = max_len.max(1);
    let mut chunks = Vec::new();
    let mut rest = text.trim();

    while let Some((limit, _)) = rest.char_indices().nth(max_len) {
        let cut = match rest[..limit].rfind('\n') {
            Some(newline) if newline > 0 => newline,
            _ => limit,
        };
        let head = rest[..cut].trim();
        if !head.is_empty() {
            chunks.push(head.to_string());
        }
        rest = rest[cut..].trim();
    }

    if !rest.is_empty() {
        chunks.push(rest.to_string());
    }
    chunks
}
