pub const FALLBACK_BRIEF: &str = "TLDR:\n\
- Brak wiarygodnych, weryfikowalnych aktualizacji w ostatnich 48h (fallback do 7 dni bez istotnych zmian).\n\
\n\
ITEMS:\n\
- (brak)\n\
\n\
KONIEC.";

/// A brief counts as verifiable when it carries a `URL:` marker and at least
/// one http(s) link anywhere in the text. Case-insensitive.
pub fn is_verifiable(text: &str) -> bool {
    let lowered = text.to_lowercase();
    lowered.contains("url:") && (lowered.contains("http://") || lowered.contains("https://"))
}

/// Passes a verifiable brief through untouched and swaps anything else for
/// [`FALLBACK_BRIEF`].
pub fn ensure_verifiable(brief: String) -> String {
    if is_verifiable(&brief) {
        brief
    } else {
        log::warn!("brief has no verifiable sources, substituting fallback");
        FALLBACK_BRIEF.to_string()
    }
}
