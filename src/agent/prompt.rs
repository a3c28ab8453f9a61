use chrono::NaiveDate;

pub const TOPIC: &str = r#"
IT & DATA JOB MARKET (EU / PL / Remote)

Focus areas:
- hiring trends (IT, Data, Analytics, AI)
- salary ranges and changes
- in-demand roles and skills
- layoffs / hiring freezes / expansions
- market signals (demand ↑ / ↓)
"#;

pub const PROMPT: &str = r#"
Jesteś analitykiem rynku pracy (IT/Data/AI). Przygotuj DZIEŃNY BRIEF RYNKU PRACY dla daty: {date}.

TEMAT:
{topic}

TWARDE WYMAGANIA (bez dyskusji):
- Użyj web search, aby znaleźć WIARYGODNE aktualizacje z ostatnich 48 godzin. Jeśli brak istotnych informacji, rozszerz do ostatnich 7 dni.
- Każda informacja o: zatrudnieniach / zwolnieniach / hiring freeze / ekspansjach / nowych widełkach płacowych MUSI mieć ŹRÓDŁO.
- Maksymalnie 5 pozycji. Preferuj EU/PL/Remote, źródła reputacyjne. Zero spekulacji.
- Jeśli nic sensownego nie ma, zwróć tylko sekcję TLDR z informacją, że brak istotnych zmian.

FORMAT WYJŚCIA (ściśle):
TLDR:
- <max 3 punkty, po polsku>

ITEMS:
- Tytuł (PL): ...
  Co się stało: <1–2 zdania po polsku>
  Dlaczego ważne: <1 zdanie po polsku>
  Źródło: <publisher> | <YYYY-MM-DD>
  URL: <bezpośredni link>

KONIEC.
Ogranicz długość całości do ~2000–2500 znaków.
"#;

/// Builds the daily brief instruction for `today`.
pub fn build_prompt(today: NaiveDate) -> String {
    PROMPT
        .replace("{date}", &today.format("%Y-%m-%d").to_string())
        .replace("{topic}", TOPIC)
        .trim()
        .to_string()
}
