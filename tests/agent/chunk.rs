use jobbrief::agent::chunk::{split_message, DEFAULT_MAX_LEN};

fn non_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

#[test]
fn empty_input_yields_no_chunks() {
    assert!(split_message("", 10).is_empty());
    assert!(split_message(" \n\t ", 10).is_empty());
}

#[test]
fn short_input_is_a_single_trimmed_chunk() {
    let chunks = split_message("\n  TLDR:\n- ok\n\nKONIEC.  \n", DEFAULT_MAX_LEN);

    assert_eq!(chunks, vec!["TLDR:\n- ok\n\nKONIEC."]);
}

#[test]
fn input_of_exactly_max_len_is_not_split() {
    let text = "a".repeat(50);

    assert_eq!(split_message(&text, 50), vec![text]);
}

#[test]
fn splits_on_last_newline_within_budget() {
    let chunks = split_message("alpha\nbeta\ngamma", 12);

    assert_eq!(chunks, vec!["alpha\nbeta", "gamma"]);
}

#[test]
fn hard_cuts_a_line_longer_than_budget() {
    let chunks = split_message("abcdefghij", 4);

    assert_eq!(chunks, vec!["abcd", "efgh", "ij"]);
}

#[test]
fn measures_characters_not_bytes() {
    let text = "Źródło: żółć\nzażółć gęślą jaźń";
    let chunks = split_message(text, 16);

    assert_eq!(chunks, vec!["Źródło: żółć", "zażółć gęślą jaź", "ń"]);
    for chunk in &chunks {
        assert!(chunk.chars().count() <= 16);
    }
}

#[test]
fn chunks_respect_budget_and_keep_content() {
    let text = (0..200)
        .map(|i| format!("line {i} {}", "x".repeat(i % 37)))
        .collect::<Vec<_>>()
        .join("\n");

    for max_len in [10, 64, 100, 999] {
        let chunks = split_message(&text, max_len);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(!chunk.is_empty());
            assert_eq!(chunk.as_str(), chunk.trim());
            assert!(chunk.chars().count() <= max_len);
        }
        assert_eq!(non_whitespace(&chunks.concat()), non_whitespace(&text));
    }
}

#[test]
fn long_brief_splits_into_three_line_aligned_chunks() {
    let mut lines = vec![format!("{:<79}", "URL: https://example.com/jobs/report")];
    lines.extend((1..113).map(|i| format!("{:03}{}", i, "-".repeat(76))));
    let brief = lines.join("\n");
    assert!(brief.chars().count() >= 9000);

    let chunks = split_message(&brief, 3800);

    assert_eq!(chunks.len(), 3);
    for chunk in &chunks {
        assert!(chunk.chars().count() <= 3800);
    }
    for chunk in &chunks[..2] {
        // Every line survives whole: no cut landed inside a line.
        for line in chunk.lines() {
            assert!(lines.iter().any(|l| l.trim_end() == line.trim_end()));
        }
    }
    assert_eq!(non_whitespace(&chunks.concat()), non_whitespace(&brief));
}
