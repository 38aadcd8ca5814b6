// tests/sentiment_props.rs
//
// Totality and boundedness of the scorer over hostile inputs.

use social_listening::sentiment::SentimentAnalyzer;

#[test]
fn any_nonempty_text_scores_within_bounds() {
    let a = SentimentAnalyzer::new();
    let inputs = [
        "plain text",
        "ALL CAPS SHOUTING ABOUT BUGS AND CRASHES",
        "mixed 语言 текст with 🦀 emoji",
        "!!!???...,,,", // punctuation only: no tokens, absent score
        "\u{0000}\u{0007} control chars \u{200B}",
        &"word ".repeat(10_000),
    ];
    for input in inputs {
        match a.score(input) {
            Some(s) => assert!(
                (-1.0..=1.0).contains(&s),
                "score {s} out of bounds for {input:?}"
            ),
            None => assert!(
                input.chars().all(|c| !c.is_alphanumeric()),
                "absent score for tokenizable input {input:?}"
            ),
        }
    }
}

#[test]
fn empty_input_is_absent_not_an_error() {
    let a = SentimentAnalyzer::new();
    assert_eq!(a.score(""), None);
}
