//! Tokenizer: splits raw text into ordered tokens, and multi-sentence input
//! into independently-parsed sentences (core spec §4.1).

use senselink_lexicon::LexicalStore;

use crate::error::TokenizeError;
use crate::token::Token;

/// Splits `text` into sentences on the boundary `[.!?;]\s`, dropping the
/// separator along with any trailing punctuation, and skipping empty
/// sentences. Sentences are parsed independently (core spec §4.6); no
/// context carries across this boundary.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;
    while i < bytes.len() {
        let c = bytes[i];
        let is_boundary_char = matches!(c, b'.' | b'!' | b'?' | b';');
        if is_boundary_char && i + 1 < bytes.len() && (bytes[i + 1] as char).is_whitespace() {
            let sentence = &text[start..i];
            if !sentence.trim().is_empty() {
                sentences.push(sentence.trim());
            }
            start = i + 2;
            i += 2;
            continue;
        }
        i += 1;
    }
    let tail = &text[start.min(text.len())..];
    if !tail.trim().is_empty() {
        sentences.push(trim_trailing_terminator(tail.trim()));
    }
    sentences
}

fn trim_trailing_terminator(s: &str) -> &str {
    s.trim_end_matches(['.', '!', '?', ';'])
}

/// Splits `sentence` into (prefix, core, suffix) tokens in order.
/// Suffixes with a registered full-suffix expansion in `store` are expanded
/// into an additional token emitted immediately after the word they were
/// attached to, e.g. `"m'appelle"` becomes `[m, ', appelle]`.
pub fn tokenize(sentence: &str, locale: &str, store: &dyn LexicalStore) -> Vec<Token> {
    let mut tokens = Vec::new();
    for word in sentence.split_whitespace() {
        let (prefix, core, suffix) = segment(word);
        if !suffix.is_empty() {
            if let Some(expansion) = store.obtain_full_suffix(locale, &suffix) {
                tokens.push(Token::new(prefix, core, ""));
                // Whatever of the raw suffix precedes the expansion (e.g.
                // the elided apostrophe in "m'appelle" -> "appelle") is
                // emitted as its own pure-punctuation token; an expansion
                // that consumes the whole suffix (e.g. "'s" -> "'s")
                // instead becomes one token on its own.
                match suffix.strip_suffix(expansion.as_str()) {
                    Some(leftover) if !leftover.is_empty() => {
                        tokens.push(Token::new(leftover, "", ""));
                        tokens.push(Token::new("", expansion, ""));
                    }
                    _ => tokens.push(Token::new("", expansion, "")),
                }
                continue;
            }
        }
        tokens.push(Token::new(prefix, core, suffix));
    }
    tokens
}

/// Byte-oriented entry point that can actually fail with
/// [`TokenizeError`] when `bytes` is not valid UTF-8 (core spec §4.1,
/// §7 — the tokenizer's only failure mode). [`tokenize`] itself takes an
/// already-validated `&str` and cannot fail.
pub fn tokenize_bytes(
    bytes: &[u8],
    locale: &str,
    store: &dyn LexicalStore,
) -> Result<Vec<Token>, TokenizeError> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        let start = e.valid_up_to();
        let end = start + e.error_len().unwrap_or(bytes.len() - start);
        TokenizeError::at(format!("invalid UTF-8: {}", e), senselink_base::Span::new(start, end))
    })?;
    Ok(tokenize(text, locale, store))
}

/// Segments one whitespace-delimited word into (prefix, core, suffix):
/// the leading non-alphanumeric run, the maximal alphanumeric run, and
/// everything after it.
fn segment(word: &str) -> (String, String, String) {
    let core_start = word.char_indices().find(|(_, c)| c.is_alphanumeric()).map(|(i, _)| i);
    let core_start = match core_start {
        Some(i) => i,
        None => return (word.to_string(), String::new(), String::new()),
    };
    let core_end = word[core_start..]
        .char_indices()
        .find(|(_, c)| !c.is_alphanumeric())
        .map(|(i, _)| core_start + i)
        .unwrap_or(word.len());
    (word[..core_start].to_string(), word[core_start..core_end].to_string(), word[core_end..].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use senselink_lexicon::InMemoryLexicalStore;

    #[test]
    fn segment_splits_prefix_core_suffix() {
        assert_eq!(segment("(hello),"), ("(".to_string(), "hello".to_string(), "),".to_string()));
    }

    #[test]
    fn segment_handles_pure_punctuation() {
        assert_eq!(segment("..."), ("...".to_string(), String::new(), String::new()));
    }

    #[test]
    fn segment_handles_bare_word() {
        assert_eq!(segment("boys"), (String::new(), "boys".to_string(), String::new()));
    }

    #[test]
    fn split_sentences_drops_boundary_and_trailing_punctuation() {
        let sentences = split_sentences("Hi. Bye.");
        assert_eq!(sentences, vec!["Hi", "Bye"]);
    }

    #[test]
    fn split_sentences_handles_multiple_terminators() {
        let sentences = split_sentences("We are boys. My name's Tom! Really?");
        assert_eq!(sentences, vec!["We are boys", "My name's Tom", "Really"]);
    }

    #[test]
    fn split_sentences_on_empty_input_is_empty() {
        assert!(split_sentences("").is_empty());
    }

    #[test]
    fn split_sentences_single_sentence_no_terminator() {
        assert_eq!(split_sentences("Libro"), vec!["Libro"]);
    }

    #[test]
    fn tokenize_round_trips_prefix_core_suffix() {
        let store = InMemoryLexicalStore::new();
        let tokens = tokenize("We are boys", "en", &store);
        let reassembled: Vec<String> = tokens.iter().map(Token::to_string).collect();
        assert_eq!(reassembled, vec!["We", "are", "boys"]);
    }

    #[test]
    fn tokenize_expands_a_registered_full_suffix_with_elided_punctuation() {
        let store = InMemoryLexicalStore::new();
        store.seed_full_suffix("fr", "'appelle", "appelle");
        let tokens = tokenize("m'appelle", "fr", &store);
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0], Token::new("", "m", ""));
        assert_eq!(tokens[1], Token::new("'", "", ""));
        assert_eq!(tokens[2], Token::new("", "appelle", ""));
    }

    #[test]
    fn tokenize_expands_a_full_suffix_that_keeps_its_own_punctuation() {
        let store = InMemoryLexicalStore::new();
        store.seed_full_suffix("en", "'s", "'s");
        let tokens = tokenize("name's", "en", &store);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0], Token::new("", "name", ""));
        assert_eq!(tokens[1], Token::new("", "'s", ""));
    }

    #[test]
    fn tokenize_leaves_unregistered_suffix_attached() {
        let store = InMemoryLexicalStore::new();
        let tokens = tokenize("name's", "en", &store);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0], Token::new("", "name", "'s"));
    }

    #[test]
    fn tokenize_bytes_rejects_invalid_utf8() {
        let store = InMemoryLexicalStore::new();
        let invalid = [0xff, 0xfe, 0xfd];
        let err = tokenize_bytes(&invalid, "en", &store).unwrap_err();
        assert_eq!(err.span, senselink_base::Span::new(0, 1));
    }

    #[test]
    fn tokenize_bytes_invalid_utf8_span_points_past_the_valid_prefix() {
        let store = InMemoryLexicalStore::new();
        let mut invalid = b"boys".to_vec();
        invalid.push(0xff);
        let err = tokenize_bytes(&invalid, "en", &store).unwrap_err();
        assert_eq!(err.span, senselink_base::Span::new(4, 5));
    }

    #[test]
    fn tokenize_bytes_accepts_valid_utf8() {
        let store = InMemoryLexicalStore::new();
        let tokens = tokenize_bytes("boys".as_bytes(), "en", &store).unwrap();
        assert_eq!(tokens.len(), 1);
    }
}
