use super::*;

fn utf16(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

#[test]
fn test_decode_plain_and_paired_text() {
    assert_eq!(decode_utf16(&utf16("ginger")), Ok("ginger".to_owned()));
    assert_eq!(decode_utf16(&utf16("a\u{1F600}b")), Ok("a\u{1F600}b".to_owned()));
    assert_eq!(validate_utf16(&utf16("\u{10FFFF}")), Ok(()));
}

#[test]
fn test_empty_text() {
    assert_eq!(decode_utf16(&[]), Err(SymtabError::EmptySymbolText));
}

#[test]
fn test_lone_high_surrogate_at_end() {
    assert_eq!(
        validate_utf16(&[u16::from(b'a'), 0xD800]),
        Err(SymtabError::InvalidSymbolText {
            position: 2,
            defect: SurrogateDefect::UnmatchedLeading,
        })
    );
}

#[test]
fn test_high_surrogate_followed_by_non_surrogate() {
    assert_eq!(
        validate_utf16(&[0xD83D, u16::from(b'x')]),
        Err(SymtabError::InvalidSymbolText {
            position: 1,
            defect: SurrogateDefect::UnmatchedLeading,
        })
    );
}

#[test]
fn test_two_high_surrogates() {
    assert!(matches!(
        validate_utf16(&[0xD83D, 0xD83D, 0xDE00]),
        Err(SymtabError::InvalidSymbolText {
            defect: SurrogateDefect::UnmatchedLeading,
            ..
        })
    ));
}

#[test]
fn test_lone_low_surrogate() {
    assert_eq!(
        validate_utf16(&[u16::from(b'a'), 0xDE00, u16::from(b'b')]),
        Err(SymtabError::InvalidSymbolText {
            position: 1,
            defect: SurrogateDefect::UnpairedTrailing,
        })
    );
}

#[test]
fn test_error_message() {
    let err = validate_utf16(&[0xDC00]).err().map(|e| e.to_string());
    assert_eq!(
        err.as_deref(),
        Some("unpaired trailing surrogate in symbol name at position 0")
    );
}
