//! Validation of symbol text arriving as UTF-16.
//!
//! A `&str` can never hold an unpaired surrogate, so this only matters for
//! text decoded from UTF-16 sources before it is interned.

use crate::error::{Result, SurrogateDefect, SymtabError};

/// Check that `units` is non-empty and contains no unpaired surrogate half.
pub fn validate_utf16(units: &[u16]) -> Result<()> {
    scan_utf16(units, |_| ())
}

/// Decode `units` into symbol text, rejecting empty text and unpaired
/// surrogates.
pub fn decode_utf16(units: &[u16]) -> Result<String> {
    let mut text = String::with_capacity(units.len());
    scan_utf16(units, |c| text.push(c))?;
    Ok(text)
}

fn scan_utf16(units: &[u16], mut emit: impl FnMut(char)) -> Result<()> {
    if units.is_empty() {
        return Err(SymtabError::EmptySymbolText);
    }

    let mut i = 0;
    while i < units.len() {
        let unit = units[i];
        let code = match unit {
            0xDC00..=0xDFFF => {
                return Err(SymtabError::InvalidSymbolText {
                    position: i,
                    defect: SurrogateDefect::UnpairedTrailing,
                });
            }
            0xD800..=0xDBFF => {
                i += 1;
                match units.get(i) {
                    Some(&low) if (0xDC00..=0xDFFF).contains(&low) => {
                        0x1_0000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00)
                    }
                    _ => {
                        return Err(SymtabError::InvalidSymbolText {
                            position: i,
                            defect: SurrogateDefect::UnmatchedLeading,
                        });
                    }
                }
            }
            _ => u32::from(unit),
        };
        let c = char::from_u32(code).ok_or(SymtabError::InvalidSymbolText {
            position: i,
            defect: SurrogateDefect::UnmatchedLeading,
        })?;
        emit(c);
        i += 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
