//! Recovery of legacy-encoded entry names.
//!
//! ZIP entries carry a UTF-8 flag, but many Windows archivers on Chinese
//! systems wrote GBK names without it. Readers then decode those bytes as
//! CP437 (the format's default code page) and produce box-drawing
//! mojibake such as `▓Γ╩╘╬─╝■.docx` for `测试文件.docx`.
//!
//! [`decode_entry_name`] undoes that with a heuristic, not a charset
//! detector:
//!
//! - pure ASCII names are returned as-is;
//! - names without any of the [`MOJIBAKE_MARKERS`] are returned as-is, even
//!   if they happen to be legacy-encoded (a GBK name whose bytes map only to
//!   non-marker CP437 characters is not recovered);
//! - otherwise the name is re-encoded as CP437 and the bytes decoded as GBK.
//!   If either step fails the stored name is returned unchanged.

use std::borrow::Cow;

use encoding_rs::GBK;
use oem_cp::code_table::ENCODING_TABLE_CP437;
use oem_cp::encode_string_checked;

/// Box-drawing and block characters that GBK lead bytes (0xB0..=0xDF)
/// turn into when read as CP437.
pub const MOJIBAKE_MARKERS: [char; 35] = [
    '╬', '║', '═', '╔', '╦', '╩', '╚', '╠', '╣', '╧', '╨', '╤', '┐', '┘', '┌', '└', '─', '│', '▒',
    '▓', '░', '╪', '╫', '╘', '╛', '╒', '╓', '╜', '╞', '╟', '╢', '╖', '╕', '╝', '╗',
];

/// Decodes a stored entry name, recovering GBK text misread as CP437.
///
/// Returns `Cow::Borrowed` when the stored name is kept and `Cow::Owned`
/// when it was recovered.
///
/// # Examples
///
/// ```
/// use deepzip_core::names::decode_entry_name;
/// use std::borrow::Cow;
///
/// assert_eq!(decode_entry_name("▓Γ╩╘╬─╝■.docx"), "测试文件.docx");
/// assert!(matches!(decode_entry_name("report.docx"), Cow::Borrowed(_)));
/// ```
#[must_use]
pub fn decode_entry_name(stored: &str) -> Cow<'_, str> {
    if stored.is_ascii() || !has_mojibake_markers(stored) {
        return Cow::Borrowed(stored);
    }

    reinterpret_as_gbk(stored).map_or(Cow::Borrowed(stored), Cow::Owned)
}

/// Returns `true` if `name` contains at least one marker character.
#[must_use]
pub fn has_mojibake_markers(name: &str) -> bool {
    name.chars().any(|c| MOJIBAKE_MARKERS.contains(&c))
}

fn reinterpret_as_gbk(name: &str) -> Option<String> {
    let raw = encode_string_checked(name, &ENCODING_TABLE_CP437)?;
    GBK.decode_without_bom_handling_and_without_replacement(&raw)
        .map(Cow::into_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovers_gbk_name() {
        // GBK bytes b2 e2 ca d4 ce c4 bc fe read as CP437
        assert_eq!(decode_entry_name("▓Γ╩╘╬─╝■.docx"), "测试文件.docx");
    }

    #[test]
    fn test_recovers_name_inside_directory() {
        // 你好 = c4 e3 ba c3, 资料 = d7 ca c1 cf
        let decoded = decode_entry_name("╫╩┴╧/─π║├.txt");
        assert_eq!(decoded, "资料/你好.txt");
        assert!(matches!(decoded, Cow::Owned(_)));
    }

    #[test]
    fn test_ascii_unchanged() {
        let name = "docs/readme.md";
        assert!(matches!(decode_entry_name(name), Cow::Borrowed(n) if n == name));
    }

    #[test]
    fn test_empty_unchanged() {
        assert_eq!(decode_entry_name(""), "");
    }

    #[test]
    fn test_no_markers_unchanged() {
        // 大 = b4 f3 reads as "┤≤", which contains no marker character
        let decoded = decode_entry_name("┤≤.txt");
        assert!(matches!(decoded, Cow::Borrowed("┤≤.txt")));
    }

    #[test]
    fn test_genuine_unicode_unchanged() {
        let name = "测试文件.docx";
        assert!(matches!(decode_entry_name(name), Cow::Borrowed(n) if n == name));
    }

    #[test]
    fn test_cp437_encode_failure_falls_back() {
        // 日 has no CP437 byte
        let name = "╬日.txt";
        assert!(matches!(decode_entry_name(name), Cow::Borrowed(n) if n == name));
    }

    #[test]
    fn test_gbk_decode_failure_falls_back() {
        // a lone lead byte 0xce is not valid GBK
        let name = "╬";
        assert!(matches!(decode_entry_name(name), Cow::Borrowed(n) if n == name));
    }

    #[test]
    fn test_has_mojibake_markers() {
        assert!(has_mojibake_markers("a═b"));
        assert!(!has_mojibake_markers("plain"));
        assert!(!has_mojibake_markers("┤≤"));
    }
}
