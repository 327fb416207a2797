use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for caption language codes
///
/// Caption services use BCP 47 style tags ("en", "en-GB", "zh-Hans", "fil").
/// These helpers validate and compare them through their primary ISO 639
/// subtag. Track selection itself always compares codes exactly.
/// Language code type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-3 / 639-2/T (3-letter) code
    Part3,
    /// ISO 639-2/B (3-letter) code
    Part2B,
}

/// ISO 639-2/B codes that differ from their 639-2/T counterpart
const PART2B_TO_PART2T: &[(&str, &str)] = &[
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

/// Primary language subtag of a tag, lowercased ("zh-Hans" -> "zh")
pub fn primary_subtag(code: &str) -> String {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

fn lookup(primary: &str) -> Option<(Language, LanguageCodeType)> {
    match primary.len() {
        2 => Language::from_639_1(primary).map(|l| (l, LanguageCodeType::Part1)),
        3 => {
            if let Some(lang) = Language::from_639_3(primary) {
                return Some((lang, LanguageCodeType::Part3));
            }
            PART2B_TO_PART2T
                .iter()
                .find(|(b, _)| *b == primary)
                .and_then(|(_, t)| Language::from_639_3(t))
                .map(|l| (l, LanguageCodeType::Part2B))
        }
        _ => None,
    }
}

/// Validate a caption language tag by its primary subtag
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    lookup(&primary_subtag(code))
        .map(|(_, kind)| kind)
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Check if two language tags name the same language, ignoring region and script
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (lookup(&primary_subtag(code1)), lookup(&primary_subtag(code2))) {
        (Some((a, _)), Some((b, _))) => a == b,
        _ => false,
    }
}

/// Get the English language name for a tag
pub fn get_language_name(code: &str) -> Result<String> {
    lookup(&primary_subtag(code))
        .map(|(lang, _)| lang.to_name().to_string())
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))
}
