use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Matches any string holding at least one non-whitespace character.
    /// - Valid: "Ana", "  x  "
    /// - Invalid: "", "   ", "\t\n"
    pub static ref NOT_BLANK_REGEX: Regex = Regex::new(r"\S").unwrap();
}
