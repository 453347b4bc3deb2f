//! Default values substituted for missing or unparseable source fields

/// Walking speed in feet when a race lists none
pub const DEFAULT_WALK_SPEED: i64 = 30;

/// Movement mode used for bare speed values
pub const WALK: &str = "walk";

/// Hit die size when a class lists none
pub const DEFAULT_HIT_DIE: i64 = 8;

/// Rarity assigned to items without one
pub const DEFAULT_RARITY: &str = "common";

/// Cost and weight strings that mean "no value"
pub const NO_VALUE_TOKENS: &[&str] = &["", "-", "—", "–", "varies", "special", "n/a", "none"];

/// Maximum number of archetypes taken from a class description
pub const MAX_ARCHETYPES: usize = 10;

/// Extracted archetype names of this many characters or fewer are discarded
pub const MIN_ARCHETYPE_LEN: usize = 3;

/// Number of sample records shown per report section
pub const REPORT_SAMPLE_SIZE: usize = 3;

/// Group label for records without a source document
pub const UNKNOWN_SOURCE: &str = "unknown";

/// Returns true if a free-text value is one of the "no value" tokens
pub fn is_no_value_token(text: &str) -> bool {
    let lowered = text.trim().to_lowercase();
    NO_VALUE_TOKENS.contains(&lowered.as_str())
}
