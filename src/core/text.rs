//! Text normalization shared by icon slugs and station titles.

use std::sync::LazyLock;

use regex::Regex;

/// Accented letters folded to ASCII before slugging, paired index by index
/// with [`ASCII_FOLD_TO`].
const ASCII_FOLD_FROM: &str = "ąàáäâãåæăćęèéëêìíïîłńòóöôõøśșțùúüûñçżź";
const ASCII_FOLD_TO: &str = "aaaaaaaaaceeeeeiiiilnoooooosstuuuunczz";

static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s-]").expect("valid regex"));
static DASH_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_\s]+").expect("valid regex"));
static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z\d])([A-Z]+)").expect("valid regex"));
static SPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("valid regex"));
static TRAILING_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_id$").expect("valid regex"));

fn fold_char(c: char) -> char {
    match ASCII_FOLD_FROM.chars().position(|f| f == c) {
        Some(idx) => ASCII_FOLD_TO.chars().nth(idx).unwrap_or('-'),
        None => c,
    }
}

/// Turn arbitrary text into a lowercase, hyphen-separated slug.
///
/// Accented Latin letters are folded to ASCII, every other character that
/// is not alphanumeric, `_`, `-` or whitespace is dropped, and runs of
/// separators collapse to a single `-`.
///
/// ```
/// use ratp_importer::core::text::slugify;
///
/// assert_eq!(slugify("bus_NOCT-N01"), "bus-noct-n01");
/// assert_eq!(slugify("Tramway Île-de-France"), "tramway-ile-de-france");
/// ```
pub fn slugify(input: &str) -> String {
    let folded: String = input.to_lowercase().chars().map(fold_char).collect();
    let cleaned = NON_SLUG_CHARS.replace_all(&folded, "");
    DASH_RUNS
        .replace_all(cleaned.trim(), "-")
        .into_owned()
}

/// Turn machine-formatted text into sentence-case natural language.
///
/// Camel-case boundaries and runs of `-` or whitespace become word breaks,
/// the text is lowercased, a trailing `_id` is dropped, underscores become
/// spaces and the first letter is capitalized.
pub fn humanize(input: &str) -> String {
    let underscored = CAMEL_BOUNDARY.replace_all(input.trim(), "${1}_${2}");
    let underscored = SPACE_RUNS.replace_all(&underscored, "_").to_lowercase();
    let spaced = TRAILING_ID.replace(&underscored, "").replace('_', " ");
    capitalize(spaced.trim())
}

fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
