// format.rs
// Pure helpers that turn raw API fragments into display strings.

use crate::pokemon::Stat;

pub const LIST_SEPARATOR: &str = ", ";

/// Upper-cases the first character and lower-cases the rest.
///
/// Hyphenated names keep their hyphen: `lightning-rod` becomes
/// `Lightning-rod`.
pub fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Joins items with `", "`. Empty input gives an empty string.
pub fn join_list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

pub fn stat_line(stat: &Stat) -> String {
    format!("{} : {}", stat.name, stat.value)
}

/// One `Name : value` line per stat, no trailing newline.
pub fn stat_table(stats: &[Stat]) -> String {
    stats.iter().map(stat_line).collect::<Vec<_>>().join("\n")
}

pub fn spread(nature: &str, evs: &str) -> String {
    format!("{}{}{}", title_case(nature), LIST_SEPARATOR, evs)
}
