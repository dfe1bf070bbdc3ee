use std::num::NonZeroU32;

const UNITS: &[(&str, u32)] = &[
    ("ZERO", 0),
    ("ONE", 1),
    ("TWO", 2),
    ("THREE", 3),
    ("FOUR", 4),
    ("FIVE", 5),
    ("SIX", 6),
    ("SEVEN", 7),
    ("EIGHT", 8),
    ("NINE", 9),
    ("TEN", 10),
    ("ELEVEN", 11),
    ("TWELVE", 12),
    ("THIRTEEN", 13),
    ("FOURTEEN", 14),
    ("FIFTEEN", 15),
    ("SIXTEEN", 16),
    ("SEVENTEEN", 17),
    ("EIGHTEEN", 18),
    ("NINETEEN", 19),
];

const TENS: &[(&str, u32)] = &[
    ("TWENTY", 20),
    ("THIRTY", 30),
    ("FORTY", 40),
    ("FIFTY", 50),
    ("SIXTY", 60),
    ("SEVENTY", 70),
    ("EIGHTY", 80),
    ("NINETY", 90),
];

const SCALES: &[(&str, u32)] = &[
    ("HUNDRED", 100),
    ("THOUSAND", 1_000),
    ("MILLION", 1_000_000),
];

fn lookup(table: &[(&str, u32)], word: &str) -> Option<u32> {
    table.iter().find(|(w, _)| *w == word).map(|(_, v)| *v)
}

/// Convert a single spoken number word to its value.
///
/// Also accepts a tens word fused with a unit, which is what "twenty-five"
/// becomes once punctuation is stripped ("TWENTYFIVE").
pub fn word_to_number(word: &str) -> Option<u32> {
    let word = word.to_uppercase();

    if let Some(v) = lookup(UNITS, &word)
        .or_else(|| lookup(TENS, &word))
        .or_else(|| lookup(SCALES, &word))
    {
        return Some(v);
    }

    TENS.iter().find_map(|(tens, value)| {
        let unit = lookup(UNITS, word.strip_prefix(tens)?)?;
        (1..=9).contains(&unit).then_some(value + unit)
    })
}

/// Parse a quantity token: base-10 digits first, then a number word.
/// Zero and values that overflow are rejected.
pub fn parse_quantity(token: &str) -> Option<NonZeroU32> {
    let value = if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
        token.parse::<u32>().ok()?
    } else {
        word_to_number(token)?
    };
    NonZeroU32::new(value)
}
