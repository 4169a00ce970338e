//! Roman numeral rendering for volume labels.

const NUMERALS: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Render `n` in subtractive Roman notation, largest symbol first.
///
/// Zero has no numeral and falls back to `"I"`, the same label an absent
/// volume gets. Values of 4000 and above simply repeat `M`.
#[must_use]
pub fn to_roman(n: u32) -> String {
    if n == 0 {
        return "I".to_string();
    }

    let mut remaining = n;
    let mut out = String::new();
    for (value, symbol) in NUMERALS {
        while remaining >= value {
            out.push_str(symbol);
            remaining -= value;
        }
    }
    out
}

/// Roman rendering of an optional volume number (absent ⇒ volume 1).
#[must_use]
pub fn volume_numeral(volume: Option<u32>) -> String {
    to_roman(volume.unwrap_or(1))
}

/// Display label such as `"Volume IV"`.
#[must_use]
pub fn volume_label(volume: Option<u32>) -> String {
    format!("Volume {}", volume_numeral(volume))
}

/// Lower-cased labels a search query may name a volume by.
///
/// For volume 10: `10`, `x`, `volume 10`, `vol 10`, `volume x`, `vol x`.
#[must_use]
pub fn volume_search_labels(volume: u32) -> [String; 6] {
    let numeric = volume.to_string();
    let roman = to_roman(volume).to_lowercase();
    [
        format!("volume {numeric}"),
        format!("vol {numeric}"),
        format!("volume {roman}"),
        format!("vol {roman}"),
        numeric,
        roman,
    ]
}
