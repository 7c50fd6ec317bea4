//! Sequential message names

/// Words for 0..=20 and the tens up to 90
fn number_word(n: usize) -> Option<&'static str> {
    let word = match n {
        0 => "Zero",
        1 => "One",
        2 => "Two",
        3 => "Three",
        4 => "Four",
        5 => "Five",
        6 => "Six",
        7 => "Seven",
        8 => "Eight",
        9 => "Nine",
        10 => "Ten",
        11 => "Eleven",
        12 => "Twelve",
        13 => "Thirteen",
        14 => "Fourteen",
        15 => "Fifteen",
        16 => "Sixteen",
        17 => "Seventeen",
        18 => "Eighteen",
        19 => "Nineteen",
        20 => "Twenty",
        30 => "Thirty",
        40 => "Forty",
        50 => "Fifty",
        60 => "Sixty",
        70 => "Seventy",
        80 => "Eighty",
        90 => "Ninety",
        _ => return None,
    };
    Some(word)
}

/// Table word when there is one, otherwise the leading digits composed the
/// same way followed by the units word (21 -> "TwoOne", 105 -> "TenFive").
fn compose(n: usize) -> String {
    match number_word(n) {
        Some(word) => word.to_string(),
        None => {
            let mut name = compose(n / 10);
            name.push_str(number_word(n % 10).unwrap_or_default());
            name
        }
    }
}

/// Name for the message created when the registry holds `count` entries.
///
/// Depends only on `count`, never on message content.
pub fn allocate(count: usize) -> String {
    format!("Msg{}", compose(count))
}
