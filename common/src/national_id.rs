//! 個人識別番号（CPF形式）の入力マスク
//!
//! 入力中の値を 3-3-3-2 桁のグループ表示 `000.000.000-00` に整形する。

/// 桁数の上限
pub const MAX_DIGITS: usize = 11;

/// 入力値を整形する
///
/// 数字以外は捨て、11桁で切り詰めてから区切りを入れる。
/// 入力途中の値は揃っているグループまで区切る（`"1234"` → `"123.4"`）。
pub fn format_national_id(raw: &str) -> String {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(MAX_DIGITS)
        .collect();

    let len = digits.len();
    match len {
        0..=3 => digits,
        4..=6 => format!("{}.{}", &digits[..3], &digits[3..]),
        7..=9 => format!("{}.{}.{}", &digits[..3], &digits[3..6], &digits[6..]),
        _ => format!(
            "{}.{}.{}-{}",
            &digits[..3],
            &digits[3..6],
            &digits[6..9],
            &digits[9..]
        ),
    }
}

/// 整形済みの値から数字だけを取り出す
pub fn national_id_digits(formatted: &str) -> String {
    formatted.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// 11桁そろっているか
pub fn is_complete(formatted: &str) -> bool {
    national_id_digits(formatted).len() == MAX_DIGITS
}
