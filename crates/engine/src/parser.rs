//! Free-text expense parser.
//!
//! A message is a handful of whitespace separated words, e.g.
//! `нал 1500 материалы краска ванная`. Words are classified in one left to
//! right pass:
//!
//! - the first payment keyword sets the payment type;
//! - the first decimal literal *after* the payment keyword is the amount;
//! - every category keyword overwrites the category, so the last one wins;
//! - whatever is left is the description, in original order.
//!
//! The precedence above decides between plausible readings of an ambiguous
//! line and must not change.

use rust_decimal::Decimal;
use unicode_normalization::UnicodeNormalization;

use crate::{Category, Expense, ParseError, PaymentType};

const MIN_WORDS: usize = 2;

fn payment_keyword(word: &str) -> Option<PaymentType> {
    match word {
        "нал" | "наличные" => Some(PaymentType::Cash),
        "карта" => Some(PaymentType::Card),
        _ => None,
    }
}

fn category_keyword(word: &str) -> Option<Category> {
    match word {
        "материалы" => Some(Category::Materials),
        "услуги" => Some(Category::Labor),
        "инструменты" => Some(Category::Tools),
        "мебель" => Some(Category::Furniture),
        _ => None,
    }
}

/// Reads a non-negative decimal literal: ASCII digits with an optional
/// fractional part, where either side of the point may be empty (`.5`, `1.`).
/// Signs, exponents and digit separators are refused, as is anything
/// `Decimal` cannot hold exactly (more than 28 significant digits).
fn amount(word: &str) -> Option<Decimal> {
    let (int, frac) = word.split_once('.').unwrap_or((word, ""));
    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (int.is_empty() && frac.is_empty()) || !digits(int) || !digits(frac) {
        return None;
    }

    let int = if int.is_empty() { "0" } else { int };
    let literal = if frac.is_empty() {
        int.to_string()
    } else {
        format!("{int}.{frac}")
    };
    Decimal::from_str_exact(&literal).ok()
}

/// Parses a chat message into an unsaved [`Expense`].
///
/// The returned expense has a fresh id, `created_at == updated_at == now` and
/// `user_id` left at 0 for the caller to fill in.
pub fn parse(input: &str) -> Result<Expense, ParseError> {
    let input: String = input.nfc().collect::<String>().to_lowercase();
    let words: Vec<&str> = input.split_whitespace().collect();
    if words.is_empty() {
        return Err(ParseError::EmptyMessage);
    }
    if words.len() < MIN_WORDS {
        return Err(ParseError::NotEnoughData);
    }

    let mut payment_type: Option<PaymentType> = None;
    let mut value: Option<Decimal> = None;
    let mut category = Category::Unexpected;
    let mut description: Vec<&str> = Vec::with_capacity(words.len() - MIN_WORDS);

    for word in words {
        if payment_type.is_none()
            && let Some(found) = payment_keyword(word)
        {
            payment_type = Some(found);
            continue;
        }

        if payment_type.is_some()
            && value.is_none()
            && let Some(found) = amount(word)
        {
            value = Some(found);
            continue;
        }

        if let Some(found) = category_keyword(word) {
            category = found;
            continue;
        }

        description.push(word);
    }

    let payment_type = payment_type.ok_or(ParseError::PaymentTypeNotFound)?;
    let amount = value.ok_or(ParseError::AmountNotFound)?;

    Ok(Expense::new(
        category,
        payment_type,
        description.join(" "),
        amount,
    ))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::Utc;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn empty_and_blank_messages() {
        assert_eq!(parse("").unwrap_err(), ParseError::EmptyMessage);
        assert_eq!(parse("   ").unwrap_err(), ParseError::EmptyMessage);
        assert_eq!(parse("\n\t").unwrap_err(), ParseError::EmptyMessage);
    }

    #[test]
    fn single_word_is_not_enough() {
        assert_eq!(parse("нал").unwrap_err(), ParseError::NotEnoughData);
    }

    #[test]
    fn missing_payment_type() {
        assert_eq!(
            parse("1200 обои").unwrap_err(),
            ParseError::PaymentTypeNotFound
        );
    }

    #[test]
    fn missing_amount() {
        assert_eq!(parse("нал краска").unwrap_err(), ParseError::AmountNotFound);
        assert_eq!(
            parse("карта тысяча обои").unwrap_err(),
            ParseError::AmountNotFound
        );
    }

    #[test]
    fn labor_with_description() {
        let e = parse("нал 5000 услуги демонтаж").unwrap();
        assert_eq!(e.payment_type, PaymentType::Cash);
        assert_eq!(e.category, Category::Labor);
        assert_eq!(e.amount, dec("5000"));
        assert_eq!(e.description, "демонтаж");
    }

    #[test]
    fn no_category_keyword_falls_back_to_unexpected() {
        let e = parse("карта 3200 двери").unwrap();
        assert_eq!(e.payment_type, PaymentType::Card);
        assert_eq!(e.category, Category::Unexpected);
        assert_eq!(e.amount, dec("3200"));
        assert_eq!(e.description, "двери");
    }

    #[test]
    fn fractional_amount_and_multiword_description() {
        let e = parse("Наличные 1500.50 материалы Краска Ванная").unwrap();
        assert_eq!(e.payment_type, PaymentType::Cash);
        assert_eq!(e.category, Category::Materials);
        assert_eq!(e.amount, dec("1500.50"));
        assert_eq!(e.description, "краска ванная");
    }

    #[test]
    fn number_before_payment_keyword_is_description() {
        let e = parse("2 карта 700 мебель стула").unwrap();
        assert_eq!(e.amount, dec("700"));
        assert_eq!(e.category, Category::Furniture);
        assert_eq!(e.description, "2 стула");
    }

    #[test]
    fn first_payment_keyword_wins() {
        let e = parse("карта 100 нал").unwrap();
        assert_eq!(e.payment_type, PaymentType::Card);
        assert_eq!(e.description, "нал");
    }

    #[test]
    fn first_amount_after_payment_wins() {
        let e = parse("нал 100 200 клей").unwrap();
        assert_eq!(e.amount, dec("100"));
        assert_eq!(e.description, "200 клей");
    }

    #[test]
    fn last_category_keyword_wins() {
        let e = parse("нал 100 материалы инструменты мебель").unwrap();
        assert_eq!(e.category, Category::Furniture);
        assert_eq!(e.description, "");
    }

    #[test]
    fn category_before_payment_is_still_a_category() {
        let e = parse("инструменты карта 4500 перфоратор").unwrap();
        assert_eq!(e.category, Category::Tools);
        assert_eq!(e.payment_type, PaymentType::Card);
        assert_eq!(e.description, "перфоратор");
    }

    #[test]
    fn signed_or_malformed_numbers_are_not_amounts() {
        assert_eq!(parse("нал -5").unwrap_err(), ParseError::AmountNotFound);
        assert_eq!(parse("нал +5").unwrap_err(), ParseError::AmountNotFound);
        assert_eq!(parse("нал 1e3").unwrap_err(), ParseError::AmountNotFound);
        assert_eq!(parse("нал 1_000").unwrap_err(), ParseError::AmountNotFound);
        assert_eq!(parse("нал .").unwrap_err(), ParseError::AmountNotFound);
        assert_eq!(parse("нал 1.2.3").unwrap_err(), ParseError::AmountNotFound);
    }

    #[test]
    fn bare_point_literals_are_amounts() {
        let e = parse("нал .5 клей").unwrap();
        assert_eq!(e.amount, dec("0.5"));
        assert_eq!(e.description, "клей");

        let e = parse("нал 1. клей").unwrap();
        assert_eq!(e.amount, dec("1"));
        assert_eq!(e.description, "клей");
    }

    #[test]
    fn amounts_beyond_decimal_precision_are_refused() {
        assert_eq!(
            parse("нал 123456789012345678901234567890 клей").unwrap_err(),
            ParseError::AmountNotFound
        );
        assert_eq!(
            parse("нал 0.123456789012345678901234567891 клей").unwrap_err(),
            ParseError::AmountNotFound
        );

        let e = parse("нал 1234567890123456789012345678 клей").unwrap();
        assert_eq!(e.amount, dec("1234567890123456789012345678"));
    }

    #[test]
    fn zero_is_a_valid_amount() {
        let e = parse("нал 0 подарок").unwrap();
        assert_eq!(e.amount, Decimal::ZERO);
    }

    #[test]
    fn decomposed_unicode_matches_keywords() {
        // "наличные" is unaffected by NFC, "й" is: и + combining breve.
        let decomposed = "нал 10 чаи\u{306}";
        let e = parse(decomposed).unwrap();
        assert_eq!(e.description, "чай");
    }

    #[test]
    fn fresh_identity_and_timestamps() {
        let before = Utc::now();
        let a = parse("нал 1 a").unwrap();
        let b = parse("нал 1 a").unwrap();
        let after = Utc::now();

        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, a.updated_at);
        assert!(a.created_at <= after);
        // Stored precision is microseconds, so allow for the truncation.
        assert!(a.created_at >= before - chrono::Duration::microseconds(1));
        assert_eq!(a.user_id, 0);
        assert!(a.deleted_at.is_none());
    }
}
