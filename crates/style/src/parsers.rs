//! Low-level nom parser functions for style values.

use nom::bytes::complete::{tag_no_case, take_while_m_n};
use nom::character::complete::char;
use nom::combinator::{opt, recognize};
use nom::sequence::pair;
use nom::{IResult, Parser};
use thiserror::Error;

/// Errors that can occur during style value parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    #[error("Invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },
}

fn parse_f32(input: &str) -> IResult<&str, f32> {
    let (rest, digits) = recognize(pair(
        take_while_m_n(1, 10, |c: char| c.is_ascii_digit()),
        opt(pair(
            char('.'),
            take_while_m_n(1, 10, |c: char| c.is_ascii_digit()),
        )),
    ))
    .parse(input)?;
    match digits.parse::<f32>() {
        Ok(value) => Ok((rest, value)),
        Err(_) => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Float,
        ))),
    }
}

/// Parses a point size ("12pt", "10.5pt", or bare "12") into points.
pub fn parse_point_size(input: &str) -> Result<f32, StyleError> {
    let trimmed = input.trim();
    let invalid = || StyleError::InvalidValue {
        property: "font-size".to_string(),
        value: input.to_string(),
    };
    let (rest, (value, _unit)) = (parse_f32, opt(tag_no_case("pt")))
        .parse(trimmed)
        .map_err(|_| invalid())?;
    if !rest.is_empty() {
        return Err(invalid());
    }
    Ok(value)
}
