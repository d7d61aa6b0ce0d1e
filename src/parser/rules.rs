use nom::IResult;
use nom::bytes::complete::{take_till, take_while1};
use nom::character::complete::{anychar, char};
use nom::combinator::{map, opt, rest};
use nom::sequence::{pair, preceded};

/// Strips the leading dashes from an argument and counts them.
pub(super) fn leading_dashes(input: &str) -> IResult<&str, usize> {
    map(take_while1(|c: char| c == '-'), str::len)(input)
}

/// Splits `name=value` at the first `=`. A bare trailing `=` yields an empty
/// value rather than none.
pub(super) fn name_and_value(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    pair(take_till(|c: char| c == '='), opt(preceded(char('='), rest)))(input)
}

/// Takes the option letter at the front of a short option cluster.
pub(super) fn short_letter(input: &str) -> IResult<&str, char> {
    anychar(input)
}

/// Reads a value attached directly to a short option letter, dropping one
/// separating `=` if present.
pub(super) fn attached_value(input: &str) -> IResult<&str, &str> {
    preceded(opt(char('=')), rest)(input)
}
