//! Library of parser functions for text mesh records

// crate modules
use crate::error::{Error, Result};

// hydromesh modules
use hydromesh_utils::f;

// nom parser combinators
use nom::bytes::complete::tag;
use nom::character::complete::{alpha1, digit1, one_of, space0, space1};
use nom::combinator::{all_consuming, map_res, opt, recognize, verify};
use nom::multi::{many0, many1};
use nom::number::complete::double;
use nom::sequence::{delimited, pair, preceded, tuple};
use nom::IResult;

/// Node record, `<id> <x> <y> <z>`
pub type NodeRecord = (i64, f64, f64, f64);

// ! Boolean checks

/// Check for a 2DM node card
pub fn is_twodm_node(i: &str) -> bool {
    i.starts_with("ND ")
}

/// Check for a 2DM triangle card
pub fn is_twodm_triangle(i: &str) -> bool {
    i.starts_with("E3T ")
}

/// Check for any 2DM element card other than a linear triangle
///
/// e.g. `E4Q`, `E6T`, `E8Q`, `E9Q`, `E2L`, `E3L`
pub fn is_twodm_other_element(i: &str) -> bool {
    let card = i.split_whitespace().next().unwrap_or_default();
    card.len() == 3
        && card.starts_with('E')
        && card != "E3T"
        && card.chars().nth(1).is_some_and(|c| c.is_ascii_digit())
}

// ! Parser combinators

/// Signed integer e.g. `-12`
pub fn integer(i: &str) -> IResult<&str, i64> {
    map_res(recognize(pair(opt(one_of("+-")), digit1)), str::parse)(i)
}

/// Unsigned count e.g. `1024`
pub fn count(i: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse)(i)
}

/// Any finite real number, `1`, `-0.5`, and `1.0e+03` included
///
/// `nan` and `inf` are rejected.
pub fn real(i: &str) -> IResult<&str, f64> {
    verify(double, |v: &f64| v.is_finite())(i)
}

/// Pair of counts, e.g. the `<E> <N>` ADCIRC header
pub fn counts(i: &str) -> IResult<&str, (usize, usize)> {
    let (i, (a, _, b)) = tuple((count, space1, count))(i)?;
    Ok((i, (a, b)))
}

/// Node record `<id> <x> <y> <z>`
pub fn node(i: &str) -> IResult<&str, NodeRecord> {
    let (i, (id, _, x, _, y, _, z)) =
        tuple((integer, space1, real, space1, real, space1, real))(i)?;
    Ok((i, (id, x, y, z)))
}

/// Element record `<id> <type> <n1> <n2> ...`
pub fn element(i: &str) -> IResult<&str, (i64, i64, Vec<i64>)> {
    let (i, (id, _, kind, nodes)) =
        tuple((integer, space1, integer, many1(preceded(space1, integer))))(i)?;
    Ok((i, (id, kind, nodes)))
}

/// 2DM node card `ND <id> <x> <y> <z>`
pub fn twodm_node(i: &str) -> IResult<&str, NodeRecord> {
    preceded(pair(tag("ND"), space1), node)(i)
}

/// 2DM triangle card `E3T <id> <n1> <n2> <n3> [<material>]`
pub fn twodm_triangle(i: &str) -> IResult<&str, (i64, [i64; 3])> {
    let (i, (_, id, _, a, _, b, _, c, _)) = tuple((
        tag("E3T"),
        preceded(space1, integer),
        space1,
        integer,
        space1,
        integer,
        space1,
        integer,
        opt(preceded(space1, integer)),
    ))(i)?;
    Ok((i, (id, [a, b, c])))
}

/// PLY header element declaration `element <name> <count>`
pub fn ply_element(i: &str) -> IResult<&str, (&str, usize)> {
    let (i, (_, _, name, _, n)) = tuple((tag("element"), space1, alpha1, space1, count))(i)?;
    Ok((i, (name, n)))
}

/// PLY vertex `<x> <y> <z>`, followed by any other scalar properties
pub fn ply_vertex(i: &str) -> IResult<&str, (f64, f64, f64)> {
    let (i, (x, _, y, _, z, _)) = tuple((
        real,
        space1,
        real,
        space1,
        real,
        many0(preceded(space1, real)),
    ))(i)?;
    Ok((i, (x, y, z)))
}

/// PLY face `<n> <i1> ... <in>` with 0-based vertex indices
pub fn ply_face(i: &str) -> IResult<&str, (usize, Vec<i64>)> {
    tuple((count, many1(preceded(space1, integer))))(i)
}

/// Run a parser over a whole line, ignoring surrounding blanks
///
/// Anything left over, or any token the parser does not accept, fails the
/// record with the line number for context.
pub fn parse_line<'a, T, F>(parser: F, input: &'a str, line: usize) -> Result<T>
where
    F: FnMut(&'a str) -> IResult<&'a str, T>,
{
    let trimmed = input.trim_end_matches(['\r', '\n']);
    all_consuming(delimited(space0, parser, space0))(trimmed)
        .map(|(_, value)| value)
        .map_err(|_| Error::MalformedTextRecord {
            line,
            reason: f!("could not parse \"{}\"", trimmed.trim()),
        })
}

/// Convert a 1-based number from a file to a 0-based index
pub fn to_index(what: &'static str, value: i64, count: usize) -> Result<usize> {
    if value < 1 || value as u64 > count as u64 {
        return Err(Error::IndexOutOfRange {
            what,
            index: value,
            count,
        });
    }
    Ok(value as usize - 1)
}
