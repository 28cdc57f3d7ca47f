//! Plain-text problem format.
//!
//! Input is a sequence of test cases, whitespace separated:
//!
//! ```text
//! N R
//! lon_1 lat_1
//! ...
//! lon_N lat_N
//! Q
//! s_1 t_1 c_1
//! ...
//! ```
//!
//! Airport indices are 1-based. Input ends at end of file or at a case with
//! `N = 0`. Output is a `Case k:` header per case followed by one line per
//! query: the distance with three decimals, or `impossible`.

use std::fmt::Write;
use std::str::{FromStr, SplitWhitespace};

use log::debug;
use thiserror::Error;

use crate::config::SolverConfig;
use crate::geometry::point::Scalar;
use crate::graph::graph::SafetyNetwork;
use crate::query::query::{Query, QueryEngine, QueryError};
use crate::Airport;

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: &'static str },
    #[error("token {position} ({token:?}) is not a valid {expected}")]
    InvalidToken {
        expected: &'static str,
        token: String,
        position: usize,
    },
    #[error("query {query} names airport {index}, but only {count} airports exist")]
    AirportOutOfRange {
        query: usize,
        index: usize,
        count: usize,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum SolveError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// One airport set with its safety radius and the queries asked against it.
#[derive(Clone, Debug, PartialEq)]
pub struct TestCase {
    pub safety_radius: Scalar,
    pub airports: Vec<Airport>,
    pub queries: Vec<Query>,
}

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
    position: usize,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Tokens {
            inner: input.split_whitespace(),
            position: 0,
        }
    }

    fn next_opt<T: FromStr>(&mut self, expected: &'static str) -> Result<Option<T>, ParseError> {
        let Some(token) = self.inner.next() else {
            return Ok(None);
        };
        self.position += 1;
        token
            .parse()
            .map(Some)
            .map_err(|_| ParseError::InvalidToken {
                expected,
                token: token.to_string(),
                position: self.position,
            })
    }

    fn next<T: FromStr>(&mut self, expected: &'static str) -> Result<T, ParseError> {
        self.next_opt(expected)?
            .ok_or(ParseError::UnexpectedEnd { expected })
    }
}

pub fn parse_cases(input: &str) -> Result<Vec<TestCase>, ParseError> {
    let mut tokens = Tokens::new(input);
    let mut cases = Vec::new();

    while let Some(count) = tokens.next_opt::<usize>("airport count")? {
        if count == 0 {
            break;
        }
        let safety_radius = tokens.next("safety radius")?;

        let mut airports = Vec::new();
        for id in 1..=count {
            let lon = tokens.next("longitude")?;
            let lat = tokens.next("latitude")?;
            airports.push(Airport {
                id: id as u32,
                lon,
                lat,
            });
        }

        let query_count: usize = tokens.next("query count")?;
        let mut queries = Vec::new();
        for query in 1..=query_count {
            let source = airport_index(tokens.next("source airport")?, query, count)?;
            let destination = airport_index(tokens.next("destination airport")?, query, count)?;
            let fuel_capacity = tokens.next("fuel capacity")?;
            queries.push(Query {
                source,
                destination,
                fuel_capacity,
            });
        }

        cases.push(TestCase {
            safety_radius,
            airports,
            queries,
        });
    }

    debug!("parsed {} test cases", cases.len());
    Ok(cases)
}

fn airport_index(one_based: usize, query: usize, count: usize) -> Result<usize, ParseError> {
    if one_based == 0 || one_based > count {
        return Err(ParseError::AirportOutOfRange {
            query,
            index: one_based,
            count,
        });
    }
    Ok(one_based - 1)
}

impl TestCase {
    pub fn network(&self, config: &SolverConfig) -> SafetyNetwork {
        let sphere = config.sphere();
        let positions = self.airports.iter().map(|a| a.position(&sphere)).collect();
        SafetyNetwork::build(sphere, positions, self.safety_radius)
    }

    pub fn solve(&self, config: &SolverConfig) -> Result<Vec<Option<Scalar>>, QueryError> {
        let network = self.network(config);
        QueryEngine::new(&network).answer_all(&self.queries)
    }
}

pub fn format_case(number: usize, answers: &[Option<Scalar>]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Case {number}:");
    for answer in answers {
        match answer {
            Some(distance) => {
                let _ = writeln!(out, "{distance:.3}");
            }
            None => out.push_str("impossible\n"),
        }
    }
    out
}

/// Parses `input`, solves every case and renders the full output.
pub fn solve_text(input: &str, config: &SolverConfig) -> Result<String, SolveError> {
    let mut out = String::new();
    for (i, case) in parse_cases(input)?.iter().enumerate() {
        let answers = case.solve(config)?;
        out.push_str(&format_case(i + 1, &answers));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "3 600\n0 0\n10 0\n20 0\n2\n1 3 1200\n3 1 500\n1 100\n45 45\n1\n1 1 0\n";

    #[test]
    fn parses_multiple_cases() {
        let cases = parse_cases(SAMPLE).unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].airports.len(), 3);
        assert_eq!(cases[0].safety_radius, 600.0);
        assert_eq!(
            cases[0].airports[1],
            Airport {
                id: 2,
                lon: 10.0,
                lat: 0.0
            }
        );
        assert_eq!(
            cases[0].queries[1],
            Query {
                source: 2,
                destination: 0,
                fuel_capacity: 500.0
            }
        );
        assert_eq!(cases[1].queries.len(), 1);
    }

    #[test]
    fn huge_counts_fail_as_truncated_input() {
        assert_eq!(
            parse_cases("99999999999999 5\n0 0\n"),
            Err(ParseError::UnexpectedEnd {
                expected: "longitude"
            })
        );
        assert_eq!(
            parse_cases("1 5\n0 0\n99999999999999\n1 1 10\n"),
            Err(ParseError::UnexpectedEnd {
                expected: "source airport"
            })
        );
    }

    #[test]
    fn zero_airports_ends_input() {
        let cases = parse_cases("1 100\n0 0\n0\n0 0\n5 5 5").unwrap();
        assert_eq!(cases.len(), 1);
        assert!(cases[0].queries.is_empty());
    }

    #[test]
    fn reports_bad_tokens() {
        assert_eq!(
            parse_cases("2 abc"),
            Err(ParseError::InvalidToken {
                expected: "safety radius",
                token: "abc".into(),
                position: 2
            })
        );
        assert_eq!(
            parse_cases("1 100\n0 0"),
            Err(ParseError::UnexpectedEnd {
                expected: "query count"
            })
        );
        assert_eq!(
            parse_cases("1 100\n0 0\n1\n1 2 10"),
            Err(ParseError::AirportOutOfRange {
                query: 1,
                index: 2,
                count: 1
            })
        );
    }

    #[test]
    fn formats_answers() {
        let text = format_case(2, &[Some(1234.56789), None, Some(0.0)]);
        assert_eq!(text, "Case 2:\n1234.568\nimpossible\n0.000\n");
    }

    #[test]
    fn solves_sample_text() {
        let out = solve_text(SAMPLE, &SolverConfig::default()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Case 1:");
        assert_eq!(lines[1], "2223.549");
        assert_eq!(lines[2], "impossible");
        assert_eq!(lines[3], "Case 2:");
        assert_eq!(lines[4], "0.000");
    }
}
