//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::parser::ast::*;
use crate::parser::lexer::Token;

/// A term as written: the node and a weight following it
type Term = (Node, Option<f64>);

/// Parse an algebra expression into its top-level fragments
///
/// Parsing is total: malformed input yields `Err`, never a panic. An empty
/// (or whitespace-only) input is a valid spec with zero fragments.
pub fn parse(input: &str) -> Result<AlgebraSpec, Vec<crate::ParseError>> {
    let len = input.len();

    let mut tokens = Vec::new();
    for item in crate::parser::lexer::lex(input) {
        match item {
            Ok((tok, span)) => tokens.push((tok, SimpleSpan::from(span))),
            Err(span) => {
                return Err(vec![crate::ParseError::Syntax {
                    message: format!("Unexpected character '{}'", &input[span.clone()]),
                    span,
                    expected: vec![],
                }])
            }
        }
    }

    // Turn the token list into a stream that chumsky can use
    let token_stream = Stream::from_iter(tokens)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    spec_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Parse an expression that must contain exactly one top-level fragment
pub fn parse_fragment(input: &str) -> Result<Fragment, Vec<crate::ParseError>> {
    let spec = parse(input)?;
    let count = spec.fragments.len();
    let mut fragments = spec.fragments.into_iter();
    match (fragments.next(), count) {
        (Some(fragment), 1) => Ok(fragment),
        _ => Err(vec![crate::ParseError::Syntax {
            span: 0..input.len(),
            message: format!("expected exactly one fragment, found {}", count),
            expected: vec![],
        }]),
    }
}

/// Build the term for `first (op weight? term)*`, rejecting mixed operators
/// and terms weighted twice
///
/// A lone term keeps its weight so an enclosing term can claim it.
fn build_expr(
    first: Term,
    rest: Vec<((Direction, Option<f64>), Term)>,
) -> Result<Term, &'static str> {
    let Some(((direction, _), _)) = rest.first() else {
        return Ok(first);
    };
    let direction = *direction;

    let mut children = Vec::with_capacity(rest.len() + 1);
    children.push(Child {
        node: first.0,
        weight: first.1,
    });
    for ((op, before), (node, after)) in rest {
        if op != direction {
            return Err("operators '|' and '/' cannot be mixed without parentheses");
        }
        children.push(Child {
            node,
            weight: single_weight(before, after)?,
        });
    }

    Ok((Node::Fragment(Fragment::new(direction, children)), None))
}

fn single_weight(a: Option<f64>, b: Option<f64>) -> Result<Option<f64>, &'static str> {
    match (a, b) {
        (Some(_), Some(_)) => Err("a term can only carry one weight"),
        (w, None) | (None, w) => Ok(w),
    }
}

fn spec_parser<'a, I>() -> impl Parser<'a, I, AlgebraSpec, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let area = select! {
        Token::Ident(s) => Node::Area(AreaId::new(s)),
    }
    .labelled("area id");

    let weight = select! {
        Token::Number(n) => n,
    }
    .delimited_by(just(Token::BraceOpen), just(Token::BraceClose))
    .try_map(|w, span| {
        if w.is_finite() && w > 0.0 {
            Ok(w)
        } else {
            Err(Rich::custom(span, "weight must be a finite number greater than zero"))
        }
    })
    .labelled("weight");

    let op = select! {
        Token::Bar => Direction::Row,
        Token::Slash => Direction::Column,
    };

    let expr = recursive(|expr| {
        let atom = choice((
            area.map(|node| (node, None::<f64>)),
            expr.delimited_by(just(Token::ParenOpen), just(Token::ParenClose)),
        ));

        let term = atom
            .then(weight.clone().or_not())
            .try_map(|((node, inner), outer), span| {
                single_weight(inner, outer)
                    .map(|weight| (node, weight))
                    .map_err(|msg| Rich::custom(span, msg))
            });

        term.clone()
            .then(
                op.then(weight.clone().or_not())
                    .then(term)
                    .repeated()
                    .collect::<Vec<_>>(),
            )
            .try_map(|(first, rest), span| {
                build_expr(first, rest).map_err(|msg| Rich::custom(span, msg))
            })
            .boxed()
    });

    // Independent fragments are separated by `*`
    expr.separated_by(just(Token::Star))
        .collect::<Vec<_>>()
        .then_ignore(end())
        .try_map(|terms: Vec<Term>, span| {
            let fragments = terms
                .into_iter()
                .map(|term| match term {
                    (Node::Fragment(fragment), None) => Ok(fragment),
                    (Node::Fragment(_), Some(_)) => {
                        Err(Rich::custom(span, "a top-level fragment cannot carry a weight"))
                    }
                    (leaf, weight) => Ok(Fragment::new(
                        Direction::Row,
                        vec![Child { node: leaf, weight }],
                    )),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(AlgebraSpec::new(fragments))
        })
}
