//! Lexer for layout algebra expressions using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    // Operators
    #[token("|")]
    Bar,
    #[token("/")]
    Slash,
    #[token("*")]
    Star,

    // Delimiters
    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,

    // Literals
    #[regex(r"[a-zA-Z][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),
}

/// Lex input string into tokens with spans
///
/// Unrecognised input is reported as `Err(span)` so callers can reject it
/// instead of silently dropping characters.
pub fn lex(input: &str) -> impl Iterator<Item = Result<(Token, Span), Span>> + '_ {
    Token::lexer(input)
        .spanned()
        .map(|(tok, span)| tok.map(|t| (t, span.clone())).map_err(|_| span))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        lex(input).filter_map(Result::ok).map(|(t, _)| t).collect()
    }

    #[test]
    fn test_operators() {
        assert_eq!(tokens("| / *"), vec![Token::Bar, Token::Slash, Token::Star]);
    }

    #[test]
    fn test_area_ids() {
        assert_eq!(
            tokens("AD2 r b_1"),
            vec![
                Token::Ident("AD2".to_string()),
                Token::Ident("r".to_string()),
                Token::Ident("b_1".to_string()),
            ]
        );
    }

    #[test]
    fn test_weight_tokens() {
        assert_eq!(
            tokens("{  2 } {1.5}"),
            vec![
                Token::BraceOpen,
                Token::Number(2.0),
                Token::BraceClose,
                Token::BraceOpen,
                Token::Number(1.5),
                Token::BraceClose,
            ]
        );
    }

    #[test]
    fn test_whitespace_is_skipped() {
        assert_eq!(
            tokens(" ( A\n|\tB ) "),
            vec![
                Token::ParenOpen,
                Token::Ident("A".to_string()),
                Token::Bar,
                Token::Ident("B".to_string()),
                Token::ParenClose,
            ]
        );
    }

    #[test]
    fn test_unknown_character_is_an_error() {
        let results: Vec<_> = lex("A $ B").collect();
        assert!(results.iter().any(|r| r.is_err()));
        let bad = results.into_iter().find_map(Result::err).unwrap();
        assert_eq!(bad, 2..3);
    }
}
