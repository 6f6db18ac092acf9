use combine::parser::char::{alpha_num, char, letter};
use combine::parser::range::recognize;
use combine::{eof, many, none_of, skip_many1};

/// A borrowed piece of template text, as produced by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece<'a> {
    /// text copied to the output unchanged
    Literal(&'a str),
    /// `$name` or `${name}`
    Role(&'a str),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid template \"{text}\" at offset {pos}: {msg}")]
pub struct Error {
    text: String,
    pos: usize,
    msg: String,
}

/// Split template text into literal and role pieces.
pub fn parse(text: &str) -> Result<Vec<Piece<'_>>, Error> {
    use combine::EasyParser;
    pieces()
        .easy_parse(text)
        .map(|(pieces, _remainder)| pieces)
        .map_err(|e| {
            let pos = e.position.translate_position(text);
            // combine's errors borrow the input, so stringify before returning:
            Error {
                text: text.to_owned(),
                pos,
                msg: format!("{}", e),
            }
        })
}

p! {
    ident_start() -> char, {
        char('_').or(letter())
    }
}

p! {
    ident_rest() -> Vec<char>, {
        many(char('_').or(alpha_num()))
    }
}

p! {
    ident() -> &'a str, {
        recognize(ident_start().and(ident_rest()))
    }
}

p! {
    literal() -> Piece<'a>, {
        recognize(skip_many1(none_of("$".chars()))).map(Piece::Literal)
    }
}

// once we've seen a '$', it must be followed by '$', '{ident}' or an ident.
p! {
    placeholder() -> Piece<'a>, {
        char('$').with(
            char('$')
                .map(|_| -> Piece<'a> { Piece::Literal("$") })
                .or(char('{').with(ident()).skip(char('}')).map(Piece::Role))
                .or(ident().map(Piece::Role))
        )
    }
}

p! {
    piece() -> Piece<'a>, {
        literal().or(placeholder())
    }
}

p! {
    pieces() -> Vec<Piece<'a>>, {
        many(piece()).skip(eof())
    }
}
