// Internal modules
mod parse;
#[allow(clippy::module_inception)]
mod token;
mod verify;

// Public API exports
pub use parse::DecodedToken;
pub use token::{Token, TokenState};
pub use verify::{construct_token, verify_token};

/// One of the three `.`-separated parts of a token's wire form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    Header,
    Payload,
    Signature,
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Segment::Header => "header",
            Segment::Payload => "payload",
            Segment::Signature => "signature",
        })
    }
}
