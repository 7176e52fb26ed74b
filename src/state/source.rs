//! Token sources.
//!
//! Every refill draws from a [`TokenSource`] owned by the caller. Production
//! code uses [`RandomTokenSource`]; tests inject a [`SequenceTokenSource`] to
//! replay exact cascades.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::token::TokenType;

/// Supplies the token for a freshly (re)populated cell.
pub trait TokenSource {
    fn next_token(&mut self) -> TokenType;
}

impl<S: TokenSource + ?Sized> TokenSource for &mut S {
    fn next_token(&mut self) -> TokenType {
        (**self).next_token()
    }
}

impl<S: TokenSource + ?Sized> TokenSource for Box<S> {
    fn next_token(&mut self) -> TokenType {
        (**self).next_token()
    }
}

/// Uniform draws over [`TokenType::ALL`].
#[derive(Debug, Clone)]
pub struct RandomTokenSource {
    rng: StdRng,
}

impl RandomTokenSource {
    /// Reproducible source for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Source seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for RandomTokenSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl TokenSource for RandomTokenSource {
    fn next_token(&mut self) -> TokenType {
        TokenType::ALL[self.rng.gen_range(0..TokenType::ALL.len())]
    }
}

/// Replays a fixed sequence, starting over when it runs out.
#[derive(Debug, Clone)]
pub struct SequenceTokenSource {
    tokens: Vec<TokenType>,
    cursor: usize,
}

impl SequenceTokenSource {
    /// Create a source over `tokens`. An empty sequence falls back to
    /// cycling through [`TokenType::ALL`].
    pub fn new(tokens: impl IntoIterator<Item = TokenType>) -> Self {
        let mut tokens: Vec<TokenType> = tokens.into_iter().collect();
        if tokens.is_empty() {
            tokens = TokenType::ALL.to_vec();
        }
        Self { tokens, cursor: 0 }
    }

    /// Number of tokens handed out so far.
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl TokenSource for SequenceTokenSource {
    fn next_token(&mut self) -> TokenType {
        let token = self.tokens[self.cursor % self.tokens.len()];
        self.cursor += 1;
        token
    }
}
