/// A cursor over the whitespace separated groups of a message.
///
/// The `=` end of message marker is stripped from the group it is attached to, and a bare `=`
/// disappears entirely.
#[derive(Debug, Clone)]
pub(crate) struct Tokens<'a> {
    tokens: Vec<&'a str>,
    pos: usize,
}

impl<'a> Tokens<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        let tokens = text
            .split_whitespace()
            .map(|tkn| tkn.trim_end_matches('='))
            .filter(|tkn| !tkn.is_empty())
            .collect();

        Tokens { tokens, pos: 0 }
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.pos).copied()
    }

    /// Consume up to `n` tokens. The slice is shorter than `n` only at the end of the message.
    pub(crate) fn take_group(&mut self, n: usize) -> &[&'a str] {
        let start = self.pos;
        let end = usize::min(start + n, self.tokens.len());
        self.pos = end;
        &self.tokens[start..end]
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let tkn = self.peek()?;
        self.pos += 1;
        Some(tkn)
    }
}
