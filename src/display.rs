//! Presentation of search results.

use std::io::Write;

use crate::search::{SearchQuery, SearchResult};
use crate::Result;

/// Shows search results to the user.
pub trait Presenter {
    fn present(&mut self, query: &SearchQuery, results: &[SearchResult]) -> Result<()>;
}

/// Prints a numbered list of results.
pub struct PlainPresenter<W: Write> {
    out: W,
}

impl<W: Write> PlainPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl PlainPresenter<std::io::Stdout> {
    /// Presenter writing to the process's stdout.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> Presenter for PlainPresenter<W> {
    fn present(&mut self, query: &SearchQuery, results: &[SearchResult]) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "rebound: {}", query.search_terms())?;
        if results.is_empty() {
            writeln!(self.out, "  no results found")?;
        }
        for (i, result) in results.iter().enumerate() {
            match result.answers {
                Some(n) => writeln!(self.out, "  {}. {} ({} answers)", i + 1, result.title, n)?,
                None => writeln!(self.out, "  {}. {}", i + 1, result.title)?,
            }
            writeln!(self.out, "     {}", result.url)?;
        }
        self.out.flush()?;
        Ok(())
    }
}
