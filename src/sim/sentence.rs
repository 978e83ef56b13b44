//! Ordered container of activated symbols for one generation

use super::symbol::ActivatedSymbol;

/// Append-only sequence of activated symbols
///
/// Rebuilt from scratch on every generation step. Only appending, splicing a
/// whole other sentence onto the tail, and in-order iteration are offered.
#[derive(Debug, Clone, Default)]
pub struct Sentence {
    symbols: Vec<ActivatedSymbol>,
}

impl Sentence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            symbols: Vec::with_capacity(capacity),
        }
    }

    /// Append one symbol
    pub fn push(&mut self, symbol: ActivatedSymbol) {
        self.symbols.push(symbol);
    }

    /// Splice all of `other` after the current tail, consuming it
    pub fn concat(&mut self, mut other: Sentence) {
        if self.symbols.is_empty() {
            self.symbols = other.symbols;
        } else {
            self.symbols.append(&mut other.symbols);
        }
    }

    /// Iterate in insertion order (restartable: call again for a new pass)
    pub fn iter(&self) -> std::slice::Iter<'_, ActivatedSymbol> {
        self.symbols.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, ActivatedSymbol> {
        self.symbols.iter_mut()
    }

    /// Most recently appended symbol
    pub(crate) fn last_mut(&mut self) -> Option<&mut ActivatedSymbol> {
        self.symbols.last_mut()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Grammar characters of the sentence, in order
    pub fn symbols(&self) -> String {
        self.symbols.iter().map(|s| s.symbol).collect()
    }
}

impl IntoIterator for Sentence {
    type Item = ActivatedSymbol;
    type IntoIter = std::vec::IntoIter<ActivatedSymbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.into_iter()
    }
}

impl<'a> IntoIterator for &'a Sentence {
    type Item = &'a ActivatedSymbol;
    type IntoIter = std::slice::Iter<'a, ActivatedSymbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.iter()
    }
}

impl FromIterator<ActivatedSymbol> for Sentence {
    fn from_iter<I: IntoIterator<Item = ActivatedSymbol>>(iter: I) -> Self {
        Self {
            symbols: iter.into_iter().collect(),
        }
    }
}
