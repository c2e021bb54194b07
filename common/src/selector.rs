//! Lista de amostras escaneadas
//!
//! Sequência ordenada e sem duplicatas. A ordem de leitura serve apenas
//! para exibição; a conciliação usa o conjunto.

use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct SampleSelector {
    codes: Vec<String>,
}

impl SampleSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adiciona um código lido. Retorna `false` se vazio ou repetido.
    pub fn add(&mut self, code: &str) -> bool {
        let code = code.trim();
        if code.is_empty() || self.contains(code) {
            return false;
        }
        self.codes.push(code.to_string());
        true
    }

    /// Remove um código lido por engano
    pub fn remove(&mut self, code: &str) -> bool {
        let code = code.trim();
        let before = self.codes.len();
        self.codes.retain(|c| c != code);
        self.codes.len() != before
    }

    pub fn clear(&mut self) {
        self.codes.clear();
    }

    pub fn list(&self) -> &[String] {
        &self.codes
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Conjunto usado na conciliação
    pub fn code_set(&self) -> HashSet<&str> {
        self.codes.iter().map(String::as_str).collect()
    }

    /// Texto para exibição ("Nenhuma ainda." quando vazia)
    pub fn display(&self) -> String {
        if self.codes.is_empty() {
            "Nenhuma ainda.".to_string()
        } else {
            self.codes.join(", ")
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for SampleSelector {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selector = Self::new();
        for code in iter {
            selector.add(code.as_ref());
        }
        selector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_trims_and_dedups() {
        let mut selector = SampleSelector::new();
        assert!(selector.add("  S1 "));
        assert!(!selector.add("S1"));
        assert_eq!(selector.len(), 1);
        assert_eq!(selector.list(), &["S1".to_string()]);
    }

    #[test]
    fn test_add_ignores_blank() {
        let mut selector = SampleSelector::new();
        assert!(!selector.add(""));
        assert!(!selector.add("   "));
        assert!(selector.is_empty());
    }

    #[test]
    fn test_case_sensitive() {
        let mut selector = SampleSelector::new();
        selector.add("abc");
        selector.add("ABC");
        assert_eq!(selector.len(), 2);
    }

    #[test]
    fn test_preserves_scan_order() {
        let selector: SampleSelector = ["C", "A", "B", "A"].into_iter().collect();
        assert_eq!(selector.list(), &["C", "A", "B"]);
    }

    #[test]
    fn test_clear_and_remove() {
        let mut selector: SampleSelector = ["S1", "S2"].into_iter().collect();
        assert!(selector.remove(" S1"));
        assert!(!selector.remove("S9"));
        assert_eq!(selector.list(), &["S2"]);
        selector.clear();
        assert!(selector.is_empty());
        assert_eq!(selector.display(), "Nenhuma ainda.");
    }

    #[test]
    fn test_code_set() {
        let selector: SampleSelector = ["S1", "S2"].into_iter().collect();
        let set = selector.code_set();
        assert!(set.contains("S1"));
        assert!(!set.contains("S3"));
    }
}
