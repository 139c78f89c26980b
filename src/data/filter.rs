use std::collections::HashMap;

use super::classify::{ClassificationCode, ClassificationResult};

// ---------------------------------------------------------------------------
// Search / measurement selectors
// ---------------------------------------------------------------------------

/// Which part of a classified header the search term is matched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchMode {
    /// Prefix match on leaf labels.
    #[default]
    Leaf,
    /// Substring match on group keys.
    Group,
}

/// Restricts results by classification code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MeasurementFilter {
    #[default]
    All,
    NonConstant,
    Zero,
    /// Everything except constant zero.
    NonZero,
}

impl MeasurementFilter {
    pub fn accepts(self, code: ClassificationCode) -> bool {
        match self {
            MeasurementFilter::All => true,
            MeasurementFilter::NonConstant => code == ClassificationCode::NotConstant,
            MeasurementFilter::Zero => code == ClassificationCode::ConstantZero,
            MeasurementFilter::NonZero => code != ClassificationCode::ConstantZero,
        }
    }
}

/// One selectable header as the UI lists it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterItem {
    pub group: String,
    pub leaf: String,
    pub code: ClassificationCode,
}

// ---------------------------------------------------------------------------
// Prefix trie over lower-cased leaf labels
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<char, TrieNode>,
    /// Items whose label passes through this node, in insertion order.
    items: Vec<usize>,
}

#[derive(Debug, Default)]
struct Trie {
    root: TrieNode,
}

impl Trie {
    fn insert(&mut self, word: &str, item: usize) {
        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node.children.entry(ch).or_default();
            node.items.push(item);
        }
    }

    fn search_prefix(&self, prefix: &str) -> &[usize] {
        let mut node = &self.root;
        for ch in prefix.chars() {
            match node.children.get(&ch) {
                Some(next) => node = next,
                None => return &[],
            }
        }
        &node.items
    }
}

// ---------------------------------------------------------------------------
// HeaderFilter
// ---------------------------------------------------------------------------

/// Search and measurement filtering over a classification result.
#[derive(Debug, Default)]
pub struct HeaderFilter {
    items: Vec<FilterItem>,
    trie: Trie,
    mode: SearchMode,
    measurement: MeasurementFilter,
    search_term: String,
}

impl HeaderFilter {
    /// Index every entry of `result`. Entries without a leaf label use
    /// their group key as label.
    pub fn new(result: &ClassificationResult) -> Self {
        let mut filter = HeaderFilter::default();
        for group in result.groups() {
            for entry in &group.entries {
                let leaf = entry.label().unwrap_or(group.key.as_str()).to_string();
                filter.trie.insert(&leaf.to_lowercase(), filter.items.len());
                filter.items.push(FilterItem {
                    group: group.key.clone(),
                    leaf,
                    code: entry.code(),
                });
            }
        }
        filter
    }

    pub fn set_mode(&mut self, mode: SearchMode) {
        self.mode = mode;
    }

    pub fn set_measurement(&mut self, measurement: MeasurementFilter) {
        self.measurement = measurement;
    }

    /// Matching is case-insensitive.
    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_lowercase();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Items passing the current search term and measurement filter.
    pub fn filter(&self) -> Vec<&FilterItem> {
        let measurement = self.measurement;
        let matched: Box<dyn Iterator<Item = &FilterItem> + '_> = match self.mode {
            _ if self.search_term.is_empty() => Box::new(self.items.iter()),
            SearchMode::Leaf => Box::new(
                self.trie
                    .search_prefix(&self.search_term)
                    .iter()
                    .map(|&i| &self.items[i]),
            ),
            SearchMode::Group => Box::new(
                self.items
                    .iter()
                    .filter(|item| item.group.to_lowercase().contains(&self.search_term)),
            ),
        };
        matched.filter(|item| measurement.accepts(item.code)).collect()
    }

    /// Number of indexed items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::classify::HeaderEntry;

    fn sample_result() -> ClassificationResult {
        use ClassificationCode::*;
        let entries = [
            ("Names", "first", NotConstant),
            ("Names", "second", ConstantZero),
            ("Names", "third", NotConstant),
            ("Ages", "fourth", ConstantZero),
            ("Ages", "fifth", NotConstant),
            ("Figures", "second", ConstantZero),
            ("Figures", "forth", NotConstant),
            ("Figures", "Seventh", ConstantNonzero),
        ];
        let mut result = ClassificationResult::new();
        for (group, label, code) in entries {
            result.insert_or_append(
                group,
                HeaderEntry::Leaf {
                    label: label.to_string(),
                    code,
                },
            );
        }
        result
    }

    fn leaves(items: &[&FilterItem]) -> Vec<String> {
        items
            .iter()
            .map(|i| format!("{}/{}", i.group, i.leaf))
            .collect()
    }

    #[test]
    fn test_empty_term_returns_all_in_order() {
        let filter = HeaderFilter::new(&sample_result());
        let items = filter.filter();
        assert_eq!(items.len(), 8);
        assert_eq!(items[0].leaf, "first");
        assert_eq!(items[7].leaf, "Seventh");
    }

    #[test]
    fn test_leaf_prefix_search() {
        let mut filter = HeaderFilter::new(&sample_result());
        filter.set_search_term("F");
        assert_eq!(
            leaves(&filter.filter()),
            ["Names/first", "Ages/fourth", "Ages/fifth", "Figures/forth"]
        );

        filter.set_search_term("fi");
        assert_eq!(leaves(&filter.filter()), ["Names/first", "Ages/fifth"]);

        filter.set_search_term("sev");
        assert_eq!(leaves(&filter.filter()), ["Figures/Seventh"]);

        filter.set_search_term("xyz");
        assert!(filter.filter().is_empty());
    }

    #[test]
    fn test_measurement_filter() {
        let mut filter = HeaderFilter::new(&sample_result());
        filter.set_search_term("f");
        filter.set_measurement(MeasurementFilter::NonConstant);
        assert_eq!(
            leaves(&filter.filter()),
            ["Names/first", "Ages/fifth", "Figures/forth"]
        );

        filter.set_measurement(MeasurementFilter::Zero);
        assert_eq!(leaves(&filter.filter()), ["Ages/fourth"]);

        filter.set_search_term("");
        filter.set_measurement(MeasurementFilter::NonZero);
        assert_eq!(filter.filter().len(), 5);
    }

    #[test]
    fn test_group_search() {
        let mut filter = HeaderFilter::new(&sample_result());
        filter.set_mode(SearchMode::Group);
        filter.set_search_term("ge");
        assert_eq!(leaves(&filter.filter()), ["Ages/fourth", "Ages/fifth"]);
    }

    #[test]
    fn test_bare_codes_use_group_as_leaf() {
        let mut result = ClassificationResult::new();
        result.insert_or_append("Speed", HeaderEntry::Code(ClassificationCode::NotConstant));
        let mut filter = HeaderFilter::new(&result);
        filter.set_search_term("spe");
        let items = filter.filter();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].leaf, "Speed");
        assert_eq!(items[0].group, "Speed");
    }
}
