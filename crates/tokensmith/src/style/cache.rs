//! Append-only memo of generated atomic rules.
//!
//! The cache maps each unique `(property, resolved value, breakpoint)`
//! tuple to one class name. Entries are never evicted: the table lives as
//! long as the cache value, typically one build or render context.
//!
//! Class names are derived from a BLAKE3 hash of the tuple, so the same
//! declaration gets the same class in every process. If two tuples ever
//! share a hash prefix, the later one takes a longer prefix.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::config::Config;
use crate::theme::media_condition;

/// Hex digits of the hash used for a class name before any collision.
const CLASS_HASH_LEN: usize = 8;

/// Identity of one atomic declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeclarationKey {
    pub property: String,
    pub value: String,
    /// Responsive index: 0 is the base, `i` applies from breakpoint `i`.
    pub breakpoint: usize,
}

impl DeclarationKey {
    pub fn new(property: impl Into<String>, value: impl Into<String>, breakpoint: usize) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            breakpoint,
        }
    }

    fn digest(&self) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.property.as_bytes());
        hasher.update(&[0]);
        hasher.update(self.value.as_bytes());
        hasher.update(&[0]);
        hasher.update(&(self.breakpoint as u64).to_le_bytes());
        hasher.finalize()
    }
}

/// Opaque identifier of a generated rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName(String);

impl ClassName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClassName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ClassName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A generated rule: one declaration, optionally behind a media condition.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomicRule {
    pub class_name: ClassName,
    pub property: String,
    pub value: String,
    pub breakpoint: usize,
    /// Minimum viewport width in pixels; `None` for base rules.
    pub min_width: Option<f64>,
}

impl AtomicRule {
    /// The bare declaration, e.g. `padding-left:1rem`.
    pub fn declaration(&self) -> String {
        format!("{}:{}", self.property, self.value)
    }

    /// The rule as CSS text, wrapped in `@media` when it has a breakpoint.
    ///
    /// ```rust
    /// use tokensmith::{DeclarationCache, DeclarationKey};
    ///
    /// let cache = DeclarationCache::new();
    /// let class = cache.get_or_insert(DeclarationKey::new("color", "red", 1), Some(640.0));
    /// let rule = cache.rule(&class).unwrap();
    /// assert_eq!(
    ///     rule.to_css(),
    ///     format!("@media (min-width: 640px){{.{}{{color:red}}}}", class)
    /// );
    /// ```
    pub fn to_css(&self) -> String {
        let rule = self.selector_block();
        match self.min_width {
            Some(px) => format!("@media {}{{{}}}", media_condition(px), rule),
            None => rule,
        }
    }

    fn selector_block(&self) -> String {
        format!(".{}{{{}}}", self.class_name, self.declaration())
    }
}

#[derive(Debug, Default)]
struct CacheTable {
    by_key: HashMap<DeclarationKey, ClassName>,
    /// Position of each class name's rule in `rules`.
    by_class: HashMap<ClassName, usize>,
    rules: Vec<AtomicRule>,
}

impl CacheTable {
    fn mint(&mut self, prefix: &str, key: &DeclarationKey) -> ClassName {
        let hex = key.digest().to_hex();
        let mut len = CLASS_HASH_LEN;
        loop {
            let candidate = ClassName(format!("{}{}", prefix, &hex[..len]));
            if !self.by_class.contains_key(&candidate) || len == hex.len() {
                return candidate;
            }
            len += 2;
        }
    }
}

/// Shared, append-only table of atomic rules.
///
/// Lookups take a read lock; a miss takes the write lock and inserts if
/// the key is still absent, so each unique declaration gets exactly one
/// class name even when several threads resolve styles at once.
///
/// Use one cache per theme: a rule records the media condition of the
/// theme that first produced it.
///
/// # Example
///
/// ```rust
/// use tokensmith::{DeclarationCache, DeclarationKey};
///
/// let cache = DeclarationCache::new();
/// let first = cache.get_or_insert(DeclarationKey::new("color", "red", 0), None);
/// let again = cache.get_or_insert(DeclarationKey::new("color", "red", 0), None);
/// assert_eq!(first, again);
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug)]
pub struct DeclarationCache {
    prefix: String,
    table: RwLock<CacheTable>,
}

impl DeclarationCache {
    /// Creates an empty cache with the default class prefix.
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Creates an empty cache using the configured class prefix.
    pub fn with_config(config: &Config) -> Self {
        Self {
            prefix: config.class_prefix.clone(),
            table: RwLock::new(CacheTable::default()),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the class name for `key`, generating its rule on first use.
    pub fn get_or_insert(&self, key: DeclarationKey, min_width: Option<f64>) -> ClassName {
        if let Some(class_name) = self.get(&key) {
            return class_name;
        }

        let mut table = self.table.write();
        if let Some(class_name) = table.by_key.get(&key) {
            return class_name.clone();
        }

        let class_name = table.mint(&self.prefix, &key);
        tracing::debug!(
            class = %class_name,
            property = %key.property,
            value = %key.value,
            breakpoint = key.breakpoint,
            "generated atomic rule"
        );
        let index = table.rules.len();
        table.by_class.insert(class_name.clone(), index);
        table.rules.push(AtomicRule {
            class_name: class_name.clone(),
            property: key.property.clone(),
            value: key.value.clone(),
            breakpoint: key.breakpoint,
            min_width,
        });
        table.by_key.insert(key, class_name.clone());
        class_name
    }

    /// Returns the class name already generated for `key`, if any.
    pub fn get(&self, key: &DeclarationKey) -> Option<ClassName> {
        self.table.read().by_key.get(key).cloned()
    }

    /// Returns the rule behind a class name.
    pub fn rule(&self, class_name: &ClassName) -> Option<AtomicRule> {
        let table = self.table.read();
        let index = *table.by_class.get(class_name)?;
        table.rules.get(index).cloned()
    }

    /// All rules, in the order they were generated.
    pub fn rules(&self) -> Vec<AtomicRule> {
        self.table.read().rules.clone()
    }

    pub fn len(&self) -> usize {
        self.table.read().rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.read().rules.is_empty()
    }

    /// Renders every rule as a stylesheet.
    ///
    /// Base rules come first, then one `@media` block per breakpoint in
    /// ascending order, so wider breakpoints override narrower ones at
    /// equal specificity. Within a block rules keep generation order.
    pub fn to_css(&self) -> String {
        let mut rules = self.rules();
        rules.sort_by_key(|rule| rule.breakpoint);

        let mut css = String::new();
        let mut open_block: Option<usize> = None;
        for rule in &rules {
            if open_block != Some(rule.breakpoint) {
                if open_block.is_some() {
                    css.push_str("}\n");
                }
                open_block = None;
                if let Some(px) = rule.min_width {
                    css.push_str(&format!("@media {}{{\n", media_condition(px)));
                    open_block = Some(rule.breakpoint);
                }
            }
            if open_block.is_some() {
                css.push_str("  ");
            }
            css.push_str(&rule.selector_block());
            css.push('\n');
        }
        if open_block.is_some() {
            css.push_str("}\n");
        }
        css
    }
}

impl Default for DeclarationCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_key_same_class() {
        let cache = DeclarationCache::new();
        let a = cache.get_or_insert(DeclarationKey::new("color", "red", 0), None);
        let b = cache.get_or_insert(DeclarationKey::new("color", "red", 0), None);
        assert_eq!(a, b);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_each_tuple_component_matters() {
        let cache = DeclarationCache::new();
        let base = cache.get_or_insert(DeclarationKey::new("color", "red", 0), None);
        let other_value = cache.get_or_insert(DeclarationKey::new("color", "blue", 0), None);
        let other_property = cache.get_or_insert(DeclarationKey::new("fill", "red", 0), None);
        let other_breakpoint = cache.get_or_insert(DeclarationKey::new("color", "red", 1), Some(640.0));

        let mut names = vec![base, other_value, other_property, other_breakpoint];
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 4);
        assert_eq!(cache.len(), 4);
    }

    #[test]
    fn test_class_names_are_stable_across_caches() {
        let key = DeclarationKey::new("padding-left", "1rem", 0);
        let a = DeclarationCache::new().get_or_insert(key.clone(), None);
        let b = DeclarationCache::new().get_or_insert(key, None);
        assert_eq!(a, b);
        assert!(a.as_str().starts_with("sx-"));
        assert_eq!(a.as_str().len(), "sx-".len() + CLASS_HASH_LEN);
    }

    #[test]
    fn test_configured_prefix() {
        let cache = DeclarationCache::with_config(&Config::default().class_prefix("t_"));
        let class = cache.get_or_insert(DeclarationKey::new("color", "red", 0), None);
        assert!(class.as_str().starts_with("t_"));
        assert_eq!(cache.prefix(), "t_");
    }

    #[test]
    fn test_hash_prefix_collision_lengthens_name() {
        let mut table = CacheTable::default();
        let key = DeclarationKey::new("color", "red", 0);
        let short = table.mint("x-", &key);
        table.by_class.insert(short.clone(), 0);

        let longer = table.mint("x-", &key);
        assert_ne!(short, longer);
        assert!(longer.as_str().starts_with(short.as_str()));
    }

    #[test]
    fn test_rules_in_generation_order() {
        let cache = DeclarationCache::new();
        cache.get_or_insert(DeclarationKey::new("b", "1", 0), None);
        cache.get_or_insert(DeclarationKey::new("a", "2", 0), None);
        let properties: Vec<String> = cache.rules().into_iter().map(|r| r.property).collect();
        assert_eq!(properties, vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_rule_lookup() {
        let cache = DeclarationCache::new();
        let class = cache.get_or_insert(DeclarationKey::new("color", "red", 0), None);
        let rule = cache.rule(&class).unwrap();
        assert_eq!(rule.declaration(), "color:red");
        assert_eq!(rule.to_css(), format!(".{}{{color:red}}", class));
        assert!(cache.rule(&ClassName("missing".into())).is_none());
    }

    #[test]
    fn test_rule_lookup_by_index_after_many_inserts() {
        let cache = DeclarationCache::new();
        let classes: Vec<(usize, ClassName)> = (0..200)
            .map(|i| (i, cache.get_or_insert(DeclarationKey::new("width", format!("{}px", i), i % 3), None)))
            .collect();

        for (i, class) in &classes {
            let rule = cache.rule(class).unwrap();
            assert_eq!(&rule.class_name, class);
            assert_eq!(rule.value, format!("{}px", i));
            assert_eq!(rule.breakpoint, i % 3);
        }
        assert_eq!(cache.len(), 200);
    }

    #[test]
    fn test_to_css_orders_base_before_media() {
        let cache = DeclarationCache::new();
        let wide = cache.get_or_insert(DeclarationKey::new("color", "blue", 2), Some(1024.0));
        let narrow = cache.get_or_insert(DeclarationKey::new("color", "green", 1), Some(640.0));
        let base = cache.get_or_insert(DeclarationKey::new("color", "red", 0), None);

        let expected = format!(
            ".{base}{{color:red}}\n\
             @media (min-width: 640px){{\n  .{narrow}{{color:green}}\n}}\n\
             @media (min-width: 1024px){{\n  .{wide}{{color:blue}}\n}}\n"
        );
        assert_eq!(cache.to_css(), expected);
    }

    #[test]
    fn test_empty_cache() {
        let cache = DeclarationCache::default();
        assert!(cache.is_empty());
        assert_eq!(cache.to_css(), "");
    }

    #[test]
    fn test_concurrent_inserts_share_one_class() {
        let cache = DeclarationCache::new();
        let names: Vec<ClassName> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| cache.get_or_insert(DeclarationKey::new("margin", "0", 0), None))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(names.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(cache.len(), 1);
    }
}
