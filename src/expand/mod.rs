//! Variable expansion for command words.

use std::collections::{BTreeMap, HashMap};

/// A binding value: one word, or a list spliced in as separate words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Scalar(String),
    List(Vec<String>),
}

impl From<&str> for Value {
    fn from(s: &str) -> Self { Value::Scalar(s.to_string()) }
}

impl From<String> for Value {
    fn from(s: String) -> Self { Value::Scalar(s) }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self { Value::Scalar(s.clone()) }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self { Value::List(v) }
}

impl From<Vec<&str>> for Value {
    fn from(v: Vec<&str>) -> Self { Value::List(v.into_iter().map(String::from).collect()) }
}

impl From<&[&str]> for Value {
    fn from(v: &[&str]) -> Self { Value::List(v.iter().map(|s| s.to_string()).collect()) }
}

impl<const N: usize> From<[&str; N]> for Value {
    fn from(v: [&str; N]) -> Self { Value::List(v.iter().map(|s| s.to_string()).collect()) }
}

pub trait VariableResolver {
    fn get(&self, name: &str) -> Option<Value>;
}

impl<R: VariableResolver + ?Sized> VariableResolver for &R {
    fn get(&self, name: &str) -> Option<Value> { (**self).get(name) }
}

impl VariableResolver for HashMap<String, Value> {
    fn get(&self, name: &str) -> Option<Value> { HashMap::get(self, name).cloned() }
}

impl VariableResolver for BTreeMap<String, Value> {
    fn get(&self, name: &str) -> Option<Value> { BTreeMap::get(self, name).cloned() }
}

/// Named values available to `$name` words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings { m: BTreeMap<String, Value> }

impl Bindings {
    pub fn new() -> Self { Self::default() }

    pub fn with<K: Into<String>, V: Into<Value>>(mut self, k: K, v: V) -> Self {
        self.m.insert(k.into(), v.into());
        self
    }

    pub fn with_list<K, I, S>(mut self, k: K, items: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.m.insert(k.into(), Value::List(items.into_iter().map(Into::into).collect()));
        self
    }

    pub fn insert<K: Into<String>, V: Into<Value>>(&mut self, k: K, v: V) -> Option<Value> {
        self.m.insert(k.into(), v.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> { self.m.get(name) }
    pub fn len(&self) -> usize { self.m.len() }
    pub fn is_empty(&self) -> bool { self.m.is_empty() }
}

impl VariableResolver for Bindings {
    fn get(&self, name: &str) -> Option<Value> { self.m.get(name).cloned() }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Bindings {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Bindings { m: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

/// Resolves names from the current process environment.
#[derive(Clone, Default)]
pub struct Env;
impl VariableResolver for Env {
    fn get(&self, name: &str) -> Option<Value> { std::env::var(name).ok().map(Value::Scalar) }
}

/// Looks names up in `first`, then `second`.
#[derive(Clone, Default)]
pub struct Layered<A, B> { pub first: A, pub second: B }

impl<A, B> Layered<A, B> {
    pub fn new(first: A, second: B) -> Self { Self { first, second } }
}

impl<A: VariableResolver, B: VariableResolver> VariableResolver for Layered<A, B> {
    fn get(&self, name: &str) -> Option<Value> {
        self.first.get(name).or_else(|| self.second.get(name))
    }
}

/// Replace `$name` words with their bound values.
///
/// A scalar always yields exactly one word, even when empty, and an unbound
/// name behaves like an empty scalar. A list is spliced in place, so a
/// single `$name` may produce any number of words.
pub fn expand<S, V>(words: &[S], vars: &V) -> Vec<String>
where
    S: AsRef<str>,
    V: VariableResolver + ?Sized,
{
    let mut out = Vec::with_capacity(words.len());
    for word in words {
        let word = word.as_ref();
        match word.strip_prefix('$') {
            Some(name) => match vars.get(name) {
                Some(Value::Scalar(s)) => out.push(s),
                Some(Value::List(items)) => out.extend(items),
                None => out.push(String::new()),
            },
            None => out.push(word.to_string()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [&str; 0] = [];

    #[test]
    fn empty_words_expand_to_nothing() {
        assert!(expand(&NONE, &Bindings::new()).is_empty());
    }

    #[test]
    fn scalar_replaces_word() {
        let vars = Bindings::new().with("x", "hello");
        assert_eq!(expand(&["$x"], &vars), vec!["hello"]);
    }

    #[test]
    fn missing_variable_is_one_empty_word() {
        assert_eq!(expand(&["$x"], &Bindings::new()), vec![""]);
    }

    #[test]
    fn empty_scalar_is_kept() {
        let vars = Bindings::new().with("x", "");
        assert_eq!(expand(&["a", "$x", "b"], &vars), vec!["a", "", "b"]);
    }

    #[test]
    fn list_is_spliced_in_order() {
        let vars = Bindings::new().with("x", ["a", "b", "c"]);
        assert_eq!(expand(&["$x"], &vars), vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_list_drops_the_word() {
        let vars = Bindings::new().with_list("x", Vec::<String>::new());
        assert_eq!(expand(&["lit", "$x", "lit2"], &vars), vec!["lit", "lit2"]);
    }

    #[test]
    fn literals_pass_through() {
        let vars = Bindings::new().with("x", "nope");
        assert_eq!(expand(&["x", "a$x", "-n"], &vars), vec!["x", "a$x", "-n"]);
    }

    #[test]
    fn lone_dollar_looks_up_empty_name() {
        let vars = Bindings::new().with("", "blank");
        assert_eq!(expand(&["$"], &vars), vec!["blank"]);
        assert_eq!(expand(&["$"], &Bindings::new()), vec![""]);
    }

    #[test]
    fn inputs_are_untouched() {
        let words = vec!["$x".to_string(), "y".to_string()];
        let vars = Bindings::new().with("x", ["1", "2"]);
        let before = vars.clone();
        let _ = expand(words.as_slice(), &vars);
        assert_eq!(words, vec!["$x", "y"]);
        assert_eq!(vars, before);
    }

    #[test]
    fn hash_map_resolver() {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("f".into(), "file.txt".into());
        assert_eq!(expand(&["cat", "$f"], &m), vec!["cat", "file.txt"]);
    }

    #[test]
    fn layered_prefers_first() {
        let a = Bindings::new().with("x", "first");
        let b = Bindings::new().with("x", "second").with("y", "only-b");
        let vars = Layered::new(a, b);
        assert_eq!(expand(&["$x", "$y", "$z"], &vars), vec!["first", "only-b", ""]);
    }

    #[test]
    fn env_resolver_reads_process_env() {
        let path = std::env::var("PATH").unwrap_or_default();
        let got = expand(&["$PATH"], &Env);
        assert_eq!(got, vec![path]);
    }

    #[test]
    fn bindings_from_iter() {
        let vars: Bindings = vec![("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(vars.len(), 2);
        assert_eq!(vars.get("b"), Some(&Value::Scalar("2".into())));
    }
}
