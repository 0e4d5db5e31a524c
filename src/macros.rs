//! Terse macros for everyday usage

/// Build [`Bindings`](crate::expand::Bindings) inline.
///
/// ```
/// let vars = pipewright::bindings! { "pat" => "TODO", "files" => ["a.rs", "b.rs"] };
/// assert_eq!(vars.len(), 2);
/// ```
#[macro_export]
macro_rules! bindings {
    ( $( $k:expr => $v:expr ),* $(,)? ) => {{
        #[allow(unused_mut)]
        let mut __b = $crate::expand::Bindings::new();
        $( __b.insert($k, $v); )*
        __b
    }};
}

/// Run a pipeline with the default builder.
#[macro_export]
macro_rules! sh {
    ($spec:expr) => {{
        $crate::easy::sh($spec, & $crate::expand::Bindings::new())
    }};
    ($spec:expr, $( $k:expr => $v:expr ),+ $(,)?) => {{
        $crate::easy::sh($spec, & $crate::bindings!{ $( $k => $v ),+ })
    }};
}

#[cfg(test)]
mod tests {
    use crate::expand::{expand, Value};

    #[test]
    fn bindings_macro_mixes_scalars_and_lists() {
        let vars = bindings! { "a" => "1", "b" => ["x", "y"], };
        assert_eq!(vars.get("a"), Some(&Value::Scalar("1".into())));
        assert_eq!(expand(&["$b", "$a"], &vars), vec!["x", "y", "1"]);
    }

    #[test]
    fn empty_bindings_macro() {
        let vars = bindings! {};
        assert!(vars.is_empty());
    }

    #[cfg(all(unix, feature = "exec"))]
    #[test]
    fn sh_macro_runs() {
        let out = sh!("test $a = $b", "a" => "x", "b" => "x").unwrap();
        assert!(out.exit_code().map(|c| c.success()).unwrap_or(false));
    }
}
