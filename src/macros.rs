/// Compile a literal pattern once and hand out a `&'static Regex`.
///
/// Only for patterns written in the source; runtime patterns (POS globs read
/// from rule files) go through `PosGlob::new` and report their errors.
#[macro_export]
macro_rules! static_regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}
