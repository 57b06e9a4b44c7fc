// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Any single expression — works for literals, consts, or vars
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! join {
    // String-type concatenation shorthand!
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut s = ::std::string::String::from($first);
        $(
            s.push_str($rest);
        )+
        s
    }};
}

/// Compile a constant CSS selector once and hand out a `&'static Selector`.
///
/// The pattern is a literal, so a parse failure is a bug in this crate,
/// never a property of the page being read.
#[macro_export]
macro_rules! sel {
    ($css:literal) => {{
        static SEL: ::std::sync::LazyLock<::scraper::Selector> = ::std::sync::LazyLock::new(|| {
            ::scraper::Selector::parse($css).expect(concat!("invalid selector: ", $css))
        });
        &*SEL
    }};
}
