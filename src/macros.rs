// src/macros.rs

/// `s!()` → empty `String`, `s!(x)` → `String::from(x)`.
#[macro_export]
macro_rules! s {
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// Concatenate into a fresh `String`. The first piece goes through
/// `String::from`, the rest only need `AsRef<str>` (`&str`, `&String`, `Cow`).
#[macro_export]
macro_rules! join {
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut out = ::std::string::String::from($first);
        $(
            out.push_str(::std::convert::AsRef::<str>::as_ref(&$rest));
        )+
        out
    }};
}
