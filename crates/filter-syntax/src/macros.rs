/// Turns a token path into a path string: `path!(orders.items[0].price)`.
#[macro_export]
macro_rules! path {
    ($($segment:tt)+) => {
        stringify!($($segment)+).replace(' ', "")
    };
}

/// Like [`path!`], but the field chain is checked against `$entity` by the
/// Rust compiler, so a renamed or mistyped field fails the build.
///
/// Only plain field chains are accepted; paths that index into or quantify
/// over collections use [`path!`].
#[macro_export]
macro_rules! field {
    ($entity:ty => $first:ident $(. $rest:ident)*) => {{
        #[allow(dead_code)]
        fn __field_exists(entity: &$entity) {
            let _ = &entity.$first $(.$rest)*;
        }
        stringify!($first $(.$rest)*).replace(' ', "")
    }};
}
