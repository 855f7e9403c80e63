/// Implements `From<E>` for every listed external error `E`, boxing it into the
/// `Unhandled` variant of the target enum
#[macro_export]
macro_rules! from_external_error {
    ($target:ident;) => {};
    ($target:ident; $head:path $(, $tail:path)*) => {
        impl From<$head> for $target {
            fn from(err: $head) -> Self { $target::Unhandled(Box::new(err)) }
        }
        $crate::from_external_error!($target; $($tail),*);
    };
}
