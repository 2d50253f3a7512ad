/// An enum over a set of wire-protocol tags stored as an unsigned integer,
/// with a fallible conversion back from the raw value.
macro_rules! uint_enum {
    ($(#[$gattr:meta])* pub enum $ty:ident { $($(#[$attr:meta])* $variant:ident = $val:expr,)* }) => {
        $(#[$gattr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $ty {
            $($(#[$attr])* $variant = $val,)*
        }

        impl ::std::convert::TryFrom<u8> for $ty {
            type Error = ();

            fn try_from(n: u8) -> Result<$ty, ()> {
                match n {
                    $(x if x == $ty::$variant as u8 => Ok($ty::$variant),)*
                    _ => Err(()),
                }
            }
        }
    };
}
