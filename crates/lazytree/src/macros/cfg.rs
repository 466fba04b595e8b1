#[doc(hidden)]
#[allow(unused_macros)]
macro_rules! cfg_serde {
    ($($item:item)*) => {
        $(
            #[cfg(feature = "serde")]
            $item
        )*
    }
}

#[doc(hidden)]
macro_rules! cfg_profiler {
    ($($item:item)*) => {
        $(
            #[cfg(feature = "profiler")]
            $item
        )*
    }
}
